//! WOFF 1.0 encoding

pub mod header;
pub mod table_directory;

use thiserror::Error;

use crate::{
    buffer_util::pad_to_multiple_of_four,
    sfnt::{Font, SfntError},
    tables::{head::Head, TableError, HEAD_TAG},
    woff::{
        header::{WoffHeader, WOFF_HEADER_SIZE},
        table_directory::{compress_table, WoffTableEntry, WOFF_TABLE_ENTRY_SIZE},
    },
};

#[derive(Error, Debug)]
pub enum WoffError {
    #[error(transparent)]
    Sfnt(#[from] SfntError),
    #[error(transparent)]
    Table(#[from] TableError),
    #[error("Table compression failed: {0}")]
    Compression(#[from] std::io::Error),
    #[error("Font too large for WOFF ({0} bytes)")]
    TooLarge(usize),
}

/// Wraps `font` in a WOFF 1.0 container.
///
/// Every table is zlib-compressed unless that does not make it smaller, in which case it is
/// stored as is. No metadata or private data block is written.
pub fn convert_font_to_woff(font: &Font) -> Result<Vec<u8>, WoffError> {
    let sfnt = font.to_sfnt()?;
    let (major_version, minor_version) = sfnt
        .find_table(HEAD_TAG)
        .map(|mut head| Head::from_buf(&mut head))
        .transpose()?
        .map_or((0, 0), |head| head.revision_parts());

    let records = sfnt.records();
    let header_end = WOFF_HEADER_SIZE + WOFF_TABLE_ENTRY_SIZE * records.len();
    let mut out = vec![0; header_end];
    let mut entries = Vec::with_capacity(records.len());
    for record in records {
        let table = sfnt.table_data(record);
        let compressed = compress_table(table)?;
        let stored = compressed.as_deref().unwrap_or(table);
        entries.push(WoffTableEntry {
            tag: record.tag,
            offset: to_u32(out.len())?,
            comp_length: to_u32(stored.len())?,
            orig_length: record.length,
            orig_checksum: record.checksum,
        });
        out.extend_from_slice(stored);
        pad_to_multiple_of_four(&mut out);
    }

    let header = WoffHeader {
        flavor: font.flavor(),
        length: to_u32(out.len())?,
        num_tables: entries.len() as u16,
        total_sfnt_size: to_u32(sfnt.data().len())?,
        major_version,
        minor_version,
    };
    let mut header_buffer = &mut out[..header_end];
    header.write_to_buf(&mut header_buffer);
    for entry in &entries {
        entry.write_to_buf(&mut header_buffer);
    }
    log::debug!(
        "WOFF: {} tables, {} -> {} bytes",
        entries.len(),
        sfnt.data().len(),
        out.len()
    );
    Ok(out)
}

fn to_u32(len: usize) -> Result<u32, WoffError> {
    u32::try_from(len).map_err(|_| WoffError::TooLarge(len))
}
