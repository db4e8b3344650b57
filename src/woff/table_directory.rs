//! The WOFF table directory

use std::io::{self, Write};

use bytes::BufMut;
use flate2::{write::ZlibEncoder, Compression};
use four_cc::FourCC;

pub const WOFF_TABLE_ENTRY_SIZE: usize = 20;

/// A WOFF table directory entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WoffTableEntry {
    pub tag: FourCC,
    /// Offset of the stored table data from the start of the WOFF file
    pub offset: u32,
    /// Length of the stored data; equal to `orig_length` if the table is not compressed
    pub comp_length: u32,
    pub orig_length: u32,
    /// Checksum of the table in the SFNT file the decoder rebuilds
    pub orig_checksum: u32,
}

impl WoffTableEntry {
    pub fn write_to_buf(&self, buffer: &mut impl BufMut) {
        buffer.put_slice(&self.tag.0);
        buffer.put_u32(self.offset);
        buffer.put_u32(self.comp_length);
        buffer.put_u32(self.orig_length);
        buffer.put_u32(self.orig_checksum);
    }
}

/// Zlib-compresses a table, returning `None` if the result is not smaller than the input.
pub fn compress_table(data: &[u8]) -> io::Result<Option<Vec<u8>>> {
    let mut encoder = ZlibEncoder::new(Vec::with_capacity(data.len()), Compression::best());
    encoder.write_all(data)?;
    let compressed = encoder.finish()?;
    Ok((compressed.len() < data.len()).then_some(compressed))
}
