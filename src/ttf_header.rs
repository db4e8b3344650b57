//! Types representing OpenType table directories

use bytes::{Buf, BufMut};
use four_cc::FourCC;
use thiserror::Error;

use crate::buffer_util::{BufExt, TruncatedError};

/// Size of a table directory header, excluding the records.
///
/// sfnt_version: 4 bytes, num_tables: 2 bytes, search_range: 2 bytes,
/// entry_selector: 2 bytes, range_shift: 2 bytes
pub const TABLE_DIRECTORY_HEADER_SIZE: usize = 12;

/// Size of one serialized [`TableRecord`].
pub const TABLE_RECORD_SIZE: usize = 16;

#[derive(Debug, Error)]
pub enum TableDirectoryError {
    #[error("Truncated table directory")]
    Truncated,
    #[error("Too many tables in font: {0}")]
    TooManyTables(usize),
}

impl From<TruncatedError> for TableDirectoryError {
    fn from(_: TruncatedError) -> Self {
        TableDirectoryError::Truncated
    }
}

/// Calculates the size of the OpenType table directory
pub fn calculate_header_size(num_tables: usize) -> usize {
    TABLE_DIRECTORY_HEADER_SIZE + TABLE_RECORD_SIZE * num_tables
}

/// An OpenType table directory
#[derive(Debug)]
pub struct TableDirectory {
    sfnt_version: FourCC,
    search_range: u16,
    entry_selector: u16,
    range_shift: u16,
    table_records: Vec<TableRecord>,
}

impl TableDirectory {
    /// Build a new table directory, sorting the table records.
    pub fn new(
        sfnt_version: FourCC,
        mut table_records: Vec<TableRecord>,
    ) -> Result<Self, TableDirectoryError> {
        table_records.sort_unstable_by_key(|table| table.tag.0);
        let num_tables: u16 = table_records
            .len()
            .try_into()
            .map_err(|_| TableDirectoryError::TooManyTables(table_records.len()))?;
        let (search_range, entry_selector, range_shift) = binary_search_params(num_tables);
        Ok(TableDirectory {
            sfnt_version,
            search_range,
            entry_selector,
            range_shift,
            table_records,
        })
    }

    /// Reads a table directory as found at the start of a font (or at a collection's directory
    /// offset). The binary search fields are read but not trusted.
    pub fn from_buf(buffer: &mut impl Buf) -> Result<Self, TableDirectoryError> {
        let sfnt_version = buffer.try_get_four_cc()?;
        let num_tables = buffer.try_get_u16()?;
        let search_range = buffer.try_get_u16()?;
        let entry_selector = buffer.try_get_u16()?;
        let range_shift = buffer.try_get_u16()?;
        if buffer.remaining() < TABLE_RECORD_SIZE * num_tables as usize {
            return Err(TableDirectoryError::Truncated);
        }
        let table_records = (0..num_tables)
            .map(|_| TableRecord::from_buf(buffer))
            .collect::<Result<_, _>>()?;
        Ok(TableDirectory {
            sfnt_version,
            search_range,
            entry_selector,
            range_shift,
            table_records,
        })
    }

    pub fn sfnt_version(&self) -> FourCC {
        self.sfnt_version
    }

    pub fn records(&self) -> &[TableRecord] {
        &self.table_records
    }

    pub fn write_to_buf(&self, buffer: &mut impl BufMut) {
        assert!(buffer.remaining_mut() >= calculate_header_size(self.table_records.len()));
        buffer.put_slice(&self.sfnt_version.0);
        buffer.put_u16(self.table_records.len() as u16);
        buffer.put_u16(self.search_range);
        buffer.put_u16(self.entry_selector);
        buffer.put_u16(self.range_shift);
        for table in &self.table_records {
            table.write_to_buf(buffer);
        }
    }

    /// Finds the specified table record. Only valid on directories built with [`Self::new`],
    /// whose records are sorted.
    pub fn find_table(&self, table_tag: FourCC) -> Option<TableRecord> {
        self.table_records
            .binary_search_by_key(&table_tag.0, |table| table.tag.0)
            .ok()
            .map(|idx| self.table_records[idx])
    }
}

/// Computes `(search_range, entry_selector, range_shift)` for `num_tables` records.
fn binary_search_params(num_tables: u16) -> (u16, u16, u16) {
    if num_tables == 0 {
        return (0, 0, 0);
    }
    // floor(log2(num_tables))
    let entry_selector = 15 - num_tables.leading_zeros() as u16;
    // (2**entry_selector) * 16
    let search_range = 1u32 << (entry_selector + 4);
    // num_tables * 16 - search_range
    let range_shift = (u32::from(num_tables) << 4) - search_range;
    (search_range as u16, entry_selector, range_shift as u16)
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TableRecord {
    pub tag: FourCC,
    pub checksum: u32,
    pub offset: u32,
    pub length: u32,
}

impl TableRecord {
    pub fn from_buf(buffer: &mut impl Buf) -> Result<Self, TruncatedError> {
        Ok(TableRecord {
            tag: buffer.try_get_four_cc()?,
            checksum: buffer.try_get_u32()?,
            offset: buffer.try_get_u32()?,
            length: buffer.try_get_u32()?,
        })
    }

    pub fn write_to_buf(&self, buffer: &mut impl BufMut) {
        buffer.put_slice(&self.tag.0);
        buffer.put_u32(self.checksum);
        buffer.put_u32(self.offset);
        buffer.put_u32(self.length);
    }

    pub fn get_range(&self) -> std::ops::Range<usize> {
        self.offset as usize..self.offset as usize + self.length as usize
    }
}
