//! The `name` table

use bytes::{Buf, Bytes};

use super::{truncated, TableError};
use crate::buffer_util::{checked_slice, TruncatedError};

pub const FAMILY_NAME_ID: u16 = 1;
pub const SUBFAMILY_NAME_ID: u16 = 2;
pub const FULL_NAME_ID: u16 = 4;
pub const VERSION_STRING_ID: u16 = 5;

const WINDOWS_PLATFORM_ID: u16 = 3;
const WINDOWS_UNICODE_BMP_ENCODING_ID: u16 = 1;
const WINDOWS_ENGLISH_US_LANGUAGE_ID: u16 = 0x0409;

#[derive(Debug, Clone, Copy)]
struct NameRecord {
    platform_id: u16,
    encoding_id: u16,
    language_id: u16,
    name_id: u16,
    length: u16,
    offset: u16,
}

/// A parsed `name` table. String data is borrowed from the font.
#[derive(Debug)]
pub struct NameTable {
    records: Vec<NameRecord>,
    storage: Bytes,
}

impl NameTable {
    pub fn parse(data: &Bytes) -> Result<Self, TableError> {
        let err = truncated("name");
        let mut buffer = data.clone();
        let format = buffer.try_get_u16().map_err(&err)?;
        if format > 1 {
            return Err(TableError::UnsupportedFormat {
                table: "name",
                format,
            });
        }
        let count = buffer.try_get_u16().map_err(&err)?;
        let storage_offset = buffer.try_get_u16().map_err(&err)?;
        let records = (0..count)
            .map(|_| -> Result<_, TruncatedError> {
                Ok(NameRecord {
                    platform_id: buffer.try_get_u16()?,
                    encoding_id: buffer.try_get_u16()?,
                    language_id: buffer.try_get_u16()?,
                    name_id: buffer.try_get_u16()?,
                    length: buffer.try_get_u16()?,
                    offset: buffer.try_get_u16()?,
                })
            })
            .collect::<Result<_, _>>()
            .map_err(&err)?;
        // format 1 language tag records follow; they are never looked up
        let storage = data
            .len()
            .checked_sub(storage_offset as usize)
            .map(|_| data.slice(storage_offset as usize..))
            .ok_or(TableError::Truncated("name"))?;
        Ok(NameTable { records, storage })
    }

    /// Returns the Windows Unicode string for `name_id` as UTF-16 code units, preferring the
    /// US English record.
    pub fn windows_string(&self, name_id: u16) -> Option<Vec<u16>> {
        let windows = self
            .records
            .iter()
            .filter(|r| r.platform_id == WINDOWS_PLATFORM_ID && r.name_id == name_id);
        let record = windows
            .clone()
            .find(|r| {
                r.encoding_id == WINDOWS_UNICODE_BMP_ENCODING_ID
                    && r.language_id == WINDOWS_ENGLISH_US_LANGUAGE_ID
            })
            .or_else(|| windows.clone().next())?;
        let mut raw = checked_slice(
            &self.storage,
            u32::from(record.offset),
            u32::from(record.length),
        )?;
        let mut units = Vec::with_capacity(raw.len() / 2);
        while raw.remaining() >= 2 {
            units.push(raw.get_u16());
        }
        Some(units)
    }

    /// Like [`Self::windows_string`], decoded lossily for display.
    pub fn windows_string_lossy(&self, name_id: u16) -> Option<String> {
        self.windows_string(name_id)
            .map(|units| String::from_utf16_lossy(&units))
    }
}
