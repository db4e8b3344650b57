//! The `head` table

use bytes::Buf;

use super::{truncated, TableError};

/// The `head` fields needed when wrapping a font.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Head {
    /// `fontRevision` as a 16.16 fixed point number
    pub font_revision: u32,
    pub checksum_adjustment: u32,
}

impl Head {
    pub fn from_buf(buffer: &mut impl Buf) -> Result<Self, TableError> {
        let err = truncated("head");
        let _version = buffer.try_get_u32().map_err(&err)?;
        let font_revision = buffer.try_get_u32().map_err(&err)?;
        let checksum_adjustment = buffer.try_get_u32().map_err(&err)?;
        Ok(Head {
            font_revision,
            checksum_adjustment,
        })
    }

    /// The integer and fractional halves of the revision, as WOFF stores them.
    pub fn revision_parts(&self) -> (u16, u16) {
        ((self.font_revision >> 16) as u16, self.font_revision as u16)
    }
}
