//! The `OS/2` table

use bytes::Buf;

use super::{truncated, TableError};
use crate::buffer_util::BufExt;

/// `fsSelection` bit marking an italic face.
const FS_SELECTION_ITALIC: u16 = 1;

/// The `OS/2` fields copied into an EOT header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Os2 {
    pub version: u16,
    pub weight_class: u16,
    pub fs_type: u16,
    pub panose: [u8; 10],
    pub unicode_range: [u32; 4],
    pub fs_selection: u16,
    /// Zero for version 0 tables, which end before the code page ranges.
    pub code_page_range: [u32; 2],
}

impl Os2 {
    pub fn from_buf(buffer: &mut impl Buf) -> Result<Self, TableError> {
        let err = truncated("OS/2");
        let mut os2 = Os2 {
            version: buffer.try_get_u16().map_err(&err)?,
            ..Os2::default()
        };
        // xAvgCharWidth
        buffer.try_skip(2).map_err(&err)?;
        os2.weight_class = buffer.try_get_u16().map_err(&err)?;
        // usWidthClass
        buffer.try_skip(2).map_err(&err)?;
        os2.fs_type = buffer.try_get_u16().map_err(&err)?;
        // subscript, superscript and strikeout metrics, sFamilyClass
        buffer.try_skip(22).map_err(&err)?;
        os2.panose = buffer.try_get_array().map_err(&err)?;
        for range in &mut os2.unicode_range {
            *range = buffer.try_get_u32().map_err(&err)?;
        }
        // achVendID
        buffer.try_skip(4).map_err(&err)?;
        os2.fs_selection = buffer.try_get_u16().map_err(&err)?;
        // usFirstCharIndex through usWinDescent
        buffer.try_skip(14).map_err(&err)?;
        if os2.version >= 1 {
            for range in &mut os2.code_page_range {
                *range = buffer.try_get_u32().map_err(&err)?;
            }
        }
        Ok(os2)
    }

    pub fn is_italic(&self) -> bool {
        self.fs_selection & FS_SELECTION_ITALIC != 0
    }
}
