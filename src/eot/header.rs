//! The EOT header (version 0x00020001)

use bytes::BufMut;

use crate::magic_numbers::{EOT_MAGIC_NUMBER, EOT_VERSION};

/// Size of the header up to and including `Padding1`.
pub const EOT_FIXED_HEADER_SIZE: usize = 82;

/// An EOT header. All fields are written little-endian; the name strings are UTF-16 code units.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct EotHeader {
    pub font_data_size: u32,
    pub flags: u32,
    pub panose: [u8; 10],
    pub charset: u8,
    pub italic: bool,
    pub weight: u32,
    pub fs_type: u16,
    pub unicode_range: [u32; 4],
    pub code_page_range: [u32; 2],
    pub checksum_adjustment: u32,
    pub family_name: Vec<u16>,
    pub style_name: Vec<u16>,
    pub version_name: Vec<u16>,
    pub full_name: Vec<u16>,
}

impl EotHeader {
    fn names(&self) -> [&[u16]; 4] {
        [
            &self.family_name,
            &self.style_name,
            &self.version_name,
            &self.full_name,
        ]
    }

    /// The size of the header in bytes, i.e. the offset of the font data.
    pub fn size(&self) -> usize {
        // each name has a size field and is followed by a padding field,
        // then comes the (empty) root string's size field
        EOT_FIXED_HEADER_SIZE
            + self
                .names()
                .iter()
                .map(|name| 2 + 2 * name.len() + 2)
                .sum::<usize>()
            + 2
    }

    /// The value of the `EOTSize` field.
    pub fn eot_size(&self) -> usize {
        self.size() + self.font_data_size as usize
    }

    pub fn write_to_buf(&self, buffer: &mut impl BufMut) {
        assert!(buffer.remaining_mut() >= self.size());
        buffer.put_u32_le(self.eot_size() as u32);
        buffer.put_u32_le(self.font_data_size);
        buffer.put_u32_le(EOT_VERSION);
        buffer.put_u32_le(self.flags);
        buffer.put_slice(&self.panose);
        buffer.put_u8(self.charset);
        buffer.put_u8(u8::from(self.italic));
        buffer.put_u32_le(self.weight);
        buffer.put_u16_le(self.fs_type);
        buffer.put_u16_le(EOT_MAGIC_NUMBER);
        for range in self.unicode_range {
            buffer.put_u32_le(range);
        }
        for range in self.code_page_range {
            buffer.put_u32_le(range);
        }
        buffer.put_u32_le(self.checksum_adjustment);
        // Reserved1..4, Padding1
        buffer.put_bytes(0, 16 + 2);
        for name in self.names() {
            buffer.put_u16_le((2 * name.len()) as u16);
            for &unit in name {
                buffer.put_u16_le(unit);
            }
            // Padding2..5
            buffer.put_u16_le(0);
        }
        // RootStringSize
        buffer.put_u16_le(0);
    }
}
