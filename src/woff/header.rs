//! The WOFF header

use bytes::BufMut;
use four_cc::FourCC;

use crate::magic_numbers::WOFF_SIGNATURE;

pub const WOFF_HEADER_SIZE: usize = 44;

/// The fields of a WOFF header that vary between files. The signature is always `wOFF`, and the
/// metadata and private block fields are always zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WoffHeader {
    /// The "sfnt version" of the wrapped font
    pub flavor: FourCC,
    /// Total size of the WOFF file
    pub length: u32,
    pub num_tables: u16,
    /// Size of the SFNT file a decoder will rebuild, including padding
    pub total_sfnt_size: u32,
    pub major_version: u16,
    pub minor_version: u16,
}

impl WoffHeader {
    pub fn write_to_buf(&self, buffer: &mut impl BufMut) {
        assert!(buffer.remaining_mut() >= WOFF_HEADER_SIZE);
        buffer.put_slice(&WOFF_SIGNATURE.0);
        buffer.put_slice(&self.flavor.0);
        buffer.put_u32(self.length);
        buffer.put_u16(self.num_tables);
        // reserved
        buffer.put_u16(0);
        buffer.put_u32(self.total_sfnt_size);
        buffer.put_u16(self.major_version);
        buffer.put_u16(self.minor_version);
        // metaOffset, metaLength, metaOrigLength, privOffset, privLength
        buffer.put_bytes(0, 20);
    }
}
