use four_cc::FourCC;

pub const TTF_COLLECTION_FLAVOR: FourCC = FourCC(*b"ttcf");
pub const TTF_TRUE_TYPE_FLAVOR: FourCC = FourCC([0, 1, 0, 0]);
pub const TTF_APPLE_TRUE_TYPE_FLAVOR: FourCC = FourCC(*b"true");
pub const TTF_CFF_FLAVOR: FourCC = FourCC(*b"OTTO");

pub const WOFF_SIGNATURE: FourCC = FourCC(*b"wOFF");

pub const EOT_VERSION: u32 = 0x0002_0001;
pub const EOT_MAGIC_NUMBER: u16 = 0x504C;
/// `DEFAULT_CHARSET` from the Windows GDI headers
pub const EOT_DEFAULT_CHARSET: u8 = 1;

pub const CHECKSUM_MINUEND: u32 = 0xB1B0AFBA;
