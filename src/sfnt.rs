//! Reading fonts and font collections, and writing a single font back out as an SFNT file.

use bytes::{Buf, Bytes};
use four_cc::FourCC;
use thiserror::Error;

use crate::{
    buffer_util::{checked_slice, pad_to_multiple_of_four, BufExt, TruncatedError},
    checksum::{
        calculate_checksum, calculate_font_checksum_adjustment, calculate_head_checksum,
        set_checksum_adjustment, ChecksumError,
    },
    magic_numbers::{
        TTF_APPLE_TRUE_TYPE_FLAVOR, TTF_CFF_FLAVOR, TTF_COLLECTION_FLAVOR, TTF_TRUE_TYPE_FLAVOR,
    },
    tables::HEAD_TAG,
    ttf_header::{calculate_header_size, TableDirectory, TableDirectoryError, TableRecord},
};

#[derive(Error, Debug)]
pub enum ParseError {
    #[error("Truncated font file")]
    Truncated,
    #[error("Not a TrueType/OpenType font or collection (tag {0:?})")]
    UnknownFlavor(FourCC),
    #[error("Unsupported font collection version {0:#010x}")]
    UnsupportedCollectionVersion(u32),
    #[error("Table {0:?} extends past the end of the file")]
    TableOutOfBounds(FourCC),
}

impl From<TruncatedError> for ParseError {
    fn from(_: TruncatedError) -> Self {
        ParseError::Truncated
    }
}

impl From<TableDirectoryError> for ParseError {
    fn from(_: TableDirectoryError) -> Self {
        ParseError::Truncated
    }
}

#[derive(Error, Debug)]
pub enum SfntError {
    #[error(transparent)]
    Directory(#[from] TableDirectoryError),
    #[error(transparent)]
    Checksum(#[from] ChecksumError),
}

/// One table of a font. The data is a view into the file the font was read from.
#[derive(Debug, Clone)]
pub struct Table {
    pub tag: FourCC,
    pub data: Bytes,
}

/// A single font program: its SFNT version tag and its tables.
#[derive(Debug, Clone)]
pub struct Font {
    flavor: FourCC,
    tables: Vec<Table>,
}

impl Font {
    pub fn new(flavor: FourCC, tables: Vec<Table>) -> Self {
        Font { flavor, tables }
    }

    pub fn flavor(&self) -> FourCC {
        self.flavor
    }

    pub fn tables(&self) -> &[Table] {
        &self.tables
    }

    pub fn table(&self, tag: FourCC) -> Option<&Bytes> {
        self.tables
            .iter()
            .find(|table| table.tag == tag)
            .map(|table| &table.data)
    }

    /// Serializes the font as a standalone SFNT file.
    ///
    /// Tables are written sorted by tag and 4-byte aligned, table checksums are recomputed and
    /// `head.checkSumAdjustment` is updated for the new file.
    pub fn to_sfnt(&self) -> Result<Sfnt, SfntError> {
        let mut tables: Vec<&Table> = self.tables.iter().collect();
        tables.sort_by_key(|table| table.tag.0);

        let header_end = calculate_header_size(tables.len());
        let body_len: usize = tables.iter().map(|t| (t.data.len() + 3) & !3).sum();
        let mut out = Vec::with_capacity(header_end + body_len);
        out.resize(header_end, 0);

        let mut records = Vec::with_capacity(tables.len());
        for table in tables {
            let offset = out.len();
            out.extend_from_slice(&table.data);
            let data = &mut out[offset..];
            let checksum = if table.tag == HEAD_TAG {
                // zeroed until the whole file can be summed
                set_checksum_adjustment(data, 0)?;
                calculate_head_checksum(data)?
            } else {
                calculate_checksum(data)
            };
            records.push(TableRecord {
                tag: table.tag,
                checksum,
                offset: offset as u32,
                length: table.data.len() as u32,
            });
            pad_to_multiple_of_four(&mut out);
        }

        let directory = TableDirectory::new(self.flavor, records)?;
        directory.write_to_buf(&mut &mut out[..header_end]);
        if let Some(head) = directory.find_table(HEAD_TAG) {
            let adjustment = calculate_font_checksum_adjustment(&out);
            set_checksum_adjustment(&mut out[head.get_range()], adjustment)?;
        }
        Ok(Sfnt {
            data: out,
            directory,
        })
    }
}

/// A serialized SFNT file together with its (sorted) table directory.
#[derive(Debug)]
pub struct Sfnt {
    data: Vec<u8>,
    directory: TableDirectory,
}

impl Sfnt {
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn into_data(self) -> Vec<u8> {
        self.data
    }

    pub fn records(&self) -> &[TableRecord] {
        self.directory.records()
    }

    pub fn table_data(&self, record: &TableRecord) -> &[u8] {
        &self.data[record.get_range()]
    }

    pub fn find_table(&self, tag: FourCC) -> Option<&[u8]> {
        self.directory
            .find_table(tag)
            .map(|record| &self.data[record.get_range()])
    }
}

/// Reads every font in `data`, which holds either a single TrueType/OpenType font or a font
/// collection. Collection members are returned in the order of the collection header.
pub fn parse_fonts(data: Bytes) -> Result<Vec<Font>, ParseError> {
    let mut header = data.clone();
    match header.try_get_four_cc()? {
        TTF_COLLECTION_FLAVOR => {
            let version = header.try_get_u32()?;
            if !matches!(version, 0x0001_0000 | 0x0002_0000) {
                return Err(ParseError::UnsupportedCollectionVersion(version));
            }
            let num_fonts = header.try_get_u32()? as usize;
            if header.remaining() / 4 < num_fonts {
                return Err(ParseError::Truncated);
            }
            (0..num_fonts)
                .map(|_| parse_font_at(&data, header.get_u32()))
                .collect()
        }
        TTF_TRUE_TYPE_FLAVOR | TTF_CFF_FLAVOR | TTF_APPLE_TRUE_TYPE_FLAVOR => {
            Ok(vec![parse_font_at(&data, 0)?])
        }
        other => Err(ParseError::UnknownFlavor(other)),
    }
}

fn parse_font_at(data: &Bytes, offset: u32) -> Result<Font, ParseError> {
    let offset = offset as usize;
    if offset > data.len() {
        return Err(ParseError::Truncated);
    }
    let mut buffer = data.slice(offset..);
    let directory = TableDirectory::from_buf(&mut buffer)?;
    let flavor = directory.sfnt_version();
    if !matches!(
        flavor,
        TTF_TRUE_TYPE_FLAVOR | TTF_CFF_FLAVOR | TTF_APPLE_TRUE_TYPE_FLAVOR
    ) {
        return Err(ParseError::UnknownFlavor(flavor));
    }
    let tables = directory
        .records()
        .iter()
        .map(|record| {
            checked_slice(data, record.offset, record.length)
                .map(|data| Table {
                    tag: record.tag,
                    data,
                })
                .ok_or(ParseError::TableOutOfBounds(record.tag))
        })
        .collect::<Result<_, _>>()?;
    Ok(Font::new(flavor, tables))
}
