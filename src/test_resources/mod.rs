//! Small synthetic fonts for tests.

use std::path::{Path, PathBuf};

use bytes::{BufMut, Bytes};
use four_cc::FourCC;

use crate::{
    magic_numbers::TTF_TRUE_TYPE_FLAVOR,
    sfnt::{Font, Table},
    ttf_header::{TableDirectory, TableRecord},
};

/// The parts of a font that show up in EOT headers.
#[derive(Debug, Clone)]
pub struct FontSpec {
    pub family: String,
    pub style: String,
    pub version: String,
    pub font_revision: u32,
    pub weight: u16,
    pub italic: bool,
    pub fs_type: u16,
    pub panose: [u8; 10],
    pub unicode_range: [u32; 4],
    pub code_page_range: [u32; 2],
}

impl Default for FontSpec {
    fn default() -> Self {
        FontSpec {
            family: "Test".into(),
            style: "Regular".into(),
            version: "Version 1.000".into(),
            font_revision: 0x0001_0000,
            weight: 400,
            italic: false,
            fs_type: 0x0008,
            panose: [2, 11, 5, 3, 3, 4, 3, 2, 2, 4],
            unicode_range: [0x8000_00AF, 0x5000_204A, 0, 0],
            code_page_range: [0x0000_0093, 0],
        }
    }
}

pub fn head_table(spec: &FontSpec) -> Vec<u8> {
    let mut data = Vec::with_capacity(54);
    data.put_u32(0x0001_0000);
    data.put_u32(spec.font_revision);
    // checkSumAdjustment
    data.put_u32(0);
    data.put_u32(0x5F0F_3CF5);
    // flags
    data.put_u16(0x000B);
    // unitsPerEm
    data.put_u16(1000);
    // created, modified
    data.put_u64(0);
    data.put_u64(0);
    // xMin, yMin, xMax, yMax
    for value in [0i16, -200, 500, 800] {
        data.put_i16(value);
    }
    // macStyle
    data.put_u16(u16::from(spec.italic) << 1 | u16::from(spec.weight >= 700));
    // lowestRecPPEM, fontDirectionHint, indexToLocFormat, glyphDataFormat
    for value in [8i16, 2, 0, 0] {
        data.put_i16(value);
    }
    data
}

pub fn hhea_table() -> Vec<u8> {
    let mut data = Vec::with_capacity(36);
    data.put_u32(0x0001_0000);
    // ascender, descender, lineGap
    for value in [800i16, -200, 0] {
        data.put_i16(value);
    }
    // advanceWidthMax
    data.put_u16(500);
    // minLeftSideBearing, minRightSideBearing, xMaxExtent, caretSlopeRise, caretSlopeRun,
    // caretOffset, 4 reserved, metricDataFormat
    for value in [0i16, 0, 500, 1, 0, 0, 0, 0, 0, 0, 0] {
        data.put_i16(value);
    }
    // numberOfHMetrics
    data.put_u16(1);
    data
}

pub fn maxp_table() -> Vec<u8> {
    // version 0.5, one glyph
    vec![0, 0, 0x50, 0, 0, 1]
}

pub fn post_table() -> Vec<u8> {
    let mut data = Vec::with_capacity(32);
    // version 3.0, italicAngle
    data.put_u32(0x0003_0000);
    data.put_u32(0);
    // underlinePosition, underlineThickness
    data.put_i16(-100);
    data.put_i16(50);
    // isFixedPitch and memory hints
    data.put_bytes(0, 20);
    data
}

pub fn os2_table(spec: &FontSpec) -> Vec<u8> {
    let mut data = Vec::with_capacity(86);
    // version
    data.put_u16(1);
    // xAvgCharWidth
    data.put_i16(500);
    data.put_u16(spec.weight);
    // usWidthClass
    data.put_u16(5);
    data.put_u16(spec.fs_type);
    // subscript, superscript and strikeout metrics, sFamilyClass
    data.put_bytes(0, 22);
    data.put_slice(&spec.panose);
    for range in spec.unicode_range {
        data.put_u32(range);
    }
    data.put_slice(b"TEST");
    let fs_selection = if spec.italic { 0x0001 } else { 0x0040 };
    data.put_u16(fs_selection);
    // usFirstCharIndex, usLastCharIndex
    data.put_u16(0x20);
    data.put_u16(0x7E);
    // sTypoAscender, sTypoDescender, sTypoLineGap, usWinAscent, usWinDescent
    for value in [800i16, -200, 0, 800, 200] {
        data.put_i16(value);
    }
    for range in spec.code_page_range {
        data.put_u32(range);
    }
    data
}

/// A format 0 `name` table with a Macintosh family name (which must never be picked) and
/// Windows English records for the family, style, full name and version.
pub fn name_table(spec: &FontSpec) -> Vec<u8> {
    let full_name = format!("{} {}", spec.family, spec.style);
    let mut records: Vec<(u16, u16, u16, u16, Vec<u8>)> =
        vec![(1, 0, 0, 1, b"Macintosh Family".to_vec())];
    for (name_id, value) in [
        (1, &spec.family),
        (2, &spec.style),
        (4, &full_name),
        (5, &spec.version),
    ] {
        let encoded = value.encode_utf16().flat_map(u16::to_be_bytes).collect();
        records.push((3, 1, 0x0409, name_id, encoded));
    }

    let mut data = Vec::new();
    data.put_u16(0);
    data.put_u16(records.len() as u16);
    data.put_u16(6 + 12 * records.len() as u16);
    let mut storage = Vec::new();
    for (platform_id, encoding_id, language_id, name_id, value) in &records {
        data.put_u16(*platform_id);
        data.put_u16(*encoding_id);
        data.put_u16(*language_id);
        data.put_u16(*name_id);
        data.put_u16(value.len() as u16);
        data.put_u16(storage.len() as u16);
        storage.extend_from_slice(value);
    }
    data.extend_from_slice(&storage);
    data
}

/// A TrueType-flavored font with the tables needed by `ttf-parser` and the EOT header, plus a
/// well-compressible `cvt ` table.
pub fn test_font(spec: &FontSpec) -> Font {
    let tables = [
        (*b"head", head_table(spec)),
        (*b"hhea", hhea_table()),
        (*b"maxp", maxp_table()),
        (*b"OS/2", os2_table(spec)),
        (*b"name", name_table(spec)),
        (*b"post", post_table()),
        (*b"cvt ", vec![0; 256]),
    ]
    .into_iter()
    .map(|(tag, data)| Table {
        tag: FourCC(tag),
        data: Bytes::from(data),
    })
    .collect();
    Font::new(TTF_TRUE_TYPE_FLAVOR, tables)
}

/// The serialized bytes of [`test_font`].
pub fn font_file(spec: &FontSpec) -> Vec<u8> {
    test_font(spec).to_sfnt().unwrap().into_data()
}

/// A version 1 font collection holding one [`test_font`] per spec. Tables are not shared.
pub fn collection_file(specs: &[FontSpec]) -> Vec<u8> {
    let mut out = Vec::new();
    out.put_slice(b"ttcf");
    out.put_u32(0x0001_0000);
    out.put_u32(specs.len() as u32);
    let offsets_start = out.len();
    out.resize(offsets_start + 4 * specs.len(), 0);

    for (index, spec) in specs.iter().enumerate() {
        let sfnt = test_font(spec).to_sfnt().unwrap();
        let base = out.len() as u32;
        out[offsets_start + 4 * index..][..4].copy_from_slice(&base.to_be_bytes());
        out.extend_from_slice(sfnt.data());
        // table offsets in a collection are relative to the start of the file
        let records = sfnt
            .records()
            .iter()
            .map(|record| TableRecord {
                offset: record.offset + base,
                ..*record
            })
            .collect();
        TableDirectory::new(TTF_TRUE_TYPE_FLAVOR, records)
            .unwrap()
            .write_to_buf(&mut &mut out[base as usize..]);
    }
    out
}

/// Writes `data` to `dir/name` and returns the path.
pub fn write_file(dir: &Path, name: &str, data: &[u8]) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, data).unwrap();
    path
}
