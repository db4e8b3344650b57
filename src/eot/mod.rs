//! Embedded OpenType encoding

pub mod header;

use thiserror::Error;

use crate::{
    eot::header::EotHeader,
    magic_numbers::EOT_DEFAULT_CHARSET,
    sfnt::{Font, SfntError},
    tables::{
        head::Head,
        name::{NameTable, FAMILY_NAME_ID, FULL_NAME_ID, SUBFAMILY_NAME_ID, VERSION_STRING_ID},
        os2::Os2,
        TableError, HEAD_TAG, NAME_TAG, OS2_TAG,
    },
};

#[derive(Error, Debug)]
pub enum EotError {
    #[error(transparent)]
    Sfnt(#[from] SfntError),
    #[error(transparent)]
    Table(#[from] TableError),
    #[error("Missing `{0}` table")]
    MissingTable(&'static str),
    #[error("Font too large for EOT ({0} bytes)")]
    TooLarge(usize),
}

/// Wraps `font` in an uncompressed version 0x00020001 EOT file.
///
/// Header fields come from the `OS/2`, `head` and `name` tables; a font without a `name` table
/// gets empty name strings.
pub fn convert_font_to_eot(font: &Font) -> Result<Vec<u8>, EotError> {
    let sfnt = font.to_sfnt()?;
    let mut os2_data = sfnt
        .find_table(OS2_TAG)
        .ok_or(EotError::MissingTable("OS/2"))?;
    let os2 = Os2::from_buf(&mut os2_data)?;
    let mut head_data = sfnt
        .find_table(HEAD_TAG)
        .ok_or(EotError::MissingTable("head"))?;
    let head = Head::from_buf(&mut head_data)?;
    let names = font.table(NAME_TAG).map(NameTable::parse).transpose()?;
    let name = |name_id| {
        names
            .as_ref()
            .and_then(|names| names.windows_string(name_id))
            .unwrap_or_default()
    };

    let font_data = sfnt.data();
    let header = EotHeader {
        font_data_size: u32::try_from(font_data.len())
            .map_err(|_| EotError::TooLarge(font_data.len()))?,
        flags: 0,
        panose: os2.panose,
        charset: EOT_DEFAULT_CHARSET,
        italic: os2.is_italic(),
        weight: u32::from(os2.weight_class),
        fs_type: os2.fs_type,
        unicode_range: os2.unicode_range,
        code_page_range: os2.code_page_range,
        checksum_adjustment: head.checksum_adjustment,
        family_name: name(FAMILY_NAME_ID),
        style_name: name(SUBFAMILY_NAME_ID),
        version_name: name(VERSION_STRING_ID),
        full_name: name(FULL_NAME_ID),
    };
    if u32::try_from(header.eot_size()).is_err() {
        return Err(EotError::TooLarge(header.eot_size()));
    }

    let mut out = Vec::with_capacity(header.eot_size());
    header.write_to_buf(&mut out);
    out.extend_from_slice(font_data);
    log::debug!(
        "EOT for {:?}: {} byte header, {} bytes of font data",
        names
            .as_ref()
            .and_then(|names| names.windows_string_lossy(FULL_NAME_ID)),
        header.size(),
        font_data.len()
    );
    Ok(out)
}
