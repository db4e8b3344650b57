//! Readers for the few tables whose fields end up in WOFF and EOT headers.

pub mod head;
pub mod name;
pub mod os2;

use four_cc::FourCC;
use thiserror::Error;

use crate::buffer_util::TruncatedError;

pub const HEAD_TAG: FourCC = FourCC(*b"head");
pub const NAME_TAG: FourCC = FourCC(*b"name");
pub const OS2_TAG: FourCC = FourCC(*b"OS/2");

#[derive(Debug, Error)]
pub enum TableError {
    #[error("Truncated `{0}` table")]
    Truncated(&'static str),
    #[error("Unsupported `{table}` table format {format}")]
    UnsupportedFormat { table: &'static str, format: u16 },
}

/// Maps a short read to [`TableError::Truncated`] for the named table.
pub(crate) fn truncated(table: &'static str) -> impl Fn(TruncatedError) -> TableError {
    move |_| TableError::Truncated(table)
}
