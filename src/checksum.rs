use std::num::Wrapping;

use bytes::BufMut;
use thiserror::Error;

use crate::magic_numbers::CHECKSUM_MINUEND;

/// Byte range of `checkSumAdjustment` inside the `head` table.
///
/// table version: 4 bytes, font revision: 4 bytes, checksum adjustment: 4 bytes
const CHECKSUM_ADJUSTMENT_RANGE: std::ops::Range<usize> = 8..12;

#[derive(Debug, Error)]
pub enum ChecksumError {
    #[error("Truncated `head` table")]
    Truncated,
}

/// Calculates the sum of (big-endian) `u32`s in a block of data.
///
/// If the data is not a multiple of 4 bytes long, it is treated as if padded with zeroes at the
/// end.
pub fn calculate_checksum(data: &[u8]) -> u32 {
    let chunks = data.chunks_exact(4);
    let mut tail = [0; 4];
    tail[..chunks.remainder().len()].copy_from_slice(chunks.remainder());
    chunks
        .map(|slice| Wrapping(u32::from_be_bytes([slice[0], slice[1], slice[2], slice[3]])))
        .chain(std::iter::once(Wrapping(u32::from_be_bytes(tail))))
        .sum::<Wrapping<u32>>()
        .0
}

/// Calculates the checksum of a `head` table as it appears in a table directory, i.e. with its
/// `checkSumAdjustment` field taken as zero.
pub fn calculate_head_checksum(head_table: &[u8]) -> Result<u32, ChecksumError> {
    let adjustment = get_checksum_adjustment(head_table)?;
    Ok(calculate_checksum(head_table).wrapping_sub(adjustment))
}

/// Reads the `checkSumAdjustment` field of the `head` table.
pub fn get_checksum_adjustment(head_table: &[u8]) -> Result<u32, ChecksumError> {
    let field = head_table
        .get(CHECKSUM_ADJUSTMENT_RANGE)
        .ok_or(ChecksumError::Truncated)?;
    Ok(u32::from_be_bytes([field[0], field[1], field[2], field[3]]))
}

/// Sets the `checksum_adjustment` field in the `head` table to the specified value.
pub fn set_checksum_adjustment(head_table: &mut [u8], value: u32) -> Result<(), ChecksumError> {
    let mut checksum_field = head_table
        .get_mut(CHECKSUM_ADJUSTMENT_RANGE)
        .ok_or(ChecksumError::Truncated)?;
    checksum_field.put_u32(value);
    Ok(())
}

/// Calculates the value for the `checksum_adjustment` field in the `head` table.
///
/// `font` must contain the whole font with the adjustment field zeroed.
pub fn calculate_font_checksum_adjustment(font: &[u8]) -> u32 {
    CHECKSUM_MINUEND.wrapping_sub(calculate_checksum(font))
}
