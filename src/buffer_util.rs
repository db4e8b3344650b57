use bytes::{Buf, Bytes};
use four_cc::FourCC;
pub use bytes::TryGetError as TruncatedError;

pub trait BufExt {
    fn try_get_four_cc(&mut self) -> Result<FourCC, TruncatedError>;
    fn try_get_array<const N: usize>(&mut self) -> Result<[u8; N], TruncatedError>;
    fn try_skip(&mut self, num_bytes: usize) -> Result<(), TruncatedError>;
}

impl<B> BufExt for B
where
    B: Buf,
{
    fn try_get_four_cc(&mut self) -> Result<FourCC, TruncatedError> {
        self.try_get_array().map(FourCC)
    }

    fn try_get_array<const N: usize>(&mut self) -> Result<[u8; N], TruncatedError> {
        let mut dest = [0; N];
        self.try_copy_to_slice(&mut dest)?;
        Ok(dest)
    }

    fn try_skip(&mut self, num_bytes: usize) -> Result<(), TruncatedError> {
        if self.remaining() < num_bytes {
            return Err(TruncatedError {
                requested: num_bytes,
                available: self.remaining(),
            });
        }
        self.advance(num_bytes);
        Ok(())
    }
}

/// Returns `len` bytes of `data` starting at `offset`, without copying, if they are in bounds.
pub fn checked_slice(data: &Bytes, offset: u32, len: u32) -> Option<Bytes> {
    let start = usize::try_from(offset).ok()?;
    let end = start.checked_add(usize::try_from(len).ok()?)?;
    (end <= data.len()).then(|| data.slice(start..end))
}

/// Rounds `len` up to the next multiple of four
pub fn padded_len(len: usize) -> usize {
    (len + 3) & !3
}

/// Pads the buffer with zeros so its length is a multiple of four
pub fn pad_to_multiple_of_four(buffer: &mut Vec<u8>) {
    buffer.resize(padded_len(buffer.len()), 0);
}
