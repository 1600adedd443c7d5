//! Positioned little-endian reader over a byte slice.
//!
//! All wire parsing in this crate goes through [`ByteCursor`] — headers are
//! read field by field, never by reinterpreting memory as a packed struct.

use crate::error::CodecError;

/// Cursor over `&[u8]` with an explicit position.
///
/// Short reads always fail with [`CodecError::TruncatedStream`]; there is no
/// zero-fill fallback. Sniffing advances the position like any other read, so
/// callers that re-decode after a failed probe must reset the position
/// themselves.
pub struct ByteCursor<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> ByteCursor<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    /// The full underlying slice, independent of position.
    pub fn data(&self) -> &'a [u8] {
        self.data
    }

    pub fn position(&self) -> usize {
        self.pos
    }

    /// Bytes left between the position and the end of the slice.
    pub fn remaining(&self) -> usize {
        self.data.len().saturating_sub(self.pos)
    }

    /// Absolute seek. Positions past the end are rejected.
    pub fn set_position(&mut self, pos: usize) -> Result<(), CodecError> {
        if pos > self.data.len() {
            return Err(CodecError::TruncatedStream);
        }
        self.pos = pos;
        Ok(())
    }

    pub fn skip(&mut self, n: usize) -> Result<(), CodecError> {
        let new_pos = self.pos.checked_add(n).ok_or(CodecError::TruncatedStream)?;
        self.set_position(new_pos)
    }

    pub fn read_u8(&mut self) -> Result<u8, CodecError> {
        if self.pos < self.data.len() {
            let b = self.data[self.pos];
            self.pos += 1;
            Ok(b)
        } else {
            Err(CodecError::TruncatedStream)
        }
    }

    pub fn read_u16_le(&mut self) -> Result<u16, CodecError> {
        Ok(u16::from_le_bytes(self.read_fixed::<2>()?))
    }

    pub fn read_u32_le(&mut self) -> Result<u32, CodecError> {
        Ok(u32::from_le_bytes(self.read_fixed::<4>()?))
    }

    pub fn read_i32_le(&mut self) -> Result<i32, CodecError> {
        Ok(i32::from_le_bytes(self.read_fixed::<4>()?))
    }

    pub fn read_fixed<const N: usize>(&mut self) -> Result<[u8; N], CodecError> {
        if self.pos + N > self.data.len() {
            return Err(CodecError::TruncatedStream);
        }
        let mut buf = [0u8; N];
        buf.copy_from_slice(&self.data[self.pos..self.pos + N]);
        self.pos += N;
        Ok(buf)
    }

    pub fn read_exact(&mut self, buf: &mut [u8]) -> Result<(), CodecError> {
        let n = buf.len();
        if self.pos + n > self.data.len() {
            return Err(CodecError::TruncatedStream);
        }
        buf.copy_from_slice(&self.data[self.pos..self.pos + n]);
        self.pos += n;
        Ok(())
    }
}
