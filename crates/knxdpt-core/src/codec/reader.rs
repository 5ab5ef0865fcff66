use std::ops::Range;

use crate::error::DptError;

/// Safe byte access over a payload whose length has already been checked.
pub struct FrameReader<'a> {
    payload: &'a [u8],
}

impl<'a> FrameReader<'a> {
    /// Wrap `payload`, rejecting any length other than `expected`.
    pub fn exact(payload: &'a [u8], expected: usize) -> Result<Self, DptError> {
        if payload.len() != expected {
            return Err(DptError::InvalidLength {
                expected,
                actual: payload.len(),
            });
        }
        Ok(Self { payload })
    }

    pub fn read_u8(&self, offset: usize) -> Result<u8, DptError> {
        self.payload
            .get(offset)
            .copied()
            .ok_or(DptError::InvalidLength {
                expected: offset + 1,
                actual: self.payload.len(),
            })
    }

    pub fn read_u16_be(&self, range: Range<usize>) -> Result<u16, DptError> {
        Ok(u16::from_be_bytes(self.read_array(range)?))
    }

    pub fn read_u32_be(&self, range: Range<usize>) -> Result<u32, DptError> {
        Ok(u32::from_be_bytes(self.read_array(range)?))
    }

    pub fn read_slice(&self, range: Range<usize>) -> Result<&'a [u8], DptError> {
        self.payload
            .get(range.clone())
            .ok_or(DptError::InvalidLength {
                expected: range.end,
                actual: self.payload.len(),
            })
    }

    fn read_array<const N: usize>(&self, range: Range<usize>) -> Result<[u8; N], DptError> {
        let bytes = self.read_slice(range)?;
        bytes.try_into().map_err(|_| DptError::InvalidLength {
            expected: N,
            actual: bytes.len(),
        })
    }
}
