use std::ops::Range;

/// Fixed-length payload builder. Offsets come from `layout`; the control
/// octet is never written and stays zero.
pub struct FrameWriter {
    payload: Vec<u8>,
}

impl FrameWriter {
    pub fn with_len(len: usize) -> Self {
        Self {
            payload: vec![0u8; len],
        }
    }

    pub fn put_u8(mut self, offset: usize, value: u8) -> Self {
        self.payload[offset] = value;
        self
    }

    pub fn put_slice(mut self, range: Range<usize>, bytes: &[u8]) -> Self {
        self.payload[range].copy_from_slice(bytes);
        self
    }

    pub fn finish(self) -> Vec<u8> {
        self.payload
    }
}
