//! Wire-level codecs.
//!
//! Structure mirrors the protocol decoders of this workspace:
//! - `layout`: offsets, lengths and bit masks (source of truth)
//! - `reader` / `writer`: exact-length, bounds-checked byte access
//! - `primitives`: fixed-width value codecs
//! - `flags`: bit-flag octets for composite types
//!
//! Everything here is pure; no state is kept between calls.

pub mod flags;
pub mod layout;
pub mod primitives;
pub mod reader;
pub mod writer;

use serde::Serialize;

use crate::error::DptError;

/// Primitive backing a scalar datapoint type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Primitive {
    U8,
    V8,
    U16,
    V16,
    U32,
    V32,
    F16,
    F32,
}

impl Primitive {
    /// Declared wire length, control octet included.
    pub fn wire_len(self) -> usize {
        match self {
            Primitive::U8 | Primitive::V8 => layout::U8_LEN,
            Primitive::U16 | Primitive::V16 => layout::U16_LEN,
            Primitive::F16 => layout::F16_LEN,
            Primitive::U32 | Primitive::V32 => layout::U32_LEN,
            Primitive::F32 => layout::F32_LEN,
        }
    }

    pub fn is_integer(self) -> bool {
        !matches!(self, Primitive::F16 | Primitive::F32)
    }

    /// Representable range of the primitive.
    pub fn bounds(self) -> (f64, f64) {
        match self {
            Primitive::U8 => (0.0, f64::from(u8::MAX)),
            Primitive::V8 => (f64::from(i8::MIN), f64::from(i8::MAX)),
            Primitive::U16 => (0.0, f64::from(u16::MAX)),
            Primitive::V16 => (f64::from(i16::MIN), f64::from(i16::MAX)),
            Primitive::U32 => (0.0, f64::from(u32::MAX)),
            Primitive::V32 => (f64::from(i32::MIN), f64::from(i32::MAX)),
            Primitive::F16 => (layout::F16_MIN, layout::F16_MAX),
            Primitive::F32 => (f64::from(f32::MIN), f64::from(f32::MAX)),
        }
    }

    /// Encode `value`. Integer backings truncate toward zero and saturate at
    /// their bounds; callers apply tighter domain clamps beforehand.
    pub fn encode(self, value: f64) -> Vec<u8> {
        match self {
            Primitive::U8 => primitives::pack_u8(value as u8),
            Primitive::V8 => primitives::pack_v8(value as i8),
            Primitive::U16 => primitives::pack_u16(value as u16),
            Primitive::V16 => primitives::pack_v16(value as i16),
            Primitive::U32 => primitives::pack_u32(value as u32),
            Primitive::V32 => primitives::pack_v32(value as i32),
            Primitive::F16 => primitives::pack_f16(value),
            Primitive::F32 => primitives::pack_f32(value as f32),
        }
    }

    pub fn decode(self, data: &[u8]) -> Result<f64, DptError> {
        match self {
            Primitive::U8 => primitives::unpack_u8(data).map(f64::from),
            Primitive::V8 => primitives::unpack_v8(data).map(f64::from),
            Primitive::U16 => primitives::unpack_u16(data).map(f64::from),
            Primitive::V16 => primitives::unpack_v16(data).map(f64::from),
            Primitive::U32 => primitives::unpack_u32(data).map(f64::from),
            Primitive::V32 => primitives::unpack_v32(data).map(f64::from),
            Primitive::F16 => primitives::unpack_f16(data),
            Primitive::F32 => primitives::unpack_f32(data).map(f64::from),
        }
    }
}
