//! Fixed-width primitive codecs.
//!
//! Every multi-byte encoding starts with the control octet from `layout`;
//! the 1-bit boolean encoding is the only one without it. Decoders accept
//! exactly the declared length and ignore the control octet's content.

use super::layout;
use super::reader::FrameReader;
use super::writer::FrameWriter;
use crate::error::DptError;

pub fn pack_b1(value: bool) -> Vec<u8> {
    vec![u8::from(value)]
}

pub fn unpack_b1(data: &[u8]) -> Result<bool, DptError> {
    let reader = FrameReader::exact(data, layout::B1_LEN)?;
    Ok(reader.read_u8(0)? & 1 == 1)
}

pub fn pack_u8(value: u8) -> Vec<u8> {
    FrameWriter::with_len(layout::U8_LEN)
        .put_u8(layout::U8_OFFSET, value)
        .finish()
}

pub fn unpack_u8(data: &[u8]) -> Result<u8, DptError> {
    FrameReader::exact(data, layout::U8_LEN)?.read_u8(layout::U8_OFFSET)
}

pub fn pack_v8(value: i8) -> Vec<u8> {
    pack_u8(value as u8)
}

pub fn unpack_v8(data: &[u8]) -> Result<i8, DptError> {
    unpack_u8(data).map(|raw| raw as i8)
}

pub fn pack_u16(value: u16) -> Vec<u8> {
    FrameWriter::with_len(layout::U16_LEN)
        .put_slice(layout::U16_RANGE, &value.to_be_bytes())
        .finish()
}

pub fn unpack_u16(data: &[u8]) -> Result<u16, DptError> {
    FrameReader::exact(data, layout::U16_LEN)?.read_u16_be(layout::U16_RANGE)
}

pub fn pack_v16(value: i16) -> Vec<u8> {
    pack_u16(value as u16)
}

pub fn unpack_v16(data: &[u8]) -> Result<i16, DptError> {
    unpack_u16(data).map(|raw| raw as i16)
}

pub fn pack_u32(value: u32) -> Vec<u8> {
    FrameWriter::with_len(layout::U32_LEN)
        .put_slice(layout::U32_RANGE, &value.to_be_bytes())
        .finish()
}

pub fn unpack_u32(data: &[u8]) -> Result<u32, DptError> {
    FrameReader::exact(data, layout::U32_LEN)?.read_u32_be(layout::U32_RANGE)
}

pub fn pack_v32(value: i32) -> Vec<u8> {
    pack_u32(value as u32)
}

pub fn unpack_v32(data: &[u8]) -> Result<i32, DptError> {
    unpack_u32(data).map(|raw| raw as i32)
}

pub fn pack_f32(value: f32) -> Vec<u8> {
    pack_u32(value.to_bits())
}

pub fn unpack_f32(data: &[u8]) -> Result<f32, DptError> {
    unpack_u32(data).map(f32::from_bits)
}

/// Exponent/mantissa pair of a 2-octet float, before bit placement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct F16Parts {
    pub exponent: u8,
    pub mantissa: i32,
}

/// Find the smallest exponent for which the scaled mantissa fits 12 signed
/// bits. Input is clamped to the encodable range first, which bounds the
/// search to 15 halvings.
pub fn f16_parts(value: f64) -> F16Parts {
    let clamped = if value.is_nan() {
        0.0
    } else {
        value.clamp(layout::F16_MIN, layout::F16_MAX)
    };
    let mut mantissa = (clamped * 100.0).round() as i32;
    let mut exponent = 0u8;
    while mantissa > layout::F16_MANTISSA_MAX || mantissa < layout::F16_MANTISSA_MIN {
        // truncates toward zero
        mantissa /= 2;
        exponent += 1;
    }
    F16Parts { exponent, mantissa }
}

pub fn pack_f16(value: f64) -> Vec<u8> {
    let F16Parts { exponent, mantissa } = f16_parts(value);
    let negative = mantissa < 0;
    let field = if negative {
        (mantissa + layout::F16_MANTISSA_BIAS) as u16
    } else {
        mantissa as u16
    };

    let mut high = (exponent & layout::F16_EXPONENT_MASK) << layout::F16_EXPONENT_SHIFT;
    high |= (field >> 8) as u8 & layout::F16_MANTISSA_HIGH_MASK;
    if negative {
        high |= layout::F16_SIGN_BIT;
    }

    FrameWriter::with_len(layout::F16_LEN)
        .put_slice(layout::U16_RANGE, &[high, field as u8])
        .finish()
}

pub fn unpack_f16(data: &[u8]) -> Result<f64, DptError> {
    let reader = FrameReader::exact(data, layout::F16_LEN)?;
    let raw = reader.read_u16_be(layout::U16_RANGE)?;
    let [high, low] = raw.to_be_bytes();

    let mut mantissa = (i32::from(high & layout::F16_MANTISSA_HIGH_MASK) << 8) | i32::from(low);
    if high & layout::F16_SIGN_BIT != 0 {
        mantissa -= layout::F16_MANTISSA_BIAS;
    }
    let exponent = (high >> layout::F16_EXPONENT_SHIFT) & layout::F16_EXPONENT_MASK;

    Ok(f64::from(mantissa) * f64::from(1u32 << exponent) / 100.0)
}
