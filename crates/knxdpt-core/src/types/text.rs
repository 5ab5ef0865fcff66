use std::fmt::Display;
use std::str::FromStr;

use crate::error::DptError;

/// Split comma-separated text into exactly `expected` fields.
pub(crate) fn fields_exact(text: &str, expected: usize) -> Result<Vec<&str>, DptError> {
    let fields: Vec<&str> = text.split(',').collect();
    if fields.len() != expected {
        return Err(DptError::FieldCount {
            expected,
            actual: fields.len(),
        });
    }
    Ok(fields)
}

/// Split comma-separated text into at least `expected` fields.
pub(crate) fn fields_at_least(text: &str, expected: usize) -> Result<Vec<&str>, DptError> {
    let fields: Vec<&str> = text.split(',').collect();
    if fields.len() < expected {
        return Err(DptError::FieldCount {
            expected,
            actual: fields.len(),
        });
    }
    Ok(fields)
}

/// Parse one numeric field, tagging failures with the field name.
pub(crate) fn parse_field<T>(field: &'static str, text: &str) -> Result<T, DptError>
where
    T: FromStr,
    T::Err: Display,
{
    text.trim()
        .parse::<T>()
        .map_err(|err| DptError::invalid_number(text, err).in_field(field))
}

/// Parse one integer field that must fit `T`; values that parse but do not
/// fit are out of range rather than malformed.
pub(crate) fn parse_bounded<T>(field: &'static str, text: &str) -> Result<T, DptError>
where
    T: TryFrom<i64> + Bounded + Display,
{
    let value: i64 = parse_field(field, text)?;
    T::try_from(value).map_err(|_| {
        DptError::out_of_range("value", format!("{value} not in [{}, {}]", T::MIN, T::MAX))
            .in_field(field)
    })
}

/// Integer field types with known bounds.
pub(crate) trait Bounded: Sized {
    const MIN: Self;
    const MAX: Self;
}

impl Bounded for u8 {
    const MIN: Self = u8::MIN;
    const MAX: Self = u8::MAX;
}

impl Bounded for u16 {
    const MIN: Self = u16::MIN;
    const MAX: Self = u16::MAX;
}

/// `"1"` or case-insensitive `"true"`.
pub(crate) fn parse_flag(text: &str) -> bool {
    let text = text.trim();
    text == "1" || text.eq_ignore_ascii_case("true")
}
