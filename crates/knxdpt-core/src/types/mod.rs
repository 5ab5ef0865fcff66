//! Datapoint value types.
//!
//! Every type implements [`Datapoint`]: pack to a fixed-length payload,
//! unpack with length and domain validation, expose unit, display text and a
//! scalar projection, and parse a canonical text form straight to a payload.
//!
//! Families:
//! - [`Boolean`] and [`Scalar`] are generic and driven by static specs from
//!   the registry (one implementation for every 1.xxx / numeric type).
//! - [`TimeOfDay`], [`DateTime`], [`ColourRgb`], [`ColourRgbw`] and
//!   [`ColourXyY`] are composites with a fixed layout.

mod boolean;
mod colour;
mod date_time;
mod scalar;
mod text;
mod time_of_day;

use std::fmt;

use crate::error::DptError;

pub use boolean::{Boolean, BooleanSpec};
pub use colour::{ColourRgb, ColourRgbw, ColourXyY};
pub use date_time::DateTime;
pub use scalar::{Scalar, ScalarSpec, TextForm};
pub use time_of_day::TimeOfDay;

/// Uniform value contract shared by all datapoint types.
///
/// `Display` renders the human-readable form. Failed `unpack` and
/// `parse_text` calls leave the value untouched.
pub trait Datapoint: fmt::Display + fmt::Debug + Send + Sync {
    /// Encode the current value. Never fails; continuous numeric types
    /// saturate out-of-domain values to the nearest bound.
    fn pack(&self) -> Vec<u8>;

    /// Decode `data` into `self`.
    fn unpack(&mut self, data: &[u8]) -> Result<(), DptError>;

    /// Unit of measure, possibly empty.
    fn unit(&self) -> &'static str;

    /// Scalar view of the value. Only meaningful for scalar types; composites
    /// return an aggregate that should not drive application logic.
    fn to_f64(&self) -> f64;

    /// Parse the canonical text form, store it and return the packed payload.
    fn parse_text(&mut self, text: &str) -> Result<Vec<u8>, DptError>;
}
