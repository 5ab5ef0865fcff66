use std::fmt;

use serde::Serialize;

use super::Datapoint;
use crate::codec::Primitive;
use crate::error::DptError;

/// Accepted text syntax for a scalar type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TextForm {
    /// Integer literal only.
    Integer,
    /// Decimal literal; integer backings truncate toward zero.
    Decimal,
}

/// Semantics of a scalar datapoint type.
#[derive(Debug)]
pub struct ScalarSpec {
    pub primitive: Primitive,
    pub unit: &'static str,
    /// Name used in range errors (e.g. "temperature").
    pub quantity: &'static str,
    /// Declared domain; `None` means the full primitive range.
    pub domain: Option<(f64, f64)>,
    pub text: TextForm,
}

impl ScalarSpec {
    /// Declared domain intersected with what the primitive can carry.
    pub fn limits(&self) -> (f64, f64) {
        let (low, high) = self.primitive.bounds();
        match self.domain {
            Some((min, max)) => (min.max(low), max.min(high)),
            None => (low, high),
        }
    }
}

/// Numeric value backed by one primitive codec (DPT 3/5/6/7/8/9/12/13/14).
#[derive(Debug, Clone, Copy)]
pub struct Scalar {
    spec: &'static ScalarSpec,
    pub value: f64,
}

impl Scalar {
    pub fn new(spec: &'static ScalarSpec, value: f64) -> Self {
        Self { spec, value }
    }

    pub fn spec(&self) -> &'static ScalarSpec {
        self.spec
    }

    fn saturate(&self, value: f64) -> f64 {
        let (min, max) = self.spec.limits();
        let saturated = if value.is_nan() {
            0.0f64.clamp(min, max)
        } else {
            value.clamp(min, max)
        };
        if saturated != value {
            tracing::trace!(
                quantity = self.spec.quantity,
                value,
                saturated,
                "saturated value to domain"
            );
        }
        saturated
    }

    fn parse_value(&self, text: &str) -> Result<f64, DptError> {
        let trimmed = text.trim();
        match self.spec.text {
            TextForm::Integer => trimmed
                .parse::<i64>()
                .map(|value| value as f64)
                .map_err(|err| DptError::invalid_number(text, err)),
            TextForm::Decimal => {
                let value = trimmed
                    .parse::<f64>()
                    .map_err(|err| DptError::invalid_number(text, err))?;
                if self.spec.primitive.is_integer() {
                    Ok(value.trunc())
                } else {
                    Ok(value)
                }
            }
        }
    }
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.spec.primitive.is_integer() {
            write!(f, "{}", self.value.trunc() as i64)
        } else {
            write!(f, "{:.2}", self.value)
        }
    }
}

impl Datapoint for Scalar {
    fn pack(&self) -> Vec<u8> {
        self.spec.primitive.encode(self.saturate(self.value))
    }

    fn unpack(&mut self, data: &[u8]) -> Result<(), DptError> {
        let value = self.spec.primitive.decode(data)?;
        let (min, max) = self.spec.limits();
        if !(min..=max).contains(&value) {
            tracing::debug!(quantity = self.spec.quantity, value, "decoded value outside domain");
            return Err(DptError::out_of_range(
                self.spec.quantity,
                format!("{value:.2} not in [{min}, {max}]"),
            ));
        }
        self.value = value;
        Ok(())
    }

    fn unit(&self) -> &'static str {
        self.spec.unit
    }

    fn to_f64(&self) -> f64 {
        self.value
    }

    fn parse_text(&mut self, text: &str) -> Result<Vec<u8>, DptError> {
        let value = self.parse_value(text)?;
        self.value = self.saturate(value);
        Ok(self.pack())
    }
}

#[cfg(test)]
mod tests {
    use super::{Scalar, ScalarSpec, TextForm};
    use crate::codec::{Primitive, primitives};
    use crate::error::{DptError, ErrorKind};
    use crate::types::Datapoint;

    static TEMPERATURE: ScalarSpec = ScalarSpec {
        primitive: Primitive::F16,
        unit: "°C",
        quantity: "temperature",
        domain: Some((-273.0, 670760.0)),
        text: TextForm::Decimal,
    };

    static PULSES: ScalarSpec = ScalarSpec {
        primitive: Primitive::U16,
        unit: "pulses",
        quantity: "pulses",
        domain: None,
        text: TextForm::Integer,
    };

    static COUNTER: ScalarSpec = ScalarSpec {
        primitive: Primitive::V8,
        unit: "counter pulses",
        quantity: "counter",
        domain: None,
        text: TextForm::Decimal,
    };

    #[test]
    fn temperature_saturates_on_pack() {
        let huge = Scalar::new(&TEMPERATURE, 671_000_000.0);
        let max = Scalar::new(&TEMPERATURE, 670_760.0);
        assert_eq!(huge.pack(), max.pack());

        let cold = Scalar::new(&TEMPERATURE, -1000.0);
        let floor = Scalar::new(&TEMPERATURE, -273.0);
        assert_eq!(cold.pack(), floor.pack());
    }

    #[test]
    fn temperature_rejects_decoded_value_below_floor() {
        let mut value = Scalar::new(&TEMPERATURE, 20.0);
        // -300.00: mantissa -1875, exponent 4
        let payload = primitives::pack_f16(-300.0);
        let err = value.unpack(&payload).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::OutOfRange);
        assert!(err.to_string().contains("temperature"));
        assert_eq!(value.value, 20.0);
    }

    #[test]
    fn temperature_display_and_unit() {
        let mut value = Scalar::new(&TEMPERATURE, 0.0);
        value.unpack(&[0x00, 0x08, 0x66]).unwrap();
        assert_eq!(value.to_string(), "21.50");
        assert_eq!(value.unit(), "°C");
        assert_eq!(value.to_f64(), 21.5);
    }

    #[test]
    fn integer_display_is_plain() {
        let mut value = Scalar::new(&PULSES, 0.0);
        value.unpack(&[0x00, 0x01, 0x00]).unwrap();
        assert_eq!(value.to_string(), "256");
    }

    #[test]
    fn integer_text_form_is_strict() {
        let mut value = Scalar::new(&PULSES, 7.0);
        assert_eq!(value.parse_text("513").unwrap(), vec![0x00, 0x02, 0x01]);
        let err = value.parse_text("12.5").unwrap_err();
        assert!(matches!(err, DptError::InvalidNumber { .. }));
        assert_eq!(err.kind(), ErrorKind::MalformedText);
        assert_eq!(value.value, 513.0);
    }

    #[test]
    fn decimal_text_truncates_for_integer_backing() {
        let mut value = Scalar::new(&COUNTER, 0.0);
        assert_eq!(value.parse_text("-7.9").unwrap(), vec![0x00, 0xF9]);
        assert_eq!(value.parse_text("500").unwrap(), vec![0x00, 0x7F]);
        assert_eq!(value.to_string(), "127");
    }

    #[test]
    fn float_text_parse() {
        let mut value = Scalar::new(&TEMPERATURE, 0.0);
        assert_eq!(value.parse_text("21.5").unwrap(), vec![0x00, 0x08, 0x66]);
        assert!(value.parse_text("warm").is_err());
        assert_eq!(value.value, 21.5);
    }

    #[test]
    fn wrong_length_is_invalid_length() {
        let mut value = Scalar::new(&PULSES, 0.0);
        let err = value.unpack(&[0x00, 0x01]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidLength);
    }
}
