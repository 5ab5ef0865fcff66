use std::fmt;

use super::Datapoint;
use crate::codec::primitives;
use crate::error::DptError;

/// Semantics of a 1-bit datapoint type.
///
/// `true_tokens` lists the words accepted as `true` by `parse_text` besides
/// `"1"`. The list is per type and may be empty.
#[derive(Debug)]
pub struct BooleanSpec {
    pub true_word: &'static str,
    pub false_word: &'static str,
    pub true_tokens: &'static [&'static str],
}

/// 1-bit value (DPT 1.xxx).
#[derive(Debug, Clone, Copy)]
pub struct Boolean {
    spec: &'static BooleanSpec,
    pub value: bool,
}

impl Boolean {
    pub fn new(spec: &'static BooleanSpec, value: bool) -> Self {
        Self { spec, value }
    }

    pub fn spec(&self) -> &'static BooleanSpec {
        self.spec
    }

    fn is_true_text(&self, text: &str) -> bool {
        text.split('.').next() == Some("1")
            || self.spec.true_tokens.iter().any(|token| *token == text)
    }
}

impl fmt::Display for Boolean {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let word = if self.value {
            self.spec.true_word
        } else {
            self.spec.false_word
        };
        f.write_str(word)
    }
}

impl Datapoint for Boolean {
    fn pack(&self) -> Vec<u8> {
        primitives::pack_b1(self.value)
    }

    fn unpack(&mut self, data: &[u8]) -> Result<(), DptError> {
        self.value = primitives::unpack_b1(data)?;
        Ok(())
    }

    fn unit(&self) -> &'static str {
        ""
    }

    fn to_f64(&self) -> f64 {
        if self.value { 1.0 } else { 0.0 }
    }

    fn parse_text(&mut self, text: &str) -> Result<Vec<u8>, DptError> {
        self.value = self.is_true_text(text);
        Ok(self.pack())
    }
}

#[cfg(test)]
mod tests {
    use super::{Boolean, BooleanSpec};
    use crate::types::Datapoint;

    static SWITCH: BooleanSpec = BooleanSpec {
        true_word: "On",
        false_word: "Off",
        true_tokens: &["On"],
    };

    static DAY_NIGHT: BooleanSpec = BooleanSpec {
        true_word: "Night",
        false_word: "Day",
        true_tokens: &[],
    };

    #[test]
    fn displays_semantic_words() {
        assert_eq!(Boolean::new(&SWITCH, true).to_string(), "On");
        assert_eq!(Boolean::new(&SWITCH, false).to_string(), "Off");
    }

    #[test]
    fn parse_accepts_one_and_true_tokens() {
        let mut value = Boolean::new(&SWITCH, false);
        assert_eq!(value.parse_text("1").unwrap(), vec![1]);
        assert_eq!(value.parse_text("1.0").unwrap(), vec![1]);
        assert_eq!(value.parse_text("1.5.7").unwrap(), vec![1]);
        assert_eq!(value.parse_text("On").unwrap(), vec![1]);
        assert!(value.value);
        assert_eq!(value.parse_text("on").unwrap(), vec![0]);
        assert_eq!(value.parse_text("0").unwrap(), vec![0]);
        assert_eq!(value.parse_text("10").unwrap(), vec![0]);
        assert_eq!(value.parse_text("").unwrap(), vec![0]);
        assert!(!value.value);
    }

    #[test]
    fn empty_token_list_accepts_only_one() {
        let mut value = Boolean::new(&DAY_NIGHT, false);
        assert_eq!(value.parse_text("Night").unwrap(), vec![0]);
        assert_eq!(value.parse_text("1").unwrap(), vec![1]);
    }

    #[test]
    fn unpack_uses_bit_zero() {
        let mut value = Boolean::new(&SWITCH, false);
        value.unpack(&[0x03]).unwrap();
        assert!(value.value);
        assert_eq!(value.to_f64(), 1.0);
        value.unpack(&[0x02]).unwrap();
        assert!(!value.value);
        assert_eq!(value.to_f64(), 0.0);
    }

    #[test]
    fn failed_unpack_keeps_value() {
        let mut value = Boolean::new(&SWITCH, true);
        assert!(value.unpack(&[0x00, 0x00]).is_err());
        assert!(value.value);
    }
}
