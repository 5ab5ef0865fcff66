use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::DptError;

/// Datapoint type identifier (`main.sub`).
///
/// Accepts the dotted form (`"9.001"`, `"9.1"`) and the ETS form
/// (`"DPST-9-1"`); always displays as `"9.001"`.
///
/// # Examples
/// ```
/// use knxdpt_core::DptId;
///
/// let id: DptId = "DPST-9-1".parse()?;
/// assert_eq!(id, DptId::new(9, 1));
/// assert_eq!(id.to_string(), "9.001");
/// # Ok::<(), knxdpt_core::DptError>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct DptId {
    pub main: u16,
    pub sub: u16,
}

impl DptId {
    pub const fn new(main: u16, sub: u16) -> Self {
        Self { main, sub }
    }
}

impl fmt::Display for DptId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{:03}", self.main, self.sub)
    }
}

impl FromStr for DptId {
    type Err = DptError;

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        let invalid = || DptError::InvalidId {
            text: text.to_string(),
        };
        let trimmed = text.trim();
        let (main, sub) = match trimmed
            .get(..5)
            .filter(|prefix| prefix.eq_ignore_ascii_case("DPST-"))
        {
            Some(_) => trimmed[5..].split_once('-'),
            None => trimmed.split_once('.'),
        }
        .ok_or_else(invalid)?;

        let main = main.parse::<u16>().map_err(|_| invalid())?;
        let sub = sub.parse::<u16>().map_err(|_| invalid())?;
        Ok(DptId { main, sub })
    }
}

impl TryFrom<String> for DptId {
    type Error = DptError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<DptId> for String {
    fn from(value: DptId) -> Self {
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::DptId;

    #[test]
    fn parses_dotted_forms() {
        assert_eq!("9.001".parse::<DptId>().unwrap(), DptId::new(9, 1));
        assert_eq!("9.1".parse::<DptId>().unwrap(), DptId::new(9, 1));
        assert_eq!(" 232.600 ".parse::<DptId>().unwrap(), DptId::new(232, 600));
    }

    #[test]
    fn parses_ets_form() {
        assert_eq!("DPST-1-1".parse::<DptId>().unwrap(), DptId::new(1, 1));
        assert_eq!("dpst-251-600".parse::<DptId>().unwrap(), DptId::new(251, 600));
    }

    #[test]
    fn rejects_garbage() {
        for text in ["", "9", "9.", ".1", "9.x", "DPST-9", "DPST-9-", "nine.one"] {
            assert!(text.parse::<DptId>().is_err(), "{text}");
        }
    }

    #[test]
    fn serializes_as_canonical_string() {
        let json = serde_json::to_string(&DptId::new(1, 1)).unwrap();
        assert_eq!(json, "\"1.001\"");
        let id: DptId = serde_json::from_str("\"DPST-13-10\"").unwrap();
        assert_eq!(id, DptId::new(13, 10));
    }
}
