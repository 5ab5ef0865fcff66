use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors returned by datapoint packing, unpacking and text parsing.
///
/// # Examples
/// ```
/// use knxdpt_core::{DptError, ErrorKind};
///
/// let err = DptError::InvalidLength { expected: 3, actual: 2 };
/// assert_eq!(err.kind(), ErrorKind::InvalidLength);
/// assert!(err.to_string().contains("invalid length"));
/// ```
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DptError {
    #[error("invalid length: need {expected} bytes, got {actual}")]
    InvalidLength { expected: usize, actual: usize },
    #[error("{what} out of range: {value}")]
    OutOfRange { what: &'static str, value: String },
    #[error("malformed text: need {expected} comma-separated fields, got {actual}")]
    FieldCount { expected: usize, actual: usize },
    #[error("malformed text: invalid number {text:?} ({reason})")]
    InvalidNumber { text: String, reason: String },
    #[error("{field}: {source}")]
    Field {
        field: &'static str,
        #[source]
        source: Box<DptError>,
    },
    #[error("unknown datapoint type: {id}")]
    UnknownType { id: String },
    #[error("invalid datapoint type identifier: {text:?}")]
    InvalidId { text: String },
}

/// Coarse failure taxonomy shared by every datapoint type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    InvalidLength,
    OutOfRange,
    MalformedText,
    UnknownType,
}

impl DptError {
    /// Failure kind, looking through composite field wrappers.
    pub fn kind(&self) -> ErrorKind {
        match self {
            DptError::InvalidLength { .. } => ErrorKind::InvalidLength,
            DptError::OutOfRange { .. } => ErrorKind::OutOfRange,
            DptError::FieldCount { .. } | DptError::InvalidNumber { .. } => {
                ErrorKind::MalformedText
            }
            DptError::Field { source, .. } => source.kind(),
            DptError::UnknownType { .. } | DptError::InvalidId { .. } => ErrorKind::UnknownType,
        }
    }

    /// Wrap the error with the name of the composite sub-field that failed.
    pub fn in_field(self, field: &'static str) -> Self {
        DptError::Field {
            field,
            source: Box::new(self),
        }
    }

    pub(crate) fn out_of_range(what: &'static str, value: impl ToString) -> Self {
        DptError::OutOfRange {
            what,
            value: value.to_string(),
        }
    }

    pub(crate) fn invalid_number(text: &str, reason: impl ToString) -> Self {
        DptError::InvalidNumber {
            text: text.to_string(),
            reason: reason.to_string(),
        }
    }
}
