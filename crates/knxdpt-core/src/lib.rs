//! KNX datapoint type (DPT) codec library.
//!
//! Converts between KNX group-telegram payloads and typed values for a
//! catalogue of standard datapoint types. The layering follows a decoder
//! stack: `codec` (layout/reader/writer/primitives) handles bytes, `types`
//! implements the value contract per family, and `registry` maps a type
//! identifier to the static configuration a family implementation needs.
//! Payloads always include the leading control octet; encoders write it as
//! zero and decoders ignore its value.
//!
//! Invariants:
//! - Every payload produced for a type has exactly the type's declared length.
//! - Failed decodes and text parses leave the receiving value untouched.
//! - The registry is immutable, compile-time data.
//!
//! # Examples
//! ```
//! use knxdpt_core::{DptId, decode, encode_text};
//!
//! let id = DptId::new(9, 1);
//! let payload = encode_text(id, "21.5")?;
//! assert_eq!(payload, vec![0x00, 0x08, 0x66]);
//!
//! let decoded = decode(id, &payload)?;
//! assert_eq!(decoded.text, "21.50");
//! assert_eq!(decoded.unit, "°C");
//! # Ok::<(), knxdpt_core::DptError>(())
//! ```

use serde::{Deserialize, Serialize};

mod batch;
mod clock;
pub mod codec;
mod error;
mod id;
pub mod registry;
mod types;

pub use batch::{BatchError, LineError, decode_batch, decode_batch_file, parse_payload};
pub use codec::Primitive;
pub use error::{DptError, ErrorKind};
pub use id::DptId;
pub use registry::{DptDescriptor, DptKind, Family};
pub use types::{
    Boolean, BooleanSpec, ColourRgb, ColourRgbw, ColourXyY, Datapoint, DateTime, Scalar,
    ScalarSpec, TextForm, TimeOfDay,
};

/// Current batch report schema version.
pub const REPORT_VERSION: u32 = 1;
/// Default timestamp used until the caller stamps the report.
pub const DEFAULT_GENERATED_AT: &str = "1970-01-01T00:00:00Z";

/// One decoded payload.
///
/// # Examples
/// ```
/// use knxdpt_core::{DptId, decode};
///
/// let decoded = decode(DptId::new(1, 1), &[0x01])?;
/// assert_eq!(decoded.text, "On");
/// assert_eq!(decoded.payload, "01");
/// # Ok::<(), knxdpt_core::DptError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Decoded {
    /// Canonical type identifier (e.g. `"9.001"`).
    pub dpt: DptId,
    /// ETS type name (e.g. `"DPT_Value_Temp"`).
    pub name: String,
    /// Payload as lowercase hex, control octet included.
    pub payload: String,
    /// Human-readable value.
    pub text: String,
    /// Unit of measure; empty for unitless types.
    pub unit: String,
    /// Numeric projection. Aggregate (non-semantic) for composites.
    pub value: f64,
}

/// Registry entry summary for listings.
///
/// # Examples
/// ```
/// use knxdpt_core::{Family, catalogue};
///
/// let info = catalogue().into_iter().find(|info| info.id.to_string() == "10.001").unwrap();
/// assert_eq!(info.family, Family::TimeOfDay);
/// assert_eq!(info.wire_len, 4);
/// ```
#[derive(Debug, Clone, Serialize)]
pub struct TypeInfo {
    pub id: DptId,
    pub name: &'static str,
    pub family: Family,
    /// Backing primitive, for scalar types only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub primitive: Option<Primitive>,
    pub unit: &'static str,
    /// Declared payload length, control octet included.
    pub wire_len: usize,
}

impl From<&DptDescriptor> for TypeInfo {
    fn from(descriptor: &DptDescriptor) -> Self {
        Self {
            id: descriptor.id,
            name: descriptor.name,
            family: descriptor.family(),
            primitive: descriptor.primitive(),
            unit: descriptor.unit(),
            wire_len: descriptor.wire_len(),
        }
    }
}

/// Versioned result of decoding a batch file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BatchReport {
    /// Report schema version (not the binary version).
    pub report_version: u32,
    /// Tool identification metadata.
    pub tool: ToolInfo,
    /// RFC3339 timestamp representing the report generation time.
    pub generated_at: String,
    /// Input file metadata.
    pub input: InputInfo,
    /// Successfully decoded lines, in file order.
    pub entries: Vec<BatchEntry>,
    /// Lines that could not be decoded, in file order.
    pub failures: Vec<BatchFailure>,
}

/// Tool metadata embedded in reports.
///
/// # Examples
/// ```
/// use knxdpt_core::ToolInfo;
///
/// let tool = ToolInfo {
///     name: "knxdpt".to_string(),
///     version: "0.1.0".to_string(),
/// };
/// assert_eq!(tool.name, "knxdpt");
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolInfo {
    pub name: String,
    /// Tool version (semver).
    pub version: String,
}

/// Input file metadata embedded in reports.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InputInfo {
    /// Input path as provided to the decoder.
    pub path: String,
    /// Input size in bytes.
    pub bytes: u64,
}

/// One decoded batch line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchEntry {
    /// 1-based line number in the input file.
    pub line: usize,
    #[serde(flatten)]
    pub decoded: Decoded,
}

/// One batch line that failed to decode.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchFailure {
    /// 1-based line number in the input file.
    pub line: usize,
    /// The line as read, trimmed.
    pub input: String,
    pub kind: ErrorKind,
    pub message: String,
}

/// Build an empty report for `input_path`.
///
/// # Examples
/// ```
/// use knxdpt_core::make_stub_report;
///
/// let report = make_stub_report("telegrams.txt", 42);
/// assert_eq!(report.report_version, knxdpt_core::REPORT_VERSION);
/// assert!(report.entries.is_empty());
/// ```
pub fn make_stub_report(input_path: &str, input_bytes: u64) -> BatchReport {
    BatchReport {
        report_version: REPORT_VERSION,
        tool: ToolInfo {
            name: "knxdpt".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        },
        generated_at: DEFAULT_GENERATED_AT.to_string(),
        input: InputInfo {
            path: input_path.to_string(),
            bytes: input_bytes,
        },
        entries: vec![],
        failures: vec![],
    }
}

/// Decode `data` as datapoint type `id`.
pub fn decode(id: DptId, data: &[u8]) -> Result<Decoded, DptError> {
    let descriptor = lookup_known(id)?;
    let mut value = descriptor.instantiate();
    value.unpack(data)?;
    Ok(Decoded {
        dpt: descriptor.id,
        name: descriptor.name.to_string(),
        payload: hex::encode(data),
        text: value.to_string(),
        unit: value.unit().to_string(),
        value: value.to_f64(),
    })
}

/// Parse `text` in the canonical form of type `id` and return the payload.
///
/// # Examples
/// ```
/// use knxdpt_core::{DptId, encode_text};
///
/// let payload = encode_text(DptId::new(251, 600), "255,0,0,128")?;
/// assert_eq!(payload, vec![0x00, 0xFF, 0x00, 0x00, 0x80, 0x00, 0x0F]);
/// # Ok::<(), knxdpt_core::DptError>(())
/// ```
pub fn encode_text(id: DptId, text: &str) -> Result<Vec<u8>, DptError> {
    let mut value = lookup_known(id)?.instantiate();
    value.parse_text(text)
}

/// Summaries of every registered type, ordered by identifier.
pub fn catalogue() -> Vec<TypeInfo> {
    registry::all().iter().map(TypeInfo::from).collect()
}

fn lookup_known(id: DptId) -> Result<&'static DptDescriptor, DptError> {
    registry::lookup(id).ok_or_else(|| DptError::UnknownType { id: id.to_string() })
}
