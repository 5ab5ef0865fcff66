use std::fs;
use std::path::Path;

use thiserror::Error;

use crate::error::{DptError, ErrorKind};
use crate::id::DptId;
use crate::{BatchEntry, BatchFailure, BatchReport, Decoded, decode, make_stub_report};

#[derive(Debug, Error)]
pub enum BatchError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Why a single batch line was not decoded.
#[derive(Debug, Error)]
pub enum LineError {
    #[error("expected `<DPT> <HEX>`")]
    MissingPayload,
    #[error("invalid hex payload: {0}")]
    Hex(#[from] hex::FromHexError),
    #[error(transparent)]
    Dpt(#[from] DptError),
}

impl LineError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            LineError::MissingPayload | LineError::Hex(_) => ErrorKind::MalformedText,
            LineError::Dpt(err) => err.kind(),
        }
    }
}

/// Parse a hex payload, tolerating whitespace, `:` separators and `0x`
/// prefixes (`"00 08 66"`, `"00:08:66"`, `"0x000866"`).
pub fn parse_payload(text: &str) -> Result<Vec<u8>, hex::FromHexError> {
    let digits: String = text
        .split(|c: char| c.is_whitespace() || c == ':')
        .map(|chunk| {
            chunk
                .strip_prefix("0x")
                .or_else(|| chunk.strip_prefix("0X"))
                .unwrap_or(chunk)
        })
        .collect();
    hex::decode(digits)
}

fn decode_line(line: &str) -> Result<Decoded, LineError> {
    let (dpt, payload) = line
        .split_once(char::is_whitespace)
        .ok_or(LineError::MissingPayload)?;
    let id: DptId = dpt.parse()?;
    let payload = parse_payload(payload)?;
    Ok(decode(id, &payload)?)
}

/// Decode every `<DPT> <HEX>` line of `text`. Blank lines and lines starting
/// with `#` are skipped; failures are collected, never fatal.
pub fn decode_batch(input_path: &str, text: &str) -> BatchReport {
    let mut report = make_stub_report(input_path, text.len() as u64);
    for (index, raw) in text.lines().enumerate() {
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let number = index + 1;
        match decode_line(line) {
            Ok(decoded) => report.entries.push(BatchEntry {
                line: number,
                decoded,
            }),
            Err(err) => {
                tracing::debug!(line = number, error = %err, "batch line rejected");
                report.failures.push(BatchFailure {
                    line: number,
                    input: line.to_string(),
                    kind: err.kind(),
                    message: err.to_string(),
                });
            }
        }
    }
    report
}

pub fn decode_batch_file(path: &Path) -> Result<BatchReport, BatchError> {
    let text = fs::read_to_string(path)?;
    let mut report = decode_batch(&path.display().to_string(), &text);
    report.input.bytes = fs::metadata(path)?.len();
    Ok(report)
}
