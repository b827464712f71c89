//! Speech-mark stream normalization
//!
//! The backend emits one JSON object per line with no separators. The
//! stored artifact is a JSON array, produced by wrapping the stream in
//! brackets and joining adjacent objects with commas. Object text is
//! copied verbatim and never re-serialized. The joined document is only
//! checked for JSON syntax.

use serde::de::IgnoredAny;

use crate::error::{Result, TtsError};

/// Normalize a raw speech-mark byte stream
///
/// # Errors
///
/// Returns `NormalizationFailed` if the stream is not UTF-8 or not
/// newline-delimited JSON objects
pub fn normalize_stream(raw: &[u8]) -> Result<String> {
    let text = std::str::from_utf8(raw)
        .map_err(|e| TtsError::NormalizationFailed(format!("speech marks are not valid UTF-8: {e}")))?;

    normalize(text)
}

/// Turn newline-delimited JSON objects into a JSON array document
///
/// Blank lines are ignored, so empty input yields `[]`.
///
/// # Errors
///
/// Returns `NormalizationFailed` if a non-blank line is not enclosed in braces
/// or the joined document is not syntactically valid JSON
pub fn normalize(raw: &str) -> Result<String> {
    let mut output = String::with_capacity(raw.len() + 2);
    output.push('[');

    let mut records = 0usize;

    for (index, line) in raw.split('\n').enumerate() {
        let record = line.trim();

        if record.is_empty() {
            continue;
        }

        if !(record.starts_with('{') && record.ends_with('}')) {
            return Err(TtsError::NormalizationFailed(format!(
                "line {} is not a JSON object",
                index + 1
            )));
        }

        if records > 0 {
            output.push(',');
        }

        output.push_str(record);
        records += 1;
    }

    output.push(']');

    serde_json::from_str::<IgnoredAny>(&output)
        .map_err(|e| TtsError::NormalizationFailed(format!("speech marks do not form a JSON array: {e}")))?;

    tracing::trace!(records, "normalized speech marks");

    Ok(output)
}
