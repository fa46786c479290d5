use crate::error::{DecodeError, DecodeErrorKind};
use serde_json::Value;
use serde_json::error::Category;

/// Decode JSON text into a value tree.
///
/// Performs JSON deserialization only. Does NOT classify or validate the
/// result; any well-formed JSON value is accepted, including a non-object
/// root.
pub fn decode(input: &str) -> Result<Value, DecodeError> {
    if input.trim().is_empty() {
        return Err(DecodeError {
            kind: DecodeErrorKind::Empty,
            message: "empty input".to_string(),
            line: 1,
            column: 0,
        });
    }

    serde_json::from_str(input).map_err(|e| DecodeError {
        kind: match e.classify() {
            Category::Eof => DecodeErrorKind::Eof,
            _ => DecodeErrorKind::Syntax,
        },
        message: e.to_string(),
        line: e.line(),
        column: e.column(),
    })
}
