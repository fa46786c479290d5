use crate::enums::{ResourceKind, Severity};
use crate::path::DocPath;
use serde::Serialize;
use serde_json::Value;
use std::fmt;
use thiserror::Error;

/// One diagnostic produced during validation.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct LogEntry {
    pub severity: Severity,
    pub message: String,
    pub path: DocPath,
    /// Kind of the resource whose rule produced the entry.
    pub kind: ResourceKind,
    /// Resource call chain at the time of logging, when `debug` is set.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trace: Option<Vec<String>>,
}

impl LogEntry {
    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }

    /// The field this entry belongs to: the last key of its path.
    pub fn field(&self) -> Option<&str> {
        self.path.field()
    }
}

impl fmt::Display for LogEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {} @ {}", self.severity, self.message, self.path)
    }
}

/// Result of one `validate()` call.
#[derive(Clone, Debug, Default, Serialize)]
pub struct ValidationResult {
    pub errors: Vec<LogEntry>,
    pub warnings: Vec<LogEntry>,
    /// Input tree with rule corrections applied. Absent only when the input
    /// could not be decoded.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub corrected_document: Option<Value>,
}

impl ValidationResult {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Error kind for decode failures.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DecodeErrorKind {
    Empty,
    Syntax,
    Eof,
}

/// Produced by [`crate::decode::decode`] when JSON text cannot be read.
///
/// `message` comes from the JSON reader and already names the location.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct DecodeError {
    pub kind: DecodeErrorKind,
    pub message: String,
    pub line: usize,
    pub column: usize,
}

/// Internal failure of a field rule.
///
/// Rules return this instead of panicking; the resource validator turns it
/// into an error entry on the field and keeps the original value.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum RuleFault {
    #[error("expected {expected}, found {found}")]
    UnexpectedShape {
        expected: &'static str,
        found: &'static str,
    },
    /// The rule panicked; carries the panic message.
    #[error("rule panicked: {0}")]
    Panicked(String),
    #[error("{0}")]
    Other(String),
}

impl RuleFault {
    pub fn other(message: impl Into<String>) -> Self {
        RuleFault::Other(message.into())
    }

    pub fn unexpected_shape(expected: &'static str, found: &Value) -> Self {
        RuleFault::UnexpectedShape {
            expected,
            found: value_kind(found),
        }
    }
}

/// Short name of a JSON value's type, for messages.
pub fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "list",
        Value::Object(_) => "object",
    }
}
