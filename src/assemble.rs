//! Builds a resource's corrected sub-document from rule outputs.

use serde_json::{Map, Value};

/// Collects corrected field values for the resource being validated.
///
/// Fields are kept in insertion order, which the resource validator makes
/// match the input order.
#[derive(Debug, Default)]
pub struct CorrectionAssembler {
    fields: Map<String, Value>,
    omitted: Vec<String>,
}

impl CorrectionAssembler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, field: &str, value: Value) {
        self.fields.insert(field.to_string(), value);
    }

    /// Record a field that will not appear in the corrected document.
    pub fn omit(&mut self, field: &str) {
        self.omitted.push(field.to_string());
    }

    pub fn omitted(&self) -> &[String] {
        &self.omitted
    }

    pub fn finish(self) -> Value {
        Value::Object(self.fields)
    }
}
