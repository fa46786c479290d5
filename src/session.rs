//! The root validator.
//!
//! A [`Session`] owns the configuration, the validator registry and the log
//! for a run. Each `validate()` call resets the log, classifies the root,
//! dispatches it to the registered validator, and packages the diagnostics
//! and corrected document into a [`ValidationResult`].

use crate::classify::{Classification, classify};
use crate::config::ValidatorConfig;
use crate::context::Context;
use crate::decode::decode;
use crate::error::{LogEntry, ValidationResult};
use crate::log::{DiagnosticSink, SessionLog, TracingSink};
use crate::registry::Registry;
use serde_json::Value;

pub struct Session {
    config: ValidatorConfig,
    registry: Registry,
    log: SessionLog,
    corrected: Option<Value>,
    sink: Box<dyn DiagnosticSink>,
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl Session {
    pub fn new() -> Self {
        Self::with_config(ValidatorConfig::default())
    }

    pub fn with_config(config: ValidatorConfig) -> Self {
        Self {
            config,
            registry: Registry::presentation(),
            log: SessionLog::new(),
            corrected: None,
            sink: Box::new(TracingSink),
        }
    }

    pub fn config(&self) -> &ValidatorConfig {
        &self.config
    }

    pub fn config_mut(&mut self) -> &mut ValidatorConfig {
        &mut self.config
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Registry to substitute validators in before the next `validate()`.
    pub fn registry_mut(&mut self) -> &mut Registry {
        &mut self.registry
    }

    /// Install the sink that receives entries in verbose mode.
    pub fn set_sink(&mut self, sink: impl DiagnosticSink + 'static) {
        self.sink = Box::new(sink);
    }

    /// Validate a decoded document.
    pub fn validate(&mut self, document: &Value) -> ValidationResult {
        self.log.reset();
        self.corrected = None;

        let classification = classify(document);
        let kind = classification.kind();
        tracing::debug!(kind = %kind, fail_fast = self.config.fail_fast, "validation started");

        let mut ctx = Context::new(
            &self.config,
            &self.registry,
            &mut self.log,
            self.sink.as_ref(),
        );
        let corrected = match &classification {
            Classification::Unrecognized { type_tag: None } if !document.is_object() => {
                ctx.error("Document root must be a JSON object.");
                document.clone()
            }
            Classification::Unrecognized { type_tag } => {
                match type_tag {
                    Some(tag) => ctx.error(format!("Unknown @type: '{}'", tag)),
                    None => ctx.error("Could not determine resource type."),
                }
                ctx.dispatch(kind, document)
            }
            Classification::Ambiguous(candidates) => {
                let names: Vec<&str> = candidates.iter().map(|k| k.name()).collect();
                ctx.error(format!(
                    "Could not determine resource type; candidates: {}.",
                    names.join(", ")
                ));
                ctx.dispatch(kind, document)
            }
            Classification::Tagged(_) | Classification::Inferred(_) => {
                ctx.dispatch(kind, document)
            }
        };
        self.corrected = Some(corrected);

        tracing::debug!(
            kind = %kind,
            errors = self.log.error_count(),
            warnings = self.log.warning_count(),
            halted = self.log.halted_at().is_some(),
            "validation finished"
        );
        self.result()
    }

    /// Decode JSON text and validate it. Text that cannot be decoded yields
    /// a single root error and no corrected document.
    pub fn validate_str(&mut self, input: &str) -> ValidationResult {
        match decode(input) {
            Ok(document) => self.validate(&document),
            Err(err) => {
                self.log.reset();
                self.corrected = None;
                tracing::debug!(error = %err, "input could not be decoded");
                let mut ctx = Context::new(
                    &self.config,
                    &self.registry,
                    &mut self.log,
                    self.sink.as_ref(),
                );
                ctx.error(format!("Could not parse json. {}", err));
                self.result()
            }
        }
    }

    // ─── Results of the last run ────────────────────────────────────────────

    pub fn errors(&self) -> impl Iterator<Item = &LogEntry> {
        self.log.errors()
    }

    pub fn warnings(&self) -> impl Iterator<Item = &LogEntry> {
        self.log.warnings()
    }

    pub fn is_valid(&self) -> bool {
        self.log.is_valid()
    }

    pub fn corrected_document(&self) -> Option<&Value> {
        self.corrected.as_ref()
    }

    fn result(&self) -> ValidationResult {
        ValidationResult {
            errors: self.log.errors().cloned().collect(),
            warnings: self.log.warnings().cloned().collect(),
            corrected_document: self.corrected.clone(),
        }
    }
}
