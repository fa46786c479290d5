//! Structural validation of one resource.
//!
//! A [`ResourceValidator`] is the per-kind aggregate of key constraints and
//! a field-name → [`FieldRule`] table. It is immutable once registered and
//! runs once per resource instance encountered during a traversal.

use crate::assemble::CorrectionAssembler;
use crate::context::Context;
use crate::enums::{ResourceKind, UnknownFields};
use crate::error::value_kind;
use crate::rule::FieldRule;
use serde_json::{Map, Value};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use std::sync::Arc;

type CheckFn = dyn Fn(&mut Context<'_>, &Map<String, Value>) + Send + Sync;

/// A whole-resource check run after the field scan, for constraints that
/// span several fields.
#[derive(Clone)]
pub struct ResourceCheck {
    f: Arc<CheckFn>,
}

impl ResourceCheck {
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(&mut Context<'_>, &Map<String, Value>) + Send + Sync + 'static,
    {
        Self { f: Arc::new(f) }
    }

    pub fn run(&self, ctx: &mut Context<'_>, raw: &Map<String, Value>) {
        (self.f)(ctx, raw)
    }
}

impl fmt::Debug for ResourceCheck {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("ResourceCheck(..)")
    }
}

#[derive(Clone, Debug)]
pub struct ResourceValidator {
    kind: ResourceKind,
    required: BTreeSet<String>,
    known: BTreeSet<String>,
    forbidden: BTreeSet<String>,
    recommended: BTreeSet<String>,
    rules: BTreeMap<String, FieldRule>,
    checks: Vec<ResourceCheck>,
}

impl ResourceValidator {
    pub fn new(kind: ResourceKind) -> Self {
        Self {
            kind,
            required: BTreeSet::new(),
            known: BTreeSet::new(),
            forbidden: BTreeSet::new(),
            recommended: BTreeSet::new(),
            rules: BTreeMap::new(),
            checks: Vec::new(),
        }
    }

    pub fn kind(&self) -> ResourceKind {
        self.kind
    }

    // ─── Construction ───────────────────────────────────────────────────────

    pub fn require(mut self, fields: &[&str]) -> Self {
        self.required.extend(fields.iter().map(|f| f.to_string()));
        self
    }

    /// Fields that may appear without a rule and without a warning.
    pub fn know(mut self, fields: &[&str]) -> Self {
        self.known.extend(fields.iter().map(|f| f.to_string()));
        self
    }

    pub fn forbid(mut self, fields: &[&str]) -> Self {
        self.forbidden.extend(fields.iter().map(|f| f.to_string()));
        self
    }

    pub fn recommend(mut self, fields: &[&str]) -> Self {
        self.recommended.extend(fields.iter().map(|f| f.to_string()));
        self
    }

    /// Set the rule for `field`, replacing any existing one.
    pub fn with_rule(mut self, field: &str, rule: FieldRule) -> Self {
        self.rules.insert(field.to_string(), rule);
        self
    }

    /// Replace the rule for `field` with one built from the current rule.
    ///
    /// `f` receives the rule being replaced (a passthrough if there was
    /// none), so the replacement can delegate to it.
    pub fn override_rule(mut self, field: &str, f: impl FnOnce(FieldRule) -> FieldRule) -> Self {
        let base = self
            .rules
            .remove(field)
            .unwrap_or_else(FieldRule::passthrough);
        self.rules.insert(field.to_string(), f(base));
        self
    }

    pub fn without_rule(mut self, field: &str) -> Self {
        self.rules.remove(field);
        self
    }

    pub fn with_check(mut self, check: ResourceCheck) -> Self {
        self.checks.push(check);
        self
    }

    // ─── Inspection ─────────────────────────────────────────────────────────

    pub fn rule(&self, field: &str) -> Option<&FieldRule> {
        self.rules.get(field)
    }

    pub fn rules(&self) -> &BTreeMap<String, FieldRule> {
        &self.rules
    }

    pub fn required(&self) -> &BTreeSet<String> {
        &self.required
    }

    pub fn is_known(&self, field: &str) -> bool {
        self.rules.contains_key(field) || self.known.contains(field)
    }

    // ─── Validation ─────────────────────────────────────────────────────────

    /// Validate one resource instance at the context's current path and
    /// return its corrected sub-document.
    ///
    /// Order: shape, missing required fields, forbidden fields, each present
    /// field in document order, missing recommended fields, resource checks.
    pub fn validate_resource(&self, ctx: &mut Context<'_>, raw: &Value) -> Value {
        let Some(obj) = raw.as_object() else {
            ctx.error(format!(
                "{} must be an object, found {}.",
                self.kind,
                value_kind(raw)
            ));
            return raw.clone();
        };

        let id = obj.get("@id").and_then(Value::as_str).map(str::to_string);
        ctx.enter(self.kind, id);
        tracing::trace!(kind = %self.kind, path = %ctx.path(), "validating resource");
        let depth = ctx.depth();
        let name = self.kind.name();

        for field in &self.required {
            if !obj.contains_key(field) {
                ctx.error_at(field, format!("Key '{}' is required in '{}'.", field, name));
            }
        }
        for field in obj.keys().filter(|k| self.forbidden.contains(*k)) {
            ctx.error_at(field, format!("Key '{}' is not allowed in '{}'.", field, name));
        }

        let mut assembler = CorrectionAssembler::new();
        for (field, value) in obj {
            if ctx.halted_below(depth) {
                break;
            }
            let corrected = ctx.with_segment(field, |ctx| self.apply_field(ctx, field, value));
            let omitted = ctx.take_omitted();
            match corrected {
                Some(v) if !omitted => assembler.insert(field, v),
                _ => assembler.omit(field),
            }
        }

        if !ctx.halted_below(depth) {
            for field in &self.recommended {
                if obj.get(field).is_none_or(is_empty) {
                    ctx.warning_at(field, format!("{} SHOULD have {} field.", name, field));
                }
            }
            for check in &self.checks {
                check.run(ctx, obj);
            }
        }

        if !assembler.omitted().is_empty() {
            tracing::trace!(kind = %self.kind, omitted = ?assembler.omitted(), "fields left out");
        }
        ctx.leave();
        assembler.finish()
    }

    /// Corrected value for one field, or `None` to leave it out.
    fn apply_field(&self, ctx: &mut Context<'_>, field: &str, value: &Value) -> Option<Value> {
        if let Some(rule) = self.rules.get(field) {
            return match rule.apply_guarded(ctx, value) {
                Ok(corrected) => Some(corrected),
                Err(fault) => {
                    ctx.error(format!(
                        "Internal error while validating '{}': {}",
                        field, fault
                    ));
                    Some(value.clone())
                }
            };
        }
        // Forbidden fields were already reported before the scan.
        if self.known.contains(field) || self.forbidden.contains(field) {
            return Some(value.clone());
        }
        ctx.warning(format!("Unknown key '{}' in '{}'.", field, self.kind.name()));
        match ctx.config().unknown_fields {
            UnknownFields::Retain => Some(value.clone()),
            UnknownFields::Strip => None,
        }
    }
}

fn is_empty(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(s) => s.is_empty(),
        Value::Array(a) => a.is_empty(),
        Value::Object(o) => o.is_empty(),
        _ => false,
    }
}
