//! Per-call traversal state threaded through every field rule.
//!
//! A [`Context`] borrows the session's configuration, registry and log for
//! the duration of one `validate()` call. It tracks the current path, the
//! stack of resources being validated, and any capture buffers opened by
//! rule combinators.

use crate::config::ValidatorConfig;
use crate::enums::{ResourceKind, Severity};
use crate::error::LogEntry;
use crate::log::{DiagnosticSink, SessionLog};
use crate::path::{DocPath, Segment};
use crate::registry::Registry;
use serde_json::Value;

/// Traversal depth saved before running a rule that may panic.
#[derive(Clone, Copy, Debug)]
pub(crate) struct Checkpoint {
    path: usize,
    frames: usize,
    buffers: usize,
}

/// A resource currently being validated.
#[derive(Clone, Debug)]
struct Frame {
    kind: ResourceKind,
    id: Option<String>,
    /// Index in the parent list, when the resource is a list element.
    position: Option<usize>,
    path: DocPath,
}

pub struct Context<'s> {
    config: &'s ValidatorConfig,
    registry: &'s Registry,
    log: &'s mut SessionLog,
    sink: &'s dyn DiagnosticSink,
    path: DocPath,
    frames: Vec<Frame>,
    buffers: Vec<Vec<LogEntry>>,
    omitted: bool,
}

impl<'s> Context<'s> {
    pub fn new(
        config: &'s ValidatorConfig,
        registry: &'s Registry,
        log: &'s mut SessionLog,
        sink: &'s dyn DiagnosticSink,
    ) -> Self {
        Self {
            config,
            registry,
            log,
            sink,
            path: DocPath::root(),
            frames: Vec::new(),
            buffers: Vec::new(),
            omitted: false,
        }
    }

    pub fn config(&self) -> &'s ValidatorConfig {
        self.config
    }

    pub fn registry(&self) -> &'s Registry {
        self.registry
    }

    pub fn path(&self) -> &DocPath {
        &self.path
    }

    /// Name of the field being validated: the last key of the current path.
    pub fn field(&self) -> &str {
        self.path.field().unwrap_or("")
    }

    /// Kind of the innermost resource being validated.
    pub fn kind(&self) -> ResourceKind {
        self.frames
            .last()
            .map(|f| f.kind)
            .unwrap_or(ResourceKind::Unknown)
    }

    /// Resource nesting depth; 0 outside any resource.
    pub fn depth(&self) -> usize {
        self.frames.len()
    }

    /// Index of the innermost resource within its parent list.
    pub fn position(&self) -> Option<usize> {
        self.frames.last().and_then(|f| f.position)
    }

    /// `@id` of the nearest enclosing resource of `kind`.
    pub fn enclosing_id(&self, kind: ResourceKind) -> Option<&str> {
        self.frames
            .iter()
            .rev()
            .find(|f| f.kind == kind)
            .and_then(|f| f.id.as_deref())
    }

    // ─── Logging ────────────────────────────────────────────────────────────

    pub fn error(&mut self, message: impl Into<String>) {
        self.log(Severity::Error, message.into());
    }

    pub fn warning(&mut self, message: impl Into<String>) {
        self.log(Severity::Warning, message.into());
    }

    pub fn log(&mut self, severity: Severity, message: String) {
        let entry = LogEntry {
            severity,
            message,
            path: self.path.clone(),
            kind: self.kind(),
            trace: self.config.debug.then(|| self.call_chain()),
        };
        self.emit(entry);
    }

    /// Hand an entry to the innermost capture buffer, or to the session log
    /// when nothing is capturing.
    pub fn emit(&mut self, entry: LogEntry) {
        match self.buffers.last_mut() {
            Some(buffer) => buffer.push(entry),
            None => {
                let depth = self.frames.len();
                self.log.record(entry, self.config, self.sink, depth);
            }
        }
    }

    /// Run `f` with every emission diverted into a local buffer.
    ///
    /// Captured entries never reach the session log, so they cannot affect
    /// validity or trigger fail-fast unless the caller re-emits them.
    pub fn capture<T>(&mut self, f: impl FnOnce(&mut Self) -> T) -> (T, Vec<LogEntry>) {
        self.buffers.push(Vec::new());
        let value = f(self);
        let captured = self.buffers.pop().unwrap_or_default();
        (value, captured)
    }

    fn call_chain(&self) -> Vec<String> {
        self.frames
            .iter()
            .map(|f| format!("{} at {}", f.kind, f.path))
            .chain(std::iter::once(format!("field at {}", self.path)))
            .collect()
    }

    // ─── Paths ──────────────────────────────────────────────────────────────

    /// Run `f` with `segment` appended to the current path.
    pub fn with_segment<T>(
        &mut self,
        segment: impl Into<Segment>,
        f: impl FnOnce(&mut Self) -> T,
    ) -> T {
        self.path.push(segment);
        let value = f(self);
        self.path.pop();
        value
    }

    /// Log an error on a child field of the current path.
    pub fn error_at(&mut self, segment: impl Into<Segment>, message: impl Into<String>) {
        let message = message.into();
        self.with_segment(segment, |ctx| ctx.error(message));
    }

    /// Log a warning on a child field of the current path.
    pub fn warning_at(&mut self, segment: impl Into<Segment>, message: impl Into<String>) {
        let message = message.into();
        self.with_segment(segment, |ctx| ctx.warning(message));
    }

    // ─── Resources and fail-fast ────────────────────────────────────────────

    pub(crate) fn checkpoint(&self) -> Checkpoint {
        Checkpoint {
            path: self.path.len(),
            frames: self.frames.len(),
            buffers: self.buffers.len(),
        }
    }

    /// Unwind to `checkpoint`. Entries in capture buffers opened since are
    /// discarded.
    pub(crate) fn restore(&mut self, checkpoint: Checkpoint) {
        self.path.truncate(checkpoint.path);
        self.frames.truncate(checkpoint.frames);
        self.buffers.truncate(checkpoint.buffers);
        self.omitted = false;
    }

    pub(crate) fn enter(&mut self, kind: ResourceKind, id: Option<String>) {
        let position = match self.path.last() {
            Some(Segment::Index(i)) => Some(*i),
            _ => None,
        };
        self.frames.push(Frame {
            kind,
            id,
            position,
            path: self.path.clone(),
        });
    }

    pub(crate) fn leave(&mut self) {
        self.frames.pop();
    }

    /// True once fail-fast has triggered anywhere in the traversal.
    pub fn is_halted(&self) -> bool {
        self.log.halted_at().is_some()
    }

    /// True when fail-fast was triggered by a resource nested deeper than
    /// `depth`; such a halt ends the field scan at `depth`.
    pub(crate) fn halted_below(&self, depth: usize) -> bool {
        self.log.halted_at().is_some_and(|d| d > depth)
    }

    /// Whether the last field rule asked for its field to be left out of the
    /// corrected document. Clears the flag.
    pub(crate) fn take_omitted(&mut self) -> bool {
        std::mem::take(&mut self.omitted)
    }

    /// Validate a nested resource with the validator registered for `kind`.
    ///
    /// After fail-fast has triggered nothing new is visited: the field is
    /// marked for omission and `Null` is returned.
    pub fn validate_nested(&mut self, kind: ResourceKind, value: &Value) -> Value {
        if self.is_halted() {
            self.omitted = true;
            return Value::Null;
        }
        self.dispatch(kind, value)
    }

    /// Validate each element of a resource list, extending the path with the
    /// element index. Stops at the first element not yet visited when
    /// fail-fast has triggered, so the result may be shorter than `items`.
    pub fn validate_each(&mut self, kind: ResourceKind, items: &[Value]) -> Vec<Value> {
        let mut corrected = Vec::with_capacity(items.len());
        for (i, item) in items.iter().enumerate() {
            if self.is_halted() {
                break;
            }
            corrected.push(self.with_segment(i, |ctx| ctx.dispatch(kind, item)));
        }
        corrected
    }

    pub(crate) fn dispatch(&mut self, kind: ResourceKind, value: &Value) -> Value {
        let registry = self.registry;
        match registry.resolve(kind) {
            Some(validator) => validator.validate_resource(self, value),
            None => {
                self.error(format!("No validator registered for '{}'", kind));
                value.clone()
            }
        }
    }
}
