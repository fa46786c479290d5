//! Field rules and the combinators that wrap them.
//!
//! A [`FieldRule`] maps a raw field value to its corrected value and logs
//! diagnostics through the [`Context`] as a side effect. Rules are cheap to
//! clone, so a replacement rule can hold the rule it replaces and delegate
//! to it.

use crate::context::Context;
use crate::enums::Remap;
use crate::error::{LogEntry, RuleFault};
use serde_json::Value;
use std::any::Any;
use std::fmt;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;

type RuleFn = dyn Fn(&mut Context<'_>, &Value) -> Result<Value, RuleFault> + Send + Sync;

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}

#[derive(Clone)]
pub struct FieldRule {
    f: Arc<RuleFn>,
}

impl fmt::Debug for FieldRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("FieldRule(..)")
    }
}

impl FieldRule {
    pub fn new<F>(f: F) -> Self
    where
        F: Fn(&mut Context<'_>, &Value) -> Result<Value, RuleFault> + Send + Sync + 'static,
    {
        Self { f: Arc::new(f) }
    }

    /// Wrap an infallible check.
    pub fn infallible<F>(f: F) -> Self
    where
        F: Fn(&mut Context<'_>, &Value) -> Value + Send + Sync + 'static,
    {
        Self::new(move |ctx, value| Ok(f(ctx, value)))
    }

    /// Accepts anything and returns it unchanged.
    pub fn passthrough() -> Self {
        Self::new(|_, value| Ok(value.clone()))
    }

    pub fn apply(&self, ctx: &mut Context<'_>, value: &Value) -> Result<Value, RuleFault> {
        (self.f)(ctx, value)
    }

    /// Apply the rule, turning a panic into [`RuleFault::Panicked`].
    ///
    /// Context state left behind by the panicking rule (path segments,
    /// resource frames, capture buffers) is unwound first.
    pub fn apply_guarded(&self, ctx: &mut Context<'_>, value: &Value) -> Result<Value, RuleFault> {
        let checkpoint = ctx.checkpoint();
        match panic::catch_unwind(AssertUnwindSafe(|| self.apply(ctx, value))) {
            Ok(result) => result,
            Err(payload) => {
                ctx.restore(checkpoint);
                Err(RuleFault::Panicked(panic_message(payload.as_ref())))
            }
        }
    }

    /// Run the rule with its diagnostics captured instead of logged.
    pub fn mute(
        &self,
        ctx: &mut Context<'_>,
        value: &Value,
    ) -> (Result<Value, RuleFault>, Vec<LogEntry>) {
        ctx.capture(|ctx| self.apply(ctx, value))
    }

    /// Rewrite the severity of the entries this rule logs.
    ///
    /// Rewritten entries keep their path and get a prefix noting the
    /// coercion; entries of the other severity pass through untouched.
    pub fn remap(self, remap: Remap) -> Self {
        Self::new(move |ctx, value| {
            let (result, captured) = self.mute(ctx, value);
            for mut entry in captured {
                if entry.severity == remap.from() {
                    entry.message = format!(
                        "({} coerced to {}) {}",
                        remap.from().to_string().to_lowercase(),
                        remap.to().to_string().to_lowercase(),
                        entry.message
                    );
                    entry.severity = remap.to();
                }
                ctx.emit(entry);
            }
            result
        })
    }

    pub fn errors_to_warnings(self) -> Self {
        self.remap(Remap::ErrorsToWarnings)
    }

    pub fn warnings_to_errors(self) -> Self {
        self.remap(Remap::WarningsToErrors)
    }

    /// Build a replacement that receives this rule as its base.
    ///
    /// ```
    /// use iiif_validator::rule::FieldRule;
    /// use serde_json::Value;
    ///
    /// let base = FieldRule::passthrough();
    /// let lenient = base.extend(|ctx, value, base| match value {
    ///     Value::String(s) if s.parse::<u64>().is_ok() => {
    ///         let message = format!("{} given as string", ctx.field());
    ///         ctx.warning(message);
    ///         Ok(Value::from(s.parse::<u64>().unwrap_or_default()))
    ///     }
    ///     _ => base.apply(ctx, value),
    /// });
    /// # let _ = lenient;
    /// ```
    pub fn extend<F>(self, f: F) -> Self
    where
        F: Fn(&mut Context<'_>, &Value, &FieldRule) -> Result<Value, RuleFault>
            + Send
            + Sync
            + 'static,
    {
        Self::new(move |ctx, value| f(ctx, value, &self))
    }

    /// Warn instead of checking when the value is `null` or an empty string.
    pub fn optional(self) -> Self {
        self.extend(|ctx, value, base| {
            let empty = match value {
                Value::Null => true,
                Value::String(s) => s.is_empty(),
                _ => false,
            };
            if empty {
                let field = ctx.field().to_string();
                ctx.warning(format!(
                    "'{}' field should not be included if it is empty.",
                    field
                ));
                return Ok(value.clone());
            }
            base.apply(ctx, value)
        })
    }
}
