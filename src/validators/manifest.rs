use super::{PRESENTATION_CONTEXT, VIEWING_DIRECTIONS, base};
use crate::context::Context;
use crate::enums::ResourceKind;
use crate::primitives;
use crate::resource::ResourceValidator;
use crate::rule::FieldRule;
use serde_json::Value;

pub const VIEWING_HINTS: &[&str] = &["individuals", "paged", "continuous"];

pub fn validator() -> ResourceValidator {
    base(ResourceKind::Manifest, VIEWING_HINTS)
        .require(&["label", "@context", "@id", "@type", "sequences"])
        .recommend(&["metadata", "description", "thumbnail"])
        .forbid(&[
            "format",
            "height",
            "width",
            "startCanvas",
            "first",
            "last",
            "total",
            "next",
            "prev",
            "startIndex",
            "collections",
            "manifests",
            "members",
            "canvases",
            "resources",
            "otherContent",
            "images",
            "ranges",
        ])
        .know(&["@context", "structures"])
        .with_rule("@context", FieldRule::infallible(context))
        .with_rule("sequences", FieldRule::infallible(sequences))
        .with_rule(
            "viewingDirection",
            FieldRule::infallible(|ctx, v| primitives::one_of(ctx, v, VIEWING_DIRECTIONS)),
        )
        .with_rule("navDate", FieldRule::infallible(primitives::nav_date))
}

/// `@context` must be, or include, the Presentation API 2 context.
fn context(ctx: &mut Context<'_>, value: &Value) -> Value {
    let found = match value {
        Value::String(s) => s == PRESENTATION_CONTEXT,
        Value::Array(items) => items
            .iter()
            .any(|c| c.as_str() == Some(PRESENTATION_CONTEXT)),
        _ => false,
    };
    if !found {
        ctx.error(format!("'@context' must be set to '{}'.", PRESENTATION_CONTEXT));
    }
    value.clone()
}

/// A non-empty list of sequences; the first is embedded, the rest linked.
fn sequences(ctx: &mut Context<'_>, value: &Value) -> Value {
    let Some(items) = value.as_array() else {
        ctx.error("'sequences' MUST be a list.");
        return value.clone();
    };
    if items.is_empty() {
        ctx.error("Manifest requires at least one sequence.");
        return value.clone();
    }
    Value::Array(ctx.validate_each(ResourceKind::Sequence, items))
}
