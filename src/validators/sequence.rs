use super::{PRESENTATION_CONTEXT, VIEWING_DIRECTIONS, base};
use crate::context::Context;
use crate::enums::ResourceKind;
use crate::primitives;
use crate::resource::{ResourceCheck, ResourceValidator};
use crate::rule::FieldRule;
use serde_json::{Map, Value};

pub const VIEWING_HINTS: &[&str] = &["individuals", "paged", "continuous"];

/// Where a sequence sits in its document.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Placement {
    /// Validated on its own, as the document root.
    Standalone,
    /// The first sequence of a manifest; it carries the canvases.
    Embedded,
    /// Any later sequence of a manifest; it only references a separate
    /// document.
    Linked,
}

impl Placement {
    pub fn of(ctx: &Context<'_>) -> Self {
        match ctx.position() {
            None => Placement::Standalone,
            Some(0) => Placement::Embedded,
            Some(_) => Placement::Linked,
        }
    }
}

pub fn validator() -> ResourceValidator {
    base(ResourceKind::Sequence, VIEWING_HINTS)
        .require(&["@type"])
        .forbid(&[
            "format",
            "height",
            "width",
            "navDate",
            "first",
            "last",
            "total",
            "next",
            "prev",
            "startIndex",
            "collections",
            "manifests",
            "sequences",
            "structures",
            "resources",
            "otherContent",
            "images",
            "ranges",
        ])
        .know(&["@context", "startCanvas"])
        .with_rule("@context", FieldRule::infallible(context))
        .with_rule("canvases", FieldRule::infallible(canvases))
        .with_rule("startCanvas", FieldRule::infallible(primitives::http_uri))
        .with_rule(
            "viewingDirection",
            FieldRule::infallible(|ctx, v| primitives::one_of(ctx, v, VIEWING_DIRECTIONS)),
        )
        .with_check(ResourceCheck::new(standalone_requires_context))
        .with_check(ResourceCheck::new(embedded_requires_canvases))
        .with_check(ResourceCheck::new(start_canvas_in_sequence))
}

fn context(ctx: &mut Context<'_>, value: &Value) -> Value {
    if Placement::of(ctx) == Placement::Embedded {
        ctx.error("@context field not allowed in embedded sequence.");
    } else if value.as_str() != Some(PRESENTATION_CONTEXT) {
        ctx.error("unknown context.");
    }
    value.clone()
}

fn canvases(ctx: &mut Context<'_>, value: &Value) -> Value {
    if Placement::of(ctx) == Placement::Linked {
        ctx.error("'canvases' is not allowed in a linked sequence.");
        return value.clone();
    }
    let Some(items) = value.as_array() else {
        ctx.error("'canvases' MUST be a list.");
        return value.clone();
    };
    if items.is_empty() {
        ctx.error("'canvases' MUST have at least one entry.");
        return value.clone();
    }
    Value::Array(ctx.validate_each(ResourceKind::Canvas, items))
}

fn standalone_requires_context(ctx: &mut Context<'_>, raw: &Map<String, Value>) {
    if Placement::of(ctx) == Placement::Standalone && !raw.contains_key("@context") {
        ctx.error_at("@context", "Key '@context' is required in 'sequence'.");
    }
}

fn embedded_requires_canvases(ctx: &mut Context<'_>, raw: &Map<String, Value>) {
    if Placement::of(ctx) != Placement::Linked && !raw.contains_key("canvases") {
        ctx.error_at("canvases", "Key 'canvases' is required in 'sequence'.");
    }
}

/// `startCanvas` must name the `@id` of one of this sequence's canvases.
fn start_canvas_in_sequence(ctx: &mut Context<'_>, raw: &Map<String, Value>) {
    let Some(start) = raw.get("startCanvas") else {
        return;
    };
    let target = start
        .as_str()
        .or_else(|| start.get("@id").and_then(Value::as_str));
    let found = raw
        .get("canvases")
        .and_then(Value::as_array)
        .is_some_and(|canvases| {
            canvases
                .iter()
                .any(|c| c.get("@id").and_then(Value::as_str).is_some_and(|id| Some(id) == target))
        });
    if !found {
        ctx.error_at(
            "startCanvas",
            "'startCanvas' MUST refer to the @id of some canvas in this sequence.",
        );
    }
}
