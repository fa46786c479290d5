use super::base;
use crate::context::Context;
use crate::enums::ResourceKind;
use crate::primitives;
use crate::resource::{ResourceCheck, ResourceValidator};
use crate::rule::FieldRule;
use serde_json::{Map, Value};

pub const VIEWING_HINTS: &[&str] = &["non-paged", "facing-pages"];

pub fn validator() -> ResourceValidator {
    base(ResourceKind::Canvas, VIEWING_HINTS)
        .require(&["label", "@id", "@type", "height", "width"])
        .forbid(&[
            "format",
            "viewingDirection",
            "navDate",
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
            "sequences",
            "structures",
            "canvases",
            "resources",
            "ranges",
        ])
        .with_rule("height", FieldRule::infallible(primitives::integer))
        .with_rule("width", FieldRule::infallible(primitives::integer))
        .with_rule("images", FieldRule::infallible(images))
        .with_rule("otherContent", FieldRule::infallible(other_content))
        .with_check(ResourceCheck::new(images_present))
        .with_check(ResourceCheck::new(thumbnail_for_multiple_images))
}

/// A list of painting annotations.
fn images(ctx: &mut Context<'_>, value: &Value) -> Value {
    match value {
        Value::Array(items) if items.is_empty() => {
            ctx.warning("'images' SHOULD have values.");
            value.clone()
        }
        Value::Array(items) => Value::Array(ctx.validate_each(ResourceKind::Annotation, items)),
        Value::Null => {
            ctx.warning("'images' SHOULD have values.");
            value.clone()
        }
        _ => {
            ctx.error("'images' must be a list.");
            value.clone()
        }
    }
}

/// A list of annotation list references.
fn other_content(ctx: &mut Context<'_>, value: &Value) -> Value {
    let Some(items) = value.as_array() else {
        ctx.error("otherContent must be a list.");
        return value.clone();
    };
    let corrected = items
        .iter()
        .enumerate()
        .map(|(i, item)| ctx.with_segment(i, |ctx| primitives::uri(ctx, item, false)))
        .collect();
    Value::Array(corrected)
}

/// A present `images` value is checked by its rule; only absence is left.
fn images_present(ctx: &mut Context<'_>, raw: &Map<String, Value>) {
    if !raw.contains_key("images") {
        ctx.warning_at("images", "'images' SHOULD have values.");
    }
}

fn thumbnail_for_multiple_images(ctx: &mut Context<'_>, raw: &Map<String, Value>) {
    let image_count = raw
        .get("images")
        .and_then(Value::as_array)
        .map_or(0, Vec::len);
    if image_count > 1 && raw.get("thumbnail").is_none_or(Value::is_null) {
        ctx.warning_at(
            "thumbnail",
            "Canvas SHOULD have a thumbnail when there is more than one image.",
        );
    }
}
