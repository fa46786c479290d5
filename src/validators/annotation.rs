use super::base;
use crate::context::Context;
use crate::enums::ResourceKind;
use crate::resource::ResourceValidator;
use crate::rule::FieldRule;
use serde_json::Value;

pub fn validator() -> ResourceValidator {
    base(ResourceKind::Annotation, &[])
        .require(&["@type", "on", "motivation"])
        .forbid(&[
            "format",
            "height",
            "width",
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
            "otherContent",
            "images",
            "ranges",
        ])
        .with_rule("motivation", FieldRule::infallible(motivation))
        .with_rule("on", FieldRule::infallible(on))
        .with_rule("resource", FieldRule::infallible(resource))
}

fn motivation(ctx: &mut Context<'_>, value: &Value) -> Value {
    if value.as_str() != Some("sc:painting") {
        ctx.error("motivation must be 'sc:painting'.");
    }
    value.clone()
}

/// `on` must reference the canvas the annotation is painted on.
fn on(ctx: &mut Context<'_>, value: &Value) -> Value {
    let target = value
        .as_str()
        .or_else(|| value.get("@id").and_then(Value::as_str));
    let mismatch = ctx
        .enclosing_id(ResourceKind::Canvas)
        .is_some_and(|canvas| target != Some(canvas));
    if mismatch {
        ctx.error("'on' must reference the canvas URI.");
    }
    value.clone()
}

/// The painted image. For an `oa:Choice`, the `default` item is the image.
fn resource(ctx: &mut Context<'_>, value: &Value) -> Value {
    if value.get("@type").and_then(Value::as_str) == Some("oa:Choice") {
        let Some(default) = value.get("default") else {
            ctx.error_at("default", "Key 'default' is required in 'oa:Choice'.");
            return value.clone();
        };
        let mut corrected = value.clone();
        let checked = ctx.with_segment("default", |ctx| {
            ctx.validate_nested(ResourceKind::ImageResource, default)
        });
        // Only the unvisited item is left out, not the choice itself.
        if ctx.take_omitted() {
            if let Some(obj) = corrected.as_object_mut() {
                obj.remove("default");
            }
        } else {
            corrected["default"] = checked;
        }
        return corrected;
    }
    ctx.validate_nested(ResourceKind::ImageResource, value)
}
