use super::{IMAGE_API_1, IMAGE_API_2, base, type_rule};
use crate::context::Context;
use crate::enums::{ResourceKind, Severity};
use crate::error::value_kind;
use crate::primitives;
use crate::resource::ResourceValidator;
use crate::rule::FieldRule;
use serde_json::{Map, Value};

pub fn validator() -> ResourceValidator {
    base(ResourceKind::ImageResource, &[])
        .require(&["@type", "@id"])
        .forbid(&[
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
        .know(&["@context"])
        .with_rule("@type", type_rule("dctypes:Image", Severity::Warning))
        .with_rule("height", FieldRule::infallible(primitives::integer))
        .with_rule("width", FieldRule::infallible(primitives::integer))
        .with_rule("format", FieldRule::infallible(primitives::media_type))
        .with_rule("service", FieldRule::infallible(service))
}

/// An image service: a URI, a service object, or a list of either.
pub fn service(ctx: &mut Context<'_>, value: &Value) -> Value {
    match value {
        Value::String(_) => primitives::uri(ctx, value, false),
        Value::Array(items) => Value::Array(
            items
                .iter()
                .enumerate()
                .map(|(i, item)| ctx.with_segment(i, |ctx| service(ctx, item)))
                .collect(),
        ),
        Value::Object(obj) => service_object(ctx, obj),
        other => {
            ctx.error(format!(
                "service must be a URI or an object, found {}.",
                value_kind(other)
            ));
            value.clone()
        }
    }
}

fn service_object(ctx: &mut Context<'_>, obj: &Map<String, Value>) -> Value {
    for field in ["@id", "@context"] {
        if !obj.contains_key(field) {
            ctx.error_at(field, format!("Key '{}' is required in 'image service'.", field));
        }
    }
    if !obj.contains_key("profile") {
        ctx.warning_at("profile", "image service SHOULD have profile field.");
    }

    let mut corrected = obj.clone();
    if let Some(id) = obj.get("@id") {
        let checked = ctx.with_segment("@id", |ctx| primitives::id(ctx, id));
        corrected.insert("@id".to_string(), checked);
    }
    if let Some(context) = obj.get("@context") {
        ctx.with_segment("@context", |ctx| match context.as_str() {
            Some(IMAGE_API_2) => {}
            Some(IMAGE_API_1) => ctx.warning("SHOULD upgrade to 2.0 IIIF image service."),
            _ => ctx.error("Must reference IIIF image API."),
        });
    }
    if let Some(profile) = obj.get("profile") {
        let checked = ctx.with_segment("profile", |ctx| service_profile(ctx, profile));
        corrected.insert("profile".to_string(), checked);
    }
    if let Some(label) = obj.get("label") {
        let checked = ctx.with_segment("label", |ctx| {
            primitives::lang_string(ctx, label, primitives::Markup::Forbidden)
        });
        corrected.insert("label".to_string(), checked);
    }
    Value::Object(corrected)
}

/// A profile URI, or a list whose first entry is the profile URI followed
/// by profile description objects.
fn service_profile(ctx: &mut Context<'_>, value: &Value) -> Value {
    match value {
        Value::Array(items) => match items.first() {
            Some(first) => {
                ctx.with_segment(0, |ctx| primitives::uri(ctx, first, false));
                value.clone()
            }
            None => {
                ctx.error("profile list must not be empty.");
                value.clone()
            }
        },
        _ => primitives::uri(ctx, value, false),
    }
}
