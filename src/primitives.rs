//! Value checks shared by the default rule tables.
//!
//! Each function validates the value of the field named by the current
//! context path and returns the corrected value. They never fail: problems
//! are logged and the original value is returned.

use crate::context::Context;
use crate::enums::ResourceKind;
use crate::error::value_kind;
use crate::markup::check_markup;
use crate::validators::IMAGE_API_2;
use regex::Regex;
use serde_json::{Map, Value};
use std::sync::LazyLock;
use url::Url;
use uuid::Uuid;

static NAV_DATE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{4}-\d{2}-\d{2}T\d{2}:\d{2}:\d{2}Z$").unwrap());

static MEDIA_TYPE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9!#$&^_.+-]+/[A-Za-z0-9!#$&^_.+-]+$").unwrap());

/// Whether a text field may carry markup.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Markup {
    Permitted,
    Forbidden,
}

// ─── Strings ────────────────────────────────────────────────────────────────

/// A string, a `{@value, @language}` object, or a list of either.
pub fn lang_string(ctx: &mut Context<'_>, value: &Value, markup: Markup) -> Value {
    match value {
        Value::String(s) => Value::String(check_markup(ctx, s, markup == Markup::Permitted)),
        Value::Array(items) => Value::Array(
            items
                .iter()
                .enumerate()
                .map(|(i, item)| ctx.with_segment(i, |ctx| lang_string(ctx, item, markup)))
                .collect(),
        ),
        Value::Object(obj) => {
            if !obj.contains_key("@value") {
                ctx.error("Field has no '@value' key where one is required.");
                return value.clone();
            }
            if !obj.contains_key("@language") {
                ctx.error("Field has no '@language' key where one is required.");
                return value.clone();
            }
            let mut corrected = obj.clone();
            let language = ctx.with_segment("@language", |ctx| {
                repeatable_string(ctx, &obj["@language"])
            });
            let text = ctx.with_segment("@value", |ctx| match &obj["@value"] {
                Value::String(s) => Value::String(check_markup(ctx, s, markup == Markup::Permitted)),
                other => repeatable_string(ctx, other),
            });
            corrected.insert("@language".to_string(), language);
            corrected.insert("@value".to_string(), text);
            Value::Object(corrected)
        }
        other => {
            ctx.error(format!(
                "Illegal type {} (should be string, list, or object).",
                value_kind(other)
            ));
            value.clone()
        }
    }
}

/// A string or a flat list of strings.
pub fn repeatable_string(ctx: &mut Context<'_>, value: &Value) -> Value {
    match value {
        Value::String(_) => {}
        Value::Array(items) => {
            if items.iter().any(|v| !v.is_string()) {
                ctx.error(format!("Overly nested strings: '{}'", value));
            }
        }
        other => ctx.error(format!(
            "Got '{}' when expecting string or repeated string.",
            other
        )),
    }
    value.clone()
}

// ─── URIs ───────────────────────────────────────────────────────────────────

/// A URI given as a string or as an object with an `@id`.
pub fn uri(ctx: &mut Context<'_>, value: &Value, http_only: bool) -> Value {
    match value {
        Value::String(s) => {
            string_uri(ctx, s, http_only);
            value.clone()
        }
        Value::Object(obj) => match obj.get("@id") {
            Some(Value::String(id)) if !id.is_empty() => {
                string_uri(ctx, id, http_only);
                value.clone()
            }
            Some(other) if !other.is_null() && !other.is_string() => {
                ctx.error(format!("URI is not string: '{}'", other));
                value.clone()
            }
            _ => {
                ctx.error(format!("URI not found: '{}'", value));
                value.clone()
            }
        },
        other => {
            ctx.error(format!("Can't parse URI: {}", other));
            value.clone()
        }
    }
}

/// Scheme and host must both be present.
fn string_uri(ctx: &mut Context<'_>, text: &str, http_only: bool) {
    match Url::parse(text) {
        Ok(url) if url.has_host() => {
            if http_only && !matches!(url.scheme(), "http" | "https") {
                ctx.error(format!("URI must be http: '{}'", text));
            }
        }
        _ => ctx.error(format!("URI is not valid: '{}'", text)),
    }
}

pub fn http_uri(ctx: &mut Context<'_>, value: &Value) -> Value {
    uri(ctx, value, true)
}

/// One URI or a list of them.
pub fn repeatable_uri(ctx: &mut Context<'_>, value: &Value) -> Value {
    match value {
        Value::Array(items) => Value::Array(
            items
                .iter()
                .enumerate()
                .map(|(i, item)| ctx.with_segment(i, |ctx| uri(ctx, item, false)))
                .collect(),
        ),
        _ => uri(ctx, value, false),
    }
}

/// `@id`: an HTTP(S) URI, or a `urn:uuid:` with a valid UUID.
pub fn id(ctx: &mut Context<'_>, value: &Value) -> Value {
    if let Some(urn) = value.as_str().and_then(|s| s.strip_prefix("urn:uuid:")) {
        if Uuid::parse_str(urn).is_err() {
            ctx.error("Invalid UUID in @id.");
        }
        return value.clone();
    }
    http_uri(ctx, value)
}

// ─── Scalars ────────────────────────────────────────────────────────────────

/// A non-negative integer such as `height` or `width`.
pub fn integer(ctx: &mut Context<'_>, value: &Value) -> Value {
    if !value.is_u64() {
        let field = ctx.field().to_string();
        ctx.error(format!("{} must be int.", field));
    }
    value.clone()
}

/// One of a closed set of strings.
pub fn one_of(ctx: &mut Context<'_>, value: &Value, allowed: &[&str]) -> Value {
    if !value.as_str().is_some_and(|s| allowed.contains(&s)) {
        let field = ctx.field().to_string();
        ctx.error(format!(
            "{} '{}' is not valid; expected one of: {}.",
            field,
            display_scalar(value),
            allowed.join(", ")
        ));
    }
    value.clone()
}

/// `viewingHint`: one of the kind's hints, or any URI.
pub fn viewing_hint(ctx: &mut Context<'_>, value: &Value, hints: &[&str]) -> Value {
    if value.as_str().is_some_and(|s| hints.contains(&s)) {
        return value.clone();
    }
    let (_, problems) = ctx.capture(|ctx| uri(ctx, value, false));
    if !problems.is_empty() {
        ctx.error(format!(
            "viewingHint '{}' is not valid and not uri.",
            display_scalar(value)
        ));
    }
    value.clone()
}

/// `navDate`: an `xsd:dateTime` in UTC, `YYYY-MM-DDThh:mm:ssZ`.
pub fn nav_date(ctx: &mut Context<'_>, value: &Value) -> Value {
    if !value.as_str().is_some_and(|s| NAV_DATE_RE.is_match(s)) {
        ctx.error(format!(
            "navDate '{}' must be formatted as YYYY-MM-DDThh:mm:ssZ.",
            display_scalar(value)
        ));
    }
    value.clone()
}

/// `format`: a media type such as `image/jpeg`.
pub fn media_type(ctx: &mut Context<'_>, value: &Value) -> Value {
    if !value.as_str().is_some_and(|s| MEDIA_TYPE_RE.is_match(s)) {
        ctx.warning(format!(
            "format '{}' SHOULD be a media type.",
            display_scalar(value)
        ));
    }
    value.clone()
}

// ─── Structured fields ──────────────────────────────────────────────────────

/// `metadata`: a list of `{label, value}` pairs; values may carry markup.
pub fn metadata(ctx: &mut Context<'_>, value: &Value) -> Value {
    let Some(entries) = value.as_array() else {
        ctx.error("Metadata MUST be a list");
        return value.clone();
    };
    let corrected = entries
        .iter()
        .enumerate()
        .map(|(i, entry)| ctx.with_segment(i, |ctx| metadata_entry(ctx, entry)))
        .collect();
    Value::Array(corrected)
}

fn metadata_entry(ctx: &mut Context<'_>, entry: &Value) -> Value {
    let Some(obj) = entry.as_object() else {
        ctx.error("Entries must be dictionaries.");
        return entry.clone();
    };
    let mut complete = true;
    for key in ["label", "value"] {
        if !obj.contains_key(key) {
            ctx.error_at(key, format!("metadata entries must have {}s.", key));
            complete = false;
        }
    }
    if !complete {
        return entry.clone();
    }
    let mut corrected = obj.clone();
    let label = ctx.with_segment("label", |ctx| lang_string(ctx, &obj["label"], Markup::Forbidden));
    let text = ctx.with_segment("value", |ctx| lang_string(ctx, &obj["value"], Markup::Permitted));
    corrected.insert("label".to_string(), label);
    corrected.insert("value".to_string(), text);
    Value::Object(corrected)
}

/// `thumbnail` and `logo`: a URI or an image object, ideally backed by a
/// IIIF Image API service.
///
/// An Image API 2 service is checked with the `service` rule currently
/// registered for image resources, so substituting that rule also changes
/// how thumbnails and logos are checked.
pub fn image_reference(ctx: &mut Context<'_>, value: &Value) -> Value {
    let field = ctx.field().to_string();
    match value {
        Value::String(_) => {
            ctx.warning(format!("{} SHOULD be IIIF image service.", field));
            uri(ctx, value, false)
        }
        Value::Object(obj) => {
            match obj.get("service") {
                Some(service)
                    if service.get("@context").and_then(Value::as_str) == Some(IMAGE_API_2) =>
                {
                    let mut corrected: Map<String, Value> = obj.clone();
                    let checked = ctx.with_segment("service", |ctx| image_service(ctx, service));
                    corrected.insert("service".to_string(), checked);
                    Value::Object(corrected)
                }
                _ => {
                    let checked = uri(ctx, value, false);
                    ctx.warning(format!("{} SHOULD be IIIF image service.", field));
                    checked
                }
            }
        }
        Value::Array(items) => Value::Array(
            items
                .iter()
                .enumerate()
                .map(|(i, item)| ctx.with_segment(i, |ctx| image_reference(ctx, item)))
                .collect(),
        ),
        _ => {
            ctx.error(format!("{} type should be string or object.", field));
            value.clone()
        }
    }
}

/// Run the image resource `service` rule from the registry on `value`.
pub fn image_service(ctx: &mut Context<'_>, value: &Value) -> Value {
    let registry = ctx.registry();
    match registry.rule(ResourceKind::ImageResource, "service") {
        Some(rule) => match rule.apply_guarded(ctx, value) {
            Ok(corrected) => corrected,
            Err(fault) => {
                ctx.error(format!("Internal error while validating 'service': {}", fault));
                value.clone()
            }
        },
        None => value.clone(),
    }
}

fn display_scalar(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
