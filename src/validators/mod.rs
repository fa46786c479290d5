//! Default rule tables for the IIIF Presentation API 2 resource kinds.
//!
//! Each submodule builds the [`ResourceValidator`] for one kind on top of
//! [`base`], which carries the fields every resource may have.

pub mod annotation;
pub mod canvas;
pub mod image_resource;
pub mod manifest;
pub mod sequence;

use crate::enums::{ResourceKind, Severity};
use crate::primitives::{self, Markup};
use crate::resource::ResourceValidator;
use crate::rule::FieldRule;

pub const PRESENTATION_CONTEXT: &str = "http://iiif.io/api/presentation/2/context.json";
pub const IMAGE_API_2: &str = "http://iiif.io/api/image/2/context.json";
pub const IMAGE_API_1: &str = "http://iiif.io/api/image/1/context.json";

/// Fields that may appear on any resource.
pub const COMMON_FIELDS: &[&str] = &[
    "label",
    "metadata",
    "description",
    "thumbnail",
    "attribution",
    "license",
    "logo",
    "@id",
    "@type",
    "viewingHint",
    "seeAlso",
    "service",
    "related",
    "rendering",
    "within",
];

pub const VIEWING_DIRECTIONS: &[&str] = &[
    "left-to-right",
    "right-to-left",
    "top-to-bottom",
    "bottom-to-top",
];

/// Validator for `kind` with the common fields known and their rules set.
///
/// `hints` are the `viewingHint` values accepted on this kind besides URIs.
pub fn base(kind: ResourceKind, hints: &'static [&'static str]) -> ResourceValidator {
    let mut validator = ResourceValidator::new(kind)
        .know(COMMON_FIELDS)
        .with_rule("@id", FieldRule::infallible(primitives::id))
        .with_rule(
            "label",
            FieldRule::infallible(|ctx, v| primitives::lang_string(ctx, v, Markup::Forbidden)),
        )
        .with_rule("metadata", FieldRule::infallible(primitives::metadata))
        .with_rule(
            "description",
            FieldRule::infallible(|ctx, v| primitives::lang_string(ctx, v, Markup::Permitted))
                .optional(),
        )
        .with_rule(
            "attribution",
            FieldRule::infallible(|ctx, v| primitives::lang_string(ctx, v, Markup::Permitted))
                .optional(),
        )
        .with_rule("thumbnail", FieldRule::infallible(primitives::image_reference))
        .with_rule("logo", FieldRule::infallible(primitives::image_reference))
        .with_rule(
            "viewingHint",
            FieldRule::infallible(move |ctx, v| primitives::viewing_hint(ctx, v, hints)),
        );
    for field in ["license", "related", "rendering", "service", "seeAlso", "within"] {
        validator = validator.with_rule(field, FieldRule::infallible(primitives::repeatable_uri));
    }
    if let Some(tag) = kind.type_tag() {
        validator = validator.with_rule("@type", type_rule(tag, Severity::Error));
    }
    validator
}

/// `@type` must equal `expected`; a mismatch is logged at `severity`.
pub fn type_rule(expected: &'static str, severity: Severity) -> FieldRule {
    FieldRule::infallible(move |ctx, value| {
        if value.as_str() != Some(expected) {
            let message = match severity {
                Severity::Error => format!("@type must be '{}'.", expected),
                Severity::Warning => format!("@type SHOULD be '{}'.", expected),
            };
            ctx.log(severity, message);
        }
        value.clone()
    })
}

/// Fallback for resources that could not be classified: common fields only.
pub fn generic() -> ResourceValidator {
    base(ResourceKind::Unknown, &[])
}
