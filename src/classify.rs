//! Resource classification.
//!
//! Every input maps to exactly one [`Classification`]. The `@type` tag wins
//! when present; otherwise the structural shape of the object is used, and
//! anything left over is reported as ambiguous or unrecognized rather than
//! failing.

use crate::enums::ResourceKind;
use crate::validators::PRESENTATION_CONTEXT;
use serde_json::{Map, Value};

/// Outcome of classifying a raw value.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Classification {
    /// `@type` names a known kind.
    Tagged(ResourceKind),
    /// No `@type`, but exactly one kind matches the object's shape.
    Inferred(ResourceKind),
    /// No `@type`, and several kinds match the object's shape.
    Ambiguous(Vec<ResourceKind>),
    /// Not an object, an unrecognized `@type`, or no shape matches.
    Unrecognized { type_tag: Option<String> },
}

impl Classification {
    /// The kind to validate as. Ambiguous and unrecognized inputs fall back
    /// to [`ResourceKind::Unknown`].
    pub fn kind(&self) -> ResourceKind {
        match self {
            Classification::Tagged(kind) | Classification::Inferred(kind) => *kind,
            Classification::Ambiguous(_) | Classification::Unrecognized { .. } => {
                ResourceKind::Unknown
            }
        }
    }

    pub fn is_certain(&self) -> bool {
        matches!(self, Classification::Tagged(_))
    }
}

/// Classify a raw value.
pub fn classify(value: &Value) -> Classification {
    let Some(obj) = value.as_object() else {
        return Classification::Unrecognized { type_tag: None };
    };

    match obj.get("@type") {
        Some(Value::String(tag)) => match ResourceKind::from_type_tag(tag) {
            Some(kind) => Classification::Tagged(kind),
            None => Classification::Unrecognized {
                type_tag: Some(tag.clone()),
            },
        },
        Some(other) => Classification::Unrecognized {
            type_tag: Some(other.to_string()),
        },
        None => classify_by_shape(obj),
    }
}

fn classify_by_shape(obj: &Map<String, Value>) -> Classification {
    let candidates: Vec<ResourceKind> = [
        (ResourceKind::Manifest, looks_like_manifest(obj)),
        (ResourceKind::Sequence, obj.contains_key("canvases")),
        (
            ResourceKind::Canvas,
            obj.contains_key("images")
                || (obj.contains_key("height")
                    && obj.contains_key("width")
                    && obj.contains_key("label")),
        ),
        (
            ResourceKind::Annotation,
            obj.contains_key("motivation") || obj.contains_key("on"),
        ),
    ]
    .into_iter()
    .filter_map(|(kind, matched)| matched.then_some(kind))
    .collect();

    match candidates.as_slice() {
        [] => Classification::Unrecognized { type_tag: None },
        [kind] => Classification::Inferred(*kind),
        _ => Classification::Ambiguous(candidates),
    }
}

fn looks_like_manifest(obj: &Map<String, Value>) -> bool {
    if obj.contains_key("sequences") {
        return true;
    }
    match obj.get("@context") {
        Some(Value::String(ctx)) => ctx == PRESENTATION_CONTEXT && !obj.contains_key("canvases"),
        Some(Value::Array(items)) => {
            items.iter().any(|c| c.as_str() == Some(PRESENTATION_CONTEXT))
                && !obj.contains_key("canvases")
        }
        _ => false,
    }
}
