//! Closed enumerations used throughout the validator.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Diagnostic severity level.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Error,
    Warning,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Error => f.write_str("Error"),
            Severity::Warning => f.write_str("Warning"),
        }
    }
}

/// The kinds of resource a IIIF Presentation 2 document is built from.
///
/// `Unknown` is a real variant: anything that cannot be classified is
/// validated against the generic rule set registered under it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResourceKind {
    Manifest,
    Sequence,
    Canvas,
    Annotation,
    ImageResource,
    Unknown,
}

impl ResourceKind {
    pub const ALL: [ResourceKind; 6] = [
        ResourceKind::Manifest,
        ResourceKind::Sequence,
        ResourceKind::Canvas,
        ResourceKind::Annotation,
        ResourceKind::ImageResource,
        ResourceKind::Unknown,
    ];

    /// The `@type` value that identifies this kind.
    pub fn type_tag(&self) -> Option<&'static str> {
        match self {
            ResourceKind::Manifest => Some("sc:Manifest"),
            ResourceKind::Sequence => Some("sc:Sequence"),
            ResourceKind::Canvas => Some("sc:Canvas"),
            ResourceKind::Annotation => Some("oa:Annotation"),
            ResourceKind::ImageResource => Some("dctypes:Image"),
            ResourceKind::Unknown => None,
        }
    }

    pub fn from_type_tag(tag: &str) -> Option<ResourceKind> {
        ResourceKind::ALL
            .into_iter()
            .find(|k| k.type_tag() == Some(tag))
    }

    /// Name used in diagnostic messages.
    pub fn name(&self) -> &'static str {
        match self {
            ResourceKind::Manifest => "manifest",
            ResourceKind::Sequence => "sequence",
            ResourceKind::Canvas => "canvas",
            ResourceKind::Annotation => "annotation",
            ResourceKind::ImageResource => "resource",
            ResourceKind::Unknown => "unknown",
        }
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// What happens to fields that no rule and no known-field set covers.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnknownFields {
    /// Copy them into the corrected document unchanged.
    #[default]
    Retain,
    /// Leave them out of the corrected document.
    Strip,
}

/// Direction of a severity rewrite applied by [`crate::rule::FieldRule::remap`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Remap {
    ErrorsToWarnings,
    WarningsToErrors,
}

impl Remap {
    pub fn from(&self) -> Severity {
        match self {
            Remap::ErrorsToWarnings => Severity::Error,
            Remap::WarningsToErrors => Severity::Warning,
        }
    }

    pub fn to(&self) -> Severity {
        match self {
            Remap::ErrorsToWarnings => Severity::Warning,
            Remap::WarningsToErrors => Severity::Error,
        }
    }
}
