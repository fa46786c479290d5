//! Session configuration.

use crate::enums::UnknownFields;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

/// Flags read by a [`crate::Session`] during `validate()`.
///
/// Deserializable so a front end can load it from JSON; missing keys take
/// their defaults.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidatorConfig {
    /// Stop at the first accepted error.
    pub fail_fast: bool,
    /// Retain error entries. When false, errors are discarded and never
    /// affect validity.
    pub collect_errors: bool,
    /// Retain warning entries.
    pub collect_warnings: bool,
    /// Collapse entries sharing resource kind, field name and message.
    pub unique_logging: bool,
    /// Send each accepted entry to the session's sink as it is logged.
    pub verbose: bool,
    /// Attach the resource call chain to each entry.
    pub debug: bool,
    pub unknown_fields: UnknownFields,
    pub markup: MarkupPolicy,
}

impl Default for ValidatorConfig {
    fn default() -> Self {
        Self {
            fail_fast: true,
            collect_errors: true,
            collect_warnings: true,
            unique_logging: true,
            verbose: false,
            debug: false,
            unknown_fields: UnknownFields::Retain,
            markup: MarkupPolicy::default(),
        }
    }
}

impl ValidatorConfig {
    /// Collect every diagnostic: no fail-fast, no deduplication.
    pub fn exhaustive() -> Self {
        Self {
            fail_fast: false,
            unique_logging: false,
            ..Self::default()
        }
    }

    pub fn from_json_str(input: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(input)
    }
}

/// Allow-list for markup in fields that permit it.
///
/// Maps each allowed tag to the attributes it may carry. Comments, CDATA
/// sections and declarations are rejected whatever this contains.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MarkupPolicy {
    tags: BTreeMap<String, BTreeSet<String>>,
}

impl Default for MarkupPolicy {
    fn default() -> Self {
        MarkupPolicy::empty()
            .allow("a", &["href"])
            .allow("b", &[])
            .allow("br", &[])
            .allow("i", &[])
            .allow("img", &["src", "alt"])
            .allow("p", &[])
            .allow("span", &[])
    }
}

impl MarkupPolicy {
    pub fn empty() -> Self {
        Self {
            tags: BTreeMap::new(),
        }
    }

    /// Allow `tag` with the given attributes. Names are case-insensitive.
    pub fn allow(mut self, tag: &str, attributes: &[&str]) -> Self {
        self.tags.insert(
            tag.to_ascii_lowercase(),
            attributes.iter().map(|a| a.to_ascii_lowercase()).collect(),
        );
        self
    }

    pub fn allows_tag(&self, tag: &str) -> bool {
        self.tags.contains_key(&tag.to_ascii_lowercase())
    }

    pub fn allows_attribute(&self, tag: &str, attribute: &str) -> bool {
        self.tags
            .get(&tag.to_ascii_lowercase())
            .is_some_and(|attrs| attrs.contains(&attribute.to_ascii_lowercase()))
    }
}
