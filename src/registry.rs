//! Resource kind → validator mapping.

use crate::enums::ResourceKind;
use crate::resource::ResourceValidator;
use crate::rule::FieldRule;
use crate::validators;
use std::collections::BTreeMap;
use std::sync::{Arc, LazyLock};

/// The default IIIF Presentation 2 registry, built once and shared.
static PRESENTATION_REGISTRY: LazyLock<Registry> = LazyLock::new(|| {
    let mut registry = Registry::empty();
    registry.register(validators::manifest::validator());
    registry.register(validators::sequence::validator());
    registry.register(validators::canvas::validator());
    registry.register(validators::annotation::validator());
    registry.register(validators::image_resource::validator());
    registry.register(validators::generic());
    registry
});

/// Maps each [`ResourceKind`] to the validator used for it.
///
/// Cloning is cheap: validators are shared behind `Arc` and never mutated
/// once registered. Substitution replaces the entry for a kind.
#[derive(Clone, Debug, Default)]
pub struct Registry {
    validators: BTreeMap<ResourceKind, Arc<ResourceValidator>>,
}

impl Registry {
    pub fn empty() -> Self {
        Self::default()
    }

    /// The registry for IIIF Presentation API 2 documents.
    pub fn presentation() -> Self {
        PRESENTATION_REGISTRY.clone()
    }

    /// Register `validator` under its kind, returning the one it replaces.
    pub fn register(&mut self, validator: ResourceValidator) -> Option<Arc<ResourceValidator>> {
        self.validators.insert(validator.kind(), Arc::new(validator))
    }

    /// Replace the validator for `kind` with one derived from the current
    /// validator. Does nothing if `kind` has no validator.
    pub fn modify(
        &mut self,
        kind: ResourceKind,
        f: impl FnOnce(ResourceValidator) -> ResourceValidator,
    ) {
        if let Some(current) = self.validators.get(&kind) {
            let replacement = f(current.as_ref().clone());
            self.register(replacement);
        }
    }

    pub fn get(&self, kind: ResourceKind) -> Option<&ResourceValidator> {
        self.validators.get(&kind).map(Arc::as_ref)
    }

    /// Validator for `kind`, falling back to the generic one registered
    /// under [`ResourceKind::Unknown`].
    pub fn resolve(&self, kind: ResourceKind) -> Option<&ResourceValidator> {
        self.get(kind).or_else(|| self.get(ResourceKind::Unknown))
    }

    pub fn rule(&self, kind: ResourceKind, field: &str) -> Option<&FieldRule> {
        self.get(kind).and_then(|v| v.rule(field))
    }

    pub fn kinds(&self) -> impl Iterator<Item = ResourceKind> + '_ {
        self.validators.keys().copied()
    }
}
