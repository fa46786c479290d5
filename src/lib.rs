//! Validator for [IIIF Presentation API 2](https://iiif.io/api/presentation/2.1/)
//! JSON-LD documents.
//!
//! A IIIF manifest describes the structure of a digitized object: its
//! sequences, canvases, painting annotations and image resources. This crate
//! walks a manifest depth-first, checks every resource against the rules for
//! its kind, and reports errors and warnings with the exact path of each
//! defect, together with a corrected copy of the document:
//!
//! ```text
//! decode(json) → Value → classify → Registry → ResourceValidator
//!                                                 → FieldRule per field
//!                                   → ValidationResult { errors, warnings, corrected_document }
//! ```
//!
//! # Quick Start
//!
//! ```rust
//! use iiif_validator::Session;
//!
//! let json = r#"{
//!     "@context": "http://iiif.io/api/presentation/2/context.json",
//!     "@id": "http://example.org/iiif/book1/manifest",
//!     "@type": "sc:Manifest",
//!     "label": "Book 1",
//!     "sequences": [{
//!         "@type": "sc:Sequence",
//!         "canvases": [{
//!             "@id": "http://example.org/iiif/book1/canvas/p1",
//!             "@type": "sc:Canvas",
//!             "label": "p. 1",
//!             "height": 1000,
//!             "width": 750
//!         }]
//!     }]
//! }"#;
//!
//! let mut session = Session::new();
//! let result = session.validate_str(json);
//! assert!(result.is_valid());
//! for warning in &result.warnings {
//!     println!("{}", warning);
//! }
//! ```
//!
//! # Customizing rules
//!
//! Validators are looked up by [`ResourceKind`] in the session's
//! [`Registry`]. Replacing an entry changes how every resource of that kind
//! is checked; [`ResourceValidator::override_rule`] hands the replacement
//! the rule it replaces so it can delegate to it.
//!
//! ```rust
//! use iiif_validator::{ResourceKind, Session};
//!
//! let mut session = Session::new();
//! session.registry_mut().modify(ResourceKind::Canvas, |canvas| {
//!     canvas.override_rule("height", |rule| rule.errors_to_warnings())
//! });
//! ```

pub mod assemble;
pub mod classify;
pub mod config;
pub mod context;
pub mod decode;
pub mod enums;
pub mod error;
pub mod log;
pub mod markup;
pub mod path;
pub mod primitives;
pub mod registry;
pub mod resource;
pub mod rule;
pub mod session;
pub mod validators;

pub use config::{MarkupPolicy, ValidatorConfig};
pub use context::Context;
pub use enums::{ResourceKind, Severity, UnknownFields};
pub use error::*;
pub use log::{DiagnosticSink, TracingSink};
pub use path::{DocPath, Segment};
pub use registry::Registry;
pub use resource::{ResourceCheck, ResourceValidator};
pub use rule::FieldRule;
pub use session::Session;

// Re-export entry-point functions at the crate root for convenience.
pub use classify::classify;
pub use decode::decode;

/// Validate `document` with a default-configured [`Session`].
pub fn validate(document: &serde_json::Value) -> ValidationResult {
    Session::new().validate(document)
}
