use super::common::*;
use iiif_validator::validators::PRESENTATION_CONTEXT;
use serde_json::json;

#[test]
fn context_must_be_presentation_2() {
    let mut doc = manifest();
    doc["@context"] = json!("http://iiif.io/api/presentation/3/context.json");
    let result = validate_exhaustive(&doc);
    assert_eq!(
        messages(&result.errors),
        [format!("'@context' must be set to '{}'.", PRESENTATION_CONTEXT)]
    );
}

#[test]
fn context_list_may_include_extensions() {
    let mut doc = manifest();
    doc["@context"] = json!(["http://example.org/ext/context.json", PRESENTATION_CONTEXT]);
    assert!(validate_exhaustive(&doc).is_valid());
}

#[test]
fn sequences_must_be_a_non_empty_list() {
    let mut doc = manifest();
    doc["sequences"] = json!({});
    assert_eq!(
        messages(&validate_exhaustive(&doc).errors),
        ["'sequences' MUST be a list."]
    );

    doc["sequences"] = json!([]);
    assert_eq!(
        messages(&validate_exhaustive(&doc).errors),
        ["Manifest requires at least one sequence."]
    );
}

#[test]
fn forbidden_keys() {
    let mut doc = manifest();
    doc["width"] = json!(100);
    doc["startCanvas"] = json!("http://example.org/iiif/book1/canvas/p0");
    let result = validate_exhaustive(&doc);
    assert_eq!(
        messages(&result.errors),
        [
            "Key 'width' is not allowed in 'manifest'.",
            "Key 'startCanvas' is not allowed in 'manifest'.",
        ]
    );
    assert_eq!(paths(&result.errors), ["data['width']", "data['startCanvas']"]);
}

#[test]
fn viewing_direction_and_hint() {
    let mut doc = manifest();
    doc["viewingDirection"] = json!("right-to-left");
    doc["viewingHint"] = json!("paged");
    assert!(validate_exhaustive(&doc).is_valid());

    doc["viewingDirection"] = json!("sideways");
    doc["viewingHint"] = json!("non-paged");
    let result = validate_exhaustive(&doc);
    assert_eq!(
        messages(&result.errors),
        [
            "viewingDirection 'sideways' is not valid; expected one of: left-to-right, right-to-left, top-to-bottom, bottom-to-top.",
            "viewingHint 'non-paged' is not valid and not uri.",
        ]
    );
}

#[test]
fn nav_date() {
    let mut doc = manifest();
    doc["navDate"] = json!("1856-01-01T00:00:00Z");
    assert!(validate_exhaustive(&doc).is_valid());
}

#[test]
fn second_sequence_is_linked() {
    let mut doc = manifest();
    doc["sequences"]
        .as_array_mut()
        .unwrap()
        .push(json!({
            "@context": PRESENTATION_CONTEXT,
            "@id": "http://example.org/iiif/book1/sequence/reversed",
            "@type": "sc:Sequence",
            "label": "Reversed"
        }));
    let result = validate_exhaustive(&doc);
    assert!(result.is_valid(), "{:?}", messages(&result.errors));
    assert!(result.warnings.is_empty());
}

#[test]
fn structures_pass_through() {
    let mut doc = manifest();
    doc["structures"] = json!([{"@id": "http://example.org/range/r1", "@type": "sc:Range"}]);
    let result = validate_exhaustive(&doc);
    assert!(result.is_valid());
    assert!(result.warnings.is_empty());
    assert_eq!(result.corrected_document, Some(doc));
}
