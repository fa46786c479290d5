use super::common::*;
use iiif_validator::classify::Classification;
use iiif_validator::{ResourceKind, classify, validate};
use serde_json::json;

#[test]
fn every_input_gets_a_classification() {
    for value in [json!(null), json!(3), json!("x"), json!([]), json!({})] {
        assert_eq!(classify(&value).kind(), ResourceKind::Unknown);
    }
}

#[test]
fn untagged_manifest_is_inferred() {
    let mut doc = manifest();
    doc.as_object_mut().unwrap().remove("@type");
    assert_eq!(classify(&doc), Classification::Inferred(ResourceKind::Manifest));

    let result = validate_exhaustive(&doc);
    assert_eq!(messages(&result.errors), ["Key '@type' is required in 'manifest'."]);
}

#[test]
fn standalone_canvas_validates_as_root() {
    let result = validate_exhaustive(&canvas(0));
    assert!(result.is_valid(), "{:?}", messages(&result.errors));
    assert_eq!(result.corrected_document, Some(canvas(0)));
}

#[test]
fn unknown_type_tag_is_a_root_error() {
    let doc = json!({"@type": "sc:Collection", "@id": "http://example.org/c", "label": "c"});
    let result = validate(&doc);
    assert_eq!(messages(&result.errors), ["Unknown @type: 'sc:Collection'"]);
    assert!(result.errors[0].path.is_root());
    assert_eq!(result.corrected_document, Some(doc));
}

#[test]
fn ambiguous_shape_is_reported() {
    let doc = json!({"images": [], "motivation": "sc:painting"});
    match classify(&doc) {
        Classification::Ambiguous(kinds) => {
            assert_eq!(kinds, [ResourceKind::Canvas, ResourceKind::Annotation]);
        }
        other => panic!("expected ambiguous, got {:?}", other),
    }
    let result = validate(&doc);
    assert_eq!(
        messages(&result.errors),
        ["Could not determine resource type; candidates: canvas, annotation."]
    );
}

#[test]
fn non_object_root() {
    let result = validate_exhaustive(&json!([1, 2]));
    assert_eq!(messages(&result.errors), ["Document root must be a JSON object."]);
    assert_eq!(result.corrected_document, Some(json!([1, 2])));
}
