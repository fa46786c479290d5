use super::common::*;
use serde_json::json;

#[test]
fn dimensions_must_be_integers() {
    let mut doc = manifest();
    let canvas = canvas_mut(&mut doc, 0);
    canvas["height"] = json!(10.5);
    canvas["width"] = json!(-3);
    let result = validate_exhaustive(&doc);
    assert_eq!(messages(&result.errors), ["height must be int.", "width must be int."]);
}

#[test]
fn missing_required_fields() {
    let mut doc = manifest();
    let canvas = canvas_mut(&mut doc, 0).as_object_mut().unwrap();
    canvas.remove("label");
    canvas.remove("width");
    let result = validate_exhaustive(&doc);
    // Required keys are checked in name order.
    assert_eq!(
        messages(&result.errors),
        [
            "Key 'label' is required in 'canvas'.",
            "Key 'width' is required in 'canvas'.",
        ]
    );
}

#[test]
fn empty_images_warn() {
    let mut doc = manifest();
    canvas_mut(&mut doc, 0)["images"] = json!([]);
    let result = validate_exhaustive(&doc);
    assert!(result.is_valid());
    assert_eq!(messages(&result.warnings), ["'images' SHOULD have values."]);
}

#[test]
fn missing_images_warn() {
    let mut doc = manifest();
    canvas_mut(&mut doc, 0).as_object_mut().unwrap().remove("images");
    let result = validate_exhaustive(&doc);
    assert!(result.is_valid());
    assert_eq!(messages(&result.warnings), ["'images' SHOULD have values."]);
    assert_eq!(
        paths(&result.warnings),
        ["data['sequences'][0]['canvases'][0]['images']"]
    );
}

#[test]
fn images_must_be_a_list() {
    let mut doc = manifest();
    canvas_mut(&mut doc, 0)["images"] = json!({"@type": "oa:Annotation"});
    assert_eq!(
        messages(&validate_exhaustive(&doc).errors),
        ["'images' must be a list."]
    );
}

#[test]
fn multiple_images_want_a_thumbnail() {
    let mut doc = manifest();
    canvas_mut(&mut doc, 0)["images"] = json!([annotation(0), annotation(0)]);
    let result = validate_exhaustive(&doc);
    assert!(result.is_valid());
    assert_eq!(
        messages(&result.warnings),
        ["Canvas SHOULD have a thumbnail when there is more than one image."]
    );

    canvas_mut(&mut doc, 0)["thumbnail"] = json!({
        "@id": "http://example.org/thumb.jpg",
        "service": image_service()
    });
    assert!(validate_exhaustive(&doc).warnings.is_empty());
}

#[test]
fn other_content_is_a_list_of_uris() {
    let mut doc = manifest();
    canvas_mut(&mut doc, 0)["otherContent"] = json!([
        {"@id": "http://example.org/iiif/book1/list/p0", "@type": "sc:AnnotationList"},
        "not a uri"
    ]);
    let result = validate_exhaustive(&doc);
    assert_eq!(messages(&result.errors), ["URI is not valid: 'not a uri'"]);
    assert_eq!(
        paths(&result.errors),
        ["data['sequences'][0]['canvases'][0]['otherContent'][1]"]
    );
}

#[test]
fn forbidden_on_canvas() {
    let mut doc = manifest();
    canvas_mut(&mut doc, 0)["format"] = json!("image/jpeg");
    assert_eq!(
        messages(&validate_exhaustive(&doc).errors),
        ["Key 'format' is not allowed in 'canvas'."]
    );
}
