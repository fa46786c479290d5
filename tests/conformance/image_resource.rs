use super::common::*;
use iiif_validator::validators::IMAGE_API_1;
use serde_json::{Value, json};

fn image_mut(doc: &mut Value) -> &mut Value {
    &mut canvas_mut(doc, 0)["images"][0]["resource"]
}

#[test]
fn type_tag_is_only_recommended() {
    let mut doc = manifest();
    image_mut(&mut doc)["@type"] = json!("dctypes:Sound");
    let result = validate_exhaustive(&doc);
    assert!(result.is_valid());
    assert_eq!(messages(&result.warnings), ["@type SHOULD be 'dctypes:Image'."]);
}

#[test]
fn format_should_be_a_media_type() {
    let mut doc = manifest();
    image_mut(&mut doc)["format"] = json!("jpeg");
    let result = validate_exhaustive(&doc);
    assert!(result.is_valid());
    assert_eq!(messages(&result.warnings), ["format 'jpeg' SHOULD be a media type."]);
}

#[test]
fn service_requires_id_and_context() {
    let mut doc = manifest();
    image_mut(&mut doc)["service"] = json!({"profile": "http://iiif.io/api/image/2/level1.json"});
    let result = validate_exhaustive(&doc);
    assert_eq!(
        messages(&result.errors),
        [
            "Key '@id' is required in 'image service'.",
            "Key '@context' is required in 'image service'.",
        ]
    );
}

#[test]
fn service_without_profile_warns() {
    let mut doc = manifest();
    image_mut(&mut doc)["service"]
        .as_object_mut()
        .unwrap()
        .remove("profile");
    let result = validate_exhaustive(&doc);
    assert!(result.is_valid());
    assert_eq!(messages(&result.warnings), ["image service SHOULD have profile field."]);
}

#[test]
fn image_api_1_service_should_upgrade() {
    let mut doc = manifest();
    image_mut(&mut doc)["service"]["@context"] = json!(IMAGE_API_1);
    let result = validate_exhaustive(&doc);
    assert!(result.is_valid());
    assert_eq!(messages(&result.warnings), ["SHOULD upgrade to 2.0 IIIF image service."]);
}

#[test]
fn non_iiif_service_context() {
    let mut doc = manifest();
    image_mut(&mut doc)["service"]["@context"] = json!("http://example.org/context.json");
    assert_eq!(
        messages(&validate_exhaustive(&doc).errors),
        ["Must reference IIIF image API."]
    );
}

#[test]
fn profile_list_starts_with_uri() {
    let mut doc = manifest();
    image_mut(&mut doc)["service"]["profile"] = json!([
        "http://iiif.io/api/image/2/level2.json",
        {"formats": ["gif"], "supports": ["rotationArbitrary"]}
    ]);
    assert!(validate_exhaustive(&doc).is_valid());

    image_mut(&mut doc)["service"]["profile"] = json!([{"formats": ["gif"]}]);
    assert_eq!(
        messages(&validate_exhaustive(&doc).errors),
        [r#"URI not found: '{"formats":["gif"]}'"#]
    );
}

#[test]
fn service_may_be_a_uri_or_list() {
    let mut doc = manifest();
    image_mut(&mut doc)["service"] = json!("http://example.org/images/book1-page1");
    assert!(validate_exhaustive(&doc).is_valid());

    image_mut(&mut doc)["service"] = json!([image_service(), 3]);
    let result = validate_exhaustive(&doc);
    assert_eq!(
        messages(&result.errors),
        ["service must be a URI or an object, found number."]
    );
    assert!(result.errors[0].path.to_string().ends_with("['service'][1]"));
}

#[test]
fn thumbnail_service_uses_image_service_rule() {
    let mut doc = manifest();
    doc["thumbnail"]["service"]
        .as_object_mut()
        .unwrap()
        .remove("@id");
    let result = validate_exhaustive(&doc);
    assert_eq!(
        messages(&result.errors),
        ["Key '@id' is required in 'image service'."]
    );
    assert_eq!(paths(&result.errors), ["data['thumbnail']['service']['@id']"]);
}

#[test]
fn thumbnail_without_image_service_warns() {
    let mut doc = manifest();
    doc["thumbnail"] = json!("http://example.org/thumb.jpg");
    let result = validate_exhaustive(&doc);
    assert!(result.is_valid());
    assert_eq!(messages(&result.warnings), ["thumbnail SHOULD be IIIF image service."]);
}
