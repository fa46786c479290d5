use super::common::*;
use iiif_validator::{Session, validate};
use serde_json::json;

#[test]
fn stops_after_first_error() {
    let mut doc = manifest_with(4);
    canvas_mut(&mut doc, 1)["height"] = json!("x");
    canvas_mut(&mut doc, 3)["width"] = json!("y");

    let result = validate(&doc);
    assert_eq!(messages(&result.errors), ["height must be int."]);
    assert_eq!(
        paths(&result.errors),
        ["data['sequences'][0]['canvases'][1]['height']"]
    );
}

#[test]
fn corrected_document_holds_visited_prefix() {
    let mut doc = manifest_with(4);
    canvas_mut(&mut doc, 1)["height"] = json!("x");

    let result = validate(&doc);
    let corrected = result.corrected_document.unwrap();
    let canvases = corrected["sequences"][0]["canvases"].as_array().unwrap();
    assert_eq!(canvases.len(), 2);
    assert_eq!(canvases[0], canvas(0));
    // The failing canvas finishes its own fields but visits no children.
    assert_eq!(canvases[1]["width"], json!(750));
    assert_eq!(canvases[1]["images"], json!([]));
}

#[test]
fn failing_resource_finishes_its_field_scan() {
    let mut doc = manifest();
    let canvas = canvas_mut(&mut doc, 0);
    canvas["height"] = json!("x");
    canvas["viewingHint"] = json!("paged");
    canvas["bogus"] = json!(1);

    let result = validate(&doc);
    assert_eq!(result.errors.len(), 1);
    assert_has(&result.warnings, "Unknown key 'bogus' in 'canvas'.");
    assert_has(&result.errors, "height must be int.");
}

#[test]
fn ancestors_stop_at_the_failing_field() {
    let mut doc = manifest();
    canvas_mut(&mut doc, 0)["height"] = json!("x");
    doc["navDate"] = json!("not a date");

    let result = validate(&doc);
    assert_eq!(result.errors.len(), 1);
    let corrected = result.corrected_document.unwrap();
    assert!(corrected.get("navDate").is_none());
}

#[test]
fn exhaustive_mode_reports_everything() {
    let mut doc = manifest_with(4);
    canvas_mut(&mut doc, 1)["height"] = json!("x");
    canvas_mut(&mut doc, 3)["width"] = json!("y");

    let result = validate_exhaustive(&doc);
    assert_eq!(
        paths(&result.errors),
        [
            "data['sequences'][0]['canvases'][1]['height']",
            "data['sequences'][0]['canvases'][3]['width']",
        ]
    );
    let corrected = result.corrected_document.unwrap();
    assert_eq!(corrected["sequences"][0]["canvases"].as_array().unwrap().len(), 4);
}

#[test]
fn warnings_do_not_halt() {
    let mut doc = manifest_with(2);
    canvas_mut(&mut doc, 0)["extra"] = json!(true);
    canvas_mut(&mut doc, 1)["height"] = json!("x");

    let result = Session::new().validate(&doc);
    assert_eq!(result.errors.len(), 1);
    assert_eq!(
        paths(&result.errors),
        ["data['sequences'][0]['canvases'][1]['height']"]
    );
    assert_eq!(messages(&result.warnings), ["Unknown key 'extra' in 'canvas'."]);
}
