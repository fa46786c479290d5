use super::common::*;
use iiif_validator::{MarkupPolicy, Session, ValidatorConfig};
use serde_json::json;

#[test]
fn allowed_markup_in_description() {
    let mut doc = manifest();
    doc["description"] = json!(r#"<p>See <a href="http://example.org">the catalogue</a>.<br/></p>"#);
    assert!(validate_exhaustive(&doc).is_valid());
}

#[test]
fn comments_rejected_under_any_policy() {
    let mut doc = manifest();
    doc["description"] = json!("<p>text<!-- hidden --></p>");

    let permissive = MarkupPolicy::default().allow("!--", &[]);
    for markup in [MarkupPolicy::default(), MarkupPolicy::empty(), permissive] {
        let config = ValidatorConfig {
            markup,
            ..ValidatorConfig::exhaustive()
        };
        let result = Session::with_config(config).validate(&doc);
        assert_has(&result.errors, "Markup comments are not allowed.");
    }
}

#[test]
fn disallowed_attribute_is_named() {
    let mut doc = manifest();
    doc["attribution"] = json!(r#"<a href="http://example.org" onclick="steal()">Library</a>"#);
    let result = validate_exhaustive(&doc);
    assert_eq!(
        messages(&result.errors),
        ["Attribute 'onclick' is not allowed on markup tag '<a>'."]
    );
    assert_eq!(paths(&result.errors), ["data['attribution']"]);
}

#[test]
fn every_issue_in_a_value_is_reported() {
    let mut doc = manifest();
    doc["description"] = json!(r#"<script>x</script><p style="color: red">y</p><![CDATA[z]]>"#);
    let result = validate_exhaustive(&doc);
    assert_eq!(
        messages(&result.errors),
        [
            "Markup tag '<script>' is not allowed.",
            "Attribute 'style' is not allowed on markup tag '<p>'.",
            "CDATA sections are not allowed in markup.",
        ]
    );
}

#[test]
fn custom_policy() {
    let mut doc = manifest();
    doc["description"] = json!("<em>emphasis</em>");
    assert_eq!(
        messages(&validate_exhaustive(&doc).errors),
        ["Markup tag '<em>' is not allowed."]
    );

    let config = ValidatorConfig {
        markup: MarkupPolicy::default().allow("em", &[]),
        ..ValidatorConfig::exhaustive()
    };
    assert!(Session::with_config(config).validate(&doc).is_valid());
}

#[test]
fn markup_in_label_is_an_error() {
    let mut doc = manifest();
    doc["label"] = json!("<b>Book 1</b>");
    assert_eq!(
        messages(&validate_exhaustive(&doc).errors),
        ["Markup is not allowed in 'label'."]
    );
}

#[test]
fn metadata_values_allow_markup_but_labels_do_not() {
    let mut doc = manifest();
    doc["metadata"] = json!([
        {"label": "Source", "value": "<a href=\"http://example.org\">link</a>"},
        {"label": "<i>Title</i>", "value": "plain"}
    ]);
    let result = validate_exhaustive(&doc);
    assert_eq!(messages(&result.errors), ["Markup is not allowed in 'label'."]);
    assert_eq!(paths(&result.errors), ["data['metadata'][1]['label']"]);
}

#[test]
fn language_tagged_value_is_checked() {
    let mut doc = manifest();
    doc["description"] = json!([
        {"@value": "<p>fine</p>", "@language": "en"},
        {"@value": "<p>pas fermé", "@language": "fr"}
    ]);
    let result = validate_exhaustive(&doc);
    assert_eq!(
        messages(&result.errors),
        ["Malformed markup: unclosed tag '<p>'"]
    );
    assert_eq!(paths(&result.errors), ["data['description'][1]['@value']"]);
}

#[test]
fn unterminated_tag_in_description() {
    for text in [r#"See <a href="http://example.org" here"#, "a <b bold"] {
        let mut doc = manifest();
        doc["description"] = json!(text);
        let result = validate_exhaustive(&doc);
        assert_eq!(
            messages(&result.errors),
            ["Malformed markup: unterminated tag"],
            "description {:?}",
            text
        );
        assert_eq!(paths(&result.errors), ["data['description']"]);
    }
}

#[test]
fn unterminated_tag_in_label_is_not_scanned() {
    let mut doc = manifest();
    doc["label"] = json!("a <b bold");
    assert!(validate_exhaustive(&doc).is_valid());
}
