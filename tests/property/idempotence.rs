use iiif_validator::validators::PRESENTATION_CONTEXT;
use iiif_validator::{Session, ValidatorConfig};
use proptest::prelude::*;
use serde_json::{Value, json};

/// Any JSON scalar, so field rules see well- and ill-typed values alike.
fn arb_scalar() -> impl Strategy<Value = Value> {
    prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::from),
        any::<i64>().prop_map(Value::from),
        "[a-z:/. <>]{0,12}".prop_map(Value::from),
        Just(json!("http://example.org/x")),
    ]
}

fn arb_canvas() -> impl Strategy<Value = Value> {
    (arb_scalar(), arb_scalar(), arb_scalar(), prop::option::of(arb_scalar())).prop_map(
        |(label, height, width, extra)| {
            let mut canvas = json!({
                "@id": "http://example.org/canvas/1",
                "@type": "sc:Canvas",
                "label": label,
                "height": height,
                "width": width
            });
            if let Some(extra) = extra {
                canvas["extra"] = extra;
            }
            canvas
        },
    )
}

fn arb_config() -> impl Strategy<Value = ValidatorConfig> {
    (any::<bool>(), any::<bool>(), any::<bool>()).prop_map(|(fail_fast, unique_logging, debug)| {
        ValidatorConfig {
            fail_fast,
            unique_logging,
            debug,
            ..ValidatorConfig::default()
        }
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(128))]

    // Validating the same input twice on one session gives identical results.
    #[test]
    fn validate_is_idempotent(
        config in arb_config(),
        label in arb_scalar(),
        canvases in prop::collection::vec(arb_canvas(), 0..4),
    ) {
        let doc = json!({
            "@context": PRESENTATION_CONTEXT,
            "@id": "http://example.org/manifest",
            "@type": "sc:Manifest",
            "label": label,
            "sequences": [{"@type": "sc:Sequence", "canvases": canvases}]
        });
        let mut session = Session::with_config(config);
        let first = session.validate(&doc);
        let second = session.validate(&doc);
        prop_assert_eq!(first.errors, second.errors);
        prop_assert_eq!(first.warnings, second.warnings);
        prop_assert_eq!(first.corrected_document, second.corrected_document);
    }

    // Arbitrary text never panics, and always yields a result.
    #[test]
    fn arbitrary_text_never_panics(text in "\\PC{0,64}") {
        let result = Session::new().validate_str(&text);
        prop_assert!(result.corrected_document.is_some() || result.errors.len() == 1);
    }
}
