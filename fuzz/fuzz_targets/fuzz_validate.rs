#![no_main]

use iiif_validator::{Session, ValidatorConfig};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let s = String::from_utf8_lossy(data);

    let mut session = Session::new();
    let result = session.validate_str(&s);
    if result.corrected_document.is_none() && result.errors.len() != 1 {
        panic!("undecodable input must yield exactly one error: {:?}", result.errors);
    }

    // Exhaustive mode walks every branch fail-fast would skip.
    let mut session = Session::with_config(ValidatorConfig::exhaustive());
    let first = session.validate_str(&s);
    let second = session.validate_str(&s);
    assert_eq!(first.errors, second.errors, "validation is not idempotent");
    assert_eq!(first.warnings, second.warnings, "validation is not idempotent");
});
