#![no_main]

use iiif_validator::MarkupPolicy;
use iiif_validator::markup::scan;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let s = String::from_utf8_lossy(data);
    let _ = scan(&s, &MarkupPolicy::default());
});
