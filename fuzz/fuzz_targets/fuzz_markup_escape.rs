#![forbid(unsafe_code)]
#![no_main]

use libfuzzer_sys::fuzz_target;
use tdom_harness::markup::{escape_attr, escape_text};

fuzz_target!(|data: &str| {
    let text = escape_text(data);
    assert!(!text.contains('<') && !text.contains('>'), "raw angle bracket in text");

    let attr = escape_attr(data);
    assert!(!attr.contains('"') && !attr.contains('\''), "raw quote in attribute");

    // Every ampersand starts an entity.
    for (i, _) in attr.match_indices('&') {
        let rest = &attr[i..];
        assert!(
            ["&amp;", "&lt;", "&gt;", "&quot;", "&#39;"]
                .iter()
                .any(|e| rest.starts_with(e)),
            "bare ampersand"
        );
    }

    // Escaping only grows the input.
    assert!(text.len() >= data.len());
    assert!(attr.len() >= text.len());
});
