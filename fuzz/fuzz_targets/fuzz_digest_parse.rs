//! Fuzz target: `Digest` parsing.
//!
//! Parsing arbitrary text must never panic, and anything accepted must
//! render back to the same hex (lowercased).
#![no_main]

use embedguard_core::Digest;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };
    if let Ok(parsed) = text.parse::<Digest>() {
        assert_eq!(parsed.to_string(), text.to_ascii_lowercase());
    }
});
