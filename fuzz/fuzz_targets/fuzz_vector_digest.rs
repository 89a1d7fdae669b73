//! Fuzz target: vector digest over arbitrary bit patterns.
//!
//! Interprets the input as little-endian `f32` components (NaNs and
//! subnormals included) and checks that the canonical encoding reproduces
//! the input bytes exactly and that both digest entry points agree.
#![no_main]

use embedguard_core::{digest, digest_components, Vector};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let components: Vec<f32> = data
        .chunks_exact(4)
        .map(|c| f32::from_le_bytes([c[0], c[1], c[2], c[3]]))
        .collect();
    let vector = Vector::new(components.clone());

    let whole = data.len() - data.len() % 4;
    assert_eq!(vector.canonical_bytes(), &data[..whole], "encoding must be bit-exact");
    assert_eq!(digest(&vector), digest_components(&components));
    assert_eq!(digest(&vector).to_string().len(), 64);
});
