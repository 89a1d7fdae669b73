//! Fuzz target: audit log deserialization.
//!
//! Arbitrary bytes must never panic the parser, and every accepted log
//! must serialize and parse back to the same records.
#![no_main]

use embedguard_auditor::AuditRecord;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(records) = serde_json::from_slice::<Vec<AuditRecord>>(data) else {
        return;
    };
    let json = serde_json::to_vec(&records).expect("AuditRecord serialization must not fail");
    let back: Vec<AuditRecord> =
        serde_json::from_slice(&json).expect("serialized log must parse");
    assert_eq!(back, records);
});
