use chrono::{DateTime, SubsecRound, Utc};
use serde::{Deserialize, Serialize};

/// Timestamp layout used in the persisted log (UTC, second precision).
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Durable evidence of one detected integrity violation.
///
/// Records are immutable once written; the log only ever grows.
///
/// ```json
/// {
///   "timestamp": "2025-01-01 12:00:00",
///   "embedding_file": "embeddings/tampered_embeddings_1735732800.json",
///   "violated_tokens": ["python"]
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[non_exhaustive]
pub struct AuditRecord {
    /// When the violation was recorded, truncated to whole seconds.
    #[serde(with = "timestamp")]
    pub timestamp: DateTime<Utc>,
    /// Identifier of the checked artifact, usually its path.
    #[serde(rename = "embedding_file", alias = "artifact")]
    pub artifact: String,
    /// Names of the tokens whose entries failed verification.
    pub violated_tokens: Vec<String>,
}

impl AuditRecord {
    /// Create a record. Sub-second precision is dropped from `timestamp`.
    #[must_use]
    pub fn new(
        timestamp: DateTime<Utc>,
        artifact: impl Into<String>,
        violated_tokens: Vec<String>,
    ) -> Self {
        Self { timestamp: timestamp.trunc_subsecs(0), artifact: artifact.into(), violated_tokens }
    }
}

mod timestamp {
    use chrono::{DateTime, NaiveDateTime, Utc};
    use serde::{de, Deserialize, Deserializer, Serializer};

    use super::TIMESTAMP_FORMAT;

    pub(super) fn serialize<S: Serializer>(ts: &DateTime<Utc>, s: S) -> Result<S::Ok, S::Error> {
        s.collect_str(&ts.format(TIMESTAMP_FORMAT))
    }

    pub(super) fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<DateTime<Utc>, D::Error> {
        let raw = String::deserialize(d)?;
        NaiveDateTime::parse_from_str(&raw, TIMESTAMP_FORMAT)
            .map(|naive| naive.and_utc())
            .map_err(de::Error::custom)
    }
}
