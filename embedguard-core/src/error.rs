/// Errors produced by the `embedguard-core` crate.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum CoreError {
    /// A digest string could not be parsed.
    #[error("invalid digest '{input}': {reason}")]
    InvalidDigest { input: String, reason: String },
}
