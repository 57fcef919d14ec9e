//! Error types for the LDA pipeline

use thiserror::Error;

/// Errors that can occur while configuring, fitting, or querying a model.
///
/// There is no retry policy: fitting is deterministic computation with no
/// transient failure modes, so every variant reports a programming or
/// configuration mistake exactly once.
#[derive(Error, Debug)]
pub enum LdaError {
    /// Rejected hyperparameters or iteration bounds, detected before any
    /// sampling iteration runs.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// Malformed input documents, detected during vectorization. No partial
    /// model is produced.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// An out-of-bounds document or topic index passed to a result accessor.
    #[error("{kind} index {index} is out of range (count: {count})")]
    IndexOutOfRange {
        /// Which dimension was indexed ("document" or "topic").
        kind: &'static str,
        /// The offending index.
        index: usize,
        /// The valid count for that dimension.
        count: usize,
    },
}
