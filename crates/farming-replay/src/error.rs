//! Error types for the replay harness.

use farming_types::PayloadError;

/// Errors that can occur while replaying a recording.
#[derive(Debug, thiserror::Error)]
pub enum ReplayError {
    /// Failed to read the recording.
    #[error("failed to read recording: {0}")]
    Io(#[from] std::io::Error),

    /// A line was not a valid recorded event.
    #[error("line {line}: invalid recorded event: {source}")]
    Line {
        /// 1-based line number.
        line: usize,
        /// The underlying JSON error.
        source: serde_json::Error,
    },

    /// An event was recorded without a payload its kind requires.
    #[error("line {line}: {kind} event is missing its `{field}` payload")]
    MissingPayload {
        /// 1-based line number.
        line: usize,
        /// The event kind.
        kind: &'static str,
        /// The missing field (`req` or `res`).
        field: &'static str,
    },

    /// A payload was present but did not decode.
    #[error("line {line}: {source}")]
    Payload {
        /// 1-based line number.
        line: usize,
        /// The underlying decode error.
        source: PayloadError,
    },
}
