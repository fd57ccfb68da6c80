/// Convenience result type used across Scrubline.
pub type ScrublineResult<T> = Result<T, ScrublineError>;

/// Top-level error taxonomy used by engine APIs.
///
/// Evaluation itself is infallible: every per-tick input is clamped at the
/// domain edges, so the only errors the engine can produce are configuration
/// defects caught by the one-time validation pass and serialization failures.
#[derive(thiserror::Error, Debug)]
pub enum ScrublineError {
    /// Invalid timeline configuration (gaps, overlaps, bad breakpoints, ...).
    #[error("validation error: {0}")]
    Validation(String),

    /// Errors when serializing or deserializing a timeline.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl ScrublineError {
    /// Build a [`ScrublineError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`ScrublineError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
