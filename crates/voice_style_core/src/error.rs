//! crates/voice_style_core/src/error.rs
//!
//! Error types raised by the analysis engine and the directive compiler.
//! Every error is returned synchronously from the offending call; nothing is
//! retried, since identical input can never produce a different outcome.

/// A specific input constraint that a caller violated.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("user name must not be empty")]
    EmptyUserName,
    #[error("user name is {length} characters long, the maximum is {max}")]
    UserNameTooLong { length: usize, max: usize },
    #[error("{found} samples were provided, at least {min} are required")]
    TooFewSamples { found: usize, min: usize },
    #[error("{found} samples were provided, at most {max} are allowed")]
    TooManySamples { found: usize, max: usize },
    #[error("sample {index} is {length} characters long, the minimum is {min}")]
    SampleTooShort { index: usize, length: usize, min: usize },
    #[error("sample {index} is {length} characters long, the maximum is {max}")]
    SampleTooLong { index: usize, length: usize, max: usize },
    #[error("draft is {length} characters long, the minimum is {min}")]
    DraftTooShort { length: usize, min: usize },
    #[error("draft is {length} characters long, the maximum is {max}")]
    DraftTooLong { length: usize, max: usize },
}

/// The error type for all engine operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AnalysisError {
    /// The caller's input broke a documented constraint.
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Segmentation produced nothing to measure.
    #[error("Insufficient data: {0}")]
    InsufficientData(String),
}

/// A convenience type alias for `Result<T, AnalysisError>`.
pub type AnalysisResult<T> = Result<T, AnalysisError>;
