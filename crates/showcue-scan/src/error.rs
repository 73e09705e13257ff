//! Error types for the trigger scanner.

/// Errors from building the trigger pattern set.
#[derive(Debug, thiserror::Error)]
pub enum ScanError {
    #[error("Invalid trigger pattern: {0}")]
    Pattern(String),
}

impl From<regex::Error> for ScanError {
    fn from(err: regex::Error) -> Self {
        ScanError::Pattern(err.to_string())
    }
}
