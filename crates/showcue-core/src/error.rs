use thiserror::Error;

/// Top-level error type for showcue.
///
/// Subsystem crates define their own error types; this one covers the
/// configuration layer shared by every crate and the binary.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ShowcueError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Unknown setting: {0}")]
    UnknownSetting(String),

    #[error("Invalid value for {key}: {reason}")]
    InvalidSetting { key: String, reason: String },
}

impl From<toml::de::Error> for ShowcueError {
    fn from(err: toml::de::Error) -> Self {
        ShowcueError::Config(err.to_string())
    }
}

impl From<toml::ser::Error> for ShowcueError {
    fn from(err: toml::ser::Error) -> Self {
        ShowcueError::Config(err.to_string())
    }
}

impl From<serde_json::Error> for ShowcueError {
    fn from(err: serde_json::Error) -> Self {
        ShowcueError::Serialization(err.to_string())
    }
}

/// A specialized `Result` type for showcue operations.
pub type Result<T> = std::result::Result<T, ShowcueError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ShowcueError::Config("missing field".to_string());
        assert_eq!(err.to_string(), "Configuration error: missing field");
    }

    #[test]
    fn test_setting_errors_display() {
        let err = ShowcueError::UnknownSetting("remote.colour".to_string());
        assert_eq!(err.to_string(), "Unknown setting: remote.colour");

        let err = ShowcueError::InvalidSetting {
            key: "remote.timeout_secs".to_string(),
            reason: "expected an integer".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Invalid value for remote.timeout_secs: expected an integer"
        );
    }

    #[test]
    fn test_io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: ShowcueError = io_err.into();
        assert!(matches!(err, ShowcueError::Io(_)));
        assert!(err.to_string().contains("file not found"));
    }

    #[test]
    fn test_error_from_toml_de() {
        let err: std::result::Result<toml::Value, _> = toml::from_str("invalid = [[[");
        let showcue_err: ShowcueError = err.unwrap_err().into();
        assert!(matches!(showcue_err, ShowcueError::Config(_)));
    }

    #[test]
    fn test_error_from_serde_json() {
        let err: std::result::Result<serde_json::Value, _> = serde_json::from_str("{ nope }");
        let showcue_err: ShowcueError = err.unwrap_err().into();
        assert!(matches!(showcue_err, ShowcueError::Serialization(_)));
    }

    #[test]
    fn test_result_type_with_question_mark() {
        fn inner() -> Result<String> {
            let io_result: std::result::Result<i32, std::io::Error> = Ok(42);
            let value = io_result?;
            Ok(value.to_string())
        }

        assert_eq!(inner().unwrap(), "42");
    }
}
