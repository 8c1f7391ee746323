//! CLI-specific error types and exit code mapping

use preflight_core::error::{ConfigError, PreflightError};

/// CLI-specific error type.
///
/// Each variant carries enough context for a user-friendly message.
/// The `exit_code()` method maps errors to process exit codes.
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    /// Configuration loading or validation failure.
    #[error("configuration error: {0}")]
    Config(String),

    /// A subcommand-specific operation failed.
    #[error("{0}")]
    Command(String),

    /// The scan completed but found error-severity results.
    #[error("scan found {0} error-severity result(s)")]
    CheckFailures(usize),

    /// JSON serialisation failed during output rendering.
    #[error("json output error: {0}")]
    JsonSerialize(#[from] serde_json::Error),

    /// IO error (file read, stdout write, etc.).
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Wrapped domain error from preflight-core.
    #[error("{0}")]
    Core(#[from] PreflightError),
}

impl CliError {
    /// Map the error to a process exit code.
    ///
    /// | Code | Meaning                                  |
    /// |------|------------------------------------------|
    /// | 0    | Success                                  |
    /// | 1    | Scan failures / general command error    |
    /// | 2    | Configuration error                      |
    /// | 10   | IO error                                 |
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Config(_) => 2,
            Self::Core(PreflightError::Config(_)) => 2,
            Self::Io(_) => 10,
            Self::CheckFailures(_) | Self::Command(_) | Self::JsonSerialize(_) | Self::Core(_) => 1,
        }
    }
}

impl From<ConfigError> for CliError {
    fn from(e: ConfigError) -> Self {
        Self::Core(PreflightError::Config(e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_code_config_error() {
        let err = CliError::Config("bad yaml".to_owned());
        assert_eq!(err.exit_code(), 2, "config error should return exit code 2");
    }

    #[test]
    fn test_exit_code_core_config_error() {
        let err: CliError = ConfigError::ParseFailed {
            reason: "bad".to_owned(),
        }
        .into();
        assert_eq!(
            err.exit_code(),
            2,
            "core config error should return exit code 2"
        );
    }

    #[test]
    fn test_exit_code_check_failures() {
        let err = CliError::CheckFailures(3);
        assert_eq!(err.exit_code(), 1);
        assert!(err.to_string().contains("3 error-severity"));
    }

    #[test]
    fn test_exit_code_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err = CliError::Io(io_err);
        assert_eq!(err.exit_code(), 10, "io error should return exit code 10");
    }

    #[test]
    fn test_exit_code_command_error() {
        let err = CliError::Command("boom".to_owned());
        assert_eq!(err.exit_code(), 1);
        assert_eq!(err.to_string(), "boom");
    }

    #[test]
    fn test_exit_code_non_config_core_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::Other, "x");
        let err = CliError::Core(PreflightError::Io(io_err));
        assert_eq!(err.exit_code(), 1);
    }
}
