//! Error types for the CLI application.
//!
//! Only failures that end a command live here. Commands the engine rejects
//! during a `play` session are printed and the session carries on.

use std::fmt;

/// Errors a command handler can end with. `run` turns them into exit codes.
#[derive(Debug)]
pub enum CliError {
    /// I/O error (history file, stdin, stdout/stderr writes)
    Io(std::io::Error),

    /// Configuration error
    Config(String),
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::Io(e) => write!(f, "I/O error: {}", e),
            CliError::Config(msg) => write!(f, "Configuration error: {}", msg),
        }
    }
}

impl std::error::Error for CliError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CliError::Io(e) => Some(e),
            CliError::Config(_) => None,
        }
    }
}

impl From<std::io::Error> for CliError {
    fn from(error: std::io::Error) -> Self {
        CliError::Io(error)
    }
}

impl From<crate::config::ConfigError> for CliError {
    fn from(error: crate::config::ConfigError) -> Self {
        CliError::Config(error.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ConfigError;

    #[test]
    fn config_errors_keep_their_message() {
        let e: CliError = ConfigError::Invalid("Invalid seed: x".into()).into();
        assert!(matches!(e, CliError::Config(_)));
        assert_eq!(e.to_string(), "Configuration error: Invalid seed: x");
    }

    #[test]
    fn io_errors_expose_source() {
        use std::error::Error;
        let e: CliError = std::io::Error::other("boom").into();
        assert!(e.source().is_some());
        assert!(CliError::Config("x".into()).source().is_none());
    }
}
