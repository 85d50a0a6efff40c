//! Error types for boxbreath.

use thiserror::Error;

/// Errors surfaced by boxbreath commands.
///
/// The session driver itself never fails once a session is running; these
/// errors come from configuration, the terminal, and the audio backend.
#[derive(Debug, Error)]
pub enum BreathError {
    /// Configuration file could not be read, written, or located.
    #[error("Configuration error: {0}")]
    Config(String),

    /// A session configuration that cannot drive a breathing cycle.
    #[error("Invalid session configuration: {0}")]
    InvalidConfig(String),

    /// User input could not be parsed.
    #[error("Parse error: {0}")]
    Parse(String),

    /// Audio output could not be opened or a track failed to load.
    #[error("Audio error: {0}")]
    Audio(String),

    /// Terminal setup, drawing, or input failed.
    #[error("Terminal error: {0}")]
    Terminal(String),

    /// Underlying I/O failure.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<serde_json::Error> for BreathError {
    fn from(e: serde_json::Error) -> Self {
        Self::Parse(format!("JSON error: {e}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = BreathError::InvalidConfig("pace must be at least 1 second".to_string());
        assert_eq!(
            err.to_string(),
            "Invalid session configuration: pace must be at least 1 second"
        );
    }

    #[test]
    fn test_io_error_conversion() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let err: BreathError = io.into();
        assert!(matches!(err, BreathError::Io(_)));
    }
}
