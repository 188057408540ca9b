// Typed errors with thiserror. Surface meaningful messages to JS.

use thiserror::Error;

/// Engine error types.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EngineError {
    /// No snapshot is available yet (empty store or nothing resolved).
    #[error("No position data available yet")]
    NotReady,

    #[error("Invalid playback time: {0}")]
    InvalidTime(f64),

    #[error("Invalid sample store: {0}")]
    InvalidStore(String),

    #[error("Invalid surface: {0}")]
    InvalidSurface(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl From<serde_json::Error> for EngineError {
    fn from(err: serde_json::Error) -> Self {
        EngineError::Serialization(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display() {
        let err = EngineError::InvalidStore("timestamps out of order".to_string());
        assert!(err.to_string().contains("timestamps out of order"));
    }

    #[test]
    fn serde_error_converts() {
        let err: EngineError = serde_json::from_str::<u32>("nope").unwrap_err().into();
        assert!(matches!(err, EngineError::Serialization(_)));
    }
}
