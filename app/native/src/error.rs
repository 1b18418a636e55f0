//! Error types for Concertina.
//!
//! Each concern has its own error enum (`ConfigError`, `TilingError`,
//! `KeymapError`); [`ConcertinaError`] is what the CLI surfaces.

use serde::Serialize;
use thiserror::Error;

use crate::config::ConfigError;
use crate::hotkey::KeymapError;
use crate::tiling::TilingError;

/// Errors that can occur while running a command.
///
/// Serializes as `{"kind": ..., "message": ...}` for JSON output.
#[derive(Debug, Error, Serialize)]
#[serde(tag = "kind", content = "message")]
pub enum ConcertinaError {
    /// Invalid command arguments.
    #[error("{0}")]
    InvalidArguments(String),
    /// Configuration error.
    #[error("Configuration error: {0}")]
    ConfigError(String),
    /// Leader key bindings could not be compiled.
    #[error("Keymap error: {0}")]
    KeymapError(String),
    /// Tiling operation failed.
    #[error("Tiling error: {0}")]
    TilingError(String),
    /// IO error.
    #[error("IO error: {0}")]
    IoError(String),
    /// Generic command error.
    #[error("{0}")]
    CommandError(String),
}

impl From<std::io::Error> for ConcertinaError {
    fn from(err: std::io::Error) -> Self { Self::IoError(err.to_string()) }
}

impl From<serde_json::Error> for ConcertinaError {
    fn from(err: serde_json::Error) -> Self { Self::CommandError(err.to_string()) }
}

impl From<ConfigError> for ConcertinaError {
    fn from(err: ConfigError) -> Self { Self::ConfigError(err.to_string()) }
}

impl From<KeymapError> for ConcertinaError {
    fn from(err: KeymapError) -> Self { Self::KeymapError(err.to_string()) }
}

impl From<TilingError> for ConcertinaError {
    fn from(err: TilingError) -> Self { Self::TilingError(err.to_string()) }
}

impl From<String> for ConcertinaError {
    fn from(msg: String) -> Self { Self::CommandError(msg) }
}

impl From<&str> for ConcertinaError {
    fn from(msg: &str) -> Self { Self::CommandError(msg.to_string()) }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_arguments_display() {
        let err = ConcertinaError::InvalidArguments("window count must be positive".to_string());
        assert_eq!(err.to_string(), "window count must be positive");
    }

    #[test]
    fn test_config_error_conversion() {
        let err: ConcertinaError = ConfigError::NotFound.into();
        let msg = err.to_string();
        assert!(msg.starts_with("Configuration error"));
    }

    #[test]
    fn test_keymap_error_conversion() {
        let err: ConcertinaError = KeymapError::UnknownKey("hyper".to_string()).into();
        assert!(matches!(err, ConcertinaError::KeymapError(_)));
        assert!(err.to_string().contains("hyper"));
    }

    #[test]
    fn test_tiling_error_conversion() {
        let err: ConcertinaError = TilingError::NoMonitorsDetected.into();
        assert_eq!(err.to_string(), "Tiling error: no monitors detected");
    }

    #[test]
    fn test_io_error_from_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "permission denied");
        let err: ConcertinaError = io_err.into();
        assert!(matches!(err, ConcertinaError::IoError(_)));
        assert!(err.to_string().contains("permission denied"));
    }

    #[test]
    fn test_string_conversions() {
        let from_string: ConcertinaError = String::from("boom").into();
        let from_str: ConcertinaError = "boom".into();
        assert_eq!(from_string.to_string(), "boom");
        assert_eq!(from_str.to_string(), "boom");
    }

    #[test]
    fn test_serializes_with_kind_and_message() {
        let err = ConcertinaError::TilingError("no monitors detected".to_string());
        let json = serde_json::to_value(&err).unwrap();
        assert_eq!(json["kind"], "TilingError");
        assert_eq!(json["message"], "no monitors detected");
    }
}
