#![forbid(unsafe_code)]

//! Harness error type.

use std::fmt;

/// Errors raised while loading configuration or reading and writing fixtures.
#[derive(Debug)]
pub enum HarnessError {
    /// I/O error reading or writing a file.
    Io(std::io::Error),
    /// TOML parse error.
    Toml(toml::de::Error),
    /// TOML serialization error.
    TomlSerialize(toml::ser::Error),
    /// JSON parse or serialization error.
    Json(serde_json::Error),
    /// Validation errors, one message per offending field.
    Validation(Vec<String>),
}

impl fmt::Display for HarnessError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(e) => write!(f, "I/O error: {e}"),
            Self::Toml(e) => write!(f, "TOML parse error: {e}"),
            Self::TomlSerialize(e) => write!(f, "TOML serialize error: {e}"),
            Self::Json(e) => write!(f, "JSON error: {e}"),
            Self::Validation(errors) => write!(f, "validation errors: {}", errors.join("; ")),
        }
    }
}

impl std::error::Error for HarnessError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            Self::Toml(e) => Some(e),
            Self::TomlSerialize(e) => Some(e),
            Self::Json(e) => Some(e),
            Self::Validation(_) => None,
        }
    }
}

impl From<std::io::Error> for HarnessError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<serde_json::Error> for HarnessError {
    fn from(e: serde_json::Error) -> Self {
        Self::Json(e)
    }
}
