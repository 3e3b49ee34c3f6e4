//! Error types shared across the application.

use std::fmt::{Display, Formatter};

/// Shared application result type.
pub type Result<T> = std::result::Result<T, AppError>;

/// Application error enumeration covering all domain failure modes.
#[derive(Debug)]
pub enum AppError {
    /// Configuration parsing or validation failure.
    Config(String),
    /// Bridge transport failure: connect, transmit, or decode.
    ///
    /// Covers connection refused, host unreachable, malformed responses,
    /// and JSON decode failures. The client boundary collapses all of
    /// these into one printed diagnostic.
    Bridge(String),
    /// Subprocess spawn or wait failure.
    Exec(String),
    /// File-system or I/O operation failure.
    Io(String),
}

impl Display for AppError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Config(msg) => write!(f, "config: {msg}"),
            Self::Bridge(msg) => write!(f, "bridge: {msg}"),
            Self::Exec(msg) => write!(f, "exec: {msg}"),
            Self::Io(msg) => write!(f, "io: {msg}"),
        }
    }
}

impl std::error::Error for AppError {}

impl From<toml::de::Error> for AppError {
    fn from(err: toml::de::Error) -> Self {
        Self::Config(format!("invalid config: {err}"))
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        Self::Bridge(format!("invalid json: {err}"))
    }
}
