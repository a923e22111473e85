//! Input subsystem error types.

use keel_terminfo::TerminfoError;
use thiserror::Error;

/// Errors that can occur in the input subsystem.
#[derive(Debug, Error)]
pub enum InputError {
    /// Terminal setup failed even after falling back to the default
    /// terminal type. The shell cannot take keyboard input.
    #[error("could not set up terminal: {0}")]
    TerminalSetup(TerminfoError),

    /// A terminfo lookup failed.
    #[error(transparent)]
    Terminfo(#[from] TerminfoError),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// TOML error.
    #[error("TOML error: {0}")]
    Toml(String),

    /// A bindings file entry is malformed.
    #[error("invalid binding: {0}")]
    Config(String),
}

impl From<toml::de::Error> for InputError {
    fn from(e: toml::de::Error) -> Self {
        Self::Toml(e.to_string())
    }
}

/// Result type for input operations.
pub type InputResult<T> = Result<T, InputError>;
