use std::path::PathBuf;
use thiserror::Error;

/// Errors that abort a whole run.
///
/// Everything that only affects one input file or one declaration is reported
/// as a [`crate::diagnostic::Diagnostic`] instead and never surfaces here.
#[derive(Error, Debug)]
pub enum EnumgenError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Configuration file not found: {path}")]
    ConfigNotFound { path: PathBuf },

    #[error("Invalid root directory {path}: {reason}")]
    InvalidRoot { path: PathBuf, reason: String },

    #[error("Environment variable not set: {0}")]
    EnvVarNotSet(String),

    #[error("Refusing to overwrite existing file: {path}")]
    AlreadyExists { path: PathBuf },
}

pub type Result<T> = std::result::Result<T, EnumgenError>;

impl EnumgenError {
    pub fn config(message: impl Into<String>) -> Self {
        EnumgenError::Config(message.into())
    }

    pub fn invalid_root(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        EnumgenError::InvalidRoot {
            path: path.into(),
            reason: reason.into(),
        }
    }
}
