use std::result::Result as StdResult;

use thiserror::Error;

/// Unified error type for storage, configuration, and wizard plumbing.
///
/// Field validation failures are not represented here: they are ordinary
/// values returned by [`crate::wizard::validation::validate`].
#[derive(Error, Debug)]
pub enum WizardError {
    #[error("Persistence error: {0}")]
    StorageError(String),
    #[error("Configuration error: {0}")]
    ConfigError(String),
    #[error("Invalid profile picture: {0}")]
    InvalidPicture(String),
    #[error("Unknown step: {0}")]
    InvalidStep(u8),
}

pub type Result<T> = StdResult<T, WizardError>;

/// User-facing error wrapper for the terminal front-end.
#[derive(Error, Debug)]
pub enum CliError {
    #[error(transparent)]
    Core(#[from] WizardError),
    #[error("Prompt failed: {0}")]
    Prompt(String),
}

impl From<dialoguer::Error> for CliError {
    fn from(err: dialoguer::Error) -> Self {
        CliError::Prompt(err.to_string())
    }
}

impl From<std::io::Error> for WizardError {
    fn from(err: std::io::Error) -> Self {
        WizardError::StorageError(err.to_string())
    }
}

impl From<serde_json::Error> for WizardError {
    fn from(err: serde_json::Error) -> Self {
        WizardError::StorageError(err.to_string())
    }
}
