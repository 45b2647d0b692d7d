use std::io;

use assessment_config::ConfigError;
use assessment_core::CoreError;
use thiserror::Error;

/// Unified error type for the form engine, configuration and local files.
#[derive(Error, Debug)]
pub enum AppError {
    #[error(transparent)]
    Form(#[from] CoreError),
    #[error("Configuration error: {0}")]
    Config(String),
    #[error("File error: {0}")]
    Storage(String),
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

/// User-facing CLI error wrapper.
#[derive(Error, Debug)]
pub enum CliError {
    #[error(transparent)]
    App(#[from] AppError),
    #[error("Command failed: {0}")]
    Command(String),
}

impl From<io::Error> for AppError {
    fn from(err: io::Error) -> Self {
        AppError::Storage(err.to_string())
    }
}

impl From<ConfigError> for AppError {
    fn from(err: ConfigError) -> Self {
        match err {
            ConfigError::Io(io) => AppError::Storage(io.to_string()),
            ConfigError::Serde(message) => AppError::Config(message),
            invalid @ (ConfigError::UnknownKey(_) | ConfigError::InvalidValue { .. }) => {
                AppError::InvalidInput(invalid.to_string())
            }
        }
    }
}

impl From<ConfigError> for CliError {
    fn from(err: ConfigError) -> Self {
        CliError::from(AppError::from(err))
    }
}

impl From<io::Error> for CliError {
    fn from(err: io::Error) -> Self {
        CliError::Command(err.to_string())
    }
}

impl From<rustyline::error::ReadlineError> for CliError {
    fn from(err: rustyline::error::ReadlineError) -> Self {
        CliError::Command(err.to_string())
    }
}
