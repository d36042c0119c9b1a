use std::result::Result as StdResult;

use tally_config::ConfigError;
use tally_core::{catalog::catalog, CoreError};
use tally_domain::Locale;
use thiserror::Error;

/// Unified error type for the core, storage and configuration layers.
#[derive(Error, Debug)]
pub enum TallyError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    #[error("Daily quota reached ({count}/{limit})")]
    QuotaExceeded { count: usize, limit: usize },
    #[error("Invalid credentials")]
    InvalidCredentials,
    #[error("Password must be at least {min} characters")]
    PasswordTooShort { min: usize },
    #[error("Tenant not found: {0}")]
    TenantNotFound(String),
    #[error("Tenant already exists: {0}")]
    TenantExists(String),
    #[error("Persistence error: {0}")]
    StorageError(String),
    #[error("Configuration error: {0}")]
    ConfigError(String),
}

pub type Result<T> = StdResult<T, TallyError>;

/// Failures that end the shell itself rather than a single command.
#[derive(Error, Debug)]
pub enum CliError {
    #[error(transparent)]
    Core(#[from] TallyError),
    #[error("Invalid input: {0}")]
    Input(String),
    #[error("Command failed: {0}")]
    Command(String),
}

impl From<std::io::Error> for CliError {
    fn from(err: std::io::Error) -> Self {
        CliError::Core(err.into())
    }
}

impl From<ConfigError> for CliError {
    fn from(err: ConfigError) -> Self {
        CliError::Core(err.into())
    }
}

impl From<rustyline::error::ReadlineError> for CliError {
    fn from(err: rustyline::error::ReadlineError) -> Self {
        CliError::Command(err.to_string())
    }
}

impl TallyError {
    /// Message suitable for showing to a tenant in their language.
    pub fn localized(&self, locale: Locale) -> String {
        let messages = catalog(locale);
        match self {
            TallyError::InvalidInput(_) => messages.invalid_income.to_string(),
            TallyError::QuotaExceeded { limit, .. } => messages.quota_reached(*limit),
            TallyError::InvalidCredentials | TallyError::TenantNotFound(_) => {
                messages.invalid_credentials.to_string()
            }
            TallyError::PasswordTooShort { .. } => messages.password_too_short.to_string(),
            TallyError::StorageError(_) => messages.storage_unavailable.to_string(),
            TallyError::TenantExists(id) => messages.tenant_exists(id),
            TallyError::ConfigError(_) => messages.config_error.to_string(),
        }
    }
}

impl From<std::io::Error> for TallyError {
    fn from(err: std::io::Error) -> Self {
        TallyError::StorageError(err.to_string())
    }
}

impl From<CoreError> for TallyError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::InvalidInput(message) => TallyError::InvalidInput(message),
            CoreError::QuotaExceeded { count, limit } => TallyError::QuotaExceeded { count, limit },
            CoreError::InvalidCredentials => TallyError::InvalidCredentials,
            CoreError::PasswordTooShort { min } => TallyError::PasswordTooShort { min },
            CoreError::TenantNotFound(id) => TallyError::TenantNotFound(id),
            CoreError::TenantExists(id) => TallyError::TenantExists(id),
            CoreError::Credential(message) | CoreError::Storage(message) => {
                TallyError::StorageError(message)
            }
            CoreError::Io(err) => TallyError::StorageError(err.to_string()),
        }
    }
}

impl From<ConfigError> for TallyError {
    fn from(err: ConfigError) -> Self {
        match err {
            ConfigError::Io(io) => TallyError::StorageError(io.to_string()),
            ConfigError::Serde(message) => TallyError::ConfigError(message),
        }
    }
}
