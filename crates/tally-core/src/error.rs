use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    #[error("Daily quota reached ({count}/{limit})")]
    QuotaExceeded { count: usize, limit: usize },
    #[error("Tenant not found: {0}")]
    TenantNotFound(String),
    #[error("Tenant already exists: {0}")]
    TenantExists(String),
    #[error("Invalid credentials")]
    InvalidCredentials,
    #[error("Password must be at least {min} characters")]
    PasswordTooShort { min: usize },
    #[error("Credential error: {0}")]
    Credential(String),
    #[error("Storage error: {0}")]
    Storage(String),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
