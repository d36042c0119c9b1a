//! Password hashing and tenant authentication.

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use tally_domain::{Tenant, Tier};

use crate::{storage::TenantDirectory, CoreError};

/// Shortest password accepted when registering or rotating credentials.
pub const MIN_PASSWORD_LEN: usize = 4;

/// Hash a password using Argon2id, returning the PHC string.
pub fn hash_password(password: &str) -> Result<String, CoreError> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|err| CoreError::Credential(format!("failed to hash password: {err}")))
}

/// Verify a password against a stored PHC hash.
pub fn verify_password(password: &str, hash: &str) -> Result<bool, CoreError> {
    let parsed = PasswordHash::new(hash)
        .map_err(|err| CoreError::Credential(format!("invalid password hash format: {err}")))?;
    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok())
}

pub struct CredentialService;

impl CredentialService {
    /// Resolves a tenant when `password` matches its stored hash.
    ///
    /// Unknown ids and wrong passwords are indistinguishable to the caller.
    pub fn authenticate(
        directory: &dyn TenantDirectory,
        id: &str,
        password: &str,
    ) -> Result<Tenant, CoreError> {
        let id = id.trim();
        let Some(tenant) = directory.lookup(id)? else {
            return Err(CoreError::InvalidCredentials);
        };
        if verify_password(password.trim(), &tenant.password_hash)? {
            Ok(tenant)
        } else {
            Err(CoreError::InvalidCredentials)
        }
    }

    /// Rotates a tenant's password after checking the current one.
    pub fn change_password(
        directory: &dyn TenantDirectory,
        id: &str,
        old_password: &str,
        new_password: &str,
    ) -> Result<(), CoreError> {
        let tenant = directory
            .lookup(id)?
            .ok_or_else(|| CoreError::TenantNotFound(id.to_string()))?;
        if !verify_password(old_password.trim(), &tenant.password_hash)? {
            return Err(CoreError::InvalidCredentials);
        }
        let new_password = validate_password(new_password)?;
        directory.set_password_hash(&tenant.id, hash_password(new_password)?)
    }

    /// Adds a tenant whose ledger shares its id.
    pub fn register(
        directory: &dyn TenantDirectory,
        id: &str,
        password: &str,
        tier: Tier,
    ) -> Result<Tenant, CoreError> {
        let id = id.trim();
        if id.is_empty() {
            return Err(CoreError::InvalidInput("tenant id must not be empty".into()));
        }
        let password = validate_password(password)?;
        let tenant = Tenant::new(id, hash_password(password)?, tier);
        directory.insert(tenant.clone())?;
        Ok(tenant)
    }
}

fn validate_password(password: &str) -> Result<&str, CoreError> {
    let trimmed = password.trim();
    if trimmed.chars().count() < MIN_PASSWORD_LEN {
        return Err(CoreError::PasswordTooShort {
            min: MIN_PASSWORD_LEN,
        });
    }
    Ok(trimmed)
}
