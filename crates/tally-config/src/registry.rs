//! File-backed tenant directory.
//!
//! The registry is read once when the directory is opened and kept in memory;
//! every mutation is written straight back to disk before it is acknowledged.

use std::{
    path::{Path, PathBuf},
    sync::RwLock,
};

use tally_core::{storage::TenantDirectory, CoreError};
use tally_domain::Tenant;

use crate::{
    manager::{load_registry, save_registry},
    ConfigError, TenantRecord, TenantRegistry,
};

#[derive(Debug)]
pub struct JsonTenantDirectory {
    path: PathBuf,
    registry: RwLock<TenantRegistry>,
}

impl JsonTenantDirectory {
    pub fn open(path: PathBuf) -> Result<Self, ConfigError> {
        let registry = load_registry(&path)?;
        tracing::debug!(
            path = %path.display(),
            tenants = registry.tenants.len(),
            "loaded tenant registry"
        );
        Ok(Self {
            path,
            registry: RwLock::new(registry),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Applies `change` to a copy of the registry, persists it, then publishes it.
    fn write_through(
        &self,
        change: impl FnOnce(&mut TenantRegistry) -> Result<(), CoreError>,
    ) -> Result<(), CoreError> {
        let mut guard = self.registry.write().map_err(|_| poisoned())?;
        let mut next = guard.clone();
        change(&mut next)?;
        save_registry(&self.path, &next).map_err(into_core)?;
        *guard = next;
        Ok(())
    }
}

impl TenantDirectory for JsonTenantDirectory {
    fn lookup(&self, id: &str) -> Result<Option<Tenant>, CoreError> {
        let guard = self.registry.read().map_err(|_| poisoned())?;
        Ok(guard.get(id))
    }

    fn tenant_ids(&self) -> Result<Vec<String>, CoreError> {
        let guard = self.registry.read().map_err(|_| poisoned())?;
        Ok(guard.ids())
    }

    fn insert(&self, tenant: Tenant) -> Result<(), CoreError> {
        self.write_through(|registry| {
            if registry.tenants.contains_key(&tenant.id) {
                return Err(CoreError::TenantExists(tenant.id.clone()));
            }
            let id = tenant.id.clone();
            registry.tenants.insert(id, TenantRecord::from(tenant));
            Ok(())
        })
    }

    fn set_password_hash(&self, id: &str, password_hash: String) -> Result<(), CoreError> {
        self.write_through(|registry| {
            let record = registry
                .tenants
                .get_mut(id)
                .ok_or_else(|| CoreError::TenantNotFound(id.to_string()))?;
            record.password_hash = password_hash;
            Ok(())
        })
    }
}

fn poisoned() -> CoreError {
    CoreError::Storage("tenant registry lock poisoned".into())
}

fn into_core(err: ConfigError) -> CoreError {
    match err {
        ConfigError::Io(io) => CoreError::Io(io),
        ConfigError::Serde(message) => CoreError::Storage(message),
    }
}
