use std::{
    collections::{BTreeMap, HashMap},
    sync::{Mutex, RwLock},
};

use tally_domain::{Entry, Tenant};

use crate::CoreError;

/// Append-only persistence for tenant ledgers.
///
/// Implementations do not serialize a read followed by an append; callers that
/// gate appends on what they read must hold their own per-ledger lock.
pub trait LedgerStorage: Send + Sync {
    /// Creates an empty ledger when none exists. Never truncates an existing one.
    fn ensure(&self, ledger: &str) -> Result<(), CoreError>;

    /// Returns every well-formed entry in storage order. Malformed rows are skipped.
    fn read_all(&self, ledger: &str) -> Result<Vec<Entry>, CoreError>;

    /// Appends one entry to the end of the ledger.
    fn append(&self, ledger: &str, entry: &Entry) -> Result<(), CoreError>;

    /// Key under which `ledger` is physically stored. Names with equal keys share one ledger.
    fn storage_key(&self, ledger: &str) -> String {
        ledger.to_string()
    }
}

/// Keyed lookup of tenant accounts.
pub trait TenantDirectory: Send + Sync {
    fn lookup(&self, id: &str) -> Result<Option<Tenant>, CoreError>;
    fn tenant_ids(&self) -> Result<Vec<String>, CoreError>;
    /// Adds a tenant, failing if the id is taken.
    fn insert(&self, tenant: Tenant) -> Result<(), CoreError>;
    /// Replaces the stored password hash of an existing tenant.
    fn set_password_hash(&self, id: &str, password_hash: String) -> Result<(), CoreError>;
}

/// Volatile ledger storage, used by tests and benchmarks.
#[derive(Debug, Default)]
pub struct MemoryLedgerStorage {
    ledgers: Mutex<HashMap<String, Vec<Entry>>>,
}

impl MemoryLedgerStorage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_entries(ledger: &str, entries: Vec<Entry>) -> Self {
        let storage = Self::default();
        if let Ok(mut guard) = storage.ledgers.lock() {
            guard.insert(ledger.to_string(), entries);
        }
        storage
    }

    fn with_ledgers<T>(
        &self,
        f: impl FnOnce(&mut HashMap<String, Vec<Entry>>) -> T,
    ) -> Result<T, CoreError> {
        let mut guard = self
            .ledgers
            .lock()
            .map_err(|_| CoreError::Storage("ledger store lock poisoned".into()))?;
        Ok(f(&mut guard))
    }
}

impl LedgerStorage for MemoryLedgerStorage {
    fn ensure(&self, ledger: &str) -> Result<(), CoreError> {
        self.with_ledgers(|ledgers| {
            ledgers.entry(ledger.to_string()).or_default();
        })
    }

    fn read_all(&self, ledger: &str) -> Result<Vec<Entry>, CoreError> {
        self.with_ledgers(|ledgers| ledgers.entry(ledger.to_string()).or_default().clone())
    }

    fn append(&self, ledger: &str, entry: &Entry) -> Result<(), CoreError> {
        self.with_ledgers(|ledgers| {
            ledgers
                .entry(ledger.to_string())
                .or_default()
                .push(entry.clone());
        })
    }
}

/// Tenant directory held entirely in memory.
#[derive(Debug, Default)]
pub struct MemoryTenantDirectory {
    tenants: RwLock<BTreeMap<String, Tenant>>,
}

impl MemoryTenantDirectory {
    pub fn new(tenants: impl IntoIterator<Item = Tenant>) -> Self {
        let map = tenants
            .into_iter()
            .map(|tenant| (tenant.id.clone(), tenant))
            .collect();
        Self {
            tenants: RwLock::new(map),
        }
    }
}

fn poisoned() -> CoreError {
    CoreError::Storage("tenant directory lock poisoned".into())
}

impl TenantDirectory for MemoryTenantDirectory {
    fn lookup(&self, id: &str) -> Result<Option<Tenant>, CoreError> {
        let guard = self.tenants.read().map_err(|_| poisoned())?;
        Ok(guard.get(id).cloned())
    }

    fn tenant_ids(&self) -> Result<Vec<String>, CoreError> {
        let guard = self.tenants.read().map_err(|_| poisoned())?;
        Ok(guard.keys().cloned().collect())
    }

    fn insert(&self, tenant: Tenant) -> Result<(), CoreError> {
        let mut guard = self.tenants.write().map_err(|_| poisoned())?;
        if guard.contains_key(&tenant.id) {
            return Err(CoreError::TenantExists(tenant.id));
        }
        guard.insert(tenant.id.clone(), tenant);
        Ok(())
    }

    fn set_password_hash(&self, id: &str, password_hash: String) -> Result<(), CoreError> {
        let mut guard = self.tenants.write().map_err(|_| poisoned())?;
        let tenant = guard
            .get_mut(id)
            .ok_or_else(|| CoreError::TenantNotFound(id.to_string()))?;
        tenant.password_hash = password_hash;
        Ok(())
    }
}
