use std::{collections::BTreeMap, path::PathBuf};

use serde::{Deserialize, Serialize};
use tally_domain::{Locale, Tenant, Tier};

/// Stores installation-wide preferences.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Locale code used when the caller does not pick one.
    #[serde(default = "Config::default_locale_value")]
    pub locale: String,

    /// Optional custom directory for ledger files. Defaults to `<base>/data`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ledger_root: Option<PathBuf>,

    /// Number of entries listed on the dashboard, newest first.
    #[serde(default = "Config::default_recent_limit")]
    pub recent_limit: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            locale: Self::default_locale_value(),
            ledger_root: None,
            recent_limit: Self::default_recent_limit(),
        }
    }
}

impl Config {
    pub fn default_locale_value() -> String {
        "ar".into()
    }

    pub fn default_recent_limit() -> usize {
        10
    }

    pub fn locale(&self) -> Locale {
        Locale::from_code(&self.locale)
    }

    pub fn resolve_ledger_root(&self, base: &std::path::Path) -> PathBuf {
        match &self.ledger_root {
            Some(path) if path.is_absolute() => path.clone(),
            Some(path) => base.join(path),
            None => base.join("data"),
        }
    }
}

/// A tenant as stored in `tenants.json`, keyed by tenant id.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TenantRecord {
    pub password_hash: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ledger: Option<String>,
    #[serde(default, alias = "plan")]
    pub tier: Tier,
}

impl TenantRecord {
    pub fn into_tenant(self, id: &str) -> Tenant {
        let ledger = self.ledger.unwrap_or_else(|| id.to_string());
        Tenant::new(id, self.password_hash, self.tier).with_ledger(ledger)
    }
}

impl From<Tenant> for TenantRecord {
    fn from(tenant: Tenant) -> Self {
        let ledger = (tenant.ledger != tenant.id).then_some(tenant.ledger);
        Self {
            password_hash: tenant.password_hash,
            ledger,
            tier: tenant.tier,
        }
    }
}

/// Every tenant known to the installation.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct TenantRegistry {
    #[serde(default)]
    pub tenants: BTreeMap<String, TenantRecord>,
}

impl TenantRegistry {
    pub fn get(&self, id: &str) -> Option<Tenant> {
        self.tenants
            .get(id)
            .cloned()
            .map(|record| record.into_tenant(id))
    }

    pub fn ids(&self) -> Vec<String> {
        self.tenants.keys().cloned().collect()
    }
}
