//! Request-level orchestration between tenants, ledgers and the metrics engine.
//!
//! [`Dashboard`] is what a presentation layer talks to. It resolves tenants,
//! reads their ledger, and serializes the read → quota check → append sequence
//! per ledger so concurrent requests in one process cannot exceed a quota.
//! Separate processes writing the same ledger are not coordinated.

use std::{
    collections::HashMap,
    sync::{Arc, Mutex, PoisonError},
};

use serde::Serialize;
use tally_config::{Config, ConfigManager, JsonTenantDirectory};
use tally_core::{
    catalog::{catalog, suggestions},
    storage::{LedgerStorage, TenantDirectory},
    Clock, CredentialService, EntryService, FixedClock, MetricsService, QuotaService,
};
use tally_domain::{Entry, Locale, MetricsReport, QuotaStatus, Tenant, Tier};
use tally_storage_csv::CsvLedgerStorage;

use crate::{
    clock::SystemClock,
    errors::{Result, TallyError},
};

/// Everything rendered on a tenant's dashboard.
#[derive(Debug, Clone, Serialize)]
pub struct DashboardView {
    pub tenant: String,
    pub tier: Tier,
    pub locale: Locale,
    pub report: MetricsReport,
    pub plan_message: String,
    pub weak_label: Option<String>,
    pub suggestions: Vec<String>,
    pub recent: Vec<Entry>,
}

pub struct Dashboard {
    ledgers: Box<dyn LedgerStorage>,
    tenants: Box<dyn TenantDirectory>,
    clock: Box<dyn Clock>,
    recent_limit: usize,
    locks: Mutex<HashMap<String, Arc<Mutex<()>>>>,
}

impl Dashboard {
    pub fn new(
        ledgers: Box<dyn LedgerStorage>,
        tenants: Box<dyn TenantDirectory>,
        clock: Box<dyn Clock>,
    ) -> Self {
        Self {
            ledgers,
            tenants,
            clock,
            recent_limit: Config::default_recent_limit(),
            locks: Mutex::new(HashMap::new()),
        }
    }

    /// Wires CSV ledgers, the JSON tenant registry and the system clock from configuration.
    pub fn open(manager: &ConfigManager, config: &Config) -> Result<Self> {
        let ledgers = CsvLedgerStorage::new(manager.ledger_root(config))?;
        let tenants = JsonTenantDirectory::open(manager.tenants_path().to_path_buf())?;
        tracing::info!(
            ledger_root = %ledgers.root().display(),
            registry = %tenants.path().display(),
            "dashboard opened"
        );
        Ok(Self::new(Box::new(ledgers), Box::new(tenants), Box::new(SystemClock))
            .with_recent_limit(config.recent_limit))
    }

    pub fn with_recent_limit(mut self, limit: usize) -> Self {
        self.recent_limit = limit;
        self
    }

    pub fn tenant_ids(&self) -> Result<Vec<String>> {
        Ok(self.tenants.tenant_ids()?)
    }

    pub fn tenant(&self, id: &str) -> Result<Tenant> {
        self.tenants
            .lookup(id)?
            .ok_or_else(|| TallyError::TenantNotFound(id.to_string()))
    }

    /// Checks credentials and makes sure the tenant's ledger exists.
    pub fn login(&self, id: &str, password: &str) -> Result<Tenant> {
        let tenant = match CredentialService::authenticate(self.tenants.as_ref(), id, password) {
            Ok(tenant) => tenant,
            Err(err) => {
                tracing::warn!(tenant = id, "login rejected");
                return Err(err.into());
            }
        };
        self.ledgers.ensure(&tenant.ledger)?;
        tracing::info!(tenant = %tenant.id, tier = %tenant.tier, "tenant logged in");
        Ok(tenant)
    }

    /// Adds a tenant whose ledger shares its id.
    ///
    /// Refused when another tenant's ledger resolves to the same storage, so
    /// no two tenants ever read or append the same ledger.
    pub fn register_tenant(&self, id: &str, password: &str, tier: Tier) -> Result<Tenant> {
        let id = id.trim();
        if id.is_empty() {
            return Err(TallyError::InvalidInput("tenant id must not be empty".into()));
        }
        let key = self.ledgers.storage_key(id);
        let lock = self.ledger_lock(&key);
        let _guard = lock.lock().unwrap_or_else(PoisonError::into_inner);

        for existing in self.tenants.tenant_ids()? {
            let Some(other) = self.tenants.lookup(&existing)? else {
                continue;
            };
            if self.ledgers.storage_key(&other.ledger) == key {
                tracing::warn!(tenant = id, owner = %other.id, ledger = %key, "ledger already owned");
                return Err(TallyError::TenantExists(id.to_string()));
            }
        }

        let tenant = CredentialService::register(self.tenants.as_ref(), id, password, tier)?;
        self.ledgers.ensure(&tenant.ledger)?;
        tracing::info!(tenant = %tenant.id, tier = %tenant.tier, "tenant registered");
        Ok(tenant)
    }

    pub fn change_password(&self, id: &str, old_password: &str, new_password: &str) -> Result<()> {
        CredentialService::change_password(self.tenants.as_ref(), id, old_password, new_password)?;
        tracing::info!(tenant = id, "password rotated");
        Ok(())
    }

    pub fn entries(&self, id: &str) -> Result<Vec<Entry>> {
        let tenant = self.tenant(id)?;
        Ok(self.ledgers.read_all(&tenant.ledger)?)
    }

    pub fn report(&self, id: &str) -> Result<MetricsReport> {
        let tenant = self.tenant(id)?;
        let entries = self.ledgers.read_all(&tenant.ledger)?;
        Ok(MetricsService::build_report(
            &entries,
            &tenant.tier,
            self.clock.today(),
        ))
    }

    pub fn quota_status(&self, id: &str) -> Result<QuotaStatus> {
        let tenant = self.tenant(id)?;
        let entries = self.ledgers.read_all(&tenant.ledger)?;
        Ok(QuotaService::quota_status(
            &entries,
            &tenant.tier,
            self.clock.today(),
        ))
    }

    /// Builds the full dashboard for a tenant in the requested language.
    pub fn view(&self, id: &str, locale: Locale) -> Result<DashboardView> {
        let tenant = self.tenant(id)?;
        let entries = self.ledgers.read_all(&tenant.ledger)?;
        let report = MetricsService::build_report(&entries, &tenant.tier, self.clock.today());
        let messages = catalog(locale);

        Ok(DashboardView {
            plan_message: messages.plan_status(&tenant.tier, &report.quota),
            weak_label: report
                .weakest_bucket
                .map(|weak| messages.bucket_label(weak.bucket).to_string()),
            suggestions: suggestions(locale),
            recent: MetricsService::recent_entries(&entries, self.recent_limit),
            tenant: tenant.id,
            tier: tenant.tier,
            locale,
            report,
        })
    }

    /// Records a new entry for today if the tenant's quota allows it.
    ///
    /// The quota is checked before the amount is validated; neither failure
    /// writes anything.
    pub fn record_income(&self, id: &str, raw_income: &str, raw_note: &str) -> Result<Entry> {
        let tenant = self.tenant(id)?;
        let lock = self.ledger_lock(&self.ledgers.storage_key(&tenant.ledger));
        let _guard = lock.lock().unwrap_or_else(PoisonError::into_inner);

        let clock = FixedClock(self.clock.now());
        let entries = self.ledgers.read_all(&tenant.ledger)?;
        let status = QuotaService::quota_status(&entries, &tenant.tier, clock.today());
        if let Err(err) = QuotaService::ensure_open(status) {
            tracing::info!(
                tenant = %tenant.id,
                count = status.count,
                limit = status.limit,
                "daily quota reached"
            );
            return Err(err.into());
        }

        let entry = EntryService::compose(&clock, raw_income, raw_note)?;
        self.ledgers.append(&tenant.ledger, &entry)?;
        tracing::info!(
            tenant = %tenant.id,
            income = entry.income,
            count = status.count + 1,
            limit = status.limit,
            "income recorded"
        );
        Ok(entry)
    }

    /// Lock for one storage key; callers pass `storage_key` output, not raw ledger names.
    fn ledger_lock(&self, key: &str) -> Arc<Mutex<()>> {
        let mut locks = self.locks.lock().unwrap_or_else(PoisonError::into_inner);
        locks.entry(key.to_string()).or_default().clone()
    }
}
