use std::fs;

use tally_config::{Config, ConfigManager, JsonTenantDirectory};
use tally_core::{hash_password, storage::TenantDirectory, CoreError};
use tally_domain::{Locale, Tenant, Tier};
use tempfile::tempdir;

#[test]
fn default_config_has_non_empty_fields() {
    let cfg = Config::default();

    assert_eq!(cfg.locale(), Locale::Ar);
    assert_eq!(cfg.recent_limit, 10);
}

#[test]
fn config_manager_persists_and_loads_config() {
    let dir = tempdir().expect("tempdir");
    let manager = ConfigManager::with_base_dir(dir.path().to_path_buf()).expect("manager");

    let mut cfg = Config::default();
    cfg.locale = "en".to_string();
    cfg.recent_limit = 5;

    manager.save(&cfg).expect("save config");
    let loaded = manager.load().expect("load config");

    assert_eq!(loaded.locale(), Locale::En);
    assert_eq!(loaded.recent_limit, 5);
    assert!(!manager.config_path().with_extension("json.tmp").exists());
}

#[test]
fn ledger_root_defaults_under_base_dir() {
    let dir = tempdir().expect("tempdir");
    let manager = ConfigManager::with_base_dir(dir.path().to_path_buf()).expect("manager");

    let mut cfg = Config::default();
    assert_eq!(manager.ledger_root(&cfg), dir.path().join("data"));

    cfg.ledger_root = Some("ledgers".into());
    assert_eq!(manager.ledger_root(&cfg), dir.path().join("ledgers"));
}

#[test]
fn registry_accepts_legacy_plan_key_and_unknown_tiers() {
    let dir = tempdir().expect("tempdir");
    let manager = ConfigManager::with_base_dir(dir.path().to_path_buf()).expect("manager");
    fs::write(
        manager.tenants_path(),
        r#"{"tenants": {
            "cafe1": {"password_hash": "x", "ledger": "data_cafe1", "plan": "platinum"},
            "cafe3": {"password_hash": "y", "tier": "diamond"}
        }}"#,
    )
    .unwrap();

    let registry = manager.load_registry().expect("load registry");
    let cafe1 = registry.get("cafe1").expect("cafe1");
    assert_eq!(cafe1.tier, Tier::Platinum);
    assert_eq!(cafe1.ledger, "data_cafe1");
    let cafe3 = registry.get("cafe3").expect("cafe3");
    assert_eq!(cafe3.tier, Tier::Other("diamond".into()));
    assert_eq!(cafe3.ledger, "cafe3");
}

#[test]
fn json_directory_writes_through_on_rotation() {
    let dir = tempdir().expect("tempdir");
    let manager = ConfigManager::with_base_dir(dir.path().to_path_buf()).expect("manager");
    let directory =
        JsonTenantDirectory::open(manager.tenants_path().to_path_buf()).expect("open directory");

    directory
        .insert(Tenant::new("cafe2", hash_password("1234").unwrap(), Tier::Basic))
        .expect("insert");
    assert!(matches!(
        directory.insert(Tenant::new("cafe2", "other", Tier::Gold)),
        Err(CoreError::TenantExists(_))
    ));

    directory
        .set_password_hash("cafe2", "rotated".into())
        .expect("rotate");
    assert!(matches!(
        directory.set_password_hash("ghost", "x".into()),
        Err(CoreError::TenantNotFound(_))
    ));

    let reopened =
        JsonTenantDirectory::open(manager.tenants_path().to_path_buf()).expect("reopen directory");
    let tenant = reopened.lookup("cafe2").unwrap().expect("tenant persisted");
    assert_eq!(tenant.password_hash, "rotated");
    assert_eq!(tenant.tier, Tier::Basic);
    assert_eq!(reopened.tenant_ids().unwrap(), vec!["cafe2".to_string()]);
}
