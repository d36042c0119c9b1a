use std::{
    fs::{self, File},
    io::Write,
    path::{Path, PathBuf},
};

use serde::{de::DeserializeOwned, Serialize};

use crate::{Config, ConfigError, TenantRegistry};

const CONFIG_FILE: &str = "config.json";
const TENANTS_FILE: &str = "tenants.json";
const TMP_SUFFIX: &str = "tmp";

/// Handles persistence for [`Config`] and the [`TenantRegistry`].
#[derive(Debug, Clone)]
pub struct ConfigManager {
    base_dir: PathBuf,
    config_path: PathBuf,
    tenants_path: PathBuf,
}

impl ConfigManager {
    pub fn with_base_dir(base: PathBuf) -> Result<Self, ConfigError> {
        fs::create_dir_all(&base)?;
        let config_dir = base.join("config");
        fs::create_dir_all(&config_dir)?;
        Ok(Self {
            config_path: config_dir.join(CONFIG_FILE),
            tenants_path: config_dir.join(TENANTS_FILE),
            base_dir: base,
        })
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    pub fn config_path(&self) -> &Path {
        &self.config_path
    }

    pub fn tenants_path(&self) -> &Path {
        &self.tenants_path
    }

    pub fn load(&self) -> Result<Config, ConfigError> {
        read_json_or_default(&self.config_path)
    }

    pub fn save(&self, config: &Config) -> Result<(), ConfigError> {
        write_json(&self.config_path, config)
    }

    pub fn load_registry(&self) -> Result<TenantRegistry, ConfigError> {
        load_registry(&self.tenants_path)
    }

    pub fn save_registry(&self, registry: &TenantRegistry) -> Result<(), ConfigError> {
        save_registry(&self.tenants_path, registry)
    }

    /// Directory holding ledger files according to `config`.
    pub fn ledger_root(&self, config: &Config) -> PathBuf {
        config.resolve_ledger_root(&self.base_dir)
    }
}

/// Reads a registry file, returning an empty registry when it does not exist.
pub fn load_registry(path: &Path) -> Result<TenantRegistry, ConfigError> {
    read_json_or_default(path)
}

/// Writes a registry file atomically.
pub fn save_registry(path: &Path, registry: &TenantRegistry) -> Result<(), ConfigError> {
    write_json(path, registry)
}

fn read_json_or_default<T: DeserializeOwned + Default>(path: &Path) -> Result<T, ConfigError> {
    if !path.exists() {
        return Ok(T::default());
    }
    let data = fs::read_to_string(path)?;
    serde_json::from_str(&data).map_err(|err| ConfigError::Serde(err.to_string()))
}

fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<(), ConfigError> {
    let json =
        serde_json::to_string_pretty(value).map_err(|err| ConfigError::Serde(err.to_string()))?;
    let tmp = tmp_path(path);
    write_atomic(&tmp, &json)?;
    fs::rename(&tmp, path)?;
    Ok(())
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut tmp = path.to_path_buf();
    let ext = match path.extension().and_then(|ext| ext.to_str()) {
        Some(existing) => format!("{}.{}", existing, TMP_SUFFIX),
        None => TMP_SUFFIX.to_string(),
    };
    tmp.set_extension(ext);
    tmp
}

fn write_atomic(path: &Path, data: &str) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let mut file = File::create(path)?;
    file.write_all(data.as_bytes())?;
    file.flush()?;
    Ok(())
}
