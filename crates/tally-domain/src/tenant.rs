//! Tenant accounts and subscription tiers.

use std::fmt;

use serde::{de::Deserializer, Deserialize, Serialize, Serializer};

/// Subscription level of a tenant.
///
/// Unknown tier names are preserved as [`Tier::Other`] so the stored value
/// survives a load/save cycle.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Tier {
    Basic,
    Gold,
    #[default]
    Platinum,
    Other(String),
}

impl Tier {
    pub fn from_str(value: &str) -> Self {
        let trimmed = value.trim();
        match trimmed.to_ascii_lowercase().as_str() {
            "basic" => Tier::Basic,
            "gold" => Tier::Gold,
            "platinum" => Tier::Platinum,
            _ => Tier::Other(trimmed.to_string()),
        }
    }

    pub fn label(&self) -> &str {
        match self {
            Tier::Basic => "basic",
            Tier::Gold => "gold",
            Tier::Platinum => "platinum",
            Tier::Other(name) => name.as_str(),
        }
    }

    pub fn is_known(&self) -> bool {
        !matches!(self, Tier::Other(_))
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl Serialize for Tier {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.label())
    }
}

impl<'de> Deserialize<'de> for Tier {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Option::<String>::deserialize(deserializer)?;
        Ok(value
            .map(|raw| Tier::from_str(&raw))
            .unwrap_or_default())
    }
}

/// An authenticated business account with its own ledger.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Tenant {
    pub id: String,
    /// PHC-formatted password hash.
    pub password_hash: String,
    /// Name of the ledger backing this tenant; usually the tenant id.
    pub ledger: String,
    #[serde(default)]
    pub tier: Tier,
}

impl Tenant {
    pub fn new(id: impl Into<String>, password_hash: impl Into<String>, tier: Tier) -> Self {
        let id = id.into();
        Self {
            ledger: id.clone(),
            id,
            password_hash: password_hash.into(),
            tier,
        }
    }

    pub fn with_ledger(mut self, ledger: impl Into<String>) -> Self {
        self.ledger = ledger.into();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tier_parses_case_insensitively() {
        assert_eq!(Tier::from_str("GOLD"), Tier::Gold);
        assert_eq!(Tier::from_str(" basic "), Tier::Basic);
        assert_eq!(Tier::from_str("diamond"), Tier::Other("diamond".into()));
    }

    #[test]
    fn tier_serializes_as_plain_string() {
        let json = serde_json::to_string(&Tier::Gold).unwrap();
        assert_eq!(json, "\"gold\"");
        let other: Tier = serde_json::from_str("\"enterprise\"").unwrap();
        assert_eq!(other.label(), "enterprise");
        assert!(!other.is_known());
    }

    #[test]
    fn tenant_defaults_ledger_to_id() {
        let tenant = Tenant::new("cafe1", "hash", Tier::Basic);
        assert_eq!(tenant.ledger, "cafe1");
        let moved = tenant.with_ledger("legacy_cafe");
        assert_eq!(moved.ledger, "legacy_cafe");
    }
}
