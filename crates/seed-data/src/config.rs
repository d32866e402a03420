//! Configuration for seeding runs.

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use hotel::BREAKFAST_PRICE;

use crate::sync::{ResolveOptions, StatusPolicy};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("{key} must be set")]
    Missing { key: &'static str },
    #[error("invalid value for {key}: {value}")]
    Invalid { key: &'static str, value: String },
}

/// Where the sample data is written.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Backend {
    /// The hosted database's REST API.
    #[default]
    Rest,
    /// PostgreSQL, directly.
    Postgres,
    /// An in-process store, discarded on exit.
    Memory,
}

impl FromStr for Backend {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "rest" => Ok(Backend::Rest),
            "postgres" => Ok(Backend::Postgres),
            "memory" => Ok(Backend::Memory),
            _ => Err(ConfigError::Invalid {
                key: "SEED_BACKEND",
                value: s.to_string(),
            }),
        }
    }
}

/// Which upload to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UploadMode {
    /// Clear everything and seed guests, cabins and bookings.
    #[default]
    All,
    /// Replace bookings only.
    Bookings,
}

impl FromStr for UploadMode {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "all" => Ok(UploadMode::All),
            "bookings" => Ok(UploadMode::Bookings),
            _ => Err(ConfigError::Invalid {
                key: "SEED_MODE",
                value: s.to_string(),
            }),
        }
    }
}

fn parse_status_policy(s: &str) -> Result<StatusPolicy, ConfigError> {
    match s.to_ascii_lowercase().as_str() {
        "last-match" | "last-match-wins" => Ok(StatusPolicy::LastMatchWins),
        "first-match" | "first-match-wins" => Ok(StatusPolicy::FirstMatchWins),
        _ => Err(ConfigError::Invalid {
            key: "SEED_STATUS_POLICY",
            value: s.to_string(),
        }),
    }
}

/// Configuration for seeding operations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeedConfig {
    pub backend: Backend,
    pub mode: UploadMode,

    /// Nightly breakfast rate per guest.
    pub breakfast_price: i64,

    pub status_policy: StatusPolicy,

    /// Project URL of the hosted database (rest backend).
    pub supabase_url: Option<String>,
    /// API key for the hosted database (rest backend).
    pub supabase_key: Option<String>,
    /// Connection string (postgres backend).
    pub database_url: Option<String>,
}

impl Default for SeedConfig {
    fn default() -> Self {
        Self {
            backend: Backend::default(),
            mode: UploadMode::default(),
            breakfast_price: BREAKFAST_PRICE,
            status_policy: StatusPolicy::default(),
            supabase_url: None,
            supabase_key: None,
            database_url: None,
        }
    }
}

impl SeedConfig {
    /// Reads `SEED_BACKEND`, `SEED_MODE`, `SEED_BREAKFAST_PRICE`,
    /// `SEED_STATUS_POLICY`, `SUPABASE_URL`, `SUPABASE_KEY` and `DATABASE_URL`.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Like [`SeedConfig::from_env`], reading variables through `lookup`.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Some(value) = lookup("SEED_BACKEND") {
            config.backend = value.parse()?;
        }
        if let Some(value) = lookup("SEED_MODE") {
            config.mode = value.parse()?;
        }
        if let Some(value) = lookup("SEED_BREAKFAST_PRICE") {
            config.breakfast_price = value
                .trim()
                .parse()
                .ok()
                .filter(|price: &i64| *price >= 0)
                .ok_or(ConfigError::Invalid {
                    key: "SEED_BREAKFAST_PRICE",
                    value,
                })?;
        }
        if let Some(value) = lookup("SEED_STATUS_POLICY") {
            config.status_policy = parse_status_policy(&value)?;
        }

        config.supabase_url = lookup("SUPABASE_URL").filter(|v| !v.is_empty());
        config.supabase_key = lookup("SUPABASE_KEY").filter(|v| !v.is_empty());
        config.database_url = lookup("DATABASE_URL").filter(|v| !v.is_empty());

        Ok(config)
    }

    /// URL and key for the rest backend.
    pub fn rest_credentials(&self) -> Result<(&str, &str), ConfigError> {
        let url = self
            .supabase_url
            .as_deref()
            .ok_or(ConfigError::Missing { key: "SUPABASE_URL" })?;
        let key = self
            .supabase_key
            .as_deref()
            .ok_or(ConfigError::Missing { key: "SUPABASE_KEY" })?;
        Ok((url, key))
    }

    pub fn database_url(&self) -> Result<&str, ConfigError> {
        self.database_url
            .as_deref()
            .ok_or(ConfigError::Missing { key: "DATABASE_URL" })
    }

    pub fn resolve_options(&self) -> ResolveOptions {
        ResolveOptions {
            breakfast_price: self.breakfast_price,
            status_policy: self.status_policy,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| vars.get(key).cloned()
    }

    #[test]
    fn test_defaults_without_environment() {
        let config = SeedConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, SeedConfig::default());
        assert_eq!(config.backend, Backend::Rest);
        assert_eq!(config.mode, UploadMode::All);
        assert_eq!(config.breakfast_price, 15);
        assert_eq!(config.status_policy, StatusPolicy::LastMatchWins);
    }

    #[test]
    fn test_reads_every_variable() {
        let config = SeedConfig::from_lookup(lookup(&[
            ("SEED_BACKEND", "postgres"),
            ("SEED_MODE", "Bookings"),
            ("SEED_BREAKFAST_PRICE", "20"),
            ("SEED_STATUS_POLICY", "first-match"),
            ("DATABASE_URL", "postgres://localhost/wild_oasis"),
        ]))
        .unwrap();
        assert_eq!(config.backend, Backend::Postgres);
        assert_eq!(config.mode, UploadMode::Bookings);
        assert_eq!(config.resolve_options().breakfast_price, 20);
        assert_eq!(config.resolve_options().status_policy, StatusPolicy::FirstMatchWins);
        assert_eq!(config.database_url().unwrap(), "postgres://localhost/wild_oasis");
    }

    #[test]
    fn test_rejects_invalid_values() {
        let err = SeedConfig::from_lookup(lookup(&[("SEED_BACKEND", "mysql")])).unwrap_err();
        assert_eq!(err.to_string(), "invalid value for SEED_BACKEND: mysql");

        let err = SeedConfig::from_lookup(lookup(&[("SEED_BREAKFAST_PRICE", "-1")])).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { key: "SEED_BREAKFAST_PRICE", .. }));
    }

    #[test]
    fn test_rest_credentials_required() {
        let config = SeedConfig::from_lookup(lookup(&[("SUPABASE_URL", "https://x.supabase.co")])).unwrap();
        assert_eq!(
            config.rest_credentials().unwrap_err(),
            ConfigError::Missing { key: "SUPABASE_KEY" }
        );
    }
}
