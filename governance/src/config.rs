//! Engine configuration with TOML file support.

use cohort_types::Address;
use cohort_utils::{init_logging, LogFormat};
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::GovernanceError;

/// Configuration for a governance engine instance.
///
/// Can be loaded from a TOML file via [`GovernanceConfig::from_toml_file`] or
/// built programmatically with [`GovernanceConfig::new`] (e.g. for tests).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GovernanceConfig {
    /// Initial holder of the global admin role.
    pub default_admin: Address,

    /// Initial holder of the technical admin role. Defaults to `default_admin`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tech_admin: Option<Address>,

    /// Address of the token contract. Cohort admins may not be this address.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token_contract: Option<Address>,

    /// Log format: "human" or "json".
    #[serde(default)]
    pub log_format: LogFormat,

    /// Log level filter: "trace", "debug", "info", "warn", "error".
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

// ── Serde default helpers ──────────────────────────────────────────────

fn default_log_level() -> String {
    "info".to_string()
}

// ── Impl ───────────────────────────────────────────────────────────────

impl GovernanceConfig {
    pub fn new(default_admin: Address) -> Self {
        Self {
            default_admin,
            tech_admin: None,
            token_contract: None,
            log_format: LogFormat::default(),
            log_level: default_log_level(),
        }
    }

    /// Load configuration from a TOML file.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, GovernanceError> {
        let content = std::fs::read_to_string(path.as_ref())
            .map_err(|e| GovernanceError::Config(e.to_string()))?;
        Self::from_toml_str(&content)
    }

    /// Parse configuration from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self, GovernanceError> {
        let config: Self = toml::from_str(s).map_err(|e| GovernanceError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize the configuration to a TOML string.
    pub fn to_toml_string(&self) -> Result<String, GovernanceError> {
        toml::to_string_pretty(self).map_err(|e| GovernanceError::Config(e.to_string()))
    }

    /// The technical admin, falling back to the global admin.
    pub fn tech_admin(&self) -> Address {
        self.tech_admin.unwrap_or(self.default_admin)
    }

    /// Install the global tracing subscriber with this config's format and level.
    pub fn init_logging(&self) -> Result<(), GovernanceError> {
        init_logging(self.log_format, &self.log_level)
            .map_err(|e| GovernanceError::Config(format!("logging: {e}")))
    }

    /// Reject configurations that would leave the engine without a usable admin.
    pub fn validate(&self) -> Result<(), GovernanceError> {
        if self.default_admin.is_zero() {
            return Err(GovernanceError::Config(
                "default_admin must not be the zero address".to_string(),
            ));
        }
        if self.tech_admin.is_some_and(|a| a.is_zero()) {
            return Err(GovernanceError::Config(
                "tech_admin must not be the zero address".to_string(),
            ));
        }
        if self.token_contract == Some(self.default_admin) {
            return Err(GovernanceError::Config(
                "default_admin must not be the token contract".to_string(),
            ));
        }
        Ok(())
    }
}
