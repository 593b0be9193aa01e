//! Configuration for the rebalance trigger
//!
//! Loaded once at startup from an optional JSON file, then overlaid with
//! environment variables. Secrets (the gateway API key) are never part of
//! this struct; see [`gateway_api_key`].

pub mod rpc;

use crate::roles::RoleConfig;
use crate::strategies::{self, StrategyDescriptor};
use crate::types::ContractAddr;
use crate::{Error, Result};
use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;
use url::Url;

pub use rpc::RpcConfig;

/// Strategy gateway base URL environment variable name
pub const GATEWAY_URL_ENV: &str = "STRATEGY_GATEWAY_URL";
/// Strategy gateway API key environment variable name
pub const GATEWAY_API_KEY_ENV: &str = "STRATEGY_GATEWAY_API_KEY";
/// Strategy id environment variable name
pub const STRATEGY_ENV: &str = "VESU_STRATEGY";
/// Account key name environment variable name
pub const ACCOUNT_NAME_ENV: &str = "ACCOUNT_NAME";

const DEFAULT_GATEWAY_URL: &str = "http://127.0.0.1:8080";

/// Strategy gateway connection settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GatewayConfig {
    pub url: String,
    /// Per-request timeout (seconds)
    pub request_timeout_secs: u64,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_GATEWAY_URL.to_string(),
            request_timeout_secs: 30,
        }
    }
}

impl GatewayConfig {
    /// Parsed base URL
    pub fn base_url(&self) -> Result<Url> {
        Url::parse(&self.url)
            .map_err(|e| Error::Config(format!("Invalid gateway URL {:?}: {}", self.url, e)))
    }
}

/// Pricer readiness polling
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PricerSettings {
    pub poll_interval_ms: u64,
    /// Give up waiting for feeds after this long; unbounded when unset
    pub ready_timeout_secs: Option<u64>,
}

impl Default for PricerSettings {
    fn default() -> Self {
        Self {
            poll_interval_ms: 1_000,
            ready_timeout_secs: None,
        }
    }
}

impl PricerSettings {
    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }

    pub fn ready_timeout(&self) -> Option<Duration> {
        self.ready_timeout_secs.map(Duration::from_secs)
    }
}

/// Transaction confirmation polling
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ConfirmationSettings {
    pub poll_interval_ms: u64,
    /// Fail after this many status polls; unbounded when unset
    pub max_attempts: Option<u32>,
}

impl Default for ConfirmationSettings {
    fn default() -> Self {
        Self {
            poll_interval_ms: 5_000,
            max_attempts: None,
        }
    }
}

impl ConfirmationSettings {
    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }
}

/// Rebalance decision settings
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RebalanceSettings {
    /// Minimum APY gain over the current allocation before rebalancing.
    /// Has no default: an operator must choose it (e.g. 0.01).
    pub min_apy_improvement: Option<f64>,
}

impl RebalanceSettings {
    /// Validated margin
    pub fn margin(&self) -> Result<f64> {
        let margin = self.min_apy_improvement.ok_or_else(|| {
            Error::Config(
                "rebalance.min_apy_improvement must be set (or pass --min-improvement)"
                    .to_string(),
            )
        })?;
        if !margin.is_finite() || margin < 0.0 {
            return Err(Error::Config(format!(
                "rebalance.min_apy_improvement must be a non-negative number, got {}",
                margin
            )));
        }
        Ok(margin)
    }
}

/// Main configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Strategy id from the known catalogue
    pub strategy: String,
    /// Account key name used to sign transactions
    pub account: String,
    pub gateway: GatewayConfig,
    pub pricer: PricerSettings,
    pub confirmation: ConfirmationSettings,
    pub rebalance: RebalanceSettings,
    pub roles: RoleConfig,
    /// Path to audit log file (JSONL)
    pub audit_log_path: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            strategy: strategies::default_strategy().id.to_string(),
            account: "risk-manager".to_string(),
            gateway: GatewayConfig::default(),
            pricer: PricerSettings::default(),
            confirmation: ConfirmationSettings::default(),
            rebalance: RebalanceSettings::default(),
            roles: RoleConfig::default(),
            audit_log_path: Some("audit.jsonl".to_string()),
        }
    }
}

impl Config {
    /// Load from a JSON file (or defaults) and apply environment overrides
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut config = match path {
            Some(path) => {
                let content = std::fs::read_to_string(path).map_err(|e| {
                    Error::Config(format!("Failed to read {}: {}", path.display(), e))
                })?;
                serde_json::from_str(&content).map_err(|e| {
                    Error::Config(format!("Invalid config {}: {}", path.display(), e))
                })?
            }
            None => Config::default(),
        };

        config.apply_overrides(|name| std::env::var(name).ok())?;
        config.validate()?;
        Ok(config)
    }

    /// Overlay values from environment-style variables
    pub fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) -> Result<()> {
        if let Some(url) = lookup(GATEWAY_URL_ENV) {
            Url::parse(&url)
                .map_err(|e| Error::Config(format!("Invalid {}: {}", GATEWAY_URL_ENV, e)))?;
            self.gateway.url = url;
        }
        if let Some(strategy) = lookup(STRATEGY_ENV) {
            self.strategy = strategy;
        }
        if let Some(account) = lookup(ACCOUNT_NAME_ENV) {
            self.account = account;
        }
        Ok(())
    }

    /// Check references that can be resolved without network access
    pub fn validate(&self) -> Result<()> {
        self.strategy_descriptor()?;
        self.account_address()?;
        self.gateway.base_url()?;
        if self.pricer.poll_interval_ms == 0 || self.confirmation.poll_interval_ms == 0 {
            return Err(Error::Config("Poll intervals must be positive".to_string()));
        }
        Ok(())
    }

    pub fn strategy_descriptor(&self) -> Result<&'static StrategyDescriptor> {
        strategies::find(&self.strategy)
    }

    /// Address of the configured account
    pub fn account_address(&self) -> Result<ContractAddr> {
        self.roles.address_of(&self.account).ok_or_else(|| {
            Error::Config(format!(
                "Account {:?} has no address in roles.account_names",
                self.account
            ))
        })
    }
}

/// Read the gateway API key from the environment, if set
pub fn gateway_api_key() -> Option<SecretString> {
    std::env::var(GATEWAY_API_KEY_ENV)
        .ok()
        .filter(|key| !key.is_empty())
        .map(SecretString::from)
}
