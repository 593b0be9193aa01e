//! Starknet RPC endpoint configuration
//!
//! Resolution order:
//! 1. `STARKNET_RPC_URL` - highest priority
//! 2. Provider API keys (`ALCHEMY_API_KEY`, `INFURA_API_KEY`) - builds the URL
//! 3. Public RPC fallback - rate limited, for testing only
//!
//! ```bash
//! export STARKNET_RPC_URL="https://starknet-mainnet.g.alchemy.com/starknet/version/rpc/v0_7/YOUR_KEY"
//! ```

/// Environment variable names
mod env_vars {
    pub const STARKNET_RPC_URL: &str = "STARKNET_RPC_URL";
    pub const ALCHEMY_API_KEY: &str = "ALCHEMY_API_KEY";
    pub const INFURA_API_KEY: &str = "INFURA_API_KEY";
}

/// Public mainnet endpoint (rate limited)
const PUBLIC_RPC: &str = "https://starknet-mainnet.public.blastapi.io/rpc/v0_7";

/// Where the RPC URL came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RpcSource {
    Explicit,
    Alchemy,
    Infura,
    Public,
}

/// RPC configuration for Starknet mainnet
#[derive(Debug, Clone)]
pub struct RpcConfig {
    url: String,
    source: RpcSource,
}

impl RpcConfig {
    /// Create RPC config from environment variables
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Resolve the RPC URL from an arbitrary variable source
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(url) = lookup(env_vars::STARKNET_RPC_URL) {
            tracing::debug!("Using STARKNET_RPC_URL");
            return Self {
                url,
                source: RpcSource::Explicit,
            };
        }

        if let Some(key) = lookup(env_vars::ALCHEMY_API_KEY) {
            tracing::info!("Building RPC URL from ALCHEMY_API_KEY");
            return Self {
                url: format!(
                    "https://starknet-mainnet.g.alchemy.com/starknet/version/rpc/v0_7/{}",
                    key
                ),
                source: RpcSource::Alchemy,
            };
        }

        if let Some(key) = lookup(env_vars::INFURA_API_KEY) {
            tracing::info!("Building RPC URL from INFURA_API_KEY");
            return Self {
                url: format!("https://starknet-mainnet.infura.io/v3/{}", key),
                source: RpcSource::Infura,
            };
        }

        tracing::warn!("No Starknet RPC configured, using public RPC (rate limited)");
        Self {
            url: PUBLIC_RPC.to_string(),
            source: RpcSource::Public,
        }
    }

    /// Create with an explicit RPC URL
    pub fn with_url(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            source: RpcSource::Explicit,
        }
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn source(&self) -> RpcSource {
        self.source
    }
}

impl Default for RpcConfig {
    fn default() -> Self {
        Self::from_env()
    }
}
