//! Shared token registry
//!
//! Token metadata (symbols, decimals) for the assets the strategies hold and
//! the pricer tracks. The pricer is bound to exactly this token set, so it is
//! also the set of feeds that must be populated before the pricer is ready.

use crate::constants;
use crate::types::ContractAddr;
use crate::{Error, Result};
use alloy::primitives::utils::{format_units, parse_units};
use alloy::primitives::U256;
use std::collections::HashMap;

/// Token metadata
#[derive(Debug, Clone, Copy)]
pub struct TokenInfo {
    /// Token symbol (e.g., "USDC", "STRK")
    pub symbol: &'static str,
    /// Number of decimals
    pub decimals: u8,
    /// Whether this is a stablecoin (pegged to $1)
    pub is_stablecoin: bool,
}

impl TokenInfo {
    pub const fn stablecoin(symbol: &'static str, decimals: u8) -> Self {
        Self {
            symbol,
            decimals,
            is_stablecoin: true,
        }
    }

    pub const fn token(symbol: &'static str, decimals: u8) -> Self {
        Self {
            symbol,
            decimals,
            is_stablecoin: false,
        }
    }
}

/// Token registry providing token info lookups
pub struct TokenRegistry {
    tokens: HashMap<ContractAddr, TokenInfo>,
    /// Registration order, kept so the pricer token list is stable
    order: Vec<ContractAddr>,
}

impl TokenRegistry {
    /// Create a registry with all mainnet tokens
    pub fn new() -> Self {
        let mut registry = Self {
            tokens: HashMap::new(),
            order: Vec::new(),
        };

        registry.insert(constants::ETH, TokenInfo::token("ETH", 18));
        registry.insert(constants::STRK, TokenInfo::token("STRK", 18));
        registry.insert(constants::XSTRK, TokenInfo::token("xSTRK", 18));
        registry.insert(constants::BTC, TokenInfo::token("WBTC", 8));
        registry.insert(constants::WSTETH, TokenInfo::token("wstETH", 18));
        registry.insert(constants::USDC, TokenInfo::stablecoin("USDC", 6));
        registry.insert(constants::USDT, TokenInfo::stablecoin("USDT", 6));
        registry.insert(constants::DAI, TokenInfo::stablecoin("DAI", 18));

        registry
    }

    fn insert(&mut self, address: ContractAddr, info: TokenInfo) {
        if self.tokens.insert(address, info).is_none() {
            self.order.push(address);
        }
    }

    /// Get token info by address
    pub fn get(&self, address: &ContractAddr) -> Option<&TokenInfo> {
        self.tokens.get(address)
    }

    /// Get token info by address string
    pub fn get_by_str(&self, address: &str) -> Option<&TokenInfo> {
        let addr = address.parse::<ContractAddr>().ok()?;
        self.get(&addr)
    }

    /// Get token info by symbol, case-insensitive
    pub fn by_symbol(&self, symbol: &str) -> Option<(ContractAddr, &TokenInfo)> {
        self.order.iter().find_map(|addr| {
            let info = self.tokens.get(addr)?;
            info.symbol
                .eq_ignore_ascii_case(symbol)
                .then_some((*addr, info))
        })
    }

    /// Tokens the pricer must have a feed for
    pub fn price_feed_tokens(&self) -> &[ContractAddr] {
        &self.order
    }

    /// Check if an address is a known stablecoin
    pub fn is_stablecoin(&self, address: &ContractAddr) -> bool {
        self.tokens
            .get(address)
            .map(|t| t.is_stablecoin)
            .unwrap_or(false)
    }

    /// Convert a human-readable amount ("1.5") to raw units of `token`
    pub fn parse_amount(&self, token: &ContractAddr, amount: &str) -> Result<U256> {
        let info = self
            .get(token)
            .ok_or_else(|| Error::InvalidArgument(format!("Unknown token {}", token)))?;
        let amount = amount.trim();
        if let Some((_, fraction)) = amount.split_once('.') {
            if fraction.trim_end_matches('0').len() > usize::from(info.decimals) {
                return Err(Error::InvalidArgument(format!(
                    "{} has {} decimals, got {:?}",
                    info.symbol, info.decimals, amount
                )));
            }
        }
        let parsed = parse_units(amount, info.decimals).map_err(|e| {
            Error::InvalidArgument(format!("Invalid {} amount {:?}: {}", info.symbol, amount, e))
        })?;
        if parsed.is_negative() {
            return Err(Error::InvalidArgument(format!(
                "Amount must not be negative: {}",
                amount
            )));
        }
        Ok(parsed.get_absolute())
    }

    /// Format raw units of `token` for display, falling back to the raw value
    pub fn format_amount(&self, token: &ContractAddr, raw: U256) -> String {
        match self.get(token) {
            Some(info) => format_units(raw, info.decimals)
                .map(|s| format!("{} {}", s, info.symbol))
                .unwrap_or_else(|_| raw.to_string()),
            None => raw.to_string(),
        }
    }
}

impl Default for TokenRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Global token registry (lazy initialized)
static REGISTRY: std::sync::OnceLock<TokenRegistry> = std::sync::OnceLock::new();

/// Get the global token registry
pub fn registry() -> &'static TokenRegistry {
    REGISTRY.get_or_init(TokenRegistry::new)
}
