//! Known Vesu rebalance strategies
//!
//! Each strategy lends one asset across a fixed set of Vesu pools. The
//! catalogue order matters: the first entry is the default selection.

use crate::constants;
use crate::types::ContractAddr;
use crate::{Error, Result};
use serde::Serialize;

/// Identifies a lending strategy: its asset and the pools it may allocate to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StrategyDescriptor {
    /// Identifier understood by the strategy gateway
    pub id: &'static str,
    pub name: &'static str,
    pub asset: ContractAddr,
    pub pools: &'static [ContractAddr],
}

impl StrategyDescriptor {
    pub fn allows_pool(&self, pool_id: &ContractAddr) -> bool {
        self.pools.contains(pool_id)
    }
}

const STRK_POOLS: &[ContractAddr] = &[
    constants::VESU_GENESIS_POOL,
    constants::RE7_XSTRK_POOL,
    constants::RE7_SSTRK_POOL,
];

const USDC_POOLS: &[ContractAddr] = &[constants::VESU_GENESIS_POOL, constants::RE7_USDC_POOL];

const GENESIS_ONLY: &[ContractAddr] = &[constants::VESU_GENESIS_POOL];

pub const VESU_STRATEGIES: &[StrategyDescriptor] = &[
    StrategyDescriptor {
        id: "vesu_fusion_strk",
        name: "Vesu Fusion STRK",
        asset: constants::STRK,
        pools: STRK_POOLS,
    },
    StrategyDescriptor {
        id: "vesu_fusion_eth",
        name: "Vesu Fusion ETH",
        asset: constants::ETH,
        pools: GENESIS_ONLY,
    },
    StrategyDescriptor {
        id: "vesu_fusion_usdc",
        name: "Vesu Fusion USDC",
        asset: constants::USDC,
        pools: USDC_POOLS,
    },
    StrategyDescriptor {
        id: "vesu_fusion_usdt",
        name: "Vesu Fusion USDT",
        asset: constants::USDT,
        pools: GENESIS_ONLY,
    },
];

/// Look up a strategy by id
pub fn find(id: &str) -> Result<&'static StrategyDescriptor> {
    VESU_STRATEGIES.iter().find(|s| s.id == id).ok_or_else(|| {
        let known: Vec<&str> = VESU_STRATEGIES.iter().map(|s| s.id).collect();
        Error::Config(format!(
            "Unknown strategy {:?}, expected one of: {}",
            id,
            known.join(", ")
        ))
    })
}

pub fn default_strategy() -> &'static StrategyDescriptor {
    &VESU_STRATEGIES[0]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tokens::registry;

    #[test]
    fn test_default_is_first_entry() {
        assert_eq!(default_strategy().id, "vesu_fusion_strk");
    }

    #[test]
    fn test_find_unknown_strategy() {
        let err = find("vesu_fusion_doge").unwrap_err();
        assert!(err.to_string().contains("vesu_fusion_usdc"));
    }

    #[test]
    fn test_assets_are_registered_tokens() {
        for strategy in VESU_STRATEGIES {
            assert!(
                registry().get(&strategy.asset).is_some(),
                "{} asset missing from token registry",
                strategy.id
            );
            assert!(strategy.allows_pool(&constants::VESU_GENESIS_POOL));
        }
    }

    #[test]
    fn test_usdc_pools() {
        let usdc = find("vesu_fusion_usdc").unwrap();
        assert!(usdc.allows_pool(&constants::RE7_USDC_POOL));
        assert!(!usdc.allows_pool(&constants::RE7_XSTRK_POOL));
    }
}
