//! Boundary to the strategy SDK
//!
//! The trigger never prices assets, computes allocations or signs anything
//! itself. It drives four collaborators through these traits:
//! - [`Pricer`]: price feeds that must be live before any yield is computed
//! - [`YieldStrategy`]: APY, reallocation and call construction for one strategy
//! - [`ChainAccount`]: submits calls as a transaction
//! - [`RpcProvider`]: waits for the ledger to settle a transaction

#[cfg(test)]
pub(crate) mod mock;

use crate::strategies::StrategyDescriptor;
use crate::types::{
    Call, ChangeSet, ContractAddr, PoolInfo, PositionSet, RebalancePlan, TransactionStatus, Tvl,
    TxHandle, TxHash,
};
use crate::Result;
use alloy::primitives::U256;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Latest price per token; `None` until the feed has produced a value
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PriceSnapshot {
    pub prices: HashMap<ContractAddr, Option<f64>>,
}

impl PriceSnapshot {
    /// Required tokens without a current price
    pub fn missing<'a>(&self, required: &'a [ContractAddr]) -> Vec<&'a ContractAddr> {
        required
            .iter()
            .filter(|token| !matches!(self.prices.get(*token), Some(Some(_))))
            .collect()
    }

    /// Ready once every required feed is populated
    pub fn is_ready(&self, required: &[ContractAddr]) -> bool {
        self.missing(required).is_empty()
    }
}

/// Price oracle client bound to a fixed token set
#[async_trait]
pub trait Pricer: Send + Sync {
    /// Begin populating price feeds
    async fn start(&self) -> Result<()>;

    /// Resolve once all required feeds are populated.
    ///
    /// Implementations may enforce their own bound and fail with
    /// [`crate::Error::PricerNotReady`]; otherwise the wait is unbounded.
    async fn wait_till_ready(&self) -> Result<()>;
}

/// A lending strategy object owned by the SDK
#[async_trait]
pub trait YieldStrategy: Send + Sync {
    fn descriptor(&self) -> &StrategyDescriptor;

    /// Current net APY of the strategy's allocation
    async fn net_apy(&self) -> Result<f64>;

    /// Proposed reallocation and the change set that reaches it
    async fn rebalanced_positions(&self) -> Result<RebalancePlan>;

    /// Net APY the strategy would earn with `positions`
    async fn net_apy_given_positions(&self, positions: &PositionSet) -> Result<f64>;

    /// Calls that apply `changes` on-chain
    async fn rebalance_call(&self, changes: &ChangeSet) -> Result<Vec<Call>>;

    /// Calls that deposit `amount` raw asset units on behalf of `receiver`
    async fn deposit_call(&self, amount: U256, receiver: ContractAddr) -> Result<Vec<Call>>;

    async fn tvl(&self) -> Result<Tvl>;

    async fn user_tvl(&self, user: ContractAddr) -> Result<Tvl>;

    async fn pools(&self) -> Result<Vec<PoolInfo>>;
}

/// Account that signs and submits transactions
#[async_trait]
pub trait ChainAccount: Send + Sync {
    fn address(&self) -> ContractAddr;

    async fn execute(&self, calls: &[Call]) -> Result<TxHandle>;
}

/// Final view of a transaction once it reached a success state
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionReceipt {
    pub transaction_hash: TxHash,
    pub finality_status: TransactionStatus,
    pub execution_status: Option<TransactionStatus>,
}

/// Node access needed by the trigger
#[async_trait]
pub trait RpcProvider: Send + Sync {
    /// Wait until the transaction reaches one of `success_states`.
    ///
    /// Fails with [`crate::Error::TransactionRejected`] when the ledger
    /// reports a terminal error state not listed in `success_states`.
    async fn wait_for_transaction(
        &self,
        hash: TxHash,
        success_states: &[TransactionStatus],
    ) -> Result<TransactionReceipt>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::{ETH, STRK, USDC};

    #[test]
    fn test_snapshot_missing_feeds() {
        let mut snapshot = PriceSnapshot::default();
        snapshot.prices.insert(ETH, Some(3200.0));
        snapshot.prices.insert(STRK, None);

        let required = [ETH, STRK, USDC];
        let missing = snapshot.missing(&required);
        assert_eq!(missing, vec![&STRK, &USDC]);
        assert!(!snapshot.is_ready(&required));

        snapshot.prices.insert(STRK, Some(0.45));
        snapshot.prices.insert(USDC, Some(1.0));
        assert!(snapshot.is_ready(&required));
    }

    #[test]
    fn test_snapshot_ready_with_no_requirements() {
        assert!(PriceSnapshot::default().is_ready(&[]));
    }

    #[test]
    fn test_snapshot_deserializes_null_prices() {
        let value = serde_json::json!({
            "prices": {
                "0x49d36570d4e46f48e99674bd3fcc84644ddd6b96f7c741b1562b82f9e004dc7": 3200.5,
                "0x4718f5a0fc34cc1af16a1cdee98ffb20c31f5cd61d6ab07201858f4287c938d": null
            }
        });
        let snapshot: PriceSnapshot = serde_json::from_value(value).unwrap();
        assert_eq!(snapshot.prices.get(&ETH), Some(&Some(3200.5)));
        assert_eq!(snapshot.prices.get(&STRK), Some(&None));
    }
}
