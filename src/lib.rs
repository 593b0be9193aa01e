//! Vesu Rebalance Trigger
//!
//! Checks whether a Vesu lending strategy on Starknet would earn more after
//! reallocating across its pools and, if so, submits the rebalance:
//! - Waits for the strategy pricer to have every price feed
//! - Compares current net APY with the APY of the proposed allocation
//! - Rebalances only when the gain beats a configured margin
//! - Waits for the ledger to confirm the transaction
//!
//! # Boundary
//!
//! Pricing, allocation and signing live in the strategy SDK, reached through
//! the traits in [`sdk`]. [`gateway`] implements them over HTTP and [`rpc`]
//! implements confirmation over Starknet JSON-RPC.

pub mod audit;
pub mod config;
pub mod constants;
pub mod gateway;
pub mod roles;
pub mod rpc;
pub mod sdk;
pub mod strategies;
pub mod tokens;
pub mod trigger;
pub mod types;

mod error;

// Re-export commonly used types
pub use config::{Config, RpcConfig};
pub use error::{Error, Result};
pub use trigger::{decide, Decision, HoldReason, RebalanceReport, RebalanceTrigger, RunOptions};
pub use types::{ChangeSet, ContractAddr, PositionSet, TxHash};
