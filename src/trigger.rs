//! Rebalance trigger
//!
//! Runs the strategy pipeline once, in order:
//! 1. start the pricer and wait for every feed
//! 2. read the current net APY
//! 3. ask the strategy for its reallocation and price it
//! 4. submit the rebalance only if the projected APY beats the current one
//!    by more than the configured margin and the change set moves funds
//! 5. wait for the ledger to confirm
//!
//! Every failure propagates to the caller; nothing is retried here. Re-running
//! is safe because steps 1-3 are reads.

use crate::sdk::{ChainAccount, Pricer, RpcProvider, TransactionReceipt, YieldStrategy};
use crate::tokens::registry;
use crate::types::{Call, ChangeSet, ContractAddr, PoolInfo, TransactionStatus, Tvl, TxHash};
use crate::{Error, Result};
use alloy::primitives::U256;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::sync::Arc;
use tracing::{info, warn, Instrument};
use uuid::Uuid;

/// States that count as a confirmed transaction
pub const DEFAULT_SUCCESS_STATES: &[TransactionStatus] = &[TransactionStatus::Succeeded];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum HoldReason {
    /// Projected APY does not beat current APY by more than the margin
    InsufficientImprovement,
    /// The strategy proposed no movement of funds
    EmptyChangeSet,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "action", content = "reason")]
pub enum Decision {
    Rebalance,
    Hold(HoldReason),
}

/// Rebalance iff `projected > current + margin` and `changes` moves funds.
///
/// NaN on either side never rebalances.
pub fn decide(current_apy: f64, projected_apy: f64, margin: f64, changes: &ChangeSet) -> Decision {
    if !(projected_apy > current_apy + margin) {
        return Decision::Hold(HoldReason::InsufficientImprovement);
    }
    if changes.is_noop() {
        return Decision::Hold(HoldReason::EmptyChangeSet);
    }
    Decision::Rebalance
}

/// Per-run options for [`RebalanceTrigger::run`]
#[derive(Debug, Clone, Copy)]
pub struct RunOptions {
    /// Required APY gain over the current allocation
    pub min_apy_improvement: f64,
    /// Decide but never submit
    pub dry_run: bool,
}

/// Outcome of one rebalance run
#[derive(Debug, Clone, Serialize)]
pub struct RebalanceReport {
    pub run_id: Uuid,
    pub strategy: &'static str,
    pub started_at: DateTime<Utc>,
    pub current_apy: f64,
    pub projected_apy: f64,
    pub min_apy_improvement: f64,
    pub changes: ChangeSet,
    pub decision: Decision,
    pub dry_run: bool,
    pub transaction_hash: Option<TxHash>,
    pub receipt: Option<TransactionReceipt>,
}

#[derive(Debug, Clone, Serialize)]
pub struct DepositReport {
    pub strategy: &'static str,
    pub receiver: ContractAddr,
    #[serde(with = "crate::types::amount")]
    pub amount: U256,
    pub amount_formatted: String,
    pub transaction_hash: TxHash,
    pub receipt: TransactionReceipt,
}

#[derive(Debug, Clone, Serialize)]
pub struct TvlReport {
    pub strategy: &'static str,
    pub total: Tvl,
    pub total_formatted: String,
    pub user: ContractAddr,
    pub user_tvl: Tvl,
    pub user_formatted: String,
}

/// Drives one strategy through the SDK boundary
pub struct RebalanceTrigger {
    pricer: Arc<dyn Pricer>,
    strategy: Arc<dyn YieldStrategy>,
    account: Arc<dyn ChainAccount>,
    rpc: Arc<dyn RpcProvider>,
    success_states: Vec<TransactionStatus>,
}

impl RebalanceTrigger {
    pub fn new(
        pricer: Arc<dyn Pricer>,
        strategy: Arc<dyn YieldStrategy>,
        account: Arc<dyn ChainAccount>,
        rpc: Arc<dyn RpcProvider>,
    ) -> Self {
        Self {
            pricer,
            strategy,
            account,
            rpc,
            success_states: DEFAULT_SUCCESS_STATES.to_vec(),
        }
    }

    /// Override the states accepted as confirmation
    pub fn with_success_states(mut self, states: Vec<TransactionStatus>) -> Self {
        self.success_states = states;
        self
    }

    /// Run the rebalance pipeline once
    pub async fn run(&self, options: RunOptions) -> Result<RebalanceReport> {
        let run_id = Uuid::new_v4();
        let strategy_id = self.strategy.descriptor().id;
        let span = tracing::info_span!("rebalance", %run_id, strategy = strategy_id);

        self.run_inner(run_id, options).instrument(span).await
    }

    async fn run_inner(&self, run_id: Uuid, options: RunOptions) -> Result<RebalanceReport> {
        let started_at = Utc::now();
        let descriptor = self.strategy.descriptor();

        self.prepare_pricer().await?;

        let current_apy = self.strategy.net_apy().await?;
        info!(current_apy, "Net APY");

        let plan = self.strategy.rebalanced_positions().await?;
        info!(
            changes = plan.changes.len(),
            positions = plan.final_positions.len(),
            "Computed rebalanced positions"
        );
        for position in plan.final_positions.iter() {
            if !descriptor.allows_pool(&position.pool_id) {
                warn!(pool = %position.pool_id, "Proposed position outside strategy pool set");
            }
        }

        let projected_apy = self
            .strategy
            .net_apy_given_positions(&plan.final_positions)
            .await?;
        info!(projected_apy, "Projected APY");

        let decision = decide(
            current_apy,
            projected_apy,
            options.min_apy_improvement,
            &plan.changes,
        );
        info!(
            ?decision,
            improvement = projected_apy - current_apy,
            min_improvement = options.min_apy_improvement,
            "Rebalance decision"
        );

        let mut report = RebalanceReport {
            run_id,
            strategy: descriptor.id,
            started_at,
            current_apy,
            projected_apy,
            min_apy_improvement: options.min_apy_improvement,
            changes: plan.changes,
            decision,
            dry_run: options.dry_run,
            transaction_hash: None,
            receipt: None,
        };

        if decision != Decision::Rebalance {
            return Ok(report);
        }
        if options.dry_run {
            info!("Dry run - not submitting rebalance");
            return Ok(report);
        }

        info!("Rebalancing...");
        let calls = self.strategy.rebalance_call(&report.changes).await?;
        let receipt = self.submit_and_confirm(&calls).await?;
        info!(tx_hash = %receipt.transaction_hash, "Rebalanced");

        report.transaction_hash = Some(receipt.transaction_hash);
        report.receipt = Some(receipt);
        Ok(report)
    }

    /// Deposit `amount` (decimal, in asset units) into the strategy for the account
    pub async fn deposit(&self, amount: &str) -> Result<DepositReport> {
        let descriptor = self.strategy.descriptor();
        let raw = registry().parse_amount(&descriptor.asset, amount)?;
        if raw.is_zero() {
            return Err(Error::InvalidArgument(
                "Deposit amount must be positive".to_string(),
            ));
        }

        self.prepare_pricer().await?;

        let receiver = self.account.address();
        let calls = self.strategy.deposit_call(raw, receiver).await?;
        let receipt = self.submit_and_confirm(&calls).await?;
        info!(tx_hash = %receipt.transaction_hash, "Deposit done");

        Ok(DepositReport {
            strategy: descriptor.id,
            receiver,
            amount: raw,
            amount_formatted: registry().format_amount(&descriptor.asset, raw),
            transaction_hash: receipt.transaction_hash,
            receipt,
        })
    }

    /// Strategy TVL and the account's share of it
    pub async fn tvl(&self) -> Result<TvlReport> {
        let descriptor = self.strategy.descriptor();
        self.prepare_pricer().await?;

        let total = self.strategy.tvl().await?;
        let user = self.account.address();
        let user_tvl = self.strategy.user_tvl(user).await?;
        info!(total_usd = total.usd_value, user_usd = user_tvl.usd_value, "TVL");

        Ok(TvlReport {
            strategy: descriptor.id,
            total_formatted: registry().format_amount(&descriptor.asset, total.amount),
            total,
            user,
            user_formatted: registry().format_amount(&descriptor.asset, user_tvl.amount),
            user_tvl,
        })
    }

    /// Current per-pool allocation of the strategy
    pub async fn positions(&self) -> Result<Vec<PoolInfo>> {
        let descriptor = self.strategy.descriptor();
        self.prepare_pricer().await?;

        let pools = self.strategy.pools().await?;
        for pool in &pools {
            if !descriptor.allows_pool(&pool.pool_id) {
                warn!(pool = %pool.pool_id, "Strategy reports pool outside its pool set");
            }
        }
        info!(pools = pools.len(), "Fetched strategy pools");
        Ok(pools)
    }

    async fn prepare_pricer(&self) -> Result<()> {
        self.pricer.start().await?;
        self.pricer.wait_till_ready().await?;
        info!("Pricer ready");
        Ok(())
    }

    async fn submit_and_confirm(&self, calls: &[Call]) -> Result<TransactionReceipt> {
        let handle = self.account.execute(calls).await?;
        info!(tx_hash = %handle.transaction_hash, calls = calls.len(), "Transaction submitted");
        self.rpc
            .wait_for_transaction(handle.transaction_hash, &self.success_states)
            .await
    }
}
