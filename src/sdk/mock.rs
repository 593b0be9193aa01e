//! Recording test doubles for the SDK boundary

use super::{ChainAccount, Pricer, RpcProvider, TransactionReceipt, YieldStrategy};
use crate::strategies::{self, StrategyDescriptor};
use crate::types::{
    Call, ChangeSet, ContractAddr, PoolInfo, Position, PositionChange, PositionSet, RebalancePlan,
    TransactionStatus, Tvl, TxHandle, TxHash,
};
use crate::{constants, Error, Result};
use alloy::primitives::U256;
use async_trait::async_trait;
use std::sync::{Arc, Mutex};

/// Ordered record of boundary calls shared by all mocks of one scenario
#[derive(Debug, Default)]
pub(crate) struct CallLog(Mutex<Vec<String>>);

impl CallLog {
    pub fn record(&self, name: &str) {
        self.0.lock().unwrap().push(name.to_string());
    }

    pub fn entries(&self) -> Vec<String> {
        self.0.lock().unwrap().clone()
    }

    pub fn count(&self, name: &str) -> usize {
        self.0.lock().unwrap().iter().filter(|e| *e == name).count()
    }
}

#[derive(Debug, Clone, Copy)]
pub(crate) enum Readiness {
    Ready,
    Fails,
    Never,
}

pub(crate) struct MockPricer {
    log: Arc<CallLog>,
    readiness: Readiness,
}

impl MockPricer {
    pub fn new(log: Arc<CallLog>, readiness: Readiness) -> Self {
        Self { log, readiness }
    }
}

#[async_trait]
impl Pricer for MockPricer {
    async fn start(&self) -> Result<()> {
        self.log.record("pricer.start");
        Ok(())
    }

    async fn wait_till_ready(&self) -> Result<()> {
        self.log.record("pricer.wait_till_ready");
        match self.readiness {
            Readiness::Ready => Ok(()),
            Readiness::Fails => Err(Error::PricerNotReady {
                missing: vec!["STRK".to_string()],
            }),
            Readiness::Never => std::future::pending::<Result<()>>().await,
        }
    }
}

pub(crate) fn pool(n: u64) -> ContractAddr {
    ContractAddr::new(U256::from(n))
}

/// One withdrawal from pool 1 into pool 2
pub(crate) fn sample_plan() -> RebalancePlan {
    RebalancePlan {
        changes: ChangeSet::new(vec![
            PositionChange {
                pool_id: pool(1),
                change_amount: U256::from(400),
                final_amount: U256::from(600),
                is_deposit: false,
            },
            PositionChange {
                pool_id: pool(2),
                change_amount: U256::from(400),
                final_amount: U256::from(400),
                is_deposit: true,
            },
        ]),
        final_positions: PositionSet::new(vec![
            Position {
                pool_id: pool(1),
                amount: U256::from(600),
            },
            Position {
                pool_id: pool(2),
                amount: U256::from(400),
            },
        ]),
    }
}

pub(crate) struct MockStrategy {
    log: Arc<CallLog>,
    descriptor: StrategyDescriptor,
    pub current_apy: f64,
    pub projected_apy: f64,
    pub plan: RebalancePlan,
    pub rebalance_changes: Mutex<Vec<ChangeSet>>,
    pub priced_positions: Mutex<Vec<PositionSet>>,
    pub deposits: Mutex<Vec<(U256, ContractAddr)>>,
}

impl MockStrategy {
    pub fn new(log: Arc<CallLog>, current_apy: f64, projected_apy: f64) -> Self {
        Self {
            log,
            descriptor: *strategies::default_strategy(),
            current_apy,
            projected_apy,
            plan: sample_plan(),
            rebalance_changes: Mutex::new(Vec::new()),
            priced_positions: Mutex::new(Vec::new()),
            deposits: Mutex::new(Vec::new()),
        }
    }

    pub fn with_plan(mut self, plan: RebalancePlan) -> Self {
        self.plan = plan;
        self
    }

    pub fn with_descriptor(mut self, descriptor: StrategyDescriptor) -> Self {
        self.descriptor = descriptor;
        self
    }

    pub fn rebalance_call_for(changes: &ChangeSet) -> Call {
        Call {
            contract_address: constants::VESU_SINGLETON,
            entrypoint: "rebalance".to_string(),
            calldata: vec![changes.len().to_string()],
        }
    }
}

#[async_trait]
impl YieldStrategy for MockStrategy {
    fn descriptor(&self) -> &StrategyDescriptor {
        &self.descriptor
    }

    async fn net_apy(&self) -> Result<f64> {
        self.log.record("strategy.net_apy");
        Ok(self.current_apy)
    }

    async fn rebalanced_positions(&self) -> Result<RebalancePlan> {
        self.log.record("strategy.rebalanced_positions");
        Ok(self.plan.clone())
    }

    async fn net_apy_given_positions(&self, positions: &PositionSet) -> Result<f64> {
        self.log.record("strategy.net_apy_given_positions");
        self.priced_positions.lock().unwrap().push(positions.clone());
        Ok(self.projected_apy)
    }

    async fn rebalance_call(&self, changes: &ChangeSet) -> Result<Vec<Call>> {
        self.log.record("strategy.rebalance_call");
        self.rebalance_changes.lock().unwrap().push(changes.clone());
        Ok(vec![Self::rebalance_call_for(changes)])
    }

    async fn deposit_call(&self, amount: U256, receiver: ContractAddr) -> Result<Vec<Call>> {
        self.log.record("strategy.deposit_call");
        self.deposits.lock().unwrap().push((amount, receiver));
        Ok(vec![Call {
            contract_address: constants::VESU_SINGLETON,
            entrypoint: "deposit".to_string(),
            calldata: vec![amount.to_string(), receiver.to_string()],
        }])
    }

    async fn tvl(&self) -> Result<Tvl> {
        self.log.record("strategy.tvl");
        Ok(Tvl {
            amount: self.plan.final_positions.total(),
            usd_value: 450.0,
        })
    }

    async fn user_tvl(&self, _user: ContractAddr) -> Result<Tvl> {
        self.log.record("strategy.user_tvl");
        Ok(Tvl {
            amount: U256::from(100),
            usd_value: 45.0,
        })
    }

    async fn pools(&self) -> Result<Vec<PoolInfo>> {
        self.log.record("strategy.pools");
        Ok(self
            .plan
            .final_positions
            .iter()
            .map(|p| PoolInfo {
                pool_id: p.pool_id,
                pool_name: None,
                v_token: None,
                max_weight: 1.0,
                current_weight: 0.5,
                apy: self.current_apy,
                amount: p.amount,
                usd_value: 0.0,
            })
            .collect())
    }
}

pub(crate) struct MockAccount {
    log: Arc<CallLog>,
    address: ContractAddr,
    hash: TxHash,
    pub executed: Mutex<Vec<Vec<Call>>>,
}

impl MockAccount {
    pub fn new(log: Arc<CallLog>) -> Self {
        Self {
            log,
            address: constants::RELAYER,
            hash: TxHash::new(U256::from(0xabcdu64)),
            executed: Mutex::new(Vec::new()),
        }
    }

    pub fn hash(&self) -> TxHash {
        self.hash
    }
}

#[async_trait]
impl ChainAccount for MockAccount {
    fn address(&self) -> ContractAddr {
        self.address
    }

    async fn execute(&self, calls: &[Call]) -> Result<TxHandle> {
        self.log.record("account.execute");
        self.executed.lock().unwrap().push(calls.to_vec());
        Ok(TxHandle {
            transaction_hash: self.hash,
        })
    }
}

pub(crate) struct MockRpc {
    log: Arc<CallLog>,
    reverts: bool,
    pub waited: Mutex<Vec<(TxHash, Vec<TransactionStatus>)>>,
}

impl MockRpc {
    pub fn new(log: Arc<CallLog>) -> Self {
        Self {
            log,
            reverts: false,
            waited: Mutex::new(Vec::new()),
        }
    }

    pub fn reverting(log: Arc<CallLog>) -> Self {
        Self {
            reverts: true,
            ..Self::new(log)
        }
    }
}

#[async_trait]
impl RpcProvider for MockRpc {
    async fn wait_for_transaction(
        &self,
        hash: TxHash,
        success_states: &[TransactionStatus],
    ) -> Result<TransactionReceipt> {
        self.log.record("rpc.wait_for_transaction");
        self.waited
            .lock()
            .unwrap()
            .push((hash, success_states.to_vec()));

        if self.reverts {
            return Err(Error::TransactionRejected {
                hash: hash.to_string(),
                reason: "REVERTED".to_string(),
            });
        }

        Ok(TransactionReceipt {
            transaction_hash: hash,
            finality_status: TransactionStatus::AcceptedOnL2,
            execution_status: Some(TransactionStatus::Succeeded),
        })
    }
}
