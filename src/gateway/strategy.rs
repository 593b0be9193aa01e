use super::GatewayClient;
use crate::sdk::YieldStrategy;
use crate::strategies::StrategyDescriptor;
use crate::types::{self, Call, ChangeSet, ContractAddr, PoolInfo, PositionSet, RebalancePlan, Tvl};
use crate::Result;
use alloy::primitives::U256;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

#[derive(Deserialize)]
struct ApyResponse {
    apy: f64,
}

#[derive(Deserialize)]
struct CallsResponse {
    calls: Vec<Call>,
}

#[derive(Deserialize)]
struct PoolsResponse {
    pools: Vec<PoolInfo>,
}

#[derive(Serialize)]
struct PositionsRequest<'a> {
    positions: &'a PositionSet,
}

#[derive(Serialize)]
struct ChangesRequest<'a> {
    changes: &'a ChangeSet,
}

#[derive(Serialize)]
struct DepositRequest {
    #[serde(with = "types::amount")]
    amount: U256,
    receiver: ContractAddr,
}

/// A strategy instance hosted by the gateway
pub struct GatewayStrategy {
    client: Arc<GatewayClient>,
    descriptor: &'static StrategyDescriptor,
}

impl GatewayStrategy {
    pub fn new(client: Arc<GatewayClient>, descriptor: &'static StrategyDescriptor) -> Self {
        Self { client, descriptor }
    }

    fn path(&self, suffix: &str) -> String {
        format!("v1/strategies/{}/{}", self.descriptor.id, suffix)
    }
}

#[async_trait]
impl YieldStrategy for GatewayStrategy {
    fn descriptor(&self) -> &StrategyDescriptor {
        self.descriptor
    }

    async fn net_apy(&self) -> Result<f64> {
        let response: ApyResponse = self.client.get(&self.path("apy")).await?;
        Ok(response.apy)
    }

    async fn rebalanced_positions(&self) -> Result<RebalancePlan> {
        self.client.get(&self.path("rebalance")).await
    }

    async fn net_apy_given_positions(&self, positions: &PositionSet) -> Result<f64> {
        let response: ApyResponse = self
            .client
            .post(&self.path("apy"), &PositionsRequest { positions })
            .await?;
        Ok(response.apy)
    }

    async fn rebalance_call(&self, changes: &ChangeSet) -> Result<Vec<Call>> {
        let response: CallsResponse = self
            .client
            .post(&self.path("rebalance-call"), &ChangesRequest { changes })
            .await?;
        Ok(response.calls)
    }

    async fn deposit_call(&self, amount: U256, receiver: ContractAddr) -> Result<Vec<Call>> {
        let response: CallsResponse = self
            .client
            .post(&self.path("deposit-call"), &DepositRequest { amount, receiver })
            .await?;
        Ok(response.calls)
    }

    async fn tvl(&self) -> Result<Tvl> {
        self.client.get(&self.path("tvl")).await
    }

    async fn user_tvl(&self, user: ContractAddr) -> Result<Tvl> {
        self.client.get(&self.path(&format!("tvl/{}", user))).await
    }

    async fn pools(&self) -> Result<Vec<PoolInfo>> {
        let response: PoolsResponse = self.client.get(&self.path("pools")).await?;
        Ok(response.pools)
    }
}
