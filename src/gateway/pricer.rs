use super::GatewayClient;
use crate::sdk::{PriceSnapshot, Pricer};
use crate::tokens::registry;
use crate::types::ContractAddr;
use crate::{Error, Result};
use async_trait::async_trait;
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::Instant;
use tracing::debug;

#[derive(Serialize)]
struct StartRequest<'a> {
    tokens: &'a [ContractAddr],
}

/// Gateway-backed pricer that polls until every feed has a price
pub struct GatewayPricer {
    client: Arc<GatewayClient>,
    tokens: Vec<ContractAddr>,
    poll_interval: Duration,
    ready_timeout: Option<Duration>,
}

impl GatewayPricer {
    /// Pricer over the registry's price feed tokens
    pub fn new(client: Arc<GatewayClient>, poll_interval: Duration) -> Self {
        Self {
            client,
            tokens: registry().price_feed_tokens().to_vec(),
            poll_interval,
            ready_timeout: None,
        }
    }

    pub fn with_tokens(mut self, tokens: Vec<ContractAddr>) -> Self {
        self.tokens = tokens;
        self
    }

    /// Fail readiness after `timeout`; `None` waits forever
    pub fn with_ready_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.ready_timeout = timeout;
        self
    }

    async fn snapshot(&self) -> Result<PriceSnapshot> {
        self.client.get("v1/pricer/prices").await
    }
}

fn symbols(tokens: &[&ContractAddr]) -> Vec<String> {
    tokens
        .iter()
        .map(|addr| match registry().get(addr) {
            Some(info) => info.symbol.to_string(),
            None => addr.to_string(),
        })
        .collect()
}

#[async_trait]
impl Pricer for GatewayPricer {
    async fn start(&self) -> Result<()> {
        debug!(tokens = self.tokens.len(), "Starting pricer");
        self.client
            .post_empty(
                "v1/pricer/start",
                &StartRequest {
                    tokens: &self.tokens,
                },
            )
            .await
    }

    async fn wait_till_ready(&self) -> Result<()> {
        let deadline = self.ready_timeout.map(|timeout| Instant::now() + timeout);

        loop {
            let snapshot = self.snapshot().await?;
            let missing = snapshot.missing(&self.tokens);
            if missing.is_empty() {
                return Ok(());
            }

            let missing = symbols(&missing);
            if deadline.is_some_and(|deadline| Instant::now() >= deadline) {
                return Err(Error::PricerNotReady { missing });
            }
            debug!(?missing, "Waiting for price feeds");
            tokio::time::sleep(self.poll_interval).await;
        }
    }
}
