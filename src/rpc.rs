//! Starknet JSON-RPC confirmation waiter

use crate::config::{ConfirmationSettings, RpcConfig};
use crate::sdk::{RpcProvider, TransactionReceipt};
use crate::types::{TransactionStatus, TxHash};
use crate::{Error, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use serde_json::json;
use std::time::Duration;
use tracing::{debug, info};

/// `TXN_HASH_NOT_FOUND`: the node has not seen the transaction yet
const TXN_HASH_NOT_FOUND: i64 = 29;

#[derive(Debug, Deserialize)]
struct RpcResponse {
    result: Option<StatusResult>,
    error: Option<RpcErrorObject>,
}

#[derive(Debug, Deserialize)]
struct RpcErrorObject {
    code: i64,
    message: String,
}

#[derive(Debug, Deserialize)]
struct StatusResult {
    finality_status: TransactionStatus,
    #[serde(default)]
    execution_status: Option<TransactionStatus>,
    #[serde(default)]
    failure_reason: Option<String>,
}

enum Poll {
    Pending,
    Done(StatusResult),
}

/// Polls `starknet_getTransactionStatus` until the transaction settles
pub struct StarknetRpc {
    client: Client,
    url: String,
    poll_interval: Duration,
    max_attempts: Option<u32>,
}

impl StarknetRpc {
    pub fn new(config: &RpcConfig, settings: &ConfirmationSettings) -> Self {
        Self {
            client: Client::new(),
            url: config.url().to_string(),
            poll_interval: settings.poll_interval(),
            max_attempts: settings.max_attempts,
        }
    }

    async fn poll_status(&self, hash: TxHash) -> Result<Poll> {
        let request = json!({
            "jsonrpc": "2.0",
            "id": 1,
            "method": "starknet_getTransactionStatus",
            "params": { "transaction_hash": hash },
        });

        let response: RpcResponse = self
            .client
            .post(&self.url)
            .json(&request)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        match (response.result, response.error) {
            (Some(result), _) => Ok(Poll::Done(result)),
            (None, Some(error)) if error.code == TXN_HASH_NOT_FOUND => Ok(Poll::Pending),
            (None, Some(error)) => Err(Error::Rpc(format!(
                "starknet_getTransactionStatus failed ({}): {}",
                error.code, error.message
            ))),
            (None, None) => Err(Error::Rpc(
                "starknet_getTransactionStatus returned neither result nor error".to_string(),
            )),
        }
    }
}

fn is_success(status: &StatusResult, success_states: &[TransactionStatus]) -> bool {
    let accepted =
        |s: TransactionStatus| s != TransactionStatus::Unknown && success_states.contains(&s);
    accepted(status.finality_status) || status.execution_status.is_some_and(accepted)
}

fn rejection(status: &StatusResult) -> Option<String> {
    let failed = status.finality_status == TransactionStatus::Rejected
        || status.execution_status == Some(TransactionStatus::Reverted);
    failed.then(|| {
        status.failure_reason.clone().unwrap_or_else(|| {
            if status.finality_status == TransactionStatus::Rejected {
                "REJECTED".to_string()
            } else {
                "REVERTED".to_string()
            }
        })
    })
}

#[async_trait]
impl RpcProvider for StarknetRpc {
    async fn wait_for_transaction(
        &self,
        hash: TxHash,
        success_states: &[TransactionStatus],
    ) -> Result<TransactionReceipt> {
        let mut attempts: u32 = 0;

        loop {
            attempts += 1;
            match self.poll_status(hash).await? {
                Poll::Done(status) if is_success(&status, success_states) => {
                    info!(%hash, finality = ?status.finality_status, "Transaction confirmed");
                    return Ok(TransactionReceipt {
                        transaction_hash: hash,
                        finality_status: status.finality_status,
                        execution_status: status.execution_status,
                    });
                }
                Poll::Done(status) => {
                    if let Some(reason) = rejection(&status) {
                        return Err(Error::TransactionRejected {
                            hash: hash.to_string(),
                            reason,
                        });
                    }
                    debug!(%hash, finality = ?status.finality_status, attempts, "Transaction pending");
                }
                Poll::Pending => debug!(%hash, attempts, "Transaction not yet known to node"),
            }

            if self.max_attempts.is_some_and(|max| attempts >= max) {
                return Err(Error::Rpc(format!(
                    "Transaction {} not confirmed after {} attempts",
                    hash, attempts
                )));
            }
            tokio::time::sleep(self.poll_interval).await;
        }
    }
}
