use super::GatewayClient;
use crate::sdk::ChainAccount;
use crate::types::{Call, ContractAddr, TxHandle};
use crate::Result;
use async_trait::async_trait;
use serde::Serialize;
use std::sync::Arc;
use tracing::info;

#[derive(Serialize)]
struct ExecuteRequest<'a> {
    calls: &'a [Call],
}

/// Account whose key is held by the gateway under `name`
pub struct GatewayAccount {
    client: Arc<GatewayClient>,
    name: String,
    address: ContractAddr,
}

impl GatewayAccount {
    pub fn new(client: Arc<GatewayClient>, name: impl Into<String>, address: ContractAddr) -> Self {
        Self {
            client,
            name: name.into(),
            address,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

#[async_trait]
impl ChainAccount for GatewayAccount {
    fn address(&self) -> ContractAddr {
        self.address
    }

    async fn execute(&self, calls: &[Call]) -> Result<TxHandle> {
        info!(account = %self.name, calls = calls.len(), "Executing calls");
        self.client
            .post(
                &format!("v1/accounts/{}/execute", self.name),
                &ExecuteRequest { calls },
            )
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::{RELAYER, VESU_SINGLETON};
    use crate::gateway::test_support::client_for;
    use crate::types::TxHash;
    use crate::Error;
    use serde_json::json;
    use wiremock::matchers::{body_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn rebalance_call() -> Call {
        Call {
            contract_address: VESU_SINGLETON,
            entrypoint: "rebalance".to_string(),
            calldata: vec!["0x1".to_string()],
        }
    }

    #[tokio::test]
    async fn execute_returns_transaction_hash() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/accounts/risk-manager/execute"))
            .and(header("authorization", "Bearer key"))
            .and(body_json(json!({
                "calls": [{
                    "contract_address": VESU_SINGLETON.to_string(),
                    "entrypoint": "rebalance",
                    "calldata": ["0x1"]
                }]
            })))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({ "transaction_hash": "0x5eed" })),
            )
            .expect(1)
            .mount(&server)
            .await;

        let account = GatewayAccount::new(client_for(&server, Some("key")), "risk-manager", RELAYER);
        let handle = account.execute(&[rebalance_call()]).await.unwrap();
        assert_eq!(handle.transaction_hash, "0x5eed".parse::<TxHash>().unwrap());
        assert_eq!(account.address(), RELAYER);
        assert_eq!(account.name(), "risk-manager");
    }

    #[tokio::test]
    async fn unauthorized_is_gateway_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/accounts/risk-manager/execute"))
            .respond_with(ResponseTemplate::new(401).set_body_string("bad key"))
            .mount(&server)
            .await;

        let account = GatewayAccount::new(client_for(&server, None), "risk-manager", RELAYER);
        let result = account.execute(&[rebalance_call()]).await;
        assert!(matches!(result, Err(Error::Gateway { status: 401, .. })));
    }
}
