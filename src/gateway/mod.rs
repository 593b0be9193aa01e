//! Strategy gateway client
//!
//! The strategy SDK runs behind an HTTP gateway. This module provides the
//! shared transport plus one adapter per SDK boundary trait:
//! - [`GatewayPricer`] for [`crate::sdk::Pricer`]
//! - [`GatewayStrategy`] for [`crate::sdk::YieldStrategy`]
//! - [`GatewayAccount`] for [`crate::sdk::ChainAccount`]

mod account;
mod pricer;
mod strategy;

pub use account::GatewayAccount;
pub use pricer::GatewayPricer;
pub use strategy::GatewayStrategy;

use crate::config::GatewayConfig;
use crate::{Error, Result};
use reqwest::{Client, RequestBuilder};
use secrecy::{ExposeSecret, SecretString};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::time::Duration;
use url::Url;

/// HTTP transport to the strategy gateway
pub struct GatewayClient {
    client: Client,
    base: Url,
    api_key: Option<SecretString>,
}

impl GatewayClient {
    pub fn new(config: &GatewayConfig, api_key: Option<SecretString>) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()?;

        // Url::join drops the last segment unless the base ends with '/'
        let mut base = config.base_url()?;
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }

        Ok(Self {
            client,
            base,
            api_key,
        })
    }

    fn endpoint(&self, path: &str) -> Result<Url> {
        self.base
            .join(path)
            .map_err(|e| Error::Config(format!("Invalid gateway path {}: {}", path, e)))
    }

    pub(crate) async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let url = self.endpoint(path)?;
        tracing::debug!(%url, "GET");
        let response = self.send(self.client.get(url)).await?;
        Ok(response.json().await?)
    }

    pub(crate) async fn post<B, T>(&self, path: &str, body: &B) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let url = self.endpoint(path)?;
        tracing::debug!(%url, "POST");
        let response = self.send(self.client.post(url).json(body)).await?;
        Ok(response.json().await?)
    }

    /// POST whose response body is ignored
    pub(crate) async fn post_empty<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> Result<()> {
        let url = self.endpoint(path)?;
        tracing::debug!(%url, "POST");
        self.send(self.client.post(url).json(body)).await?;
        Ok(())
    }

    async fn send(&self, request: RequestBuilder) -> Result<reqwest::Response> {
        let request = match &self.api_key {
            Some(key) => request.bearer_auth(key.expose_secret()),
            None => request,
        };

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(Error::Gateway {
                status: status.as_u16(),
                body,
            });
        }
        Ok(response)
    }
}


#[cfg(test)]
mod tests {
    use super::test_support::client_for;
    use super::*;
    use serde_json::{json, Value};
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn non_success_status_maps_to_gateway_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v1/strategies/vesu_fusion_strk/apy"))
            .respond_with(ResponseTemplate::new(503).set_body_string("pricer offline"))
            .mount(&server)
            .await;

        let client = client_for(&server, None);
        let err = client
            .get::<Value>("v1/strategies/vesu_fusion_strk/apy")
            .await
            .unwrap_err();
        match err {
            Error::Gateway { status, body } => {
                assert_eq!(status, 503);
                assert_eq!(body, "pricer offline");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn api_key_sent_as_bearer() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v1/echo"))
            .and(header("authorization", "Bearer s3cret"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "ok": true })))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server, Some("s3cret"));
        let value: Value = client.post("v1/echo", &json!({})).await.unwrap();
        assert_eq!(value["ok"], true);
    }

    #[tokio::test]
    async fn base_path_is_preserved() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/v1/pricer/prices"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "prices": {} })))
            .expect(1)
            .mount(&server)
            .await;

        let config = GatewayConfig {
            url: format!("{}/api", server.uri()),
            request_timeout_secs: 5,
        };
        let client = GatewayClient::new(&config, None).unwrap();
        let value: Value = client.get("v1/pricer/prices").await.unwrap();
        assert_eq!(value, json!({ "prices": {} }));
    }
}
