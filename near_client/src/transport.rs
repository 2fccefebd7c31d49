use crate::errors::RpcResult;

/// Sends one JSON-RPC body to a node and returns the parsed JSON response.
#[async_trait::async_trait]
pub trait Transport: Send + Sync {
    async fn post(&self, server_addr: &url::Url, body: serde_json::Value) -> RpcResult<serde_json::Value>;
}

/// Plain HTTP transport. Timeouts are whatever reqwest defaults to.
#[derive(Clone, Debug, Default)]
pub struct HttpTransport {
    client: reqwest::Client,
}

impl HttpTransport {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait::async_trait]
impl Transport for HttpTransport {
    async fn post(&self, server_addr: &url::Url, body: serde_json::Value) -> RpcResult<serde_json::Value> {
        let response = self
            .client
            .post(server_addr.clone())
            .json(&body)
            .send()
            .await?
            .error_for_status()?;
        Ok(response.json::<serde_json::Value>().await?)
    }
}
