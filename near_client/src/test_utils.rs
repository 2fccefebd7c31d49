use std::collections::HashMap;
use std::sync::Mutex;

use crate::codec::decode_args;
use crate::errors::{RpcError, RpcResult};
use crate::transport::Transport;

pub const CONTRACT_ACCOUNT_ID: &str = "4bb5d093c0c0e1b4874c41216cdabc5ef1c81c5535b25788202f2a8ce145a7d7";
pub const PRODUCER_ACCOUNT: &str = "prod_droplinked.testnet";
pub const PUBLISHER_ACCOUNT: &str = "pub_droplinked.testnet";
pub const CUSTOMER_ACCOUNT: &str = "cust_droplinked.testnet";

pub fn get_server_addr() -> url::Url {
    url::Url::parse("https://archival-rpc.testnet.near.org/").unwrap()
}

/// A successful `query` response carrying `bytes` as the contract result.
pub fn contract_response(bytes: &[u8]) -> serde_json::Value {
    serde_json::json!({
        "jsonrpc": "2.0",
        "id": "dontcare",
        "result": {
            "result": bytes,
            "logs": [],
            "block_height": 1,
            "block_hash": "11111111111111111111111111111111",
        }
    })
}

pub enum MockReply {
    /// Raw contract return bytes.
    Bytes(Vec<u8>),
    /// Full JSON-RPC response body.
    Raw(serde_json::Value),
    /// Transport level failure.
    Fail(String),
}

impl MockReply {
    /// Contract result that serializes `value` as JSON.
    pub fn json(value: serde_json::Value) -> Self {
        MockReply::Bytes(value.to_string().into_bytes())
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct RecordedCall {
    pub method_name: String,
    pub args: serde_json::Value,
}

type Handler = Box<dyn Fn(&serde_json::Value) -> MockReply + Send + Sync>;

/// In-memory node answering `call_function` queries by method name.
///
/// Methods without a handler fail as if the node were unreachable.
#[derive(Default)]
pub struct MockTransport {
    handlers: HashMap<String, Handler>,
    calls: Mutex<Vec<RecordedCall>>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn on<F>(mut self, method_name: &str, handler: F) -> Self
    where
        F: Fn(&serde_json::Value) -> MockReply + Send + Sync + 'static,
    {
        self.handlers.insert(method_name.to_string(), Box::new(handler));
        self
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap().clone()
    }

    /// Arguments of every call made to `method_name`, in call order.
    pub fn calls_to(&self, method_name: &str) -> Vec<serde_json::Value> {
        self.calls()
            .into_iter()
            .filter(|call| call.method_name == method_name)
            .map(|call| call.args)
            .collect()
    }

    fn reply(&self, body: &serde_json::Value) -> RpcResult<serde_json::Value> {
        let params = &body["params"];
        let method_name = params["method_name"]
            .as_str()
            .ok_or_else(|| RpcError::MalformedResponse("request without method_name".to_string()))?;
        let args = decode_args(params["args_base64"].as_str().unwrap_or_default())?;
        self.calls.lock().unwrap().push(RecordedCall {
            method_name: method_name.to_string(),
            args: args.clone(),
        });

        let handler = self
            .handlers
            .get(method_name)
            .ok_or_else(|| RpcError::Transport(format!("no handler for {}", method_name)))?;
        match handler(&args) {
            MockReply::Bytes(bytes) => Ok(contract_response(&bytes)),
            MockReply::Raw(response) => Ok(response),
            MockReply::Fail(reason) => Err(RpcError::Transport(reason)),
        }
    }
}

#[async_trait::async_trait]
impl Transport for MockTransport {
    async fn post(&self, _server_addr: &url::Url, body: serde_json::Value) -> RpcResult<serde_json::Value> {
        self.reply(&body)
    }
}
