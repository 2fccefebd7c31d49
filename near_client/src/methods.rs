use serde::Serialize;

use crate::codec::{decode_bytes, encode_args};
use crate::errors::{RpcError, RpcResult};
use crate::transport::{HttpTransport, Transport};

pub const RPC_CLIENT_TARGET: &str = "near_client";

/// Raw return value of a view call holding an empty vector: the bytes of `[]`.
pub const EMPTY_LIST_BYTES: [u8; 2] = [91, 93];
pub const EMPTY_LIST: &str = "[]";
/// Returned by [`ViewClient::call_or_empty`] when a call fails.
pub const EMPTY_OBJECT: &str = "{}";

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct RpcEnvelope {
    pub jsonrpc: &'static str,
    pub id: &'static str,
    pub method: &'static str,
    pub params: CallFunctionParams,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct CallFunctionParams {
    pub request_type: &'static str,
    pub finality: &'static str,
    pub account_id: String,
    pub method_name: String,
    pub args_base64: String,
}

/// Client for read-only `call_function` queries against a single contract.
#[derive(Clone, Debug)]
pub struct ViewClient<T = HttpTransport> {
    transport: T,
    server_addr: url::Url,
    contract_account_id: String,
}

impl ViewClient<HttpTransport> {
    pub fn connect(server_addr: url::Url, contract_account_id: String) -> Self {
        ViewClient::new(HttpTransport::new(), server_addr, contract_account_id)
    }
}

impl<T: Transport> ViewClient<T> {
    pub fn new(transport: T, server_addr: url::Url, contract_account_id: String) -> Self {
        ViewClient {
            transport,
            server_addr,
            contract_account_id,
        }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn envelope(&self, method_name: &str, args: &serde_json::Value) -> RpcEnvelope {
        RpcEnvelope {
            jsonrpc: "2.0",
            id: "dontcare",
            method: "query",
            params: CallFunctionParams {
                request_type: "call_function",
                finality: "final",
                account_id: self.contract_account_id.clone(),
                method_name: method_name.to_string(),
                args_base64: encode_args(args),
            },
        }
    }

    /// Calls a view method and returns its result as text.
    pub async fn call(&self, method_name: &str, args: &serde_json::Value) -> RpcResult<String> {
        let body = serde_json::to_value(self.envelope(method_name, args))
            .map_err(|e| RpcError::InvalidArgs(e.to_string()))?;
        tracing::debug!(target: RPC_CLIENT_TARGET, "Calling view method {} with {}", method_name, args);

        let response = self.transport.post(&self.server_addr, body).await?;
        let raw = extract_result(&response)?;
        if raw == EMPTY_LIST_BYTES {
            return Ok(EMPTY_LIST.to_string());
        }
        decode_bytes(raw)
    }

    /// Same as [`ViewClient::call`] but never fails: any error yields `"{}"`.
    pub async fn call_or_empty(&self, method_name: &str, args: &serde_json::Value) -> String {
        match self.call(method_name, args).await {
            Ok(result) => result,
            Err(err) => {
                tracing::warn!(target: RPC_CLIENT_TARGET, "View method {} failed: {}", method_name, err);
                EMPTY_OBJECT.to_string()
            }
        }
    }
}

/// Pulls the contract's raw return bytes out of `result.result`.
pub fn extract_result(response: &serde_json::Value) -> RpcResult<Vec<u8>> {
    if let Some(error) = response.get("error") {
        return Err(RpcError::Node(error.clone()));
    }
    let bytes = response
        .get("result")
        .and_then(|result| result.get("result"))
        .and_then(|result| result.as_array())
        .ok_or_else(|| RpcError::MalformedResponse("missing result.result".to_string()))?;

    bytes
        .iter()
        .map(|byte| {
            byte.as_u64()
                .and_then(|byte| u8::try_from(byte).ok())
                .ok_or_else(|| RpcError::MalformedResponse(format!("{} is not a byte", byte)))
        })
        .collect()
}

/// Collapses the node's spellings of an empty collection to `[]`.
pub fn normalize_empty(text: String) -> String {
    let trimmed = text.trim();
    let is_empty_list = match trimmed.strip_prefix('[').and_then(|t| t.strip_suffix(']')) {
        Some(inner) => inner.trim().is_empty(),
        None => trimmed == "\"[]\"",
    };
    if is_empty_list {
        EMPTY_LIST.to_string()
    } else {
        text
    }
}
