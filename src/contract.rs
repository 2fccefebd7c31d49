use near_client::methods::normalize_empty;
use near_client::{RpcError, RpcResult, Transport, ViewClient};
use serde::de::DeserializeOwned;
use serde_json::{json, Value};

use crate::types::{Approved, Holder, RecordId, Request, TokenMetadata};

/// Typed view methods of the Droplinked contract.
pub struct DroplinkedContract<T> {
    client: ViewClient<T>,
}

impl<T: Transport> DroplinkedContract<T> {
    pub fn new(client: ViewClient<T>) -> Self {
        DroplinkedContract { client }
    }

    pub fn client(&self) -> &ViewClient<T> {
        &self.client
    }

    pub async fn get_holder(&self, holder_id: RecordId) -> RpcResult<Holder> {
        self.view_record("get_holder", json!({ "holder_id": holder_id }), "a holder object")
            .await
    }

    pub async fn get_owner_tokens(&self, account_id: &str) -> RpcResult<Vec<RecordId>> {
        let result = self
            .client
            .call("get_owner_tokens", &json!({ "account_id": account_id }))
            .await?;
        parse_id_list("get_owner_tokens", &result)
    }

    pub async fn get_token_metadata(&self, token_id: RecordId) -> RpcResult<TokenMetadata> {
        self.view_record("get_token_metadata", json!({ "token_id": token_id }), "token metadata")
            .await
    }

    pub async fn get_request(&self, request_id: RecordId) -> RpcResult<Request> {
        self.view_record("get_request", json!({ "request_id": request_id }), "a request object")
            .await
    }

    pub async fn get_publisher_requests(&self, publisher_account: &str) -> RpcResult<Vec<RecordId>> {
        self.view_list(
            "get_publisher_requests",
            json!({ "publisher_account": publisher_account }),
        )
        .await
    }

    pub async fn get_producer_requests(&self, producer_account: &str) -> RpcResult<Vec<RecordId>> {
        self.view_list(
            "get_producer_requests",
            json!({ "producer_account": producer_account }),
        )
        .await
    }

    pub async fn get_approved(&self, approved_id: RecordId) -> RpcResult<Approved> {
        self.view_record("get_approved", json!({ "approved_id": approved_id }), "an approval object")
            .await
    }

    pub async fn producers_approved(&self, producer_account: &str) -> RpcResult<Vec<RecordId>> {
        self.view_list(
            "producers_approved",
            json!({ "producer_account": producer_account }),
        )
        .await
    }

    pub async fn publishers_approved(&self, publisher_account: &str) -> RpcResult<Vec<RecordId>> {
        self.view_list(
            "publishers_approved",
            json!({ "publisher_account": publisher_account }),
        )
        .await
    }

    /// Account that deployed and administers the contract.
    pub async fn get_owner(&self) -> RpcResult<String> {
        let result = self.client.call("get_owner", &json!({})).await?;
        match serde_json::from_str::<Value>(&result)? {
            Value::String(owner) => Ok(owner),
            other => Err(RpcError::unexpected_shape("get_owner", "an account id", &other)),
        }
    }

    pub async fn get_token_id_by_hash(&self, hash: &str) -> RpcResult<Option<RecordId>> {
        let result = self
            .client
            .call("get_token_id_by_hash", &json!({ "hash": hash }))
            .await?;
        match serde_json::from_str::<Value>(&result)? {
            Value::Null => Ok(None),
            id => parse_id("get_token_id_by_hash", &id).map(Some),
        }
    }

    pub async fn get_token_hash_by_id(&self, token_id: RecordId) -> RpcResult<Option<String>> {
        let result = self
            .client
            .call("get_token_hash_by_id", &json!({ "token_id": token_id }))
            .await?;
        match serde_json::from_str::<Value>(&result)? {
            Value::Null => Ok(None),
            Value::String(hash) => Ok(Some(hash)),
            other => Err(RpcError::unexpected_shape("get_token_hash_by_id", "a hash", &other)),
        }
    }

    /// Calls any view method; results that are not JSON come back as a JSON string.
    pub async fn view_raw(&self, method_name: &str, args: &Value) -> RpcResult<Value> {
        let result = self.client.call(method_name, args).await?;
        Ok(serde_json::from_str(&result).unwrap_or(Value::String(result)))
    }

    async fn view_list(&self, method_name: &str, args: Value) -> RpcResult<Vec<RecordId>> {
        let result = self.client.call(method_name, &args).await?;
        parse_id_list(method_name, &normalize_empty(result))
    }

    async fn view_record<R: DeserializeOwned>(
        &self,
        method_name: &str,
        args: Value,
        expected: &'static str,
    ) -> RpcResult<R> {
        let result = self.client.call(method_name, &args).await?;
        parse_record(method_name, &result, expected)
    }
}

/// Parses a record, unwrapping one level of JSON-in-a-string.
pub fn parse_record<R: DeserializeOwned>(method_name: &str, text: &str, expected: &'static str) -> RpcResult<R> {
    let mut value: Value = serde_json::from_str(text)?;
    if let Value::String(inner) = &value {
        value = serde_json::from_str(inner)?;
    }
    if value.is_null() {
        return Err(RpcError::EmptyResult(method_name.to_string()));
    }
    R::deserialize(&value).map_err(|_| RpcError::unexpected_shape(method_name, expected, &value))
}

/// Parses a list of ids given either as a JSON array or a list literal in a string.
pub fn parse_id_list(method_name: &str, text: &str) -> RpcResult<Vec<RecordId>> {
    match serde_json::from_str::<Value>(text)? {
        Value::Array(ids) => ids.iter().map(|id| parse_id(method_name, id)).collect(),
        Value::String(literal) => parse_list_literal(method_name, &literal),
        other => Err(RpcError::unexpected_shape(method_name, "a list of ids", &other)),
    }
}

// Request listings are rendered by the contract as e.g. "[1,2,]".
fn parse_list_literal(method_name: &str, literal: &str) -> RpcResult<Vec<RecordId>> {
    let not_a_list = || RpcError::unexpected_shape(method_name, "a list of ids", &Value::String(literal.to_string()));
    let inner = literal
        .trim()
        .strip_prefix('[')
        .and_then(|rest| rest.strip_suffix(']'))
        .ok_or_else(not_a_list)?;
    inner
        .split(',')
        .map(|id| id.trim().trim_matches('"'))
        .filter(|id| !id.is_empty())
        .map(|id| id.parse::<RecordId>().map_err(|_| not_a_list()))
        .collect()
}

fn parse_id(method_name: &str, id: &Value) -> RpcResult<RecordId> {
    let parsed = match id {
        Value::Number(number) => number.to_string().parse().ok(),
        Value::String(s) => s.parse().ok(),
        _ => None,
    };
    parsed.ok_or_else(|| RpcError::unexpected_shape(method_name, "a numeric id", id))
}
