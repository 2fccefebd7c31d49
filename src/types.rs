use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Identifier of a token, holder, request or approval on the contract.
pub type RecordId = u128;

/// A contract record whose fields are passed through as they come.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(transparent)]
pub struct ContractRecord(pub serde_json::Map<String, serde_json::Value>);

impl ContractRecord {
    pub fn get(&self, key: &str) -> Option<&serde_json::Value> {
        self.0.get(key)
    }

    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.get(key).and_then(|value| value.as_str())
    }
}

pub type Holder = ContractRecord;
pub type Approved = ContractRecord;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct TokenMetadata {
    pub ipfs_url: String,
    #[serde(with = "u128_dec_format")]
    pub commission: u128,
    #[serde(with = "u128_dec_format")]
    pub price: u128,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Request {
    #[serde(with = "u128_dec_format")]
    pub token_id: u128,
    pub producer: String,
    pub publisher: String,
    pub accepted: bool,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct HolderRecord {
    pub holder_id: RecordId,
    pub holder: Holder,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct ApprovedRecord {
    pub approved_id: RecordId,
    pub approved: Approved,
}

/// Amounts are written as decimal strings and read from either strings or numbers.
pub mod u128_dec_format {
    use super::*;

    pub fn serialize<S>(num: &u128, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&num.to_string())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<u128, D::Error>
    where
        D: Deserializer<'de>,
    {
        // Numbers keep their digits, so amounts past u64 parse exactly.
        match serde_json::Value::deserialize(deserializer)? {
            serde_json::Value::String(s) => s.parse().map_err(serde::de::Error::custom),
            serde_json::Value::Number(n) => n.to_string().parse().map_err(serde::de::Error::custom),
            other => Err(serde::de::Error::custom(format!("expected an amount, got {}", other))),
        }
    }
}
