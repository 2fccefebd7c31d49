//! Wire encoding for contract call arguments and results.
//!
//! Arguments travel as base64 of compact JSON. Results come back as a list of
//! bytes which hold UTF-8 text.

use base64::{engine::general_purpose::STANDARD, Engine as _};

use crate::errors::{RpcError, RpcResult};

/// Serializes `args` to compact JSON and base64-encodes it.
///
/// serde_json's compact writer never emits whitespace between tokens, so the
/// result is what the node expects in `args_base64`.
pub fn encode_args(args: &serde_json::Value) -> String {
    STANDARD.encode(args.to_string())
}

/// Inverse of [`encode_args`].
pub fn decode_args(encoded: &str) -> RpcResult<serde_json::Value> {
    let bytes = STANDARD
        .decode(encoded)
        .map_err(|e| RpcError::InvalidArgs(e.to_string()))?;
    Ok(serde_json::from_slice(&bytes)?)
}

pub fn decode_bytes(bytes: Vec<u8>) -> RpcResult<String> {
    Ok(String::from_utf8(bytes)?)
}

#[cfg(test)]
pub mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn encode_args_is_compact_base64() {
        let encoded = encode_args(&json!({"account_id": "prod_droplinked.testnet"}));
        let raw = STANDARD.decode(&encoded).unwrap();
        assert_eq!(raw, br#"{"account_id":"prod_droplinked.testnet"}"#.to_vec());
    }

    #[test]
    fn encode_args_has_no_whitespace_between_tokens() {
        let args = json!({"holder_id": 7, "nested": {"list": [1, 2, 3], "flag": true}});
        let raw = String::from_utf8(STANDARD.decode(encode_args(&args)).unwrap()).unwrap();
        assert!(!raw.contains(' '));
        assert!(!raw.contains('\n'));
    }

    #[test]
    fn args_survive_encoding() {
        let args = json!({
            "holder_id": 12,
            "account_id": "cust_droplinked.testnet",
            "nested": {"memo": "two words", "ids": [3, 1, 2]},
        });
        assert_eq!(decode_args(&encode_args(&args)).unwrap(), args);
        assert_eq!(decode_args(&encode_args(&json!({}))).unwrap(), json!({}));
    }

    #[test]
    fn decode_bytes_reads_utf8() {
        assert_eq!(decode_bytes(vec![91, 49, 44, 50, 93]).unwrap(), "[1,2]");
    }

    #[test]
    fn decode_bytes_rejects_invalid_utf8() {
        let err = decode_bytes(vec![0xff, 0xfe]).unwrap_err();
        assert!(matches!(err, RpcError::Decode(_)));
    }
}
