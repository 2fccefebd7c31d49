#[derive(thiserror::Error, Debug)]
pub enum RpcError {
    #[error("Failed to send request to RPC node: {0:?}")]
    Http(#[from] reqwest::Error),

    #[error("Failed to reach RPC node: {0}")]
    Transport(String),

    #[error("RPC node returned an error: {0}")]
    Node(serde_json::Value),

    #[error("Malformed RPC response: {0}")]
    MalformedResponse(String),

    #[error("Contract result is not valid UTF-8: {0}")]
    Decode(#[from] std::string::FromUtf8Error),

    #[error("Contract result is not valid JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),

    #[error("Failed to encode call arguments: {0}")]
    InvalidArgs(String),

    #[error("Unexpected result shape from {method}: expected {expected}, got {got}")]
    UnexpectedShape {
        method: String,
        expected: &'static str,
        got: String,
    },

    #[error("Contract method {0} returned no value")]
    EmptyResult(String),
}

impl RpcError {
    pub fn unexpected_shape(method: &str, expected: &'static str, got: &serde_json::Value) -> Self {
        RpcError::UnexpectedShape {
            method: method.to_string(),
            expected,
            got: got.to_string(),
        }
    }
}

pub type RpcResult<T> = Result<T, RpcError>;
