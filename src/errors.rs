#[derive(thiserror::Error, Debug)]
pub enum CustomError {
    #[error("Given config path doesn't exist: {0}")]
    ConfigPathNotFound(String),

    #[error("Failed to load settings: {0}")]
    FailedLoadSettings(#[from] config::ConfigError),

    #[error("Failed to parse call arguments: {0}")]
    InvalidCallArgs(serde_json::Error),

    #[error("Failed to render output: {0}")]
    FailedRenderOutput(serde_json::Error),

    #[error("Failed to execute {0} contract method: {1}")]
    FailedViewMethod(String, near_client::RpcError),
}
