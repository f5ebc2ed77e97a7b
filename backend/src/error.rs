#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    #[error("JSON serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),
}
