#[derive(Debug, thiserror::Error)]
pub enum SignError {
    #[error("payload is not serializable: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("invalid signing key")]
    InvalidKey,
}

pub type Result<T> = std::result::Result<T, SignError>;
