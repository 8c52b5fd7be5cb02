#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum IdentityError {
    #[error("user-agent does not fit the required format: {0}")]
    InvalidUserAgent(String),

    #[error("invalid character '{ch}' in shortcode '{code}'")]
    InvalidShortcode { code: String, ch: char },

    #[error("shortcode '{0}' does not fit in a 64-bit id")]
    ShortcodeOverflow(String),

    #[error("invalid media id: {0}")]
    InvalidMediaId(String),

    #[error("unknown media type id: {0}")]
    UnknownMediaTypeId(i64),

    #[error("unknown media type name: {0}")]
    UnknownMediaTypeName(String),

    #[error("rank_token is required")]
    MissingRankToken,

    #[error("invalid rank_token: {0}")]
    InvalidRankToken(String),
}

pub type Result<T> = std::result::Result<T, IdentityError>;
