use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::{IdentityError, Result};

static UUID_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[a-f\d]{8}-[a-f\d]{4}-[a-f\d]{4}-[a-f\d]{4}-[a-f\d]{12}$").unwrap()
});

/// Check a caller-generated rank token, which must be a lowercase dashed UUID.
pub fn validate_rank_token(value: Option<&str>, required: bool) -> Result<()> {
    match value.filter(|v| !v.is_empty()) {
        None if required => Err(IdentityError::MissingRankToken),
        None => Ok(()),
        Some(v) if UUID_REGEX.is_match(v) => Ok(()),
        Some(v) => Err(IdentityError::InvalidRankToken(v.to_string())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generate_uuid;

    #[test]
    fn generated_uuid_is_valid() {
        let token = generate_uuid(false, None);
        assert!(validate_rank_token(Some(&token), true).is_ok());
    }

    #[test]
    fn missing_token() {
        assert_eq!(validate_rank_token(None, true), Err(IdentityError::MissingRankToken));
        assert_eq!(validate_rank_token(Some(""), true), Err(IdentityError::MissingRankToken));
        assert!(validate_rank_token(None, false).is_ok());
    }

    #[test]
    fn malformed_token() {
        let err = validate_rank_token(Some("123_6384e2b2-184b-cbf5-8ecc-f10ca7a6563c"), true);
        assert!(matches!(err, Err(IdentityError::InvalidRankToken(_))));
        assert!(validate_rank_token(Some("6384E2B2-184B-CBF5-8ECC-F10CA7A6563C"), true).is_err());
    }
}
