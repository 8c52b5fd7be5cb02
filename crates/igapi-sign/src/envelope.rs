use crate::key::SigningKey;

pub const SIGNED_BODY_FIELD: &str = "signed_body";
pub const KEY_VERSION_FIELD: &str = "ig_sig_key_version";

/// A JSON payload bound to the signature computed over it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignedEnvelope {
    pub signature:   String,
    pub json_body:   String,
    pub key_version: u32,
}

impl SignedEnvelope {
    /// `{signature}.{json_body}`
    pub fn signed_body(&self) -> String { format!("{}.{}", self.signature, self.json_body) }

    /// The only two fields a signed POST carries.
    pub fn form_fields(&self) -> Vec<(String, String)> {
        vec![
            (KEY_VERSION_FIELD.to_string(), self.key_version.to_string()),
            (SIGNED_BODY_FIELD.to_string(), self.signed_body()),
        ]
    }

    /// Split a `signed_body` value back into signature and JSON.
    pub fn parse(signed_body: &str, key_version: u32) -> Option<Self> {
        let (signature, json_body) = signed_body.split_once('.')?;
        Some(Self {
            signature: signature.to_string(),
            json_body: json_body.to_string(),
            key_version,
        })
    }

    pub fn verify(&self, key: &SigningKey) -> bool {
        self.key_version == key.version() && key.verify_str(&self.json_body, &self.signature)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn wire_shape() {
        let key = SigningKey::new(4, "test-signing-key");
        let envelope = key.envelope(&json!({"a": 1, "b": "x"})).unwrap();
        assert_eq!(
            envelope.form_fields(),
            vec![
                ("ig_sig_key_version".to_string(), "4".to_string()),
                (
                    "signed_body".to_string(),
                    "bae3f0a2fd3ab45ecc3f371fac371af1589d383d5f931ed19af2baa70219a729.{\"a\":1,\"b\":\"x\"}"
                        .to_string()
                ),
            ]
        );
    }

    #[test]
    fn parse_splits_on_first_dot() {
        let key = SigningKey::new(4, "k");
        let envelope = key.envelope(&json!({"v": "1.5"})).unwrap();
        let parsed = SignedEnvelope::parse(&envelope.signed_body(), 4).unwrap();
        assert_eq!(parsed, envelope);
        assert!(parsed.verify(&key));
    }

    #[test]
    fn tampered_body_fails_verification() {
        let key = SigningKey::new(4, "k");
        let mut envelope = key.envelope(&json!({"a": 1})).unwrap();
        envelope.json_body = r#"{"a": 1}"#.to_string();
        assert!(!envelope.verify(&key));

        let wrong_version = SignedEnvelope { key_version: 5, ..key.envelope(&json!({"a": 1})).unwrap() };
        assert!(!wrong_version.verify(&key));
    }
}
