use base64::Engine as _;
use base64::alphabet;
use base64::engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig};
use serde_json::{Map, Value};

const INDIFFERENT: GeneralPurposeConfig =
    GeneralPurposeConfig::new().with_decode_padding_mode(DecodePaddingMode::Indifferent);
const URL_SAFE: GeneralPurpose = GeneralPurpose::new(&alphabet::URL_SAFE, INDIFFERENT);
const STANDARD: GeneralPurpose = GeneralPurpose::new(&alphabet::STANDARD, INDIFFERENT);

/// The claims the client reads out of an access token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenClaims {
    pub username: Option<String>,
    pub is_superuser: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenError {
    /// Not `header.payload.signature`.
    Shape,
    Base64(String),
    Json(String),
}

impl std::fmt::Display for TokenError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TokenError::Shape => write!(f, "token is not three dot-separated parts"),
            TokenError::Base64(msg) => write!(f, "token payload is not base64: {msg}"),
            TokenError::Json(msg) => write!(f, "token payload is not a JSON object: {msg}"),
        }
    }
}

impl std::error::Error for TokenError {}

/// Read the payload segment of a bearer token. The signature is not checked.
///
/// Both base64 alphabets are accepted, padded or not. `is_superuser` only
/// counts when it is literally `true`; a non-string `username` is ignored.
pub fn decode_claims(token: &str) -> Result<TokenClaims, TokenError> {
    let parts: Vec<&str> = token.split('.').collect();
    let [_, payload, _] = parts.as_slice() else {
        return Err(TokenError::Shape);
    };

    let bytes = URL_SAFE
        .decode(payload)
        .or_else(|_| STANDARD.decode(payload))
        .map_err(|e| TokenError::Base64(e.to_string()))?;
    let claims: Map<String, Value> =
        serde_json::from_slice(&bytes).map_err(|e| TokenError::Json(e.to_string()))?;

    Ok(TokenClaims {
        username: claims.get("username").and_then(Value::as_str).map(str::to_string),
        is_superuser: matches!(claims.get("is_superuser"), Some(Value::Bool(true))),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use catalog::unsigned_token;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn superuser_claim_resolves_admin() {
        let token = unsigned_token(&json!({"username": "a", "is_superuser": true}));
        assert_eq!(
            decode_claims(&token).unwrap(),
            TokenClaims {
                username: Some("a".to_string()),
                is_superuser: true,
            }
        );
    }

    #[test]
    fn missing_or_truthy_non_bool_superuser_is_not_admin() {
        let token = unsigned_token(&json!({"username": "a"}));
        assert!(!decode_claims(&token).unwrap().is_superuser);

        let token = unsigned_token(&json!({"username": "a", "is_superuser": 1}));
        assert!(!decode_claims(&token).unwrap().is_superuser);

        let token = unsigned_token(&json!({"username": "a", "is_superuser": "true"}));
        assert!(!decode_claims(&token).unwrap().is_superuser);
    }

    #[test]
    fn malformed_base64_is_an_error() {
        assert!(matches!(
            decode_claims("aaa.!!!not-base64!!!.ccc"),
            Err(TokenError::Base64(_))
        ));
    }

    #[test]
    fn wrong_shape_is_an_error() {
        assert_eq!(decode_claims("just-one-part"), Err(TokenError::Shape));
        assert_eq!(decode_claims("a.b"), Err(TokenError::Shape));
        assert_eq!(decode_claims("a.b.c.d"), Err(TokenError::Shape));
    }

    #[test]
    fn non_json_payload_is_an_error() {
        let payload = base64::engine::general_purpose::STANDARD.encode("not json");
        assert!(matches!(
            decode_claims(&format!("h.{payload}.s")),
            Err(TokenError::Json(_))
        ));
    }

    #[test]
    fn array_payload_is_not_claims() {
        let token = unsigned_token(&json!(["mallory", true]));
        assert!(matches!(decode_claims(&token), Err(TokenError::Json(_))));

        let token = unsigned_token(&json!("admin"));
        assert!(matches!(decode_claims(&token), Err(TokenError::Json(_))));
    }

    #[test]
    fn padded_standard_alphabet_is_accepted() {
        // Encodes with a '/' and "==" padding.
        let claims = r#"{"username":"??>>","is_superuser":false}"#;
        let payload = base64::engine::general_purpose::STANDARD.encode(claims);
        let decoded = decode_claims(&format!("h.{payload}.s")).unwrap();
        assert_eq!(decoded.username.as_deref(), Some("??>>"));
        assert!(!decoded.is_superuser);
    }
}
