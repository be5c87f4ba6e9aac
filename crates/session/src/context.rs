use tracing::{debug, warn};

use crate::token::decode_claims;

/// Who the UI believes is signed in. Derived once per token change and handed
/// to every view that gates controls on it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionContext {
    authenticated: bool,
    username: Option<String>,
    is_admin: bool,
}

impl SessionContext {
    pub fn anonymous() -> Self {
        Self::default()
    }

    /// Resolve a session from the stored access token. Any failure to read
    /// the token degrades to an anonymous session.
    pub fn from_token(token: Option<&str>) -> Self {
        let Some(token) = token else {
            return Self::anonymous();
        };
        match decode_claims(token) {
            Ok(claims) => {
                debug!(
                    username = ?claims.username,
                    admin = claims.is_superuser,
                    "session resolved"
                );
                Self {
                    authenticated: true,
                    username: claims.username,
                    is_admin: claims.is_superuser,
                }
            }
            Err(err) => {
                warn!("access token decode failed: {err}");
                Self::anonymous()
            }
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.authenticated
    }

    pub fn username(&self) -> Option<&str> {
        self.username.as_deref()
    }

    /// Name for greetings; tokens without a username still greet someone.
    pub fn display_name(&self) -> Option<&str> {
        self.authenticated
            .then(|| self.username.as_deref().unwrap_or("User"))
    }

    pub fn is_admin(&self) -> bool {
        self.authenticated && self.is_admin
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use catalog::unsigned_token;
    use serde_json::json;

    #[test]
    fn admin_token_resolves_admin_session() {
        let token = unsigned_token(&json!({"username": "a", "is_superuser": true}));
        let ctx = SessionContext::from_token(Some(&token));
        assert!(ctx.is_authenticated());
        assert!(ctx.is_admin());
        assert_eq!(ctx.username(), Some("a"));
        assert_eq!(ctx.display_name(), Some("a"));
    }

    #[test]
    fn malformed_token_is_anonymous() {
        let ctx = SessionContext::from_token(Some("x.%%%.y"));
        assert_eq!(ctx, SessionContext::anonymous());
        assert!(!ctx.is_admin());
        assert_eq!(ctx.display_name(), None);
    }

    #[test]
    fn array_payload_is_anonymous() {
        let token = unsigned_token(&json!(["mallory", true]));
        let ctx = SessionContext::from_token(Some(&token));
        assert_eq!(ctx, SessionContext::anonymous());
        assert!(!ctx.is_admin());
    }

    #[test]
    fn missing_token_is_anonymous() {
        assert_eq!(SessionContext::from_token(None), SessionContext::anonymous());
    }

    #[test]
    fn token_without_username_greets_generic_user() {
        let token = unsigned_token(&json!({"is_superuser": false}));
        let ctx = SessionContext::from_token(Some(&token));
        assert!(ctx.is_authenticated());
        assert_eq!(ctx.username(), None);
        assert_eq!(ctx.display_name(), Some("User"));
    }
}
