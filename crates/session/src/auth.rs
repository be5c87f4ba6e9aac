use catalog::{ApiError, AuthApi, Credentials, Registration, TokenPair};
use tracing::warn;

use crate::storage::{KeyValueStore, StorageError};
use crate::store::SessionStore;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginError {
    InvalidCredentials,
    ServerUnavailable,
    Storage(StorageError),
}

impl std::fmt::Display for LoginError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LoginError::InvalidCredentials => write!(f, "Invalid username or password"),
            LoginError::ServerUnavailable => write!(f, "Server unavailable"),
            LoginError::Storage(err) => write!(f, "Could not save session: {err}"),
        }
    }
}

impl std::error::Error for LoginError {}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SignupError {
    /// The service answered 400.
    AlreadyExists,
    Failed,
    ServerUnavailable,
}

impl std::fmt::Display for SignupError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SignupError::AlreadyExists => write!(f, "Username or email already exists"),
            SignupError::Failed => write!(f, "Registration failed"),
            SignupError::ServerUnavailable => write!(f, "Server unavailable"),
        }
    }
}

impl std::error::Error for SignupError {}

/// Exchange credentials for a token pair. Any answered failure counts as bad
/// credentials; anything without an answer means the service is down.
pub async fn authenticate<A: AuthApi>(
    api: &A,
    credentials: &Credentials,
) -> Result<TokenPair, LoginError> {
    api.obtain_token(credentials).await.map_err(|err| {
        warn!("login failed: {err}");
        match err {
            ApiError::Rejected { .. } => LoginError::InvalidCredentials,
            ApiError::Network(_) | ApiError::Decode(_) => LoginError::ServerUnavailable,
        }
    })
}

/// Persist the tokens from a successful [`authenticate`].
pub fn complete_login<S: KeyValueStore>(
    session: &mut SessionStore<S>,
    result: Result<TokenPair, LoginError>,
) -> Result<(), LoginError> {
    let tokens = result?;
    session.sign_in(&tokens).map_err(LoginError::Storage)
}

/// Create an account. Signing in is a separate step.
pub async fn signup<A: AuthApi>(api: &A, registration: &Registration) -> Result<(), SignupError> {
    api.register(registration).await.map_err(|err| {
        warn!("signup failed: {err}");
        match err {
            ApiError::Rejected { status: 400, .. } => SignupError::AlreadyExists,
            ApiError::Rejected { .. } => SignupError::Failed,
            ApiError::Network(_) | ApiError::Decode(_) => SignupError::ServerUnavailable,
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;
    use catalog::InMemoryCatalog;
    use pollster::block_on;
    use serde_json::json;

    fn creds(username: &str, password: &str) -> Credentials {
        Credentials {
            username: username.to_string(),
            password: password.to_string(),
        }
    }

    #[test]
    fn login_stores_tokens_and_resolves_admin() {
        let api = InMemoryCatalog::new();
        api.add_account("root", "pw", true);
        let mut session = SessionStore::load(MemoryStore::new());

        let result = block_on(authenticate(&api, &creds("root", "pw")));
        complete_login(&mut session, result).unwrap();
        assert!(session.context().is_admin());
        assert_eq!(session.context().username(), Some("root"));
    }

    #[test]
    fn wrong_password_is_invalid_credentials() {
        let api = InMemoryCatalog::new();
        api.add_account("root", "pw", true);
        let mut session = SessionStore::load(MemoryStore::new());

        let result = block_on(authenticate(&api, &creds("root", "nope")));
        let err = complete_login(&mut session, result).unwrap_err();
        assert_eq!(err, LoginError::InvalidCredentials);
        assert_eq!(err.to_string(), "Invalid username or password");
        assert_eq!(session.access_token(), None);
    }

    #[test]
    fn offline_login_reports_server_unavailable() {
        let api = InMemoryCatalog::new();
        api.set_offline(true);
        let err = block_on(authenticate(&api, &creds("a", "b"))).unwrap_err();
        assert_eq!(err.to_string(), "Server unavailable");
    }

    #[test]
    fn signup_maps_status_codes() {
        let api = InMemoryCatalog::new();
        api.add_account("ada", "pw", false);
        let reg = Registration {
            username: "ada".to_string(),
            email: "ada2@example.org".to_string(),
            password: "pw".to_string(),
        };
        assert_eq!(block_on(signup(&api, &reg)), Err(SignupError::AlreadyExists));

        api.reject_next(500, json!({"detail": "boom"}));
        let fresh = Registration {
            username: "bob".to_string(),
            ..reg.clone()
        };
        assert_eq!(block_on(signup(&api, &fresh)), Err(SignupError::Failed));

        api.set_offline(true);
        assert_eq!(
            block_on(signup(&api, &fresh)).unwrap_err().to_string(),
            "Server unavailable"
        );

        api.set_offline(false);
        assert_eq!(block_on(signup(&api, &fresh)), Ok(()));
    }
}
