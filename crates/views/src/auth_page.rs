use catalog::{AuthApi, Credentials, Registration, TokenPair};
use session::{
    KeyValueStore, LoginError, SessionStore, SignupError, authenticate, complete_login, signup,
};

use crate::route::Route;

/// `/login`: username/password form with one inline error line.
#[derive(Debug, Default)]
pub struct LoginPage {
    pub form: Credentials,
    error: Option<String>,
    submitting: bool,
}

impl LoginPage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    pub fn begin(&mut self) -> Option<Credentials> {
        if self.submitting {
            return None;
        }
        self.error = None;
        self.submitting = true;
        Some(self.form.clone())
    }

    /// Store the tokens on success and say where to go next.
    pub fn apply<S: KeyValueStore>(
        &mut self,
        result: Result<TokenPair, LoginError>,
        session: &mut SessionStore<S>,
    ) -> Option<Route> {
        self.submitting = false;
        match complete_login(session, result) {
            Ok(()) => Some(Route::Grid),
            Err(err) => {
                self.error = Some(err.to_string());
                None
            }
        }
    }

    pub async fn submit<A: AuthApi, S: KeyValueStore>(
        &mut self,
        api: &A,
        session: &mut SessionStore<S>,
    ) -> Option<Route> {
        let credentials = self.begin()?;
        let result = authenticate(api, &credentials).await;
        self.apply(result, session)
    }
}

/// `/signup`: account creation. Success leads to the login page.
#[derive(Debug, Default)]
pub struct SignupPage {
    pub form: Registration,
    error: Option<String>,
    submitting: bool,
}

impl SignupPage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    pub fn begin(&mut self) -> Option<Registration> {
        if self.submitting {
            return None;
        }
        self.error = None;
        self.submitting = true;
        Some(self.form.clone())
    }

    pub fn apply(&mut self, result: Result<(), SignupError>) -> Option<Route> {
        self.submitting = false;
        match result {
            Ok(()) => Some(Route::Login),
            Err(err) => {
                self.error = Some(err.to_string());
                None
            }
        }
    }

    pub async fn submit<A: AuthApi>(&mut self, api: &A) -> Option<Route> {
        let registration = self.begin()?;
        let result = signup(api, &registration).await;
        self.apply(result)
    }
}
