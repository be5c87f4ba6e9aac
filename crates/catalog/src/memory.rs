use base64::Engine as _;
use parking_lot::Mutex;
use serde_json::{Value, json};

use crate::api::{AuthApi, CatalogApi, Credentials, Registration, TokenPair};
use crate::body::{BodyId, CelestialBody};
use crate::error::ApiError;
use crate::payload::{CreatePlanet, UpdatePlanet};

/// One request as seen by [`InMemoryCatalog`].
#[derive(Debug, Clone, PartialEq)]
pub enum ApiCall {
    List,
    Get(BodyId),
    Create(CreatePlanet),
    Update(BodyId, UpdatePlanet),
    Delete(BodyId),
    ObtainToken { username: String },
    Register { username: String },
}

#[derive(Debug, Clone)]
struct Account {
    username: String,
    email: String,
    password: String,
    is_superuser: bool,
}

#[derive(Debug, Default)]
struct State {
    bodies: Vec<CelestialBody>,
    next_id: u64,
    accounts: Vec<Account>,
    calls: Vec<ApiCall>,
    offline: bool,
    reject_next: Option<(u16, Value)>,
}

/// Service double that keeps the catalog in memory and records every call.
///
/// It behaves like the real service where the client cares: ids are
/// assigned on create, updates only touch the numbers they carry, blank
/// names are rejected with a field-error payload, and unknown ids answer 404.
#[derive(Debug, Default)]
pub struct InMemoryCatalog {
    state: Mutex<State>,
}

impl InMemoryCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_bodies(bodies: Vec<CelestialBody>) -> Self {
        let next_id = bodies
            .iter()
            .filter_map(|b| b.id.as_str().parse::<u64>().ok())
            .max()
            .unwrap_or(0);
        Self {
            state: Mutex::new(State {
                bodies,
                next_id,
                ..State::default()
            }),
        }
    }

    pub fn add_account(&self, username: &str, password: &str, is_superuser: bool) {
        self.state.lock().accounts.push(Account {
            username: username.to_string(),
            email: format!("{username}@example.org"),
            password: password.to_string(),
            is_superuser,
        });
    }

    /// While offline every call fails with [`ApiError::Network`].
    pub fn set_offline(&self, offline: bool) {
        self.state.lock().offline = offline;
    }

    /// The next call (of any kind) fails with this status and payload.
    pub fn reject_next(&self, status: u16, body: Value) {
        self.state.lock().reject_next = Some((status, body));
    }

    pub fn calls(&self) -> Vec<ApiCall> {
        self.state.lock().calls.clone()
    }

    pub fn clear_calls(&self) {
        self.state.lock().calls.clear();
    }

    pub fn bodies(&self) -> Vec<CelestialBody> {
        self.state.lock().bodies.clone()
    }

    fn begin(&self, call: ApiCall) -> Result<parking_lot::MutexGuard<'_, State>, ApiError> {
        let mut state = self.state.lock();
        state.calls.push(call);
        if state.offline {
            return Err(ApiError::Network("service unreachable".to_string()));
        }
        if let Some((status, body)) = state.reject_next.take() {
            return Err(ApiError::Rejected {
                status,
                body: Some(body),
            });
        }
        Ok(state)
    }
}

fn not_found() -> ApiError {
    ApiError::Rejected {
        status: 404,
        body: Some(json!({"detail": "Not found."})),
    }
}

fn blank_name() -> ApiError {
    ApiError::Rejected {
        status: 400,
        body: Some(json!({"name": ["This field may not be blank."]})),
    }
}

/// Three-part bearer token whose middle segment carries the given claims.
/// The signature part is a placeholder; clients never verify it.
pub fn unsigned_token(claims: &Value) -> String {
    let engine = base64::engine::general_purpose::URL_SAFE_NO_PAD;
    let header = engine.encode(br#"{"alg":"none","typ":"JWT"}"#);
    let payload = engine.encode(claims.to_string().as_bytes());
    format!("{header}.{payload}.unsigned")
}

impl CatalogApi for InMemoryCatalog {
    async fn list_planets(&self) -> Result<Vec<CelestialBody>, ApiError> {
        let state = self.begin(ApiCall::List)?;
        Ok(state.bodies.clone())
    }

    async fn get_planet(&self, id: &BodyId) -> Result<CelestialBody, ApiError> {
        let state = self.begin(ApiCall::Get(id.clone()))?;
        state
            .bodies
            .iter()
            .find(|b| &b.id == id)
            .cloned()
            .ok_or_else(not_found)
    }

    async fn create_planet(&self, payload: &CreatePlanet) -> Result<(), ApiError> {
        let mut state = self.begin(ApiCall::Create(payload.clone()))?;
        if payload.name.trim().is_empty() {
            return Err(blank_name());
        }
        state.next_id += 1;
        let body = CelestialBody {
            id: BodyId::from(state.next_id),
            name: payload.name.clone(),
            description: Some(payload.description.clone()),
            image_url: payload.image_url.clone(),
            radius: payload.radius,
            distance_from_sun: payload.distance_from_sun,
            mass_kg: payload.mass_kg,
            orbital_speed_km_s: payload.orbital_speed_km_s,
            created_by: None,
        };
        state.bodies.push(body);
        Ok(())
    }

    async fn update_planet(&self, id: &BodyId, payload: &UpdatePlanet) -> Result<(), ApiError> {
        let mut state = self.begin(ApiCall::Update(id.clone(), payload.clone()))?;
        if payload.name.trim().is_empty() {
            return Err(blank_name());
        }
        let body = state
            .bodies
            .iter_mut()
            .find(|b| &b.id == id)
            .ok_or_else(not_found)?;
        body.name = payload.name.clone();
        body.description = Some(payload.description.clone());
        body.image_url = payload.image_url.clone();
        if let Some(v) = payload.radius {
            body.radius = Some(v);
        }
        if let Some(v) = payload.distance_from_sun {
            body.distance_from_sun = Some(v);
        }
        if let Some(v) = payload.mass_kg {
            body.mass_kg = Some(v);
        }
        if let Some(v) = payload.orbital_speed_km_s {
            body.orbital_speed_km_s = Some(v);
        }
        Ok(())
    }

    async fn delete_planet(&self, id: &BodyId) -> Result<(), ApiError> {
        let mut state = self.begin(ApiCall::Delete(id.clone()))?;
        let before = state.bodies.len();
        state.bodies.retain(|b| &b.id != id);
        if state.bodies.len() == before {
            return Err(not_found());
        }
        Ok(())
    }
}

impl AuthApi for InMemoryCatalog {
    async fn obtain_token(&self, credentials: &Credentials) -> Result<TokenPair, ApiError> {
        let state = self.begin(ApiCall::ObtainToken {
            username: credentials.username.clone(),
        })?;
        let account = state
            .accounts
            .iter()
            .find(|a| a.username == credentials.username && a.password == credentials.password)
            .ok_or_else(|| ApiError::Rejected {
                status: 401,
                body: Some(json!({
                    "detail": "No active account found with the given credentials"
                })),
            })?;
        let claims = json!({
            "username": account.username,
            "is_superuser": account.is_superuser,
        });
        Ok(TokenPair {
            access: unsigned_token(&claims),
            refresh: format!("refresh-{}", account.username),
        })
    }

    async fn register(&self, registration: &Registration) -> Result<(), ApiError> {
        let mut state = self.begin(ApiCall::Register {
            username: registration.username.clone(),
        })?;
        let taken = state
            .accounts
            .iter()
            .any(|a| a.username == registration.username || a.email == registration.email);
        if taken {
            return Err(ApiError::Rejected {
                status: 400,
                body: Some(json!({"username": ["A user with that username already exists."]})),
            });
        }
        state.accounts.push(Account {
            username: registration.username.clone(),
            email: registration.email.clone(),
            password: registration.password.clone(),
            is_superuser: false,
        });
        Ok(())
    }
}
