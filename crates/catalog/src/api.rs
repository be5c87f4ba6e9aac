use serde::{Deserialize, Serialize};

use crate::body::{BodyId, CelestialBody};
use crate::error::ApiError;
use crate::payload::{CreatePlanet, UpdatePlanet};

/// Planet CRUD against the catalog service.
///
/// Futures are not required to be `Send`: in the browser they run on the
/// single UI thread.
#[allow(async_fn_in_trait)]
pub trait CatalogApi {
    async fn list_planets(&self) -> Result<Vec<CelestialBody>, ApiError>;
    async fn get_planet(&self, id: &BodyId) -> Result<CelestialBody, ApiError>;
    async fn create_planet(&self, payload: &CreatePlanet) -> Result<(), ApiError>;
    async fn update_planet(&self, id: &BodyId, payload: &UpdatePlanet) -> Result<(), ApiError>;
    async fn delete_planet(&self, id: &BodyId) -> Result<(), ApiError>;
}

/// Token issuance and signup, owned by the external auth service.
#[allow(async_fn_in_trait)]
pub trait AuthApi {
    async fn obtain_token(&self, credentials: &Credentials) -> Result<TokenPair, ApiError>;
    async fn register(&self, registration: &Registration) -> Result<(), ApiError>;
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Registration {
    pub username: String,
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenPair {
    pub access: String,
    pub refresh: String,
}
