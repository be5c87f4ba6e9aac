use std::time::Duration;

use reqwest::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::api::{AuthApi, CatalogApi, Credentials, Registration, TokenPair};
use crate::body::{BodyId, CelestialBody};
use crate::config::ClientConfig;
use crate::error::ApiError;
use crate::payload::{CreatePlanet, UpdatePlanet};

/// Native transport backed by `reqwest`.
#[derive(Debug, Clone)]
pub struct RemoteClient {
    config: ClientConfig,
    http: Client,
    access_token: Option<String>,
}

impl RemoteClient {
    pub fn new(config: ClientConfig) -> Result<Self, ApiError> {
        let http = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| ApiError::Network(e.to_string()))?;
        Ok(Self {
            config,
            http,
            access_token: None,
        })
    }

    /// Catalog calls carry `Authorization: Bearer <token>` when set.
    pub fn with_access_token(mut self, token: Option<String>) -> Self {
        self.access_token = token;
        self
    }

    fn authorize(&self, req: RequestBuilder) -> RequestBuilder {
        match &self.access_token {
            Some(token) => req.bearer_auth(token),
            None => req,
        }
    }

    async fn send(&self, req: RequestBuilder) -> Result<Response, ApiError> {
        let resp = req
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;
        let status = resp.status();
        debug!(%status, url = %resp.url(), "catalog response");
        if status.is_success() {
            return Ok(resp);
        }
        let raw = resp.text().await.unwrap_or_default();
        Err(ApiError::rejected(status.as_u16(), &raw))
    }

    async fn json<T: DeserializeOwned>(&self, req: RequestBuilder) -> Result<T, ApiError> {
        let resp = self.send(req).await?;
        resp.json::<T>()
            .await
            .map_err(|e| ApiError::Decode(e.to_string()))
    }
}

impl CatalogApi for RemoteClient {
    async fn list_planets(&self) -> Result<Vec<CelestialBody>, ApiError> {
        let req = self.authorize(self.http.get(self.config.planets_url()));
        self.json(req).await
    }

    async fn get_planet(&self, id: &BodyId) -> Result<CelestialBody, ApiError> {
        let req = self.authorize(self.http.get(self.config.planet_url(id)));
        self.json(req).await
    }

    async fn create_planet(&self, payload: &CreatePlanet) -> Result<(), ApiError> {
        let req = self.authorize(self.http.post(self.config.planets_url()).json(payload));
        self.send(req).await.map(|_| ())
    }

    async fn update_planet(&self, id: &BodyId, payload: &UpdatePlanet) -> Result<(), ApiError> {
        let req = self.authorize(self.http.put(self.config.planet_url(id)).json(payload));
        self.send(req).await.map(|_| ())
    }

    async fn delete_planet(&self, id: &BodyId) -> Result<(), ApiError> {
        let req = self.authorize(self.http.delete(self.config.planet_url(id)));
        self.send(req).await.map(|_| ())
    }
}

impl AuthApi for RemoteClient {
    async fn obtain_token(&self, credentials: &Credentials) -> Result<TokenPair, ApiError> {
        let req = self.http.post(self.config.token_url()).json(credentials);
        self.json(req).await
    }

    async fn register(&self, registration: &Registration) -> Result<(), ApiError> {
        let req = self.http.post(self.config.register_url()).json(registration);
        self.send(req).await.map(|_| ())
    }
}
