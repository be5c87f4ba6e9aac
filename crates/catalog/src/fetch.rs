use gloo_net::http::{Request, RequestBuilder, Response};
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::api::{AuthApi, CatalogApi, Credentials, Registration, TokenPair};
use crate::body::{BodyId, CelestialBody};
use crate::config::ClientConfig;
use crate::error::ApiError;
use crate::payload::{CreatePlanet, UpdatePlanet};

/// Browser transport backed by `fetch` through `gloo-net`.
#[derive(Debug, Clone)]
pub struct RemoteClient {
    config: ClientConfig,
    access_token: Option<String>,
}

impl RemoteClient {
    pub fn new(config: ClientConfig) -> Result<Self, ApiError> {
        Ok(Self {
            config,
            access_token: None,
        })
    }

    pub fn with_access_token(mut self, token: Option<String>) -> Self {
        self.access_token = token;
        self
    }

    fn authorize(&self, req: RequestBuilder) -> RequestBuilder {
        match &self.access_token {
            Some(token) => req.header("Authorization", &format!("Bearer {token}")),
            None => req,
        }
    }

    async fn send(&self, req: RequestBuilder) -> Result<Response, ApiError> {
        let resp = req
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;
        check(resp).await
    }

    async fn send_json<B: Serialize + ?Sized>(
        &self,
        req: RequestBuilder,
        body: &B,
    ) -> Result<Response, ApiError> {
        let req = req
            .json(body)
            .map_err(|e| ApiError::Network(e.to_string()))?;
        let resp = req
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;
        check(resp).await
    }
}

async fn check(resp: Response) -> Result<Response, ApiError> {
    if resp.ok() {
        return Ok(resp);
    }
    let status = resp.status();
    let raw = resp.text().await.unwrap_or_default();
    Err(ApiError::rejected(status, &raw))
}

async fn decode<T: DeserializeOwned>(resp: Response) -> Result<T, ApiError> {
    resp.json::<T>()
        .await
        .map_err(|e| ApiError::Decode(e.to_string()))
}

impl CatalogApi for RemoteClient {
    async fn list_planets(&self) -> Result<Vec<CelestialBody>, ApiError> {
        let resp = self
            .send(self.authorize(Request::get(&self.config.planets_url())))
            .await?;
        decode(resp).await
    }

    async fn get_planet(&self, id: &BodyId) -> Result<CelestialBody, ApiError> {
        let resp = self
            .send(self.authorize(Request::get(&self.config.planet_url(id))))
            .await?;
        decode(resp).await
    }

    async fn create_planet(&self, payload: &CreatePlanet) -> Result<(), ApiError> {
        let req = self.authorize(Request::post(&self.config.planets_url()));
        self.send_json(req, payload).await.map(|_| ())
    }

    async fn update_planet(&self, id: &BodyId, payload: &UpdatePlanet) -> Result<(), ApiError> {
        let req = self.authorize(Request::put(&self.config.planet_url(id)));
        self.send_json(req, payload).await.map(|_| ())
    }

    async fn delete_planet(&self, id: &BodyId) -> Result<(), ApiError> {
        let req = self.authorize(Request::delete(&self.config.planet_url(id)));
        self.send(req).await.map(|_| ())
    }
}

impl AuthApi for RemoteClient {
    async fn obtain_token(&self, credentials: &Credentials) -> Result<TokenPair, ApiError> {
        let resp = self
            .send_json(Request::post(&self.config.token_url()), credentials)
            .await?;
        decode(resp).await
    }

    async fn register(&self, registration: &Registration) -> Result<(), ApiError> {
        self.send_json(Request::post(&self.config.register_url()), registration)
            .await
            .map(|_| ())
    }
}
