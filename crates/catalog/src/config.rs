use std::env;

use crate::body::BodyId;

pub const DEFAULT_API_URL: &str = "http://127.0.0.1:8000/api";
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Where the catalog/auth service lives. Every endpoint is derived from the
/// one base URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    base_url: String,
    pub timeout_secs: u64,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new(DEFAULT_API_URL)
    }
}

impl ClientConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }

    /// `SOLAR_API_URL` and `SOLAR_API_TIMEOUT_SECS`, with defaults for
    /// anything unset or unparsable.
    pub fn from_env() -> Self {
        let base_url = env::var("SOLAR_API_URL")
            .ok()
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_API_URL.to_string());
        let mut config = Self::new(base_url);
        config.timeout_secs = env_var_u64("SOLAR_API_TIMEOUT_SECS", DEFAULT_TIMEOUT_SECS);
        config
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn planets_url(&self) -> String {
        format!("{}/planets/", self.base_url)
    }

    pub fn planet_url(&self, id: &BodyId) -> String {
        format!("{}/planets/{}/", self.base_url, id)
    }

    pub fn token_url(&self) -> String {
        format!("{}/token/", self.base_url)
    }

    pub fn register_url(&self) -> String {
        format!("{}/register/", self.base_url)
    }
}

fn env_var_u64(key: &str, default: u64) -> u64 {
    env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoints_derive_from_base_url() {
        let config = ClientConfig::new("https://api.example.org/api/");
        assert_eq!(config.base_url(), "https://api.example.org/api");
        assert_eq!(config.planets_url(), "https://api.example.org/api/planets/");
        assert_eq!(
            config.planet_url(&BodyId::new("42")),
            "https://api.example.org/api/planets/42/"
        );
        assert_eq!(config.token_url(), "https://api.example.org/api/token/");
        assert_eq!(config.register_url(), "https://api.example.org/api/register/");
    }

    #[test]
    fn default_points_at_local_service() {
        let config = ClientConfig::default();
        assert_eq!(config.planets_url(), "http://127.0.0.1:8000/api/planets/");
        assert_eq!(config.timeout_secs, DEFAULT_TIMEOUT_SECS);
    }
}
