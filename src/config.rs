use std::fmt::{Debug, Formatter};
use std::path::{Path, PathBuf};
use std::time::Duration;

use derive_getters::Getters;
use serde::{Deserialize, Serialize};

use crate::constants::{self, domains};
use crate::errors::{config_error, io_error, json_error};
use crate::Error;

/// Application secrets registered with IsThereAnyDeal
#[derive(Deserialize, Clone, Getters)]
pub struct Credentials {
    api_key: String,
    client_id: String,
    client_secret: String,
}

impl Debug for Credentials {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("api_key", &"<redacted>")
            .field("client_id", &self.client_id)
            .field("client_secret", &"<redacted>")
            .finish()
    }
}

impl Credentials {
    pub fn new(
        api_key: impl Into<String>,
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
    ) -> Self {
        Self {
            api_key: api_key.into(),
            client_id: client_id.into(),
            client_secret: client_secret.into(),
        }
    }

    /// Reads `ITAD_API_KEY`, `ITAD_CLIENT_ID` and `ITAD_CLIENT_SECRET`
    pub fn from_env() -> Result<Self, Error> {
        let var = |name: &str| {
            std::env::var(name).map_err(|err| config_error(format!("{}: {}", name, err)))
        };
        Ok(Self {
            api_key: var(constants::env::API_KEY)?,
            client_id: var(constants::env::CLIENT_ID)?,
            client_secret: var(constants::env::CLIENT_SECRET)?,
        })
    }

    /// Loads secrets from a JSON object with `api_key`, `client_id` and `client_secret`
    pub async fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, Error> {
        let contents = tokio::fs::read(path.as_ref()).await.map_err(io_error)?;
        serde_json::from_slice(&contents).map_err(json_error)
    }
}

/// What to do when the token file exists but cannot be parsed
#[derive(Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Debug, Default)]
#[serde(rename_all = "snake_case")]
pub enum CorruptTokenPolicy {
    /// Return `ErrorKind::CorruptTokenStore` to the caller
    #[default]
    Fail,
    /// Ignore the file and run the authorization flow again
    Reauthorize,
}

#[derive(Clone, Debug)]
pub struct Config {
    pub credentials: Credentials,
    pub api_base_url: String,
    pub auth_url: String,
    pub token_url: String,
    pub redirect_uri: String,
    pub scopes: Vec<String>,
    pub token_file: PathBuf,
    pub refresh_margin: chrono::Duration,
    pub redirect_attempts: u32,
    pub corrupt_token_policy: CorruptTokenPolicy,
    pub timeout: Option<Duration>,
    pub user_agent: String,
}

impl Config {
    pub fn new(credentials: Credentials) -> Self {
        Self {
            credentials,
            api_base_url: domains::ITAD_API.to_string(),
            auth_url: domains::ITAD_AUTHORIZE.to_string(),
            token_url: domains::ITAD_TOKEN.to_string(),
            redirect_uri: constants::DEFAULT_REDIRECT_URI.to_string(),
            scopes: constants::SCOPES.iter().map(|s| s.to_string()).collect(),
            token_file: PathBuf::from(constants::DEFAULT_TOKEN_FILE),
            refresh_margin: chrono::Duration::seconds(constants::DEFAULT_REFRESH_MARGIN_SECS),
            redirect_attempts: constants::DEFAULT_REDIRECT_ATTEMPTS,
            corrupt_token_policy: CorruptTokenPolicy::default(),
            timeout: Some(Duration::from_secs(30)),
            user_agent: format!("{}/{}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION")),
        }
    }

    /// Credentials from the environment, `ITAD_TOKEN_FILE` overrides the token path
    pub fn from_env() -> Result<Self, Error> {
        let mut config = Self::new(Credentials::from_env()?);
        if let Ok(path) = std::env::var(constants::env::TOKEN_FILE) {
            config.token_file = PathBuf::from(path);
        }
        Ok(config)
    }

    pub fn with_token_file<P: Into<PathBuf>>(mut self, path: P) -> Self {
        self.token_file = path.into();
        self
    }

    /// Points every endpoint at `base`, used against mirrors and mock servers
    pub fn with_base_url(mut self, base: &str) -> Self {
        let base = base.trim_end_matches('/');
        self.api_base_url = format!("{}/", base);
        self.auth_url = format!("{}/oauth/authorize/", base);
        self.token_url = format!("{}/oauth/token/", base);
        self
    }

    pub fn with_corrupt_token_policy(mut self, policy: CorruptTokenPolicy) -> Self {
        self.corrupt_token_policy = policy;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_point_at_itad() {
        let config = Config::new(Credentials::new("key", "id", "secret"));
        assert_eq!(config.api_base_url, "https://api.isthereanydeal.com/");
        assert_eq!(config.token_url, "https://isthereanydeal.com/oauth/token/");
        assert_eq!(config.token_file, PathBuf::from("itad_tokens.json"));
        assert_eq!(config.scopes.len(), 8);
        assert_eq!(config.corrupt_token_policy, CorruptTokenPolicy::Fail);
    }

    #[test]
    fn base_url_override() {
        let config =
            Config::new(Credentials::new("key", "id", "secret")).with_base_url("http://127.0.0.1:8080/");
        assert_eq!(config.api_base_url, "http://127.0.0.1:8080/");
        assert_eq!(config.auth_url, "http://127.0.0.1:8080/oauth/authorize/");
        assert_eq!(config.token_url, "http://127.0.0.1:8080/oauth/token/");
    }

    #[test]
    fn secrets_are_redacted() {
        let credentials = Credentials::new("my-key", "my-id", "my-secret");
        let debug = format!("{:?}", credentials);
        assert!(debug.contains("my-id"));
        assert!(!debug.contains("my-key"));
        assert!(!debug.contains("my-secret"));
    }

    #[tokio::test]
    async fn credentials_from_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("secrets.json");
        std::fs::write(
            &path,
            r#"{"api_key": "k", "client_id": "i", "client_secret": "s"}"#,
        )
        .expect("write secrets");
        let credentials = Credentials::from_file(&path).await.expect("load secrets");
        assert_eq!(credentials.api_key(), "k");
        assert_eq!(credentials.client_id(), "i");
        assert_eq!(credentials.client_secret(), "s");
    }
}
