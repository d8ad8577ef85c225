#![allow(dead_code)]

use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{Duration, Utc};
use itad_client::{Config, Credentials, Error, RedirectPrompt, Token, TokenStore};
use tempfile::TempDir;
use url::Url;
use wiremock::MockServer;

pub const API_KEY: &str = "test-key";
pub const CODE: &str = "the-code";

/// Answers the authorization URL like a browser that got redirected
#[derive(Clone, Default)]
pub struct ScriptedPrompt {
    urls: Arc<Mutex<Vec<String>>>,
    calls: Arc<AtomicUsize>,
    bad_answers: Arc<AtomicUsize>,
}

impl ScriptedPrompt {
    /// The first `count` answers are not URLs
    pub fn with_bad_answers(count: usize) -> Self {
        let prompt = Self::default();
        prompt.bad_answers.store(count, Ordering::SeqCst);
        prompt
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn urls(&self) -> Vec<String> {
        self.urls.lock().unwrap().clone()
    }
}

#[async_trait]
impl RedirectPrompt for ScriptedPrompt {
    async fn redirect_url(&self, authorization_url: &Url) -> Result<String, Error> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.urls.lock().unwrap().push(authorization_url.to_string());

        let remaining = self.bad_answers.load(Ordering::SeqCst);
        if remaining > 0 {
            self.bad_answers.store(remaining - 1, Ordering::SeqCst);
            return Ok("what do I paste here?".to_string());
        }

        let state = authorization_url
            .query_pairs()
            .find(|(key, _)| key == "state")
            .map(|(_, value)| value.into_owned())
            .expect("authorization url without state");
        Ok(format!("https://localhost/?code={}&state={}", CODE, state))
    }
}

pub struct Fixture {
    pub server: MockServer,
    pub dir: TempDir,
    pub config: Config,
}

impl Fixture {
    pub async fn new() -> Self {
        let server = MockServer::start().await;
        let dir = tempfile::tempdir().expect("tempdir");
        let config = Config::new(Credentials::new(API_KEY, "client", "secret"))
            .with_base_url(&server.uri())
            .with_token_file(dir.path().join("itad_tokens.json"));
        Self {
            server,
            dir,
            config,
        }
    }

    pub fn token_path(&self) -> PathBuf {
        self.config.token_file.clone()
    }

    pub fn store(&self) -> TokenStore {
        TokenStore::new(self.token_path())
    }

    pub async fn store_token(&self, access: &str, expires_in: Duration) -> Token {
        let token = Token::new(access, "stored-refresh", Utc::now() + expires_in, "Bearer");
        self.store().save(&token).await.expect("save token");
        token
    }
}

pub fn token_body(access: &str, refresh: &str) -> serde_json::Value {
    serde_json::json!({
        "token_type": "Bearer",
        "expires_in": 3600,
        "access_token": access,
        "refresh_token": refresh
    })
}
