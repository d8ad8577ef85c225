use parking_lot::Mutex;
use reqwest::Client;

use crate::auth::prompt::RedirectPrompt;
use crate::auth::store::TokenStore;
use crate::auth::types::Token;
use crate::auth::{
    authorization_url, generate_pkce, get_token_with_code, parse_redirect, random_state,
    refresh_token, OAuthSettings,
};
use crate::config::{Config, CorruptTokenPolicy};
use crate::errors::ErrorKind;
use crate::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthState {
    /// No usable token is known
    Unauthenticated,
    /// Waiting for the user to finish the browser flow
    Authorizing,
    Authenticated,
    /// Token found but past its expiry margin
    Expired,
    Refreshing,
}

/// Owns the OAuth token lifecycle: acquire, persist, refresh and reuse
pub struct Authorizer {
    client: Client,
    settings: OAuthSettings,
    store: TokenStore,
    prompt: Box<dyn RedirectPrompt>,
    refresh_margin: chrono::Duration,
    redirect_attempts: u32,
    corrupt_policy: CorruptTokenPolicy,
    token: tokio::sync::Mutex<Option<Token>>,
    state: Mutex<AuthState>,
}

impl Authorizer {
    pub fn new(
        config: &Config,
        client: Client,
        prompt: Box<dyn RedirectPrompt>,
    ) -> Result<Self, Error> {
        Ok(Self {
            client,
            settings: OAuthSettings::from_config(config)?,
            store: TokenStore::new(config.token_file.clone()),
            prompt,
            refresh_margin: config.refresh_margin,
            redirect_attempts: config.redirect_attempts.max(1),
            corrupt_policy: config.corrupt_token_policy,
            token: tokio::sync::Mutex::new(None),
            state: Mutex::new(AuthState::Unauthenticated),
        })
    }

    pub fn state(&self) -> AuthState {
        *self.state.lock()
    }

    pub fn store(&self) -> &TokenStore {
        &self.store
    }

    fn set_state(&self, state: AuthState) {
        *self.state.lock() = state;
    }

    /// Returns a token that is valid for at least the refresh margin
    ///
    /// A cached valid token is returned without touching disk or network.
    /// Otherwise the stored token is refreshed, or the full authorization
    /// flow runs when there is none or the refresh is rejected.
    pub async fn ensure_valid(&self) -> Result<Token, Error> {
        let mut cached = self.token.lock().await;
        if let Some(token) = cached.as_ref() {
            if !token.is_expired(self.refresh_margin) {
                return Ok(token.clone());
            }
        }

        let _lock = self.store.lock().await?;
        let token = match self.load_stored().await? {
            Some(token) if !token.is_expired(self.refresh_margin) => {
                log::debug!("Using stored token {}", token.fingerprint());
                self.set_state(AuthState::Authenticated);
                token
            }
            Some(token) => {
                self.set_state(AuthState::Expired);
                self.refresh_or_authorize(token).await?
            }
            None => {
                self.set_state(AuthState::Unauthenticated);
                self.authorize().await?
            }
        };

        *cached = Some(token.clone());
        Ok(token)
    }

    /// Runs the authorization flow even if a token is already stored
    pub async fn acquire(&self) -> Result<Token, Error> {
        let mut cached = self.token.lock().await;
        let _lock = self.store.lock().await?;
        let token = self.authorize().await?;
        *cached = Some(token.clone());
        Ok(token)
    }

    async fn load_stored(&self) -> Result<Option<Token>, Error> {
        match self.store.load().await {
            Err(err)
                if matches!(err.kind(), ErrorKind::CorruptTokenStore)
                    && self.corrupt_policy == CorruptTokenPolicy::Reauthorize =>
            {
                log::warn!(
                    "Ignoring corrupt token file {}: {:?}",
                    self.store.path().display(),
                    err
                );
                Ok(None)
            }
            result => result,
        }
    }

    async fn refresh_or_authorize(&self, token: Token) -> Result<Token, Error> {
        self.set_state(AuthState::Refreshing);
        log::debug!("Refreshing token {}", token.fingerprint());
        match refresh_token(&self.client, &self.settings, &token).await {
            Ok(new_token) => {
                self.store.save(&new_token).await?;
                self.set_state(AuthState::Authenticated);
                Ok(new_token)
            }
            Err(err) => {
                log::warn!("Token refresh failed, authorizing again: {}", err);
                self.authorize().await
            }
        }
    }

    async fn authorize(&self) -> Result<Token, Error> {
        self.set_state(AuthState::Authorizing);
        let pkce = generate_pkce();
        let state = random_state();
        let url = authorization_url(&self.settings, &pkce, &state);
        log::debug!("Starting authorization flow");

        let result = self.exchange(&url, &state, &pkce.verifier).await;
        match result {
            Ok(token) => {
                self.store.save(&token).await?;
                log::debug!("Authorized with token {}", token.fingerprint());
                self.set_state(AuthState::Authenticated);
                Ok(token)
            }
            Err(err) => {
                self.set_state(AuthState::Unauthenticated);
                Err(err)
            }
        }
    }

    async fn exchange(
        &self,
        url: &reqwest::Url,
        state: &str,
        verifier: &str,
    ) -> Result<Token, Error> {
        let mut attempt = 1;
        let code = loop {
            let code = self
                .prompt
                .redirect_url(url)
                .await
                .and_then(|redirect| parse_redirect(&redirect, state));
            match code {
                Ok(code) => break code,
                Err(err)
                    if matches!(err.kind(), ErrorKind::InvalidRedirect)
                        && attempt < self.redirect_attempts =>
                {
                    log::warn!("Invalid redirect url ({:?}), asking again", err);
                    attempt += 1;
                }
                Err(err) => return Err(err),
            }
        };
        get_token_with_code(&self.client, &self.settings, &code, verifier).await
    }
}
