use std::collections::HashMap;

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use chrono::Utc;
use rand::RngCore;
use reqwest::{Client, Url};
use sha2::{Digest, Sha256};

use crate::auth::types::{Token, TokenResponse};
use crate::config::Config;
use crate::errors::{
    auth_exchange_error, client_request_error, config_error, invalid_redirect_error,
    request_error, service_unavailable_error,
};
use crate::Error;

// OAuth2 authorization code flow with PKCE
pub mod authorizer;
pub mod prompt;
pub mod store;
pub mod types;

/// OAuth client settings resolved from `Config`
#[derive(Clone, Debug)]
pub(crate) struct OAuthSettings {
    pub client_id: String,
    pub client_secret: String,
    pub auth_url: Url,
    pub token_url: Url,
    pub redirect_uri: String,
    pub scopes: Vec<String>,
}

impl OAuthSettings {
    pub fn from_config(config: &Config) -> Result<Self, Error> {
        Ok(Self {
            client_id: config.credentials.client_id().clone(),
            client_secret: config.credentials.client_secret().clone(),
            auth_url: Url::parse(&config.auth_url).map_err(config_error)?,
            token_url: Url::parse(&config.token_url).map_err(config_error)?,
            redirect_uri: config.redirect_uri.clone(),
            scopes: config.scopes.clone(),
        })
    }
}

#[derive(Debug, Clone)]
pub(crate) struct Pkce {
    pub verifier: String,
    pub challenge: String,
}

pub(crate) fn generate_pkce() -> Pkce {
    let mut random = [0u8; 64];
    rand::thread_rng().fill_bytes(&mut random);
    let verifier = URL_SAFE_NO_PAD.encode(random);
    let challenge = code_challenge_s256(&verifier);
    Pkce {
        verifier,
        challenge,
    }
}

pub(crate) fn code_challenge_s256(verifier: &str) -> String {
    URL_SAFE_NO_PAD.encode(Sha256::digest(verifier.as_bytes()))
}

pub(crate) fn random_state() -> String {
    let mut random = [0u8; 24];
    rand::thread_rng().fill_bytes(&mut random);
    URL_SAFE_NO_PAD.encode(random)
}

pub(crate) fn authorization_url(settings: &OAuthSettings, pkce: &Pkce, state: &str) -> Url {
    let mut url = settings.auth_url.clone();
    url.query_pairs_mut()
        .append_pair("response_type", "code")
        .append_pair("client_id", &settings.client_id)
        .append_pair("redirect_uri", &settings.redirect_uri)
        .append_pair("scope", &settings.scopes.join(" "))
        .append_pair("state", state)
        .append_pair("code_challenge", &pkce.challenge)
        .append_pair("code_challenge_method", "S256");
    url
}

/// Extracts the authorization code from the URL the browser was redirected to
pub(crate) fn parse_redirect(redirect: &str, expected_state: &str) -> Result<String, Error> {
    let url = Url::parse(redirect.trim()).map_err(invalid_redirect_error)?;
    let params: HashMap<String, String> = url.query_pairs().into_owned().collect();

    match params.get("state") {
        Some(state) if state == expected_state => {}
        Some(_) => return Err(invalid_redirect_error("state mismatch")),
        None => return Err(invalid_redirect_error("missing state parameter")),
    }

    if let Some(error) = params.get("error") {
        let description = params
            .get("error_description")
            .map(|d| format!(": {}", d))
            .unwrap_or_default();
        return Err(auth_exchange_error(format!(
            "authorization denied ({}){}",
            error, description
        )));
    }

    match params.get("code") {
        Some(code) if !code.is_empty() => Ok(code.clone()),
        _ => Err(invalid_redirect_error("missing code parameter")),
    }
}

pub(crate) async fn get_token_with_code(
    client: &Client,
    settings: &OAuthSettings,
    code: &str,
    verifier: &str,
) -> Result<Token, Error> {
    let params = [
        ("grant_type", "authorization_code"),
        ("code", code),
        ("redirect_uri", settings.redirect_uri.as_str()),
        ("client_id", settings.client_id.as_str()),
        ("code_verifier", verifier),
    ];
    let response = client
        .post(settings.token_url.clone())
        .basic_auth(&settings.client_id, Some(&settings.client_secret))
        .form(&params)
        .send()
        .await
        .map_err(auth_exchange_error)?;

    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(auth_exchange_error(format!(
            "token endpoint returned {}: {}",
            status, body
        )));
    }

    let new_token: TokenResponse = response.json().await.map_err(auth_exchange_error)?;
    let expires_in = new_token.expires_in;
    new_token
        .into_token(None, Utc::now())
        .ok_or_else(|| auth_exchange_error(format!("expires_in out of range: {}", expires_in)))
}

pub(crate) async fn refresh_token(
    client: &Client,
    settings: &OAuthSettings,
    token: &Token,
) -> Result<Token, Error> {
    let params = [
        ("grant_type", "refresh_token"),
        ("refresh_token", token.refresh_token().as_str()),
    ];
    let response = client
        .post(settings.token_url.clone())
        .basic_auth(&settings.client_id, Some(&settings.client_secret))
        .form(&params)
        .send()
        .await
        .map_err(request_error)?;

    let status = response.status().as_u16();
    if response.status().is_client_error() {
        let body = response.text().await.unwrap_or_default();
        return Err(client_request_error(status, serde_json::Value::String(body)));
    }
    if !response.status().is_success() {
        return Err(service_unavailable_error(status));
    }

    let new_token: TokenResponse = response.json().await.map_err(request_error)?;
    let expires_in = new_token.expires_in;
    new_token
        .into_token(Some(token.refresh_token()), Utc::now())
        .ok_or_else(|| request_error(format!("expires_in out of range: {}", expires_in)))
}
