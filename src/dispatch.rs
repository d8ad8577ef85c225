use reqwest::header::{HeaderValue, ACCEPT, AUTHORIZATION};
use reqwest::{Client, Method, Response, Url};
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::auth::authorizer::Authorizer;
use crate::auth::prompt::RedirectPrompt;
use crate::config::Config;
use crate::errors::{
    client_request_error, config_error, invalid_request_error, json_error, request_error,
    service_unavailable_error,
};
use crate::resources::Resource;
use crate::Error;

/// Credential attached to a request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AuthKind {
    /// Static key sent as the `key` query parameter
    ApiKey,
    /// Bearer token from the authorization flow
    OAuth,
}

/// One API call, built per request and consumed by `Dispatcher::send`
#[derive(Debug, Clone)]
pub struct RequestDescriptor {
    pub method: Method,
    pub path: String,
    pub query: Vec<(String, String)>,
    pub body: Option<Value>,
}

impl RequestDescriptor {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: Vec::new(),
            body: None,
        }
    }

    pub fn with_query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((key.into(), value.into()));
        self
    }

    pub fn with_body(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }
}

pub struct Dispatcher {
    client: Client,
    base_url: Url,
    api_key: String,
    authorizer: Authorizer,
}

impl Dispatcher {
    pub fn new(config: &Config, prompt: Box<dyn RedirectPrompt>) -> Result<Self, Error> {
        let mut builder = Client::builder().user_agent(&config.user_agent);
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().map_err(config_error)?;

        let mut base_url = Url::parse(&config.api_base_url).map_err(config_error)?;
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        let authorizer = Authorizer::new(config, client.clone(), prompt)?;
        Ok(Self {
            client,
            base_url,
            api_key: config.credentials.api_key().clone(),
            authorizer,
        })
    }

    pub fn authorizer(&self) -> &Authorizer {
        &self.authorizer
    }

    pub(crate) fn client(&self) -> &Client {
        &self.client
    }

    fn endpoint_url(&self, path: &str) -> Result<Url, Error> {
        if path.is_empty() || path.starts_with("http") || path.starts_with("//") {
            return Err(invalid_request_error(format!(
                "expected a path relative to the API base, got {:?}",
                path
            )));
        }
        self.base_url
            .join(path.trim_start_matches('/'))
            .map_err(invalid_request_error)
    }

    /// Performs one request with the credential selected by `auth`
    ///
    /// Successful responses are returned as JSON, `Value::Null` for an empty body.
    pub async fn send(&self, descriptor: RequestDescriptor, auth: AuthKind) -> Result<Value, Error> {
        let url = self.endpoint_url(&descriptor.path)?;
        let mut request = self
            .client
            .request(descriptor.method.clone(), url)
            .header(ACCEPT, "application/json");
        if !descriptor.query.is_empty() {
            request = request.query(&descriptor.query);
        }

        match auth {
            AuthKind::ApiKey => {
                request = request.query(&[("key", self.api_key.as_str())]);
            }
            AuthKind::OAuth => {
                let token = self.authorizer.ensure_valid().await?;
                let mut auth_header =
                    HeaderValue::from_str(&format!("Bearer {}", token.access_token()))
                        .map_err(invalid_request_error)?;
                auth_header.set_sensitive(true);
                request = request.header(AUTHORIZATION, auth_header);
            }
        }

        if let Some(body) = &descriptor.body {
            request = request.json(body);
        }

        log::debug!("{} {} ({:?})", descriptor.method, descriptor.path, auth);
        let response = request.send().await.map_err(request_error)?;
        handle_response(response).await
    }

    /// Validates the call against the resource table, then sends it
    pub async fn call(
        &self,
        resource: Resource,
        query: Vec<(String, String)>,
        body: Option<Value>,
    ) -> Result<Value, Error> {
        let endpoint = resource.endpoint();
        endpoint.validate(&query, body.as_ref())?;
        let descriptor = RequestDescriptor {
            method: endpoint.method,
            path: endpoint.path.to_string(),
            query,
            body,
        };
        self.send(descriptor, endpoint.auth).await
    }

    pub(crate) async fn call_as<T: DeserializeOwned>(
        &self,
        resource: Resource,
        query: Vec<(String, String)>,
        body: Option<Value>,
    ) -> Result<T, Error> {
        let value = self.call(resource, query, body).await?;
        serde_json::from_value(value).map_err(json_error)
    }

    /// Like `call_as` for list endpoints, an empty response is an empty list
    pub(crate) async fn call_list<T: DeserializeOwned>(
        &self,
        resource: Resource,
        query: Vec<(String, String)>,
        body: Option<Value>,
    ) -> Result<Vec<T>, Error> {
        let value = self.call(resource, query, body).await?;
        if value.is_null() {
            return Ok(Vec::new());
        }
        serde_json::from_value(value).map_err(json_error)
    }
}

async fn handle_response(response: Response) -> Result<Value, Error> {
    let status = response.status();
    if status.is_server_error() {
        log::warn!("{} answered with {}", response.url().path(), status);
        return Err(service_unavailable_error(status.as_u16()));
    }

    let bytes = response.bytes().await.map_err(request_error)?;

    if status.is_client_error() {
        let body = serde_json::from_slice(&bytes)
            .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()));
        log_rejection(status.as_u16(), &body);
        return Err(client_request_error(status.as_u16(), body));
    }
    if !status.is_success() {
        return Err(service_unavailable_error(status.as_u16()));
    }

    if bytes.iter().all(u8::is_ascii_whitespace) {
        return Ok(Value::Null);
    }
    serde_json::from_slice(&bytes).map_err(json_error)
}

fn log_rejection(status: u16, body: &Value) {
    let reason = body
        .get("reason_phrase")
        .and_then(Value::as_str)
        .unwrap_or("no reason given");
    log::warn!("HTTP error code ({}): {}", status, reason);
    if let Some(details) = body.get("details") {
        log::warn!("Details: {}", details);
    }
}
