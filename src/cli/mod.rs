pub mod commands;
pub mod query;
pub mod report;
pub mod serve;
pub mod start;
pub mod stop;

pub use commands::{Cli, Commands};

use serde::de::DeserializeOwned;
use crate::api::auth::API_TOKEN_ENV;
use crate::api::models::ErrorResponse;
use crate::errors::FuzzgateError;

/// HTTP client for talking to a running server, carrying the API token when set.
pub struct ServerClient {
    http: reqwest::Client,
    base: String,
    token: Option<String>,
}

impl ServerClient {
    pub fn new(server: &str) -> Self {
        Self {
            http: reqwest::Client::new(),
            base: format!("{}/api/modules/{}", server.trim_end_matches('/'), crate::fuzzer::MODULE_NAME),
            token: std::env::var(API_TOKEN_ENV).ok().filter(|t| !t.is_empty()),
        }
    }

    fn request(&self, method: reqwest::Method, path: &str) -> reqwest::RequestBuilder {
        let builder = self.http.request(method, format!("{}{}", self.base, path));
        match &self.token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, FuzzgateError> {
        let resp = self.send(self.request(reqwest::Method::GET, path)).await?;
        resp.json()
            .await
            .map_err(|e| FuzzgateError::Network(format!("Invalid response: {}", e)))
    }

    pub async fn post<B: serde::Serialize>(&self, path: &str, body: Option<&B>) -> Result<reqwest::Response, FuzzgateError> {
        let mut builder = self.request(reqwest::Method::POST, path);
        if let Some(body) = body {
            builder = builder.json(body);
        }
        self.send(builder).await
    }

    /// Send and map server-side error responses back onto error kinds.
    async fn send(&self, builder: reqwest::RequestBuilder) -> Result<reqwest::Response, FuzzgateError> {
        let resp = builder
            .send()
            .await
            .map_err(|e| FuzzgateError::Network(format!("Failed to reach server: {}", e)))?;

        let status = resp.status();
        if status.is_success() {
            return Ok(resp);
        }
        let message = resp
            .json::<ErrorResponse>()
            .await
            .map(|e| e.error)
            .unwrap_or_else(|_| status.to_string());
        Err(match status {
            reqwest::StatusCode::NOT_FOUND => FuzzgateError::NotFound(message),
            reqwest::StatusCode::BAD_REQUEST => FuzzgateError::InvalidParameter(message),
            _ => FuzzgateError::Plugin(message),
        })
    }
}
