use crate::form_engine::{HttpResponse, Transport, TransportError, WriteMethod, WriteRequest};
use async_trait::async_trait;
use gloo::net::http::Request;
use web_sys::RequestCredentials;

/// API client for communicating with the booking server
#[derive(Clone, Debug, PartialEq)]
pub struct ApiClient {
    base_url: String,
}

impl ApiClient {
    /// Create a client that talks to the page's own origin
    pub fn new() -> Self {
        Self {
            base_url: String::new(),
        }
    }

    /// Create a new API client with a custom base URL
    pub fn with_base_url(base_url: String) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn url_for(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

impl Default for ApiClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait(?Send)]
impl Transport for ApiClient {
    async fn send(&self, request: WriteRequest) -> Result<HttpResponse, TransportError> {
        let url = self.url_for(&request.path);
        let builder = match request.method {
            WriteMethod::Create => Request::post(&url),
            WriteMethod::Update => Request::put(&url),
        };

        let response = builder
            .header("Content-Type", "application/json")
            .credentials(RequestCredentials::SameOrigin)
            .body(request.body)
            .map_err(|e| TransportError::Request(e.to_string()))?
            .send()
            .await
            .map_err(|e| TransportError::Network(format!("{} {}: {}", request.method.as_http(), url, e)))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| TransportError::Network(format!("Failed to read response: {}", e)))?;

        Ok(HttpResponse { status, body })
    }
}
