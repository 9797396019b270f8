//! HTTP transport
//!
//! The transport only moves bytes; it reports non-2xx statuses inside
//! `WireResponse` so the orchestrator can tell "server rejected auth" apart
//! from transport failures and malformed payloads.

use async_trait::async_trait;
use reqwest::{header, Client};
use tracing::debug;

use crate::errors::DriveError;
use crate::http::router::WireRequest;

/// Raw response from the server.
#[derive(Debug, Clone)]
pub struct WireResponse {
    pub status: u16,
    pub body: String,
}

impl WireResponse {
    /// Classify the response: 2xx yields the body, 401 is an auth rejection,
    /// anything else is a server-status failure.
    pub fn into_body(self) -> Result<String, DriveError> {
        match self.status {
            200..=299 => Ok(self.body),
            401 => Err(DriveError::AuthRejected {
                status: self.status,
                body: self.body,
            }),
            _ => Err(DriveError::ServerStatus {
                status: self.status,
                body: self.body,
            }),
        }
    }
}

/// Transport trait for testability. The real implementation is
/// [`HttpTransport`]; tests substitute scripted responses.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn execute(&self, request: WireRequest) -> Result<WireResponse, DriveError>;
}

/// reqwest-backed transport.
pub struct HttpTransport {
    client: Client,
}

impl HttpTransport {
    pub fn new(timeout_secs: u64) -> Result<Self, DriveError> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(timeout_secs))
            .build()?;

        Ok(Self { client })
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn execute(&self, request: WireRequest) -> Result<WireResponse, DriveError> {
        debug!("{} {}", request.method, request.url);

        let mut builder = self
            .client
            .request(request.method, request.url)
            .header(header::AUTHORIZATION, request.authorization);

        if let Some(query) = &request.query {
            builder = builder.query(query);
        }
        if let Some(form) = &request.form {
            builder = builder.form(form);
        }

        let response = builder.send().await?;
        let status = response.status().as_u16();
        let body = response.text().await?;

        Ok(WireResponse { status, body })
    }
}
