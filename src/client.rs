//! Analysis service HTTP client
//!
//! Blocking reqwest client (no async runtime required). One POST per
//! submission; no retries — the user re-invokes manually. A deployment-level
//! timeout lives on the client itself.

use std::time::Duration;

use serde_json::Value;
use thiserror::Error;

use crate::core::request::TransportPayload;

/// Path suffix appended to the base URL. The trailing slash is required by
/// the service.
pub const DEFAULT_API_PATH: &str = "/api/";

/// Transport error taxonomy. Validation failures never reach this layer;
/// the composer rejects empty requests before any network call.
#[derive(Debug, Error)]
pub enum ClientError {
    /// Network-level failure (DNS, connect, timeout).
    #[error("Network error: {0}")]
    Network(String),
    /// Non-2xx HTTP status, carrying the response body text if any.
    #[error("HTTP {status}: {body}")]
    Http { status: u16, body: String },
    /// The response body was not valid JSON.
    #[error("Parse error: {0}")]
    Parse(String),
    /// A payload part could not be converted to a multipart part.
    #[error("Invalid request part: {0}")]
    Part(String),
}

impl ClientError {
    /// Short message for the transport-error card, in the `HTTP <status>`
    /// form with the body appended only when present.
    pub fn card_message(&self) -> String {
        match self {
            ClientError::Http { status, body } if body.is_empty() => {
                format!("HTTP {}", status)
            }
            ClientError::Http { status, body } => format!("HTTP {}: {}", status, body),
            other => other.to_string(),
        }
    }
}

/// Where submissions go: base URL plus the fixed path suffix, with an
/// optional debug query flag.
#[derive(Debug, Clone)]
pub struct Endpoint {
    pub base: String,
    pub path: String,
    pub debug: bool,
}

impl Endpoint {
    pub fn new(base: impl Into<String>, path: impl Into<String>, debug: bool) -> Self {
        Self {
            base: base.into(),
            path: path.into(),
            debug,
        }
    }

    /// Full submission URL.
    pub fn url(&self) -> String {
        let base = self.base.trim_end_matches('/');
        let path = if self.path.starts_with('/') {
            self.path.clone()
        } else {
            format!("/{}", self.path)
        };
        let mut url = format!("{}{}", base, path);
        if self.debug {
            url.push_str("?debug=1");
        }
        url
    }
}

/// Analysis service client (blocking).
pub struct AgentClient {
    http: reqwest::blocking::Client,
    endpoint: Endpoint,
}

impl AgentClient {
    pub fn new(endpoint: Endpoint) -> Result<Self, ClientError> {
        let http = reqwest::blocking::Client::builder()
            .user_agent(format!("dossier/{}", env!("CARGO_PKG_VERSION")))
            .timeout(Duration::from_secs(60))
            .build()
            .map_err(|e| ClientError::Network(e.to_string()))?;
        Ok(Self { http, endpoint })
    }

    /// POST the multipart payload and parse the JSON response.
    pub fn submit(&self, payload: TransportPayload) -> Result<Value, ClientError> {
        let mut form = reqwest::blocking::multipart::Form::new();
        for part in payload.parts {
            let mut p = reqwest::blocking::multipart::Part::bytes(part.bytes)
                .mime_str(&part.media_type)
                .map_err(|e| ClientError::Part(e.to_string()))?;
            if let Some(name) = part.file_name {
                p = p.file_name(name);
            }
            form = form.part(part.field, p);
        }

        let response = self
            .http
            .post(self.endpoint.url())
            .multipart(form)
            .send()
            .map_err(|e| ClientError::Network(e.to_string()))?;

        let status = response.status().as_u16();
        if !response.status().is_success() {
            let body = response.text().unwrap_or_default();
            return Err(ClientError::Http { status, body });
        }

        response
            .json::<Value>()
            .map_err(|e| ClientError::Parse(e.to_string()))
    }
}
