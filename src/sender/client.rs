use super::Transport;
use bytes::Bytes;
use reqwest::header::{CONTENT_TYPE, HeaderValue};
use reqwest::{Client, ClientBuilder};
use std::time::Duration;
use thiserror::Error;
use tracing::debug;
use url::Url;

/// Collector that receives log records unless configured otherwise.
pub const DEFAULT_COLLECTOR_ENDPOINT: &str = "http://20.244.56.144/evaluation-service/logs";

/// Request bound applied by default to a single submission.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);

#[derive(Error, Debug)]
pub enum TransportError {
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),
    #[error("Request timeout: {0}")]
    Timeout(String),
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),
    #[error("Request error: {0}")]
    Request(String),
    #[error("Network error: {0}")]
    Network(String),
}

impl From<reqwest::Error> for TransportError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            TransportError::Timeout(err.to_string())
        } else if err.is_connect() {
            TransportError::ConnectionFailed(err.to_string())
        } else if err.is_builder() || err.is_request() {
            TransportError::Request(err.to_string())
        } else {
            TransportError::Network(err.to_string())
        }
    }
}

#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub endpoint: String,
    /// Whole-request bound; `None` leaves it to the platform default.
    pub timeout: Option<Duration>,
    pub connect_timeout: Duration,
    pub user_agent: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_COLLECTOR_ENDPOINT.to_string(),
            timeout: Some(DEFAULT_TIMEOUT),
            connect_timeout: Duration::from_secs(2),
            user_agent: format!("logging-middleware/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl ClientConfig {
    pub fn with_endpoint(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            ..Self::default()
        }
    }

    pub(crate) fn endpoint_url(&self) -> Result<Url, TransportError> {
        self.endpoint.parse().map_err(|e| {
            TransportError::InvalidConfiguration(format!(
                "Invalid endpoint URL '{}': {}",
                self.endpoint, e
            ))
        })
    }
}

/// Transport backed by a pooled `reqwest` client.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: Client,
    config: ClientConfig,
    endpoint_url: Url,
}

impl ReqwestTransport {
    pub fn new(config: ClientConfig) -> Result<Self, TransportError> {
        let endpoint_url = config.endpoint_url()?;

        let mut client_builder = ClientBuilder::new()
            .connect_timeout(config.connect_timeout)
            .user_agent(&config.user_agent);

        if let Some(timeout) = config.timeout {
            client_builder = client_builder.timeout(timeout);
        }

        let client = client_builder.build().map_err(|e| {
            TransportError::InvalidConfiguration(format!("Failed to build HTTP client: {e}"))
        })?;

        Ok(Self {
            client,
            config,
            endpoint_url,
        })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }
}

impl Transport for ReqwestTransport {
    async fn send_json(&self, body: Bytes) -> Result<u16, TransportError> {
        debug!("POST {} ({} bytes)", self.endpoint_url, body.len());

        let response = self
            .client
            .post(self.endpoint_url.clone())
            .header(CONTENT_TYPE, HeaderValue::from_static("application/json"))
            .body(body)
            .send()
            .await?;

        Ok(response.status().as_u16())
    }

    fn endpoint(&self) -> &str {
        &self.config.endpoint
    }
}
