use super::{ClientConfig, Transport, TransportError};
use bytes::Bytes;
use http_body_util::Full;
use hyper::header::{CONTENT_TYPE, USER_AGENT};
use hyper::{Method, Request, Uri};
use hyper_util::client::legacy::{Client, connect::HttpConnector};
use hyper_util::rt::TokioExecutor;
use tokio::time::timeout;
use tracing::debug;

/// Plain-HTTP transport on the bare hyper client, fetch-style: no request
/// bound unless `ClientConfig::timeout` is set.
#[derive(Clone)]
pub struct HyperTransport {
    client: Client<HttpConnector, Full<Bytes>>,
    config: ClientConfig,
    endpoint_uri: Uri,
}

impl HyperTransport {
    pub fn new(config: ClientConfig) -> Result<Self, TransportError> {
        let endpoint_url = config.endpoint_url()?;
        if endpoint_url.scheme() != "http" {
            return Err(TransportError::InvalidConfiguration(format!(
                "hyper transport only supports http:// endpoints, got '{}'",
                config.endpoint
            )));
        }

        let endpoint_uri = endpoint_url.as_str().parse::<Uri>().map_err(|e| {
            TransportError::InvalidConfiguration(format!("Invalid endpoint URL: {e}"))
        })?;

        let mut connector = HttpConnector::new();
        connector.set_connect_timeout(Some(config.connect_timeout));

        let client = Client::builder(TokioExecutor::new()).build(connector);

        Ok(Self {
            client,
            config,
            endpoint_uri,
        })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }
}

impl Transport for HyperTransport {
    async fn send_json(&self, body: Bytes) -> Result<u16, TransportError> {
        debug!("POST {} ({} bytes)", self.endpoint_uri, body.len());

        let request = Request::builder()
            .method(Method::POST)
            .uri(self.endpoint_uri.clone())
            .header(CONTENT_TYPE, "application/json")
            .header(USER_AGENT, &self.config.user_agent)
            .body(Full::new(body))
            .map_err(|e| TransportError::Request(format!("Failed to build request: {e}")))?;

        let pending = self.client.request(request);
        let result = match self.config.timeout {
            Some(limit) => timeout(limit, pending).await.map_err(|_| {
                TransportError::Timeout(format!("no response within {}ms", limit.as_millis()))
            })?,
            None => pending.await,
        };

        let response = result.map_err(|e| {
            if e.is_connect() {
                TransportError::ConnectionFailed(e.to_string())
            } else {
                TransportError::Network(e.to_string())
            }
        })?;

        Ok(response.status().as_u16())
    }

    fn endpoint(&self) -> &str {
        &self.config.endpoint
    }
}

impl std::fmt::Debug for HyperTransport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HyperTransport")
            .field("config", &self.config)
            .field("endpoint_uri", &self.endpoint_uri)
            .finish_non_exhaustive()
    }
}
