pub mod client;
pub mod diagnostics;
pub mod http;
pub mod transmission;

pub use client::{
    ClientConfig, DEFAULT_COLLECTOR_ENDPOINT, DEFAULT_TIMEOUT, ReqwestTransport, TransportError,
};
pub use diagnostics::{DiagnosticKind, DiagnosticLine, Diagnostics, MemoryDiagnostics, TracingDiagnostics};
pub use http::HyperTransport;
pub use transmission::{LogSubmitter, is_accepted_status};

use bytes::Bytes;
use std::future::Future;

/// Capability to deliver one JSON document to the collector.
///
/// Implementations return the HTTP status of whatever response came back;
/// deciding whether that status counts as success is left to the caller.
pub trait Transport: Send + Sync {
    fn send_json(&self, body: Bytes) -> impl Future<Output = Result<u16, TransportError>> + Send;
    fn endpoint(&self) -> &str;
}

/// Runtime choice between the two HTTP stacks.
#[derive(Debug, Clone)]
pub enum CollectorTransport {
    Reqwest(ReqwestTransport),
    Hyper(HyperTransport),
}

impl Transport for CollectorTransport {
    async fn send_json(&self, body: Bytes) -> Result<u16, TransportError> {
        match self {
            CollectorTransport::Reqwest(transport) => transport.send_json(body).await,
            CollectorTransport::Hyper(transport) => transport.send_json(body).await,
        }
    }

    fn endpoint(&self) -> &str {
        match self {
            CollectorTransport::Reqwest(transport) => transport.endpoint(),
            CollectorTransport::Hyper(transport) => transport.endpoint(),
        }
    }
}

impl From<ReqwestTransport> for CollectorTransport {
    fn from(transport: ReqwestTransport) -> Self {
        CollectorTransport::Reqwest(transport)
    }
}

impl From<HyperTransport> for CollectorTransport {
    fn from(transport: HyperTransport) -> Self {
        CollectorTransport::Hyper(transport)
    }
}
