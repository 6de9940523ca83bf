//! HTTP transport seam
//!
//! The probe only needs "send a request, get status + parsed body back". The
//! trait keeps the step logic independent of `reqwest` so tests can script
//! responses without a network.

use crate::error::Result;
use async_trait::async_trait;
use reqwest::{Method, StatusCode};
use serde_json::Value;
use std::time::Duration;

/// Status and parsed JSON body of a completed exchange.
///
/// Bodies that are empty or not JSON are represented as `Value::Null`.
#[derive(Debug, Clone)]
pub struct TransportResponse {
    pub status: StatusCode,
    pub body: Value,
}

#[async_trait]
pub trait HttpTransport: Send + Sync {
    /// Send one request. `body`, when present, is sent as
    /// `application/json`.
    ///
    /// Only failures to obtain a response are errors; any status code is a
    /// successful exchange.
    async fn send(&self, method: Method, url: &str, body: Option<&Value>)
        -> Result<TransportResponse>;
}

/// `reqwest`-backed transport used by the binary.
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    pub fn new(timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(concat!("crud-probe/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self { client })
    }

    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn send(
        &self,
        method: Method,
        url: &str,
        body: Option<&Value>,
    ) -> Result<TransportResponse> {
        let mut request = self.client.request(method.clone(), url);
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await?;
        let status = response.status();
        let bytes = response.bytes().await?;
        let body = parse_body(&bytes);

        tracing::debug!(%method, url, status = status.as_u16(), body = %body, "Response received");

        Ok(TransportResponse { status, body })
    }
}

fn parse_body(bytes: &[u8]) -> Value {
    if bytes.is_empty() {
        return Value::Null;
    }
    serde_json::from_slice(bytes).unwrap_or(Value::Null)
}
