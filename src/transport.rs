//! HTTP transport used by [`VertexConnection`](crate::VertexConnection).
//!
//! The connection only decides *what* to send; [`HttpTransport`] decides
//! *how*. [`ReqwestTransport`] is the default implementation. Tests and
//! callers with their own HTTP stack can plug in anything else.

use crate::errors::VertexError;
use crate::http::error_helpers::{check_response, parse_json_body};
use crate::http::loud_wire;
use async_trait::async_trait;
use reqwest::Client as ReqwestClient;
use reqwest::Method;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use serde_json::Value;
use std::time::Duration;
use tracing::debug;

/// A single HTTP request, fully described.
#[derive(Debug, Clone, PartialEq)]
pub struct TransportRequest {
    pub method: Method,
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: Option<Value>,
}

/// A successful HTTP response with its body decoded as JSON.
#[derive(Debug, Clone, PartialEq)]
pub struct TransportResponse {
    pub status: u16,
    /// Decoded body; `Value::Null` when the body was empty.
    pub data: Value,
}

/// Performs HTTP requests on behalf of a connection.
#[async_trait]
pub trait HttpTransport: Send + Sync {
    /// Sends `request` and returns the decoded response.
    ///
    /// # Errors
    ///
    /// Implementations return an error for network failures, non-success
    /// statuses, and undecodable bodies.
    async fn request(&self, request: TransportRequest) -> Result<TransportResponse, VertexError>;
}

#[async_trait]
impl<T: HttpTransport + ?Sized> HttpTransport for std::sync::Arc<T> {
    async fn request(&self, request: TransportRequest) -> Result<TransportResponse, VertexError> {
        (**self).request(request).await
    }
}

/// [`HttpTransport`] backed by a `reqwest` client.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    http_client: ReqwestClient,
}

/// Builder for [`ReqwestTransport`] instances.
///
/// # Example
///
/// ```
/// use vertexai_connection::ReqwestTransport;
/// use std::time::Duration;
///
/// let transport = ReqwestTransport::builder()
///     .timeout(Duration::from_secs(120))
///     .connect_timeout(Duration::from_secs(10))
///     .default_header("Authorization", "Bearer ya29.token")
///     .build()
///     .expect("valid transport configuration");
/// ```
#[derive(Debug, Default)]
pub struct ReqwestTransportBuilder {
    timeout: Option<Duration>,
    connect_timeout: Option<Duration>,
    default_headers: Vec<(String, String)>,
}

impl ReqwestTransportBuilder {
    /// Sets the total request timeout.
    ///
    /// If not set, uses reqwest's default (no timeout).
    #[must_use]
    pub const fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Sets the connection timeout.
    #[must_use]
    pub const fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = Some(timeout);
        self
    }

    /// Adds a header sent with every request, e.g. a pre-obtained
    /// `Authorization: Bearer ...` token.
    #[must_use]
    pub fn default_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.default_headers.push((name.into(), value.into()));
        self
    }

    /// Builds the transport.
    ///
    /// # Errors
    ///
    /// Returns [`VertexError::ClientBuild`] if a default header is invalid or
    /// the TLS backend cannot be initialized.
    pub fn build(self) -> Result<ReqwestTransport, VertexError> {
        let mut builder = ReqwestClient::builder();

        if let Some(timeout) = self.timeout {
            builder = builder.timeout(timeout);
        }

        if let Some(connect_timeout) = self.connect_timeout {
            builder = builder.connect_timeout(connect_timeout);
        }

        if !self.default_headers.is_empty() {
            builder = builder.default_headers(header_map(&self.default_headers)?);
        }

        let http_client = builder
            .build()
            .map_err(|e| VertexError::ClientBuild(e.to_string()))?;

        Ok(ReqwestTransport { http_client })
    }
}

fn header_map(headers: &[(String, String)]) -> Result<HeaderMap, VertexError> {
    let mut map = HeaderMap::with_capacity(headers.len());
    for (name, value) in headers {
        let name = HeaderName::from_bytes(name.as_bytes())
            .map_err(|e| VertexError::ClientBuild(format!("invalid header name {name:?}: {e}")))?;
        let mut value = HeaderValue::from_str(value)
            .map_err(|e| VertexError::ClientBuild(format!("invalid value for header {name}: {e}")))?;
        value.set_sensitive(true);
        map.insert(name, value);
    }
    Ok(map)
}

impl ReqwestTransport {
    /// Creates a new builder for `ReqwestTransport` instances.
    #[must_use]
    pub fn builder() -> ReqwestTransportBuilder {
        ReqwestTransportBuilder::default()
    }

    /// Wraps an existing `reqwest` client.
    #[must_use]
    pub const fn from_client(http_client: ReqwestClient) -> Self {
        Self { http_client }
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn request(&self, request: TransportRequest) -> Result<TransportResponse, VertexError> {
        let TransportRequest {
            method,
            url,
            headers,
            body,
        } = request;

        let request_id = loud_wire::next_request_id();
        loud_wire::log_request(request_id, method.as_str(), &url, &headers, body.as_ref());
        debug!(%method, url = %url, "Sending request");

        let mut builder = self.http_client.request(method, &url);
        for (name, value) in &headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        if let Some(body) = &body {
            builder = builder.json(body);
        }

        let response = builder.send().await?;
        let status = response.status().as_u16();
        loud_wire::log_response_status(request_id, status);

        let response = check_response(response).await?;
        let text = response.text().await?;
        loud_wire::log_response_body(request_id, &text);

        let data = parse_json_body(&text)?;
        debug!(status, "Received response");

        Ok(TransportResponse { status, data })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_default() {
        assert!(ReqwestTransport::builder().build().is_ok());
    }

    #[test]
    fn test_builder_with_timeouts() {
        let transport = ReqwestTransport::builder()
            .timeout(Duration::from_secs(120))
            .connect_timeout(Duration::from_secs(10))
            .build();
        assert!(transport.is_ok());
    }

    #[test]
    fn test_builder_invalid_header_name() {
        let err = ReqwestTransport::builder()
            .default_header("bad header", "value")
            .build()
            .unwrap_err();
        assert!(matches!(err, VertexError::ClientBuild(ref msg) if msg.contains("bad header")));
    }

    #[test]
    fn test_builder_invalid_header_value() {
        let err = ReqwestTransport::builder()
            .default_header("Authorization", "Bearer \n injected")
            .build()
            .unwrap_err();
        assert!(matches!(err, VertexError::ClientBuild(_)));
    }

    #[test]
    fn test_header_map() {
        let map = header_map(&[
            ("Authorization".to_string(), "Bearer t".to_string()),
            ("x-goog-user-project".to_string(), "p".to_string()),
        ])
        .unwrap();
        assert_eq!(map.len(), 2);
        assert!(map["authorization"].is_sensitive());
        assert_eq!(map["x-goog-user-project"], "p");
    }
}
