use crate::errors::VertexError;
use crate::http::common::{PredictMethod, build_url};
use crate::identity::ProjectIdResolver;
use crate::params::ConnectionParams;
use crate::transport::{HttpTransport, TransportRequest, TransportResponse};
use reqwest::Method;
use serde_json::{Value, json};
use tracing::debug;

/// `User-Agent` sent with every prediction request.
const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// A connection to one Vertex AI model or deployed endpoint.
///
/// Holds no per-call state: every [`build_url`](Self::build_url) asks the
/// resolver for the project ID again, and concurrent calls are independent.
///
/// # Example
///
/// ```no_run
/// use vertexai_connection::{
///     ConnectionParams, EnvProjectId, ReqwestTransport, VertexConnection,
/// };
///
/// # async fn example() -> Result<(), vertexai_connection::VertexError> {
/// let transport = ReqwestTransport::builder()
///     .default_header("Authorization", "Bearer ya29.token")
///     .build()?;
/// let connection = VertexConnection::new(
///     ConnectionParams::new("text-bison"),
///     EnvProjectId,
///     transport,
///     false,
/// );
///
/// let response = connection
///     .request(
///         vec![serde_json::json!({"prompt": "Hello"})],
///         serde_json::json!({"temperature": 0.2}),
///     )
///     .await?;
/// println!("{}", response.data);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct VertexConnection<R, T> {
    params: ConnectionParams,
    resolver: R,
    transport: T,
    streaming: bool,
}

impl<R, T> VertexConnection<R, T>
where
    R: ProjectIdResolver,
    T: HttpTransport,
{
    #[must_use]
    pub const fn new(params: ConnectionParams, resolver: R, transport: T, streaming: bool) -> Self {
        Self {
            params,
            resolver,
            transport,
            streaming,
        }
    }

    #[must_use]
    pub const fn params(&self) -> &ConnectionParams {
        &self.params
    }

    #[must_use]
    pub const fn streaming(&self) -> bool {
        self.streaming
    }

    /// The prediction method this connection calls.
    #[must_use]
    pub const fn method(&self) -> PredictMethod {
        PredictMethod::from_streaming(self.streaming)
    }

    /// Resolves the project ID and returns the prediction URL.
    ///
    /// # Errors
    ///
    /// Returns the resolver's error unchanged.
    pub async fn build_url(&self) -> Result<String, VertexError> {
        build_url(&self.params, &self.resolver, self.streaming).await
    }

    /// POSTs `{"instances": ..., "parameters": ...}` to the prediction URL.
    ///
    /// The response body is returned as decoded JSON without interpretation.
    /// If the project ID cannot be resolved, no request is sent.
    ///
    /// # Errors
    ///
    /// Returns the resolver's error, or whatever the transport reports.
    pub async fn request(
        &self,
        instances: Vec<Value>,
        parameters: Value,
    ) -> Result<TransportResponse, VertexError> {
        let url = self.build_url().await?;
        debug!(model = %self.params.model, method = %self.method(), "Sending prediction request");

        let request = TransportRequest {
            method: Method::POST,
            url,
            headers: vec![
                ("Content-Type".to_string(), "application/json".to_string()),
                ("User-Agent".to_string(), USER_AGENT.to_string()),
            ],
            body: Some(json!({
                "instances": instances,
                "parameters": parameters,
            })),
        };

        self.transport.request(request).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::identity::StaticProjectId;
    use async_trait::async_trait;

    struct Unreachable;

    #[async_trait]
    impl HttpTransport for Unreachable {
        async fn request(&self, _: TransportRequest) -> Result<TransportResponse, VertexError> {
            panic!("transport should not be called");
        }
    }

    fn connection(streaming: bool) -> VertexConnection<StaticProjectId, Unreachable> {
        VertexConnection::new(
            ConnectionParams::new("text-bison"),
            StaticProjectId::new("fake_project_id"),
            Unreachable,
            streaming,
        )
    }

    #[test]
    fn test_user_agent() {
        assert!(USER_AGENT.starts_with("vertexai-connection/"));
    }

    #[test]
    fn test_accessors() {
        let conn = connection(true);
        assert!(conn.streaming());
        assert_eq!(conn.method(), PredictMethod::ServerStreamingPredict);
        assert_eq!(conn.params().model, "text-bison");
        assert_eq!(connection(false).method(), PredictMethod::Predict);
    }

    #[tokio::test]
    async fn test_build_url_uses_streaming_flag() {
        assert!(connection(false).build_url().await.unwrap().ends_with(":predict"));
        assert!(
            connection(true)
                .build_url()
                .await
                .unwrap()
                .ends_with(":serverStreamingPredict")
        );
    }
}
