use thiserror::Error;

/// Defines errors that can occur when building URLs for, or talking to, the
/// Vertex AI prediction API.
///
/// URL construction itself cannot fail. The only error surfaced by
/// [`build_url`](crate::build_url) is whatever the project ID resolver
/// returned, passed through untouched.
///
/// # Example: Handling API Errors
///
/// ```ignore
/// match connection.request(instances, parameters).await {
///     Err(VertexError::ProjectId(reason)) => {
///         tracing::error!("Could not determine project: {reason}");
///     }
///     Err(VertexError::Api { status_code, message, request_id }) => {
///         tracing::error!("API error {}: {} (request: {:?})", status_code, message, request_id);
///     }
///     // ...
/// }
/// ```
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum VertexError {
    /// The project identifier could not be resolved.
    ///
    /// Typical causes are missing credentials, an unset `GOOGLE_CLOUD_PROJECT`,
    /// or a network failure inside a custom resolver.
    #[error("Project ID resolution failed: {0}")]
    ProjectId(String),
    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
    /// API error with structured context for debugging and automated handling.
    ///
    /// Contains the HTTP status code, a truncated error message, and the
    /// optional request ID (for correlation with Google API logs/support).
    #[error("API error (HTTP {status_code}): {message}")]
    Api {
        /// HTTP status code (e.g., 400, 403, 500)
        status_code: u16,
        /// Error message from the API response body
        message: String,
        /// Request ID from `x-goog-request-id` header, if available
        request_id: Option<String>,
    },
    /// API returned a successful status but a body that is not JSON.
    #[error("Malformed API response: {0}")]
    MalformedResponse(String),
    /// Failed to build the HTTP client.
    ///
    /// This typically only occurs in exceptional circumstances such as
    /// TLS backend initialization failures or an invalid default header.
    #[error("Failed to build HTTP client: {0}")]
    ClientBuild(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_project_id_display() {
        let error = VertexError::ProjectId("GOOGLE_CLOUD_PROJECT is not set".to_string());
        let display = format!("{}", error);
        assert!(display.contains("Project ID resolution failed"));
        assert!(display.contains("GOOGLE_CLOUD_PROJECT"));
    }

    #[test]
    fn test_api_display() {
        let error = VertexError::Api {
            status_code: 403,
            message: "Permission denied".to_string(),
            request_id: Some("req-123".to_string()),
        };
        let display = format!("{}", error);
        assert!(display.contains("403"));
        assert!(display.contains("Permission denied"));
    }

    #[test]
    fn test_api_without_request_id() {
        let error = VertexError::Api {
            status_code: 500,
            message: "Internal error".to_string(),
            request_id: None,
        };
        assert_eq!(error.to_string(), "API error (HTTP 500): Internal error");
    }

    #[test]
    fn test_malformed_response_display() {
        let error = VertexError::MalformedResponse("expected JSON".to_string());
        assert_eq!(error.to_string(), "Malformed API response: expected JSON");
    }

    #[test]
    fn test_json_error_from() {
        let json_err = serde_json::from_str::<serde_json::Value>("{not json").unwrap_err();
        let error: VertexError = json_err.into();
        assert!(matches!(error, VertexError::Json(_)));
        assert!(error.to_string().starts_with("JSON serialization error"));
    }

    #[test]
    fn test_client_build_display() {
        let error = VertexError::ClientBuild("bad header".to_string());
        assert!(error.to_string().contains("Failed to build HTTP client"));
    }
}
