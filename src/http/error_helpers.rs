//! Error handling utilities for HTTP responses and error context formatting.

use crate::errors::VertexError;
use reqwest::Response;

/// Maximum characters to include from error body in context messages
const ERROR_BODY_PREVIEW_LENGTH: usize = 200;

/// Google's request ID header name.
///
/// Uniquely identifies each request; quote it when contacting Google support.
/// See: <https://cloud.google.com/apis/docs/system-parameters>
const REQUEST_ID_HEADER: &str = "x-goog-request-id";

/// Checks if an HTTP response is successful, returning it if so or an error otherwise.
///
/// # Errors
///
/// Returns [`VertexError::Api`] with status code and body preview on non-success status.
pub(crate) async fn check_response(response: Response) -> Result<Response, VertexError> {
    if response.status().is_success() {
        Ok(response)
    } else {
        Err(read_error_with_context(response).await)
    }
}

/// Reads the error response body into a [`VertexError::Api`].
///
/// Captures the status code, the first 200 characters of the body, and the
/// `x-goog-request-id` header. If the body cannot be read, the message
/// describes the read failure instead.
async fn read_error_with_context(response: Response) -> VertexError {
    let status_code = response.status().as_u16();

    let request_id = response
        .headers()
        .get(REQUEST_ID_HEADER)
        .and_then(|v| v.to_str().ok())
        .map(String::from);

    let error_body = response
        .text()
        .await
        .unwrap_or_else(|e| format!("Failed to read error body: {}", e));

    VertexError::Api {
        status_code,
        message: truncate_for_context(&error_body, ERROR_BODY_PREVIEW_LENGTH),
        request_id,
    }
}

/// Parses a successful response body as JSON.
///
/// An empty body yields `Value::Null`.
///
/// # Errors
///
/// Returns [`VertexError::MalformedResponse`] with a preview of the body if
/// it is not valid JSON.
pub(crate) fn parse_json_body(body: &str) -> Result<serde_json::Value, VertexError> {
    if body.trim().is_empty() {
        return Ok(serde_json::Value::Null);
    }
    serde_json::from_str(body)
        .map_err(|e| VertexError::MalformedResponse(format_json_parse_error(body, e)))
}

/// Formats JSON parsing context by including a preview of the raw JSON.
fn format_json_parse_error(json_str: &str, error: serde_json::Error) -> String {
    let preview = truncate_for_context(json_str, ERROR_BODY_PREVIEW_LENGTH);
    format!("JSON parse error: {} | Context: {}", error, preview)
}

/// Truncates a string to specified length, adding "..." if truncated.
///
/// Slices on a character boundary so multi-byte UTF-8 input never panics.
pub(crate) fn truncate_for_context(s: &str, max_len: usize) -> String {
    if s.len() <= max_len {
        return s.to_string();
    }
    let truncate_at = s
        .char_indices()
        .take_while(|(i, c)| i + c.len_utf8() <= max_len)
        .last()
        .map_or(0, |(i, c)| i + c.len_utf8());
    format!("{}...", &s[..truncate_at])
}
