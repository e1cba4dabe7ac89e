//! Wire-level debugging via LOUD_WIRE environment variable.
//!
//! When `LOUD_WIRE` is set to any value, prints the raw JSON of prediction
//! requests and responses to stderr with pretty formatting and colors.
//!
//! ```bash
//! LOUD_WIRE=1 cargo test --test connection_tests
//! ```
//!
//! Green `>>>` marks outgoing requests, red `<<<` incoming responses. Each
//! line carries a UTC timestamp and a request number for correlation.
//! Inline base64 payloads are truncated and credential headers are redacted.

use colored::Colorize;
use std::sync::OnceLock;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Request ID counter for correlating requests with responses
static REQUEST_COUNTER: AtomicUsize = AtomicUsize::new(1);

/// Cached check for whether LOUD_WIRE is enabled
static ENABLED: OnceLock<bool> = OnceLock::new();

/// Fields holding inline base64 media in Vertex prediction payloads.
const TRUNCATE_FIELDS: &[&str] = &["bytesBase64Encoded", "data"];

/// Maximum length before truncation (keep first 100 chars).
const TRUNCATE_THRESHOLD: usize = 100;

/// Headers whose values are never printed.
const REDACTED_HEADERS: &[&str] = &["authorization", "x-goog-api-key"];

/// Check if LOUD_WIRE debugging is enabled.
///
/// Cached after the first check: `LOUD_WIRE` must be set before the first
/// request is made.
#[must_use]
pub(crate) fn is_enabled() -> bool {
    *ENABLED.get_or_init(|| std::env::var("LOUD_WIRE").is_ok())
}

/// Get the next request ID for correlation.
#[must_use]
pub(crate) fn next_request_id() -> usize {
    REQUEST_COUNTER.fetch_add(1, Ordering::Relaxed)
}

/// Truncate long base64-encoded fields in a JSON value, in place.
fn truncate_long_fields(value: &mut serde_json::Value) {
    match value {
        serde_json::Value::Object(map) => {
            for (key, val) in map.iter_mut() {
                if TRUNCATE_FIELDS.contains(&key.as_str()) {
                    if let serde_json::Value::String(s) = val
                        && s.len() > TRUNCATE_THRESHOLD
                        && s.is_char_boundary(TRUNCATE_THRESHOLD)
                    {
                        *s = format!("{}...", &s[..TRUNCATE_THRESHOLD]);
                    }
                } else {
                    truncate_long_fields(val);
                }
            }
        }
        serde_json::Value::Array(arr) => arr.iter_mut().for_each(truncate_long_fields),
        _ => {}
    }
}

/// Returns the header value as it should be printed.
fn display_header_value<'a>(name: &str, value: &'a str) -> &'a str {
    if REDACTED_HEADERS.contains(&name.to_ascii_lowercase().as_str()) {
        "<redacted>"
    } else {
        value
    }
}

fn timestamp() -> String {
    chrono::Utc::now().format("%Y-%m-%dT%H:%M:%SZ").to_string()
}

/// Log prefix with timestamp and request ID.
fn prefix(request_id: usize) -> String {
    format!(
        "{} {} {}",
        "[LOUD_WIRE]".bold(),
        timestamp().dimmed(),
        format!("[REQ#{request_id}]").cyan()
    )
}

fn print_json(prefix: &str, value: &serde_json::Value) {
    let mut value = value.clone();
    truncate_long_fields(&mut value);
    let rendered = colored_json::to_colored_json_auto(&value)
        .ok()
        .or_else(|| serde_json::to_string_pretty(&value).ok());
    if let Some(rendered) = rendered {
        for line in rendered.lines() {
            eprintln!("{prefix} {line}");
        }
    }
}

/// Log an outgoing HTTP request.
pub(crate) fn log_request(
    request_id: usize,
    method: &str,
    url: &str,
    headers: &[(String, String)],
    body: Option<&serde_json::Value>,
) {
    if !is_enabled() {
        return;
    }

    let prefix = prefix(request_id);
    eprintln!("{prefix} {} {method} {url}", ">>>".green().bold());

    for (name, value) in headers {
        eprintln!("{prefix} {name}: {}", display_header_value(name, value));
    }

    if let Some(body) = body {
        eprintln!("{prefix} {}:", "Body".green());
        print_json(&prefix, body);
    }
}

/// Log an incoming HTTP response status.
pub(crate) fn log_response_status(request_id: usize, status: u16) {
    if !is_enabled() {
        return;
    }

    let status_text = if status < 300 {
        format!("{status} OK").green()
    } else {
        format!("{status} ERROR").red()
    };
    eprintln!("{} {} {status_text}", prefix(request_id), "<<<".red().bold());
}

/// Log an incoming HTTP response body.
pub(crate) fn log_response_body(request_id: usize, body: &str) {
    if !is_enabled() {
        return;
    }

    let prefix = prefix(request_id);
    match serde_json::from_str::<serde_json::Value>(body) {
        Ok(parsed) => {
            eprintln!("{prefix} {}:", "Response".red());
            print_json(&prefix, &parsed);
        }
        Err(_) => {
            let preview = super::error_helpers::truncate_for_context(body, 1000);
            eprintln!("{prefix} {}: {preview}", "Response".red());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_short_data() {
        let mut value = serde_json::json!({"bytesBase64Encoded": "short"});
        truncate_long_fields(&mut value);
        assert_eq!(value["bytesBase64Encoded"], "short");
    }

    #[test]
    fn test_truncate_nested_instances() {
        let mut value = serde_json::json!({
            "instances": [
                {"prompt": "describe", "image": {"bytesBase64Encoded": "A".repeat(200)}}
            ],
            "parameters": {"temperature": 0.2}
        });
        truncate_long_fields(&mut value);

        let image = value["instances"][0]["image"]["bytesBase64Encoded"]
            .as_str()
            .unwrap();
        assert_eq!(image.len(), 103, "Should be 100 chars + '...'");
        assert_eq!(value["instances"][0]["prompt"], "describe");
        assert_eq!(value["parameters"]["temperature"], 0.2);
    }

    #[test]
    fn test_truncate_preserves_text() {
        let long_text = "Hello world! ".repeat(50);
        let mut value = serde_json::json!({"content": long_text.clone()});
        truncate_long_fields(&mut value);
        assert_eq!(value["content"], long_text);
    }

    #[test]
    fn test_redacts_credentials() {
        assert_eq!(
            display_header_value("Authorization", "Bearer secret"),
            "<redacted>"
        );
        assert_eq!(display_header_value("X-Goog-Api-Key", "k"), "<redacted>");
        assert_eq!(
            display_header_value("Content-Type", "application/json"),
            "application/json"
        );
    }

    #[test]
    fn test_timestamp_format() {
        let ts = timestamp();
        assert_eq!(ts.len(), 20, "Timestamp should be 20 chars: {ts}");
        assert!(ts.ends_with('Z'));
        assert!(ts.contains('T'));
    }

    #[test]
    fn test_request_id_increments() {
        let id1 = next_request_id();
        let id2 = next_request_id();
        assert!(id2 > id1);
    }
}
