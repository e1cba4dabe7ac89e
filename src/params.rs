//! Connection configuration for a Vertex AI model.
//!
//! [`ConnectionParams`] is immutable once built. Optional fields stay `None`
//! until read through the resolved accessors, which apply the defaults.

use serde::{Deserialize, Serialize};

/// Region used when none is configured.
pub const DEFAULT_REGION: &str = "us-central1";

/// Suffix appended to the region to form the default API host.
const DEFAULT_HOST_SUFFIX: &str = "-aiplatform.googleapis.com";

/// Environment variables consulted for the region, in priority order.
const REGION_ENV_VARS: &[&str] = &["GOOGLE_CLOUD_LOCATION", "VERTEX_LOCATION"];

/// Environment variable consulted for an explicit API host.
const ENDPOINT_ENV_VAR: &str = "VERTEX_AI_ENDPOINT";

/// Configuration describing which model a connection talks to and where.
///
/// # Example
///
/// ```
/// use vertexai_connection::ConnectionParams;
///
/// let params = ConnectionParams::new("endpoints/99999999")
///     .with_region("europe-west4")
///     .with_google_published_model(false);
///
/// assert_eq!(params.region(), "europe-west4");
/// assert_eq!(params.endpoint(), "europe-west4-aiplatform.googleapis.com");
/// assert!(!params.use_google_published_model());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConnectionParams {
    /// API host, without scheme. Defaults to `<region>-aiplatform.googleapis.com`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub endpoint: Option<String>,
    /// Region segment used in the default host and in the URL path.
    #[serde(default, alias = "location", skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
    /// Bare model name (`text-bison`) or a relative resource path (`endpoints/<id>`).
    pub model: String,
    /// Whether `model` names a Google-published model. `None` means `true`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub use_google_published_model: Option<bool>,
}

impl ConnectionParams {
    /// Creates parameters for `model` with every other field defaulted.
    #[must_use]
    pub fn new(model: impl Into<String>) -> Self {
        Self {
            endpoint: None,
            region: None,
            model: model.into(),
            use_google_published_model: None,
        }
    }

    /// Creates parameters for `model`, taking the region and host from the
    /// environment.
    ///
    /// The region is read from `GOOGLE_CLOUD_LOCATION`, then `VERTEX_LOCATION`;
    /// the host from `VERTEX_AI_ENDPOINT`. Blank values are treated as unset.
    #[must_use]
    pub fn from_env(model: impl Into<String>) -> Self {
        let mut params = Self::new(model);
        params.region = REGION_ENV_VARS.iter().find_map(|name| env_var_non_blank(name));
        params.endpoint = env_var_non_blank(ENDPOINT_ENV_VAR);
        params
    }

    /// Sets the API host (e.g. `us-central1-aiplatform.googleapis.com`).
    #[must_use]
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = Some(endpoint.into());
        self
    }

    /// Sets the region (e.g. `europe-west4`).
    #[must_use]
    pub fn with_region(mut self, region: impl Into<String>) -> Self {
        self.region = Some(region.into());
        self
    }

    /// Selects between a Google-published model (`true`) and a deployed
    /// endpoint addressed by its relative path (`false`).
    #[must_use]
    pub const fn with_google_published_model(mut self, published: bool) -> Self {
        self.use_google_published_model = Some(published);
        self
    }

    /// The region, falling back to [`DEFAULT_REGION`].
    #[must_use]
    pub fn region(&self) -> &str {
        self.region.as_deref().unwrap_or(DEFAULT_REGION)
    }

    /// The API host, falling back to `<region>-aiplatform.googleapis.com`.
    #[must_use]
    pub fn endpoint(&self) -> String {
        match &self.endpoint {
            Some(endpoint) => endpoint.clone(),
            None => format!("{}{DEFAULT_HOST_SUFFIX}", self.region()),
        }
    }

    /// Whether the URL should address the `publishers/google/models` namespace.
    #[must_use]
    pub fn use_google_published_model(&self) -> bool {
        self.use_google_published_model.unwrap_or(true)
    }
}

/// Reads an environment variable, treating unset, non-UTF-8 and blank values alike.
pub(crate) fn env_var_non_blank(name: &str) -> Option<String> {
    std::env::var(name)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}
