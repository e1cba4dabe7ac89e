use crate::errors::VertexError;
use crate::identity::ProjectIdResolver;
use crate::params::ConnectionParams;
use tracing::debug;

/// REST API version segment.
const API_VERSION: &str = "v1";

/// Publisher namespace for Google-published models.
const GOOGLE_PUBLISHER_PATH: &str = "/publishers/google/models/";

/// The prediction method a URL targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PredictMethod {
    /// Unary `:predict`
    Predict,
    /// `:serverStreamingPredict`
    ServerStreamingPredict,
}

impl PredictMethod {
    /// Selects the method for a streaming or non-streaming call.
    #[must_use]
    pub const fn from_streaming(streaming: bool) -> Self {
        if streaming {
            Self::ServerStreamingPredict
        } else {
            Self::Predict
        }
    }

    /// The method name as it appears after the `:` in the URL.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Predict => "predict",
            Self::ServerStreamingPredict => "serverStreamingPredict",
        }
    }
}

impl std::fmt::Display for PredictMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returns the resource path that follows `/locations/<region>`.
///
/// The model string is embedded verbatim. For deployed endpoints the caller
/// supplies the whole relative path, e.g. `endpoints/1234`.
fn model_path(params: &ConnectionParams) -> String {
    if params.use_google_published_model() {
        format!("{GOOGLE_PUBLISHER_PATH}{}", params.model)
    } else {
        format!("/{}", params.model)
    }
}

/// Constructs the REST URL for a prediction call.
///
/// Produces
/// `https://<endpoint>/v1/projects/<project_id>/locations/<region><model path>:<method>`.
/// Pure and deterministic: no validation is performed, so an empty or odd
/// `model` yields an odd URL rather than an error.
///
/// # Example
///
/// ```
/// use vertexai_connection::{ConnectionParams, construct_predict_url};
///
/// let params = ConnectionParams::new("text-bison");
/// let url = construct_predict_url(&params, "my-project", false);
/// assert_eq!(
///     url,
///     "https://us-central1-aiplatform.googleapis.com/v1/projects/my-project/locations/us-central1/publishers/google/models/text-bison:predict"
/// );
/// ```
#[must_use]
pub fn construct_predict_url(params: &ConnectionParams, project_id: &str, streaming: bool) -> String {
    let method = PredictMethod::from_streaming(streaming);
    format!(
        "https://{endpoint}/{API_VERSION}/projects/{project_id}/locations/{region}{path}:{method}",
        endpoint = params.endpoint(),
        region = params.region(),
        path = model_path(params),
    )
}

/// Resolves the project ID and constructs the prediction URL.
///
/// The resolver is awaited exactly once per call. If it fails, its error is
/// returned as-is; there is no retry and no fallback URL.
///
/// # Errors
///
/// Returns whatever error `resolver` produced.
pub async fn build_url<R>(
    params: &ConnectionParams,
    resolver: &R,
    streaming: bool,
) -> Result<String, VertexError>
where
    R: ProjectIdResolver + ?Sized,
{
    let project_id = resolver.project_id().await?;
    let url = construct_predict_url(params, &project_id, streaming);
    debug!(url = %url, streaming, "Built prediction URL");
    Ok(url)
}
