//! Connection plumbing for the Vertex AI prediction REST API.
//!
//! The core of the crate is URL construction: given a [`ConnectionParams`],
//! a project ID and a streaming flag, [`construct_predict_url`] produces
//!
//! ```text
//! https://<endpoint>/v1/projects/<project>/locations/<region><model path>:<method>
//! ```
//!
//! where `<model path>` is `/publishers/google/models/<model>` for
//! Google-published models and `/<model>` (e.g. `/endpoints/1234`) for
//! deployed endpoints, and `<method>` is `predict` or `serverStreamingPredict`.
//!
//! The project ID comes from a [`ProjectIdResolver`] and requests go out
//! through an [`HttpTransport`]; [`VertexConnection`] ties the three together.
//!
//! # Quick Start
//!
//! ```
//! use vertexai_connection::{ConnectionParams, StaticProjectId, build_url};
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), vertexai_connection::VertexError> {
//! let params = ConnectionParams::new("endpoints/99999999").with_google_published_model(false);
//! let url = build_url(&params, &StaticProjectId::new("my-project"), true).await?;
//!
//! assert_eq!(
//!     url,
//!     "https://us-central1-aiplatform.googleapis.com/v1/projects/my-project/locations/us-central1/endpoints/99999999:serverStreamingPredict"
//! );
//! # Ok(())
//! # }
//! ```
//!
//! # Debugging
//!
//! Set `LOUD_WIRE=1` to dump every request and response sent through
//! [`ReqwestTransport`] to stderr.

pub mod connection;
pub mod errors;
pub mod http;
pub mod identity;
pub mod params;
pub mod transport;

pub use connection::VertexConnection;
pub use errors::VertexError;
pub use http::common::{PredictMethod, build_url, construct_predict_url};
pub use identity::{CachedProjectId, EnvProjectId, ProjectIdResolver, StaticProjectId};
pub use params::{ConnectionParams, DEFAULT_REGION};
pub use transport::{
    HttpTransport, ReqwestTransport, ReqwestTransportBuilder, TransportRequest, TransportResponse,
};
