//! Project ID resolution.
//!
//! The prediction URL embeds the Google Cloud project ID. Where that ID comes
//! from (a literal, the environment, a metadata server, a credentials file) is
//! left to a [`ProjectIdResolver`]. The URL builder never caches the result;
//! wrap a resolver in [`CachedProjectId`] to memoize it.

use crate::errors::VertexError;
use crate::params::env_var_non_blank;
use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::OnceCell;
use tracing::{debug, warn};

/// Environment variables consulted for the project ID, in priority order.
const PROJECT_ENV_VARS: &[&str] = &["GOOGLE_CLOUD_PROJECT", "GCLOUD_PROJECT"];

/// Asynchronously supplies the Google Cloud project ID.
///
/// # Example
///
/// ```
/// use async_trait::async_trait;
/// use vertexai_connection::{ProjectIdResolver, VertexError};
///
/// struct FromMetadataServer;
///
/// #[async_trait]
/// impl ProjectIdResolver for FromMetadataServer {
///     async fn project_id(&self) -> Result<String, VertexError> {
///         // Query http://metadata.google.internal/... here
///         Ok("my-project".to_string())
///     }
/// }
/// ```
#[async_trait]
pub trait ProjectIdResolver: Send + Sync {
    /// Returns the project ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the ID cannot be determined.
    async fn project_id(&self) -> Result<String, VertexError>;
}

#[async_trait]
impl<R: ProjectIdResolver + ?Sized> ProjectIdResolver for Arc<R> {
    async fn project_id(&self) -> Result<String, VertexError> {
        (**self).project_id().await
    }
}

#[async_trait]
impl<R: ProjectIdResolver + ?Sized> ProjectIdResolver for Box<R> {
    async fn project_id(&self) -> Result<String, VertexError> {
        (**self).project_id().await
    }
}

/// A fixed project ID.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StaticProjectId(String);

impl StaticProjectId {
    #[must_use]
    pub fn new(project_id: impl Into<String>) -> Self {
        Self(project_id.into())
    }
}

#[async_trait]
impl ProjectIdResolver for StaticProjectId {
    async fn project_id(&self) -> Result<String, VertexError> {
        Ok(self.0.clone())
    }
}

/// Reads the project ID from `GOOGLE_CLOUD_PROJECT`, then `GCLOUD_PROJECT`.
///
/// The environment is read on every call.
#[derive(Debug, Clone, Copy, Default)]
pub struct EnvProjectId;

#[async_trait]
impl ProjectIdResolver for EnvProjectId {
    async fn project_id(&self) -> Result<String, VertexError> {
        PROJECT_ENV_VARS
            .iter()
            .find_map(|name| env_var_non_blank(name))
            .ok_or_else(|| {
                VertexError::ProjectId(format!(
                    "none of {} is set",
                    PROJECT_ENV_VARS.join(", ")
                ))
            })
    }
}

/// Memoizes the first successful resolution of an inner resolver.
///
/// Concurrent first calls share a single in-flight resolution. Failures are
/// not cached: the next call asks the inner resolver again.
#[derive(Debug)]
pub struct CachedProjectId<R> {
    inner: R,
    cell: OnceCell<String>,
}

impl<R> CachedProjectId<R> {
    #[must_use]
    pub const fn new(inner: R) -> Self {
        Self {
            inner,
            cell: OnceCell::const_new(),
        }
    }

    /// The wrapped resolver.
    #[must_use]
    pub const fn get_ref(&self) -> &R {
        &self.inner
    }

    /// The cached project ID, if one has been resolved.
    #[must_use]
    pub fn cached(&self) -> Option<&str> {
        self.cell.get().map(String::as_str)
    }
}

#[async_trait]
impl<R: ProjectIdResolver> ProjectIdResolver for CachedProjectId<R> {
    async fn project_id(&self) -> Result<String, VertexError> {
        let project_id = self
            .cell
            .get_or_try_init(|| async {
                debug!("Resolving project ID");
                self.inner.project_id().await.inspect_err(|e| {
                    warn!("Project ID resolution failed: {e}");
                })
            })
            .await?;
        Ok(project_id.clone())
    }
}
