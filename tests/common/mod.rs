//! Test doubles shared across the integration test files.
//!
//! Usage in test files:
//! ```ignore
//! mod common;
//! use common::*;
//! ```

#![allow(dead_code)]

use async_trait::async_trait;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use vertexai_connection::{
    HttpTransport, ProjectIdResolver, TransportRequest, TransportResponse, VertexError,
};

/// Project ID used by the URL fixtures.
pub const FAKE_PROJECT_ID: &str = "fake_project_id";

/// Resolver that counts calls and returns a fixed result.
pub struct CountingResolver {
    calls: AtomicUsize,
    outcome: Result<String, String>,
}

impl CountingResolver {
    pub fn ok(project_id: &str) -> Self {
        Self {
            calls: AtomicUsize::new(0),
            outcome: Ok(project_id.to_string()),
        }
    }

    /// Always fails with `VertexError::ProjectId(reason)`.
    pub fn failing(reason: &str) -> Self {
        Self {
            calls: AtomicUsize::new(0),
            outcome: Err(reason.to_string()),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ProjectIdResolver for CountingResolver {
    async fn project_id(&self) -> Result<String, VertexError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.outcome.clone().map_err(VertexError::ProjectId)
    }
}

/// Transport that records every request and answers with a canned body.
pub struct RecordingTransport {
    requests: Mutex<Vec<TransportRequest>>,
    response: serde_json::Value,
}

impl RecordingTransport {
    pub fn new(response: serde_json::Value) -> Self {
        Self {
            requests: Mutex::new(Vec::new()),
            response,
        }
    }

    pub fn requests(&self) -> Vec<TransportRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl HttpTransport for RecordingTransport {
    async fn request(&self, request: TransportRequest) -> Result<TransportResponse, VertexError> {
        self.requests.lock().unwrap().push(request);
        Ok(TransportResponse {
            status: 200,
            data: self.response.clone(),
        })
    }
}

/// Looks up a header by case-insensitive name.
pub fn header<'a>(request: &'a TransportRequest, name: &str) -> Option<&'a str> {
    request
        .headers
        .iter()
        .find(|(n, _)| n.eq_ignore_ascii_case(name))
        .map(|(_, v)| v.as_str())
}
