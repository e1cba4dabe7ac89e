//! Internal HTTP layer for Vertex AI communication.
//!
//! URL construction is public and re-exported from the crate root; the
//! response and wire-logging helpers stay crate-private.

pub mod common;
pub(crate) mod error_helpers;
pub(crate) mod loud_wire;
