#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! API response types for the justice graph server.
//!
//! Estimate requests and responses are the backlog model types themselves;
//! this crate only holds the service-level payloads around them.

use serde::{Deserialize, Serialize};

/// Response for `GET /`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiStatus {
    /// Always `"healthy"` while the server is answering.
    pub status: String,
    /// Service name and endpoint summary.
    pub service: String,
    /// Number of dataset rows loaded.
    pub records: usize,
}

/// Response for `GET /api/health`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiHealth {
    /// Whether the server is healthy.
    pub healthy: bool,
    /// Crate version.
    pub version: String,
    /// Number of dataset rows loaded. Zero means every estimate will
    /// report no data.
    pub records: usize,
}

/// Error body returned for rejected requests.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiError {
    /// What went wrong.
    pub error: String,
}

impl ApiError {
    /// Creates an error body with the given message.
    #[must_use]
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}
