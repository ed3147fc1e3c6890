#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Historical pending-case index and backlog duration estimator.
//!
//! [`DatasetIndex`] loads a CSV of pending case counts per (state,
//! district, case type), binned into age buckets. [`BacklogEstimator`]
//! sums the buckets of every matching row and turns the aggregate into a
//! weighted mean duration, a confidence tier derived from the coefficient
//! of variation, and a short explanation naming the dominant bucket.
//!
//! The index is immutable once loaded. Wrap it in an [`std::sync::Arc`]
//! and share it across threads; estimates take no locks.
//!
//! # Usage
//!
//! ```rust,no_run
//! use std::sync::Arc;
//!
//! use justice_graph_backlog::{BacklogEstimator, BacklogQuery, DatasetIndex};
//!
//! let index = DatasetIndex::load_or_empty("data/raw/data2.csv");
//! let estimator = BacklogEstimator::new(Arc::new(index));
//! let estimate = estimator.estimate(&BacklogQuery::new("Kerala", "Ernakulam", "Civil"));
//! println!("{} days ({})", estimate.estimated_duration_days, estimate.confidence);
//! ```

pub mod estimator;
pub mod index;

use thiserror::Error;

pub use estimator::{BacklogEstimator, confidence_for, summarize};
pub use index::{DatasetIndex, parse_count};
pub use justice_graph_backlog_models::{
    BUCKET_COUNT, BacklogEstimate, BacklogQuery, Bucket, BucketCounts, Confidence,
    EstimateOutcome, Jurisdiction, JurisdictionRecord, WeightedSummary, match_key,
};

/// Default location of the pending-cases dataset.
pub const DEFAULT_DATA_PATH: &str = "data/raw/data2.csv";

/// Errors that can occur while loading the pending-cases dataset.
#[derive(Debug, Error)]
pub enum LoadError {
    /// The dataset file does not exist.
    #[error("Dataset not found at {path}")]
    NotFound {
        /// Path that was looked up.
        path: String,
    },

    /// I/O error opening the dataset.
    #[error("I/O error at {path}: {source}")]
    Io {
        /// Path that caused the error.
        path: String,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// The header row could not be read.
    #[error("CSV error in {path}: {source}")]
    Csv {
        /// Path to the CSV file.
        path: String,
        /// Underlying CSV error.
        source: csv::Error,
    },

    /// A required column is absent from the header row.
    #[error("Missing column '{column}' in {path}")]
    MissingColumn {
        /// Path to the CSV file.
        path: String,
        /// Header that was expected.
        column: &'static str,
    },
}
