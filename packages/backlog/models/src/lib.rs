#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Bucket schema, jurisdiction record, and estimate types.
//!
//! The dataset reports pending case counts binned into seven age buckets.
//! [`Bucket`] is the single ordered table of those buckets: the loader uses
//! it to map source headers onto counts, and the estimator uses it for the
//! representative day values and the iteration order that breaks ties when
//! picking the dominant bucket.

use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};

/// Number of pending-duration buckets in the schema.
pub const BUCKET_COUNT: usize = 7;

/// A pending-duration interval, in years.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
pub enum Bucket {
    /// `[0, 1)` years
    #[serde(rename = "0-1")]
    #[strum(serialize = "0-1")]
    ZeroToOne,
    /// `[1, 3)` years
    #[serde(rename = "1-3")]
    #[strum(serialize = "1-3")]
    OneToThree,
    /// `[3, 5)` years
    #[serde(rename = "3-5")]
    #[strum(serialize = "3-5")]
    ThreeToFive,
    /// `[5, 10)` years
    #[serde(rename = "5-10")]
    #[strum(serialize = "5-10")]
    FiveToTen,
    /// `[10, 20)` years
    #[serde(rename = "10-20")]
    #[strum(serialize = "10-20")]
    TenToTwenty,
    /// `[20, 30)` years
    #[serde(rename = "20-30")]
    #[strum(serialize = "20-30")]
    TwentyToThirty,
    /// 30 years and over
    #[serde(rename = "over_30")]
    #[strum(serialize = "over_30")]
    OverThirty,
}

impl Bucket {
    /// All buckets in schema order.
    pub const ALL: [Self; BUCKET_COUNT] = [
        Self::ZeroToOne,
        Self::OneToThree,
        Self::ThreeToFive,
        Self::FiveToTen,
        Self::TenToTwenty,
        Self::TwentyToThirty,
        Self::OverThirty,
    ];

    /// Position of this bucket in [`Bucket::ALL`].
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Representative pending duration for a case in this bucket, in days.
    ///
    /// These are fixed midpoint estimates, not derived from data. The open
    /// top bucket uses 12000 days (roughly 33 years).
    #[must_use]
    pub const fn representative_days(self) -> u32 {
        match self {
            Self::ZeroToOne => 180,
            Self::OneToThree => 730,
            Self::ThreeToFive => 1460,
            Self::FiveToTen => 2737,
            Self::TenToTwenty => 5475,
            Self::TwentyToThirty => 9125,
            Self::OverThirty => 12000,
        }
    }

    /// Column header used for this bucket in the source dataset.
    #[must_use]
    pub const fn source_header(self) -> &'static str {
        match self {
            Self::ZeroToOne => "Pending cases for a period of 0 to 1 Years",
            Self::OneToThree => "Pending cases for a period of 1 to 3 Years",
            Self::ThreeToFive => "Pending cases for a period of 3 to 5 Years",
            Self::FiveToTen => "Pending cases for a period of 5 to 10 Years",
            Self::TenToTwenty => "Pending cases for a period of 10 to 20 Years",
            Self::TwentyToThirty => "Pending cases for a period of 20 to 30 Years",
            Self::OverThirty => "Pending cases over 30 Years",
        }
    }

    /// Human-readable label, e.g. `"1-3 years"` or `"over 30 years"`.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::ZeroToOne => "0-1 years",
            Self::OneToThree => "1-3 years",
            Self::ThreeToFive => "3-5 years",
            Self::FiveToTen => "5-10 years",
            Self::TenToTwenty => "10-20 years",
            Self::TwentyToThirty => "20-30 years",
            Self::OverThirty => "over 30 years",
        }
    }
}

/// Pending case counts, one per [`Bucket`], in schema order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BucketCounts([u64; BUCKET_COUNT]);

impl BucketCounts {
    /// Creates a set of counts from an array in schema order.
    #[must_use]
    pub const fn new(counts: [u64; BUCKET_COUNT]) -> Self {
        Self(counts)
    }

    /// Count recorded for `bucket`.
    #[must_use]
    pub const fn get(&self, bucket: Bucket) -> u64 {
        self.0[bucket.index()]
    }

    /// Sets the count recorded for `bucket`.
    pub const fn set(&mut self, bucket: Bucket, count: u64) {
        self.0[bucket.index()] = count;
    }

    /// Iterates `(bucket, count)` pairs in schema order.
    pub fn entries(&self) -> impl Iterator<Item = (Bucket, u64)> + '_ {
        Bucket::ALL.iter().map(|b| (*b, self.get(*b)))
    }

    /// Total number of cases across all buckets.
    #[must_use]
    pub fn total(&self) -> u64 {
        self.0.iter().fold(0u64, |acc, c| acc.saturating_add(*c))
    }

    /// Bucket-wise sum of `self` and `other`.
    #[must_use]
    pub fn combined(&self, other: &Self) -> Self {
        let mut out = *self;
        for (slot, c) in out.0.iter_mut().zip(other.0.iter()) {
            *slot = slot.saturating_add(*c);
        }
        out
    }

    /// The bucket with the largest count.
    ///
    /// Ties go to the bucket that comes first in schema order, so an
    /// all-zero set reports [`Bucket::ZeroToOne`].
    #[must_use]
    pub fn dominant(&self) -> Bucket {
        let mut best = Bucket::ZeroToOne;
        for (bucket, count) in self.entries() {
            if count > self.get(best) {
                best = bucket;
            }
        }
        best
    }
}

impl FromIterator<(Bucket, u64)> for BucketCounts {
    fn from_iter<I: IntoIterator<Item = (Bucket, u64)>>(iter: I) -> Self {
        let mut counts = Self::default();
        for (bucket, count) in iter {
            counts.set(bucket, count);
        }
        counts
    }
}

/// Lowercases and trims a state, district, or case type for matching.
#[must_use]
pub fn match_key(value: &str) -> String {
    value.trim().to_lowercase()
}

/// One row of the historical pending-cases dataset.
///
/// The `*_key` fields are derived once at construction and are only used
/// for matching; display uses the original casing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct JurisdictionRecord {
    /// State name as it appears in the source.
    pub state: String,
    /// District name as it appears in the source.
    pub district: String,
    /// Case type as it appears in the source.
    pub case_type: String,
    /// Pending case counts per bucket.
    pub counts: BucketCounts,
    #[serde(skip)]
    state_key: String,
    #[serde(skip)]
    district_key: String,
    #[serde(skip)]
    case_type_key: String,
}

impl JurisdictionRecord {
    /// Creates a record and derives its match keys.
    #[must_use]
    pub fn new(
        state: impl Into<String>,
        district: impl Into<String>,
        case_type: impl Into<String>,
        counts: BucketCounts,
    ) -> Self {
        let state = state.into();
        let district = district.into();
        let case_type = case_type.into();
        Self {
            state_key: match_key(&state),
            district_key: match_key(&district),
            case_type_key: match_key(&case_type),
            state,
            district,
            case_type,
            counts,
        }
    }

    /// Normalized state used for matching.
    #[must_use]
    pub fn state_key(&self) -> &str {
        &self.state_key
    }

    /// Normalized district used for matching.
    #[must_use]
    pub fn district_key(&self) -> &str {
        &self.district_key
    }

    /// Normalized case type used for matching.
    #[must_use]
    pub fn case_type_key(&self) -> &str {
        &self.case_type_key
    }

    /// Whether this record's normalized keys equal the given ones exactly.
    #[must_use]
    pub fn matches_keys(&self, state_key: &str, district_key: &str, case_type_key: &str) -> bool {
        self.state_key == state_key
            && self.district_key == district_key
            && self.case_type_key == case_type_key
    }
}

/// A distinct (state, district, case type) triple present in the dataset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Jurisdiction {
    /// State name.
    pub state: String,
    /// District name.
    pub district: String,
    /// Case type.
    pub case_type: String,
}

/// A backlog estimate request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BacklogQuery {
    /// State name (free text, matched case-insensitively).
    pub state: String,
    /// District name.
    pub district: String,
    /// Case type.
    pub case_type: String,
}

impl BacklogQuery {
    /// Creates a query from its three components.
    #[must_use]
    pub fn new(
        state: impl Into<String>,
        district: impl Into<String>,
        case_type: impl Into<String>,
    ) -> Self {
        Self {
            state: state.into(),
            district: district.into(),
            case_type: case_type.into(),
        }
    }

    /// Names of the fields that are empty after trimming.
    #[must_use]
    pub fn blank_fields(&self) -> Vec<&'static str> {
        [
            ("state", &self.state),
            ("district", &self.district),
            ("case_type", &self.case_type),
        ]
        .into_iter()
        .filter(|(_, v)| v.trim().is_empty())
        .map(|(name, _)| name)
        .collect()
    }
}

/// Confidence tier attached to an estimate.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
pub enum Confidence {
    /// Too few cases, or a high relative spread.
    Low,
    /// Moderate relative spread.
    Medium,
    /// Low relative spread over a large enough sample.
    High,
}

/// Weighted statistics over an aggregated, non-empty set of bucket counts.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WeightedSummary {
    /// Sum of all bucket counts.
    pub total_cases: u64,
    /// Weighted mean pending duration, in days.
    pub mean_days: f64,
    /// Weighted population variance around the mean, in days squared.
    pub variance: f64,
    /// Square root of the variance.
    pub std_dev: f64,
    /// Coefficient of variation (`std_dev / mean_days`).
    pub cv: f64,
    /// Bucket with the largest aggregated count.
    pub dominant: Bucket,
}

/// How an estimate was reached.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum EstimateOutcome {
    /// No dataset row matched the query.
    NoData,
    /// Rows matched but every bucket count was zero.
    ZeroWeight,
    /// Statistics were computed over the matched rows.
    Computed(WeightedSummary),
}

/// A structured backlog duration estimate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BacklogEstimate {
    /// Estimated pending duration in days, rounded to one decimal.
    pub estimated_duration_days: f64,
    /// Estimated pending duration in years, rounded to one decimal.
    pub estimated_duration_years: f64,
    /// Confidence tier.
    pub confidence: Confidence,
    /// Human-readable explanation of the estimate.
    pub explanation: String,
}
