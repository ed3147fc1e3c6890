//! Weighted backlog duration estimation over the dataset index.

use std::sync::Arc;

use justice_graph_backlog_models::{
    BacklogEstimate, BacklogQuery, Bucket, BucketCounts, Confidence, EstimateOutcome,
    WeightedSummary, match_key,
};

use crate::DatasetIndex;

/// Aggregates below this many cases are always [`Confidence::Low`].
pub const MIN_CONFIDENT_CASES: u64 = 100;

/// Coefficient of variation below which confidence is [`Confidence::High`].
pub const HIGH_CONFIDENCE_MAX_CV: f64 = 0.5;

/// Coefficient of variation below which confidence is [`Confidence::Medium`].
pub const MEDIUM_CONFIDENCE_MAX_CV: f64 = 1.0;

/// Days per year used to convert the mean duration.
pub const DAYS_PER_YEAR: f64 = 365.25;

/// Duration reported when matched rows record no pending cases at all.
pub const ZERO_WEIGHT_DAYS: f64 = 180.0;

/// [`ZERO_WEIGHT_DAYS`] expressed in years.
pub const ZERO_WEIGHT_YEARS: f64 = 0.5;

/// Weighted mean, variance, and spread of an aggregated set of counts.
///
/// Each case is weighted at its bucket's [`Bucket::representative_days`].
/// Returns `None` when the counts sum to zero.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn summarize(counts: &BucketCounts) -> Option<WeightedSummary> {
    let total_cases = counts.total();
    if total_cases == 0 {
        return None;
    }
    let total = total_cases as f64;

    let weighted_days: f64 = counts
        .entries()
        .map(|(bucket, count)| count as f64 * f64::from(bucket.representative_days()))
        .sum();
    let mean_days = weighted_days / total;

    let weighted_sq_dev: f64 = counts
        .entries()
        .map(|(bucket, count)| {
            let dev = f64::from(bucket.representative_days()) - mean_days;
            count as f64 * dev * dev
        })
        .sum();
    let variance = weighted_sq_dev / total;
    let std_dev = variance.sqrt();
    let cv = if mean_days > 0.0 {
        std_dev / mean_days
    } else {
        0.0
    };

    Some(WeightedSummary {
        total_cases,
        mean_days,
        variance,
        std_dev,
        cv,
        dominant: counts.dominant(),
    })
}

/// Confidence tier for an aggregate of `total_cases` with spread `cv`.
///
/// Sample size is checked first: small samples are low confidence no
/// matter how tight their spread.
#[must_use]
pub fn confidence_for(total_cases: u64, cv: f64) -> Confidence {
    if total_cases < MIN_CONFIDENT_CASES {
        Confidence::Low
    } else if cv < HIGH_CONFIDENCE_MAX_CV {
        Confidence::High
    } else if cv < MEDIUM_CONFIDENCE_MAX_CV {
        Confidence::Medium
    } else {
        Confidence::Low
    }
}

/// Rounds to one decimal place on the exact binary value, ties to even.
fn round1(value: f64) -> f64 {
    format!("{value:.1}").parse::<f64>().unwrap_or(value)
}

/// Estimates pending-case duration for a jurisdiction and case type.
///
/// Holds a shared handle to an immutable [`DatasetIndex`]; clones are cheap
/// and every estimate is independent.
#[derive(Debug, Clone)]
pub struct BacklogEstimator {
    index: Arc<DatasetIndex>,
}

impl BacklogEstimator {
    /// Creates an estimator over `index`.
    #[must_use]
    pub const fn new(index: Arc<DatasetIndex>) -> Self {
        Self { index }
    }

    /// The index this estimator reads from.
    #[must_use]
    pub fn index(&self) -> &DatasetIndex {
        &self.index
    }

    /// Sums the bucket counts of every row matching `query`.
    ///
    /// Returns `None` if no row matches. Rows for the same jurisdiction
    /// and case type are combined unconditionally, so a dataset holding
    /// several reporting years for one court will have them added together.
    #[must_use]
    pub fn aggregate(&self, query: &BacklogQuery) -> Option<BucketCounts> {
        let rows = self
            .index
            .find(&query.state, &query.district, &query.case_type);
        log::debug!(
            "{} rows matched {}/{} ({})",
            rows.len(),
            query.state.trim(),
            query.district.trim(),
            query.case_type.trim()
        );

        if rows.is_empty() {
            return None;
        }

        Some(
            rows.iter()
                .fold(BucketCounts::default(), |acc, r| acc.combined(&r.counts)),
        )
    }

    /// Classifies `query` as no data, zero weight, or a computed summary.
    #[must_use]
    pub fn outcome(&self, query: &BacklogQuery) -> EstimateOutcome {
        self.aggregate(query)
            .map_or(EstimateOutcome::NoData, |counts| {
                summarize(&counts).map_or(EstimateOutcome::ZeroWeight, EstimateOutcome::Computed)
            })
    }

    /// Produces the backlog estimate for `query`.
    ///
    /// Never fails: an unmatched query yields a zero-duration, low
    /// confidence estimate, and matched rows without any pending cases
    /// yield a fixed 180-day fallback.
    #[must_use]
    pub fn estimate(&self, query: &BacklogQuery) -> BacklogEstimate {
        let outcome = self.outcome(query);
        render(query, &outcome)
    }
}

/// Renders an [`EstimateOutcome`] into the response shape.
#[must_use]
pub fn render(query: &BacklogQuery, outcome: &EstimateOutcome) -> BacklogEstimate {
    match outcome {
        EstimateOutcome::NoData => BacklogEstimate {
            estimated_duration_days: 0.0,
            estimated_duration_years: 0.0,
            confidence: Confidence::Low,
            explanation: format!(
                "No data found for {}/{} ({})",
                match_key(&query.state),
                match_key(&query.district),
                match_key(&query.case_type)
            ),
        },
        EstimateOutcome::ZeroWeight => BacklogEstimate {
            estimated_duration_days: ZERO_WEIGHT_DAYS,
            estimated_duration_years: ZERO_WEIGHT_YEARS,
            confidence: Confidence::Low,
            explanation: "District found but no pending cases recorded.".to_string(),
        },
        EstimateOutcome::Computed(summary) => BacklogEstimate {
            estimated_duration_days: round1(summary.mean_days),
            estimated_duration_years: round1(summary.mean_days / DAYS_PER_YEAR),
            confidence: confidence_for(summary.total_cases, summary.cv),
            explanation: explain(summary.total_cases, summary.dominant),
        },
    }
}

fn explain(total_cases: u64, dominant: Bucket) -> String {
    format!(
        "Based on {total_cases} cases. High proportion of cases are in the {} range.",
        dominant.label()
    )
}
