//! Pending-cases dataset loading and lookup.
//!
//! The source CSV uses long human-readable headers. They are mapped onto
//! [`JurisdictionRecord`] fields through a fixed table: the three
//! identifier headers below plus [`Bucket::source_header`] for each bucket.

use std::collections::BTreeMap;
use std::io::Read;
use std::path::Path;

use csv::StringRecord;
use justice_graph_backlog_models::{
    BUCKET_COUNT, Bucket, BucketCounts, Jurisdiction, JurisdictionRecord, match_key,
};

use crate::LoadError;

/// Source header for the state name.
pub const STATE_HEADER: &str = "srcStateName";

/// Source header for the district name.
pub const DISTRICT_HEADER: &str = "srcDistrictName";

/// Source header for the case type.
pub const CASE_TYPE_HEADER: &str = "District and Taluk Court Case type";

/// Coerces a raw bucket cell into a non-negative case count.
///
/// Accepts integers and decimals (`"12"`, `"12.0"`), truncating any
/// fractional part. Empty, non-numeric, non-finite, and negative values
/// become `0`. Thousands separators are not understood, so `"1,200"` is
/// also `0`.
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn parse_count(raw: &str) -> u64 {
    let trimmed = raw.trim();
    if let Ok(n) = trimmed.parse::<u64>() {
        return n;
    }
    match trimmed.parse::<f64>() {
        Ok(v) if v.is_finite() && v >= 0.0 => v.trunc() as u64,
        _ => 0,
    }
}

/// Column positions of the mapped headers in a particular file.
struct ColumnMap {
    state: usize,
    district: usize,
    case_type: usize,
    buckets: [usize; BUCKET_COUNT],
}

impl ColumnMap {
    fn from_headers(headers: &StringRecord, source: &str) -> Result<Self, LoadError> {
        let position = |column: &'static str| {
            headers
                .iter()
                .position(|h| h == column)
                .ok_or_else(|| LoadError::MissingColumn {
                    path: source.to_string(),
                    column,
                })
        };

        let state = position(STATE_HEADER)?;
        let district = position(DISTRICT_HEADER)?;
        let case_type = position(CASE_TYPE_HEADER)?;

        let mut buckets = [0; BUCKET_COUNT];
        for bucket in Bucket::ALL {
            buckets[bucket.index()] = position(bucket.source_header())?;
        }

        Ok(Self {
            state,
            district,
            case_type,
            buckets,
        })
    }

    fn to_record(&self, row: &StringRecord) -> JurisdictionRecord {
        let text = |idx: usize| row.get(idx).unwrap_or_default();
        let counts = Bucket::ALL
            .iter()
            .map(|b| (*b, parse_count(text(self.buckets[b.index()]))))
            .collect::<BucketCounts>();

        JurisdictionRecord::new(
            text(self.state),
            text(self.district),
            text(self.case_type),
            counts,
        )
    }
}

/// In-memory, read-only index over the pending-cases dataset.
#[derive(Debug, Clone, Default)]
pub struct DatasetIndex {
    records: Vec<JurisdictionRecord>,
}

impl DatasetIndex {
    /// Creates an index with no rows. Every lookup returns nothing.
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            records: Vec::new(),
        }
    }

    /// Creates an index over already-built records.
    #[must_use]
    pub const fn from_records(records: Vec<JurisdictionRecord>) -> Self {
        Self { records }
    }

    /// Loads the dataset CSV at `path`.
    ///
    /// Rows that cannot be read (wrong encoding, broken quoting) are
    /// skipped. Bucket cells that are missing or not numeric count as `0`.
    ///
    /// # Errors
    ///
    /// Returns [`LoadError`] if the file does not exist, cannot be opened,
    /// has an unreadable header row, or lacks any of the mapped columns.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, LoadError> {
        let path = path.as_ref();
        let source = path.display().to_string();

        if !path.exists() {
            return Err(LoadError::NotFound { path: source });
        }

        let file = std::fs::File::open(path).map_err(|e| LoadError::Io {
            path: source.clone(),
            source: e,
        })?;

        let index = Self::from_reader(file, &source)?;
        log::info!("Loaded {} dataset rows from {source}", index.len());
        Ok(index)
    }

    /// Loads the dataset CSV at `path`, falling back to an empty index.
    ///
    /// The failure is logged; callers that need to treat a missing dataset
    /// as fatal should use [`DatasetIndex::load`] instead.
    #[must_use]
    pub fn load_or_empty(path: impl AsRef<Path>) -> Self {
        match Self::load(path) {
            Ok(index) => index,
            Err(e) => {
                log::warn!("Pending-cases dataset unavailable, serving empty index: {e}");
                Self::empty()
            }
        }
    }

    /// Parses dataset rows from any CSV `Read` source.
    ///
    /// `source` names the input in error messages.
    ///
    /// # Errors
    ///
    /// Returns [`LoadError`] if the header row cannot be read or lacks any
    /// of the mapped columns.
    pub fn from_reader(reader: impl Read, source: &str) -> Result<Self, LoadError> {
        let mut csv_reader = csv::ReaderBuilder::new().flexible(true).from_reader(reader);

        let headers = csv_reader
            .headers()
            .map_err(|e| LoadError::Csv {
                path: source.to_string(),
                source: e,
            })?
            .clone();
        let columns = ColumnMap::from_headers(&headers, source)?;

        let mut records = Vec::new();
        let mut skipped = 0u64;
        for result in csv_reader.records() {
            match result {
                Ok(row) => records.push(columns.to_record(&row)),
                Err(e) => {
                    log::trace!("  skipping malformed row: {e}");
                    skipped += 1;
                }
            }
        }

        if skipped > 0 {
            log::debug!("Skipped {skipped} malformed rows in {source}");
        }

        Ok(Self { records })
    }

    /// Rows whose normalized state, district, and case type all equal the
    /// trimmed, lowercased arguments.
    ///
    /// There is no partial or fuzzy matching and no fallback to a coarser
    /// jurisdiction.
    #[must_use]
    pub fn find(&self, state: &str, district: &str, case_type: &str) -> Vec<&JurisdictionRecord> {
        let state = match_key(state);
        let district = match_key(district);
        let case_type = match_key(case_type);

        self.records
            .iter()
            .filter(|r| r.matches_keys(&state, &district, &case_type))
            .collect()
    }

    /// Number of rows in the index.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the index has no rows.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// All rows, in file order.
    #[must_use]
    pub fn records(&self) -> &[JurisdictionRecord] {
        &self.records
    }

    /// Distinct (state, district, case type) triples, sorted by their
    /// normalized form. Display casing is taken from the first row seen.
    #[must_use]
    pub fn jurisdictions(&self) -> Vec<Jurisdiction> {
        let mut seen: BTreeMap<(&str, &str, &str), &JurisdictionRecord> = BTreeMap::new();
        for record in &self.records {
            seen.entry((
                record.state_key(),
                record.district_key(),
                record.case_type_key(),
            ))
            .or_insert(record);
        }

        seen.into_values()
            .map(|r| Jurisdiction {
                state: r.state.trim().to_string(),
                district: r.district.trim().to_string(),
                case_type: r.case_type.trim().to_string(),
            })
            .collect()
    }
}
