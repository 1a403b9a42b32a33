//! FILENAME: engine/src/store.rs
//! Record Store - the loaded, immutable dataset.
//!
//! The store is built once (by the loader in `persistence`) and passed
//! explicitly to every downstream computation. It exposes exactly what the
//! filter controls need to populate themselves: the distinct values of each
//! categorical column and the min/max of the date column.

use std::collections::BTreeSet;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::record::Record;

// ============================================================================
// ERRORS
// ============================================================================

/// Returned by operations that need at least one record (date bounds,
/// filter-control population) when the store holds none. Callers must
/// special-case an empty dataset instead of asking for its bounds.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("dataset contains no records")]
pub struct EmptyDatasetError;

// ============================================================================
// CATEGORICAL COLUMNS
// ============================================================================

/// The categorical columns a filter control can enumerate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum CategoricalColumn {
    Region,
    Category,
    CustomerType,
    Promo,
    PaymentMethod,
}

impl CategoricalColumn {
    fn value_of<'a>(&self, record: &'a Record) -> &'a str {
        match self {
            CategoricalColumn::Region => &record.region,
            CategoricalColumn::Category => &record.category,
            CategoricalColumn::CustomerType => &record.customer_type,
            CategoricalColumn::Promo => &record.promo,
            CategoricalColumn::PaymentMethod => &record.payment_method,
        }
    }
}

// ============================================================================
// RECORD STORE
// ============================================================================

/// The full parsed dataset, immutable after load.
///
/// Record order is load order and is preserved by everything downstream:
/// filtered views are stable subsequences of this sequence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordStore {
    records: Vec<Record>,
}

impl RecordStore {
    pub fn new(records: Vec<Record>) -> Self {
        RecordStore { records }
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Distinct values of a categorical column, sorted ascending
    /// (lexicographic).
    pub fn distinct_values(&self, column: CategoricalColumn) -> Vec<String> {
        let unique: BTreeSet<&str> = self
            .records
            .iter()
            .map(|record| column.value_of(record))
            .collect();

        unique.into_iter().map(String::from).collect()
    }

    /// Min and max of the date column over all records.
    pub fn date_bounds(&self) -> Result<(NaiveDate, NaiveDate), EmptyDatasetError> {
        let mut dates = self.records.iter().map(|record| record.date);
        let first = dates.next().ok_or(EmptyDatasetError)?;

        let bounds = dates.fold((first, first), |(min, max), date| {
            (min.min(date), max.max(date))
        });

        Ok(bounds)
    }

    /// Bundles everything the sidebar controls need in one call.
    pub fn filter_options(&self) -> Result<FilterOptions, EmptyDatasetError> {
        let (date_min, date_max) = self.date_bounds()?;

        Ok(FilterOptions {
            date_min,
            date_max,
            regions: self.distinct_values(CategoricalColumn::Region),
            categories: self.distinct_values(CategoricalColumn::Category),
            customer_types: self.distinct_values(CategoricalColumn::CustomerType),
            promo_flags: self.distinct_values(CategoricalColumn::Promo),
        })
    }
}

// ============================================================================
// FILTER OPTIONS
// ============================================================================

/// The value domains available for filtering, used to populate the filter
/// controls at the presentation boundary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilterOptions {
    pub date_min: NaiveDate,
    pub date_max: NaiveDate,
    pub regions: Vec<String>,
    pub categories: Vec<String>,
    pub customer_types: Vec<String>,
    pub promo_flags: Vec<String>,
}
