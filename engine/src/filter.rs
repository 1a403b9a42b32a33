//! FILENAME: engine/src/filter.rs
//! Filter Specification and Filter Engine.
//!
//! A `FilterSpec` is an immutable snapshot of the user's current selection:
//! an inclusive date range plus one inclusion set per categorical column.
//! Applying it to a `RecordStore` yields a `FilteredView`, the stable
//! subsequence of records passing every predicate. An empty view is a
//! perfectly normal value, never an error.

use std::collections::BTreeSet;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::record::Record;
use crate::store::{CategoricalColumn, EmptyDatasetError, RecordStore};

// ============================================================================
// FILTER SPECIFICATION
// ============================================================================

/// The complete description of the user's current selection criteria.
///
/// Set semantics: an empty set matches NOTHING (the user deselected every
/// value), a set equal to the column's full domain imposes no effective
/// restriction. Date bounds are inclusive on both ends and are expected to
/// satisfy `date_start <= date_end`; a reversed range matches nothing.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FilterSpec {
    pub date_start: NaiveDate,
    pub date_end: NaiveDate,
    pub regions: BTreeSet<String>,
    pub categories: BTreeSet<String>,
    pub customer_types: BTreeSet<String>,
    pub promo_flags: BTreeSet<String>,
}

impl FilterSpec {
    /// The default selection: every categorical value selected and the full
    /// date range of the store. This is the dashboard's initial state.
    pub fn all(store: &RecordStore) -> Result<Self, EmptyDatasetError> {
        let (date_start, date_end) = store.date_bounds()?;

        let full = |column| {
            store
                .distinct_values(column)
                .into_iter()
                .collect::<BTreeSet<String>>()
        };

        Ok(FilterSpec {
            date_start,
            date_end,
            regions: full(CategoricalColumn::Region),
            categories: full(CategoricalColumn::Category),
            customer_types: full(CategoricalColumn::CustomerType),
            promo_flags: full(CategoricalColumn::Promo),
        })
    }

    /// Whether a single record passes all five predicates.
    ///
    /// All conditions are conjunctive; there is no OR semantics between
    /// filter dimensions.
    pub fn matches(&self, record: &Record) -> bool {
        record.date >= self.date_start
            && record.date <= self.date_end
            && self.regions.contains(&record.region)
            && self.categories.contains(&record.category)
            && self.customer_types.contains(&record.customer_type)
            && self.promo_flags.contains(&record.promo)
    }

    /// Applies this specification to a store, producing the filtered view.
    pub fn apply<'a>(&self, store: &'a RecordStore) -> FilteredView<'a> {
        let records = store
            .records()
            .iter()
            .filter(|record| self.matches(record))
            .collect();

        FilteredView { records }
    }
}

// ============================================================================
// FILTERED VIEW
// ============================================================================

/// The ordered subsequence of records passing a `FilterSpec`.
///
/// Record order is store order (stable, no reordering). The view borrows
/// from the store and owns no state beyond the subsequence itself; it is
/// recomputed from scratch on every filter change.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FilteredView<'a> {
    records: Vec<&'a Record>,
}

impl<'a> FilteredView<'a> {
    pub fn records(&self) -> &[&'a Record] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &'a Record> + '_ {
        self.records.iter().copied()
    }
}
