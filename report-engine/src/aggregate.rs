//! FILENAME: report-engine/src/aggregate.rs
//! Aggregator - grouped revenue sums for the dashboard charts.
//!
//! Four independent grouping operations over a `FilteredView`, each summing
//! revenue per distinct key present in the view:
//! - by day (time-series line chart, ascending by date)
//! - by category (bar chart, descending by revenue)
//! - by promo flag (pie chart with revenue shares)
//! - by payment method (bar chart, descending by revenue)
//!
//! Groups with no matching records are omitted, never emitted as zero rows.
//! An empty view produces an empty table, not an error.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use engine::FilteredView;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

// ============================================================================
// TABLE TYPES
// ============================================================================

/// One row of an aggregate table: a group key and its summed revenue.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AggregateRow<K> {
    pub key: K,
    pub revenue: f64,
}

/// An ordered sequence of (key, summed revenue) rows, one per distinct key
/// present in the view. Constructed fresh per call, never mutated after.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AggregateTable<K> {
    pub rows: Vec<AggregateRow<K>>,
}

impl<K> AggregateTable<K> {
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Sum of revenue across all rows.
    pub fn total_revenue(&self) -> f64 {
        self.rows.iter().map(|row| row.revenue).sum()
    }
}

/// One row of the promo-split table: revenue plus its share of the table
/// total.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShareRow {
    pub key: String,
    pub revenue: f64,
    /// revenue / table total; 0 when the table total is 0.
    pub share: f64,
}

/// The promo-split table. Shares sum to 1.0 when the total is positive and
/// are all 0 when the total is 0.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShareTable {
    pub rows: Vec<ShareRow>,
}

impl ShareTable {
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

// ============================================================================
// GROUPING CORE
// ============================================================================

/// Sums revenue per key, preserving first-encountered key order.
///
/// The insertion-ordered Vec is what makes the descending sorts
/// deterministic: `sort_by` is stable, so equal-revenue groups keep the
/// order their keys first appeared in the view.
fn group_sum<'a, F>(view: &FilteredView<'a>, key_fn: F) -> Vec<(String, f64)>
where
    F: Fn(&'a engine::Record) -> &'a str,
{
    let mut index: FxHashMap<&str, usize> = FxHashMap::default();
    let mut groups: Vec<(String, f64)> = Vec::new();

    for record in view.iter() {
        let key = key_fn(record);
        match index.get(key) {
            Some(&i) => groups[i].1 += record.revenue,
            None => {
                index.insert(key, groups.len());
                groups.push((key.to_string(), record.revenue));
            }
        }
    }

    groups
}

/// Turns grouped sums into a table sorted descending by revenue.
fn descending_table(mut groups: Vec<(String, f64)>) -> AggregateTable<String> {
    groups.sort_by(|a, b| b.1.total_cmp(&a.1));

    AggregateTable {
        rows: groups
            .into_iter()
            .map(|(key, revenue)| AggregateRow { key, revenue })
            .collect(),
    }
}

// ============================================================================
// GROUPING OPERATIONS
// ============================================================================

/// Revenue per calendar date, ascending by date.
pub fn revenue_by_day(view: &FilteredView) -> AggregateTable<NaiveDate> {
    let mut by_day: BTreeMap<NaiveDate, f64> = BTreeMap::new();

    for record in view.iter() {
        *by_day.entry(record.date).or_insert(0.0) += record.revenue;
    }

    AggregateTable {
        rows: by_day
            .into_iter()
            .map(|(key, revenue)| AggregateRow { key, revenue })
            .collect(),
    }
}

/// Revenue per product category, descending by revenue.
pub fn revenue_by_category(view: &FilteredView) -> AggregateTable<String> {
    descending_table(group_sum(view, |record| &record.category))
}

/// Revenue per payment method, descending by revenue.
pub fn revenue_by_payment(view: &FilteredView) -> AggregateTable<String> {
    descending_table(group_sum(view, |record| &record.payment_method))
}

/// Revenue per promo flag with each row's share of the table total.
pub fn promo_split(view: &FilteredView) -> ShareTable {
    let groups = group_sum(view, |record| &record.promo);
    let total: f64 = groups.iter().map(|(_, revenue)| revenue).sum();

    let rows = groups
        .into_iter()
        .map(|(key, revenue)| {
            let share = if total == 0.0 { 0.0 } else { revenue / total };
            ShareRow { key, revenue, share }
        })
        .collect();

    ShareTable { rows }
}

#[cfg(test)]
mod tests {
    use super::*;
    use engine::{FilterSpec, Record, RecordStore};

    fn date(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, d).unwrap()
    }

    fn record(id: &str, d: u32, category: &str, promo: &str, payment: &str, revenue: f64) -> Record {
        // unit_price = revenue, quantity = 1 keeps the derived revenue exact
        Record::new(
            id.to_string(),
            date(d),
            "North".to_string(),
            category.to_string(),
            "Member".to_string(),
            promo.to_string(),
            payment.to_string(),
            revenue,
            1,
        )
    }

    fn create_test_store() -> RecordStore {
        RecordStore::new(vec![
            record("T-1", 2, "Produce", "Yes", "Card", 20.0),
            record("T-2", 1, "Dairy", "No", "Cash", 5.0),
            record("T-3", 1, "Produce", "Yes", "Card", 10.0),
            record("T-4", 3, "Bakery", "No", "Cash", 15.0),
        ])
    }

    fn full_view(store: &RecordStore) -> FilteredView<'_> {
        FilterSpec::all(store).unwrap().apply(store)
    }

    #[test]
    fn test_revenue_by_day_ascending() {
        let store = create_test_store();
        let table = revenue_by_day(&full_view(&store));

        let keys: Vec<NaiveDate> = table.rows.iter().map(|row| row.key).collect();
        assert_eq!(keys, vec![date(1), date(2), date(3)]);
        assert_eq!(table.rows[0].revenue, 15.0); // 5 + 10 on day 1
        assert_eq!(table.rows[1].revenue, 20.0);
        assert_eq!(table.rows[2].revenue, 15.0);
    }

    #[test]
    fn test_revenue_by_category_descending() {
        let store = create_test_store();
        let table = revenue_by_category(&full_view(&store));

        let keys: Vec<&str> = table.rows.iter().map(|row| row.key.as_str()).collect();
        assert_eq!(keys, vec!["Produce", "Bakery", "Dairy"]);
        assert_eq!(table.rows[0].revenue, 30.0);
    }

    #[test]
    fn test_descending_ties_keep_first_encountered_order() {
        let store = RecordStore::new(vec![
            record("T-1", 1, "Dairy", "No", "Card", 10.0),
            record("T-2", 1, "Produce", "No", "Card", 10.0),
            record("T-3", 1, "Bakery", "No", "Card", 10.0),
        ]);
        let table = revenue_by_category(&full_view(&store));

        let keys: Vec<&str> = table.rows.iter().map(|row| row.key.as_str()).collect();
        assert_eq!(keys, vec!["Dairy", "Produce", "Bakery"]);
    }

    #[test]
    fn test_category_table_partitions_total_revenue() {
        let store = create_test_store();
        let view = full_view(&store);
        let table = revenue_by_category(&view);

        let view_total: f64 = view.iter().map(|record| record.revenue).sum();
        assert!((table.total_revenue() - view_total).abs() < 1e-9);
    }

    #[test]
    fn test_promo_shares_sum_to_one() {
        let store = create_test_store();
        let table = promo_split(&full_view(&store));

        let share_sum: f64 = table.rows.iter().map(|row| row.share).sum();
        assert!((share_sum - 1.0).abs() < 1e-9);

        let yes = table.rows.iter().find(|row| row.key == "Yes").unwrap();
        assert!((yes.share - 30.0 / 50.0).abs() < 1e-9);
    }

    #[test]
    fn test_promo_shares_all_zero_when_total_is_zero() {
        let store = RecordStore::new(vec![
            record("T-1", 1, "Produce", "Yes", "Card", 0.0),
            record("T-2", 1, "Dairy", "No", "Cash", 0.0),
        ]);
        let table = promo_split(&full_view(&store));

        assert_eq!(table.rows.len(), 2);
        for row in &table.rows {
            assert_eq!(row.share, 0.0);
        }
    }

    #[test]
    fn test_revenue_by_payment_descending() {
        let store = create_test_store();
        let table = revenue_by_payment(&full_view(&store));

        let keys: Vec<&str> = table.rows.iter().map(|row| row.key.as_str()).collect();
        assert_eq!(keys, vec!["Card", "Cash"]);
        assert_eq!(table.rows[0].revenue, 30.0);
        assert_eq!(table.rows[1].revenue, 20.0);
    }

    #[test]
    fn test_table_serde_round_trip() {
        let store = create_test_store();
        let table = revenue_by_category(&full_view(&store));

        let json = serde_json::to_string(&table).unwrap();
        let back: AggregateTable<String> = serde_json::from_str(&json).unwrap();
        assert_eq!(back, table);
    }

    #[test]
    fn test_empty_view_produces_empty_tables() {
        let store = create_test_store();
        let mut spec = FilterSpec::all(&store).unwrap();
        spec.categories.clear();
        let view = spec.apply(&store);

        assert!(revenue_by_day(&view).is_empty());
        assert!(revenue_by_category(&view).is_empty());
        assert!(promo_split(&view).is_empty());
        assert!(revenue_by_payment(&view).is_empty());
    }
}
