//! FILENAME: report-engine/src/metrics.rs
//! Metrics Calculator - scalar KPIs over a filtered view.

use engine::FilteredView;
use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

/// The headline KPI block shown above the charts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Metrics {
    /// Sum of revenue over all records in the view.
    pub total_revenue: f64,

    /// Count of DISTINCT transaction ids, not of records: several line
    /// items may share one transaction id.
    pub transaction_count: usize,

    /// Sum of quantity over all records in the view.
    pub items_sold: u64,

    /// total_revenue / transaction_count, defined as 0 when there are no
    /// transactions.
    pub avg_revenue_per_transaction: f64,
}

/// Computes the KPI block for a view. An empty view yields all zeros.
pub fn compute_metrics(view: &FilteredView) -> Metrics {
    let mut total_revenue = 0.0;
    let mut items_sold: u64 = 0;
    let mut transaction_ids: FxHashSet<&str> = FxHashSet::default();

    for record in view.iter() {
        total_revenue += record.revenue;
        items_sold += record.quantity as u64;
        transaction_ids.insert(record.transaction_id.as_str());
    }

    let transaction_count = transaction_ids.len();

    // Explicit zero-on-empty contract: never NaN or infinity.
    let avg_revenue_per_transaction = if transaction_count == 0 {
        0.0
    } else {
        total_revenue / transaction_count as f64
    };

    Metrics {
        total_revenue,
        transaction_count,
        items_sold,
        avg_revenue_per_transaction,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use engine::{FilterSpec, Record, RecordStore};

    fn date(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, d).unwrap()
    }

    fn record(id: &str, d: u32, unit_price: f64, quantity: u32) -> Record {
        Record::new(
            id.to_string(),
            date(d),
            "North".to_string(),
            "Produce".to_string(),
            "Member".to_string(),
            "No".to_string(),
            "Card".to_string(),
            unit_price,
            quantity,
        )
    }

    fn create_test_store() -> RecordStore {
        RecordStore::new(vec![
            record("T-1", 1, 2.0, 3), // revenue 6
            record("T-1", 1, 1.0, 2), // second line item, same transaction
            record("T-2", 2, 5.0, 1), // revenue 5
        ])
    }

    #[test]
    fn test_metrics_over_full_store() {
        let store = create_test_store();
        let spec = FilterSpec::all(&store).unwrap();
        let view = spec.apply(&store);

        let metrics = compute_metrics(&view);
        assert_eq!(metrics.total_revenue, 13.0);
        assert_eq!(metrics.transaction_count, 2);
        assert_eq!(metrics.items_sold, 6);
        assert!((metrics.avg_revenue_per_transaction - 6.5).abs() < 1e-9);
    }

    #[test]
    fn test_transaction_count_is_distinct_ids() {
        let store = create_test_store();
        let spec = FilterSpec::all(&store).unwrap();
        let view = spec.apply(&store);

        // 3 records, but only 2 distinct transaction ids.
        assert_eq!(view.len(), 3);
        assert_eq!(compute_metrics(&view).transaction_count, 2);
    }

    #[test]
    fn test_empty_view_yields_all_zeros() {
        let store = create_test_store();
        let mut spec = FilterSpec::all(&store).unwrap();
        spec.regions.clear();

        let metrics = compute_metrics(&spec.apply(&store));
        assert_eq!(metrics.total_revenue, 0.0);
        assert_eq!(metrics.transaction_count, 0);
        assert_eq!(metrics.items_sold, 0);
        assert_eq!(metrics.avg_revenue_per_transaction, 0.0);
        assert!(metrics.avg_revenue_per_transaction.is_finite());
    }

    #[test]
    fn test_average_zero_exactly_when_no_transactions() {
        let store = create_test_store();
        let spec = FilterSpec::all(&store).unwrap();
        let metrics = compute_metrics(&spec.apply(&store));

        assert!(metrics.transaction_count > 0);
        let expected = metrics.total_revenue / metrics.transaction_count as f64;
        assert!((metrics.avg_revenue_per_transaction - expected).abs() < 1e-9);
    }
}
