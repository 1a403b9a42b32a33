//! FILENAME: report-engine/src/snapshot.rs
//! Dashboard Snapshot - the apply+compute entry point.
//!
//! One call takes the store and the current filter specification and
//! returns everything the presentation layer renders: the KPI metrics, the
//! four chart tables, and the filtered rows for the data table. The same
//! specification against the same store always produces the identical
//! snapshot; nothing here caches or mutates.

use chrono::NaiveDate;
use engine::{FilterSpec, Record, RecordStore};
use serde::Serialize;

use crate::aggregate::{
    promo_split, revenue_by_category, revenue_by_day, revenue_by_payment,
    AggregateTable, ShareTable,
};
use crate::metrics::{compute_metrics, Metrics};

/// Everything the dashboard displays for one filter state.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardSnapshot<'a> {
    pub metrics: Metrics,
    pub revenue_by_day: AggregateTable<NaiveDate>,
    pub revenue_by_category: AggregateTable<String>,
    pub promo_split: ShareTable,
    pub revenue_by_payment: AggregateTable<String>,

    /// The filtered rows for the data table, newest first (stable within a
    /// day). Metrics and tables are computed from the view in store order;
    /// this ordering is display-only.
    pub rows: Vec<&'a Record>,
}

impl<'a> DashboardSnapshot<'a> {
    /// Applies the specification and derives every displayed value.
    pub fn compute(store: &'a RecordStore, spec: &FilterSpec) -> Self {
        let view = spec.apply(store);

        let metrics = compute_metrics(&view);
        let revenue_by_day = revenue_by_day(&view);
        let revenue_by_category = revenue_by_category(&view);
        let promo_split = promo_split(&view);
        let revenue_by_payment = revenue_by_payment(&view);

        let mut rows: Vec<&Record> = view.records().to_vec();
        rows.sort_by(|a, b| b.date.cmp(&a.date));

        DashboardSnapshot {
            metrics,
            revenue_by_day,
            revenue_by_category,
            promo_split,
            revenue_by_payment,
            rows,
        }
    }
}
