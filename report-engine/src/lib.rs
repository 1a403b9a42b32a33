//! FILENAME: report-engine/src/lib.rs
//! Report engine for the sales dashboard.
//!
//! This crate derives everything the dashboard displays from a
//! `FilteredView`: scalar KPI metrics, the four chart-ready aggregate
//! tables, and the combined snapshot handed to the presentation layer. It
//! depends on `engine` only for the data model (Record, RecordStore,
//! FilterSpec, FilteredView).
//!
//! Layers:
//! - `metrics`: Scalar KPIs (totals, counts, averages)
//! - `aggregate`: Grouped revenue sums (by day, category, promo, payment)
//! - `snapshot`: The apply+compute entry point for the presentation layer

pub mod metrics;
pub mod aggregate;
pub mod snapshot;

pub use metrics::{compute_metrics, Metrics};
pub use aggregate::{
    promo_split, revenue_by_category, revenue_by_day, revenue_by_payment,
    AggregateRow, AggregateTable, ShareRow, ShareTable,
};
pub use snapshot::DashboardSnapshot;
