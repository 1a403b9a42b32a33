//! FILENAME: engine/src/record.rs
//! Record - a single transaction line from the sales dataset.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One transaction line item.
///
/// A transaction id is NOT unique per record: a purchase with several line
/// items produces several records sharing the same id. Revenue is computed
/// once at construction and never recomputed afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    /// Transaction identifier (shared by line items of the same purchase).
    pub transaction_id: String,

    /// Calendar date of the transaction (no time component).
    pub date: NaiveDate,

    /// Store region (categorical).
    pub region: String,

    /// Product category (categorical).
    pub category: String,

    /// Customer type (categorical).
    pub customer_type: String,

    /// Promo-applied flag, kept categorical (e.g. "Yes" / "No").
    pub promo: String,

    /// Payment method (categorical).
    pub payment_method: String,

    /// Unit price, non-negative.
    pub unit_price: f64,

    /// Quantity of units, non-negative.
    pub quantity: u32,

    /// Derived: unit_price * quantity, fixed at construction.
    pub revenue: f64,
}

impl Record {
    /// Builds a record, deriving `revenue` from price and quantity.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        transaction_id: String,
        date: NaiveDate,
        region: String,
        category: String,
        customer_type: String,
        promo: String,
        payment_method: String,
        unit_price: f64,
        quantity: u32,
    ) -> Self {
        let revenue = unit_price * quantity as f64;
        Record {
            transaction_id,
            date,
            region,
            category,
            customer_type,
            promo,
            payment_method,
            unit_price,
            quantity,
            revenue,
        }
    }
}
