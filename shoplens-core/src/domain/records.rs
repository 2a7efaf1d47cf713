//! Aggregate table rows. Each table is recomputed from scratch for every
//! filtered table and has no identity beyond it.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Revenue for one calendar week (Monday through Sunday).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeeklyRevenue {
    pub week_start: NaiveDate,
    /// Closing Sunday of the week; the label a calendar-week resample uses.
    pub week_end: NaiveDate,
    pub order_count: u64,
    pub revenue: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryRevenue {
    pub product_category_name: String,
    pub total_revenue: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentRevenue {
    pub payment_type: String,
    pub total_revenue: f64,
}

/// Recency / frequency / monetary scores for one customer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RfmRecord {
    pub customer_id: String,
    pub frequency: u64,
    pub monetary: f64,
    /// Whole days between the reference date and the latest approval.
    /// `None` when none of the customer's rows has an approval timestamp.
    /// May be negative.
    pub recency_days: Option<i64>,
}
