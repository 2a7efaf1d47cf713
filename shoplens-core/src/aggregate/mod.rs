//! Aggregations over a filtered transaction table.
//!
//! Four independent, pure transforms:
//! - weekly revenue (distinct orders + payment sum per calendar week)
//! - revenue per product category, highest first
//! - revenue per payment type, highest first
//! - RFM per customer
//!
//! plus the summary metrics and top-N selections derived from them.

pub mod ranking;
pub mod rfm;
pub mod summary;
pub mod top;
pub mod weekly;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

pub use ranking::{category_revenue, payment_revenue, revenue_by_key};
pub use rfm::rfm;
pub use summary::{mean, SummaryMetrics};
pub use weekly::{week_bounds, weekly_revenue};

use crate::data::TransactionView;
use crate::domain::{CategoryRevenue, PaymentRevenue, RfmRecord, WeeklyRevenue};

/// Every aggregate table for one filtered table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardView {
    pub row_count: usize,
    pub weekly: Vec<WeeklyRevenue>,
    pub categories: Vec<CategoryRevenue>,
    pub payments: Vec<PaymentRevenue>,
    pub rfm: Vec<RfmRecord>,
    pub summary: SummaryMetrics,
}

impl DashboardView {
    /// Compute all four tables and the summary from scratch.
    pub fn compute(view: &TransactionView<'_>, reference: Option<NaiveDateTime>) -> Self {
        let weekly = weekly_revenue(view.iter());
        let categories = category_revenue(view.iter());
        let payments = payment_revenue(view.iter());
        let rfm = rfm(view.iter(), reference);
        let summary = SummaryMetrics::from_tables(&weekly, &rfm);
        Self {
            row_count: view.len(),
            weekly,
            categories,
            payments,
            rfm,
            summary,
        }
    }
}
