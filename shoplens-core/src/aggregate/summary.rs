//! Headline metrics derived from the weekly and RFM tables.

use serde::{Deserialize, Serialize};

use crate::domain::{RfmRecord, WeeklyRevenue};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummaryMetrics {
    pub total_orders: u64,
    pub total_revenue: f64,
    /// Mean over customers with a defined recency.
    pub mean_recency: Option<f64>,
    pub mean_frequency: Option<f64>,
    pub mean_monetary: Option<f64>,
}

impl SummaryMetrics {
    pub fn from_tables(weekly: &[WeeklyRevenue], rfm: &[RfmRecord]) -> Self {
        Self {
            total_orders: weekly.iter().map(|w| w.order_count).sum(),
            total_revenue: weekly.iter().map(|w| w.revenue).sum(),
            mean_recency: mean(rfm.iter().filter_map(|r| r.recency_days.map(|d| d as f64))),
            mean_frequency: mean(rfm.iter().map(|r| r.frequency as f64)),
            mean_monetary: mean(rfm.iter().map(|r| r.monetary)),
        }
    }
}

/// Arithmetic mean; `None` for an empty sequence.
pub fn mean(values: impl Iterator<Item = f64>) -> Option<f64> {
    let (sum, count) = values.fold((0.0, 0usize), |(s, n), v| (s + v, n + 1));
    if count == 0 {
        None
    } else {
        Some(sum / count as f64)
    }
}
