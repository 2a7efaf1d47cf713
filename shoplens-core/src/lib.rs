//! ShopLens Core: transaction loading, date filtering, and sales aggregates.
//!
//! This crate holds everything the dashboard front ends share:
//! - Domain types (transactions, aggregate rows, identity hashes)
//! - CSV ingest and the approval-date filter
//! - Weekly, category, payment-type and RFM aggregations
//! - Summary metrics and top-N selections
//! - Memoization keyed by filtered-table fingerprint
//! - Number/currency formatting, configuration, and export

pub mod aggregate;
pub mod config;
pub mod context;
pub mod data;
pub mod domain;
pub mod export;
pub mod format;
pub mod memo;

pub use aggregate::{DashboardView, SummaryMetrics};
pub use config::Config;
pub use context::AppContext;
pub use data::{DataError, Dataset, DateRange};
pub use memo::AggregateCache;
