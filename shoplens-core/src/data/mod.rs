//! Data loading and filtering

pub mod dataset;
pub mod filter;
pub mod ingest;
pub mod schema;
pub mod timestamp;

pub use dataset::Dataset;
pub use filter::{filter_by_approval, DateRange, TransactionView};
pub use ingest::{load_dataset, DataError, LoadReport};
pub use schema::TransactionSchema;
pub use timestamp::parse_timestamp;
