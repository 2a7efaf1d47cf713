//! Domain types: transaction rows, aggregate records, identities.

pub mod ids;
pub mod records;
pub mod transaction;

pub use ids::{DatasetHash, TableFingerprint};
pub use records::{CategoryRevenue, PaymentRevenue, RfmRecord, WeeklyRevenue};
pub use transaction::Transaction;
