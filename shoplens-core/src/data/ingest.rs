//! CSV ingestion: read the transaction file with Polars, convert to rows.
//!
//! Every column is read as text so that a malformed cell can never fail the
//! whole load. Timestamps are parsed leniently afterwards (bad cells become
//! `None`) and the number of coerced cells is reported per column.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use polars::prelude::*;
use serde::{Deserialize, Serialize};

use super::dataset::Dataset;
use super::schema::TransactionSchema;
use super::timestamp::parse_timestamp;
use crate::domain::Transaction;

#[derive(Debug, thiserror::Error)]
pub enum DataError {
    #[error("data file not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("Ingest failed: {0}")]
    Ingest(String),

    #[error("Missing required column: {0}")]
    MissingColumn(String),
}

/// What happened during a load, for logging and the CLI `inspect` command.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LoadReport {
    pub rows: usize,
    /// Non-empty timestamp cells that failed to parse, per column.
    pub coerced_timestamps: BTreeMap<String, usize>,
    /// Non-empty `payment_value` cells that failed to parse (counted as 0).
    pub coerced_payment_values: usize,
}

impl LoadReport {
    pub fn total_coerced(&self) -> usize {
        self.coerced_timestamps.values().sum::<usize>() + self.coerced_payment_values
    }
}

/// Load the transaction file into a sorted [`Dataset`].
pub fn load_dataset(path: &Path) -> Result<(Dataset, LoadReport), DataError> {
    let df = read_csv(path)?;
    TransactionSchema::validate(&df)?;
    let (rows, report) = dataframe_to_transactions(&df)?;

    for (column, count) in &report.coerced_timestamps {
        if *count > 0 {
            tracing::warn!(column = %column, count, "unparseable timestamps set to missing");
        }
    }
    if report.coerced_payment_values > 0 {
        tracing::warn!(
            count = report.coerced_payment_values,
            "unparseable payment values counted as zero"
        );
    }

    let dataset = Dataset::from_transactions(rows);
    tracing::info!(
        path = %path.display(),
        rows = dataset.len(),
        hash = %dataset.hash(),
        "loaded transaction table"
    );
    Ok((dataset, report))
}

/// Read a CSV file with every column as text.
pub fn read_csv(path: &Path) -> Result<DataFrame, DataError> {
    if !path.exists() {
        return Err(DataError::NotFound(path.to_path_buf()));
    }
    CsvReadOptions::default()
        .with_has_header(true)
        .with_infer_schema_length(Some(0))
        .try_into_reader_with_file_path(Some(path.to_path_buf()))
        .map_err(|e| DataError::Ingest(e.to_string()))?
        .finish()
        .map_err(|e| DataError::Ingest(e.to_string()))
}

fn text_column<'a>(df: &'a DataFrame, name: &str) -> Result<&'a StringChunked, DataError> {
    df.column(name)
        .map_err(|_| DataError::MissingColumn(name.to_string()))?
        .str()
        .map_err(|e| DataError::Ingest(format!("column '{name}' is not text: {e}")))
}

/// Convert a validated all-text DataFrame into transaction rows.
pub fn dataframe_to_transactions(
    df: &DataFrame,
) -> Result<(Vec<Transaction>, LoadReport), DataError> {
    let order_ids = text_column(df, TransactionSchema::ORDER_ID)?;
    let customer_ids = text_column(df, TransactionSchema::CUSTOMER_ID)?;
    let categories = text_column(df, TransactionSchema::PRODUCT_CATEGORY_NAME)?;
    let payment_types = text_column(df, TransactionSchema::PAYMENT_TYPE)?;
    let payment_values = text_column(df, TransactionSchema::PAYMENT_VALUE)?;

    let timestamp_cols = TransactionSchema::TIMESTAMP_COLUMNS
        .iter()
        .map(|name| text_column(df, name))
        .collect::<Result<Vec<_>, _>>()?;

    let n = df.height();
    let mut report = LoadReport {
        rows: n,
        coerced_timestamps: TransactionSchema::TIMESTAMP_COLUMNS
            .iter()
            .map(|name| (name.to_string(), 0))
            .collect(),
        coerced_payment_values: 0,
    };

    let text = |ca: &StringChunked, i: usize| ca.get(i).unwrap_or("").to_string();

    let mut rows = Vec::with_capacity(n);
    for i in 0..n {
        let mut stamps = [None; 5];
        for (slot, (name, ca)) in TransactionSchema::TIMESTAMP_COLUMNS
            .iter()
            .zip(timestamp_cols.iter())
            .enumerate()
        {
            let raw = ca.get(i).unwrap_or("");
            let parsed = parse_timestamp(raw);
            if parsed.is_none() && !raw.trim().is_empty() {
                if let Some(count) = report.coerced_timestamps.get_mut(*name) {
                    *count += 1;
                }
            }
            stamps[slot] = parsed;
        }

        let raw_value = payment_values.get(i).unwrap_or("").trim();
        let payment_value = match raw_value.parse::<f64>() {
            Ok(v) if v.is_finite() => v,
            _ => {
                if !raw_value.is_empty() {
                    report.coerced_payment_values += 1;
                }
                0.0
            }
        };

        rows.push(Transaction {
            order_id: text(order_ids, i),
            customer_id: text(customer_ids, i),
            product_category_name: text(categories, i),
            payment_type: text(payment_types, i),
            payment_value,
            order_purchase_timestamp: stamps[0],
            order_approved_at: stamps[1],
            order_delivered_customer_date: stamps[2],
            order_delivered_carrier_date: stamps[3],
            order_estimated_delivery_date: stamps[4],
        });
    }

    Ok((rows, report))
}
