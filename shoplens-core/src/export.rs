//! Export of aggregate tables to CSV and of whole views to JSON.

use std::path::{Path, PathBuf};

use crate::aggregate::DashboardView;
use crate::domain::{CategoryRevenue, PaymentRevenue, RfmRecord, WeeklyRevenue};

#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("csv write failed: {0}")]
    Csv(#[from] csv::Error),

    #[error("json serialization failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("failed to write {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to flush CSV writer: {0}")]
    Flush(String),

    #[error("CSV output is not valid UTF-8")]
    Utf8(#[from] std::string::FromUtf8Error),
}

// ─── CSV export ─────────────────────────────────────────────────────

fn finish(wtr: csv::Writer<Vec<u8>>) -> Result<String, ExportError> {
    let data = wtr
        .into_inner()
        .map_err(|e| ExportError::Flush(e.error().to_string()))?;
    Ok(String::from_utf8(data)?)
}

/// Columns: week_start, week_end, order_count, revenue
pub fn weekly_csv(table: &[WeeklyRevenue]) -> Result<String, ExportError> {
    let mut wtr = csv::Writer::from_writer(vec![]);
    wtr.write_record(["week_start", "week_end", "order_count", "revenue"])?;
    for w in table {
        wtr.write_record([
            &w.week_start.to_string(),
            &w.week_end.to_string(),
            &w.order_count.to_string(),
            &format!("{:.2}", w.revenue),
        ])?;
    }
    finish(wtr)
}

pub fn categories_csv(table: &[CategoryRevenue]) -> Result<String, ExportError> {
    let mut wtr = csv::Writer::from_writer(vec![]);
    wtr.write_record(["product_category_name", "total_revenue"])?;
    for c in table {
        wtr.write_record([&c.product_category_name, &format!("{:.2}", c.total_revenue)])?;
    }
    finish(wtr)
}

pub fn payments_csv(table: &[PaymentRevenue]) -> Result<String, ExportError> {
    let mut wtr = csv::Writer::from_writer(vec![]);
    wtr.write_record(["payment_type", "total_revenue"])?;
    for p in table {
        wtr.write_record([&p.payment_type, &format!("{:.2}", p.total_revenue)])?;
    }
    finish(wtr)
}

/// Undefined recency is written as an empty cell.
pub fn rfm_csv(table: &[RfmRecord]) -> Result<String, ExportError> {
    let mut wtr = csv::Writer::from_writer(vec![]);
    wtr.write_record(["customer_id", "frequency", "monetary", "recency_days"])?;
    for r in table {
        let recency = r.recency_days.map(|d| d.to_string()).unwrap_or_default();
        wtr.write_record([
            &r.customer_id,
            &r.frequency.to_string(),
            &format!("{:.2}", r.monetary),
            &recency,
        ])?;
    }
    finish(wtr)
}

pub fn view_json(view: &DashboardView) -> Result<String, ExportError> {
    Ok(serde_json::to_string_pretty(view)?)
}

// ─── Bundle ─────────────────────────────────────────────────────────

/// Write every table plus `view.json` into `dir`, creating it if needed.
///
/// Returns the written paths in a fixed order: weekly, categories,
/// payments, rfm, view.
pub fn write_bundle(dir: &Path, view: &DashboardView) -> Result<Vec<PathBuf>, ExportError> {
    std::fs::create_dir_all(dir).map_err(|source| ExportError::Io {
        path: dir.to_path_buf(),
        source,
    })?;

    let files = [
        ("weekly.csv", weekly_csv(&view.weekly)?),
        ("categories.csv", categories_csv(&view.categories)?),
        ("payments.csv", payments_csv(&view.payments)?),
        ("rfm.csv", rfm_csv(&view.rfm)?),
        ("view.json", view_json(view)?),
    ];

    let mut written = Vec::with_capacity(files.len());
    for (name, contents) in files {
        let path = dir.join(name);
        std::fs::write(&path, contents).map_err(|source| ExportError::Io {
            path: path.clone(),
            source,
        })?;
        written.push(path);
    }

    tracing::info!(dir = %dir.display(), files = written.len(), "export bundle written");
    Ok(written)
}
