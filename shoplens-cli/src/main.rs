//! ShopLens CLI: headless access to the dashboard computations.
//!
//! Commands:
//! - `summary`: print summary metrics and top-N rankings for a date range
//! - `export`: write every aggregate table (CSV) and the full view (JSON)
//! - `inspect`: report what was loaded: rows, span, coercions, hash

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use shoplens_core::aggregate::top::{
    best_categories, short_customer_label, top_by_frequency, top_by_monetary, top_by_recency,
    worst_categories,
};
use shoplens_core::export::{view_json, write_bundle};
use shoplens_core::format::{format_number_opt, group_thousands};
use shoplens_core::{AppContext, Config, DashboardView, DateRange};

#[derive(Parser)]
#[command(name = "shoplens", about = "ShopLens CLI: sales analytics over a transaction CSV")]
struct Cli {
    /// Config file (TOML). Missing file means defaults.
    #[arg(long, global = true, default_value = "shoplens.toml")]
    config: PathBuf,

    /// Transaction CSV, overriding `data_path` from the config.
    #[arg(long, global = true)]
    data: Option<PathBuf>,

    /// Start date (YYYY-MM-DD). Defaults to the first purchase date.
    #[arg(long, global = true)]
    start: Option<String>,

    /// End date (YYYY-MM-DD). Defaults to the last purchase date.
    #[arg(long, global = true)]
    end: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print summary metrics and top-N rankings.
    Summary {
        /// Print the whole view as JSON instead of text.
        #[arg(long, default_value_t = false)]
        json: bool,
    },
    /// Write weekly/categories/payments/rfm CSVs and view.json.
    Export {
        /// Output directory (created if missing).
        #[arg(long, default_value = "export")]
        out_dir: PathBuf,
    },
    /// Report load diagnostics for the data file.
    Inspect,
}

fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    let mut config = Config::load_or_default(&cli.config)
        .with_context(|| format!("failed to read config {}", cli.config.display()))?;
    if let Some(data) = cli.data {
        config.data_path = data;
    }
    let data_path = config.data_path.clone();
    let ctx = AppContext::load(config)
        .with_context(|| format!("failed to load {}", data_path.display()))?;

    match cli.command {
        Commands::Summary { json } => {
            let range = resolve_range(&ctx, cli.start.as_deref(), cli.end.as_deref())?;
            let view = compute(&ctx, range);
            if json {
                println!("{}", view_json(&view)?);
            } else {
                print_summary(&ctx, range, &view);
            }
            Ok(())
        }
        Commands::Export { out_dir } => {
            let range = resolve_range(&ctx, cli.start.as_deref(), cli.end.as_deref())?;
            let view = compute(&ctx, range);
            let written = write_bundle(&out_dir, &view)
                .with_context(|| format!("failed to export to {}", out_dir.display()))?;
            for path in written {
                println!("{}", path.display());
            }
            Ok(())
        }
        Commands::Inspect => {
            print_inspect(&ctx);
            Ok(())
        }
    }
}

fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_env("SHOPLENS_LOG")
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn compute(ctx: &AppContext, range: DateRange) -> std::sync::Arc<DashboardView> {
    let mut cache = ctx.new_cache();
    ctx.view(range, &mut cache)
}

/// Resolve `--start/--end` against the loaded span; either may be omitted.
fn resolve_range(ctx: &AppContext, start: Option<&str>, end: Option<&str>) -> Result<DateRange> {
    let parse = |s: &str, flag: &str| {
        NaiveDate::parse_from_str(s, "%Y-%m-%d")
            .with_context(|| format!("--{flag} must be YYYY-MM-DD, got '{s}'"))
    };
    let start = start.map(|s| parse(s, "start")).transpose()?;
    let end = end.map(|s| parse(s, "end")).transpose()?;

    let range = match (ctx.full_range(), start, end) {
        (_, Some(s), Some(e)) => DateRange::new(s, e),
        (Some(full), s, e) => DateRange::new(s.unwrap_or(full.start), e.unwrap_or(full.end)),
        (None, _, _) => bail!("the data file has no purchase dates; pass both --start and --end"),
    };
    if range.is_inverted() {
        tracing::warn!(%range, "end date precedes start date; nothing will be selected");
    }
    Ok(range)
}

fn print_summary(ctx: &AppContext, range: DateRange, view: &DashboardView) {
    let display = &ctx.config().display;
    let revenue = &display.revenue_currency;
    let s = &view.summary;
    let n = display.top_n;

    println!();
    println!("=== Sales Summary ===");
    println!("Range:          {range} ({} days)", range.days());
    println!("Rows:           {}", group_thousands(view.row_count as u64, "."));
    println!();
    println!("--- Orders ---");
    println!("Total orders:   {}", group_thousands(s.total_orders, "."));
    println!("Total revenue:  {}", revenue.format(s.total_revenue));
    println!("Weeks:          {}", view.weekly.len());
    println!();
    println!("--- Customers ---");
    println!("Customers:      {}", view.rfm.len());
    println!("Avg recency:    {} days", format_number_opt(s.mean_recency, 1));
    println!("Avg frequency:  {}", format_number_opt(s.mean_frequency, 2));
    println!("Avg monetary:   {}", display.monetary_currency.format_opt(s.mean_monetary));

    println!();
    println!("--- Best categories ---");
    for c in best_categories(&view.categories, n) {
        println!("  {:<32} {:>18}", c.product_category_name, revenue.format(c.total_revenue));
    }
    println!("--- Worst categories ---");
    for c in worst_categories(&view.categories, n) {
        println!("  {:<32} {:>18}", c.product_category_name, revenue.format(c.total_revenue));
    }
    println!("--- Payment types ---");
    for p in &view.payments {
        println!("  {:<32} {:>18}", p.payment_type, revenue.format(p.total_revenue));
    }

    println!("--- Most recent customers ---");
    for r in top_by_recency(&view.rfm, n) {
        let days = r.recency_days.map_or_else(|| "n/a".to_string(), |d| d.to_string());
        println!("  {:<8} {:>8} days", short_customer_label(&r.customer_id), days);
    }
    println!("--- Most frequent customers ---");
    for r in top_by_frequency(&view.rfm, n) {
        println!("  {:<8} {:>8} orders", short_customer_label(&r.customer_id), r.frequency);
    }
    println!("--- Highest spending customers ---");
    for r in top_by_monetary(&view.rfm, n) {
        println!("  {:<8} {:>18}", short_customer_label(&r.customer_id), revenue.format(r.monetary));
    }
}

fn print_inspect(ctx: &AppContext) {
    let ds = ctx.dataset();
    let report = ctx.load_report();

    println!("Data:           {}", ctx.config().data_path.display());
    println!("Rows:           {}", group_thousands(ds.len() as u64, "."));
    match ds.purchase_span() {
        Some((first, last)) => println!("Purchase span:  {first} to {last}"),
        None => println!("Purchase span:  (none)"),
    }
    match ctx.reference_date() {
        Some(r) => println!("Reference date: {r}"),
        None => println!("Reference date: (none)"),
    }
    println!("Dataset hash:   {}", ds.hash());
    println!();
    println!("--- Coerced values ---");
    for (column, count) in &report.coerced_timestamps {
        println!("  {column:<32} {count:>8}");
    }
    println!("  {:<32} {:>8}", "payment_value", report.coerced_payment_values);
    println!("  {:<32} {:>8}", "total", report.total_coerced());
}

#[cfg(test)]
mod tests {
    use super::*;
    use shoplens_core::domain::Transaction;
    use shoplens_core::Dataset;

    fn date(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2018, 3, d).unwrap()
    }

    fn ctx() -> AppContext {
        let at = |d: u32| date(d).and_hms_opt(9, 0, 0).unwrap();
        let rows = vec![
            Transaction::new("o1", "C1", "toys", "boleto", 10.0)
                .with_purchase(at(2))
                .with_approved(at(2)),
            Transaction::new("o2", "C2", "toys", "boleto", 20.0)
                .with_purchase(at(9))
                .with_approved(at(9)),
        ];
        AppContext::new(Config::default(), Dataset::from_transactions(rows))
    }

    #[test]
    fn missing_bounds_default_to_span() {
        let ctx = ctx();
        assert_eq!(
            resolve_range(&ctx, None, None).unwrap(),
            DateRange::new(date(2), date(9))
        );
        assert_eq!(
            resolve_range(&ctx, Some("2018-03-05"), None).unwrap(),
            DateRange::new(date(5), date(9))
        );
    }

    #[test]
    fn bad_date_is_an_error() {
        let err = resolve_range(&ctx(), Some("03/05/2018"), None).unwrap_err();
        assert!(err.to_string().contains("--start"));
    }

    #[test]
    fn inverted_range_is_allowed() {
        let range = resolve_range(&ctx(), Some("2018-03-09"), Some("2018-03-02")).unwrap();
        assert!(range.is_inverted());
        assert_eq!(compute(&ctx(), range).row_count, 0);
    }

    #[test]
    fn empty_dataset_needs_explicit_range() {
        let ctx = AppContext::new(Config::default(), Dataset::from_transactions(Vec::new()));
        assert!(resolve_range(&ctx, None, None).is_err());
        assert!(resolve_range(&ctx, Some("2018-03-01"), Some("2018-03-02")).is_ok());
    }

    #[test]
    fn cli_parses_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "shoplens", "export", "--out-dir", "out", "--start", "2018-01-01",
        ])
        .unwrap();
        assert_eq!(cli.start.as_deref(), Some("2018-01-01"));
        assert!(matches!(cli.command, Commands::Export { .. }));
    }
}
