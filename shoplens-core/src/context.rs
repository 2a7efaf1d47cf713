//! Application context: the loaded dataset and configuration, built once at
//! startup and only read afterwards.
//!
//! Mutable per-session state (the aggregate cache) lives outside the context
//! and is passed in explicitly, so one context can serve any number of
//! readers.

use std::sync::Arc;

use chrono::NaiveDateTime;

use crate::aggregate::DashboardView;
use crate::config::Config;
use crate::data::{filter_by_approval, load_dataset, DataError, Dataset, DateRange, LoadReport, TransactionView};
use crate::memo::AggregateCache;

#[derive(Debug)]
pub struct AppContext {
    config: Config,
    dataset: Dataset,
    load_report: LoadReport,
}

impl AppContext {
    pub fn new(config: Config, dataset: Dataset) -> Self {
        Self {
            config,
            dataset,
            load_report: LoadReport::default(),
        }
    }

    /// Load the dataset named by `config.data_path`.
    pub fn load(config: Config) -> Result<Self, DataError> {
        let (dataset, load_report) = load_dataset(&config.data_path)?;
        Ok(Self {
            config,
            dataset,
            load_report,
        })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    pub fn load_report(&self) -> &LoadReport {
        &self.load_report
    }

    /// Fixed at load time from the unfiltered table.
    pub fn reference_date(&self) -> Option<NaiveDateTime> {
        self.dataset.reference_date()
    }

    /// Default filter: the full purchase span.
    pub fn full_range(&self) -> Option<DateRange> {
        DateRange::full(&self.dataset)
    }

    pub fn new_cache(&self) -> AggregateCache {
        AggregateCache::new(self.config.cache.capacity)
    }

    pub fn filter(&self, range: DateRange) -> TransactionView<'_> {
        filter_by_approval(&self.dataset, range)
    }

    /// Filter, then look up or compute the aggregate view.
    pub fn view(&self, range: DateRange, cache: &mut AggregateCache) -> Arc<DashboardView> {
        let filtered = self.filter(range);
        let reference = self.reference_date();
        tracing::debug!(
            range = %range,
            rows = filtered.len(),
            fingerprint = filtered.fingerprint().short(),
            "recomputing dashboard"
        );
        cache.get_or_compute(filtered.fingerprint(), || {
            DashboardView::compute(&filtered, reference)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Transaction;
    use chrono::NaiveDate;

    fn at(d: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2018, 1, d)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap()
    }

    fn context() -> AppContext {
        let rows = vec![
            Transaction::new("o1", "C1", "toys", "boleto", 50.0)
                .with_purchase(at(1))
                .with_approved(at(1)),
            Transaction::new("o2", "C1", "toys", "credit_card", 30.0)
                .with_purchase(at(10))
                .with_approved(at(10)),
            Transaction::new("o3", "C2", "audio", "credit_card", 5.0).with_purchase(at(15)),
        ];
        AppContext::new(Config::default(), Dataset::from_transactions(rows))
    }

    #[test]
    fn reference_is_latest_purchase() {
        let ctx = context();
        assert_eq!(ctx.reference_date(), Some(at(15)));
        assert_eq!(
            ctx.full_range(),
            Some(DateRange::new(at(1).date(), at(15).date()))
        );
    }

    #[test]
    fn view_matches_rfm_example() {
        let ctx = context();
        let mut cache = ctx.new_cache();
        let view = ctx.view(ctx.full_range().unwrap(), &mut cache);

        // o3 has no approval and is filtered out.
        assert_eq!(view.row_count, 2);
        assert_eq!(view.rfm.len(), 1);
        assert_eq!(view.rfm[0].frequency, 2);
        assert_eq!(view.rfm[0].monetary, 80.0);
        assert_eq!(view.rfm[0].recency_days, Some(5));
    }

    #[test]
    fn reference_does_not_move_with_the_filter() {
        let ctx = context();
        let mut cache = ctx.new_cache();
        let narrow = DateRange::new(at(1).date(), at(2).date());
        let view = ctx.view(narrow, &mut cache);
        assert_eq!(view.rfm[0].recency_days, Some(14));
    }

    #[test]
    fn equal_selections_hit_the_cache() {
        let ctx = context();
        let mut cache = ctx.new_cache();
        let a = ctx.view(DateRange::new(at(1).date(), at(10).date()), &mut cache);
        let b = ctx.view(DateRange::new(at(1).date(), at(12).date()), &mut cache);
        assert!(Arc::ptr_eq(&a, &b));
        assert_eq!(cache.stats().hits, 1);
    }
}
