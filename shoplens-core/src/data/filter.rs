//! Date-range filter on approval date.

use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};

use super::dataset::Dataset;
use crate::domain::{TableFingerprint, Transaction};

/// Inclusive calendar-date interval.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    /// Whole purchase span of the dataset, `None` for a dataset without purchases.
    pub fn full(dataset: &Dataset) -> Option<Self> {
        dataset
            .date_bounds()
            .map(|(start, end)| Self::new(start, end))
    }

    /// An inverted range selects nothing.
    pub fn is_inverted(&self) -> bool {
        self.end < self.start
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }

    /// Number of calendar days covered (0 when inverted).
    pub fn days(&self) -> i64 {
        if self.is_inverted() {
            0
        } else {
            (self.end - self.start).num_days() + 1
        }
    }

    /// Clamp both ends into `[min, max]`.
    pub fn clamp_to(&self, min: NaiveDate, max: NaiveDate) -> Self {
        Self {
            start: self.start.clamp(min, max),
            end: self.end.clamp(min, max),
        }
    }

    /// Shift both ends by `days`.
    pub fn shifted(&self, days: i64) -> Self {
        Self {
            start: self.start + Duration::days(days),
            end: self.end + Duration::days(days),
        }
    }

    /// Parse `YYYY-MM-DD..YYYY-MM-DD`.
    pub fn parse(text: &str) -> Option<Self> {
        let (start, end) = text.trim().split_once("..")?;
        let start = NaiveDate::parse_from_str(start.trim(), "%Y-%m-%d").ok()?;
        let end = NaiveDate::parse_from_str(end.trim(), "%Y-%m-%d").ok()?;
        Some(Self::new(start, end))
    }
}

impl std::fmt::Display for DateRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}..{}", self.start, self.end)
    }
}

/// Rows of a dataset selected by a filter, with their identity.
#[derive(Debug, Clone)]
pub struct TransactionView<'a> {
    rows: Vec<&'a Transaction>,
    fingerprint: TableFingerprint,
}

impl<'a> TransactionView<'a> {
    pub fn rows(&self) -> &[&'a Transaction] {
        &self.rows
    }

    pub fn iter(&self) -> impl Iterator<Item = &'a Transaction> + '_ {
        self.rows.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn fingerprint(&self) -> &TableFingerprint {
        &self.fingerprint
    }
}

/// Keep rows whose approval date lies in `range` (inclusive, time of day
/// ignored). Rows without an approval timestamp are dropped.
pub fn filter_by_approval(dataset: &Dataset, range: DateRange) -> TransactionView<'_> {
    let indices: Vec<usize> = if range.is_inverted() {
        Vec::new()
    } else {
        dataset
            .rows()
            .iter()
            .enumerate()
            .filter(|(_, tx)| tx.approved_date().is_some_and(|d| range.contains(d)))
            .map(|(i, _)| i)
            .collect()
    };

    let fingerprint = TableFingerprint::of_selection(dataset.hash(), &indices);
    let rows = indices.iter().map(|&i| &dataset.rows()[i]).collect();
    TransactionView { rows, fingerprint }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDateTime;

    fn d(m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2018, m, day).unwrap()
    }

    fn at(m: u32, day: u32, h: u32) -> NaiveDateTime {
        d(m, day).and_hms_opt(h, 0, 0).unwrap()
    }

    fn dataset() -> Dataset {
        Dataset::from_transactions(vec![
            Transaction::new("o1", "c1", "a", "p", 1.0)
                .with_purchase(at(1, 1, 8))
                .with_approved(at(1, 1, 9)),
            Transaction::new("o2", "c2", "a", "p", 2.0)
                .with_purchase(at(1, 9, 8))
                .with_approved(at(1, 10, 23)),
            Transaction::new("o3", "c3", "a", "p", 3.0).with_purchase(at(1, 12, 8)),
            Transaction::new("o4", "c4", "a", "p", 4.0)
                .with_purchase(at(1, 20, 8))
                .with_approved(at(1, 21, 0)),
        ])
    }

    #[test]
    fn end_date_is_inclusive_regardless_of_time() {
        let ds = dataset();
        let view = filter_by_approval(&ds, DateRange::new(d(1, 1), d(1, 10)));
        let ids: Vec<&str> = view.iter().map(|t| t.order_id.as_str()).collect();
        assert_eq!(ids, vec!["o1", "o2"]);
    }

    #[test]
    fn missing_approval_is_excluded() {
        let ds = dataset();
        let view = filter_by_approval(&ds, DateRange::new(d(1, 1), d(12, 31)));
        assert_eq!(view.len(), 3);
        assert!(view.iter().all(|t| t.order_id != "o3"));
    }

    #[test]
    fn inverted_range_is_empty() {
        let ds = dataset();
        let range = DateRange::new(d(1, 10), d(1, 1));
        assert!(range.is_inverted());
        assert!(filter_by_approval(&ds, range).is_empty());
    }

    #[test]
    fn same_rows_share_fingerprint() {
        let ds = dataset();
        let a = filter_by_approval(&ds, DateRange::new(d(1, 1), d(1, 10)));
        let b = filter_by_approval(&ds, DateRange::new(d(1, 1), d(1, 15)));
        let c = filter_by_approval(&ds, DateRange::new(d(1, 2), d(1, 15)));
        assert_eq!(a.fingerprint(), b.fingerprint());
        assert_ne!(a.fingerprint(), c.fingerprint());
    }

    #[test]
    fn full_range_covers_purchase_dates() {
        let ds = dataset();
        let full = DateRange::full(&ds).unwrap();
        assert_eq!(full, DateRange::new(d(1, 1), d(1, 20)));
        assert_eq!(full.days(), 20);
    }

    #[test]
    fn clamp_and_shift() {
        let r = DateRange::new(d(1, 1), d(1, 10)).shifted(7);
        assert_eq!(r, DateRange::new(d(1, 8), d(1, 17)));
        let clamped = r.clamp_to(d(1, 1), d(1, 15));
        assert_eq!(clamped, DateRange::new(d(1, 8), d(1, 15)));
    }

    #[test]
    fn parse_range_text() {
        assert_eq!(
            DateRange::parse("2018-01-01..2018-02-01"),
            Some(DateRange::new(d(1, 1), d(2, 1)))
        );
        assert_eq!(
            DateRange::parse(" 2018-01-01 .. 2018-02-01 "),
            Some(DateRange::new(d(1, 1), d(2, 1)))
        );
        assert!(DateRange::parse("2018-01-01").is_none());
        assert!(DateRange::parse("yesterday..today").is_none());
        assert_eq!(DateRange::new(d(1, 1), d(2, 1)).to_string(), "2018-01-01..2018-02-01");
    }
}
