//! Weekly revenue: calendar weeks (Monday..Sunday) keyed by purchase time.

use std::collections::{BTreeMap, HashSet};

use chrono::{Datelike, Duration, NaiveDate};

use crate::domain::{Transaction, WeeklyRevenue};

/// Monday and closing Sunday of the week containing `date`.
pub fn week_bounds(date: NaiveDate) -> (NaiveDate, NaiveDate) {
    let offset = date.weekday().num_days_from_monday() as i64;
    let start = date - Duration::days(offset);
    (start, start + Duration::days(6))
}

/// One record per week that has at least one row, ascending.
///
/// Rows without a purchase timestamp belong to no week and are skipped.
/// Empty weeks between populated ones are not emitted.
pub fn weekly_revenue<'a, I>(rows: I) -> Vec<WeeklyRevenue>
where
    I: IntoIterator<Item = &'a Transaction>,
{
    let mut buckets: BTreeMap<NaiveDate, (HashSet<&'a str>, f64)> = BTreeMap::new();
    for tx in rows {
        let Some(ts) = tx.order_purchase_timestamp else {
            continue;
        };
        let (start, _) = week_bounds(ts.date());
        let (orders, revenue) = buckets.entry(start).or_default();
        orders.insert(tx.order_id.as_str());
        *revenue += tx.payment_value;
    }

    buckets
        .into_iter()
        .map(|(week_start, (orders, revenue))| WeeklyRevenue {
            week_start,
            week_end: week_start + Duration::days(6),
            order_count: orders.len() as u64,
            revenue,
        })
        .collect()
}
