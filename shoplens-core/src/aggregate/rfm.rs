//! RFM customer scores.

use std::collections::{BTreeMap, HashSet};

use chrono::{Duration, NaiveDateTime};

use crate::domain::{RfmRecord, Transaction};

#[derive(Default)]
struct CustomerAcc<'a> {
    orders: HashSet<&'a str>,
    monetary: f64,
    last_approved: Option<NaiveDateTime>,
}

/// One record per customer, ordered by customer id.
///
/// - frequency: distinct orders
/// - monetary: sum of payments
/// - recency: `reference - latest approval` in whole days, floored. Negative
///   when the approval is after the reference, so half a day late is `-1`.
///   `None` when the customer has no approval timestamp or there is no
///   reference.
pub fn rfm<'a, I>(rows: I, reference: Option<NaiveDateTime>) -> Vec<RfmRecord>
where
    I: IntoIterator<Item = &'a Transaction>,
{
    let mut customers: BTreeMap<&'a str, CustomerAcc<'a>> = BTreeMap::new();
    for tx in rows {
        let acc = customers.entry(tx.customer_id.as_str()).or_default();
        acc.orders.insert(tx.order_id.as_str());
        acc.monetary += tx.payment_value;
        acc.last_approved = match (acc.last_approved, tx.order_approved_at) {
            (Some(a), Some(b)) => Some(a.max(b)),
            (a, b) => a.or(b),
        };
    }

    customers
        .into_iter()
        .map(|(customer_id, acc)| RfmRecord {
            customer_id: customer_id.to_string(),
            frequency: acc.orders.len() as u64,
            monetary: acc.monetary,
            recency_days: reference
                .zip(acc.last_approved)
                .map(|(r, last)| floor_days(r - last)),
        })
        .collect()
}

/// Whole days rounded toward negative infinity.
fn floor_days(delta: Duration) -> i64 {
    let days = delta.num_days();
    if delta < Duration::days(days) {
        days - 1
    } else {
        days
    }
}
