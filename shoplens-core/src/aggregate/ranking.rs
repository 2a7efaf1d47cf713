//! Revenue per category and per payment type, highest first.

use std::collections::BTreeMap;

use crate::domain::{CategoryRevenue, PaymentRevenue, Transaction};

/// Sum `payment_value` per key, then sort by the sum descending.
///
/// Groups are formed in ascending key order and the sort is stable, so
/// equal sums keep alphabetical order.
pub fn revenue_by_key<'a, I, F>(rows: I, key: F) -> Vec<(String, f64)>
where
    I: IntoIterator<Item = &'a Transaction>,
    F: Fn(&'a Transaction) -> &'a str,
{
    let mut groups: BTreeMap<&'a str, f64> = BTreeMap::new();
    for tx in rows {
        *groups.entry(key(tx)).or_insert(0.0) += tx.payment_value;
    }

    let mut ranked: Vec<(String, f64)> = groups
        .into_iter()
        .map(|(k, v)| (k.to_string(), v))
        .collect();
    ranked.sort_by(|a, b| b.1.total_cmp(&a.1));
    ranked
}

pub fn category_revenue<'a, I>(rows: I) -> Vec<CategoryRevenue>
where
    I: IntoIterator<Item = &'a Transaction>,
{
    revenue_by_key(rows, |tx| tx.product_category_name.as_str())
        .into_iter()
        .map(|(product_category_name, total_revenue)| CategoryRevenue {
            product_category_name,
            total_revenue,
        })
        .collect()
}

pub fn payment_revenue<'a, I>(rows: I) -> Vec<PaymentRevenue>
where
    I: IntoIterator<Item = &'a Transaction>,
{
    revenue_by_key(rows, |tx| tx.payment_type.as_str())
        .into_iter()
        .map(|(payment_type, total_revenue)| PaymentRevenue {
            payment_type,
            total_revenue,
        })
        .collect()
}
