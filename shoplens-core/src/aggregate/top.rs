//! Top-N selections shown as bar charts.

use std::cmp::Ordering;

use crate::domain::{CategoryRevenue, RfmRecord};

/// Highest-revenue categories (the table is already sorted descending).
pub fn best_categories(table: &[CategoryRevenue], n: usize) -> &[CategoryRevenue] {
    &table[..n.min(table.len())]
}

/// Lowest-revenue categories, lowest first.
pub fn worst_categories(table: &[CategoryRevenue], n: usize) -> Vec<&CategoryRevenue> {
    let mut ascending: Vec<&CategoryRevenue> = table.iter().collect();
    ascending.sort_by(|a, b| a.total_revenue.total_cmp(&b.total_revenue));
    ascending.truncate(n);
    ascending
}

/// Most recent customers: smallest recency first, undefined recency last.
pub fn top_by_recency(table: &[RfmRecord], n: usize) -> Vec<&RfmRecord> {
    let mut sorted: Vec<&RfmRecord> = table.iter().collect();
    sorted.sort_by(|a, b| match (a.recency_days, b.recency_days) {
        (Some(x), Some(y)) => x.cmp(&y),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    });
    sorted.truncate(n);
    sorted
}

pub fn top_by_frequency(table: &[RfmRecord], n: usize) -> Vec<&RfmRecord> {
    let mut sorted: Vec<&RfmRecord> = table.iter().collect();
    sorted.sort_by(|a, b| b.frequency.cmp(&a.frequency));
    sorted.truncate(n);
    sorted
}

pub fn top_by_monetary(table: &[RfmRecord], n: usize) -> Vec<&RfmRecord> {
    let mut sorted: Vec<&RfmRecord> = table.iter().collect();
    sorted.sort_by(|a, b| b.monetary.total_cmp(&a.monetary));
    sorted.truncate(n);
    sorted
}

/// Chart label for a customer: the first five characters of the id.
pub fn short_customer_label(customer_id: &str) -> &str {
    match customer_id.char_indices().nth(5) {
        Some((idx, _)) => &customer_id[..idx],
        None => customer_id,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cat(name: &str, total: f64) -> CategoryRevenue {
        CategoryRevenue {
            product_category_name: name.into(),
            total_revenue: total,
        }
    }

    fn cust(id: &str, frequency: u64, monetary: f64, recency: Option<i64>) -> RfmRecord {
        RfmRecord {
            customer_id: id.into(),
            frequency,
            monetary,
            recency_days: recency,
        }
    }

    #[test]
    fn best_and_worst_categories() {
        let table = vec![cat("a", 50.0), cat("b", 40.0), cat("c", 30.0), cat("d", 30.0)];
        let best: Vec<&str> = best_categories(&table, 2)
            .iter()
            .map(|c| c.product_category_name.as_str())
            .collect();
        assert_eq!(best, vec!["a", "b"]);

        let worst: Vec<&str> = worst_categories(&table, 3)
            .iter()
            .map(|c| c.product_category_name.as_str())
            .collect();
        assert_eq!(worst, vec!["c", "d", "b"]);
    }

    #[test]
    fn n_larger_than_table() {
        let table = vec![cat("a", 1.0)];
        assert_eq!(best_categories(&table, 5).len(), 1);
        assert_eq!(worst_categories(&table, 5).len(), 1);
        assert!(best_categories(&[], 5).is_empty());
    }

    #[test]
    fn recency_puts_undefined_last() {
        let table = vec![
            cust("x", 1, 1.0, None),
            cust("y", 1, 1.0, Some(10)),
            cust("z", 1, 1.0, Some(-1)),
        ];
        let ids: Vec<&str> = top_by_recency(&table, 3)
            .iter()
            .map(|r| r.customer_id.as_str())
            .collect();
        assert_eq!(ids, vec!["z", "y", "x"]);
    }

    #[test]
    fn frequency_and_monetary_descending() {
        let table = vec![
            cust("a", 1, 300.0, None),
            cust("b", 4, 100.0, None),
            cust("c", 2, 200.0, None),
        ];
        assert_eq!(top_by_frequency(&table, 1)[0].customer_id, "b");
        assert_eq!(top_by_monetary(&table, 1)[0].customer_id, "a");
        assert_eq!(top_by_monetary(&table, 2)[1].customer_id, "c");
    }

    #[test]
    fn short_label_takes_five_chars() {
        assert_eq!(short_customer_label("06b8999e2fba1a1fbc88172c00ba8bc7"), "06b89");
        assert_eq!(short_customer_label("abc"), "abc");
        assert_eq!(short_customer_label("ação123"), "ação1");
    }
}
