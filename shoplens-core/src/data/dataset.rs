//! The loaded transaction table and the facts fixed at load time.

use chrono::{NaiveDate, NaiveDateTime};

use crate::domain::{DatasetHash, Transaction};

/// Parsed, purchase-ordered transaction table.
///
/// Built once at startup and never mutated; every filter and aggregation
/// borrows from it.
#[derive(Debug, Clone)]
pub struct Dataset {
    rows: Vec<Transaction>,
    purchase_span: Option<(NaiveDateTime, NaiveDateTime)>,
    hash: DatasetHash,
}

impl Dataset {
    /// Sort rows by purchase timestamp (stable, missing last) and derive
    /// the span and content hash.
    pub fn from_transactions(mut rows: Vec<Transaction>) -> Self {
        rows.sort_by(|a, b| {
            match (a.order_purchase_timestamp, b.order_purchase_timestamp) {
                (Some(x), Some(y)) => x.cmp(&y),
                (Some(_), None) => std::cmp::Ordering::Less,
                (None, Some(_)) => std::cmp::Ordering::Greater,
                (None, None) => std::cmp::Ordering::Equal,
            }
        });

        let mut purchases = rows.iter().filter_map(|t| t.order_purchase_timestamp);
        let purchase_span = purchases.next().map(|first| {
            purchases.fold((first, first), |(lo, hi), ts| (lo.min(ts), hi.max(ts)))
        });

        let hash = compute_dataset_hash(&rows);
        Self {
            rows,
            purchase_span,
            hash,
        }
    }

    pub fn rows(&self) -> &[Transaction] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Earliest and latest purchase timestamps, `None` if no row has one.
    pub fn purchase_span(&self) -> Option<(NaiveDateTime, NaiveDateTime)> {
        self.purchase_span
    }

    /// Calendar dates of the purchase span; the default filter bounds.
    pub fn date_bounds(&self) -> Option<(NaiveDate, NaiveDate)> {
        self.purchase_span.map(|(lo, hi)| (lo.date(), hi.date()))
    }

    /// Recency reference: the latest purchase in the unfiltered table.
    pub fn reference_date(&self) -> Option<NaiveDateTime> {
        self.purchase_span.map(|(_, hi)| hi)
    }

    pub fn hash(&self) -> &DatasetHash {
        &self.hash
    }
}

/// Deterministic BLAKE3 hash over every field of every row, in table order.
fn compute_dataset_hash(rows: &[Transaction]) -> DatasetHash {
    fn update_ts(hasher: &mut blake3::Hasher, ts: Option<NaiveDateTime>) {
        match ts {
            Some(ts) => hasher.update(ts.to_string().as_bytes()),
            None => hasher.update(b"NaT"),
        };
        hasher.update(b"\x1f");
    }

    let mut hasher = blake3::Hasher::new();
    for row in rows {
        for text in [
            &row.order_id,
            &row.customer_id,
            &row.product_category_name,
            &row.payment_type,
        ] {
            hasher.update(text.as_bytes());
            hasher.update(b"\x1f");
        }
        hasher.update(&row.payment_value.to_le_bytes());
        update_ts(&mut hasher, row.order_purchase_timestamp);
        update_ts(&mut hasher, row.order_approved_at);
        update_ts(&mut hasher, row.order_delivered_customer_date);
        update_ts(&mut hasher, row.order_delivered_carrier_date);
        update_ts(&mut hasher, row.order_estimated_delivery_date);
        hasher.update(b"\x1e");
    }
    DatasetHash(hasher.finalize().to_hex().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ts(d: u32, h: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2018, 1, d)
            .unwrap()
            .and_hms_opt(h, 0, 0)
            .unwrap()
    }

    #[test]
    fn sorts_by_purchase_with_missing_last() {
        let rows = vec![
            Transaction::new("o3", "c", "a", "p", 1.0).with_purchase(ts(3, 0)),
            Transaction::new("o0", "c", "a", "p", 1.0),
            Transaction::new("o1", "c", "a", "p", 1.0).with_purchase(ts(1, 0)),
            Transaction::new("o2", "c", "a", "p", 1.0).with_purchase(ts(2, 0)),
        ];
        let ds = Dataset::from_transactions(rows);
        let ids: Vec<&str> = ds.rows().iter().map(|t| t.order_id.as_str()).collect();
        assert_eq!(ids, vec!["o1", "o2", "o3", "o0"]);
    }

    #[test]
    fn span_and_reference_date() {
        let rows = vec![
            Transaction::new("o1", "c", "a", "p", 1.0).with_purchase(ts(5, 10)),
            Transaction::new("o2", "c", "a", "p", 1.0).with_purchase(ts(2, 8)),
            Transaction::new("o3", "c", "a", "p", 1.0).with_purchase(ts(9, 23)),
        ];
        let ds = Dataset::from_transactions(rows);
        assert_eq!(ds.purchase_span(), Some((ts(2, 8), ts(9, 23))));
        assert_eq!(ds.reference_date(), Some(ts(9, 23)));
        assert_eq!(
            ds.date_bounds(),
            Some((
                NaiveDate::from_ymd_opt(2018, 1, 2).unwrap(),
                NaiveDate::from_ymd_opt(2018, 1, 9).unwrap()
            ))
        );
    }

    #[test]
    fn empty_dataset_has_no_span() {
        let ds = Dataset::from_transactions(Vec::new());
        assert!(ds.is_empty());
        assert!(ds.purchase_span().is_none());
        assert!(ds.reference_date().is_none());
    }

    #[test]
    fn hash_is_content_sensitive() {
        let a = Dataset::from_transactions(vec![Transaction::new("o1", "c", "a", "p", 1.0)]);
        let b = Dataset::from_transactions(vec![Transaction::new("o1", "c", "a", "p", 1.0)]);
        let c = Dataset::from_transactions(vec![Transaction::new("o1", "c", "a", "p", 2.0)]);
        assert_eq!(a.hash(), b.hash());
        assert_ne!(a.hash(), c.hash());
    }
}
