use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// One line of the transaction table: a payment/item line of an order.
///
/// Several rows may share an `order_id`. Timestamps that could not be
/// parsed at load time are `None`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub order_id: String,
    pub customer_id: String,
    pub product_category_name: String,
    pub payment_type: String,
    pub payment_value: f64,
    pub order_purchase_timestamp: Option<NaiveDateTime>,
    pub order_approved_at: Option<NaiveDateTime>,
    pub order_delivered_customer_date: Option<NaiveDateTime>,
    pub order_delivered_carrier_date: Option<NaiveDateTime>,
    pub order_estimated_delivery_date: Option<NaiveDateTime>,
}

impl Transaction {
    /// A row with no timestamps set.
    pub fn new(
        order_id: impl Into<String>,
        customer_id: impl Into<String>,
        product_category_name: impl Into<String>,
        payment_type: impl Into<String>,
        payment_value: f64,
    ) -> Self {
        Self {
            order_id: order_id.into(),
            customer_id: customer_id.into(),
            product_category_name: product_category_name.into(),
            payment_type: payment_type.into(),
            payment_value,
            order_purchase_timestamp: None,
            order_approved_at: None,
            order_delivered_customer_date: None,
            order_delivered_carrier_date: None,
            order_estimated_delivery_date: None,
        }
    }

    pub fn with_purchase(mut self, ts: NaiveDateTime) -> Self {
        self.order_purchase_timestamp = Some(ts);
        self
    }

    pub fn with_approved(mut self, ts: NaiveDateTime) -> Self {
        self.order_approved_at = Some(ts);
        self
    }

    /// Calendar date of approval, if known. Used by the date-range filter.
    pub fn approved_date(&self) -> Option<NaiveDate> {
        self.order_approved_at.map(|ts| ts.date())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_sets_timestamps() {
        let purchase = NaiveDate::from_ymd_opt(2018, 1, 1)
            .unwrap()
            .and_hms_opt(9, 30, 0)
            .unwrap();
        let approved = NaiveDate::from_ymd_opt(2018, 1, 2)
            .unwrap()
            .and_hms_opt(23, 59, 59)
            .unwrap();
        let tx = Transaction::new("o1", "c1", "toys", "boleto", 10.0)
            .with_purchase(purchase)
            .with_approved(approved);

        assert_eq!(tx.order_purchase_timestamp, Some(purchase));
        assert_eq!(tx.approved_date(), NaiveDate::from_ymd_opt(2018, 1, 2));
        assert!(tx.order_delivered_customer_date.is_none());
    }

    #[test]
    fn missing_approval_has_no_date() {
        let tx = Transaction::new("o1", "c1", "toys", "boleto", 10.0);
        assert!(tx.approved_date().is_none());
    }
}
