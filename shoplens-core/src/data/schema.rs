use polars::prelude::*;

use super::DataError;

/// Column layout of the transaction table.
pub struct TransactionSchema;

impl TransactionSchema {
    pub const ORDER_ID: &'static str = "order_id";
    pub const CUSTOMER_ID: &'static str = "customer_id";
    pub const PRODUCT_CATEGORY_NAME: &'static str = "product_category_name";
    pub const PAYMENT_TYPE: &'static str = "payment_type";
    pub const PAYMENT_VALUE: &'static str = "payment_value";
    pub const ORDER_PURCHASE_TIMESTAMP: &'static str = "order_purchase_timestamp";
    pub const ORDER_APPROVED_AT: &'static str = "order_approved_at";
    pub const ORDER_DELIVERED_CUSTOMER_DATE: &'static str = "order_delivered_customer_date";
    pub const ORDER_DELIVERED_CARRIER_DATE: &'static str = "order_delivered_carrier_date";
    pub const ORDER_ESTIMATED_DELIVERY_DATE: &'static str = "order_estimated_delivery_date";

    /// The five timestamp columns, parsed leniently.
    pub const TIMESTAMP_COLUMNS: [&'static str; 5] = [
        Self::ORDER_PURCHASE_TIMESTAMP,
        Self::ORDER_APPROVED_AT,
        Self::ORDER_DELIVERED_CUSTOMER_DATE,
        Self::ORDER_DELIVERED_CARRIER_DATE,
        Self::ORDER_ESTIMATED_DELIVERY_DATE,
    ];

    /// Every column the loader requires. Order is not significant.
    pub fn required_columns() -> [&'static str; 10] {
        [
            Self::ORDER_ID,
            Self::CUSTOMER_ID,
            Self::PRODUCT_CATEGORY_NAME,
            Self::PAYMENT_TYPE,
            Self::PAYMENT_VALUE,
            Self::ORDER_PURCHASE_TIMESTAMP,
            Self::ORDER_APPROVED_AT,
            Self::ORDER_DELIVERED_CUSTOMER_DATE,
            Self::ORDER_DELIVERED_CARRIER_DATE,
            Self::ORDER_ESTIMATED_DELIVERY_DATE,
        ]
    }

    /// Check that all required columns exist. Extra columns are ignored.
    pub fn validate(df: &DataFrame) -> Result<(), DataError> {
        let schema = df.schema();
        for name in Self::required_columns() {
            if !schema.contains(name) {
                return Err(DataError::MissingColumn(name.to_string()));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text_column(name: &str) -> Column {
        Column::new(name.into(), &["x"])
    }

    #[test]
    fn required_columns_are_unique() {
        let cols = TransactionSchema::required_columns();
        let unique: std::collections::HashSet<_> = cols.iter().collect();
        assert_eq!(unique.len(), cols.len());
        for ts in TransactionSchema::TIMESTAMP_COLUMNS {
            assert!(cols.contains(&ts));
        }
    }

    #[test]
    fn validate_accepts_any_order_and_extra_columns() {
        let mut columns: Vec<Column> = TransactionSchema::required_columns()
            .iter()
            .rev()
            .map(|name| text_column(name))
            .collect();
        columns.push(text_column("order_status"));
        let df = DataFrame::new(columns).unwrap();

        assert!(TransactionSchema::validate(&df).is_ok());
    }

    #[test]
    fn validate_rejects_missing_column() {
        let columns: Vec<Column> = TransactionSchema::required_columns()
            .iter()
            .filter(|name| **name != TransactionSchema::PAYMENT_TYPE)
            .map(|name| text_column(name))
            .collect();
        let df = DataFrame::new(columns).unwrap();

        let err = TransactionSchema::validate(&df).unwrap_err();
        assert!(matches!(err, DataError::MissingColumn(ref c) if c == "payment_type"));
    }
}
