use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::types::{Days, Money};

// ---------------------------------------------------------------------------
// Table records
// ---------------------------------------------------------------------------

/// A catalogue product with unit economics and stock on hand.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: u32,
    pub name: String,
    pub unit_cost: Money,
    pub unit_price: Money,
    pub quantity: u32,
}

/// A commercial segment and the total billed against it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    pub id: u32,
    pub name: String,
    pub total_billed: Money,
}

/// An amount owed to the business, aggregated per segment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Receivable {
    pub id: u32,
    /// Weak reference; existence in the segment table is not enforced.
    pub segment_id: u32,
    pub total: Money,
    pub avg_collection_days: Days,
    pub bad_debt: Money,
    pub recorded_on: NaiveDate,
}

/// An amount owed by the business to a supplier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Payable {
    pub id: u32,
    /// Weak reference; no supplier table exists.
    pub supplier_id: u32,
    pub total: Money,
    pub avg_payment_days: Days,
    pub recorded_on: NaiveDate,
}

/// One billed sale. Appended by the invoice registration handler.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Invoice {
    pub id: u32,
    pub product_id: u32,
    pub segment_id: u32,
    pub quantity_sold: u32,
    /// Quantity times the product's unit price at entry time.
    pub total_billed: Money,
    pub issued_at: NaiveDateTime,
}

// ---------------------------------------------------------------------------
// Session state
// ---------------------------------------------------------------------------

/// Full in-memory state for one dashboard session.
///
/// Built once from literal sample data; the product and invoice tables grow
/// by one row per successful entry, nothing is ever deleted or updated, and
/// no state survives process exit.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DashboardData {
    pub products: Vec<Product>,
    pub segments: Vec<Segment>,
    pub receivables: Vec<Receivable>,
    pub payables: Vec<Payable>,
    pub invoices: Vec<Invoice>,
}

impl DashboardData {
    /// Next product id under the max-plus-one policy (1 for an empty table).
    pub fn next_product_id(&self) -> u32 {
        self.products.iter().map(|p| p.id).max().map_or(1, |m| m + 1)
    }

    /// Next invoice id under the max-plus-one policy (1 for an empty table).
    pub fn next_invoice_id(&self) -> u32 {
        self.invoices.iter().map(|i| i.id).max().map_or(1, |m| m + 1)
    }

    /// Look up a product by id.
    pub fn product(&self, id: u32) -> Option<&Product> {
        self.products.iter().find(|p| p.id == id)
    }

    /// Look up a segment by id.
    pub fn segment(&self, id: u32) -> Option<&Segment> {
        self.segments.iter().find(|s| s.id == id)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_next_ids_default_to_one_on_empty_tables() {
        let data = DashboardData::default();
        assert_eq!(data.next_product_id(), 1);
        assert_eq!(data.next_invoice_id(), 1);
    }

    #[test]
    fn test_next_product_id_is_max_plus_one() {
        let mut data = DashboardData::default();
        data.products.push(Product {
            id: 7,
            name: "A".into(),
            unit_cost: dec!(1),
            unit_price: dec!(2),
            quantity: 1,
        });
        data.products.push(Product {
            id: 3,
            name: "B".into(),
            unit_cost: dec!(1),
            unit_price: dec!(2),
            quantity: 1,
        });
        // max id is 7, not the row count
        assert_eq!(data.next_product_id(), 8);
    }

    #[test]
    fn test_product_lookup() {
        let mut data = DashboardData::default();
        data.products.push(Product {
            id: 2,
            name: "Found".into(),
            unit_cost: dec!(0.5),
            unit_price: dec!(1.5),
            quantity: 10,
        });
        assert_eq!(data.product(2).map(|p| p.name.as_str()), Some("Found"));
        assert!(data.product(99).is_none());
    }
}
