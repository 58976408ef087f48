use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal_macros::dec;

use crate::tables::{DashboardData, Invoice, Payable, Product, Receivable, Segment};

/// Calendar date from literal components.
pub(crate) fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("hardcoded dashboard dates are valid")
}

/// Midnight timestamp from literal components.
pub(crate) fn timestamp(year: i32, month: u32, day: u32) -> NaiveDateTime {
    date(year, month, day)
        .and_hms_opt(0, 0, 0)
        .expect("midnight is a valid time")
}

/// The mock dataset every session starts from: three products, three
/// segments, and three rows each of receivables, payables and invoices.
///
/// Invoice totals are literal sample values, not derived from the product
/// table; only rows appended through the registration handler compute
/// quantity times unit price.
pub fn sample_data() -> DashboardData {
    let products = vec![
        Product {
            id: 1,
            name: "Dr Pepper Original".into(),
            unit_cost: dec!(0.50),
            unit_price: dec!(1.50),
            quantity: 200,
        },
        Product {
            id: 2,
            name: "Dr Pepper Cherry".into(),
            unit_cost: dec!(0.60),
            unit_price: dec!(1.70),
            quantity: 150,
        },
        Product {
            id: 3,
            name: "Dr Pepper Zero Sugar".into(),
            unit_cost: dec!(0.55),
            unit_price: dec!(1.60),
            quantity: 300,
        },
    ];

    let segments = vec![
        Segment {
            id: 1,
            name: "Retail".into(),
            total_billed: dec!(5000),
        },
        Segment {
            id: 2,
            name: "Food Service".into(),
            total_billed: dec!(8000),
        },
        Segment {
            id: 3,
            name: "Exports".into(),
            total_billed: dec!(6000),
        },
    ];

    let receivables = vec![
        Receivable {
            id: 1,
            segment_id: 1,
            total: dec!(50000),
            avg_collection_days: dec!(30),
            bad_debt: dec!(2.5),
            recorded_on: date(2024, 12, 1),
        },
        Receivable {
            id: 2,
            segment_id: 2,
            total: dec!(30000),
            avg_collection_days: dec!(45),
            bad_debt: dec!(1.8),
            recorded_on: date(2024, 12, 2),
        },
        Receivable {
            id: 3,
            segment_id: 3,
            total: dec!(20000),
            avg_collection_days: dec!(60),
            bad_debt: dec!(3.0),
            recorded_on: date(2024, 12, 3),
        },
    ];

    let payables = vec![
        Payable {
            id: 1,
            supplier_id: 101,
            total: dec!(40000),
            avg_payment_days: dec!(35),
            recorded_on: date(2024, 12, 1),
        },
        Payable {
            id: 2,
            supplier_id: 102,
            total: dec!(25000),
            avg_payment_days: dec!(50),
            recorded_on: date(2024, 12, 2),
        },
        Payable {
            id: 3,
            supplier_id: 103,
            total: dec!(15000),
            avg_payment_days: dec!(40),
            recorded_on: date(2024, 12, 3),
        },
    ];

    let invoices = vec![
        Invoice {
            id: 1,
            product_id: 1,
            segment_id: 1,
            quantity_sold: 5,
            total_billed: dec!(250),
            issued_at: timestamp(2024, 12, 1),
        },
        Invoice {
            id: 2,
            product_id: 2,
            segment_id: 2,
            quantity_sold: 10,
            total_billed: dec!(800),
            issued_at: timestamp(2024, 12, 2),
        },
        Invoice {
            id: 3,
            product_id: 3,
            segment_id: 1,
            quantity_sold: 3,
            total_billed: dec!(90),
            issued_at: timestamp(2024, 12, 3),
        },
    ];

    DashboardData {
        products,
        segments,
        receivables,
        payables,
        invoices,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
