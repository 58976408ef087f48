use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::tables::{DashboardData, Invoice};
use crate::types::Money;

// ---------------------------------------------------------------------------
// Chart series types
// ---------------------------------------------------------------------------

/// One bar of the sales-by-product chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SalesByProduct {
    pub product: String,
    pub total_billed: Money,
}

/// One point of the billing-trend line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrendPoint {
    pub date: NaiveDate,
    pub total_billed: Money,
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Invoices whose calendar date falls within [start, end], both ends
/// inclusive. Time-of-day is ignored. An inverted range (start after end)
/// selects nothing; it is not an error.
pub fn filter_invoices(invoices: &[Invoice], start: NaiveDate, end: NaiveDate) -> Vec<Invoice> {
    invoices
        .iter()
        .filter(|invoice| {
            let day = invoice.issued_at.date();
            day >= start && day <= end
        })
        .cloned()
        .collect()
}

/// Total billed per product name over the full invoice table, ordered by
/// name. Invoices referencing a product id with no catalogue row drop out of
/// the series, mirroring an inner join.
pub fn sales_by_product(data: &DashboardData) -> Vec<SalesByProduct> {
    let mut totals: BTreeMap<&str, Money> = BTreeMap::new();
    for invoice in &data.invoices {
        if let Some(product) = data.product(invoice.product_id) {
            *totals.entry(product.name.as_str()).or_default() += invoice.total_billed;
        }
    }
    totals
        .into_iter()
        .map(|(product, total_billed)| SalesByProduct {
            product: product.to_string(),
            total_billed,
        })
        .collect()
}

/// Total billed per calendar day over the full invoice table, ascending by
/// date.
pub fn billing_trend(data: &DashboardData) -> Vec<TrendPoint> {
    let mut totals: BTreeMap<NaiveDate, Money> = BTreeMap::new();
    for invoice in &data.invoices {
        *totals.entry(invoice.issued_at.date()).or_default() += invoice.total_billed;
    }
    totals
        .into_iter()
        .map(|(date, total_billed)| TrendPoint { date, total_billed })
        .collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sample::{date, sample_data, timestamp};
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    #[test]
    fn test_filter_single_day_window() {
        let data = sample_data();
        let hits = filter_invoices(&data.invoices, date(2024, 12, 2), date(2024, 12, 2));
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].id, 2);
    }

    #[test]
    fn test_filter_is_inclusive_at_both_ends() {
        let data = sample_data();
        let hits = filter_invoices(&data.invoices, date(2024, 12, 1), date(2024, 12, 3));
        assert_eq!(hits.len(), 3);
    }

    #[test]
    fn test_filter_inverted_range_is_empty_not_error() {
        let data = sample_data();
        let hits = filter_invoices(&data.invoices, date(2024, 12, 31), date(2024, 12, 1));
        assert!(hits.is_empty());
    }

    #[test]
    fn test_filter_ignores_time_of_day() {
        let mut data = sample_data();
        data.invoices[1].issued_at = date(2024, 12, 2).and_hms_opt(23, 59, 59).unwrap();
        let hits = filter_invoices(&data.invoices, date(2024, 12, 2), date(2024, 12, 2));
        assert_eq!(hits.len(), 1);
    }

    #[test]
    fn test_filter_outside_window_is_empty() {
        let data = sample_data();
        let hits = filter_invoices(&data.invoices, date(2025, 1, 1), date(2025, 1, 31));
        assert!(hits.is_empty());
    }

    #[test]
    fn test_sales_by_product_sample_totals() {
        let data = sample_data();
        let series = sales_by_product(&data);
        // Ordered by name: Cherry, Original, Zero Sugar
        assert_eq!(series.len(), 3);
        assert_eq!(series[0].product, "Dr Pepper Cherry");
        assert_eq!(series[0].total_billed, dec!(800));
        assert_eq!(series[1].product, "Dr Pepper Original");
        assert_eq!(series[1].total_billed, dec!(250));
        assert_eq!(series[2].product, "Dr Pepper Zero Sugar");
        assert_eq!(series[2].total_billed, dec!(90));
    }

    #[test]
    fn test_sales_by_product_aggregates_repeat_products() {
        let mut data = sample_data();
        let mut extra = data.invoices[0].clone();
        extra.id = 4;
        extra.total_billed = dec!(100);
        data.invoices.push(extra);
        let series = sales_by_product(&data);
        let original = series
            .iter()
            .find(|s| s.product == "Dr Pepper Original")
            .unwrap();
        // 250 + 100
        assert_eq!(original.total_billed, dec!(350));
    }

    #[test]
    fn test_sales_by_product_drops_unknown_product_ids() {
        let mut data = sample_data();
        data.invoices.push(Invoice {
            id: 4,
            product_id: 99,
            segment_id: 1,
            quantity_sold: 1,
            total_billed: dec!(500),
            issued_at: timestamp(2024, 12, 4),
        });
        let series = sales_by_product(&data);
        assert_eq!(series.len(), 3);
        let grand_total: Money = series.iter().map(|s| s.total_billed).sum();
        assert_eq!(grand_total, dec!(1140));
    }

    #[test]
    fn test_billing_trend_sample_days() {
        let data = sample_data();
        let series = billing_trend(&data);
        assert_eq!(series.len(), 3);
        assert_eq!(series[0].date, date(2024, 12, 1));
        assert_eq!(series[0].total_billed, dec!(250));
        assert_eq!(series[1].total_billed, dec!(800));
        assert_eq!(series[2].total_billed, dec!(90));
    }

    #[test]
    fn test_billing_trend_groups_same_day() {
        let mut data = sample_data();
        let mut extra = data.invoices[2].clone();
        extra.id = 4;
        extra.issued_at = timestamp(2024, 12, 1);
        extra.total_billed = dec!(60);
        data.invoices.push(extra);
        let series = billing_trend(&data);
        assert_eq!(series.len(), 3);
        // 250 + 60 on the first day
        assert_eq!(series[0].total_billed, dec!(310));
    }

    #[test]
    fn test_charts_are_independent_of_any_date_filter() {
        let data = sample_data();
        let filtered = filter_invoices(&data.invoices, date(2024, 12, 2), date(2024, 12, 2));
        assert_eq!(filtered.len(), 1);
        // Chart series still cover all three invoices
        assert_eq!(sales_by_product(&data).len(), 3);
        assert_eq!(billing_trend(&data).len(), 3);
    }
}
