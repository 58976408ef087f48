use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::alerts::{evaluate_alerts, AlertReport};
use crate::billing::{billing_trend, filter_invoices, sales_by_product, SalesByProduct, TrendPoint};
use crate::metrics::{calculate_key_metrics, calculate_product_margins, KeyMetrics, ProductMargin};
use crate::sample::date;
use crate::tables::{DashboardData, Invoice};
use crate::{types::*, DashboardResult};

// ---------------------------------------------------------------------------
// View types
// ---------------------------------------------------------------------------

/// Inclusive calendar window for the billing table. Only the displayed
/// invoice list is filtered; chart series always cover the full table.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl Default for DateRange {
    /// December 2024, the month the sample data covers.
    fn default() -> Self {
        DateRange {
            start: date(2024, 12, 1),
            end: date(2024, 12, 31),
        }
    }
}

/// Everything one render pass of the dashboard displays.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardSnapshot {
    pub range: DateRange,
    pub key_metrics: KeyMetrics,
    pub filtered_invoices: Vec<Invoice>,
    pub sales_by_product: Vec<SalesByProduct>,
    pub billing_trend: Vec<TrendPoint>,
    pub margins: Vec<ProductMargin>,
    pub alert_report: AlertReport,
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Assemble one full view of current state: key metrics, the filtered
/// billing table, both chart series, per-product margins and the alert
/// report.
///
/// This is the single render function of the system. It is invoked once per
/// interaction; rows appended by the entry handlers appear on the next call.
/// Warnings from every sub-computation are merged into one envelope.
pub fn build_snapshot(
    data: &DashboardData,
    range: DateRange,
) -> DashboardResult<ComputationOutput<DashboardSnapshot>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    let metrics_out = calculate_key_metrics(data)?;
    warnings.extend(metrics_out.warnings);
    let key_metrics = metrics_out.result;

    let margins_out = calculate_product_margins(data)?;
    warnings.extend(margins_out.warnings);

    let alerts_out = evaluate_alerts(data, &key_metrics)?;
    warnings.extend(alerts_out.warnings);

    let snapshot = DashboardSnapshot {
        range,
        filtered_invoices: filter_invoices(&data.invoices, range.start, range.end),
        sales_by_product: sales_by_product(data),
        billing_trend: billing_trend(data),
        margins: margins_out.result,
        alert_report: alerts_out.result,
        key_metrics,
    };

    let elapsed = start.elapsed().as_micros() as u64;
    let assumptions = serde_json::json!({
        "range": { "start": range.start, "end": range.end },
        "invoice_rows": data.invoices.len(),
        "chart_basis": "full_invoice_table",
    });

    Ok(with_metadata(
        "Dashboard Snapshot Assembly",
        &assumptions,
        warnings,
        elapsed,
        snapshot,
    ))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entry::{add_invoice, NewInvoice};
    use crate::sample::{sample_data, timestamp};
    use rust_decimal_macros::dec;

    #[test]
    fn test_default_range_covers_december_2024() {
        let range = DateRange::default();
        assert_eq!(range.start, date(2024, 12, 1));
        assert_eq!(range.end, date(2024, 12, 31));
    }

    #[test]
    fn test_snapshot_assembles_all_sections() {
        let data = sample_data();
        let snapshot = build_snapshot(&data, DateRange::default()).unwrap().result;
        assert_eq!(snapshot.filtered_invoices.len(), 3);
        assert_eq!(snapshot.sales_by_product.len(), 3);
        assert_eq!(snapshot.billing_trend.len(), 3);
        assert_eq!(snapshot.margins.len(), 3);
        assert_eq!(snapshot.key_metrics.liquidity_index, Some(dec!(1.25)));
        assert_eq!(snapshot.alert_report.alerts.len(), 1);
    }

    #[test]
    fn test_narrow_range_filters_table_but_not_charts() {
        let data = sample_data();
        let range = DateRange {
            start: date(2024, 12, 2),
            end: date(2024, 12, 2),
        };
        let snapshot = build_snapshot(&data, range).unwrap().result;
        assert_eq!(snapshot.filtered_invoices.len(), 1);
        assert_eq!(snapshot.filtered_invoices[0].id, 2);
        // Charts stay on the full table
        assert_eq!(snapshot.sales_by_product.len(), 3);
        assert_eq!(snapshot.billing_trend.len(), 3);
    }

    #[test]
    fn test_sub_computation_warnings_are_merged() {
        let mut data = sample_data();
        data.payables.clear();
        let result = build_snapshot(&data, DateRange::default()).unwrap();
        assert!(result
            .warnings
            .iter()
            .any(|w| w.contains("liquidity index is undefined")));
        assert_eq!(result.result.key_metrics.liquidity_index, None);
    }

    #[test]
    fn test_appended_invoice_visible_on_next_render() {
        let mut data = sample_data();
        let before = build_snapshot(&data, DateRange::default()).unwrap().result;
        assert_eq!(before.filtered_invoices.len(), 3);

        let entry = NewInvoice {
            product_id: 1,
            segment_id: 1,
            quantity_sold: 2,
        };
        add_invoice(&mut data, &entry, timestamp(2024, 12, 5)).unwrap();

        let after = build_snapshot(&data, DateRange::default()).unwrap().result;
        assert_eq!(after.filtered_invoices.len(), 4);
        // 2 x 1.50 lands on a new trend day after the sample dates
        assert_eq!(after.billing_trend.len(), 4);
        assert_eq!(after.billing_trend[3].date, date(2024, 12, 5));
        assert_eq!(after.billing_trend[3].total_billed, dec!(3.00));
    }
}
