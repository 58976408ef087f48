use chrono::NaiveDate;
use dashboard_core::alerts::evaluate_alerts;
use dashboard_core::billing::{billing_trend, filter_invoices, sales_by_product};
use dashboard_core::entry::{add_invoice, add_product, NewInvoice, NewProduct};
use dashboard_core::metrics::{calculate_key_metrics, calculate_product_margins};
use dashboard_core::sample::sample_data;
use dashboard_core::snapshot::{build_snapshot, DateRange};
use dashboard_core::DashboardError;
use rust_decimal_macros::dec;

fn day(year: i32, month: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, d).unwrap()
}

// ===========================================================================
// Key metrics tests
// ===========================================================================

#[test]
fn test_sample_liquidity_index() {
    let data = sample_data();
    let metrics = calculate_key_metrics(&data).unwrap().result;

    // (50000 + 30000 + 20000) / (40000 + 25000 + 15000) = 100000 / 80000 = 1.25
    assert_eq!(metrics.liquidity_index, Some(dec!(1.25)));
    assert_eq!(metrics.receivables_total, dec!(100000));
    assert_eq!(metrics.payables_total, dec!(80000));
}

#[test]
fn test_sample_debt_index_rounds_to_forty_four_point_four_four_percent() {
    let data = sample_data();
    let metrics = calculate_key_metrics(&data).unwrap().result;

    // 80000 / 180000 = 0.4444..., displayed as 44.44%
    let debt = metrics.debt_index.unwrap();
    assert_eq!((debt * dec!(100)).round_dp(2), dec!(44.44));
}

#[test]
fn test_asset_turnover_is_constant_eight_point_five() {
    let mut data = sample_data();
    let before = calculate_key_metrics(&data).unwrap().result.asset_turnover;

    // The placeholder ignores the product table entirely
    data.products.clear();
    let after = calculate_key_metrics(&data).unwrap().result.asset_turnover;

    assert_eq!(before, dec!(8.5));
    assert_eq!(after, dec!(8.5));
}

#[test]
fn test_zero_payables_yields_undefined_liquidity_not_error() {
    let mut data = sample_data();
    data.payables.clear();

    let output = calculate_key_metrics(&data).unwrap();
    assert_eq!(output.result.liquidity_index, None);
    assert!(output.warnings.iter().any(|w| w.contains("undefined")));
}

// ===========================================================================
// Alert rule tests
// ===========================================================================

#[test]
fn test_sample_data_yields_exactly_one_alert() {
    let data = sample_data();
    let metrics = calculate_key_metrics(&data).unwrap().result;
    let report = evaluate_alerts(&data, &metrics).unwrap().result;

    // mean([30, 45, 60]) = 45: not strictly above 45, rule 1 silent.
    // turnover 8.5 < 8.0 is false, rule 2 silent.
    // 100000 > 80000, rule 3 fires.
    assert_eq!(report.alerts.len(), 1);
    assert_eq!(report.alerts[0].message, "Receivables exceed payables.");
    assert!(!report.all_clear);
}

#[test]
fn test_collection_days_equality_does_not_trigger() {
    let data = sample_data();
    let metrics = calculate_key_metrics(&data).unwrap().result;
    let report = evaluate_alerts(&data, &metrics).unwrap().result;

    let rule = report
        .evaluations
        .iter()
        .find(|e| e.rule == "collection-days")
        .unwrap();
    assert_eq!(rule.actual, dec!(45));
    assert!(!rule.triggered);
}

#[test]
fn test_quiet_ledger_reports_no_critical_alerts() {
    let mut data = sample_data();
    for receivable in &mut data.receivables {
        receivable.total = dec!(10000);
        receivable.avg_collection_days = dec!(20);
    }

    let metrics = calculate_key_metrics(&data).unwrap().result;
    let report = evaluate_alerts(&data, &metrics).unwrap().result;

    assert!(report.all_clear);
    assert_eq!(report.status, "No critical alerts.");
}

// ===========================================================================
// Margin tests
// ===========================================================================

#[test]
fn test_sample_margins_relative_to_unit_price() {
    let data = sample_data();
    let margins = calculate_product_margins(&data).unwrap().result;

    // (1.50 - 0.50) / 1.50 * 100 = 66.67%
    assert_eq!(margins[0].margin_pct.unwrap().round_dp(2), dec!(66.67));
}

#[test]
fn test_added_product_margin_is_fifty_percent() {
    let mut data = sample_data();
    let entry = NewProduct {
        name: "X".into(),
        unit_cost: dec!(1.0),
        unit_price: dec!(2.0),
        quantity: 10,
    };

    let receipt = add_product(&mut data, &entry).unwrap().result;
    // Sample max product id is 3
    assert_eq!(receipt.product.id, 4);
    assert_eq!(receipt.message, "Product added successfully.");

    let margins = calculate_product_margins(&data).unwrap().result;
    let added = margins.iter().find(|m| m.name == "X").unwrap();
    // (2.0 - 1.0) / 2.0 * 100 = 50
    assert_eq!(added.margin_pct, Some(dec!(50)));
}

// ===========================================================================
// Billing filter and chart tests
// ===========================================================================

#[test]
fn test_single_day_filter_returns_the_one_matching_invoice() {
    let data = sample_data();
    let hits = filter_invoices(&data.invoices, day(2024, 12, 2), day(2024, 12, 2));

    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].issued_at.date(), day(2024, 12, 2));
}

#[test]
fn test_inverted_filter_range_is_empty_not_error() {
    let data = sample_data();
    let hits = filter_invoices(&data.invoices, day(2024, 12, 31), day(2024, 12, 1));
    assert!(hits.is_empty());
}

#[test]
fn test_chart_series_cover_the_full_invoice_table() {
    let data = sample_data();

    let sales = sales_by_product(&data);
    let total: rust_decimal::Decimal = sales.iter().map(|s| s.total_billed).sum();
    // 250 + 800 + 90
    assert_eq!(total, dec!(1140));

    let trend = billing_trend(&data);
    assert_eq!(trend.len(), 3);
    assert_eq!(trend[0].date, day(2024, 12, 1));
    assert_eq!(trend[0].total_billed, dec!(250));
}

// ===========================================================================
// Invoice registration tests
// ===========================================================================

#[test]
fn test_register_invoice_bills_quantity_times_unit_price() {
    let mut data = sample_data();
    let entry = NewInvoice {
        product_id: 3,
        segment_id: 1,
        quantity_sold: 3,
    };
    let issued_at = day(2024, 12, 15).and_hms_opt(9, 30, 0).unwrap();

    let receipt = add_invoice(&mut data, &entry, issued_at).unwrap().result;

    // Zero Sugar is priced 1.60: 3 x 1.60 = 4.80 exactly
    assert_eq!(receipt.invoice.total_billed, dec!(4.80));
    assert_eq!(receipt.invoice.id, 4);
    assert_eq!(receipt.message, "Invoice registered successfully.");
}

#[test]
fn test_register_invoice_rejects_unknown_product() {
    let mut data = sample_data();
    let entry = NewInvoice {
        product_id: 99,
        segment_id: 1,
        quantity_sold: 1,
    };
    let issued_at = day(2024, 12, 15).and_hms_opt(0, 0, 0).unwrap();

    let err = add_invoice(&mut data, &entry, issued_at).unwrap_err();
    assert!(matches!(err, DashboardError::InvalidInput { .. }));
    assert_eq!(data.invoices.len(), 3);
}

// ===========================================================================
// Snapshot tests
// ===========================================================================

#[test]
fn test_snapshot_renders_every_section_once_per_pass() {
    let data = sample_data();
    let snapshot = build_snapshot(&data, DateRange::default()).unwrap().result;

    assert_eq!(snapshot.filtered_invoices.len(), 3);
    assert_eq!(snapshot.sales_by_product.len(), 3);
    assert_eq!(snapshot.billing_trend.len(), 3);
    assert_eq!(snapshot.margins.len(), 3);
    assert_eq!(snapshot.key_metrics.asset_turnover, dec!(8.5));
    assert_eq!(snapshot.alert_report.alerts.len(), 1);
}

#[test]
fn test_append_is_visible_on_the_next_render_pass() {
    let mut data = sample_data();
    let range = DateRange::default();

    let before = build_snapshot(&data, range).unwrap().result;
    assert_eq!(before.margins.len(), 3);

    let entry = NewProduct {
        name: "Dr Pepper Vanilla Float".into(),
        unit_cost: dec!(0.65),
        unit_price: dec!(1.80),
        quantity: 100,
    };
    add_product(&mut data, &entry).unwrap();

    let after = build_snapshot(&data, range).unwrap().result;
    assert_eq!(after.margins.len(), 4);
    assert!(after
        .margins
        .iter()
        .any(|m| m.name == "Dr Pepper Vanilla Float"));
}
