use colored::Colorize;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde_json::Value;
use std::str::FromStr;
use tabled::{builder::Builder, Table};

/// Widest chart bar in characters.
const BAR_WIDTH: u32 = 40;

/// True when the envelope's result is a dashboard view: either a snapshot
/// (possibly pruned to one section) or an entry outcome carrying one.
pub fn is_dashboard(value: &Value) -> bool {
    let Some(result) = value.get("result").and_then(Value::as_object) else {
        return false;
    };
    result.contains_key("dashboard")
        || result.contains_key("key_metrics")
        || result.contains_key("filtered_invoices")
        || result.contains_key("sales_by_product")
        || result.contains_key("margins")
        || result.contains_key("alert_report")
}

/// Render the dashboard envelope section by section.
pub fn print_dashboard(value: &Value) {
    let Some(result) = value.get("result").and_then(Value::as_object) else {
        return;
    };

    // Entry outcomes lead with their success banner and nest the snapshot.
    if let Some(message) = result.get("message").and_then(Value::as_str) {
        println!("{}", message.green().bold());
        println!();
    }
    let snapshot = result
        .get("dashboard")
        .and_then(Value::as_object)
        .unwrap_or(result);

    if let Some(metrics) = snapshot.get("key_metrics").and_then(Value::as_object) {
        print_key_metrics(metrics);
    }
    if let Some(invoices) = snapshot.get("filtered_invoices").and_then(Value::as_array) {
        print_billing(snapshot.get("range"), invoices);
    }
    if let Some(series) = snapshot.get("sales_by_product").and_then(Value::as_array) {
        print_series("Sales by Product", "Product", "product", series);
    }
    if let Some(series) = snapshot.get("billing_trend").and_then(Value::as_array) {
        print_series("Billing Trend", "Date", "date", series);
    }
    if let Some(margins) = snapshot.get("margins").and_then(Value::as_array) {
        print_margins(margins);
    }
    if let Some(report) = snapshot.get("alert_report").and_then(Value::as_object) {
        print_alerts(report);
    }

    if let Some(Value::Array(warnings)) = value.get("warnings") {
        if !warnings.is_empty() {
            println!("{}", "Warnings:".yellow());
            for w in warnings {
                if let Value::String(s) = w {
                    println!("  - {}", s.yellow());
                }
            }
            println!();
        }
    }
}

fn print_key_metrics(metrics: &serde_json::Map<String, Value>) {
    let mut builder = Builder::default();
    builder.push_record(["Metric", "Value"]);
    builder.push_record([
        "Asset Turnover",
        &fixed_point(metrics.get("asset_turnover")),
    ]);
    builder.push_record([
        "Liquidity Index",
        &fixed_point(metrics.get("liquidity_index")),
    ]);
    builder.push_record(["Debt Index", &percentage(metrics.get("debt_index"))]);

    print_section("Key Metrics", Table::from(builder));
}

fn print_billing(range: Option<&Value>, invoices: &[Value]) {
    let title = match range {
        Some(r) => format!(
            "Filtered Billing ({} to {})",
            r.get("start").and_then(Value::as_str).unwrap_or("?"),
            r.get("end").and_then(Value::as_str).unwrap_or("?"),
        ),
        None => "Filtered Billing".to_string(),
    };

    if invoices.is_empty() {
        println!("{}", title.bold());
        println!("(no invoices in range)");
        println!();
        return;
    }

    let mut builder = Builder::default();
    builder.push_record(["Id", "Product", "Segment", "Qty", "Total", "Date"]);
    for invoice in invoices {
        builder.push_record([
            plain(invoice.get("id")),
            plain(invoice.get("product_id")),
            plain(invoice.get("segment_id")),
            plain(invoice.get("quantity_sold")),
            fixed_point(invoice.get("total_billed")),
            calendar_date(invoice.get("issued_at")),
        ]);
    }

    println!("{}", title.bold());
    println!("{}", Table::from(builder));
    println!();
}

/// One chart series as a table with a proportional bar column.
fn print_series(title: &str, label_header: &str, label_key: &str, series: &[Value]) {
    if series.is_empty() {
        return;
    }

    let totals: Vec<Decimal> = series
        .iter()
        .map(|point| decimal(point.get("total_billed")).unwrap_or_default())
        .collect();
    let max = totals.iter().copied().max().unwrap_or_default();

    let mut builder = Builder::default();
    builder.push_record([label_header, "Total Billed", ""]);
    for (point, total) in series.iter().zip(&totals) {
        builder.push_record([
            plain(point.get(label_key)),
            fixed_point(point.get("total_billed")),
            bar(*total, max),
        ]);
    }

    print_section(title, Table::from(builder));
}

fn print_margins(margins: &[Value]) {
    let mut builder = Builder::default();
    builder.push_record(["Product", "Margin"]);
    for margin in margins {
        builder.push_record([
            plain(margin.get("name")),
            direct_percentage(margin.get("margin_pct")),
        ]);
    }

    print_section("Profitability by Product", Table::from(builder));
}

fn print_alerts(report: &serde_json::Map<String, Value>) {
    println!("{}", "Automatic Alerts".bold());

    let all_clear = report
        .get("all_clear")
        .and_then(Value::as_bool)
        .unwrap_or(false);
    let status = report.get("status").and_then(Value::as_str).unwrap_or("");

    if all_clear {
        println!("{}", status.green().bold());
    } else {
        if let Some(alerts) = report.get("alerts").and_then(Value::as_array) {
            for alert in alerts {
                if let Some(message) = alert.get("message").and_then(Value::as_str) {
                    println!("{} {}", "!".red().bold(), message.red());
                }
            }
        }
        println!("{}", status.red());
    }
    println!();
}

fn print_section(title: &str, table: Table) {
    println!("{}", title.bold());
    println!("{}", table);
    println!();
}

// ---------------------------------------------------------------------------
// Value formatting
// ---------------------------------------------------------------------------

/// Decimals arrive as JSON strings; numbers are accepted as a fallback.
fn decimal(value: Option<&Value>) -> Option<Decimal> {
    match value? {
        Value::String(s) => Decimal::from_str(s).ok(),
        Value::Number(n) => Decimal::from_str(&n.to_string()).ok(),
        _ => None,
    }
}

/// Two-decimal fixed point, or "undefined" for an absent ratio.
fn fixed_point(value: Option<&Value>) -> String {
    match decimal(value) {
        Some(d) => format!("{:.2}", d),
        None => "undefined".to_string(),
    }
}

/// A ratio shown as a percentage: 0.4444 renders as "44.44%".
fn percentage(value: Option<&Value>) -> String {
    match decimal(value) {
        Some(d) => format!("{:.2}%", d * Decimal::ONE_HUNDRED),
        None => "undefined".to_string(),
    }
}

/// A value that already is a percentage: 66.666 renders as "66.67%".
fn direct_percentage(value: Option<&Value>) -> String {
    match decimal(value) {
        Some(d) => format!("{:.2}%", d),
        None => "undefined".to_string(),
    }
}

fn plain(value: Option<&Value>) -> String {
    match value {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        Some(other) => other.to_string(),
        None => String::new(),
    }
}

/// Calendar date of a timestamp string; the billing filter ignores time.
fn calendar_date(value: Option<&Value>) -> String {
    match value {
        Some(Value::String(s)) => s.split('T').next().unwrap_or(s).to_string(),
        _ => String::new(),
    }
}

/// Proportional run of '#' against the series maximum; non-zero values get
/// at least one mark.
fn bar(value: Decimal, max: Decimal) -> String {
    if max <= Decimal::ZERO || value <= Decimal::ZERO {
        return String::new();
    }
    let ratio = value / max;
    let width = (ratio * Decimal::from(BAR_WIDTH))
        .round()
        .to_u32()
        .unwrap_or(0)
        .clamp(1, BAR_WIDTH);
    "#".repeat(width as usize)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
