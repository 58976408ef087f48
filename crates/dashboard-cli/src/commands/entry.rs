use clap::Args;
use rust_decimal::Decimal;
use serde::Serialize;
use serde_json::Value;
use std::time::Instant;

use dashboard_core::entry::{add_invoice, add_product, NewInvoice, NewProduct};
use dashboard_core::sample::sample_data;
use dashboard_core::snapshot::{build_snapshot, DashboardSnapshot, DateRange};
use dashboard_core::tables::{Invoice, Product};
use dashboard_core::types::with_metadata;

use crate::input;

/// Arguments for appending a product to the catalogue
#[derive(Args)]
pub struct AddProductArgs {
    /// Path to JSON input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,

    /// Product name
    #[arg(long)]
    pub name: Option<String>,

    /// Production cost per unit
    #[arg(long)]
    pub unit_cost: Option<Decimal>,

    /// Sale price per unit
    #[arg(long)]
    pub unit_price: Option<Decimal>,

    /// Stock quantity on hand
    #[arg(long)]
    pub quantity: Option<u32>,
}

/// Arguments for registering an invoice
#[derive(Args)]
pub struct AddInvoiceArgs {
    /// Path to JSON input file (overrides individual flags)
    #[arg(long)]
    pub input: Option<String>,

    /// Catalogue id of the product sold
    #[arg(long)]
    pub product_id: Option<u32>,

    /// Segment the sale is billed against
    #[arg(long)]
    pub segment_id: Option<u32>,

    /// Units sold; the total is quantity times the product's unit price
    #[arg(long)]
    pub quantity: Option<u32>,
}

/// Entry receipt plus the refreshed dashboard the append produced.
#[derive(Serialize)]
struct ProductEntryOutcome {
    message: String,
    product: Product,
    dashboard: DashboardSnapshot,
}

#[derive(Serialize)]
struct InvoiceEntryOutcome {
    message: String,
    invoice: Invoice,
    dashboard: DashboardSnapshot,
}

pub fn run_add_product(args: AddProductArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let start = Instant::now();

    let entry: NewProduct = if let Some(ref path) = args.input {
        input::file::read_json(path)?
    } else if let Some(data) = input::stdin::read_stdin()? {
        serde_json::from_value(data)?
    } else {
        NewProduct {
            name: args.name.ok_or("--name is required (or provide --input)")?,
            unit_cost: args
                .unit_cost
                .ok_or("--unit-cost is required (or provide --input)")?,
            unit_price: args
                .unit_price
                .ok_or("--unit-price is required (or provide --input)")?,
            quantity: args
                .quantity
                .ok_or("--quantity is required (or provide --input)")?,
        }
    };

    let mut data = sample_data();
    let receipt = add_product(&mut data, &entry)?;
    let snapshot = build_snapshot(&data, DateRange::default())?;

    let mut warnings = receipt.warnings;
    warnings.extend(snapshot.warnings);

    let outcome = ProductEntryOutcome {
        message: receipt.result.message,
        product: receipt.result.product,
        dashboard: snapshot.result,
    };

    let elapsed = start.elapsed().as_micros() as u64;
    let assumptions = serde_json::json!({
        "state": "sample_data_plus_entry",
        "id_policy": "max_plus_one",
    });

    let output = with_metadata(
        "Product Catalogue Entry",
        &assumptions,
        warnings,
        elapsed,
        outcome,
    );
    Ok(serde_json::to_value(output)?)
}

pub fn run_add_invoice(args: AddInvoiceArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let start = Instant::now();

    let entry: NewInvoice = if let Some(ref path) = args.input {
        input::file::read_json(path)?
    } else if let Some(data) = input::stdin::read_stdin()? {
        serde_json::from_value(data)?
    } else {
        NewInvoice {
            product_id: args
                .product_id
                .ok_or("--product-id is required (or provide --input)")?,
            segment_id: args
                .segment_id
                .ok_or("--segment-id is required (or provide --input)")?,
            quantity_sold: args
                .quantity
                .ok_or("--quantity is required (or provide --input)")?,
        }
    };

    let mut data = sample_data();
    let issued_at = chrono::Local::now().naive_local();
    let receipt = add_invoice(&mut data, &entry, issued_at)?;
    let snapshot = build_snapshot(&data, DateRange::default())?;

    let mut warnings = receipt.warnings;
    warnings.extend(snapshot.warnings);

    let outcome = InvoiceEntryOutcome {
        message: receipt.result.message,
        invoice: receipt.result.invoice,
        dashboard: snapshot.result,
    };

    let elapsed = start.elapsed().as_micros() as u64;
    let assumptions = serde_json::json!({
        "state": "sample_data_plus_entry",
        "id_policy": "max_plus_one",
        "pricing": "unit_price_at_entry",
    });

    let output = with_metadata(
        "Invoice Registration",
        &assumptions,
        warnings,
        elapsed,
        outcome,
    );
    Ok(serde_json::to_value(output)?)
}
