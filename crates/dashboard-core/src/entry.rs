use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::tables::{DashboardData, Invoice, Product};
use crate::{types::*, DashboardError, DashboardResult};

const PRODUCT_ADDED_MESSAGE: &str = "Product added successfully.";
const INVOICE_REGISTERED_MESSAGE: &str = "Invoice registered successfully.";

// ---------------------------------------------------------------------------
// Input / Output types
// ---------------------------------------------------------------------------

/// Form payload for the add-product entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewProduct {
    pub name: String,
    pub unit_cost: Money,
    pub unit_price: Money,
    pub quantity: u32,
}

/// Form payload for the register-invoice entry. The total is computed from
/// the referenced product's unit price, never supplied by the caller.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewInvoice {
    pub product_id: u32,
    pub segment_id: u32,
    pub quantity_sold: u32,
}

/// Receipt for a successful product append.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductReceipt {
    pub product: Product,
    pub message: String,
}

/// Receipt for a successful invoice append.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InvoiceReceipt {
    pub invoice: Invoice,
    pub message: String,
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Append a product row. The id is assigned max-plus-one at entry time; no
/// duplicate-name check exists, matching the append-only table contract.
pub fn add_product(
    data: &mut DashboardData,
    entry: &NewProduct,
) -> DashboardResult<ComputationOutput<ProductReceipt>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    if entry.unit_cost < Decimal::ZERO {
        return Err(DashboardError::InvalidInput {
            field: "unit_cost".into(),
            reason: "unit cost cannot be negative".into(),
        });
    }
    if entry.unit_price < Decimal::ZERO {
        return Err(DashboardError::InvalidInput {
            field: "unit_price".into(),
            reason: "unit price cannot be negative".into(),
        });
    }
    if entry.unit_price < entry.unit_cost {
        warnings.push("Unit price is below unit cost; margin will be negative.".into());
    }

    let product = Product {
        id: data.next_product_id(),
        name: entry.name.clone(),
        unit_cost: entry.unit_cost,
        unit_price: entry.unit_price,
        quantity: entry.quantity,
    };
    data.products.push(product.clone());

    let receipt = ProductReceipt {
        product,
        message: PRODUCT_ADDED_MESSAGE.to_string(),
    };

    let elapsed = start.elapsed().as_micros() as u64;
    let assumptions = serde_json::json!({
        "id_policy": "max_plus_one",
    });

    Ok(with_metadata(
        "Product Catalogue Entry",
        &assumptions,
        warnings,
        elapsed,
        receipt,
    ))
}

/// Append an invoice row for an existing product. The total billed is the
/// quantity times the product's unit price at entry time; the segment id is
/// stored as given, a weak reference like everywhere else in the data model.
pub fn add_invoice(
    data: &mut DashboardData,
    entry: &NewInvoice,
    issued_at: NaiveDateTime,
) -> DashboardResult<ComputationOutput<InvoiceReceipt>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    let unit_price = data
        .product(entry.product_id)
        .ok_or_else(|| DashboardError::InvalidInput {
            field: "product_id".into(),
            reason: format!("no product with id {}", entry.product_id),
        })?
        .unit_price;

    if data.segment(entry.segment_id).is_none() {
        warnings.push(format!(
            "Segment id {} has no segment row; stored as given.",
            entry.segment_id
        ));
    }

    let invoice = Invoice {
        id: data.next_invoice_id(),
        product_id: entry.product_id,
        segment_id: entry.segment_id,
        quantity_sold: entry.quantity_sold,
        total_billed: Decimal::from(entry.quantity_sold) * unit_price,
        issued_at,
    };
    data.invoices.push(invoice.clone());

    let receipt = InvoiceReceipt {
        invoice,
        message: INVOICE_REGISTERED_MESSAGE.to_string(),
    };

    let elapsed = start.elapsed().as_micros() as u64;
    let assumptions = serde_json::json!({
        "id_policy": "max_plus_one",
        "pricing": "unit_price_at_entry",
    });

    Ok(with_metadata(
        "Invoice Registration",
        &assumptions,
        warnings,
        elapsed,
        receipt,
    ))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
