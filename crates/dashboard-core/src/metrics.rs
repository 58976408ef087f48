use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::tables::DashboardData;
use crate::{types::*, DashboardError, DashboardResult};

/// Rotation observations the asset-turnover placeholder averages over. A
/// modeling constant, not derived from the product table.
const TURNOVER_OBSERVATIONS: [Decimal; 3] = [dec!(8.0), dec!(10.0), dec!(7.5)];

// ---------------------------------------------------------------------------
// Output types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KeyMetrics {
    pub asset_turnover: Decimal,
    /// Receivables over payables. None when the payables total is zero.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub liquidity_index: Option<Decimal>,
    /// Payables over total obligations. None when both totals are zero.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub debt_index: Option<Rate>,
    pub receivables_total: Money,
    pub payables_total: Money,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductMargin {
    pub product_id: u32,
    pub name: String,
    /// Percentage of unit price kept after unit cost. None when the unit
    /// price is zero.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub margin_pct: Option<Rate>,
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Compute the dashboard's three headline ratios from current state.
///
/// Undefined ratios come back as None with a warning in the envelope rather
/// than an error; a degenerate table must not take down the whole view.
pub fn calculate_key_metrics(
    data: &DashboardData,
) -> DashboardResult<ComputationOutput<KeyMetrics>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    validate_balances(data)?;

    let asset_turnover = mean(&TURNOVER_OBSERVATIONS);

    let receivables_total: Money = data.receivables.iter().map(|r| r.total).sum();
    let payables_total: Money = data.payables.iter().map(|p| p.total).sum();

    let liquidity_index = if payables_total.is_zero() {
        warnings.push("Payables total is zero; liquidity index is undefined.".into());
        None
    } else {
        Some(receivables_total / payables_total)
    };

    let obligations_total = receivables_total + payables_total;
    let debt_index = if obligations_total.is_zero() {
        warnings.push("Receivables and payables are both zero; debt index is undefined.".into());
        None
    } else {
        Some(payables_total / obligations_total)
    };

    let output = KeyMetrics {
        asset_turnover,
        liquidity_index,
        debt_index,
        receivables_total,
        payables_total,
    };

    let elapsed = start.elapsed().as_micros() as u64;
    let assumptions = serde_json::json!({
        "turnover_observations": TURNOVER_OBSERVATIONS.to_vec(),
        "receivable_rows": data.receivables.len(),
        "payable_rows": data.payables.len(),
    });

    Ok(with_metadata(
        "Key Ratio Computation",
        &assumptions,
        warnings,
        elapsed,
        output,
    ))
}

/// Per-product margin percentage: (unit price - unit cost) / unit price x 100.
pub fn calculate_product_margins(
    data: &DashboardData,
) -> DashboardResult<ComputationOutput<Vec<ProductMargin>>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    let mut margins: Vec<ProductMargin> = Vec::with_capacity(data.products.len());

    for product in &data.products {
        if product.unit_cost < Decimal::ZERO {
            return Err(DashboardError::InvalidInput {
                field: format!("products[{}].unit_cost", product.id),
                reason: "unit cost cannot be negative".into(),
            });
        }
        if product.unit_price < Decimal::ZERO {
            return Err(DashboardError::InvalidInput {
                field: format!("products[{}].unit_price", product.id),
                reason: "unit price cannot be negative".into(),
            });
        }

        let margin_pct = if product.unit_price.is_zero() {
            warnings.push(format!(
                "Product '{}' has a zero unit price; margin is undefined.",
                product.name
            ));
            None
        } else {
            Some((product.unit_price - product.unit_cost) / product.unit_price * dec!(100))
        };

        margins.push(ProductMargin {
            product_id: product.id,
            name: product.name.clone(),
            margin_pct,
        });
    }

    let elapsed = start.elapsed().as_micros() as u64;
    let assumptions = serde_json::json!({
        "product_rows": data.products.len(),
        "basis": "unit_price",
    });

    Ok(with_metadata(
        "Per-Product Margin Analysis",
        &assumptions,
        warnings,
        elapsed,
        margins,
    ))
}

// ---------------------------------------------------------------------------
// Internal helpers
// ---------------------------------------------------------------------------

/// Arithmetic mean of a non-empty slice of observations.
fn mean(values: &[Decimal]) -> Decimal {
    let sum: Decimal = values.iter().copied().sum();
    sum / Decimal::from(values.len() as u64)
}

/// Receivable and payable totals must be non-negative for the ratios to
/// carry their stated meaning.
fn validate_balances(data: &DashboardData) -> DashboardResult<()> {
    for (idx, receivable) in data.receivables.iter().enumerate() {
        if receivable.total < Decimal::ZERO {
            return Err(DashboardError::InvalidInput {
                field: format!("receivables[{idx}].total"),
                reason: "amount cannot be negative".into(),
            });
        }
    }
    for (idx, payable) in data.payables.iter().enumerate() {
        if payable.total < Decimal::ZERO {
            return Err(DashboardError::InvalidInput {
                field: format!("payables[{idx}].total"),
                reason: "amount cannot be negative".into(),
            });
        }
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
