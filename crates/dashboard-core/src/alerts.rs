use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::metrics::KeyMetrics;
use crate::tables::DashboardData;
use crate::{types::*, DashboardResult};

/// Collection-period ceiling in days for the first alert rule.
const COLLECTION_DAYS_LIMIT: Decimal = dec!(45);

/// Floor under the asset-turnover placeholder for the second alert rule.
const TURNOVER_FLOOR: Decimal = dec!(8.0);

const COLLECTION_DAYS_MESSAGE: &str = "Average collection days exceeds 45-day limit.";
const TURNOVER_MESSAGE: &str = "Asset turnover below ideal value.";
const RECEIVABLES_MESSAGE: &str = "Receivables exceed payables.";
const ALL_CLEAR_MESSAGE: &str = "No critical alerts.";

// ---------------------------------------------------------------------------
// Output types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub enum AlertDirection {
    /// Triggered when the actual strictly exceeds the reference.
    Above,
    /// Triggered when the actual falls strictly below the reference.
    Below,
}

/// One rule's outcome, kept whether or not it fired.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AlertEvaluation {
    pub rule: String,
    pub actual: Decimal,
    pub reference: Decimal,
    pub direction: AlertDirection,
    pub triggered: bool,
}

/// Banner payload for a fired rule.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TriggeredAlert {
    pub rule: String,
    pub message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AlertReport {
    pub evaluations: Vec<AlertEvaluation>,
    pub alerts: Vec<TriggeredAlert>,
    pub all_clear: bool,
    pub status: String,
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Evaluate the three dashboard alert rules against current state.
///
/// Rules are independent: every triggered rule is reported, none
/// short-circuits another, and a rule whose input is unavailable is skipped
/// with a warning instead of failing the report. All comparisons are strict,
/// so a mean collection period of exactly 45 days does not fire.
pub fn evaluate_alerts(
    data: &DashboardData,
    metrics: &KeyMetrics,
) -> DashboardResult<ComputationOutput<AlertReport>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    let rules = [
        RuleSpec {
            name: "collection-days",
            actual: mean_collection_days(data),
            reference: COLLECTION_DAYS_LIMIT,
            direction: AlertDirection::Above,
            message: COLLECTION_DAYS_MESSAGE,
        },
        RuleSpec {
            name: "asset-turnover",
            actual: Some(metrics.asset_turnover),
            reference: TURNOVER_FLOOR,
            direction: AlertDirection::Below,
            message: TURNOVER_MESSAGE,
        },
        RuleSpec {
            name: "receivables-vs-payables",
            actual: Some(metrics.receivables_total),
            reference: metrics.payables_total,
            direction: AlertDirection::Above,
            message: RECEIVABLES_MESSAGE,
        },
    ];

    let mut evaluations: Vec<AlertEvaluation> = Vec::with_capacity(rules.len());
    let mut alerts: Vec<TriggeredAlert> = Vec::new();

    for rule in rules {
        let actual = match rule.actual {
            Some(v) => v,
            None => {
                warnings.push(format!(
                    "Alert rule '{}': input not available; skipped.",
                    rule.name
                ));
                continue;
            }
        };

        let triggered = match rule.direction {
            AlertDirection::Above => actual > rule.reference,
            AlertDirection::Below => actual < rule.reference,
        };

        evaluations.push(AlertEvaluation {
            rule: rule.name.to_string(),
            actual,
            reference: rule.reference,
            direction: rule.direction,
            triggered,
        });

        if triggered {
            alerts.push(TriggeredAlert {
                rule: rule.name.to_string(),
                message: rule.message.to_string(),
            });
        }
    }

    let all_clear = alerts.is_empty();
    let status = if all_clear {
        ALL_CLEAR_MESSAGE.to_string()
    } else {
        format!("{} critical alert(s) active.", alerts.len())
    };

    let output = AlertReport {
        evaluations,
        alerts,
        all_clear,
        status,
    };

    let elapsed = start.elapsed().as_micros() as u64;
    let assumptions = serde_json::json!({
        "collection_days_limit": COLLECTION_DAYS_LIMIT,
        "turnover_floor": TURNOVER_FLOOR,
        "comparisons": "strict",
    });

    Ok(with_metadata(
        "Threshold Alert Evaluation",
        &assumptions,
        warnings,
        elapsed,
        output,
    ))
}

// ---------------------------------------------------------------------------
// Internal helpers
// ---------------------------------------------------------------------------

struct RuleSpec {
    name: &'static str,
    actual: Option<Decimal>,
    reference: Decimal,
    direction: AlertDirection,
    message: &'static str,
}

/// Mean of the receivables' average collection periods. None when the table
/// is empty, so the rule can be skipped instead of comparing against garbage.
fn mean_collection_days(data: &DashboardData) -> Option<Decimal> {
    if data.receivables.is_empty() {
        return None;
    }
    let sum: Decimal = data.receivables.iter().map(|r| r.avg_collection_days).sum();
    Some(sum / Decimal::from(data.receivables.len() as u64))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
