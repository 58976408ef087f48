use chrono::NaiveDate;
use clap::{Args, ValueEnum};
use serde_json::Value;

use dashboard_core::sample::sample_data;
use dashboard_core::snapshot::{build_snapshot, DateRange};

/// Arguments for rendering the dashboard
#[derive(Args)]
pub struct ShowArgs {
    /// Inclusive start of the billing date filter (YYYY-MM-DD)
    #[arg(long)]
    pub start_date: Option<NaiveDate>,

    /// Inclusive end of the billing date filter (YYYY-MM-DD)
    #[arg(long)]
    pub end_date: Option<NaiveDate>,

    /// Restrict the view to one dashboard section
    #[arg(long, default_value = "all")]
    pub section: Section,
}

/// The dashboard sections, selectable like the original's table picker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Section {
    All,
    Metrics,
    Billing,
    Charts,
    Margins,
    Alerts,
}

impl Section {
    /// Snapshot result keys this section displays.
    fn keys(self) -> &'static [&'static str] {
        match self {
            Section::All => &[
                "range",
                "key_metrics",
                "filtered_invoices",
                "sales_by_product",
                "billing_trend",
                "margins",
                "alert_report",
            ],
            Section::Metrics => &["key_metrics"],
            Section::Billing => &["range", "filtered_invoices"],
            Section::Charts => &["sales_by_product", "billing_trend"],
            Section::Margins => &["margins"],
            Section::Alerts => &["alert_report"],
        }
    }
}

pub fn run_show(args: ShowArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let data = sample_data();

    let defaults = DateRange::default();
    let range = DateRange {
        start: args.start_date.unwrap_or(defaults.start),
        end: args.end_date.unwrap_or(defaults.end),
    };

    let snapshot = build_snapshot(&data, range)?;
    let mut value = serde_json::to_value(&snapshot)?;

    if args.section != Section::All {
        prune_sections(&mut value, args.section);
    }

    Ok(value)
}

/// Drop every snapshot field the selected section does not display.
fn prune_sections(value: &mut Value, section: Section) {
    let keep = section.keys();
    if let Some(Value::Object(result)) = value.get_mut("result") {
        result.retain(|key, _| keep.contains(&key.as_str()));
    }
}
