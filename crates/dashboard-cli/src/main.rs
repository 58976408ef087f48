mod commands;
mod input;
mod output;

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::process;

use commands::dashboard::ShowArgs;
use commands::entry::{AddInvoiceArgs, AddProductArgs};

/// Business-metrics dashboard over the in-memory sample dataset
#[derive(Parser)]
#[command(
    name = "bizdash",
    version,
    about = "Business-metrics dashboard over the in-memory sample dataset",
    long_about = "A single-session business-metrics dashboard: key ratios, a date-filtered \
                  billing table, sales and trend chart series, per-product margins and \
                  threshold alerts, plus append-only product and invoice entry. All state \
                  is built from sample data at startup and lives for one invocation."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format
    #[arg(long, default_value = "table", global = true)]
    output: OutputFormat,
}

#[derive(Subcommand)]
enum Commands {
    /// Render the dashboard for a date range
    Show(ShowArgs),
    /// Append a product to the catalogue and re-render
    AddProduct(AddProductArgs),
    /// Register an invoice against a product and re-render
    AddInvoice(AddInvoiceArgs),
    /// Print version information
    Version,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
    Csv,
    Minimal,
}

fn main() {
    let cli = Cli::parse();

    let result: Result<serde_json::Value, Box<dyn std::error::Error>> = match cli.command {
        Commands::Show(args) => commands::dashboard::run_show(args),
        Commands::AddProduct(args) => commands::entry::run_add_product(args),
        Commands::AddInvoice(args) => commands::entry::run_add_invoice(args),
        Commands::Version => {
            println!("bizdash {}", env!("CARGO_PKG_VERSION"));
            return;
        }
    };

    match result {
        Ok(value) => {
            output::format_output(&cli.output, &value);
            process::exit(0);
        }
        Err(e) => {
            eprintln!("{}: {}", "error".red().bold(), e);
            process::exit(1);
        }
    }
}
