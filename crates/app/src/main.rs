//! Reagent inventory CLI.
//!
//! Reads and writes the registration and usage sheets stored as JSON files
//! under `--data-dir`. Sheet names and alert policy come from `LABSTOCK_*`
//! environment variables.

use std::path::PathBuf;

use anyhow::Context;
use chrono::{Local, NaiveDate};
use clap::{Parser, Subcommand};
use serde::Serialize;

use labstock_app::{
    AlertSummary, FileLedger, JsonWorkspace, StockReport, init_workspace, open_ledger,
};
use labstock_core::LotKey;
use labstock_infra::LedgerConfig;
use labstock_inventory::{ProposedUsage, RegisterLot};

#[derive(Parser)]
#[command(name = "labstock")]
#[command(about = "Lab reagent inventory ledger")]
#[command(version)]
struct Cli {
    /// Directory holding one folder per document
    #[arg(long, default_value = "labstock-data")]
    data_dir: PathBuf,

    /// Human-readable logs instead of JSON
    #[arg(long)]
    pretty_logs: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create the registration and usage sheets if missing
    Init,

    /// Current stock for every lot
    Stock,

    /// Expiry and stock alerts
    Alerts {
        /// Evaluate as of this date (default: today)
        #[arg(long)]
        today: Option<NaiveDate>,
    },

    /// Register a lot or an additional shipment of one
    Register {
        #[arg(long)]
        product: String,
        #[arg(long, default_value = "")]
        manufacturer: String,
        #[arg(long)]
        catalog_number: String,
        #[arg(long)]
        lot_number: String,
        #[arg(long)]
        quantity: f64,
        #[arg(long, default_value = "")]
        unit: String,
        /// Expiry date (YYYY-MM-DD)
        #[arg(long)]
        expiry: Option<NaiveDate>,
        #[arg(long, default_value = "")]
        location: String,
        #[arg(long)]
        registrant: String,
        /// Low-stock threshold; the configured default applies when omitted
        #[arg(long)]
        alert_threshold: Option<f64>,
    },

    /// Record consumption from a lot
    Use {
        #[arg(long)]
        product: String,
        #[arg(long)]
        lot_number: String,
        #[arg(long)]
        quantity: f64,
        #[arg(long)]
        user: String,
        #[arg(long, default_value = "")]
        note: String,
    },

    /// Silence alerts for a lot
    Mute(LotArgs),

    /// Re-enable alerts for a lot
    Unmute(LotArgs),

    /// Registered product names
    Products,

    /// Lot numbers registered for a product
    Lots {
        product: String,
    },
}

#[derive(clap::Args)]
struct LotArgs {
    #[arg(long)]
    product: String,
    #[arg(long)]
    catalog_number: String,
    #[arg(long)]
    lot_number: String,
}

impl From<LotArgs> for LotKey {
    fn from(args: LotArgs) -> Self {
        LotKey::new(
            args.product.trim(),
            args.catalog_number.trim(),
            args.lot_number.trim(),
        )
    }
}

fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn handle_command(
    workspace: &JsonWorkspace,
    ledger: &FileLedger,
    command: Commands,
) -> anyhow::Result<()> {
    match command {
        Commands::Init => {
            init_workspace(workspace, ledger.config())
                .with_context(|| format!("initializing {}", workspace.root().display()))?;
            println!("initialized {}", workspace.root().display());
            Ok(())
        }
        Commands::Stock => {
            let view = ledger.inventory()?;
            print_json(&StockReport::from(&view))
        }
        Commands::Alerts { today } => {
            let today = today.unwrap_or_else(|| Local::now().date_naive());
            let report = ledger.alerts(today)?;
            print_json(&AlertSummary::new(today, &report))
        }
        Commands::Register {
            product,
            manufacturer,
            catalog_number,
            lot_number,
            quantity,
            unit,
            expiry,
            location,
            registrant,
            alert_threshold,
        } => {
            let record = ledger.register_lot(RegisterLot {
                product,
                manufacturer,
                catalog_number,
                lot_number,
                initial_quantity: quantity,
                unit,
                expiry,
                location,
                registrant,
                alert_threshold,
                registered_at: Local::now().naive_local(),
            })?;
            print_json(&record)
        }
        Commands::Use {
            product,
            lot_number,
            quantity,
            user,
            note,
        } => {
            let record = ledger.record_usage(ProposedUsage {
                product,
                lot_number,
                quantity,
                user,
                note,
                used_at: Local::now().naive_local(),
            })?;
            print_json(&record)
        }
        Commands::Mute(lot) => {
            let rows = ledger.mute_lot(&lot.into())?;
            println!("muted {rows} row(s)");
            Ok(())
        }
        Commands::Unmute(lot) => {
            let rows = ledger.unmute_lot(&lot.into())?;
            println!("unmuted {rows} row(s)");
            Ok(())
        }
        Commands::Products => print_json(&ledger.products()?),
        Commands::Lots { product } => print_json(&ledger.lots_for_product(&product)?),
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if cli.pretty_logs {
        labstock_observability::init_pretty();
    } else {
        labstock_observability::init();
    }

    let config = LedgerConfig::from_env();
    let workspace = JsonWorkspace::new(&cli.data_dir);
    let ledger = open_ledger(&workspace, config);
    handle_command(&workspace, &ledger, cli.command)
}
