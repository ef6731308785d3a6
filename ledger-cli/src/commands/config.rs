//! Config command - show and change account settings

use anyhow::{Context, Result};
use clap::Subcommand;
use rust_decimal::Decimal;

use super::get_ledger_dir;
use crate::output;
use ledger_core::config::Config;
use ledger_core::OperationResult;

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Show the effective configuration (including environment overrides)
    Show {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
    /// Change saved settings
    Set {
        /// Account currency (3-letter code)
        #[arg(long)]
        currency: Option<String>,
        /// Fee as a fraction of the debit amount, e.g. 0.005
        #[arg(long)]
        fee_percentage: Option<Decimal>,
        /// Maximum debits per calendar day (UTC)
        #[arg(long)]
        max_daily_debits: Option<u32>,
    },
}

pub fn run(command: ConfigCommands) -> Result<()> {
    let ledger_dir = get_ledger_dir()?;

    match command {
        ConfigCommands::Show { json } => {
            let config = Config::load(&ledger_dir)?;

            if json {
                output::json(&OperationResult::ok(config));
                return Ok(());
            }

            let mut table = output::create_table();
            table.set_header(vec!["Setting", "Value"]);
            table.add_row(vec!["Currency".to_string(), config.currency.clone()]);
            table.add_row(vec!["Fee percentage".to_string(), config.fee_percentage.to_string()]);
            table.add_row(vec![
                "Max daily debits".to_string(),
                config.max_daily_debits.to_string(),
            ]);
            println!("{}", table);

            if let Err(e) = config.validate() {
                output::warning(&format!("Configuration is not usable: {}", e));
            }
            Ok(())
        }
        ConfigCommands::Set {
            currency,
            fee_percentage,
            max_daily_debits,
        } => {
            // Saved values only; environment overrides must not leak into the file
            let mut config = Config::load_with_env(&ledger_dir, |_| None)?;

            if let Some(currency) = currency {
                config.currency = currency;
            }
            if let Some(fee_percentage) = fee_percentage {
                config.fee_percentage = fee_percentage;
            }
            if let Some(max_daily_debits) = max_daily_debits {
                config.max_daily_debits = max_daily_debits;
            }

            config.validate().context("Refusing to save invalid settings")?;

            std::fs::create_dir_all(&ledger_dir)
                .with_context(|| format!("Failed to create ledger directory: {:?}", ledger_dir))?;
            config.save(&ledger_dir)?;

            output::success("Settings saved");
            Ok(())
        }
    }
}
