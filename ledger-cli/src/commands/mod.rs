//! CLI command implementations

pub mod config;
pub mod replay;

use std::path::PathBuf;

use anyhow::{Context, Result};
use ledger_core::config::Config;
use ledger_core::LedgerContext;

/// Get the ledger directory from environment or default
pub fn get_ledger_dir() -> Result<PathBuf> {
    if let Ok(dir) = std::env::var("LEDGER_DIR") {
        return Ok(PathBuf::from(dir));
    }
    let home = dirs::home_dir().context("Could not find home directory")?;
    Ok(home.join(".ledger"))
}

/// Load config and build a ledger context
pub fn get_context() -> Result<LedgerContext> {
    let ledger_dir = get_ledger_dir()?;
    let config = Config::load(&ledger_dir)
        .with_context(|| format!("Failed to load settings from {:?}", ledger_dir))?;

    LedgerContext::new(config).context("Invalid ledger configuration")
}
