//! Normalize command implementation

use anyhow::Result;
use clap::Args;
use morastr_core::normalize_bytes_with;
use std::io::{self, Write};
use std::path::PathBuf;

use super::{build_config, into_cli_error, TableArgs};
use crate::input::read_input;

/// Arguments for the normalize command
#[derive(Debug, Args)]
pub struct NormalizeArgs {
    /// Input file (default: standard input)
    #[arg(value_name = "FILE")]
    pub input: Option<PathBuf>,

    #[command(flatten)]
    pub tables: TableArgs,
}

impl NormalizeArgs {
    /// Execute the normalize command
    pub fn execute(&self) -> Result<()> {
        log::debug!("Arguments: {:?}", self);

        let config = build_config(false, true, &self.tables)?;
        let bytes = read_input(self.input.as_deref())?;
        let normalized = normalize_bytes_with(&bytes, &config.table()).map_err(into_cli_error)?;

        let mut out = io::stdout().lock();
        out.write_all(normalized.as_bytes())?;
        out.flush()?;
        Ok(())
    }
}
