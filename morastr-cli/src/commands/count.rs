//! Count command implementation

use anyhow::Result;
use clap::{ArgAction, Args};
use morastr_core::count_all_bytes_with;
use std::io;
use std::path::PathBuf;
use std::time::Instant;

use super::{build_config, into_cli_error, TableArgs};
use crate::input::{read_input, strip_line_breaks};
use crate::output::{CountReport, OutputFormat};

/// Arguments for the count command
#[derive(Debug, Args)]
pub struct CountArgs {
    /// Input file (default: standard input)
    #[arg(value_name = "FILE")]
    pub input: Option<PathBuf>,

    /// Reject ill-formed mora sequences instead of skipping them
    #[arg(short = 'v', long)]
    pub validate: bool,

    /// Tolerate non-Japanese content when validating
    #[arg(long, action = ArgAction::Set, default_value_t = true, value_name = "BOOL")]
    pub allow_other: bool,

    #[command(flatten)]
    pub tables: TableArgs,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    pub format: OutputFormat,
}

impl CountArgs {
    /// Execute the count command
    pub fn execute(&self) -> Result<()> {
        log::info!("Counting morae");
        log::debug!("Arguments: {:?}", self);

        let start = Instant::now();
        let config = build_config(self.validate, self.allow_other, &self.tables)?;
        let bytes = strip_line_breaks(&read_input(self.input.as_deref())?);
        let mora_count = count_all_bytes_with(&bytes, &config).map_err(into_cli_error)?;

        let source = self.input.as_ref().map(|path| {
            std::fs::canonicalize(path)
                .unwrap_or_else(|_| path.clone())
                .display()
                .to_string()
        });
        let report = CountReport {
            source,
            mora_count,
            processing_time_ms: start.elapsed().as_secs_f64() * 1000.0,
        };
        log::info!("Counted {mora_count} morae");

        report.write_to(&mut io::stdout().lock(), self.format)
    }
}
