//! CLI command implementations

use anyhow::Result;
use clap::{Args, Subcommand};
use morastr_core::{Config, MoraError};
use std::path::PathBuf;

use crate::error::CliError;

pub mod count;
pub mod normalize;
pub mod segment;
pub mod table;

/// Available CLI commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Count the morae in a file or standard input
    Count(count::CountArgs),

    /// Split text into morae
    Segment(segment::SegmentArgs),

    /// Print the normalized text
    Normalize(normalize::NormalizeArgs),

    /// Inspect the mapping table
    Table(table::TableCommandArgs),
}

impl Commands {
    /// Execute the selected command
    pub fn execute(&self) -> Result<()> {
        match self {
            Commands::Count(args) => args.execute(),
            Commands::Segment(args) => args.execute(),
            Commands::Normalize(args) => args.execute(),
            Commands::Table(args) => args.execute(),
        }
    }
}

/// Extra mapping tables layered on the embedded ones
#[derive(Debug, Clone, Default, Args)]
pub struct TableArgs {
    /// Additional mapping file (TOML), may be repeated
    #[arg(short = 't', long = "table", value_name = "FILE")]
    pub tables: Vec<PathBuf>,
}

/// Build the core configuration from command-line flags
pub fn build_config(validate: bool, allow_other: bool, tables: &TableArgs) -> Result<Config> {
    let mut builder = Config::builder().validate(validate).allow_other(allow_other);
    for path in &tables.tables {
        log::debug!("Loading mapping table from {}", path.display());
        builder = builder.mapping_file(path);
    }
    builder.build().map_err(into_cli_error)
}

/// Map core errors onto CLI errors where one applies
pub fn into_cli_error(err: MoraError) -> anyhow::Error {
    match err {
        MoraError::Table(e) => CliError::InvalidTable(e.to_string()).into(),
        MoraError::Validation(e) => CliError::ValidationFailed(e.to_string()).into(),
        other => other.into(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use morastr_core::{ValidationError, ValidationKind};

    #[test]
    fn test_build_config_defaults() {
        let config = build_config(false, true, &TableArgs::default()).unwrap();
        assert!(!config.validate());
        assert!(config.segment_config().allow_other);
    }

    #[test]
    fn test_missing_table_is_cli_error() {
        let tables = TableArgs {
            tables: vec![PathBuf::from("/nonexistent/extra.toml")],
        };
        let err = build_config(true, true, &tables).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<CliError>(),
            Some(CliError::InvalidTable(_))
        ));
    }

    #[test]
    fn test_validation_error_mapping() {
        let err = into_cli_error(MoraError::Validation(ValidationError {
            offset: 0,
            ch: 'ゃ',
            kind: ValidationKind::OrphanCombining,
        }));
        assert!(err.to_string().starts_with("Validation failed:"));
    }

    #[test]
    fn test_commands_debug_format() {
        let cmd = Commands::Table(table::TableCommandArgs {
            unstable: true,
            tables: TableArgs::default(),
            format: crate::output::OutputFormat::Text,
        });
        let debug_str = format!("{cmd:?}");
        assert!(debug_str.contains("Table"));
        assert!(debug_str.contains("unstable: true"));
    }
}
