//! morastr: count and segment morae in Japanese text

use anyhow::Result;
use clap::Parser;
use morastr_cli::commands::Commands;

/// Mora counter for Japanese text
#[derive(Debug, Parser)]
#[command(name = "morastr", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Increase verbosity
    #[arg(long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Suppress log output
    #[arg(short, long, global = true)]
    quiet: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    morastr_cli::init_logging(cli.verbose, cli.quiet);
    cli.command.execute()
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_count_flags() {
        let cli = Cli::try_parse_from([
            "morastr",
            "count",
            "input.txt",
            "-v",
            "--allow-other",
            "false",
            "-t",
            "extra.toml",
            "--verbose",
            "--verbose",
        ])
        .unwrap();
        assert_eq!(cli.verbose, 2);
        match cli.command {
            Commands::Count(args) => {
                assert!(args.validate);
                assert!(!args.allow_other);
                assert_eq!(args.tables.tables.len(), 1);
            }
            other => panic!("expected count, got {other:?}"),
        }
    }
}
