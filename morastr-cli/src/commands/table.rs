//! Table command implementation

use anyhow::Result;
use clap::Args;
use morastr_core::PatternEntry;
use std::io::{self, Write};

use super::{build_config, TableArgs};
use crate::output::{write_json, OutputFormat};

/// Arguments for the table command
#[derive(Debug, Args)]
pub struct TableCommandArgs {
    /// Only list entries whose canonical value is rewritten again
    #[arg(long)]
    pub unstable: bool,

    #[command(flatten)]
    pub tables: TableArgs,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    pub format: OutputFormat,
}

impl TableCommandArgs {
    /// Execute the table command
    pub fn execute(&self) -> Result<()> {
        let config = build_config(false, true, &self.tables)?;
        let table = config.table();
        let entries: Vec<&PatternEntry> = if self.unstable {
            table.unstable_entries()
        } else {
            table.entries().iter().collect()
        };
        log::info!("Listing {} of {} entries", entries.len(), table.len());

        let mut out = io::stdout().lock();
        write_entries(&mut out, &entries, self.format)
    }
}

fn write_entries<W: Write>(
    writer: &mut W,
    entries: &[&PatternEntry],
    format: OutputFormat,
) -> Result<()> {
    match format {
        OutputFormat::Text => {
            for entry in entries {
                writeln!(writer, "{}\t{}", entry.variant, entry.canonical)?;
            }
        }
        OutputFormat::Json => write_json(writer, entries)?,
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_entries() {
        let a = PatternEntry::new("ｶﾞ", "ガ");
        let b = PatternEntry::new("か\u{3099}", "が");
        let mut buf = Vec::new();
        write_entries(&mut buf, &[&a, &b], OutputFormat::Text).unwrap();
        assert_eq!(
            String::from_utf8(buf).unwrap(),
            "ｶﾞ\tガ\nか\u{3099}\tが\n"
        );
    }

    #[test]
    fn test_json_entries() {
        let a = PatternEntry::new("ｱ", "ア");
        let mut buf = Vec::new();
        write_entries(&mut buf, &[&a], OutputFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&buf).unwrap();
        assert_eq!(value[0]["variant"], "ｱ");
        assert_eq!(value[0]["canonical"], "ア");
    }
}
