//! Segment command implementation

use anyhow::Result;
use clap::Args;
use morastr_core::MoraString;
use std::io::{self, Write};
use std::path::PathBuf;

use super::{build_config, into_cli_error, TableArgs};
use crate::input::{read_input, strip_line_breaks};
use crate::output::{write_json, OutputFormat};

/// Arguments for the segment command
#[derive(Debug, Args)]
pub struct SegmentArgs {
    /// Input file (default: standard input)
    #[arg(value_name = "FILE")]
    pub input: Option<PathBuf>,

    /// Reject ill-formed mora sequences instead of skipping them
    #[arg(short = 'v', long)]
    pub validate: bool,

    /// Separator between morae in text output
    #[arg(short, long, default_value = "/")]
    pub separator: String,

    #[command(flatten)]
    pub tables: TableArgs,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text")]
    pub format: OutputFormat,
}

impl SegmentArgs {
    /// Execute the segment command
    pub fn execute(&self) -> Result<()> {
        log::debug!("Arguments: {:?}", self);

        let config = build_config(self.validate, true, &self.tables)?;
        let bytes = strip_line_breaks(&read_input(self.input.as_deref())?);
        let morae = MoraString::from_bytes_with(&bytes, &config).map_err(into_cli_error)?;
        log::info!(
            "Segmented {} morae, {} characters skipped",
            morae.mora_count(),
            morae.skipped()
        );

        let mut out = io::stdout().lock();
        self.write_to(&mut out, &morae)
    }

    fn write_to<W: Write>(&self, writer: &mut W, morae: &MoraString) -> Result<()> {
        match self.format {
            OutputFormat::Text => {
                let joined: Vec<&str> = morae.iter().collect();
                writeln!(writer, "{}", joined.join(&self.separator))?;
            }
            OutputFormat::Json => write_json(writer, morae)?,
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(format: OutputFormat) -> SegmentArgs {
        SegmentArgs {
            input: None,
            validate: true,
            separator: "/".to_string(),
            tables: TableArgs::default(),
            format,
        }
    }

    #[test]
    fn test_text_output() {
        let morae = MoraString::new("きゃっと", true).unwrap();
        let mut buf = Vec::new();
        args(OutputFormat::Text).write_to(&mut buf, &morae).unwrap();
        assert_eq!(String::from_utf8(buf).unwrap(), "きゃ/っ/と\n");
    }

    #[test]
    fn test_json_output() {
        let morae = MoraString::new("ぱん", true).unwrap();
        let mut buf = Vec::new();
        args(OutputFormat::Json).write_to(&mut buf, &morae).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&buf).unwrap();
        assert_eq!(value["mora_count"], 2);
        assert_eq!(value["morae"][1], "ん");
    }
}
