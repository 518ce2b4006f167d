//! Output formatting

use anyhow::Result;
use serde::Serialize;
use std::io::Write;

/// Supported output formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text
    Text,
    /// JSON document
    Json,
}

/// Result of the count command
#[derive(Debug, Serialize)]
pub struct CountReport {
    /// Absolute path of the input file, `None` for standard input
    pub source: Option<String>,
    /// Total number of morae
    pub mora_count: usize,
    /// Wall-clock time spent reading and counting
    pub processing_time_ms: f64,
}

impl CountReport {
    /// Write the report in the given format
    pub fn write_to<W: Write>(&self, writer: &mut W, format: OutputFormat) -> Result<()> {
        match format {
            OutputFormat::Text => {
                if let Some(source) = &self.source {
                    writeln!(writer, "$ source file: {source}")?;
                    writeln!(writer, "$ processing time: {} ms", self.processing_time_ms)?;
                }
                writeln!(writer, "$ total mora count: {}", self.mora_count)?;
            }
            OutputFormat::Json => write_json(writer, self)?,
        }
        Ok(())
    }
}

/// Pretty-printed JSON followed by a newline
pub fn write_json<W: Write, T: Serialize + ?Sized>(writer: &mut W, value: &T) -> Result<()> {
    serde_json::to_writer_pretty(&mut *writer, value)?;
    writeln!(writer)?;
    writer.flush()?;
    Ok(())
}
