//! Row formatting for the CLI demo: table, JSON, NDJSON, and CSV renderers
//! over [`EmittedRow`], with severity-colored table output via `colored`.

use crate::cli::OutputFormat;
use crate::emitter::EmittedRow;
use colored::*;
use std::io::{self, Write};

pub struct OutputFormatter {
    format: OutputFormat,
}

fn to_io_error(e: impl std::error::Error + Send + Sync + 'static) -> io::Error {
    io::Error::new(io::ErrorKind::Other, e)
}

impl OutputFormatter {
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    pub fn print_header(&self, writer: &mut impl Write) -> io::Result<()> {
        match self.format {
            OutputFormat::Csv => {
                let mut csv_writer = csv::Writer::from_writer(vec![]);
                csv_writer
                    .write_record(["event_id", "tool_name", "event_type", "status", "severity", "ref_file", "ref_line", "message"])
                    .map_err(to_io_error)?;
                writer.write_all(&csv_writer.into_inner().map_err(|e| e.into_error())?)
            }
            OutputFormat::Json => writeln!(writer, "["),
            _ => Ok(()),
        }
    }

    pub fn print_footer(&self, writer: &mut impl Write) -> io::Result<()> {
        if matches!(self.format, OutputFormat::Json) {
            writeln!(writer, "]")?;
        }
        Ok(())
    }

    pub fn print_row(&self, writer: &mut impl Write, row: &EmittedRow, is_last: bool) -> io::Result<()> {
        match self.format {
            OutputFormat::Table => writeln!(writer, "{}", self.format_table(row)),
            // `format_csv` already ends its record with the writer's own terminator.
            OutputFormat::Csv => write!(writer, "{}", self.format_csv(row)),
            OutputFormat::Ndjson => writeln!(writer, "{}", self.format_json(row)),
            OutputFormat::Json => {
                let suffix = if is_last { "" } else { "," };
                writeln!(writer, "  {}{suffix}", self.format_json(row))
            }
        }
    }

    fn format_table(&self, row: &EmittedRow) -> String {
        let severity = row.severity.as_deref().unwrap_or("-");
        let colored_severity = match severity {
            "critical" => severity.red().bold(),
            "error" => severity.red(),
            "warning" => severity.yellow(),
            "info" => severity.cyan(),
            "debug" => severity.dimmed(),
            other => other.normal(),
        };
        let status = row.status.as_deref().unwrap_or("-");
        let location = match (&row.ref_file, row.ref_line) {
            (Some(file), Some(line)) => format!("{file}:{line}"),
            (Some(file), None) => file.clone(),
            _ => String::new(),
        };
        format!(
            "{:>6} {:<10} {:<14} {:<8} {:<8} {:<30} {}",
            row.event_id,
            row.tool_name.as_deref().unwrap_or("-").blue(),
            row.event_type,
            status,
            colored_severity,
            location.dimmed(),
            row.message.as_deref().unwrap_or(""),
        )
    }

    fn format_csv(&self, row: &EmittedRow) -> String {
        let mut csv_writer = csv::Writer::from_writer(vec![]);
        let _ = csv_writer.write_record([
            row.event_id.to_string(),
            row.tool_name.clone().unwrap_or_default(),
            row.event_type.clone(),
            row.status.clone().unwrap_or_default(),
            row.severity.clone().unwrap_or_default(),
            row.ref_file.clone().unwrap_or_default(),
            row.ref_line.map(|l| l.to_string()).unwrap_or_default(),
            row.message.clone().unwrap_or_default(),
        ]);
        String::from_utf8(csv_writer.into_inner().unwrap_or_default()).unwrap_or_default()
    }

    fn format_json(&self, row: &EmittedRow) -> String {
        serde_json::json!({
            "event_id": row.event_id,
            "tool_name": row.tool_name,
            "event_type": row.event_type,
            "status": row.status,
            "severity": row.severity,
            "ref_file": row.ref_file,
            "ref_line": row.ref_line,
            "message": row.message,
            "fingerprint": row.fingerprint,
            "pattern_id": row.pattern_id,
            "similarity_score": row.similarity_score,
        })
        .to_string()
    }
}
