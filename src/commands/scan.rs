use crate::cli::ScanArgs;
use crate::commands::output::OutputFormatter;
use crate::context::BasicXmlContext;
use crate::registry::Registry;
use crate::scan;
use crate::ScanOptions;
use std::io::{stdout, Write};

fn options_from_args(args: &ScanArgs) -> Result<ScanOptions, Box<dyn std::error::Error>> {
    if let Some(path) = &args.config {
        let text = std::fs::read_to_string(path)?;
        return Ok(ScanOptions::from_toml_str(&text)?);
    }
    Ok(ScanOptions {
        format: args.format.clone(),
        severity_threshold: args.severity_threshold.clone(),
        ignore_errors: args.ignore_errors,
        content: args.content.clone(),
        context_lines: args.context_lines,
        parallelism: None,
    })
}

pub fn run_scan(args: ScanArgs) -> Result<(), Box<dyn std::error::Error>> {
    let registry = Registry::with_defaults();
    let ctx = BasicXmlContext;
    let options = options_from_args(&args)?;

    let rows = scan::run(&args.sources, &options, &registry, &ctx)?;

    let formatter = OutputFormatter::new(args.output);
    let mut out = stdout();
    formatter.print_header(&mut out)?;
    for (idx, row) in rows.iter().enumerate() {
        formatter.print_row(&mut out, row, idx == rows.len() - 1)?;
    }
    formatter.print_footer(&mut out)?;

    Ok(())
}
