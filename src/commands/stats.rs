//! Aggregate summary over a scan's emitted rows — counts by event type,
//! status, severity, and the largest fingerprint clusters.

use crate::cli::ScanArgs;
use crate::context::BasicXmlContext;
use crate::registry::Registry;
use crate::scan;
use crate::ScanOptions;
use std::collections::HashMap;

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

fn count_by<'a>(values: impl Iterator<Item = &'a str>) -> Vec<(String, usize)> {
    let mut counts: HashMap<String, usize> = HashMap::new();
    for v in values {
        *counts.entry(v.to_string()).or_insert(0) += 1;
    }
    let mut pairs: Vec<(String, usize)> = counts.into_iter().collect();
    pairs.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));
    pairs
}

pub fn run_stats(args: ScanArgs) -> Result<(), Box<dyn std::error::Error>> {
    let registry = Registry::with_defaults();
    let ctx = BasicXmlContext;
    let options = options_from_args(&args)?;

    let rows = scan::run(&args.sources, &options, &registry, &ctx)?;
    println!("total events: {}", rows.len());

    println!("\nby event_type:");
    for (value, count) in count_by(rows.iter().map(|r| r.event_type.as_str())) {
        println!("  {value:<20} {count}");
    }

    println!("\nby status:");
    for (value, count) in count_by(rows.iter().filter_map(|r| r.status.as_deref())) {
        println!("  {value:<20} {count}");
    }

    println!("\nby severity:");
    for (value, count) in count_by(rows.iter().filter_map(|r| r.severity.as_deref())) {
        println!("  {value:<20} {count}");
    }

    let clustered = rows.iter().filter(|r| r.pattern_id.is_some()).count();
    let distinct_patterns: std::collections::HashSet<i64> =
        rows.iter().filter_map(|r| r.pattern_id).collect();
    println!(
        "\nfingerprint clusters: {} events across {} distinct patterns",
        clustered,
        distinct_patterns.len()
    );

    Ok(())
}
