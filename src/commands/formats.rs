//! Lists the canonical format namespace and which names currently have a
//! registered decoder, so a caller exploring `--format` options from the
//! CLI doesn't have to read source.

use crate::catalog;
use crate::registry::Registry;

pub fn run_formats() -> Result<(), Box<dyn std::error::Error>> {
    let registry = Registry::with_defaults();

    println!("groups:");
    for group in catalog::GROUPS {
        let members = catalog::group_members(group);
        println!("  {group:<12} {}", members.join(", "));
    }

    println!("\ncanonical formats ({} total, {} with a registered decoder):", catalog::CANONICAL_FORMATS.len(), registry.len());
    for name in catalog::CANONICAL_FORMATS {
        let status = if registry.has_format(name) { "implemented" } else { "catalogued only" };
        println!("  {name:<24} {status}");
    }

    Ok(())
}
