use anyhow::{Context, Result};
use conform_parser::load_schemas;
use std::path::Path;
use tracing::info;

use crate::output;

pub fn execute(config_path: &str) -> Result<()> {
    info!("Checking configuration: {}", config_path);

    // Parsing runs the structural checks and translates every date pattern
    let (conf, schemas) = load_schemas(Path::new(config_path))
        .with_context(|| format!("Failed to load configuration file: {}", config_path))?;

    output::print_success("Configuration is valid");

    println!("\nConfiguration Summary:");
    println!("  Region:   {}", conf.region.as_deref().unwrap_or("N/A"));
    println!("  Datasets: {}", schemas.len());

    for (i, (config, schema)) in conf.conf.iter().zip(&schemas).enumerate() {
        println!("\nDataset {}:", i + 1);
        println!("  Separator:   '{}'", schema.separator_char());
        println!(
            "  Date format: {} -> {}",
            config.date_format.trim(),
            schema.date_layout()
        );
        println!("  Files:");
        for path in schema.paths() {
            println!("    - {}", path);
        }
        println!("  Columns:");
        for (name, spec) in schema.columns() {
            println!("    - {}: {}", name, spec);
        }
    }

    Ok(())
}
