use anyhow::Result;
use std::collections::HashSet;

#[path = "../config/mod.rs"]
mod config;

#[path = "../errors.rs"]
mod errors;

#[path = "../loader/mod.rs"]
mod loader;

#[path = "../models/mod.rs"]
mod models;

#[path = "../processor/mod.rs"]
mod processor;

use config::RunConfig;

fn main() -> Result<()> {
    dotenv::dotenv().ok();

    println!("=== CHECKING TUNING CELL LIST ===\n");

    let config = RunConfig::from_file("configs/run.toml")?;
    println!("Cluster: {}", config.cluster_name);
    println!("Cell list: {}\n", config.cell_list_path().display());

    let rows = loader::load_cell_list(&config.cell_list_path())?;

    let mut unparsable = 0;
    for row in &rows {
        if row.site_name == "No Site Name" {
            unparsable += 1;
            println!("⚠️  No site code in cell name: '{}'", row.cell_name);
        }
    }

    let sites: HashSet<&str> = rows.iter().map(|r| r.site_name.as_str()).collect();
    println!("\n{} cells across {} sites", rows.len(), sites.len());
    if unparsable > 0 {
        println!("❌ {unparsable} cell names without a parsable site code");
    } else {
        println!("✅ Every cell name yielded a site code");
    }
    Ok(())
}
