use anyhow::{Context, Result};
use chrono::NaiveDate;
use config::RunConfig;
use processor::{AirNormalizer, CellKeyBuilder, HwRetNormalizer, NonAirNormalizer};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use tracing::{error, info};
use tracing_subscriber;

mod config;
mod errors;
mod loader;
mod models;
mod processor;
mod reconcile;
mod report;

use models::{LteCellKey, LteCellRow, NrCellRow};

fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt::init();

    // Load environment variables
    dotenv::dotenv().ok();

    info!("🚀 Starting antenna-tilt CR reporting pipeline");

    let config =
        RunConfig::from_file("configs/run.toml").context("Failed to load run configuration")?;
    let (start_date, end_date) = config.date_window()?;
    info!(
        "Run: cluster {} week {} window {}..{}",
        config.cluster_name, config.week_num, start_date, end_date
    );

    let output_dir = config.output_dir();
    std::fs::create_dir_all(&output_dir)
        .with_context(|| format!("Failed to create {}", output_dir.display()))?;

    // Inventory drives the scope of every query below
    let inventory = loader::load_cell_list(&config.cell_list_path())
        .context("Failed to load tuning cell list")?;
    let sites: HashSet<String> = inventory.iter().map(|r| r.site_name.clone()).collect();
    info!(
        "Loaded {} inventory cells across {} sites",
        inventory.len(),
        sites.len()
    );

    // Serving-cell tables; everything reconciles against these
    let lte = loader::filter_cells_by_site(
        loader::lte_cells(&loader::read_table(&config.lte_table_path())?)?,
        &sites,
    );
    let nr = loader::filter_nr_cells_by_site(
        loader::nr_cells(&loader::read_table(&config.nr_table_path())?)?,
        &sites,
    );
    info!("Serving cells in scope: {} LTE, {} NR", lte.len(), nr.len());

    let lte_keys = CellKeyBuilder::new().normalize_lte_cells(&lte);

    // Vendor paths are independent: one failing table must not take down
    // the others
    let mut mapped_files: Vec<PathBuf> = Vec::new();
    let mut result_files: Vec<PathBuf> = Vec::new();
    let mut successful_paths = 0;

    match process_air(&config, &sites, &lte_keys, start_date, end_date, &output_dir) {
        Ok((mapped, no_map)) => {
            mapped_files.push(mapped);
            result_files.push(no_map);
            successful_paths += 1;
        }
        Err(e) => error!("❌ eric_air path failed: {e:#}"),
    }
    match process_non_air(&config, &sites, &lte_keys, start_date, end_date, &output_dir) {
        Ok((mapped, no_map)) => {
            mapped_files.push(mapped);
            result_files.push(no_map);
            successful_paths += 1;
        }
        Err(e) => error!("❌ eric_non_air path failed: {e:#}"),
    }
    match process_hwret(&config, &sites, &lte_keys, start_date, end_date, &output_dir) {
        Ok((mapped, no_map)) => {
            mapped_files.push(mapped);
            result_files.push(no_map);
            successful_paths += 1;
        }
        Err(e) => error!("❌ hwret path failed: {e:#}"),
    }

    // Inventory cross-check: gap detection against the serving tables
    match process_crosscheck(&config, &inventory, &lte, &nr, &output_dir) {
        Ok(mut files) => {
            result_files.append(&mut files);
            successful_paths += 1;
        }
        Err(e) => error!("❌ inventory cross-check failed: {e:#}"),
    }

    // Auxiliary tilt-topology reports
    match process_aux_tilt(&config, start_date, end_date, &output_dir) {
        Ok(mut files) => {
            result_files.append(&mut files);
            successful_paths += 1;
        }
        Err(e) => error!("❌ auxiliary tilt reports failed: {e:#}"),
    }

    // Bundle everything; loose CSVs are removed once archived
    let map_zip = output_dir.join(format!("{}_files_map.zip", config.cluster_name));
    report::bundle_reports(&mapped_files, &map_zip)?;
    let result_zip = output_dir.join(format!("{}_files_1.zip", config.cluster_name));
    report::bundle_reports(&result_files, &result_zip)?;

    info!("\n=== Pipeline Summary ===");
    info!("✅ {successful_paths} of 5 report paths succeeded");
    info!("📦 Archives: {} and {}", map_zip.display(), result_zip.display());
    Ok(())
}

fn process_air(
    config: &RunConfig,
    sites: &HashSet<String>,
    lte_keys: &[LteCellKey],
    start_date: NaiveDate,
    end_date: NaiveDate,
    output_dir: &Path,
) -> Result<(PathBuf, PathBuf)> {
    let df = loader::read_table(&config.table_path("eric_air"))?;
    let rows = loader::filter_air_by_site(loader::air_rows(&df)?, sites);
    info!("eric_air: {} observations in scope", rows.len());

    // mapped path works on the most recent observation per device
    let latest = reconcile::latest_per_key(
        &rows,
        |r| (r.nodeid.clone(), r.sectorcarrierid.clone()),
        |r| r.date,
    );
    let devices = reconcile::collapse_air(&latest);
    let records = AirNormalizer::new().normalize(&devices);
    let mapped = reconcile::air_map(lte_keys, &records);
    info!("eric_air: {} devices, {} mapped rows", devices.len(), mapped.len());

    let mapped_path = output_dir.join(format!("{}_eric_air_map.csv", config.cluster_name));
    report::write_csv(&mut report::air_map_frame(&mapped)?, &mapped_path)?;

    // no-map path keeps every observation inside the window
    let windowed = loader::within_window(rows, |r| r.date, start_date, end_date);
    let no_map = report::air_no_map(&windowed);
    let no_map_path = output_dir.join(format!("{}_air.csv", config.cluster_name));
    report::write_csv(&mut report::air_no_map_frame(&no_map)?, &no_map_path)?;

    Ok((mapped_path, no_map_path))
}

fn process_non_air(
    config: &RunConfig,
    sites: &HashSet<String>,
    lte_keys: &[LteCellKey],
    start_date: NaiveDate,
    end_date: NaiveDate,
    output_dir: &Path,
) -> Result<(PathBuf, PathBuf)> {
    let df = loader::read_table(&config.table_path("eric_non_air"))?;
    let rows = loader::filter_non_air_by_site(loader::non_air_rows(&df)?, sites);
    info!("eric_non_air: {} observations in scope", rows.len());

    let latest = reconcile::latest_per_key(
        &rows,
        |r| {
            (
                r.nodeid.clone(),
                r.userlabel.clone(),
                r.antennaunitgroupid.clone(),
                r.antennanearunitid.clone(),
                r.retsubunitid.clone(),
                r.antennamodelnumber.clone(),
                r.min_tilt.clone(),
                r.max_tilt.clone(),
            )
        },
        |r| r.date,
    );
    let devices = reconcile::collapse_non_air(&latest);
    let records = NonAirNormalizer::new().normalize(&devices);
    let mapped = reconcile::non_air_map(lte_keys, &records);
    info!(
        "eric_non_air: {} devices, {} mapped rows",
        devices.len(),
        mapped.len()
    );

    let mapped_path = output_dir.join(format!("{}_eric_non_air_map.csv", config.cluster_name));
    report::write_csv(&mut report::non_air_map_frame(&mapped)?, &mapped_path)?;

    let windowed = loader::within_window(rows, |r| r.date, start_date, end_date);
    let no_map = report::non_air_no_map(&windowed);
    let no_map_path = output_dir.join(format!("{}_non_air.csv", config.cluster_name));
    report::write_csv(&mut report::non_air_no_map_frame(&no_map)?, &no_map_path)?;

    Ok((mapped_path, no_map_path))
}

fn process_hwret(
    config: &RunConfig,
    sites: &HashSet<String>,
    lte_keys: &[LteCellKey],
    start_date: NaiveDate,
    end_date: NaiveDate,
    output_dir: &Path,
) -> Result<(PathBuf, PathBuf)> {
    let df = loader::read_table(&config.table_path("hwret"))?;
    let rows = loader::filter_huawei_by_site(loader::huawei_rows(&df)?, sites);
    info!("hwret: {} observations in scope", rows.len());

    let latest = reconcile::latest_per_key(
        &rows,
        |r| {
            (
                r.name.clone(),
                r.device_name.clone(),
                r.device_no.clone(),
                r.subunit_no.clone(),
            )
        },
        |r| r.date,
    );
    let devices = reconcile::collapse_huawei(&latest);
    let records = HwRetNormalizer::new().normalize(&devices);
    let mapped = reconcile::hwret_map(lte_keys, &records);
    info!("hwret: {} devices, {} mapped rows", devices.len(), mapped.len());

    let mapped_path = output_dir.join(format!("{}_hwret_map.csv", config.cluster_name));
    report::write_csv(&mut report::hwret_map_frame(&mapped)?, &mapped_path)?;

    let windowed = loader::within_window(rows, |r| r.date, start_date, end_date);
    let no_map = report::hw_no_map(&windowed);
    let no_map_path = output_dir.join(format!("{}_hw.csv", config.cluster_name));
    report::write_csv(&mut report::hw_no_map_frame(&no_map)?, &no_map_path)?;

    Ok((mapped_path, no_map_path))
}

fn process_crosscheck(
    config: &RunConfig,
    inventory: &[models::InventoryRow],
    lte: &[LteCellRow],
    nr: &[NrCellRow],
    output_dir: &Path,
) -> Result<Vec<PathBuf>> {
    let enriched = CellKeyBuilder::new().enrich_inventory(inventory, lte, nr);
    let routing = reconcile::route_inventory(&enriched);
    info!(
        "Cross-check scope: {} LTE-path rows, {} NR-path rows",
        routing.lte.len(),
        routing.nr.len()
    );

    let lte_rows = reconcile::lte_crosscheck(&routing.lte, lte);
    let gaps = lte_rows
        .iter()
        .filter(|r| r.status == models::MatchStatus::NotFound)
        .count();
    info!("LTE cross-check: {} rows, {} gaps", lte_rows.len(), gaps);
    let lte_path = output_dir.join(format!("Cell_LTE_result_{}.csv", config.cluster_name));
    report::write_csv(&mut report::lte_crosscheck_frame(&lte_rows)?, &lte_path)?;

    let nr_rows = reconcile::nr_crosscheck(&routing.nr, nr);
    let gaps = nr_rows
        .iter()
        .filter(|r| r.status == models::MatchStatus::NotFound)
        .count();
    info!("NR cross-check: {} rows, {} gaps", nr_rows.len(), gaps);
    let nr_path = output_dir.join(format!("Cell_NR_result_{}.csv", config.cluster_name));
    report::write_csv(&mut report::nr_crosscheck_frame(&nr_rows)?, &nr_path)?;

    Ok(vec![lte_path, nr_path])
}

fn process_aux_tilt(
    config: &RunConfig,
    start_date: NaiveDate,
    end_date: NaiveDate,
    output_dir: &Path,
) -> Result<Vec<PathBuf>> {
    let bfant = loader::within_window(
        loader::bfant_rows(&loader::read_table(&config.table_path("bfant_tilt"))?)?,
        |r| r.date,
        start_date,
        end_date,
    );
    let bfant_path = output_dir.join(format!("{}_bfant_tilt.csv", config.cluster_name));
    report::write_csv(
        &mut report::bfant_frame(&report::bfant_wide(&bfant))?,
        &bfant_path,
    )?;

    let nr_beam = loader::within_window(
        loader::nr_beam_rows(&loader::read_table(&config.table_path("nr_tilt"))?)?,
        |r| r.date,
        start_date,
        end_date,
    );
    let nr_path = output_dir.join(format!("{}_nr_tilt.csv", config.cluster_name));
    report::write_csv(
        &mut report::nr_beam_frame(&report::nr_beam_wide(&nr_beam))?,
        &nr_path,
    )?;

    let split = loader::within_window(
        loader::split_rows(&loader::read_table(&config.table_path("split_tilt"))?)?,
        |r| r.date,
        start_date,
        end_date,
    );
    let split_path = output_dir.join(format!("{}_split_tilt.csv", config.cluster_name));
    report::write_csv(
        &mut report::split_frame(&report::split_wide(&split))?,
        &split_path,
    )?;

    info!(
        "Auxiliary tilt reports: {} bfant, {} nr beam, {} split rows",
        bfant.len(),
        nr_beam.len(),
        split.len()
    );
    Ok(vec![bfant_path, nr_path, split_path])
}
