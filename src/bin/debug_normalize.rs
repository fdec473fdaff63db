use anyhow::Result;

#[path = "../models/mod.rs"]
mod models;

#[path = "../processor/mod.rs"]
mod processor;

use models::{AirDevice, HwDevice, NonAirDevice, TiltSeries};
use processor::{AirNormalizer, HwRetNormalizer, NonAirNormalizer};

fn main() -> Result<()> {
    println!("=== DEBUGGING VENDOR NORMALIZATION ===\n");

    let air_devices = vec![
        air_device("ABC1234L21", "23"),
        air_device("ABC1234L23", "L23-S03C2"),
        air_device("ABC1234L23", "mystery-id"),
    ];
    println!("--- Ericsson AIR ---");
    for record in AirNormalizer::new().normalize(&air_devices) {
        println!(
            "{} '{}' -> band={} sector={:?} carrier={:?} score={} advice={}",
            record.nodeid,
            record.sectorcarrierid,
            record.tuning_band,
            record.sector,
            record.carrier,
            record.score,
            record.advice
        );
    }

    let non_air_devices = vec![
        non_air_device("ABC1234", "L21_SA+L07_S2"),
        non_air_device("ABC1234", "L18_S1_By_Diplexer"),
        non_air_device("ABC1234", "MainAntenna1"),
    ];
    println!("\n--- Ericsson non-AIR ---");
    for record in NonAirNormalizer::new().normalize(&non_air_devices) {
        println!(
            "'{}' -> band={} sector={:?} usage={} advice={} mo={}",
            record.userlabel,
            record.tuning_band,
            record.sector,
            record.usage,
            record.advice,
            record.parameter_mo
        );
    }

    let hw_devices = vec![
        hw_device("ABC1234", "HB_SET1_S1"),
        hw_device("ABC1234", "1800_2600_S1S2"),
        hw_device("ABC1234", "AAU2600"),
    ];
    println!("\n--- Huawei RET ---");
    for record in HwRetNormalizer::new().normalize(&hw_devices) {
        println!(
            "'{}' -> band={} sector={:?} usage={} advice={}",
            record.device_name, record.tuning_band, record.sector, record.usage, record.advice
        );
    }

    Ok(())
}

fn air_device(nodeid: &str, sectorcarrierid: &str) -> AirDevice {
    AirDevice {
        site: nodeid.chars().take(7).collect(),
        nodeid: nodeid.to_string(),
        sectorcarrierid: sectorcarrierid.to_string(),
        tilt: TiltSeries::new(),
    }
}

fn non_air_device(site: &str, userlabel: &str) -> NonAirDevice {
    NonAirDevice {
        site: site.to_string(),
        nodeid: format!("{site}X01"),
        userlabel: userlabel.to_string(),
        antennaunitgroupid: "1".to_string(),
        antennanearunitid: "2".to_string(),
        retsubunitid: "3".to_string(),
        antennamodelnumber: "ATR4518R7".to_string(),
        min_tilt: "0".to_string(),
        max_tilt: "100".to_string(),
        tilt: TiltSeries::new(),
    }
}

fn hw_device(site: &str, device_name: &str) -> HwDevice {
    HwDevice {
        site_name: site.to_string(),
        name: format!("{site}-RRU"),
        device_name: device_name.to_string(),
        device_no: "0".to_string(),
        subunit_no: "1".to_string(),
        max_tilt: "1000".to_string(),
        min_tilt: "0".to_string(),
        tilt: TiltSeries::new(),
    }
}
