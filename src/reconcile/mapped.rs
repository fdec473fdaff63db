use std::collections::HashMap;

use crate::models::{
    AirRecord, HwRetRecord, LteCellKey, MappedAirRow, MappedHwRow, MappedNonAirRow, NonAirRecord,
    TuningBand,
};
use crate::reconcile::dedup_exact;

/// Inner join of normalized AIR devices against the serving-cell keys on
/// `(site, tuning_band, sector, carrier)`. Rows missing any key component
/// never match; they surface in the no-map report instead.
pub fn air_map(cells: &[LteCellKey], devices: &[AirRecord]) -> Vec<MappedAirRow> {
    let mut index: HashMap<(&str, TuningBand, u32, u32), Vec<&AirRecord>> = HashMap::new();
    for device in devices {
        if !device.tuning_band.is_joinable() {
            continue;
        }
        let (Some(sector), Some(carrier)) = (device.sector, device.carrier) else {
            continue;
        };
        index
            .entry((device.site.as_str(), device.tuning_band, sector, carrier))
            .or_default()
            .push(device);
    }

    let mut rows = Vec::new();
    for cell in cells {
        if !cell.tuning_band.is_joinable() {
            continue;
        }
        let (Some(sector), Some(carrier)) = (cell.sector, cell.carrier) else {
            continue;
        };
        if let Some(matches) = index.get(&(cell.cell.site.as_str(), cell.tuning_band, sector, carrier))
        {
            for device in matches {
                rows.push(MappedAirRow {
                    cell: cell.clone(),
                    device: (*device).clone(),
                    parameter_mo: format!("SectorCarrier={}", device.sectorcarrierid),
                    parameter_name: "digitalTilt".to_string(),
                });
            }
        }
    }

    let mut rows = dedup_exact(rows);
    rows.sort_by(|a, b| {
        (
            a.cell.cell.site_id.as_str(),
            a.cell.tuning_band,
            a.cell.sector,
            a.cell.carrier,
        )
            .cmp(&(
                b.cell.cell.site_id.as_str(),
                b.cell.tuning_band,
                b.cell.sector,
                b.cell.carrier,
            ))
    });
    rows
}

/// Inner join of normalized Huawei RET records on `(site, tuning_band,
/// sector)` — Huawei devices carry no carrier dimension.
pub fn hwret_map(cells: &[LteCellKey], devices: &[HwRetRecord]) -> Vec<MappedHwRow> {
    let mut index: HashMap<(&str, TuningBand, u32), Vec<&HwRetRecord>> = HashMap::new();
    for device in devices {
        if !device.tuning_band.is_joinable() {
            continue;
        }
        let Some(sector) = device.sector else {
            continue;
        };
        index
            .entry((device.site.as_str(), device.tuning_band, sector))
            .or_default()
            .push(device);
    }

    let mut rows = Vec::new();
    for cell in cells {
        if !cell.tuning_band.is_joinable() {
            continue;
        }
        let Some(sector) = cell.sector else {
            continue;
        };
        if let Some(matches) = index.get(&(cell.cell.site.as_str(), cell.tuning_band, sector)) {
            for device in matches {
                rows.push(MappedHwRow {
                    cell: cell.clone(),
                    device: (*device).clone(),
                });
            }
        }
    }

    let mut rows = dedup_exact(rows);
    rows.sort_by(|a, b| {
        (a.cell.cell.site_id.as_str(), a.cell.tuning_band, a.cell.sector)
            .cmp(&(b.cell.cell.site_id.as_str(), b.cell.tuning_band, b.cell.sector))
    });
    rows
}

/// Inner join of normalized non-AIR records on `(site, tuning_band, sector)`.
pub fn non_air_map(cells: &[LteCellKey], devices: &[NonAirRecord]) -> Vec<MappedNonAirRow> {
    let mut index: HashMap<(&str, TuningBand, u32), Vec<&NonAirRecord>> = HashMap::new();
    for device in devices {
        if !device.tuning_band.is_joinable() {
            continue;
        }
        let Some(sector) = device.sector else {
            continue;
        };
        index
            .entry((device.site.as_str(), device.tuning_band, sector))
            .or_default()
            .push(device);
    }

    let mut rows = Vec::new();
    for cell in cells {
        if !cell.tuning_band.is_joinable() {
            continue;
        }
        let Some(sector) = cell.sector else {
            continue;
        };
        if let Some(matches) = index.get(&(cell.cell.site.as_str(), cell.tuning_band, sector)) {
            for device in matches {
                rows.push(MappedNonAirRow {
                    cell: cell.clone(),
                    device: (*device).clone(),
                });
            }
        }
    }

    let mut rows = dedup_exact(rows);
    rows.sort_by(|a, b| {
        (a.cell.cell.site_id.as_str(), a.cell.tuning_band, a.cell.sector)
            .cmp(&(b.cell.cell.site_id.as_str(), b.cell.tuning_band, b.cell.sector))
    });
    rows
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Advice, LteCellRow, TiltSeries};
    use crate::processor::CellKeyBuilder;

    fn lte_row(cell_name: &str, system: &str) -> LteCellRow {
        LteCellRow {
            site: "ABC1234".to_string(),
            site_id: "ABC1234".to_string(),
            cell_name: cell_name.to_string(),
            system: system.to_string(),
            sector_name: "S1".to_string(),
            antenna_type: "AIR3246".to_string(),
            vendor: "Ericsson".to_string(),
            mtilt: "4".to_string(),
            height: "30".to_string(),
            xtxr: "4T4R".to_string(),
            local_cell_id: "11".to_string(),
            rat: "LTE".to_string(),
        }
    }

    fn air_record(site: &str, band: TuningBand, sector: Option<u32>, carrier: Option<u32>) -> AirRecord {
        AirRecord {
            site: site.to_string(),
            nodeid: format!("{site}L21"),
            sectorcarrierid: "11".to_string(),
            tuning_band: band,
            sector,
            carrier,
            score: 0,
            advice: Advice::Ok,
            tilt: TiltSeries::new(),
        }
    }

    #[test]
    fn test_air_map_joins_on_full_key() {
        let cells = CellKeyBuilder::new().normalize_lte_cells(&[lte_row("ABC1234-L21-1A", "L2100")]);
        let devices = vec![
            air_record("ABC1234", TuningBand::Mb, Some(1), Some(1)),
            air_record("ABC1234", TuningBand::Mb, Some(2), Some(1)),
            air_record("XYZ9876", TuningBand::Mb, Some(1), Some(1)),
        ];
        let rows = air_map(&cells, &devices);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].parameter_mo, "SectorCarrier=11");
        assert_eq!(rows[0].parameter_name, "digitalTilt");
    }

    #[test]
    fn test_air_map_never_joins_unresolved_keys() {
        // Other-band and null-sector rows on either side are excluded
        let cells = CellKeyBuilder::new().normalize_lte_cells(&[
            lte_row("ABC1234-L21-1A", "GSM900"), // band Other
        ]);
        let devices = vec![
            air_record("ABC1234", TuningBand::Other, Some(1), Some(1)),
            air_record("ABC1234", TuningBand::Mb, None, Some(1)),
        ];
        assert!(air_map(&cells, &devices).is_empty());
    }

    #[test]
    fn test_mapped_join_removes_exact_duplicates() {
        let cells = CellKeyBuilder::new().normalize_lte_cells(&[
            lte_row("ABC1234-L21-1A", "L2100"),
            lte_row("ABC1234-L21-1A", "L2100"),
        ]);
        let devices = vec![air_record("ABC1234", TuningBand::Mb, Some(1), Some(1))];
        assert_eq!(air_map(&cells, &devices).len(), 1);
    }

    #[test]
    fn test_hwret_map_joins_without_carrier() {
        let cells = CellKeyBuilder::new().normalize_lte_cells(&[lte_row("ABC1234-L21-1A", "L2100")]);
        let device = HwRetRecord {
            site: "ABC1234".to_string(),
            name: "ABC1234-RRU".to_string(),
            device_name: "HB_SET1_S1".to_string(),
            device_no: "0".to_string(),
            subunit_no: "1".to_string(),
            max_tilt: "1000".to_string(),
            min_tilt: "0".to_string(),
            tuning_band: TuningBand::Mb,
            sector: Some(1),
            usage: 0,
            advice: Advice::Ok,
            tilt: TiltSeries::new(),
        };
        assert_eq!(hwret_map(&cells, &[device]).len(), 1);
    }
}
