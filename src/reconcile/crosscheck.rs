use std::collections::HashMap;

use crate::models::{
    EnrichedInventoryRow, LteCellRow, LteCrossCheckRow, MatchStatus, NrCellRow, NrCrossCheckRow,
    TuningBand,
};
use crate::processor::band_mapper::coarse_band;
use crate::reconcile::dedup_exact;
use crate::reconcile::suggestion::suggest;

/// Inventory rows split by radio-access technology for the cross-check.
#[derive(Debug, Default)]
pub struct InventoryRouting {
    pub lte: Vec<EnrichedInventoryRow>,
    pub nr: Vec<EnrichedInventoryRow>,
}

/// LTE-tagged and untagged rows go to the LTE path. NR rows go to the NR
/// path except `NR2600`, which lives in the LTE frequency plan and is
/// reconciled against the LTE serving table.
pub fn route_inventory(rows: &[EnrichedInventoryRow]) -> InventoryRouting {
    let mut routing = InventoryRouting::default();
    for row in rows {
        match row.rat.as_deref() {
            Some("NR") => {
                if row.system.as_deref() == Some("NR2600") {
                    routing.lte.push(row.clone());
                } else {
                    routing.nr.push(row.clone());
                }
            }
            Some("LTE") | None => routing.lte.push(row.clone()),
            // unknown technology tags drop out of the cross-check entirely
            Some(_) => {}
        }
    }
    routing
}

/// Left join of the LTE-path inventory against the LTE serving cells on the
/// composite `(site_id, tuning_band, sector_name)` key. Gap detection, not
/// data assembly: unmatched inventory rows are retained and tagged.
pub fn lte_crosscheck(
    inventory: &[EnrichedInventoryRow],
    cells: &[LteCellRow],
) -> Vec<LteCrossCheckRow> {
    let mut index: HashMap<(&str, TuningBand, &str), Vec<&LteCellRow>> = HashMap::new();
    for cell in cells {
        index
            .entry((
                cell.site_id.as_str(),
                coarse_band(&cell.system),
                cell.sector_name.as_str(),
            ))
            .or_default()
            .push(cell);
    }

    let mut rows = Vec::new();
    for inv in inventory {
        let matches = match (&inv.site_id, &inv.sector_name) {
            (Some(site_id), Some(sector_name)) => {
                let band = coarse_band(inv.system.as_deref().unwrap_or(""));
                index.get(&(site_id.as_str(), band, sector_name.as_str()))
            }
            _ => None,
        };
        match matches {
            Some(found) => {
                for cell in found {
                    rows.push(LteCrossCheckRow {
                        requested_cell_name: inv.cell_name.clone(),
                        cell: Some((*cell).clone()),
                        tuning_band: Some(coarse_band(&cell.system)),
                        status: MatchStatus::Found,
                        suggestion: suggest(
                            Some(&cell.xtxr),
                            Some(&cell.vendor),
                            Some(&cell.antenna_type),
                            true,
                        ),
                    });
                }
            }
            None => rows.push(LteCrossCheckRow {
                requested_cell_name: inv.cell_name.clone(),
                cell: None,
                tuning_band: None,
                status: MatchStatus::NotFound,
                suggestion: suggest(None, None, None, true),
            }),
        }
    }
    dedup_exact(rows)
}

/// NR counterpart. The NR key uses the raw `system` label instead of the
/// coarse band bucket.
pub fn nr_crosscheck(
    inventory: &[EnrichedInventoryRow],
    cells: &[NrCellRow],
) -> Vec<NrCrossCheckRow> {
    let mut index: HashMap<(&str, &str, &str), Vec<&NrCellRow>> = HashMap::new();
    for cell in cells {
        index
            .entry((
                cell.site_id.as_str(),
                cell.system.as_str(),
                cell.sector_name.as_str(),
            ))
            .or_default()
            .push(cell);
    }

    let mut rows = Vec::new();
    for inv in inventory {
        let matches = match (&inv.site_id, &inv.system, &inv.sector_name) {
            (Some(site_id), Some(system), Some(sector_name)) => {
                index.get(&(site_id.as_str(), system.as_str(), sector_name.as_str()))
            }
            _ => None,
        };
        match matches {
            Some(found) => {
                for cell in found {
                    rows.push(NrCrossCheckRow {
                        requested_cell_name: inv.cell_name.clone(),
                        cell: Some((*cell).clone()),
                        tuning_band: Some(coarse_band(&cell.system)),
                        status: MatchStatus::Found,
                        suggestion: suggest(
                            Some(&cell.xtxr),
                            Some(&cell.vendor),
                            Some(&cell.antenna_type),
                            false,
                        ),
                    });
                }
            }
            None => rows.push(NrCrossCheckRow {
                requested_cell_name: inv.cell_name.clone(),
                cell: None,
                tuning_band: None,
                status: MatchStatus::NotFound,
                suggestion: suggest(None, None, None, false),
            }),
        }
    }
    dedup_exact(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Suggestion;

    fn inv_row(cell_name: &str, site_id: &str, system: &str, sector: &str, rat: &str) -> EnrichedInventoryRow {
        EnrichedInventoryRow {
            cell_name: cell_name.to_string(),
            site_name: site_id.to_string(),
            site_id: Some(site_id.to_string()),
            system: Some(system.to_string()),
            sector_name: Some(sector.to_string()),
            rat: Some(rat.to_string()),
        }
    }

    fn lte_cell(site_id: &str, system: &str, sector: &str) -> LteCellRow {
        LteCellRow {
            site: site_id.to_string(),
            site_id: site_id.to_string(),
            cell_name: format!("{site_id}-L21-1A"),
            system: system.to_string(),
            sector_name: sector.to_string(),
            antenna_type: "AIR3246".to_string(),
            vendor: "Ericsson".to_string(),
            mtilt: "4".to_string(),
            height: "30".to_string(),
            xtxr: "4T4R".to_string(),
            local_cell_id: "11".to_string(),
            rat: "LTE".to_string(),
        }
    }

    #[test]
    fn test_routing_sends_nr2600_to_lte_path() {
        let rows = vec![
            inv_row("A", "ABC1234", "L2100", "S1", "LTE"),
            inv_row("B", "ABC1234", "NR2600", "S1", "NR"),
            inv_row("C", "ABC1234", "NR3500", "S1", "NR"),
        ];
        let routing = route_inventory(&rows);
        assert_eq!(routing.lte.len(), 2);
        assert_eq!(routing.nr.len(), 1);
        assert_eq!(routing.nr[0].cell_name, "C");
    }

    #[test]
    fn test_untagged_rows_take_the_lte_path() {
        let mut row = inv_row("A", "ABC1234", "L2100", "S1", "LTE");
        row.rat = None;
        let routing = route_inventory(&[row]);
        assert_eq!(routing.lte.len(), 1);
    }

    #[test]
    fn test_gap_rows_are_retained_and_tagged() {
        let inventory = vec![inv_row("GONE999-L21-1A", "GONE999", "L2100", "S1", "LTE")];
        let rows = lte_crosscheck(&inventory, &[lte_cell("ABC1234", "L2100", "S1")]);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].status, MatchStatus::NotFound);
        assert_eq!(rows[0].status.to_string(), "cannot find in database");
        assert!(rows[0].cell.is_none());
        assert_eq!(rows[0].suggestion, Suggestion::Tbd);
    }

    #[test]
    fn test_match_uses_coarse_band_bucket() {
        // inventory says NR2600, serving cell says L2600: both bucket to 2600
        let inventory = vec![inv_row("B", "ABC1234", "NR2600", "S1", "NR")];
        let routing = route_inventory(&inventory);
        let rows = lte_crosscheck(&routing.lte, &[lte_cell("ABC1234", "L2600", "S1")]);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].status, MatchStatus::Found);
        assert_eq!(rows[0].suggestion, Suggestion::AirSectorCarrier);
    }

    #[test]
    fn test_nr_crosscheck_uses_raw_system_label() {
        let inventory = vec![inv_row("C", "ABC1234", "NR3500", "S1", "NR")];
        let nr_cell = NrCellRow {
            vendor: "Huawei".to_string(),
            site_id: "ABC1234".to_string(),
            gnodeb_name: "ABC1234G".to_string(),
            sector_name: "S1".to_string(),
            cell_name: "C".to_string(),
            local_cell_id: "1".to_string(),
            system: "NR3500".to_string(),
            xtxr: "64T64R".to_string(),
            antenna_type: "AAU5639".to_string(),
            rat: "NR".to_string(),
        };
        let rows = nr_crosscheck(&inventory, &[nr_cell]);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].status, MatchStatus::Found);
        assert_eq!(rows[0].suggestion, Suggestion::NrDuCellTrpBeam);
    }

    #[test]
    fn test_missing_key_component_means_not_found() {
        let mut row = inv_row("A", "ABC1234", "L2100", "S1", "LTE");
        row.site_id = None;
        let rows = lte_crosscheck(&[row], &[lte_cell("ABC1234", "L2100", "S1")]);
        assert_eq!(rows[0].status, MatchStatus::NotFound);
    }
}
