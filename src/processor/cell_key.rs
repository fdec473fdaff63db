use std::collections::HashMap;

use crate::models::{EnrichedInventoryRow, InventoryRow, LteCellKey, LteCellRow, NrCellRow};
use crate::processor::band_mapper::cell_band;
use crate::processor::name_parser::NameParser;

/// Derives the canonical `(site, tuning_band, sector, carrier)` join key for
/// the serving-cell side, and enriches the inventory with serving-cell
/// attributes. This is the only join surface: nothing downstream joins on
/// raw vendor identifiers.
pub struct CellKeyBuilder {
    parser: NameParser,
}

impl CellKeyBuilder {
    pub fn new() -> Self {
        CellKeyBuilder {
            parser: NameParser::new(),
        }
    }

    /// Applies the cell-name grammar and the system->band mapping to every
    /// serving LTE cell.
    pub fn normalize_lte_cells(&self, rows: &[LteCellRow]) -> Vec<LteCellKey> {
        rows.iter()
            .map(|row| {
                let parts = self.parser.parse_cell_name(&row.cell_name);
                LteCellKey {
                    cell: row.clone(),
                    carrier: parts.carrier,
                    sector: parts.sector,
                    sector_type: parts.sector_type,
                    tuning_band: cell_band(&row.system),
                }
            })
            .collect()
    }

    /// Left-joins the inventory against the union of the LTE and NR
    /// serving-cell tables on `cell_name`. Every inventory row survives;
    /// rows with several serving matches are kept once per match, as a
    /// relational left join would.
    pub fn enrich_inventory(
        &self,
        inventory: &[InventoryRow],
        lte: &[LteCellRow],
        nr: &[NrCellRow],
    ) -> Vec<EnrichedInventoryRow> {
        #[derive(Clone)]
        struct CellAttrs {
            site_id: String,
            system: String,
            sector_name: String,
            rat: String,
        }

        let mut by_name: HashMap<&str, Vec<CellAttrs>> = HashMap::new();
        for row in lte {
            by_name.entry(row.cell_name.as_str()).or_default().push(CellAttrs {
                site_id: row.site_id.clone(),
                system: row.system.clone(),
                sector_name: row.sector_name.clone(),
                rat: row.rat.clone(),
            });
        }
        for row in nr {
            by_name.entry(row.cell_name.as_str()).or_default().push(CellAttrs {
                site_id: row.site_id.clone(),
                system: row.system.clone(),
                sector_name: row.sector_name.clone(),
                rat: row.rat.clone(),
            });
        }

        let mut enriched = Vec::with_capacity(inventory.len());
        for row in inventory {
            match by_name.get(row.cell_name.as_str()) {
                Some(matches) => {
                    for attrs in matches {
                        enriched.push(EnrichedInventoryRow {
                            cell_name: row.cell_name.clone(),
                            site_name: row.site_name.clone(),
                            site_id: Some(attrs.site_id.clone()),
                            system: Some(attrs.system.clone()),
                            sector_name: Some(attrs.sector_name.clone()),
                            rat: Some(attrs.rat.clone()),
                        });
                    }
                }
                None => enriched.push(EnrichedInventoryRow {
                    cell_name: row.cell_name.clone(),
                    site_name: row.site_name.clone(),
                    site_id: None,
                    system: None,
                    sector_name: None,
                    rat: None,
                }),
            }
        }
        enriched
    }
}

impl Default for CellKeyBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::TuningBand;

    pub(crate) fn lte_row(cell_name: &str, system: &str) -> LteCellRow {
        LteCellRow {
            site: "ABC1234".to_string(),
            site_id: "ABC1234".to_string(),
            cell_name: cell_name.to_string(),
            system: system.to_string(),
            sector_name: "S1".to_string(),
            antenna_type: "ATR4518R7".to_string(),
            vendor: "Ericsson".to_string(),
            mtilt: "4".to_string(),
            height: "30".to_string(),
            xtxr: "4T4R".to_string(),
            local_cell_id: "11".to_string(),
            rat: "LTE".to_string(),
        }
    }

    #[test]
    fn test_normalize_lte_cells() {
        let keys = CellKeyBuilder::new().normalize_lte_cells(&[lte_row("ABC1234-L21-1A", "L2100")]);
        assert_eq!(keys.len(), 1);
        assert_eq!(keys[0].carrier, Some(1));
        assert_eq!(keys[0].sector, Some(1));
        assert_eq!(keys[0].tuning_band, TuningBand::Mb);
    }

    #[test]
    fn test_unknown_system_maps_to_other() {
        let keys = CellKeyBuilder::new().normalize_lte_cells(&[lte_row("ABC1234-L21-1A", "GSM900")]);
        assert_eq!(keys[0].tuning_band, TuningBand::Other);
    }

    #[test]
    fn test_enrich_inventory_keeps_unmatched_rows() {
        let inventory = vec![
            InventoryRow {
                cell_name: "ABC1234-L21-1A".to_string(),
                site_name: "ABC1234".to_string(),
            },
            InventoryRow {
                cell_name: "GONE999-L21-1A".to_string(),
                site_name: "GONE999".to_string(),
            },
        ];
        let lte = vec![lte_row("ABC1234-L21-1A", "L2100")];
        let enriched = CellKeyBuilder::new().enrich_inventory(&inventory, &lte, &[]);
        assert_eq!(enriched.len(), 2);
        assert_eq!(enriched[0].site_id.as_deref(), Some("ABC1234"));
        assert_eq!(enriched[0].rat.as_deref(), Some("LTE"));
        assert!(enriched[1].site_id.is_none());
    }
}
