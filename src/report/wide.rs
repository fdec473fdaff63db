use std::collections::BTreeMap;

use crate::models::{
    BfantTiltRow, BfantWideRow, NrBeamTiltRow, NrBeamWideRow, SplitTiltRow, SplitWideRow,
    TiltSeries,
};

/// Pivots the beam-forming antenna tilt table wide by date.
pub fn bfant_wide(rows: &[BfantTiltRow]) -> Vec<BfantWideRow> {
    type Key = (String, String, String, String, String, String, String);
    let mut grouped: BTreeMap<Key, TiltSeries> = BTreeMap::new();
    for row in rows {
        let series = grouped
            .entry((
                row.cell_name.clone(),
                row.system.clone(),
                row.local_cell_id.clone(),
                row.bfant_name.clone(),
                row.device_no.clone(),
                row.connect_rru_subrack_no.clone(),
                row.local_cell_id_cellphy.clone(),
            ))
            .or_default();
        if let Some(date) = row.date {
            series.insert(date, row.tilt);
        }
    }
    grouped
        .into_iter()
        .map(|(key, tilt)| BfantWideRow {
            cell_name: key.0,
            system: key.1,
            local_cell_id: key.2,
            bfant_name: key.3,
            device_no: key.4,
            connect_rru_subrack_no: key.5,
            local_cell_id_cellphy: key.6,
            tilt,
        })
        .collect()
}

/// Pivots the NR TRP-beam tilt table wide by date.
pub fn nr_beam_wide(rows: &[NrBeamTiltRow]) -> Vec<NrBeamWideRow> {
    type Key = (String, String, String, String, String);
    let mut grouped: BTreeMap<Key, TiltSeries> = BTreeMap::new();
    for row in rows {
        let series = grouped
            .entry((
                row.nr_cell_name.clone(),
                row.system.clone(),
                row.nr_du_cell_id.clone(),
                row.trp_beam_name.clone(),
                row.nr_du_cell_trp_id.clone(),
            ))
            .or_default();
        if let Some(date) = row.date {
            series.insert(date, row.tilt);
        }
    }
    grouped
        .into_iter()
        .map(|(key, tilt)| NrBeamWideRow {
            nr_cell_name: key.0,
            system: key.1,
            nr_du_cell_id: key.2,
            trp_beam_name: key.3,
            nr_du_cell_trp_id: key.4,
            tilt,
        })
        .collect()
}

/// Pivots the sector-split cell tilt table wide by date.
pub fn split_wide(rows: &[SplitTiltRow]) -> Vec<SplitWideRow> {
    type Key = (String, String, String, String, String);
    let mut grouped: BTreeMap<Key, TiltSeries> = BTreeMap::new();
    for row in rows {
        let series = grouped
            .entry((
                row.cell_name.clone(),
                row.system.clone(),
                row.local_cell_id.clone(),
                row.splitcell_name.clone(),
                row.splitcell_local_cell_id.clone(),
            ))
            .or_default();
        if let Some(date) = row.date {
            series.insert(date, row.cell_beam_tilt);
        }
    }
    grouped
        .into_iter()
        .map(|(key, tilt)| SplitWideRow {
            cell_name: key.0,
            system: key.1,
            local_cell_id: key.2,
            splitcell_name: key.3,
            splitcell_local_cell_id: key.4,
            tilt,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_bfant_wide_groups_by_identity() {
        let row = |date: &str, tilt: f64| BfantTiltRow {
            cell_name: "ABC1234-L26-1A".to_string(),
            system: "L2600".to_string(),
            local_cell_id: "11".to_string(),
            bfant_name: "ABC1234".to_string(),
            device_no: "0".to_string(),
            connect_rru_subrack_no: "60".to_string(),
            local_cell_id_cellphy: "11".to_string(),
            date: NaiveDate::parse_from_str(date, "%Y-%m-%d").ok(),
            tilt: Some(tilt),
        };
        let wide = bfant_wide(&[row("2025-07-01", 6.0), row("2025-07-08", 7.0)]);
        assert_eq!(wide.len(), 1);
        assert_eq!(wide[0].tilt.len(), 2);
    }
}
