use anyhow::{Context, Result};
use chrono::NaiveDate;
use polars::prelude::*;
use std::collections::HashSet;
use std::path::Path;

use crate::errors::SchemaError;
use crate::models::{
    BfantTiltRow, LteCellRow, NrBeamTiltRow, NrCellRow, RawAirRow, RawHuaweiRow, RawNonAirRow,
    SplitTiltRow,
};

/// Reads a raw table dump with every column as text; typing happens in the
/// per-table extractors so a bad cell degrades to a null field instead of
/// failing the whole read.
pub fn read_table(path: &Path) -> Result<DataFrame> {
    let df = CsvReadOptions::default()
        .with_has_header(true)
        .with_infer_schema_length(Some(0))
        .try_into_reader_with_file_path(Some(path.to_path_buf()))
        .with_context(|| format!("Failed to open {}", path.display()))?
        .finish()
        .with_context(|| format!("Failed to read {}", path.display()))?;
    Ok(df)
}

pub(crate) fn column<'a>(
    df: &'a DataFrame,
    table: &str,
    name: &str,
) -> std::result::Result<&'a StringChunked, SchemaError> {
    let col = df
        .column(name)
        .map_err(|_| SchemaError::missing(table, name))?;
    col.str().map_err(|_| SchemaError::ColumnType {
        table: table.to_string(),
        column: name.to_string(),
    })
}

fn text(col: &StringChunked, i: usize) -> String {
    col.get(i).unwrap_or("").trim().to_string()
}

fn number(col: &StringChunked, i: usize) -> Option<f64> {
    col.get(i).and_then(|s| s.trim().parse().ok())
}

fn date(col: &StringChunked, i: usize) -> Option<NaiveDate> {
    col.get(i)
        .and_then(|s| NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d").ok())
}

pub fn lte_cells(df: &DataFrame) -> std::result::Result<Vec<LteCellRow>, SchemaError> {
    const TABLE: &str = "lte_cells";
    let site = column(df, TABLE, "site")?;
    let site_id = column(df, TABLE, "site_id")?;
    let cell_name = column(df, TABLE, "cell_name")?;
    let system = column(df, TABLE, "system")?;
    let sector_name = column(df, TABLE, "sector_name")?;
    let antenna_type = column(df, TABLE, "antenna_type")?;
    let vendor = column(df, TABLE, "vendor")?;
    let mtilt = column(df, TABLE, "mtilt")?;
    let height = column(df, TABLE, "height")?;
    let xtxr = column(df, TABLE, "xtxr")?;
    let local_cell_id = column(df, TABLE, "local_cell_id")?;
    let rat = column(df, TABLE, "rat")?;

    Ok((0..df.height())
        .map(|i| LteCellRow {
            site: text(site, i),
            site_id: text(site_id, i),
            cell_name: text(cell_name, i),
            system: text(system, i),
            sector_name: text(sector_name, i),
            antenna_type: text(antenna_type, i),
            vendor: text(vendor, i),
            mtilt: text(mtilt, i),
            height: text(height, i),
            xtxr: text(xtxr, i),
            local_cell_id: text(local_cell_id, i),
            rat: text(rat, i),
        })
        .collect())
}

pub fn nr_cells(df: &DataFrame) -> std::result::Result<Vec<NrCellRow>, SchemaError> {
    const TABLE: &str = "nr_cells";
    let vendor = column(df, TABLE, "vendor")?;
    let site_id = column(df, TABLE, "site_id")?;
    let gnodeb_name = column(df, TABLE, "gnodeb_name")?;
    let sector_name = column(df, TABLE, "sector_name")?;
    let cell_name = column(df, TABLE, "cell_name")?;
    let local_cell_id = column(df, TABLE, "local_cell_id")?;
    let system = column(df, TABLE, "system")?;
    let xtxr = column(df, TABLE, "xtxr")?;
    let antenna_type = column(df, TABLE, "antenna_type")?;
    let rat = column(df, TABLE, "rat")?;

    Ok((0..df.height())
        .map(|i| NrCellRow {
            vendor: text(vendor, i),
            site_id: text(site_id, i),
            gnodeb_name: text(gnodeb_name, i),
            sector_name: text(sector_name, i),
            cell_name: text(cell_name, i),
            local_cell_id: text(local_cell_id, i),
            system: text(system, i),
            xtxr: text(xtxr, i),
            antenna_type: text(antenna_type, i),
            rat: text(rat, i),
        })
        .collect())
}

pub fn air_rows(df: &DataFrame) -> std::result::Result<Vec<RawAirRow>, SchemaError> {
    const TABLE: &str = "eric_air";
    let nodeid = column(df, TABLE, "nodeid")?;
    let sectorcarrierid = column(df, TABLE, "sectorcarrierid")?;
    let date_col = column(df, TABLE, "date")?;
    let tilt = column(df, TABLE, "digitaltilt")?;

    Ok((0..df.height())
        .map(|i| {
            let node = text(nodeid, i);
            RawAirRow {
                site: node.chars().take(7).collect(),
                nodeid: node,
                sectorcarrierid: text(sectorcarrierid, i),
                date: date(date_col, i),
                digital_tilt: number(tilt, i),
            }
        })
        .collect())
}

pub fn non_air_rows(df: &DataFrame) -> std::result::Result<Vec<RawNonAirRow>, SchemaError> {
    const TABLE: &str = "eric_non_air";
    let nodeid = column(df, TABLE, "nodeid")?;
    let userlabel = column(df, TABLE, "userlabel")?;
    let group_id = column(df, TABLE, "antennaunitgroupid")?;
    let near_unit = column(df, TABLE, "antennanearunitid")?;
    let sub_unit = column(df, TABLE, "retsubunitid")?;
    let model = column(df, TABLE, "antennamodelnumber")?;
    let max_tilt = column(df, TABLE, "maxtilt")?;
    let min_tilt = column(df, TABLE, "mintilt")?;
    let date_col = column(df, TABLE, "date")?;
    let tilt = column(df, TABLE, "electricalantennatilt")?;

    Ok((0..df.height())
        .map(|i| {
            let node = text(nodeid, i);
            RawNonAirRow {
                site: node.chars().take(7).collect(),
                nodeid: node,
                userlabel: text(userlabel, i),
                antennaunitgroupid: text(group_id, i),
                antennanearunitid: text(near_unit, i),
                retsubunitid: text(sub_unit, i),
                antennamodelnumber: text(model, i),
                min_tilt: text(min_tilt, i),
                max_tilt: text(max_tilt, i),
                date: date(date_col, i),
                electrical_tilt: number(tilt, i),
            }
        })
        .collect())
}

pub fn huawei_rows(df: &DataFrame) -> std::result::Result<Vec<RawHuaweiRow>, SchemaError> {
    const TABLE: &str = "hwret";
    let site_name = column(df, TABLE, "site_name")?;
    let name = column(df, TABLE, "name")?;
    let device_name = column(df, TABLE, "device_name")?;
    let device_no = column(df, TABLE, "device_no")?;
    let subunit_no = column(df, TABLE, "subunit_no")?;
    let max_tilt = column(df, TABLE, "max_tilt")?;
    let min_tilt = column(df, TABLE, "min_tilt")?;
    let date_col = column(df, TABLE, "date")?;
    let tilt = column(df, TABLE, "actual_tilt")?;

    Ok((0..df.height())
        .map(|i| RawHuaweiRow {
            site_name: text(site_name, i),
            name: text(name, i),
            device_name: text(device_name, i),
            device_no: text(device_no, i),
            subunit_no: text(subunit_no, i),
            max_tilt: text(max_tilt, i),
            min_tilt: text(min_tilt, i),
            date: date(date_col, i),
            actual_tilt: number(tilt, i),
        })
        .collect())
}

pub fn bfant_rows(df: &DataFrame) -> std::result::Result<Vec<BfantTiltRow>, SchemaError> {
    const TABLE: &str = "bfant_tilt";
    let cell_name = column(df, TABLE, "cell_name")?;
    let system = column(df, TABLE, "system")?;
    let local_cell_id = column(df, TABLE, "local_cell_id")?;
    let bfant_name = column(df, TABLE, "bfant_name")?;
    let device_no = column(df, TABLE, "device_no")?;
    let subrack = column(df, TABLE, "connect_rru_subrack_no")?;
    let cellphy_id = column(df, TABLE, "local_cell_id_cellphy")?;
    let date_col = column(df, TABLE, "date")?;
    let tilt = column(df, TABLE, "tilt")?;

    Ok((0..df.height())
        .map(|i| BfantTiltRow {
            cell_name: text(cell_name, i),
            system: text(system, i),
            local_cell_id: text(local_cell_id, i),
            bfant_name: text(bfant_name, i),
            device_no: text(device_no, i),
            connect_rru_subrack_no: text(subrack, i),
            local_cell_id_cellphy: text(cellphy_id, i),
            date: date(date_col, i),
            tilt: number(tilt, i),
        })
        .collect())
}

pub fn nr_beam_rows(df: &DataFrame) -> std::result::Result<Vec<NrBeamTiltRow>, SchemaError> {
    const TABLE: &str = "nr_tilt";
    let nr_cell_name = column(df, TABLE, "nr_cell_name")?;
    let system = column(df, TABLE, "system")?;
    let nr_du_cell_id = column(df, TABLE, "nr_du_cell_id")?;
    let beam_name = column(df, TABLE, "nrducelltrpbeam_name")?;
    let trp_id = column(df, TABLE, "nr_du_cell_trp_id")?;
    let date_col = column(df, TABLE, "date")?;
    let tilt = column(df, TABLE, "tilt")?;

    Ok((0..df.height())
        .map(|i| NrBeamTiltRow {
            nr_cell_name: text(nr_cell_name, i),
            system: text(system, i),
            nr_du_cell_id: text(nr_du_cell_id, i),
            trp_beam_name: text(beam_name, i),
            nr_du_cell_trp_id: text(trp_id, i),
            date: date(date_col, i),
            tilt: number(tilt, i),
        })
        .collect())
}

pub fn split_rows(df: &DataFrame) -> std::result::Result<Vec<SplitTiltRow>, SchemaError> {
    const TABLE: &str = "split_tilt";
    let cell_name = column(df, TABLE, "cell_name")?;
    let system = column(df, TABLE, "system")?;
    let local_cell_id = column(df, TABLE, "local_cell_id")?;
    let splitcell_name = column(df, TABLE, "splitcell_name")?;
    let splitcell_local_cell_id = column(df, TABLE, "splitcell_local_cell_id")?;
    let date_col = column(df, TABLE, "date")?;
    let tilt = column(df, TABLE, "cell_beam_tilt")?;

    Ok((0..df.height())
        .map(|i| SplitTiltRow {
            cell_name: text(cell_name, i),
            system: text(system, i),
            local_cell_id: text(local_cell_id, i),
            splitcell_name: text(splitcell_name, i),
            splitcell_local_cell_id: text(splitcell_local_cell_id, i),
            date: date(date_col, i),
            cell_beam_tilt: number(tilt, i),
        })
        .collect())
}

// ---------- scope filters (the query layer's WHERE clauses) ----------

/// Restricts serving-cell rows to the inventory's site set (`site IN (...)`).
pub fn filter_cells_by_site(rows: Vec<LteCellRow>, sites: &HashSet<String>) -> Vec<LteCellRow> {
    rows.into_iter().filter(|r| sites.contains(&r.site)).collect()
}

pub fn filter_nr_cells_by_site(rows: Vec<NrCellRow>, sites: &HashSet<String>) -> Vec<NrCellRow> {
    rows.into_iter()
        .filter(|r| sites.contains(&r.site_id))
        .collect()
}

/// Restricts Ericsson rows by node prefix (`left(nodeid, 7) IN (...)`).
pub fn filter_air_by_site(rows: Vec<RawAirRow>, sites: &HashSet<String>) -> Vec<RawAirRow> {
    rows.into_iter().filter(|r| sites.contains(&r.site)).collect()
}

pub fn filter_non_air_by_site(
    rows: Vec<RawNonAirRow>,
    sites: &HashSet<String>,
) -> Vec<RawNonAirRow> {
    rows.into_iter().filter(|r| sites.contains(&r.site)).collect()
}

/// Restricts Huawei rows by site name (`site_name IN (...)`).
pub fn filter_huawei_by_site(
    rows: Vec<RawHuaweiRow>,
    sites: &HashSet<String>,
) -> Vec<RawHuaweiRow> {
    rows.into_iter()
        .filter(|r| sites.contains(&r.site_name))
        .collect()
}

/// Keeps rows whose observation date falls inside the configured window,
/// used by the no-map and auxiliary tilt paths.
pub fn within_window<T>(
    rows: Vec<T>,
    date_of: impl Fn(&T) -> Option<NaiveDate>,
    start: NaiveDate,
    end: NaiveDate,
) -> Vec<T> {
    rows.into_iter()
        .filter(|r| date_of(r).map(|d| d >= start && d <= end).unwrap_or(false))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn air_frame() -> DataFrame {
        DataFrame::new(vec![
            Column::new("nodeid".into(), vec!["ABC1234L21", "XYZ9876L23"]),
            Column::new("sectorcarrierid".into(), vec!["23", "11"]),
            Column::new("date".into(), vec!["2025-07-01", "not-a-date"]),
            Column::new("digitaltilt".into(), vec!["40", ""]),
        ])
        .unwrap()
    }

    #[test]
    fn test_air_rows_extraction() {
        let rows = air_rows(&air_frame()).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].site, "ABC1234");
        assert_eq!(rows[0].digital_tilt, Some(40.0));
        // bad cells degrade to null fields, not errors
        assert_eq!(rows[1].date, None);
        assert_eq!(rows[1].digital_tilt, None);
    }

    #[test]
    fn test_missing_column_is_a_schema_error() {
        let df = DataFrame::new(vec![Column::new(
            "nodeid".into(),
            vec!["ABC1234L21"],
        )])
        .unwrap();
        let err = air_rows(&df).unwrap_err();
        let message = err.to_string();
        assert!(message.contains("eric_air"));
        assert!(message.contains("sectorcarrierid"));
    }

    #[test]
    fn test_site_filters() {
        let rows = air_rows(&air_frame()).unwrap();
        let sites: HashSet<String> = ["ABC1234".to_string()].into_iter().collect();
        let kept = filter_air_by_site(rows, &sites);
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].nodeid, "ABC1234L21");
    }

    #[test]
    fn test_date_window_filter() {
        let rows = air_rows(&air_frame()).unwrap();
        let start = NaiveDate::from_ymd_opt(2025, 7, 1).unwrap();
        let end = NaiveDate::from_ymd_opt(2025, 7, 14).unwrap();
        let kept = within_window(rows, |r| r.date, start, end);
        assert_eq!(kept.len(), 1);
    }
}
