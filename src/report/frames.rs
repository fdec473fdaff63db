use anyhow::Result;
use chrono::NaiveDate;
use polars::prelude::*;
use std::collections::BTreeSet;

use crate::models::{
    BfantWideRow, LteCrossCheckRow, MappedAirRow, MappedHwRow, MappedNonAirRow, NoMapAirRow,
    NoMapHwRow, NoMapNonAirRow, NrBeamWideRow, NrCrossCheckRow, SplitWideRow, TiltSeries,
};

/// Distinct observation dates across a report, ascending. Each becomes one
/// CSV column in the wide layout.
fn date_union<'a>(series: impl Iterator<Item = &'a TiltSeries>) -> Vec<NaiveDate> {
    let mut dates = BTreeSet::new();
    for s in series {
        dates.extend(s.keys().copied());
    }
    dates.into_iter().collect()
}

fn push_date_columns(columns: &mut Vec<Column>, tilts: &[&TiltSeries], dates: &[NaiveDate]) {
    for date in dates {
        let values: Vec<Option<f64>> = tilts
            .iter()
            .map(|t| t.get(date).copied().flatten())
            .collect();
        columns.push(Column::new(
            date.format("%Y-%m-%d").to_string().into(),
            values,
        ));
    }
}

fn str_col(name: &str, values: impl Iterator<Item = String>) -> Column {
    Column::new(name.into(), values.collect::<Vec<_>>())
}

fn opt_str_col(name: &str, values: impl Iterator<Item = Option<String>>) -> Column {
    Column::new(name.into(), values.collect::<Vec<_>>())
}

fn u32_col(name: &str, values: impl Iterator<Item = u32>) -> Column {
    Column::new(name.into(), values.collect::<Vec<_>>())
}

fn opt_u32_col(name: &str, values: impl Iterator<Item = Option<u32>>) -> Column {
    Column::new(name.into(), values.collect::<Vec<_>>())
}

fn opt_i64_col(name: &str, values: impl Iterator<Item = Option<i64>>) -> Column {
    Column::new(name.into(), values.collect::<Vec<_>>())
}

fn i64_col(name: &str, values: impl Iterator<Item = i64>) -> Column {
    Column::new(name.into(), values.collect::<Vec<_>>())
}

pub fn air_map_frame(rows: &[MappedAirRow]) -> Result<DataFrame> {
    let tilts: Vec<&TiltSeries> = rows.iter().map(|r| &r.device.tilt).collect();
    let dates = date_union(tilts.iter().copied());

    let mut columns = vec![
        str_col("site", rows.iter().map(|r| r.cell.cell.site.clone())),
        str_col("site_id", rows.iter().map(|r| r.cell.cell.site_id.clone())),
        str_col("cell_name", rows.iter().map(|r| r.cell.cell.cell_name.clone())),
        str_col("system", rows.iter().map(|r| r.cell.cell.system.clone())),
        str_col("sector_name", rows.iter().map(|r| r.cell.cell.sector_name.clone())),
        str_col("antenna_type", rows.iter().map(|r| r.cell.cell.antenna_type.clone())),
        str_col("vendor", rows.iter().map(|r| r.cell.cell.vendor.clone())),
        str_col("mtilt", rows.iter().map(|r| r.cell.cell.mtilt.clone())),
        str_col("height", rows.iter().map(|r| r.cell.cell.height.clone())),
        str_col("xtxr", rows.iter().map(|r| r.cell.cell.xtxr.clone())),
        str_col("local_cell_id", rows.iter().map(|r| r.cell.cell.local_cell_id.clone())),
        str_col("rat", rows.iter().map(|r| r.cell.cell.rat.clone())),
        opt_u32_col("carrier", rows.iter().map(|r| r.cell.carrier)),
        opt_u32_col("sector", rows.iter().map(|r| r.cell.sector)),
        opt_str_col(
            "sector_type",
            rows.iter().map(|r| r.cell.sector_type.map(String::from)),
        ),
        str_col("tuning_band", rows.iter().map(|r| r.cell.tuning_band.to_string())),
        str_col("nodeid", rows.iter().map(|r| r.device.nodeid.clone())),
        str_col("sectorcarrierid", rows.iter().map(|r| r.device.sectorcarrierid.clone())),
        u32_col("score", rows.iter().map(|r| r.device.score as u32)),
        str_col("advice", rows.iter().map(|r| r.device.advice.to_string())),
        str_col("Parameter MO", rows.iter().map(|r| r.parameter_mo.clone())),
        str_col("Parameter Name", rows.iter().map(|r| r.parameter_name.clone())),
    ];
    push_date_columns(&mut columns, &tilts, &dates);
    Ok(DataFrame::new(columns)?)
}

pub fn non_air_map_frame(rows: &[MappedNonAirRow]) -> Result<DataFrame> {
    let tilts: Vec<&TiltSeries> = rows.iter().map(|r| &r.device.tilt).collect();
    let dates = date_union(tilts.iter().copied());

    let mut columns = vec![
        str_col("site", rows.iter().map(|r| r.cell.cell.site.clone())),
        str_col("site_id", rows.iter().map(|r| r.cell.cell.site_id.clone())),
        str_col("cell_name", rows.iter().map(|r| r.cell.cell.cell_name.clone())),
        str_col("system", rows.iter().map(|r| r.cell.cell.system.clone())),
        str_col("sector_name", rows.iter().map(|r| r.cell.cell.sector_name.clone())),
        str_col("antenna_type", rows.iter().map(|r| r.cell.cell.antenna_type.clone())),
        str_col("vendor", rows.iter().map(|r| r.cell.cell.vendor.clone())),
        str_col("mtilt", rows.iter().map(|r| r.cell.cell.mtilt.clone())),
        str_col("height", rows.iter().map(|r| r.cell.cell.height.clone())),
        str_col("xtxr", rows.iter().map(|r| r.cell.cell.xtxr.clone())),
        str_col("local_cell_id", rows.iter().map(|r| r.cell.cell.local_cell_id.clone())),
        str_col("rat", rows.iter().map(|r| r.cell.cell.rat.clone())),
        opt_u32_col("carrier", rows.iter().map(|r| r.cell.carrier)),
        opt_u32_col("sector", rows.iter().map(|r| r.cell.sector)),
        opt_str_col(
            "sector_type",
            rows.iter().map(|r| r.cell.sector_type.map(String::from)),
        ),
        str_col("tuning_band", rows.iter().map(|r| r.cell.tuning_band.to_string())),
        str_col("nodeid", rows.iter().map(|r| r.device.nodeid.clone())),
        str_col("userlabel", rows.iter().map(|r| r.device.userlabel.clone())),
        str_col(
            "antennaunitgroupid",
            rows.iter().map(|r| r.device.antennaunitgroupid.clone()),
        ),
        opt_i64_col(
            "antennanearunitid",
            rows.iter().map(|r| r.device.antennanearunitid),
        ),
        opt_i64_col("retsubunitid", rows.iter().map(|r| r.device.retsubunitid)),
        str_col(
            "antennamodelnumber",
            rows.iter().map(|r| r.device.antennamodelnumber.clone()),
        ),
        str_col("mintilt", rows.iter().map(|r| r.device.min_tilt.clone())),
        str_col("maxtilt", rows.iter().map(|r| r.device.max_tilt.clone())),
        u32_col("usage", rows.iter().map(|r| r.device.usage as u32)),
        str_col("advice", rows.iter().map(|r| r.device.advice.to_string())),
        str_col("Parameter MO", rows.iter().map(|r| r.device.parameter_mo.clone())),
        str_col(
            "Parameter Name",
            rows.iter().map(|r| r.device.parameter_name.clone()),
        ),
    ];
    push_date_columns(&mut columns, &tilts, &dates);
    Ok(DataFrame::new(columns)?)
}

pub fn hwret_map_frame(rows: &[MappedHwRow]) -> Result<DataFrame> {
    let tilts: Vec<&TiltSeries> = rows.iter().map(|r| &r.device.tilt).collect();
    let dates = date_union(tilts.iter().copied());

    let mut columns = vec![
        str_col("site", rows.iter().map(|r| r.cell.cell.site.clone())),
        str_col("site_id", rows.iter().map(|r| r.cell.cell.site_id.clone())),
        str_col("cell_name", rows.iter().map(|r| r.cell.cell.cell_name.clone())),
        str_col("system", rows.iter().map(|r| r.cell.cell.system.clone())),
        str_col("sector_name", rows.iter().map(|r| r.cell.cell.sector_name.clone())),
        str_col("antenna_type", rows.iter().map(|r| r.cell.cell.antenna_type.clone())),
        str_col("vendor", rows.iter().map(|r| r.cell.cell.vendor.clone())),
        str_col("mtilt", rows.iter().map(|r| r.cell.cell.mtilt.clone())),
        str_col("height", rows.iter().map(|r| r.cell.cell.height.clone())),
        str_col("xtxr", rows.iter().map(|r| r.cell.cell.xtxr.clone())),
        str_col("local_cell_id", rows.iter().map(|r| r.cell.cell.local_cell_id.clone())),
        str_col("rat", rows.iter().map(|r| r.cell.cell.rat.clone())),
        opt_u32_col("carrier", rows.iter().map(|r| r.cell.carrier)),
        opt_u32_col("sector", rows.iter().map(|r| r.cell.sector)),
        opt_str_col(
            "sector_type",
            rows.iter().map(|r| r.cell.sector_type.map(String::from)),
        ),
        str_col("tuning_band", rows.iter().map(|r| r.cell.tuning_band.to_string())),
        str_col("name", rows.iter().map(|r| r.device.name.clone())),
        str_col("device_name", rows.iter().map(|r| r.device.device_name.clone())),
        str_col("device_no", rows.iter().map(|r| r.device.device_no.clone())),
        str_col("subunit_no", rows.iter().map(|r| r.device.subunit_no.clone())),
        str_col("max_tilt", rows.iter().map(|r| r.device.max_tilt.clone())),
        str_col("min_tilt", rows.iter().map(|r| r.device.min_tilt.clone())),
        u32_col("usage", rows.iter().map(|r| r.device.usage as u32)),
        str_col("advice", rows.iter().map(|r| r.device.advice.to_string())),
    ];
    push_date_columns(&mut columns, &tilts, &dates);
    Ok(DataFrame::new(columns)?)
}

pub fn lte_crosscheck_frame(rows: &[LteCrossCheckRow]) -> Result<DataFrame> {
    let columns = vec![
        str_col(
            "requested_cell_name",
            rows.iter().map(|r| r.requested_cell_name.clone()),
        ),
        opt_str_col("site", rows.iter().map(|r| r.cell.as_ref().map(|c| c.site.clone()))),
        opt_str_col(
            "site_id",
            rows.iter().map(|r| r.cell.as_ref().map(|c| c.site_id.clone())),
        ),
        opt_str_col(
            "cell_name",
            rows.iter().map(|r| r.cell.as_ref().map(|c| c.cell_name.clone())),
        ),
        opt_str_col(
            "system",
            rows.iter().map(|r| r.cell.as_ref().map(|c| c.system.clone())),
        ),
        opt_str_col(
            "sector_name",
            rows.iter().map(|r| r.cell.as_ref().map(|c| c.sector_name.clone())),
        ),
        opt_str_col(
            "antenna_type",
            rows.iter().map(|r| r.cell.as_ref().map(|c| c.antenna_type.clone())),
        ),
        opt_str_col(
            "vendor",
            rows.iter().map(|r| r.cell.as_ref().map(|c| c.vendor.clone())),
        ),
        opt_str_col(
            "mtilt",
            rows.iter().map(|r| r.cell.as_ref().map(|c| c.mtilt.clone())),
        ),
        opt_str_col(
            "height",
            rows.iter().map(|r| r.cell.as_ref().map(|c| c.height.clone())),
        ),
        opt_str_col(
            "xtxr",
            rows.iter().map(|r| r.cell.as_ref().map(|c| c.xtxr.clone())),
        ),
        opt_str_col(
            "local_cell_id",
            rows.iter().map(|r| r.cell.as_ref().map(|c| c.local_cell_id.clone())),
        ),
        opt_str_col(
            "rat",
            rows.iter().map(|r| r.cell.as_ref().map(|c| c.rat.clone())),
        ),
        opt_str_col(
            "tuning_band",
            rows.iter().map(|r| r.tuning_band.map(|b| b.to_string())),
        ),
        str_col("status", rows.iter().map(|r| r.status.to_string())),
        str_col("suggestion", rows.iter().map(|r| r.suggestion.to_string())),
    ];
    Ok(DataFrame::new(columns)?)
}

pub fn nr_crosscheck_frame(rows: &[NrCrossCheckRow]) -> Result<DataFrame> {
    let columns = vec![
        str_col(
            "requested_cell_name",
            rows.iter().map(|r| r.requested_cell_name.clone()),
        ),
        opt_str_col(
            "vendor",
            rows.iter().map(|r| r.cell.as_ref().map(|c| c.vendor.clone())),
        ),
        opt_str_col(
            "site_id",
            rows.iter().map(|r| r.cell.as_ref().map(|c| c.site_id.clone())),
        ),
        opt_str_col(
            "gnodeb_name",
            rows.iter().map(|r| r.cell.as_ref().map(|c| c.gnodeb_name.clone())),
        ),
        opt_str_col(
            "sector_name",
            rows.iter().map(|r| r.cell.as_ref().map(|c| c.sector_name.clone())),
        ),
        opt_str_col(
            "cell_name",
            rows.iter().map(|r| r.cell.as_ref().map(|c| c.cell_name.clone())),
        ),
        opt_str_col(
            "local_cell_id",
            rows.iter().map(|r| r.cell.as_ref().map(|c| c.local_cell_id.clone())),
        ),
        opt_str_col(
            "system",
            rows.iter().map(|r| r.cell.as_ref().map(|c| c.system.clone())),
        ),
        opt_str_col(
            "xtxr",
            rows.iter().map(|r| r.cell.as_ref().map(|c| c.xtxr.clone())),
        ),
        opt_str_col(
            "antenna_type",
            rows.iter().map(|r| r.cell.as_ref().map(|c| c.antenna_type.clone())),
        ),
        opt_str_col(
            "rat",
            rows.iter().map(|r| r.cell.as_ref().map(|c| c.rat.clone())),
        ),
        opt_str_col(
            "tuning_band",
            rows.iter().map(|r| r.tuning_band.map(|b| b.to_string())),
        ),
        str_col("status", rows.iter().map(|r| r.status.to_string())),
        str_col("suggestion", rows.iter().map(|r| r.suggestion.to_string())),
    ];
    Ok(DataFrame::new(columns)?)
}

pub fn hw_no_map_frame(rows: &[NoMapHwRow]) -> Result<DataFrame> {
    let tilts: Vec<&TiltSeries> = rows.iter().map(|r| &r.tilt).collect();
    let dates = date_union(tilts.iter().copied());

    let mut columns = vec![
        str_col("file_type", rows.iter().map(|r| r.file_type.clone())),
        str_col("site_name", rows.iter().map(|r| r.site_name.clone())),
        str_col("name", rows.iter().map(|r| r.name.clone())),
        str_col("device_name", rows.iter().map(|r| r.device_name.clone())),
        str_col("device_no", rows.iter().map(|r| r.device_no.clone())),
        str_col("subunit_no", rows.iter().map(|r| r.subunit_no.clone())),
        str_col("MO", rows.iter().map(|r| r.mo.clone())),
        str_col("Parameter", rows.iter().map(|r| r.parameter.clone())),
        str_col("max_tilt", rows.iter().map(|r| r.max_tilt.clone())),
        str_col("min_tilt", rows.iter().map(|r| r.min_tilt.clone())),
    ];
    push_date_columns(&mut columns, &tilts, &dates);
    Ok(DataFrame::new(columns)?)
}

pub fn air_no_map_frame(rows: &[NoMapAirRow]) -> Result<DataFrame> {
    let tilts: Vec<&TiltSeries> = rows.iter().map(|r| &r.tilt).collect();
    let dates = date_union(tilts.iter().copied());

    let mut columns = vec![
        str_col("file_type", rows.iter().map(|r| r.file_type.clone())),
        str_col("site_name", rows.iter().map(|r| r.site_name.clone())),
        str_col("nodeid", rows.iter().map(|r| r.nodeid.clone())),
        str_col(
            "sectorcarrierid",
            rows.iter().map(|r| r.sectorcarrierid.clone()),
        ),
        str_col("MO", rows.iter().map(|r| r.mo.clone())),
        str_col("Parameter", rows.iter().map(|r| r.parameter.clone())),
    ];
    push_date_columns(&mut columns, &tilts, &dates);
    Ok(DataFrame::new(columns)?)
}

pub fn non_air_no_map_frame(rows: &[NoMapNonAirRow]) -> Result<DataFrame> {
    let tilts: Vec<&TiltSeries> = rows.iter().map(|r| &r.tilt).collect();
    let dates = date_union(tilts.iter().copied());

    let mut columns = vec![
        str_col("file_type", rows.iter().map(|r| r.file_type.clone())),
        str_col("site_name", rows.iter().map(|r| r.site_name.clone())),
        str_col("nodeid", rows.iter().map(|r| r.nodeid.clone())),
        str_col(
            "normalizedantennaunitgroupid",
            rows.iter().map(|r| r.antennaunitgroupid.clone()),
        ),
        i64_col(
            "antennanearunitid",
            rows.iter().map(|r| r.antennanearunitid),
        ),
        i64_col("retsubunitid", rows.iter().map(|r| r.retsubunitid)),
        str_col("userlabel", rows.iter().map(|r| r.userlabel.clone())),
        str_col(
            "antennamodelnumber",
            rows.iter().map(|r| r.antennamodelnumber.clone()),
        ),
        str_col("mintilt", rows.iter().map(|r| r.min_tilt.clone())),
        str_col("maxtilt", rows.iter().map(|r| r.max_tilt.clone())),
        str_col("MO", rows.iter().map(|r| r.mo.clone())),
        str_col("Parameter", rows.iter().map(|r| r.parameter.clone())),
    ];
    push_date_columns(&mut columns, &tilts, &dates);
    Ok(DataFrame::new(columns)?)
}

pub fn bfant_frame(rows: &[BfantWideRow]) -> Result<DataFrame> {
    let tilts: Vec<&TiltSeries> = rows.iter().map(|r| &r.tilt).collect();
    let dates = date_union(tilts.iter().copied());

    let mut columns = vec![
        str_col("cell_name", rows.iter().map(|r| r.cell_name.clone())),
        str_col("system", rows.iter().map(|r| r.system.clone())),
        str_col("local_cell_id", rows.iter().map(|r| r.local_cell_id.clone())),
        str_col("bfant_name", rows.iter().map(|r| r.bfant_name.clone())),
        str_col("device_no", rows.iter().map(|r| r.device_no.clone())),
        str_col(
            "connect_rru_subrack_no",
            rows.iter().map(|r| r.connect_rru_subrack_no.clone()),
        ),
        str_col(
            "local_cell_id_cellphy",
            rows.iter().map(|r| r.local_cell_id_cellphy.clone()),
        ),
    ];
    push_date_columns(&mut columns, &tilts, &dates);
    Ok(DataFrame::new(columns)?)
}

pub fn nr_beam_frame(rows: &[NrBeamWideRow]) -> Result<DataFrame> {
    let tilts: Vec<&TiltSeries> = rows.iter().map(|r| &r.tilt).collect();
    let dates = date_union(tilts.iter().copied());

    let mut columns = vec![
        str_col("nr_cell_name", rows.iter().map(|r| r.nr_cell_name.clone())),
        str_col("system", rows.iter().map(|r| r.system.clone())),
        str_col("nr_du_cell_id", rows.iter().map(|r| r.nr_du_cell_id.clone())),
        str_col(
            "nrducelltrpbeam_name",
            rows.iter().map(|r| r.trp_beam_name.clone()),
        ),
        str_col(
            "nr_du_cell_trp_id",
            rows.iter().map(|r| r.nr_du_cell_trp_id.clone()),
        ),
    ];
    push_date_columns(&mut columns, &tilts, &dates);
    Ok(DataFrame::new(columns)?)
}

pub fn split_frame(rows: &[SplitWideRow]) -> Result<DataFrame> {
    let tilts: Vec<&TiltSeries> = rows.iter().map(|r| &r.tilt).collect();
    let dates = date_union(tilts.iter().copied());

    let mut columns = vec![
        str_col("cell_name", rows.iter().map(|r| r.cell_name.clone())),
        str_col("system", rows.iter().map(|r| r.system.clone())),
        str_col("local_cell_id", rows.iter().map(|r| r.local_cell_id.clone())),
        str_col("splitcell_name", rows.iter().map(|r| r.splitcell_name.clone())),
        str_col(
            "splitcell_local_cell_id",
            rows.iter().map(|r| r.splitcell_local_cell_id.clone()),
        ),
    ];
    push_date_columns(&mut columns, &tilts, &dates);
    Ok(DataFrame::new(columns)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{NoMapAirRow, TiltSeries};

    #[test]
    fn test_wide_frame_has_one_column_per_date_ascending() {
        let mut tilt_a = TiltSeries::new();
        tilt_a.insert(NaiveDate::from_ymd_opt(2025, 7, 8).unwrap(), Some(60.0));
        let mut tilt_b = TiltSeries::new();
        tilt_b.insert(NaiveDate::from_ymd_opt(2025, 7, 1).unwrap(), Some(40.0));

        let rows = vec![
            NoMapAirRow {
                file_type: "eric_air".to_string(),
                site_name: "ABC1234".to_string(),
                nodeid: "ABC1234L21".to_string(),
                sectorcarrierid: "23".to_string(),
                mo: "SectorCarrier=23".to_string(),
                parameter: "digitalTilt".to_string(),
                tilt: tilt_a,
            },
            NoMapAirRow {
                file_type: "eric_air".to_string(),
                site_name: "ABC1234".to_string(),
                nodeid: "ABC1234L21".to_string(),
                sectorcarrierid: "11".to_string(),
                mo: "SectorCarrier=11".to_string(),
                parameter: "digitalTilt".to_string(),
                tilt: tilt_b,
            },
        ];
        let df = air_no_map_frame(&rows).unwrap();
        let names: Vec<String> = df
            .get_column_names()
            .iter()
            .map(|s| s.to_string())
            .collect();
        assert_eq!(
            &names[names.len() - 2..],
            &["2025-07-01".to_string(), "2025-07-08".to_string()]
        );
        assert_eq!(df.height(), 2);
    }

    #[test]
    fn test_empty_report_still_builds() {
        let df = hw_no_map_frame(&[]).unwrap();
        assert_eq!(df.height(), 0);
        assert!(df.get_column_names().iter().any(|c| c.as_str() == "MO"));
    }
}
