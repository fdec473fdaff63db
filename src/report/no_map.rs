use std::collections::BTreeMap;

use crate::models::{
    NoMapAirRow, NoMapHwRow, NoMapNonAirRow, RawAirRow, RawHuaweiRow, RawNonAirRow, TiltSeries,
};
use crate::processor::non_air::{normalize_unit_group_id, parse_nullable_int};

/// The no-map reports carry every observed device in scope, regardless of
/// whether it reconciled against a serving cell: they are the superset the
/// mapped reports were cut from. Rows group per device with a date-keyed
/// tilt series for the wide CSV layout.
pub fn hw_no_map(rows: &[RawHuaweiRow]) -> Vec<NoMapHwRow> {
    type Key = (String, String, String, String, String, String, String);
    let mut grouped: BTreeMap<Key, TiltSeries> = BTreeMap::new();
    for row in rows {
        let series = grouped
            .entry((
                row.site_name.clone(),
                row.name.clone(),
                row.device_name.clone(),
                row.device_no.clone(),
                row.subunit_no.clone(),
                row.max_tilt.clone(),
                row.min_tilt.clone(),
            ))
            .or_default();
        if let Some(date) = row.date {
            series.insert(date, row.actual_tilt);
        }
    }
    grouped
        .into_iter()
        .map(|(key, tilt)| NoMapHwRow {
            file_type: "huawei".to_string(),
            site_name: key.0,
            name: key.1,
            device_name: key.2,
            device_no: key.3,
            subunit_no: key.4,
            mo: "RETSUBUNIT".to_string(),
            parameter: "Tilt".to_string(),
            max_tilt: key.5,
            min_tilt: key.6,
            tilt,
        })
        .collect()
}

pub fn air_no_map(rows: &[RawAirRow]) -> Vec<NoMapAirRow> {
    let mut grouped: BTreeMap<(String, String, String), TiltSeries> = BTreeMap::new();
    for row in rows {
        let series = grouped
            .entry((row.site.clone(), row.nodeid.clone(), row.sectorcarrierid.clone()))
            .or_default();
        if let Some(date) = row.date {
            series.insert(date, row.digital_tilt);
        }
    }
    grouped
        .into_iter()
        .map(|((site_name, nodeid, sectorcarrierid), tilt)| NoMapAirRow {
            file_type: "eric_air".to_string(),
            site_name,
            mo: format!("SectorCarrier={sectorcarrierid}"),
            parameter: "digitalTilt".to_string(),
            nodeid,
            sectorcarrierid,
            tilt,
        })
        .collect()
}

pub fn non_air_no_map(rows: &[RawNonAirRow]) -> Vec<NoMapNonAirRow> {
    type Key = (
        String,
        String,
        String,
        i64,
        i64,
        String,
        String,
        String,
        String,
    );
    let mut grouped: BTreeMap<Key, TiltSeries> = BTreeMap::new();
    for row in rows {
        let series = grouped
            .entry((
                row.site.clone(),
                row.nodeid.clone(),
                normalize_unit_group_id(&row.antennaunitgroupid),
                parse_nullable_int(&row.antennanearunitid).unwrap_or(0),
                parse_nullable_int(&row.retsubunitid).unwrap_or(0),
                row.userlabel.clone(),
                row.antennamodelnumber.clone(),
                row.min_tilt.clone(),
                row.max_tilt.clone(),
            ))
            .or_default();
        if let Some(date) = row.date {
            series.insert(date, row.electrical_tilt);
        }
    }
    grouped
        .into_iter()
        .map(|(key, tilt)| NoMapNonAirRow {
            file_type: "eric_non_air".to_string(),
            site_name: key.0,
            nodeid: key.1,
            // the no-map MO string historically carries a space before
            // RetSubUnit; downstream tooling expects it
            mo: format!(
                "AntennaUnitGroup={},AntennaNearUnit={}, RetSubUnit={}",
                key.2, key.3, key.4
            ),
            parameter: "electricalAntennaTilt".to_string(),
            antennaunitgroupid: key.2,
            antennanearunitid: key.3,
            retsubunitid: key.4,
            userlabel: key.5,
            antennamodelnumber: key.6,
            min_tilt: key.7,
            max_tilt: key.8,
            tilt,
        })
        .collect()
}
