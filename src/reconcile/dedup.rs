use chrono::NaiveDate;
use std::collections::{BTreeMap, HashMap};
use std::hash::Hash;

use crate::models::{
    AirDevice, HwDevice, NonAirDevice, RawAirRow, RawHuaweiRow, RawNonAirRow, TiltSeries,
};

/// Keeps the most recent observation per device key. The upstream source
/// performs this selection with a window function; the mapped-path tables
/// must go through this reducer before normalization. Ties on date keep the
/// first row seen.
pub fn latest_per_key<T, K>(
    rows: &[T],
    key: impl Fn(&T) -> K,
    date: impl Fn(&T) -> Option<NaiveDate>,
) -> Vec<T>
where
    T: Clone,
    K: Eq + Hash,
{
    let mut best: HashMap<K, usize> = HashMap::new();
    for (i, row) in rows.iter().enumerate() {
        match best.get(&key(row)) {
            Some(&kept) if date(&rows[kept]) >= date(row) => {}
            _ => {
                best.insert(key(row), i);
            }
        }
    }
    let mut surviving: Vec<usize> = best.into_values().collect();
    surviving.sort_unstable();
    surviving.into_iter().map(|i| rows[i].clone()).collect()
}

/// Collapses long AIR rows (one per observation date) into per-device rows
/// with a date-keyed tilt series, ordered by device identity.
pub fn collapse_air(rows: &[RawAirRow]) -> Vec<AirDevice> {
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
        .map(|((site, nodeid, sectorcarrierid), tilt)| AirDevice {
            site,
            nodeid,
            sectorcarrierid,
            tilt,
        })
        .collect()
}

pub fn collapse_non_air(rows: &[RawNonAirRow]) -> Vec<NonAirDevice> {
    type Key = (
        String,
        String,
        String,
        String,
        String,
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
                row.userlabel.clone(),
                row.antennaunitgroupid.clone(),
                row.antennanearunitid.clone(),
                row.retsubunitid.clone(),
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
        .map(|(key, tilt)| NonAirDevice {
            site: key.0,
            nodeid: key.1,
            userlabel: key.2,
            antennaunitgroupid: key.3,
            antennanearunitid: key.4,
            retsubunitid: key.5,
            antennamodelnumber: key.6,
            min_tilt: key.7,
            max_tilt: key.8,
            tilt,
        })
        .collect()
}

pub fn collapse_huawei(rows: &[RawHuaweiRow]) -> Vec<HwDevice> {
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
        .map(|(key, tilt)| HwDevice {
            site_name: key.0,
            name: key.1,
            device_name: key.2,
            device_no: key.3,
            subunit_no: key.4,
            max_tilt: key.5,
            min_tilt: key.6,
            tilt,
        })
        .collect()
}
