use chrono::NaiveDate;
use std::collections::BTreeMap;

use crate::models::taxonomy::{Advice, MatchStatus, Suggestion, TuningBand};

/// Tilt observations per device, keyed by observation date.
pub type TiltSeries = BTreeMap<NaiveDate, Option<f64>>;

// ---------- inventory ----------

/// One row of the site/cell tuning list.
#[derive(Debug, Clone, PartialEq)]
pub struct InventoryRow {
    pub cell_name: String,
    /// Site code parsed out of the cell name (`No Site Name` when absent).
    pub site_name: String,
}

/// Inventory row after the left join against the serving-cell tables.
#[derive(Debug, Clone, PartialEq)]
pub struct EnrichedInventoryRow {
    pub cell_name: String,
    pub site_name: String,
    pub site_id: Option<String>,
    pub system: Option<String>,
    pub sector_name: Option<String>,
    pub rat: Option<String>,
}

// ---------- serving cells ----------

#[derive(Debug, Clone, PartialEq)]
pub struct LteCellRow {
    pub site: String,
    pub site_id: String,
    pub cell_name: String,
    pub system: String,
    pub sector_name: String,
    pub antenna_type: String,
    pub vendor: String,
    pub mtilt: String,
    pub height: String,
    pub xtxr: String,
    pub local_cell_id: String,
    pub rat: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NrCellRow {
    pub vendor: String,
    pub site_id: String,
    pub gnodeb_name: String,
    pub sector_name: String,
    pub cell_name: String,
    pub local_cell_id: String,
    pub system: String,
    pub xtxr: String,
    pub antenna_type: String,
    pub rat: String,
}

/// Serving LTE cell with the canonical join key derived from its name.
#[derive(Debug, Clone, PartialEq)]
pub struct LteCellKey {
    pub cell: LteCellRow,
    pub carrier: Option<u32>,
    pub sector: Option<u32>,
    pub sector_type: Option<char>,
    pub tuning_band: TuningBand,
}

// ---------- raw vendor tables (one row per observation date) ----------

#[derive(Debug, Clone, PartialEq)]
pub struct RawAirRow {
    pub site: String,
    pub nodeid: String,
    pub sectorcarrierid: String,
    pub date: Option<NaiveDate>,
    pub digital_tilt: Option<f64>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RawNonAirRow {
    pub site: String,
    pub nodeid: String,
    pub userlabel: String,
    pub antennaunitgroupid: String,
    pub antennanearunitid: String,
    pub retsubunitid: String,
    pub antennamodelnumber: String,
    pub min_tilt: String,
    pub max_tilt: String,
    pub date: Option<NaiveDate>,
    pub electrical_tilt: Option<f64>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RawHuaweiRow {
    pub site_name: String,
    pub name: String,
    pub device_name: String,
    pub device_no: String,
    pub subunit_no: String,
    pub max_tilt: String,
    pub min_tilt: String,
    pub date: Option<NaiveDate>,
    pub actual_tilt: Option<f64>,
}

// ---------- auxiliary tilt-topology tables ----------

#[derive(Debug, Clone, PartialEq)]
pub struct BfantTiltRow {
    pub cell_name: String,
    pub system: String,
    pub local_cell_id: String,
    pub bfant_name: String,
    pub device_no: String,
    pub connect_rru_subrack_no: String,
    pub local_cell_id_cellphy: String,
    pub date: Option<NaiveDate>,
    pub tilt: Option<f64>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NrBeamTiltRow {
    pub nr_cell_name: String,
    pub system: String,
    pub nr_du_cell_id: String,
    pub trp_beam_name: String,
    pub nr_du_cell_trp_id: String,
    pub date: Option<NaiveDate>,
    pub tilt: Option<f64>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SplitTiltRow {
    pub cell_name: String,
    pub system: String,
    pub local_cell_id: String,
    pub splitcell_name: String,
    pub splitcell_local_cell_id: String,
    pub date: Option<NaiveDate>,
    pub cell_beam_tilt: Option<f64>,
}

// ---------- per-device rows (observations collapsed into a series) ----------

#[derive(Debug, Clone, PartialEq)]
pub struct AirDevice {
    pub site: String,
    pub nodeid: String,
    pub sectorcarrierid: String,
    pub tilt: TiltSeries,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NonAirDevice {
    pub site: String,
    pub nodeid: String,
    pub userlabel: String,
    pub antennaunitgroupid: String,
    pub antennanearunitid: String,
    pub retsubunitid: String,
    pub antennamodelnumber: String,
    pub min_tilt: String,
    pub max_tilt: String,
    pub tilt: TiltSeries,
}

#[derive(Debug, Clone, PartialEq)]
pub struct HwDevice {
    pub site_name: String,
    pub name: String,
    pub device_name: String,
    pub device_no: String,
    pub subunit_no: String,
    pub max_tilt: String,
    pub min_tilt: String,
    pub tilt: TiltSeries,
}

// ---------- normalized records ----------

#[derive(Debug, Clone, PartialEq)]
pub struct AirRecord {
    pub site: String,
    pub nodeid: String,
    pub sectorcarrierid: String,
    pub tuning_band: TuningBand,
    pub sector: Option<u32>,
    pub carrier: Option<u32>,
    pub score: u8,
    pub advice: Advice,
    pub tilt: TiltSeries,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NonAirRecord {
    pub site: String,
    pub nodeid: String,
    pub userlabel: String,
    pub antennaunitgroupid: String,
    pub antennanearunitid: Option<i64>,
    pub retsubunitid: Option<i64>,
    pub antennamodelnumber: String,
    pub min_tilt: String,
    pub max_tilt: String,
    pub tuning_band: TuningBand,
    pub sector: Option<u32>,
    pub parameter_mo: String,
    pub parameter_name: String,
    pub usage: u8,
    pub advice: Advice,
    pub tilt: TiltSeries,
}

#[derive(Debug, Clone, PartialEq)]
pub struct HwRetRecord {
    pub site: String,
    pub name: String,
    pub device_name: String,
    pub device_no: String,
    pub subunit_no: String,
    pub max_tilt: String,
    pub min_tilt: String,
    pub tuning_band: TuningBand,
    pub sector: Option<u32>,
    pub usage: u8,
    pub advice: Advice,
    pub tilt: TiltSeries,
}

// ---------- report rows ----------

#[derive(Debug, Clone, PartialEq)]
pub struct MappedAirRow {
    pub cell: LteCellKey,
    pub device: AirRecord,
    pub parameter_mo: String,
    pub parameter_name: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MappedNonAirRow {
    pub cell: LteCellKey,
    pub device: NonAirRecord,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MappedHwRow {
    pub cell: LteCellKey,
    pub device: HwRetRecord,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LteCrossCheckRow {
    pub requested_cell_name: String,
    pub cell: Option<LteCellRow>,
    pub tuning_band: Option<TuningBand>,
    pub status: MatchStatus,
    pub suggestion: Suggestion,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NrCrossCheckRow {
    pub requested_cell_name: String,
    pub cell: Option<NrCellRow>,
    pub tuning_band: Option<TuningBand>,
    pub status: MatchStatus,
    pub suggestion: Suggestion,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NoMapHwRow {
    pub file_type: String,
    pub site_name: String,
    pub name: String,
    pub device_name: String,
    pub device_no: String,
    pub subunit_no: String,
    pub mo: String,
    pub parameter: String,
    pub max_tilt: String,
    pub min_tilt: String,
    pub tilt: TiltSeries,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NoMapAirRow {
    pub file_type: String,
    pub site_name: String,
    pub nodeid: String,
    pub sectorcarrierid: String,
    pub mo: String,
    pub parameter: String,
    pub tilt: TiltSeries,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NoMapNonAirRow {
    pub file_type: String,
    pub site_name: String,
    pub nodeid: String,
    pub antennaunitgroupid: String,
    pub antennanearunitid: i64,
    pub retsubunitid: i64,
    pub userlabel: String,
    pub antennamodelnumber: String,
    pub min_tilt: String,
    pub max_tilt: String,
    pub mo: String,
    pub parameter: String,
    pub tilt: TiltSeries,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BfantWideRow {
    pub cell_name: String,
    pub system: String,
    pub local_cell_id: String,
    pub bfant_name: String,
    pub device_no: String,
    pub connect_rru_subrack_no: String,
    pub local_cell_id_cellphy: String,
    pub tilt: TiltSeries,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NrBeamWideRow {
    pub nr_cell_name: String,
    pub system: String,
    pub nr_du_cell_id: String,
    pub trp_beam_name: String,
    pub nr_du_cell_trp_id: String,
    pub tilt: TiltSeries,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SplitWideRow {
    pub cell_name: String,
    pub system: String,
    pub local_cell_id: String,
    pub splitcell_name: String,
    pub splitcell_local_cell_id: String,
    pub tilt: TiltSeries,
}
