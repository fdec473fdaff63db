use crate::models::{Advice, NonAirDevice, NonAirRecord, TuningBand};
use crate::processor::name_parser::NameParser;
use crate::processor::site_advice;

const PARAMETER_NAME: &str = "electricalAntennaTilt";

/// Normalizes the Ericsson non-AIR (mechanical RET) table. A single
/// `userlabel` can describe several antenna ports, so one raw row expands
/// into one record per band/sector pair found in the label.
pub struct NonAirNormalizer {
    parser: NameParser,
}

impl NonAirNormalizer {
    pub fn new() -> Self {
        NonAirNormalizer {
            parser: NameParser::new(),
        }
    }

    pub fn normalize(&self, devices: &[NonAirDevice]) -> Vec<NonAirRecord> {
        let mut records = Vec::with_capacity(devices.len());

        for device in devices {
            let usage = self.parser.label_usage(&device.userlabel);
            let group_id = normalize_unit_group_id(&device.antennaunitgroupid);
            let near_unit = parse_nullable_int(&device.antennanearunitid);
            let sub_unit = parse_nullable_int(&device.retsubunitid);
            let parameter_mo = format!(
                "AntennaUnitGroup={},AntennaNearUnit={},RetSubUnit={}",
                group_id,
                display_nullable(near_unit),
                display_nullable(sub_unit),
            );

            for pair in self.parser.parse_user_label(&device.userlabel) {
                records.push(NonAirRecord {
                    site: device.site.clone(),
                    nodeid: device.nodeid.clone(),
                    userlabel: device.userlabel.clone(),
                    antennaunitgroupid: group_id.clone(),
                    antennanearunitid: near_unit,
                    retsubunitid: sub_unit,
                    antennamodelnumber: device.antennamodelnumber.clone(),
                    min_tilt: device.min_tilt.clone(),
                    max_tilt: device.max_tilt.clone(),
                    tuning_band: pair.tuning_band.unwrap_or(TuningBand::Other),
                    sector: pair.sector,
                    parameter_mo: parameter_mo.clone(),
                    parameter_name: PARAMETER_NAME.to_string(),
                    usage,
                    advice: Advice::Ok,
                    tilt: device.tilt.clone(),
                });
            }
        }

        let advice = site_advice(records.iter().map(|r| (r.site.as_str(), r.usage)));
        for record in &mut records {
            if let Some(a) = advice.get(&record.site) {
                record.advice = *a;
            }
        }
        records
    }
}

impl Default for NonAirNormalizer {
    fn default() -> Self {
        Self::new()
    }
}

/// Unit ids arrive as CSV text and occasionally as floats (`"2.0"`).
pub(crate) fn parse_nullable_int(raw: &str) -> Option<i64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<i64>().ok().or_else(|| {
        trimmed
            .parse::<f64>()
            .ok()
            .filter(|f| f.fract() == 0.0)
            .map(|f| f as i64)
    })
}

fn display_nullable(value: Option<i64>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}

/// Numeric-looking group ids are collapsed to their integer form
/// (`"2.0"` -> `"2"`); anything else passes through untouched.
pub(crate) fn normalize_unit_group_id(raw: &str) -> String {
    let candidate = raw.replacen('.', "", 1);
    if !candidate.is_empty() && candidate.chars().all(|c| c.is_ascii_digit()) {
        if let Ok(value) = raw.parse::<f64>() {
            return (value as i64).to_string();
        }
    }
    raw.to_string()
}
