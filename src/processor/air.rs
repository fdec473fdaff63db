use crate::models::{Advice, AirDevice, AirRecord, TuningBand};
use crate::processor::name_parser::NameParser;
use crate::processor::site_advice;

/// Normalizes the Ericsson AIR table: one record per device, identifiers
/// parsed out of `sectorcarrierid`/`nodeid`, per-site advisory from the
/// id-shape score.
pub struct AirNormalizer {
    parser: NameParser,
}

impl AirNormalizer {
    pub fn new() -> Self {
        AirNormalizer {
            parser: NameParser::new(),
        }
    }

    pub fn normalize(&self, devices: &[AirDevice]) -> Vec<AirRecord> {
        let mut records = Vec::with_capacity(devices.len());

        for device in devices {
            let parts = self
                .parser
                .parse_air_id(&device.sectorcarrierid, &device.nodeid);
            let site: String = device.nodeid.chars().take(7).collect();

            records.push(AirRecord {
                site,
                nodeid: device.nodeid.clone(),
                sectorcarrierid: device.sectorcarrierid.clone(),
                tuning_band: parts.tuning_band.unwrap_or(TuningBand::Other),
                sector: parts.sector,
                carrier: parts.carrier,
                score: self.parser.air_score(&device.sectorcarrierid),
                advice: Advice::Ok,
                tilt: device.tilt.clone(),
            });
        }

        let advice = site_advice(records.iter().map(|r| (r.site.as_str(), r.score)));
        for record in &mut records {
            if let Some(a) = advice.get(&record.site) {
                record.advice = *a;
            }
        }
        records
    }
}

impl Default for AirNormalizer {
    fn default() -> Self {
        Self::new()
    }
}
