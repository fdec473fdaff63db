use crate::models::{Advice, HwDevice, HwRetRecord, TuningBand};
use crate::processor::name_parser::NameParser;
use crate::processor::site_advice;

/// Normalizes the Huawei RET table. A `device_name` can advertise several
/// tuning bands; the row expands into one record per detected band, with
/// sectors claimed positionally.
pub struct HwRetNormalizer {
    parser: NameParser,
}

impl HwRetNormalizer {
    pub fn new() -> Self {
        HwRetNormalizer {
            parser: NameParser::new(),
        }
    }

    pub fn normalize(&self, devices: &[HwDevice]) -> Vec<HwRetRecord> {
        let mut records = Vec::with_capacity(devices.len());

        for device in devices {
            let usage = self.parser.device_usage(&device.device_name);

            for pair in self.parser.parse_device_name(&device.device_name) {
                records.push(HwRetRecord {
                    site: device.site_name.clone(),
                    name: device.name.clone(),
                    device_name: device.device_name.clone(),
                    device_no: device.device_no.clone(),
                    subunit_no: device.subunit_no.clone(),
                    max_tilt: device.max_tilt.clone(),
                    min_tilt: device.min_tilt.clone(),
                    tuning_band: pair.tuning_band.unwrap_or(TuningBand::Other),
                    sector: pair.sector,
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

impl Default for HwRetNormalizer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::TiltSeries;

    fn device(site: &str, device_name: &str) -> HwDevice {
        HwDevice {
            site_name: site.to_string(),
            name: format!("{site}-RRU"),
            device_name: device_name.to_string(),
            device_no: "0".to_string(),
            subunit_no: "1".to_string(),
            max_tilt: "1000".to_string(),
            min_tilt: "0".to_string(),
            tilt: TiltSeries::new(),
        }
    }

    #[test]
    fn test_known_good_device() {
        let records = HwRetNormalizer::new().normalize(&[device("ABC1234", "HB_SET1_S1")]);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].tuning_band, TuningBand::Mb);
        assert_eq!(records[0].sector, Some(1));
        assert_eq!(records[0].usage, 0);
        assert_eq!(records[0].advice, Advice::Ok);
    }

    #[test]
    fn test_multi_band_device_expands_per_band() {
        let records = HwRetNormalizer::new().normalize(&[device("ABC1234", "1800_2600_S1S2")]);
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].tuning_band, TuningBand::Mb);
        assert_eq!(records[0].sector, Some(1));
        assert_eq!(records[1].tuning_band, TuningBand::L2600);
        assert_eq!(records[1].sector, Some(2));
        // off-pattern name penalizes every expanded row
        assert!(records.iter().all(|r| r.usage == 1));
        assert!(records.iter().all(|r| r.advice == Advice::ManualCheck));
    }

    #[test]
    fn test_row_expansion_conservation() {
        let devices = vec![
            device("ABC1234", "HB_SET1_S1"),     // 1 band
            device("ABC1234", "1800_2600_S1S2"), // 2 bands
            device("ABC1234", "NOBAND"),         // no band -> 1 Other row
        ];
        let records = HwRetNormalizer::new().normalize(&devices);
        assert_eq!(records.len(), 4);
    }

    #[test]
    fn test_advice_is_per_site() {
        let records = HwRetNormalizer::new().normalize(&[
            device("ABC1234", "HB_SET1_S1"),
            device("XYZ9876", "weird-device"),
        ]);
        assert_eq!(records[0].advice, Advice::Ok);
        assert_eq!(records[1].advice, Advice::ManualCheck);
    }

    #[test]
    fn test_normalization_is_idempotent() {
        let devices = vec![device("ABC1234", "850_SET2_S2"), device("ABC1234", "LB_S1")];
        let normalizer = HwRetNormalizer::new();
        assert_eq!(normalizer.normalize(&devices), normalizer.normalize(&devices));
    }
}
