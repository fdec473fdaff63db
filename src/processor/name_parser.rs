use regex::Regex;

use crate::models::TuningBand;
use crate::processor::band_mapper::sector_letter;

/// Fields extracted from an LTE/NR cell name.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CellNameParts {
    pub carrier: Option<u32>,
    pub sector: Option<u32>,
    pub sector_type: Option<char>,
}

/// Fields extracted from an Ericsson AIR sector-carrier id.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AirParts {
    pub sector: Option<u32>,
    pub carrier: Option<u32>,
    pub tuning_band: Option<TuningBand>,
}

/// One band/sector pair detected inside a device label.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BandSector {
    pub tuning_band: Option<TuningBand>,
    pub sector: Option<u32>,
}

/// Extracts structured identifiers out of free-form device and cell name
/// strings, one grammar per vendor convention. Parsing never fails: anything
/// a grammar cannot resolve degrades to `None` fields.
pub struct NameParser {
    sector_token_re: Regex,
    site_name_re: Regex,
    label_split_re: Regex,
    label_band_re: Regex,
    alpha_sector_re: Regex,
    numeric_sector_re: Regex,
    strict_label_res: Vec<Regex>,
    hw_band_rules: Vec<(Regex, TuningBand)>,
    hw_numeric_sector_re: Regex,
    hw_char_sector_re: Regex,
    hw_known_good_re: Regex,
}

impl NameParser {
    pub fn new() -> Self {
        NameParser {
            sector_token_re: Regex::new(r"^([A-Z])(\d+)").unwrap(),
            site_name_re: Regex::new(r"[A-Z]{3,4}\d{3,4}").unwrap(),
            label_split_re: Regex::new(r"\+|_By_|_by_").unwrap(),
            label_band_re: Regex::new(r"L(07|7|09|9|18|21|23)").unwrap(),
            alpha_sector_re: Regex::new(r"S([A-Z])").unwrap(),
            numeric_sector_re: Regex::new(r"S(\d{1,2})").unwrap(),
            strict_label_res: vec![
                Regex::new(r"^L\d{2}_S\d{1,2}$").unwrap(),
                Regex::new(r"^UL\d{2}_S\d{1,2}$").unwrap(),
                Regex::new(r"^U09/L07_S\d{1,2}$").unwrap(),
                Regex::new(r"^L\d{2}_S[A-Z]$").unwrap(),
                Regex::new(r"^G\d{2}_S\d{1,2}$").unwrap(),
                Regex::new(r"^U\d{2}_S\d{1,2}$").unwrap(),
            ],
            hw_band_rules: vec![
                (Regex::new(r"850").unwrap(), TuningBand::B850),
                (Regex::new(r"700|900|LB").unwrap(), TuningBand::Lb),
                (Regex::new(r"1800|2100|HB").unwrap(), TuningBand::Mb),
                (Regex::new(r"2300").unwrap(), TuningBand::L2300),
                (Regex::new(r"2600").unwrap(), TuningBand::L2600),
            ],
            hw_numeric_sector_re: Regex::new(r"[Ss](\d{1,3})").unwrap(),
            hw_char_sector_re: Regex::new(r"_S([A-Z])").unwrap(),
            hw_known_good_re: Regex::new(r"^(HB|LB|2300|2600|2100|850|1800)_SET[1-4]_S\d{1,3}$")
                .unwrap(),
        }
    }

    /// LTE/NR cell-name grammar.
    ///
    /// 14-character names split on `-` into exactly three groups; the digits
    /// of the last group form the carrier and its single letter the sector.
    /// Other names split on `_`; the carrier defaults to 1 and the final
    /// token is matched as `<Letter><digits>`.
    pub fn parse_cell_name(&self, cell_name: &str) -> CellNameParts {
        let mut parts = CellNameParts::default();
        if cell_name.chars().count() == 14 {
            let groups: Vec<&str> = cell_name.split('-').collect();
            if groups.len() == 3 {
                let last = groups[2];
                let digits: String = last.chars().filter(|c| c.is_ascii_digit()).collect();
                let letters: Vec<char> = last.chars().filter(|c| c.is_alphabetic()).collect();
                if !digits.is_empty() && letters.len() == 1 {
                    if let Ok(carrier) = digits.parse::<u32>() {
                        parts.carrier = Some(carrier);
                        parts.sector = sector_letter(letters[0]);
                    }
                }
            }
        } else {
            let groups: Vec<&str> = cell_name.split('_').collect();
            if groups.len() > 1 {
                parts.carrier = Some(1);
                if let Some(caps) = self.sector_token_re.captures(groups[groups.len() - 1]) {
                    parts.sector_type = caps.get(1).and_then(|m| m.as_str().chars().next());
                    parts.sector = caps.get(2).and_then(|m| m.as_str().parse().ok());
                }
            }
        }
        parts
    }

    /// Site code embedded in a cell name: 3-4 uppercase letters followed by
    /// 3-4 digits.
    pub fn parse_site_name(&self, cell_name: &str) -> String {
        match self.site_name_re.find(cell_name) {
            Some(m) => m.as_str().to_string(),
            None => "No Site Name".to_string(),
        }
    }

    /// Ericsson AIR grammar over `sectorcarrierid` + `nodeid`.
    pub fn parse_air_id(&self, sectorcarrierid: &str, nodeid: &str) -> AirParts {
        let value = sectorcarrierid.trim();
        let mut parts = AirParts::default();

        if value.len() == 2 && value.chars().all(|c| c.is_ascii_digit()) {
            parts.sector = value[0..1].parse().ok();
            parts.carrier = value[1..2].parse().ok();
            let tail: String = {
                let chars: Vec<char> = nodeid.chars().collect();
                let start = chars.len().saturating_sub(3);
                chars[start..].iter().collect()
            };
            parts.tuning_band = match tail.as_str() {
                "L23" => Some(TuningBand::L2300),
                "L21" => Some(TuningBand::Mb),
                _ => None,
            };
        } else if value.contains('-') {
            let pieces: Vec<&str> = value.split('-').collect();
            if pieces.len() == 2 && pieces[1].contains('S') && pieces[1].contains('C') {
                parts.tuning_band = match pieces[0] {
                    "L23" | "L33" => Some(TuningBand::L2300),
                    "L18" | "L21" => Some(TuningBand::Mb),
                    "L07" | "L09" => Some(TuningBand::Lb),
                    _ => None,
                };
                let detail = pieces[1];
                parts.sector = detail
                    .split('S')
                    .nth(1)
                    .and_then(|s| s.split('C').next())
                    .and_then(|s| s.parse().ok());
                parts.carrier = detail.split('C').nth(1).and_then(|s| s.parse().ok());
                if parts.sector.is_none() || parts.carrier.is_none() {
                    parts = AirParts::default();
                }
            }
        }
        parts
    }

    /// Per-row penalty for an AIR id: the known-good shapes are 2, 8 and 9
    /// characters long.
    pub fn air_score(&self, sectorcarrierid: &str) -> u8 {
        match sectorcarrierid.chars().count() {
            2 | 8 | 9 => 0,
            _ => 1,
        }
    }

    /// Ericsson non-AIR grammar over `userlabel`. One label can encode
    /// several band/sector pairs (multi-band antennas), so this returns one
    /// entry per segment that yields anything; a label yielding nothing
    /// produces a single all-null entry.
    pub fn parse_user_label(&self, userlabel: &str) -> Vec<BandSector> {
        let mut results = Vec::new();

        for segment in self.label_split_re.split(userlabel) {
            if segment.is_empty() || matches!(segment.trim(), "Triplexer" | "Diplexer") {
                continue;
            }

            let mut tuning_band = None;
            for caps in self.label_band_re.captures_iter(segment) {
                let m = caps.get(0).unwrap();
                if preceded_by_two_uppercase(segment, m.start()) {
                    continue;
                }
                tuning_band = match caps.get(1).map(|g| g.as_str()) {
                    Some("07") | Some("7") | Some("09") | Some("9") => Some(TuningBand::Lb),
                    Some("18") | Some("21") => Some(TuningBand::Mb),
                    Some("23") => Some(TuningBand::L2300),
                    _ => None,
                };
                break;
            }

            // Letter-coded sectors win over digit-coded ones.
            let sector = match self.alpha_sector_re.captures(segment) {
                Some(caps) => sector_letter(caps[1].chars().next().unwrap()),
                None => self
                    .numeric_sector_re
                    .captures(segment)
                    .and_then(|caps| caps[1].parse().ok()),
            };

            if tuning_band.is_some() || sector.is_some() {
                results.push(BandSector {
                    tuning_band,
                    sector,
                });
            }
        }

        if results.is_empty() {
            results.push(BandSector::default());
        }
        results
    }

    /// Strict-pattern validator for non-AIR labels: every surviving segment
    /// must match one of the six canonical templates, otherwise the row is
    /// penalized.
    pub fn label_usage(&self, userlabel: &str) -> u8 {
        let segments = self
            .label_split_re
            .split(userlabel)
            .filter(|s| !s.is_empty() && !matches!(s.trim(), "Triplexer" | "Diplexer"));

        for segment in segments {
            let trimmed = segment.trim();
            if !self.strict_label_res.iter().any(|re| re.is_match(trimmed)) {
                return 1;
            }
        }
        0
    }

    /// Huawei RET grammar over `device_name`: ordered band rules with a
    /// word-prefix guard, then numeric and letter sectors claimed
    /// positionally, one per detected band.
    pub fn parse_device_name(&self, device_name: &str) -> Vec<BandSector> {
        let mut bands: Vec<TuningBand> = Vec::new();
        for (re, band) in &self.hw_band_rules {
            let hit = re
                .find_iter(device_name)
                .any(|m| !rejected_by_word_prefix(device_name, m.start()));
            if hit {
                bands.push(*band);
            }
        }
        if bands.is_empty() {
            bands.push(TuningBand::Other);
        }

        let mut sectors: Vec<u32> = self
            .hw_numeric_sector_re
            .captures_iter(device_name)
            .filter_map(|caps| caps[1].parse().ok())
            .collect();
        for caps in self.hw_char_sector_re.captures_iter(device_name) {
            let m = caps.get(0).unwrap();
            let followed_by_id_char = device_name[m.end()..]
                .chars()
                .next()
                .map(|c| c.is_ascii_uppercase() || c.is_ascii_digit())
                .unwrap_or(false);
            if !followed_by_id_char {
                if let Some(n) = sector_letter(caps[1].chars().next().unwrap()) {
                    sectors.push(n);
                }
            }
        }

        bands
            .into_iter()
            .enumerate()
            .map(|(i, band)| BandSector {
                tuning_band: Some(band),
                sector: sectors.get(i).copied(),
            })
            .collect()
    }

    /// A Huawei device name is known-good only in the
    /// `<band>_SET<1-4>_S<1-3 digits>` shape.
    pub fn device_usage(&self, device_name: &str) -> u8 {
        if self.hw_known_good_re.is_match(device_name) {
            0
        } else {
            1
        }
    }
}

impl Default for NameParser {
    fn default() -> Self {
        Self::new()
    }
}

/// True when the two characters right before `start` are both uppercase
/// letters. Guards band matches against firing inside longer identifiers
/// (e.g. the `L21` in `XXL21...`).
fn preceded_by_two_uppercase(text: &str, start: usize) -> bool {
    let mut before = text[..start].chars().rev();
    match (before.next(), before.next()) {
        (Some(a), Some(b)) => a.is_ascii_uppercase() && b.is_ascii_uppercase(),
        _ => false,
    }
}

/// True when `start` sits right after a standalone 3- or 4-letter word
/// prefix, which marks the digits as part of a model number (`AAU5639`)
/// rather than a band.
fn rejected_by_word_prefix(text: &str, start: usize) -> bool {
    let prefix: Vec<char> = text[..start].chars().collect();
    let len = prefix.len();
    for n in [3usize, 4] {
        if len >= n && prefix[len - n..].iter().all(|c| c.is_ascii_alphabetic()) {
            let at_word_boundary = len == n || {
                let prev = prefix[len - n - 1];
                !(prev.is_ascii_alphanumeric() || prev == '_')
            };
            if at_word_boundary {
                return true;
            }
        }
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cell_name_14_chars() {
        let parser = NameParser::new();
        // 3 hyphen groups, last group "1A" -> carrier 1, sector A=1
        let parts = parser.parse_cell_name("ABC1234-L21-1A");
        assert_eq!(parts.carrier, Some(1));
        assert_eq!(parts.sector, Some(1));
        assert_eq!(parts.sector_type, None);
    }

    #[test]
    fn test_cell_name_14_chars_bad_tail() {
        let parser = NameParser::new();
        // last group has two letters -> both fields null
        let parts = parser.parse_cell_name("ABC1234-L21-AB");
        assert_eq!(parts.carrier, None);
        assert_eq!(parts.sector, None);
    }

    #[test]
    fn test_cell_name_14_chars_wrong_group_count() {
        let parts = NameParser::new().parse_cell_name("ABC1234L21x-1A");
        assert_eq!(parts.carrier, None);
        assert_eq!(parts.sector, None);
    }

    #[test]
    fn test_cell_name_underscore_grammar() {
        let parser = NameParser::new();
        let parts = parser.parse_cell_name("ABC123_L07_S2");
        assert_eq!(parts.carrier, Some(1));
        assert_eq!(parts.sector, Some(2));
        assert_eq!(parts.sector_type, Some('S'));

        // final token not <Letter><digits>: carrier keeps its default
        let parts = parser.parse_cell_name("ABC123_L07_2S");
        assert_eq!(parts.carrier, Some(1));
        assert_eq!(parts.sector, None);
        assert_eq!(parts.sector_type, None);

        // no separator at all
        let parts = parser.parse_cell_name("ABC1234");
        assert_eq!(parts.carrier, None);
    }

    #[test]
    fn test_site_name_extraction() {
        let parser = NameParser::new();
        assert_eq!(parser.parse_site_name("ABC1234-L21-1A"), "ABC1234");
        assert_eq!(parser.parse_site_name("XYZW123_L07_S2"), "XYZW123");
        assert_eq!(parser.parse_site_name("no-site-here"), "No Site Name");
    }

    #[test]
    fn test_air_two_digit_id() {
        let parser = NameParser::new();
        let parts = parser.parse_air_id("23", "ABC1234L21");
        assert_eq!(parts.sector, Some(2));
        assert_eq!(parts.carrier, Some(3));
        assert_eq!(parts.tuning_band, Some(TuningBand::Mb));

        let parts = parser.parse_air_id("14", "ABC1234L23");
        assert_eq!(parts.tuning_band, Some(TuningBand::L2300));

        // unknown node suffix leaves the band unresolved
        let parts = parser.parse_air_id("14", "ABC1234L26");
        assert_eq!(parts.sector, Some(1));
        assert_eq!(parts.tuning_band, None);
    }

    #[test]
    fn test_air_dashed_id() {
        let parser = NameParser::new();
        let parts = parser.parse_air_id("L23-S03C2", "ABC1234");
        assert_eq!(parts.sector, Some(3));
        assert_eq!(parts.carrier, Some(2));
        assert_eq!(parts.tuning_band, Some(TuningBand::L2300));

        let parts = parser.parse_air_id("L07-S1C12", "ABC1234");
        assert_eq!(parts.sector, Some(1));
        assert_eq!(parts.carrier, Some(12));
        assert_eq!(parts.tuning_band, Some(TuningBand::Lb));

        // unknown band prefix still extracts sector/carrier
        let parts = parser.parse_air_id("L99-S1C2", "ABC1234");
        assert_eq!(parts.sector, Some(1));
        assert_eq!(parts.tuning_band, None);

        // malformed detail resets everything
        let parts = parser.parse_air_id("L23-SC", "ABC1234");
        assert_eq!(parts, AirParts::default());
    }

    #[test]
    fn test_air_garbage_id() {
        let parts = NameParser::new().parse_air_id("banana", "ABC1234L21");
        assert_eq!(parts, AirParts::default());
    }

    #[test]
    fn test_air_score_shapes() {
        let parser = NameParser::new();
        assert_eq!(parser.air_score("23"), 0);
        assert_eq!(parser.air_score("L23-S3C2"), 0); // 8 chars
        assert_eq!(parser.air_score("L23-S03C2"), 0); // 9 chars
        assert_eq!(parser.air_score("123"), 1);
        assert_eq!(parser.air_score(""), 1);
    }

    #[test]
    fn test_user_label_multi_band() {
        let rows = NameParser::new().parse_user_label("L21_SA+L07_S2");
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].tuning_band, Some(TuningBand::Mb));
        assert_eq!(rows[0].sector, Some(1));
        assert_eq!(rows[1].tuning_band, Some(TuningBand::Lb));
        assert_eq!(rows[1].sector, Some(2));
    }

    #[test]
    fn test_user_label_drops_filter_segments() {
        let rows = NameParser::new().parse_user_label("L18_S1_By_Triplexer");
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].tuning_band, Some(TuningBand::Mb));
        assert_eq!(rows[0].sector, Some(1));
    }

    #[test]
    fn test_user_label_band_guard() {
        // the L21 here is embedded after two uppercase letters, so it is not
        // a band marker
        let rows = NameParser::new().parse_user_label("XXL21");
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0], BandSector::default());
    }

    #[test]
    fn test_user_label_nothing_found() {
        let rows = NameParser::new().parse_user_label("Diplexer+Triplexer");
        assert_eq!(rows, vec![BandSector::default()]);
        assert_eq!(NameParser::new().parse_user_label(""), vec![BandSector::default()]);
    }

    #[test]
    fn test_label_usage_patterns() {
        let parser = NameParser::new();
        assert_eq!(parser.label_usage("L21_S1"), 0);
        assert_eq!(parser.label_usage("L21_SA"), 0);
        assert_eq!(parser.label_usage("UL09_S12"), 0);
        assert_eq!(parser.label_usage("U09/L07_S2"), 0);
        assert_eq!(parser.label_usage("G18_S3+U21_S3"), 0);
        assert_eq!(parser.label_usage("L21_S1_By_Diplexer"), 0);
        assert_eq!(parser.label_usage("MainAntenna1"), 1);
        assert_eq!(parser.label_usage("L21_S1+weird"), 1);
    }

    #[test]
    fn test_device_name_bands_and_sectors() {
        let parser = NameParser::new();
        let rows = parser.parse_device_name("900_SET1_S1");
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].tuning_band, Some(TuningBand::Lb));
        assert_eq!(rows[0].sector, Some(1));

        // two bands in one label expand positionally
        let rows = parser.parse_device_name("1800_2600_S1S2");
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].tuning_band, Some(TuningBand::Mb));
        assert_eq!(rows[0].sector, Some(1));
        assert_eq!(rows[1].tuning_band, Some(TuningBand::L2600));
        assert_eq!(rows[1].sector, Some(2));
    }

    #[test]
    fn test_device_name_letter_sector() {
        let rows = NameParser::new().parse_device_name("HB_SB");
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].tuning_band, Some(TuningBand::Mb));
        assert_eq!(rows[0].sector, Some(2));
    }

    #[test]
    fn test_device_name_model_number_guard() {
        // digits inside a model number must not be read as a band
        let rows = NameParser::new().parse_device_name("AAU2600");
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].tuning_band, Some(TuningBand::Other));
    }

    #[test]
    fn test_device_name_unmatched_band_gets_null_sector() {
        let rows = NameParser::new().parse_device_name("850_2100_S2");
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].tuning_band, Some(TuningBand::B850));
        assert_eq!(rows[0].sector, Some(2));
        assert_eq!(rows[1].tuning_band, Some(TuningBand::Mb));
        assert_eq!(rows[1].sector, None);
    }

    #[test]
    fn test_device_usage_known_good() {
        let parser = NameParser::new();
        assert_eq!(parser.device_usage("HB_SET1_S1"), 0);
        assert_eq!(parser.device_usage("2600_SET4_S123"), 0);
        assert_eq!(parser.device_usage("2600_SET5_S1"), 1);
        assert_eq!(parser.device_usage("RET_HB_S1"), 1);
        assert_eq!(parser.device_usage(""), 1);
    }
}
