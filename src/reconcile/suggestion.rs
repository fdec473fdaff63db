use crate::models::{Suggestion, Vendor};

/// Huawei beam-forming antenna models steered through the BFANT object.
const BFANT_DEVICES: &[&str] = &["AAU5639", "AAU5613", "AAU5626", "AAU5636", "AAU5339"];

/// Huawei models tilted per split cell rather than per RET subunit.
const SPLIT_CELL_DEVICES: &[&str] = &["AAU5726", "AAU5758", "AAU5281"];

/// Derives the recommended tuning-action category for a reconciled cell.
/// Total: every input combination lands in a category.
pub fn suggest(
    xtxr: Option<&str>,
    vendor: Option<&str>,
    antenna_type: Option<&str>,
    is_lte: bool,
) -> Suggestion {
    let vendor = vendor.map(Vendor::parse).unwrap_or(Vendor::Other);
    let antenna = antenna_type.unwrap_or("");

    match vendor {
        Vendor::Huawei => {
            if is_lte {
                if BFANT_DEVICES.iter().any(|d| antenna.contains(d)) {
                    Suggestion::Bfant
                } else if SPLIT_CELL_DEVICES.iter().any(|d| antenna.contains(d)) {
                    Suggestion::SectorSplitCell
                } else {
                    Suggestion::RetSubUnit
                }
            } else if xtxr
                .map(|x| x.trim().eq_ignore_ascii_case("64T64R"))
                .unwrap_or(false)
            {
                Suggestion::NrDuCellTrpBeam
            } else {
                Suggestion::RetSubUnit
            }
        }
        Vendor::Ericsson => {
            if antenna.contains("AIR") {
                Suggestion::AirSectorCarrier
            } else {
                Suggestion::NonAirRetSubUnit
            }
        }
        Vendor::Other => Suggestion::Tbd,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_huawei_lte_routing() {
        assert_eq!(
            suggest(Some("4T4R"), Some("Huawei"), Some("AAU5639"), true),
            Suggestion::Bfant
        );
        assert_eq!(
            suggest(Some("4T4R"), Some("Huawei"), Some("AAU5726w"), true),
            Suggestion::SectorSplitCell
        );
        assert_eq!(
            suggest(Some("4T4R"), Some("Huawei"), Some("ATD4516R0"), true),
            Suggestion::RetSubUnit
        );
    }

    #[test]
    fn test_huawei_nr_routing() {
        assert_eq!(
            suggest(Some("64T64R"), Some("Huawei"), Some("AAU5639"), false),
            Suggestion::NrDuCellTrpBeam
        );
        assert_eq!(
            suggest(Some("64t64r"), Some("Huawei"), Some("AAU5639"), false),
            Suggestion::NrDuCellTrpBeam
        );
        assert_eq!(
            suggest(Some("8T8R"), Some("Huawei"), Some("AAU5639"), false),
            Suggestion::RetSubUnit
        );
    }

    #[test]
    fn test_ericsson_routing() {
        assert_eq!(
            suggest(Some("4T4R"), Some("Ericsson"), Some("AIR-X"), true),
            Suggestion::AirSectorCarrier
        );
        assert_eq!(suggest(Some("4T4R"), Some("Ericsson"), Some("AIR-X"), true).to_string(), "AIR (SectorCarrier)");
        assert_eq!(
            suggest(Some("4T4R"), Some("Ericsson"), Some("ATR4518R7"), false),
            Suggestion::NonAirRetSubUnit
        );
    }

    #[test]
    fn test_classification_is_total() {
        assert_eq!(suggest(None, Some("Nokia"), None, true), Suggestion::Tbd);
        assert_eq!(suggest(None, None, None, false), Suggestion::Tbd);
    }
}
