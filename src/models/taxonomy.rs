use serde::{Deserialize, Serialize};
use std::fmt;

/// Canonical frequency-class bucket used as a join key across vendors.
///
/// `B2600` ("2600") and `L2600` both exist: the serving-cell side labels the
/// band `2600` while Huawei device names resolve to `L2600`. The two label
/// families never cross-match and are kept separate on purpose.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum TuningBand {
    Lb,
    Mb,
    B850,
    B2600,
    L2300,
    L2600,
    Other,
}

impl TuningBand {
    pub fn as_str(&self) -> &'static str {
        match self {
            TuningBand::Lb => "LB",
            TuningBand::Mb => "MB",
            TuningBand::B850 => "850",
            TuningBand::B2600 => "2600",
            TuningBand::L2300 => "L2300",
            TuningBand::L2600 => "L2600",
            TuningBand::Other => "Other",
        }
    }

    /// `Other` is a sentinel for unresolved bands and never participates in
    /// the mapped inner joins.
    pub fn is_joinable(&self) -> bool {
        !matches!(self, TuningBand::Other)
    }
}

impl fmt::Display for TuningBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Per-site quality advisory aggregated from per-row usage penalties.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Advice {
    Ok,
    ManualCheck,
}

impl Advice {
    pub fn as_str(&self) -> &'static str {
        match self {
            Advice::Ok => "OK",
            Advice::ManualCheck => "manual check",
        }
    }
}

impl fmt::Display for Advice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Vendor {
    Huawei,
    Ericsson,
    Other,
}

impl Vendor {
    pub fn parse(raw: &str) -> Vendor {
        let raw = raw.trim();
        if raw.eq_ignore_ascii_case("huawei") {
            Vendor::Huawei
        } else if raw.eq_ignore_ascii_case("ericsson") {
            Vendor::Ericsson
        } else {
            Vendor::Other
        }
    }
}

/// Join outcome of the inventory cross-check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MatchStatus {
    Found,
    NotFound,
}

impl MatchStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            MatchStatus::Found => "found",
            MatchStatus::NotFound => "cannot find in database",
        }
    }
}

impl fmt::Display for MatchStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Recommended tuning-action category for a reconciled cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Suggestion {
    Bfant,
    SectorSplitCell,
    RetSubUnit,
    NrDuCellTrpBeam,
    AirSectorCarrier,
    NonAirRetSubUnit,
    Tbd,
}

impl Suggestion {
    pub fn as_str(&self) -> &'static str {
        match self {
            Suggestion::Bfant => "BFANT",
            Suggestion::SectorSplitCell => "SECTORSPLITCELL",
            Suggestion::RetSubUnit => "RETSUBUNIT",
            Suggestion::NrDuCellTrpBeam => "NRDUCELLTRPBEAM",
            Suggestion::AirSectorCarrier => "AIR (SectorCarrier)",
            Suggestion::NonAirRetSubUnit => "NON_AIR (RetSubUnit)",
            Suggestion::Tbd => "TBD",
        }
    }
}

impl fmt::Display for Suggestion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_band_labels() {
        assert_eq!(TuningBand::Lb.to_string(), "LB");
        assert_eq!(TuningBand::B2600.to_string(), "2600");
        assert_eq!(TuningBand::L2600.to_string(), "L2600");
        assert!(!TuningBand::Other.is_joinable());
        assert!(TuningBand::B850.is_joinable());
    }

    #[test]
    fn test_vendor_parse_is_case_insensitive() {
        assert_eq!(Vendor::parse("Huawei"), Vendor::Huawei);
        assert_eq!(Vendor::parse("ERICSSON"), Vendor::Ericsson);
        assert_eq!(Vendor::parse("Nokia"), Vendor::Other);
        assert_eq!(Vendor::parse(""), Vendor::Other);
    }

    #[test]
    fn test_status_labels() {
        assert_eq!(MatchStatus::Found.to_string(), "found");
        assert_eq!(MatchStatus::NotFound.to_string(), "cannot find in database");
    }
}
