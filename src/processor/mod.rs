use std::collections::HashMap;

use crate::models::Advice;

pub mod air;
pub mod band_mapper;
pub mod cell_key;
pub mod hwret;
pub mod name_parser;
pub mod non_air;

pub use air::AirNormalizer;
pub use band_mapper::{cell_band, coarse_band, sector_letter};
pub use cell_key::CellKeyBuilder;
pub use hwret::HwRetNormalizer;
pub use name_parser::NameParser;
pub use non_air::NonAirNormalizer;

/// Aggregates per-row usage penalties into the per-site advisory: a site is
/// `OK` iff every row attributed to it carries a zero penalty.
pub(crate) fn site_advice<'a>(rows: impl Iterator<Item = (&'a str, u8)>) -> HashMap<String, Advice> {
    let mut totals: HashMap<String, u32> = HashMap::new();
    for (site, usage) in rows {
        *totals.entry(site.to_string()).or_default() += usage as u32;
    }
    totals
        .into_iter()
        .map(|(site, total)| {
            let advice = if total == 0 {
                Advice::Ok
            } else {
                Advice::ManualCheck
            };
            (site, advice)
        })
        .collect()
}
