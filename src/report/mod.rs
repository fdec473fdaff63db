pub mod archive;
pub mod export;
pub mod frames;
pub mod no_map;
pub mod wide;

pub use archive::bundle_reports;
pub use export::write_csv;
pub use frames::*;
pub use no_map::{air_no_map, hw_no_map, non_air_no_map};
pub use wide::{bfant_wide, nr_beam_wide, split_wide};
