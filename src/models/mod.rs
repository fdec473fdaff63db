pub mod records;
pub mod taxonomy;

pub use records::*;
pub use taxonomy::*;
