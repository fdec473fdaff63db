pub mod cell_list;
pub mod tables;

pub use cell_list::load_cell_list;
pub use tables::*;
