pub mod crosscheck;
pub mod dedup;
pub mod mapped;
pub mod suggestion;

pub use crosscheck::{lte_crosscheck, nr_crosscheck, route_inventory, InventoryRouting};
pub use dedup::{collapse_air, collapse_huawei, collapse_non_air, latest_per_key};
pub use mapped::{air_map, hwret_map, non_air_map};
pub use suggestion::suggest;

/// Removes exact duplicate rows, keeping first occurrences in order.
pub(crate) fn dedup_exact<T: PartialEq>(rows: Vec<T>) -> Vec<T> {
    let mut out: Vec<T> = Vec::with_capacity(rows.len());
    for row in rows {
        if !out.contains(&row) {
            out.push(row);
        }
    }
    out
}
