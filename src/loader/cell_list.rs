use anyhow::Result;
use polars::prelude::*;
use std::path::Path;

use crate::errors::SchemaError;
use crate::loader::tables::{column, read_table};
use crate::models::InventoryRow;
use crate::processor::NameParser;

const TABLE: &str = "cell_list";

/// Reads the tuning-list CSV: headers are lower-cased, cell names trimmed,
/// and the site code parsed out of each cell name.
pub fn load_cell_list(path: &Path) -> Result<Vec<InventoryRow>> {
    let df = read_table(path)?;
    Ok(cell_list_rows(df)?)
}

pub fn cell_list_rows(mut df: DataFrame) -> std::result::Result<Vec<InventoryRow>, SchemaError> {
    let names: Vec<String> = df
        .get_column_names()
        .iter()
        .map(|s| s.to_string())
        .collect();
    for name in names {
        let lower = name.to_lowercase();
        if lower != name {
            let _ = df.rename(&name, lower.into());
        }
    }

    let cell_name = column(&df, TABLE, "cell name")?;
    let parser = NameParser::new();

    Ok((0..df.height())
        .map(|i| {
            let cell = cell_name.get(i).unwrap_or("").trim().to_string();
            let site_name = parser.parse_site_name(&cell);
            InventoryRow {
                cell_name: cell,
                site_name,
            }
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cell_list_rows_parse_site_names() {
        let df = DataFrame::new(vec![Column::new(
            "Cell Name".into(),
            vec!["  ABC1234-L21-1A ", "strange-name"],
        )])
        .unwrap();
        let rows = cell_list_rows(df).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].cell_name, "ABC1234-L21-1A");
        assert_eq!(rows[0].site_name, "ABC1234");
        assert_eq!(rows[1].site_name, "No Site Name");
    }

    #[test]
    fn test_missing_cell_name_column() {
        let df = DataFrame::new(vec![Column::new("wrong".into(), vec!["x"])]).unwrap();
        let err = cell_list_rows(df).unwrap_err();
        assert!(err.to_string().contains("cell name"));
    }
}
