use anyhow::{Context, Result};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::env;
use std::path::PathBuf;

/// Runtime configuration for one reporting run. Everything the pipeline
/// needs travels in this struct; the core transforms never read the
/// process environment themselves.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunConfig {
    pub cluster_name: String,
    pub week_num: String,
    pub start_date: String,
    pub end_date: String,
    pub input_dir: PathBuf,
    pub output_base_dir: PathBuf,
}

impl RunConfig {
    pub fn from_file(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {path}"))?;
        let mut config: RunConfig =
            toml::from_str(&content).with_context(|| format!("Failed to parse {path}"))?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Environment variables win over the file, so operators can retarget a
    /// run without editing the config.
    fn apply_env_overrides(&mut self) {
        if let Ok(v) = env::var("CLUSTER_NAME") {
            self.cluster_name = v;
        }
        if let Ok(v) = env::var("WEEK_NUM") {
            self.week_num = v;
        }
        if let Ok(v) = env::var("START_DATE") {
            self.start_date = v;
        }
        if let Ok(v) = env::var("END_DATE") {
            self.end_date = v;
        }
    }

    pub fn date_window(&self) -> Result<(NaiveDate, NaiveDate)> {
        let start = NaiveDate::parse_from_str(&self.start_date, "%Y-%m-%d")
            .with_context(|| format!("start_date `{}` is not YYYY-MM-DD", self.start_date))?;
        let end = NaiveDate::parse_from_str(&self.end_date, "%Y-%m-%d")
            .with_context(|| format!("end_date `{}` is not YYYY-MM-DD", self.end_date))?;
        Ok((start, end))
    }

    /// First cluster-name token; reports for one cluster land in its folder.
    pub fn folder_name(&self) -> &str {
        self.cluster_name.split('_').next().unwrap_or("")
    }

    pub fn output_dir(&self) -> PathBuf {
        self.output_base_dir.join(self.folder_name())
    }

    pub fn cell_list_path(&self) -> PathBuf {
        self.input_dir
            .join(format!("Tuning_cell_list_{}.csv", self.cluster_name))
    }

    pub fn table_path(&self, table: &str) -> PathBuf {
        self.input_dir.join(format!("{table}.csv"))
    }

    pub fn lte_table_path(&self) -> PathBuf {
        self.table_path(&format!("lte_{}", self.week_num))
    }

    pub fn nr_table_path(&self) -> PathBuf {
        self.table_path(&format!("nr_{}", self.week_num))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> RunConfig {
        toml::from_str(
            r#"
            cluster_name = "NORTH_C01"
            week_num = "wk31"
            start_date = "2025-07-01"
            end_date = "2025-07-14"
            input_dir = "data"
            output_base_dir = "out"
            "#,
        )
        .unwrap()
    }

    #[test]
    fn test_config_paths() {
        let config = sample();
        assert_eq!(config.folder_name(), "NORTH");
        assert_eq!(
            config.cell_list_path(),
            PathBuf::from("data/Tuning_cell_list_NORTH_C01.csv")
        );
        assert_eq!(config.lte_table_path(), PathBuf::from("data/lte_wk31.csv"));
        assert_eq!(config.output_dir(), PathBuf::from("out/NORTH"));
    }

    #[test]
    fn test_date_window() {
        let (start, end) = sample().date_window().unwrap();
        assert_eq!(start, NaiveDate::from_ymd_opt(2025, 7, 1).unwrap());
        assert_eq!(end, NaiveDate::from_ymd_opt(2025, 7, 14).unwrap());
    }

    #[test]
    fn test_bad_date_is_an_error() {
        let mut config = sample();
        config.start_date = "07/01/2025".to_string();
        assert!(config.date_window().is_err());
    }
}
