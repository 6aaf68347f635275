//! Configuration file handling.
//!
//! Settings come from `hospital_insights.toml` (or the file named by
//! `HOSPITAL_INSIGHTS_CONFIG`); every key has a default so the file is
//! optional.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::data::query::QueryLimits;

pub const CONFIG_ENV: &str = "HOSPITAL_INSIGHTS_CONFIG";
pub const DATA_ENV: &str = "HOSPITAL_INSIGHTS_DATA";
const DEFAULT_CONFIG_FILE: &str = "hospital_insights.toml";

/// Root configuration structure.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DashboardConfig {
    #[serde(default)]
    pub data: DataConfig,

    #[serde(default)]
    pub display: DisplayConfig,
}

/// Where the hospital table lives.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataConfig {
    /// Path to a `.csv`, `.json` or `.parquet` file.
    #[serde(default = "default_data_path")]
    pub path: PathBuf,
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            path: default_data_path(),
        }
    }
}

fn default_data_path() -> PathBuf {
    PathBuf::from("data/hospitals.csv")
}

/// Result-size caps used by the pages.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DisplayConfig {
    /// Cards shown when a search is blank or finds nothing.
    #[serde(default = "default_sample_size")]
    pub sample_size: usize,

    /// Cards shown for a matching search.
    #[serde(default = "default_max_search_results")]
    pub max_search_results: usize,

    #[serde(default = "default_top_specialties")]
    pub top_specialties: usize,

    #[serde(default = "default_top_locations")]
    pub top_locations: usize,

    /// Rows per page in the table view.
    #[serde(default = "default_table_page_size")]
    pub table_page_size: usize,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            sample_size: default_sample_size(),
            max_search_results: default_max_search_results(),
            top_specialties: default_top_specialties(),
            top_locations: default_top_locations(),
            table_page_size: default_table_page_size(),
        }
    }
}

impl DisplayConfig {
    pub fn query_limits(&self) -> QueryLimits {
        QueryLimits {
            sample_size: self.sample_size,
            max_search_results: self.max_search_results,
        }
    }
}

fn default_sample_size() -> usize {
    8
}

fn default_max_search_results() -> usize {
    8
}

fn default_top_specialties() -> usize {
    5
}

fn default_top_locations() -> usize {
    10
}

fn default_table_page_size() -> usize {
    20
}

impl DashboardConfig {
    /// Load configuration from a file path.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let config: DashboardConfig = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(config)
    }

    /// Resolve configuration for this process.
    ///
    /// `HOSPITAL_INSIGHTS_CONFIG` names the file to read; otherwise
    /// `hospital_insights.toml` is used if present, else defaults.
    /// `HOSPITAL_INSIGHTS_DATA` then overrides the data path.
    pub fn from_env() -> Result<Self> {
        let mut config = match std::env::var_os(CONFIG_ENV) {
            Some(path) => Self::load(Path::new(&path))?,
            None => Self::load_default()?.unwrap_or_default(),
        };
        if let Some(data) = std::env::var_os(DATA_ENV) {
            config.data.path = PathBuf::from(data);
        }
        Ok(config)
    }

    /// Returns `Ok(None)` if the default file doesn't exist, `Err` if it exists but can't be parsed.
    pub fn load_default() -> Result<Option<Self>> {
        let default_path = Path::new(DEFAULT_CONFIG_FILE);

        if default_path.exists() {
            Ok(Some(Self::load(default_path)?))
        } else {
            Ok(None)
        }
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn test_default_config() {
        let config = DashboardConfig::default();
        assert_eq!(config.data.path, PathBuf::from("data/hospitals.csv"));
        assert_eq!(config.display.sample_size, 8);
        assert_eq!(config.display.top_specialties, 5);
        assert_eq!(config.display.top_locations, 10);
        assert_eq!(config.display.query_limits(), QueryLimits::default());
    }

    #[test]
    fn test_parse_partial_config() {
        let toml_content = r#"
[data]
path = "/srv/hospitals.parquet"

[display]
sample_size = 12
top_locations = 3
"#;

        let config: DashboardConfig = toml::from_str(toml_content).unwrap();
        assert_eq!(config.data.path, PathBuf::from("/srv/hospitals.parquet"));
        assert_eq!(config.display.sample_size, 12);
        assert_eq!(config.display.top_locations, 3);
        assert_eq!(config.display.top_specialties, 5);
        assert_eq!(config.display.table_page_size, 20);
    }

    #[test]
    fn test_empty_config_is_default() {
        let config: DashboardConfig = toml::from_str("").unwrap();
        assert_eq!(config, DashboardConfig::default());
    }

    #[test]
    fn test_load_reports_parse_errors() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[display]\nsample_size = \"many\"").unwrap();
        let err = DashboardConfig::load(file.path()).unwrap_err();
        assert!(format!("{err:#}").contains("Failed to parse config file"));
    }
}
