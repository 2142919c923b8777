//! Dashboard configuration.
//!
//! Settings are read from `salesdash.toml` in the working directory, falling
//! back to `<config dir>/salesdash/config.toml`. Every key is optional.

use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{Result, SalesError};

pub const LOCAL_CONFIG_FILE: &str = "salesdash.toml";

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    /// Transaction file to aggregate
    pub data_file: PathBuf,
    /// Window title and page heading
    pub title: String,
    /// Size of the default customer selection
    pub top_groups: usize,
    /// Only weeks in later years count towards the default selection
    pub recent_year_threshold: i32,
    /// Raw amounts are divided by this before display
    pub amount_divisor: f64,
    /// Metric cards per row
    pub card_columns: usize,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            data_file: PathBuf::from("true_sales_cust.csv"),
            title: "Wilde".to_string(),
            top_groups: 10,
            recent_year_threshold: 2024,
            amount_divisor: 100.0,
            card_columns: 4,
        }
    }
}

impl DashboardConfig {
    /// Load the first config file found, or the defaults if there is none.
    pub fn load() -> Result<Self> {
        match Self::candidate_paths().into_iter().find(|p| p.is_file()) {
            Some(path) => Self::from_file(&path),
            None => Ok(Self::default()),
        }
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path).map_err(|source| SalesError::ConfigIo {
            path: path.to_path_buf(),
            source,
        })?;
        let mut config: Self = toml::from_str(&text).map_err(|source| SalesError::Config {
            path: path.to_path_buf(),
            source,
        })?;

        // Relative data paths are resolved against the config file's directory
        if config.data_file.is_relative() {
            if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
                config.data_file = dir.join(&config.data_file);
            }
        }
        Ok(config.sanitized())
    }

    fn candidate_paths() -> Vec<PathBuf> {
        let mut paths = vec![PathBuf::from(LOCAL_CONFIG_FILE)];
        if let Some(dir) = dirs::config_dir() {
            paths.push(dir.join("salesdash").join("config.toml"));
        }
        paths
    }

    fn sanitized(mut self) -> Self {
        if self.card_columns == 0 {
            self.card_columns = 1;
        }
        if !(self.amount_divisor.is_finite() && self.amount_divisor > 0.0) {
            self.amount_divisor = Self::default().amount_divisor;
        }
        self
    }
}
