use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::data::loader::{LoadOptions, DEFAULT_SHEET};
use crate::data::EmptyDatePolicy;

const CONFIG_ENV: &str = "INVENTORY_DASHBOARD_CONFIG";

const DEFAULT_DATA_URL: &str = "https://raw.githubusercontent.com/Bilalkhawaja001/inventory-dashboard/main/Fixed_Inventory_Management.xlsx";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SourceConfig {
    /// Local path or http(s) URL of the inventory spreadsheet.
    #[serde(default = "default_data")]
    pub data: String,
    #[serde(default = "default_sheet")]
    pub sheet: String,
    /// Optional logo image, path or URL.
    #[serde(default)]
    pub logo: Option<String>,
    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

fn default_data() -> String {
    DEFAULT_DATA_URL.into()
}
fn default_sheet() -> String {
    DEFAULT_SHEET.into()
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            data: default_data(),
            sheet: default_sheet(),
            logo: None,
            timeout_secs: None,
        }
    }
}

impl SourceConfig {
    pub fn load_options(&self) -> LoadOptions {
        LoadOptions {
            sheet: self.sheet.clone(),
            timeout: self.timeout_secs.map(Duration::from_secs),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DisplayConfig {
    #[serde(default = "default_title")]
    pub title: String,
    #[serde(default = "default_subtitle")]
    pub subtitle: String,
    #[serde(default = "default_banner")]
    pub banner: String,
    #[serde(default = "default_row_height")]
    pub row_height: f32,
}

fn default_title() -> String {
    "Centralized Mess".into()
}
fn default_subtitle() -> String {
    "Liberty Eco Campus Nooriabad".into()
}
fn default_banner() -> String {
    "INVENTORY MANAGEMENT".into()
}
fn default_row_height() -> f32 {
    20.0
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            title: default_title(),
            subtitle: default_subtitle(),
            banner: default_banner(),
            row_height: default_row_height(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FilterConfig {
    #[serde(default)]
    pub empty_date: EmptyDatePolicy,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub source: SourceConfig,
    #[serde(default)]
    pub display: DisplayConfig,
    #[serde(default)]
    pub filters: FilterConfig,
}

impl Config {
    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("inventory-dashboard")
            .join("config.toml")
    }

    /// Load from `explicit`, else `$INVENTORY_DASHBOARD_CONFIG`, else the
    /// default location. A missing file yields the defaults.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let path = match explicit {
            Some(p) => p.to_path_buf(),
            None => std::env::var_os(CONFIG_ENV)
                .map(PathBuf::from)
                .unwrap_or_else(Self::config_path),
        };
        if !path.exists() {
            if explicit.is_some() {
                anyhow::bail!("config file {} does not exist", path.display());
            }
            log::debug!("No config at {}, using defaults", path.display());
            return Ok(Self::default());
        }
        Self::from_file(&path)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        let cfg: Self = toml::from_str(&content)
            .with_context(|| format!("parsing config {}", path.display()))?;
        log::info!("Using config {}", path.display());
        Ok(cfg)
    }
}
