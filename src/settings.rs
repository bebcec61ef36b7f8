use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::constants::{
    DEFAULT_OUTPUT_DIR, DEFAULT_PAGE_SIZE, DEFAULT_RESTAURANT_NAME, DEFAULT_UTC_OFFSET_HOURS,
};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportSettings {
    #[serde(default)]
    pub api_base_url: Option<String>,
    #[serde(default = "ReportSettings::default_restaurant_name")]
    pub restaurant_name: String,
    #[serde(default = "ReportSettings::default_page_size")]
    pub page_size: u32,
    #[serde(default = "ReportSettings::default_utc_offset_hours")]
    pub utc_offset_hours: i32,
    #[serde(default)]
    pub theme_state_path: Option<PathBuf>,
    #[serde(default = "ReportSettings::default_output_dir")]
    pub output_dir: PathBuf,
}

impl ReportSettings {
    pub fn default_restaurant_name() -> String {
        DEFAULT_RESTAURANT_NAME.to_string()
    }

    pub fn default_page_size() -> u32 {
        DEFAULT_PAGE_SIZE
    }

    pub fn default_utc_offset_hours() -> i32 {
        DEFAULT_UTC_OFFSET_HOURS
    }

    pub fn default_output_dir() -> PathBuf {
        PathBuf::from(DEFAULT_OUTPUT_DIR)
    }

    pub fn api_base_url(&self) -> Result<&str> {
        self.api_base_url
            .as_deref()
            .map(str::trim)
            .filter(|value| !value.is_empty())
            .ok_or_else(|| anyhow::anyhow!("api_base_url must be set in the report settings"))
    }
}

impl Default for ReportSettings {
    fn default() -> Self {
        Self {
            api_base_url: None,
            restaurant_name: Self::default_restaurant_name(),
            page_size: Self::default_page_size(),
            utc_offset_hours: Self::default_utc_offset_hours(),
            theme_state_path: None,
            output_dir: Self::default_output_dir(),
        }
    }
}

/// Loads settings from a YAML file. A missing file yields the defaults; an
/// unreadable or malformed one is an error.
pub fn load_settings(path: &Path) -> Result<ReportSettings> {
    if !path.exists() {
        return Ok(ReportSettings::default());
    }

    let contents = fs::read_to_string(path)
        .with_context(|| format!("failed to read settings from {}", path.display()))?;
    if contents.trim().is_empty() {
        return Ok(ReportSettings::default());
    }

    let mut settings: ReportSettings = serde_yaml::from_str(&contents)
        .with_context(|| format!("failed to parse settings {}", path.display()))?;
    if settings.page_size == 0 {
        anyhow::bail!("page_size in {} must be at least 1", path.display());
    }
    settings.restaurant_name = settings.restaurant_name.trim().to_string();
    if settings.restaurant_name.is_empty() {
        settings.restaurant_name = ReportSettings::default_restaurant_name();
    }
    Ok(settings)
}
