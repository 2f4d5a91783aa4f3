//! TOML configuration: discovery, parsing, validation, and the
//! `--init-config` template.
//!
//! Every section has workable defaults, so a missing file is not an error
//! and a partial file only overrides what it names.

use crate::constants::{
    CONFIG_GENERATED, GENERATION_MAX_ORDERS, GENERATION_MAX_TICKETS_PER_ORDER, GENERATION_MIN_ORDERS,
    SIDEBAR_DEFAULT_WIDTH, SIDEBAR_MAX_WIDTH, SIDEBAR_MIN_WIDTH,
};
use crate::utils::datetime;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub ui: UiConfig,
    pub display: DisplayConfig,
    pub api: ApiConfig,
    pub logging: LoggingConfig,
    pub generation: GenerationDefaults,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct UiConfig {
    /// Section to open on startup: "events", "artists", "venues",
    /// "organizations", or "promo-codes"
    pub default_section: String,
    /// Sidebar clicks and scroll wheel section switching
    pub mouse_enabled: bool,
    /// Sidebar width in columns, clamped at render time
    pub sidebar_width: u16,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    /// strftime format for event dates and promo expirations
    pub date_format: String,
    /// strftime format for the time part of datetime fields
    pub time_format: String,
    /// Show the click counter column in the events roster
    pub show_clicks: bool,
}

/// Data API configuration
///
/// Credentials never live in the file itself; the config names the
/// environment variables they are read from.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Environment variable holding the data API base URL
    pub url_env: String,
    /// Environment variable holding the data API service key
    pub key_env: String,
    /// Object storage bucket for uploaded images
    pub storage_bucket: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct LoggingConfig {
    /// Mirror the in-app log buffer to a file under the data directory
    pub enabled: bool,
}

/// Defaults pre-filled into the mock data generation dialog
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationDefaults {
    pub order_count: u32,
    pub max_tickets_per_order: u32,
    pub rsvp_ratio: f64,
    pub free_ratio: f64,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            default_section: "events".to_string(),
            mouse_enabled: true,
            sidebar_width: SIDEBAR_DEFAULT_WIDTH,
        }
    }
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            date_format: datetime::DATE_FORMAT.to_string(),
            time_format: "%H:%M".to_string(),
            show_clicks: true,
        }
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            url_env: "USHER_API_URL".to_string(),
            key_env: "USHER_API_KEY".to_string(),
            storage_bucket: "media".to_string(),
        }
    }
}

impl Default for GenerationDefaults {
    fn default() -> Self {
        Self {
            order_count: 25,
            max_tickets_per_order: 4,
            rsvp_ratio: 0.3,
            free_ratio: 0.1,
        }
    }
}

impl Config {
    /// Load the first config file found, or fall back to defaults.
    pub fn load() -> Result<Self> {
        match Self::find_config_file()? {
            Some(path) => Self::load_from_file(&path),
            None => Ok(Self::default()),
        }
    }

    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        let config: Config = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;
        config.validate()?;
        Ok(config)
    }

    /// A `usher.toml` in the working directory wins over the XDG location.
    fn find_config_file() -> Result<Option<PathBuf>> {
        let local = PathBuf::from("usher.toml");
        if local.exists() {
            return Ok(Some(local));
        }

        if let Some(config_dir) = dirs::config_dir() {
            let xdg = config_dir.join("usher").join("config.toml");
            if xdg.exists() {
                return Ok(Some(xdg));
            }
        }

        Ok(None)
    }

    /// Reject values the UI or the generation dialog could not honor.
    pub fn validate(&self) -> Result<()> {
        if self.ui.sidebar_width < SIDEBAR_MIN_WIDTH || self.ui.sidebar_width > SIDEBAR_MAX_WIDTH {
            anyhow::bail!(
                "sidebar_width must be between {} and {} columns, got {}",
                SIDEBAR_MIN_WIDTH,
                SIDEBAR_MAX_WIDTH,
                self.ui.sidebar_width
            );
        }

        let valid_sections = ["events", "artists", "venues", "organizations", "promo-codes"];
        if !valid_sections.contains(&self.ui.default_section.as_str()) {
            anyhow::bail!(
                "default_section must be one of {}, got '{}'",
                valid_sections.join(", "),
                self.ui.default_section
            );
        }

        // A format string is good if it can round a known value through
        if let Err(e) = chrono::NaiveDate::parse_from_str("2025-01-01", &self.display.date_format) {
            anyhow::bail!("Invalid date_format '{}': {}", self.display.date_format, e);
        }
        if let Err(e) = chrono::NaiveTime::parse_from_str("12:00", &self.display.time_format) {
            anyhow::bail!("Invalid time_format '{}': {}", self.display.time_format, e);
        }

        if self.api.url_env.is_empty() {
            anyhow::bail!("api.url_env cannot be empty");
        }
        if self.api.key_env.is_empty() {
            anyhow::bail!("api.key_env cannot be empty");
        }
        if self.api.storage_bucket.is_empty() {
            anyhow::bail!("api.storage_bucket cannot be empty");
        }

        // Generation defaults obey the same bounds the dialog enforces
        if self.generation.order_count < GENERATION_MIN_ORDERS || self.generation.order_count > GENERATION_MAX_ORDERS {
            anyhow::bail!(
                "generation.order_count must be between {} and {}, got {}",
                GENERATION_MIN_ORDERS,
                GENERATION_MAX_ORDERS,
                self.generation.order_count
            );
        }
        if self.generation.max_tickets_per_order < 1
            || self.generation.max_tickets_per_order > GENERATION_MAX_TICKETS_PER_ORDER
        {
            anyhow::bail!(
                "generation.max_tickets_per_order must be between 1 and {}, got {}",
                GENERATION_MAX_TICKETS_PER_ORDER,
                self.generation.max_tickets_per_order
            );
        }
        for (name, ratio) in [
            ("generation.rsvp_ratio", self.generation.rsvp_ratio),
            ("generation.free_ratio", self.generation.free_ratio),
        ] {
            if !(0.0..=1.0).contains(&ratio) {
                anyhow::bail!("{} must be between 0.0 and 1.0, got {}", name, ratio);
            }
        }

        Ok(())
    }

    /// Write a dated template with every default spelled out, for
    /// `usher --init-config`.
    pub fn generate_default_config<P: AsRef<Path>>(path: P) -> Result<()> {
        let path = path.as_ref();
        let body = toml::to_string_pretty(&Self::default()).context("Failed to serialize default config")?;
        let header = format!(
            "# Usher configuration\n# Generated on {}\n\n",
            chrono::Local::now().format(datetime::DATE_FORMAT)
        );

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create config directory: {}", parent.display()))?;
        }
        std::fs::write(path, header + &body)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        println!("{}: {}", CONFIG_GENERATED, path.display());
        Ok(())
    }
}
