//! User settings
//!
//! Persisted as pretty JSON under the platform config directory. Every field
//! has a default, so partial files and missing files both load.

use crate::constants::{
    DEFAULT_COMMENTS, DEFAULT_DELIMITER, DEFAULT_ESCAPE_CHAR, DEFAULT_PREVIEW_ROWS,
    DEFAULT_QUOTE_CHAR, MAX_SCROLL_VELOCITY, SCROLL_EDGE_THRESHOLD, SCROLL_INTERVAL_MS,
};
use crate::import::ParseConfig;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;
use tracing::{info, warn};

/// Errors reading or writing the settings file
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("settings parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("no config directory on this platform")]
    NoConfigDir,
}

/// Auto-scroll tuning for panel drags
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DragSettings {
    /// Period of the auto-scroll timer
    pub scroll_interval_ms: u64,
    /// Pixels scrolled per tick at full speed
    pub max_scroll_velocity: f64,
    /// Distance from the viewport edge that starts auto-scroll
    pub scroll_edge_threshold: f64,
}

impl Default for DragSettings {
    fn default() -> Self {
        Self {
            scroll_interval_ms: SCROLL_INTERVAL_MS,
            max_scroll_velocity: MAX_SCROLL_VELOCITY,
            scroll_edge_threshold: SCROLL_EDGE_THRESHOLD,
        }
    }
}

impl DragSettings {
    pub fn scroll_interval(&self) -> Duration {
        Duration::from_millis(self.scroll_interval_ms)
    }
}

/// Defaults for import previews
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ImportSettings {
    pub preview_rows: usize,
    pub delimiter: char,
    pub quote_char: char,
    pub escape_char: char,
    pub comments: String,
    pub has_header_row: bool,
}

impl Default for ImportSettings {
    fn default() -> Self {
        Self {
            preview_rows: DEFAULT_PREVIEW_ROWS,
            delimiter: DEFAULT_DELIMITER,
            quote_char: DEFAULT_QUOTE_CHAR,
            escape_char: DEFAULT_ESCAPE_CHAR,
            comments: DEFAULT_COMMENTS.to_string(),
            has_header_row: true,
        }
    }
}

impl ImportSettings {
    /// Parser configuration for a preview with these settings.
    pub fn parse_config(&self) -> ParseConfig {
        ParseConfig {
            delimiter: self.delimiter,
            newline: None,
            quote_char: self.quote_char,
            escape_char: self.escape_char,
            comments: self.comments.clone(),
            preview: self.preview_rows,
            has_header_row: self.has_header_row,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub drag: DragSettings,
    pub import: ImportSettings,
}

/// `<config dir>/panelgrid/settings.json`
pub fn default_settings_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("panelgrid").join("settings.json"))
}

impl Settings {
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }

    /// Load from the default location, falling back to defaults.
    pub fn load() -> Self {
        let Some(path) = default_settings_path() else {
            warn!("No config directory, using default settings");
            return Self::default();
        };

        if !path.exists() {
            return Self::default();
        }

        match Self::load_from(&path) {
            Ok(settings) => {
                info!(path = %path.display(), "Loaded settings");
                settings
            }
            Err(e) => {
                warn!(path = %path.display(), error = %e, "Failed to load settings, using defaults");
                Self::default()
            }
        }
    }

    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Save to the default location.
    pub fn save(&self) -> Result<(), ConfigError> {
        let path = default_settings_path().ok_or(ConfigError::NoConfigDir)?;
        self.save_to(&path)
    }
}
