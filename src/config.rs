//! Configuration file support.
//!
//! Editor preferences and keybindings serialize to a versioned JSON document
//! that can be exported, imported, and kept in the user's config directory.

use serde::{Deserialize, Serialize};

use crate::constants::{
    ARROW_HALF_ANGLE_DEG, ARROW_LENGTH_PX, DEFAULT_GRADE, DEFAULT_HISTORY_DEPTH,
    DEFAULT_STROKE_COLOR, DEFAULT_STROKE_WIDTH, HIT_TOLERANCE,
};
use crate::editor::StrokeStyle;
use crate::keybindings::KeyBindings;
use crate::surface::RenderOptions;

/// Verbosity for the `buho` binary's logger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Off,
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    pub fn to_level_filter(self) -> log::LevelFilter {
        match self {
            LogLevel::Off => log::LevelFilter::Off,
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

/// Format version written to config files; newer files are refused.
pub const CONFIG_VERSION: u32 = 1;

/// Editor configuration that can be exported and imported.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EditorConfig {
    pub version: u32,

    #[serde(default = "default_app_name")]
    pub app_name: String,

    #[serde(default)]
    pub preferences: EditorPreferences,

    #[serde(default)]
    pub keybindings: KeyBindings,
}

fn default_app_name() -> String {
    "buho".to_string()
}

/// Drawing and editing preferences.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorPreferences {
    /// Stroke color for new routes (hex)
    pub stroke_color: String,
    /// Stroke width for new routes, clamped to 1-8 on use
    pub stroke_width: u8,
    /// Grade given to new routes
    pub default_grade: String,
    /// Undo entries kept per scene
    pub history_depth: usize,
    /// Select-tool reach, in normalized units
    pub hit_tolerance: f64,
    /// Arrowhead side length, in surface pixels
    pub arrow_length_px: f64,
    /// Arrowhead half-angle, in degrees
    pub arrow_half_angle_deg: f64,
    pub auto_save: bool,
    /// Quiet period after an edit before auto-saving, in seconds
    pub auto_save_debounce_secs: u64,
    pub log_level: LogLevel,
}

impl Default for EditorPreferences {
    fn default() -> Self {
        Self {
            stroke_color: DEFAULT_STROKE_COLOR.to_string(),
            stroke_width: DEFAULT_STROKE_WIDTH,
            default_grade: DEFAULT_GRADE.to_string(),
            history_depth: DEFAULT_HISTORY_DEPTH,
            hit_tolerance: HIT_TOLERANCE,
            arrow_length_px: ARROW_LENGTH_PX,
            arrow_half_angle_deg: ARROW_HALF_ANGLE_DEG,
            auto_save: true,
            auto_save_debounce_secs: 2,
            log_level: LogLevel::default(),
        }
    }
}

impl EditorPreferences {
    pub fn stroke_style(&self) -> StrokeStyle {
        StrokeStyle::default()
            .with_color(self.stroke_color.clone())
            .with_width(self.stroke_width)
            .with_grade(self.default_grade.clone())
    }

    pub fn render_options(&self) -> RenderOptions {
        RenderOptions {
            arrow_length_px: self.arrow_length_px,
            arrow_half_angle_deg: self.arrow_half_angle_deg,
        }
    }
}

impl EditorConfig {
    pub fn new() -> Self {
        Self {
            version: CONFIG_VERSION,
            app_name: default_app_name(),
            preferences: EditorPreferences::default(),
            keybindings: KeyBindings::default(),
        }
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Deserialize configuration from JSON, rejecting newer format versions.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;

        if config.version > CONFIG_VERSION {
            return Err(ConfigError::VersionTooNew {
                file_version: config.version,
                supported_version: CONFIG_VERSION,
            });
        }

        Ok(config)
    }

    pub fn default_filename() -> &'static str {
        "buho-config.json"
    }

    /// `<config dir>/buho/buho-config.json`.
    #[cfg(not(target_arch = "wasm32"))]
    pub fn default_path() -> Option<std::path::PathBuf> {
        let base = dirs::config_dir().or_else(|| dirs::home_dir().map(|h| h.join(".config")))?;
        Some(base.join("buho").join(Self::default_filename()))
    }

    /// Read a config file. A missing file is `Ok(None)`.
    #[cfg(not(target_arch = "wasm32"))]
    pub fn read_from_path(path: &std::path::Path) -> Result<Option<Self>, ConfigError> {
        let json = match std::fs::read_to_string(path) {
            Ok(json) => json,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        Self::from_json(&json).map(Some)
    }

    /// Like [`Self::read_from_path`], but unreadable files are logged and
    /// treated as absent so startup falls back to defaults.
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load_from_path(path: &std::path::Path) -> Option<Self> {
        match Self::read_from_path(path) {
            Ok(Some(config)) => {
                log::info!("Loaded configuration from {}", path.display());
                Some(config)
            }
            Ok(None) => {
                log::debug!("No config file at {}", path.display());
                None
            }
            Err(e) => {
                log::warn!("Ignoring config file {}: {}", path.display(), e);
                None
            }
        }
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn load_from_default_path() -> Option<Self> {
        Self::load_from_path(&Self::default_path()?)
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn save_to_path(&self, path: &std::path::Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, self.to_json()?)?;
        log::info!("Saved configuration to {:?}", path);
        Ok(())
    }
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Errors from reading or writing configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to parse configuration: {0}")]
    ParseError(#[from] serde_json::Error),

    #[error("Configuration version {file_version} is newer than supported {supported_version}")]
    VersionTooNew {
        file_version: u32,
        supported_version: u32,
    },

    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
}
