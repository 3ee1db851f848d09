//! Configuration file handling for Curvemark
//!
//! Supports JSON and TOML files. The default file lives in the platform
//! configuration directory under `curvemark/config.toml`.
//!
//! Configuration is organized into sections:
//! - Marker constants (edge trim, seam overlap, sleeve geometry)
//! - Form defaults used when the command line leaves a value out
//! - Output location and file stem

use crate::error::{ConfigError, SettingsError, SettingsResult};
pub use curvemark_core::LengthUnit;
use curvemark_marker::{MarkerConfig, MarkerKind};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Defaults for values the form may leave out
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FormDefaults {
    /// Unit of width, height and roll width input
    pub unit: LengthUnit,
    /// Tube sag in millimetres
    pub deflection_mm: f64,
    /// Marker kind
    pub kind: MarkerKind,
    /// Roll width in millimetres, when the shop always cuts from the same roll
    #[serde(skip_serializing_if = "Option::is_none")]
    pub roll_width_mm: Option<f64>,
}

impl Default for FormDefaults {
    fn default() -> Self {
        Self {
            unit: LengthUnit::Centimeters,
            deflection_mm: 10.0,
            kind: MarkerKind::Plain,
            roll_width_mm: None,
        }
    }
}

/// Where marker files are written
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputSettings {
    /// Output directory, relative paths resolve against the working directory
    pub directory: PathBuf,
    /// File stem used when no name is given
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stem: Option<String>,
}

impl Default for OutputSettings {
    fn default() -> Self {
        Self {
            directory: PathBuf::from("."),
            stem: None,
        }
    }
}

/// Complete application configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    /// Marker engine constants
    pub marker: MarkerConfig,
    /// Form defaults
    pub defaults: FormDefaults,
    /// Output settings
    pub output: OutputSettings,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Format {
    Json,
    Toml,
}

fn format_of(path: &Path) -> SettingsResult<Format> {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some("json") => Ok(Format::Json),
        Some("toml") => Ok(Format::Toml),
        other => {
            Err(ConfigError::UnsupportedFormat(other.unwrap_or("<none>").to_string()).into())
        }
    }
}

impl Config {
    /// Create new config with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Default config file location
    pub fn default_path() -> SettingsResult<PathBuf> {
        dirs::config_dir()
            .map(|dir| dir.join("curvemark").join("config.toml"))
            .ok_or_else(|| {
                SettingsError::ConfigDirectory("no configuration directory on this platform".into())
            })
    }

    /// Load config from file (JSON or TOML)
    pub fn load_from_file(path: &Path) -> SettingsResult<Self> {
        let format = format_of(path)?;
        let content = std::fs::read_to_string(path).map_err(|e| {
            SettingsError::LoadError(format!("{}: {}", path.display(), e))
        })?;

        let config: Self = match format {
            Format::Json => serde_json::from_str(&content)?,
            Format::Toml => toml::from_str(&content)?,
        };

        config.validate()?;
        debug!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Load the file at `path`, or the default location when `None`.
    ///
    /// A missing default file yields built-in defaults; an explicit path
    /// must exist.
    pub fn load_or_default(path: Option<&Path>) -> SettingsResult<Self> {
        if let Some(path) = path {
            return Self::load_from_file(path);
        }

        let default_path = match Self::default_path() {
            Ok(p) => p,
            Err(_) => return Ok(Self::default()),
        };
        if default_path.exists() {
            Self::load_from_file(&default_path)
        } else {
            debug!(
                "No config at {}, using built-in defaults",
                default_path.display()
            );
            Ok(Self::default())
        }
    }

    /// Save config to file (JSON or TOML)
    pub fn save_to_file(&self, path: &Path) -> SettingsResult<()> {
        self.validate()?;

        let content = match format_of(path)? {
            Format::Json => serde_json::to_string_pretty(self)?,
            Format::Toml => toml::to_string_pretty(self)?,
        };

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| {
                SettingsError::ConfigDirectory(format!("{}: {}", parent.display(), e))
            })?;
        }
        std::fs::write(path, content)
            .map_err(|e| SettingsError::SaveError(format!("{}: {}", path.display(), e)))?;

        info!("Saved config to {}", path.display());
        Ok(())
    }

    /// Validate configuration
    pub fn validate(&self) -> SettingsResult<()> {
        self.marker.validate().map_err(ConfigError::from)?;

        if !self.defaults.deflection_mm.is_finite() || self.defaults.deflection_mm < 0.0 {
            return Err(ConfigError::ValueOutOfRange {
                key: "defaults.deflection_mm".to_string(),
                value: self.defaults.deflection_mm.to_string(),
            }
            .into());
        }

        if let Some(roll) = self.defaults.roll_width_mm {
            if !roll.is_finite() || roll <= 0.0 {
                return Err(ConfigError::ValueOutOfRange {
                    key: "defaults.roll_width_mm".to_string(),
                    value: roll.to_string(),
                }
                .into());
            }
        }

        if let Some(stem) = &self.output.stem {
            if stem.trim().is_empty() {
                return Err(SettingsError::InvalidSetting {
                    key: "output.stem".to_string(),
                    reason: "must not be empty".to_string(),
                });
            }
        }

        Ok(())
    }
}
