//! Curvemark Settings Crate
//!
//! Loads, validates, and saves the configuration shared by the command-line
//! form and the marker engine.

pub mod config;
pub mod error;

pub use config::{Config, FormDefaults, LengthUnit, OutputSettings};
pub use error::{ConfigError, ConfigResult, SettingsError, SettingsResult};
