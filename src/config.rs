//! Engine configuration.
//!
//! The defaults target the property-notification / GUI-binding framework the
//! built-in rules were written for. Everything the templates hard-wire about
//! that framework (base type, interface, color factory) lives here so a driver
//! can point the same rules at a compatible runtime.

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EngineConfig {
    /// Fully-qualified base type an owner must derive from for backing-field markers.
    pub capable_base_type: String,
    /// Fully-qualified change-notification interface.
    pub change_notification_interface: String,
    /// Conventional suffix stripped from marker names before rule lookup.
    pub marker_suffix: String,
    /// Icon pack used when an `IconPack` marker names none.
    pub default_icon_pack: String,
    /// Expression used to build a color from `(a, r, g, b)` in theme lookups.
    pub color_factory: String,
    pub indent_width: usize,
    pub emit_regions: bool,
    /// Extension appended to every output id.
    pub output_extension: String,
}

impl Default for EngineConfig {
    fn default() -> Self {
        EngineConfig {
            capable_base_type: "System.Windows.DependencyObject".to_string(),
            change_notification_interface: "System.ComponentModel.INotifyPropertyChanged".to_string(),
            marker_suffix: "Attribute".to_string(),
            default_icon_pack: "Mdl2Assets".to_string(),
            color_factory: "global::System.Windows.Media.Color.FromArgb".to_string(),
            indent_width: 4,
            emit_regions: true,
            output_extension: "g.cs".to_string(),
        }
    }
}

impl EngineConfig {
    /// Parse and validate a TOML config. Missing keys keep their defaults.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let config: EngineConfig = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text =
            std::fs::read_to_string(path).map_err(|source| ConfigError::Read { path: path.to_path_buf(), source })?;
        log::debug!("loaded config from {}", path.display());
        Self::from_toml_str(&text)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let required = [
            ("capable_base_type", &self.capable_base_type),
            ("change_notification_interface", &self.change_notification_interface),
            ("color_factory", &self.color_factory),
            ("output_extension", &self.output_extension),
        ];
        for (field, value) in required {
            if value.trim().is_empty() {
                return Err(ConfigError::Invalid { field, message: "must not be empty".to_string() });
            }
        }

        if !(1..=16).contains(&self.indent_width) {
            return Err(ConfigError::Invalid {
                field: "indent_width",
                message: format!("{} is outside 1..=16", self.indent_width),
            });
        }

        Ok(())
    }
}
