//! Configuration file support for sawplan.
//!
//! Configuration is loaded from `$XDG_CONFIG_HOME/sawplan/config.toml`.
//! A loaded [`MillConfig`] is an immutable value handed to the catalog and
//! the cant resolver; nothing reads it from global state.

use crate::{BoardProfile, Error, Result, RowHeightPolicy};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Application configuration
#[derive(Clone, Debug, Serialize, Deserialize, Default)]
pub struct MillConfig {
    #[serde(default)]
    pub mill: ThroatConfig,

    #[serde(default)]
    pub cutting: CuttingConfig,

    #[serde(default)]
    pub defaults: DefaultsConfig,

    #[serde(default)]
    pub limits: InputLimits,

    #[serde(default)]
    pub catalog: CatalogConfig,
}

/// Sawmill throat opening, in inches
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ThroatConfig {
    #[serde(default = "default_throat_width")]
    pub throat_width: f64,

    #[serde(default = "default_throat_height")]
    pub throat_height: f64,

    /// Profile whose selection triggers flattening of oversized logs
    #[serde(default = "default_flattening_profile")]
    pub flattening_profile: String,
}

impl Default for ThroatConfig {
    fn default() -> Self {
        Self {
            throat_width: default_throat_width(),
            throat_height: default_throat_height(),
            flattening_profile: default_flattening_profile(),
        }
    }
}

/// Blade and packing parameters
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CuttingConfig {
    #[serde(default = "default_kerf")]
    pub kerf: f64,

    #[serde(default)]
    pub row_height: RowHeightPolicy,
}

impl Default for CuttingConfig {
    fn default() -> Self {
        Self {
            kerf: default_kerf(),
            row_height: RowHeightPolicy::default(),
        }
    }
}

/// Values the CLI uses when the user leaves an input out
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct DefaultsConfig {
    #[serde(default = "default_boards")]
    pub boards: Vec<String>,

    #[serde(default = "default_log_diameter")]
    pub log_diameter: f64,

    #[serde(default = "default_log_length")]
    pub log_length: f64,
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            boards: default_boards(),
            log_diameter: default_log_diameter(),
            log_length: default_log_length(),
        }
    }
}

/// Smallest inputs a caller should accept
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct InputLimits {
    #[serde(default = "default_min_diameter")]
    pub min_diameter: f64,

    #[serde(default = "default_min_length")]
    pub min_length: f64,

    #[serde(default = "default_min_kerf")]
    pub min_kerf: f64,
}

impl Default for InputLimits {
    fn default() -> Self {
        Self {
            min_diameter: default_min_diameter(),
            min_length: default_min_length(),
            min_kerf: default_min_kerf(),
        }
    }
}

/// Extra board profiles appended to the built-in catalog
#[derive(Clone, Debug, Serialize, Deserialize, Default)]
pub struct CatalogConfig {
    #[serde(default)]
    pub custom: Vec<BoardProfile>,
}

// Default value functions
fn default_throat_width() -> f64 {
    36.0
}

fn default_throat_height() -> f64 {
    22.0
}

fn default_flattening_profile() -> String {
    crate::catalog::LIVE_EDGE_SLABS.into()
}

fn default_kerf() -> f64 {
    0.125
}

fn default_boards() -> Vec<String> {
    vec!["2x6".into(), "4x4".into()]
}

fn default_log_diameter() -> f64 {
    20.0
}

fn default_log_length() -> f64 {
    96.0
}

fn default_min_diameter() -> f64 {
    6.0
}

fn default_min_length() -> f64 {
    12.0
}

fn default_min_kerf() -> f64 {
    0.05
}

impl MillConfig {
    /// Load configuration from the standard config path
    pub fn load() -> Result<Self> {
        let config_path = Self::default_config_path()?;
        if config_path.exists() {
            Self::load_from(&config_path)
        } else {
            tracing::info!(
                "No config file found at {:?}, using defaults",
                config_path
            );
            Ok(Self::default())
        }
    }

    /// Load configuration from a specific path
    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: MillConfig = toml::from_str(&contents)?;
        config.validate()?;
        tracing::info!("Loaded config from {:?}", path);
        Ok(config)
    }

    /// Get the default config file path
    pub fn default_config_path() -> Result<PathBuf> {
        let base = dirs::config_dir()
            .ok_or_else(|| Error::Config("Cannot determine config directory".into()))?;
        Ok(base.join("sawplan").join("config.toml"))
    }

    /// Save the current configuration to a specific path
    pub fn save_to(&self, path: &Path) -> Result<()> {
        // Ensure parent directory exists
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        std::fs::write(path, self.to_toml_string()?)?;
        tracing::info!("Saved config to {:?}", path);
        Ok(())
    }

    /// Render the configuration as TOML
    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string_pretty(self)
            .map_err(|e| Error::Config(format!("Failed to serialize config: {}", e)))
    }

    /// Reject values the planner can't work with
    pub fn validate(&self) -> Result<()> {
        let positive = [
            ("mill.throat_width", self.mill.throat_width),
            ("mill.throat_height", self.mill.throat_height),
            ("cutting.kerf", self.cutting.kerf),
            ("defaults.log_diameter", self.defaults.log_diameter),
            ("defaults.log_length", self.defaults.log_length),
        ];
        for (key, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                return Err(Error::Config(format!("{} must be positive, got {}", key, value)));
            }
        }

        let limits = [
            ("limits.min_diameter", self.limits.min_diameter),
            ("limits.min_length", self.limits.min_length),
            ("limits.min_kerf", self.limits.min_kerf),
        ];
        for (key, value) in limits {
            if !(value.is_finite() && value >= 0.0) {
                return Err(Error::Config(format!("{} must not be negative, got {}", key, value)));
            }
        }

        // The slab profile is throat_width - 1 wide
        if self.mill.throat_width <= 1.0 {
            return Err(Error::Config(format!(
                "mill.throat_width must exceed 1 inch, got {}",
                self.mill.throat_width
            )));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = MillConfig::default();
        assert_eq!(config.mill.throat_width, 36.0);
        assert_eq!(config.mill.throat_height, 22.0);
        assert_eq!(config.mill.flattening_profile, "Live Edge Slabs");
        assert_eq!(config.cutting.kerf, 0.125);
        assert_eq!(config.cutting.row_height, RowHeightPolicy::LastPlaced);
        assert_eq!(config.defaults.boards, vec!["2x6", "4x4"]);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_roundtrip() {
        let config = MillConfig::default();
        let toml_str = toml::to_string(&config).unwrap();
        let parsed: MillConfig = toml::from_str(&toml_str).unwrap();

        assert_eq!(config.mill.throat_height, parsed.mill.throat_height);
        assert_eq!(config.defaults.boards, parsed.defaults.boards);
    }

    #[test]
    fn test_partial_config() {
        let toml_str = r#"
[mill]
throat_height = 20.5

[cutting]
row_height = "tallest"
"#;
        let config: MillConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.mill.throat_height, 20.5);
        assert_eq!(config.mill.throat_width, 36.0); // default
        assert_eq!(config.cutting.kerf, 0.125); // default
        assert_eq!(config.cutting.row_height, RowHeightPolicy::Tallest);
    }

    #[test]
    fn test_custom_profiles_parse() {
        let toml_str = r#"
[[catalog.custom]]
label = "2x4"
width = 4.0
height = 2.0
"#;
        let config: MillConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.catalog.custom.len(), 1);
        assert_eq!(config.catalog.custom[0].label, "2x4");
    }

    #[test]
    fn test_validate_rejects_non_positive_kerf() {
        let mut config = MillConfig::default();
        config.cutting.kerf = 0.0;
        assert!(matches!(config.validate(), Err(Error::Config(_))));
    }

    #[test]
    fn test_save_and_load_from() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let mut config = MillConfig::default();
        config.mill.throat_height = 18.0;
        config.save_to(&path).unwrap();

        let loaded = MillConfig::load_from(&path).unwrap();
        assert_eq!(loaded.mill.throat_height, 18.0);
    }

    #[test]
    fn test_load_from_rejects_invalid_values() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[mill]\nthroat_height = -3.0\n").unwrap();

        assert!(matches!(
            MillConfig::load_from(&path),
            Err(Error::Config(_))
        ));
    }
}
