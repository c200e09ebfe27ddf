//! Toolkit configuration
//!
//! Every section is optional in the file; missing values take their defaults.
//!
//! ```toml
//! [bounds]
//! method = "RendererBounds"
//! flatten_preference = "FlattenAuto"
//!
//! [manipulation]
//! drag_multiplier = 1.5
//! permitted_operations = "DRAG | SCALE_UNIFORM | ROTATE_Y"
//!
//! [app_bar]
//! timeout = true
//! timeout_interval = 8.0
//!
//! [profiles.poster]
//! permitted_operations = "DRAG | SCALE_UNIFORM"
//! flatten_preference = "FlattenZ"
//! show_app_bar = false
//! ```

use std::collections::BTreeMap;
use std::path::Path;
use std::str::FromStr;

use hux_appbar::AppBarConfig;
use hux_bounds::{BoundsSettings, GizmoConfig};
use hux_input::InputConfig;
use hux_manipulate::ManipulationConfig;
use log::{info, warn};
use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, ConfigResult};
use crate::profile::TargetProfile;

/// Environment variable naming the configuration file
pub const CONFIG_ENV: &str = "HUX_CONFIG";

/// All toolkit settings
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct HuxConfig {
    pub bounds: BoundsSettings,
    pub gizmo: GizmoConfig,
    pub manipulation: ManipulationConfig,
    pub app_bar: AppBarConfig,
    pub input: InputConfig,
    /// Profiles by name, chosen when selecting a target
    pub profiles: BTreeMap<String, TargetProfile>,
}

impl HuxConfig {
    /// Load and validate a TOML file
    pub fn load(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        let config: Self = content.parse()?;
        info!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    /// Load from the file named by `HUX_CONFIG`, or fall back to defaults when unset
    pub fn from_env() -> ConfigResult<Self> {
        match std::env::var(CONFIG_ENV) {
            Ok(path) if !path.is_empty() => Self::load(path),
            _ => {
                info!("{} not set, using default configuration", CONFIG_ENV);
                Ok(Self::default())
            }
        }
    }

    /// Profile by name. Unknown names fall back to the default profile.
    pub fn profile(&self, name: Option<&str>) -> TargetProfile {
        match name {
            None => TargetProfile::default(),
            Some(name) => self.profiles.get(name).cloned().unwrap_or_else(|| {
                warn!("Unknown target profile '{}', using defaults", name);
                TargetProfile::default()
            }),
        }
    }

    /// Check every section
    pub fn validate(&self) -> ConfigResult<()> {
        self.bounds.validate()?;
        self.gizmo.validate()?;
        self.manipulation.validate()?;
        self.app_bar.validate()?;
        self.input.validate()?;
        for advisory in self.bounds.advisories() {
            warn!("{}", advisory);
        }
        Ok(())
    }
}

impl FromStr for HuxConfig {
    type Err = ConfigError;

    /// Parse and validate TOML text
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let config: Self = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }
}
