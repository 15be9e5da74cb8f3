//! Runtime options with TOML file support.
//!
//! Point count, camera and display settings live here. Options serialize
//! to/from TOML so a viewer can be launched from a saved preset.

mod camera;
mod cloud;
mod display;

use std::path::Path;

pub use camera::CameraOptions;
pub use cloud::{clamp_count, limit_count, CloudOptions, MAX_COUNT};
pub use display::{parse_hex_color, DisplayOptions};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::error::CloudError;

/// Top-level options container. All sub-structs use `#[serde(default)]` so
/// partial TOML files (e.g. only overriding `[cloud]`) work correctly.
#[derive(
    Debug, Clone, Serialize, Deserialize, PartialEq, Default, JsonSchema,
)]
#[serde(default)]
pub struct Options {
    /// Particle cloud parameters.
    pub cloud: CloudOptions,
    /// Camera projection and orbit-control parameters.
    pub camera: CameraOptions,
    /// Background and frame pacing.
    pub display: DisplayOptions,
}

impl Options {
    /// JSON Schema of the options file. The point count range is the one
    /// [`clamp_count`] enforces.
    #[must_use]
    pub fn json_schema() -> schemars::Schema {
        schemars::schema_for!(Options)
    }

    /// Load options from a TOML file. Missing fields use defaults.
    ///
    /// # Errors
    ///
    /// Returns [`CloudError::Io`] if the file cannot be read and
    /// [`CloudError::OptionsParse`] if it is not valid options TOML.
    pub fn load(path: &Path) -> Result<Self, CloudError> {
        let content = std::fs::read_to_string(path).map_err(CloudError::Io)?;
        Self::from_toml(&content)
    }

    /// Parse options from TOML text. Missing fields use defaults.
    ///
    /// # Errors
    ///
    /// Returns [`CloudError::OptionsParse`] on malformed TOML or mistyped
    /// fields.
    pub fn from_toml(content: &str) -> Result<Self, CloudError> {
        toml::from_str(content)
            .map_err(|e| CloudError::OptionsParse(e.to_string()))
    }

    /// Save options to a TOML file (pretty-printed).
    ///
    /// # Errors
    ///
    /// Returns [`CloudError::OptionsParse`] if serialization fails and
    /// [`CloudError::Io`] if the file or its parent directory cannot be
    /// written.
    pub fn save(&self, path: &Path) -> Result<(), CloudError> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| CloudError::OptionsParse(e.to_string()))?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(CloudError::Io)?;
        }
        std::fs::write(path, content).map_err(CloudError::Io)
    }
}
