//! Configuration system
//!
//! Scene descriptions and physics settings are plain serde types. Anything
//! implementing [`Config`] can be read from or written to TOML or RON, with
//! the format picked from the file extension.

use std::path::Path;

pub use serde::{Deserialize, Serialize};

use crate::entity::{EntityDesc, EntityError, PhysicsConfig, Xyz};

/// Supported configuration file formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    /// TOML
    Toml,
    /// Rusty Object Notation
    Ron,
}

impl ConfigFormat {
    /// Pick the format from a file extension
    pub fn from_path(path: &Path) -> Option<Self> {
        match path.extension()?.to_str()? {
            "toml" => Some(Self::Toml),
            "ron" => Some(Self::Ron),
            _ => None,
        }
    }
}

/// Configuration trait
pub trait Config: Serialize + for<'de> Deserialize<'de> + Default {
    /// Parse configuration text in the given format
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] if the text is not valid for the format.
    fn parse(contents: &str, format: ConfigFormat) -> Result<Self, ConfigError> {
        match format {
            ConfigFormat::Toml => toml::from_str(contents).map_err(|e| ConfigError::Parse(e.to_string())),
            ConfigFormat::Ron => ron::from_str(contents).map_err(|e| ConfigError::Parse(e.to_string())),
        }
    }

    /// Render the configuration as text in the given format
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Serialize`] if the value cannot be represented.
    fn render(&self, format: ConfigFormat) -> Result<String, ConfigError> {
        match format {
            ConfigFormat::Toml => toml::to_string_pretty(self).map_err(|e| ConfigError::Serialize(e.to_string())),
            ConfigFormat::Ron => ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default())
                .map_err(|e| ConfigError::Serialize(e.to_string())),
        }
    }

    /// Load configuration from file
    ///
    /// # Errors
    ///
    /// Returns an error if the extension is unknown, or the file cannot be
    /// read or parsed.
    fn load_from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let format = ConfigFormat::from_path(path)
            .ok_or_else(|| ConfigError::UnsupportedFormat(path.display().to_string()))?;
        let contents = std::fs::read_to_string(path)?;
        log::debug!("Loading {:?} configuration from {}", format, path.display());
        Self::parse(&contents, format)
    }

    /// Save configuration to file
    ///
    /// # Errors
    ///
    /// Returns an error if the extension is unknown, or the value cannot be
    /// serialized or written.
    fn save_to_file(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let path = path.as_ref();
        let format = ConfigFormat::from_path(path)
            .ok_or_else(|| ConfigError::UnsupportedFormat(path.display().to_string()))?;
        std::fs::write(path, self.render(format)?)?;
        Ok(())
    }
}

/// Configuration errors
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Parse error
    #[error("Parse error: {0}")]
    Parse(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialize(String),

    /// Unsupported format
    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),

    /// A description parsed but could not be turned into an entity
    #[error("Invalid entity description: {0}")]
    Entity(#[from] EntityError),
}

/// Physics settings as written in a scene file; missing values use the defaults
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PhysicsSettings {
    /// Simulation step in seconds
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestep: Option<f32>,
    /// Gravity acceleration
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gravity: Option<Xyz>,
}

impl PhysicsSettings {
    /// Merge onto [`PhysicsConfig::default`]
    ///
    /// A timestep that is not strictly positive is ignored.
    pub fn resolve(&self) -> PhysicsConfig {
        let mut config = PhysicsConfig::default();
        match self.timestep {
            Some(timestep) if timestep > 0.0 => config.timestep = timestep,
            Some(timestep) => log::warn!("Ignoring non-positive physics timestep {timestep}"),
            None => {}
        }
        if let Some(gravity) = self.gravity {
            config.gravity = gravity.into();
        }
        config
    }
}

/// A whole scene: physics settings plus the root entity descriptions
#[derive(Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    /// Physics settings
    pub physics: PhysicsSettings,
    /// Root entities in traversal order
    pub entities: Vec<EntityDesc>,
}

impl Config for SceneConfig {}
