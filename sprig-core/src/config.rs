//! Runtime configuration.
//!
//! A [`Config`] is handed to [`mount`](crate::mount) and shared by every
//! context in the mounted tree.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Default id of the element the root view replaces.
pub const DEFAULT_ROOT_ID: &str = "root";

/// Settings for a mounted tree.
///
/// Missing fields take their defaults when deserializing:
///
/// ```rust
/// use sprig_core::Config;
///
/// let config = Config::from_json(r#"{ "root_id": "app" }"#).unwrap();
/// assert_eq!(config.root_id, "app");
/// assert!(config.dump_on_patch_error);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Id of the element replaced by the root view.
    pub root_id: String,

    /// Log outlines of both trees when a rebuild fails to patch.
    pub dump_on_patch_error: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            root_id: String::from(DEFAULT_ROOT_ID),
            dump_on_patch_error: true,
        }
    }
}

impl Config {
    /// Parse a config from JSON.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Use a different mount element.
    pub fn with_root_id(mut self, root_id: impl Into<String>) -> Self {
        self.root_id = root_id.into();
        self
    }
}
