use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, Result};
use crate::selection::{HighlightPolicy, SelectionMode};
use crate::tessellation::MeshParams;

/// Session-wide viewer settings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewerConfig {
    /// Whether picks select faces or whole volumes.
    pub mode: SelectionMode,
    /// Display colors for normal and highlighted faces.
    pub policy: HighlightPolicy,
    /// Parameters forwarded to the kernel's mesher.
    pub mesh: MeshParams,
}

impl ViewerConfig {
    /// Parses a JSON configuration. Missing fields take their defaults.
    ///
    /// # Errors
    ///
    /// Returns an error if `json` is not a valid configuration.
    pub fn from_json(json: &str) -> Result<Self> {
        let config = serde_json::from_str(json).map_err(ConfigError::from)?;
        Ok(config)
    }
}
