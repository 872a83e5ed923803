//! Engine-wide configuration.
//!
//! Every field has a default matching the reference look of the diagram, so
//! a caller can pass a partial object (or nothing at all).

use serde::{Deserialize, Serialize};

use crate::error::{MindmapError, Result};
use crate::layout::LayoutConfig;
use crate::viewport::ViewportConfig;

/// Configuration for a [`Diagram`](crate::diagram::Diagram).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EngineConfig {
    pub layout: LayoutConfig,
    pub viewport: ViewportConfig,
    /// Spacing of the background grid in world units.
    pub grid_size: f64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            layout: LayoutConfig::default(),
            viewport: ViewportConfig::default(),
            grid_size: 20.0,
        }
    }
}

impl EngineConfig {
    pub fn validate(&self) -> Result<()> {
        self.layout.validate()?;
        self.viewport.validate()?;
        if !self.grid_size.is_finite() || self.grid_size <= 0.0 {
            return Err(MindmapError::InvalidConfig { field: "gridSize" });
        }
        Ok(())
    }

    /// Parse and validate a JSON configuration object.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)
            .map_err(|err| MindmapError::MalformedConfig(err.to_string()))?;
        config.validate()?;
        Ok(config)
    }
}
