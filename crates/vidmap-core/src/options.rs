//! Configuration options for the mapping engine.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::projection::ProjectionOptions;
use crate::transform::TransformConfig;

/// Engine configuration, loadable from JSON.
///
/// Missing fields take their default values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct EngineOptions {
    /// How the UV table is derived from the model.
    pub projection: ProjectionOptions,

    /// The UV transform applied before sampling.
    pub transform: TransformConfig,
}

impl EngineOptions {
    /// Creates options with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the projection options.
    pub fn with_projection(mut self, projection: ProjectionOptions) -> Self {
        self.projection = projection;
        self
    }

    /// Sets the transform configuration.
    pub fn with_transform(mut self, transform: TransformConfig) -> Self {
        self.transform = transform;
        self
    }

    /// Parses options from a JSON string and validates them.
    pub fn from_json(json: &str) -> Result<Self> {
        let options: Self = serde_json::from_str(json)?;
        options.transform.validate()?;
        Ok(options)
    }

    /// Loads options from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Serializes the options as pretty-printed JSON.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
