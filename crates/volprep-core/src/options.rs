//! Configuration options for volprep.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Result, VolumeError};

/// Largest 3D texture edge accepted by the renderer.
pub const DEFAULT_MAX_TEXTURE_DIMENSION: u32 = 2048;

/// Options controlling how textures are prepared from a scalar field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Options {
    /// Fields with any dimension above this are downscaled until they fit.
    pub max_texture_dimension: u32,

    /// Upper bound in bytes for a single intermediate texture buffer.
    ///
    /// `None` means only an actual allocation failure triggers the fallback path.
    pub staging_budget_bytes: Option<usize>,

    /// Encoding used for gradient textures.
    pub gradient_format: GradientFormat,

    /// Value written to every voxel of a data texture built on the fallback path.
    pub data_placeholder: f32,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            max_texture_dimension: DEFAULT_MAX_TEXTURE_DIMENSION,
            staging_budget_bytes: None,
            gradient_format: GradientFormat::default(),
            data_placeholder: 0.0,
        }
    }
}

impl Options {
    /// Creates options with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the maximum texture dimension.
    pub fn with_max_texture_dimension(mut self, max: u32) -> Self {
        self.max_texture_dimension = max;
        self
    }

    /// Sets the staging budget.
    pub fn with_staging_budget(mut self, bytes: Option<usize>) -> Self {
        self.staging_budget_bytes = bytes;
        self
    }

    /// Sets the gradient format.
    pub fn with_gradient_format(mut self, format: GradientFormat) -> Self {
        self.gradient_format = format;
        self
    }

    /// Parses options from a JSON string. Missing keys take their defaults.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let options: Self = serde_json::from_str(json)?;
        options.validate()?;
        Ok(options)
    }

    /// Loads options from a JSON file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path.as_ref())?;
        let options = Self::from_json_str(&text)?;
        log::debug!("loaded options from {}", path.as_ref().display());
        Ok(options)
    }

    /// Checks that all values are usable.
    pub fn validate(&self) -> Result<()> {
        if self.max_texture_dimension == 0 {
            return Err(VolumeError::InvalidOption(
                "max_texture_dimension must be at least 1".to_string(),
            ));
        }
        if !self.data_placeholder.is_finite() {
            return Err(VolumeError::InvalidOption(format!(
                "data_placeholder must be finite, got {}",
                self.data_placeholder
            )));
        }
        Ok(())
    }
}

/// Texel encoding for gradient textures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum GradientFormat {
    /// Four 32-bit floats per voxel.
    #[default]
    Rgba32Float,
    /// Four 16-bit floats per voxel.
    Rgba16Float,
}
