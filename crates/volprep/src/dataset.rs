//! A scalar field bundled with everything needed to texture it.

use std::sync::Arc;

use glam::Vec3;
use volprep_core::{ClassificationTable, Options, Result, ScalarField, ValueBounds};
use volprep_texture::{
    build_color_texture, build_data_texture, build_gradient_texture, ColorTexture, DataTexture,
    GradientTexture,
};

/// An imported volume ready for texture preparation.
///
/// Owns its field. Downscaling replaces the field wholesale, so textures
/// built before a downscale describe the old resolution and must be rebuilt.
#[derive(Debug, Clone)]
pub struct VolumeDataset {
    field: ScalarField,
    table: Arc<ClassificationTable>,
    options: Options,
}

impl VolumeDataset {
    /// Creates a dataset with default options.
    pub fn new(field: ScalarField, table: Arc<ClassificationTable>) -> Self {
        Self {
            field,
            table,
            options: Options::default(),
        }
    }

    /// Creates a dataset with the given options.
    pub fn with_options(
        field: ScalarField,
        table: Arc<ClassificationTable>,
        options: Options,
    ) -> Result<Self> {
        options.validate()?;
        Ok(Self {
            field,
            table,
            options,
        })
    }

    /// Returns the scalar field.
    pub fn field(&self) -> &ScalarField {
        &self.field
    }

    /// Returns the classification table.
    pub fn table(&self) -> &Arc<ClassificationTable> {
        &self.table
    }

    /// Returns the options.
    pub fn options(&self) -> &Options {
        &self.options
    }

    /// Consumes the dataset, returning its field.
    pub fn into_field(self) -> ScalarField {
        self.field
    }

    /// Swaps in a new field, returning the previous one.
    pub fn replace_field(&mut self, field: ScalarField) -> ScalarField {
        std::mem::replace(&mut self.field, field)
    }

    /// Downscales until no dimension exceeds the configured maximum.
    ///
    /// Returns the number of passes performed.
    pub fn fix_dimensions(&mut self) -> u32 {
        let passes = self
            .field
            .fit_to_dimension(self.options.max_texture_dimension);
        if passes > 0 {
            log::info!(
                "'{}' downscaled {} times to {:?}",
                self.field.name(),
                passes,
                self.field.dims()
            );
        }
        passes
    }

    /// Halves the resolution once.
    pub fn downscale(&mut self) {
        self.field = self.field.downscaled();
    }

    /// Returns the cached `(min, max)` of the field.
    pub fn value_bounds(&self) -> ValueBounds {
        self.field.value_bounds()
    }

    /// Builds the classified intensity texture.
    pub fn data_texture(&self) -> DataTexture {
        build_data_texture(&self.field, &self.table, &self.options)
    }

    /// Builds the classified color texture.
    pub fn color_texture(&self) -> ColorTexture {
        build_color_texture(&self.field, &self.table, &self.options)
    }

    /// Builds the gradient texture.
    pub fn gradient_texture(&self) -> GradientTexture {
        build_gradient_texture(&self.field, &self.options)
    }

    /// Object scale that preserves the voxel aspect ratio, if the voxel size is known.
    pub fn object_scale(&self) -> Option<Vec3> {
        self.field.normalized_scale()
    }
}
