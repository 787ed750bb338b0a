//! Dense 3D scalar fields.

use std::sync::OnceLock;

use glam::{UVec3, Vec3};

use crate::bounds::{compute_bounds, ValueBounds};
use crate::error::{Result, VolumeError};

/// Number of samples in a grid of the given dimensions.
pub fn voxel_count(dims: UVec3) -> usize {
    dims.x as usize * dims.y as usize * dims.z as usize
}

/// A flattened 3D array of samples.
///
/// The sample at `(x, y, z)` is stored at `x + y * dim_x + z * dim_x * dim_y`.
/// Dimensions and data only ever change together: [`ScalarField::replace_data`]
/// and [`ScalarField::downscaled`] both produce a field with a fresh bounds cache.
#[derive(Debug)]
pub struct ScalarField {
    name: String,
    source_path: String,
    dims: UVec3,
    scale: Vec3,
    data: Vec<f32>,
    bounds: OnceLock<ValueBounds>,
}

impl ScalarField {
    /// Creates a new field, checking that `data` matches `dims`.
    pub fn new(name: impl Into<String>, dims: UVec3, data: Vec<f32>) -> Result<Self> {
        let expected = voxel_count(dims);
        if data.len() != expected {
            return Err(VolumeError::SizeMismatch {
                expected,
                actual: data.len(),
            });
        }
        Ok(Self {
            name: name.into(),
            source_path: String::new(),
            dims,
            scale: Vec3::ZERO,
            data,
            bounds: OnceLock::new(),
        })
    }

    /// Creates a field with every sample set to `value`.
    pub fn filled(name: impl Into<String>, dims: UVec3, value: f32) -> Self {
        Self {
            name: name.into(),
            source_path: String::new(),
            dims,
            scale: Vec3::ZERO,
            data: vec![value; voxel_count(dims)],
            bounds: OnceLock::new(),
        }
    }

    /// Sets the physical voxel size.
    pub fn with_scale(mut self, scale: Vec3) -> Self {
        self.scale = scale;
        self
    }

    /// Sets the path the field was imported from.
    pub fn with_source_path(mut self, path: impl Into<String>) -> Self {
        self.source_path = path.into();
        self
    }

    /// Returns the dataset name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the path the field was imported from.
    pub fn source_path(&self) -> &str {
        &self.source_path
    }

    /// Returns the grid dimensions.
    pub fn dims(&self) -> UVec3 {
        self.dims
    }

    /// Returns the physical voxel size (zero when unknown).
    pub fn scale(&self) -> Vec3 {
        self.scale
    }

    /// Returns the samples in storage order.
    pub fn data(&self) -> &[f32] {
        &self.data
    }

    /// Returns the number of samples.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Returns true if the field holds no samples.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Returns the largest of the three dimensions.
    pub fn max_dim(&self) -> u32 {
        self.dims.max_element()
    }

    /// Flat index of `(x, y, z)`.
    #[inline]
    pub fn index(&self, x: u32, y: u32, z: u32) -> usize {
        let dx = self.dims.x as usize;
        let dy = self.dims.y as usize;
        x as usize + y as usize * dx + z as usize * dx * dy
    }

    /// Sample at `(x, y, z)`.
    ///
    /// # Panics
    ///
    /// Panics if the coordinate lies outside the grid.
    #[inline]
    pub fn get(&self, x: u32, y: u32, z: u32) -> f32 {
        self.data[self.index(x, y, z)]
    }

    /// Returns the cached value bounds, computing them on first access.
    pub fn value_bounds(&self) -> ValueBounds {
        *self.bounds.get_or_init(|| {
            let bounds = compute_bounds(&self.data);
            log::debug!(
                "computed bounds of '{}': [{}, {}]",
                self.name,
                bounds.min,
                bounds.max
            );
            bounds
        })
    }

    /// Returns true once the bounds have been computed for the current data.
    pub fn bounds_cached(&self) -> bool {
        self.bounds.get().is_some()
    }

    /// Replaces dimensions and data together, discarding the bounds cache.
    ///
    /// On error the field is left untouched.
    pub fn replace_data(&mut self, dims: UVec3, data: Vec<f32>) -> Result<()> {
        let expected = voxel_count(dims);
        if data.len() != expected {
            return Err(VolumeError::SizeMismatch {
                expected,
                actual: data.len(),
            });
        }
        self.dims = dims;
        self.data = data;
        self.bounds = OnceLock::new();
        Ok(())
    }

    /// Returns the voxel scale divided by its largest component.
    ///
    /// `None` unless all three components are set.
    pub fn normalized_scale(&self) -> Option<Vec3> {
        if self.scale.cmpeq(Vec3::ZERO).any() {
            return None;
        }
        Some(self.scale / self.scale.max_element())
    }

    /// Builds a field sharing this one's metadata but holding new samples.
    pub(crate) fn derive(&self, dims: UVec3, data: Vec<f32>) -> Self {
        debug_assert_eq!(data.len(), voxel_count(dims));
        Self {
            name: self.name.clone(),
            source_path: self.source_path.clone(),
            dims,
            scale: self.scale,
            data,
            bounds: OnceLock::new(),
        }
    }
}

impl Clone for ScalarField {
    fn clone(&self) -> Self {
        let bounds = OnceLock::new();
        if let Some(cached) = self.bounds.get() {
            let _ = bounds.set(*cached);
        }
        Self {
            name: self.name.clone(),
            source_path: self.source_path.clone(),
            dims: self.dims,
            scale: self.scale,
            data: self.data.clone(),
            bounds,
        }
    }
}
