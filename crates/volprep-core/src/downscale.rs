//! Box-filter downscaling of scalar fields.
//!
//! Each pass halves every dimension (rounding up) and replaces each 2x2x2
//! block of samples with its mean, rounded half to even. Blocks cut off by an odd
//! dimension average only the samples that exist.

use glam::UVec3;

use crate::field::{voxel_count, ScalarField};

/// Dimensions after one downscale pass: `ceil(d / 2)` on every axis.
pub fn half_dims(dims: UVec3) -> UVec3 {
    UVec3::new(
        dims.x.div_ceil(2),
        dims.y.div_ceil(2),
        dims.z.div_ceil(2),
    )
}

/// Returns a field at half resolution.
///
/// A field that is already `1x1x1` comes back unchanged.
pub fn downscale(field: &ScalarField) -> ScalarField {
    let dims = field.dims();
    let half = half_dims(dims);
    let mut data = Vec::with_capacity(voxel_count(half));

    for z in 0..half.z {
        for y in 0..half.y {
            for x in 0..half.x {
                data.push(block_average(field, x * 2, y * 2, z * 2).round_ties_even());
            }
        }
    }

    field.derive(half, data)
}

/// Mean of the 2x2x2 block whose low corner is `(x, y, z)`.
///
/// An axis whose second layer falls outside the grid contributes a single
/// layer, so the divisor is 8, 4, 2 or 1.
fn block_average(field: &ScalarField, x: u32, y: u32, z: u32) -> f32 {
    let dims = field.dims();
    let nx = if x + 1 < dims.x { 2 } else { 1 };
    let ny = if y + 1 < dims.y { 2 } else { 1 };
    let nz = if z + 1 < dims.z { 2 } else { 1 };

    let mut sum = 0.0_f64;
    for k in z..z + nz {
        for j in y..y + ny {
            for i in x..x + nx {
                sum += f64::from(field.get(i, j, k));
            }
        }
    }

    #[allow(clippy::cast_possible_truncation)]
    let average = (sum / f64::from(nx * ny * nz)) as f32;
    average
}

/// Number of passes needed to bring `max_dim` down to `limit`.
pub fn passes_needed(max_dim: u32, limit: u32) -> u32 {
    let limit = limit.max(1);
    let mut dim = max_dim;
    let mut passes = 0;
    while dim > limit {
        dim = dim.div_ceil(2);
        passes += 1;
    }
    passes
}

impl ScalarField {
    /// Returns a half-resolution copy of this field.
    #[must_use]
    pub fn downscaled(&self) -> Self {
        downscale(self)
    }

    /// Downscales until no dimension exceeds `limit`, returning the number of passes.
    ///
    /// A `limit` of zero is treated as one.
    pub fn fit_to_dimension(&mut self, limit: u32) -> u32 {
        let limit = limit.max(1);
        let mut passes = 0;
        while self.max_dim() > limit {
            log::warn!(
                "'{}' has dimensions {:?}, exceeding the limit of {}; downscaling by 2 on each axis",
                self.name(),
                self.dims(),
                limit
            );
            *self = downscale(self);
            passes += 1;
        }
        passes
    }
}
