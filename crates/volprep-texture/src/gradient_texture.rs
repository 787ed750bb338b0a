//! Gradient textures for shading.
//!
//! Each texel holds the central-difference gradient of the field in RGB and
//! the normalized sample value in A, all divided by the field's value range.
//! Neighbors past the grid edge are clamped to the edge voxel.

use bytemuck::Pod;
use glam::UVec3;
use half::f16;
use volprep_core::{GradientFormat, Options, Result, ScalarField, ValueBounds};

use crate::format::TextureFormat;
use crate::staging::{try_allocate, BuildOutcome};
use crate::target::{check_target, HostTexture, TextureTarget};

/// Computes gradient texels for a field.
///
/// Differences and normalization run in `f64`, so a value range wider than
/// `f32::MAX` still produces a gradient.
pub struct GradientSampler<'a> {
    field: &'a ScalarField,
    dims: UVec3,
    min: f64,
    range: f64,
}

impl<'a> GradientSampler<'a> {
    /// Creates a sampler using the field's cached bounds.
    pub fn new(field: &'a ScalarField) -> Self {
        Self::with_bounds(field, field.value_bounds())
    }

    /// Creates a sampler normalizing against `bounds`.
    pub fn with_bounds(field: &'a ScalarField, bounds: ValueBounds) -> Self {
        let (min, range) = if bounds.is_empty() {
            (0.0, 0.0)
        } else {
            let min = f64::from(bounds.min);
            (min, f64::from(bounds.max) - min)
        };
        Self {
            field,
            dims: field.dims(),
            min,
            range,
        }
    }

    /// Returns true if every sample has the same value.
    pub fn is_degenerate(&self) -> bool {
        self.range == 0.0
    }

    /// Gradient and alpha at `(x, y, z)`.
    ///
    /// All four channels are zero for a constant field. Channels that are not
    /// finite, such as those touching a NaN sample, are written as zero.
    pub fn texel(&self, x: u32, y: u32, z: u32) -> [f32; 4] {
        if self.is_degenerate() {
            return [0.0; 4];
        }
        let (hx, lx) = (x.saturating_add(1).min(self.dims.x - 1), x.saturating_sub(1));
        let (hy, ly) = (y.saturating_add(1).min(self.dims.y - 1), y.saturating_sub(1));
        let (hz, lz) = (z.saturating_add(1).min(self.dims.z - 1), z.saturating_sub(1));

        [
            self.normalize(self.sample(hx, y, z) - self.sample(lx, y, z)),
            self.normalize(self.sample(x, hy, z) - self.sample(x, ly, z)),
            self.normalize(self.sample(x, y, hz) - self.sample(x, y, lz)),
            self.normalize(self.sample(x, y, z) - self.min),
        ]
    }

    #[inline]
    fn sample(&self, x: u32, y: u32, z: u32) -> f64 {
        f64::from(self.field.get(x, y, z))
    }

    #[inline]
    #[allow(clippy::cast_possible_truncation)]
    fn normalize(&self, delta: f64) -> f32 {
        let value = (delta / self.range) as f32;
        if value.is_finite() {
            value
        } else {
            0.0
        }
    }

    /// Visits every voxel in storage order.
    fn for_each(&self, mut visit: impl FnMut(usize, [f32; 4])) {
        let mut index = 0;
        for z in 0..self.dims.z {
            for y in 0..self.dims.y {
                for x in 0..self.dims.x {
                    visit(index, self.texel(x, y, z));
                    index += 1;
                }
            }
        }
    }
}

/// A gradient texture together with how it was built.
#[derive(Debug, Clone)]
pub struct GradientTexture {
    pub texture: HostTexture,
    pub outcome: BuildOutcome,
}

/// Builds a gradient texture for `field` in host memory.
pub fn build_gradient_texture(field: &ScalarField, options: &Options) -> GradientTexture {
    let mut texture = HostTexture::new(field.dims(), options.gradient_format.into());
    let outcome = fill_gradient_texture(field, options, &mut texture);
    GradientTexture { texture, outcome }
}

/// Writes a gradient texture for `field` into `target`.
pub fn write_gradient_texture<T: TextureTarget + ?Sized>(
    field: &ScalarField,
    options: &Options,
    target: &mut T,
) -> Result<BuildOutcome> {
    check_target(target, field, options.gradient_format.into())?;
    Ok(fill_gradient_texture(field, options, target))
}

fn fill_gradient_texture<T: TextureTarget + ?Sized>(
    field: &ScalarField,
    options: &Options,
    target: &mut T,
) -> BuildOutcome {
    let sampler = GradientSampler::new(field);
    if sampler.is_degenerate() {
        log::debug!(
            "'{}' has no value range; gradient texture is all zero",
            field.name()
        );
    }
    let budget = options.staging_budget_bytes;
    match options.gradient_format {
        GradientFormat::Rgba32Float => encode_into(&sampler, budget, target, |t| t),
        GradientFormat::Rgba16Float => {
            encode_into(&sampler, budget, target, |t| t.map(f16::from_f32))
        }
    }
}

fn encode_into<P, T, E>(
    sampler: &GradientSampler<'_>,
    budget: Option<usize>,
    target: &mut T,
    encode: E,
) -> BuildOutcome
where
    P: Pod,
    T: TextureTarget + ?Sized,
    E: Fn([f32; 4]) -> P,
{
    match try_allocate::<P>(sampler.field.len(), budget) {
        Some(mut staging) => {
            sampler.for_each(|_, texel| staging.push(encode(texel)));
            target.upload(bytemuck::cast_slice(&staging));
            BuildOutcome::Complete
        }
        None => {
            log::warn!(
                "out of memory building gradient texture for '{}'; writing texels one at a time",
                sampler.field.name()
            );
            sampler.for_each(|index, texel| {
                target.write_texel(index, bytemuck::bytes_of(&encode(texel)));
            });
            BuildOutcome::Degraded
        }
    }
}
