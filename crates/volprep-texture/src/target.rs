//! Destinations for built textures.

use glam::UVec3;
use half::f16;
use volprep_core::field::voxel_count;
use volprep_core::{Result, ScalarField, VolumeError};

use crate::format::TextureFormat;

/// A 3D texture the builders can write into.
///
/// Builders call [`TextureTarget::upload`] once with the whole texture when
/// an intermediate buffer fits in memory, and [`TextureTarget::write_texel`]
/// once per voxel otherwise.
pub trait TextureTarget {
    /// Texture size in texels.
    fn dims(&self) -> UVec3;

    /// Texel layout.
    fn format(&self) -> TextureFormat;

    /// Replaces the whole texture. `bytes` holds exactly one texel per voxel.
    fn upload(&mut self, bytes: &[u8]);

    /// Writes one texel at flat voxel `index`.
    fn write_texel(&mut self, index: usize, texel: &[u8]);
}

/// Checks that `target` can hold a texture built from `field` in `format`.
pub(crate) fn check_target<T: TextureTarget + ?Sized>(
    target: &T,
    field: &ScalarField,
    format: TextureFormat,
) -> Result<()> {
    if target.dims() != field.dims() {
        return Err(VolumeError::TargetMismatch(format!(
            "target is {:?} but field '{}' is {:?}",
            target.dims(),
            field.name(),
            field.dims()
        )));
    }
    if target.format() != format {
        return Err(VolumeError::TargetMismatch(format!(
            "target format is {:?}, expected {:?}",
            target.format(),
            format
        )));
    }
    Ok(())
}

/// A 3D texture held in host memory.
#[derive(Debug, Clone, PartialEq)]
pub struct HostTexture {
    dims: UVec3,
    format: TextureFormat,
    bytes: Vec<u8>,
}

impl HostTexture {
    /// Creates a zero-filled texture.
    pub fn new(dims: UVec3, format: TextureFormat) -> Self {
        Self {
            dims,
            format,
            bytes: vec![0; voxel_count(dims) * format.bytes_per_texel()],
        }
    }

    /// Returns the raw texel bytes in voxel order.
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Consumes the texture, returning its bytes.
    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }

    /// Returns the bytes of the texel at `index`.
    pub fn texel(&self, index: usize) -> &[u8] {
        let size = self.format.bytes_per_texel();
        &self.bytes[index * size..(index + 1) * size]
    }

    /// Decodes every channel of every texel as `f32`.
    ///
    /// `Rgba8Unorm` channels are mapped to `[0, 1]`.
    pub fn channels_f32(&self) -> Vec<f32> {
        match self.format {
            TextureFormat::R32Float | TextureFormat::Rgba32Float => self
                .bytes
                .chunks_exact(4)
                .map(|c| f32::from_ne_bytes([c[0], c[1], c[2], c[3]]))
                .collect(),
            TextureFormat::Rgba16Float => self
                .bytes
                .chunks_exact(2)
                .map(|c| f16::from_ne_bytes([c[0], c[1]]).to_f32())
                .collect(),
            TextureFormat::Rgba8Unorm => self
                .bytes
                .iter()
                .map(|&b| f32::from(b) / 255.0)
                .collect(),
        }
    }
}

impl TextureTarget for HostTexture {
    fn dims(&self) -> UVec3 {
        self.dims
    }

    fn format(&self) -> TextureFormat {
        self.format
    }

    fn upload(&mut self, bytes: &[u8]) {
        self.bytes.copy_from_slice(bytes);
    }

    fn write_texel(&mut self, index: usize, texel: &[u8]) {
        let size = self.format.bytes_per_texel();
        self.bytes[index * size..(index + 1) * size].copy_from_slice(texel);
    }
}
