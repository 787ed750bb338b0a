//! Texel formats produced by the builders.

use volprep_core::GradientFormat;

/// Layout of one texel in a 3D texture.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextureFormat {
    /// One 32-bit float.
    R32Float,
    /// Four 8-bit unsigned normalized channels.
    Rgba8Unorm,
    /// Four 16-bit floats.
    Rgba16Float,
    /// Four 32-bit floats.
    Rgba32Float,
}

impl TextureFormat {
    /// Size of one texel in bytes.
    pub const fn bytes_per_texel(self) -> usize {
        match self {
            Self::R32Float | Self::Rgba8Unorm => 4,
            Self::Rgba16Float => 8,
            Self::Rgba32Float => 16,
        }
    }

    /// Number of channels per texel.
    pub const fn channels(self) -> usize {
        match self {
            Self::R32Float => 1,
            Self::Rgba8Unorm | Self::Rgba16Float | Self::Rgba32Float => 4,
        }
    }
}

impl From<GradientFormat> for TextureFormat {
    fn from(format: GradientFormat) -> Self {
        match format {
            GradientFormat::Rgba32Float => Self::Rgba32Float,
            GradientFormat::Rgba16Float => Self::Rgba16Float,
        }
    }
}
