//! Texture builders for volprep.
//!
//! Turns a [`ScalarField`](volprep_core::ScalarField) into renderer-ready 3D
//! textures:
//! - data textures: classified intensity per voxel ([`build_data_texture`])
//! - color textures: classified RGBA per voxel ([`build_color_texture`])
//! - gradient textures: shading gradient and normalized value ([`build_gradient_texture`])
//!
//! Builders never fail on memory pressure. If the intermediate buffer cannot
//! be allocated they fall back to per-texel writes and report
//! [`BuildOutcome::Degraded`].

// Documentation lints - internal functions don't need exhaustive panic/error docs
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]

pub mod color_texture;
pub mod data_texture;
pub mod format;
pub mod gradient_texture;
pub mod staging;
pub mod target;

pub use color_texture::{build_color_texture, write_color_texture, ColorTexture};
pub use data_texture::{build_data_texture, write_data_texture, ClassifyReport, DataTexture};
pub use format::TextureFormat;
pub use gradient_texture::{
    build_gradient_texture, write_gradient_texture, GradientSampler, GradientTexture,
};
pub use staging::BuildOutcome;
pub use target::{HostTexture, TextureTarget};
