//! volprep: prepare dense 3D scalar volumes for GPU volume rendering.
//!
//! An importer hands over a [`ScalarField`]. volprep keeps it within texture
//! size limits and derives the buffers a volume renderer samples.
//!
//! # Quick Start
//!
//! ```
//! use std::sync::Arc;
//! use volprep::*;
//!
//! fn main() -> Result<()> {
//!     init_logging();
//!
//!     let table = ClassificationTable::parse("0\tUnknown\t0\t0\t0\t0\t0\n1\tBone\t255\t255\t255\t255\t1\n")?;
//!     let field = ScalarField::new("scan", UVec3::new(2, 2, 2), vec![0.0, 1.0, 1.0, 0.0, 1.0, 0.0, 0.0, 1.0])?;
//!
//!     let mut dataset = VolumeDataset::new(field, Arc::new(table));
//!     dataset.fix_dimensions();
//!
//!     let data = dataset.data_texture();
//!     let gradient = dataset.gradient_texture();
//!     assert_eq!(data.texture.bytes().len(), 8 * 4);
//!     assert_eq!(gradient.texture.bytes().len(), 8 * 16);
//!     Ok(())
//! }
//! ```
//!
//! # Pipeline
//!
//! - [`VolumeDataset::fix_dimensions`] box-filters the field until every
//!   dimension fits [`Options::max_texture_dimension`]
//! - [`VolumeDataset::value_bounds`] returns the cached value range
//! - [`VolumeDataset::data_texture`] classifies voxels through the table
//! - [`VolumeDataset::gradient_texture`] computes shading gradients

#![allow(clippy::must_use_candidate)]

mod dataset;
mod init;

pub use dataset::VolumeDataset;
pub use init::{
    classification_table, classification_table_from_file, init_logging,
    published_classification_table,
};

// Re-export core types
pub use volprep_core::{
    downscale::{downscale, half_dims, passes_needed},
    label_of, ClassificationRecord, ClassificationTable, GradientFormat, Options, Result,
    ScalarField, SharedTable, ValueBounds, VolumeError, BACKGROUND_LABEL,
    DEFAULT_MAX_TEXTURE_DIMENSION,
};

// Re-export texture builders
pub use volprep_texture::{
    build_color_texture, build_data_texture, build_gradient_texture, write_color_texture,
    write_data_texture, write_gradient_texture, BuildOutcome, ClassifyReport, ColorTexture,
    DataTexture, GradientSampler, GradientTexture, HostTexture, TextureFormat, TextureTarget,
};

pub use glam::{UVec3, Vec3};
