//! Core data model for volprep.
//!
//! This crate provides the types every texture builder works on:
//! - [`ScalarField`], a dense 3D array of samples with cached [`ValueBounds`]
//! - [`ClassificationTable`], the label lookup used to classify voxels
//! - [`downscale`](downscale::downscale), box-filter halving of a field
//! - [`Options`] controlling texture preparation

// Documentation lints - internal functions don't need exhaustive panic/error docs
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::missing_errors_doc)]
// Builder patterns return Self which doesn't need must_use
#![allow(clippy::must_use_candidate)]

pub mod bounds;
pub mod classification;
pub mod downscale;
pub mod error;
pub mod field;
pub mod options;

pub use bounds::ValueBounds;
pub use classification::{
    label_of, ClassificationRecord, ClassificationTable, SharedTable, BACKGROUND_LABEL,
};
pub use downscale::downscale;
pub use error::{Result, VolumeError};
pub use field::ScalarField;
pub use options::{GradientFormat, Options, DEFAULT_MAX_TEXTURE_DIMENSION};

// Re-export glam types for convenience
pub use glam::{UVec3, Vec3};
