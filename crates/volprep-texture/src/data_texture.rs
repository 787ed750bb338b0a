//! Classified intensity textures.
//!
//! Every voxel is truncated to a label, looked up in the classification
//! table and replaced by the label's intensity as a single `f32` channel.
//! Labels missing from the table use the background record.

use volprep_core::{label_of, ClassificationTable, Options, Result, ScalarField};

use crate::format::TextureFormat;
use crate::staging::{try_allocate, BuildOutcome};
use crate::target::{check_target, HostTexture, TextureTarget};

/// Texel format of data textures.
pub const DATA_TEXTURE_FORMAT: TextureFormat = TextureFormat::R32Float;

/// Summary of a classification pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClassifyReport {
    pub outcome: BuildOutcome,
    /// Voxels whose label had no table entry.
    pub missing_labels: usize,
}

/// A data texture together with its build report.
#[derive(Debug, Clone)]
pub struct DataTexture {
    pub texture: HostTexture,
    pub report: ClassifyReport,
}

/// Builds a data texture for `field` in host memory.
///
/// When no staging buffer is available every texel holds
/// [`Options::data_placeholder`] and the report is degraded.
pub fn build_data_texture(
    field: &ScalarField,
    table: &ClassificationTable,
    options: &Options,
) -> DataTexture {
    let mut texture = HostTexture::new(field.dims(), DATA_TEXTURE_FORMAT);
    let report = fill_data_texture(field, table, options, &mut texture);
    DataTexture { texture, report }
}

/// Writes a data texture for `field` into `target`.
pub fn write_data_texture<T: TextureTarget + ?Sized>(
    field: &ScalarField,
    table: &ClassificationTable,
    options: &Options,
    target: &mut T,
) -> Result<ClassifyReport> {
    check_target(target, field, DATA_TEXTURE_FORMAT)?;
    Ok(fill_data_texture(field, table, options, target))
}

fn fill_data_texture<T: TextureTarget + ?Sized>(
    field: &ScalarField,
    table: &ClassificationTable,
    options: &Options,
    target: &mut T,
) -> ClassifyReport {
    let Some(mut staging) = try_allocate::<f32>(field.len(), options.staging_budget_bytes) else {
        log::warn!(
            "out of memory building data texture for '{}'; writing placeholder texels",
            field.name()
        );
        let placeholder = options.data_placeholder.to_ne_bytes();
        for index in 0..field.len() {
            target.write_texel(index, &placeholder);
        }
        return ClassifyReport {
            outcome: BuildOutcome::Degraded,
            missing_labels: 0,
        };
    };

    let mut missing_labels = 0;
    staging.extend(field.data().iter().map(|&sample| {
        let label = label_of(sample);
        match table.get(label) {
            Some(record) => record.intensity,
            None => {
                missing_labels += 1;
                table.background().intensity
            }
        }
    }));
    target.upload(bytemuck::cast_slice(&staging));

    if missing_labels > 0 {
        log::debug!(
            "{} voxels of '{}' had no classification entry and were treated as background",
            missing_labels,
            field.name()
        );
    }
    ClassifyReport {
        outcome: BuildOutcome::Complete,
        missing_labels,
    }
}
