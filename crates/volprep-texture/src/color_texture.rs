//! Classified color textures.

use volprep_core::{label_of, ClassificationTable, Options, Result, ScalarField};

use crate::data_texture::ClassifyReport;
use crate::format::TextureFormat;
use crate::staging::{try_allocate, BuildOutcome};
use crate::target::{check_target, HostTexture, TextureTarget};

/// Texel format of color textures.
pub const COLOR_TEXTURE_FORMAT: TextureFormat = TextureFormat::Rgba8Unorm;

/// A color texture together with its build report.
#[derive(Debug, Clone)]
pub struct ColorTexture {
    pub texture: HostTexture,
    pub report: ClassifyReport,
}

/// Builds an RGBA color texture from the table's label colors.
///
/// Background voxels, and voxels whose label is unknown, are transparent.
/// On the fallback path every texel is transparent black.
pub fn build_color_texture(
    field: &ScalarField,
    table: &ClassificationTable,
    options: &Options,
) -> ColorTexture {
    let mut texture = HostTexture::new(field.dims(), COLOR_TEXTURE_FORMAT);
    let report = fill_color_texture(field, table, options, &mut texture);
    ColorTexture { texture, report }
}

/// Writes a color texture for `field` into `target`.
pub fn write_color_texture<T: TextureTarget + ?Sized>(
    field: &ScalarField,
    table: &ClassificationTable,
    options: &Options,
    target: &mut T,
) -> Result<ClassifyReport> {
    check_target(target, field, COLOR_TEXTURE_FORMAT)?;
    Ok(fill_color_texture(field, table, options, target))
}

fn fill_color_texture<T: TextureTarget + ?Sized>(
    field: &ScalarField,
    table: &ClassificationTable,
    options: &Options,
    target: &mut T,
) -> ClassifyReport {
    let Some(mut staging) = try_allocate::<[u8; 4]>(field.len(), options.staging_budget_bytes)
    else {
        log::warn!(
            "out of memory building color texture for '{}'; writing transparent texels",
            field.name()
        );
        for index in 0..field.len() {
            target.write_texel(index, &[0; 4]);
        }
        return ClassifyReport {
            outcome: BuildOutcome::Degraded,
            missing_labels: 0,
        };
    };

    let mut missing_labels = 0;
    staging.extend(field.data().iter().map(|&sample| {
        let label = label_of(sample);
        if let Some(record) = table.get(label) {
            record.rgba()
        } else {
            missing_labels += 1;
            table.background().rgba()
        }
    }));
    target.upload(bytemuck::cast_slice(&staging));

    ClassifyReport {
        outcome: BuildOutcome::Complete,
        missing_labels,
    }
}
