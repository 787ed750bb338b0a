//! Property-based invariant tests for field downscaling and texture building.
//!
//! 1. downscale halves every dimension, rounding up
//! 2. downscale output stays within the input value range
//! 3. fit_to_dimension respects the limit within the predicted number of passes
//! 4. value_bounds matches a brute-force min/max
//! 5. gradient textures are finite and alpha lies in [0, 1]
//! 6. data textures have one texel per voxel and are deterministic

use std::sync::Arc;

use proptest::prelude::*;
use volprep::*;

// ── Helpers ──────────────────────────────────────────────────────────

fn arb_field() -> impl Strategy<Value = ScalarField> {
    (1u32..=7, 1u32..=7, 1u32..=7).prop_flat_map(|(x, y, z)| {
        let len = (x * y * z) as usize;
        prop::collection::vec(-1000.0f32..1000.0, len).prop_map(move |data| {
            ScalarField::new("arb", UVec3::new(x, y, z), data).expect("length matches dims")
        })
    })
}

fn arb_label_field() -> impl Strategy<Value = ScalarField> {
    (1u32..=6, 1u32..=6, 1u32..=6).prop_flat_map(|(x, y, z)| {
        let len = (x * y * z) as usize;
        prop::collection::vec(0.0f32..8.0, len).prop_map(move |data| {
            ScalarField::new("labels", UVec3::new(x, y, z), data).expect("length matches dims")
        })
    })
}

fn table() -> Arc<ClassificationTable> {
    Arc::new(
        ClassificationTable::parse(
            "0\tUnknown\t0\t0\t0\t0\t0\n\
             1\tA\t10\t0\t0\t255\t0.1\n\
             2\tB\t0\t20\t0\t255\t0.2\n\
             3\tC\t0\t0\t30\t255\t0.3\n",
        )
        .expect("fixture table parses"),
    )
}

// ═════════════════════════════════════════════════════════════════════════
// 1. downscale halves every dimension
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn downscale_halves_dims(field in arb_field()) {
        let out = downscale(&field);
        let dims = field.dims();
        prop_assert_eq!(out.dims(), UVec3::new(
            dims.x.div_ceil(2),
            dims.y.div_ceil(2),
            dims.z.div_ceil(2),
        ));
        prop_assert_eq!(out.len(), out.dims().x as usize * out.dims().y as usize * out.dims().z as usize);
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 2. downscale output stays within the rounded input range
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn downscale_within_range(field in arb_field()) {
        let bounds = field.value_bounds();
        let out = downscale(&field);
        for &v in out.data() {
            prop_assert!(
                v >= bounds.min.round_ties_even() && v <= bounds.max.round_ties_even(),
                "{} outside [{}, {}]", v, bounds.min, bounds.max
            );
        }
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 3. fit_to_dimension respects the limit
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn fit_to_dimension_bounded(x in 1u32..=300, y in 1u32..=3, limit in 1u32..=64) {
        let mut field = ScalarField::filled("long", UVec3::new(x, y, 1), 1.0);
        let passes = field.fit_to_dimension(limit);
        prop_assert!(field.max_dim() <= limit);
        prop_assert_eq!(passes, passes_needed(x.max(y), limit));
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 4. value_bounds matches brute force
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn bounds_match_brute_force(field in arb_field()) {
        let mut min = f32::MAX;
        let mut max = f32::MIN;
        for &v in field.data() {
            min = min.min(v);
            max = max.max(v);
        }
        prop_assert_eq!(field.value_bounds().as_tuple(), (min, max));
        prop_assert!(field.bounds_cached());
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 5. gradient textures are finite with alpha in [0, 1]
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn gradient_finite(field in arb_field()) {
        let built = build_gradient_texture(&field, &Options::default());
        let channels = built.texture.channels_f32();
        prop_assert_eq!(channels.len(), field.len() * 4);
        for texel in channels.chunks_exact(4) {
            prop_assert!(texel.iter().all(|c| c.is_finite()));
            prop_assert!((0.0..=1.0).contains(&texel[3]));
            prop_assert!(texel[..3].iter().all(|c| (-1.0..=1.0).contains(c)));
        }
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 6. data textures have one texel per voxel and are deterministic
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn data_texture_deterministic(field in arb_label_field()) {
        let table = table();
        let first = build_data_texture(&field, &table, &Options::default());
        let second = build_data_texture(&field, &table, &Options::default());
        prop_assert_eq!(first.texture.bytes().len(), field.len() * 4);
        prop_assert_eq!(first.texture.bytes(), second.texture.bytes());

        let expected_missing = field.data().iter().filter(|&&v| v >= 4.0).count();
        prop_assert_eq!(first.report.missing_labels, expected_missing);
    }
}
