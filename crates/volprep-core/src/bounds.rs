//! Value range of a scalar field.

/// Minimum and maximum sample value of a field.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ValueBounds {
    pub min: f32,
    pub max: f32,
}

impl ValueBounds {
    /// Bounds of a field with no samples.
    pub const EMPTY: Self = Self {
        min: f32::MAX,
        max: f32::MIN,
    };

    /// Returns true if no sample contributed to these bounds.
    pub fn is_empty(&self) -> bool {
        self.min > self.max
    }

    /// Returns `max - min`, or `0.0` for empty bounds.
    pub fn range(&self) -> f32 {
        if self.is_empty() {
            0.0
        } else {
            self.max - self.min
        }
    }

    /// Returns the bounds as a `(min, max)` pair.
    pub fn as_tuple(&self) -> (f32, f32) {
        (self.min, self.max)
    }
}

impl Default for ValueBounds {
    fn default() -> Self {
        Self::EMPTY
    }
}

/// Computes the bounds of `values` in a single pass.
///
/// NaN samples are skipped.
pub fn compute_bounds(values: &[f32]) -> ValueBounds {
    values
        .iter()
        .fold(ValueBounds::EMPTY, |bounds, &v| ValueBounds {
            min: bounds.min.min(v),
            max: bounds.max.max(v),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bounds_known_values() {
        let bounds = compute_bounds(&[3.0, -2.5, 7.0, 0.0]);
        assert_eq!(bounds.as_tuple(), (-2.5, 7.0));
        assert_eq!(bounds.range(), 9.5);
    }

    #[test]
    fn test_bounds_empty() {
        let bounds = compute_bounds(&[]);
        assert!(bounds.is_empty());
        assert_eq!(bounds, ValueBounds::EMPTY);
        assert_eq!(bounds.range(), 0.0);
    }

    #[test]
    fn test_bounds_constant() {
        let bounds = compute_bounds(&[4.0; 10]);
        assert!(!bounds.is_empty());
        assert_eq!(bounds.range(), 0.0);
    }

    #[test]
    fn test_bounds_skip_nan() {
        let bounds = compute_bounds(&[f32::NAN, 1.0, 2.0]);
        assert_eq!(bounds.as_tuple(), (1.0, 2.0));
    }
}
