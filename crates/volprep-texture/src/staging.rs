//! Intermediate buffers for texture builds.
//!
//! A builder first asks for a staging buffer with one element per voxel. When
//! the buffer would exceed the configured budget, or the allocator refuses
//! it, the builder switches to its fallback path instead of failing.

use std::mem::size_of;

/// How a texture build finished.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[must_use]
pub enum BuildOutcome {
    /// The texture was built through a full staging buffer.
    Complete,
    /// No staging buffer was available; the fallback path was used.
    Degraded,
}

impl BuildOutcome {
    /// Returns true if the fallback path was taken.
    pub fn is_degraded(self) -> bool {
        self == Self::Degraded
    }
}

/// Reserves room for `len` elements of `T`.
///
/// Returns `None` if the buffer would be larger than `budget` bytes or the
/// allocation fails.
pub fn try_allocate<T>(len: usize, budget: Option<usize>) -> Option<Vec<T>> {
    let Some(bytes) = len.checked_mul(size_of::<T>()) else {
        log::warn!("staging buffer for {len} texels overflows the address space");
        return None;
    };

    if let Some(budget) = budget {
        if bytes > budget {
            log::warn!("staging buffer of {bytes} bytes exceeds the budget of {budget} bytes");
            return None;
        }
    }

    let mut buffer = Vec::new();
    if let Err(err) = buffer.try_reserve_exact(len) {
        log::warn!("could not allocate {bytes} byte staging buffer: {err}");
        return None;
    }
    Some(buffer)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_allocate_within_budget() {
        let buffer = try_allocate::<f32>(16, Some(64)).unwrap();
        assert!(buffer.capacity() >= 16);
        assert!(buffer.is_empty());
    }

    #[test]
    fn test_allocate_over_budget() {
        assert!(try_allocate::<f32>(17, Some(64)).is_none());
    }

    #[test]
    fn test_allocate_unbounded() {
        assert!(try_allocate::<[f32; 4]>(1024, None).is_some());
    }

    #[test]
    fn test_allocate_impossible() {
        assert!(try_allocate::<[f32; 4]>(usize::MAX / 2, None).is_none());
    }
}
