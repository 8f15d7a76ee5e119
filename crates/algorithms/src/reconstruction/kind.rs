//! Direction of a reconstruction
//!
//! Dilation and erosion share one propagation routine. Every comparison in the
//! engine goes through [`ReconstructionKind`], which orders values as if they
//! were multiplied by [`ReconstructionKind::sign`]: "exceeds" means larger for
//! dilation and smaller for erosion. The flip is applied to the ordering, not
//! to the samples, so unsigned types never need negating.

use morphrec_core::Sample;

/// Reconstruction by dilation (grow under the mask) or erosion (shrink above it)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReconstructionKind {
    /// Propagate maxima; the result never rises above the mask
    #[default]
    Dilation,
    /// Propagate minima; the result never drops below the mask
    Erosion,
}

impl ReconstructionKind {
    /// Sign multiplier: +1 for dilation, -1 for erosion
    pub fn sign(self) -> i8 {
        match self {
            ReconstructionKind::Dilation => 1,
            ReconstructionKind::Erosion => -1,
        }
    }

    /// Whether `a` is strictly more extreme than `b`
    #[inline]
    pub fn exceeds<T: Sample>(self, a: T, b: T) -> bool {
        match self {
            ReconstructionKind::Dilation => a > b,
            ReconstructionKind::Erosion => a < b,
        }
    }

    /// The more extreme of two values (max for dilation, min for erosion)
    #[inline]
    pub fn extreme<T: Sample>(self, a: T, b: T) -> T {
        if self.exceeds(b, a) {
            b
        } else {
            a
        }
    }

    /// Clamp `value` so it does not exceed `mask` (min for dilation, max for erosion)
    #[inline]
    pub fn bound<T: Sample>(self, value: T, mask: T) -> T {
        if self.exceeds(value, mask) {
            mask
        } else {
            value
        }
    }

    /// The opposite kind
    pub fn dual(self) -> Self {
        match self {
            ReconstructionKind::Dilation => ReconstructionKind::Erosion,
            ReconstructionKind::Erosion => ReconstructionKind::Dilation,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sign() {
        assert_eq!(ReconstructionKind::Dilation.sign(), 1);
        assert_eq!(ReconstructionKind::Erosion.sign(), -1);
        assert_eq!(ReconstructionKind::default(), ReconstructionKind::Dilation);
    }

    #[test]
    fn test_matches_signed_comparison() {
        // exceeds(a, b) must agree with a * sign > b * sign
        for kind in [ReconstructionKind::Dilation, ReconstructionKind::Erosion] {
            let s = i32::from(kind.sign());
            for a in 0u8..6 {
                for b in 0u8..6 {
                    let signed = i32::from(a) * s > i32::from(b) * s;
                    assert_eq!(kind.exceeds(a, b), signed, "{kind:?} {a} {b}");
                }
            }
        }
    }

    #[test]
    fn test_extreme_and_bound() {
        let d = ReconstructionKind::Dilation;
        let e = ReconstructionKind::Erosion;
        assert_eq!(d.extreme(3u8, 7), 7);
        assert_eq!(e.extreme(3u8, 7), 3);
        assert_eq!(d.bound(9u8, 5), 5);
        assert_eq!(d.bound(2u8, 5), 2);
        assert_eq!(e.bound(2u8, 5), 5);
        assert_eq!(e.bound(9u8, 5), 9);
        assert_eq!(e.bound(1.5f32, 0.5), 1.5);
    }

    #[test]
    fn test_dual() {
        assert_eq!(ReconstructionKind::Dilation.dual(), ReconstructionKind::Erosion);
        assert_eq!(ReconstructionKind::Erosion.dual().dual(), ReconstructionKind::Erosion);
    }
}
