//! Density-independent pixels (dp).
//!
//! Builder-facing lengths (ring width, fixed size) are given in dp so the
//! drawable renders at the same physical size across screen densities. The
//! conversion to physical pixels is controlled by a process-wide scale
//! factor; when the host never sets one, the conversion is the identity.

use std::sync::OnceLock;

use parking_lot::RwLock;

use crate::px::Px;

/// Global scale factor for converting between density-independent pixels and
/// physical pixels.
///
/// Typically initialized once during application startup from the surface's
/// pixel density. Unset means a scale factor of 1.0.
pub static SCALE_FACTOR: OnceLock<RwLock<f64>> = OnceLock::new();

/// Density-independent pixels (dp) for density-aware sizing.
#[derive(Debug, Default, Clone, Copy, PartialEq, PartialOrd)]
pub struct Dp(pub f64);

impl Dp {
    /// Creates a new `Dp` instance with the specified value.
    pub const fn new(value: f64) -> Self {
        Dp(value)
    }

    /// Converts this dp value to physical pixels as an `f64`.
    pub fn to_pixels_f64(&self) -> f64 {
        let scale_factor = SCALE_FACTOR.get().map(|lock| *lock.read()).unwrap_or(1.0);
        self.0 * scale_factor
    }

    /// Converts this dp value to physical pixels as an `f32`.
    pub fn to_pixels_f32(&self) -> f32 {
        self.to_pixels_f64() as f32
    }

    /// Creates a `Dp` value from physical pixels specified as an `f64`.
    pub fn from_pixels_f64(value: f64) -> Self {
        let scale_factor = SCALE_FACTOR.get().map(|lock| *lock.read()).unwrap_or(1.0);
        Dp(value / scale_factor)
    }

    /// Creates a `Dp` value from physical pixels specified as an `f32`.
    pub fn from_pixels_f32(value: f32) -> Self {
        Self::from_pixels_f64(value as f64)
    }

    /// Converts this `Dp` value to a `Px` (physical pixels) value.
    pub fn to_px(&self) -> Px {
        Px::from_f32(self.to_pixels_f32())
    }
}

impl From<f64> for Dp {
    fn from(value: f64) -> Self {
        Dp::new(value)
    }
}

impl From<Px> for Dp {
    fn from(px: Px) -> Self {
        Dp::from_pixels_f64(px.raw() as f64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // These tests rely on SCALE_FACTOR staying unset (identity conversion);
    // nothing in the test suite initializes it.

    #[test]
    fn test_identity_conversion() {
        assert_eq!(Dp(24.0).to_pixels_f32(), 24.0);
        assert_eq!(Dp::from_pixels_f32(48.0), Dp(48.0));
    }

    #[test]
    fn test_to_px() {
        assert_eq!(Dp(10.0).to_px(), Px(10));
        assert_eq!(Dp(10.7).to_px(), Px(10));
    }
}
