//! The scratch brush shared by the drawable's three draw calls.
//!
//! A single [`Paint`] is owned by the drawable and overwritten in place
//! before each draw call, avoiding per-frame allocation. It also carries the
//! host-facing passthrough channels: a global alpha multiplier and an
//! optional color filter, both folded into the color a draw call actually
//! uses via [`Paint::resolve_color`].

use crate::color::Color;

/// Whether a primitive is filled or stroked.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PaintStyle {
    /// Fill the primitive's interior.
    #[default]
    Fill,
    /// Stroke the primitive's outline.
    Stroke,
}

/// Stroke cap applied to open stroke ends.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum StrokeCap {
    /// Flat stroke ends.
    #[default]
    Butt,
    /// Rounded stroke ends.
    Round,
}

/// A componentwise tint applied after the alpha multiplier.
///
/// This is the passthrough slot for the host's color-filter channel; the
/// only supported mode is a multiply against a constant color.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColorFilter {
    tint: Color,
}

impl ColorFilter {
    /// Creates a multiplying tint filter.
    pub const fn tint(tint: Color) -> Self {
        Self { tint }
    }

    /// Applies the filter to a color.
    pub fn apply(&self, color: Color) -> Color {
        Color::new(
            color.r * self.tint.r,
            color.g * self.tint.g,
            color.b * self.tint.b,
            color.a * self.tint.a,
        )
    }
}

/// Style, color and stroke parameters for one draw call.
#[derive(Debug, Clone, PartialEq)]
pub struct Paint {
    /// Fill or stroke.
    pub style: PaintStyle,
    /// Base color before alpha and filter are applied.
    pub color: Color,
    /// Stroke width in physical pixels; ignored for fills.
    pub stroke_width: f32,
    /// Cap applied to open stroke ends.
    pub cap: StrokeCap,
    /// Whether edges are smoothed by the backend.
    pub anti_alias: bool,
    alpha: f32,
    color_filter: Option<ColorFilter>,
}

impl Paint {
    /// Creates an opaque, anti-aliased paint with default style.
    pub fn new() -> Self {
        Self {
            style: PaintStyle::default(),
            color: Color::BLACK,
            stroke_width: 0.0,
            cap: StrokeCap::default(),
            anti_alias: true,
            alpha: 1.0,
            color_filter: None,
        }
    }

    /// Sets the global alpha multiplier, clamped to `[0, 1]`.
    pub fn set_alpha(&mut self, alpha: f32) {
        self.alpha = if alpha.is_nan() {
            0.0
        } else {
            alpha.clamp(0.0, 1.0)
        };
    }

    /// Returns the global alpha multiplier.
    pub fn alpha(&self) -> f32 {
        self.alpha
    }

    /// Sets or clears the color filter.
    pub fn set_color_filter(&mut self, filter: Option<ColorFilter>) {
        self.color_filter = filter;
    }

    /// Returns the current color filter, if any.
    pub fn color_filter(&self) -> Option<ColorFilter> {
        self.color_filter
    }

    /// The color a draw call actually uses: the base color scaled by the
    /// alpha multiplier, then run through the color filter.
    pub fn resolve_color(&self) -> Color {
        let scaled = self.color.with_alpha(self.color.a * self.alpha);
        match &self.color_filter {
            Some(filter) => filter.apply(scaled),
            None => scaled,
        }
    }
}

impl Default for Paint {
    fn default() -> Self {
        Self::new()
    }
}
