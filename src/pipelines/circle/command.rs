use glam::Vec2;

use crate::{canvas::RectF, color::Color, paint::StrokeCap};

/// Draw command for one canvas primitive, with the paint already resolved
/// into a final color.
///
/// Angles are in degrees, where 0° is at 3 o'clock and positive sweeps run
/// clockwise on a y-down surface. A negative sweep runs counter-clockwise
/// from the start angle; sweeps of magnitude 360° or more close into a full
/// circle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CircleCommand {
    /// Stroke a circle outline.
    StrokeCircle {
        /// Center in physical pixels.
        center: Vec2,
        /// Radius of the stroke center line in physical pixels.
        radius: f32,
        /// Stroke width in physical pixels.
        stroke_width: f32,
        /// Stroke color.
        color: Color,
    },
    /// Fill a circle.
    FillCircle {
        /// Center in physical pixels.
        center: Vec2,
        /// Radius in physical pixels.
        radius: f32,
        /// Fill color.
        color: Color,
    },
    /// Stroke a circular arc.
    StrokeArc {
        /// Bounding box of the circle the arc's center line lies on.
        bounds: RectF,
        /// Start angle in degrees.
        start_angle_degrees: f32,
        /// Sweep angle in degrees, signed.
        sweep_angle_degrees: f32,
        /// Stroke width in physical pixels.
        stroke_width: f32,
        /// Stroke cap applied to the arc ends.
        cap: StrokeCap,
        /// Stroke color.
        color: Color,
    },
}

impl CircleCommand {
    /// Returns the command's resolved color.
    pub fn color(&self) -> Color {
        match self {
            Self::StrokeCircle { color, .. }
            | Self::FillCircle { color, .. }
            | Self::StrokeArc { color, .. } => *color,
        }
    }

    /// Applies an opacity multiplier to the command's color.
    pub fn apply_opacity(&mut self, opacity: f32) {
        let opacity = opacity.clamp(0.0, 1.0);
        match self {
            Self::StrokeCircle { color, .. }
            | Self::FillCircle { color, .. }
            | Self::StrokeArc { color, .. } => {
                *color = color.with_alpha(color.a * opacity);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_apply_opacity_scales_alpha() {
        let mut command = CircleCommand::FillCircle {
            center: Vec2::new(10.0, 10.0),
            radius: 5.0,
            color: Color::WHITE.with_alpha(0.8),
        };
        command.apply_opacity(0.5);
        assert!((command.color().a - 0.4).abs() < 1e-6);
    }

    #[test]
    fn test_apply_opacity_clamps() {
        let mut command = CircleCommand::FillCircle {
            center: Vec2::ZERO,
            radius: 1.0,
            color: Color::WHITE,
        };
        command.apply_opacity(2.0);
        assert_eq!(command.color().a, 1.0);
    }
}
