//! The 2D drawing surface contract and a recording implementation.
//!
//! The drawable never talks to a GPU directly: it issues calls against
//! [`Canvas`], and implementations decide what to do with them. The shipped
//! [`CanvasRecorder`] resolves each call against its [`Paint`] into a
//! [`CircleCommand`] for the render pipeline; hosts with their own 2D
//! backend can implement [`Canvas`] directly instead.

use glam::Vec2;
use smallvec::SmallVec;

use crate::{paint::Paint, pipelines::circle::command::CircleCommand};

/// A float rectangle in physical pixel space, stored as edge coordinates.
///
/// Used for draw-time geometry that does not land on whole pixels, most
/// notably the progress arc's bounding box.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct RectF {
    pub left: f32,
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
}

impl RectF {
    /// Creates a rectangle from its edge coordinates.
    pub const fn new(left: f32, top: f32, right: f32, bottom: f32) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    /// Returns the rectangle's width.
    pub fn width(&self) -> f32 {
        self.right - self.left
    }

    /// Returns the rectangle's height.
    pub fn height(&self) -> f32 {
        self.bottom - self.top
    }

    /// Returns the rectangle's center point.
    pub fn center(&self) -> Vec2 {
        Vec2::new(
            (self.left + self.right) / 2.0,
            (self.top + self.bottom) / 2.0,
        )
    }

    /// Returns a copy inset by `d` on every edge.
    pub fn inset(&self, d: f32) -> Self {
        Self {
            left: self.left + d,
            top: self.top + d,
            right: self.right - d,
            bottom: self.bottom - d,
        }
    }
}

/// A 2D canvas supporting the three primitives the drawable needs.
///
/// Angles are in degrees, 0° at 3 o'clock, positive sweep clockwise on a
/// y-down surface. A negative sweep draws counter-clockwise from the start
/// angle; sweeps of magnitude 360° or more close into a full circle.
pub trait Canvas {
    /// Strokes a circle outline using the paint's stroke width.
    fn stroke_circle(&mut self, center: Vec2, radius: f32, paint: &Paint);

    /// Fills a circle.
    fn fill_circle(&mut self, center: Vec2, radius: f32, paint: &Paint);

    /// Strokes an arc of the circle inscribed in `bounds`, using the paint's
    /// stroke width and cap.
    fn stroke_arc(
        &mut self,
        bounds: RectF,
        start_angle_degrees: f32,
        sweep_angle_degrees: f32,
        paint: &Paint,
    );
}

/// A [`Canvas`] that records resolved draw commands instead of rasterizing.
///
/// One frame of the drawable is exactly three commands, so the backing
/// storage is inline-sized for three.
#[derive(Debug, Default, Clone)]
pub struct CanvasRecorder {
    commands: SmallVec<[CircleCommand; 3]>,
}

impl CanvasRecorder {
    /// Creates an empty recorder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the commands recorded so far, in draw order.
    pub fn commands(&self) -> &[CircleCommand] {
        &self.commands
    }

    /// Discards all recorded commands.
    pub fn clear(&mut self) {
        self.commands.clear();
    }

    /// Consumes the recorder, returning the recorded commands.
    pub fn into_commands(self) -> SmallVec<[CircleCommand; 3]> {
        self.commands
    }
}

impl Canvas for CanvasRecorder {
    fn stroke_circle(&mut self, center: Vec2, radius: f32, paint: &Paint) {
        self.commands.push(CircleCommand::StrokeCircle {
            center,
            radius,
            stroke_width: paint.stroke_width,
            color: paint.resolve_color(),
        });
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32, paint: &Paint) {
        self.commands.push(CircleCommand::FillCircle {
            center,
            radius,
            color: paint.resolve_color(),
        });
    }

    fn stroke_arc(
        &mut self,
        bounds: RectF,
        start_angle_degrees: f32,
        sweep_angle_degrees: f32,
        paint: &Paint,
    ) {
        self.commands.push(CircleCommand::StrokeArc {
            bounds,
            start_angle_degrees,
            sweep_angle_degrees,
            stroke_width: paint.stroke_width,
            cap: paint.cap,
            color: paint.resolve_color(),
        });
    }
}
