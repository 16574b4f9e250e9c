//! Circular progress drawable.
//!
//! The drawable produces a circular shape with a ring surrounding it: a
//! stroked outline circle, a filled inner circle and a progress arc drawn
//! over the outline. The inner circle scale, the progress of the ring and
//! the three colors can all be changed after construction; every change
//! emits one redraw request to the host.
//!
//! Two modes drive the arc. In determinate mode the arc sweeps a fraction
//! of the full circle proportional to the progress value. In indeterminate
//! mode the arc has a fixed 90° sweep and the progress value becomes its
//! start angle, so an external animator can spin it by writing increasing
//! values.

use std::sync::Arc;

use derive_builder::Builder;
use glam::Vec2;
use tracing::debug;

use crate::{
    canvas::{Canvas, RectF},
    color::Color,
    dp::Dp,
    paint::{ColorFilter, Paint, PaintStyle, StrokeCap},
    px::{Px, PxRect},
};

/// Factor converting the public `[0, 1]` progress fraction into the
/// internally stored sweep, in degrees of arc.
///
/// The sign makes the determinate fill run counter-clockwise from the start
/// angle under the clockwise-positive angle convention, so a fraction of
/// 1.0 stores −360° and fills the whole ring.
pub const PROGRESS_FACTOR: f32 = -360.0;

/// Fixed start angle of the determinate progress arc, in degrees.
pub const DETERMINATE_START_ANGLE: f32 = 89.0;

/// Fixed sweep of the indeterminate arc, in degrees.
pub const INDETERMINATE_SWEEP_DEGREES: f32 = 90.0;

/// Denominator of the host's discrete level signal.
pub const LEVEL_RANGE: f32 = 10_000.0;

/// Stroke width of the outline circle, in physical pixels.
const OUTLINE_STROKE_WIDTH: f32 = 1.0;

/// The host's redraw-scheduling sink.
///
/// Signals are fire-and-forget: the drawable emits exactly one per mutation
/// and never waits for, coalesces or cancels them. The host owns the actual
/// redraw scheduling.
pub trait RedrawScheduler {
    /// Asks the host to redraw the drawable at its next opportunity.
    fn schedule_redraw(&self);
}

/// Strategy resolving the effective drawing size from the current bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SizePolicy {
    /// Use the smaller dimension of the bounds.
    FitBounds,
    /// Use a fixed pixel size regardless of the bounds.
    Fixed(Px),
}

impl SizePolicy {
    /// Returns the effective drawing size for the given bounds.
    ///
    /// A fixed size that is not positive falls back to the bounds-derived
    /// size, so a zeroed configuration behaves like [`SizePolicy::FitBounds`].
    pub fn resolve(self, bounds: PxRect) -> f32 {
        match self {
            SizePolicy::Fixed(size) if size.raw() > 0 => size.to_f32(),
            _ => bounds.min_dimension().to_f32(),
        }
    }
}

/// Geometry derived from the bounds and the current state for one draw.
///
/// Recomputed every draw and never persisted, since the bounds belong to
/// the host layout and can change between frames.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RingGeometry {
    /// Effective drawing size in physical pixels.
    pub size: f32,
    /// Radius of the outline circle; the progress ring's outer edge lands
    /// on it.
    pub outer_radius: f32,
    /// Radius of the filled inner circle.
    pub inner_radius: f32,
    /// Horizontal offset centering the ring within the bounds.
    pub offset_x: f32,
    /// Vertical offset centering the ring within the bounds.
    pub offset_y: f32,
    /// Shared center of all three elements.
    pub center: Vec2,
    /// Bounding box of the circle the progress arc's center line lies on.
    pub arc_bounds: RectF,
}

impl RingGeometry {
    /// Derives the draw geometry from the bounds and the ring parameters.
    ///
    /// The outer radius is half the effective size minus half the ring
    /// width, so the full ring stroke stays inside the drawing size; the
    /// arc bounding box is the outer circle's box inset by half the ring
    /// width on each side, putting the stroke's center line on the outer
    /// radius. Degenerate inputs (a ring wider than the drawing size)
    /// clamp the radii to zero instead of failing.
    pub fn resolve(bounds: PxRect, ring_width: Px, circle_scale: f32, policy: SizePolicy) -> Self {
        let size = policy.resolve(bounds);
        let ring_width = ring_width.to_f32().max(0.0);

        let mut outer_radius = size / 2.0 - ring_width / 2.0;
        if outer_radius < 0.0 {
            debug!(
                outer_radius,
                size, ring_width, "ring wider than drawing size, clamping radius to zero"
            );
            outer_radius = 0.0;
        }
        let inner_radius = outer_radius * circle_scale.max(0.0);

        let offset_x = (bounds.width.to_f32() - outer_radius * 2.0) / 2.0;
        let offset_y = (bounds.height.to_f32() - outer_radius * 2.0) / 2.0;

        let half_ring = ring_width / 2.0;
        let outer_box = RectF::new(
            bounds.x.to_f32() + offset_x,
            bounds.y.to_f32() + offset_y,
            bounds.x.to_f32() + offset_x + outer_radius * 2.0,
            bounds.y.to_f32() + offset_y + outer_radius * 2.0,
        );

        Self {
            size,
            outer_radius,
            inner_radius,
            offset_x,
            offset_y,
            center: Vec2::new(bounds.center_x(), bounds.center_y()),
            arc_bounds: outer_box.inset(half_ring),
        }
    }
}

/// Construction parameters for [`CircularProgressDrawable`].
///
/// Every field has a default, so `CircularProgressArgsBuilder::default()
/// .build()` cannot fail and partial configuration is the normal case.
#[derive(Builder, Clone, Debug)]
#[builder(pattern = "owned")]
pub struct CircularProgressArgs {
    /// Stroke width of the progress ring.
    #[builder(default = "Dp(4.0)")]
    pub ring_width: Dp,

    /// Color of the empty outline ring.
    #[builder(default = "Color::GRAY")]
    pub outline_color: Color,

    /// Color of the progress arc.
    #[builder(default = "Color::BLUE")]
    pub ring_color: Color,

    /// Color of the filled inner circle.
    #[builder(default = "Color::WHITE")]
    pub center_color: Color,

    /// Scale of the inner circle relative to the outer radius.
    ///
    /// At 1.0 the inner circle reaches the outline; the default leaves a
    /// quarter-radius gap.
    #[builder(default = "0.75")]
    pub circle_scale: f32,

    /// Optional fixed drawing size overriding the bounds-derived size.
    #[builder(default, setter(strip_option))]
    pub fixed_size: Option<Dp>,
}

impl CircularProgressArgsBuilder {
    /// Builds the accumulated arguments and creates the drawable in one
    /// step.
    pub fn create(self) -> CircularProgressDrawable {
        CircularProgressDrawable::new(self.build().expect("all builder fields have defaults"))
    }
}

impl From<CircularProgressArgs> for CircularProgressDrawable {
    fn from(args: CircularProgressArgs) -> Self {
        Self::new(args)
    }
}

/// A renderable circular progress indicator.
///
/// Holds the mutable display state and, given the host-supplied bounds,
/// derives the ring geometry and issues a fixed sequence of three draw
/// calls: outline circle, inner fill, progress arc.
pub struct CircularProgressDrawable {
    /// Scratch paint overwritten in place before each draw call.
    paint: Paint,
    /// Ring progress in internal units; see [`PROGRESS_FACTOR`].
    progress: f32,
    outline_color: Color,
    ring_color: Color,
    center_color: Color,
    ring_width: Px,
    circle_scale: f32,
    indeterminate: bool,
    bounds: PxRect,
    size_policy: SizePolicy,
    redraw_scheduler: Option<Arc<dyn RedrawScheduler>>,
}

impl CircularProgressDrawable {
    /// Creates a drawable from construction arguments.
    ///
    /// Inputs are normalized rather than rejected: a negative ring width
    /// becomes zero and the circle scale is clamped to be non-negative.
    /// The drawable starts at zero progress in determinate mode with empty
    /// bounds.
    pub fn new(args: CircularProgressArgs) -> Self {
        let ring_width = Px(args.ring_width.to_px().raw().max(0));
        let size_policy = match args.fixed_size {
            Some(size) if size.0 > 0.0 => SizePolicy::Fixed(size.to_px()),
            _ => SizePolicy::FitBounds,
        };

        Self {
            paint: Paint::new(),
            progress: 0.0,
            outline_color: args.outline_color,
            ring_color: args.ring_color,
            center_color: args.center_color,
            ring_width,
            circle_scale: args.circle_scale.max(0.0),
            indeterminate: false,
            bounds: PxRect::ZERO,
            size_policy,
            redraw_scheduler: None,
        }
    }

    /// Registers the host's redraw sink, replacing any previous one.
    pub fn set_redraw_scheduler(&mut self, scheduler: Option<Arc<dyn RedrawScheduler>>) {
        self.redraw_scheduler = scheduler;
    }

    /// Sets the layout bounds the next draw will use.
    ///
    /// Bounds changes come from the host's layout pass, which already
    /// schedules its own redraw, so no signal is emitted here.
    pub fn set_bounds(&mut self, bounds: PxRect) {
        self.bounds = bounds;
    }

    /// Returns the current layout bounds.
    pub fn bounds(&self) -> PxRect {
        self.bounds
    }

    /// Returns the progress of the outer ring as a `[0, 1]` fraction.
    ///
    /// Only meaningful in determinate mode; in indeterminate mode the
    /// stored value is a start angle and the fraction reads back as an
    /// arbitrary number.
    pub fn progress(&self) -> f32 {
        self.progress / PROGRESS_FACTOR
    }

    /// Sets the progress.
    ///
    /// In determinate mode the value is a `[0, 1]` completion fraction
    /// (clamped silently). In indeterminate mode it is the raw start angle
    /// of the spinning arc, in degrees, stored without clamping so an
    /// external animator can wrap it freely.
    pub fn set_progress(&mut self, progress: f32) {
        if self.indeterminate {
            self.progress = if progress.is_nan() { 0.0 } else { progress };
        } else {
            self.progress = PROGRESS_FACTOR * clamp_fraction(progress);
        }
        self.invalidate();
    }

    /// Maps the host's discrete level signal onto the progress.
    ///
    /// Levels are externally normalized to `0..=10_000`; values beyond the
    /// range saturate at full progress.
    pub fn set_level(&mut self, level: u32) {
        self.set_progress(level as f32 / LEVEL_RANGE);
    }

    /// Returns the inner circle scale.
    pub fn circle_scale(&self) -> f32 {
        self.circle_scale
    }

    /// Sets the inner circle scale, clamped to be non-negative.
    pub fn set_circle_scale(&mut self, circle_scale: f32) {
        self.circle_scale = if circle_scale.is_nan() {
            0.0
        } else {
            circle_scale.max(0.0)
        };
        self.invalidate();
    }

    /// Returns whether the drawable is in indeterminate mode.
    pub fn is_indeterminate(&self) -> bool {
        self.indeterminate
    }

    /// Switches between determinate and indeterminate mode.
    ///
    /// The stored progress is not reinterpreted retroactively; the next
    /// [`set_progress`](Self::set_progress) establishes the value under the
    /// new mode.
    pub fn set_indeterminate(&mut self, indeterminate: bool) {
        self.indeterminate = indeterminate;
        self.invalidate();
    }

    /// Returns the outline color.
    pub fn outline_color(&self) -> Color {
        self.outline_color
    }

    /// Sets the outline color.
    pub fn set_outline_color(&mut self, outline_color: Color) {
        self.outline_color = outline_color;
        self.invalidate();
    }

    /// Returns the progress ring color.
    pub fn ring_color(&self) -> Color {
        self.ring_color
    }

    /// Sets the progress ring color.
    pub fn set_ring_color(&mut self, ring_color: Color) {
        self.ring_color = ring_color;
        self.invalidate();
    }

    /// Returns the inner circle color.
    pub fn center_color(&self) -> Color {
        self.center_color
    }

    /// Sets the inner circle color.
    pub fn set_center_color(&mut self, center_color: Color) {
        self.center_color = center_color;
        self.invalidate();
    }

    /// Returns the progress ring's stroke width.
    pub fn ring_width(&self) -> Px {
        self.ring_width
    }

    /// Returns the effective-size strategy.
    pub fn size_policy(&self) -> SizePolicy {
        self.size_policy
    }

    /// Sets the global alpha multiplier applied to all three elements.
    pub fn set_alpha(&mut self, alpha: f32) {
        self.paint.set_alpha(alpha);
    }

    /// Returns the drawable's opacity: the paint's current alpha channel.
    pub fn opacity(&self) -> f32 {
        self.paint.alpha()
    }

    /// Sets or clears the color filter applied to all three elements.
    pub fn set_color_filter(&mut self, filter: Option<ColorFilter>) {
        self.paint.set_color_filter(filter);
    }

    /// Returns the color filter, if any.
    pub fn color_filter(&self) -> Option<ColorFilter> {
        self.paint.color_filter()
    }

    /// Derives the geometry the next draw would use with the current state.
    pub fn geometry(&self) -> RingGeometry {
        RingGeometry::resolve(
            self.bounds,
            self.ring_width,
            self.circle_scale,
            self.size_policy,
        )
    }

    /// Draws the indicator onto the canvas.
    ///
    /// Issues exactly three calls in a fixed order, later ones overlaying
    /// earlier ones: the outline circle, the inner fill and the progress
    /// arc.
    pub fn draw(&mut self, canvas: &mut dyn Canvas) {
        let geometry = self.geometry();

        // Outline circle
        self.paint.style = PaintStyle::Stroke;
        self.paint.stroke_width = OUTLINE_STROKE_WIDTH;
        self.paint.cap = StrokeCap::Butt;
        self.paint.color = self.outline_color;
        canvas.stroke_circle(geometry.center, geometry.outer_radius, &self.paint);

        // Inner circle
        self.paint.style = PaintStyle::Fill;
        self.paint.color = self.center_color;
        canvas.fill_circle(geometry.center, geometry.inner_radius, &self.paint);

        // Progress arc
        self.paint.style = PaintStyle::Stroke;
        self.paint.stroke_width = self.ring_width.to_f32();
        self.paint.cap = StrokeCap::Round;
        self.paint.color = self.ring_color;
        let (start, sweep) = if self.indeterminate {
            (self.progress, INDETERMINATE_SWEEP_DEGREES)
        } else {
            (DETERMINATE_START_ANGLE, self.progress)
        };
        canvas.stroke_arc(geometry.arc_bounds, start, sweep, &self.paint);
    }

    fn invalidate(&self) {
        if let Some(scheduler) = &self.redraw_scheduler {
            scheduler.schedule_redraw();
        }
    }
}

fn clamp_fraction(fraction: f32) -> f32 {
    if fraction.is_nan() {
        0.0
    } else {
        fraction.clamp(0.0, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;
    use crate::{canvas::CanvasRecorder, pipelines::circle::command::CircleCommand};

    struct CountingScheduler {
        calls: AtomicUsize,
    }

    impl CountingScheduler {
        fn new() -> Arc<Self> {
            Arc::new(Self {
                calls: AtomicUsize::new(0),
            })
        }

        fn count(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    impl RedrawScheduler for CountingScheduler {
        fn schedule_redraw(&self) {
            self.calls.fetch_add(1, Ordering::SeqCst);
        }
    }

    fn drawable_with_bounds(side: i32) -> CircularProgressDrawable {
        let mut drawable = CircularProgressArgsBuilder::default()
            .ring_width(Dp(10.0))
            .create();
        drawable.set_bounds(PxRect::new(Px(0), Px(0), Px(side), Px(side)));
        drawable
    }

    fn arc_of(commands: &[CircleCommand]) -> (f32, f32) {
        match commands[2] {
            CircleCommand::StrokeArc {
                start_angle_degrees,
                sweep_angle_degrees,
                ..
            } => (start_angle_degrees, sweep_angle_degrees),
            _ => panic!("third command is not an arc"),
        }
    }

    #[test]
    fn test_progress_round_trips_through_scale_factor() {
        let mut drawable = drawable_with_bounds(200);
        for fraction in [0.0, 0.1, 0.25, 0.5, 0.75, 0.999, 1.0] {
            drawable.set_progress(fraction);
            assert!(
                (drawable.progress() - fraction).abs() < 1e-6,
                "fraction {fraction} did not round trip"
            );
        }
    }

    #[test]
    fn test_determinate_sweep_spans_zero_to_full_circle() {
        let mut drawable = drawable_with_bounds(200);
        let mut recorder = CanvasRecorder::new();

        drawable.set_progress(0.0);
        drawable.draw(&mut recorder);
        let (start, sweep) = arc_of(recorder.commands());
        assert_eq!(start, DETERMINATE_START_ANGLE);
        assert_eq!(sweep, 0.0);

        recorder.clear();
        drawable.set_progress(1.0);
        drawable.draw(&mut recorder);
        let (start, sweep) = arc_of(recorder.commands());
        assert_eq!(start, DETERMINATE_START_ANGLE);
        assert_eq!(sweep.abs(), 360.0);
    }

    #[test]
    fn test_determinate_progress_is_clamped() {
        let mut drawable = drawable_with_bounds(200);
        drawable.set_progress(1.5);
        assert_eq!(drawable.progress(), 1.0);
        drawable.set_progress(-0.5);
        assert_eq!(drawable.progress(), 0.0);
        drawable.set_progress(f32::NAN);
        assert_eq!(drawable.progress(), 0.0);
    }

    #[test]
    fn test_indeterminate_arc_has_fixed_sweep_and_raw_start() {
        let mut drawable = drawable_with_bounds(200);
        drawable.set_progress(0.42);

        drawable.set_indeterminate(true);
        drawable.set_progress(45.0);

        let mut recorder = CanvasRecorder::new();
        drawable.draw(&mut recorder);
        let (start, sweep) = arc_of(recorder.commands());
        assert_eq!(start, 45.0);
        assert_eq!(sweep, INDETERMINATE_SWEEP_DEGREES);

        // The start angle wraps externally, so no clamping applies.
        recorder.clear();
        drawable.set_progress(725.0);
        drawable.draw(&mut recorder);
        let (start, sweep) = arc_of(recorder.commands());
        assert_eq!(start, 725.0);
        assert_eq!(sweep, INDETERMINATE_SWEEP_DEGREES);
    }

    #[test]
    fn test_every_mutator_schedules_exactly_one_redraw() {
        let scheduler = CountingScheduler::new();
        let mut drawable = drawable_with_bounds(200);
        drawable.set_redraw_scheduler(Some(scheduler.clone() as Arc<dyn RedrawScheduler>));

        drawable.set_progress(0.5);
        assert_eq!(scheduler.count(), 1);
        drawable.set_circle_scale(0.5);
        assert_eq!(scheduler.count(), 2);
        drawable.set_indeterminate(true);
        assert_eq!(scheduler.count(), 3);
        drawable.set_outline_color(Color::RED);
        assert_eq!(scheduler.count(), 4);
        drawable.set_ring_color(Color::GREEN);
        assert_eq!(scheduler.count(), 5);
        drawable.set_center_color(Color::BLACK);
        assert_eq!(scheduler.count(), 6);
        drawable.set_level(2_500);
        assert_eq!(scheduler.count(), 7);
    }

    #[test]
    fn test_geometry_matches_reference_scenario() {
        // 200×200 bounds with a 10px ring: outer radius 95, arc box inset
        // by 5 on each side of the outer circle's box, inner radius 71.25
        // at the default 0.75 scale.
        let drawable = drawable_with_bounds(200);
        let geometry = drawable.geometry();

        assert_eq!(geometry.size, 200.0);
        assert_eq!(geometry.outer_radius, 95.0);
        assert_eq!(geometry.inner_radius, 71.25);
        assert_eq!(geometry.offset_x, 5.0);
        assert_eq!(geometry.offset_y, 5.0);
        assert_eq!(geometry.center, Vec2::new(100.0, 100.0));
        assert_eq!(geometry.arc_bounds, RectF::new(10.0, 10.0, 190.0, 190.0));
    }

    #[test]
    fn test_inner_radius_never_exceeds_outer_for_scale_below_one() {
        for side in [10, 50, 137, 480] {
            let mut drawable = drawable_with_bounds(side);
            for scale in [0.0, 0.25, 0.75, 1.0] {
                drawable.set_circle_scale(scale);
                let geometry = drawable.geometry();
                assert!(
                    geometry.inner_radius <= geometry.outer_radius,
                    "inner exceeded outer at side {side}, scale {scale}"
                );
            }
        }
    }

    #[test]
    fn test_radii_scale_linearly_with_bounds() {
        let args = || {
            CircularProgressArgsBuilder::default()
                .ring_width(Dp(0.0))
                .build()
                .expect("all builder fields have defaults")
        };

        let mut small = CircularProgressDrawable::new(args());
        small.set_bounds(PxRect::new(Px(0), Px(0), Px(100), Px(100)));
        let mut large = CircularProgressDrawable::new(args());
        large.set_bounds(PxRect::new(Px(0), Px(0), Px(200), Px(200)));

        assert_eq!(large.geometry().outer_radius, 2.0 * small.geometry().outer_radius);
        assert_eq!(large.geometry().inner_radius, 2.0 * small.geometry().inner_radius);
    }

    #[test]
    fn test_fixed_size_overrides_bounds_scaling() {
        let mut drawable = CircularProgressArgsBuilder::default()
            .ring_width(Dp(10.0))
            .fixed_size(Dp(100.0))
            .create();

        drawable.set_bounds(PxRect::new(Px(0), Px(0), Px(200), Px(200)));
        let at_200 = drawable.geometry();
        drawable.set_bounds(PxRect::new(Px(0), Px(0), Px(400), Px(400)));
        let at_400 = drawable.geometry();

        assert_eq!(at_200.outer_radius, 45.0);
        assert_eq!(at_400.outer_radius, 45.0);
        // Only the centering offsets move with the bounds.
        assert_eq!(at_200.offset_x, 55.0);
        assert_eq!(at_400.offset_x, 155.0);
    }

    #[test]
    fn test_non_square_bounds_center_the_ring() {
        let mut drawable = CircularProgressArgsBuilder::default()
            .ring_width(Dp(10.0))
            .create();
        drawable.set_bounds(PxRect::new(Px(0), Px(0), Px(300), Px(200)));

        let geometry = drawable.geometry();
        assert_eq!(geometry.size, 200.0);
        assert_eq!(geometry.outer_radius, 95.0);
        assert_eq!(geometry.offset_x, 55.0);
        assert_eq!(geometry.offset_y, 5.0);
        assert_eq!(geometry.center, Vec2::new(150.0, 100.0));
    }

    #[test]
    fn test_degenerate_ring_clamps_to_zero_radius() {
        let mut drawable = CircularProgressArgsBuilder::default()
            .ring_width(Dp(50.0))
            .create();
        drawable.set_bounds(PxRect::new(Px(0), Px(0), Px(20), Px(20)));

        let geometry = drawable.geometry();
        assert_eq!(geometry.outer_radius, 0.0);
        assert_eq!(geometry.inner_radius, 0.0);
    }

    #[test]
    fn test_level_signal_maps_to_fraction() {
        let mut drawable = drawable_with_bounds(200);
        drawable.set_level(5_000);
        assert!((drawable.progress() - 0.5).abs() < 1e-6);
        drawable.set_level(10_000);
        assert_eq!(drawable.progress(), 1.0);
        // Out-of-range levels saturate.
        drawable.set_level(15_000);
        assert_eq!(drawable.progress(), 1.0);
    }

    #[test]
    fn test_circle_scale_is_clamped_non_negative() {
        let mut drawable = drawable_with_bounds(200);
        drawable.set_circle_scale(-0.5);
        assert_eq!(drawable.circle_scale(), 0.0);
        drawable.set_circle_scale(1.25);
        assert_eq!(drawable.circle_scale(), 1.25);
    }

    #[test]
    fn test_draw_order_and_paint_parameters() {
        let mut drawable = drawable_with_bounds(200);
        drawable.set_progress(0.5);

        let mut recorder = CanvasRecorder::new();
        drawable.draw(&mut recorder);
        let commands = recorder.commands();
        assert_eq!(commands.len(), 3);

        match commands[0] {
            CircleCommand::StrokeCircle {
                radius,
                stroke_width,
                color,
                ..
            } => {
                assert_eq!(radius, 95.0);
                assert_eq!(stroke_width, 1.0);
                assert_eq!(color, Color::GRAY);
            }
            _ => panic!("first command is not the outline circle"),
        }
        match commands[1] {
            CircleCommand::FillCircle { radius, color, .. } => {
                assert_eq!(radius, 71.25);
                assert_eq!(color, Color::WHITE);
            }
            _ => panic!("second command is not the inner fill"),
        }
        match commands[2] {
            CircleCommand::StrokeArc {
                stroke_width,
                cap,
                color,
                sweep_angle_degrees,
                ..
            } => {
                assert_eq!(stroke_width, 10.0);
                assert_eq!(cap, StrokeCap::Round);
                assert_eq!(color, Color::BLUE);
                assert_eq!(sweep_angle_degrees, -180.0);
            }
            _ => panic!("third command is not the progress arc"),
        }
    }

    #[test]
    fn test_opacity_reports_paint_alpha() {
        let mut drawable = drawable_with_bounds(200);
        assert_eq!(drawable.opacity(), 1.0);
        drawable.set_alpha(0.3);
        assert!((drawable.opacity() - 0.3).abs() < 1e-6);

        // The alpha multiplier reaches the recorded colors.
        let mut recorder = CanvasRecorder::new();
        drawable.draw(&mut recorder);
        for command in recorder.commands() {
            assert!((command.color().a - 0.3).abs() < 1e-6);
        }
    }

    #[test]
    fn test_builder_defaults() {
        let args = CircularProgressArgsBuilder::default()
            .build()
            .expect("all builder fields have defaults");
        assert_eq!(args.ring_width, Dp(4.0));
        assert_eq!(args.circle_scale, 0.75);
        assert_eq!(args.outline_color, Color::GRAY);
        assert_eq!(args.ring_color, Color::BLUE);
        assert_eq!(args.center_color, Color::WHITE);
        assert!(args.fixed_size.is_none());

        let drawable = CircularProgressDrawable::new(args);
        assert_eq!(drawable.size_policy(), SizePolicy::FitBounds);
        assert!(!drawable.is_indeterminate());
        assert_eq!(drawable.progress(), 0.0);
    }

    #[test]
    fn test_negative_ring_width_is_normalized() {
        let drawable = CircularProgressArgsBuilder::default()
            .ring_width(Dp(-8.0))
            .create();
        assert_eq!(drawable.ring_width(), Px(0));
    }
}
