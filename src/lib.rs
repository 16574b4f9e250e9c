//! A circular progress drawable.
//!
//! The drawable produces a circular shape with a ring surrounding it: a
//! stroked outline circle, a filled inner circle and a progress arc. It
//! holds mutable display state (progress, colors, inner-circle scale,
//! indeterminate mode) and, given the host-supplied layout bounds, derives
//! the ring geometry and issues three draw calls against a [`Canvas`].
//!
//! Rendering is split in two layers. The drawable records into any
//! [`Canvas`] implementation; the shipped [`CanvasRecorder`] resolves calls
//! into plain [`CircleCommand`]s, which the wgpu pipeline in
//! [`pipelines::circle`] rasterizes — inside a host's render pass, or
//! off-screen through [`HeadlessRenderer`].
//!
//! # Example
//!
//! ```
//! use ringlet::{CanvasRecorder, CircularProgressArgsBuilder, Dp, Px, PxRect};
//!
//! let mut drawable = CircularProgressArgsBuilder::default()
//!     .ring_width(Dp(10.0))
//!     .create();
//! drawable.set_bounds(PxRect::new(Px(0), Px(0), Px(200), Px(200)));
//! drawable.set_progress(0.42);
//!
//! let mut recorder = CanvasRecorder::new();
//! drawable.draw(&mut recorder);
//! assert_eq!(recorder.commands().len(), 3);
//! ```
//!
//! Progress is a `[0, 1]` fraction in determinate mode. Switching to
//! indeterminate mode turns the progress value into the start angle of a
//! fixed 90° arc, so an external animator can spin it by writing increasing
//! values each frame. Every mutation emits one redraw request through the
//! registered [`RedrawScheduler`]; the host owns the actual scheduling.

pub mod canvas;
pub mod color;
pub mod dp;
pub mod drawable;
pub mod paint;
pub mod pipelines;
pub mod px;
pub mod renderer;

pub use crate::{
    canvas::{Canvas, CanvasRecorder, RectF},
    color::Color,
    dp::Dp,
    drawable::{
        CircularProgressArgs, CircularProgressArgsBuilder, CircularProgressDrawable,
        RedrawScheduler, RingGeometry, SizePolicy,
    },
    paint::{ColorFilter, Paint, PaintStyle, StrokeCap},
    pipelines::circle::{command::CircleCommand, pipeline::CirclePipeline},
    px::{Px, PxPosition, PxRect, PxSize},
    renderer::{HeadlessRenderer, RenderError},
};
