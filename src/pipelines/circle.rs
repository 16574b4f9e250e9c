//! Circle and arc rendering pipeline.
//!
//! ## Usage
//!
//! Use to rasterize the drawable's recorded canvas commands: stroked
//! circles, filled circles and stroked arcs.

pub mod command;
pub mod pipeline;
