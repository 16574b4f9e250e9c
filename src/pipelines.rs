//! Render pipelines backing the drawable's canvas primitives.

pub mod circle;
