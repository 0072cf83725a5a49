//! Coordinate and color types shared by the sprite pipeline.
//!
//! Canonical CPU space:
//! - Logical pixels (DPI-aware)
//! - Origin top-left
//! - +X right, +Y down
//!
//! Vectors and matrices are glam types; [`Viewport::pixel_transform`] turns
//! logical pixels into the clip-space transform the vertex stage consumes.

mod color;
mod rect;
mod viewport;

pub use color::ColorRgba;
pub use rect::Rect;
pub use viewport::Viewport;
