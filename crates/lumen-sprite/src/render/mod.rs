//! GPU rendering subsystem.
//!
//! Renderers own their GPU resources (pipelines, buffers) and record into a
//! caller-provided encoder via [`RenderTarget`].
//!
//! Convention:
//! - CPU geometry is in logical pixels (top-left origin, +Y down).
//! - The per-draw transform takes it to clip space (see
//!   [`Viewport::pixel_transform`](crate::coords::Viewport::pixel_transform)).

mod ctx;
pub mod sprite;

pub use ctx::{RenderCtx, RenderTarget};
