//! Lumen sprite crate.
//!
//! The vertex/fragment stage pair for textured, tinted 2D sprites, its
//! binding contract, and the wgpu plumbing needed to run it.

pub mod coords;
pub mod device;
pub mod logging;
pub mod render;

pub use render::sprite;
