//! GPU device management.
//!
//! Creates the wgpu Instance/Adapter/Device/Queue without a window, plus the
//! offscreen targets and texture uploads the sprite pipeline needs to run
//! outside a presentation loop.

mod headless;
mod init;

pub use headless::{HeadlessGpu, OffscreenTarget};
pub use init::HeadlessInit;
