//! Small value types shared by the pipeline and the host.
//!
//! - `ColorRgba`: fragment-stage output and clear colors
//! - `Viewport`: drawable size in logical pixels

mod color;
mod viewport;

pub use color::ColorRgba;
pub use viewport::Viewport;
