//! Glint engine crate.
//!
//! A textured 2D sprite pipeline on wgpu: the WGSL stages and their CPU
//! reference live in [`pipeline`]; the window, device and sprite host around
//! them live in the remaining modules.

pub mod device;
pub mod window;
pub mod input;
pub mod time;
pub mod core;

pub mod logging;
pub mod coords;
pub mod pipeline;
pub mod render;
