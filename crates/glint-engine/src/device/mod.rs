//! GPU device + surface management.
//!
//! - `Gpu` creates the wgpu Instance/Adapter/Device/Queue and the window Surface
//! - `GpuInit` is the startup configuration
//! - frames are acquired as `GpuFrame` and submitted back to `Gpu`

mod context;
mod error;
mod frame;
mod init;
mod surface;

pub use context::Gpu;
pub use error::SurfaceErrorAction;
pub use frame::GpuFrame;
pub use init::GpuInit;
