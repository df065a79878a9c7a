//! Keyboard input.
//!
//! Platform-agnostic: the window runtime translates winit events into
//! `InputEvent`s and feeds them to the per-window `InputState`.

mod frame;
mod state;
mod types;

pub use frame::InputFrame;
pub use state::InputState;
pub use types::{InputEvent, Key, KeyState};
