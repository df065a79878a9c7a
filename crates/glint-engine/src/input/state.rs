use std::collections::HashSet;

use super::frame::InputFrame;
use super::types::{InputEvent, Key, KeyState};

/// Held-key state for a single window.
///
/// Transitions are also recorded into the current `InputFrame`.
#[derive(Debug, Default)]
pub struct InputState {
    pub focused: bool,
    pub keys_down: HashSet<Key>,
}

impl InputState {
    pub fn apply_event(&mut self, frame: &mut InputFrame, ev: InputEvent) {
        match &ev {
            InputEvent::Focused(f) => {
                self.focused = *f;
                if !*f {
                    // Releases are not delivered to unfocused windows.
                    for key in self.keys_down.drain() {
                        frame.keys_released.insert(key);
                    }
                }
            }

            InputEvent::Key { key, state, .. } => match state {
                KeyState::Pressed => {
                    if self.keys_down.insert(*key) {
                        frame.keys_pressed.insert(*key);
                    }
                }
                KeyState::Released => {
                    if self.keys_down.remove(key) {
                        frame.keys_released.insert(*key);
                    }
                }
            },
        }

        frame.push_event(ev);
    }

    #[inline]
    pub fn key_down(&self, key: Key) -> bool {
        self.keys_down.contains(&key)
    }

    /// `+1` when only `positive` is held, `-1` when only `negative` is, else `0`.
    pub fn axis(&self, negative: Key, positive: Key) -> f32 {
        match (self.key_down(negative), self.key_down(positive)) {
            (false, true) => 1.0,
            (true, false) => -1.0,
            _ => 0.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(key: Key, state: KeyState) -> InputEvent {
        InputEvent::Key { key, state, repeat: false }
    }

    #[test]
    fn press_and_release_are_recorded_once() {
        let mut state = InputState::default();
        let mut frame = InputFrame::default();

        state.apply_event(&mut frame, key(Key::ArrowLeft, KeyState::Pressed));
        state.apply_event(&mut frame, InputEvent::Key {
            key: Key::ArrowLeft,
            state: KeyState::Pressed,
            repeat: true,
        });
        assert!(state.key_down(Key::ArrowLeft));
        assert!(frame.key_pressed(Key::ArrowLeft));
        assert_eq!(frame.events.len(), 2);

        frame.clear();
        state.apply_event(&mut frame, key(Key::ArrowLeft, KeyState::Released));
        assert!(!state.key_down(Key::ArrowLeft));
        assert!(frame.key_released(Key::ArrowLeft));
        assert!(!frame.key_pressed(Key::ArrowLeft));
    }

    #[test]
    fn focus_loss_releases_held_keys() {
        let mut state = InputState::default();
        let mut frame = InputFrame::default();
        state.apply_event(&mut frame, key(Key::ArrowRight, KeyState::Pressed));
        frame.clear();

        state.apply_event(&mut frame, InputEvent::Focused(false));
        assert!(state.keys_down.is_empty());
        assert!(frame.key_released(Key::ArrowRight));
    }

    #[test]
    fn axis_cancels_when_both_held() {
        let mut state = InputState::default();
        let mut frame = InputFrame::default();
        assert_eq!(state.axis(Key::ArrowLeft, Key::ArrowRight), 0.0);

        state.apply_event(&mut frame, key(Key::ArrowRight, KeyState::Pressed));
        assert_eq!(state.axis(Key::ArrowLeft, Key::ArrowRight), 1.0);

        state.apply_event(&mut frame, key(Key::ArrowLeft, KeyState::Pressed));
        assert_eq!(state.axis(Key::ArrowLeft, Key::ArrowRight), 0.0);

        state.apply_event(&mut frame, key(Key::ArrowRight, KeyState::Released));
        assert_eq!(state.axis(Key::ArrowLeft, Key::ArrowRight), -1.0);
    }
}
