use std::path::Path;

use anyhow::Result;
use nalgebra_glm as glm;

use glint_engine::input::{InputFrame, InputState, Key};
use glint_engine::render::{ColorSpace, Sprite, SpriteTransform, Texture};

/// Local-frame units per 60 Hz frame.
pub const SPEED: f32 = 0.08;
/// Radians per second.
pub const TURN_RATE: f32 = 1.5;

pub const START_POSITION: [f32; 2] = [30.0, 30.0];
pub const SIZE: [f32; 2] = [13.0, 8.0];

const CHECKER_SIZE: u32 = 8;

/// The keyboard-controlled sprite.
pub struct Player {
    sprite: Sprite,
    _texture: Texture,
}

impl Player {
    pub fn new(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        layout: &wgpu::BindGroupLayout,
        sampler: &wgpu::Sampler,
        texture_path: Option<&Path>,
    ) -> Result<Self> {
        let texture = match texture_path {
            Some(path) => Texture::load(device, queue, path, ColorSpace::Srgb)?,
            None => {
                log::info!("no texture given, using a checkerboard");
                Texture::from_rgba8(
                    device,
                    queue,
                    CHECKER_SIZE,
                    CHECKER_SIZE,
                    &checkerboard(CHECKER_SIZE),
                    ColorSpace::Srgb,
                    Some("checkerboard"),
                )?
            }
        };

        let sprite = Sprite::new(device, layout, &texture, sampler, start_transform());

        Ok(Self { sprite, _texture: texture })
    }

    pub fn update(
        &mut self,
        queue: &wgpu::Queue,
        input: &InputState,
        input_frame: &InputFrame,
        dt: f32,
    ) {
        if input_frame.key_pressed(Key::R) {
            let start = start_transform();
            self.sprite.set_rotation(queue, start.rotation);
            self.sprite.set_position(queue, start.position);
            return;
        }

        let turn = input.axis(Key::E, Key::Q);
        if turn != 0.0 {
            let rotation = self.sprite.transform().rotation + turn * TURN_RATE * dt;
            self.sprite.set_rotation(queue, rotation);
        }

        let step = horizontal_step(input, dt);
        if step != 0.0 {
            self.sprite.move_by(queue, glm::vec2(step, 0.0));
        }
    }

    pub fn sprite(&self) -> &Sprite {
        &self.sprite
    }
}

fn start_transform() -> SpriteTransform {
    SpriteTransform::new(glm::Vec2::from(START_POSITION), glm::Vec2::from(SIZE))
}

/// Arrow-key movement for this frame, scaled so 60 Hz moves `SPEED` per frame.
fn horizontal_step(input: &InputState, dt: f32) -> f32 {
    input.axis(Key::ArrowLeft, Key::ArrowRight) * SPEED * dt * 60.0
}

/// Two-tone RGBA8 checkerboard, `size × size` texels.
fn checkerboard(size: u32) -> Vec<u8> {
    let mut texels = Vec::with_capacity((size * size * 4) as usize);
    for y in 0..size {
        for x in 0..size {
            let texel = if (x + y) % 2 == 0 {
                [0xe0, 0x6c, 0x3a, 0xff]
            } else {
                [0x2a, 0x2d, 0x3c, 0xff]
            };
            texels.extend_from_slice(&texel);
        }
    }
    texels
}

#[cfg(test)]
mod tests {
    use super::*;
    use glint_engine::input::{InputEvent, KeyState};

    fn hold(state: &mut InputState, key: Key) {
        let mut frame = InputFrame::default();
        state.apply_event(&mut frame, InputEvent::Key { key, state: KeyState::Pressed, repeat: false });
    }

    #[test]
    fn checkerboard_alternates() {
        let t = checkerboard(4);
        assert_eq!(t.len(), 4 * 4 * 4);
        assert_ne!(t[0..4], t[4..8]);
        assert_eq!(t[0..4], t[8..12]);
        // Row 1 starts with the other color.
        assert_eq!(t[16..20], t[4..8]);
    }

    #[test]
    fn step_is_speed_per_sixtieth_second() {
        let mut input = InputState::default();
        assert_eq!(horizontal_step(&input, 1.0 / 60.0), 0.0);

        hold(&mut input, Key::ArrowRight);
        assert!((horizontal_step(&input, 1.0 / 60.0) - SPEED).abs() < 1e-6);

        hold(&mut input, Key::ArrowLeft);
        assert_eq!(horizontal_step(&input, 1.0 / 60.0), 0.0);
    }

    #[test]
    fn start_transform_places_player() {
        let t = start_transform();
        assert_eq!(t.position, glm::vec2(30.0, 30.0));
        assert_eq!(t.size, glm::vec2(13.0, 8.0));
        assert_eq!(t.rotation, 0.0);
    }
}
