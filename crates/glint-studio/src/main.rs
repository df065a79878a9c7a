mod player;

use std::path::PathBuf;

use anyhow::Result;

use glint_engine::coords::ColorRgba;
use glint_engine::core::{App, AppControl, FrameCtx};
use glint_engine::device::GpuInit;
use glint_engine::input::Key;
use glint_engine::logging::{init_logging, LoggingConfig};
use glint_engine::pipeline::SamplerDesc;
use glint_engine::render::{Camera, SpritePipelineConfig, SpriteRenderer};
use glint_engine::window::{Runtime, RuntimeConfig};

use player::Player;

/// World extent shown by the camera, in sprite units.
const WORLD_WIDTH: f32 = 229.0;
const WORLD_HEIGHT: f32 = 190.0;

const CLEAR: ColorRgba = ColorRgba::new(0.2, 0.2, 0.2, 1.0);

struct Scene {
    renderer: SpriteRenderer,
    camera: Camera,
    player: Player,
}

impl Scene {
    fn new(ctx: &FrameCtx<'_, '_>, texture_path: Option<&std::path::Path>) -> Result<Self> {
        let device = ctx.gpu.device();
        let queue = ctx.gpu.queue();

        let renderer = SpriteRenderer::new(device, SpritePipelineConfig::default())?;
        let sampler = ctx.gpu.create_sampler(&SamplerDesc::nearest());
        let player = Player::new(device, queue, renderer.sprite_layout(), &sampler, texture_path)?;

        Ok(Self {
            renderer,
            camera: Camera::pixels(WORLD_WIDTH, WORLD_HEIGHT),
            player,
        })
    }
}

struct Studio {
    texture_path: Option<PathBuf>,
    scene: Option<Scene>,
}

impl App for Studio {
    fn on_frame(&mut self, ctx: &mut FrameCtx<'_, '_>) -> AppControl {
        if ctx.input_frame.key_pressed(Key::Escape) {
            return AppControl::Exit;
        }

        if self.scene.is_none() {
            match Scene::new(ctx, self.texture_path.as_deref()) {
                Ok(scene) => self.scene = Some(scene),
                Err(e) => {
                    log::error!("failed to set up scene: {e:#}");
                    return AppControl::Exit;
                }
            }
        }
        let Some(scene) = self.scene.as_mut() else {
            return AppControl::Exit;
        };

        scene
            .player
            .update(ctx.gpu.queue(), ctx.input, ctx.input_frame, ctx.time.dt);

        let Scene { renderer, camera, player } = scene;
        ctx.render(CLEAR, |rctx, target| {
            renderer.render(rctx, target, camera, &[player.sprite()]);
        })
    }
}

fn main() -> Result<()> {
    init_logging(LoggingConfig::default());

    let texture_path = std::env::args_os().nth(1).map(PathBuf::from);
    if let Some(path) = &texture_path {
        log::info!("sprite texture: {}", path.display());
    }

    let config = RuntimeConfig {
        title: "glint studio".to_string(),
        ..RuntimeConfig::default()
    };

    Runtime::run(
        config,
        GpuInit::default(),
        Studio {
            texture_path,
            scene: None,
        },
    )
}
