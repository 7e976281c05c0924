//! Orbit demo application
//!
//! Loads a scene description, spins a rig carrying a point light and a
//! bouncing physics ball, and logs the light state the renderer would
//! receive each frame.

use std::time::Duration;

use transform_graph::config::{Config, ConfigError, ConfigFormat, SceneConfig};
use transform_graph::entity::{before_scene_hook, scene_hook, EntityError};
use transform_graph::foundation::logging;
use transform_graph::foundation::math::constants::TAU;
use transform_graph::foundation::time::FrameClock;
use transform_graph::scene::{LightSnapshot, Scene};

const DEFAULT_SCENE: &str = include_str!("../scene.ron");
const FRAME_COUNT: u64 = 240;
const FRAME_INTERVAL: Duration = Duration::from_millis(16);
const LOG_EVERY: u64 = 30;

/// One full turn of the rig every 4 seconds
const RIG_ANGULAR_VELOCITY: f32 = TAU / 4.0;
const FLOOR_HEIGHT: f32 = -2.0;

#[derive(Debug, thiserror::Error)]
enum DemoError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Entity(#[from] EntityError),

    #[error("Scene has no entity with id {0:?}")]
    MissingEntity(&'static str),
}

struct OrbitApp {
    scene: Scene,
    clock: FrameClock,
}

impl OrbitApp {
    fn new(scene_path: Option<String>) -> Result<Self, DemoError> {
        let scene = match scene_path {
            Some(path) => {
                log::info!("Loading scene from {}", path);
                Scene::load(&path)?
            }
            None => {
                log::info!("Loading built-in scene");
                Scene::from_config(SceneConfig::parse(DEFAULT_SCENE, ConfigFormat::Ron)?)?
            }
        };

        Ok(Self {
            scene,
            clock: FrameClock::new(),
        })
    }

    fn initialize(&mut self) -> Result<(), DemoError> {
        log::info!("Initializing orbit demo...");

        let rig = self.scene.find_mut("rig").ok_or(DemoError::MissingEntity("rig"))?;
        rig.on_before_scene(before_scene_hook(|entity, _scene, delta_time| {
            entity.rotate_y(RIG_ANGULAR_VELOCITY * delta_time);
        }));

        let ball = self.scene.find_mut("ball").ok_or(DemoError::MissingEntity("ball"))?;
        ball.on_scene(scene_hook(|entity, scene, _world, _delta_time| {
            let height = entity.matrix[(1, 3)];
            let Some(body) = entity.as_physics_mut() else {
                return;
            };
            if height < FLOOR_HEIGHT && body.velocity.y < 0.0 {
                log::debug!("Ball bounced on frame {}", scene.frame());
                body.velocity.y = -body.velocity.y * 0.8;
            }
        }));

        Ok(())
    }

    fn run(&mut self) -> Result<(), DemoError> {
        self.initialize()?;
        log::info!("Starting orbit demo for {} frames", FRAME_COUNT);

        for _ in 0..FRAME_COUNT {
            let delta_time = self.clock.tick();
            let output = self.scene.model_view(delta_time);

            if self.clock.frame_count() % LOG_EVERY == 0 {
                for light in &output.lights {
                    log_light(light);
                }
                if let Some(world) = output.world_matrix("ball") {
                    log::info!("ball at ({:.2}, {:.2}, {:.2})", world[(0, 3)], world[(1, 3)], world[(2, 3)]);
                }
            }

            std::thread::sleep(FRAME_INTERVAL);
        }

        log::info!("Orbit demo completed after {:.2}s", self.scene.context.elapsed());
        Ok(())
    }
}

fn log_light(light: &LightSnapshot) {
    match light {
        LightSnapshot::Distant { intensity, world_direction, .. } => {
            log::info!(
                "distant light: intensity {:.2}, direction ({:.2}, {:.2}, {:.2})",
                intensity,
                world_direction.x,
                world_direction.y,
                world_direction.z
            );
        }
        LightSnapshot::Point { intensity, world_position, attenuation, attenuation_factor, .. } => {
            log::info!(
                "point light: intensity {:.2}, position ({:.2}, {:.2}, {:.2}), attenuation {} {}",
                intensity,
                world_position.x,
                world_position.y,
                world_position.z,
                attenuation,
                attenuation_factor
            );
        }
    }
}

fn main() {
    logging::init();

    let scene_path = std::env::args().nth(1);
    let result = OrbitApp::new(scene_path).and_then(|mut app| app.run());

    if let Err(e) = result {
        log::error!("Orbit demo failed: {}", e);
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_built_in_scene_loads() {
        let mut app = OrbitApp::new(None).expect("built-in scene is valid");
        app.initialize().expect("rig and ball exist");

        let output = app.scene.model_view(1.0 / 60.0);
        assert_eq!(output.lights.len(), 2);
        assert!(output.world_matrix("ball").is_some());
        assert!(app.scene.find("lamp").and_then(|lamp| lamp.as_point_light()).is_some());
    }
}
