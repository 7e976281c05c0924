//! # Transform Graph
//!
//! A hierarchical scene graph that resolves world transforms once per frame.
//!
//! ## Features
//!
//! - **Chainable Transforms**: In-place translate, rotate, scale and invert on each node
//! - **Two-Phase Hooks**: Per-entity callbacks before and after the world matrix is known
//! - **Lights**: Distant and point lights with scene-space direction and position
//! - **Fixed-Step Physics**: Frame-rate independent velocity integration
//! - **Scene Files**: Entity descriptions loaded from TOML or RON
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use transform_graph::prelude::*;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let mut rig = Entity::new().with_id("rig");
//!     rig.on_before_scene(before_scene_hook(|entity, _scene, delta_time| {
//!         entity.rotate_y(delta_time);
//!     }));
//!
//!     let mut lamp = Entity::point_light().with_id("lamp");
//!     lamp.translate_x(2.0);
//!
//!     let mut scene = Scene::new();
//!     scene.add(rig.with_child(lamp));
//!
//!     let output = scene.model_view(1.0 / 60.0);
//!     for light in &output.lights {
//!         println!("{light:?}");
//!     }
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names, clippy::too_many_arguments)]

pub mod foundation;
pub mod config;
pub mod entity;
pub mod scene;

/// Common imports for scene graph users
pub mod prelude {
    pub use crate::{
        config::{Config, ConfigError, ConfigFormat, PhysicsSettings, SceneConfig},
        entity::{
            before_scene_hook, scene_hook, AttenuationFactor, BaseLight, BeforeSceneHook, DistantLight,
            Entity, EntityDesc, EntityError, EntityKind, NodeType, PhysicsBody, PhysicsConfig, PointLight,
            Positional, SceneHook, WorldPosition, Xyz,
        },
        foundation::{
            math::{Mat4, Mat4Ext, Vec3, Vec4},
            time::FrameClock,
        },
        scene::{FrameOutput, LightSnapshot, Scene, SceneContext},
    };
}
