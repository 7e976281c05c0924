//! Scene driver
//!
//! The scene owns the root entities and walks them once per frame:
//!
//! ```text
//! for each entity (depth first, disabled subtrees skipped)
//!     pre-transform hooks        (local state)
//!     W = parent world * local
//!     post-transform hooks       (world matrix W)
//!     children, with W as their parent world matrix
//! ```
//!
//! Hooks receive the [`SceneContext`], the read-mostly state shared by every
//! entity for the frame. The resolved world matrices and light state are
//! collected into a [`FrameOutput`] for the renderer.

mod frame;
mod traversal;

#[cfg(test)]
mod tests;

pub use frame::{FrameOutput, LightSnapshot, ResolvedEntity};
pub use traversal::model_view;

use crate::config::{ConfigError, SceneConfig};
use crate::entity::{Entity, EntityError, PhysicsConfig};
use std::path::Path;

/// State shared with every hook during a frame
#[derive(Debug, Clone, Default)]
pub struct SceneContext {
    /// Physics step and gravity used by physics entities
    pub physics: PhysicsConfig,
    frame: u64,
    elapsed: f32,
}

impl SceneContext {
    /// Create a context with the given physics settings
    pub fn new(physics: PhysicsConfig) -> Self {
        Self {
            physics,
            frame: 0,
            elapsed: 0.0,
        }
    }

    /// Number of frames processed so far, counting the current one
    pub fn frame(&self) -> u64 {
        self.frame
    }

    /// Sum of the frame deltas passed to the scene, in seconds
    pub fn elapsed(&self) -> f32 {
        self.elapsed
    }

    fn advance(&mut self, delta_time: f32) {
        self.frame += 1;
        self.elapsed += delta_time;
    }
}

/// Root entities plus the context and output of the per-frame pipeline
#[derive(Debug, Default)]
pub struct Scene {
    /// Root entities, processed in order
    pub graph: Vec<Entity>,
    /// Context handed to hooks
    pub context: SceneContext,
    output: FrameOutput,
}

impl Scene {
    /// Create an empty scene with default physics
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty scene with the given physics settings
    pub fn with_physics(physics: PhysicsConfig) -> Self {
        Self {
            context: SceneContext::new(physics),
            ..Self::default()
        }
    }

    /// Build a scene from a loaded configuration
    ///
    /// # Errors
    ///
    /// Returns the first entity description that fails validation.
    pub fn from_config(config: SceneConfig) -> Result<Self, EntityError> {
        let mut scene = Self::with_physics(config.physics.resolve());
        for desc in config.entities {
            scene.graph.push(desc.build()?);
        }
        log::info!("Built scene with {} root entities", scene.graph.len());
        Ok(scene)
    }

    /// Load a TOML or RON scene file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed, or if an entity
    /// description is invalid.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        use crate::config::Config;
        let config = SceneConfig::load_from_file(path)?;
        Ok(Self::from_config(config)?)
    }

    /// Append a root entity
    pub fn add(&mut self, entity: Entity) -> &mut Self {
        self.graph.push(entity);
        self
    }

    /// Find an entity anywhere in the graph by ID
    pub fn find(&self, id: &str) -> Option<&Entity> {
        self.graph.iter().find_map(|entity| entity.find(id))
    }

    /// Mutable look-up of an entity anywhere in the graph by ID
    pub fn find_mut(&mut self, id: &str) -> Option<&mut Entity> {
        self.graph.iter_mut().find_map(|entity| entity.find_mut(id))
    }

    /// Run the transform pipeline for one frame
    pub fn model_view(&mut self, delta_time: f32) -> &FrameOutput {
        self.context.advance(delta_time);
        model_view(&mut self.graph, &self.context, delta_time, &mut self.output);
        log::trace!(
            "Frame {}: {} entities resolved, {} lights",
            self.context.frame(),
            self.output.entities.len(),
            self.output.lights.len()
        );
        &self.output
    }

    /// Output of the most recent frame
    pub fn output(&self) -> &FrameOutput {
        &self.output
    }
}
