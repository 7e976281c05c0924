//! Fixed-timestep physics entities
//!
//! A physics entity keeps a velocity that is updated once per frame from a
//! one-shot impulse, a persistent force and optional gravity, then moves the
//! entity by translating its matrix. The step size comes from
//! [`PhysicsConfig`] on the scene context, never from the frame delta, so the
//! simulation behaves the same at any frame rate.

use crate::entity::{before_scene_hook, scene_hook, Entity, EntityKind, Positional, WorldPosition};
use crate::foundation::math::{Mat4, Vec3, Vec4};
use crate::scene::SceneContext;

/// Process-wide physics settings handed to every physics entity through the scene
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PhysicsConfig {
    /// Simulation step in seconds
    pub timestep: f32,
    /// Acceleration applied to entities that have gravity enabled
    pub gravity: Vec3,
}

impl PhysicsConfig {
    /// Default step: 60 updates per second
    pub const DEFAULT_TIMESTEP: f32 = 1.0 / 60.0;

    /// Default gravity vector
    pub const DEFAULT_GRAVITY: Vec3 = Vec3::new(0.0, -9.8, 0.0);
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            timestep: Self::DEFAULT_TIMESTEP,
            gravity: Self::DEFAULT_GRAVITY,
        }
    }
}

/// Physics state of an entity
#[derive(Debug, Clone, PartialEq)]
pub struct PhysicsBody {
    /// Current velocity, applied as a translation every frame
    pub velocity: Vec3,
    /// Whether the configured gravity is applied
    pub gravity: bool,
    /// Local anchor (informational) and its derived world position
    pub anchor: WorldPosition,
    force: Vec3,
    pending_impulse: Option<Vec3>,
}

impl Default for PhysicsBody {
    fn default() -> Self {
        Self {
            velocity: Vec3::zeros(),
            gravity: true,
            anchor: WorldPosition::default(),
            force: Vec3::zeros(),
            pending_impulse: None,
        }
    }
}

impl PhysicsBody {
    /// Apply a one-shot acceleration on the next step, replacing any impulse not yet consumed
    pub fn impulse(&mut self, f: Vec3) {
        self.pending_impulse = Some(f);
    }

    /// Replace the persistent acceleration applied on every step
    pub fn force(&mut self, f: Vec3) {
        self.force = f;
    }

    /// Persistent acceleration
    pub fn persistent_force(&self) -> Vec3 {
        self.force
    }

    /// Impulse waiting for the next step
    pub fn pending_impulse(&self) -> Option<Vec3> {
        self.pending_impulse
    }

    /// Local anchor position
    pub fn position(&self) -> Vec3 {
        self.anchor.position
    }

    /// World position from the last traversal
    pub fn world_position(&self) -> Option<Vec4> {
        self.anchor.world_position()
    }

    /// Advance the velocity by one fixed step and return it
    pub fn integrate(&mut self, config: &PhysicsConfig) -> Vec3 {
        let tt = config.timestep * config.timestep;

        if let Some(impulse) = self.pending_impulse.take() {
            self.velocity += impulse * tt;
        }
        self.velocity += self.force * tt;
        if self.gravity {
            self.velocity += config.gravity * tt;
        }

        self.velocity
    }

    /// Refresh the world position from the world matrix of this frame
    pub fn transform_to_scene(&mut self, world: &Mat4) {
        self.update_position(world);
    }
}

impl Positional for PhysicsBody {
    fn update_position(&mut self, world: &Mat4) -> Vec4 {
        self.anchor.update_position(world)
    }
}

impl Entity {
    /// Create a physics entity with gravity enabled and zero velocity
    pub fn physics() -> Self {
        let mut entity = Self::with_kind(EntityKind::Physics(PhysicsBody::default()));
        entity.on_before_scene(before_scene_hook(|entity, scene, _delta_time| {
            entity.apply_physics(scene);
        }));
        entity.on_scene(scene_hook(|entity, _scene, world, _delta_time| {
            if let Some(body) = entity.as_physics_mut() {
                body.transform_to_scene(world);
            }
        }));
        entity
    }

    /// Run one integration step and move the entity by the resulting velocity
    ///
    /// Does nothing for entities without a physics payload.
    pub fn apply_physics(&mut self, scene: &SceneContext) {
        let Some(body) = self.as_physics_mut() else {
            return;
        };
        let velocity = body.integrate(&scene.physics);
        log::trace!("Physics step for {:?}: velocity {:?}", self.id, velocity);
        self.translate(&velocity);
    }
}
