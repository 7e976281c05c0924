//! World-position capability
//!
//! Entities that are never drawn (lights, physics anchors) still need to know
//! where they ended up after the hierarchy has been applied. They embed a
//! [`WorldPosition`] and expose it through [`Positional`].

use crate::foundation::math::{Mat4, Mat4Ext, Vec3, Vec4};

/// Capability of tracking a scene-space location derived from a world matrix
pub trait Positional {
    /// Project the local position through `world` and cache the result
    fn update_position(&mut self, world: &Mat4) -> Vec4;
}

/// Local position plus the world position derived from it each frame
#[derive(Debug, Clone, PartialEq, Default)]
pub struct WorldPosition {
    /// Local-space position supplied by the author
    pub position: Vec3,
    world_position: Option<Vec4>,
}

impl WorldPosition {
    /// Create a capability anchored at `position`
    pub fn new(position: Vec3) -> Self {
        Self {
            position,
            world_position: None,
        }
    }

    /// Homogeneous world position from the last traversal, `None` before the first one
    pub fn world_position(&self) -> Option<Vec4> {
        self.world_position
    }
}

impl Positional for WorldPosition {
    fn update_position(&mut self, world: &Mat4) -> Vec4 {
        let world_position = world.transform_homogeneous(&self.position);
        self.world_position = Some(world_position);
        world_position
    }
}
