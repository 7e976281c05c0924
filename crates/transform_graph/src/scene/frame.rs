//! Per-frame pipeline output consumed by the renderer

use crate::entity::{AttenuationFactor, Entity, EntityKind};
use crate::foundation::math::{Mat4, Vec3, Vec4};

/// World transform resolved for one entity
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedEntity {
    /// Entity ID, if it has one
    pub id: Option<String>,
    /// Depth in the graph, 0 for root entities
    pub depth: usize,
    /// Parent world matrix times the entity's local matrix
    pub world_matrix: Mat4,
}

/// Light state the renderer needs for shading
#[derive(Debug, Clone, PartialEq)]
pub enum LightSnapshot {
    /// Distant light
    Distant {
        /// RGB color
        color: [f32; 3],
        /// Intensity
        intensity: f32,
        /// Direction the light travels in scene space
        world_direction: Vec3,
    },
    /// Point light
    Point {
        /// RGB color
        color: [f32; 3],
        /// Intensity
        intensity: f32,
        /// Homogeneous scene-space position
        world_position: Vec4,
        /// Falloff coefficient
        attenuation: f32,
        /// Falloff law
        attenuation_factor: AttenuationFactor,
    },
}

/// Everything one frame of the pipeline produced, in traversal order
#[derive(Debug, Clone, Default)]
pub struct FrameOutput {
    /// Every entity that was not skipped
    pub entities: Vec<ResolvedEntity>,
    /// Distant and point lights with their derived scene-space state
    pub lights: Vec<LightSnapshot>,
}

impl FrameOutput {
    /// World matrix resolved this frame for the entity with `id`
    pub fn world_matrix(&self, id: &str) -> Option<&Mat4> {
        self.entities
            .iter()
            .find(|resolved| resolved.id.as_deref() == Some(id))
            .map(|resolved| &resolved.world_matrix)
    }

    pub(crate) fn clear(&mut self) {
        self.entities.clear();
        self.lights.clear();
    }

    pub(crate) fn record(&mut self, entity: &Entity, world: &Mat4, depth: usize) {
        self.entities.push(ResolvedEntity {
            id: entity.id.clone(),
            depth,
            world_matrix: *world,
        });

        match &entity.kind {
            EntityKind::DistantLight(light) => {
                if let Some(world_direction) = light.world_direction() {
                    self.lights.push(LightSnapshot::Distant {
                        color: light.base.color,
                        intensity: light.base.intensity,
                        world_direction,
                    });
                }
            }
            EntityKind::PointLight(light) => {
                if let Some(world_position) = light.world_position() {
                    self.lights.push(LightSnapshot::Point {
                        color: light.base.color,
                        intensity: light.base.intensity,
                        world_position,
                        attenuation: light.attenuation,
                        attenuation_factor: light.attenuation_factor,
                    });
                }
            }
            EntityKind::Generic | EntityKind::Light(_) | EntityKind::Physics(_) => {}
        }
    }
}
