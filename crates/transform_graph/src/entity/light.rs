//! Light entities
//!
//! Lights are never drawn, they only feed the renderer's shading. Every light
//! has a color and an intensity; distant lights add a direction and point
//! lights add a position with an attenuation model.
//!
//! A distant light's world direction deliberately ignores the hierarchy: it
//! is always the negated local direction. A point light's world position goes
//! through the full world matrix.

use std::fmt;
use std::str::FromStr;

use crate::entity::{scene_hook, Entity, EntityError, EntityKind, Positional, WorldPosition};
use crate::foundation::math::{constants::EPSILON, Mat4, Vec3, Vec4};

/// Color and intensity shared by every light
#[derive(Debug, Clone, PartialEq)]
pub struct BaseLight {
    /// RGB color, each component from 0.0 to 1.0
    pub color: [f32; 3],
    /// Light intensity, typically between 0 and 1
    pub intensity: f32,
}

impl Default for BaseLight {
    fn default() -> Self {
        Self {
            color: [1.0, 1.0, 1.0],
            intensity: 1.0,
        }
    }
}

/// Infinitely distant light with a direction and no position
#[derive(Debug, Clone, PartialEq)]
pub struct DistantLight {
    /// Color and intensity
    pub base: BaseLight,
    direction: Vec3,
    world_direction: Option<Vec3>,
}

impl Default for DistantLight {
    fn default() -> Self {
        Self {
            base: BaseLight::default(),
            direction: Self::DEFAULT_DIRECTION,
            world_direction: None,
        }
    }
}

impl DistantLight {
    /// Direction used when none (or a zero-length one) is supplied
    pub const DEFAULT_DIRECTION: Vec3 = Vec3::new(0.0, 0.0, 1.0);

    /// Normalized local direction
    pub fn direction(&self) -> Vec3 {
        self.direction
    }

    /// Set the direction; it is normalized, and a zero-length vector is ignored
    pub fn set_direction(&mut self, direction: Vec3) {
        match direction.try_normalize(EPSILON) {
            Some(unit) => self.direction = unit,
            None => log::warn!("Ignoring zero-length light direction {:?}", direction),
        }
    }

    /// Direction light travels in scene space, set on each traversal
    pub fn world_direction(&self) -> Option<Vec3> {
        self.world_direction
    }

    /// Derive the world direction from the local direction
    pub fn transform_to_scene(&mut self) {
        self.world_direction = Some(-self.direction);
    }
}

/// Falloff law applied to a point light's contribution over distance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AttenuationFactor {
    /// No falloff over distance
    None,
    /// Falloff proportional to distance
    #[default]
    Linear,
    /// Falloff proportional to distance squared
    Squared,
}

impl AttenuationFactor {
    /// Name used in scene descriptions
    pub fn as_str(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Linear => "linear",
            Self::Squared => "squared",
        }
    }

    /// Distance term of the law: `1`, `d` or `d²`
    pub fn distance_term(self, distance: f32) -> f32 {
        match self {
            Self::None => 1.0,
            Self::Linear => distance,
            Self::Squared => distance * distance,
        }
    }
}

impl fmt::Display for AttenuationFactor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AttenuationFactor {
    type Err = EntityError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "none" => Ok(Self::None),
            "linear" => Ok(Self::Linear),
            "squared" => Ok(Self::Squared),
            other => Err(EntityError::Configuration {
                field: "attenuationFactor",
                value: other.to_string(),
            }),
        }
    }
}

/// Light with a scene position, emitting equally in all directions
#[derive(Debug, Clone, PartialEq)]
pub struct PointLight {
    /// Color and intensity
    pub base: BaseLight,
    /// Local position and its derived world position
    pub anchor: WorldPosition,
    /// Falloff coefficient
    pub attenuation: f32,
    /// Falloff law
    pub attenuation_factor: AttenuationFactor,
}

impl Default for PointLight {
    fn default() -> Self {
        Self {
            base: BaseLight::default(),
            anchor: WorldPosition::new(Vec3::new(0.0, 0.0, -1.0)),
            attenuation: 0.1,
            attenuation_factor: AttenuationFactor::default(),
        }
    }
}

impl PointLight {
    /// Local position
    pub fn position(&self) -> Vec3 {
        self.anchor.position
    }

    /// World position from the last traversal
    pub fn world_position(&self) -> Option<Vec4> {
        self.anchor.world_position()
    }

    /// Divisor the renderer applies to the intensity at `distance`:
    /// the coefficient times the law's distance term
    pub fn attenuation_at(&self, distance: f32) -> f32 {
        self.attenuation * self.attenuation_factor.distance_term(distance)
    }

    /// Intensity reaching a surface `distance` away
    pub fn contribution_at(&self, distance: f32) -> f32 {
        let attenuation = self.attenuation_at(distance);
        if attenuation <= EPSILON {
            self.base.intensity
        } else {
            self.base.intensity / attenuation
        }
    }
}

impl Positional for PointLight {
    fn update_position(&mut self, world: &Mat4) -> Vec4 {
        self.anchor.update_position(world)
    }
}

impl Entity {
    /// Create a light carrying only color and intensity
    pub fn base_light() -> Self {
        Self::with_kind(EntityKind::Light(BaseLight::default()))
    }

    /// Create a distant light; its world direction is refreshed every frame
    pub fn distant_light() -> Self {
        let mut entity = Self::with_kind(EntityKind::DistantLight(DistantLight::default()));
        entity.on_scene(scene_hook(|entity, _scene, _world, _delta_time| {
            if let Some(light) = entity.as_distant_light_mut() {
                light.transform_to_scene();
            }
        }));
        entity
    }

    /// Create a point light; its world position is refreshed every frame
    pub fn point_light() -> Self {
        let mut entity = Self::with_kind(EntityKind::PointLight(PointLight::default()));
        entity.on_scene(scene_hook(|entity, _scene, world, _delta_time| {
            if let Some(light) = entity.as_point_light_mut() {
                light.update_position(world);
            }
        }));
        entity
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_light_defaults() {
        let entity = Entity::base_light();
        let light = entity.light().expect("base light");
        assert_eq!(light.color, [1.0, 1.0, 1.0]);
        assert_relative_eq!(light.intensity, 1.0);
        assert_eq!(entity.scene_hook_count(), 0);

        let point = PointLight::default();
        assert_eq!(point.position(), Vec3::new(0.0, 0.0, -1.0));
        assert_relative_eq!(point.attenuation, 0.1);
        assert_eq!(point.attenuation_factor, AttenuationFactor::Linear);
        assert!(point.world_position().is_none());
    }

    #[test]
    fn test_distant_light_direction_is_normalized() {
        let mut light = DistantLight::default();
        light.set_direction(Vec3::new(3.0, 0.0, 4.0));
        assert_relative_eq!(light.direction(), Vec3::new(0.6, 0.0, 0.8), epsilon = 1e-6);

        light.set_direction(Vec3::zeros());
        assert_relative_eq!(light.direction(), Vec3::new(0.6, 0.0, 0.8), epsilon = 1e-6);
    }

    #[test]
    fn test_distant_light_world_direction_is_negated() {
        let mut light = DistantLight::default();
        assert!(light.world_direction().is_none());
        light.transform_to_scene();
        assert_eq!(light.world_direction(), Some(Vec3::new(0.0, 0.0, -1.0)));
    }

    #[test]
    fn test_light_constructors_register_scene_hook() {
        assert_eq!(Entity::distant_light().scene_hook_count(), 1);
        assert_eq!(Entity::point_light().scene_hook_count(), 1);
        assert_eq!(Entity::point_light().before_scene_hook_count(), 0);
    }

    #[test]
    fn test_attenuation_factor_parsing() {
        assert_eq!("none".parse::<AttenuationFactor>(), Ok(AttenuationFactor::None));
        assert_eq!("squared".parse::<AttenuationFactor>(), Ok(AttenuationFactor::Squared));

        let error = "cubic".parse::<AttenuationFactor>().unwrap_err();
        assert_eq!(
            error,
            EntityError::Configuration { field: "attenuationFactor", value: "cubic".to_string() }
        );
        assert!(error.to_string().contains("attenuationFactor"));
    }

    #[test]
    fn test_attenuation_laws() {
        let mut light = PointLight { attenuation: 0.5, ..PointLight::default() };

        light.attenuation_factor = AttenuationFactor::None;
        assert_relative_eq!(light.attenuation_at(4.0), 0.5);

        light.attenuation_factor = AttenuationFactor::Linear;
        assert_relative_eq!(light.attenuation_at(4.0), 2.0);
        assert_relative_eq!(light.contribution_at(4.0), 0.5);

        light.attenuation_factor = AttenuationFactor::Squared;
        assert_relative_eq!(light.attenuation_at(4.0), 8.0);
        assert_relative_eq!(light.contribution_at(0.0), 1.0);
    }
}
