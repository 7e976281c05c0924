//! Entity factories
//!
//! An [`EntityDesc`] is a flat description of one entity, written in code or
//! loaded from a scene file. Each factory starts from the constructor defaults
//! of its kind and overrides only the fields present in the description;
//! fields that belong to other kinds are ignored.

use serde::{Deserialize, Serialize};

use crate::entity::{
    AttenuationFactor, BaseLight, BeforeSceneHook, Entity, EntityError, EntityKind, SceneHook,
};
use crate::foundation::math::{Mat4, Vec3};

/// `{x, y, z}` triple as written in scene descriptions; missing components are zero
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Xyz {
    /// X component
    pub x: f32,
    /// Y component
    pub y: f32,
    /// Z component
    pub z: f32,
}

impl Xyz {
    /// Create a new triple
    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }
}

impl From<Xyz> for Vec3 {
    fn from(value: Xyz) -> Self {
        Vec3::new(value.x, value.y, value.z)
    }
}

impl From<Vec3> for Xyz {
    fn from(value: Vec3) -> Self {
        Self::new(value.x, value.y, value.z)
    }
}

/// Which factory builds a description
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum NodeType {
    /// Plain transform node
    #[default]
    Entity,
    /// Light with color and intensity only
    Light,
    /// Distant light
    DistantLight,
    /// Point light
    PointLight,
    /// Physics entity
    Physics,
}

/// Description of an entity; every field is optional
#[derive(Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EntityDesc {
    /// Factory used by [`EntityDesc::build`]
    #[serde(rename = "type")]
    pub node_type: NodeType,

    /// Entity ID
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Local matrix, 16 values in column-major order
    #[serde(skip_serializing_if = "Option::is_none")]
    pub matrix: Option<[f32; 16]>,
    /// Child descriptions; replaces any existing children
    #[serde(skip_serializing_if = "Option::is_none")]
    pub children: Option<Vec<EntityDesc>>,
    /// Disabled flag
    #[serde(skip_serializing_if = "Option::is_none")]
    pub disabled: Option<bool>,
    /// Pre-transform hooks, appended after the constructor's own
    #[serde(skip)]
    pub on_before_scene: Vec<BeforeSceneHook>,
    /// Post-transform hooks, appended after the constructor's own
    #[serde(skip)]
    pub on_scene: Vec<SceneHook>,

    /// Light color, RGB from 0.0 to 1.0
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<[f32; 3]>,
    /// Light intensity
    #[serde(skip_serializing_if = "Option::is_none")]
    pub intensity: Option<f32>,
    /// Distant light direction, normalized on load
    #[serde(skip_serializing_if = "Option::is_none")]
    pub direction: Option<Xyz>,
    /// Point light or physics anchor position
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<Xyz>,
    /// Point light falloff coefficient
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attenuation: Option<f32>,
    /// Point light falloff law: `none`, `linear` or `squared`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attenuation_factor: Option<String>,
    /// Physics initial velocity
    #[serde(skip_serializing_if = "Option::is_none")]
    pub velocity: Option<Xyz>,
    /// Physics persistent force
    #[serde(skip_serializing_if = "Option::is_none")]
    pub force: Option<Xyz>,
    /// Physics gravity toggle
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gravity: Option<bool>,
}

impl EntityDesc {
    /// Empty description for the given factory
    pub fn of_type(node_type: NodeType) -> Self {
        Self {
            node_type,
            ..Self::default()
        }
    }

    /// Build the entity with the factory selected by `node_type`
    ///
    /// # Errors
    ///
    /// Returns [`EntityError::Configuration`] when an enumerated field, here
    /// or in any child description, is outside its set of values.
    pub fn build(self) -> Result<Entity, EntityError> {
        match self.node_type {
            NodeType::Entity => self.create_entity(),
            NodeType::Light => self.create_light(),
            NodeType::DistantLight => self.create_distant_light(),
            NodeType::PointLight => self.create_point_light(),
            NodeType::Physics => self.create_physics(),
        }
    }

    /// Apply the transform-node fields to an existing entity
    ///
    /// `id`, `matrix`, `children` and `disabled` overwrite when present; hooks
    /// are moved out of the description and appended to the entity's lists.
    ///
    /// # Errors
    ///
    /// Propagates errors from building child descriptions.
    pub fn merge_into(&mut self, entity: &mut Entity) -> Result<(), EntityError> {
        if let Some(id) = self.id.clone() {
            entity.id = Some(id);
        }
        if let Some(matrix) = self.matrix {
            entity.matrix = Mat4::from_column_slice(&matrix);
        }
        if let Some(children) = self.children.take() {
            entity.children = children
                .into_iter()
                .map(EntityDesc::build)
                .collect::<Result<Vec<_>, _>>()?;
        }
        if !self.on_before_scene.is_empty() {
            entity.on_before_scene(std::mem::take(&mut self.on_before_scene));
        }
        if !self.on_scene.is_empty() {
            entity.on_scene(std::mem::take(&mut self.on_scene));
        }
        if let Some(disabled) = self.disabled {
            entity.disabled = disabled;
        }
        Ok(())
    }

    /// Build a plain transform node
    ///
    /// # Errors
    ///
    /// Propagates errors from child descriptions.
    pub fn create_entity(mut self) -> Result<Entity, EntityError> {
        let mut entity = Entity::new();
        self.merge_into(&mut entity)?;
        log::debug!("Created entity {:?}", entity.id);
        Ok(entity)
    }

    /// Build a light with color and intensity only
    ///
    /// # Errors
    ///
    /// Propagates errors from child descriptions.
    pub fn create_light(mut self) -> Result<Entity, EntityError> {
        let mut entity = Entity::base_light();
        self.merge_into(&mut entity)?;
        if let Some(light) = entity.light_mut() {
            self.merge_light(light);
        }
        log::debug!("Created light {:?}", entity.id);
        Ok(entity)
    }

    /// Build a distant light; the direction is normalized
    ///
    /// # Errors
    ///
    /// Propagates errors from child descriptions.
    pub fn create_distant_light(mut self) -> Result<Entity, EntityError> {
        let mut entity = Entity::distant_light();
        self.merge_into(&mut entity)?;
        if let EntityKind::DistantLight(light) = &mut entity.kind {
            self.merge_light(&mut light.base);
            if let Some(direction) = self.direction {
                light.set_direction(direction.into());
            }
        }
        log::debug!("Created distant light {:?}", entity.id);
        Ok(entity)
    }

    /// Build a point light
    ///
    /// # Errors
    ///
    /// Returns [`EntityError::Configuration`] for an unknown
    /// `attenuationFactor`, before anything else is built.
    pub fn create_point_light(mut self) -> Result<Entity, EntityError> {
        let attenuation_factor = self
            .attenuation_factor
            .as_deref()
            .map(|value| value.parse::<AttenuationFactor>())
            .transpose()?;

        let mut entity = Entity::point_light();
        self.merge_into(&mut entity)?;
        if let EntityKind::PointLight(light) = &mut entity.kind {
            self.merge_light(&mut light.base);
            if let Some(position) = self.position {
                light.anchor.position = position.into();
            }
            if let Some(attenuation) = self.attenuation {
                light.attenuation = attenuation;
            }
            if let Some(attenuation_factor) = attenuation_factor {
                light.attenuation_factor = attenuation_factor;
            }
        }
        log::debug!("Created point light {:?}", entity.id);
        Ok(entity)
    }

    /// Build a physics entity; `force` seeds the persistent force
    ///
    /// # Errors
    ///
    /// Propagates errors from child descriptions.
    pub fn create_physics(mut self) -> Result<Entity, EntityError> {
        let mut entity = Entity::physics();
        self.merge_into(&mut entity)?;
        if let Some(body) = entity.as_physics_mut() {
            if let Some(velocity) = self.velocity {
                body.velocity = velocity.into();
            }
            if let Some(position) = self.position {
                body.anchor.position = position.into();
            }
            if let Some(force) = self.force {
                body.force(force.into());
            }
            if let Some(gravity) = self.gravity {
                body.gravity = gravity;
            }
        }
        log::debug!("Created physics entity {:?}", entity.id);
        Ok(entity)
    }

    fn merge_light(&self, light: &mut BaseLight) {
        if let Some(color) = self.color {
            light.color = color;
        }
        if let Some(intensity) = self.intensity {
            light.intensity = intensity;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::{before_scene_hook, scene_hook};
    use approx::assert_relative_eq;

    #[test]
    fn test_empty_description_keeps_defaults() {
        let entity = EntityDesc::of_type(NodeType::PointLight).build().expect("valid description");
        let light = entity.as_point_light().expect("point light");

        assert_eq!(light.position(), Vec3::new(0.0, 0.0, -1.0));
        assert_relative_eq!(light.attenuation, 0.1);
        assert_eq!(light.attenuation_factor, AttenuationFactor::Linear);
        assert_eq!(light.base, BaseLight::default());
        assert!(entity.id.is_none());
        assert!(!entity.disabled);
    }

    #[test]
    fn test_distant_light_direction_normalized_on_load() {
        let desc = EntityDesc {
            direction: Some(Xyz::new(0.0, 0.0, 5.0)),
            ..EntityDesc::of_type(NodeType::DistantLight)
        };
        let entity = desc.build().expect("valid description");
        let light = entity.as_distant_light().expect("distant light");

        assert_eq!(light.direction(), Vec3::new(0.0, 0.0, 1.0));
        assert_relative_eq!(light.direction().magnitude(), 1.0);
    }

    #[test]
    fn test_point_light_fields_override() {
        let desc = EntityDesc {
            id: Some("lamp".to_string()),
            color: Some([1.0, 0.5, 0.25]),
            intensity: Some(0.0),
            position: Some(Xyz::new(1.0, 2.0, 3.0)),
            attenuation: Some(0.3),
            attenuation_factor: Some("squared".to_string()),
            ..EntityDesc::of_type(NodeType::PointLight)
        };
        let entity = desc.build().expect("valid description");
        let light = entity.as_point_light().expect("point light");

        assert_eq!(entity.id.as_deref(), Some("lamp"));
        assert_eq!(light.base.color, [1.0, 0.5, 0.25]);
        assert_relative_eq!(light.base.intensity, 0.0);
        assert_eq!(light.position(), Vec3::new(1.0, 2.0, 3.0));
        assert_relative_eq!(light.attenuation, 0.3);
        assert_eq!(light.attenuation_factor, AttenuationFactor::Squared);
    }

    #[test]
    fn test_unknown_attenuation_factor_is_rejected() {
        let desc = EntityDesc {
            attenuation_factor: Some("inverse-cube".to_string()),
            ..EntityDesc::of_type(NodeType::PointLight)
        };
        let result = desc.build();

        match result {
            Err(EntityError::Configuration { field, value }) => {
                assert_eq!(field, "attenuationFactor");
                assert_eq!(value, "inverse-cube");
            }
            _ => panic!("expected a configuration error"),
        }
    }

    #[test]
    fn test_child_errors_propagate() {
        let child = EntityDesc {
            attenuation_factor: Some("bogus".to_string()),
            ..EntityDesc::of_type(NodeType::PointLight)
        };
        let desc = EntityDesc {
            children: Some(vec![child]),
            ..EntityDesc::default()
        };
        assert!(matches!(desc.build(), Err(EntityError::Configuration { .. })));
    }

    #[test]
    fn test_hooks_are_appended_after_constructor_hooks() {
        let desc = EntityDesc {
            on_before_scene: vec![before_scene_hook(|_, _, _| {})],
            on_scene: vec![scene_hook(|_, _, _, _| {}), scene_hook(|_, _, _, _| {})],
            ..EntityDesc::of_type(NodeType::PointLight)
        };
        let entity = desc.build().expect("valid description");

        assert_eq!(entity.before_scene_hook_count(), 1);
        assert_eq!(entity.scene_hook_count(), 3);
    }

    #[test]
    fn test_merge_into_existing_entity() {
        let mut entity = Entity::new().with_id("keep");
        entity.translate_x(2.0);
        entity.on_scene(scene_hook(|_, _, _, _| {}));

        let mut desc = EntityDesc {
            disabled: Some(true),
            on_scene: vec![scene_hook(|_, _, _, _| {})],
            ..EntityDesc::default()
        };
        desc.merge_into(&mut entity).expect("merge succeeds");

        assert_eq!(entity.id.as_deref(), Some("keep"));
        assert_relative_eq!(entity.matrix[(0, 3)], 2.0);
        assert!(entity.disabled);
        assert_eq!(entity.scene_hook_count(), 2);
        assert!(desc.on_scene.is_empty());
    }

    #[test]
    fn test_matrix_and_children() {
        let mut columns = [0.0; 16];
        columns[0] = 1.0;
        columns[5] = 1.0;
        columns[10] = 1.0;
        columns[15] = 1.0;
        columns[12] = 7.0;

        let desc = EntityDesc {
            matrix: Some(columns),
            children: Some(vec![
                EntityDesc { id: Some("a".to_string()), ..EntityDesc::default() },
                EntityDesc::of_type(NodeType::Physics),
            ]),
            ..EntityDesc::default()
        };
        let entity = desc.build().expect("valid description");

        assert_relative_eq!(entity.matrix[(0, 3)], 7.0);
        assert_eq!(entity.children.len(), 2);
        assert_eq!(entity.children[0].id.as_deref(), Some("a"));
        assert!(entity.children[1].as_physics().is_some());
    }

    #[test]
    fn test_physics_fields() {
        let desc = EntityDesc {
            velocity: Some(Xyz::new(1.0, 0.0, 0.0)),
            position: Some(Xyz::new(0.0, 1.0, 0.0)),
            force: Some(Xyz::new(0.0, 0.0, 2.0)),
            gravity: Some(false),
            ..EntityDesc::of_type(NodeType::Physics)
        };
        let entity = desc.build().expect("valid description");
        let body = entity.as_physics().expect("physics body");

        assert_eq!(body.velocity, Vec3::new(1.0, 0.0, 0.0));
        assert_eq!(body.position(), Vec3::new(0.0, 1.0, 0.0));
        assert_eq!(body.persistent_force(), Vec3::new(0.0, 0.0, 2.0));
        assert!(!body.gravity);
        assert_eq!(entity.before_scene_hook_count(), 1);
        assert_eq!(entity.scene_hook_count(), 1);
    }

    #[test]
    fn test_fields_of_other_kinds_are_ignored() {
        let desc = EntityDesc {
            color: Some([0.0, 0.0, 0.0]),
            velocity: Some(Xyz::new(9.0, 9.0, 9.0)),
            ..EntityDesc::of_type(NodeType::Entity)
        };
        let entity = desc.build().expect("valid description");
        assert_eq!(entity.kind, EntityKind::Generic);
        assert_eq!(entity.matrix, Mat4::identity());
    }

    #[test]
    fn test_description_from_toml() {
        let desc: EntityDesc = toml::from_str(
            r#"
            type = "pointLight"
            id = "lamp"
            color = [0.5, 0.5, 1.0]
            position = { x = 0.0, y = 3.0 }
            attenuationFactor = "none"
            "#,
        )
        .expect("valid toml");

        assert_eq!(desc.node_type, NodeType::PointLight);
        assert_eq!(desc.position, Some(Xyz::new(0.0, 3.0, 0.0)));

        let entity = desc.build().expect("valid description");
        let light = entity.as_point_light().expect("point light");
        assert_eq!(light.attenuation_factor, AttenuationFactor::None);
        assert_eq!(light.base.color, [0.5, 0.5, 1.0]);
    }
}
