//! Scene entities
//!
//! An [`Entity`] is a node of the scene graph: a local transform that is
//! mutated in place through chainable operations, an ordered list of owned
//! children, a disabled flag that prunes the subtree from traversal, and two
//! ordered hook lists run by the scene every frame.
//!
//! What an entity *is* (plain transform, light, physics body) lives in its
//! [`EntityKind`] payload. The kind-specific constructors register the hooks
//! that keep the payload's derived state up to date.

mod error;
mod hooks;
mod positional;
mod light;
mod physics;
mod factory;

pub use error::EntityError;
pub use hooks::{before_scene_hook, scene_hook, BeforeSceneHook, HookList, SceneHook};
pub use positional::{Positional, WorldPosition};
pub use light::{AttenuationFactor, BaseLight, DistantLight, PointLight};
pub use physics::{PhysicsBody, PhysicsConfig};
pub use factory::{EntityDesc, NodeType, Xyz};

use crate::foundation::math::{utils, Mat4, Mat4Ext, Unit, Vec3, Vec4};
use crate::scene::SceneContext;
use std::fmt;

/// Kind-specific payload carried by an entity
#[derive(Debug, Clone, PartialEq, Default)]
pub enum EntityKind {
    /// Plain transform node
    #[default]
    Generic,
    /// Light with color and intensity only
    Light(BaseLight),
    /// Infinitely distant light with a direction
    DistantLight(DistantLight),
    /// Positional, attenuating light
    PointLight(PointLight),
    /// Transform node driven by the fixed-step integrator
    Physics(PhysicsBody),
}

/// A scene graph node
pub struct Entity {
    /// Optional unique ID for direct look-up from hooks and drivers
    pub id: Option<String>,

    /// Local transform, relative to the parent
    pub matrix: Mat4,

    /// Child entities; the parent matrix is applied first
    pub children: Vec<Entity>,

    /// When true the entity and all of its children are skipped during traversal
    pub disabled: bool,

    /// Kind-specific state
    pub kind: EntityKind,

    before_scene_hooks: Vec<BeforeSceneHook>,
    scene_hooks: Vec<SceneHook>,
}

impl Default for Entity {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Entity")
            .field("id", &self.id)
            .field("matrix", &self.matrix)
            .field("disabled", &self.disabled)
            .field("kind", &self.kind)
            .field("before_scene_hooks", &self.before_scene_hooks.len())
            .field("scene_hooks", &self.scene_hooks.len())
            .field("children", &self.children)
            .finish()
    }
}

impl Entity {
    /// Create a plain transform node with an identity matrix
    pub fn new() -> Self {
        Self::with_kind(EntityKind::Generic)
    }

    /// Create a node carrying `kind` without registering any hooks
    pub fn with_kind(kind: EntityKind) -> Self {
        Self {
            id: None,
            matrix: Mat4::identity(),
            children: Vec::new(),
            disabled: false,
            kind,
            before_scene_hooks: Vec::new(),
            scene_hooks: Vec::new(),
        }
    }

    /// Builder pattern: set the ID
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Builder pattern: append a child
    pub fn with_child(mut self, child: Entity) -> Self {
        self.children.push(child);
        self
    }

    /// Append a child at the end of the child list
    pub fn add_child(&mut self, child: Entity) -> &mut Self {
        self.children.push(child);
        self
    }

    /// Detach the first direct child with the given ID
    pub fn remove_child(&mut self, id: &str) -> Option<Entity> {
        let index = self.children.iter().position(|child| child.id.as_deref() == Some(id))?;
        Some(self.children.remove(index))
    }

    /// Depth-first search of this subtree (including self) by ID
    pub fn find(&self, id: &str) -> Option<&Entity> {
        if self.id.as_deref() == Some(id) {
            return Some(self);
        }
        self.children.iter().find_map(|child| child.find(id))
    }

    /// Mutable depth-first search of this subtree (including self) by ID
    pub fn find_mut(&mut self, id: &str) -> Option<&mut Entity> {
        if self.id.as_deref() == Some(id) {
            return Some(self);
        }
        self.children.iter_mut().find_map(|child| child.find_mut(id))
    }

    // ---- hooks ---------------------------------------------------------

    /// Add pre-transform hooks, called at the start of each frame before the
    /// local matrix is multiplied by the parent matrix
    pub fn on_before_scene(&mut self, hooks: impl HookList<BeforeSceneHook>) -> &mut Self {
        hooks.append_to(&mut self.before_scene_hooks);
        self
    }

    /// Add post-transform hooks, called once the local matrix has been
    /// multiplied by the parent matrix
    pub fn on_scene(&mut self, hooks: impl HookList<SceneHook>) -> &mut Self {
        hooks.append_to(&mut self.scene_hooks);
        self
    }

    /// Number of registered pre-transform hooks
    pub fn before_scene_hook_count(&self) -> usize {
        self.before_scene_hooks.len()
    }

    /// Number of registered post-transform hooks
    pub fn scene_hook_count(&self) -> usize {
        self.scene_hooks.len()
    }

    pub(crate) fn run_before_scene(&mut self, scene: &SceneContext, delta_time: f32) {
        // Hooks registered while these run land in the emptied list and are
        // appended afterwards, so they first fire next frame.
        let mut hooks = std::mem::take(&mut self.before_scene_hooks);
        for hook in &mut hooks {
            hook(&mut *self, scene, delta_time);
        }
        hooks.append(&mut self.before_scene_hooks);
        self.before_scene_hooks = hooks;
    }

    pub(crate) fn run_scene(&mut self, scene: &SceneContext, world: &Mat4, delta_time: f32) {
        let mut hooks = std::mem::take(&mut self.scene_hooks);
        for hook in &mut hooks {
            hook(&mut *self, scene, world, delta_time);
        }
        hooks.append(&mut self.scene_hooks);
        self.scene_hooks = hooks;
    }

    // ---- chained matrix operations -------------------------------------

    /// Reset the matrix to identity
    pub fn identity(&mut self) -> &mut Self {
        self.matrix.fill_with_identity();
        self
    }

    /// Invert the matrix in place
    ///
    /// # Errors
    ///
    /// Returns [`EntityError::SingularMatrix`] when the determinant is
    /// numerically zero; the matrix is left unchanged.
    pub fn invert(&mut self) -> Result<&mut Self, EntityError> {
        let determinant = self.matrix.determinant();
        if utils::is_singular(determinant) || !self.matrix.try_inverse_mut() {
            return Err(EntityError::SingularMatrix { determinant });
        }
        Ok(self)
    }

    /// Right-multiply the matrix by `m`
    pub fn multiply(&mut self, m: &Mat4) -> &mut Self {
        self.matrix *= m;
        self
    }

    /// Scale by a per-axis factor
    pub fn scale(&mut self, factors: &Vec3) -> &mut Self {
        self.matrix.prepend_nonuniform_scaling_mut(factors);
        self
    }

    /// Scale uniformly by `n`
    pub fn scale_n(&mut self, n: f32) -> &mut Self {
        self.matrix.prepend_scaling_mut(n);
        self
    }

    /// Rotate by `radians` around an arbitrary axis
    ///
    /// A zero-length axis leaves the matrix unchanged.
    pub fn rotate(&mut self, radians: f32, axis: &Vec3) -> &mut Self {
        match Unit::try_new(*axis, f32::EPSILON) {
            Some(axis) => self.matrix *= Mat4::from_axis_angle(&axis, radians),
            None => log::warn!("Ignoring rotation around zero-length axis on entity {:?}", self.id),
        }
        self
    }

    /// Rotate by `radians` around the X axis
    pub fn rotate_x(&mut self, radians: f32) -> &mut Self {
        self.matrix *= Mat4::rotation_x(radians);
        self
    }

    /// Rotate by `radians` around the Y axis
    pub fn rotate_y(&mut self, radians: f32) -> &mut Self {
        self.matrix *= Mat4::rotation_y(radians);
        self
    }

    /// Rotate by `radians` around the Z axis
    pub fn rotate_z(&mut self, radians: f32) -> &mut Self {
        self.matrix *= Mat4::rotation_z(radians);
        self
    }

    /// Rotate by yaw (heading), pitch (elevation) and roll (bank) Euler angles
    /// in radians. Unlike the other operations this does not chain.
    pub fn rotate_ypr(&mut self, yaw: f32, pitch: f32, roll: f32) {
        self.matrix *= Mat4::from_ypr(yaw, pitch, roll);
    }

    /// Translate by `offset`
    pub fn translate(&mut self, offset: &Vec3) -> &mut Self {
        self.matrix.prepend_translation_mut(offset);
        self
    }

    /// Translate along X
    pub fn translate_x(&mut self, n: f32) -> &mut Self {
        self.translate(&Vec3::new(n, 0.0, 0.0))
    }

    /// Translate along Y
    pub fn translate_y(&mut self, n: f32) -> &mut Self {
        self.translate(&Vec3::new(0.0, n, 0.0))
    }

    /// Translate along Z
    pub fn translate_z(&mut self, n: f32) -> &mut Self {
        self.translate(&Vec3::new(0.0, 0.0, n))
    }

    /// Determinant of the matrix
    pub fn determinant(&self) -> f32 {
        self.matrix.determinant()
    }

    /// Transpose the matrix in place
    pub fn transpose(&mut self) -> &mut Self {
        self.matrix.transpose_mut();
        self
    }

    // ---- kind accessors ------------------------------------------------

    /// Color and intensity shared by every light kind
    pub fn light(&self) -> Option<&BaseLight> {
        match &self.kind {
            EntityKind::Light(light) => Some(light),
            EntityKind::DistantLight(light) => Some(&light.base),
            EntityKind::PointLight(light) => Some(&light.base),
            EntityKind::Generic | EntityKind::Physics(_) => None,
        }
    }

    /// Mutable color and intensity shared by every light kind
    pub fn light_mut(&mut self) -> Option<&mut BaseLight> {
        match &mut self.kind {
            EntityKind::Light(light) => Some(light),
            EntityKind::DistantLight(light) => Some(&mut light.base),
            EntityKind::PointLight(light) => Some(&mut light.base),
            EntityKind::Generic | EntityKind::Physics(_) => None,
        }
    }

    /// Distant light payload, if this is a distant light
    pub fn as_distant_light(&self) -> Option<&DistantLight> {
        match &self.kind {
            EntityKind::DistantLight(light) => Some(light),
            _ => None,
        }
    }

    /// Mutable distant light payload
    pub fn as_distant_light_mut(&mut self) -> Option<&mut DistantLight> {
        match &mut self.kind {
            EntityKind::DistantLight(light) => Some(light),
            _ => None,
        }
    }

    /// Point light payload, if this is a point light
    pub fn as_point_light(&self) -> Option<&PointLight> {
        match &self.kind {
            EntityKind::PointLight(light) => Some(light),
            _ => None,
        }
    }

    /// Mutable point light payload
    pub fn as_point_light_mut(&mut self) -> Option<&mut PointLight> {
        match &mut self.kind {
            EntityKind::PointLight(light) => Some(light),
            _ => None,
        }
    }

    /// Physics payload, if this is a physics entity
    pub fn as_physics(&self) -> Option<&PhysicsBody> {
        match &self.kind {
            EntityKind::Physics(body) => Some(body),
            _ => None,
        }
    }

    /// Mutable physics payload
    pub fn as_physics_mut(&mut self) -> Option<&mut PhysicsBody> {
        match &mut self.kind {
            EntityKind::Physics(body) => Some(body),
            _ => None,
        }
    }

    /// The world-position capability, for kinds that have one
    pub fn positional_mut(&mut self) -> Option<&mut dyn Positional> {
        match &mut self.kind {
            EntityKind::PointLight(light) => Some(light as &mut dyn Positional),
            EntityKind::Physics(body) => Some(body as &mut dyn Positional),
            _ => None,
        }
    }

    /// World position from the last traversal, for kinds that track one
    pub fn world_position(&self) -> Option<Vec4> {
        match &self.kind {
            EntityKind::PointLight(light) => light.world_position(),
            EntityKind::Physics(body) => body.world_position(),
            _ => None,
        }
    }
}
