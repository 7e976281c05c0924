//! Per-frame hook types and registration helpers
//!
//! Every entity carries two ordered hook lists. Pre-transform hooks run
//! against the entity's local state before its matrix is combined with the
//! parent; post-transform hooks receive the combined world matrix. Both lists
//! are append-only: registering never replaces what is already there.

use crate::entity::Entity;
use crate::foundation::math::Mat4;
use crate::scene::SceneContext;

/// Hook run before the entity matrix is combined with its parent: `(entity, scene, delta_time)`
pub type BeforeSceneHook = Box<dyn FnMut(&mut Entity, &SceneContext, f32)>;

/// Hook run after the world matrix is computed: `(entity, scene, world_matrix, delta_time)`
pub type SceneHook = Box<dyn FnMut(&mut Entity, &SceneContext, &Mat4, f32)>;

/// Box a closure as a pre-transform hook
pub fn before_scene_hook<F>(hook: F) -> BeforeSceneHook
where
    F: FnMut(&mut Entity, &SceneContext, f32) + 'static,
{
    Box::new(hook)
}

/// Box a closure as a post-transform hook
pub fn scene_hook<F>(hook: F) -> SceneHook
where
    F: FnMut(&mut Entity, &SceneContext, &Mat4, f32) + 'static,
{
    Box::new(hook)
}

/// One hook or an ordered sequence of hooks, flattened onto a hook list
pub trait HookList<H> {
    /// Append the hooks, in order, to the end of `list`
    fn append_to(self, list: &mut Vec<H>);
}

impl HookList<BeforeSceneHook> for BeforeSceneHook {
    fn append_to(self, list: &mut Vec<BeforeSceneHook>) {
        list.push(self);
    }
}

impl HookList<SceneHook> for SceneHook {
    fn append_to(self, list: &mut Vec<SceneHook>) {
        list.push(self);
    }
}

impl<H> HookList<H> for Vec<H> {
    fn append_to(mut self, list: &mut Vec<H>) {
        list.append(&mut self);
    }
}

impl<H, const N: usize> HookList<H> for [H; N] {
    fn append_to(self, list: &mut Vec<H>) {
        list.extend(self);
    }
}
