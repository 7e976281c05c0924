//! Depth-first transform propagation

use crate::entity::Entity;
use crate::foundation::math::Mat4;
use crate::scene::{FrameOutput, SceneContext};

/// Walk `graph` once, running hooks and resolving world matrices into `output`
///
/// `output` is cleared first; its buffers are reused from frame to frame.
pub fn model_view(graph: &mut [Entity], scene: &SceneContext, delta_time: f32, output: &mut FrameOutput) {
    output.clear();
    let root = Mat4::identity();
    for entity in graph.iter_mut() {
        visit(entity, &root, 0, scene, delta_time, output);
    }
}

fn visit(
    entity: &mut Entity,
    parent_world: &Mat4,
    depth: usize,
    scene: &SceneContext,
    delta_time: f32,
    output: &mut FrameOutput,
) {
    if entity.disabled {
        log::trace!("Skipping disabled subtree at {:?}", entity.id);
        return;
    }

    entity.run_before_scene(scene, delta_time);

    let world = parent_world * entity.matrix;
    entity.run_scene(scene, &world, delta_time);
    output.record(entity, &world, depth);

    for child in &mut entity.children {
        visit(child, &world, depth + 1, scene, delta_time, output);
    }
}
