//! Light state derived by the pipeline

use crate::entity::{AttenuationFactor, Entity, EntityDesc, NodeType, Xyz};
use crate::foundation::math::{Vec3, Vec4};
use crate::scene::{LightSnapshot, Scene};
use approx::assert_relative_eq;

#[test]
fn test_distant_light_world_direction_after_one_frame() {
    let light = EntityDesc {
        direction: Some(Xyz::new(0.0, 0.0, 5.0)),
        ..EntityDesc::of_type(NodeType::DistantLight)
    }
    .build()
    .expect("valid description");

    let mut scene = Scene::new();
    scene.add(light);
    scene.model_view(0.016);

    let light = scene.graph[0].as_distant_light().expect("distant light");
    assert_eq!(light.direction(), Vec3::new(0.0, 0.0, 1.0));
    assert_eq!(light.world_direction(), Some(Vec3::new(0.0, 0.0, -1.0)));
}

#[test]
fn test_distant_light_ignores_hierarchy() {
    let mut light = Entity::distant_light();
    light.rotate_x(1.2).translate_z(10.0);
    let mut parent = Entity::new();
    parent.rotate_y(0.7).scale_n(3.0);

    let mut scene = Scene::new();
    scene.add(parent.with_child(light));
    let output = scene.model_view(0.016);

    assert_eq!(
        output.lights,
        vec![LightSnapshot::Distant {
            color: [1.0, 1.0, 1.0],
            intensity: 1.0,
            world_direction: Vec3::new(0.0, 0.0, -1.0),
        }]
    );
}

#[test]
fn test_point_light_follows_parent_translation() {
    let light = EntityDesc {
        id: Some("lamp".to_string()),
        position: Some(Xyz::new(0.0, 0.0, 0.0)),
        ..EntityDesc::of_type(NodeType::PointLight)
    }
    .build()
    .expect("valid description");

    let mut parent = Entity::new();
    parent.translate(&Vec3::new(5.0, 0.0, 0.0));

    let mut scene = Scene::new();
    scene.add(parent.with_child(light));
    scene.model_view(0.016);

    let world_position = scene.find("lamp").and_then(Entity::world_position).expect("tracked");
    assert_relative_eq!(world_position, Vec4::new(5.0, 0.0, 0.0, 1.0), epsilon = 1e-6);
}

#[test]
fn test_point_light_position_goes_through_full_hierarchy() {
    let mut light = Entity::point_light();
    light.scale_n(2.0);
    let mut parent = Entity::new();
    parent.translate_y(1.0);

    let mut scene = Scene::new();
    scene.add(parent.with_child(light));
    let output = scene.model_view(0.016);

    // default local position (0, 0, -1), scaled by 2 then lifted by 1
    match &output.lights[..] {
        [LightSnapshot::Point { world_position, attenuation, attenuation_factor, .. }] => {
            assert_relative_eq!(*world_position, Vec4::new(0.0, 1.0, -2.0, 1.0), epsilon = 1e-6);
            assert_relative_eq!(*attenuation, 0.1);
            assert_eq!(*attenuation_factor, AttenuationFactor::Linear);
        }
        other => panic!("expected one point light, got {other:?}"),
    }
}

#[test]
fn test_lights_are_untracked_before_first_frame_and_when_disabled() {
    let mut light = Entity::point_light();
    light.disabled = true;

    let mut scene = Scene::new();
    scene.add(light);
    scene.add(Entity::base_light());
    assert!(scene.graph[0].world_position().is_none());

    let output = scene.model_view(0.016);
    assert!(output.lights.is_empty());
    assert_eq!(output.entities.len(), 1);
    assert!(scene.graph[0].world_position().is_none());
}
