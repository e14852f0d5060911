use std::f32::consts::FRAC_PI_2;

use approx::assert_relative_eq;
use arbor::{NodeKind, Scene, TransformSpace, Vector3};

#[test]
fn world_matrix_composes_parent_times_local() {
    let mut scene = Scene::new();
    let parent = scene.spawn(NodeKind::Group);
    scene.add(scene.root(), parent);
    let child = scene.spawn(NodeKind::Group);
    scene.add(parent, child);

    scene.translate(parent, 1.0, 2.0, 3.0, TransformSpace::Local);
    scene.rotate_y(parent, 0.4, TransformSpace::Local);
    scene.translate(child, -2.0, 0.5, 0.0, TransformSpace::Local);
    scene.rotate_x(child, 1.1, TransformSpace::Local);

    let expected = scene.world_matrix(parent) * scene.transform(child);
    assert_relative_eq!(scene.world_matrix(child), expected, epsilon = 1e-6);
}

#[test]
fn parentless_world_matrix_is_the_local_transform() {
    let mut scene = Scene::new();
    let node = scene.spawn(NodeKind::Group);
    scene.translate(node, 4.0, -1.0, 0.5, TransformSpace::Local);
    scene.rotate_z(node, 0.3, TransformSpace::Local);

    assert_eq!(scene.world_matrix(node), scene.transform(node));
}

#[test]
fn apply_matrix_local_is_post_multiply() {
    let mut scene = Scene::new();
    let a = scene.spawn(NodeKind::Group);
    let b = scene.spawn(NodeKind::Group);

    // translate then rotate is not rotate then translate
    scene.translate(a, 1.0, 0.0, 0.0, TransformSpace::Local);
    scene.rotate_y(a, FRAC_PI_2, TransformSpace::Local);

    scene.rotate_y(b, FRAC_PI_2, TransformSpace::Local);
    scene.translate(b, 1.0, 0.0, 0.0, TransformSpace::Local);

    assert_relative_eq!(scene.position(a), Vector3::new(1.0, 0.0, 0.0), epsilon = 1e-6);
    assert_relative_eq!(scene.position(b), Vector3::new(0.0, 0.0, -1.0), epsilon = 1e-6);
}

#[test]
fn global_space_pre_multiplies() {
    let mut scene = Scene::new();
    let node = scene.spawn(NodeKind::Group);
    scene.rotate_y(node, FRAC_PI_2, TransformSpace::Local);
    // a global translation moves the node regardless of its rotation
    scene.translate(node, 0.0, 3.0, 0.0, TransformSpace::Global);
    assert_relative_eq!(scene.position(node), Vector3::new(0.0, 3.0, 0.0), epsilon = 1e-6);
}

#[test]
fn descendants_are_pre_order_and_deterministic() {
    let mut scene = Scene::new();
    let a = scene.spawn(NodeKind::Group);
    let b = scene.spawn(NodeKind::Group);
    let a1 = scene.spawn(NodeKind::Group);
    let a2 = scene.spawn(NodeKind::Group);
    scene.add(scene.root(), a);
    scene.add(scene.root(), b);
    scene.add(a, a1);
    scene.add(a, a2);

    let order = scene.descendants(scene.root());
    assert_eq!(order, vec![scene.root(), a, a1, a2, b]);
    // stable across repeated traversals
    assert_eq!(order, scene.descendants(scene.root()));
}

#[test]
fn remove_nulls_the_parent_link() {
    let mut scene = Scene::new();
    let node = scene.spawn(NodeKind::Group);
    scene.add(scene.root(), node);
    assert_eq!(scene.parent(node), Some(scene.root()));

    scene.remove(node);
    assert_eq!(scene.parent(node), None);
    assert!(!scene.descendants(scene.root()).contains(&node));
}

#[test]
fn reattaching_moves_between_parents() {
    let mut scene = Scene::new();
    let a = scene.spawn(NodeKind::Group);
    let b = scene.spawn(NodeKind::Group);
    let child = scene.spawn(NodeKind::Group);
    scene.add(scene.root(), a);
    scene.add(scene.root(), b);

    scene.add(a, child);
    scene.add(b, child);

    assert_eq!(scene.parent(child), Some(b));
    assert!(!scene.children(a).contains(&child));
    assert!(scene.children(b).contains(&child));
}

#[test]
fn default_direction_is_negative_z() {
    let mut scene = Scene::new();
    let node = scene.spawn(NodeKind::Group);
    assert_relative_eq!(
        scene.direction(node),
        Vector3::new(0.0, 0.0, -1.0),
        epsilon = 1e-6
    );
}

#[test]
fn set_direction_turns_the_node() {
    let mut scene = Scene::new();
    let node = scene.spawn(NodeKind::Group);
    scene.set_direction(node, Vector3::new(1.0, 0.0, 0.0));
    assert_relative_eq!(
        scene.direction(node),
        Vector3::new(1.0, 0.0, 0.0),
        epsilon = 1e-5
    );
}

#[test]
fn look_at_discards_accumulated_scale() {
    use arbor::InnerSpace;

    let mut scene = Scene::new();
    let node = scene.spawn(NodeKind::Group);
    scene.scale(node, 5.0, TransformSpace::Local);
    scene.look_at(node, Vector3::new(3.0, 0.0, 0.0));

    // the fresh look-at basis is orthonormal, the old scale is gone
    let transform = scene.transform(node);
    assert_relative_eq!(transform.x.truncate().magnitude(), 1.0, epsilon = 1e-5);
    assert_relative_eq!(transform.y.truncate().magnitude(), 1.0, epsilon = 1e-5);
    assert_relative_eq!(transform.z.truncate().magnitude(), 1.0, epsilon = 1e-5);
}

#[test]
fn look_at_target_above_does_not_degenerate() {
    let mut scene = Scene::new();
    let node = scene.spawn(NodeKind::Group);
    scene.set_position(node, Vector3::new(1.0, 0.0, 0.0));
    scene.look_at(node, Vector3::new(1.0, 10.0, 0.0));

    let direction = scene.direction(node);
    assert!(direction.x.is_finite() && direction.y.is_finite() && direction.z.is_finite());
    assert_relative_eq!(direction, Vector3::new(0.0, 1.0, 0.0), epsilon = 1e-3);
}
