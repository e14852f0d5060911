use std::cell::RefCell;
use std::rc::Rc;

use approx::assert_relative_eq;
use arbor::graphics::record::RecordingApi;
use arbor::graphics::{DrawStyle, RawUniform};
use arbor::material::Material;
use arbor::renderer::{RenderError, Renderer, MAX_LIGHTS};
use arbor::{
    Camera, Geometry, Light, Matrix4, Mesh, NodeId, NodeKind, Scene, SquareMatrix, TransformSpace,
    Vector3,
};

fn spawn_phong_cuboid(api: &mut RecordingApi, scene: &mut Scene) -> NodeId {
    let geometry = Rc::new(RefCell::new(Geometry::cuboid(api, 1.0, 1.0, 1.0)));
    let material = Rc::new(RefCell::new(Material::phong(api, None).unwrap()));
    let mesh = scene.spawn(NodeKind::Mesh(Mesh::new(api, geometry, material)));
    scene.add(scene.root(), mesh);
    mesh
}

fn spawn_camera(scene: &mut Scene) -> NodeId {
    let camera = scene.spawn(NodeKind::Camera(Camera::new(60.0, 1.0, 0.1, 100.0)));
    scene.add(scene.root(), camera);
    camera
}

fn light_type_writes(api: &RecordingApi, slot: usize) -> Vec<i32> {
    let name = format!("light{slot}.light_type");
    api.uniform_writes()
        .iter()
        .filter(|(n, _)| *n == name)
        .map(|(_, value)| match value {
            RawUniform::Int(kind) => *kind,
            other => panic!("light_type is an int, got {other:?}"),
        })
        .collect()
}

#[test]
fn one_light_is_padded_to_four_slots() {
    let mut api = RecordingApi::new();
    let mut scene = Scene::new();
    let camera = spawn_camera(&mut scene);
    spawn_phong_cuboid(&mut api, &mut scene);

    let sun = scene.spawn(NodeKind::Light(Light::directional([1.0, 1.0, 0.9])));
    scene.add(scene.root(), sun);

    let renderer = Renderer::new(&mut api, [0.0, 0.0, 0.0]);
    renderer.render(&mut api, &mut scene, camera).unwrap();

    // slot 0 carries the directional light, the rest are padded off
    assert_eq!(light_type_writes(&api, 0), vec![2]);
    for slot in 1..MAX_LIGHTS {
        assert_eq!(light_type_writes(&api, slot), vec![0], "slot {slot}");
    }
}

#[test]
fn extra_lights_are_truncated_in_traversal_order() {
    let mut api = RecordingApi::new();
    let mut scene = Scene::new();
    let camera = spawn_camera(&mut scene);
    spawn_phong_cuboid(&mut api, &mut scene);

    let mut positions = Vec::new();
    for i in 0..5 {
        let light = scene.spawn(NodeKind::Light(Light::point(
            [1.0, 1.0, 1.0],
            [1.0, 0.0, 0.1],
        )));
        scene.add(scene.root(), light);
        let position = [100.0 + i as f32, 0.0, 0.0];
        scene.set_position(light, Vector3::from(position));
        positions.push(position);
    }

    let renderer = Renderer::new(&mut api, [0.0, 0.0, 0.0]);
    renderer.render(&mut api, &mut scene, camera).unwrap();

    // the first four lights fill the slots in traversal order
    let writes = api.uniform_writes();
    for (slot, position) in positions.iter().take(MAX_LIGHTS).enumerate() {
        let name = format!("light{slot}.position");
        assert!(
            writes
                .iter()
                .any(|(n, v)| *n == name && **v == RawUniform::Vec3(*position)),
            "slot {slot}"
        );
    }
    // the fifth light reaches no uniform at all
    let fifth = RawUniform::Vec3(positions[4]);
    assert!(writes.iter().all(|(_, v)| **v != fifth));
}

#[test]
fn invisible_meshes_cost_nothing() {
    let mut api = RecordingApi::new();
    let mut scene = Scene::new();
    let camera = spawn_camera(&mut scene);
    let visible = spawn_phong_cuboid(&mut api, &mut scene);
    let hidden = spawn_phong_cuboid(&mut api, &mut scene);
    scene.set_position(visible, Vector3::new(1.0, 0.0, 0.0));
    scene.set_position(hidden, Vector3::new(42.0, 0.0, 0.0));
    scene.mesh_mut(hidden).unwrap().visible = false;

    let renderer = Renderer::new(&mut api, [0.0, 0.0, 0.0]);
    renderer.render(&mut api, &mut scene, camera).unwrap();

    assert_eq!(api.draw_calls().len(), 1);
    // no uniform upload happened for the hidden mesh either
    let hidden_model = RawUniform::Mat4(scene.world_matrix(hidden).into());
    let visible_model = RawUniform::Mat4(scene.world_matrix(visible).into());
    let writes = api.uniform_writes();
    assert!(writes.iter().all(|(_, v)| **v != hidden_model));
    assert!(writes.iter().any(|(n, v)| *n == "model_matrix" && **v == visible_model));
}

#[test]
fn draw_calls_cover_the_whole_geometry() {
    let mut api = RecordingApi::new();
    let mut scene = Scene::new();
    let camera = spawn_camera(&mut scene);
    spawn_phong_cuboid(&mut api, &mut scene);

    let renderer = Renderer::new(&mut api, [0.0, 0.0, 0.0]);
    renderer.render(&mut api, &mut scene, camera).unwrap();

    assert_eq!(api.draw_calls(), vec![(DrawStyle::Triangles, 36)]);
}

#[test]
fn view_matrix_is_the_inverse_of_the_camera_world_matrix() {
    let mut api = RecordingApi::new();
    let mut scene = Scene::new();
    let camera = spawn_camera(&mut scene);
    scene.translate(camera, 3.0, 1.0, -2.0, TransformSpace::Local);
    scene.rotate_y(camera, 0.8, TransformSpace::Local);

    let renderer = Renderer::new(&mut api, [0.0, 0.0, 0.0]);
    renderer.render(&mut api, &mut scene, camera).unwrap();

    let view = scene.camera(camera).unwrap().view;
    let world = scene.world_matrix(camera);
    assert_relative_eq!(view * world, Matrix4::identity(), epsilon = 1e-5);
}

#[test]
fn singular_camera_world_matrix_is_an_error() {
    let mut api = RecordingApi::new();
    let mut scene = Scene::new();
    let camera = spawn_camera(&mut scene);
    scene.scale(camera, 0.0, TransformSpace::Local);

    let renderer = Renderer::new(&mut api, [0.0, 0.0, 0.0]);
    let err = renderer.render(&mut api, &mut scene, camera).unwrap_err();
    assert!(matches!(err, RenderError::SingularCamera));
}

#[test]
fn rendering_through_a_non_camera_node_is_an_error() {
    let mut api = RecordingApi::new();
    let mut scene = Scene::new();
    let group = scene.spawn(NodeKind::Group);
    scene.add(scene.root(), group);

    let renderer = Renderer::new(&mut api, [0.0, 0.0, 0.0]);
    let err = renderer.render(&mut api, &mut scene, group).unwrap_err();
    assert!(matches!(err, RenderError::NotACamera));
}

#[test]
fn materials_without_light_uniforms_skip_light_state() {
    let mut api = RecordingApi::new();
    let mut scene = Scene::new();
    let camera = spawn_camera(&mut scene);

    let geometry = Rc::new(RefCell::new(Geometry::cuboid(&mut api, 1.0, 1.0, 1.0)));
    let material = Rc::new(RefCell::new(
        Material::new(&mut api, "void main() {}", "void main() {}").unwrap(),
    ));
    material.borrow_mut().locate_uniforms(&mut api);
    let mesh = scene.spawn(NodeKind::Mesh(Mesh::new(&mut api, geometry, material)));
    scene.add(scene.root(), mesh);

    let light = scene.spawn(NodeKind::Light(Light::ambient([0.2, 0.2, 0.2])));
    scene.add(scene.root(), light);

    let renderer = Renderer::new(&mut api, [0.0, 0.0, 0.0]);
    renderer.render(&mut api, &mut scene, camera).unwrap();

    assert!(api
        .uniform_writes()
        .iter()
        .all(|(name, _)| !name.starts_with("light")));
}
