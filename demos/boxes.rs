//! A lit demo scene: spinning boxes over a floor slab, with a first-person
//! camera rig. WASD + Space/Shift to move, arrow keys to look around.

use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use anyhow::Result;
use arbor::{
    app, Camera, Geometry, GlContext, Input, Light, Material, Mesh, MovementRig, NodeId, NodeKind,
    Property, Renderer, Scene, TransformSpace, Vector3,
};

struct Boxes {
    renderer: Renderer,
    scene: Scene,
    camera: NodeId,
    rig: MovementRig,
    spinner: NodeId,
}

impl app::Stage for Boxes {
    fn update(&mut self, api: &mut GlContext, input: &Input, dt: Duration) {
        self.rig.update(&mut self.scene, input, dt);
        self.scene
            .rotate_y(self.spinner, 0.7 * dt.as_secs_f32(), TransformSpace::Local);
        if let Err(e) = self.renderer.render(api, &mut self.scene, self.camera) {
            log::error!("render failed: {e}");
        }
    }
}

fn main() -> Result<()> {
    env_logger::init();
    app::run(
        "arbor - boxes",
        1024,
        768,
        Box::new(|api, width, height| {
            let mut scene = Scene::new();

            let camera = scene.spawn(NodeKind::Camera(Camera::new(
                60.0,
                width as f32 / height as f32,
                0.1,
                1000.0,
            )));
            let root = scene.root();
            let rig = MovementRig::new(&mut scene, root, 4.0, 60.0);
            rig.attach(&mut scene, camera);
            scene.set_position(rig.node(), Vector3::new(0.0, 1.5, 8.0));

            // a shared cube geometry, one material per color
            let cube = Rc::new(RefCell::new(Geometry::cuboid(api, 1.0, 1.0, 1.0)));
            let spinner_material = Rc::new(RefCell::new(Material::phong(api, None)?));
            spinner_material
                .borrow_mut()
                .set_property("base_color", Property::Vec3([0.8, 0.3, 0.2]))?;
            let spinner = scene.spawn(NodeKind::Mesh(Mesh::new(
                api,
                cube.clone(),
                spinner_material,
            )));
            scene.add(scene.root(), spinner);
            scene.set_position(spinner, Vector3::new(0.0, 1.0, 0.0));

            let satellite_material = Rc::new(RefCell::new(Material::lambert(api, None)?));
            satellite_material
                .borrow_mut()
                .set_property("base_color", Property::Vec3([0.3, 0.5, 0.8]))?;
            let satellite = scene.spawn(NodeKind::Mesh(Mesh::new(
                api,
                cube.clone(),
                satellite_material,
            )));
            // child of the spinner so it orbits with it
            scene.add(spinner, satellite);
            scene.set_position(satellite, Vector3::new(2.5, 0.5, 0.0));
            scene.scale(satellite, 0.5, TransformSpace::Local);

            let floor_geometry = Rc::new(RefCell::new(Geometry::cuboid(api, 20.0, 0.2, 20.0)));
            let floor_material = Rc::new(RefCell::new(Material::lambert(api, None)?));
            floor_material
                .borrow_mut()
                .set_property("base_color", Property::Vec3([0.4, 0.4, 0.45]))?;
            let floor = scene.spawn(NodeKind::Mesh(Mesh::new(
                api,
                floor_geometry,
                floor_material,
            )));
            scene.add(scene.root(), floor);
            scene.set_position(floor, Vector3::new(0.0, -0.1, 0.0));

            let ambient = scene.spawn(NodeKind::Light(Light::ambient([0.15, 0.15, 0.15])));
            scene.add(scene.root(), ambient);

            let sun = scene.spawn(NodeKind::Light(Light::directional([0.8, 0.8, 0.7])));
            scene.add(scene.root(), sun);
            scene.set_direction(sun, Vector3::new(-0.5, -1.0, -0.3));

            let lamp = scene.spawn(NodeKind::Light(Light::point(
                [0.9, 0.6, 0.2],
                [1.0, 0.0, 0.1],
            )));
            scene.add(scene.root(), lamp);
            scene.set_position(lamp, Vector3::new(3.0, 2.0, 3.0));

            let renderer = Renderer::new(api, [0.05, 0.05, 0.08]);
            Ok(Box::new(Boxes {
                renderer,
                scene,
                camera,
                rig,
                spinner,
            }) as Box<dyn app::Stage>)
        }),
    )
}
