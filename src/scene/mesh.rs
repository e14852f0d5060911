//! Mesh node payload: geometry bound to a material's program inputs.

use std::cell::RefCell;
use std::rc::Rc;

use crate::{
    geometry::Geometry,
    graphics::{GraphicsApi, VertexLayoutId},
    material::Material,
};

/// A renderable payload pairing one geometry with one material.
///
/// Construction resolves the association between each geometry attribute and
/// the material program's matching input variable and caches it as a vertex
/// layout owned by the mesh. The layout is fixed for the mesh's lifetime;
/// swapping geometry or material afterwards is not supported. Geometry and
/// material are shared handles, so several meshes can reuse either.
pub struct Mesh {
    pub geometry: Rc<RefCell<Geometry>>,
    pub material: Rc<RefCell<Material>>,
    pub visible: bool,
    layout: VertexLayoutId,
}

impl Mesh {
    pub fn new(
        api: &mut dyn GraphicsApi,
        geometry: Rc<RefCell<Geometry>>,
        material: Rc<RefCell<Material>>,
    ) -> Self {
        let layout = api.create_vertex_layout();
        {
            let geometry = geometry.borrow();
            let material = material.borrow();
            for (name, attribute) in geometry.attributes() {
                attribute.bind_to_program(api, layout, material.program(), name);
            }
        }
        Self {
            geometry,
            material,
            visible: true,
            layout,
        }
    }

    pub fn layout(&self) -> VertexLayoutId {
        self.layout
    }
}
