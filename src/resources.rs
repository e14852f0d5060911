//! Loading geometry from external mesh files.

use std::path::Path;

use anyhow::Context as _;
use log::info;

use crate::{
    geometry::{AttributeData, Geometry, VERTEX_NORMAL, VERTEX_POSITION, VERTEX_UV},
    graphics::GraphicsApi,
};

/// Loads an OBJ file into a [`Geometry`], triangulated and de-indexed so the
/// renderer can draw it with a plain vertex-count draw call. Positions are
/// always produced; uv and normal attributes only when the file carries them.
pub fn load_geometry_obj(
    api: &mut dyn GraphicsApi,
    path: impl AsRef<Path>,
) -> anyhow::Result<Geometry> {
    let path = path.as_ref();
    info!("loading OBJ model from {}", path.display());
    let (models, _materials) = tobj::load_obj(
        path,
        &tobj::LoadOptions {
            triangulate: true,
            single_index: true,
            ..Default::default()
        },
    )
    .with_context(|| format!("failed to load OBJ {}", path.display()))?;

    let mut positions = Vec::new();
    let mut uvs = Vec::new();
    let mut normals = Vec::new();
    for model in &models {
        let mesh = &model.mesh;
        for &index in &mesh.indices {
            let i = index as usize;
            positions.push([
                mesh.positions[3 * i],
                mesh.positions[3 * i + 1],
                mesh.positions[3 * i + 2],
            ]);
            if !mesh.texcoords.is_empty() {
                uvs.push([mesh.texcoords[2 * i], mesh.texcoords[2 * i + 1]]);
            }
            if !mesh.normals.is_empty() {
                normals.push([
                    mesh.normals[3 * i],
                    mesh.normals[3 * i + 1],
                    mesh.normals[3 * i + 2],
                ]);
            }
        }
    }

    let mut geometry = Geometry::new();
    geometry.add_attribute(api, VERTEX_POSITION, AttributeData::Vec3(positions));
    if !uvs.is_empty() {
        geometry.add_attribute(api, VERTEX_UV, AttributeData::Vec2(uvs));
    }
    if !normals.is_empty() {
        geometry.add_attribute(api, VERTEX_NORMAL, AttributeData::Vec3(normals));
    }
    let count = geometry.count_vertices();
    info!("loaded {} vertices from {}", count, path.display());
    Ok(geometry)
}
