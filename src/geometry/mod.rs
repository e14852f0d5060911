//! Geometry: named collections of vertex attributes.
//!
//! A [`Geometry`] maps attribute names to [`Attribute`] buffers and caches the
//! vertex count. Geometries can be merged pairwise and can have a transform
//! baked permanently into their vertex data.

pub mod attribute;

use std::collections::BTreeMap;

use cgmath::{Matrix4, Vector3};
use thiserror::Error;

pub use attribute::{Attribute, AttributeData};

use crate::{graphics::GraphicsApi, math};

/// Well-known attribute names shared between geometries and the built-in
/// shaders.
pub const VERTEX_POSITION: &str = "vertex_position";
pub const VERTEX_NORMAL: &str = "vertex_normal";
pub const FACE_NORMAL: &str = "face_normal";
pub const VERTEX_UV: &str = "vertex_uv";
pub const VERTEX_COLOR: &str = "vertex_color";

#[derive(Debug, Error)]
pub enum GeometryError {
    /// Merge requires both geometries to carry exactly the same attributes.
    #[error("attribute sets do not match: missing {missing:?}, unexpected {unexpected:?}")]
    AttributeMismatch {
        missing: Vec<String>,
        unexpected: Vec<String>,
    },
    /// Same name on both sides, but the payloads hold different data kinds.
    #[error("attribute `{0}` holds a different data type in each geometry")]
    TypeMismatch(String),
    #[error("no attribute named `{0}`")]
    MissingAttribute(String),
    #[error("attribute `{name}` does not hold {expected} data")]
    WrongKind { name: String, expected: &'static str },
}

/// A named set of attribute buffers plus the cached vertex count.
///
/// Invariant: every attribute covers the same number of vertices. The count
/// is cached; call [`Geometry::count_vertices`] after any structural change.
#[derive(Debug, Default)]
pub struct Geometry {
    attributes: BTreeMap<String, Attribute>,
    vertex_count: usize,
}

impl Geometry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts or replaces an attribute. Replacing an attribute releases the
    /// GPU buffer the previous one owned.
    pub fn add_attribute(
        &mut self,
        api: &mut dyn GraphicsApi,
        name: impl Into<String>,
        data: AttributeData,
    ) {
        let attribute = Attribute::new(api, data);
        if let Some(old) = self.attributes.insert(name.into(), attribute) {
            api.delete_buffer(old.buffer());
        }
    }

    pub fn attribute(&self, name: &str) -> Option<&Attribute> {
        self.attributes.get(name)
    }

    pub fn attributes(&self) -> impl Iterator<Item = (&str, &Attribute)> {
        self.attributes.iter().map(|(name, a)| (name.as_str(), a))
    }

    pub fn has_attribute(&self, name: &str) -> bool {
        self.attributes.contains_key(name)
    }

    pub fn vertex_count(&self) -> usize {
        self.vertex_count
    }

    /// Recomputes the cached vertex count from an arbitrary attribute.
    pub fn count_vertices(&mut self) -> usize {
        self.vertex_count = self
            .attributes
            .values()
            .next()
            .map(Attribute::len)
            .unwrap_or(0);
        self.vertex_count
    }

    /// Concatenates `other`'s vertices after our own, attribute by attribute.
    ///
    /// Both geometries must carry the same attribute names with the same data
    /// kinds; on failure neither geometry is modified.
    pub fn merge(
        &mut self,
        api: &mut dyn GraphicsApi,
        other: &Geometry,
    ) -> Result<(), GeometryError> {
        let missing: Vec<String> = self
            .attributes
            .keys()
            .filter(|name| !other.attributes.contains_key(*name))
            .cloned()
            .collect();
        let unexpected: Vec<String> = other
            .attributes
            .keys()
            .filter(|name| !self.attributes.contains_key(*name))
            .cloned()
            .collect();
        if !missing.is_empty() || !unexpected.is_empty() {
            return Err(GeometryError::AttributeMismatch {
                missing,
                unexpected,
            });
        }
        for (name, attribute) in &self.attributes {
            if !attribute.data().same_kind(other.attributes[name].data()) {
                return Err(GeometryError::TypeMismatch(name.clone()));
            }
        }

        for (name, attribute) in &mut self.attributes {
            attribute.data_mut().append(other.attributes[name].data());
            attribute.upload(api);
        }
        self.count_vertices();
        Ok(())
    }

    /// Bakes `matrix` permanently into the vertex data of `target` (which
    /// must hold vec3 positions), then rotates any `vertex_normal` /
    /// `face_normal` attributes by the matrix's 3x3 rotation/scale part.
    /// Normals are stored without re-normalization, so non-uniform scale
    /// distorts them. All rewritten buffers are re-uploaded.
    pub fn apply_matrix(
        &mut self,
        api: &mut dyn GraphicsApi,
        matrix: Matrix4<f32>,
        target: &str,
    ) -> Result<(), GeometryError> {
        {
            let attribute = self
                .attributes
                .get_mut(target)
                .ok_or_else(|| GeometryError::MissingAttribute(target.to_string()))?;
            let AttributeData::Vec3(points) = attribute.data_mut() else {
                return Err(GeometryError::WrongKind {
                    name: target.to_string(),
                    expected: "vec3",
                });
            };
            for point in points.iter_mut() {
                *point = math::transform_point(&matrix, *point);
            }
            attribute.upload(api);
        }

        let rotation = math::rotation_part(&matrix);
        for name in [VERTEX_NORMAL, FACE_NORMAL] {
            if name == target {
                continue;
            }
            let Some(attribute) = self.attributes.get_mut(name) else {
                continue;
            };
            let AttributeData::Vec3(normals) = attribute.data_mut() else {
                continue;
            };
            for normal in normals.iter_mut() {
                let v = rotation * Vector3::new(normal[0], normal[1], normal[2]);
                *normal = v.into();
            }
            attribute.upload(api);
        }
        Ok(())
    }

    /// Releases every GPU buffer this geometry owns.
    pub fn dispose(self, api: &mut dyn GraphicsApi) {
        for attribute in self.attributes.into_values() {
            api.delete_buffer(attribute.buffer());
        }
    }

    /// An axis-aligned box centered on the origin, 36 vertices, with
    /// position, per-face color, uv and normal attributes.
    pub fn cuboid(api: &mut dyn GraphicsApi, width: f32, height: f32, depth: f32) -> Self {
        let (w, h, d) = (width / 2.0, height / 2.0, depth / 2.0);
        let p0 = [-w, -h, -d];
        let p1 = [w, -h, -d];
        let p2 = [-w, h, -d];
        let p3 = [w, h, -d];
        let p4 = [-w, -h, d];
        let p5 = [w, -h, d];
        let p6 = [-w, h, d];
        let p7 = [w, h, d];

        // two triangles per face, faces ordered x+, x-, y+, y-, z+, z-
        let positions = vec![
            p5, p1, p3, p5, p3, p7, //
            p0, p4, p6, p0, p6, p2, //
            p6, p7, p3, p6, p3, p2, //
            p0, p1, p5, p0, p5, p4, //
            p4, p5, p7, p4, p7, p6, //
            p1, p0, p2, p1, p2, p3,
        ];

        let face_colors = [
            [1.0, 0.0, 0.0],
            [0.5, 0.0, 0.0],
            [0.0, 1.0, 0.0],
            [0.0, 0.5, 0.0],
            [0.0, 0.0, 1.0],
            [0.0, 0.0, 0.5],
        ];
        let colors = face_colors
            .iter()
            .flat_map(|&c| std::iter::repeat_n(c, 6))
            .collect();

        let (t0, t1, t2, t3) = ([0.0, 0.0], [1.0, 0.0], [0.0, 1.0], [1.0, 1.0]);
        let uvs = std::iter::repeat_n([t0, t1, t3, t0, t3, t2], 6)
            .flatten()
            .collect();

        let face_normals = [
            [1.0, 0.0, 0.0],
            [-1.0, 0.0, 0.0],
            [0.0, 1.0, 0.0],
            [0.0, -1.0, 0.0],
            [0.0, 0.0, 1.0],
            [0.0, 0.0, -1.0],
        ];
        let normals: Vec<[f32; 3]> = face_normals
            .iter()
            .flat_map(|&n| std::iter::repeat_n(n, 6))
            .collect();

        let mut geometry = Self::new();
        geometry.add_attribute(api, VERTEX_POSITION, AttributeData::Vec3(positions));
        geometry.add_attribute(api, VERTEX_NORMAL, AttributeData::Vec3(normals.clone()));
        geometry.add_attribute(api, FACE_NORMAL, AttributeData::Vec3(normals));
        geometry.add_attribute(api, VERTEX_COLOR, AttributeData::Vec3(colors));
        geometry.add_attribute(api, VERTEX_UV, AttributeData::Vec2(uvs));
        geometry.count_vertices();
        geometry
    }
}
