//! Per-vertex attribute buffers.

use crate::graphics::{BufferId, GraphicsApi, ProgramId, VertexLayoutId};

/// The host-side payload of an attribute: fixed-arity tuples of one kind.
///
/// Whatever the declared kind, the data reaches the GPU as flat `f32`s.
#[derive(Clone, PartialEq, Debug)]
pub enum AttributeData {
    Int(Vec<i32>),
    Float(Vec<f32>),
    Vec2(Vec<[f32; 2]>),
    Vec3(Vec<[f32; 3]>),
    Vec4(Vec<[f32; 4]>),
}

impl AttributeData {
    /// Components per vertex.
    pub fn arity(&self) -> u32 {
        match self {
            AttributeData::Int(_) | AttributeData::Float(_) => 1,
            AttributeData::Vec2(_) => 2,
            AttributeData::Vec3(_) => 3,
            AttributeData::Vec4(_) => 4,
        }
    }

    /// Number of vertices covered.
    pub fn len(&self) -> usize {
        match self {
            AttributeData::Int(v) => v.len(),
            AttributeData::Float(v) => v.len(),
            AttributeData::Vec2(v) => v.len(),
            AttributeData::Vec3(v) => v.len(),
            AttributeData::Vec4(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Coerces to the flat float layout uploaded to the GPU.
    pub fn flatten(&self) -> Vec<f32> {
        match self {
            AttributeData::Int(v) => v.iter().map(|&x| x as f32).collect(),
            AttributeData::Float(v) => v.clone(),
            AttributeData::Vec2(v) => v.iter().flatten().copied().collect(),
            AttributeData::Vec3(v) => v.iter().flatten().copied().collect(),
            AttributeData::Vec4(v) => v.iter().flatten().copied().collect(),
        }
    }

    /// Appends `other`'s vertices after our own. Both sides must hold the
    /// same kind of data; returns `false` and leaves `self` untouched
    /// otherwise.
    pub fn append(&mut self, other: &AttributeData) -> bool {
        match (self, other) {
            (AttributeData::Int(a), AttributeData::Int(b)) => a.extend_from_slice(b),
            (AttributeData::Float(a), AttributeData::Float(b)) => a.extend_from_slice(b),
            (AttributeData::Vec2(a), AttributeData::Vec2(b)) => a.extend_from_slice(b),
            (AttributeData::Vec3(a), AttributeData::Vec3(b)) => a.extend_from_slice(b),
            (AttributeData::Vec4(a), AttributeData::Vec4(b)) => a.extend_from_slice(b),
            _ => return false,
        }
        true
    }

    /// Whether two payloads hold the same kind of data.
    pub fn same_kind(&self, other: &AttributeData) -> bool {
        std::mem::discriminant(self) == std::mem::discriminant(other)
    }
}

/// One named vertex attribute: host data plus the single GPU buffer it owns
/// for its whole lifetime. Re-upload after mutation is explicit, never
/// automatic.
#[derive(Debug)]
pub struct Attribute {
    data: AttributeData,
    buffer: BufferId,
}

impl Attribute {
    /// Allocates the backing buffer and uploads `data` to it.
    pub fn new(api: &mut dyn GraphicsApi, data: AttributeData) -> Self {
        let buffer = api.create_buffer();
        let attribute = Self { data, buffer };
        attribute.upload(api);
        attribute
    }

    /// Pushes the current host data to the GPU buffer in full.
    pub fn upload(&self, api: &mut dyn GraphicsApi) {
        api.upload_buffer(self.buffer, &self.data.flatten());
    }

    /// Wires this attribute into `layout` at the slot `program` assigns to
    /// `name`. A program that does not declare the variable is left alone --
    /// shaders are free to ignore attributes.
    pub fn bind_to_program(
        &self,
        api: &mut dyn GraphicsApi,
        layout: VertexLayoutId,
        program: ProgramId,
        name: &str,
    ) {
        let Some(location) = api.attribute_location(program, name) else {
            return;
        };
        api.enable_attribute(layout, location, self.buffer, self.data.arity());
    }

    pub fn data(&self) -> &AttributeData {
        &self.data
    }

    /// Mutable host data access; call [`Attribute::upload`] afterwards to
    /// make the GPU see the change.
    pub fn data_mut(&mut self) -> &mut AttributeData {
        &mut self.data
    }

    pub fn buffer(&self) -> BufferId {
        self.buffer
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}
