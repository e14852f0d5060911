//! Built-in material variants with embedded GLSL 330 shader pairs.
//!
//! Each constructor compiles its shader pair, registers the uniforms the
//! shaders declare, and resolves their locations. The backend prefixes the
//! version directive.

use crate::{
    graphics::{GraphicsApi, ShaderError},
    scene::light::LightState,
    texture::{CubeMap, Texture},
};

use super::{Material, MaterialKind, UniformValue};

/// Vertex shader shared by the lit variants: transforms into clip space and
/// forwards world position, uv and a model-rotated normal.
const LIT_VERTEX: &str = r#"
uniform mat4 projection_matrix;
uniform mat4 view_matrix;
uniform mat4 model_matrix;

in vec3 vertex_position;
in vec2 vertex_uv;
in vec3 vertex_normal;

out vec3 position;
out vec2 uv;
out vec3 normal;

void main() {
    gl_Position = projection_matrix * view_matrix * model_matrix * vec4(vertex_position, 1.0);
    position = vec3(model_matrix * vec4(vertex_position, 1.0));
    uv = vertex_uv;
    normal = normalize(mat3(model_matrix) * vertex_normal);
}
"#;

// The Light struct in the lit fragment shaders: `light_type` 0 means the
// slot is off; 1 ambient, 2 directional, 3 point.

const LAMBERT_FRAGMENT: &str = r#"
struct Light {
    int light_type;
    vec3 color;
    vec3 direction;
    vec3 position;
    vec3 attenuation;
};

uniform Light light0;
uniform Light light1;
uniform Light light2;
uniform Light light3;

uniform vec3 base_color;
uniform bool use_texture;
uniform sampler2D texture_sampler;

in vec3 position;
in vec2 uv;
in vec3 normal;

out vec4 frag_color;

vec3 light_calc(Light light, vec3 point_position, vec3 point_normal) {
    float ambient = 0.0;
    float diffuse = 0.0;
    float attenuation = 1.0;
    vec3 light_direction = vec3(0.0);

    if (light.light_type == 1) {
        ambient = 1.0;
    } else if (light.light_type == 2) {
        light_direction = normalize(light.direction);
    } else if (light.light_type == 3) {
        light_direction = normalize(point_position - light.position);
        float dist = length(light.position - point_position);
        attenuation = 1.0 / (light.attenuation[0]
                           + light.attenuation[1] * dist
                           + light.attenuation[2] * dist * dist);
    }

    if (light.light_type > 1) {
        point_normal = normalize(point_normal);
        diffuse = max(dot(point_normal, -light_direction), 0.0);
        diffuse *= attenuation;
    }

    return light.color * (ambient + diffuse);
}

void main() {
    vec4 color = vec4(base_color, 1.0);
    if (use_texture) {
        color *= texture(texture_sampler, uv);
    }

    vec3 total = vec3(0.0);
    total += light_calc(light0, position, normal);
    total += light_calc(light1, position, normal);
    total += light_calc(light2, position, normal);
    total += light_calc(light3, position, normal);

    frag_color = color * vec4(total, 1.0);
}
"#;

const PHONG_FRAGMENT: &str = r#"
struct Light {
    int light_type;
    vec3 color;
    vec3 direction;
    vec3 position;
    vec3 attenuation;
};

uniform Light light0;
uniform Light light1;
uniform Light light2;
uniform Light light3;

uniform vec3 view_position;
uniform float specular_strength;
uniform float shininess;
uniform vec3 base_color;
uniform bool use_texture;
uniform sampler2D texture_sampler;

in vec3 position;
in vec2 uv;
in vec3 normal;

out vec4 frag_color;

vec3 light_calc(Light light, vec3 point_position, vec3 point_normal) {
    float ambient = 0.0;
    float diffuse = 0.0;
    float specular = 0.0;
    float attenuation = 1.0;
    vec3 light_direction = vec3(0.0);

    if (light.light_type == 1) {
        ambient = 1.0;
    } else if (light.light_type == 2) {
        light_direction = normalize(light.direction);
    } else if (light.light_type == 3) {
        light_direction = normalize(point_position - light.position);
        float dist = length(light.position - point_position);
        attenuation = 1.0 / (light.attenuation[0]
                           + light.attenuation[1] * dist
                           + light.attenuation[2] * dist * dist);
    }

    if (light.light_type > 1) {
        point_normal = normalize(point_normal);
        diffuse = max(dot(point_normal, -light_direction), 0.0);
        diffuse *= attenuation;

        if (diffuse > 0.0) {
            vec3 view_direction = normalize(view_position - point_position);
            vec3 reflect_direction = reflect(light_direction, point_normal);
            specular = max(dot(view_direction, reflect_direction), 0.0);
            specular = specular_strength * pow(specular, shininess);
        }
    }

    return light.color * (ambient + diffuse + specular);
}

void main() {
    vec4 color = vec4(base_color, 1.0);
    if (use_texture) {
        color *= texture(texture_sampler, uv);
    }

    vec3 total = vec3(0.0);
    total += light_calc(light0, position, normal);
    total += light_calc(light1, position, normal);
    total += light_calc(light2, position, normal);
    total += light_calc(light3, position, normal);

    frag_color = color * vec4(total, 1.0);
}
"#;

const TEXTURED_VERTEX: &str = r#"
uniform mat4 projection_matrix;
uniform mat4 view_matrix;
uniform mat4 model_matrix;

in vec3 vertex_position;
in vec2 vertex_uv;

out vec2 uv;

void main() {
    gl_Position = projection_matrix * view_matrix * model_matrix * vec4(vertex_position, 1.0);
    uv = vertex_uv;
}
"#;

const TEXTURED_FRAGMENT: &str = r#"
uniform vec3 base_color;
uniform sampler2D texture_sampler;

in vec2 uv;
out vec4 frag_color;

void main() {
    frag_color = vec4(base_color, 1.0) * texture(texture_sampler, uv);
}
"#;

const CUBE_MAP_VERTEX: &str = r#"
uniform mat4 projection_matrix;
uniform mat4 view_matrix;
uniform mat4 model_matrix;

in vec3 vertex_position;
out vec3 tex_coords;

void main() {
    vec4 pos = projection_matrix * view_matrix * model_matrix * vec4(vertex_position, 1.0);
    gl_Position = pos;
    // pin the skybox to the far plane
    gl_Position.z = gl_Position.w * 0.9999;
    tex_coords = -vertex_position;
}
"#;

const CUBE_MAP_FRAGMENT: &str = r#"
uniform samplerCube cube_map;

in vec3 tex_coords;
out vec4 frag_color;

void main() {
    frag_color = texture(cube_map, tex_coords);
}
"#;

const ENVIRONMENT_VERTEX: &str = r#"
in vec3 vertex_position;
in vec3 vertex_normal;

out vec3 position;
out vec3 normal;

uniform mat4 projection_matrix;
uniform mat4 view_matrix;
uniform mat4 model_matrix;

void main() {
    gl_Position = projection_matrix * view_matrix * model_matrix * vec4(vertex_position, 1.0);

    mat3 vm_inverse_transpose = transpose(mat3(inverse(view_matrix * model_matrix)));
    position = vec3(view_matrix * model_matrix * vec4(vertex_position, 1.0));
    normal = normalize(vm_inverse_transpose * vertex_normal);
}
"#;

const ENVIRONMENT_FRAGMENT: &str = r#"
in vec3 normal;
in vec3 position;
out vec4 frag_color;

uniform samplerCube environment_map;
uniform mat4 view_matrix;
uniform float reflectivity;
uniform vec3 base_color;

void main() {
    vec3 norm_normal = normalize(normal);
    vec3 reflected = reflect(normalize(-position), norm_normal);
    mat3 view_transpose = mat3(transpose(view_matrix));
    vec3 reflected_vector = normalize(view_transpose * reflected);
    vec4 reflected_color = texture(environment_map, reflected_vector);

    frag_color = mix(vec4(base_color, 1.0), reflected_color, reflectivity);
}
"#;

impl Material {
    fn add_light_uniforms(&mut self) {
        for i in 0..4 {
            self.add_uniform(format!("light{i}"), UniformValue::Light(LightState::off()));
        }
    }

    fn add_texture_choice(&mut self, texture: Option<&Texture>) {
        match texture {
            Some(texture) => {
                self.add_uniform("use_texture", UniformValue::Bool(true));
                self.add_uniform(
                    "texture_sampler",
                    UniformValue::Sampler2d {
                        texture: texture.id(),
                        unit: 1,
                    },
                );
            }
            None => self.add_uniform("use_texture", UniformValue::Bool(false)),
        }
    }

    /// Unlit textured material. The only variant whose render-settings hook
    /// applies the surface flags (culling, wireframe, line width).
    pub fn textured(api: &mut dyn GraphicsApi, texture: &Texture) -> Result<Self, ShaderError> {
        let mut material =
            Self::new(api, TEXTURED_VERTEX, TEXTURED_FRAGMENT)?.with_kind(MaterialKind::Textured);
        material.add_uniform("base_color", UniformValue::Vec3([1.0, 1.0, 1.0]));
        material.add_uniform(
            "texture_sampler",
            UniformValue::Sampler2d {
                texture: texture.id(),
                unit: 1,
            },
        );
        material.locate_uniforms(api);
        Ok(material)
    }

    /// Diffuse-only shading against the four light slots.
    pub fn lambert(
        api: &mut dyn GraphicsApi,
        texture: Option<&Texture>,
    ) -> Result<Self, ShaderError> {
        let mut material =
            Self::new(api, LIT_VERTEX, LAMBERT_FRAGMENT)?.with_kind(MaterialKind::Lambert);
        material.add_uniform("base_color", UniformValue::Vec3([1.0, 1.0, 1.0]));
        material.add_light_uniforms();
        material.add_texture_choice(texture);
        material.locate_uniforms(api);
        Ok(material)
    }

    /// Diffuse + specular shading against the four light slots.
    pub fn phong(
        api: &mut dyn GraphicsApi,
        texture: Option<&Texture>,
    ) -> Result<Self, ShaderError> {
        let mut material =
            Self::new(api, LIT_VERTEX, PHONG_FRAGMENT)?.with_kind(MaterialKind::Phong);
        material.add_uniform("base_color", UniformValue::Vec3([1.0, 1.0, 1.0]));
        material.add_light_uniforms();
        material.add_uniform("view_position", UniformValue::Vec3([0.0, 0.0, 0.0]));
        material.add_uniform("specular_strength", UniformValue::Float(1.0));
        material.add_uniform("shininess", UniformValue::Float(32.0));
        material.add_texture_choice(texture);
        material.locate_uniforms(api);
        Ok(material)
    }

    /// Skybox material sampling a cube map, pinned to the far plane.
    pub fn cube_map(api: &mut dyn GraphicsApi, cube_map: &CubeMap) -> Result<Self, ShaderError> {
        let mut material =
            Self::new(api, CUBE_MAP_VERTEX, CUBE_MAP_FRAGMENT)?.with_kind(MaterialKind::CubeMap);
        material.add_uniform(
            "cube_map",
            UniformValue::SamplerCube {
                texture: cube_map.id(),
                unit: 1,
            },
        );
        material.locate_uniforms(api);
        Ok(material)
    }

    /// Mirror-like material mixing a cube-map reflection over a base color.
    pub fn environment_map(
        api: &mut dyn GraphicsApi,
        environment: &CubeMap,
    ) -> Result<Self, ShaderError> {
        let mut material = Self::new(api, ENVIRONMENT_VERTEX, ENVIRONMENT_FRAGMENT)?
            .with_kind(MaterialKind::EnvironmentMap);
        material.add_uniform(
            "environment_map",
            UniformValue::SamplerCube {
                texture: environment.id(),
                unit: 1,
            },
        );
        material.add_uniform("base_color", UniformValue::Vec3([1.0, 1.0, 1.0]));
        material.add_uniform("reflectivity", UniformValue::Float(0.6));
        material.locate_uniforms(api);
        Ok(material)
    }
}
