use arbor::graphics::record::{Call, RecordingApi};
use arbor::graphics::{PixelFormat, TextureSettings};
use arbor::material::{Material, MaterialError, Property, UniformValue};
use arbor::texture::Texture;
use arbor::DrawStyle;

const VS: &str = "void main() {}";
const FS: &str = "void main() {}";

#[test]
fn standard_matrix_uniforms_are_always_present() {
    let mut api = RecordingApi::new();
    let material = Material::new(&mut api, VS, FS).unwrap();
    for name in ["model_matrix", "view_matrix", "projection_matrix"] {
        assert!(material.has_uniform(name), "{name}");
    }
}

#[test]
fn unknown_property_fails_fast() {
    let mut api = RecordingApi::new();
    let mut material = Material::new(&mut api, VS, FS).unwrap();
    let err = material
        .set_property("no_such_thing", Property::Float(1.0))
        .unwrap_err();
    assert!(matches!(err, MaterialError::NoSuchProperty(name) if name == "no_such_thing"));
}

#[test]
fn settings_are_type_checked() {
    let mut api = RecordingApi::new();
    let mut material = Material::new(&mut api, VS, FS).unwrap();
    let err = material
        .set_property("line_width", Property::Bool(true))
        .unwrap_err();
    assert!(matches!(err, MaterialError::PropertyType { .. }));
}

#[test]
fn properties_route_to_uniforms_and_settings() {
    let mut api = RecordingApi::new();
    let mut material = Material::new(&mut api, VS, FS).unwrap();
    material.add_uniform("base_color", UniformValue::Vec3([1.0, 1.0, 1.0]));

    material
        .set_properties([
            ("base_color", Property::Vec3([0.5, 0.0, 0.0])),
            ("wireframe", Property::Bool(true)),
            ("line_width", Property::Float(2.0)),
            ("draw_style", Property::DrawStyle(DrawStyle::LineLoop)),
        ])
        .unwrap();

    assert!(material.settings().wireframe);
    assert_eq!(material.settings().line_width, 2.0);
    assert_eq!(material.settings().draw_style, DrawStyle::LineLoop);
    match material.uniform("base_color").unwrap().value {
        UniformValue::Vec3(color) => assert_eq!(color, [0.5, 0.0, 0.0]),
        _ => panic!("base_color stays a vec3"),
    }
}

#[test]
fn undeclared_uniforms_upload_nothing() {
    // the program only declares the three standard matrices
    let mut api =
        RecordingApi::with_program_variables(["model_matrix", "view_matrix", "projection_matrix"]);
    let mut material = Material::new(&mut api, VS, FS).unwrap();
    material.add_uniform("extra", UniformValue::Float(3.0));
    material.locate_uniforms(&mut api);
    api.clear_log();

    material.upload_uniforms(&mut api);

    let written: Vec<&str> = api.uniform_writes().iter().map(|(name, _)| *name).collect();
    assert!(written.contains(&"model_matrix"));
    assert!(!written.contains(&"extra"));
    assert!(!material.uniform("extra").unwrap().is_resolved());
}

#[test]
fn textured_material_applies_surface_settings() {
    let mut api = RecordingApi::new();
    let texture = Texture::from_pixels(
        &mut api,
        1,
        1,
        PixelFormat::Rgba,
        &[255, 255, 255, 255],
        TextureSettings::default(),
    );
    let mut material = Material::textured(&mut api, &texture).unwrap();
    material
        .set_properties([
            ("double_side", Property::Bool(false)),
            ("wireframe", Property::Bool(true)),
            ("line_width", Property::Float(3.0)),
        ])
        .unwrap();
    api.clear_log();

    material.update_render_settings(&mut api);

    assert!(api.calls.contains(&Call::SetCullFace(true)));
    assert!(api.calls.contains(&Call::SetWireframe(true)));
    assert!(api.calls.contains(&Call::SetLineWidth(3.0)));
}

#[test]
fn base_material_render_settings_hook_is_a_no_op() {
    let mut api = RecordingApi::new();
    let material = Material::phong(&mut api, None).unwrap();
    api.clear_log();

    material.update_render_settings(&mut api);

    assert!(api.calls.is_empty());
}
