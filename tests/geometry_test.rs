use std::f32::consts::FRAC_PI_2;

use arbor::geometry::{
    AttributeData, Geometry, GeometryError, FACE_NORMAL, VERTEX_NORMAL, VERTEX_POSITION, VERTEX_UV,
};
use arbor::graphics::record::{Call, RecordingApi};
use arbor::math;

fn quad_positions(offset: f32) -> Vec<[f32; 3]> {
    vec![
        [offset, 0.0, 0.0],
        [offset + 1.0, 0.0, 0.0],
        [offset + 1.0, 1.0, 0.0],
        [offset, 0.0, 0.0],
        [offset + 1.0, 1.0, 0.0],
        [offset, 1.0, 0.0],
    ]
}

fn quad_uvs() -> Vec<[f32; 2]> {
    vec![
        [0.0, 0.0],
        [1.0, 0.0],
        [1.0, 1.0],
        [0.0, 0.0],
        [1.0, 1.0],
        [0.0, 1.0],
    ]
}

fn quad(api: &mut RecordingApi, offset: f32) -> Geometry {
    let mut geometry = Geometry::new();
    geometry.add_attribute(api, VERTEX_POSITION, AttributeData::Vec3(quad_positions(offset)));
    geometry.add_attribute(api, VERTEX_UV, AttributeData::Vec2(quad_uvs()));
    geometry.count_vertices();
    geometry
}

#[test]
fn merge_concatenates_every_attribute() {
    let mut api = RecordingApi::new();
    let mut a = quad(&mut api, 0.0);
    let b = quad(&mut api, 2.0);

    a.merge(&mut api, &b).unwrap();

    assert_eq!(a.vertex_count(), 12);
    assert_eq!(a.attribute(VERTEX_POSITION).unwrap().len(), 12);
    assert_eq!(a.attribute(VERTEX_UV).unwrap().len(), 12);
    // our vertices first, then the other geometry's
    let AttributeData::Vec3(positions) = a.attribute(VERTEX_POSITION).unwrap().data() else {
        panic!("positions are vec3");
    };
    assert_eq!(positions[0], [0.0, 0.0, 0.0]);
    assert_eq!(positions[6], [2.0, 0.0, 0.0]);
    // the other side is untouched
    assert_eq!(b.vertex_count(), 6);
}

#[test]
fn merge_reuploads_every_buffer() {
    let mut api = RecordingApi::new();
    let mut a = quad(&mut api, 0.0);
    let b = quad(&mut api, 2.0);
    api.clear_log();

    a.merge(&mut api, &b).unwrap();

    let uploads = api
        .calls
        .iter()
        .filter(|call| matches!(call, Call::UploadBuffer { .. }))
        .count();
    assert_eq!(uploads, 2);
}

#[test]
fn merge_with_differing_keys_fails_without_mutating() {
    let mut api = RecordingApi::new();
    let mut a = quad(&mut api, 0.0);
    let mut b = Geometry::new();
    b.add_attribute(&mut api, VERTEX_POSITION, AttributeData::Vec3(quad_positions(1.0)));
    b.count_vertices();

    let err = a.merge(&mut api, &b).unwrap_err();
    assert!(matches!(err, GeometryError::AttributeMismatch { .. }));

    assert_eq!(a.vertex_count(), 6);
    assert_eq!(a.attribute(VERTEX_POSITION).unwrap().len(), 6);
    assert_eq!(a.attribute(VERTEX_UV).unwrap().len(), 6);
    assert_eq!(b.attribute(VERTEX_POSITION).unwrap().len(), 6);
}

#[test]
fn merge_with_differing_data_kinds_fails_without_mutating() {
    let mut api = RecordingApi::new();
    let mut a = quad(&mut api, 0.0);
    let mut b = quad(&mut api, 2.0);
    // same name, different payload kind
    b.add_attribute(&mut api, VERTEX_UV, AttributeData::Float(vec![0.0; 6]));
    b.count_vertices();

    let err = a.merge(&mut api, &b).unwrap_err();
    assert!(matches!(err, GeometryError::TypeMismatch(name) if name == VERTEX_UV));
    assert_eq!(a.vertex_count(), 6);
    assert_eq!(a.attribute(VERTEX_POSITION).unwrap().len(), 6);
}

#[test]
fn apply_matrix_bakes_positions() {
    let mut api = RecordingApi::new();
    let mut geometry = Geometry::new();
    geometry.add_attribute(
        &mut api,
        VERTEX_POSITION,
        AttributeData::Vec3(vec![[0.0, 0.0, 0.0], [1.0, 0.0, 0.0]]),
    );
    geometry.count_vertices();

    geometry
        .apply_matrix(&mut api, math::translation(1.0, 2.0, 3.0), VERTEX_POSITION)
        .unwrap();

    let AttributeData::Vec3(positions) = geometry.attribute(VERTEX_POSITION).unwrap().data()
    else {
        panic!("positions are vec3");
    };
    assert_eq!(positions[0], [1.0, 2.0, 3.0]);
    assert_eq!(positions[1], [2.0, 2.0, 3.0]);
}

#[test]
fn apply_matrix_rotates_normals_but_ignores_translation() {
    let mut api = RecordingApi::new();
    let mut geometry = Geometry::new();
    geometry.add_attribute(
        &mut api,
        VERTEX_POSITION,
        AttributeData::Vec3(vec![[0.0, 0.0, 0.0]]),
    );
    geometry.add_attribute(
        &mut api,
        VERTEX_NORMAL,
        AttributeData::Vec3(vec![[0.0, 0.0, 1.0]]),
    );
    geometry.add_attribute(
        &mut api,
        FACE_NORMAL,
        AttributeData::Vec3(vec![[0.0, 0.0, 1.0]]),
    );
    geometry.count_vertices();

    let matrix = math::translation(5.0, 0.0, 0.0) * math::rotation_y(FRAC_PI_2);
    geometry
        .apply_matrix(&mut api, matrix, VERTEX_POSITION)
        .unwrap();

    for name in [VERTEX_NORMAL, FACE_NORMAL] {
        let AttributeData::Vec3(normals) = geometry.attribute(name).unwrap().data() else {
            panic!("normals are vec3");
        };
        // only the rotation part applies to normals
        assert!((normals[0][0] - 1.0).abs() < 1e-6);
        assert!(normals[0][1].abs() < 1e-6);
        assert!(normals[0][2].abs() < 1e-6);
    }
}

#[test]
fn apply_matrix_reuploads_rewritten_buffers() {
    let mut api = RecordingApi::new();
    let mut geometry = Geometry::new();
    geometry.add_attribute(
        &mut api,
        VERTEX_POSITION,
        AttributeData::Vec3(vec![[0.0, 0.0, 0.0]]),
    );
    geometry.add_attribute(
        &mut api,
        VERTEX_NORMAL,
        AttributeData::Vec3(vec![[0.0, 0.0, 1.0]]),
    );
    geometry.count_vertices();
    api.clear_log();

    geometry
        .apply_matrix(&mut api, math::rotation_x(0.5), VERTEX_POSITION)
        .unwrap();

    let uploads = api
        .calls
        .iter()
        .filter(|call| matches!(call, Call::UploadBuffer { .. }))
        .count();
    // target attribute plus the recomputed normals
    assert_eq!(uploads, 2);
}

#[test]
fn apply_matrix_to_a_missing_attribute_fails() {
    let mut api = RecordingApi::new();
    let mut geometry = quad(&mut api, 0.0);
    let err = geometry
        .apply_matrix(&mut api, math::translation(1.0, 0.0, 0.0), "nope")
        .unwrap_err();
    assert!(matches!(err, GeometryError::MissingAttribute(_)));
}

#[test]
fn replacing_an_attribute_releases_its_buffer() {
    let mut api = RecordingApi::new();
    let mut geometry = Geometry::new();
    geometry.add_attribute(&mut api, VERTEX_UV, AttributeData::Vec2(quad_uvs()));
    api.clear_log();

    geometry.add_attribute(&mut api, VERTEX_UV, AttributeData::Vec2(quad_uvs()));

    assert!(api
        .calls
        .iter()
        .any(|call| matches!(call, Call::DeleteBuffer(_))));
}

#[test]
fn cuboid_has_36_vertices_and_the_standard_attributes() {
    let mut api = RecordingApi::new();
    let cuboid = Geometry::cuboid(&mut api, 2.0, 1.0, 1.0);

    assert_eq!(cuboid.vertex_count(), 36);
    for name in [VERTEX_POSITION, VERTEX_NORMAL, FACE_NORMAL, VERTEX_UV] {
        assert_eq!(cuboid.attribute(name).unwrap().len(), 36, "{name}");
    }
    // width 2 puts the x+ face at x = 1
    let AttributeData::Vec3(positions) = cuboid.attribute(VERTEX_POSITION).unwrap().data()
    else {
        panic!("positions are vec3");
    };
    assert!(positions.iter().all(|p| p[0].abs() <= 1.0));
    assert!(positions.iter().any(|p| p[0] == 1.0));
}
