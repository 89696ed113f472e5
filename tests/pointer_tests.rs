// Host-side tests for pointer mapping: device coordinates, ray casting and
// UV forwarding for the tracked mesh.

use glam::{Vec2, Vec3};
use plane_core::*;

const VIEW: ViewportPixelSize = ViewportPixelSize::new(1920.0, 1080.0);

fn approx2(a: Vec2, b: Vec2, eps: f32) -> bool {
    (a - b).abs().max_element() <= eps
}

fn camera() -> PerspectiveCamera {
    PerspectiveCamera::looking_at_origin(75f32.to_radians(), VIEW.aspect().unwrap(), 10.0, 0.1, 100.0)
}

/// Plane that fills the frustum at the camera distance.
fn full_plane(scene: &mut Scene) -> MeshId {
    let m = ViewportMapper::new(75f32.to_radians(), 10.0, VIEW, VIEW.into()).unwrap();
    let s = m.scale();
    scene.add_plane(Transform::default().with_scale(Vec3::new(s.x, s.y, 1.0)), true)
}

#[test]
fn center_maps_to_origin() {
    let ndc = to_device_coordinates(Vec2::new(960.0, 540.0), VIEW).unwrap();
    assert_eq!(ndc, Vec2::ZERO);
}

#[test]
fn corners_map_to_ndc_corners_with_y_up() {
    let tl = to_device_coordinates(Vec2::ZERO, VIEW).unwrap();
    let br = to_device_coordinates(Vec2::new(1920.0, 1080.0), VIEW).unwrap();
    assert_eq!(tl, Vec2::new(-1.0, 1.0));
    assert_eq!(br, Vec2::new(1.0, -1.0));
}

#[test]
fn degenerate_viewport_has_no_device_coordinates() {
    assert!(to_device_coordinates(Vec2::ZERO, ViewportPixelSize::new(0.0, 0.0)).is_err());
}

#[test]
fn center_ray_hits_plane_middle() {
    let mut scene = Scene::new();
    let plane = full_plane(&mut scene);
    let mapper = PointerMapper::new(plane);
    let uv = mapper.pick(Vec2::new(960.0, 540.0), VIEW, &camera(), &scene);
    let uv = uv.expect("hit");
    assert!(approx2(uv, Vec2::splat(0.5), 1e-4), "{uv:?}");
}

#[test]
fn off_center_pointer_tracks_uv_with_v_up() {
    let mut scene = Scene::new();
    let plane = full_plane(&mut scene);
    let mapper = PointerMapper::new(plane);
    let uv = mapper
        .pick(Vec2::new(480.0, 270.0), VIEW, &camera(), &scene)
        .expect("hit");
    assert!(approx2(uv, Vec2::new(0.25, 0.75), 1e-3), "{uv:?}");
}

#[test]
fn miss_does_not_invoke_callback() {
    let mut scene = Scene::new();
    let plane = scene.add_plane(Transform::default().with_scale(Vec3::new(2.0, 2.0, 1.0)), true);
    let mapper = PointerMapper::new(plane);
    let mut calls = 0;
    let hit = mapper.dispatch(Vec2::new(10.0, 10.0), VIEW, &camera(), &scene, |_| calls += 1);
    assert!(!hit);
    assert_eq!(calls, 0);
}

#[test]
fn occluding_mesh_blocks_tracked_plane() {
    let mut scene = Scene::new();
    let plane = full_plane(&mut scene);
    scene.add_cuboid(Transform::from_translation(Vec3::new(0.0, 0.0, 2.0)), false, [0.0, 1.0, 0.0, 1.0]);
    let mapper = PointerMapper::new(plane);
    let mut seen = Vec::new();
    let hit = mapper.dispatch(Vec2::new(960.0, 540.0), VIEW, &camera(), &scene, |uv| seen.push(uv));
    assert!(!hit);
    assert!(seen.is_empty());
}

#[test]
fn non_mesh_object_never_qualifies() {
    let mut scene = Scene::new();
    let plane = full_plane(&mut scene);
    let marker = scene.add_marker(Vec3::new(0.0, 0.0, 1.0), 0.5);
    let nearest = intersect(Vec2::ZERO, &camera(), &scene).expect("hit");
    assert_eq!(nearest.object, Intersectable::Other(marker));
    assert!(PointerMapper::new(plane).qualify(Some(nearest)).is_none());
}

#[test]
fn tracking_another_mesh_switches_target() {
    let mut scene = Scene::new();
    let plane = full_plane(&mut scene);
    let cube = scene.add_cuboid(Transform::from_translation(Vec3::new(0.0, 0.0, 2.0)), true, [1.0; 4]);
    let mut mapper = PointerMapper::new(plane);
    mapper.track(cube);
    assert_eq!(mapper.tracked(), cube);
    let uv = mapper.pick(Vec2::new(960.0, 540.0), VIEW, &camera(), &scene).expect("cube hit");
    assert!(approx2(uv, Vec2::splat(0.5), 1e-4), "{uv:?}");
}

#[test]
fn untextured_plane_reports_no_uv() {
    let mut scene = Scene::new();
    let plane = scene.add_plane(Transform::default().with_scale(Vec3::new(4.0, 4.0, 1.0)), false);
    let mapper = PointerMapper::new(plane);
    assert!(mapper.pick(Vec2::new(960.0, 540.0), VIEW, &camera(), &scene).is_none());
}

#[test]
fn textured_untracked_plane_in_front_blocks_callback() {
    let mut scene = Scene::new();
    let plane = full_plane(&mut scene);
    let front = scene.add_plane(
        Transform::from_translation(Vec3::new(0.0, 0.0, 3.0)).with_scale(Vec3::new(2.0, 2.0, 1.0)),
        true,
    );
    let nearest = intersect(Vec2::ZERO, &camera(), &scene).expect("hit");
    assert_eq!(nearest.object, Intersectable::Mesh(front));
    assert!(nearest.uv.is_some());

    let mapper = PointerMapper::new(plane);
    let mut calls = 0;
    let hit = mapper.dispatch(Vec2::new(960.0, 540.0), VIEW, &camera(), &scene, |_| calls += 1);
    assert!(!hit);
    assert_eq!(calls, 0);
}
