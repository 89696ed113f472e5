// Host-side tests for the perspective camera and orbit controls.

use glam::{Vec2, Vec3};
use plane_core::*;

const VIEW: ViewportPixelSize = ViewportPixelSize::new(800.0, 600.0);

fn camera() -> PerspectiveCamera {
    PerspectiveCamera::looking_at_origin(1.0, VIEW.aspect().unwrap(), 10.0, 0.1, 100.0)
}

fn settle(controls: &mut OrbitControls, cam: &mut PerspectiveCamera) {
    for _ in 0..400 {
        controls.update(cam);
    }
}

#[test]
fn center_ray_looks_down_negative_z() {
    let cam = camera();
    let ray = cam.ray_from_ndc(Vec2::ZERO);
    assert_eq!(ray.origin, Vec3::new(0.0, 0.0, 10.0));
    assert!((ray.direction - Vec3::NEG_Z).length() < 1e-5);
}

#[test]
fn ndc_edge_ray_spans_half_the_fov() {
    let cam = camera();
    let ray = cam.ray_from_ndc(Vec2::new(0.0, 1.0));
    let angle = ray.direction.angle_between(Vec3::NEG_Z);
    assert!((angle - 0.5).abs() < 1e-4, "{angle}");
}

#[test]
fn update_without_input_keeps_camera_still() {
    let mut cam = camera();
    let mut controls = OrbitControls::new(&cam);
    assert!(!controls.update(&mut cam));
    assert!((cam.eye - Vec3::new(0.0, 0.0, 10.0)).length() < 1e-5);
}

#[test]
fn rotation_eases_in_and_keeps_distance() {
    let mut cam = camera();
    let mut controls = OrbitControls::new(&cam);
    controls.rotate(100.0, 0.0, VIEW);
    assert!(controls.update(&mut cam));
    let first = cam.eye;
    settle(&mut controls, &mut cam);
    assert!(cam.eye.x.abs() > first.x.abs());
    assert!((cam.distance_to_target() - 10.0).abs() < 1e-3);
}

#[test]
fn polar_angle_never_flips_over_the_pole() {
    let mut cam = camera();
    let mut controls = OrbitControls::new(&cam);
    controls.rotate(0.0, 100_000.0, VIEW);
    settle(&mut controls, &mut cam);
    assert!(cam.eye.is_finite());
    assert!(cam.eye.y > 9.9);
    assert!(cam.eye.z > 0.0);
}

#[test]
fn dolly_is_clamped() {
    let mut cam = camera();
    let mut controls = OrbitControls::new(&cam);
    for _ in 0..200 {
        controls.dolly(1.0);
        controls.update(&mut cam);
    }
    assert!((controls.distance() - ORBIT_MAX_DISTANCE).abs() < 1e-3);
    for _ in 0..400 {
        controls.dolly(-1.0);
        controls.update(&mut cam);
    }
    assert!((controls.distance() - ORBIT_MIN_DISTANCE).abs() < 1e-3);
}

#[test]
fn reset_restores_initial_view() {
    let mut cam = camera();
    let mut controls = OrbitControls::new(&cam);
    controls.rotate(120.0, 40.0, VIEW);
    controls.dolly(1.0);
    settle(&mut controls, &mut cam);
    controls.reset();
    controls.update(&mut cam);
    assert!((cam.eye - Vec3::new(0.0, 0.0, 10.0)).length() < 1e-4);
}
