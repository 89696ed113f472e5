// Host-side tests for scene ids, transforms and ray intersection.

use glam::{Quat, Vec3};
use plane_core::*;

fn down_z(from: f32) -> Ray {
    Ray::new(Vec3::new(0.0, 0.0, from), Vec3::NEG_Z)
}

#[test]
fn ids_are_unique_per_object() {
    let mut scene = Scene::new();
    let a = scene.add_plane(Transform::default(), true);
    let b = scene.add_plane(Transform::default(), true);
    assert_ne!(a, b);
    assert_eq!(scene.objects().len(), 2);
    assert_eq!(scene.object(b).map(|o| o.kind), Some(Intersectable::Mesh(b)));
}

#[test]
fn identity_comparison_distinguishes_kinds() {
    let mut scene = Scene::new();
    let mesh = scene.add_plane(Transform::default(), true);
    let other = scene.add_marker(Vec3::ZERO, 1.0);
    assert!(Intersectable::Mesh(mesh).is_mesh(mesh));
    assert!(!Intersectable::Other(other).is_mesh(other));
    assert!(!Intersectable::Mesh(mesh).is_mesh(other));
}

#[test]
fn nearest_hit_wins() {
    let mut scene = Scene::new();
    let back = scene.add_plane(Transform::default().with_scale(Vec3::splat(4.0)), true);
    let front = scene.add_plane(Transform::from_translation(Vec3::new(0.0, 0.0, 1.0)), true);
    let hit = scene.intersect(&down_z(5.0)).expect("hit");
    assert_eq!(hit.object, Intersectable::Mesh(front));
    assert!((hit.distance - 4.0).abs() < 1e-5);

    scene.remove(front).unwrap();
    let hit = scene.intersect(&down_z(5.0)).expect("hit");
    assert_eq!(hit.object, Intersectable::Mesh(back));
    assert!((hit.distance - 5.0).abs() < 1e-5);
}

#[test]
fn hits_behind_the_ray_are_ignored() {
    let mut scene = Scene::new();
    scene.add_plane(Transform::default(), true);
    assert!(scene.intersect(&Ray::new(Vec3::new(0.0, 0.0, -1.0), Vec3::NEG_Z)).is_none());
}

#[test]
fn zero_scale_plane_is_not_hittable_and_recovers() {
    let mut scene = Scene::new();
    let rotation = Quat::from_rotation_z(0.3);
    let plane = scene.add_plane(
        Transform {
            rotation,
            ..Transform::default()
        },
        true,
    );
    scene.set_scale(plane, MeshScale { x: 0.0, y: 0.0 }).unwrap();
    assert!(scene.intersect(&down_z(5.0)).is_none());

    scene.set_scale(plane, MeshScale { x: 2.0, y: 2.0 }).unwrap();
    assert!(scene.intersect(&down_z(5.0)).is_some());
    assert_eq!(scene.object(plane).unwrap().transform.rotation, rotation);
}

#[test]
fn scaled_plane_uv_is_relative_to_its_extent() {
    let mut scene = Scene::new();
    scene.add_plane(Transform::default().with_scale(Vec3::new(10.0, 4.0, 1.0)), true);
    let ray = Ray::new(Vec3::new(2.5, -1.0, 5.0), Vec3::NEG_Z);
    let uv = scene.intersect(&ray).and_then(|h| h.uv).expect("uv");
    assert!((uv.x - 0.75).abs() < 1e-5);
    assert!((uv.y - 0.25).abs() < 1e-5);
}

#[test]
fn unknown_ids_are_errors() {
    let mut scene = Scene::new();
    let id = scene.add_plane(Transform::default(), true);
    scene.remove(id).unwrap();
    assert!(matches!(scene.remove(id), Err(SketchError::UnknownMesh(_))));
    assert!(scene.set_transform(id, Transform::default()).is_err());
}

#[test]
fn ray_sphere_basic_hit_and_miss() {
    let t = ray_sphere(Vec3::ZERO, Vec3::Z, Vec3::new(0.0, 0.0, 5.0), 2.0).expect("hit");
    assert!((t - 3.0).abs() < 1e-5);
    assert!(ray_sphere(Vec3::ZERO, Vec3::Z, Vec3::new(5.0, 0.0, 5.0), 1.0).is_none());
    assert!(ray_sphere(Vec3::ZERO, Vec3::ZERO, Vec3::ZERO, 1.0).is_none());
}

#[test]
fn hit_point_lies_on_the_ray_at_its_distance() {
    let mut scene = Scene::new();
    scene.add_plane(Transform::default().with_scale(Vec3::splat(6.0)), true);
    let ray = Ray::new(Vec3::new(0.0, 0.0, 5.0), Vec3::new(0.3, -0.2, -1.0));
    let hit = scene.intersect(&ray).expect("hit");
    assert!((ray.at(hit.distance) - hit.point).length() < 1e-4);
    assert!(hit.point.z.abs() < 1e-5);
}
