// Host-side tests for viewport mapping: visible extents and mesh scale.

use plane_core::*;

fn approx(a: f32, b: f32, eps: f32) -> bool {
    (a - b).abs() <= eps
}

const FULL_HD: ViewportPixelSize = ViewportPixelSize::new(1920.0, 1080.0);

fn fov75() -> f32 {
    75f32.to_radians()
}

#[test]
fn visible_extents_at_default_camera() {
    let aspect = FULL_HD.aspect().unwrap();
    let ext = compute_visible_extents(fov75(), 10.0, aspect).unwrap();
    assert!(approx(ext.height, 15.3465, 1e-3), "height {}", ext.height);
    assert!(approx(ext.width, 27.283, 1e-3), "width {}", ext.width);
}

#[test]
fn full_viewport_element_fills_the_frustum_exactly() {
    let aspect = FULL_HD.aspect().unwrap();
    let ext = compute_visible_extents(fov75(), 10.0, aspect).unwrap();
    let scale = compute_mesh_scale(FULL_HD.into(), ext, FULL_HD).unwrap();
    assert_eq!(scale.x, ext.width);
    assert_eq!(scale.y, ext.height);
}

#[test]
fn smaller_element_scales_proportionally() {
    let aspect = FULL_HD.aspect().unwrap();
    let ext = compute_visible_extents(fov75(), 10.0, aspect).unwrap();
    let scale = compute_mesh_scale(ElementBounds::new(400.0, 300.0), ext, FULL_HD).unwrap();
    assert!(approx(scale.x, 5.684, 1e-3), "x {}", scale.x);
    assert!(approx(scale.y, 4.263, 1e-3), "y {}", scale.y);
}

#[test]
fn zero_bounds_give_empty_scale() {
    let ext = VisibleExtents { width: 10.0, height: 5.0 };
    let scale = compute_mesh_scale(ElementBounds::new(0.0, 0.0), ext, FULL_HD).unwrap();
    assert_eq!(scale, MeshScale { x: 0.0, y: 0.0 });
    assert!(scale.is_empty());
}

#[test]
fn invalid_projection_inputs_are_rejected() {
    assert!(matches!(
        compute_visible_extents(0.0, 10.0, 1.0),
        Err(SketchError::FovOutOfRange(_))
    ));
    assert!(matches!(
        compute_visible_extents(std::f32::consts::PI, 10.0, 1.0),
        Err(SketchError::FovOutOfRange(_))
    ));
    assert!(matches!(
        compute_visible_extents(1.0, 0.0, 1.0),
        Err(SketchError::NonPositiveDistance(_))
    ));
    assert!(matches!(
        compute_visible_extents(1.0, 10.0, f32::NAN),
        Err(SketchError::InvalidAspect(_))
    ));
}

#[test]
fn degenerate_viewport_is_an_error_not_a_nan() {
    let ext = VisibleExtents { width: 10.0, height: 5.0 };
    let zero_h = ViewportPixelSize::new(800.0, 0.0);
    assert!(zero_h.aspect().is_err());
    assert!(matches!(
        compute_mesh_scale(ElementBounds::new(10.0, 10.0), ext, zero_h),
        Err(SketchError::DegenerateViewport { .. })
    ));
}

#[test]
fn mapper_resize_updates_aspect_then_extents_then_scale() {
    let mut m = ViewportMapper::new(fov75(), 10.0, FULL_HD, FULL_HD.into()).unwrap();
    let square = ViewportPixelSize::new(1000.0, 1000.0);
    let scale = m.resize(square, square.into()).unwrap();
    assert_eq!(m.aspect(), 1.0);
    assert!(approx(m.extents().width, m.extents().height, 1e-5));
    assert_eq!(scale, m.scale());
    assert_eq!(scale.x, m.extents().width);
}

#[test]
fn mapper_keeps_last_good_scale_on_degenerate_resize() {
    let mut m = ViewportMapper::new(fov75(), 10.0, FULL_HD, ElementBounds::new(400.0, 300.0)).unwrap();
    let before = m.scale();
    assert!(m
        .resize(ViewportPixelSize::new(1920.0, 0.0), ElementBounds::new(400.0, 300.0))
        .is_err());
    assert_eq!(m.scale(), before);
    assert!(m.scale().x.is_finite() && m.scale().y.is_finite());
}

#[test]
fn mapper_distance_change_rescales() {
    let mut m = ViewportMapper::new(fov75(), 10.0, FULL_HD, FULL_HD.into()).unwrap();
    let near = m.scale();
    let far = m.set_distance(20.0).unwrap();
    assert!(approx(far.x, near.x * 2.0, 1e-3));
    assert!(approx(far.y, near.y * 2.0, 1e-3));
    assert!(m.set_distance(-1.0).is_err());
    assert_eq!(m.distance(), 20.0);
}

#[test]
fn mapper_bounds_change_keeps_extents() {
    let mut m = ViewportMapper::new(fov75(), 10.0, FULL_HD, FULL_HD.into()).unwrap();
    let ext = m.extents();
    let half = m.set_bounds(ElementBounds::new(960.0, 540.0)).unwrap();
    assert_eq!(m.extents(), ext);
    assert!(approx(half.x, ext.width / 2.0, 1e-4));
    assert!(approx(half.y, ext.height / 2.0, 1e-4));
}

#[test]
fn mesh_scale_is_idempotent() {
    let ext = compute_visible_extents(fov75(), 10.0, FULL_HD.aspect().unwrap()).unwrap();
    let bounds = ElementBounds::new(640.0, 480.0);
    let first = compute_mesh_scale(bounds, ext, FULL_HD).unwrap();
    let second = compute_mesh_scale(bounds, ext, FULL_HD).unwrap();
    assert_eq!(first, second);

    let mut m = ViewportMapper::new(fov75(), 10.0, FULL_HD, bounds).unwrap();
    let again = m.resize(FULL_HD, bounds).unwrap();
    assert_eq!(again, first);
}
