//! Perspective camera, world-space rays and damped orbit controls.
//!
//! These types avoid platform APIs so both frontends and the host-side tests
//! share them. Clip space follows wgpu conventions (depth in \[0, 1\]).

use crate::constants::*;
use crate::viewport::ViewportPixelSize;
use glam::{Mat4, Vec2, Vec3};
use std::f32::consts::{PI, TAU};

/// Semi-infinite line `origin + t * direction`, `direction` normalized.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Ray {
    pub origin: Vec3,
    pub direction: Vec3,
}

impl Ray {
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        Self {
            origin,
            direction: direction.normalize_or_zero(),
        }
    }

    #[inline]
    pub fn at(&self, t: f32) -> Vec3 {
        self.origin + self.direction * t
    }
}

/// Right-handed camera with perspective projection.
#[derive(Clone, Debug)]
pub struct PerspectiveCamera {
    pub eye: Vec3,
    pub target: Vec3,
    pub up: Vec3,
    pub aspect: f32,
    pub fov_radians: f32,
    pub near: f32,
    pub far: f32,
}

impl PerspectiveCamera {
    /// Camera on the +Z axis looking at the origin.
    pub fn looking_at_origin(fov_radians: f32, aspect: f32, distance: f32, near: f32, far: f32) -> Self {
        Self {
            eye: Vec3::new(0.0, 0.0, distance),
            target: Vec3::ZERO,
            up: Vec3::Y,
            aspect,
            fov_radians,
            near,
            far,
        }
    }

    pub fn projection(&self) -> Mat4 {
        Mat4::perspective_rh(self.fov_radians, self.aspect, self.near, self.far)
    }

    pub fn view(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye, self.target, self.up)
    }

    pub fn view_projection(&self) -> Mat4 {
        self.projection() * self.view()
    }

    pub fn distance_to_target(&self) -> f32 {
        self.eye.distance(self.target)
    }

    /// World-space ray from the eye through a point in normalized device
    /// coordinates.
    pub fn ray_from_ndc(&self, ndc: Vec2) -> Ray {
        let inv = self.view_projection().inverse();
        let far = inv.project_point3(Vec3::new(ndc.x, ndc.y, 1.0));
        Ray::new(self.eye, far - self.eye)
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
struct Spherical {
    radius: f32,
    /// Azimuth around +Y, zero on +Z.
    theta: f32,
    /// Polar angle from +Y.
    phi: f32,
}

impl Spherical {
    fn from_offset(offset: Vec3) -> Self {
        let radius = offset.length();
        if radius == 0.0 {
            return Self {
                radius,
                theta: 0.0,
                phi: PI / 2.0,
            };
        }
        Self {
            radius,
            theta: offset.x.atan2(offset.z),
            phi: (offset.y / radius).clamp(-1.0, 1.0).acos(),
        }
    }

    fn to_offset(self) -> Vec3 {
        let s = self.phi.sin() * self.radius;
        Vec3::new(s * self.theta.sin(), self.radius * self.phi.cos(), s * self.theta.cos())
    }
}

/// Orbit-style camera controls: drag to rotate around a target, wheel to
/// dolly. Motion is accumulated and eased in by [`OrbitControls::update`],
/// which the frame loop calls once per frame.
#[derive(Clone, Debug)]
pub struct OrbitControls {
    pub target: Vec3,
    pub damping: f32,
    pub rotate_speed: f32,
    pub min_distance: f32,
    pub max_distance: f32,
    spherical: Spherical,
    initial: (Vec3, Spherical),
    pending_theta: f32,
    pending_phi: f32,
    pending_scale: f32,
}

impl OrbitControls {
    pub fn new(camera: &PerspectiveCamera) -> Self {
        let spherical = Spherical::from_offset(camera.eye - camera.target);
        Self {
            target: camera.target,
            damping: ORBIT_DAMPING,
            rotate_speed: ORBIT_ROTATE_SPEED,
            min_distance: ORBIT_MIN_DISTANCE,
            max_distance: ORBIT_MAX_DISTANCE,
            spherical,
            initial: (camera.target, spherical),
            pending_theta: 0.0,
            pending_phi: 0.0,
            pending_scale: 1.0,
        }
    }

    pub fn distance(&self) -> f32 {
        self.spherical.radius
    }

    /// Queue a rotation from a pointer drag of `dx`, `dy` pixels.
    pub fn rotate(&mut self, dx: f32, dy: f32, viewport: ViewportPixelSize) {
        if viewport.is_degenerate() {
            return;
        }
        let per_px = TAU * self.rotate_speed / viewport.height;
        self.pending_theta -= dx * per_px;
        self.pending_phi -= dy * per_px;
    }

    /// Queue a dolly. Positive `delta` (wheel down) moves away from the target.
    pub fn dolly(&mut self, delta: f32) {
        if !delta.is_finite() || delta == 0.0 {
            return;
        }
        if delta > 0.0 {
            self.pending_scale /= ORBIT_DOLLY_STEP;
        } else {
            self.pending_scale *= ORBIT_DOLLY_STEP;
        }
    }

    pub fn reset(&mut self) {
        self.target = self.initial.0;
        self.spherical = self.initial.1;
        self.pending_theta = 0.0;
        self.pending_phi = 0.0;
        self.pending_scale = 1.0;
    }

    /// Ease pending motion into the camera. Returns true when the eye moved.
    pub fn update(&mut self, camera: &mut PerspectiveCamera) -> bool {
        let d = self.damping.clamp(0.0, 1.0);
        let mut s = self.spherical;
        s.theta += self.pending_theta * d;
        s.phi = (s.phi + self.pending_phi * d).clamp(ORBIT_POLAR_EPSILON, PI - ORBIT_POLAR_EPSILON);
        s.radius = (s.radius * self.pending_scale).clamp(self.min_distance, self.max_distance);
        self.spherical = s;

        self.pending_theta *= 1.0 - d;
        self.pending_phi *= 1.0 - d;
        self.pending_scale = 1.0;
        if self.pending_theta.abs() < 1e-6 {
            self.pending_theta = 0.0;
        }
        if self.pending_phi.abs() < 1e-6 {
            self.pending_phi = 0.0;
        }

        let eye = self.target + s.to_offset();
        let moved = eye.distance_squared(camera.eye) > 1e-12 || camera.target != self.target;
        camera.eye = eye;
        camera.target = self.target;
        moved
    }
}
