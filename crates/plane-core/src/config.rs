use crate::constants::*;

/// Runtime knobs for a sketch. Frontends start from `Default` and override
/// what their host environment provides.
#[derive(Clone, Debug)]
pub struct SketchConfig {
    pub fov_degrees: f32,
    pub camera_distance: f32,
    pub near: f32,
    pub far: f32,
    pub max_pixel_ratio: f64,
    /// Adds a solid cube in front of the plane (the cube variant of the sketch).
    pub with_cube: bool,
    pub image_src: String,
}

impl Default for SketchConfig {
    fn default() -> Self {
        Self {
            fov_degrees: DEFAULT_FOV_DEGREES,
            camera_distance: DEFAULT_CAMERA_DISTANCE,
            near: CAMERA_NEAR,
            far: CAMERA_FAR,
            max_pixel_ratio: MAX_PIXEL_RATIO,
            with_cube: false,
            image_src: "/image.jpg".to_string(),
        }
    }
}

impl SketchConfig {
    #[inline]
    pub fn fov_radians(&self) -> f32 {
        self.fov_degrees.to_radians()
    }

    /// Device pixel ratio actually used for the backing store.
    #[inline]
    pub fn pixel_ratio(&self, device_pixel_ratio: f64) -> f64 {
        if device_pixel_ratio.is_finite() && device_pixel_ratio > 0.0 {
            device_pixel_ratio.min(self.max_pixel_ratio)
        } else {
            1.0
        }
    }
}
