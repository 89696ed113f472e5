// Defaults shared by the web and native frontends.

// Camera
pub const DEFAULT_FOV_DEGREES: f32 = 75.0;
pub const DEFAULT_CAMERA_DISTANCE: f32 = 10.0;
pub const CAMERA_NEAR: f32 = 0.1;
pub const CAMERA_FAR: f32 = 100.0;

// Renderer
pub const MAX_PIXEL_RATIO: f64 = 2.0; // cap devicePixelRatio for the backing store
pub const CLEAR_COLOR: [f64; 4] = [0.0, 0.0, 0.0, 0.0];

// Orbit controls
pub const ORBIT_DAMPING: f32 = 0.08; // fraction of pending motion applied per frame
pub const ORBIT_ROTATE_SPEED: f32 = 1.0; // full viewport height drag = 2*pi * speed
pub const ORBIT_DOLLY_STEP: f32 = 0.95; // scale per wheel notch
pub const ORBIT_MIN_DISTANCE: f32 = 1.0;
pub const ORBIT_MAX_DISTANCE: f32 = 50.0;
pub const ORBIT_POLAR_EPSILON: f32 = 1e-3;

// Hover feedback fed to the plane shader
pub const HOVER_RISE_PER_SEC: f32 = 6.0;
pub const HOVER_FALL_PER_SEC: f32 = 1.5;

// Cube variant
pub const CUBE_COLOR: [f32; 4] = [0.0, 1.0, 0.0, 1.0];
pub const CUBE_OFFSET: [f32; 3] = [0.0, 0.0, 2.0];

// Placeholder texture shown until the real image decodes
pub const PLACEHOLDER_SIZE: u32 = 64;
pub const PLACEHOLDER_CELLS: u32 = 8;
