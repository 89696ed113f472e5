// DOM wiring for the web frontend

// Canvas WebGPU draws into
pub const CANVAS_SELECTOR: &str = "canvas#webgl";

// Element the plane stands in for; falls back to the canvas when absent
pub const MEDIA_SELECTOR: &str = "[data-media]";

// Keyboard
pub const KEY_RESET_VIEW: &str = "r";
pub const KEY_TEARDOWN: &str = "Escape";

// Only the primary button orbits
pub const ORBIT_BUTTON: i16 = 0;
