use crate::constants::{KEY_RESET_VIEW, KEY_TEARDOWN};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum KeyAction {
    ResetView,
    Teardown,
}

#[inline]
pub fn key_action(key: &str) -> Option<KeyAction> {
    if key == KEY_TEARDOWN {
        Some(KeyAction::Teardown)
    } else if key.eq_ignore_ascii_case(KEY_RESET_VIEW) {
        Some(KeyAction::ResetView)
    } else {
        None
    }
}

/// Pointer travel since the last sample, or zero for the first one.
#[inline]
pub fn drag_delta(prev: Option<[f32; 2]>, now: [f32; 2]) -> [f32; 2] {
    match prev {
        Some([px, py]) => [now[0] - px, now[1] - py],
        None => [0.0, 0.0],
    }
}

/// Backing-store size for a CSS box at a given pixel ratio, never zero.
#[inline]
pub fn backing_size(css_width: f64, css_height: f64, pixel_ratio: f64) -> (u32, u32) {
    let w = (css_width * pixel_ratio).max(0.0) as u32;
    let h = (css_height * pixel_ratio).max(0.0) as u32;
    (w.max(1), h.max(1))
}
