//! Viewport mapping: camera projection to world-space extents, and element
//! pixel bounds to a world-space mesh scale.
//!
//! The free functions are pure and fail fast on degenerate input.
//! [`ViewportMapper`] wraps them with the resize ordering the frontends rely
//! on (aspect, then extents, then scale) and keeps the last good scale when
//! the inputs stop making sense.

use crate::error::{Result, SketchError};
use std::f32::consts::PI;

/// Viewport size in pixels, refreshed once per resize and passed explicitly.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ViewportPixelSize {
    pub width: f32,
    pub height: f32,
}

impl ViewportPixelSize {
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    #[inline]
    pub fn is_degenerate(&self) -> bool {
        !(self.width.is_finite() && self.height.is_finite() && self.width > 0.0 && self.height > 0.0)
    }

    pub fn validate(&self) -> Result<()> {
        if self.is_degenerate() {
            return Err(SketchError::DegenerateViewport {
                width: self.width,
                height: self.height,
            });
        }
        Ok(())
    }

    pub fn aspect(&self) -> Result<f32> {
        self.validate()?;
        Ok(self.width / self.height)
    }
}

/// On-screen pixel footprint of the element a mesh stands in for.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ElementBounds {
    pub width: f32,
    pub height: f32,
}

impl ElementBounds {
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

impl From<ViewportPixelSize> for ElementBounds {
    fn from(v: ViewportPixelSize) -> Self {
        Self::new(v.width, v.height)
    }
}

/// World-space width/height visible at the camera distance.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct VisibleExtents {
    pub width: f32,
    pub height: f32,
}

/// World-space scale applied to a unit plane.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MeshScale {
    pub x: f32,
    pub y: f32,
}

impl Default for MeshScale {
    fn default() -> Self {
        Self { x: 1.0, y: 1.0 }
    }
}

impl MeshScale {
    /// Zero on either axis means the element is detached from layout.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.x == 0.0 || self.y == 0.0
    }
}

pub fn compute_visible_extents(fov_radians: f32, distance: f32, aspect: f32) -> Result<VisibleExtents> {
    if !fov_radians.is_finite() || fov_radians <= 0.0 || fov_radians >= PI {
        return Err(SketchError::FovOutOfRange(fov_radians));
    }
    if !distance.is_finite() || distance <= 0.0 {
        return Err(SketchError::NonPositiveDistance(distance));
    }
    if !aspect.is_finite() || aspect <= 0.0 {
        return Err(SketchError::InvalidAspect(aspect));
    }
    let height = 2.0 * distance * (fov_radians / 2.0).tan();
    Ok(VisibleExtents {
        width: height * aspect,
        height,
    })
}

pub fn compute_mesh_scale(
    bounds: ElementBounds,
    extents: VisibleExtents,
    viewport: ViewportPixelSize,
) -> Result<MeshScale> {
    viewport.validate()?;
    if !(bounds.width.is_finite() && bounds.height.is_finite()) {
        return Err(SketchError::NonFinite("element bounds"));
    }
    if !(extents.width.is_finite() && extents.height.is_finite()) {
        return Err(SketchError::NonFinite("visible extents"));
    }
    // Exact pass-through when the element covers the viewport, so a
    // full-viewport element fills the frustum without rounding drift.
    let x = if bounds.width == viewport.width {
        extents.width
    } else {
        (bounds.width.max(0.0) * extents.width) / viewport.width
    };
    let y = if bounds.height == viewport.height {
        extents.height
    } else {
        (bounds.height.max(0.0) * extents.height) / viewport.height
    };
    Ok(MeshScale { x, y })
}

/// Keeps a mesh scale in sync with the viewport, the camera projection and
/// the tracked element's bounds.
#[derive(Clone, Debug)]
pub struct ViewportMapper {
    fov_radians: f32,
    distance: f32,
    aspect: f32,
    viewport: ViewportPixelSize,
    bounds: ElementBounds,
    extents: VisibleExtents,
    scale: MeshScale,
}

impl ViewportMapper {
    pub fn new(
        fov_radians: f32,
        distance: f32,
        viewport: ViewportPixelSize,
        bounds: ElementBounds,
    ) -> Result<Self> {
        let aspect = viewport.aspect()?;
        let extents = compute_visible_extents(fov_radians, distance, aspect)?;
        let scale = compute_mesh_scale(bounds, extents, viewport)?;
        Ok(Self {
            fov_radians,
            distance,
            aspect,
            viewport,
            bounds,
            extents,
            scale,
        })
    }

    pub fn viewport(&self) -> ViewportPixelSize {
        self.viewport
    }

    pub fn aspect(&self) -> f32 {
        self.aspect
    }

    pub fn extents(&self) -> VisibleExtents {
        self.extents
    }

    /// Last good scale. Never NaN or infinite.
    pub fn scale(&self) -> MeshScale {
        self.scale
    }

    pub fn bounds(&self) -> ElementBounds {
        self.bounds
    }

    pub fn distance(&self) -> f32 {
        self.distance
    }

    /// Apply a viewport resize together with freshly read element bounds.
    pub fn resize(&mut self, viewport: ViewportPixelSize, bounds: ElementBounds) -> Result<MeshScale> {
        let aspect = viewport.aspect()?;
        let extents = compute_visible_extents(self.fov_radians, self.distance, aspect)?;
        let scale = compute_mesh_scale(bounds, extents, viewport)?;
        self.viewport = viewport;
        self.aspect = aspect;
        self.bounds = bounds;
        self.extents = extents;
        self.scale = scale;
        Ok(scale)
    }

    pub fn set_bounds(&mut self, bounds: ElementBounds) -> Result<MeshScale> {
        let scale = compute_mesh_scale(bounds, self.extents, self.viewport)?;
        self.bounds = bounds;
        self.scale = scale;
        Ok(scale)
    }

    pub fn set_distance(&mut self, distance: f32) -> Result<MeshScale> {
        self.set_projection(self.fov_radians, distance)
    }

    pub fn set_projection(&mut self, fov_radians: f32, distance: f32) -> Result<MeshScale> {
        let extents = compute_visible_extents(fov_radians, distance, self.aspect)?;
        let scale = compute_mesh_scale(self.bounds, extents, self.viewport)?;
        self.fov_radians = fov_radians;
        self.distance = distance;
        self.extents = extents;
        self.scale = scale;
        Ok(scale)
    }
}
