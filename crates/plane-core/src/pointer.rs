//! Pointer mapping: screen pixels to device coordinates, a camera ray, the
//! nearest scene hit, and finally a UV on the tracked mesh.

use crate::camera::PerspectiveCamera;
use crate::error::Result;
use crate::scene::{Hit, MeshId, Scene};
use crate::viewport::ViewportPixelSize;
use glam::Vec2;

/// Screen pixels (origin top-left, Y down) to NDC in \[-1, 1\] (Y up).
#[inline]
pub fn to_device_coordinates(screen: Vec2, viewport: ViewportPixelSize) -> Result<Vec2> {
    viewport.validate()?;
    let x = (screen.x / viewport.width) * 2.0 - 1.0;
    let y = -((screen.y / viewport.height) * 2.0 - 1.0);
    Ok(Vec2::new(x, y))
}

/// Cast a ray from the camera through `ndc` and return the nearest hit.
pub fn intersect(ndc: Vec2, camera: &PerspectiveCamera, scene: &Scene) -> Option<Hit> {
    if !ndc.is_finite() {
        return None;
    }
    scene.intersect(&camera.ray_from_ndc(ndc))
}

/// Forwards pointer UVs for a single tracked mesh.
///
/// Holds nothing but the tracked id; camera and scene are borrowed per call.
#[derive(Clone, Copy, Debug)]
pub struct PointerMapper {
    tracked: MeshId,
}

impl PointerMapper {
    pub fn new(tracked: MeshId) -> Self {
        Self { tracked }
    }

    pub fn tracked(&self) -> MeshId {
        self.tracked
    }

    pub fn track(&mut self, id: MeshId) {
        self.tracked = id;
    }

    /// UV to forward for this hit, if it qualifies: the nearest object is
    /// the tracked mesh itself and it reported texture coordinates.
    #[inline]
    pub fn qualify(&self, hit: Option<Hit>) -> Option<Vec2> {
        let hit = hit?;
        if !hit.object.is_mesh(self.tracked) {
            return None;
        }
        hit.uv
    }

    /// Full pipeline for one pointer-move sample.
    pub fn pick(
        &self,
        screen: Vec2,
        viewport: ViewportPixelSize,
        camera: &PerspectiveCamera,
        scene: &Scene,
    ) -> Option<Vec2> {
        let ndc = match to_device_coordinates(screen, viewport) {
            Ok(ndc) => ndc,
            Err(e) => {
                log::debug!("[pointer] ignoring sample: {e}");
                return None;
            }
        };
        self.qualify(intersect(ndc, camera, scene))
    }

    /// Like [`PointerMapper::pick`], invoking `on_uv` only for qualifying hits.
    pub fn dispatch(
        &self,
        screen: Vec2,
        viewport: ViewportPixelSize,
        camera: &PerspectiveCamera,
        scene: &Scene,
        mut on_uv: impl FnMut(Vec2),
    ) -> bool {
        match self.pick(screen, viewport, camera, scene) {
            Some(uv) => {
                on_uv(uv);
                true
            }
            None => false,
        }
    }
}
