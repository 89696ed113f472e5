//! The tracked media plane and the cover fit that maps its image.

use crate::scene::MeshId;
use crate::viewport::ElementBounds;
use glam::Vec2;

/// `uv' = uv * scale + offset`, applied in the plane shader.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct UvTransform {
    pub scale: Vec2,
    pub offset: Vec2,
}

impl UvTransform {
    pub const IDENTITY: Self = Self {
        scale: Vec2::ONE,
        offset: Vec2::ZERO,
    };

    #[inline]
    pub fn apply(&self, uv: Vec2) -> Vec2 {
        uv * self.scale + self.offset
    }
}

impl Default for UvTransform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

fn usable(v: Vec2) -> bool {
    v.is_finite() && v.x > 0.0 && v.y > 0.0
}

/// Fill `container` with an image of resolution `image`, preserving the
/// image aspect and cropping the overflow evenly on the long axis.
pub fn cover_uv_transform(container: Vec2, image: Vec2) -> UvTransform {
    if !usable(container) || !usable(image) {
        return UvTransform::IDENTITY;
    }
    let container_ratio = container.x / container.y;
    let image_ratio = image.x / image.y;
    let scale = Vec2::new(
        (container_ratio / image_ratio).min(1.0),
        (image_ratio / container_ratio).min(1.0),
    );
    UvTransform {
        scale,
        offset: (Vec2::ONE - scale) * 0.5,
    }
}

#[derive(Clone, Debug)]
pub struct MediaPlane {
    mesh: MeshId,
    image_resolution: Option<Vec2>,
}

impl MediaPlane {
    pub fn new(mesh: MeshId) -> Self {
        Self {
            mesh,
            image_resolution: None,
        }
    }

    pub fn mesh(&self) -> MeshId {
        self.mesh
    }

    pub fn image_resolution(&self) -> Option<Vec2> {
        self.image_resolution
    }

    pub fn set_image_resolution(&mut self, width: u32, height: u32) {
        self.image_resolution = (width > 0 && height > 0).then(|| Vec2::new(width as f32, height as f32));
    }

    /// Cover fit against the element the plane stands in for.
    pub fn uv_transform(&self, bounds: ElementBounds) -> UvTransform {
        match self.image_resolution {
            Some(image) => cover_uv_transform(Vec2::new(bounds.width, bounds.height), image),
            None => UvTransform::IDENTITY,
        }
    }
}
