//! Minimal scene graph for picking: stable ids, shapes, transforms, and
//! ray intersection with UV lookup.

use crate::camera::Ray;
use crate::error::{Result, SketchError};
use crate::viewport::MeshScale;
use glam::{Mat4, Quat, Vec2, Vec3};

/// Stable identifier handed out by [`Scene`]. Two visually identical meshes
/// never share one.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MeshId(u32);

/// What a ray hit, compared by identity.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Intersectable {
    Mesh(MeshId),
    Other(MeshId),
}

impl Intersectable {
    pub fn id(self) -> MeshId {
        match self {
            Intersectable::Mesh(id) | Intersectable::Other(id) => id,
        }
    }

    #[inline]
    pub fn is_mesh(self, id: MeshId) -> bool {
        self == Intersectable::Mesh(id)
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Shape {
    /// Unit plane in local XY facing +Z.
    Plane,
    /// Unit cube centered on the origin.
    Cuboid,
    Sphere { radius: f32 },
}

/// Decomposed object transform. Kept in parts so a collapsed scale can be
/// restored later without losing the rotation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Transform {
    pub translation: Vec3,
    pub rotation: Quat,
    pub scale: Vec3,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            translation: Vec3::ZERO,
            rotation: Quat::IDENTITY,
            scale: Vec3::ONE,
        }
    }
}

impl Transform {
    pub fn from_translation(translation: Vec3) -> Self {
        Self {
            translation,
            ..Self::default()
        }
    }

    pub fn with_scale(mut self, scale: Vec3) -> Self {
        self.scale = scale;
        self
    }

    pub fn matrix(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(self.scale, self.rotation, self.translation)
    }
}

#[derive(Clone, Debug)]
pub struct SceneObject {
    pub kind: Intersectable,
    pub shape: Shape,
    pub transform: Transform,
    /// Whether hits report texture coordinates.
    pub uv_mapped: bool,
    pub tint: [f32; 4],
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Hit {
    pub object: Intersectable,
    /// Distance from the ray origin in world units.
    pub distance: f32,
    pub point: Vec3,
    pub uv: Option<Vec2>,
}

#[derive(Default, Clone, Debug)]
pub struct Scene {
    objects: Vec<SceneObject>,
    next_id: u32,
}

const WHITE: [f32; 4] = [1.0, 1.0, 1.0, 1.0];

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    fn push(
        &mut self,
        kind: fn(MeshId) -> Intersectable,
        shape: Shape,
        transform: Transform,
        uv_mapped: bool,
        tint: [f32; 4],
    ) -> MeshId {
        let id = MeshId(self.next_id);
        self.next_id += 1;
        self.objects.push(SceneObject {
            kind: kind(id),
            shape,
            transform,
            uv_mapped,
            tint,
        });
        id
    }

    pub fn add_plane(&mut self, transform: Transform, uv_mapped: bool) -> MeshId {
        self.push(Intersectable::Mesh, Shape::Plane, transform, uv_mapped, WHITE)
    }

    pub fn add_cuboid(&mut self, transform: Transform, uv_mapped: bool, tint: [f32; 4]) -> MeshId {
        self.push(Intersectable::Mesh, Shape::Cuboid, transform, uv_mapped, tint)
    }

    /// Non-mesh helper object. Blocks rays but never counts as a mesh.
    pub fn add_marker(&mut self, center: Vec3, radius: f32) -> MeshId {
        self.push(
            Intersectable::Other,
            Shape::Sphere { radius },
            Transform::from_translation(center),
            false,
            WHITE,
        )
    }

    pub fn objects(&self) -> &[SceneObject] {
        &self.objects
    }

    pub fn object(&self, id: MeshId) -> Option<&SceneObject> {
        self.objects.iter().find(|o| o.kind.id() == id)
    }

    fn object_mut(&mut self, id: MeshId) -> Result<&mut SceneObject> {
        self.objects
            .iter_mut()
            .find(|o| o.kind.id() == id)
            .ok_or(SketchError::UnknownMesh(id.0))
    }

    pub fn set_transform(&mut self, id: MeshId, transform: Transform) -> Result<()> {
        self.object_mut(id)?.transform = transform;
        Ok(())
    }

    /// Replace the XY scale of an object, keeping its rotation/translation.
    pub fn set_scale(&mut self, id: MeshId, scale: MeshScale) -> Result<()> {
        let t = &mut self.object_mut(id)?.transform;
        t.scale.x = scale.x;
        t.scale.y = scale.y;
        Ok(())
    }

    pub fn remove(&mut self, id: MeshId) -> Result<SceneObject> {
        let idx = self
            .objects
            .iter()
            .position(|o| o.kind.id() == id)
            .ok_or(SketchError::UnknownMesh(id.0))?;
        Ok(self.objects.remove(idx))
    }

    /// Nearest hit along the ray, if any.
    pub fn intersect(&self, ray: &Ray) -> Option<Hit> {
        let mut best: Option<Hit> = None;
        for obj in &self.objects {
            if let Some(hit) = intersect_object(obj, ray) {
                match best {
                    Some(b) if hit.distance >= b.distance => {}
                    _ => best = Some(hit),
                }
            }
        }
        best
    }
}

fn intersect_object(obj: &SceneObject, ray: &Ray) -> Option<Hit> {
    // Zero scale (detached element) collapses the matrix; nothing to hit.
    let model = obj.transform.matrix();
    if model.determinant().abs() < 1e-12 {
        return None;
    }
    let inv = model.inverse();
    let local_origin = inv.transform_point3(ray.origin);
    let local_dir = inv.transform_vector3(ray.direction);

    let (t_local, uv) = match obj.shape {
        Shape::Plane => plane_local(local_origin, local_dir)?,
        Shape::Cuboid => cuboid_local(local_origin, local_dir)?,
        Shape::Sphere { radius } => (ray_sphere(local_origin, local_dir, Vec3::ZERO, radius)?, None),
    };

    let point = model.transform_point3(local_origin + local_dir * t_local);
    let distance = (point - ray.origin).dot(ray.direction);
    if distance < 0.0 {
        return None;
    }
    Some(Hit {
        object: obj.kind,
        distance,
        point,
        uv: if obj.uv_mapped { uv } else { None },
    })
}

fn plane_local(o: Vec3, d: Vec3) -> Option<(f32, Option<Vec2>)> {
    if d.z.abs() < 1e-8 {
        return None;
    }
    let t = -o.z / d.z;
    if t < 0.0 {
        return None;
    }
    let p = o + d * t;
    if p.x.abs() > 0.5 || p.y.abs() > 0.5 {
        return None;
    }
    Some((t, Some(Vec2::new(p.x + 0.5, p.y + 0.5))))
}

fn cuboid_local(o: Vec3, d: Vec3) -> Option<(f32, Option<Vec2>)> {
    let mut t_min = f32::NEG_INFINITY;
    let mut t_max = f32::INFINITY;
    for axis in 0..3 {
        if d[axis].abs() < 1e-8 {
            if o[axis].abs() > 0.5 {
                return None;
            }
            continue;
        }
        let inv = 1.0 / d[axis];
        let mut t0 = (-0.5 - o[axis]) * inv;
        let mut t1 = (0.5 - o[axis]) * inv;
        if t0 > t1 {
            std::mem::swap(&mut t0, &mut t1);
        }
        t_min = t_min.max(t0);
        t_max = t_max.min(t1);
        if t_min > t_max {
            return None;
        }
    }
    let t = if t_min >= 0.0 { t_min } else { t_max };
    if t < 0.0 {
        return None;
    }
    let p = o + d * t;
    Some((t, Some(cube_face_uv(p))))
}

/// Box unwrapping: each face maps its own square to \[0, 1\]^2 with v up.
fn cube_face_uv(p: Vec3) -> Vec2 {
    let a = p.abs();
    if a.x >= a.y && a.x >= a.z {
        if p.x > 0.0 {
            Vec2::new(0.5 - p.z, p.y + 0.5)
        } else {
            Vec2::new(p.z + 0.5, p.y + 0.5)
        }
    } else if a.y >= a.z {
        if p.y > 0.0 {
            Vec2::new(p.x + 0.5, 0.5 - p.z)
        } else {
            Vec2::new(p.x + 0.5, p.z + 0.5)
        }
    } else if p.z > 0.0 {
        Vec2::new(p.x + 0.5, p.y + 0.5)
    } else {
        Vec2::new(0.5 - p.x, p.y + 0.5)
    }
}

/// Smallest non-negative `t` where the ray meets the sphere. `dir` need not
/// be normalized.
#[inline]
pub fn ray_sphere(origin: Vec3, dir: Vec3, center: Vec3, radius: f32) -> Option<f32> {
    let a = dir.dot(dir);
    if a == 0.0 {
        return None;
    }
    let oc = origin - center;
    let b = oc.dot(dir);
    let c = oc.dot(oc) - radius * radius;
    let disc = b * b - a * c;
    if disc < 0.0 {
        return None;
    }
    let sq = disc.sqrt();
    let t0 = (-b - sq) / a;
    let t1 = (-b + sq) / a;
    if t0 >= 0.0 {
        Some(t0)
    } else if t1 >= 0.0 {
        Some(t1)
    } else {
        None
    }
}
