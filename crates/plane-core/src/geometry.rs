//! Vertex data for the shapes the renderer draws. UVs match the ones
//! reported by scene picking (v grows upward).

use crate::scene::Shape;
use glam::Vec3;

#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Vertex {
    pub position: [f32; 3],
    pub uv: [f32; 2],
}

#[derive(Clone, Debug, Default)]
pub struct MeshData {
    pub vertices: Vec<Vertex>,
    pub indices: Vec<u16>,
}

const CORNERS: [[f32; 2]; 4] = [[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 1.0]];

impl MeshData {
    /// Unit plane in XY facing +Z.
    pub fn plane() -> Self {
        let mut mesh = Self::default();
        mesh.push_face(Vec3::ZERO, Vec3::X, Vec3::Y);
        mesh
    }

    /// Unit cube, one quad per face.
    pub fn cube() -> Self {
        // (normal, u axis, v axis); u x v == normal keeps CCW winding outward
        let faces = [
            (Vec3::X, Vec3::NEG_Z, Vec3::Y),
            (Vec3::NEG_X, Vec3::Z, Vec3::Y),
            (Vec3::Y, Vec3::X, Vec3::NEG_Z),
            (Vec3::NEG_Y, Vec3::X, Vec3::Z),
            (Vec3::Z, Vec3::X, Vec3::Y),
            (Vec3::NEG_Z, Vec3::NEG_X, Vec3::Y),
        ];
        let mut mesh = Self::default();
        for (n, u, v) in faces {
            mesh.push_face(n * 0.5, u, v);
        }
        mesh
    }

    /// Low-poly UV sphere for marker objects.
    pub fn sphere(radius: f32, segments: u16, rings: u16) -> Self {
        let segments = segments.max(3);
        let rings = rings.max(2);
        let mut mesh = Self::default();
        for r in 0..=rings {
            let v = r as f32 / rings as f32;
            let phi = v * std::f32::consts::PI;
            for s in 0..=segments {
                let u = s as f32 / segments as f32;
                let theta = u * std::f32::consts::TAU;
                let p = Vec3::new(phi.sin() * theta.sin(), -phi.cos(), phi.sin() * theta.cos()) * radius;
                mesh.vertices.push(Vertex {
                    position: p.to_array(),
                    uv: [u, v],
                });
            }
        }
        let stride = segments + 1;
        for r in 0..rings {
            for s in 0..segments {
                let a = r * stride + s;
                let b = a + stride;
                mesh.indices.extend_from_slice(&[a, a + 1, b + 1, a, b + 1, b]);
            }
        }
        mesh
    }

    pub fn for_shape(shape: Shape) -> Self {
        match shape {
            Shape::Plane => Self::plane(),
            Shape::Cuboid => Self::cube(),
            Shape::Sphere { radius } => Self::sphere(radius, 16, 8),
        }
    }

    fn push_face(&mut self, center: Vec3, u_axis: Vec3, v_axis: Vec3) {
        let base = self.vertices.len() as u16;
        for [u, v] in CORNERS {
            let p = center + u_axis * (u - 0.5) + v_axis * (v - 0.5);
            self.vertices.push(Vertex {
                position: p.to_array(),
                uv: [u, v],
            });
        }
        self.indices
            .extend_from_slice(&[base, base + 1, base + 2, base, base + 2, base + 3]);
    }
}
