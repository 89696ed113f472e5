//! wgpu renderer shared by the web and native frontends.
//!
//! Draws every object of a [`plane_core::Sketch`] scene with one textured
//! pipeline: uv-mapped meshes sample the media image, the rest sample a
//! white texel and show their tint.

pub mod helpers;
mod renderer;

pub use renderer::GpuState;
