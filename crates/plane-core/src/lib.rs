pub mod camera;
pub mod config;
pub mod constants;
pub mod error;
pub mod frame;
pub mod geometry;
pub mod media;
pub mod pointer;
pub mod scene;
pub mod sketch;
pub mod texture;
pub mod uniforms;
pub mod viewport;

pub static PLANE_WGSL: &str = include_str!("../shaders/plane.wgsl");

pub use camera::*;
pub use config::*;
pub use constants::*;
pub use error::SketchError;
pub use frame::*;
pub use geometry::*;
pub use media::*;
pub use pointer::*;
pub use scene::*;
pub use sketch::*;
pub use texture::*;
pub use uniforms::*;
pub use viewport::*;
