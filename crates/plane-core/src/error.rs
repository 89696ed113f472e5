use thiserror::Error;

/// Failures surfaced by the viewport/pointer math and asset decoding.
///
/// None of these are fatal to a running sketch: the stateful wrappers log
/// them and keep rendering with their last good values.
#[derive(Debug, Error)]
pub enum SketchError {
    #[error("viewport has no area ({width}x{height})")]
    DegenerateViewport { width: f32, height: f32 },
    #[error("field of view {0} rad is outside (0, pi)")]
    FovOutOfRange(f32),
    #[error("camera distance {0} must be positive")]
    NonPositiveDistance(f32),
    #[error("aspect ratio {0} must be positive")]
    InvalidAspect(f32),
    #[error("non-finite {0}")]
    NonFinite(&'static str),
    #[error("unknown mesh id {0}")]
    UnknownMesh(u32),
    #[error("image decode failed: {0}")]
    Decode(#[from] image::ImageError),
}

pub type Result<T> = std::result::Result<T, SketchError>;
