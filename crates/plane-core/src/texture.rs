use crate::constants::{PLACEHOLDER_CELLS, PLACEHOLDER_SIZE};
use crate::error::Result;

/// Tightly packed RGBA8 pixels, row-major from the top-left.
#[derive(Clone, Debug)]
pub struct TextureData {
    pub width: u32,
    pub height: u32,
    pub rgba: Vec<u8>,
}

impl TextureData {
    /// Decode a JPEG or PNG.
    pub fn decode(bytes: &[u8]) -> Result<Self> {
        let img = image::load_from_memory(bytes)?.to_rgba8();
        let (width, height) = img.dimensions();
        Ok(Self {
            width,
            height,
            rgba: img.into_raw(),
        })
    }

    pub fn solid(rgba: [u8; 4]) -> Self {
        Self {
            width: 1,
            height: 1,
            rgba: rgba.to_vec(),
        }
    }

    /// Grey checkerboard shown while the real image loads.
    pub fn placeholder() -> Self {
        let size = PLACEHOLDER_SIZE;
        let cell = (size / PLACEHOLDER_CELLS).max(1);
        let mut rgba = Vec::with_capacity((size * size * 4) as usize);
        for y in 0..size {
            for x in 0..size {
                let v = if ((x / cell) + (y / cell)) % 2 == 0 { 0xcc } else { 0x88 };
                rgba.extend_from_slice(&[v, v, v, 0xff]);
            }
        }
        Self {
            width: size,
            height: size,
            rgba,
        }
    }

    #[inline]
    pub fn bytes_per_row(&self) -> u32 {
        self.width * 4
    }
}
