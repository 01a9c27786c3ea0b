use pocketgb_common::Color;

use crate::{SCREEN_HEIGHT, SCREEN_WIDTH};

const BYTES_PER_PIXEL: usize = 3;

/// 160×144 RGB24 pixel grid, row-major.
#[derive(Clone, Eq, PartialEq)]
pub struct Framebuffer {
    pixels: Vec<u8>,
}

impl Default for Framebuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Framebuffer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Framebuffer")
            .field("width", &SCREEN_WIDTH)
            .field("height", &SCREEN_HEIGHT)
            .finish()
    }
}

impl Framebuffer {
    /// A white frame.
    pub fn new() -> Self {
        Self {
            pixels: vec![0xFF; SCREEN_WIDTH * SCREEN_HEIGHT * BYTES_PER_PIXEL],
        }
    }

    pub fn clear(&mut self, color: Color) {
        for pixel in self.pixels.chunks_exact_mut(BYTES_PER_PIXEL) {
            pixel.copy_from_slice(&color.to_array());
        }
    }

    #[inline]
    fn offset(x: usize, y: usize) -> usize {
        debug_assert!(x < SCREEN_WIDTH && y < SCREEN_HEIGHT);
        (y * SCREEN_WIDTH + x) * BYTES_PER_PIXEL
    }

    pub fn pixel(&self, x: usize, y: usize) -> Color {
        let idx = Self::offset(x, y);
        Color::new_rgb(self.pixels[idx], self.pixels[idx + 1], self.pixels[idx + 2])
    }

    pub fn set_pixel(&mut self, x: usize, y: usize, color: Color) {
        let idx = Self::offset(x, y);
        self.pixels[idx..idx + BYTES_PER_PIXEL].copy_from_slice(&color.to_array());
    }

    /// One scanline as packed RGB24 bytes.
    pub fn row(&self, y: usize) -> &[u8] {
        let start = Self::offset(0, y);
        &self.pixels[start..start + SCREEN_WIDTH * BYTES_PER_PIXEL]
    }

    /// The whole frame as packed RGB24 bytes (`R, G, B` per pixel).
    pub fn as_rgb24(&self) -> &[u8] {
        &self.pixels
    }
}
