//! Pixel buffers and the opacity sampler
//!
//! Collision and paddle cutting both read per-pixel alpha out of packed
//! 32-bit RGBA buffers. Paddles own a mutable buffer (eroded by cuts,
//! restored on heal); ball sprites are immutable. The host normally supplies
//! decoded artwork; the procedural constructors here produce equivalent
//! buffers for headless runs and tests.

use serde::{Deserialize, Serialize};

use super::rect::Rect;

/// Bits to right-shift a packed pixel to reach the alpha channel
pub const ALPHA_SHIFT: u32 = 24;

/// Pack an RGBA color into the buffer's pixel layout (alpha in the top byte,
/// red in the low byte; bytes read R,G,B,A on little-endian hosts)
#[inline]
pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> u32 {
    ((a as u32) << ALPHA_SHIFT) | ((b as u32) << 16) | ((g as u32) << 8) | (r as u32)
}

/// A packed 32-bit-per-pixel RGBA image with row-major layout and a stride
/// of exactly `width` pixels per row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PixelBuffer {
    width: i32,
    height: i32,
    pixels: Vec<u32>,
}

impl PixelBuffer {
    /// Fully transparent buffer
    pub fn new(width: i32, height: i32) -> Self {
        Self::filled(width, height, 0)
    }

    /// Buffer filled with a single packed pixel value
    pub fn filled(width: i32, height: i32, pixel: u32) -> Self {
        assert!(width > 0 && height > 0, "degenerate pixel buffer");
        Self {
            width,
            height,
            pixels: vec![pixel; (width * height) as usize],
        }
    }

    pub const fn width(&self) -> i32 {
        self.width
    }

    pub const fn height(&self) -> i32 {
        self.height
    }

    /// Alpha channel of the pixel at (x, y). The caller guarantees the
    /// coordinate is in bounds; an out-of-range read is a contract
    /// violation and panics on the slice index.
    #[inline]
    pub fn alpha(&self, x: i32, y: i32) -> u8 {
        (self.pixels[(x + y * self.width) as usize] >> ALPHA_SHIFT) as u8
    }

    #[inline]
    pub fn set_pixel(&mut self, x: i32, y: i32, pixel: u32) {
        self.pixels[(x + y * self.width) as usize] = pixel;
    }

    /// Overwrite every pixel inside `r` (clipped to the buffer) with `pixel`
    pub fn fill_rect(&mut self, r: Rect, pixel: u32) {
        let Some(clipped) = r.intersect(&Rect::new(0, 0, self.width, self.height)) else {
            return;
        };
        for y in clipped.y..clipped.bottom() {
            let row = (y * self.width) as usize;
            self.pixels[row + clipped.x as usize..row + clipped.right() as usize].fill(pixel);
        }
    }

    /// Restore this buffer's content from a same-sized template
    pub fn copy_from(&mut self, template: &PixelBuffer) {
        assert_eq!(
            (self.width, self.height),
            (template.width, template.height),
            "template dimensions must match"
        );
        self.pixels.copy_from_slice(&template.pixels);
    }

    /// Raw bytes for texture upload; rows are `width * 4` bytes with no padding
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.pixels)
    }

    /// Procedural ball sprite: a fully opaque disc of the given radius in a
    /// (2r)×(2r) buffer, transparent corners
    pub fn disc(radius: f32, color: u32) -> Self {
        let side = crate::round_half_up(radius * 2.0);
        let mut buf = Self::new(side, side);
        for y in 0..side {
            for x in 0..side {
                let dx = x as f32 + 0.5 - radius;
                let dy = y as f32 + 0.5 - radius;
                if dx * dx + dy * dy <= radius * radius {
                    buf.set_pixel(x, y, color);
                }
            }
        }
        buf
    }
}
