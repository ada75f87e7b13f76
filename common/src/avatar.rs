use crate::error::{Error, Result};

/// Black and white bitmap, one bit per pixel.
///
/// Pixels are stored row-major (`index = y * width + x`), packed least
/// significant bit first: pixel `index` lives in bit `index % 8` of byte
/// `index / 8`. The buffer is always exactly `ceil(width * height / 8)` bytes
/// long, and the unused high bits of the last byte are always zero.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Avatar {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
}

/// Validates signed dimensions coming in from callers and returns them along
/// with the packed buffer length
pub(crate) fn checked_dimensions(width: i32, height: i32) -> Result<(u32, u32, usize)> {
    if width <= 0 || height <= 0 {
        return Err(Error::invalid_dimensions(width, height));
    }

    let bits = (width as usize)
        .checked_mul(height as usize)
        .ok_or_else(|| Error::invalid_dimensions(width, height))?;

    Ok((width as u32, height as u32, bits.div_ceil(8)))
}

impl Avatar {
    /// All-black avatar
    pub fn blank(width: i32, height: i32) -> Result<Self> {
        let (width, height, len) = checked_dimensions(width, height)?;
        Ok(Self {
            width,
            height,
            pixels: vec![0; len],
        })
    }

    /// Wraps an already packed buffer. Bits past the last pixel are cleared.
    pub fn from_pixels(width: i32, height: i32, mut pixels: Vec<u8>) -> Result<Self> {
        let (width, height, expected) = checked_dimensions(width, height)?;
        if pixels.len() != expected {
            return Err(Error::InvalidBuffer {
                width,
                height,
                expected,
                actual: pixels.len(),
            });
        }

        let used_bits = (width as usize * height as usize) % 8;
        if used_bits != 0 {
            if let Some(last) = pixels.last_mut() {
                *last &= (1 << used_bits) - 1;
            }
        }

        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// The packed pixel buffer
    #[inline]
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    #[inline]
    fn locate(&self, x: i32, y: i32) -> Option<(usize, u8)> {
        if x < 0 || y < 0 || x as u32 >= self.width || y as u32 >= self.height {
            return None;
        }

        let idx = y as usize * self.width as usize + x as usize;
        Some((idx / 8, 1 << (idx % 8)))
    }

    /// Reads the pixel at `(x, y)`. Anything outside the bitmap reads as black.
    pub fn get(&self, x: i32, y: i32) -> bool {
        self.locate(x, y)
            .is_some_and(|(byte_idx, mask)| self.pixels[byte_idx] & mask != 0)
    }

    /// Writes the pixel at `(x, y)`. Writes outside the bitmap are dropped.
    pub fn set(&mut self, x: i32, y: i32, value: bool) {
        let Some((byte_idx, mask)) = self.locate(x, y) else {
            return;
        };

        if value {
            self.pixels[byte_idx] |= mask;
        } else {
            self.pixels[byte_idx] &= !mask;
        }
    }

    /// Iterates over the rows top to bottom, each row left to right
    pub fn rows(&self) -> impl Iterator<Item = impl Iterator<Item = bool> + '_> + '_ {
        (0..self.height as i32)
            .map(move |y| (0..self.width as i32).map(move |x| self.get(x, y)))
    }
}
