use log::trace;

use crate::error::{HoughError, Result};

/// 24-bit RGB color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rgb {
    /// Red channel
    pub r: u8,
    /// Green channel
    pub g: u8,
    /// Blue channel
    pub b: u8,
}

impl Rgb {
    /// Background color, returned for reads outside a surface
    pub const BLACK: Rgb = Rgb::new(0, 0, 0);
    /// Pure white
    pub const WHITE: Rgb = Rgb::new(255, 255, 255);
    /// Default highlight for reconstructed lines
    pub const RED: Rgb = Rgb::new(255, 0, 0);
    /// Default highlight for intersection points
    pub const GREEN: Rgb = Rgb::new(0, 255, 0);

    /// Create a color from its channels
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Color with all three channels set to `v`
    pub const fn gray(v: u8) -> Self {
        Self { r: v, g: v, b: v }
    }

    /// Channel-wise addition, each channel capped at 255
    pub fn saturating_add(self, other: Rgb) -> Rgb {
        Rgb {
            r: self.r.saturating_add(other.r),
            g: self.g.saturating_add(other.g),
            b: self.b.saturating_add(other.b),
        }
    }

    /// Sum of the three channels
    pub fn sum(self) -> u32 {
        self.r as u32 + self.g as u32 + self.b as u32
    }
}

/// Owned, row-major RGB pixel buffer
///
/// Coordinates are signed so callers can pass raw rasterization results;
/// anything outside `[0, width) x [0, height)` reads as [`Rgb::BLACK`] and
/// is ignored on write.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelSurface {
    width: usize,
    height: usize,
    data: Vec<u8>,
}

impl PixelSurface {
    /// Create a zero-filled (black) surface
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            data: vec![0; width * height * 3],
        }
    }

    /// Wrap an existing RGB buffer (3 bytes per pixel, row-major)
    pub fn from_raw(width: usize, height: usize, data: Vec<u8>) -> Result<Self> {
        let expected = width
            .checked_mul(height)
            .and_then(|n| n.checked_mul(3))
            .ok_or_else(|| {
                HoughError::Initialization(format!("surface {width}x{height} is too large"))
            })?;
        if data.len() != expected {
            return Err(HoughError::Initialization(format!(
                "buffer for {width}x{height} surface has {} bytes, expected {expected}",
                data.len()
            )));
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// Surface width
    pub fn width(&self) -> usize {
        self.width
    }

    /// Surface height
    pub fn height(&self) -> usize {
        self.height
    }

    /// Raw RGB bytes
    pub fn as_raw(&self) -> &[u8] {
        &self.data
    }

    /// Consume the surface and return its RGB bytes
    pub fn into_raw(self) -> Vec<u8> {
        self.data
    }

    fn index(&self, x: isize, y: isize) -> Option<usize> {
        if x < 0 || y < 0 {
            return None;
        }
        let (x, y) = (x as usize, y as usize);
        if x >= self.width || y >= self.height {
            return None;
        }
        Some((y * self.width + x) * 3)
    }

    /// Read a pixel; out of bounds yields the background color
    pub fn get_pixel(&self, x: isize, y: isize) -> Rgb {
        match self.index(x, y) {
            Some(i) => Rgb::new(self.data[i], self.data[i + 1], self.data[i + 2]),
            None => Rgb::BLACK,
        }
    }

    /// Overwrite a pixel; out of bounds is a no-op
    pub fn set_pixel(&mut self, x: isize, y: isize, color: Rgb) {
        if let Some(i) = self.index(x, y) {
            self.data[i] = color.r;
            self.data[i + 1] = color.g;
            self.data[i + 2] = color.b;
        }
    }

    /// Add `color` to a pixel, saturating each channel at 255
    pub fn blend_add(&mut self, x: isize, y: isize, color: Rgb) {
        if self.index(x, y).is_some() {
            let current = self.get_pixel(x, y);
            self.set_pixel(x, y, current.saturating_add(color));
        }
    }

    /// Mark the scope of a block of pixel writes
    ///
    /// Exclusivity comes from the `&mut` borrow, and the guard only delimits
    /// the write scope, released on drop. Every constructor sizes the buffer
    /// to `width * height * 3` and the buffer is private, so the length check
    /// below is an invariant assertion: [`HoughError::ResourceLock`] is never
    /// returned for a surface built through this API.
    pub fn lock(&mut self) -> Result<SurfaceLock<'_>> {
        if self.data.len() != self.width * self.height * 3 {
            return Err(HoughError::ResourceLock(format!(
                "{}x{} surface holds {} bytes",
                self.width,
                self.height,
                self.data.len()
            )));
        }
        trace!("lock {}x{} surface", self.width, self.height);
        Ok(SurfaceLock { surface: self })
    }
}

/// Scoped write access to a [`PixelSurface`]
pub struct SurfaceLock<'a> {
    surface: &'a mut PixelSurface,
}

impl SurfaceLock<'_> {
    /// See [`PixelSurface::set_pixel`]
    pub fn set_pixel(&mut self, x: isize, y: isize, color: Rgb) {
        self.surface.set_pixel(x, y, color);
    }

    /// See [`PixelSurface::blend_add`]
    pub fn blend_add(&mut self, x: isize, y: isize, color: Rgb) {
        self.surface.blend_add(x, y, color);
    }

    /// Blend `color` into column `x` from row `from` to row `to`, both inclusive
    pub fn blend_run(&mut self, x: isize, from: isize, to: isize, color: Rgb) {
        let (lo, hi) = if from <= to { (from, to) } else { (to, from) };
        // Clip so huge runs never walk rows that cannot exist.
        let lo = lo.max(0);
        let hi = hi.min(self.surface.height as isize - 1);
        for y in lo..=hi {
            self.surface.blend_add(x, y, color);
        }
    }
}

impl Drop for SurfaceLock<'_> {
    fn drop(&mut self) {
        trace!("unlock {}x{} surface", self.surface.width, self.surface.height);
    }
}
