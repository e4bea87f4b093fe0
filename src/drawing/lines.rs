use log::debug;

use crate::error::Result;
use crate::models::{Line, LineSet, PixelSurface, Rgb, SurfaceLock};

/// Rasterize one line across the full surface width
///
/// Each column gets a 3 pixel horizontal stroke centered on
/// `y = slope * x + intercept`. Pixels are overwritten, not blended.
pub fn draw_line(lock: &mut SurfaceLock<'_>, width: usize, line: &Line, color: Rgb) {
    for x in 0..width {
        let y = line.y_at(x as f64);
        if !y.is_finite() {
            continue;
        }
        let (x, y) = (x as isize, y.round() as isize);
        lock.set_pixel(x, y, color);
        lock.set_pixel(x + 1, y, color);
        lock.set_pixel(x - 1, y, color);
    }
}

/// Draw every line of `lines` onto `surface`, locking it once per line
pub fn draw_lines(surface: &mut PixelSurface, lines: &LineSet, color: Rgb) -> Result<()> {
    let width = surface.width();
    for line in lines {
        let mut lock = surface.lock()?;
        draw_line(&mut lock, width, line, color);
    }
    debug!("drew {} lines", lines.len());
    Ok(())
}
