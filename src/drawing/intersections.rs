use log::debug;

use crate::error::Result;
use crate::models::{IntersectionPoint, LineSet, PixelSurface, Rgb};

/// Pairwise crossings of all lines with distinct slopes
///
/// Pairs are visited as `(i, j)` with `i <= j`; equal slopes (parallel,
/// identical or self pairs) are skipped. Coordinates round to the nearest
/// pixel.
pub fn find_intersections(lines: &LineSet) -> Vec<IntersectionPoint> {
    let lines = lines.as_slice();
    let mut points = Vec::new();

    for (i, a) in lines.iter().enumerate() {
        for b in &lines[i..] {
            if a.slope == b.slope {
                continue;
            }
            let x = ((b.intercept - a.intercept) / (a.slope - b.slope)).round();
            let y = a.y_at(x).round();
            if !x.is_finite() || !y.is_finite() {
                continue;
            }
            points.push(IntersectionPoint::new(x as isize, y as isize));
        }
    }

    points
}

/// Paint `points` onto `surface`, overwriting what is there
pub fn mark_intersections(
    surface: &mut PixelSurface,
    points: &[IntersectionPoint],
    color: Rgb,
) -> Result<()> {
    let mut lock = surface.lock()?;
    for p in points {
        lock.set_pixel(p.x, p.y, color);
    }
    debug!("marked {} intersections", points.len());
    Ok(())
}
