//! Hough vote accumulation
//!
//! The accumulator is a [`PixelSurface`] with the same dimensions as the
//! source image. Column `theta_i` samples the angle `pi * theta_i / w`, row
//! `r` holds the offset `rho = (r - h/2) * 2w / h`. Every vote adds one unit
//! of gray, so the red channel is the vote count (capped at 255).

use std::f64::consts::PI;

use log::debug;

use crate::error::{HoughError, Result};
use crate::models::{PixelSurface, Rgb, SurfaceLock};

/// Brightness added per vote
const VOTE: Rgb = Rgb::gray(1);

/// Mapping between (angle, offset) and accumulator cells
///
/// Forward ([`HoughSpace::row_for`]) and inverse ([`HoughSpace::rho_for`])
/// live together; changing one without the other breaks line recovery.
#[derive(Debug, Clone)]
pub struct HoughSpace {
    width: usize,
    height: usize,
    cos_table: Vec<f64>,
    sin_table: Vec<f64>,
}

impl HoughSpace {
    /// Mapping for a `width x height` accumulator
    pub fn new(width: usize, height: usize) -> Self {
        let (cos_table, sin_table) = (0..width)
            .map(|i| {
                let theta = PI * i as f64 / width as f64;
                (theta.cos(), theta.sin())
            })
            .unzip();
        Self {
            width,
            height,
            cos_table,
            sin_table,
        }
    }

    /// Number of angle columns
    pub fn width(&self) -> usize {
        self.width
    }

    /// Number of offset rows
    pub fn height(&self) -> usize {
        self.height
    }

    /// Angle in radians sampled by column `theta_i`
    pub fn theta_for(&self, theta_i: usize) -> f64 {
        PI * theta_i as f64 / self.width as f64
    }

    fn center(&self) -> f64 {
        (self.height / 2) as f64
    }

    /// Row that holds the offset `rho`
    pub fn row_for(&self, rho: f64) -> isize {
        let (w, h) = (self.width as f64, self.height as f64);
        (self.center() + h * rho / (2.0 * w)).round() as isize
    }

    /// Offset held by `row`
    pub fn rho_for(&self, row: usize) -> f64 {
        let (w, h) = (self.width as f64, self.height as f64);
        if h == 0.0 {
            return 0.0;
        }
        (row as f64 - self.center()) * 2.0 * w / h
    }

    /// Row hit by the vote curve of `(x, y)` in column `theta_i`
    pub fn curve_row(&self, theta_i: usize, x: usize, y: usize) -> isize {
        self.row_for(x as f64 * self.cos_table[theta_i] + y as f64 * self.sin_table[theta_i])
    }

    /// Draw the vote curve of edge pixel `(x, y)`
    fn draw_curve(&self, lock: &mut SurfaceLock<'_>, x: usize, y: usize) {
        let mut prev_row = 0isize;

        for theta_i in 0..self.width {
            let row = self.curve_row(theta_i, x, y);
            let column = theta_i as isize;
            lock.blend_add(column, row, VOTE);

            // Fill the rows strictly between consecutive samples so the
            // curve stays connected on steep stretches.
            if theta_i > 0 && (row - prev_row).abs() > 1 {
                let (lo, hi) = if prev_row < row {
                    (prev_row, row)
                } else {
                    (row, prev_row)
                };
                lock.blend_run(column, lo + 1, hi - 1, VOTE);
            }
            prev_row = row;
        }
    }
}

/// Vote space in (angle, offset) coordinates
#[derive(Debug, Clone)]
pub struct Accumulator {
    space: HoughSpace,
    surface: PixelSurface,
}

impl Accumulator {
    /// Create an empty accumulator for a `width x height` source image
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            space: HoughSpace::new(width, height),
            surface: PixelSurface::new(width, height),
        }
    }

    /// Rebuild an accumulator from a previously rendered vote surface
    pub fn from_surface(surface: PixelSurface) -> Self {
        Self {
            space: HoughSpace::new(surface.width(), surface.height()),
            surface,
        }
    }

    /// Create an accumulator sized to `image`
    pub fn for_image(image: &PixelSurface) -> Self {
        Self::new(image.width(), image.height())
    }

    /// Number of angle samples (equals the source width)
    pub fn width(&self) -> usize {
        self.surface.width()
    }

    /// Number of offset rows (equals the source height)
    pub fn height(&self) -> usize {
        self.surface.height()
    }

    /// Cell mapping of this accumulator
    pub fn space(&self) -> &HoughSpace {
        &self.space
    }

    /// Visualization of the vote space
    pub fn surface(&self) -> &PixelSurface {
        &self.surface
    }

    /// Consume the accumulator, keeping its visualization
    pub fn into_surface(self) -> PixelSurface {
        self.surface
    }

    /// Vote count of a cell; zero outside the accumulator
    pub fn votes(&self, theta_i: usize, row: usize) -> u8 {
        if theta_i >= self.width() || row >= self.height() {
            return 0;
        }
        self.surface.get_pixel(theta_i as isize, row as isize).r
    }

    /// Highest vote count in the accumulator
    pub fn max_votes(&self) -> u8 {
        self.surface
            .as_raw()
            .chunks_exact(3)
            .map(|px| px[0])
            .max()
            .unwrap_or(0)
    }
}

/// True for pure black pixels, the edge marker of the input image
pub fn is_edge(color: Rgb) -> bool {
    color.sum() == 0
}

/// Vote for every edge pixel of `source` into `accumulator`
///
/// Returns the number of edge pixels found. The accumulator surface is
/// locked around each curve.
pub fn accumulate(source: &PixelSurface, accumulator: &mut Accumulator) -> Result<usize> {
    if source.width() != accumulator.width() || source.height() != accumulator.height() {
        return Err(HoughError::Initialization(format!(
            "accumulator is {}x{} but source is {}x{}",
            accumulator.width(),
            accumulator.height(),
            source.width(),
            source.height()
        )));
    }

    let Accumulator { space, surface } = accumulator;
    let mut edges = 0usize;
    for y in 0..source.height() {
        for x in 0..source.width() {
            if !is_edge(source.get_pixel(x as isize, y as isize)) {
                continue;
            }
            edges += 1;
            let mut lock = surface.lock()?;
            space.draw_curve(&mut lock, x, y);
        }
    }

    debug!(
        "accumulated {} edge pixels into {}x{} vote space",
        edges,
        source.width(),
        source.height()
    );
    Ok(edges)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn white(width: usize, height: usize) -> PixelSurface {
        PixelSurface::from_raw(width, height, vec![255; width * height * 3]).unwrap()
    }

    #[test]
    fn test_is_edge() {
        assert!(is_edge(Rgb::BLACK));
        assert!(!is_edge(Rgb::new(0, 0, 1)));
        assert!(!is_edge(Rgb::WHITE));
    }

    #[test]
    fn test_mapping_round_trip() {
        let space = HoughSpace::new(100, 100);
        assert_eq!(space.row_for(0.0), 50);
        assert_eq!(space.rho_for(50), 0.0);
        for row in [0usize, 10, 37, 99] {
            assert_eq!(space.row_for(space.rho_for(row)), row as isize);
        }
        assert!((space.theta_for(75) - 0.75 * PI).abs() < 1e-12);
    }

    #[test]
    fn test_no_edges_no_votes() {
        let image = white(100, 100);
        let mut acc = Accumulator::for_image(&image);
        let edges = accumulate(&image, &mut acc).unwrap();
        assert_eq!(edges, 0);
        assert_eq!(acc.max_votes(), 0);
        assert!(acc.surface().as_raw().iter().all(|&v| v == 0));
    }

    #[test]
    fn test_single_pixel_traces_curve() {
        let mut image = white(100, 100);
        image.set_pixel(10, 10, Rgb::BLACK);
        let mut acc = Accumulator::for_image(&image);
        assert_eq!(accumulate(&image, &mut acc).unwrap(), 1);

        for theta_i in 0..100 {
            let theta = PI * theta_i as f64 / 100.0;
            let val = 10.0 * theta.cos() + 10.0 * theta.sin();
            let row = (50.0 + 100.0 * val / 200.0).round() as usize;
            assert_eq!(acc.votes(theta_i, row), 1, "column {theta_i}");
        }
        assert_eq!(acc.max_votes(), 1);
    }

    #[test]
    fn test_gap_fill_keeps_curve_connected() {
        // Curve row = 100 + 95 * cos(theta): steep around pi/2, always in bounds.
        let mut image = white(20, 200);
        image.set_pixel(19, 0, Rgb::BLACK);
        let mut acc = Accumulator::for_image(&image);
        accumulate(&image, &mut acc).unwrap();

        let space = acc.space();
        for theta_i in 1..20 {
            let prev = space.curve_row(theta_i - 1, 19, 0);
            let row = space.curve_row(theta_i, 19, 0);
            assert_eq!(acc.votes(theta_i, row as usize), 1);
            for r in (prev.min(row) + 1)..prev.max(row) {
                assert_eq!(acc.votes(theta_i, r as usize), 1, "gap at column {theta_i} row {r}");
            }
        }
        assert_eq!(acc.votes(0, space.curve_row(0, 19, 0) as usize), 1);
    }

    #[test]
    fn test_collinear_points_peak() {
        let mut image = white(100, 100);
        for i in 0..100 {
            image.set_pixel(i, i, Rgb::BLACK);
        }
        let mut acc = Accumulator::for_image(&image);
        accumulate(&image, &mut acc).unwrap();
        // The line y = x has normal angle 3pi/4 and offset 0.
        assert_eq!(acc.votes(75, 50), 100);
        assert_eq!(acc.max_votes(), 100);
    }

    #[test]
    fn test_votes_saturate() {
        let mut image = white(300, 4);
        for x in 0..300 {
            image.set_pixel(x, 0, Rgb::BLACK);
        }
        let mut acc = Accumulator::for_image(&image);
        accumulate(&image, &mut acc).unwrap();
        assert_eq!(acc.max_votes(), 255);
    }

    #[test]
    fn test_size_mismatch_rejected() {
        let image = white(10, 10);
        let mut acc = Accumulator::new(10, 11);
        assert!(matches!(
            accumulate(&image, &mut acc),
            Err(HoughError::Initialization(_))
        ));
    }
}
