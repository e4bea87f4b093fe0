//! Image file glue and summary statistics used by the binary and tests

use std::path::Path;

use image::RgbImage;
use log::debug;

use crate::detector::{Accumulator, is_edge};
use crate::error::{HoughError, Result};
use crate::models::PixelSurface;

/// Load any image format the `image` crate understands as a 24-bit RGB surface
pub fn load_surface<P: AsRef<Path>>(path: P) -> Result<PixelSurface> {
    let path = path.as_ref();
    let img = image::open(path).map_err(|source| HoughError::ImageLoad {
        path: path.to_path_buf(),
        source,
    })?;
    let rgb = img.to_rgb8();
    let (width, height) = rgb.dimensions();
    debug!("loaded {} ({}x{})", path.display(), width, height);
    PixelSurface::from_raw(width as usize, height as usize, rgb.into_raw())
}

/// Encode a surface to `path`; the format follows the file extension
pub fn save_surface<P: AsRef<Path>>(surface: &PixelSurface, path: P) -> Result<()> {
    let path = path.as_ref();
    let img = RgbImage::from_raw(
        surface.width() as u32,
        surface.height() as u32,
        surface.as_raw().to_vec(),
    )
    .ok_or_else(|| {
        HoughError::Initialization(format!(
            "surface {}x{} does not fit an RGB image",
            surface.width(),
            surface.height()
        ))
    })?;
    img.save(path).map_err(|source| HoughError::ImageSave {
        path: path.to_path_buf(),
        source,
    })?;
    debug!("wrote {}", path.display());
    Ok(())
}

/// Edge pixel counts of a source image
#[derive(Debug, Clone, Copy)]
pub struct EdgeStats {
    /// Count of pure black pixels
    pub edge_pixels: usize,
    /// Total pixels in the image
    pub total_pixels: usize,
    /// Ratio of edge pixels to total pixels
    pub edge_ratio: f64,
}

/// Vote distribution of an accumulator
#[derive(Debug, Clone, Copy)]
pub struct VoteStats {
    /// Highest vote count
    pub max: u8,
    /// Cells with at least one vote
    pub voted_cells: usize,
    /// Cells at the 255 cap
    pub saturated_cells: usize,
}

/// Count edge pixels in `image`
pub fn edge_stats(image: &PixelSurface) -> EdgeStats {
    let mut edges = 0usize;
    for y in 0..image.height() as isize {
        for x in 0..image.width() as isize {
            if is_edge(image.get_pixel(x, y)) {
                edges += 1;
            }
        }
    }
    let total = image.width() * image.height();
    let ratio = if total == 0 {
        0.0
    } else {
        edges as f64 / total as f64
    };
    EdgeStats {
        edge_pixels: edges,
        total_pixels: total,
        edge_ratio: ratio,
    }
}

/// Summarize votes in `acc`
pub fn vote_stats(acc: &Accumulator) -> VoteStats {
    let mut stats = VoteStats {
        max: 0,
        voted_cells: 0,
        saturated_cells: 0,
    };
    for px in acc.surface().as_raw().chunks_exact(3) {
        let votes = px[0];
        stats.max = stats.max.max(votes);
        if votes > 0 {
            stats.voted_cells += 1;
        }
        if votes == u8::MAX {
            stats.saturated_cells += 1;
        }
    }
    stats
}
