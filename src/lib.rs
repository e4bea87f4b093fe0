//! hough_lines - straight line detection with the classical Hough transform
//!
//! Takes an already edge-detected image (edge pixels are pure black), votes
//! every edge pixel into an (angle, offset) accumulator, turns the brightest
//! local maxima into `y = a*x + b` lines and draws those lines and their
//! pairwise intersections back onto the image.

#![warn(missing_docs)]
#![allow(clippy::missing_docs_in_private_items)]

/// Detection settings
pub mod config;
/// Hough accumulation and peak extraction
pub mod detector;
/// Line and intersection rendering
pub mod drawing;
/// Error type shared by every stage
pub mod error;
/// Core data structures (PixelSurface, Line, LineSet, IntersectionPoint)
pub mod models;
/// File-level orchestration: load, detect, save
pub mod pipeline;
/// Image I/O and summary statistics
pub mod tools;

pub use config::{HoughConfig, LineMapping};
pub use error::{HoughError, Result};
pub use models::{IntersectionPoint, Line, LineSet, PixelSurface, Rgb};

use detector::{Accumulator, accumulate, extract_peaks};
use drawing::{draw_lines, find_intersections, mark_intersections};
use log::info;

/// Everything produced by one detection run
#[derive(Debug, Clone)]
pub struct Detection {
    /// Vote space, same size as the source image
    pub accumulator: Accumulator,
    /// Detected lines, brightest peak first
    pub lines: LineSet,
    /// Pairwise crossings of `lines`
    pub intersections: Vec<IntersectionPoint>,
    /// Source image with lines and intersections drawn on top
    pub result: PixelSurface,
    /// Number of edge pixels that voted
    pub edge_pixels: usize,
}

/// Detect lines in an edge image and render them
///
/// # Arguments
/// * `image` - Edge image, pure black pixels are edges
/// * `config` - Threshold, suppression window and colors
///
/// # Returns
/// The accumulator, the lines, their intersections and the annotated image
pub fn detect_lines(image: &PixelSurface, config: &HoughConfig) -> Result<Detection> {
    if image.width() == 0 || image.height() == 0 {
        return Err(HoughError::Initialization(format!(
            "cannot build an accumulator for a {}x{} image",
            image.width(),
            image.height()
        )));
    }

    // Step 1: Vote
    let mut accumulator = Accumulator::for_image(image);
    let edge_pixels = accumulate(image, &mut accumulator)?;

    // Step 2: Peaks to lines
    let lines = extract_peaks(&accumulator, config);

    // Step 3: Render onto a copy of the source
    let mut result = image.clone();
    draw_lines(&mut result, &lines, config.line_color)?;
    let intersections = find_intersections(&lines);
    mark_intersections(&mut result, &intersections, config.intersection_color)?;

    info!(
        "{} edge pixels -> {} lines, {} intersections",
        edge_pixels,
        lines.len(),
        intersections.len()
    );

    Ok(Detection {
        accumulator,
        lines,
        intersections,
        result,
        edge_pixels,
    })
}

/// Line detector holding its configuration
#[derive(Debug, Clone, Default)]
pub struct LineDetector {
    config: HoughConfig,
}

impl LineDetector {
    /// Create a detector with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a detector with custom settings
    pub fn with_config(config: HoughConfig) -> Self {
        Self { config }
    }

    /// Current settings
    pub fn config(&self) -> &HoughConfig {
        &self.config
    }

    /// Run detection on `image`
    pub fn detect(&self, image: &PixelSurface) -> Result<Detection> {
        detect_lines(image, &self.config)
    }

    /// Run detection and keep only the lines
    pub fn detect_line_set(&self, image: &PixelSurface) -> Result<LineSet> {
        self.detect(image).map(|d| d.lines)
    }
}
