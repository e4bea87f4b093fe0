//! File-level run: load an edge image, detect, write both outputs
//!
//! Outputs are written only after every in-memory stage succeeded, so a
//! failed detection never leaves a fresh `result.png` behind. The
//! accumulator image is written first; if writing the result then fails,
//! `accumulator.png` may already exist.

use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use log::{debug, info};

use crate::config::HoughConfig;
use crate::detect_lines;
use crate::error::Result;
use crate::models::LineSet;
use crate::tools::{load_surface, save_surface, vote_stats};

/// Name of the vote space visualization
pub const ACCUMULATOR_FILE: &str = "accumulator.png";
/// Name of the annotated image
pub const RESULT_FILE: &str = "result.png";

/// Summary of one pipeline run
#[derive(Debug, Clone)]
pub struct PipelineReport {
    /// Input width
    pub width: usize,
    /// Input height
    pub height: usize,
    /// Edge pixels that voted
    pub edge_pixels: usize,
    /// Detected lines
    pub lines: LineSet,
    /// Number of marked intersections
    pub intersections: usize,
    /// Where the accumulator was written, if it was
    pub accumulator_path: Option<PathBuf>,
    /// Where the annotated image was written
    pub result_path: PathBuf,
    /// Time spent in detection, excluding file I/O
    pub elapsed: Duration,
}

/// Run detection on the image at `input` and write outputs into `output_dir`
pub fn run(input: &Path, output_dir: &Path, config: &HoughConfig) -> Result<PipelineReport> {
    let image = load_surface(input)?;

    let start = Instant::now();
    let detection = detect_lines(&image, config)?;
    let elapsed = start.elapsed();

    let votes = vote_stats(&detection.accumulator);
    debug!(
        "votes: max={} voted_cells={} saturated_cells={}",
        votes.max, votes.voted_cells, votes.saturated_cells
    );

    let accumulator_path = if config.save_accumulator {
        let path = output_dir.join(ACCUMULATOR_FILE);
        save_surface(detection.accumulator.surface(), &path)?;
        Some(path)
    } else {
        None
    };

    let result_path = output_dir.join(RESULT_FILE);
    save_surface(&detection.result, &result_path)?;

    info!(
        "{}: {} lines, {} intersections in {:.2?}",
        input.display(),
        detection.lines.len(),
        detection.intersections.len(),
        elapsed
    );

    Ok(PipelineReport {
        width: image.width(),
        height: image.height(),
        edge_pixels: detection.edge_pixels,
        intersections: detection.intersections.len(),
        lines: detection.lines,
        accumulator_path,
        result_path,
        elapsed,
    })
}
