//! Detection settings
//!
//! Defaults reproduce the stock behavior of the `houghlines` tool; library
//! callers tune them through the `with_*` setters.

use crate::models::Rgb;

/// How an accumulator cell is turned back into `y = a*x + b`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LineMapping {
    /// Geometric inverse of the accumulation mapping
    #[default]
    Exact,
    /// Hand-tuned scale/offset constants from the first version of the tool
    Empirical,
}

/// Settings for accumulation, peak extraction and rendering
#[derive(Debug, Clone, PartialEq)]
pub struct HoughConfig {
    /// A cell is a peak candidate only if its votes are strictly above this
    pub vote_threshold: u8,
    /// Upper bound on the number of returned lines
    pub max_lines: usize,
    /// Half-width of the suppression window along the angle axis
    pub nms_theta_radius: usize,
    /// Half-width of the suppression window along the offset axis
    pub nms_row_radius: usize,
    /// Cell to line conversion
    pub mapping: LineMapping,
    /// Stroke color of reconstructed lines
    pub line_color: Rgb,
    /// Marker color of intersection points
    pub intersection_color: Rgb,
    /// Write `accumulator.png` next to `result.png`
    pub save_accumulator: bool,
}

impl Default for HoughConfig {
    fn default() -> Self {
        Self {
            vote_threshold: 250,
            max_lines: 100,
            nms_theta_radius: 5,
            nms_row_radius: 5,
            mapping: LineMapping::Exact,
            line_color: Rgb::RED,
            intersection_color: Rgb::GREEN,
            save_accumulator: true,
        }
    }
}

impl HoughConfig {
    /// Set the vote threshold
    pub fn with_vote_threshold(mut self, threshold: u8) -> Self {
        self.vote_threshold = threshold;
        self
    }

    /// Set the maximum number of lines
    pub fn with_max_lines(mut self, max_lines: usize) -> Self {
        self.max_lines = max_lines;
        self
    }

    /// Set both suppression window half-widths
    pub fn with_nms_window(mut self, theta_radius: usize, row_radius: usize) -> Self {
        self.nms_theta_radius = theta_radius;
        self.nms_row_radius = row_radius;
        self
    }

    /// Choose the cell to line conversion
    pub fn with_mapping(mut self, mapping: LineMapping) -> Self {
        self.mapping = mapping;
        self
    }

    /// Set line and intersection highlight colors
    pub fn with_colors(mut self, line: Rgb, intersection: Rgb) -> Self {
        self.line_color = line;
        self.intersection_color = intersection;
        self
    }

    /// Enable or disable writing the accumulator image
    pub fn with_save_accumulator(mut self, save: bool) -> Self {
        self.save_accumulator = save;
        self
    }
}
