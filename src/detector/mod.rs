//! Line detection in Hough space
//!
//! - Vote accumulation: every edge pixel draws its sinusoid into the
//!   accumulator
//! - Peak extraction: thresholded local maxima become `y = a*x + b` lines

/// Accumulator surface and vote curve rasterization
pub mod accumulator;
/// Local-maximum search and cell to line conversion
pub mod peaks;

pub use accumulator::{Accumulator, HoughSpace, accumulate, is_edge};
pub use peaks::{Peak, extract_peaks, find_peaks};
