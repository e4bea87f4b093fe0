//! Rendering of detection results onto an image

/// Pairwise line crossings
pub mod intersections;
/// Line rasterization
pub mod lines;

pub use intersections::{find_intersections, mark_intersections};
pub use lines::{draw_line, draw_lines};
