//! Core data structures shared by every stage

/// Line parameters and the ordered line collection
pub mod line;
/// Integer intersection points
pub mod point;
/// RGB pixel buffer with bounds-checked access
pub mod surface;

pub use line::{Line, LineSet};
pub use point::IntersectionPoint;
pub use surface::{PixelSurface, Rgb, SurfaceLock};
