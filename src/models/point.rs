/// Integer pixel where two detected lines cross
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct IntersectionPoint {
    /// X coordinate
    pub x: isize,
    /// Y coordinate
    pub y: isize,
}

impl IntersectionPoint {
    /// Create a new intersection point
    pub fn new(x: isize, y: isize) -> Self {
        Self { x, y }
    }
}
