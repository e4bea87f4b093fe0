/// Straight line `y = slope * x + intercept` in image coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Line {
    /// Slope (`a`)
    pub slope: f64,
    /// Y intercept (`b`)
    pub intercept: f64,
}

impl Line {
    /// Create a line from slope and intercept
    pub fn new(slope: f64, intercept: f64) -> Self {
        Self { slope, intercept }
    }

    /// Evaluate the line at `x`
    pub fn y_at(&self, x: f64) -> f64 {
        self.slope * x + self.intercept
    }
}

/// Ordered collection of detected lines
///
/// Order is the order lines were pushed in, which keeps rendering and
/// intersection output deterministic.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LineSet {
    lines: Vec<Line>,
}

impl LineSet {
    /// Create an empty set
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a line
    pub fn push(&mut self, line: Line) {
        self.lines.push(line);
    }

    /// Number of lines
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// True when no line was detected
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Iterate lines in insertion order
    pub fn iter(&self) -> std::slice::Iter<'_, Line> {
        self.lines.iter()
    }

    /// Borrow the lines as a slice
    pub fn as_slice(&self) -> &[Line] {
        &self.lines
    }
}

impl From<Vec<Line>> for LineSet {
    fn from(lines: Vec<Line>) -> Self {
        Self { lines }
    }
}

impl FromIterator<Line> for LineSet {
    fn from_iter<I: IntoIterator<Item = Line>>(iter: I) -> Self {
        Self {
            lines: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a LineSet {
    type Item = &'a Line;
    type IntoIter = std::slice::Iter<'a, Line>;

    fn into_iter(self) -> Self::IntoIter {
        self.lines.iter()
    }
}
