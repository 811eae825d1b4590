use std::fmt::{self, Formatter};

/// Represents a cell in cartesian space. The cell covers the unit square centered on
/// (x, y) and y grows downward.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub fn new(x: i32, y: i32) -> Point {
        Point { x, y }
    }

    /// distance squared between two points
    pub fn distance2(&self, rhs: Point) -> i32 {
        let dx = self.x - rhs.x;
        let dy = self.y - rhs.y;
        dx * dx + dy * dy
    }

    /// Chebyshev distance, i.e. the number of king moves between the two points.
    pub fn chebyshev(&self, rhs: Point) -> i32 {
        (self.x - rhs.x).abs().max((self.y - rhs.y).abs())
    }

    pub fn offset(&self, dx: i32, dy: i32) -> Point {
        Point::new(self.x + dx, self.y + dy)
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}
