use super::Point;
use std::fmt::{self, Formatter};

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
pub enum Side {
    North,
    East,
    South,
    West,
}

impl Side {
    pub fn all() -> [Side; 4] {
        [Side::North, Side::East, Side::South, Side::West]
    }

    pub fn opposite(self) -> Side {
        match self {
            Side::North => Side::South,
            Side::East => Side::West,
            Side::South => Side::North,
            Side::West => Side::East,
        }
    }

    /// Returns true if a target at (dx, dy) relative to a cell lies in the quadrant that
    /// this side of the cell looks out on. Exact diagonals are in two quadrants.
    pub fn faces(self, dx: i32, dy: i32) -> bool {
        match self {
            Side::North => dy < 0 && -dy >= dx.abs(),
            Side::East => dx > 0 && dx >= dy.abs(),
            Side::South => dy > 0 && dy >= dx.abs(),
            Side::West => dx < 0 && -dx >= dy.abs(),
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Side::North => write!(f, "N"),
            Side::East => write!(f, "E"),
            Side::South => write!(f, "S"),
            Side::West => write!(f, "W"),
        }
    }
}

/// The edge between a cell and its neighbor on one side. The same edge can be named
/// two ways (the E border of a cell is the W border of the cell to its right) so most
/// code works with the canonical form which only uses N and W.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
pub struct Border {
    pub loc: Point,
    pub side: Side,
}

impl Border {
    pub fn new(loc: Point, side: Side) -> Border {
        Border { loc, side }
    }

    pub fn north(x: i32, y: i32) -> Border {
        Border::new(Point::new(x, y), Side::North)
    }

    pub fn west(x: i32, y: i32) -> Border {
        Border::new(Point::new(x, y), Side::West)
    }

    pub fn canonical(self) -> Border {
        match self.side {
            Side::North | Side::West => self,
            Side::East => Border::new(self.loc.offset(1, 0), Side::West),
            Side::South => Border::new(self.loc.offset(0, 1), Side::North),
        }
    }

    pub fn is_canonical(self) -> bool {
        matches!(self.side, Side::North | Side::West)
    }

    /// The cell on the far side of the border.
    pub fn neighbor(self) -> Point {
        match self.side {
            Side::North => self.loc.offset(0, -1),
            Side::East => self.loc.offset(1, 0),
            Side::South => self.loc.offset(0, 1),
            Side::West => self.loc.offset(-1, 0),
        }
    }

    /// Both end points of the edge in world space (cell centers are at integer
    /// coordinates so edges are at half integers).
    pub fn endpoints(self) -> ((f64, f64), (f64, f64)) {
        let x = self.loc.x as f64;
        let y = self.loc.y as f64;
        match self.side {
            Side::North => ((x - 0.5, y - 0.5), (x + 0.5, y - 0.5)),
            Side::East => ((x + 0.5, y - 0.5), (x + 0.5, y + 0.5)),
            Side::South => ((x - 0.5, y + 0.5), (x + 0.5, y + 0.5)),
            Side::West => ((x - 0.5, y - 0.5), (x - 0.5, y + 0.5)),
        }
    }

    /// Returns the side of cell this border lies on or None if it isn't one of that
    /// cell's four borders.
    pub fn side_of(self, cell: Point) -> Option<Side> {
        let border = self.canonical();
        Side::all()
            .into_iter()
            .find(|&side| Border::new(cell, side).canonical() == border)
    }
}

impl fmt::Display for Border {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.loc, self.side)
    }
}
