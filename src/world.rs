use super::primitives::{Border, Point, Side, Size, Vec2d};
use fnv::FnvHashSet;
use rand::Rng;
use std::error::Error;
use std::fmt::{self, Formatter};

/// What the visibility code needs to know about the surrounding world.
pub trait World {
    /// Valid cells are within [0, width) x [0, height).
    fn size(&self) -> Size;

    /// True for cells that are solid, e.g. walls. All four borders of such a cell block
    /// vision.
    fn is_cell_blocking_vision(&self, loc: Point) -> bool;

    /// True for border mounted objects like closed doors. This is only called with
    /// canonical borders.
    fn is_border_blocking_vision(&self, border: Border) -> bool;

    /// Used when walking rays. Only consults cells.
    fn can_see_through(&self, loc: Point) -> bool {
        !self.is_cell_blocking_vision(loc)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MapError {
    Empty,
    Ragged { row: usize, expected: usize, found: usize },
    BadChar { ch: char, loc: Point },
}

impl fmt::Display for MapError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            MapError::Empty => write!(f, "map has no rows"),
            MapError::Ragged { row, expected, found } => {
                write!(f, "row {row} has {found} columns but expected {expected}")
            }
            MapError::BadChar { ch, loc } => write!(f, "bad char '{ch}' at {loc}"),
        }
    }
}

impl Error for MapError {}

/// Simple [`World`] where cells are either floor or wall and any border can be marked
/// as blocking. Mostly used for testing and the command line tool.
pub struct TextMap {
    cells: Vec2d<bool>,             // true if the cell blocks vision
    borders: FnvHashSet<Border>,    // canonical borders that block vision
    viewer: Option<Point>,          // location of '@' if there was one
}

impl TextMap {
    pub fn new(size: Size) -> TextMap {
        TextMap {
            cells: Vec2d::new(size, false),
            borders: FnvHashSet::default(),
            viewer: None,
        }
    }

    /// '#' is a wall, '.' and ' ' are floor, and '@' is floor with the viewer.
    pub fn from_rows(rows: &[&str]) -> Result<TextMap, MapError> {
        let width = rows.first().map(|row| row.chars().count()).ok_or(MapError::Empty)?;
        let mut map = TextMap::new(Size::new(width as i32, rows.len() as i32));
        for (v, row) in rows.iter().enumerate() {
            let found = row.chars().count();
            if found != width {
                return Err(MapError::Ragged {
                    row: v,
                    expected: width,
                    found,
                });
            }
            for (h, ch) in row.chars().enumerate() {
                let loc = Point::new(h as i32, v as i32);
                match ch {
                    '#' => map.cells.set(loc, true),
                    '.' | ' ' => (),
                    '@' => map.viewer = Some(loc),
                    _ => return Err(MapError::BadChar { ch, loc }),
                }
            }
        }
        Ok(map)
    }

    pub fn parse(text: &str) -> Result<TextMap, MapError> {
        let rows: Vec<&str> = text.lines().filter(|line| !line.is_empty()).collect();
        TextMap::from_rows(&rows)
    }

    /// Sprinkles walls over the map and closes off some borders.
    pub fn random<R: Rng>(size: Size, density: f64, rng: &mut R) -> TextMap {
        let mut map = TextMap::new(size);
        for y in 0..size.height {
            for x in 0..size.width {
                let loc = Point::new(x, y);
                if rng.gen_bool(density) {
                    map.set_cell(loc, true);
                } else if rng.gen_bool(density / 4.0) {
                    let side = if rng.gen_bool(0.5) { Side::North } else { Side::West };
                    map.set_border(Border::new(loc, side), true);
                }
            }
        }
        map
    }

    pub fn viewer(&self) -> Option<Point> {
        self.viewer
    }

    pub fn set_viewer(&mut self, loc: Point) {
        self.cells.set(loc, false);
        self.viewer = Some(loc);
    }

    pub fn set_cell(&mut self, loc: Point, blocks: bool) {
        self.cells.set(loc, blocks);
    }

    pub fn set_border(&mut self, border: Border, blocks: bool) {
        let border = border.canonical();
        if blocks {
            self.borders.insert(border);
        } else {
            self.borders.remove(&border);
        }
    }
}

impl World for TextMap {
    fn size(&self) -> Size {
        self.cells.size()
    }

    fn is_cell_blocking_vision(&self, loc: Point) -> bool {
        self.size().contains(loc) && *self.cells.get(loc)
    }

    fn is_border_blocking_vision(&self, border: Border) -> bool {
        self.borders.contains(&border.canonical())
    }
}
