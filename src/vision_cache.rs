use super::primitives::{Border, Point, Side, Size, Vec2d};
use super::{VISION_CACHE_WIDTH, VISION_RANGE};
use std::fmt::{self, Formatter};

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
pub enum Visibility {
    /// Cache sentinel, queries never return this.
    NotComputed,
    Visible,
    Invisible,
}

impl Visibility {
    pub fn from_bool(visible: bool) -> Visibility {
        if visible {
            Visibility::Visible
        } else {
            Visibility::Invisible
        }
    }

    pub fn is_visible(self) -> bool {
        self == Visibility::Visible
    }
}

impl fmt::Display for Visibility {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Visibility::NotComputed => write!(f, "not computed"),
            Visibility::Visible => write!(f, "visible"),
            Visibility::Invisible => write!(f, "invisible"),
        }
    }
}

/// Per cell visibility for the square of cells within VISION_RANGE (on each axis) of
/// the center.
#[derive(Clone, Debug, PartialEq)]
pub struct VisionCache {
    center: Point,
    cells: Vec2d<Visibility>,
}

impl VisionCache {
    pub fn new(center: Point) -> VisionCache {
        VisionCache {
            center,
            cells: Vec2d::new(
                Size::new(VISION_CACHE_WIDTH, VISION_CACHE_WIDTH),
                Visibility::NotComputed,
            ),
        }
    }

    pub fn center(&self) -> Point {
        self.center
    }

    /// Clears everything and re-centers the cache.
    pub fn reset(&mut self, center: Point) {
        self.center = center;
        self.cells.fill(Visibility::NotComputed);
    }

    pub fn contains(&self, loc: Point) -> bool {
        self.index(loc).is_some()
    }

    /// Returns NotComputed for locations outside the cache.
    pub fn get(&self, loc: Point) -> Visibility {
        match self.index(loc) {
            Some(index) => *self.cells.get(index),
            None => Visibility::NotComputed,
        }
    }

    /// Locations outside the cache are ignored.
    pub fn set(&mut self, loc: Point, visibility: Visibility) {
        if let Some(index) = self.index(loc) {
            self.cells.set(index, visibility);
        }
    }

    pub fn store_to(&self, other: &mut VisionCache) {
        other.clone_from(self);
    }

    /// All the locations covered by the cache, row by row.
    pub fn locations(&self) -> impl Iterator<Item = Point> {
        let min = self.center.offset(-VISION_RANGE, -VISION_RANGE);
        (0..VISION_CACHE_WIDTH)
            .flat_map(move |dy| (0..VISION_CACHE_WIDTH).map(move |dx| min.offset(dx, dy)))
    }

    fn index(&self, loc: Point) -> Option<Point> {
        let index = Point::new(
            loc.x - self.center.x + VISION_RANGE,
            loc.y - self.center.y + VISION_RANGE,
        );
        if self.cells.size().contains(index) {
            Some(index)
        } else {
            None
        }
    }
}

/// Like [`VisionCache`] except indexed by canonical border. This covers one more row and
/// column than VisionCache so that the S and E borders of the last row and column are
/// included.
#[derive(Clone, Debug, PartialEq)]
pub struct BorderVisionCache {
    center: Point,
    borders: Vec2d<Visibility>, // N and W borders are interleaved along x
}

impl BorderVisionCache {
    pub fn new(center: Point) -> BorderVisionCache {
        let width = VISION_CACHE_WIDTH + 1;
        BorderVisionCache {
            center,
            borders: Vec2d::new(Size::new(2 * width, width), Visibility::NotComputed),
        }
    }

    pub fn center(&self) -> Point {
        self.center
    }

    pub fn reset(&mut self, center: Point) {
        self.center = center;
        self.borders.fill(Visibility::NotComputed);
    }

    pub fn contains(&self, border: Border) -> bool {
        self.index(border).is_some()
    }

    pub fn get(&self, border: Border) -> Visibility {
        match self.index(border) {
            Some(index) => *self.borders.get(index),
            None => Visibility::NotComputed,
        }
    }

    pub fn set(&mut self, border: Border, visibility: Visibility) {
        if let Some(index) = self.index(border) {
            self.borders.set(index, visibility);
        }
    }

    pub fn store_to(&self, other: &mut BorderVisionCache) {
        other.clone_from(self);
    }

    /// All the canonical borders covered by the cache.
    pub fn borders(&self) -> impl Iterator<Item = Border> {
        let min = self.center.offset(-VISION_RANGE, -VISION_RANGE);
        (0..=VISION_CACHE_WIDTH).flat_map(move |dy| {
            (0..=VISION_CACHE_WIDTH).flat_map(move |dx| {
                let loc = min.offset(dx, dy);
                [Border::new(loc, Side::North), Border::new(loc, Side::West)]
            })
        })
    }

    fn index(&self, border: Border) -> Option<Point> {
        let border = border.canonical();
        let x = border.loc.x - self.center.x + VISION_RANGE;
        let y = border.loc.y - self.center.y + VISION_RANGE;
        let slot = match border.side {
            Side::North => 0,
            Side::West => 1,
            _ => unreachable!("{border} isn't canonical"),
        };
        let index = Point::new(2 * x + slot, y);
        if x >= 0 && self.borders.size().contains(index) {
            Some(index)
        } else {
            None
        }
    }
}
