use super::primitives::{Border, Point, Side};
use super::world::World;
use super::VISION_RANGE;
use fnv::FnvHashMap;

/// An opaque border along with the cell that contributed it.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Blocker {
    pub border: Border, // canonical
    pub cell: Point,    // cell that was being scanned when this was found
    pub solid: bool,    // true if the entire cell blocks vision (as opposed to just the border)
}

/// The opaque borders around a viewer. This is built lazily and thrown away whenever the
/// world near the viewer changes.
pub struct Obstacles {
    built: bool,
    viewer: Point,
    blockers: Vec<Blocker>,
    viewer_sides: FnvHashMap<usize, Side>, // blocker index => side of the viewer's cell it lies on
}

impl Obstacles {
    pub fn new() -> Obstacles {
        Obstacles {
            built: false,
            viewer: Point::new(0, 0),
            blockers: Vec::new(),
            viewer_sides: FnvHashMap::default(),
        }
    }

    pub fn is_built(&self) -> bool {
        self.built
    }

    pub fn invalidate(&mut self) {
        self.built = false;
        self.blockers.clear();
        self.viewer_sides.clear();
    }

    /// Scans the cells within VISION_RANGE (on each axis) of viewer. Does nothing if
    /// already built.
    pub fn build<W: World>(&mut self, world: &W, viewer: Point) {
        if self.built {
            return;
        }
        self.blockers.clear();
        self.viewer_sides.clear();
        self.viewer = viewer;

        let size = world.size();
        let min_x = (viewer.x - VISION_RANGE).max(0);
        let max_x = (viewer.x + VISION_RANGE).min(size.width - 1);
        let min_y = (viewer.y - VISION_RANGE).max(0);
        let max_y = (viewer.y + VISION_RANGE).min(size.height - 1);
        for y in min_y..=max_y {
            for x in min_x..=max_x {
                let cell = Point::new(x, y);
                if world.is_cell_blocking_vision(cell) {
                    for side in Side::all() {
                        self.add(Border::new(cell, side), true);
                    }
                } else {
                    for side in [Side::North, Side::West] {
                        let border = Border::new(cell, side);
                        if world.is_border_blocking_vision(border) {
                            self.add(border, false);
                        }
                    }
                }
            }
        }

        self.built = true;
        debug!(
            "built {} obstacles around {viewer} ({} on the viewer's cell)",
            self.blockers.len(),
            self.viewer_sides.len()
        );
    }

    pub fn len(&self) -> usize {
        self.blockers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blockers.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (usize, &Blocker)> {
        self.blockers.iter().enumerate()
    }

    /// If the blocker lies on one of the four borders of the viewer's cell then this
    /// returns which one.
    pub fn viewer_side(&self, index: usize) -> Option<Side> {
        self.viewer_sides.get(&index).copied()
    }

    fn add(&mut self, border: Border, solid: bool) {
        let index = self.blockers.len();
        let cell = border.loc;
        let canonical = border.canonical();
        if canonical.side_of(self.viewer).is_some() {
            let side = if cell == self.viewer {
                border.side
            } else {
                border.side.opposite()
            };
            assert_eq!(
                canonical.side_of(self.viewer),
                Some(side),
                "{border} from {cell} resolved to the wrong side of {}",
                self.viewer
            );
            self.viewer_sides.insert(index, side);
        }
        self.blockers.push(Blocker {
            border: canonical,
            cell,
            solid,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::world::TextMap;

    #[test]
    fn test_solid_cell() {
        #[rustfmt::skip]
        let rows = vec![
          // 01234
            ".....", // 0
            ".@.#.", // 1
            ".....", // 2
        ];
        let map = TextMap::from_rows(&rows).unwrap();
        let mut obstacles = Obstacles::new();
        assert!(!obstacles.is_built());

        obstacles.build(&map, map.viewer().unwrap());
        assert!(obstacles.is_built());
        assert_eq!(obstacles.len(), 4);
        for (index, blocker) in obstacles.iter() {
            assert!(blocker.solid);
            assert_eq!(blocker.cell, Point::new(3, 1));
            assert!(blocker.border.is_canonical());
            assert_eq!(obstacles.viewer_side(index), None);
        }
        let borders: Vec<Border> = obstacles.iter().map(|(_, b)| b.border).collect();
        assert!(borders.contains(&Border::north(3, 1)));
        assert!(borders.contains(&Border::west(4, 1)));
        assert!(borders.contains(&Border::north(3, 2)));
        assert!(borders.contains(&Border::west(3, 1)));
    }

    #[test]
    fn test_viewer_sides() {
        #[rustfmt::skip]
        let rows = vec![
          // 01234
            ".....", // 0
            ".@#..", // 1
            ".....", // 2
        ];
        let mut map = TextMap::from_rows(&rows).unwrap();
        map.set_border(Border::north(1, 1), true);
        map.set_border(Border::new(Point::new(1, 1), Side::South), true);

        let mut obstacles = Obstacles::new();
        obstacles.build(&map, Point::new(1, 1));
        assert_eq!(obstacles.len(), 6);

        let mut sides: Vec<Side> = obstacles
            .iter()
            .filter_map(|(index, _)| obstacles.viewer_side(index))
            .collect();
        sides.sort_by_key(|side| *side as i32);
        assert_eq!(sides, vec![Side::North, Side::East, Side::South]);
    }

    #[test]
    fn test_clipping() {
        let map = TextMap::from_rows(&["#@"]).unwrap();
        let mut obstacles = Obstacles::new();
        obstacles.build(&map, Point::new(1, 0));
        assert_eq!(obstacles.len(), 4);

        let west: Vec<usize> = obstacles
            .iter()
            .filter(|(index, _)| obstacles.viewer_side(*index) == Some(Side::West))
            .map(|(index, _)| index)
            .collect();
        assert_eq!(west.len(), 1);
    }

    #[test]
    fn test_rebuild() {
        let mut map = TextMap::from_rows(&["....", ".@..", "...."]).unwrap();
        let mut obstacles = Obstacles::new();
        obstacles.build(&map, Point::new(1, 1));
        assert!(obstacles.is_empty());

        // building is a no-op until invalidated
        map.set_cell(Point::new(3, 1), true);
        obstacles.build(&map, Point::new(1, 1));
        assert!(obstacles.is_empty());

        obstacles.invalidate();
        obstacles.build(&map, Point::new(1, 1));
        assert_eq!(obstacles.len(), 4);
    }

    #[test]
    fn test_empty_world() {
        let map = TextMap::new(crate::primitives::Size::new(0, 0));
        let mut obstacles = Obstacles::new();
        obstacles.build(&map, Point::new(0, 0));
        assert!(obstacles.is_built());
        assert!(obstacles.is_empty());
    }
}
