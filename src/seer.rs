use super::obstacle::{Frame, Obstacle};
use super::obstacles::Obstacles;
use super::primitives::{Border, Point, RangeSet};
use super::ray;
use super::vision_cache::{BorderVisionCache, Visibility, VisionCache};
use super::world::World;
use super::{VIEW_SOURCE_DIAMETER, VISION_RANGE};

/// How much of the current cache has been filled in.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum CacheState {
    /// Nothing has been computed since the last invalidation.
    Empty,
    /// Some cells or borders were computed on demand.
    Partial,
    /// compute_full_vision_cache was called.
    Full,
}

/// A cell whose visibility differs between the previous turn and this one.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Change {
    pub loc: Point,
    pub was: Visibility,
    pub now: Visibility,
}

/// Field of view for one viewer. Results are cached until [`Seer::invalidate_vision_cache`]
/// is called which the host needs to do whenever cells or borders near the viewer change
/// opacity (moving the viewer with move_to does this automatically).
pub struct Seer {
    viewer: Point,
    obstacles: Obstacles,
    cells: VisionCache,
    borders: BorderVisionCache,
    old_cells: VisionCache,         // snapshot from the end of the previous turn
    old_borders: BorderVisionCache, // may be centered on a different location than cells
    state: CacheState,
    edition: u32, // incremented each time the caches are invalidated
}

impl Seer {
    pub fn new(viewer: Point) -> Seer {
        Seer {
            viewer,
            obstacles: Obstacles::new(),
            cells: VisionCache::new(viewer),
            borders: BorderVisionCache::new(viewer),
            old_cells: VisionCache::new(viewer),
            old_borders: BorderVisionCache::new(viewer),
            state: CacheState::Empty,
            edition: 0,
        }
    }

    pub fn viewer(&self) -> Point {
        self.viewer
    }

    pub fn cache_state(&self) -> CacheState {
        self.state
    }

    pub fn edition(&self) -> u32 {
        self.edition
    }

    pub fn move_to(&mut self, loc: Point) {
        if loc != self.viewer {
            trace!("viewer moved from {} to {loc}", self.viewer);
            self.viewer = loc;
            self.invalidate_vision_cache();
        }
    }

    /// Throws away the obstacles and everything computed from them.
    pub fn invalidate_vision_cache(&mut self) {
        self.obstacles.invalidate();
        self.cells.reset(self.viewer);
        self.borders.reset(self.viewer);
        self.state = CacheState::Empty;
        self.edition = self.edition.wrapping_add(1);
    }

    /// Call this when a cell's opacity changes. The cache is invalidated only if the cell
    /// could have been an obstacle.
    pub fn cell_changed(&mut self, loc: Point) {
        if loc.chebyshev(self.viewer) <= VISION_RANGE {
            self.invalidate_vision_cache();
        }
    }

    pub fn border_changed(&mut self, border: Border) {
        if border.canonical().loc.chebyshev(self.viewer) <= VISION_RANGE {
            self.invalidate_vision_cache();
        }
    }

    /// Copies the current caches into the previous turn caches.
    pub fn store_vision_cache_to_previous(&mut self) {
        self.cells.store_to(&mut self.old_cells);
        self.borders.store_to(&mut self.old_borders);
    }

    /// Returns true if the viewer can see loc.
    pub fn can_see<W: World>(&mut self, world: &W, loc: Point) -> bool {
        match self.cells.get(loc) {
            Visibility::Visible => true,
            Visibility::Invisible => false,
            Visibility::NotComputed => self.is_cell_visible(world, loc, None),
        }
    }

    /// Returns Visible or Invisible, never NotComputed.
    pub fn can_see_border<W: World>(&mut self, world: &W, border: Border) -> Visibility {
        let border = border.canonical();
        match self.borders.get(border) {
            Visibility::NotComputed => {
                let visibility = self.compute_border_visibility(world, border);
                self.remember_border(border, visibility);
                visibility
            }
            visibility => visibility,
        }
    }

    /// Last cell along the straight walk from the viewer to target before something
    /// opaque gets in the way.
    pub fn ray_end<W: World>(&self, world: &W, target: Point) -> Point {
        ray::ray_end(world, self.viewer, target)
    }

    /// Fills in the cache for every cell and border around the viewer.
    pub fn compute_full_vision_cache<W: World>(&mut self, world: &W) {
        self.obstacles.build(world, self.viewer);

        let size = world.size();
        let locs: Vec<Point> = self.cells.locations().filter(|loc| size.contains(*loc)).collect();
        for &loc in locs.iter() {
            self.can_see(world, loc);
        }

        let borders: Vec<Border> = self.borders.borders().collect();
        for border in borders {
            self.can_see_border(world, border);
        }

        self.state = CacheState::Full;
        debug!(
            "computed vision for {}: {} visible cells, {} visible borders",
            self.viewer,
            self.visible_cells().count(),
            self.visible_borders().count()
        );

        #[cfg(debug_assertions)]
        super::invariant::invariant(self);
    }

    /// Raw cache contents, this will be NotComputed for cells that haven't been queried.
    pub fn cached_visibility(&self, loc: Point) -> Visibility {
        self.cells.get(loc)
    }

    pub fn cached_border_visibility(&self, border: Border) -> Visibility {
        self.borders.get(border)
    }

    /// Visibility as of the last store_vision_cache_to_previous call.
    pub fn previous_visibility(&self, loc: Point) -> Visibility {
        self.old_cells.get(loc)
    }

    pub fn previous_border_visibility(&self, border: Border) -> Visibility {
        self.old_borders.get(border)
    }

    /// Cells currently cached as visible.
    pub fn visible_cells(&self) -> impl Iterator<Item = Point> + '_ {
        self.cells
            .locations()
            .filter(move |loc| self.cells.get(*loc).is_visible())
    }

    pub fn visible_borders(&self) -> impl Iterator<Item = Border> + '_ {
        self.borders
            .borders()
            .filter(move |border| self.borders.get(*border).is_visible())
    }

    /// Cells that became visible or invisible since the previous turn. Cells that were
    /// not computed are treated as invisible.
    pub fn changes(&self) -> Vec<Change> {
        let old_only = self
            .old_cells
            .locations()
            .filter(|loc| !self.cells.contains(*loc));
        self.cells
            .locations()
            .chain(old_only)
            .filter_map(|loc| {
                let was = resolved(self.old_cells.get(loc));
                let now = resolved(self.cells.get(loc));
                if was != now {
                    Some(Change { loc, was, now })
                } else {
                    None
                }
            })
            .collect()
    }

    /// If excluded is set then that border is ignored and nothing is cached.
    fn is_cell_visible<W: World>(&mut self, world: &W, target: Point, excluded: Option<Border>) -> bool {
        let visible = if target == self.viewer {
            true
        } else if !world.size().contains(target) || !in_range(self.viewer, target) {
            false
        } else {
            self.obstacles.build(world, self.viewer);
            self.is_unoccluded(target, excluded.map(Border::canonical))
        };
        if excluded.is_none() {
            self.remember_cell(target, Visibility::from_bool(visible));
        }
        visible
    }

    // Models the viewer as a light source with a small width perpendicular to the line
    // of sight. Each obstacle shadows part of that width and the target is visible if
    // any part remains.
    fn is_unoccluded(&self, target: Point, excluded: Option<Border>) -> bool {
        let frame = Frame::new(self.viewer, target);
        let viewer_y = frame.viewer_y();
        let dx = target.x - self.viewer.x;
        let dy = target.y - self.viewer.y;

        let radius = VIEW_SOURCE_DIAMETER / 2.0;
        let mut open = RangeSet::new(-radius, radius);
        for (index, blocker) in self.obstacles.iter() {
            if Some(blocker.border) == excluded {
                continue;
            }
            // Solid cells are always visible from outside so their own faces don't count.
            if blocker.solid && blocker.cell == target {
                continue;
            }
            // A border on the viewer's cell only matters for targets in front of it.
            if let Some(side) = self.obstacles.viewer_side(index) {
                if !side.faces(dx, dy) {
                    continue;
                }
            }
            if let Some(obstacle) = Obstacle::new(&frame, blocker.border) {
                if obstacle.may_block_vision(viewer_y) {
                    debug_assert!(
                        obstacle.max_x() > obstacle.min_x(),
                        "{} has no width looking from {} to {target}",
                        blocker.border,
                        self.viewer
                    );
                    open.subtract(obstacle.min_x(), obstacle.max_x());
                    if open.is_empty() {
                        trace!("{target} is hidden from {} by {}", self.viewer, blocker.border);
                        return false;
                    }
                }
            }
        }
        true
    }

    fn compute_border_visibility<W: World>(&mut self, world: &W, border: Border) -> Visibility {
        let mut closer = border.loc;
        let mut further = border.neighbor();
        let mut closer_vis = self.cell_visibility(world, closer);
        let mut further_vis = self.cell_visibility(world, further);
        if closer_vis == Visibility::Invisible && further_vis == Visibility::Visible {
            std::mem::swap(&mut closer, &mut further);
            std::mem::swap(&mut closer_vis, &mut further_vis);
        }

        if closer_vis == Visibility::Visible && further_vis == Visibility::Visible {
            Visibility::Visible
        } else if closer_vis == Visibility::Invisible {
            Visibility::Invisible
        } else {
            // We can see one side but not the other. Whether we can see the border itself
            // depends on whether the border is what is hiding the far side.
            Visibility::from_bool(self.is_cell_visible(world, further, Some(border)))
        }
    }

    fn cell_visibility<W: World>(&mut self, world: &W, loc: Point) -> Visibility {
        Visibility::from_bool(self.can_see(world, loc))
    }

    fn remember_cell(&mut self, loc: Point, visibility: Visibility) {
        if self.cells.contains(loc) {
            self.cells.set(loc, visibility);
            self.touch();
        }
    }

    fn remember_border(&mut self, border: Border, visibility: Visibility) {
        if self.borders.contains(border) {
            self.borders.set(border, visibility);
            self.touch();
        }
    }

    fn touch(&mut self) {
        if self.state == CacheState::Empty {
            self.state = CacheState::Partial;
        }
    }
}

/// True if the distance between the two cells, truncated to an integer, is within
/// VISION_RANGE.
pub fn in_range(viewer: Point, loc: Point) -> bool {
    let limit = VISION_RANGE + 1;
    loc.chebyshev(viewer) <= VISION_RANGE && loc.distance2(viewer) < limit * limit
}

fn resolved(visibility: Visibility) -> Visibility {
    match visibility {
        Visibility::NotComputed => Visibility::Invisible,
        other => other,
    }
}
