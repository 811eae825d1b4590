//! Field of view for a viewer standing on a grid. Cells and the borders between them can
//! block vision. Results are cached relative to the viewer and the previous turn's
//! results are kept around so callers can see what changed.
#[macro_use]
extern crate log;
#[macro_use]
extern crate serde_derive;

pub mod config;
#[cfg(debug_assertions)]
mod invariant;
mod obstacle;
mod obstacles;
mod primitives;
mod ray;
mod seer;
mod vision_cache;
mod world;

#[cfg(test)]
mod tests;

pub use obstacle::{Frame, Obstacle, OBSTACLE_EPSILON};
pub use obstacles::{Blocker, Obstacles};
pub use primitives::{Border, Point, RangeSet, Side, Size, Vec2d};
pub use ray::ray_end;
pub use seer::{in_range, CacheState, Change, Seer};
pub use vision_cache::{BorderVisionCache, Visibility, VisionCache};
pub use world::{MapError, TextMap, World};

/// How far a viewer can see.
pub const VISION_RANGE: i32 = 11;

/// Width (and height) of the vision caches.
pub const VISION_CACHE_WIDTH: i32 = 2 * VISION_RANGE + 1;

/// The viewer is modeled as a light source of this width rather than a point so that
/// lines of sight passing exactly through corners aren't all or nothing. Empirically
/// chosen.
pub const VIEW_SOURCE_DIAMETER: f64 = 0.7;
