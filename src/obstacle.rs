use super::primitives::{Border, Point};
use std::f64::consts::FRAC_PI_2;

/// Segments whose width across the line of sight is smaller than this are seen edge on
/// and never occlude anything. Empirically chosen.
pub const OBSTACLE_EPSILON: f64 = 0.01;

// Transformed coordinates closer to zero than this are snapped to zero so that corners
// lying exactly on the target plane don't produce slivers.
const SNAP: f64 = 1.0e-9;

/// Coordinate frame for one viewer/target pair: the target is at the origin and the
/// viewer is on the negative Y axis.
#[derive(Clone, Copy, Debug)]
pub struct Frame {
    target: (f64, f64),
    sin: f64,
    cos: f64,
    distance: f64,
}

impl Frame {
    pub fn new(viewer: Point, target: Point) -> Frame {
        let dx = (target.x - viewer.x) as f64;
        let dy = (target.y - viewer.y) as f64;
        let angle = dy.atan2(dx) - FRAC_PI_2;
        Frame {
            target: (target.x as f64, target.y as f64),
            sin: angle.sin(),
            cos: angle.cos(),
            distance: dx.hypot(dy),
        }
    }

    /// Local Y coordinate of the viewer.
    pub fn viewer_y(&self) -> f64 {
        -self.distance
    }

    pub fn transform(&self, (x, y): (f64, f64)) -> (f64, f64) {
        let x = x - self.target.0;
        let y = y - self.target.1;
        let lx = x * self.cos + y * self.sin;
        let ly = -x * self.sin + y * self.cos;
        (snap(lx), snap(ly))
    }
}

/// An opaque border expressed in a [`Frame`]. These are built per query and never
/// cached.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Obstacle {
    pub x: f64,
    pub y: f64,
    pub dx: f64,
    pub dy: f64,
}

impl Obstacle {
    /// Returns None if the border is seen edge on. If the border crosses the target
    /// plane only the half nearer the viewer is kept.
    pub fn new(frame: &Frame, border: Border) -> Option<Obstacle> {
        let (start, end) = border.endpoints();
        let (x0, y0) = frame.transform(start);
        let (x1, y1) = frame.transform(end);
        let obstacle = Obstacle {
            x: x0,
            y: y0,
            dx: x1 - x0,
            dy: y1 - y0,
        };
        if obstacle.dx.abs() < OBSTACLE_EPSILON {
            None
        } else if obstacle.straddles_x_axis() {
            Some(obstacle.split())
        } else {
            Some(obstacle)
        }
    }

    pub fn end(&self) -> (f64, f64) {
        (self.x + self.dx, self.y + self.dy)
    }

    pub fn min_x(&self) -> f64 {
        self.x.min(self.x + self.dx)
    }

    pub fn max_x(&self) -> f64 {
        self.x.max(self.x + self.dx)
    }

    pub fn min_y(&self) -> f64 {
        self.y.min(self.y + self.dy)
    }

    pub fn max_y(&self) -> f64 {
        self.y.max(self.y + self.dy)
    }

    pub fn straddles_x_axis(&self) -> bool {
        let (_, y1) = self.end();
        (self.y < 0.0 && y1 > 0.0) || (self.y > 0.0 && y1 < 0.0)
    }

    /// Cuts the segment where it crosses the X axis and returns the part with y <= 0.
    pub fn split(&self) -> Obstacle {
        debug_assert!(self.straddles_x_axis());
        let t = -self.y / self.dy;
        let cross = (self.x + t * self.dx, 0.0);
        let near = if self.y < 0.0 { (self.x, self.y) } else { self.end() };
        Obstacle {
            x: near.0,
            y: near.1,
            dx: cross.0 - near.0,
            dy: cross.1 - near.1,
        }
    }

    /// Obstacles entirely past the target or entirely behind the viewer can't get in
    /// the way.
    pub fn may_block_vision(&self, viewer_y: f64) -> bool {
        self.min_y() < 0.0 && self.max_y() > viewer_y
    }
}

fn snap(v: f64) -> f64 {
    if v.abs() < SNAP {
        0.0
    } else {
        v
    }
}
