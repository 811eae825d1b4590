use super::primitives::Point;
use super::world::World;

/// Walks from viewer toward target and returns the last cell that could be reached
/// before hitting something opaque or leaving the world. Vision range doesn't apply.
/// Unlike the occlusion test this only looks at cells and only along one discrete path.
///
/// There's no single grid line formula that is both symmetric and gap free so axis
/// aligned, diagonal, off-by-one, and general lines are each handled separately.
pub fn ray_end<W: World>(world: &W, viewer: Point, target: Point) -> Point {
    let dx = target.x - viewer.x;
    let dy = target.y - viewer.y;
    if dx == 0 && dy == 0 {
        return viewer;
    }

    let size = world.size();
    let passable = |loc: Point| size.contains(loc) && world.can_see_through(loc);

    let major = dx.abs().max(dy.abs());
    let minor = dx.abs().min(dy.abs());
    if minor == 0 || minor == major {
        let step = (dx.signum(), dy.signum());
        let path = (1..=major).map(|i| viewer.offset(i * step.0, i * step.1));
        walk(viewer, path, &passable).end
    } else if minor == 1 {
        walk(viewer, jog_path(viewer, dx, dy), &passable).end
    } else {
        let low = walk(viewer, line_path(viewer, dx, dy, false), &passable);
        let high = walk(viewer, line_path(viewer, dx, dy, true), &passable);
        if low.complete || high.complete {
            target
        } else if high.steps > low.steps {
            high.end
        } else {
            low.end
        }
    }
}

struct Walk {
    end: Point,     // last passable cell
    steps: i32,     // number of cells moved
    complete: bool, // true if the whole path was passable
}

fn walk<F>(viewer: Point, path: impl Iterator<Item = Point>, passable: &F) -> Walk
where
    F: Fn(Point) -> bool,
{
    let mut end = viewer;
    let mut steps = 0;
    for loc in path {
        if !passable(loc) {
            return Walk {
                end,
                steps,
                complete: false,
            };
        }
        end = loc;
        steps += 1;
    }
    Walk {
        end,
        steps,
        complete: true,
    }
}

// Maps (major, minor) offsets back into a point.
fn to_point(viewer: Point, dx: i32, dy: i32, along: i32, across: i32) -> Point {
    if dx.abs() >= dy.abs() {
        viewer.offset(along * dx.signum(), across * dy.signum())
    } else {
        viewer.offset(across * dx.signum(), along * dy.signum())
    }
}

// Target is one row (or column) off the axis. The line crosses over to the target's row
// half way along. For an even length that's in the middle of a cell so both cells in
// that column are visited.
fn jog_path(viewer: Point, dx: i32, dy: i32) -> impl Iterator<Item = Point> {
    let n = dx.abs().max(dy.abs());
    let near = (1..=n / 2).map(move |i| to_point(viewer, dx, dy, i, 0));
    let far = ((n + 1) / 2..=n).map(move |i| to_point(viewer, dx, dy, i, 1));
    near.chain(far)
}

// Bresenham style line that rounds halves either toward the viewer's row or away from it.
fn line_path(viewer: Point, dx: i32, dy: i32, round_up: bool) -> impl Iterator<Item = Point> {
    let n = dx.abs().max(dy.abs());
    let m = dx.abs().min(dy.abs());
    let bias = if round_up { n } else { n - 1 };
    (1..=n).map(move |i| {
        let across = (2 * i * m + bias) / (2 * n);
        to_point(viewer, dx, dy, i, across)
    })
}
