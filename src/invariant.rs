use super::primitives::{Border, Point, Side};
use super::seer::{in_range, CacheState, Seer};
use super::vision_cache::Visibility;
use super::VISION_RANGE;

// TODO: add a slow mode that re-runs the point query for every cached cell and compares
pub fn invariant(seer: &Seer) {
    let viewer = seer.viewer();
    let visibility = seer.cached_visibility(viewer);
    assert!(
        visibility != Visibility::Invisible,
        "viewer at {viewer} can't see itself"
    );

    for dy in -VISION_RANGE..=VISION_RANGE {
        for dx in -VISION_RANGE..=VISION_RANGE {
            let loc = viewer.offset(dx, dy);
            check_cell(seer, loc);
            for side in [Side::North, Side::West] {
                check_border(seer, Border::new(loc, side));
            }
        }
    }
}

fn check_cell(seer: &Seer, loc: Point) {
    let viewer = seer.viewer();
    if !in_range(viewer, loc) {
        assert!(
            seer.cached_visibility(loc) != Visibility::Visible,
            "{loc} is visible but out of range of {viewer}"
        );
    }
}

fn check_border(seer: &Seer, border: Border) {
    let visibility = seer.cached_border_visibility(border);
    if seer.cache_state() == CacheState::Full {
        assert!(
            visibility != Visibility::NotComputed,
            "{border} wasn't computed"
        );
    }

    // We can only see a border if we can see at least one side of it.
    if visibility == Visibility::Visible {
        let near = seer.cached_visibility(border.loc);
        let far = seer.cached_visibility(border.neighbor());
        assert!(
            near == Visibility::Visible || far == Visibility::Visible,
            "{border} is visible but {} is {near} and {} is {far}",
            border.loc,
            border.neighbor()
        );
    }
}
