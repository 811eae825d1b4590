#![cfg(test)]
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use super::*;

fn build_map(rows: Vec<&'static str>) -> (Seer, TextMap) {
    let map = TextMap::from_rows(&rows).unwrap();
    let viewer = map.viewer().unwrap();
    (Seer::new(viewer), map)
}

fn random_map(seed: u64, density: f64) -> (Seer, TextMap) {
    let mut rng = SmallRng::seed_from_u64(seed);
    let mut map = TextMap::random(Size::new(41, 41), density, &mut rng);
    let viewer = Point::new(20, 20);
    map.set_cell(viewer, false);
    (Seer::new(viewer), map)
}

trait ToSnapshot {
    fn to_snapshot(&self, map: &TextMap) -> String;
}

impl ToSnapshot for Seer {
    fn to_snapshot(&self, map: &TextMap) -> String {
        let size = map.size();
        let mut result = String::with_capacity(((size.width + 1) * size.height) as usize);
        for y in 0..size.height {
            for x in 0..size.width {
                let loc = Point::new(x, y);
                let ch = if loc == self.viewer() {
                    '@'
                } else if !self.cached_visibility(loc).is_visible() {
                    '?'
                } else if map.is_cell_blocking_vision(loc) {
                    '#'
                } else {
                    '.'
                };
                result.push(ch);
            }
            result.push('\n');
        }
        result
    }
}

#[test]
fn test_open_field() {
    let mut map = TextMap::new(Size::new(23, 23));
    map.set_viewer(Point::new(11, 11));
    let mut seer = Seer::new(Point::new(11, 11));
    seer.compute_full_vision_cache(&map);

    for loc in VisionCache::new(seer.viewer()).locations() {
        let expected = Visibility::from_bool(in_range(seer.viewer(), loc));
        assert_eq!(seer.cached_visibility(loc), expected, "{loc}");
    }
    insta::assert_snapshot!(seer.to_snapshot(&map), @r###"
    ???????.........???????
    ?????.............?????
    ????...............????
    ???.................???
    ??...................??
    ?.....................?
    ?.....................?
    .......................
    .......................
    .......................
    .......................
    ...........@...........
    .......................
    .......................
    .......................
    .......................
    ?.....................?
    ?.....................?
    ??...................??
    ???.................???
    ????...............????
    ?????.............?????
    ???????.........???????
    "###);
}

#[test]
fn test_room() {
    #[rustfmt::skip]
    let rows = vec![
      // 0123456789012345
        "###########.....", // 0
        "#.........#.....", // 1
        "#.........#.....", // 2
        "#....@....###...", // 3
        "#..............#", // 4
        "#.........######", // 5
        "#..##.....#.....", // 6
        "#.........#.....", // 7
        "###########.....", // 8
    ];
    let (mut seer, map) = build_map(rows);
    seer.compute_full_vision_cache(&map);
    insta::assert_snapshot!(seer.to_snapshot(&map), @r###"
    ?#########??????
    #.........#?????
    #.........#?????
    #....@....#?????
    #..............#
    #.........###???
    #..##.....#?????
    #.???.....#?????
    ????######??????
    "###);
}

#[test]
fn test_single_wall() {
    let mut map = TextMap::new(Size::new(101, 101));
    map.set_cell(Point::new(55, 50), true);
    let mut seer = Seer::new(Point::new(50, 50));

    assert!(!seer.can_see(&map, Point::new(60, 50)));
    assert!(seer.can_see(&map, Point::new(60, 45)));
    assert!(seer.can_see(&map, Point::new(55, 50)));
    assert!(seer.can_see(&map, Point::new(50, 50)));
}

#[test]
fn test_ray_end() {
    #[rustfmt::skip]
    let rows = vec![
      // 012345
        "@..#..", // 0
    ];
    let (seer, map) = build_map(rows);
    assert_eq!(seer.ray_end(&map, Point::new(5, 0)), Point::new(2, 0));
    assert_eq!(ray_end(&map, Point::new(0, 0), Point::new(5, 0)), Point::new(2, 0));

    // walks aren't limited by vision range
    let mut map = TextMap::new(Size::new(40, 1));
    map.set_cell(Point::new(20, 0), true);
    let seer = Seer::new(Point::new(0, 0));
    assert_eq!(seer.ray_end(&map, Point::new(15, 0)), Point::new(15, 0));
    assert_eq!(seer.ray_end(&map, Point::new(39, 0)), Point::new(19, 0));
}

#[test]
fn test_symmetry() {
    let map = TextMap::new(Size::new(60, 60));
    let mut rng = SmallRng::seed_from_u64(3);
    let mut checked = 0;
    while checked < 200 {
        let a = Point::new(rng.gen_range(0..60), rng.gen_range(0..60));
        let b = a.offset(
            rng.gen_range(-VISION_RANGE..=VISION_RANGE),
            rng.gen_range(-VISION_RANGE..=VISION_RANGE),
        );
        if !map.size().contains(b) {
            continue;
        }

        let mut from_a = Seer::new(a);
        let mut from_b = Seer::new(b);
        let ab = from_a.can_see(&map, b);
        let ba = from_b.can_see(&map, a);
        assert_eq!(ab, ba, "{a} and {b}");
        assert_eq!(ab, in_range(a, b), "{a} and {b}");
        checked += 1;
    }
}

#[test]
fn test_range_boundary() {
    for seed in 1..6 {
        let (mut seer, map) = random_map(seed, 0.2);
        let viewer = seer.viewer();
        seer.compute_full_vision_cache(&map);

        for loc in seer.visible_cells() {
            assert!(in_range(viewer, loc), "{loc} is visible from {viewer}");
        }
        for dx in -(VISION_RANGE + 1)..=VISION_RANGE + 1 {
            for dy in [-(VISION_RANGE + 1), VISION_RANGE + 1] {
                assert!(!seer.can_see(&map, viewer.offset(dx, dy)));
                assert!(!seer.can_see(&map, viewer.offset(dy, dx)));
            }
        }
    }
}

#[test]
fn test_monotonic_borders() {
    for seed in 10..15 {
        let (mut seer, map) = random_map(seed, 0.25);
        seer.compute_full_vision_cache(&map);

        let borders: Vec<Border> = seer.visible_borders().collect();
        for border in borders {
            let near = seer.can_see(&map, border.loc);
            let far = seer.can_see(&map, border.neighbor());
            assert!(near || far, "{border} is visible but neither side is");
        }
    }
}

#[test]
fn test_blocking_border_hides_far_side() {
    let mut map = TextMap::new(Size::new(30, 30));
    let viewer = Point::new(10, 10);
    map.set_border(Border::west(14, 10), true);
    let mut seer = Seer::new(viewer);
    seer.compute_full_vision_cache(&map);

    assert_eq!(seer.cached_visibility(Point::new(13, 10)), Visibility::Visible);
    assert_eq!(seer.cached_visibility(Point::new(14, 10)), Visibility::Invisible);
    assert_eq!(seer.cached_border_visibility(Border::west(14, 10)), Visibility::Visible);

    // the far side of a wall that is itself hidden
    assert_eq!(seer.cached_border_visibility(Border::west(15, 10)), Visibility::Invisible);
}

#[test]
fn test_idempotent() {
    let (mut seer, map) = random_map(7, 0.3);
    let viewer = seer.viewer();
    let locs: Vec<Point> = VisionCache::new(viewer).locations().collect();
    let first: Vec<bool> = locs.iter().map(|&loc| seer.can_see(&map, loc)).collect();
    let edition = seer.edition();
    let second: Vec<bool> = locs.iter().map(|&loc| seer.can_see(&map, loc)).collect();
    assert_eq!(first, second);
    assert_eq!(seer.edition(), edition);
}

#[test]
fn test_invalidation() {
    let mut map = TextMap::new(Size::new(30, 30));
    let mut seer = Seer::new(Point::new(10, 10));
    let target = Point::new(16, 10);
    assert!(seer.can_see(&map, target));

    // stale until the host tells us about the change
    map.set_cell(Point::new(13, 10), true);
    assert!(seer.can_see(&map, target));

    seer.cell_changed(Point::new(13, 10));
    assert_eq!(seer.cache_state(), CacheState::Empty);
    assert_eq!(seer.cached_visibility(target), Visibility::NotComputed);
    assert!(!seer.can_see(&map, target));
}

#[test]
fn test_turns() {
    #[rustfmt::skip]
    let rows = vec![
      // 0123456789
        "..........", // 0
        "..@...#...", // 1
        "..........", // 2
    ];
    let (mut seer, map) = build_map(rows);
    seer.compute_full_vision_cache(&map);
    seer.store_vision_cache_to_previous();
    assert!(seer.changes().is_empty());

    seer.move_to(Point::new(8, 1));
    seer.compute_full_vision_cache(&map);
    let changes = seer.changes();
    assert!(changes.iter().any(|change| change.loc == Point::new(2, 1)
        && change.was == Visibility::Visible
        && change.now == Visibility::Invisible));
    assert_eq!(seer.previous_visibility(Point::new(8, 1)), Visibility::Invisible);
}
