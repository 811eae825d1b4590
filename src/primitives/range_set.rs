use std::fmt;

// Ranges narrower than this are treated as closed off. Without it two obstacles that meet
// exactly at a point can leave a sliver behind because of rounding.
const MIN_WIDTH: f64 = 1.0e-9;

/// Disjoint set of closed intervals on the real line that can only shrink. Used to track
/// which part of a viewer's light source is still unoccluded.
#[derive(Clone, Debug, PartialEq)]
pub struct RangeSet {
    ranges: Vec<(f64, f64)>, // sorted and disjoint
}

impl RangeSet {
    pub fn new(min: f64, max: f64) -> RangeSet {
        assert!(min <= max, "bad range [{min}, {max}]");
        RangeSet {
            ranges: vec![(min, max)],
        }
    }

    pub fn is_empty(&self) -> bool {
        self.ranges.is_empty()
    }

    pub fn len(&self) -> usize {
        self.ranges.len()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, (f64, f64)> {
        self.ranges.iter()
    }

    /// Removes [min, max] from the set, splitting a range in two if it straddles the
    /// removed interval.
    pub fn subtract(&mut self, min: f64, max: f64) {
        debug_assert!(min <= max, "bad range [{min}, {max}]");

        let mut result = Vec::with_capacity(self.ranges.len() + 1);
        for &(lo, hi) in self.ranges.iter() {
            if max <= lo || min >= hi {
                result.push((lo, hi));
            } else {
                if min - lo > MIN_WIDTH {
                    result.push((lo, min));
                }
                if hi - max > MIN_WIDTH {
                    result.push((max, hi));
                }
            }
        }
        self.ranges = result;
    }
}

impl fmt::Display for RangeSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self.ranges.iter().map(|(lo, hi)| format!("[{lo:.3}, {hi:.3}]")).collect();
        write!(f, "{{{}}}", parts.join(" "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_disjoint() {
        let mut set = RangeSet::new(-0.35, 0.35);
        set.subtract(0.5, 1.0);
        set.subtract(-2.0, -0.35);
        assert_eq!(set.len(), 1);
        assert_eq!(set.iter().next(), Some(&(-0.35, 0.35)));
    }

    #[test]
    fn test_split() {
        let mut set = RangeSet::new(-0.35, 0.35);
        set.subtract(-0.1, 0.1);
        let ranges: Vec<(f64, f64)> = set.iter().copied().collect();
        assert_eq!(ranges, vec![(-0.35, -0.1), (0.1, 0.35)]);

        set.subtract(-0.2, 0.2);
        let ranges: Vec<(f64, f64)> = set.iter().copied().collect();
        assert_eq!(ranges, vec![(-0.35, -0.2), (0.2, 0.35)]);
    }

    #[test]
    fn test_meeting_ranges() {
        let mut set = RangeSet::new(-0.35, 0.35);
        set.subtract(0.0, 0.7);
        assert!(!set.is_empty());
        set.subtract(-0.7, 0.0);
        assert!(set.is_empty());
    }

    #[test]
    fn test_covered() {
        let mut set = RangeSet::new(-0.35, 0.35);
        set.subtract(-0.5, 0.5);
        assert!(set.is_empty());

        // subtracting from an empty set is fine
        set.subtract(-0.5, 0.5);
        assert!(set.is_empty());
    }

    #[test]
    fn test_sliver() {
        let mut set = RangeSet::new(-0.35, 0.35);
        set.subtract(-0.35 + 1.0e-12, 0.5);
        assert!(set.is_empty());
    }
}
