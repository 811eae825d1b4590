use super::{Point, Size};

/// Fixed size row-major 2D array indexed by [`Point`]. Points must be within
/// [0, width) x [0, height).
#[derive(Clone, Debug, PartialEq)]
pub struct Vec2d<T> {
    size: Size,
    elements: Vec<T>,
}

impl<T: Clone> Vec2d<T> {
    pub fn new(size: Size, default: T) -> Vec2d<T> {
        assert!(size.width >= 0 && size.height >= 0, "bad size {size}");
        Vec2d {
            size,
            elements: vec![default; size.area() as usize],
        }
    }

    pub fn fill(&mut self, value: T) {
        self.elements.fill(value);
    }
}

impl<T> Vec2d<T> {
    pub fn size(&self) -> Size {
        self.size
    }

    pub fn get(&self, loc: Point) -> &T {
        let index = self.index(loc);
        &self.elements[index]
    }

    pub fn set(&mut self, loc: Point, value: T) {
        let index = self.index(loc);
        self.elements[index] = value;
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.elements.iter()
    }

    fn index(&self, loc: Point) -> usize {
        assert!(self.size.contains(loc), "{loc} is outside {}", self.size);
        (loc.y * self.size.width + loc.x) as usize
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_set() {
        let mut v = Vec2d::new(Size::new(3, 2), '.');
        v.set(Point::new(2, 1), '#');
        assert_eq!(*v.get(Point::new(2, 1)), '#');
        assert_eq!(*v.get(Point::new(1, 1)), '.');
        assert_eq!(v.iter().filter(|&&ch| ch == '#').count(), 1);

        v.fill('x');
        assert!(v.iter().all(|&ch| ch == 'x'));
    }

    #[test]
    #[should_panic]
    fn test_out_of_bounds() {
        let v = Vec2d::new(Size::new(3, 2), 0);
        let _ = v.get(Point::new(3, 0));
    }
}
