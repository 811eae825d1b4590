mod border;
mod point;
mod range_set;
mod size;
mod vec2d;

pub use border::{Border, Side};
pub use point::Point;
pub use range_set::RangeSet;
pub use size::Size;
pub use vec2d::Vec2d;
