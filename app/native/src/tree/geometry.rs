//! Geometry types for layout snapshots.
//!
//! All coordinates are absolute screen pixels as reported by the window
//! manager. Rectangles are half-open: the right and bottom edges are not part
//! of the rectangle.

use serde::Deserialize;

/// A screen-absolute pixel coordinate.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    /// Create a new point.
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self { Self { x, y } }
}

impl std::fmt::Display for Point {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "x={}, y={}", self.x, self.y)
    }
}

/// A rectangle with position and size.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Deserialize)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Rect {
    /// Create a new rectangle.
    #[must_use]
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self { x, y, width, height }
    }

    /// Check if this rectangle contains a point.
    ///
    /// The right and bottom edges are excluded, so a rectangle with zero width
    /// or height contains no point at all. Edges are computed in `i64` so a
    /// rectangle near `i32::MAX` cannot overflow.
    #[must_use]
    pub fn contains_point(&self, point: Point) -> bool {
        let (x, y) = (i64::from(point.x), i64::from(point.y));
        let (left, top) = (i64::from(self.x), i64::from(self.y));

        left <= x
            && x < left + i64::from(self.width)
            && top <= y
            && y < top + i64::from(self.height)
    }
}

impl std::fmt::Display for Rect {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "x={}, y={}, w={}, h={}", self.x, self.y, self.width, self.height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rect_contains_point_inside() {
        let rect = Rect::new(10, 10, 100, 100);
        assert!(rect.contains_point(Point::new(50, 50)));
        assert!(rect.contains_point(Point::new(10, 10)));
        assert!(rect.contains_point(Point::new(109, 109)));
    }

    #[test]
    fn test_rect_excludes_right_and_bottom_edges() {
        let rect = Rect::new(10, 10, 100, 100);
        assert!(!rect.contains_point(Point::new(110, 50)));
        assert!(!rect.contains_point(Point::new(50, 110)));
        assert!(!rect.contains_point(Point::new(9, 50)));
        assert!(!rect.contains_point(Point::new(50, 9)));
    }

    #[test]
    fn test_zero_sized_rect_contains_nothing() {
        assert!(!Rect::new(0, 0, 0, 100).contains_point(Point::new(0, 0)));
        assert!(!Rect::new(0, 0, 100, 0).contains_point(Point::new(0, 0)));
        assert!(!Rect::new(5, 5, 0, 0).contains_point(Point::new(5, 5)));
    }

    #[test]
    fn test_negative_origin() {
        // Outputs left of the primary one have negative x.
        let rect = Rect::new(-1920, 0, 1920, 1080);
        assert!(rect.contains_point(Point::new(-1, 0)));
        assert!(!rect.contains_point(Point::new(0, 0)));
    }

    #[test]
    fn test_rect_near_i32_max_does_not_overflow() {
        let rect = Rect::new(i32::MAX - 1, 0, 10, 10);
        assert!(rect.contains_point(Point::new(i32::MAX, 5)));
    }

    #[test]
    fn test_rect_deserializes_from_tree_json() {
        let rect: Rect =
            serde_json::from_str(r#"{"x": 5, "y": 30, "width": 960, "height": 1050}"#).unwrap();
        assert_eq!(rect, Rect::new(5, 30, 960, 1050));
    }

    #[test]
    fn test_display() {
        assert_eq!(Rect::new(1, 2, 3, 4).to_string(), "x=1, y=2, w=3, h=4");
        assert_eq!(Point::new(7, 8).to_string(), "x=7, y=8");
    }
}
