//! Fundamental planar geometry types for truss diagrams.

use nalgebra::{Point2, Vector2};
use serde::Serialize;

/// Position in the display plane, in the same arbitrary units as the input.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Point {
    /// Horizontal coordinate.
    pub x: f64,
    /// Vertical coordinate, stored in display orientation.
    pub y: f64,
}

impl Point {
    /// Create a [`Point`] with explicit coordinates.
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Convert the point into an algebraic point.
    #[must_use]
    pub fn to_point2(self) -> Point2<f64> {
        Point2::new(self.x, self.y)
    }

    /// Euclidean distance to `other`.
    ///
    /// # Examples
    /// ```
    /// use trussview::point;
    ///
    /// assert_eq!(point(0.0, 0.0).distance_to(point(3.0, -4.0)), 5.0);
    /// ```
    #[must_use]
    pub fn distance_to(self, other: Point) -> f64 {
        nalgebra::distance(&self.to_point2(), &other.to_point2())
    }
}

impl From<Point2<f64>> for Point {
    fn from(value: Point2<f64>) -> Self {
        Self::new(value.x, value.y)
    }
}

impl From<Point> for Point2<f64> {
    fn from(value: Point) -> Self {
        value.to_point2()
    }
}

/// A straight line between two points, as drawn for one link.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Segment {
    /// Position of the first endpoint.
    pub start: Point,
    /// Position of the second endpoint.
    pub end: Point,
}

impl Segment {
    /// Create a [`Segment`] from its endpoints.
    #[must_use]
    pub const fn new(start: Point, end: Point) -> Self {
        Self { start, end }
    }

    /// Length of the segment.
    #[must_use]
    pub fn length(&self) -> f64 {
        self.start.distance_to(self.end)
    }

    /// Offset from the start to the end of the segment.
    #[must_use]
    pub fn delta(&self) -> Vector2<f64> {
        self.end.to_point2() - self.start.to_point2()
    }
}

/// Axis-aligned rectangle enclosing a set of points.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Bounds {
    /// Corner with the smallest coordinates.
    pub min: Point,
    /// Corner with the largest coordinates.
    pub max: Point,
}

impl Bounds {
    /// Smallest rectangle containing every point, or `None` for no points.
    pub fn enclosing<I>(points: I) -> Option<Self>
    where
        I: IntoIterator<Item = Point>,
    {
        let mut points = points.into_iter();
        let first = points.next()?;
        let mut bounds = Self {
            min: first,
            max: first,
        };
        for p in points {
            bounds.min.x = bounds.min.x.min(p.x);
            bounds.min.y = bounds.min.y.min(p.y);
            bounds.max.x = bounds.max.x.max(p.x);
            bounds.max.y = bounds.max.y.max(p.y);
        }
        Some(bounds)
    }

    /// Horizontal extent.
    #[must_use]
    pub fn width(&self) -> f64 {
        self.max.x - self.min.x
    }

    /// Vertical extent.
    #[must_use]
    pub fn height(&self) -> f64 {
        self.max.y - self.min.y
    }
}

/// Convenience helper for creating [`Point`] instances.
///
/// # Examples
/// ```
/// use trussview::point;
///
/// let origin = point(0.0, 0.0);
/// assert_eq!(origin.x, 0.0);
/// ```
#[must_use]
pub const fn point(x: f64, y: f64) -> Point {
    Point::new(x, y)
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    #[test]
    fn point_to_point2_roundtrip() {
        let original = Point::new(1.5, -2.0);
        let algebraic: Point2<f64> = original.into();
        assert_eq!(algebraic, Point2::new(1.5, -2.0));
        assert_eq!(Point::from(algebraic), original);
    }

    #[test]
    fn segment_length_is_euclidean() {
        let segment = Segment::new(point(1.0, 1.0), point(4.0, 5.0));
        assert_relative_eq!(segment.length(), 5.0);
        assert_eq!(segment.delta(), Vector2::new(3.0, 4.0));
    }

    #[test]
    fn bounds_cover_all_points() {
        let bounds = Bounds::enclosing([point(2.0, -1.0), point(-3.0, 4.0), point(0.0, 0.0)])
            .expect("points supplied");
        assert_eq!(bounds.min, point(-3.0, -1.0));
        assert_eq!(bounds.max, point(2.0, 4.0));
        assert_relative_eq!(bounds.width(), 5.0);
        assert_relative_eq!(bounds.height(), 5.0);
    }

    #[test]
    fn bounds_of_nothing_is_none() {
        assert!(Bounds::enclosing(std::iter::empty()).is_none());
    }
}
