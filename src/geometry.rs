//! Geometric primitives for dial layout.
//!
//! All coordinates are in bitmap pixel space: the origin is the top-left
//! corner and `y` grows downwards. Angles are in degrees measured clockwise
//! from the 3 o'clock axis, which is what "clockwise" means once `y` points
//! down.

/// A 2D point with floating-point coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    /// X coordinate.
    pub x: f32,
    /// Y coordinate.
    pub y: f32,
}

impl Point {
    /// Create a new point.
    #[must_use]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Point at `radius` from `center` in the direction of `degrees`.
    ///
    /// ```
    /// use gaugeviz::geometry::Point;
    ///
    /// let top = Point::polar(Point::new(50.0, 50.0), 10.0, -90.0);
    /// assert!((top.x - 50.0).abs() < 1e-4);
    /// assert!((top.y - 40.0).abs() < 1e-4);
    /// ```
    #[must_use]
    pub fn polar(center: Self, radius: f32, degrees: f64) -> Self {
        let rad = degrees.to_radians();
        Self::new(
            center.x + radius * rad.cos() as f32,
            center.y + radius * rad.sin() as f32,
        )
    }
}

/// A rectangle defined by position and size.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    /// X coordinate of the top-left corner.
    pub x: f32,
    /// Y coordinate of the top-left corner.
    pub y: f32,
    /// Width of the rectangle.
    pub width: f32,
    /// Height of the rectangle.
    pub height: f32,
}

impl Rect {
    /// Create a new rectangle.
    #[must_use]
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self { x, y, width, height }
    }

    /// Square of side `side` at the origin.
    #[must_use]
    pub const fn square(side: f32) -> Self {
        Self::new(0.0, 0.0, side, side)
    }

    /// Right edge.
    #[must_use]
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    /// Bottom edge.
    #[must_use]
    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    /// Get the center point of the rectangle.
    #[must_use]
    pub fn center(&self) -> Point {
        Point::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_polar_quadrants() {
        let c = Point::new(0.0, 0.0);
        let east = Point::polar(c, 1.0, 0.0);
        let south = Point::polar(c, 1.0, 90.0);
        let west = Point::polar(c, 1.0, 180.0);
        assert_relative_eq!(east.x, 1.0, epsilon = 1e-6);
        // Clockwise from 3 o'clock in y-down space: +90 points down.
        assert_relative_eq!(south.y, 1.0, epsilon = 1e-6);
        assert_relative_eq!(west.x, -1.0, epsilon = 1e-6);
    }

    #[test]
    fn test_rect_edges_and_center() {
        let rect = Rect::new(0.0, 0.0, 10.0, 10.0);
        assert_eq!(rect.center(), Point::new(5.0, 5.0));
        assert_eq!((rect.right(), rect.bottom()), (10.0, 10.0));
        assert_eq!(Rect::square(4.0), Rect::new(0.0, 0.0, 4.0, 4.0));
    }
}
