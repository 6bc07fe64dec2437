//! Geometric primitives.
//!
//! The engine never measures layout itself. The host supplies the rectangles
//! of rendered items and column sentinels on every probe, in whatever logical
//! coordinate space it renders in. All values are `f64`.

use std::ops::{Add, AddAssign};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A point in the host's logical coordinate space.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to another point.
    pub fn distance(self, other: Point) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }

    /// Squared length of the vector from the origin to this point.
    pub fn length_sq(self) -> f64 {
        self.x * self.x + self.y * self.y
    }
}

impl Add for Point {
    type Output = Point;

    fn add(self, other: Point) -> Point {
        Point::new(self.x + other.x, self.y + other.y)
    }
}

impl AddAssign for Point {
    fn add_assign(&mut self, other: Point) {
        *self = *self + other;
    }
}

/// A size in logical coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Size {
    pub w: f64,
    pub h: f64,
}

impl Size {
    pub const fn new(w: f64, h: f64) -> Self {
        Self { w, h }
    }
}

/// An axis-aligned rectangle: location of the top-left corner plus size.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Rect {
    pub loc: Point,
    pub size: Size,
}

impl Rect {
    pub const fn new(x: f64, y: f64, w: f64, h: f64) -> Self {
        Self {
            loc: Point::new(x, y),
            size: Size::new(w, h),
        }
    }

    pub const fn from_loc_and_size(loc: Point, size: Size) -> Self {
        Self { loc, size }
    }

    pub fn right(&self) -> f64 {
        self.loc.x + self.size.w
    }

    pub fn bottom(&self) -> f64 {
        self.loc.y + self.size.h
    }

    pub fn center(&self) -> Point {
        Point::new(self.loc.x + self.size.w / 2., self.loc.y + self.size.h / 2.)
    }

    /// The four corners in top-left, top-right, bottom-left, bottom-right
    /// order.
    pub fn corners(&self) -> [Point; 4] {
        [
            self.loc,
            Point::new(self.right(), self.loc.y),
            Point::new(self.loc.x, self.bottom()),
            Point::new(self.right(), self.bottom()),
        ]
    }

    /// Whether the point lies within the rectangle, edges inclusive.
    pub fn contains(&self, point: Point) -> bool {
        self.loc.x <= point.x
            && point.x <= self.right()
            && self.loc.y <= point.y
            && point.y <= self.bottom()
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;

    #[test]
    fn distance() {
        assert_relative_eq!(Point::new(0., 0.).distance(Point::new(3., 4.)), 5.);
        assert_relative_eq!(Point::new(-1., 2.).distance(Point::new(-1., 2.)), 0.);
    }

    #[test]
    fn corners_order() {
        let rect = Rect::new(10., 20., 100., 50.);
        assert_eq!(
            rect.corners(),
            [
                Point::new(10., 20.),
                Point::new(110., 20.),
                Point::new(10., 70.),
                Point::new(110., 70.),
            ]
        );
    }

    #[test]
    fn contains_is_edge_inclusive() {
        let rect = Rect::new(0., 0., 100., 50.);
        assert!(rect.contains(Point::new(0., 0.)));
        assert!(rect.contains(Point::new(100., 50.)));
        assert!(rect.contains(rect.center()));
        assert!(!rect.contains(Point::new(100.1, 25.)));
        assert!(!rect.contains(Point::new(50., -0.1)));
    }
}
