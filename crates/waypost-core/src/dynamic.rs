//! Coordinate pairs computed on read rather than at construction time.
//!
//! The host engine queries anchor coordinates only at the moment it needs to
//! position a popup or tooltip, which is exactly when the true rendered size
//! of the injected content is known. Eager computation would capture stale or
//! zero sizes (e.g. before first paint), so a [`DynamicPoint`] re-executes
//! its getters on every read.

use std::fmt;
use std::rc::Rc;

use crate::geometry::Point;

/// A 2D point whose components are computed on read from a pair of
/// zero-argument getter closures.
///
/// Getters must be side-effect-free with respect to their captured inputs;
/// they may read live measurements at call time. Reads are never cached.
/// Cloning shares the underlying getters, so clones compare equal under
/// [`DynamicPoint::ptr_eq`] while their reads continue to vary.
#[derive(Clone)]
pub struct DynamicPoint {
    get_x: Rc<dyn Fn() -> f32>,
    get_y: Rc<dyn Fn() -> f32>,
}

impl DynamicPoint {
    /// Wraps the given getters into a coordinate-pair-shaped value.
    pub fn new(get_x: impl Fn() -> f32 + 'static, get_y: impl Fn() -> f32 + 'static) -> Self {
        Self {
            get_x: Rc::new(get_x),
            get_y: Rc::new(get_y),
        }
    }

    /// Computes the x-coordinate by invoking the x getter.
    pub fn x(&self) -> f32 {
        (self.get_x)()
    }

    /// Computes the y-coordinate by invoking the y getter.
    pub fn y(&self) -> f32 {
        (self.get_y)()
    }

    /// Reads both components into a plain [`Point`].
    pub fn read(&self) -> Point {
        Point::new(self.x(), self.y())
    }

    /// Whether two proxies share the same underlying getters.
    ///
    /// Proxies are stable references whose reads vary, so identity rather
    /// than read value is the meaningful notion of equality for memoization.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.get_x, &other.get_x) && Rc::ptr_eq(&self.get_y, &other.get_y)
    }
}

impl fmt::Debug for DynamicPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DynamicPoint")
            .field("x", &self.x())
            .field("y", &self.y())
            .finish()
    }
}

/// An anchor coordinate pair: a static point, or a [`DynamicPoint`] whose
/// value reflects live measurement at read time.
#[derive(Debug, Clone)]
pub enum Anchor {
    Static(Point),
    Dynamic(DynamicPoint),
}

impl Anchor {
    /// The current x-coordinate.
    pub fn x(&self) -> f32 {
        match self {
            Self::Static(point) => point.x(),
            Self::Dynamic(point) => point.x(),
        }
    }

    /// The current y-coordinate.
    pub fn y(&self) -> f32 {
        match self {
            Self::Static(point) => point.y(),
            Self::Dynamic(point) => point.y(),
        }
    }

    /// Reads the current value into a plain [`Point`].
    pub fn read(&self) -> Point {
        Point::new(self.x(), self.y())
    }
}

/// Static anchors compare by value; dynamic anchors compare by getter
/// identity, since their reads legitimately vary between otherwise identical
/// computations.
impl PartialEq for Anchor {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Static(lhs), Self::Static(rhs)) => lhs == rhs,
            (Self::Dynamic(lhs), Self::Dynamic(rhs)) => lhs.ptr_eq(rhs),
            _ => false,
        }
    }
}

impl From<Point> for Anchor {
    fn from(point: Point) -> Self {
        Self::Static(point)
    }
}

impl From<DynamicPoint> for Anchor {
    fn from(point: DynamicPoint) -> Self {
        Self::Dynamic(point)
    }
}
