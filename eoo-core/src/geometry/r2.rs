use std::fmt::{Display, Formatter, self};
use approx::{AbsDiffEq, RelativeEq};

use geo::Coord;
use serde::{Deserialize, Serialize};

/// A point in a 2-D coordinate space.
///
/// In geographic space `x` is longitude and `y` is latitude, both in degrees; after projection they are
/// easting and northing in meters.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct R2 {
    pub x: f64,
    pub y: f64,
}

impl R2 {
    pub fn new(x: f64, y: f64) -> Self {
        R2 { x, y }
    }

    /// z-component of `(a - self) × (b - self)`; positive when `self → a → b` turns counter-clockwise.
    pub fn cross(&self, a: &R2, b: &R2) -> f64 {
        (a.x - self.x) * (b.y - self.y) - (a.y - self.y) * (b.x - self.x)
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl Display for R2 {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "({:.3}, {:.3})", self.x, self.y)
    }
}

impl From<(f64, f64)> for R2 {
    fn from((x, y): (f64, f64)) -> Self {
        R2 { x, y }
    }
}

impl From<Coord<f64>> for R2 {
    fn from(c: Coord<f64>) -> Self {
        R2 { x: c.x, y: c.y }
    }
}

impl From<R2> for Coord<f64> {
    fn from(p: R2) -> Self {
        Coord { x: p.x, y: p.y }
    }
}

impl AbsDiffEq for R2 {
    type Epsilon = f64;
    fn default_epsilon() -> Self::Epsilon {
        f64::default_epsilon()
    }
    fn abs_diff_eq(&self, other: &Self, epsilon: Self::Epsilon) -> bool {
        self.x.abs_diff_eq(&other.x, epsilon) && self.y.abs_diff_eq(&other.y, epsilon)
    }
}

impl RelativeEq for R2 {
    fn default_max_relative() -> Self::Epsilon {
        f64::default_max_relative()
    }
    fn relative_eq(&self, other: &Self, epsilon: Self::Epsilon, max_relative: Self::Epsilon) -> bool {
        self.x.relative_eq(&other.x, epsilon, max_relative) && self.y.relative_eq(&other.y, epsilon, max_relative)
    }
}
