use std::fmt::{self, Display};

use serde::{Deserialize, Serialize};

use super::r2::R2;

/// Closed axis-aligned rectangle.
#[derive(Debug, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub min: R2,
    pub max: R2,
}

impl Rect {
    /// Builds a rectangle from two opposite corners, in any order.
    pub fn from_corners(a: R2, b: R2) -> Self {
        Rect {
            min: R2 { x: a.x.min(b.x), y: a.y.min(b.y) },
            max: R2 { x: a.x.max(b.x), y: a.y.max(b.y) },
        }
    }

    pub fn width(&self) -> f64 {
        self.max.x - self.min.x
    }

    pub fn height(&self) -> f64 {
        self.max.y - self.min.y
    }

    pub fn is_degenerate(&self) -> bool {
        !(self.width() > 0. && self.height() > 0.)
    }

    /// Overlap of two rectangles, if it has positive area.
    pub fn overlap(&self, other: &Rect) -> Option<Rect> {
        let min = R2 { x: self.min.x.max(other.min.x), y: self.min.y.max(other.min.y) };
        let max = R2 { x: self.max.x.min(other.max.x), y: self.max.y.min(other.max.y) };
        let r = Rect { min, max };
        if r.is_degenerate() { None } else { Some(r) }
    }

    pub fn to_geo(&self) -> geo::Polygon<f64> {
        geo::Rect::new(self.min, self.max).to_polygon()
    }
}

impl Display for Rect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}]", self.min, self.max)
    }
}
