use std::fmt::{self, Display};

use derive_more::From;
use geo::{Area, BoundingRect, Coord, LineString};
use itertools::Itertools;
use serde::{Deserialize, Serialize};

use super::{r2::R2, rect::Rect};

/// Simple polygon stored as its distinct vertices; the closing edge from the last vertex back to the first is
/// implicit, and the first vertex is never repeated at the end.
#[derive(Debug, Clone, Default, From, PartialEq, Serialize, Deserialize)]
pub struct Polygon {
    pub vertices: Vec<R2>,
}

impl Polygon {
    pub fn new(vertices: Vec<R2>) -> Self {
        Polygon { vertices }
    }

    pub fn num_vertices(&self) -> usize {
        self.vertices.len()
    }

    /// Area with sign: positive for counter-clockwise winding, negative for clockwise.
    pub fn signed_area(&self) -> f64 {
        if self.vertices.len() < 3 {
            return 0.;
        }
        self.to_geo().signed_area()
    }

    /// Planar area, independent of winding order.
    pub fn area(&self) -> f64 {
        self.signed_area().abs()
    }

    /// Fewer than 3 vertices, or all of them collinear.
    pub fn is_degenerate(&self) -> bool {
        self.signed_area() == 0.
    }

    /// Axis-aligned bounding box, `None` for an empty polygon.
    pub fn bounds(&self) -> Option<Rect> {
        let rect = self.to_geo().bounding_rect()?;
        Some(Rect { min: rect.min().into(), max: rect.max().into() })
    }

    /// Single-ring `geo` polygon; `geo` closes the ring.
    pub fn to_geo(&self) -> geo::Polygon<f64> {
        let ring: Vec<Coord<f64>> = self.vertices.iter().map(|&v| v.into()).collect();
        geo::Polygon::new(LineString::from(ring), vec![])
    }
}

/// Exterior ring only, with the closing vertex dropped. Interior rings are ignored: intersections of convex
/// hulls with rectangles have none.
impl From<geo::Polygon<f64>> for Polygon {
    fn from(polygon: geo::Polygon<f64>) -> Self {
        let (exterior, _) = polygon.into_inner();
        let mut vertices: Vec<R2> = exterior.into_iter().map(R2::from).collect();
        if vertices.len() > 1 && vertices.first() == vertices.last() {
            vertices.pop();
        }
        Polygon { vertices }
    }
}

impl Display for Polygon {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Polygon({})", self.vertices.iter().map(|v| v.to_string()).join(", "))
    }
}
