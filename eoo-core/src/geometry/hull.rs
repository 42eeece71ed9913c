use log::debug;

use crate::error::EooError;

use super::{polygon::Polygon, r2::R2};

/// Convex hull of a point set.
///
/// Vertices are distinct input points in counter-clockwise order, starting from the lowest-x (then lowest-y)
/// point. Points lying on a hull edge between its two endpoints are dropped, so the hull is strictly convex.
/// Collinear or coincident input yields a degenerate hull with fewer than 3 vertices and zero area.
#[derive(Clone, Debug, PartialEq, derive_more::Deref)]
pub struct Hull(pub Polygon);

impl Hull {
    /// Andrew's monotone chain.
    ///
    /// Fails with [`EooError::InvalidInput`] for fewer than 3 points (duplicates counted) or non-finite
    /// coordinates.
    pub fn new(points: &[R2]) -> Result<Hull, EooError> {
        if points.len() < 3 {
            return Err(EooError::InvalidInput(format!(
                "convex hull needs at least 3 points, got {}",
                points.len()
            )));
        }
        if let Some(p) = points.iter().find(|p| !p.is_finite()) {
            return Err(EooError::InvalidInput(format!("non-finite point {}", p)));
        }

        let mut sorted = points.to_vec();
        sorted.sort_by(|a, b| a.x.total_cmp(&b.x).then(a.y.total_cmp(&b.y)));
        sorted.dedup();
        if sorted.len() < 3 {
            debug!("hull: {} points collapse to {} distinct", points.len(), sorted.len());
            return Ok(Hull(Polygon::new(sorted)));
        }

        let mut lower: Vec<R2> = Vec::with_capacity(sorted.len());
        for p in sorted.iter() {
            while let [.., a, b] = lower.as_slice() {
                if a.cross(b, p) > 0. {
                    break;
                }
                lower.pop();
            }
            lower.push(*p);
        }
        let mut upper: Vec<R2> = Vec::with_capacity(sorted.len());
        for p in sorted.iter().rev() {
            while let [.., a, b] = upper.as_slice() {
                if a.cross(b, p) > 0. {
                    break;
                }
                upper.pop();
            }
            upper.push(*p);
        }
        // Each chain ends with the other's first point.
        lower.pop();
        upper.pop();
        lower.extend(upper);

        debug!("hull: {} points → {} vertices", points.len(), lower.len());
        Ok(Hull(Polygon::new(lower)))
    }
}
