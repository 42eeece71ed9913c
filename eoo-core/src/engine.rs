use geo::{Area, BooleanOps, Coord, MapCoords};
use log::trace;
use proj4rs::{proj::Proj, transform::transform};

use crate::{
    error::GeometryError,
    geometry::{Polygon, Rect, R2},
    zone::Zone,
};

/// Geographic source of every projection: longitude/latitude on WGS84.
pub const GEOGRAPHIC: &str = "+proj=longlat +ellps=WGS84 +datum=WGS84 +no_defs";

/// The geometry operations area estimation relies on: clip, reproject, measure.
pub trait GeometryEngine {
    /// Parts of `polygon` inside `rect`, both in geographic coordinates; parts without area are dropped.
    fn intersection(&self, polygon: &Polygon, rect: &Rect) -> Result<Vec<Polygon>, GeometryError>;

    /// Reprojects `polygon` from geographic coordinates into `zone`'s planar reference.
    fn project(&self, polygon: &Polygon, zone: &Zone) -> Result<Polygon, GeometryError>;

    /// Area of `polygon` in the units of its current coordinate space, never negative.
    fn planar_area(&self, polygon: &Polygon) -> f64;
}

/// Default engine: `geo` boolean ops and areas, `proj4rs` projections.
///
/// Vertices are projected and edges stay straight lines in the projected plane, matching what a GIS measures
/// after reprojecting a vertex ring. The zone's [`Proj`] is built once per `project` call.
#[derive(Debug, Clone, Copy, Default)]
pub struct GeoEngine;

impl GeometryEngine for GeoEngine {
    fn intersection(&self, polygon: &Polygon, rect: &Rect) -> Result<Vec<Polygon>, GeometryError> {
        if let Some(v) = polygon.vertices.iter().find(|v| !v.is_finite()) {
            return Err(GeometryError::NonFinite(*v));
        }
        if polygon.is_degenerate() {
            return Ok(vec![]);
        }
        let Some(bounds) = polygon.bounds() else {
            return Ok(vec![]);
        };
        // Clipping to the overlap of the two boxes keeps the overlay's working grid at the polygon's scale.
        let window = match rect.overlap(&bounds) {
            None => return Ok(vec![]),
            Some(window) if window == bounds => return Ok(vec![polygon.clone()]),
            Some(window) => window,
        };
        let parts: Vec<Polygon> = polygon
            .to_geo()
            .intersection(&window.to_geo())
            .into_iter()
            .filter(|part| part.unsigned_area() > 0.)
            .map(Polygon::from)
            .collect();
        trace!("{} ∩ {}: {} parts", polygon, rect, parts.len());
        Ok(parts)
    }

    fn project(&self, polygon: &Polygon, zone: &Zone) -> Result<Polygon, GeometryError> {
        let src = Proj::from_proj_string(GEOGRAPHIC)
            .map_err(|e| GeometryError::Proj { zone: zone.name().to_string(), message: e.to_string() })?;
        let dst = zone.proj()?;
        let projected = polygon.to_geo().try_map_coords(|c| forward(&src, &dst, zone, c))?;
        Ok(projected.into())
    }

    fn planar_area(&self, polygon: &Polygon) -> f64 {
        polygon.area()
    }
}

/// Longitude/latitude in degrees to `dst` coordinates.
fn forward(src: &Proj, dst: &Proj, zone: &Zone, c: Coord<f64>) -> Result<Coord<f64>, GeometryError> {
    let point = R2::from(c);
    if !point.is_finite() {
        return Err(GeometryError::NonFinite(point));
    }
    if !(-90. < point.y && point.y < 90.) {
        return Err(GeometryError::LatitudeOutOfRange { lat: point.y, point });
    }
    let mut xyz = (point.x.to_radians(), point.y.to_radians(), 0.);
    transform(src, dst, &mut xyz)
        .map_err(|e| GeometryError::Proj { zone: zone.name().to_string(), message: e.to_string() })?;
    let projected = R2::new(xyz.0, xyz.1);
    if !projected.is_finite() {
        return Err(GeometryError::Projection { zone: zone.name().to_string(), point });
    }
    Ok(projected.into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::zone::Zones;
    use approx::{assert_abs_diff_eq, assert_relative_eq};
    use test_log::test;

    fn polygon(v: &[(f64, f64)]) -> Polygon {
        Polygon::new(v.iter().map(|&p| p.into()).collect())
    }

    #[test]
    fn non_finite_polygon() {
        let p = polygon(&[(10., -10.), (f64::INFINITY, -10.), (10., -11.)]);
        let rect = Rect::from_corners(R2::new(6., 0.), R2::new(12., -80.));
        assert!(matches!(GeoEngine.intersection(&p, &rect), Err(GeometryError::NonFinite(_))));
        let zones = Zones::southern_africa();
        assert!(matches!(GeoEngine.project(&p, &zones[0]), Err(GeometryError::NonFinite(_))));
    }

    #[test]
    fn pole_is_rejected() {
        let zones = Zones::southern_africa();
        let p = polygon(&[(10., -90.), (11., -89.), (10., -89.)]);
        assert!(matches!(
            GeoEngine.project(&p, &zones[0]),
            Err(GeometryError::LatitudeOutOfRange { lat, .. }) if lat == -90.
        ));
    }

    #[test]
    fn utm_reference_points() {
        let zones = Zones::southern_africa();
        let cases = [
            (1, (15., 0.), (500_000., 10_000_000.)),
            (1, (16., 0.), (611_280.651, 10_000_000.)),
            (1, (15., -10.), (500_000., 8_894_587.509)),
            (1, (12., -10.), (171_071.264, 8_893_091.146)),
            (1, (13.3, -25.7), (329_422.447, 7_156_440.959)),
            (2, (18.4241, -33.9249), (261_881.599, 6_243_182.355)),
            (5, (40., -70.), (538_169.782, 2_233_813.849)),
        ];
        for (zone, (lon, lat), (easting, northing)) in cases {
            // Projected as the first vertex of a small triangle
            let p = polygon(&[(lon, lat), (lon + 0.1, lat), (lon, lat - 0.1)]);
            let projected = GeoEngine.project(&p, &zones[zone]).unwrap();
            let v = projected.vertices[0];
            assert_abs_diff_eq!(v.x, easting, epsilon = 1e-2);
            assert_abs_diff_eq!(v.y, northing, epsilon = 1e-2);
        }
    }

    #[test]
    fn project_degree_cell() {
        // 1° × 1° cell just south of the equator, west of the zone 33 central meridian.
        let zones = Zones::southern_africa();
        let cell = polygon(&[(14., 0.), (14., -1.), (15., -1.), (15., 0.)]);
        let projected = GeoEngine.project(&cell, &zones[1]).unwrap();
        assert_eq!(projected.num_vertices(), 4);
        assert_relative_eq!(GeoEngine.planar_area(&projected) / 1e6, 12_299.880, epsilon = 1e-2);
    }

    #[test]
    fn intersection_inside_disjoint_touching() {
        let rect = Rect::from_corners(R2::new(12., -80.), R2::new(18., 0.));
        let inside = polygon(&[(13., -10.), (14., -10.), (13., -11.)]);
        assert_eq!(GeoEngine.intersection(&inside, &rect).unwrap(), vec![inside.clone()]);

        let disjoint = polygon(&[(20., -10.), (21., -10.), (20., -11.)]);
        assert!(GeoEngine.intersection(&disjoint, &rect).unwrap().is_empty());

        // Shares only the x = 18 edge: zero-area overlap
        let touching = polygon(&[(18., -10.), (19., -10.), (18., -11.)]);
        assert!(GeoEngine.intersection(&touching, &rect).unwrap().is_empty());

        let collinear = polygon(&[(13., -10.), (14., -11.), (15., -12.)]);
        assert!(GeoEngine.intersection(&collinear, &rect).unwrap().is_empty());
    }

    #[test]
    fn intersection_partitions_area() {
        let t = polygon(&[(10., -10.), (14., -11.), (11., -15.)]);
        let left = Rect::from_corners(R2::new(6., 0.), R2::new(12., -80.));
        let right = Rect::from_corners(R2::new(12., 0.), R2::new(18., -80.));
        let parts: Vec<Polygon> = [left, right]
            .iter()
            .flat_map(|rect| GeoEngine.intersection(&t, rect).unwrap())
            .collect();
        assert_eq!(parts.len(), 2);
        let total: f64 = parts.iter().map(|p| GeoEngine.planar_area(p)).sum();
        assert_relative_eq!(total, t.area(), max_relative = 1e-6);
        for v in &parts[0].vertices {
            assert!(v.x <= 12. + 1e-6);
        }
        for v in &parts[1].vertices {
            assert!(v.x >= 12. - 1e-6);
        }
    }
}
