//! Ground area of a geographic polygon, measured zone by zone.
//!
//! The polygon is clipped to each zone's rectangle, the clipped part is reprojected into that zone's planar
//! reference and measured there. Zones don't overlap, so each part of the polygon is counted at most once.
//! Any part outside every zone contributes nothing; [`AreaEstimate::coverage`] reports how much of the
//! polygon that was.

use log::{debug, warn};
use serde::Serialize;

use crate::{
    engine::GeometryEngine,
    error::GeometryError,
    geometry::Polygon,
    zone::Zones,
};

pub const M2_PER_KM2: f64 = 1_000_000.;

/// Coverage below `1 - COVERAGE_TOLERANCE` is reported as a gap. Boolean overlay snaps vertices to a grid
/// about 1e-9 of the clipped extent, so split parts may miss a few parts per billion of the polygon.
pub const COVERAGE_TOLERANCE: f64 = 1e-6;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ZoneArea {
    pub zone: String,
    pub km2: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AreaEstimate {
    /// Total over all zones
    pub km2: f64,
    /// One entry per zone, in zone order; zones the polygon misses have `km2 == 0`.
    pub zones: Vec<ZoneArea>,
    /// Fraction of the polygon's geographic (degree²) area lying inside some zone; 1 for a degenerate polygon.
    pub coverage: f64,
}

impl AreaEstimate {
    pub fn outside_fraction(&self) -> f64 {
        1. - self.coverage
    }

    pub fn has_gap(&self) -> bool {
        self.coverage < 1. - COVERAGE_TOLERANCE
    }
}

pub struct ZoneAreaEstimator<'a, E> {
    zones: &'a Zones,
    engine: &'a E,
}

impl<'a, E: GeometryEngine> ZoneAreaEstimator<'a, E> {
    pub fn new(zones: &'a Zones, engine: &'a E) -> Self {
        ZoneAreaEstimator { zones, engine }
    }

    /// Total area in km².
    pub fn estimate_area(&self, polygon: &Polygon) -> Result<f64, GeometryError> {
        Ok(self.estimate(polygon)?.km2)
    }

    /// Total area in km², with the per-zone breakdown and zone coverage.
    pub fn estimate(&self, polygon: &Polygon) -> Result<AreaEstimate, GeometryError> {
        let engine = self.engine;
        let mut total_m2 = 0.;
        let mut covered_deg2 = 0.;
        let mut zones = Vec::with_capacity(self.zones.len());
        for zone in self.zones.iter() {
            let mut m2 = 0.;
            for part in engine.intersection(polygon, zone.bounds())? {
                covered_deg2 += engine.planar_area(&part);
                let projected = engine.project(&part, zone)?;
                m2 += engine.planar_area(&projected);
            }
            if m2 > 0. {
                debug!("{}: {:.3} km²", zone.name(), m2 / M2_PER_KM2);
            }
            total_m2 += m2;
            zones.push(ZoneArea { zone: zone.name().to_string(), km2: m2 / M2_PER_KM2 });
        }

        let polygon_deg2 = engine.planar_area(polygon);
        let coverage = if polygon_deg2 > 0. { (covered_deg2 / polygon_deg2).min(1.) } else { 1. };
        let estimate = AreaEstimate { km2: total_m2 / M2_PER_KM2, zones, coverage };
        if estimate.has_gap() {
            warn!(
                "{:.2}% of {} lies outside every zone and is not counted",
                estimate.outside_fraction() * 100.,
                polygon
            );
        }
        Ok(estimate)
    }
}
