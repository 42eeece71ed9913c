//! Fixed geographic rectangles, each measured in its own locally accurate projection.

use std::fmt::{self, Display};

use log::debug;
use proj4rs::proj::Proj;
use serde::{Deserialize, Serialize};

use crate::{
    error::{EooError, GeometryError},
    geometry::{Rect, R2},
};

#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Hemisphere {
    North,
    South,
}

impl Hemisphere {
    /// EPSG code of WGS84 UTM zone 0 in this hemisphere; zone `n` is this plus `n`.
    fn utm_epsg_base(&self) -> u32 {
        match self {
            Hemisphere::North => 32600,
            Hemisphere::South => 32700,
        }
    }
}

/// Planar reference a zone's area is measured in, on the WGS84 datum.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ZoneProjection {
    Utm { zone: u8, hemisphere: Hemisphere },
    TransverseMercator { lon0: f64, k0: f64, false_easting: f64, false_northing: f64 },
    /// Any PROJ.4 definition string.
    Proj { definition: String },
}

impl ZoneProjection {
    pub fn proj_string(&self) -> String {
        match self {
            ZoneProjection::Utm { zone, hemisphere } => {
                let south = match hemisphere {
                    Hemisphere::North => "",
                    Hemisphere::South => " +south",
                };
                format!("+proj=utm +zone={}{} +datum=WGS84 +units=m +no_defs", zone, south)
            }
            ZoneProjection::TransverseMercator { lon0, k0, false_easting, false_northing } => format!(
                "+proj=tmerc +lat_0=0 +lon_0={} +k={} +x_0={} +y_0={} +datum=WGS84 +units=m +no_defs",
                lon0, k0, false_easting, false_northing
            ),
            ZoneProjection::Proj { definition } => definition.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Zone {
    name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    epsg: Option<u32>,
    bounds: Rect,
    projection: ZoneProjection,
}

impl Zone {
    pub fn new(name: impl Into<String>, epsg: Option<u32>, bounds: Rect, projection: ZoneProjection) -> Self {
        Zone { name: name.into(), epsg, bounds, projection }
    }

    /// WGS84 UTM zone covering its full 6° of longitude, between latitudes `lat_min` and `lat_max`.
    pub fn utm(zone: u8, hemisphere: Hemisphere, lat_min: f64, lat_max: f64) -> Self {
        let lon_min = zone as f64 * 6. - 186.;
        let letter = match hemisphere {
            Hemisphere::North => 'N',
            Hemisphere::South => 'S',
        };
        Zone::new(
            format!("UTM {}{}", zone, letter),
            Some(hemisphere.utm_epsg_base() + zone as u32),
            Rect::from_corners(R2::new(lon_min, lat_min), R2::new(lon_min + 6., lat_max)),
            ZoneProjection::Utm { zone, hemisphere },
        )
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn epsg(&self) -> Option<u32> {
        self.epsg
    }

    pub fn bounds(&self) -> &Rect {
        &self.bounds
    }

    pub fn projection(&self) -> &ZoneProjection {
        &self.projection
    }

    /// Builds this zone's target projection.
    pub fn proj(&self) -> Result<Proj, GeometryError> {
        Proj::from_proj_string(&self.projection.proj_string())
            .map_err(|e| GeometryError::Proj { zone: self.name.clone(), message: e.to_string() })
    }
}

impl Display for Zone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.epsg {
            Some(epsg) => write!(f, "{} (EPSG:{}) {}", self.name, epsg, self.bounds),
            None => write!(f, "{} {}", self.name, self.bounds),
        }
    }
}

/// Ordered, non-overlapping zones. Built once and shared read-only by every area computation.
#[derive(Debug, Clone, PartialEq, derive_more::Deref)]
pub struct Zones(Vec<Zone>);

impl Zones {
    pub fn new(zones: Vec<Zone>) -> Result<Zones, EooError> {
        if zones.is_empty() {
            return Err(EooError::InvalidZones("no zones given".to_string()));
        }
        for zone in &zones {
            let b = zone.bounds();
            if !(b.min.is_finite() && b.max.is_finite()) || b.is_degenerate() {
                return Err(EooError::InvalidZones(format!("{}: bounds have no area", zone)));
            }
            if let ZoneProjection::Utm { zone: n, hemisphere } = &zone.projection {
                if !(1..=60).contains(n) {
                    return Err(EooError::InvalidZones(format!("{}: UTM zone {} not in 1..=60", zone.name(), n)));
                }
                let expected = hemisphere.utm_epsg_base() + *n as u32;
                if zone.epsg.is_some_and(|epsg| epsg != expected) {
                    return Err(EooError::InvalidZones(format!("{}: UTM zone {} is EPSG:{}", zone, n, expected)));
                }
            }
            zone.proj().map_err(|e| EooError::InvalidZones(e.to_string()))?;
        }
        for (i, a) in zones.iter().enumerate() {
            for b in &zones[i + 1..] {
                if let Some(overlap) = a.bounds().overlap(b.bounds()) {
                    return Err(EooError::InvalidZones(format!(
                        "{} and {} overlap in {}",
                        a.name(),
                        b.name(),
                        overlap
                    )));
                }
            }
        }
        debug!("zones: {}", zones.iter().map(|z| z.name()).collect::<Vec<_>>().join(", "));
        Ok(Zones(zones))
    }

    /// UTM zones 32S–37S: longitudes 6°E–42°E, latitudes 80°S–0°.
    pub fn southern_africa() -> Zones {
        Zones((32..=37).map(|n| Zone::utm(n, Hemisphere::South, -80., 0.)).collect())
    }

    /// Parses a JSON array of [`Zone`]s.
    pub fn from_json(json: &str) -> Result<Zones, EooError> {
        let zones: Vec<Zone> = serde_json::from_str(json).map_err(|e| EooError::InvalidZones(e.to_string()))?;
        Zones::new(zones)
    }

    pub fn to_json(&self) -> Result<String, EooError> {
        serde_json::to_string_pretty(&self.0).map_err(|e| EooError::InvalidZones(e.to_string()))
    }
}

impl Default for Zones {
    fn default() -> Self {
        Zones::southern_africa()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_log::test;

    #[test]
    fn southern_africa() {
        let zones = Zones::southern_africa();
        assert_eq!(zones.len(), 6);
        let names: Vec<_> = zones.iter().map(|z| z.name()).collect();
        assert_eq!(names, ["UTM 32S", "UTM 33S", "UTM 34S", "UTM 35S", "UTM 36S", "UTM 37S"]);
        assert_eq!(zones[0].epsg(), Some(32732));
        assert_eq!(zones[5].epsg(), Some(32737));
        assert_eq!(*zones[0].bounds(), Rect::from_corners(R2::new(6., -80.), R2::new(12., 0.)));
        assert_eq!(*zones[5].bounds(), Rect::from_corners(R2::new(36., -80.), R2::new(42., 0.)));
        assert_eq!(
            zones[1].projection().proj_string(),
            "+proj=utm +zone=33 +south +datum=WGS84 +units=m +no_defs"
        );
        // Contiguous: each zone starts where the previous one ends
        for w in zones.windows(2) {
            assert_eq!(w[0].bounds().max.x, w[1].bounds().min.x);
        }
        // Validates
        assert_eq!(Zones::new(zones.to_vec()).unwrap(), zones);
    }

    #[test]
    fn json_round_trip() {
        let zones = Zones::southern_africa();
        let json = zones.to_json().unwrap();
        assert_eq!(Zones::from_json(&json).unwrap(), zones);
    }

    #[test]
    fn custom_json() {
        let json = r#"[
            {
                "name": "local",
                "bounds": { "min": { "x": 10, "y": -20 }, "max": { "x": 20, "y": -10 } },
                "projection": { "type": "transverse_mercator", "lon0": 15, "k0": 1, "false_easting": 0, "false_northing": 0 }
            },
            {
                "name": "utm 35s by definition",
                "bounds": { "min": { "x": 20, "y": -20 }, "max": { "x": 30, "y": -10 } },
                "projection": { "type": "proj", "definition": "+proj=utm +zone=35 +south +ellps=WGS84 +units=m +no_defs" }
            }
        ]"#;
        let zones = Zones::from_json(json).unwrap();
        assert_eq!(zones.len(), 2);
        assert_eq!(zones[0].epsg(), None);
        assert_eq!(
            zones[0].projection().proj_string(),
            "+proj=tmerc +lat_0=0 +lon_0=15 +k=1 +x_0=0 +y_0=0 +datum=WGS84 +units=m +no_defs"
        );
        assert!(matches!(zones[1].projection(), ZoneProjection::Proj { .. }));
    }

    #[test]
    fn invalid() {
        assert!(matches!(Zones::new(vec![]), Err(EooError::InvalidZones(_))));
        let overlapping = vec![
            Zone::utm(33, Hemisphere::South, -80., 0.),
            Zone::utm(33, Hemisphere::South, -40., 0.),
        ];
        assert!(matches!(Zones::new(overlapping), Err(EooError::InvalidZones(_))));
        let flat = vec![Zone::utm(33, Hemisphere::South, -10., -10.)];
        assert!(matches!(Zones::new(flat), Err(EooError::InvalidZones(_))));
        let bad_number = vec![Zone::utm(61, Hemisphere::South, -80., 0.)];
        assert!(matches!(Zones::new(bad_number), Err(EooError::InvalidZones(_))));
        let bad_epsg = vec![Zone::new(
            "mislabelled",
            Some(32633),
            Rect::from_corners(R2::new(12., -80.), R2::new(18., 0.)),
            ZoneProjection::Utm { zone: 33, hemisphere: Hemisphere::South },
        )];
        assert!(matches!(Zones::new(bad_epsg), Err(EooError::InvalidZones(_))));
        let bad_definition = vec![Zone::new(
            "nonsense",
            None,
            Rect::from_corners(R2::new(12., -80.), R2::new(18., 0.)),
            ZoneProjection::Proj { definition: "+proj=nonsense".to_string() },
        )];
        assert!(matches!(Zones::new(bad_definition), Err(EooError::InvalidZones(_))));
        assert!(matches!(Zones::from_json("{"), Err(EooError::InvalidZones(_))));
    }
}
