//! Extent of occurrence (EOO): convex-hull range areas from point localities.
//!
//! Localities are split into three categories by status ([`record::Category`]); each category's convex hull
//! is measured by clipping it to fixed projected zones and summing the per-zone planar areas
//! ([`area::ZoneAreaEstimator`]).

pub mod area;
pub mod engine;
pub mod error;
pub mod geometry;
pub mod pipeline;
pub mod record;
pub mod zone;

// Re-export key types for external use
pub use area::{AreaEstimate, ZoneAreaEstimator};
pub use engine::{GeoEngine, GeometryEngine};
pub use error::{EooError, GeometryError};
pub use geometry::{Hull, Polygon, Rect, R2};
pub use pipeline::{run, AreaResult, CategoryPipeline, CoveragePolicy, EooResults};
pub use record::{Category, OccurrenceRecord, Status};
pub use zone::{Hemisphere, Zone, ZoneProjection, Zones};

/// Log level used when none is given.
pub const DEFAULT_LOG_LEVEL: &str = "warn";

/// Parse a log level string into LevelFilter; `None` or `""` gives [`DEFAULT_LOG_LEVEL`].
pub fn parse_log_level(level: Option<&str>) -> Result<log::LevelFilter, EooError> {
    match level {
        Some("") | None => parse_log_level(Some(DEFAULT_LOG_LEVEL)),
        Some("error") => Ok(log::LevelFilter::Error),
        Some("warn") => Ok(log::LevelFilter::Warn),
        Some("info") => Ok(log::LevelFilter::Info),
        Some("debug") => Ok(log::LevelFilter::Debug),
        Some("trace") => Ok(log::LevelFilter::Trace),
        Some(level) => Err(EooError::InvalidLogLevel(level.to_string())),
    }
}
