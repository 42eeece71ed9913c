use crate::geometry::r2::R2;

/// Failures of the geometry / projection capability.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum GeometryError {
    #[error("Non-finite coordinate {0}")]
    NonFinite(R2),

    #[error("Latitude {lat} of {point} is outside (-90, 90)")]
    LatitudeOutOfRange { lat: f64, point: R2 },

    #[error("{zone}: {message}")]
    Proj { zone: String, message: String },

    #[error("Projection of {point} into {zone} produced a non-finite coordinate")]
    Projection { zone: String, point: R2 },
}

#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum EooError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("{category}: {source}")]
    Geometry {
        category: String,
        #[source]
        source: GeometryError,
    },

    #[error("{category}: {outside_pct:.2}% of the hull lies outside every zone")]
    OutsideZones { category: String, outside_pct: f64 },

    #[error("Invalid zones: {0}")]
    InvalidZones(String),

    #[error("Invalid log level: {0}")]
    InvalidLogLevel(String),
}
