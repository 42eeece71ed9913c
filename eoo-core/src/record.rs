use std::fmt::{self, Display};

use serde::{Deserialize, Serialize};

use crate::geometry::R2;

/// Locality status, as recorded in the input.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Status {
    Extant,
    Uncertain,
    Other(String),
}

impl From<&str> for Status {
    fn from(s: &str) -> Self {
        match s {
            "Extant" => Status::Extant,
            "Uncertain" => Status::Uncertain,
            other => Status::Other(other.to_string()),
        }
    }
}

impl From<String> for Status {
    fn from(s: String) -> Self {
        match s.as_str() {
            "Extant" => Status::Extant,
            "Uncertain" => Status::Uncertain,
            _ => Status::Other(s),
        }
    }
}

impl From<Status> for String {
    fn from(s: Status) -> Self {
        s.to_string()
    }
}

impl Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Status::Extant => write!(f, "Extant"),
            Status::Uncertain => write!(f, "Uncertain"),
            Status::Other(s) => write!(f, "{}", s),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OccurrenceRecord {
    pub longitude: f64,
    pub latitude: f64,
    pub status: Status,
}

impl OccurrenceRecord {
    pub fn new(longitude: f64, latitude: f64, status: impl Into<Status>) -> Self {
        OccurrenceRecord { longitude, latitude, status: status.into() }
    }

    pub fn point(&self) -> R2 {
        R2 { x: self.longitude, y: self.latitude }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    /// Every locality
    Historical,
    /// Extant and uncertain localities
    CurrentMax,
    /// Extant localities only
    CurrentMin,
}

impl Category {
    pub const ALL: [Category; 3] = [Category::Historical, Category::CurrentMax, Category::CurrentMin];

    pub fn includes(&self, status: &Status) -> bool {
        match self {
            Category::Historical => true,
            Category::CurrentMax => matches!(status, Status::Extant | Status::Uncertain),
            Category::CurrentMin => matches!(status, Status::Extant),
        }
    }

    /// Column header in tab-separated output.
    pub fn header(&self) -> &'static str {
        match self {
            Category::Historical => "Hist",
            Category::CurrentMax => "CMax",
            Category::CurrentMin => "CMin",
        }
    }
}

impl Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Category::Historical => write!(f, "historical"),
            Category::CurrentMax => write!(f, "current max"),
            Category::CurrentMin => write!(f, "current min"),
        }
    }
}
