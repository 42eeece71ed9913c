//! Splits occurrence records into the three categories and measures each one's convex hull.

use std::fmt::{self, Display};

use log::{debug, info};
use rayon::prelude::*;
use serde::Serialize;

use crate::{
    area::ZoneAreaEstimator,
    engine::GeometryEngine,
    error::{EooError, GeometryError},
    geometry::{Hull, R2},
    record::{Category, OccurrenceRecord},
    zone::Zones,
};

/// Fewest points a category needs for its area to be defined.
pub const MIN_POINTS: usize = 3;

/// Area of one category, or `Undefined` if it had fewer than [`MIN_POINTS`] points.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(into = "Option<f64>")]
pub enum AreaResult {
    /// km²
    Defined(f64),
    Undefined,
}

impl AreaResult {
    pub fn km2(&self) -> Option<f64> {
        match self {
            AreaResult::Defined(km2) => Some(*km2),
            AreaResult::Undefined => None,
        }
    }

    pub fn is_defined(&self) -> bool {
        matches!(self, AreaResult::Defined(_))
    }
}

impl From<AreaResult> for Option<f64> {
    fn from(r: AreaResult) -> Self {
        r.km2()
    }
}

/// Numeric value, or an empty string when undefined.
impl Display for AreaResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AreaResult::Defined(km2) => write!(f, "{}", km2),
            AreaResult::Undefined => Ok(()),
        }
    }
}

/// Points of each category, in record order; a record may appear in several categories.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CategoryPoints {
    pub historical: Vec<R2>,
    pub current_max: Vec<R2>,
    pub current_min: Vec<R2>,
}

impl CategoryPoints {
    pub fn partition(records: &[OccurrenceRecord]) -> Self {
        let mut points = CategoryPoints::default();
        for record in records {
            for category in Category::ALL {
                if category.includes(&record.status) {
                    points.get_mut(category).push(record.point());
                }
            }
        }
        debug!(
            "partitioned {} records: {} historical, {} current max, {} current min",
            records.len(),
            points.historical.len(),
            points.current_max.len(),
            points.current_min.len(),
        );
        points
    }

    pub fn get(&self, category: Category) -> &[R2] {
        match category {
            Category::Historical => &self.historical,
            Category::CurrentMax => &self.current_max,
            Category::CurrentMin => &self.current_min,
        }
    }

    fn get_mut(&mut self, category: Category) -> &mut Vec<R2> {
        match category {
            Category::Historical => &mut self.historical,
            Category::CurrentMax => &mut self.current_max,
            Category::CurrentMin => &mut self.current_min,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct EooResults {
    pub historical: AreaResult,
    pub current_max: AreaResult,
    pub current_min: AreaResult,
}

impl EooResults {
    pub fn get(&self, category: Category) -> AreaResult {
        match category {
            Category::Historical => self.historical,
            Category::CurrentMax => self.current_max,
            Category::CurrentMin => self.current_min,
        }
    }

    /// (historical, current max, current min)
    pub fn to_array(&self) -> [AreaResult; 3] {
        [self.historical, self.current_max, self.current_min]
    }

    fn from_array([historical, current_max, current_min]: [AreaResult; 3]) -> Self {
        EooResults { historical, current_max, current_min }
    }
}

/// What to do when part of a hull lies outside every zone.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CoveragePolicy {
    /// Drop the uncovered part from the area and log a warning.
    #[default]
    Warn,
    /// Fail the category with [`EooError::OutsideZones`].
    Strict,
}

pub struct CategoryPipeline<'a, E> {
    estimator: ZoneAreaEstimator<'a, E>,
    coverage: CoveragePolicy,
}

impl<'a, E: GeometryEngine> CategoryPipeline<'a, E> {
    pub fn new(zones: &'a Zones, engine: &'a E) -> Self {
        CategoryPipeline { estimator: ZoneAreaEstimator::new(zones, engine), coverage: CoveragePolicy::default() }
    }

    pub fn with_coverage(mut self, coverage: CoveragePolicy) -> Self {
        self.coverage = coverage;
        self
    }

    /// Area of the convex hull of `points`; `Undefined` below [`MIN_POINTS`], without building a hull.
    pub fn category_area(&self, category: Category, points: &[R2]) -> Result<AreaResult, EooError> {
        if points.len() < MIN_POINTS {
            info!("{}: {} points, area undefined", category, points.len());
            return Ok(AreaResult::Undefined);
        }
        if let Some(p) = points.iter().find(|p| !p.is_finite()) {
            let source = GeometryError::NonFinite(*p);
            return Err(EooError::Geometry { category: category.to_string(), source });
        }
        let hull = Hull::new(points)?;
        let estimate = self
            .estimator
            .estimate(&hull)
            .map_err(|source| EooError::Geometry { category: category.to_string(), source })?;
        if self.coverage == CoveragePolicy::Strict && estimate.has_gap() {
            return Err(EooError::OutsideZones {
                category: category.to_string(),
                outside_pct: estimate.outside_fraction() * 100.,
            });
        }
        info!(
            "{}: {} points, {} hull vertices, {:.3} km²",
            category,
            points.len(),
            hull.num_vertices(),
            estimate.km2
        );
        Ok(AreaResult::Defined(estimate.km2))
    }

    /// (historical, current max, current min) areas of `records`.
    pub fn run(&self, records: &[OccurrenceRecord]) -> Result<EooResults, EooError> {
        let points = CategoryPoints::partition(records);
        Ok(EooResults {
            historical: self.category_area(Category::Historical, points.get(Category::Historical))?,
            current_max: self.category_area(Category::CurrentMax, points.get(Category::CurrentMax))?,
            current_min: self.category_area(Category::CurrentMin, points.get(Category::CurrentMin))?,
        })
    }
}

impl<'a, E: GeometryEngine + Sync> CategoryPipeline<'a, E> {
    /// Like [`run`](Self::run), with the three categories evaluated on the rayon pool. Results are identical.
    pub fn run_parallel(&self, records: &[OccurrenceRecord]) -> Result<EooResults, EooError> {
        let points = CategoryPoints::partition(records);
        let areas = Category::ALL
            .par_iter()
            .map(|&category| self.category_area(category, points.get(category)))
            .collect::<Result<Vec<_>, _>>()?;
        let areas: [AreaResult; 3] = areas
            .try_into()
            .map_err(|v: Vec<_>| EooError::InvalidInput(format!("expected 3 category results, got {}", v.len())))?;
        Ok(EooResults::from_array(areas))
    }
}

/// Runs the default pipeline: warn on zone-coverage gaps.
pub fn run<E: GeometryEngine>(
    records: &[OccurrenceRecord],
    zones: &Zones,
    engine: &E,
) -> Result<EooResults, EooError> {
    CategoryPipeline::new(zones, engine).run(records)
}
