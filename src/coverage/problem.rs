//! Antenna placement instance and coverage geometry.

use crate::error::{AcoError, Result};

/// A point in the plane.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance_to(&self, other: &Point) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }

    /// Distance from `self` to the segment `a`–`b`.
    ///
    /// A degenerate segment (`a == b`) is treated as the point `a`.
    pub fn distance_to_segment(&self, a: &Point, b: &Point) -> f64 {
        let px = b.x - a.x;
        let py = b.y - a.y;
        let norm = px * px + py * py;
        if norm == 0.0 {
            return self.distance_to(a);
        }
        let u = (((self.x - a.x) * px + (self.y - a.y) * py) / norm).clamp(0.0, 1.0);
        let closest = Point::new(a.x + u * px, a.y + u * py);
        self.distance_to(&closest)
    }

    fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl From<(f64, f64)> for Point {
    fn from((x, y): (f64, f64)) -> Self {
        Point::new(x, y)
    }
}

/// Where antennas may go and what they should reach.
///
/// Antennas are placed on interest points. An interest point counts as
/// covered when some antenna lies within `radius` of it and no obstacle
/// comes closer than `clearance` to the line of sight between them.
///
/// # Examples
///
/// ```
/// use u_antcolony::coverage::{CoverageProblem, Point};
///
/// let problem = CoverageProblem::new(vec![Point::new(0.0, 0.0), Point::new(10.0, 0.0)])
///     .with_radius(12.0)
///     .with_antennas(1);
/// assert!(problem.validate().is_ok());
/// assert!((problem.coverage(&[0]) - 100.0).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CoverageProblem {
    /// Candidate antenna sites and coverage targets.
    pub interest_points: Vec<Point>,

    /// Points that block line of sight.
    pub obstacles: Vec<Point>,

    /// Maximum antenna reach.
    pub radius: f64,

    /// Antennas to place. Clamped to the number of interest points.
    pub antennas: usize,

    /// Minimum distance between an obstacle and a line of sight.
    pub clearance: f64,
}

impl CoverageProblem {
    pub fn new(interest_points: Vec<Point>) -> Self {
        Self {
            interest_points,
            obstacles: Vec::new(),
            radius: 15.0,
            antennas: 5,
            clearance: 5.0,
        }
    }

    pub fn with_obstacles(mut self, obstacles: Vec<Point>) -> Self {
        self.obstacles = obstacles;
        self
    }

    pub fn with_radius(mut self, radius: f64) -> Self {
        self.radius = radius;
        self
    }

    pub fn with_antennas(mut self, antennas: usize) -> Self {
        self.antennas = antennas;
        self
    }

    pub fn with_clearance(mut self, clearance: f64) -> Self {
        self.clearance = clearance;
        self
    }

    /// Number of interest points.
    pub fn size(&self) -> usize {
        self.interest_points.len()
    }

    /// Antennas actually placed: `min(antennas, size())`.
    pub fn placements(&self) -> usize {
        self.antennas.min(self.size())
    }

    /// Validates the instance.
    ///
    /// # Errors
    ///
    /// [`AcoError::InvalidInput`] for an empty or non-finite point set,
    /// [`AcoError::InvalidParameter`] for a bad radius, antenna count or
    /// clearance.
    pub fn validate(&self) -> Result<()> {
        if self.interest_points.is_empty() {
            return Err(AcoError::InvalidInput(
                "need at least one interest point".into(),
            ));
        }
        if let Some(i) = self.interest_points.iter().position(|p| !p.is_finite()) {
            return Err(AcoError::InvalidInput(format!(
                "interest point {i} has non-finite coordinates"
            )));
        }
        if let Some(i) = self.obstacles.iter().position(|p| !p.is_finite()) {
            return Err(AcoError::InvalidInput(format!(
                "obstacle {i} has non-finite coordinates"
            )));
        }
        if !self.radius.is_finite() || self.radius <= 0.0 {
            return Err(AcoError::parameter(
                "radius",
                format!("must be finite and positive, got {}", self.radius),
            ));
        }
        if self.antennas < 1 {
            return Err(AcoError::parameter("antennas", "must be at least 1"));
        }
        if !self.clearance.is_finite() || self.clearance < 0.0 {
            return Err(AcoError::parameter(
                "clearance",
                format!("must be finite and non-negative, got {}", self.clearance),
            ));
        }
        Ok(())
    }

    /// Returns `true` if an obstacle blocks the line of sight `a`–`b`.
    pub fn is_obstructed(&self, a: &Point, b: &Point) -> bool {
        self.obstacles
            .iter()
            .any(|o| o.distance_to_segment(a, b) < self.clearance)
    }

    /// Returns `true` if an antenna at `antenna` reaches `target`.
    pub fn reaches(&self, antenna: &Point, target: &Point) -> bool {
        antenna.distance_to(target) <= self.radius && !self.is_obstructed(antenna, target)
    }

    /// Percentage of interest points covered by antennas at `positions`.
    pub fn coverage_of_positions(&self, positions: &[Point]) -> f64 {
        if self.interest_points.is_empty() {
            return 0.0;
        }
        let covered = self
            .interest_points
            .iter()
            .filter(|ip| positions.iter().any(|a| self.reaches(a, ip)))
            .count();
        covered as f64 / self.interest_points.len() as f64 * 100.0
    }

    /// Percentage of interest points covered by antennas on the given sites.
    pub fn coverage(&self, sites: &[usize]) -> f64 {
        let positions: Vec<Point> = sites.iter().map(|&i| self.interest_points[i]).collect();
        self.coverage_of_positions(&positions)
    }

    /// Row-major `size()`×`size()` table: entry `(a, t)` is `true` when an
    /// antenna on site `a` covers interest point `t`.
    pub(crate) fn reach_table(&self) -> Vec<bool> {
        let pts = &self.interest_points;
        pts.iter()
            .flat_map(|a| pts.iter().map(move |t| self.reaches(a, t)))
            .collect()
    }
}
