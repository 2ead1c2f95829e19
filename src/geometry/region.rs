//! Polygonal regions and point containment
//!
//! A [`Region`] is an immutable, possibly multi-part polygon. Agents only ever
//! ask it two things: whether a point lies inside, and what its bounding box is.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::simulation::{SimulationError, SimulationResult};

/// A 2-D coordinate in the region's spatial reference
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    /// First coordinate
    pub x: f64,
    /// Second coordinate
    pub y: f64,
}

impl Point {
    /// Create a new point
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Point reached by travelling `distance` along `heading` (radians)
    pub fn advance(&self, heading: f64, distance: f64) -> Point {
        Point::new(self.x + distance * heading.cos(), self.y + distance * heading.sin())
    }
}

impl From<(f64, f64)> for Point {
    fn from((x, y): (f64, f64)) -> Self {
        Point::new(x, y)
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.6}, {:.6})", self.x, self.y)
    }
}

/// Axis-aligned bounding box
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    /// Smallest x
    pub min_x: f64,
    /// Smallest y
    pub min_y: f64,
    /// Largest x
    pub max_x: f64,
    /// Largest y
    pub max_y: f64,
}

impl BoundingBox {
    /// Width of the box
    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    /// Height of the box
    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }

    /// Area of the box
    pub fn area(&self) -> f64 {
        self.width() * self.height()
    }

    /// Whether the point lies inside or on the box
    pub fn contains(&self, point: &Point) -> bool {
        point.x >= self.min_x && point.x <= self.max_x && point.y >= self.min_y && point.y <= self.max_y
    }

    fn of_points<'a>(points: impl IntoIterator<Item = &'a Point>) -> Option<BoundingBox> {
        let mut iter = points.into_iter();
        let first = iter.next()?;
        let mut bbox = BoundingBox { min_x: first.x, min_y: first.y, max_x: first.x, max_y: first.y };
        for p in iter {
            bbox.min_x = bbox.min_x.min(p.x);
            bbox.min_y = bbox.min_y.min(p.y);
            bbox.max_x = bbox.max_x.max(p.x);
            bbox.max_y = bbox.max_y.max(p.y);
        }
        Some(bbox)
    }
}

/// One polygon part: an exterior ring and optional holes
///
/// Rings are stored without the repeated closing vertex and always hold at
/// least three finite vertices.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Polygon {
    exterior: Vec<Point>,
    holes: Vec<Vec<Point>>,
}

impl Polygon {
    /// Create a polygon, normalising rings and rejecting degenerate ones
    pub fn new(exterior: Vec<Point>, holes: Vec<Vec<Point>>) -> SimulationResult<Self> {
        let exterior = normalize_ring(exterior)?;
        let holes = holes.into_iter().map(normalize_ring).collect::<SimulationResult<Vec<_>>>()?;
        Ok(Self { exterior, holes })
    }

    /// Axis-aligned rectangle
    pub fn rectangle(min: Point, max: Point) -> SimulationResult<Self> {
        Self::new(
            vec![min, Point::new(max.x, min.y), max, Point::new(min.x, max.y)],
            Vec::new(),
        )
    }

    /// Exterior ring
    pub fn exterior(&self) -> &[Point] {
        &self.exterior
    }

    /// Interior rings
    pub fn holes(&self) -> &[Vec<Point>] {
        &self.holes
    }

    /// Area of the exterior minus the holes
    pub fn area(&self) -> f64 {
        let holes: f64 = self.holes.iter().map(|ring| ring_area(ring)).sum();
        (ring_area(&self.exterior) - holes).max(0.0)
    }

    /// Whether the point lies strictly inside the polygon
    pub fn contains(&self, point: &Point) -> bool {
        if !ring_contains(&self.exterior, point) {
            return false;
        }
        !self.holes.iter().any(|hole| on_ring_boundary(hole, point) || ring_contains(hole, point))
    }
}

/// Immutable polygonal region shared read-only by every agent
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Region {
    parts: Vec<Polygon>,
    bbox: BoundingBox,
}

impl Region {
    /// Create a region from one or more polygon parts
    pub fn new(parts: Vec<Polygon>) -> SimulationResult<Self> {
        if parts.is_empty() {
            return Err(SimulationError::EmptyRegion);
        }

        let bbox = BoundingBox::of_points(parts.iter().flat_map(|p| p.exterior.iter()))
            .ok_or(SimulationError::EmptyRegion)?;

        let region = Self { parts, bbox };
        if bbox.width() <= 0.0 || bbox.height() <= 0.0 || region.area() <= 0.0 {
            return Err(SimulationError::DegenerateRegion(format!(
                "region has zero usable area (bounding box {:.3} x {:.3})",
                bbox.width(),
                bbox.height()
            )));
        }

        Ok(region)
    }

    /// Single-part region covering an axis-aligned rectangle
    pub fn rectangle(min: Point, max: Point) -> SimulationResult<Self> {
        Self::new(vec![Polygon::rectangle(min, max)?])
    }

    /// Region used when no region file is configured
    pub fn default_square() -> Self {
        let square = Polygon {
            exterior: vec![
                Point::new(0.0, 0.0),
                Point::new(100.0, 0.0),
                Point::new(100.0, 100.0),
                Point::new(0.0, 100.0),
            ],
            holes: Vec::new(),
        };
        let bbox = BoundingBox { min_x: 0.0, min_y: 0.0, max_x: 100.0, max_y: 100.0 };
        Self { parts: vec![square], bbox }
    }

    /// Whether the point lies strictly inside any part of the region
    pub fn contains(&self, point: &Point) -> bool {
        self.bbox.contains(point) && self.parts.iter().any(|part| part.contains(point))
    }

    /// Bounding box of every part
    pub fn bounding_box(&self) -> BoundingBox {
        self.bbox
    }

    /// Polygon parts of the region
    pub fn parts(&self) -> &[Polygon] {
        &self.parts
    }

    /// Total area of all parts
    pub fn area(&self) -> f64 {
        self.parts.iter().map(Polygon::area).sum()
    }

    /// Share of the bounding box covered by the region, in (0, 1]
    pub fn coverage_ratio(&self) -> f64 {
        (self.area() / self.bbox.area()).min(1.0)
    }
}

fn normalize_ring(mut ring: Vec<Point>) -> SimulationResult<Vec<Point>> {
    if ring.len() > 1 && ring.first() == ring.last() {
        ring.pop();
    }
    if ring.iter().any(|p| !p.x.is_finite() || !p.y.is_finite()) {
        return Err(SimulationError::DegenerateRegion("ring has non-finite coordinates".to_string()));
    }
    if ring.len() < 3 {
        return Err(SimulationError::DegenerateRegion(format!(
            "ring needs at least 3 distinct vertices, got {}",
            ring.len()
        )));
    }
    Ok(ring)
}

/// Shoelace area of a ring, always non-negative
fn ring_area(ring: &[Point]) -> f64 {
    let n = ring.len();
    let twice: f64 = (0..n)
        .map(|i| {
            let a = ring[i];
            let b = ring[(i + 1) % n];
            a.x * b.y - b.x * a.y
        })
        .sum();
    twice.abs() / 2.0
}

/// Even-odd ray casting; points on the boundary are outside
fn ring_contains(ring: &[Point], point: &Point) -> bool {
    if on_ring_boundary(ring, point) {
        return false;
    }

    let n = ring.len();
    if n < 3 {
        return false;
    }

    let mut inside = false;
    let mut j = n - 1;
    for i in 0..n {
        let (a, b) = (ring[i], ring[j]);
        if (a.y > point.y) != (b.y > point.y) {
            let x_cross = (b.x - a.x) * (point.y - a.y) / (b.y - a.y) + a.x;
            if point.x < x_cross {
                inside = !inside;
            }
        }
        j = i;
    }
    inside
}

fn on_ring_boundary(ring: &[Point], point: &Point) -> bool {
    let n = ring.len();
    (0..n).any(|i| on_segment(&ring[i], &ring[(i + 1) % n], point))
}

fn on_segment(a: &Point, b: &Point, p: &Point) -> bool {
    let cross = (b.x - a.x) * (p.y - a.y) - (b.y - a.y) * (p.x - a.x);
    if cross != 0.0 {
        return false;
    }
    p.x >= a.x.min(b.x) && p.x <= a.x.max(b.x) && p.y >= a.y.min(b.y) && p.y <= a.y.max(b.y)
}
