//! GeoJSON region loading
//!
//! Accepts `Polygon`, `MultiPolygon`, `GeometryCollection`, `Feature` and
//! `FeatureCollection` documents. Every polygon found becomes one part of the
//! resulting [`Region`]; other geometry types are skipped with a warning.

use serde_json::Value;
use std::fs;
use std::path::Path;
use tracing::{info, warn};

use crate::geometry::{Point, Polygon, Region};
use crate::simulation::{SimulationError, SimulationResult};

/// Loads regions from GeoJSON files or strings
#[derive(Debug, Default, Clone, Copy)]
pub struct RegionLoader;

impl RegionLoader {
    /// Load a region from a GeoJSON file
    pub fn from_file<P: AsRef<Path>>(path: P) -> SimulationResult<Region> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(SimulationError::region_load(format!(
                "region file not found: {}",
                path.display()
            )));
        }

        let content = fs::read_to_string(path)?;
        let region = Self::from_geojson_str(&content)?;
        info!(
            "Loaded region from {} with {} part(s), area {:.3}",
            path.display(),
            region.parts().len(),
            region.area()
        );
        Ok(region)
    }

    /// Parse a region from a GeoJSON document
    pub fn from_geojson_str(content: &str) -> SimulationResult<Region> {
        let document: Value = serde_json::from_str(content)?;
        let mut parts = Vec::new();
        collect_polygons(&document, &mut parts)?;

        if parts.is_empty() {
            return Err(SimulationError::region_load("document contains no polygons"));
        }
        Region::new(parts)
    }
}

fn collect_polygons(value: &Value, parts: &mut Vec<Polygon>) -> SimulationResult<()> {
    let kind = value
        .get("type")
        .and_then(Value::as_str)
        .ok_or_else(|| SimulationError::region_load("GeoJSON object is missing 'type'"))?;

    match kind {
        "FeatureCollection" => {
            for feature in array_field(value, "features")? {
                collect_polygons(feature, parts)?;
            }
        }
        "Feature" => match value.get("geometry") {
            Some(Value::Null) | None => warn!("Skipping feature without geometry"),
            Some(geometry) => collect_polygons(geometry, parts)?,
        },
        "GeometryCollection" => {
            for geometry in array_field(value, "geometries")? {
                collect_polygons(geometry, parts)?;
            }
        }
        "Polygon" => {
            let coordinates = value
                .get("coordinates")
                .ok_or_else(|| SimulationError::region_load("Polygon is missing 'coordinates'"))?;
            parts.push(parse_polygon(coordinates)?);
        }
        "MultiPolygon" => {
            for polygon in array_field(value, "coordinates")? {
                parts.push(parse_polygon(polygon)?);
            }
        }
        other => warn!("Skipping unsupported geometry type '{}'", other),
    }

    Ok(())
}

fn array_field<'a>(value: &'a Value, field: &str) -> SimulationResult<&'a Vec<Value>> {
    value
        .get(field)
        .and_then(Value::as_array)
        .ok_or_else(|| SimulationError::region_load(format!("expected array field '{}'", field)))
}

fn parse_polygon(coordinates: &Value) -> SimulationResult<Polygon> {
    let rings = coordinates
        .as_array()
        .ok_or_else(|| SimulationError::region_load("polygon coordinates must be an array of rings"))?;

    let mut rings = rings.iter().map(parse_ring);
    let exterior = rings
        .next()
        .ok_or_else(|| SimulationError::region_load("polygon has no exterior ring"))??;
    let holes = rings.collect::<SimulationResult<Vec<_>>>()?;

    Polygon::new(exterior, holes)
}

fn parse_ring(ring: &Value) -> SimulationResult<Vec<Point>> {
    ring.as_array()
        .ok_or_else(|| SimulationError::region_load("ring must be an array of positions"))?
        .iter()
        .map(parse_position)
        .collect()
}

fn parse_position(position: &Value) -> SimulationResult<Point> {
    match position.as_array().map(Vec::as_slice) {
        Some([x, y, ..]) => match (x.as_f64(), y.as_f64()) {
            (Some(x), Some(y)) => Ok(Point::new(x, y)),
            _ => Err(SimulationError::region_load(format!("non-numeric position: {}", position))),
        },
        _ => Err(SimulationError::region_load(format!("invalid position: {}", position))),
    }
}
