//! Tests for region loading and uniform seed sampling

use geo_walk_simulator::geometry::{Point, Polygon, Region, RegionLoader, RegionSampler};
use geo_walk_simulator::simulation::SimulationError;
use std::io::Write;

const CAMPUS: &str = r#"{
  "type": "FeatureCollection",
  "features": [
    {
      "type": "Feature",
      "properties": {"name": "campus"},
      "geometry": {
        "type": "Polygon",
        "coordinates": [
          [[0, 0], [40, 0], [40, 30], [0, 30], [0, 0]],
          [[10, 10], [20, 10], [20, 20], [10, 20], [10, 10]]
        ]
      }
    },
    {
      "type": "Feature",
      "properties": {"name": "parking"},
      "geometry": {
        "type": "MultiPolygon",
        "coordinates": [
          [[[100, 100], [110, 100], [110, 110], [100, 110], [100, 100]]]
        ]
      }
    }
  ]
}"#;

/// Test loading a region from a GeoJSON file
#[test]
fn test_load_region_from_file() {
    let mut file = tempfile::Builder::new().suffix(".geojson").tempfile().unwrap();
    file.write_all(CAMPUS.as_bytes()).unwrap();

    let region = RegionLoader::from_file(file.path()).unwrap();

    assert_eq!(region.parts().len(), 2);
    // 40x30 minus the 10x10 hole, plus the 10x10 parking lot
    assert!((region.area() - (1200.0 - 100.0 + 100.0)).abs() < 1e-9);
    assert!(region.contains(&Point::new(5.0, 5.0)));
    assert!(!region.contains(&Point::new(15.0, 15.0)));
    assert!(region.contains(&Point::new(105.0, 105.0)));
    assert!(!region.contains(&Point::new(70.0, 70.0)));
}

/// Test that a missing file is a region load error
#[test]
fn test_missing_region_file() {
    let result = RegionLoader::from_file("/nonexistent/region.geojson");
    assert!(matches!(result, Err(SimulationError::RegionLoad(_))));
}

/// Test that sampled seeds all fall inside the region, never in holes
#[test]
fn test_sampled_seeds_inside_region_with_hole() {
    let region = RegionLoader::from_geojson_str(CAMPUS).unwrap();
    let mut sampler = RegionSampler::with_seed(11);

    let points = sampler.sample(&region, 2_000).unwrap();

    assert_eq!(points.len(), 2_000);
    for point in &points {
        assert!(region.contains(point), "{} escaped the region", point);
        let in_hole = point.x > 10.0 && point.x < 20.0 && point.y > 10.0 && point.y < 20.0;
        assert!(!in_hole, "{} landed in the hole", point);
    }

    // Both parts get seeds, roughly in proportion to their area (1100 vs 100)
    let in_parking = points.iter().filter(|p| p.x >= 100.0).count();
    assert!(in_parking > 50 && in_parking < 350, "parking got {}", in_parking);
}

/// Test that sampling is reproducible with a seed
#[test]
fn test_sampling_is_reproducible() {
    let region = Region::default_square();
    let first = RegionSampler::with_seed(3).sample(&region, 20).unwrap();
    let second = RegionSampler::with_seed(3).sample(&region, 20).unwrap();
    assert_eq!(first, second);
}

/// Test sampling zero points
#[test]
fn test_sample_zero_points() {
    let region = Region::default_square();
    let points = RegionSampler::with_seed(1).sample(&region, 0).unwrap();
    assert!(points.is_empty());
}

/// Test that an empty or degenerate region is rejected at construction
#[test]
fn test_degenerate_regions_rejected() {
    assert!(matches!(Region::new(Vec::new()), Err(SimulationError::EmptyRegion)));

    let collinear = Polygon::new(
        vec![Point::new(0.0, 0.0), Point::new(1.0, 1.0), Point::new(2.0, 2.0)],
        Vec::new(),
    )
    .unwrap();
    assert!(matches!(
        Region::new(vec![collinear]),
        Err(SimulationError::DegenerateRegion(_))
    ));
}

/// Test that empty rings never reach a region, so containment cannot panic
#[test]
fn test_empty_ring_rejected_before_region() {
    assert!(matches!(
        Polygon::new(Vec::new(), Vec::new()),
        Err(SimulationError::DegenerateRegion(_))
    ));

    let square = Polygon::rectangle(Point::new(0.0, 0.0), Point::new(1.0, 1.0)).unwrap();
    assert!(matches!(
        Polygon::new(square.exterior().to_vec(), vec![Vec::new()]),
        Err(SimulationError::DegenerateRegion(_))
    ));

    let region = Region::new(vec![square]).unwrap();
    assert!(region.contains(&Point::new(0.5, 0.5)));
    assert_eq!(region.parts()[0].exterior().len(), 4);
}
