//! Region geometry, seed sampling and region loading
//!
//! # Overview
//!
//! - **Region**: immutable multi-part polygon with `contains` and `bounding_box`
//! - **RegionSampler**: uniform seed points by bounded rejection sampling
//! - **RegionLoader**: GeoJSON parsing into a `Region`
//!
//! # Usage Example
//!
//! ```rust
//! use geo_walk_simulator::geometry::*;
//!
//! let region = Region::rectangle(Point::new(0.0, 0.0), Point::new(10.0, 10.0)).unwrap();
//! let seeds = RegionSampler::with_seed(1).sample(&region, 5).unwrap();
//! assert!(seeds.iter().all(|p| region.contains(p)));
//! ```

pub mod loader;
pub mod region;
pub mod sampler;

pub use loader::RegionLoader;
pub use region::{BoundingBox, Point, Polygon, Region};
pub use sampler::RegionSampler;
