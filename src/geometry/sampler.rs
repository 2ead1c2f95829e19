//! Uniform random points inside a region
//!
//! Seed positions are drawn by rejection sampling over the region's bounding box.
//! A region covering a fraction `r` of its box needs `1/r` draws per point on
//! average, so every point is capped at a fixed number of draws.

use rand::Rng;
use std::fmt;
use tracing::{debug, instrument};

use crate::geometry::{Point, Region};
use crate::simulation::{SimulationError, SimulationResult};
use crate::types::config::motion;

/// Rejection sampler producing seed positions inside a region
pub struct RegionSampler {
    rng: Box<dyn rand::RngCore + Send>,
    max_attempts_per_point: usize,
}

impl fmt::Debug for RegionSampler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegionSampler")
            .field("max_attempts_per_point", &self.max_attempts_per_point)
            .finish()
    }
}

impl Default for RegionSampler {
    fn default() -> Self {
        Self::new()
    }
}

impl RegionSampler {
    /// Create an entropy-seeded sampler
    pub fn new() -> Self {
        Self {
            rng: Box::new(<rand::rngs::StdRng as rand::SeedableRng>::from_entropy()),
            max_attempts_per_point: motion::DEFAULT_MAX_SAMPLE_ATTEMPTS,
        }
    }

    /// Create a sampler with a specific seed for reproducible results
    pub fn with_seed(seed: u64) -> Self {
        use rand::SeedableRng;
        Self {
            rng: Box::new(rand::rngs::StdRng::seed_from_u64(seed)),
            max_attempts_per_point: motion::DEFAULT_MAX_SAMPLE_ATTEMPTS,
        }
    }

    /// Cap the number of draws spent on a single point
    pub fn with_max_attempts(mut self, max_attempts_per_point: usize) -> Self {
        self.max_attempts_per_point = max_attempts_per_point.max(1);
        self
    }

    /// Draw `count` points that all lie inside `region`
    #[instrument(skip(self, region), fields(coverage = region.coverage_ratio()))]
    pub fn sample(&mut self, region: &Region, count: usize) -> SimulationResult<Vec<Point>> {
        let bbox = region.bounding_box();
        if bbox.width() <= 0.0 || bbox.height() <= 0.0 {
            return Err(SimulationError::DegenerateRegion(
                "cannot sample a region with an empty bounding box".to_string(),
            ));
        }

        let mut points = Vec::with_capacity(count);
        let mut total_draws = 0usize;

        while points.len() < count {
            let mut accepted = None;
            for _ in 0..self.max_attempts_per_point {
                total_draws += 1;
                let candidate = Point::new(
                    self.rng.gen_range(bbox.min_x..bbox.max_x),
                    self.rng.gen_range(bbox.min_y..bbox.max_y),
                );
                if region.contains(&candidate) {
                    accepted = Some(candidate);
                    break;
                }
            }

            match accepted {
                Some(point) => points.push(point),
                None => {
                    return Err(SimulationError::UnsamplableRegion {
                        attempts: self.max_attempts_per_point,
                    })
                }
            }
        }

        debug!("Sampled {} points with {} draws", points.len(), total_draws);
        Ok(points)
    }
}
