//! Agent profile generation and statistics
//!
//! The requested device count is split across categories by fixed percentage
//! shares using floor division, with at least one profile per category. The total
//! produced can therefore differ from the request by a few units.

use rand::Rng;
use std::collections::HashMap;
use std::fmt;
use tracing::{debug, info};

use crate::agent::AgentProfile;
use crate::types::{AssetCategory, DeviceKind};

/// Generator for agent profiles
pub struct AgentProfileGenerator {
    rng: Box<dyn rand::RngCore + Send>,
    spatial_reference_id: u32,
}

impl fmt::Debug for AgentProfileGenerator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AgentProfileGenerator")
            .field("spatial_reference_id", &self.spatial_reference_id)
            .finish()
    }
}

impl Default for AgentProfileGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl AgentProfileGenerator {
    /// Create a new profile generator
    pub fn new() -> Self {
        Self {
            rng: Box::new(<rand::rngs::StdRng as rand::SeedableRng>::from_entropy()),
            spatial_reference_id: 3857,
        }
    }

    /// Create a new profile generator with a specific seed for reproducible results
    pub fn with_seed(seed: u64) -> Self {
        use rand::SeedableRng;
        Self {
            rng: Box::new(rand::rngs::StdRng::seed_from_u64(seed)),
            spatial_reference_id: 3857,
        }
    }

    /// Set the spatial reference id stamped on every profile
    pub fn with_spatial_reference(mut self, spatial_reference_id: u32) -> Self {
        self.spatial_reference_id = spatial_reference_id;
        self
    }

    /// Number of profiles a category receives for a requested total
    pub fn category_count(total_count: usize, category: AssetCategory) -> usize {
        (total_count * category.share_percent() / 100).max(1)
    }

    /// Number of profiles `generate` will produce for a requested total
    pub fn planned_count(total_count: usize) -> usize {
        AssetCategory::ALL
            .iter()
            .map(|category| Self::category_count(total_count, *category))
            .sum()
    }

    /// Generate profiles for every category
    pub fn generate(&mut self, total_count: usize, floor: &str) -> Vec<AgentProfile> {
        let mut profiles = Vec::with_capacity(Self::planned_count(total_count));

        for category in AssetCategory::ALL {
            let count = Self::category_count(total_count, category);
            debug!("Generating {} {} profiles", count, category);

            for _ in 0..count {
                let device_kind = DeviceKind::ALL[self.rng.gen_range(0..DeviceKind::ALL.len())];
                profiles.push(AgentProfile::new(
                    category,
                    device_kind,
                    floor,
                    self.spatial_reference_id,
                ));
            }
        }

        info!(
            "Generated {} agent profiles for a requested count of {}",
            profiles.len(),
            total_count
        );
        profiles
    }
}

/// Breakdown of a generated profile population
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProfileStats {
    /// Total number of profiles
    pub total: usize,
    /// Profiles per category
    pub by_category: HashMap<AssetCategory, usize>,
    /// Profiles per device kind
    pub by_device: HashMap<DeviceKind, usize>,
}

impl ProfileStats {
    /// Tally a set of profiles
    pub fn from_profiles(profiles: &[AgentProfile]) -> Self {
        let mut stats = Self { total: profiles.len(), ..Default::default() };
        for profile in profiles {
            *stats.by_category.entry(profile.category).or_default() += 1;
            *stats.by_device.entry(profile.device_kind).or_default() += 1;
        }
        stats
    }

    /// Profiles in one category
    pub fn category(&self, category: AssetCategory) -> usize {
        self.by_category.get(&category).copied().unwrap_or(0)
    }

    /// Profiles with one device kind
    pub fn device(&self, device: DeviceKind) -> usize {
        self.by_device.get(&device).copied().unwrap_or(0)
    }
}
