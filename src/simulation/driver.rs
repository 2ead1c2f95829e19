//! Run many walk agents in parallel
//!
//! The driver validates its inputs, turns every (profile, seed position) pair into
//! a [`WalkAgent`] and runs each on its own named OS thread until the shared
//! [`CancellationToken`] fires or the optional tick limit is reached. Every agent
//! produces an [`AgentReport`]; a stuck or panicking agent never stops its siblings.

use std::any::Any;
use std::fmt;
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};
use tracing::{field, info, info_span, instrument, warn};

use crate::agent::{AgentProfile, WalkAgent};
use crate::geometry::{Point, Region};
use crate::sim_event;
use crate::simulation::{
    AgentOutcome, AgentReport, CancellationToken, ErrorHandler, RecoveryStrategy, RunSummary,
    SimulationError, SimulationResult,
};
use crate::sink::EventSink;
use crate::types::{AssetCategory, ObjectId, SimulationConfig};

/// Per-agent loop settings shared by every thread
#[derive(Debug, Clone, Copy)]
struct LoopSettings {
    tick_interval: Duration,
    max_ticks: Option<u64>,
}

impl LoopSettings {
    fn limit_reached(&self, ticks: u64) -> bool {
        self.max_ticks.map_or(false, |max| ticks >= max)
    }
}

/// Spawns agents, drives their tick loops and gathers their reports
pub struct SimulationDriver {
    sink: Arc<dyn EventSink>,
    step_length: f64,
    max_move_attempts: usize,
    seed: Option<u64>,
    settings: LoopSettings,
}

impl fmt::Debug for SimulationDriver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SimulationDriver")
            .field("sink", &self.sink.name())
            .field("step_length", &self.step_length)
            .field("max_move_attempts", &self.max_move_attempts)
            .field("seed", &self.seed)
            .field("settings", &self.settings)
            .finish()
    }
}

impl SimulationDriver {
    /// Create a driver from a validated configuration
    pub fn new(config: &SimulationConfig, sink: Arc<dyn EventSink>) -> Self {
        Self {
            sink,
            step_length: config.step_length,
            max_move_attempts: config.max_move_attempts,
            seed: config.seed,
            settings: LoopSettings {
                tick_interval: config.tick_interval(),
                max_ticks: config.max_ticks,
            },
        }
    }

    /// Run one agent per profile until cancelled or the tick limit is reached
    ///
    /// Fails before any agent starts when profiles and seed positions do not pair
    /// up, the region has no area, or a seed position lies outside the region.
    #[instrument(skip_all, fields(agents = profiles.len()))]
    pub fn run(
        &self,
        profiles: Vec<AgentProfile>,
        seed_positions: Vec<Point>,
        region: Arc<Region>,
        cancel: CancellationToken,
    ) -> SimulationResult<RunSummary> {
        if profiles.len() != seed_positions.len() {
            return Err(SimulationError::CountMismatch {
                profiles: profiles.len(),
                seeds: seed_positions.len(),
            });
        }
        if region.area() <= 0.0 {
            return Err(SimulationError::DegenerateRegion("region has zero area".to_string()));
        }

        let agents = self.build_agents(profiles, seed_positions, &region)?;
        let started = Instant::now();
        info!("Starting {} agents using the {} sink", agents.len(), self.sink.name());

        let mut running: Vec<(ObjectId, AssetCategory, JoinHandle<AgentReport>)> =
            Vec::with_capacity(agents.len());
        for agent in agents {
            let object_id = agent.object_id();
            let category = agent.profile().category;
            let sink = Arc::clone(&self.sink);
            let token = cancel.clone();
            let settings = self.settings;

            let spawned = thread::Builder::new()
                .name(format!("agent-{}", object_id.short()))
                .spawn(move || run_agent(agent, sink, token, settings));

            match spawned {
                Ok(handle) => running.push((object_id, category, handle)),
                Err(e) => {
                    cancel.cancel();
                    for (_, _, handle) in running {
                        let _ = handle.join();
                    }
                    return Err(SimulationError::agent_failure(format!(
                        "failed to spawn thread for agent {}: {}",
                        object_id, e
                    )));
                }
            }
        }

        let reports = running
            .into_iter()
            .map(|(object_id, category, handle)| match handle.join() {
                Ok(report) => report,
                Err(payload) => {
                    let message = panic_message(payload.as_ref());
                    warn!(object_id = %object_id, "Agent thread panicked: {}", message);
                    AgentReport {
                        object_id,
                        category,
                        ticks: 0,
                        delivered: 0,
                        failed_deliveries: 0,
                        outcome: AgentOutcome::Panicked(message),
                        final_position: None,
                    }
                }
            })
            .collect();

        let summary = RunSummary::new(reports, started.elapsed());
        info!("Run finished: {}", summary.compact_summary());
        Ok(summary)
    }

    fn build_agents(
        &self,
        profiles: Vec<AgentProfile>,
        seed_positions: Vec<Point>,
        region: &Arc<Region>,
    ) -> SimulationResult<Vec<WalkAgent>> {
        profiles
            .into_iter()
            .zip(seed_positions)
            .enumerate()
            .map(|(index, (profile, position))| -> SimulationResult<WalkAgent> {
                let agent = match self.seed {
                    Some(seed) => WalkAgent::with_seed(
                        profile,
                        position,
                        Arc::clone(region),
                        seed.wrapping_add(index as u64),
                    )?,
                    None => WalkAgent::new(profile, position, Arc::clone(region))?,
                };
                Ok(agent
                    .with_step_length(self.step_length)
                    .with_max_move_attempts(self.max_move_attempts))
            })
            .collect()
    }
}

fn run_agent(
    mut agent: WalkAgent,
    sink: Arc<dyn EventSink>,
    cancel: CancellationToken,
    settings: LoopSettings,
) -> AgentReport {
    let span = info_span!(
        "agent",
        object_id = %agent.object_id(),
        category = %agent.profile().category
    );
    let _entered = span.enter();

    sim_event!(
        info,
        "Agent started",
        position = field::display(agent.position()),
        step_counter = agent.step_counter()
    );

    let mut delivered = 0u64;
    let mut failed_deliveries = 0u64;

    let outcome = loop {
        if cancel.is_cancelled() {
            break AgentOutcome::Cancelled;
        }
        if settings.limit_reached(agent.ticks()) {
            break AgentOutcome::Completed;
        }

        match agent.tick(sink.as_ref()) {
            Ok(tick) if tick.delivered => delivered += 1,
            Ok(_) => failed_deliveries += 1,
            Err(e) => match ErrorHandler::new().handle_error(&e) {
                RecoveryStrategy::Continue => failed_deliveries += 1,
                _ => match e {
                    SimulationError::Stuck { attempts, .. } => break AgentOutcome::Stuck { attempts },
                    other => break AgentOutcome::Failed(other.to_string()),
                },
            },
        }

        if settings.limit_reached(agent.ticks()) {
            break AgentOutcome::Completed;
        }
        if cancel.wait_timeout(settings.tick_interval) {
            break AgentOutcome::Cancelled;
        }
    };

    sim_event!(
        info,
        "Agent stopped",
        outcome = field::display(&outcome),
        ticks = agent.ticks(),
        delivered = delivered,
        failed_deliveries = failed_deliveries
    );

    AgentReport {
        object_id: agent.object_id(),
        category: agent.profile().category,
        ticks: agent.ticks(),
        delivered,
        failed_deliveries,
        outcome,
        final_position: Some(agent.position()),
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "unknown panic payload".to_string()
    }
}
