//! Random-walk agent with boundary containment
//!
//! One tick:
//! 1. advance the step counter (increment, wrap, read phase),
//! 2. step `step_length` along the heading; while the candidate falls outside the
//!    region, turn by a random 0-10 degrees and try again, up to a fixed number of
//!    attempts,
//! 3. build the event and hand it to the sink,
//! 4. drift the heading by a random -20..+20 degrees for the next tick.
//!
//! The agent is never observed outside its region: a position is only committed
//! after `Region::contains` accepted it.

use chrono::{DateTime, Utc};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::sync::Arc;
use tracing::{debug, trace};

use crate::agent::status::{StatusPhase, StepCounter, INITIAL_OFFSET_LIMIT};
use crate::agent::AgentProfile;
use crate::events::{EventBuilder, LocationEvent};
use crate::geometry::{Point, Region};
use crate::simulation::{ErrorHandler, RecoveryStrategy, SimulationError, SimulationResult};
use crate::sink::EventSink;
use crate::types::config::motion;
use crate::types::ObjectId;

/// Accuracy values drawn per event, half-open
const ACCURACY_RANGE: std::ops::Range<u32> = 1..3;

/// State of an agent right after it moved, before the heading drifts
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AgentSnapshot {
    /// Agent identity
    pub object_id: ObjectId,
    /// Committed position
    pub position: Point,
    /// Status phase for this tick
    pub phase: StatusPhase,
    /// Step counter after the wrap rule
    pub step_counter: u32,
    /// Reported accuracy for this tick
    pub accuracy: u32,
}

/// Result of one full tick
#[derive(Debug, Clone)]
pub struct TickOutcome {
    /// Event emitted for the tick
    pub event: LocationEvent,
    /// Whether the sink accepted it
    pub delivered: bool,
    /// Candidate positions tried before one fell inside the region
    pub move_attempts: usize,
}

/// One simulated asset walking inside a shared region
#[derive(Debug)]
pub struct WalkAgent {
    object_id: ObjectId,
    profile: AgentProfile,
    region: Arc<Region>,
    position: Point,
    heading: f64,
    step_length: f64,
    counter: StepCounter,
    max_move_attempts: usize,
    ticks: u64,
    rng: StdRng,
}

impl WalkAgent {
    /// Spawn an agent at `position` with an entropy-seeded generator
    pub fn new(profile: AgentProfile, position: Point, region: Arc<Region>) -> SimulationResult<Self> {
        Self::with_rng(profile, position, region, StdRng::from_entropy())
    }

    /// Spawn an agent with a seeded generator for reproducible walks
    pub fn with_seed(
        profile: AgentProfile,
        position: Point,
        region: Arc<Region>,
        seed: u64,
    ) -> SimulationResult<Self> {
        Self::with_rng(profile, position, region, StdRng::seed_from_u64(seed))
    }

    fn with_rng(
        profile: AgentProfile,
        position: Point,
        region: Arc<Region>,
        mut rng: StdRng,
    ) -> SimulationResult<Self> {
        if !region.contains(&position) {
            return Err(SimulationError::configuration_error(format!(
                "seed position {} lies outside the region",
                position
            )));
        }

        let heading = rng.gen_range(0.0..360.0_f64).to_radians();
        let counter = StepCounter::new(rng.gen_range(0..INITIAL_OFFSET_LIMIT));

        Ok(Self {
            object_id: ObjectId::new(),
            profile,
            region,
            position,
            heading,
            step_length: motion::DEFAULT_STEP_LENGTH,
            counter,
            max_move_attempts: motion::DEFAULT_MAX_MOVE_ATTEMPTS,
            ticks: 0,
            rng,
        })
    }

    /// Set the distance advanced per tick
    pub fn with_step_length(mut self, step_length: f64) -> Self {
        self.step_length = step_length;
        self
    }

    /// Set the number of candidates tried before the agent is stuck
    pub fn with_max_move_attempts(mut self, max_move_attempts: usize) -> Self {
        self.max_move_attempts = max_move_attempts.max(1);
        self
    }

    /// Override the step counter, e.g. to start in a known phase
    pub fn with_step_counter(mut self, value: u32) -> Self {
        self.counter = StepCounter::new(value);
        self
    }

    /// Override the heading, in radians
    pub fn with_heading(mut self, heading: f64) -> Self {
        self.heading = heading;
        self
    }

    /// Agent identity
    pub fn object_id(&self) -> ObjectId {
        self.object_id
    }

    /// Static descriptor
    pub fn profile(&self) -> &AgentProfile {
        &self.profile
    }

    /// Current position
    pub fn position(&self) -> Point {
        self.position
    }

    /// Current heading in radians
    pub fn heading(&self) -> f64 {
        self.heading
    }

    /// Current step counter value
    pub fn step_counter(&self) -> u32 {
        self.counter.value()
    }

    /// Distance advanced per tick
    pub fn step_length(&self) -> f64 {
        self.step_length
    }

    /// Ticks completed so far
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Run one full tick and deliver its event to `sink`
    ///
    /// Delivery failures are logged and swallowed; only a stuck move is an error.
    pub fn tick(&mut self, sink: &dyn EventSink) -> SimulationResult<TickOutcome> {
        self.tick_at(sink, Utc::now())
    }

    /// Same as [`WalkAgent::tick`] with an explicit timestamp
    pub fn tick_at(&mut self, sink: &dyn EventSink, timestamp: DateTime<Utc>) -> SimulationResult<TickOutcome> {
        let (snapshot, move_attempts) = self.advance()?;
        let event = EventBuilder::build(&self.profile, &snapshot, timestamp);

        let delivered = match sink.deliver(&event) {
            Ok(()) => true,
            Err(e) => {
                let error = SimulationError::emission_error(format!("{} sink: {}", sink.name(), e));
                match ErrorHandler::new().handle_error(&error) {
                    RecoveryStrategy::Continue => false,
                    _ => return Err(error),
                }
            }
        };

        self.drift();
        Ok(TickOutcome { event, delivered, move_attempts })
    }

    /// Counter and move steps of a tick, without emitting
    pub fn advance(&mut self) -> SimulationResult<(AgentSnapshot, usize)> {
        let phase = self.counter.advance();
        let move_attempts = self.step()?;
        self.ticks += 1;

        let snapshot = AgentSnapshot {
            object_id: self.object_id,
            position: self.position,
            phase,
            step_counter: self.counter.value(),
            accuracy: self.rng.gen_range(ACCURACY_RANGE),
        };
        trace!(
            object_id = %self.object_id,
            position = %self.position,
            phase = %phase,
            "Agent advanced"
        );
        Ok((snapshot, move_attempts))
    }

    /// Random heading drift applied after a successful move
    pub fn drift(&mut self) {
        let degrees = self.rng.gen_range(-motion::DRIFT_DEGREES..=motion::DRIFT_DEGREES);
        self.heading += degrees.to_radians();
    }

    /// Move one step, turning away from the boundary until the step lands inside
    fn step(&mut self) -> SimulationResult<usize> {
        for attempt in 1..=self.max_move_attempts {
            let candidate = self.position.advance(self.heading, self.step_length);
            if self.region.contains(&candidate) {
                if attempt > 1 {
                    debug!(object_id = %self.object_id, attempts = attempt, "Turned away from boundary");
                }
                self.position = candidate;
                return Ok(attempt);
            }

            let turn = self.rng.gen_range(0.0..=motion::BOUNDARY_TURN_DEGREES);
            self.heading += turn.to_radians();
        }

        Err(SimulationError::Stuck {
            object_id: self.object_id,
            attempts: self.max_move_attempts,
        })
    }
}
