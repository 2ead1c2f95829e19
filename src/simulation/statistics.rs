//! Per-agent reports and run totals

use serde::Serialize;
use std::fmt;
use std::time::Duration;

use crate::geometry::Point;
use crate::types::{AssetCategory, ObjectId};

/// How an agent's loop ended
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AgentOutcome {
    /// Stopped by the cancellation token
    Cancelled,
    /// Reached the configured tick limit
    Completed,
    /// Found no in-region step
    Stuck {
        /// Attempts spent on the failing move
        attempts: usize,
    },
    /// Stopped on an unrecoverable error
    Failed(String),
    /// Thread panicked
    Panicked(String),
}

impl AgentOutcome {
    /// Whether the agent stopped because of a failure
    pub fn is_failure(&self) -> bool {
        matches!(
            self,
            AgentOutcome::Stuck { .. } | AgentOutcome::Failed(_) | AgentOutcome::Panicked(_)
        )
    }
}

impl fmt::Display for AgentOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AgentOutcome::Cancelled => write!(f, "cancelled"),
            AgentOutcome::Completed => write!(f, "completed"),
            AgentOutcome::Stuck { attempts } => write!(f, "stuck after {} attempts", attempts),
            AgentOutcome::Failed(message) => write!(f, "failed: {}", message),
            AgentOutcome::Panicked(message) => write!(f, "panicked: {}", message),
        }
    }
}

/// What one agent did during a run
#[derive(Debug, Clone, Serialize)]
pub struct AgentReport {
    /// Agent identity
    pub object_id: ObjectId,
    /// Asset category
    pub category: AssetCategory,
    /// Completed ticks
    pub ticks: u64,
    /// Events accepted by the sink
    pub delivered: u64,
    /// Events the sink failed to take
    pub failed_deliveries: u64,
    /// Why the loop ended
    pub outcome: AgentOutcome,
    /// Last committed position, if the agent got to start
    pub final_position: Option<Point>,
}

/// Totals for a whole run
#[derive(Debug, Clone, Serialize)]
pub struct RunSummary {
    /// One report per agent, in spawn order
    pub agents: Vec<AgentReport>,
    /// Wall-clock duration of the run
    pub duration: Duration,
}

impl RunSummary {
    /// Build a summary from agent reports
    pub fn new(agents: Vec<AgentReport>, duration: Duration) -> Self {
        Self { agents, duration }
    }

    /// Number of agents
    pub fn agent_count(&self) -> usize {
        self.agents.len()
    }

    /// Ticks over all agents
    pub fn total_ticks(&self) -> u64 {
        self.agents.iter().map(|a| a.ticks).sum()
    }

    /// Delivered events over all agents
    pub fn delivered_events(&self) -> u64 {
        self.agents.iter().map(|a| a.delivered).sum()
    }

    /// Failed deliveries over all agents
    pub fn failed_deliveries(&self) -> u64 {
        self.agents.iter().map(|a| a.failed_deliveries).sum()
    }

    /// Agents that ended stuck
    pub fn stuck_agents(&self) -> usize {
        self.agents
            .iter()
            .filter(|a| matches!(a.outcome, AgentOutcome::Stuck { .. }))
            .count()
    }

    /// Agents whose thread panicked
    pub fn panicked_agents(&self) -> usize {
        self.agents
            .iter()
            .filter(|a| matches!(a.outcome, AgentOutcome::Panicked(_)))
            .count()
    }

    /// Emitted events per second of wall-clock time
    pub fn events_per_second(&self) -> f64 {
        let seconds = self.duration.as_secs_f64();
        if seconds <= 0.0 {
            0.0
        } else {
            self.total_ticks() as f64 / seconds
        }
    }

    /// Share of emitted events that were delivered, in percent
    pub fn delivery_percentage(&self) -> f64 {
        let total = self.total_ticks();
        if total == 0 {
            0.0
        } else {
            (self.delivered_events() as f64 / total as f64) * 100.0
        }
    }

    /// One-line summary suitable for logging
    pub fn compact_summary(&self) -> String {
        format!(
            "{} agents | {} ticks | {} delivered ({:.1}%) | {} failed | {} stuck | {:.1} events/s",
            self.agent_count(),
            self.total_ticks(),
            self.delivered_events(),
            self.delivery_percentage(),
            self.failed_deliveries(),
            self.stuck_agents(),
            self.events_per_second()
        )
    }
}

impl fmt::Display for RunSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "=== Run Summary ===")?;
        writeln!(f, "  Agents: {}", self.agent_count())?;
        writeln!(f, "  Ticks: {}", self.total_ticks())?;
        writeln!(
            f,
            "  Delivered Events: {} ({:.1}%)",
            self.delivered_events(),
            self.delivery_percentage()
        )?;
        writeln!(f, "  Failed Deliveries: {}", self.failed_deliveries())?;
        writeln!(f, "  Stuck Agents: {}", self.stuck_agents())?;
        if self.panicked_agents() > 0 {
            writeln!(f, "  Panicked Agents: {}", self.panicked_agents())?;
        }
        writeln!(f, "  Duration: {:.2}s", self.duration.as_secs_f64())?;
        write!(f, "  Throughput: {:.1} events/s", self.events_per_second())
    }
}
