//! Status phase state machine
//!
//! Every agent cycles through a normal band and a short alert band driven by its
//! step counter. Each tick the counter is incremented, then reset to 0 once it
//! exceeds [`CYCLE_END`], and only then is the phase read. The phase lookup therefore
//! never sees a counter above [`CYCLE_END`].

use serde::{Deserialize, Serialize};
use std::fmt;

/// Last counter value of the normal band
pub const NORMAL_BAND_END: u32 = 55;

/// Counter value at which the cycle wraps; anything above resets to 0
pub const CYCLE_END: u32 = 60;

/// Exclusive upper bound of the random initial counter offset
pub const INITIAL_OFFSET_LIMIT: u32 = 59;

/// Observable status phase of an agent
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusPhase {
    /// Counter in [0, 55] or exactly 60
    Normal,
    /// Counter in (55, 60)
    Alert,
}

impl StatusPhase {
    /// Phase for a counter value
    pub fn from_counter(counter: u32) -> Self {
        if counter > NORMAL_BAND_END && counter < CYCLE_END {
            StatusPhase::Alert
        } else {
            StatusPhase::Normal
        }
    }

    /// Index into a profile's status vocabulary
    pub fn index(&self) -> usize {
        match self {
            StatusPhase::Normal => 0,
            StatusPhase::Alert => 1,
        }
    }
}

impl fmt::Display for StatusPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StatusPhase::Normal => write!(f, "normal"),
            StatusPhase::Alert => write!(f, "alert"),
        }
    }
}

/// Per-agent step counter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StepCounter(u32);

impl StepCounter {
    /// Counter starting at `offset`
    pub fn new(offset: u32) -> Self {
        Self(offset)
    }

    /// Current counter value
    pub fn value(&self) -> u32 {
        self.0
    }

    /// Current phase without advancing
    fn phase(&self) -> StatusPhase {
        StatusPhase::from_counter(self.0)
    }

    /// Increment, wrap past the cycle end, and return the phase for this tick
    pub fn advance(&mut self) -> StatusPhase {
        self.0 += 1;
        if self.0 > CYCLE_END {
            self.0 = 0;
        }
        self.phase()
    }
}
