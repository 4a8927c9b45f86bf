use serde::{Deserialize, Serialize};

/// Session-wide accuracy counters. Single writer (the session controller, or
/// one web session), monotone non-decreasing, reset only by starting a new
/// session.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StatsTracker {
    correct: u32,
    total: u32,
}

/// Display form of the counters, as the stats endpoint and the view consume
/// them.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct StatsSnapshot {
    pub correct: u32,
    pub total: u32,
    pub percentage: u32,
}

impl StatsTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Counts the attempt. Called when a hand is *requested*, not when it is
    /// decided, so an abandoned or failed hand still counts toward `total`.
    pub fn record_hand_played(&mut self) {
        self.total += 1;
    }

    /// At most once per hand, and only on a correct verdict.
    pub fn record_correct(&mut self) {
        self.correct += 1;
    }

    pub fn correct(&self) -> u32 {
        self.correct
    }

    pub fn total(&self) -> u32 {
        self.total
    }

    /// Accuracy as a whole percentage, rounded half up. 0 when no hand has
    /// been attempted.
    pub fn percentage(&self) -> u32 {
        if self.total == 0 {
            return 0;
        }
        (200 * self.correct + self.total) / (2 * self.total)
    }

    pub fn snapshot(&self) -> StatsSnapshot {
        StatsSnapshot {
            correct: self.correct,
            total: self.total,
            percentage: self.percentage(),
        }
    }
}
