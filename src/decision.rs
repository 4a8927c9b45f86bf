use serde::{Deserialize, Serialize};

use crate::error::InvalidStateError;
use crate::history::HandHistory;

/// Result of grading the user's chosen move against the recorded ground
/// truth.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Verdict {
    pub is_correct: bool,
    pub correct_decision: String,
}

/// Case-insensitive, whitespace-exact label equality. No trimming, no fuzzy
/// matching. Move labels and the correct decision come from the same data
/// source, so case folding is the only normalisation that applies.
pub fn labels_match(chosen: &str, correct: &str) -> bool {
    chosen.to_lowercase() == correct.to_lowercase()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DecisionPhase {
    Pending,
    Offered,
    Graded,
}

/// Offers the recorded moves once playback is exhausted, accepts exactly one
/// choice, grades it, then goes inert for the hand.
#[derive(Debug)]
pub struct DecisionEngine<'a> {
    history: &'a HandHistory,
    phase: DecisionPhase,
}

impl<'a> DecisionEngine<'a> {
    pub fn new(history: &'a HandHistory) -> Self {
        Self {
            history,
            phase: DecisionPhase::Pending,
        }
    }

    /// Valid exactly once. Re-invocation before a grading result is a caller
    /// bug.
    pub fn offer_moves(&mut self) -> Result<&'a [String], InvalidStateError> {
        if self.phase != DecisionPhase::Pending {
            return Err(InvalidStateError("moves already offered for this hand"));
        }
        self.phase = DecisionPhase::Offered;
        Ok(&self.history.available_moves)
    }

    /// Grades `chosen` against the recorded correct decision. Any string is
    /// accepted; one not drawn from the offered moves simply grades false
    /// unless it case-folds equal to the correct decision. Succeeds at most
    /// once; the verdict it returns is the engine's one-shot notification.
    pub fn grade(&mut self, chosen: &str) -> Result<Verdict, InvalidStateError> {
        match self.phase {
            DecisionPhase::Pending => Err(InvalidStateError("moves were never offered")),
            DecisionPhase::Graded => Err(InvalidStateError("hand already graded")),
            DecisionPhase::Offered => {
                self.phase = DecisionPhase::Graded;
                Ok(Verdict {
                    is_correct: labels_match(chosen, &self.history.correct_decision),
                    correct_decision: self.history.correct_decision.clone(),
                })
            }
        }
    }
}
