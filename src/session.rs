use std::time::Duration;

use tokio::time::sleep;
use tracing::{debug, warn};

use crate::decision::{DecisionEngine, Verdict};
use crate::error::InvalidStateError;
use crate::sequencer::{CancelToken, PlaybackSequencer, SequenceOutcome, SequencerConfig};
use crate::source::HandSource;
use crate::stats::{StatsSnapshot, StatsTracker};
use crate::view::TableView;

/// How long a verdict stays on screen before the cosmetic auto-hide. The
/// hide gates nothing: stats and the verdict are already surfaced and the
/// request control is re-armed before it runs.
pub const DEFAULT_FEEDBACK_AUTO_HIDE: Duration = Duration::from_millis(3000);

#[derive(Debug, Clone, Copy)]
pub struct SessionConfig {
    pub sequencer: SequencerConfig,
    pub feedback_auto_hide: Option<Duration>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            sequencer: SequencerConfig::default(),
            feedback_auto_hide: Some(DEFAULT_FEEDBACK_AUTO_HIDE),
        }
    }
}

/// Supplies the user's decision once the moves are on the table. `None`
/// abandons the hand (it still counts as attempted).
pub trait MoveChooser {
    fn choose(&mut self, moves: &[String]) -> Option<String>;
}

impl<F> MoveChooser for F
where
    F: FnMut(&[String]) -> Option<String>,
{
    fn choose(&mut self, moves: &[String]) -> Option<String> {
        self(moves)
    }
}

/// Always picks the first offered move; drives smoke runs.
pub fn first_move(moves: &[String]) -> Option<String> {
    moves.first().cloned()
}

/// How one hand cycle ended.
#[derive(Debug, Clone, PartialEq)]
pub enum HandOutcome {
    Decided(Verdict),
    /// The data source failed; the error state was surfaced and the control
    /// re-armed. Not retried.
    AcquisitionFailed,
    /// The chooser declined to answer; the attempt still counts.
    Abandoned,
    /// A newer request cancelled this playback mid-flight.
    Superseded,
}

/// Orchestrates the full cycle: acquire, sequence, offer, grade, record.
/// Owns the "one playback in flight" invariant: a new request cancels any
/// stale sequencer token before constructing the next, so a superseded
/// timer wakes up into a no-op instead of writing to shared render targets.
pub struct SessionController<S, V> {
    source: S,
    view: V,
    stats: StatsTracker,
    config: SessionConfig,
    active: Option<CancelToken>,
}

impl<S: HandSource, V: TableView> SessionController<S, V> {
    pub fn new(source: S, view: V, config: SessionConfig) -> Self {
        Self {
            source,
            view,
            stats: StatsTracker::new(),
            config,
            active: None,
        }
    }

    pub fn stats(&self) -> StatsSnapshot {
        self.stats.snapshot()
    }

    pub fn view(&self) -> &V {
        &self.view
    }

    pub fn view_mut(&mut self) -> &mut V {
        &mut self.view
    }

    /// Token of the playback currently in flight, if any. An embedder can
    /// cancel it to supersede the run from outside the controller.
    pub fn in_flight(&self) -> Option<CancelToken> {
        self.active.clone()
    }

    /// Runs one full hand cycle. The attempt is counted immediately, before
    /// the fetch resolves.
    pub async fn request_new_hand(
        &mut self,
        chooser: &mut dyn MoveChooser,
    ) -> Result<HandOutcome, InvalidStateError> {
        if let Some(stale) = self.active.take() {
            stale.cancel();
        }

        self.stats.record_hand_played();
        self.view.update_stats(&self.stats.snapshot());

        let history = match self.source.fetch_hand().await {
            Ok(history) => history,
            Err(err) => {
                warn!(%err, "hand acquisition failed");
                self.view.show_error(&err.to_string());
                return Ok(HandOutcome::AcquisitionFailed);
            }
        };
        if let Err(err) = history.validate() {
            warn!(%err, "acquired hand history is invalid");
            self.view.show_error(&err.to_string());
            return Ok(HandOutcome::AcquisitionFailed);
        }

        let mut sequencer = PlaybackSequencer::new(&history, self.config.sequencer);
        self.active = Some(sequencer.cancel_token());
        if sequencer.start(&mut self.view).await? == SequenceOutcome::Cancelled {
            debug!("playback superseded before exhaustion");
            return Ok(HandOutcome::Superseded);
        }

        let mut engine = DecisionEngine::new(&history);
        let moves = engine.offer_moves()?;
        self.view.show_decision_prompt(moves);

        let Some(chosen) = chooser.choose(moves) else {
            return Ok(HandOutcome::Abandoned);
        };

        let verdict = engine.grade(&chosen)?;
        if verdict.is_correct {
            self.stats.record_correct();
        }
        self.view.show_verdict(&verdict);
        self.view.update_stats(&self.stats.snapshot());
        self.active = None;

        if let Some(linger) = self.config.feedback_auto_hide {
            sleep(linger).await;
            self.view.clear_feedback();
        }

        Ok(HandOutcome::Decided(verdict))
    }
}
