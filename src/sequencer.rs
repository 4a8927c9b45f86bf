use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use tokio::time::sleep;

use crate::dispatch::{DispatchConfig, Dispatcher};
use crate::error::InvalidStateError;
use crate::history::HandHistory;
use crate::view::TableView;

/// The original replayers step on an 800–1000ms cadence; any positive delay
/// is acceptable.
pub const DEFAULT_STEP_DELAY: Duration = Duration::from_millis(800);

#[derive(Debug, Clone, Copy)]
pub struct SequencerConfig {
    pub step_delay: Duration,
    pub dispatch: DispatchConfig,
}

impl Default for SequencerConfig {
    fn default() -> Self {
        Self {
            step_delay: DEFAULT_STEP_DELAY,
            dispatch: DispatchConfig::default(),
        }
    }
}

/// Shared cancellation flag, checked when a scheduled step fires rather than
/// only when it is scheduled, so a timer queued before `cancel()` wakes up
/// into a no-op. Cancellation is idempotent.
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Playing,
    Exhausted,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SequenceOutcome {
    /// Every action was dispatched; the decision point is next. Signalled
    /// exactly once; `Exhausted` is terminal for the instance.
    Exhausted,
    /// A newer request superseded this run; nothing further was dispatched.
    Cancelled,
}

/// Walks a hand's action log in order, one dispatch per step, on a fixed
/// inter-step delay. Has exclusive use of the history for the run; the hand
/// is discarded once its decision is graded.
pub struct PlaybackSequencer<'a> {
    history: &'a HandHistory,
    dispatcher: Dispatcher,
    config: SequencerConfig,
    index: usize,
    phase: Phase,
    cancel: CancelToken,
}

impl<'a> PlaybackSequencer<'a> {
    pub fn new(history: &'a HandHistory, config: SequencerConfig) -> Self {
        Self {
            history,
            dispatcher: Dispatcher::new(config.dispatch),
            config,
            index: 0,
            phase: Phase::Idle,
            cancel: CancelToken::new(),
        }
    }

    /// Handle for superseding this run from outside. Cloning is cheap; the
    /// controller keeps one per in-flight playback.
    pub fn cancel_token(&self) -> CancelToken {
        self.cancel.clone()
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn steps_dispatched(&self) -> usize {
        self.index
    }

    /// Runs the playback to exhaustion or cancellation. Valid only from
    /// `Idle`; a second call is a caller bug.
    ///
    /// Steps are strictly sequential: step *n+1* is not scheduled until step
    /// *n*'s render call has returned, and an empty action log goes straight
    /// to `Exhausted` with zero dispatches.
    pub async fn start(
        &mut self,
        view: &mut dyn TableView,
    ) -> Result<SequenceOutcome, InvalidStateError> {
        if self.phase != Phase::Idle {
            return Err(InvalidStateError("sequencer already started"));
        }
        self.phase = Phase::Playing;

        view.clear_table();
        view.seat_players(&self.history.players, &self.history.hero_id);
        match self.history.hero_cards() {
            Ok(cards) if !cards.is_empty() => view.reveal_hero_hand(&cards),
            Ok(_) => {}
            // A validated history cannot land here; degrade like any other
            // malformed record.
            Err(err) => view.append_log(&format!("Unreadable hero hand: {err}")),
        }

        while self.index < self.history.actions.len() {
            if self.cancel.is_cancelled() {
                return Ok(SequenceOutcome::Cancelled);
            }
            let step = self.dispatcher.classify(&self.history.actions[self.index]);
            self.dispatcher.apply(&step, view);
            self.index += 1;
            if self.index < self.history.actions.len() {
                sleep(self.config.step_delay).await;
            }
        }

        if self.cancel.is_cancelled() {
            return Ok(SequenceOutcome::Cancelled);
        }
        self.phase = Phase::Exhausted;
        Ok(SequenceOutcome::Exhausted)
    }
}
