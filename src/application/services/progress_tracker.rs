//! Publishes pipeline progress to subscribers.

use tokio::sync::watch;
use tracing::{debug, warn};

use crate::domain::errors::PipelineError;
use crate::domain::pipeline::{PipelineState, Stage};

/// Holds the current [`PipelineState`] and broadcasts every change.
#[derive(Debug)]
pub struct ProgressTracker {
    sender: watch::Sender<PipelineState>,
}

impl Default for ProgressTracker {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressTracker {
    /// Creates a tracker in `Idle`.
    #[must_use]
    pub fn new() -> Self {
        let (sender, _) = watch::channel(PipelineState::Idle);
        Self { sender }
    }

    /// Returns a receiver that observes every subsequent state.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<PipelineState> {
        self.sender.subscribe()
    }

    /// Returns the current state.
    #[must_use]
    pub fn current(&self) -> PipelineState {
        self.sender.borrow().clone()
    }

    /// Moves to `next`.
    ///
    /// # Errors
    /// Returns `InvalidTransition` and leaves the state untouched if `next`
    /// may not follow the current state.
    pub fn advance(&self, next: PipelineState) -> Result<(), PipelineError> {
        let current = self.current();
        if !current.can_transition_to(&next) {
            warn!(from = %current, to = %next, "Rejected pipeline transition");
            return Err(PipelineError::InvalidTransition {
                from: current,
                to: next,
            });
        }

        debug!(from = %current, to = %next, "Pipeline state changed");
        self.sender.send_replace(next);
        Ok(())
    }

    /// Moves to `Failed` at `stage`. Ignored once the run is terminal.
    pub fn fail(&self, stage: Stage, reason: impl Into<String>) {
        let failed = PipelineState::Failed {
            stage,
            reason: reason.into(),
        };
        if self.current().can_transition_to(&failed) {
            warn!(state = %failed, "Pipeline failed");
            self.sender.send_replace(failed);
        }
    }

    /// Returns to `Idle` from any state.
    pub fn reset(&self) {
        debug!("Pipeline reset");
        self.sender.send_replace(PipelineState::Idle);
    }
}
