//! Fire-and-forget feedback (sounds) triggered by session transitions.

use std::panic::{AssertUnwindSafe, catch_unwind};

use thiserror::Error;
use tracing::{debug, warn};

/// Feedback cue emitted by the session controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cue {
    /// A question was answered correctly.
    Correct,
    /// A question was answered wrongly, skipped or timed out.
    Incorrect,
    /// The countdown entered its low-time window.
    Tick,
    /// The session is complete.
    Success,
}

/// Failure reported by an [`Effects`] backend.
#[derive(Debug, Error)]
#[error("effect playback failed: {0}")]
pub struct EffectError(pub String);

/// Capability the controller calls through to play feedback.
///
/// Implementations may fail; the controller logs the failure and carries on.
pub trait Effects: Send + Sync {
    /// Play `cue` without blocking.
    fn play(&self, cue: Cue) -> Result<(), EffectError>;
}

/// Muted session.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoEffects;

impl Effects for NoEffects {
    fn play(&self, _cue: Cue) -> Result<(), EffectError> {
        Ok(())
    }
}

/// Records cues in the trace log instead of playing them.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingEffects;

impl Effects for TracingEffects {
    fn play(&self, cue: Cue) -> Result<(), EffectError> {
        debug!(?cue, "feedback cue");
        Ok(())
    }
}

/// Play a cue, swallowing errors and panics so session state never depends on it.
pub(crate) fn play_isolated(effects: &dyn Effects, cue: Cue) {
    match catch_unwind(AssertUnwindSafe(|| effects.play(cue))) {
        Ok(Ok(())) => {}
        Ok(Err(err)) => warn!(?cue, error = %err, "failed to play feedback cue"),
        Err(_) => warn!(?cue, "feedback backend panicked; ignoring"),
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use std::sync::Mutex;

    use super::*;

    /// Records every cue it is asked to play.
    #[derive(Debug, Default)]
    pub struct RecordingEffects {
        cues: Mutex<Vec<Cue>>,
    }

    impl RecordingEffects {
        pub fn cues(&self) -> Vec<Cue> {
            self.cues.lock().unwrap().clone()
        }

        pub fn count(&self, cue: Cue) -> usize {
            self.cues().into_iter().filter(|c| *c == cue).count()
        }
    }

    impl Effects for RecordingEffects {
        fn play(&self, cue: Cue) -> Result<(), EffectError> {
            self.cues.lock().unwrap().push(cue);
            Ok(())
        }
    }

    /// Backend that always fails, like a browser refusing autoplay.
    #[derive(Debug, Default)]
    pub struct BrokenEffects;

    impl Effects for BrokenEffects {
        fn play(&self, _cue: Cue) -> Result<(), EffectError> {
            Err(EffectError("audio device unavailable".into()))
        }
    }

    /// Backend that panics on every call.
    #[derive(Debug, Default)]
    pub struct PanickingEffects;

    impl Effects for PanickingEffects {
        fn play(&self, cue: Cue) -> Result<(), EffectError> {
            panic!("cannot play {cue:?}");
        }
    }
}
