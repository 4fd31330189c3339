//! Wall-clock source for the session stopwatch.

use std::time::{Duration, Instant};

/// Source of the current instant.
pub trait Clock: Send + Sync {
    /// Current instant.
    fn now(&self) -> Instant;
}

/// Runtime clock. Backed by tokio so paused test runtimes control it.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        tokio::time::Instant::now().into_std()
    }
}

/// Measures the duration of a session; frozen once stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Stopwatch {
    started_at: Instant,
    stopped: Option<Duration>,
}

impl Stopwatch {
    pub(crate) fn start(now: Instant) -> Self {
        Self {
            started_at: now,
            stopped: None,
        }
    }

    pub(crate) fn stop(&mut self, now: Instant) -> Duration {
        *self
            .stopped
            .get_or_insert_with(|| now.saturating_duration_since(self.started_at))
    }

    pub(crate) fn elapsed(&self, now: Instant) -> Duration {
        self.stopped
            .unwrap_or_else(|| now.saturating_duration_since(self.started_at))
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use std::sync::Mutex;

    use super::*;

    /// Clock that only moves when told to.
    #[derive(Debug)]
    pub struct ManualClock {
        now: Mutex<Instant>,
    }

    impl ManualClock {
        pub fn new() -> Self {
            Self {
                now: Mutex::new(Instant::now()),
            }
        }

        pub fn advance(&self, by: Duration) {
            *self.now.lock().unwrap() += by;
        }
    }

    impl Clock for ManualClock {
        fn now(&self) -> Instant {
            *self.now.lock().unwrap()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stopwatch_freezes_on_stop() {
        let start = Instant::now();
        let mut watch = Stopwatch::start(start);

        assert_eq!(
            watch.elapsed(start + Duration::from_secs(3)),
            Duration::from_secs(3)
        );
        assert_eq!(
            watch.stop(start + Duration::from_secs(5)),
            Duration::from_secs(5)
        );
        // Stopping twice keeps the first reading.
        assert_eq!(
            watch.stop(start + Duration::from_secs(9)),
            Duration::from_secs(5)
        );
        assert_eq!(
            watch.elapsed(start + Duration::from_secs(60)),
            Duration::from_secs(5)
        );
    }
}
