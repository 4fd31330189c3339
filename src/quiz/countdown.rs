//! Per-question logical countdown driven by host ticks.

/// Time units granted for each question.
pub const QUESTION_SECONDS: u32 = 20;
/// Remaining time at or below which ticks are flagged as low-time.
pub const LOW_TIME_THRESHOLD: u32 = 5;

/// What a single tick did to the countdown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CountdownTick {
    /// The countdown is torn down; the tick was ignored.
    Stopped,
    /// Time decreased and is still above zero.
    Running {
        /// Units left after this tick.
        remaining: u32,
        /// True while `remaining` is within [`LOW_TIME_THRESHOLD`].
        low_time: bool,
    },
    /// Time reached zero on this tick; the countdown is now stopped.
    Expired,
}

/// Countdown for the active question.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Countdown {
    remaining: u32,
    running: bool,
}

impl Countdown {
    /// Armed countdown starting at `duration` units.
    pub fn start(duration: u32) -> Self {
        Self {
            remaining: duration,
            running: duration > 0,
        }
    }

    /// Torn-down countdown that ignores every tick.
    pub fn stopped() -> Self {
        Self {
            remaining: 0,
            running: false,
        }
    }

    /// Units left.
    pub fn remaining(&self) -> u32 {
        self.remaining
    }

    /// Whether ticks still have an effect.
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Tear the countdown down; later ticks are ignored.
    pub fn stop(&mut self) {
        self.running = false;
    }

    /// Consume one unit of time.
    pub fn tick(&mut self) -> CountdownTick {
        if !self.running {
            return CountdownTick::Stopped;
        }

        self.remaining = self.remaining.saturating_sub(1);
        if self.remaining == 0 {
            self.running = false;
            return CountdownTick::Expired;
        }

        CountdownTick::Running {
            remaining: self.remaining,
            low_time: self.remaining <= LOW_TIME_THRESHOLD,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_down_to_expiry() {
        let mut countdown = Countdown::start(QUESTION_SECONDS);
        for expected in (1..QUESTION_SECONDS).rev() {
            match countdown.tick() {
                CountdownTick::Running { remaining, .. } => assert_eq!(remaining, expected),
                other => panic!("unexpected tick {other:?}"),
            }
        }
        assert_eq!(countdown.tick(), CountdownTick::Expired);
        assert!(!countdown.is_running());
        assert_eq!(countdown.tick(), CountdownTick::Stopped);
    }

    #[test]
    fn low_time_flag_covers_last_five_units() {
        let mut countdown = Countdown::start(QUESTION_SECONDS);
        let low: Vec<u32> = std::iter::from_fn(|| match countdown.tick() {
            CountdownTick::Running { remaining, low_time } => Some((remaining, low_time)),
            _ => None,
        })
        .filter(|(_, low_time)| *low_time)
        .map(|(remaining, _)| remaining)
        .collect();

        assert_eq!(low, vec![5, 4, 3, 2, 1]);
    }

    #[test]
    fn stopped_countdown_ignores_ticks() {
        let mut countdown = Countdown::start(QUESTION_SECONDS);
        countdown.tick();
        countdown.stop();
        assert_eq!(countdown.tick(), CountdownTick::Stopped);
        assert_eq!(countdown.remaining(), QUESTION_SECONDS - 1);
        assert_eq!(Countdown::stopped().tick(), CountdownTick::Stopped);
    }
}
