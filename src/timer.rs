//! Countdown and stopwatch timers driven by a monotonic clock.
//!
//! [`KitchenTimer`] never counts ticks: every query recomputes from the start
//! instant and the instant passed in, so a slow or jittery control loop only
//! delays when expiry is noticed, never how much time is reported.

use crate::time::{TimeDuration, TimeInstant};

/// What a running timer measures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TimerMode<D> {
    /// Counts down from a target and expires at zero.
    Countdown(D),
    /// Counts up with no expiry.
    Stopwatch,
}

/// Result of polling a timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TimerStatus<D> {
    /// No timer is running.
    Idle,
    /// Countdown still running.
    Counting { remaining: D },
    /// Stopwatch running.
    Elapsed { elapsed: D },
    /// Countdown reached zero on this poll. The timer is now idle.
    Expired,
}

#[derive(Clone, Copy)]
struct RunningTimer<I: TimeInstant> {
    mode: TimerMode<I::Duration>,
    start: I,
}

/// A single countdown or stopwatch, inactive until started.
#[derive(Clone, Copy)]
pub struct KitchenTimer<I: TimeInstant> {
    running: Option<RunningTimer<I>>,
}

impl<I: TimeInstant> KitchenTimer<I> {
    /// Creates an inactive timer.
    pub const fn new() -> Self {
        Self { running: None }
    }

    /// Starts counting down `target` from `now`, replacing any running timer.
    pub fn start_countdown(&mut self, now: I, target: I::Duration) {
        self.running = Some(RunningTimer {
            mode: TimerMode::Countdown(target),
            start: now,
        });
    }

    /// Starts counting up from `now`, replacing any running timer.
    pub fn start_stopwatch(&mut self, now: I) {
        self.running = Some(RunningTimer {
            mode: TimerMode::Stopwatch,
            start: now,
        });
    }

    /// Discards the timer.
    pub fn cancel(&mut self) {
        self.running = None;
    }

    /// Returns true while a timer is running.
    pub fn is_active(&self) -> bool {
        self.running.is_some()
    }

    /// Mode of the running timer.
    pub fn mode(&self) -> Option<TimerMode<I::Duration>> {
        self.running.map(|r| r.mode)
    }

    /// Time since the timer started.
    pub fn elapsed(&self, now: I) -> Option<I::Duration> {
        self.running.map(|r| now.duration_since(r.start))
    }

    /// Time left on a countdown, saturating at zero.
    ///
    /// `None` when idle or in stopwatch mode.
    pub fn remaining(&self, now: I) -> Option<I::Duration> {
        match self.running {
            Some(RunningTimer {
                mode: TimerMode::Countdown(target),
                start,
            }) => Some(target.saturating_sub(now.duration_since(start))),
            _ => None,
        }
    }

    /// Reports progress and retires an expired countdown.
    ///
    /// `Expired` is returned exactly once per countdown; later polls see `Idle`.
    pub fn poll(&mut self, now: I) -> TimerStatus<I::Duration> {
        let Some(running) = self.running else {
            return TimerStatus::Idle;
        };

        let elapsed = now.duration_since(running.start);
        match running.mode {
            TimerMode::Stopwatch => TimerStatus::Elapsed { elapsed },
            TimerMode::Countdown(target) => {
                let remaining = target.saturating_sub(elapsed);
                if remaining == I::Duration::ZERO {
                    self.running = None;
                    TimerStatus::Expired
                } else {
                    TimerStatus::Counting { remaining }
                }
            }
        }
    }
}

impl<I: TimeInstant> Default for KitchenTimer<I> {
    fn default() -> Self {
        Self::new()
    }
}
