//! Clock abstraction for platform-agnostic timing.
//!
//! Timers, debouncing and the acquisition deadline all read time through
//! these traits so tests can drive a simulated clock. Blocking waits use
//! [`embedded_hal::delay::DelayNs`] instead.

/// Source of monotonic time instants.
pub trait TimeSource<I: TimeInstant> {
    /// Returns the current time instant.
    fn now(&self) -> I;
}

/// Trait abstraction for duration types.
pub trait TimeDuration: Copy + PartialEq {
    /// Zero duration constant.
    const ZERO: Self;

    /// Converts duration to milliseconds.
    fn as_millis(&self) -> u64;

    /// Creates duration from milliseconds.
    fn from_millis(millis: u64) -> Self;

    /// Saturating subtraction (returns ZERO on underflow).
    fn saturating_sub(self, other: Self) -> Self;

    /// Whole seconds, rounding any partial second up.
    ///
    /// A countdown with 179.2 s left reads as 180 s, so the display only
    /// shows `00:00` once the timer has actually run out.
    fn as_secs_ceil(&self) -> u64 {
        self.as_millis().div_ceil(1000)
    }

    /// Whole seconds, dropping any partial second.
    fn as_secs_floor(&self) -> u64 {
        self.as_millis() / 1000
    }
}

/// Trait abstraction for instant types.
pub trait TimeInstant: Copy {
    /// Duration type for this instant.
    type Duration: TimeDuration;

    /// Calculates duration since an earlier instant.
    fn duration_since(&self, earlier: Self) -> Self::Duration;
}

/// True once at least `limit_ms` have passed between `start` and `now`.
#[inline]
pub(crate) fn has_elapsed<I: TimeInstant>(start: I, now: I, limit_ms: u64) -> bool {
    now.duration_since(start).as_millis() >= limit_ms
}
