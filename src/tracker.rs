// Cube Timer — Dwell Tracker
//
// Time-domain debounce over the face classifier. The committed face only
// changes once it has been held for at least `min_dwell`; a change proposed
// earlier is dropped as bounce and leaves the running timer untouched.

use std::time::Duration;

use crate::clock::Clock;
use crate::events::{Face, TimeEntry, Timestamp};

pub struct DwellTracker<C: Clock> {
    clock: C,
    min_dwell: Duration,
    current: Face,
    since: Duration,
}

impl<C: Clock> DwellTracker<C> {
    /// Start tracking with `Face::One` as the committed face. The timer starts now.
    pub fn new(clock: C, min_dwell: Duration) -> Self {
        Self::with_initial(clock, min_dwell, Face::One)
    }

    pub fn with_initial(clock: C, min_dwell: Duration, initial: Face) -> Self {
        let since = clock.now();
        Self {
            clock,
            min_dwell,
            current: initial,
            since,
        }
    }

    pub fn current_face(&self) -> Face {
        self.current
    }

    /// Time spent on the current face so far.
    pub fn elapsed(&self) -> Duration {
        self.clock.now().saturating_sub(self.since)
    }

    /// Feed one classifier result.
    ///
    /// Returns the entry for the face being left when `candidate` differs from
    /// the current face and the current face has been held for the minimum
    /// dwell time. `None` (indeterminate) and the current face are no-ops.
    pub fn observe(&mut self, candidate: Option<Face>) -> Option<TimeEntry> {
        let candidate = candidate?;
        if candidate == self.current {
            return None;
        }

        let now = self.clock.now();
        let elapsed = now.saturating_sub(self.since);
        // Whole seconds, so a dwell of 14.9 s is still bounce.
        if elapsed.as_secs() < self.min_dwell.as_secs() {
            log::debug!(
                "Rejected {} -> {} after {} ms",
                self.current,
                candidate,
                elapsed.as_millis()
            );
            return None;
        }

        let entry = TimeEntry::new(self.current, Timestamp::from_duration(elapsed));
        self.current = candidate;
        self.since = now;
        Some(entry)
    }
}
