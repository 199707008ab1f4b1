// Cube Timer — Control Loop
//
// Poll -> classify -> debounce, and on a commit serialize the entry into the
// activity log and refresh the status screen. Runs on a single thread for the
// lifetime of the device; the `stop` flag is only checked between cycles.

use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;
use std::time::{Duration, Instant};

use crate::activity_log::ActivityLog;
use crate::classifier;
use crate::clock::Clock;
use crate::config::TrackerConfig;
use crate::drivers::display::StatusScreen;
use crate::drivers::{Accelerometer, SampleSource};
use crate::events::{Face, StatusEvent, TimeEntry};
use crate::tasks::startup::{self, Startup};
use crate::tracker::DwellTracker;

pub struct ControlLoop<S, C: Clock, V = ()> {
    source: S,
    tracker: DwellTracker<C>,
    log: ActivityLog,
    config: TrackerConfig,
    screen: V,
}

impl<S: SampleSource, C: Clock> ControlLoop<S, C> {
    /// Headless loop.
    pub fn new(source: S, clock: C, config: TrackerConfig) -> Self {
        Self::with_screen(source, clock, config, ())
    }
}

impl<S: SampleSource, C: Clock, V: StatusScreen> ControlLoop<S, C, V> {
    pub fn with_screen(source: S, clock: C, config: TrackerConfig, screen: V) -> Self {
        Self {
            source,
            tracker: DwellTracker::new(clock, config.min_dwell),
            log: ActivityLog::new(),
            config,
            screen,
        }
    }

    /// One poll-classify-commit cycle, without any delay.
    pub fn step(&mut self) -> StatusEvent {
        let sample = match self.source.read() {
            Ok(Some(sample)) => sample,
            Ok(None) => return StatusEvent::NotReady,
            Err(e) => {
                log::warn!("Sensor read error: {:#}", e);
                return StatusEvent::NotReady;
            }
        };
        log::debug!("Accel: x: {}, y: {}, z: {}", sample.x, sample.y, sample.z);

        let candidate = classifier::classify(&sample, self.config.threshold);
        match self.tracker.observe(candidate) {
            Some(entry) => {
                let record = self.log.append(entry);
                log::info!(
                    "New entry: {} (now on {}) record {:02X?}",
                    entry,
                    self.tracker.current_face(),
                    record
                );
                log::info!(
                    "Total on {}: {} s",
                    entry.face,
                    self.log.total_for(entry.face).as_secs()
                );
                self.refresh_screen();
                StatusEvent::Committed(entry)
            }
            None => StatusEvent::Sampled(sample),
        }
    }

    /// Cycle until `stop` is raised. Each cycle takes `sample_interval`
    /// (`commit_settle` after a commit) including the time spent reading.
    pub fn run(&mut self, stop: &AtomicBool) {
        log::info!("Control loop running");
        self.refresh_screen();

        while !stop.load(Ordering::SeqCst) {
            let tick_start = Instant::now();
            let period = match self.step() {
                StatusEvent::Committed(_) => self.config.commit_settle,
                _ => self.config.sample_interval,
            };

            let rest = remaining(period, tick_start.elapsed());
            if !rest.is_zero() {
                thread::sleep(rest);
            }
        }

        log::info!("Control loop stopped after {} entries", self.log.len());
        for (face, total) in self.log.totals() {
            log::info!("  {}: {} s", face, total.as_secs());
        }
    }

    fn refresh_screen(&mut self) {
        if let Err(e) = self.screen.show(self.tracker.current_face(), self.log.last()) {
            log::warn!("Display error: {:#}", e);
        }
    }

    pub fn current_face(&self) -> Face {
        self.tracker.current_face()
    }

    pub fn log(&self) -> &ActivityLog {
        &self.log
    }

    /// Current face and the most recent entry.
    pub fn status(&self) -> (Face, Option<&TimeEntry>) {
        (self.tracker.current_face(), self.log.last())
    }

    pub fn into_log(self) -> ActivityLog {
        self.log
    }
}

/// Time left in a cycle of length `period` after `spent` was used.
fn remaining(period: Duration, spent: Duration) -> Duration {
    period.saturating_sub(spent)
}

/// Whole tracker thread: startup gate, then the control loop. Returns the
/// collected log once `stop` is raised.
pub fn tracker_task<A, C, V>(
    mut sensor: A,
    screen: V,
    clock: C,
    config: TrackerConfig,
    stop: &AtomicBool,
) -> ActivityLog
where
    A: Accelerometer,
    C: Clock,
    V: StatusScreen,
{
    log::info!("Tracker task started");

    if startup::bring_up(&mut sensor, config.retry_interval, stop) == Startup::Stopped {
        log::info!("Tracker task stopped before the sensor came up");
        return ActivityLog::new();
    }

    let mut control = ControlLoop::with_screen(sensor, clock, config, screen);
    control.run(stop);
    control.into_log()
}
