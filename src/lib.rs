// Cube Timer — orientation tracking core
//
// A six-sided cube with an accelerometer inside. The face pointing up selects
// the active task; every time the cube is turned over, the time spent on the
// previous face is appended to an activity log as a 4-byte record.
//
//   SampleSource -> classifier -> DwellTracker -> record -> ActivityLog
//
// Everything except the ESP-IDF entry point builds and tests on the host.

pub mod activity_log;
pub mod classifier;
pub mod clock;
pub mod config;
pub mod drivers;
pub mod events;
pub mod record;
pub mod tasks;
pub mod tracker;

pub use activity_log::ActivityLog;
pub use events::{AccelSample, Face, TimeEntry, Timestamp};
pub use tracker::DwellTracker;
