// Cube Timer — Data Types & Status Events

use std::fmt;
use std::time::Duration;

// ---------------------------------------------------------------------------
// Sensor Data (raw 3-axis accelerometer reading)
// ---------------------------------------------------------------------------
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AccelSample {
    pub x: i16,
    pub y: i16,
    pub z: i16,
}

impl AccelSample {
    pub const fn new(x: i16, y: i16, z: i16) -> Self {
        Self { x, y, z }
    }
}

// ---------------------------------------------------------------------------
// Faces
// ---------------------------------------------------------------------------

/// The six faces of the cube, named after the axis that points up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Face {
    /// +Z up (flat, top up).
    One,
    /// -Z up (flat, top down).
    Two,
    /// +X up.
    Three,
    /// -X up.
    Four,
    /// +Y up.
    Five,
    /// -Y up.
    Six,
}

impl Face {
    pub const ALL: [Face; 6] = [
        Face::One,
        Face::Two,
        Face::Three,
        Face::Four,
        Face::Five,
        Face::Six,
    ];

    /// Wire identifier of the face (1..=6).
    pub const fn id(self) -> u8 {
        match self {
            Self::One => 1,
            Self::Two => 2,
            Self::Three => 3,
            Self::Four => 4,
            Self::Five => 5,
            Self::Six => 6,
        }
    }

    /// Inverse of [`Face::id`]. Returns `None` for anything outside 1..=6.
    pub const fn from_id(id: u8) -> Option<Self> {
        match id {
            1 => Some(Self::One),
            2 => Some(Self::Two),
            3 => Some(Self::Three),
            4 => Some(Self::Four),
            5 => Some(Self::Five),
            6 => Some(Self::Six),
            _ => None,
        }
    }
}

impl Default for Face {
    fn default() -> Self {
        Self::One
    }
}

impl fmt::Display for Face {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "F{}", self.id())
    }
}

// ---------------------------------------------------------------------------
// Timestamps (elapsed time since the last commit, not wall-clock time)
// ---------------------------------------------------------------------------
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Timestamp {
    pub hours: u8,
    pub minutes: u8,
    pub seconds: u8,
}

impl Timestamp {
    /// Split a duration into h/m/s. Sub-second precision is dropped and the
    /// hour field saturates at 255.
    pub fn from_duration(elapsed: Duration) -> Self {
        let total = elapsed.as_secs();
        Self {
            hours: (total / 3600).min(u8::MAX as u64) as u8,
            minutes: ((total / 60) % 60) as u8,
            seconds: (total % 60) as u8,
        }
    }

    pub fn total_seconds(&self) -> u64 {
        self.hours as u64 * 3600 + self.minutes as u64 * 60 + self.seconds as u64
    }

    pub fn as_duration(&self) -> Duration {
        Duration::from_secs(self.total_seconds())
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}:{:02}:{:02}", self.hours, self.minutes, self.seconds)
    }
}

// ---------------------------------------------------------------------------
// Log entries
// ---------------------------------------------------------------------------

/// One committed dwell period: the face that was left and how long it was held.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeEntry {
    pub face: Face,
    pub duration: Timestamp,
}

impl TimeEntry {
    pub fn new(face: Face, duration: Timestamp) -> Self {
        Self { face, duration }
    }
}

impl fmt::Display for TimeEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} for {}", self.face, self.duration)
    }
}

// ---------------------------------------------------------------------------
// Status events — what one control loop cycle produced
// ---------------------------------------------------------------------------
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusEvent {
    /// The source had no fresh reading; the cycle was skipped.
    NotReady,
    /// A reading was taken but did not change the committed face.
    Sampled(AccelSample),
    /// A face change was accepted and logged.
    Committed(TimeEntry),
}
