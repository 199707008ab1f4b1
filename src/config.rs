// Cube Timer — Hardware & System Configuration
// Target: Seeed Studio Xiao ESP32-C3 (RISC-V) + ADXL345 accelerometer

use std::time::Duration;

// ---------------------------------------------------------------------------
// I2C Bus (SDA on GPIO6 / D4, SCL on GPIO7 / D5)
// ---------------------------------------------------------------------------
pub const I2C_BAUDRATE_KHZ: u32 = 400;
pub const I2C_ADDR_ADXL345: u8 = 0x53; // SDO/ALT ADDRESS pulled low
pub const I2C_ADDR_OLED: u8 = 0x3C;
pub const ADXL345_DEVICE_ID: u8 = 0xE5; // Fixed value of the DEVID register

// ---------------------------------------------------------------------------
// Display (SSD1306 OLED)
// ---------------------------------------------------------------------------
pub const SCREEN_WIDTH: u32 = 128;
pub const SCREEN_HEIGHT: u32 = 64;
pub const DISPLAY_BUFFER_SIZE: usize = (SCREEN_WIDTH as usize * SCREEN_HEIGHT as usize) / 8; // 1024

// ---------------------------------------------------------------------------
// Task Stack Sizes (bytes)
// ---------------------------------------------------------------------------
pub const STACK_TRACKER: usize = 8192;

// ---------------------------------------------------------------------------
// Orientation tracking
// ---------------------------------------------------------------------------
pub const FACE_THRESHOLD: i16 = 127; // Raw units, ~0.5 g at ±2 g full scale
pub const MIN_DWELL_SECS: u64 = 15; // A face must be held this long before a change commits

// ---------------------------------------------------------------------------
// Timing (milliseconds)
// ---------------------------------------------------------------------------
pub const SAMPLE_INTERVAL_MS: u64 = 100; // 10 Hz poll
pub const COMMIT_SETTLE_MS: u64 = 1000; // Pause after a committed transition
pub const IDENTITY_RETRY_MS: u64 = 10_000; // Startup gate retry / halt period

/// Runtime knobs of the tracker task. `Default` mirrors the constants above.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrackerConfig {
    /// Per-axis magnitude a reading must exceed to select a face.
    pub threshold: i16,
    /// Minimum time on a face before a change is accepted.
    pub min_dwell: Duration,
    /// Delay between two poll cycles.
    pub sample_interval: Duration,
    /// Extra delay after a committed transition.
    pub commit_settle: Duration,
    /// Retry period of the identity handshake and the halt loop.
    pub retry_interval: Duration,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            threshold: FACE_THRESHOLD,
            min_dwell: Duration::from_secs(MIN_DWELL_SECS),
            sample_interval: Duration::from_millis(SAMPLE_INTERVAL_MS),
            commit_settle: Duration::from_millis(COMMIT_SETTLE_MS),
            retry_interval: Duration::from_millis(IDENTITY_RETRY_MS),
        }
    }
}
