pub mod adxl345;
pub mod bus;
pub mod display;
pub mod ssd1306;

use crate::events::AccelSample;

/// Anything that can hand out raw 3-axis acceleration readings.
pub trait SampleSource {
    /// Read one sample. `Ok(None)` means no fresh data is ready yet and the
    /// caller should skip this cycle.
    fn read(&mut self) -> anyhow::Result<Option<AccelSample>>;
}

/// A physical accelerometer that must pass the startup gate before use.
pub trait Accelerometer: SampleSource {
    /// Value the identity register must report.
    fn expected_id(&self) -> u8;

    /// Read the identity register.
    fn device_id(&mut self) -> anyhow::Result<u8>;

    /// Apply and verify the measurement configuration.
    fn configure(&mut self) -> anyhow::Result<()>;
}
