// Cube Timer — ADXL345 Accelerometer Driver
//
// Register-level driver over any embedded-hal 1.0 I2C bus. Runs the sensor
// at ±2 g / 10-bit (256 LSB/g) and 100 Hz output rate.

use anyhow::{anyhow, bail};
use embedded_hal::i2c::{Error as _, I2c};

use crate::config::{ADXL345_DEVICE_ID, I2C_ADDR_ADXL345};
use crate::drivers::{Accelerometer, SampleSource};
use crate::events::AccelSample;

// ADXL345 register addresses
const REG_DEVID: u8 = 0x00;
const REG_BW_RATE: u8 = 0x2C;
const REG_POWER_CTL: u8 = 0x2D;
const REG_INT_SOURCE: u8 = 0x30;
const REG_DATA_FORMAT: u8 = 0x31;
const REG_DATAX0: u8 = 0x32; // Start of 6-byte X/Y/Z burst

const BW_RATE_100HZ: u8 = 0x0A;
const POWER_CTL_MEASURE: u8 = 0x08;
const DATA_FORMAT_2G: u8 = 0x00;
const INT_DATA_READY: u8 = 0x80;

pub struct Adxl345<I2C> {
    i2c: I2C,
    address: u8,
}

impl<I2C: I2c> Adxl345<I2C> {
    pub fn new(i2c: I2C) -> Self {
        Self::with_address(i2c, I2C_ADDR_ADXL345)
    }

    pub fn with_address(i2c: I2C, address: u8) -> Self {
        Self { i2c, address }
    }

    fn write_register(&mut self, register: u8, value: u8) -> anyhow::Result<()> {
        self.i2c
            .write(self.address, &[register, value])
            .map_err(|e| anyhow!("ADXL345 write 0x{:02X}: {:?}", register, e.kind()))
    }

    fn read_registers(&mut self, register: u8, buf: &mut [u8]) -> anyhow::Result<()> {
        self.i2c
            .write_read(self.address, &[register], buf)
            .map_err(|e| anyhow!("ADXL345 read 0x{:02X}: {:?}", register, e.kind()))
    }

    fn read_register(&mut self, register: u8) -> anyhow::Result<u8> {
        let mut buf = [0u8; 1];
        self.read_registers(register, &mut buf)?;
        Ok(buf[0])
    }

    /// Whether a new sample has been latched since the last data read.
    pub fn data_ready(&mut self) -> anyhow::Result<bool> {
        Ok(self.read_register(REG_INT_SOURCE)? & INT_DATA_READY != 0)
    }

    /// Burst-read all three axes (little-endian, two's complement).
    pub fn read_raw(&mut self) -> anyhow::Result<AccelSample> {
        let mut raw = [0u8; 6];
        self.read_registers(REG_DATAX0, &mut raw)?;
        Ok(AccelSample {
            x: i16::from_le_bytes([raw[0], raw[1]]),
            y: i16::from_le_bytes([raw[2], raw[3]]),
            z: i16::from_le_bytes([raw[4], raw[5]]),
        })
    }
}

impl<I2C: I2c> SampleSource for Adxl345<I2C> {
    fn read(&mut self) -> anyhow::Result<Option<AccelSample>> {
        if !self.data_ready()? {
            return Ok(None);
        }
        self.read_raw().map(Some)
    }
}

impl<I2C: I2c> Accelerometer for Adxl345<I2C> {
    fn expected_id(&self) -> u8 {
        ADXL345_DEVICE_ID
    }

    fn device_id(&mut self) -> anyhow::Result<u8> {
        self.read_register(REG_DEVID)
    }

    fn configure(&mut self) -> anyhow::Result<()> {
        self.write_register(REG_DATA_FORMAT, DATA_FORMAT_2G)?;
        self.write_register(REG_BW_RATE, BW_RATE_100HZ)?;
        self.write_register(REG_POWER_CTL, POWER_CTL_MEASURE)?;

        // Setup only counts once it reads back.
        let power = self.read_register(REG_POWER_CTL)?;
        if power != POWER_CTL_MEASURE {
            bail!(
                "ADXL345 POWER_CTL reads back 0x{:02X}, expected 0x{:02X}",
                power,
                POWER_CTL_MEASURE
            );
        }

        log::info!("ADXL345 initialised (±2g, 100Hz)");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use embedded_hal::i2c::ErrorKind;
    use embedded_hal_mock::eh1::i2c::{Mock as I2cMock, Transaction};

    const ADDR: u8 = I2C_ADDR_ADXL345;

    #[test]
    fn reads_identity_register() {
        let expectations = [Transaction::write_read(ADDR, vec![REG_DEVID], vec![0xE5])];
        let mut i2c = I2cMock::new(&expectations);
        let mut dev = Adxl345::new(i2c.clone());

        assert_eq!(dev.device_id().unwrap(), dev.expected_id());
        i2c.done();
    }

    #[test]
    fn configure_writes_and_verifies_power_ctl() {
        let expectations = [
            Transaction::write(ADDR, vec![REG_DATA_FORMAT, DATA_FORMAT_2G]),
            Transaction::write(ADDR, vec![REG_BW_RATE, BW_RATE_100HZ]),
            Transaction::write(ADDR, vec![REG_POWER_CTL, POWER_CTL_MEASURE]),
            Transaction::write_read(ADDR, vec![REG_POWER_CTL], vec![POWER_CTL_MEASURE]),
        ];
        let mut i2c = I2cMock::new(&expectations);
        let mut dev = Adxl345::new(i2c.clone());

        dev.configure().unwrap();
        i2c.done();
    }

    #[test]
    fn configure_fails_when_setup_does_not_stick() {
        let expectations = [
            Transaction::write(ADDR, vec![REG_DATA_FORMAT, DATA_FORMAT_2G]),
            Transaction::write(ADDR, vec![REG_BW_RATE, BW_RATE_100HZ]),
            Transaction::write(ADDR, vec![REG_POWER_CTL, POWER_CTL_MEASURE]),
            Transaction::write_read(ADDR, vec![REG_POWER_CTL], vec![0x00]),
        ];
        let mut i2c = I2cMock::new(&expectations);
        let mut dev = Adxl345::new(i2c.clone());

        assert!(dev.configure().is_err());
        i2c.done();
    }

    #[test]
    fn read_skips_when_not_ready() {
        let expectations = [Transaction::write_read(ADDR, vec![REG_INT_SOURCE], vec![0x02])];
        let mut i2c = I2cMock::new(&expectations);
        let mut dev = Adxl345::new(i2c.clone());

        assert_eq!(dev.read().unwrap(), None);
        i2c.done();
    }

    #[test]
    fn read_decodes_little_endian_axes() {
        let expectations = [
            Transaction::write_read(ADDR, vec![REG_INT_SOURCE], vec![0x83]),
            Transaction::write_read(
                ADDR,
                vec![REG_DATAX0],
                // x = 4, y = -2, z = 256
                vec![0x04, 0x00, 0xFE, 0xFF, 0x00, 0x01],
            ),
        ];
        let mut i2c = I2cMock::new(&expectations);
        let mut dev = Adxl345::new(i2c.clone());

        assert_eq!(dev.read().unwrap(), Some(AccelSample::new(4, -2, 256)));
        i2c.done();
    }

    #[test]
    fn bus_errors_propagate() {
        let expectations =
            [Transaction::write_read(ADDR, vec![REG_DEVID], vec![0x00]).with_error(ErrorKind::Other)];
        let mut i2c = I2cMock::new(&expectations);
        let mut dev = Adxl345::new(i2c.clone());

        assert!(dev.device_id().is_err());
        i2c.done();
    }
}
