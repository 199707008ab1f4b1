// Cube Timer — Firmware Entry Point
//
// Boot sequence:
//   1. Initialise logging and take the peripherals.
//   2. Bring up the shared I2C bus and attach the ADXL345 and the OLED.
//   3. Spawn the tracker task (identity gate, configuration, control loop).
//
// A missing or broken OLED is not fatal: the tracker runs headless.
//
// The tracker runs until the board is reset or power-cycled.

#[cfg(target_os = "espidf")]
fn main() -> anyhow::Result<()> {
    use std::sync::atomic::AtomicBool;
    use std::sync::Mutex;
    use std::thread;
    use std::time::Duration;

    use esp_idf_hal::i2c::{I2cConfig, I2cDriver};
    use esp_idf_hal::prelude::*;

    use cubetimer::clock::SystemClock;
    use cubetimer::config::*;
    use cubetimer::drivers::adxl345::Adxl345;
    use cubetimer::drivers::bus::SharedI2c;
    use cubetimer::drivers::ssd1306::Ssd1306;
    use cubetimer::tasks::control::tracker_task;

    // Link esp-idf-sys runtime patches and initialise logging.
    esp_idf_svc::sys::link_patches();
    esp_idf_svc::log::EspLogger::initialize_default();
    log::info!("Cube timer firmware starting…");

    // ---- Peripherals ------------------------------------------------------
    let peripherals = Peripherals::take()?;

    // ---- I2C bus (shared between ADXL345 and OLED) ------------------------
    let i2c_config = I2cConfig::new().baudrate(I2C_BAUDRATE_KHZ.kHz().into());
    let i2c = I2cDriver::new(
        peripherals.i2c0,
        peripherals.pins.gpio6, // SDA
        peripherals.pins.gpio7, // SCL
        &i2c_config,
    )?;
    // The bus lives for the entire programme duration (firmware never exits).
    let i2c_bus: &'static Mutex<I2cDriver<'static>> = Box::leak(Box::new(Mutex::new(i2c)));

    let sensor = Adxl345::new(SharedI2c::new(i2c_bus));

    let mut oled = Ssd1306::new(SharedI2c::new(i2c_bus));
    let screen = match oled.init() {
        Ok(()) => Some(oled),
        Err(e) => {
            log::warn!("OLED init failed, running headless: {:#}", e);
            None
        }
    };

    // Nothing ever raises this on the device; only a reset ends the loop.
    static STOP: AtomicBool = AtomicBool::new(false);

    thread::Builder::new()
        .name("tracker".into())
        .stack_size(STACK_TRACKER)
        .spawn(move || {
            let log = tracker_task(sensor, screen, SystemClock::new(), TrackerConfig::default(), &STOP);
            log::warn!("Tracker task exited with {} entries", log.len());
        })?;

    // Main thread has nothing left to do — park it forever.
    loop {
        thread::sleep(Duration::from_secs(60));
    }
}

#[cfg(not(target_os = "espidf"))]
fn main() -> anyhow::Result<()> {
    anyhow::bail!("the cube timer firmware only runs on ESP-IDF targets")
}
