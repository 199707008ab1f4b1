// Cube Timer — Startup Gate
//
// Nothing reaches the control loop until the sensor on the bus identifies as
// the expected part and accepts its configuration:
//
//   - identity mismatch or bus error -> wait and retry, forever
//   - configuration failure          -> halt, forever
//
// Both waits end only on power-cycle, or when `stop` is raised (tests).

use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;
use std::time::Duration;

use crate::drivers::Accelerometer;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Startup {
    /// Sensor identified and configured.
    Ready,
    /// `stop` was raised while waiting at one of the gates.
    Stopped,
}

/// Run both gates in order.
pub fn bring_up<A: Accelerometer>(sensor: &mut A, retry: Duration, stop: &AtomicBool) -> Startup {
    if wait_for_identity(sensor, retry, stop) == Startup::Stopped {
        return Startup::Stopped;
    }

    match sensor.configure() {
        Ok(()) => Startup::Ready,
        Err(e) => halt(&format!("sensor configuration failed: {:#}", e), retry, stop),
    }
}

/// Block until the identity register matches.
pub fn wait_for_identity<A: Accelerometer>(sensor: &mut A, retry: Duration, stop: &AtomicBool) -> Startup {
    let expected = sensor.expected_id();
    loop {
        if stop.load(Ordering::SeqCst) {
            return Startup::Stopped;
        }

        match sensor.device_id() {
            Ok(id) if id == expected => {
                log::info!("Sensor identified (0x{:02X})", id);
                return Startup::Ready;
            }
            Ok(id) => log::warn!(
                "Unexpected sensor id 0x{:02X} (want 0x{:02X}) — retrying in {} ms",
                id,
                expected,
                retry.as_millis()
            ),
            Err(e) => log::warn!("Sensor id read failed: {:#} — retrying in {} ms", e, retry.as_millis()),
        }

        thread::sleep(retry);
    }
}

/// Park the calling thread, repeating `reason` every `retry`.
fn halt(reason: &str, retry: Duration, stop: &AtomicBool) -> Startup {
    loop {
        log::error!("Halted: {}", reason);
        if stop.load(Ordering::SeqCst) {
            return Startup::Stopped;
        }
        thread::sleep(retry);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::drivers::SampleSource;
    use crate::events::AccelSample;
    use std::sync::Arc;

    struct FakeSensor {
        ids: Vec<anyhow::Result<u8>>,
        config_ok: bool,
        configured: bool,
    }

    impl FakeSensor {
        fn new(ids: Vec<anyhow::Result<u8>>, config_ok: bool) -> Self {
            Self {
                ids,
                config_ok,
                configured: false,
            }
        }
    }

    impl SampleSource for FakeSensor {
        fn read(&mut self) -> anyhow::Result<Option<AccelSample>> {
            Ok(None)
        }
    }

    impl Accelerometer for FakeSensor {
        fn expected_id(&self) -> u8 {
            0xE5
        }

        fn device_id(&mut self) -> anyhow::Result<u8> {
            if self.ids.len() > 1 {
                self.ids.remove(0)
            } else {
                match &self.ids[0] {
                    Ok(id) => Ok(*id),
                    Err(e) => Err(anyhow::anyhow!("{}", e)),
                }
            }
        }

        fn configure(&mut self) -> anyhow::Result<()> {
            self.configured = true;
            if self.config_ok {
                Ok(())
            } else {
                anyhow::bail!("rejected")
            }
        }
    }

    const RETRY: Duration = Duration::from_millis(1);

    #[test]
    fn ready_after_retries() {
        let stop = AtomicBool::new(false);
        let mut sensor = FakeSensor::new(
            vec![Err(anyhow::anyhow!("nack")), Ok(0x00), Ok(0xE5)],
            true,
        );
        assert_eq!(bring_up(&mut sensor, RETRY, &stop), Startup::Ready);
        assert!(sensor.configured);
    }

    #[test]
    fn mismatch_waits_until_stopped() {
        let stop = Arc::new(AtomicBool::new(false));
        let handle = {
            let stop = Arc::clone(&stop);
            thread::spawn(move || {
                let mut sensor = FakeSensor::new(vec![Ok(0x42)], true);
                let outcome = bring_up(&mut sensor, RETRY, &stop);
                (outcome, sensor.configured)
            })
        };

        thread::sleep(Duration::from_millis(50));
        assert!(!handle.is_finished());
        stop.store(true, Ordering::SeqCst);

        let (outcome, configured) = handle.join().unwrap();
        assert_eq!(outcome, Startup::Stopped);
        assert!(!configured);
    }

    #[test]
    fn configuration_failure_halts() {
        let stop = Arc::new(AtomicBool::new(false));
        let handle = {
            let stop = Arc::clone(&stop);
            thread::spawn(move || {
                let mut sensor = FakeSensor::new(vec![Ok(0xE5)], false);
                bring_up(&mut sensor, RETRY, &stop)
            })
        };

        thread::sleep(Duration::from_millis(50));
        assert!(!handle.is_finished());
        stop.store(true, Ordering::SeqCst);
        assert_eq!(handle.join().unwrap(), Startup::Stopped);
    }
}
