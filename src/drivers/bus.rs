// Cube Timer — Shared I2C Bus
//
// The accelerometer and the OLED sit on the same bus. Each driver gets a
// `SharedI2c` handle; every transaction holds the mutex for its duration.

use std::sync::{Mutex, MutexGuard, PoisonError};

use embedded_hal::i2c::{ErrorType, I2c, Operation, SevenBitAddress};

pub struct SharedI2c<'a, I2C> {
    bus: &'a Mutex<I2C>,
}

impl<'a, I2C> SharedI2c<'a, I2C> {
    pub fn new(bus: &'a Mutex<I2C>) -> Self {
        Self { bus }
    }

    fn lock(&self) -> MutexGuard<'a, I2C> {
        // A panic in another holder leaves the bus itself usable.
        self.bus.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl<I2C: ErrorType> ErrorType for SharedI2c<'_, I2C> {
    type Error = I2C::Error;
}

// Every method forwards to the same method of the inner bus, so drivers keep
// the exact transfer shape they asked for.
impl<I2C: I2c> I2c for SharedI2c<'_, I2C> {
    fn read(&mut self, address: SevenBitAddress, read: &mut [u8]) -> Result<(), Self::Error> {
        self.lock().read(address, read)
    }

    fn write(&mut self, address: SevenBitAddress, write: &[u8]) -> Result<(), Self::Error> {
        self.lock().write(address, write)
    }

    fn write_read(
        &mut self,
        address: SevenBitAddress,
        write: &[u8],
        read: &mut [u8],
    ) -> Result<(), Self::Error> {
        self.lock().write_read(address, write, read)
    }

    fn transaction(
        &mut self,
        address: SevenBitAddress,
        operations: &mut [Operation<'_>],
    ) -> Result<(), Self::Error> {
        self.lock().transaction(address, operations)
    }
}
