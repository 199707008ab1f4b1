// Cube Timer — SSD1306 OLED Driver
//
// Register-level driver for a 128x64 SSD1306 panel over I2C. Drawing goes
// into a 1 KiB frame buffer (one bit per pixel, 8-pixel vertical pages);
// `flush` pushes the whole buffer to the panel.

use core::convert::Infallible;

use anyhow::anyhow;
use embedded_graphics::{pixelcolor::BinaryColor, prelude::*};
use embedded_hal::i2c::{Error as _, I2c};

use crate::config::{DISPLAY_BUFFER_SIZE, I2C_ADDR_OLED, SCREEN_HEIGHT, SCREEN_WIDTH};
use crate::drivers::display::{draw_status, StatusScreen};
use crate::events::{Face, TimeEntry};

// Control bytes prefixed to every I2C write
const CTRL_COMMAND: u8 = 0x00;
const CTRL_DATA: u8 = 0x40;

const WIDTH: usize = SCREEN_WIDTH as usize;
const PAGES: usize = SCREEN_HEIGHT as usize / 8;

/// Power-up sequence for a 128x64 panel with the internal charge pump.
const INIT_SEQUENCE: &[u8] = &[
    0xAE, // display off
    0xD5, 0x80, // clock divide ratio / oscillator
    0xA8, 0x3F, // multiplex ratio = 64
    0xD3, 0x00, // display offset
    0x40, // start line 0
    0x8D, 0x14, // charge pump on
    0x20, 0x00, // horizontal addressing
    0xA1, // segment remap
    0xC8, // COM scan descending
    0xDA, 0x12, // COM pins
    0x81, 0xCF, // contrast
    0xD9, 0xF1, // pre-charge period
    0xDB, 0x40, // VCOMH deselect level
    0xA4, // follow RAM
    0xA6, // normal (not inverted)
    0xAF, // display on
];

/// Column 0..=127, page 0..=7: the window `flush` writes into.
const FULL_WINDOW: &[u8] = &[0x21, 0x00, (WIDTH - 1) as u8, 0x22, 0x00, (PAGES - 1) as u8];

pub struct Ssd1306<I2C> {
    i2c: I2C,
    buffer: [u8; DISPLAY_BUFFER_SIZE],
}

impl<I2C: I2c> Ssd1306<I2C> {
    pub fn new(i2c: I2C) -> Self {
        Self {
            i2c,
            buffer: [0; DISPLAY_BUFFER_SIZE],
        }
    }

    pub fn command(&mut self, bytes: &[u8]) -> anyhow::Result<()> {
        let mut frame = Vec::with_capacity(bytes.len() + 1);
        frame.push(CTRL_COMMAND);
        frame.extend_from_slice(bytes);
        self.i2c
            .write(I2C_ADDR_OLED, &frame)
            .map_err(|e| anyhow!("SSD1306 command {:02X?}: {:?}", bytes, e.kind()))
    }

    pub fn init(&mut self) -> anyhow::Result<()> {
        self.command(INIT_SEQUENCE)?;
        log::info!("SSD1306 initialised ({}x{})", SCREEN_WIDTH, SCREEN_HEIGHT);
        Ok(())
    }

    /// Push the frame buffer to the panel, one page per write.
    pub fn flush(&mut self) -> anyhow::Result<()> {
        self.command(FULL_WINDOW)?;

        let mut frame = [0u8; WIDTH + 1];
        frame[0] = CTRL_DATA;
        for (page, data) in self.buffer.chunks_exact(WIDTH).enumerate() {
            frame[1..].copy_from_slice(data);
            self.i2c
                .write(I2C_ADDR_OLED, &frame)
                .map_err(|e| anyhow!("SSD1306 page {}: {:?}", page, e.kind()))?;
        }
        Ok(())
    }

    pub fn buffer(&self) -> &[u8; DISPLAY_BUFFER_SIZE] {
        &self.buffer
    }
}

impl<I2C> OriginDimensions for Ssd1306<I2C> {
    fn size(&self) -> Size {
        Size::new(SCREEN_WIDTH, SCREEN_HEIGHT)
    }
}

impl<I2C> DrawTarget for Ssd1306<I2C> {
    type Color = BinaryColor;
    type Error = Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(point, color) in pixels {
            let (Ok(x), Ok(y)) = (usize::try_from(point.x), usize::try_from(point.y)) else {
                continue;
            };
            if x >= WIDTH || y >= PAGES * 8 {
                continue;
            }

            let idx = x + (y / 8) * WIDTH;
            let bit = 1u8 << (y % 8);
            match color {
                BinaryColor::On => self.buffer[idx] |= bit,
                BinaryColor::Off => self.buffer[idx] &= !bit,
            }
        }
        Ok(())
    }
}

impl<I2C: I2c> StatusScreen for Ssd1306<I2C> {
    fn show(&mut self, current: Face, last: Option<&TimeEntry>) -> anyhow::Result<()> {
        match draw_status(self, current, last) {
            Ok(()) => {}
            Err(never) => match never {},
        }
        self.flush()
    }
}
