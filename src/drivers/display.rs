// Cube Timer — Status Screen
//
// Draws the tracker status on any monochrome embedded-graphics target
// (see `ssd1306`). Three text rows:
//
//   Face 3
//   Prev F1
//   00:00:20

use embedded_graphics::{
    mono_font::{ascii::FONT_6X10, MonoTextStyle, MonoTextStyleBuilder},
    pixelcolor::BinaryColor,
    prelude::*,
    text::{Baseline, Text},
};

use crate::events::{Face, TimeEntry};

const LINE_HEIGHT: i32 = 12;

/// Where the control loop shows the current face and the last entry.
pub trait StatusScreen {
    fn show(&mut self, current: Face, last: Option<&TimeEntry>) -> anyhow::Result<()>;
}

/// Headless build: nothing to show.
impl StatusScreen for () {
    fn show(&mut self, _current: Face, _last: Option<&TimeEntry>) -> anyhow::Result<()> {
        Ok(())
    }
}

/// A panel that may have failed to come up.
impl<V: StatusScreen> StatusScreen for Option<V> {
    fn show(&mut self, current: Face, last: Option<&TimeEntry>) -> anyhow::Result<()> {
        match self {
            Some(screen) => screen.show(current, last),
            None => Ok(()),
        }
    }
}

fn text_style() -> MonoTextStyle<'static, BinaryColor> {
    MonoTextStyleBuilder::new()
        .font(&FONT_6X10)
        .text_color(BinaryColor::On)
        .build()
}

/// Clear `target` and draw the current face plus the last committed entry.
pub fn draw_status<D>(target: &mut D, current: Face, last: Option<&TimeEntry>) -> Result<(), D::Error>
where
    D: DrawTarget<Color = BinaryColor>,
{
    let style = text_style();
    target.clear(BinaryColor::Off)?;

    let face = format!("Face {}", current.id());
    Text::with_baseline(&face, Point::zero(), style, Baseline::Top).draw(target)?;

    match last {
        Some(entry) => {
            let prev = format!("Prev {}", entry.face);
            Text::with_baseline(&prev, Point::new(0, LINE_HEIGHT), style, Baseline::Top).draw(target)?;

            let duration = entry.duration.to_string();
            Text::with_baseline(&duration, Point::new(0, 2 * LINE_HEIGHT), style, Baseline::Top)
                .draw(target)?;
        }
        None => {
            Text::with_baseline("No log", Point::new(0, LINE_HEIGHT), style, Baseline::Top).draw(target)?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::Timestamp;
    use embedded_graphics::mock_display::MockDisplay;
    use embedded_graphics::primitives::Rectangle;

    fn display() -> MockDisplay<BinaryColor> {
        let mut display = MockDisplay::new();
        display.set_allow_overdraw(true);
        display
    }

    fn lit_rows(display: &MockDisplay<BinaryColor>) -> Rectangle {
        let mut lit = MockDisplay::<BinaryColor>::new();
        for p in display.bounding_box().points() {
            if display.get_pixel(p) == Some(BinaryColor::On) {
                lit.set_pixel(p, Some(BinaryColor::On));
            }
        }
        lit.affected_area()
    }

    #[test]
    fn draws_face_without_history() {
        let mut display = display();
        draw_status(&mut display, Face::Three, None).unwrap();

        let area = lit_rows(&display);
        assert!(!area.is_zero_sized());
        // Two rows of text only.
        assert!(area.bottom_right().unwrap().y < 2 * LINE_HEIGHT);
    }

    #[test]
    fn draws_last_entry_on_third_row() {
        let mut display = display();
        let entry = TimeEntry::new(
            Face::One,
            Timestamp {
                hours: 0,
                minutes: 0,
                seconds: 20,
            },
        );
        draw_status(&mut display, Face::Three, Some(&entry)).unwrap();

        let area = lit_rows(&display);
        assert!(area.bottom_right().unwrap().y >= 2 * LINE_HEIGHT);
    }
}
