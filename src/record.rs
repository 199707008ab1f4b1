// Cube Timer — Log Record Format
//
// Every committed entry is stored as four bytes:
//
//   [0] face id (1..=6)
//   [1] hours
//   [2] minutes (0..=59)
//   [3] seconds (0..=59)
//
// A log is a flat concatenation of records with no header, length prefix or
// checksum.

use anyhow::{bail, Context};

use crate::events::{Face, TimeEntry, Timestamp};

pub const RECORD_LEN: usize = 4;

pub type Record = [u8; RECORD_LEN];

pub fn encode(entry: &TimeEntry) -> Record {
    [
        entry.face.id(),
        entry.duration.hours,
        entry.duration.minutes,
        entry.duration.seconds,
    ]
}

pub fn decode(record: &Record) -> anyhow::Result<TimeEntry> {
    let [face, hours, minutes, seconds] = *record;
    let face = Face::from_id(face).with_context(|| format!("invalid face id {}", face))?;
    if minutes > 59 || seconds > 59 {
        bail!("invalid duration {:02}:{:02}:{:02}", hours, minutes, seconds);
    }
    Ok(TimeEntry::new(
        face,
        Timestamp {
            hours,
            minutes,
            seconds,
        },
    ))
}
