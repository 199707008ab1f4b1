// Cube Timer — Activity Log
//
// Append-only, in-memory history of committed entries in chronological order.
// Persistence is left to whoever owns a writer: `write_to` emits the flat
// record stream and `read_from` rebuilds a log from one.

use std::io::{Read, Write};
use std::time::Duration;

use anyhow::{bail, Context};

use crate::events::{Face, TimeEntry};
use crate::record::{self, Record, RECORD_LEN};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ActivityLog {
    entries: Vec<TimeEntry>,
}

impl ActivityLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `entry` and return the record it is stored as.
    pub fn append(&mut self, entry: TimeEntry) -> Record {
        self.entries.push(entry);
        record::encode(&entry)
    }

    pub fn entries(&self) -> &[TimeEntry] {
        &self.entries
    }

    pub fn last(&self) -> Option<&TimeEntry> {
        self.entries.last()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Total committed time spent on `face`.
    pub fn total_for(&self, face: Face) -> Duration {
        self.entries
            .iter()
            .filter(|e| e.face == face)
            .map(|e| e.duration.as_duration())
            .sum()
    }

    /// Committed time for every face, in face order.
    pub fn totals(&self) -> [(Face, Duration); 6] {
        Face::ALL.map(|face| (face, self.total_for(face)))
    }

    /// The whole log as concatenated records.
    pub fn to_bytes(&self) -> Vec<u8> {
        self.entries.iter().flat_map(record::encode).collect()
    }

    pub fn from_bytes(bytes: &[u8]) -> anyhow::Result<Self> {
        if bytes.len() % RECORD_LEN != 0 {
            bail!(
                "log length {} is not a multiple of {} bytes",
                bytes.len(),
                RECORD_LEN
            );
        }

        let mut entries = Vec::with_capacity(bytes.len() / RECORD_LEN);
        for (i, chunk) in bytes.chunks_exact(RECORD_LEN).enumerate() {
            let mut rec: Record = [0; RECORD_LEN];
            rec.copy_from_slice(chunk);
            entries.push(record::decode(&rec).with_context(|| format!("record {}", i))?);
        }
        Ok(Self { entries })
    }

    pub fn write_to<W: Write>(&self, mut writer: W) -> anyhow::Result<()> {
        writer
            .write_all(&self.to_bytes())
            .context("failed to write activity log")?;
        writer.flush()?;
        Ok(())
    }

    pub fn read_from<R: Read>(mut reader: R) -> anyhow::Result<Self> {
        let mut bytes = Vec::new();
        reader
            .read_to_end(&mut bytes)
            .context("failed to read activity log")?;
        Self::from_bytes(&bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::Timestamp;

    fn entry(face: Face, secs: u64) -> TimeEntry {
        TimeEntry::new(face, Timestamp::from_duration(Duration::from_secs(secs)))
    }

    #[test]
    fn append_keeps_insertion_order() {
        let mut log = ActivityLog::new();
        assert!(log.is_empty());

        let rec = log.append(entry(Face::One, 20));
        assert_eq!(rec, [1, 0, 0, 20]);
        log.append(entry(Face::Three, 16));
        log.append(entry(Face::One, 75));

        let faces: Vec<Face> = log.entries().iter().map(|e| e.face).collect();
        assert_eq!(faces, [Face::One, Face::Three, Face::One]);
        assert_eq!(log.last(), Some(&entry(Face::One, 75)));
        assert_eq!(log.len(), 3);
    }

    #[test]
    fn totals_per_face() {
        let mut log = ActivityLog::new();
        log.append(entry(Face::One, 20));
        log.append(entry(Face::Three, 16));
        log.append(entry(Face::One, 3600));

        assert_eq!(log.total_for(Face::One), Duration::from_secs(3620));
        assert_eq!(log.total_for(Face::Three), Duration::from_secs(16));
        assert_eq!(log.total_for(Face::Five), Duration::ZERO);

        let totals = log.totals();
        assert_eq!(totals[0], (Face::One, Duration::from_secs(3620)));
        assert_eq!(totals[2], (Face::Three, Duration::from_secs(16)));
        assert_eq!(
            totals.iter().map(|(_, d)| *d).sum::<Duration>(),
            Duration::from_secs(3636)
        );
    }

    #[test]
    fn bytes_are_flat_records() {
        let mut log = ActivityLog::new();
        log.append(entry(Face::Two, 61));
        log.append(entry(Face::Six, 3661));
        assert_eq!(log.to_bytes(), vec![2, 0, 1, 1, 6, 1, 1, 1]);
    }

    #[test]
    fn write_then_read_restores_log() {
        let mut log = ActivityLog::new();
        log.append(entry(Face::Four, 42));
        log.append(entry(Face::Five, 7200));

        let mut sink = Vec::new();
        log.write_to(&mut sink).unwrap();
        let restored = ActivityLog::read_from(sink.as_slice()).unwrap();
        assert_eq!(restored, log);
    }

    #[test]
    fn partial_or_corrupt_stream_is_rejected() {
        assert!(ActivityLog::from_bytes(&[1, 0, 0]).is_err());
        assert!(ActivityLog::from_bytes(&[1, 0, 0, 20, 9, 0, 0, 20]).is_err());
        assert!(ActivityLog::from_bytes(&[]).unwrap().is_empty());
    }
}
