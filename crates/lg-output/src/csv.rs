//! CSV output backend.
//!
//! Creates two files in the configured output directory:
//! - `placements.csv`
//! - `queue_events.csv`

use std::fs::File;
use std::path::Path;

use csv::Writer;

use crate::writer::RecordWriter;
use crate::{OutputError, OutputResult, PlacementRow, QueueRow};

pub const PLACEMENT_HEADER: [&str; 12] = [
    "gtu", "generator", "gtu_type", "time", "arrival_time", "wait", "link", "lane", "lane_number", "offset",
    "speed", "platoons",
];

pub const QUEUE_HEADER: [&str; 4] = ["generator", "time", "event", "queue_len"];

/// Writes generation records to two CSV files.
pub struct CsvWriter {
    placements: Writer<File>,
    queue:      Writer<File>,
    finished:   bool,
}

impl CsvWriter {
    /// Create the two CSV files in `dir` and write the header rows.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        let mut placements = Writer::from_path(dir.join("placements.csv"))?;
        placements.write_record(PLACEMENT_HEADER)?;

        let mut queue = Writer::from_path(dir.join("queue_events.csv"))?;
        queue.write_record(QUEUE_HEADER)?;

        Ok(Self {
            placements,
            queue,
            finished: false,
        })
    }

    fn ensure_open(&self) -> OutputResult<()> {
        if self.finished { Err(OutputError::Finished) } else { Ok(()) }
    }
}

impl RecordWriter for CsvWriter {
    fn write_placements(&mut self, rows: &[PlacementRow]) -> OutputResult<()> {
        self.ensure_open()?;
        for row in rows {
            self.placements.write_record(&[
                row.gtu.to_string(),
                row.generator.to_string(),
                row.gtu_type.to_string(),
                row.time.to_string(),
                row.arrival_time.to_string(),
                row.wait().to_string(),
                row.link.to_string(),
                row.lane.to_string(),
                row.lane_number.to_string(),
                row.offset.to_string(),
                row.speed.to_string(),
                row.platoons.map(|p| p.to_string()).unwrap_or_default(),
            ])?;
        }
        Ok(())
    }

    fn write_queue_events(&mut self, rows: &[QueueRow]) -> OutputResult<()> {
        self.ensure_open()?;
        for row in rows {
            self.queue.write_record(&[
                row.generator.to_string(),
                row.time.to_string(),
                row.event.as_str().to_string(),
                row.queue_len.to_string(),
            ])?;
        }
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.placements.flush()?;
        self.queue.flush()?;
        Ok(())
    }
}
