//! In-memory backend, for tests and for callers that post-process rows
//! themselves.

use crate::writer::RecordWriter;
use crate::{OutputResult, PlacementRow, QueueRow};

#[derive(Debug, Default)]
pub struct MemoryWriter {
    pub placements: Vec<PlacementRow>,
    pub queue:      Vec<QueueRow>,
    pub finished:   bool,
}

impl MemoryWriter {
    pub fn new() -> Self {
        Self::default()
    }
}

impl RecordWriter for MemoryWriter {
    fn write_placements(&mut self, rows: &[PlacementRow]) -> OutputResult<()> {
        self.placements.extend_from_slice(rows);
        Ok(())
    }

    fn write_queue_events(&mut self, rows: &[QueueRow]) -> OutputResult<()> {
        self.queue.extend_from_slice(rows);
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        self.finished = true;
        Ok(())
    }
}
