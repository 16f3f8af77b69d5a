//! The `RecordWriter` trait implemented by all backend writers.

use crate::{OutputResult, PlacementRow, QueueRow};

/// Trait implemented by the CSV and in-memory writers.
///
/// Errors are stored by [`GenerationRecorder`](crate::GenerationRecorder)
/// and retrieved with its `take_error`.
pub trait RecordWriter {
    fn write_placements(&mut self, rows: &[PlacementRow]) -> OutputResult<()>;

    fn write_queue_events(&mut self, rows: &[QueueRow]) -> OutputResult<()>;

    /// Flush all underlying handles.  Idempotent.
    fn finish(&mut self) -> OutputResult<()>;
}
