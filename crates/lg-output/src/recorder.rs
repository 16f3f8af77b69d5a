//! `GenerationRecorder<W>`: bridges `GeneratorObserver` to a `RecordWriter`.

use log::{debug, warn};

use lg_core::{GeneratorId, SimTime};
use lg_generator::{GeneratorObserver, PlacedGtu, PlacementSource};

use crate::row::{PlacementRow, QueueEvent, QueueRow};
use crate::writer::RecordWriter;
use crate::{OutputError, OutputResult};

/// A [`GeneratorObserver`] that writes every placement and queue transition
/// to any [`RecordWriter`] backend.
///
/// Errors from the writer are stored internally because observer methods
/// have no return value.  After the run returns, check for errors with
/// [`take_error`][Self::take_error].
pub struct GenerationRecorder<W: RecordWriter> {
    writer:         W,
    record_blocked: bool,
    placements:     u64,
    queue_events:   u64,
    last_error:     Option<OutputError>,
}

impl<W: RecordWriter> GenerationRecorder<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            record_blocked: true,
            placements:     0,
            queue_events:   0,
            last_error:     None,
        }
    }

    /// Skip `blocked` rows; a congested generator emits one per retry.
    pub fn without_blocked(mut self) -> Self {
        self.record_blocked = false;
        self
    }

    /// Take the stored write error (if any) after the run returns.
    pub fn take_error(&mut self) -> Option<OutputError> {
        self.last_error.take()
    }

    pub fn writer(&self) -> &W {
        &self.writer
    }

    pub fn into_writer(self) -> W {
        self.writer
    }

    /// Rows written so far: `(placements, queue events)`.
    pub fn counts(&self) -> (u64, u64) {
        (self.placements, self.queue_events)
    }

    fn store_err(&mut self, result: OutputResult<()>) {
        if let Err(e) = result {
            // Keep only the first error.
            if self.last_error.is_none() {
                warn!("generation recorder: {e}");
                self.last_error = Some(e);
            }
        }
    }

    fn queue(&mut self, generator: GeneratorId, time: SimTime, event: QueueEvent, queue_len: usize) {
        let row = QueueRow {
            generator: generator.0,
            time:      time.secs(),
            event,
            queue_len: queue_len as u64,
        };
        let result = self.writer.write_queue_events(&[row]);
        if result.is_ok() {
            self.queue_events += 1;
        }
        self.store_err(result);
    }
}

impl<W: RecordWriter> GeneratorObserver for GenerationRecorder<W> {
    fn on_arrival(&mut self, generator: GeneratorId, time: SimTime, queue_len: usize) {
        self.queue(generator, time, QueueEvent::Arrival, queue_len);
    }

    fn on_placed(&mut self, placed: &PlacedGtu<'_>) {
        let reference = placed.position.primary();
        let row = PlacementRow {
            gtu:          placed.gtu.0,
            generator:    placed.generator.0,
            gtu_type:     placed.gtu_type.0,
            time:         placed.time.secs(),
            arrival_time: placed.arrival_time.secs(),
            link:         placed.position.link.0,
            lane:         reference.lane.0,
            lane_number:  placed.position.lane_number as u32,
            offset:       reference.offset,
            speed:        placed.speed,
            platoons:     match placed.source {
                PlacementSource::Backlog => None,
                PlacementSource::Platoon(p) => Some(p.0),
            },
        };
        let result = self.writer.write_placements(&[row]);
        if result.is_ok() {
            self.placements += 1;
        }
        self.store_err(result);
    }

    fn on_blocked(&mut self, generator: GeneratorId, time: SimTime, queue_len: usize) {
        if self.record_blocked {
            self.queue(generator, time, QueueEvent::Blocked, queue_len);
        }
    }

    fn on_suppressed(&mut self, generator: GeneratorId, time: SimTime) {
        self.queue(generator, time, QueueEvent::Suppressed, 0);
    }

    fn on_disabled(&mut self, generator: GeneratorId, time: SimTime) {
        self.queue(generator, time, QueueEvent::Disabled, 0);
    }

    fn on_enabled(&mut self, generator: GeneratorId, time: SimTime) {
        self.queue(generator, time, QueueEvent::Enabled, 0);
    }

    fn on_demand_exhausted(&mut self, generator: GeneratorId, time: SimTime) {
        self.queue(generator, time, QueueEvent::Exhausted, 0);
    }

    fn on_run_end(&mut self, time: SimTime) {
        debug!(
            "generation recorder: {} placements, {} queue events by {time}",
            self.placements, self.queue_events
        );
        let result = self.writer.finish();
        self.store_err(result);
    }
}
