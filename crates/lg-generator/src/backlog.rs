//! Per-generator FIFO of descriptors waiting for admission.

use std::collections::VecDeque;

use lg_core::SimTime;
use lg_demand::VehicleDescriptor;

/// One queued descriptor with the position drawn for it on arrival.
#[derive(Clone, Debug)]
pub struct QueuedGtu {
    pub descriptor:    VehicleDescriptor,
    /// Index into the generator's `NetworkPosition`.
    pub position:      usize,
    pub desired_speed: f64,
    /// Nominal arrival time.
    pub arrival_time:  SimTime,
}

/// FIFO queue plus the count of queued descriptors per position.
///
/// Entries leave only from the front, in the order they were pushed.
#[derive(Clone, Debug)]
pub struct Backlog {
    queue:  VecDeque<QueuedGtu>,
    counts: Vec<usize>,
}

impl Backlog {
    pub fn new(position_count: usize) -> Self {
        Self { queue: VecDeque::new(), counts: vec![0; position_count] }
    }

    pub fn push(&mut self, entry: QueuedGtu) {
        self.counts[entry.position] += 1;
        self.queue.push_back(entry);
    }

    pub fn front(&self) -> Option<&QueuedGtu> {
        self.queue.front()
    }

    pub fn pop_front(&mut self) -> Option<QueuedGtu> {
        let entry = self.queue.pop_front()?;
        self.counts[entry.position] -= 1;
        Some(entry)
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    /// Queued descriptors per position index.
    pub fn counts(&self) -> &[usize] {
        &self.counts
    }

    pub fn iter(&self) -> impl Iterator<Item = &QueuedGtu> {
        self.queue.iter()
    }
}
