//! `EventQueue`: time-ordered, cancellable event store.
//!
//! `BTreeMap` gives O(log n) push, pop and cancel.  A handle carries the full
//! key, so cancelling needs no side index.

use std::collections::BTreeMap;

use lg_core::SimTime;

/// Identifies one scheduled event for cancellation.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EventHandle {
    pub time: SimTime,
    pub seq:  u64,
}

/// A priority queue mapping `(time, seq)` → event.
pub struct EventQueue<E> {
    inner:    BTreeMap<(SimTime, u64), E>,
    next_seq: u64,
}

impl<E> Default for EventQueue<E> {
    fn default() -> Self {
        Self { inner: BTreeMap::new(), next_seq: 0 }
    }
}

impl<E> EventQueue<E> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule `event` at `time`.
    pub fn push(&mut self, time: SimTime, event: E) -> EventHandle {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.inner.insert((time, seq), event);
        EventHandle { time, seq }
    }

    /// Remove a scheduled event.  Returns it if it had not fired yet.
    pub fn cancel(&mut self, handle: EventHandle) -> Option<E> {
        self.inner.remove(&(handle.time, handle.seq))
    }

    pub fn contains(&self, handle: EventHandle) -> bool {
        self.inner.contains_key(&(handle.time, handle.seq))
    }

    /// Remove and return the earliest event.
    pub fn pop_next(&mut self) -> Option<(SimTime, E)> {
        self.inner.pop_first().map(|((t, _), e)| (t, e))
    }

    /// Time of the earliest event, or `None` if empty.
    pub fn next_time(&self) -> Option<SimTime> {
        self.inner.keys().next().map(|&(t, _)| t)
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    /// Pending events in firing order.
    pub fn iter(&self) -> impl Iterator<Item = (EventHandle, &E)> + '_ {
        self.inner
            .iter()
            .map(|(&(time, seq), e)| (EventHandle { time, seq }, e))
    }
}
