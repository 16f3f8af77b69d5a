//! The clock interface generators schedule themselves against.
//!
//! Generators never loop.  Every step ends by scheduling the next event
//! through [`Clock`] and returning, and the owner of the clock feeds popped
//! events back into the generators.

use lg_core::{SimDuration, SimTime};

use crate::{EventError, EventHandle, EventQueue, EventResult};

/// Scheduling primitives.  Object safe, so generators take `&mut dyn Clock<E>`.
pub trait Clock<E> {
    fn now(&self) -> SimTime;

    /// Schedule `event` at absolute `time`.  `time` must be finite and not
    /// before [`now`](Self::now).
    fn schedule_at(&mut self, time: SimTime, event: E) -> EventResult<EventHandle>;

    /// Schedule `event` after `delay` from now.
    fn schedule_after(&mut self, delay: SimDuration, event: E) -> EventResult<EventHandle> {
        let at = self.now() + delay;
        self.schedule_at(at, event)
    }

    /// Cancel a pending event.  Returns `false` if it already fired or was
    /// cancelled.
    fn cancel(&mut self, handle: EventHandle) -> bool;
}

// ── EventClock ────────────────────────────────────────────────────────────────

/// A [`Clock`] backed by an [`EventQueue`].
pub struct EventClock<E> {
    now:   SimTime,
    queue: EventQueue<E>,
}

impl<E> EventClock<E> {
    pub fn new(start: SimTime) -> Self {
        Self { now: start, queue: EventQueue::new() }
    }

    /// Pop the earliest event and move the clock to its time.
    pub fn advance(&mut self) -> Option<(SimTime, E)> {
        let (t, e) = self.queue.pop_next()?;
        self.now = t;
        Some((t, e))
    }

    /// Like [`advance`](Self::advance) but only for events at or before
    /// `limit`.  The clock is not moved otherwise.
    pub fn advance_until(&mut self, limit: SimTime) -> Option<(SimTime, E)> {
        match self.queue.next_time() {
            Some(t) if t <= limit => self.advance(),
            _ => None,
        }
    }

    pub fn next_time(&self) -> Option<SimTime> {
        self.queue.next_time()
    }

    pub fn pending(&self) -> usize {
        self.queue.len()
    }

    pub fn queue(&self) -> &EventQueue<E> {
        &self.queue
    }
}

impl<E> Clock<E> for EventClock<E> {
    fn now(&self) -> SimTime {
        self.now
    }

    fn schedule_at(&mut self, time: SimTime, event: E) -> EventResult<EventHandle> {
        if !time.is_finite() {
            return Err(EventError::NotFinite(time));
        }
        if time < self.now {
            return Err(EventError::InPast { at: time, now: self.now });
        }
        Ok(self.queue.push(time, event))
    }

    fn cancel(&mut self, handle: EventHandle) -> bool {
        self.queue.cancel(handle).is_some()
    }
}
