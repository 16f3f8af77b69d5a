//! Plain data row types written by output backends.

/// One GTU put on the network.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlacementRow {
    pub gtu:          u32,
    pub generator:    u16,
    pub gtu_type:     u16,
    /// Placement time, s.
    pub time:         f64,
    /// Nominal arrival time, s.  Equal to `time` for platoon GTUs.
    pub arrival_time: f64,
    pub link:         u32,
    pub lane:         u32,
    /// 1 = right edge.
    pub lane_number:  u32,
    /// Front position on the reference lane, m.
    pub offset:       f64,
    pub speed:        f64,
    /// Platoon scheduler that placed the GTU; `None` for backlog placements.
    pub platoons:     Option<u16>,
}

impl PlacementRow {
    /// Time the GTU spent in the backlog.
    pub fn wait(&self) -> f64 {
        self.time - self.arrival_time
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueueEvent {
    Arrival,
    Blocked,
    Suppressed,
    Disabled,
    Enabled,
    Exhausted,
}

impl QueueEvent {
    pub fn as_str(&self) -> &'static str {
        match self {
            QueueEvent::Arrival    => "arrival",
            QueueEvent::Blocked    => "blocked",
            QueueEvent::Suppressed => "suppressed",
            QueueEvent::Disabled   => "disabled",
            QueueEvent::Enabled    => "enabled",
            QueueEvent::Exhausted  => "exhausted",
        }
    }
}

/// A backlog or window transition of one generator.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QueueRow {
    pub generator: u16,
    pub time:      f64,
    pub event:     QueueEvent,
    /// Backlog length after the event; 0 where it does not apply.
    pub queue_len: u64,
}
