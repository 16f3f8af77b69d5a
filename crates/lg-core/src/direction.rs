//! Longitudinal travel direction relative to a lane's design line.
//!
//! Offsets along a lane are always measured from the lane's start along its
//! design line.  A GTU travelling `Minus` moves from the lane end toward the
//! start, so "ahead" means a smaller offset.

/// The direction in which a GTU travels along a lane.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Direction {
    /// Along the design line (start → end).
    #[default]
    Plus,
    /// Against the design line (end → start).
    Minus,
}

impl Direction {
    #[inline]
    pub fn is_plus(self) -> bool {
        matches!(self, Direction::Plus)
    }

    #[inline]
    pub fn flip(self) -> Direction {
        match self {
            Direction::Plus  => Direction::Minus,
            Direction::Minus => Direction::Plus,
        }
    }

    /// Convert a design-line offset into distance travelled from the lane
    /// entry, for a lane of length `lane_length`.
    #[inline]
    pub fn travelled(self, offset: f64, lane_length: f64) -> f64 {
        match self {
            Direction::Plus  => offset,
            Direction::Minus => lane_length - offset,
        }
    }

    /// Inverse of [`travelled`](Self::travelled).
    #[inline]
    pub fn offset_at(self, travelled: f64, lane_length: f64) -> f64 {
        match self {
            Direction::Plus  => travelled,
            Direction::Minus => lane_length - travelled,
        }
    }

    /// Human-readable label, useful for CSV column values.
    pub fn as_str(self) -> &'static str {
        match self {
            Direction::Plus  => "plus",
            Direction::Minus => "minus",
        }
    }
}

impl std::fmt::Display for Direction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
