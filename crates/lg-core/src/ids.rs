//! Strongly typed, zero-cost identifier wrappers.
//!
//! All IDs are `Copy + Ord + Hash` so they can be used as map keys and sorted
//! collection elements without ceremony.  The inner integer is `pub` so the
//! flat tables in `lg-network` can index with `id.0 as usize`, but callers
//! should prefer the `.index()` helper.

use std::fmt;

/// Generate a typed ID wrapper around a primitive integer.
macro_rules! typed_id {
    ($(#[$attr:meta])* $vis:vis struct $name:ident($inner:ty);) => {
        $(#[$attr])*
        #[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        $vis struct $name(pub $inner);

        impl $name {
            /// Sentinel meaning "no valid ID".
            pub const INVALID: $name = $name(<$inner>::MAX);

            /// Cast to `usize` for direct use as a table index.
            #[inline(always)]
            pub fn index(self) -> usize {
                self.0 as usize
            }
        }

        impl Default for $name {
            /// Returns the `INVALID` sentinel so uninitialized IDs are visibly invalid.
            #[inline(always)]
            fn default() -> Self {
                Self::INVALID
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({})", stringify!($name), self.0)
            }
        }

        impl From<$name> for usize {
            #[inline(always)]
            fn from(id: $name) -> usize {
                id.0 as usize
            }
        }

        impl TryFrom<usize> for $name {
            type Error = std::num::TryFromIntError;
            fn try_from(n: usize) -> Result<$name, Self::Error> {
                <$inner>::try_from(n).map($name)
            }
        }
    };
}

typed_id! {
    /// Index of a lane in the network's lane table.
    pub struct LaneId(u32);
}

typed_id! {
    /// Index of a link (a directed edge grouping parallel lanes).
    pub struct LinkId(u32);
}

typed_id! {
    /// Index of a network node.
    pub struct NodeId(u32);
}

typed_id! {
    /// Index of a GTU type in the type registry.
    /// `u16` keeps descriptor and bias tables compact.
    pub struct GtuTypeId(u16);
}

typed_id! {
    /// Identifier of an instantiated GTU.
    pub struct GtuId(u32);
}

typed_id! {
    /// Index of a generator inside a scenario.
    pub struct GeneratorId(u16);
}

typed_id! {
    /// Index of a platoon scheduler inside a scenario.
    pub struct PlatoonsId(u16);
}

typed_id! {
    /// Application-defined demand category (e.g. 0 = car, 1 = truck platoon).
    pub struct CategoryId(u16);
}
