//! `lg-demand`: when vehicles arrive and what they look like.
//!
//! # Crate layout
//!
//! | Module              | Contents                                                 |
//! |---------------------|----------------------------------------------------------|
//! | [`profile`]         | `DemandProfile`, `Interpolation`                         |
//! | [`arrivals`]        | `ArrivalSource` trait, `ArrivalProcess`, `FixedHeadway`  |
//! | [`distribution`]    | `DistSpec`, `ContinuousDist` (backed by `rand_distr`)    |
//! | [`characteristics`] | `VehicleDescriptor`, `VehicleTemplate`, `CharacteristicsGenerator`, `DescriptorSource` |
//! | [`loader`]          | `load_profile_csv`, `load_profile_reader`                |
//! | [`error`]           | `DemandError`, `DemandResult<T>`                         |
//!
//! # Arrival model (summary)
//!
//! Arrivals form a non-homogeneous Poisson process with rate `λ(t)` given by
//! the profile.  One unit-exponential draw `E = -ln u` is consumed against
//! the integrated rate `Λ` starting at the current time:
//!
//! ```text
//! next arrival = smallest t' with  Λ(now, t') = E
//! ```
//!
//! Zero-rate intervals contribute no mass and are skipped.  If the profile
//! ends before `E` is used up there is no next arrival.

pub mod arrivals;
pub mod characteristics;
pub mod distribution;
pub mod error;
pub mod loader;
pub mod profile;


pub use arrivals::{ArrivalProcess, ArrivalSource, FixedHeadway};
pub use characteristics::{CharacteristicsGenerator, DescriptorSource, VehicleDescriptor, VehicleTemplate};
pub use distribution::{ContinuousDist, DistSpec};
pub use error::{DemandError, DemandResult};
pub use loader::{load_profile_csv, load_profile_reader};
pub use profile::{DemandProfile, Interpolation};
