//! The `DrivingBehavior` trait.

use lg_core::{GtuTypeId, SimDuration};

/// Stateless peek into the behaviour that will drive a GTU once placed.
///
/// Shared between many descriptors through `Arc<dyn DrivingBehavior>`.
pub trait DrivingBehavior: Send + Sync + 'static {
    /// Speed (m/s) the GTU would like to drive under `speed_limit` given its
    /// own `max_speed`.
    fn desired_speed(&self, gtu_type: GtuTypeId, speed_limit: f64, max_speed: f64) -> f64;

    /// Time headway the GTU would keep at `speed`.
    ///
    /// `None` means the behaviour has no opinion; callers fall back to a
    /// default.
    fn desired_headway(&self, _gtu_type: GtuTypeId, _speed: f64) -> Option<SimDuration> {
        None
    }

    /// Short label for logs.
    fn name(&self) -> &str {
        "behavior"
    }
}
