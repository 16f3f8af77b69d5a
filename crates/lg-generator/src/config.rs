//! Tunables shared by every generator in a scenario.

use lg_core::SimDuration;

use crate::{GeneratorError, GeneratorResult};

#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct GeneratorConfig {
    /// Delay between two admission attempts for the backlog head.
    pub retry_interval:      SimDuration,
    /// How far downstream leaders are searched, metres.
    pub leader_search_range: f64,
}

impl GeneratorConfig {
    pub fn validate(&self) -> GeneratorResult<()> {
        let retry = self.retry_interval.secs();
        if !(retry.is_finite() && retry > 0.0) {
            return Err(GeneratorError::Config(format!("retry_interval must be > 0, got {retry}")));
        }
        let range = self.leader_search_range;
        if !(range.is_finite() && range > 0.0) {
            return Err(GeneratorError::Config(format!("leader_search_range must be > 0, got {range}")));
        }
        Ok(())
    }
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            retry_interval:      SimDuration(0.1),
            leader_search_range: 250.0,
        }
    }
}
