//! CSV demand-profile loader.
//!
//! # CSV format
//!
//! One row per breakpoint, time in seconds, rate in vehicles per hour:
//!
//! ```csv
//! time,rate
//! 0,1200
//! 1800,2400
//! 3600,0
//! ```
//!
//! Rows must already be in time order.  Rates are converted to vehicles per
//! second on load.

use std::io::Read;
use std::path::Path;

use serde::Deserialize;

use lg_core::SimTime;

use crate::{DemandError, DemandProfile, DemandResult, Interpolation};

#[derive(Deserialize)]
struct ProfileRecord {
    time: f64,
    rate: f64,
}

/// Load a [`DemandProfile`] from a CSV file.
pub fn load_profile_csv(path: &Path, interpolation: Interpolation) -> DemandResult<DemandProfile> {
    let file = std::fs::File::open(path)?;
    load_profile_reader(file, interpolation)
}

/// Like [`load_profile_csv`] but accepts any `Read` source.
pub fn load_profile_reader<R: Read>(reader: R, interpolation: Interpolation) -> DemandResult<DemandProfile> {
    let mut csv_reader = csv::Reader::from_reader(reader);
    let mut times = Vec::new();
    let mut rates = Vec::new();
    for result in csv_reader.deserialize::<ProfileRecord>() {
        let row = result.map_err(|e| DemandError::Parse(e.to_string()))?;
        times.push(SimTime::from_secs(row.time)?);
        rates.push(row.rate / 3_600.0);
    }
    DemandProfile::new(times, rates, interpolation)
}
