//! CSV platoon schedule loader.
//!
//! # CSV format
//!
//! One row per platoon GTU.  Consecutive rows with the same `start,end`
//! belong to one platoon; a new pair opens the next platoon.
//!
//! ```csv
//! start,end,time,origin,destination,category,speed
//! 600,660,602.0,A,C,1,22.0
//! 600,660,601.0,A,C,1,22.0
//! 900,960,905.5,A,D,1,20.0
//! ```
//!
//! `origin` and `destination` are node names; times in seconds, speed in m/s.

use std::io::Read;
use std::path::Path;

use serde::Deserialize;

use lg_core::{CategoryId, NodeId, SimTime};

use crate::{GeneratorError, GeneratorResult, Platoons};

#[derive(Deserialize)]
struct PlatoonRecord {
    start:       f64,
    end:         f64,
    time:        f64,
    origin:      String,
    destination: String,
    category:    u16,
    speed:       f64,
}

/// Load a platoon schedule from a CSV file into `platoons`.
///
/// `node` resolves node names.  Returns the number of GTUs added.
pub fn load_platoons_csv(
    path:     &Path,
    platoons: &mut Platoons,
    node:     impl Fn(&str) -> Option<NodeId>,
) -> GeneratorResult<usize> {
    let file = std::fs::File::open(path)?;
    load_platoons_reader(file, platoons, node)
}

/// Like [`load_platoons_csv`] but accepts any `Read` source.
pub fn load_platoons_reader<R: Read>(
    reader:   R,
    platoons: &mut Platoons,
    node:     impl Fn(&str) -> Option<NodeId>,
) -> GeneratorResult<usize> {
    let mut csv_reader = csv::Reader::from_reader(reader);
    let mut current: Option<(SimTime, SimTime)> = None;
    let mut added = 0;

    for result in csv_reader.deserialize::<PlatoonRecord>() {
        let row = result.map_err(|e| GeneratorError::Parse(e.to_string()))?;
        let window = (SimTime::from_secs(row.start)?, SimTime::from_secs(row.end)?);
        if current != Some(window) {
            platoons.add_platoon(window.0, window.1)?;
            current = Some(window);
        }
        let origin = resolve(&node, &row.origin)?;
        let destination = resolve(&node, &row.destination)?;
        platoons.add_gtu(
            SimTime::from_secs(row.time)?,
            origin,
            destination,
            CategoryId(row.category),
            row.speed,
        )?;
        added += 1;
    }
    Ok(added)
}

fn resolve(node: &impl Fn(&str) -> Option<NodeId>, name: &str) -> GeneratorResult<NodeId> {
    node(name.trim()).ok_or_else(|| GeneratorError::Parse(format!("unknown node '{name}'")))
}
