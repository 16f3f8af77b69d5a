//! `lg-output`: generation records for lanegen runs.
//!
//! | Backend        | Files created                          |
//! |----------------|----------------------------------------|
//! | [`CsvWriter`]  | `placements.csv`, `queue_events.csv`   |
//! | [`MemoryWriter`] | none, rows kept in two `Vec`s        |
//!
//! Both implement [`RecordWriter`] and are driven by
//! [`GenerationRecorder`], which implements
//! `lg_generator::GeneratorObserver`.
//!
//! # Usage
//!
//! ```rust,ignore
//! use lg_output::{CsvWriter, GenerationRecorder};
//!
//! let writer = CsvWriter::new(Path::new("./output"))?;
//! let mut recorder = GenerationRecorder::new(writer);
//! scenario.run(&mut recorder)?;
//! if let Some(e) = recorder.take_error() {
//!     eprintln!("output error: {e}");
//! }
//! ```

pub mod csv;
pub mod error;
pub mod memory;
pub mod recorder;
pub mod row;
pub mod writer;


pub use csv::CsvWriter;
pub use error::{OutputError, OutputResult};
pub use memory::MemoryWriter;
pub use recorder::GenerationRecorder;
pub use row::{PlacementRow, QueueEvent, QueueRow};
pub use writer::RecordWriter;
