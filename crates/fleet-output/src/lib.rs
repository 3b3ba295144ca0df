//! `fleet-output`: tabular output for the fleet simulator.
//!
//! | Type               | Role                                                  |
//! |--------------------|-------------------------------------------------------|
//! | [`TableWriter`]    | backend trait: telemetry rows, anomaly rows, finish   |
//! | [`CsvWriter`]      | `telemetry.csv` + `anomalies.csv` in one directory    |
//! | [`WriterStreamer`] | `fleet_sim::Streamer` over any `TableWriter`, deduped |
//! | [`write_tables`]   | dump an orchestrator's logs after a run               |
//!
//! # Usage
//!
//! ```rust,ignore
//! use fleet_output::{CsvWriter, WriterStreamer};
//!
//! let mut sink = WriterStreamer::new(CsvWriter::new(Path::new("./out"))?);
//! let report = fleet.run(&config, &mut sink, &mut ProgressLogger::new(50))?;
//! sink.finish()?;
//! ```

pub mod csv;
pub mod error;
pub mod export;
pub mod streamer;
pub mod writer;


pub use csv::{ANOMALY_FILE, CsvWriter, TELEMETRY_FILE};
pub use error::{OutputError, OutputResult};
pub use export::write_tables;
pub use streamer::WriterStreamer;
pub use writer::TableWriter;
