//! Delimited-text input and output.
//!
//! The aggregation engine never reads files itself; these adapters turn a
//! measurement table into [`StudyMeasurement`](crate::data_structs::StudyMeasurement)
//! rows and write results back out as CSV.
pub mod export;
pub mod measurements;

pub use export::{
    write_summaries,
    ExportTable,
};
pub use measurements::{
    read_measurements,
    read_measurements_from_path,
};
