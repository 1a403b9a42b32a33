//! FILENAME: persistence/src/lib.rs
//! Sales Dashboard Persistence Module
//!
//! Handles loading the sales dataset from CSV into a `RecordStore`. Loading
//! is the only I/O in the system: everything downstream works on the
//! in-memory store this module produces.

mod error;
mod csv_reader;

pub use error::{FormatError, LoadError};
pub use csv_reader::{load_csv, load_csv_from_reader};
