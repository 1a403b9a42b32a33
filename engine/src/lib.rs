//! FILENAME: engine/src/lib.rs
//! Sales data engine - the data model and filtering core.
//!
//! This crate owns the immutable in-memory dataset and the filtering logic
//! that produces the subsets everything else is derived from. It knows
//! nothing about files (see `persistence`) or about metrics and charts
//! (see `report-engine`).
//!
//! Layers:
//! - `record`: One transaction line (what a row IS)
//! - `store`: The loaded, immutable dataset (what we HOLD)
//! - `filter`: Selection criteria and their application (what we SHOW)

pub mod record;
pub mod store;
pub mod filter;

pub use record::Record;
pub use store::{CategoricalColumn, EmptyDatasetError, FilterOptions, RecordStore};
pub use filter::{FilterSpec, FilteredView};
