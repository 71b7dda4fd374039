//! Handles serialising and saving data to disk in the _parquet_ file format.

pub mod observations;

pub use observations::save_observations;
