//! Acquisition of daily observations from month pages.

pub mod month_cursor;
pub mod normalise;
pub mod page;
pub mod pipeline;
pub mod resolve;

pub use pipeline::{AcquisitionPipeline, EmptyPagePolicy, UpdateOutcome};
pub use resolve::epoch_floor;
