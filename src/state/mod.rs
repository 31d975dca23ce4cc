//! State snapshots for the tissue simulation.
//!
//! Plain data views of compartment loading, suitable for serialization.

mod tissue;

pub use tissue::{CompartmentSnapshot, TissueSnapshot};
