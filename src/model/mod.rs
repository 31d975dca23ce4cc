//! Dive model orchestration.
//!
//! Records the dive profile as ordered legs, applies them to the tissue
//! compartments and derives ascent ceilings under the configured gradient
//! factors. Stop planning (turning ceilings into a stop schedule) is left to
//! the caller.

pub mod dive_model;
pub mod leg;
pub mod schedule;

pub use dive_model::DiveModel;
pub use leg::{DiveLeg, GasMix};
pub use schedule::{
    controlling_ceiling, solve_ceiling, ControllingCeiling, DiveSchedule, GradientFactorSlope,
    LegOutcome,
};
