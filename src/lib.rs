//! Dive Tissue Sim - Bühlmann ZHL-16 inert-gas loading engine
//!
//! This library models nitrogen and helium uptake in sixteen tissue
//! compartments over a dive profile and derives the ascent ceiling under
//! gradient-factor conservatism.

pub mod config;
pub mod error;
pub mod model;
pub mod state;
pub mod tissue;

pub use config::{ModelParameters, SurfacePressureSource, ValidationPolicy};
pub use error::{ModelError, ModelResult};
pub use model::{DiveLeg, DiveModel, DiveSchedule, GasMix, GradientFactorSlope, LegOutcome};
pub use state::{CompartmentSnapshot, TissueSnapshot};
pub use tissue::{
    schreiner_equation, Compartment, GasExposure, TissueConstants, COMPARTMENT_COUNT,
    WATER_VAPOUR_PRESSURE_BAR, ZHL16_TABLE,
};
