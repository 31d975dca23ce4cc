//! Configuration for the dive model.
//!
//! Parameters can be built in code or loaded from a JSON file.

mod parameters;

pub use parameters::{
    ModelParameters, SurfacePressureSource, ValidationPolicy, PARAMETERS_FILE_NAME,
    SEA_LEVEL_PRESSURE_BAR,
};
