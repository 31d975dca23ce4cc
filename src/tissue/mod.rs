//! Tissue compartment model.
//!
//! Sixteen parallel compartments approximate how inert gas dissolves into and
//! leaves body tissue. Fast compartments (short half-life) load and unload
//! within minutes; slow compartments carry gas for hours after a dive.
//!
//! Key properties:
//! - Nitrogen and helium are tracked independently per compartment
//! - Loading follows first-order exponential exchange (Schreiner)
//! - Tolerance follows the Bühlmann a/b linear M-value, scaled by a gradient factor
//!
//! References:
//! - Bühlmann AA. Tauchmedizin. 5th ed. Springer, 2002
//! - Schreiner HR, Kelley PL. Proc. 4th Symp. Underwater Physiology, 1971

pub mod compartment;
pub mod constants;

pub use compartment::{schreiner_equation, Compartment, GasExposure};
pub use constants::{
    depth_to_pressure_bar, pressure_to_depth_m, surface_nitrogen_pressure, TissueConstants,
    COMPARTMENT_COUNT, INITIAL_HELIUM_PRESSURE_BAR, INITIAL_NITROGEN_FRACTION, METERS_PER_BAR,
    WATER_VAPOUR_PRESSURE_BAR, ZHL16_TABLE,
};
