//! Static ZH-L16 tissue constants and physical constants.
//!
//! Sixteen compartments, each with nitrogen and helium half-lives and the
//! Bühlmann a/b coefficients for both gases.
//!
//! References:
//! - Bühlmann AA. Tauchmedizin. 5th ed. Springer, 2002
//! - Baker EC. Understanding M-values. Immersed. 1998;3(3):23-27

/// Number of tissue compartments in the ZH-L16 model
pub const COMPARTMENT_COUNT: usize = 16;

/// Alveolar water vapour pressure at 37°C (bar)
/// Reference: 47 mmHg ≈ 0.0627 bar
/// Source: Bühlmann, Tauchmedizin 2002
pub const WATER_VAPOUR_PRESSURE_BAR: f64 = 0.0627;

/// Nitrogen fraction of air used to seed surface saturation
pub const INITIAL_NITROGEN_FRACTION: f64 = 0.7902;

/// Helium pressure in a compartment before the dive (bar)
pub const INITIAL_HELIUM_PRESSURE_BAR: f64 = 0.0;

/// Seawater depth equivalent to one bar of pressure (m)
pub const METERS_PER_BAR: f64 = 10.0;

/// Per-compartment constants for both inert gases
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TissueConstants {
    /// Nitrogen half-life (min)
    pub nitrogen_half_life: f64,
    /// Helium half-life (min)
    pub helium_half_life: f64,
    /// Bühlmann a coefficient for nitrogen
    pub nitrogen_coefficient_a: f64,
    /// Bühlmann b coefficient for nitrogen
    pub nitrogen_coefficient_b: f64,
    /// Bühlmann a coefficient for helium
    pub helium_coefficient_a: f64,
    /// Bühlmann b coefficient for helium
    pub helium_coefficient_b: f64,
}

const fn row(
    nitrogen_half_life: f64,
    helium_half_life: f64,
    nitrogen_coefficient_a: f64,
    nitrogen_coefficient_b: f64,
    helium_coefficient_a: f64,
    helium_coefficient_b: f64,
) -> TissueConstants {
    TissueConstants {
        nitrogen_half_life,
        helium_half_life,
        nitrogen_coefficient_a,
        nitrogen_coefficient_b,
        helium_coefficient_a,
        helium_coefficient_b,
    }
}

/// ZH-L16 table, fastest compartment first
///
/// Columns: N2 half-life, He half-life, N2 a, N2 b, He a, He b
pub const ZHL16_TABLE: [TissueConstants; COMPARTMENT_COUNT] = [
    row(4.0, 1.51, 1.2599, 0.5050, 1.7424, 0.4245),
    row(8.0, 3.02, 1.0000, 0.6514, 1.3830, 0.5747),
    row(12.5, 4.72, 0.8618, 0.7222, 1.1919, 0.6527),
    row(18.5, 6.99, 0.7562, 0.7825, 1.0458, 0.7223),
    row(27.0, 10.21, 0.6200, 0.8126, 0.9220, 0.7582),
    row(38.3, 14.48, 0.5043, 0.8434, 0.8205, 0.7957),
    row(54.3, 20.53, 0.4410, 0.8693, 0.7305, 0.8279),
    row(77.0, 29.11, 0.4000, 0.8910, 0.6502, 0.8553),
    row(109.0, 41.20, 0.3750, 0.9092, 0.5950, 0.8757),
    row(146.0, 55.19, 0.3500, 0.9222, 0.5545, 0.8903),
    row(187.0, 70.69, 0.3295, 0.9319, 0.5333, 0.8997),
    row(239.0, 90.34, 0.3065, 0.9403, 0.5189, 0.9073),
    row(305.0, 115.29, 0.2835, 0.9477, 0.5181, 0.9122),
    row(390.0, 147.42, 0.2610, 0.9544, 0.5176, 0.9171),
    row(498.0, 188.24, 0.2480, 0.9602, 0.5172, 0.9217),
    row(635.0, 240.03, 0.2327, 0.9653, 0.5119, 0.9267),
];

/// Absolute pressure at depth using the 10 m ≈ 1 bar seawater approximation
#[inline]
pub fn depth_to_pressure_bar(depth_m: f64) -> f64 {
    (depth_m + METERS_PER_BAR) / METERS_PER_BAR
}

/// Depth (m) at which ambient pressure equals `pressure_bar`, clamped at the surface
#[inline]
pub fn pressure_to_depth_m(pressure_bar: f64, surface_pressure_bar: f64) -> f64 {
    ((pressure_bar - surface_pressure_bar) * METERS_PER_BAR).max(0.0)
}

/// Nitrogen pressure in a compartment saturated at the surface (bar)
#[inline]
pub fn surface_nitrogen_pressure(surface_pressure_bar: f64) -> f64 {
    INITIAL_NITROGEN_FRACTION * (surface_pressure_bar - WATER_VAPOUR_PRESSURE_BAR)
}
