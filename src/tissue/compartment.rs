//! Single tissue compartment: Schreiner loading and Bühlmann ceiling.
//!
//! A compartment tracks dissolved nitrogen and helium partial pressure. Each
//! dive leg moves both pressures forward with the Schreiner equation, which
//! solves first-order gas exchange while ambient pressure changes linearly.
//! The Bühlmann equation then turns the combined loading into the lowest
//! ambient pressure the compartment tolerates under a gradient factor.
//!
//! References:
//! - Schreiner HR, Kelley PL. Proc. 4th Symp. Underwater Physiology, 1971
//! - Bühlmann AA. Tauchmedizin. 5th ed. Springer, 2002
//! - Baker EC. Clearing up the confusion about "deep stops". Immersed, 1998

use std::f64::consts::LN_2;

use serde::{Deserialize, Serialize};

use super::constants::{
    depth_to_pressure_bar, pressure_to_depth_m, surface_nitrogen_pressure, TissueConstants,
    INITIAL_HELIUM_PRESSURE_BAR, METERS_PER_BAR, WATER_VAPOUR_PRESSURE_BAR,
};
use crate::error::{require_positive, ModelError, ModelResult};

/// Inert-gas partial pressure after a linear depth change (bar)
///
/// `P = Palv + R(t - 1/k) - (Palv - P0 - R/k) e^(-kt)`
///
/// # Arguments
/// * `inert_gas_fraction` - Fraction of the gas in the breathing mix
/// * `current_depth_m` - Depth at the start of the exposure
/// * `target_depth_m` - Depth at the end of the exposure
/// * `duration_min` - Exposure time, must be > 0
/// * `half_life_min` - Compartment half-life for this gas
/// * `prior_pressure_bar` - Compartment pressure before the exposure
/// * `water_vapour_pressure_bar` - Alveolar water vapour pressure
pub fn schreiner_equation(
    inert_gas_fraction: f64,
    current_depth_m: f64,
    target_depth_m: f64,
    duration_min: f64,
    half_life_min: f64,
    prior_pressure_bar: f64,
    water_vapour_pressure_bar: f64,
) -> f64 {
    // Alveolar pressure at the start depth
    let alveolar =
        inert_gas_fraction * (depth_to_pressure_bar(current_depth_m) - water_vapour_pressure_bar);
    let k = LN_2 / half_life_min;
    // Rate of change of alveolar pressure (bar/min), zero at constant depth
    let rate = inert_gas_fraction * ((target_depth_m - current_depth_m) / METERS_PER_BAR)
        / duration_min;

    alveolar + rate * (duration_min - 1.0 / k)
        - (alveolar - prior_pressure_bar - rate / k) * (-k * duration_min).exp()
}

/// Breathing-gas exposure for one leg
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GasExposure {
    /// Nitrogen fraction of the mix (0-1)
    pub nitrogen_fraction: f64,
    /// Helium fraction of the mix (0-1)
    pub helium_fraction: f64,
    /// Depth at the start of the leg (m)
    pub start_depth_m: f64,
    /// Depth at the end of the leg (m)
    pub end_depth_m: f64,
    /// Leg duration (min)
    pub duration_min: f64,
}

/// One tissue compartment
///
/// Constants are copied in from the table row at creation; the compartment
/// keeps no link back to the table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Compartment {
    /// Position in the ZH-L16 table, fastest first
    pub index: usize,
    /// Dissolved nitrogen pressure (bar)
    pub nitrogen_pressure: f64,
    /// Dissolved helium pressure (bar)
    pub helium_pressure: f64,
    /// Alveolar water vapour pressure (bar)
    pub water_vapour_pressure: f64,
    /// Dive site surface pressure (bar)
    pub surface_pressure: f64,
    pub nitrogen_coefficient_a: f64,
    pub nitrogen_coefficient_b: f64,
    pub helium_coefficient_a: f64,
    pub helium_coefficient_b: f64,
    /// Nitrogen half-life (min)
    pub nitrogen_half_life: f64,
    /// Helium half-life (min)
    pub helium_half_life: f64,
}

impl Compartment {
    /// Create a compartment saturated with air at the surface
    pub fn at_surface(index: usize, constants: &TissueConstants, surface_pressure: f64) -> Self {
        Self {
            index,
            nitrogen_pressure: surface_nitrogen_pressure(surface_pressure),
            helium_pressure: INITIAL_HELIUM_PRESSURE_BAR,
            water_vapour_pressure: WATER_VAPOUR_PRESSURE_BAR,
            surface_pressure,
            nitrogen_coefficient_a: constants.nitrogen_coefficient_a,
            nitrogen_coefficient_b: constants.nitrogen_coefficient_b,
            helium_coefficient_a: constants.helium_coefficient_a,
            helium_coefficient_b: constants.helium_coefficient_b,
            nitrogen_half_life: constants.nitrogen_half_life,
            helium_half_life: constants.helium_half_life,
        }
    }

    /// Schreiner equation with this compartment's water vapour pressure
    pub fn schreiner_equation(
        &self,
        inert_gas_fraction: f64,
        current_depth_m: f64,
        target_depth_m: f64,
        duration_min: f64,
        half_life_min: f64,
        prior_pressure_bar: f64,
    ) -> f64 {
        schreiner_equation(
            inert_gas_fraction,
            current_depth_m,
            target_depth_m,
            duration_min,
            half_life_min,
            prior_pressure_bar,
            self.water_vapour_pressure,
        )
    }

    /// Advance both gases through one exposure
    ///
    /// Both pressures are computed from the pre-leg state and written
    /// together, so a ceiling never sees one gas updated without the other.
    pub fn update(&mut self, exposure: &GasExposure) -> ModelResult<()> {
        require_positive("duration_min", exposure.duration_min)?;

        let nitrogen = self.schreiner_equation(
            exposure.nitrogen_fraction,
            exposure.start_depth_m,
            exposure.end_depth_m,
            exposure.duration_min,
            self.nitrogen_half_life,
            self.nitrogen_pressure,
        );
        let helium = self.schreiner_equation(
            exposure.helium_fraction,
            exposure.start_depth_m,
            exposure.end_depth_m,
            exposure.duration_min,
            self.helium_half_life,
            self.helium_pressure,
        );

        self.nitrogen_pressure = nitrogen;
        self.helium_pressure = helium;
        Ok(())
    }

    /// Combined inert-gas pressure (bar)
    #[inline]
    pub fn total_inert_pressure(&self) -> f64 {
        self.nitrogen_pressure + self.helium_pressure
    }

    /// Pressure-weighted (a, b) coefficients for the current gas mix in tissue
    pub fn blended_coefficients(&self) -> Option<(f64, f64)> {
        let total = self.total_inert_pressure();
        if total <= 0.0 {
            return None;
        }
        let a = (self.nitrogen_coefficient_a * self.nitrogen_pressure
            + self.helium_coefficient_a * self.helium_pressure)
            / total;
        let b = (self.nitrogen_coefficient_b * self.nitrogen_pressure
            + self.helium_coefficient_b * self.helium_pressure)
            / total;
        Some((a, b))
    }

    /// Minimum tolerated ambient pressure at `gradient_factor` (bar)
    pub fn ceiling(&self, gradient_factor: f64) -> ModelResult<f64> {
        let (a, b) = self
            .blended_coefficients()
            .ok_or(ModelError::NoInertGasLoaded {
                compartment: self.index,
            })?;
        let total = self.total_inert_pressure();
        Ok((total - a * gradient_factor) / (gradient_factor / b + 1.0 - gradient_factor))
    }

    /// Ceiling as a depth below this compartment's surface (m)
    pub fn ceiling_depth_m(&self, gradient_factor: f64) -> ModelResult<f64> {
        Ok(pressure_to_depth_m(self.ceiling(gradient_factor)?, self.surface_pressure))
    }
}
