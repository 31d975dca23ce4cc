//! Ceiling derivation under a gradient-factor slope.
//!
//! The gradient factor runs linearly from GF low at the deepest ceiling
//! reached during the dive (the first-stop anchor) to GF high at the
//! surface. A leg's ceiling is the shallowest depth whose own gradient
//! factor is tolerated by every compartment.
//!
//! Reference: Baker EC. Clearing up the confusion about "deep stops". Immersed, 1998

use serde::{Deserialize, Serialize};

use crate::error::ModelResult;
use crate::state::TissueSnapshot;
use crate::tissue::{pressure_to_depth_m, Compartment};

/// Bisection stops once the bracket is narrower than this (m)
const CEILING_TOLERANCE_M: f64 = 0.001;

/// Upper bound on bisection steps
const MAX_BISECTION_STEPS: usize = 64;

/// Linear gradient-factor profile between the first stop and the surface
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GradientFactorSlope {
    pub gf_low: f64,
    pub gf_high: f64,
    /// Depth where GF low applies (m); 0 means no ceiling has been seen yet
    pub anchor_depth_m: f64,
}

impl GradientFactorSlope {
    /// Gradient factor at `depth_m`
    pub fn at_depth(&self, depth_m: f64) -> f64 {
        if self.anchor_depth_m <= 0.0 {
            return self.gf_high;
        }
        if depth_m >= self.anchor_depth_m {
            return self.gf_low;
        }
        let depth = depth_m.max(0.0);
        self.gf_high + (self.gf_low - self.gf_high) * depth / self.anchor_depth_m
    }
}

/// Deepest compartment ceiling at a fixed gradient factor
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ControllingCeiling {
    /// Tolerated ambient pressure of the controlling compartment (bar)
    pub pressure_bar: f64,
    /// Same, as depth below the surface (m)
    pub depth_m: f64,
    /// Index of the controlling compartment
    pub compartment: usize,
}

/// Find the compartment with the highest tolerated ambient pressure
pub fn controlling_ceiling(
    compartments: &[Compartment],
    gradient_factor: f64,
) -> ModelResult<ControllingCeiling> {
    let mut best = ControllingCeiling {
        pressure_bar: f64::NEG_INFINITY,
        depth_m: 0.0,
        compartment: 0,
    };
    for c in compartments.iter() {
        let pressure = c.ceiling(gradient_factor)?;
        if pressure > best.pressure_bar {
            best = ControllingCeiling {
                pressure_bar: pressure,
                depth_m: pressure_to_depth_m(pressure, c.surface_pressure),
                compartment: c.index,
            };
        }
    }
    Ok(best)
}

/// Shallowest depth satisfying the gradient-factor slope
///
/// Returns the ceiling depth together with the gradient factor that applies
/// there and the controlling compartment at that factor.
pub fn solve_ceiling(
    compartments: &[Compartment],
    slope: &GradientFactorSlope,
) -> ModelResult<(ControllingCeiling, f64)> {
    let surface_gf = slope.at_depth(0.0);
    let at_surface = controlling_ceiling(compartments, surface_gf)?;
    if at_surface.depth_m <= 0.0 || slope.anchor_depth_m <= 0.0 {
        return Ok((at_surface, surface_gf));
    }

    // Invariant: `low` violates the slope, `high` satisfies it
    let mut low = 0.0;
    let mut high = slope.anchor_depth_m;
    for _ in 0..MAX_BISECTION_STEPS {
        if high - low < CEILING_TOLERANCE_M {
            break;
        }
        let mid = 0.5 * (low + high);
        let ceiling = controlling_ceiling(compartments, slope.at_depth(mid))?;
        if ceiling.depth_m > mid {
            low = mid;
        } else {
            high = mid;
        }
    }

    let gf = slope.at_depth(high);
    let controlling = controlling_ceiling(compartments, gf)?;
    Ok((
        ControllingCeiling {
            depth_m: high,
            ..controlling
        },
        gf,
    ))
}

/// Tissue state and ceiling after one leg
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LegOutcome {
    /// Position of the leg in the dive
    pub leg_index: usize,
    /// Depth at leg start (m)
    pub start_depth_m: f64,
    /// Depth at leg end (m)
    pub end_depth_m: f64,
    /// Gradient factor in force at the ceiling
    pub gradient_factor: f64,
    /// Ascent ceiling (m below the surface)
    pub ceiling_m: f64,
    /// Lowest tolerated ambient pressure at that gradient factor (bar)
    pub tolerated_pressure_bar: f64,
    /// Compartment controlling the ceiling
    pub leading_compartment: usize,
    /// Compartment pressures at leg end
    pub tissues: TissueSnapshot,
}

/// Leg-by-leg ceiling history of a dive
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiveSchedule {
    pub gf_low: f64,
    pub gf_high: f64,
    /// Deepest GF-low ceiling seen so far (m)
    pub first_stop_depth_m: f64,
    pub legs: Vec<LegOutcome>,
}

impl DiveSchedule {
    pub fn new(gf_low: f64, gf_high: f64) -> Self {
        Self {
            gf_low,
            gf_high,
            first_stop_depth_m: 0.0,
            legs: Vec::new(),
        }
    }

    /// Slope anchored at the current first-stop depth
    pub fn slope(&self) -> GradientFactorSlope {
        GradientFactorSlope {
            gf_low: self.gf_low,
            gf_high: self.gf_high,
            anchor_depth_m: self.first_stop_depth_m,
        }
    }

    /// Ceiling after the last applied leg (m), 0 before any leg
    pub fn final_ceiling_m(&self) -> f64 {
        self.legs.last().map_or(0.0, |leg| leg.ceiling_m)
    }

    /// Whether a direct ascent to the surface is currently forbidden
    pub fn in_deco(&self) -> bool {
        self.final_ceiling_m() > 0.0
    }

    /// Deepest ceiling over all legs (m)
    pub fn max_ceiling_m(&self) -> f64 {
        self.legs.iter().map(|leg| leg.ceiling_m).fold(0.0, f64::max)
    }
}
