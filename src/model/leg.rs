//! Dive legs and breathing gas mixes.

use serde::{Deserialize, Serialize};

/// One segment of the dive profile
///
/// A leg starts where the previous leg ended (the surface for the first
/// leg) and moves linearly to `end_depth_m` over `time_period_min`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DiveLeg {
    /// Depth at the end of the leg (m)
    pub end_depth_m: f64,
    /// Leg duration (decimal minutes)
    pub time_period_min: f64,
    /// Nitrogen fraction of the breathing gas (0-1)
    pub nitrogen_fraction: f64,
    /// Helium fraction of the breathing gas (0-1)
    pub helium_fraction: f64,
    /// Entered by the caller rather than generated by a planner
    pub user_input: bool,
}

impl DiveLeg {
    /// Oxygen fraction implied as the remainder of the mix
    pub fn oxygen_fraction(&self) -> f64 {
        1.0 - self.nitrogen_fraction - self.helium_fraction
    }
}

/// Breathing gas given as oxygen and helium percentages
///
/// Nitrogen is the balance.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GasMix {
    /// Oxygen content (%)
    pub oxygen_percent: f64,
    /// Helium content (%)
    pub helium_percent: f64,
}

impl GasMix {
    pub fn new(oxygen_percent: f64, helium_percent: f64) -> Self {
        Self {
            oxygen_percent,
            helium_percent,
        }
    }

    /// Air (21% oxygen)
    pub fn air() -> Self {
        Self::new(21.0, 0.0)
    }

    pub fn oxygen_fraction(&self) -> f64 {
        self.oxygen_percent / 100.0
    }

    pub fn helium_fraction(&self) -> f64 {
        self.helium_percent / 100.0
    }

    /// Balance of the mix, floored at zero
    pub fn nitrogen_fraction(&self) -> f64 {
        (1.0 - self.oxygen_fraction() - self.helium_fraction()).max(0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trimix_fractions() {
        let trimix = GasMix::new(18.0, 45.0);
        assert!((trimix.oxygen_fraction() - 0.18).abs() < 1e-12);
        assert!((trimix.helium_fraction() - 0.45).abs() < 1e-12);
        assert!((trimix.nitrogen_fraction() - 0.37).abs() < 1e-12);
    }

    #[test]
    fn test_pure_oxygen_has_no_nitrogen() {
        assert_eq!(GasMix::new(100.0, 0.0).nitrogen_fraction(), 0.0);
        // Over-specified mix does not go negative
        assert_eq!(GasMix::new(80.0, 40.0).nitrogen_fraction(), 0.0);
    }

    #[test]
    fn test_leg_oxygen_remainder() {
        let leg = DiveLeg {
            end_depth_m: 30.0,
            time_period_min: 20.0,
            nitrogen_fraction: 0.79,
            helium_fraction: 0.0,
            user_input: true,
        };
        assert!((leg.oxygen_fraction() - 0.21).abs() < 1e-12);
    }
}
