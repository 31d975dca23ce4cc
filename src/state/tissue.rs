//! Serializable view of compartment loading.
//!
//! Snapshots are taken after each applied leg so a caller can chart tissue
//! pressures over the dive without holding on to the model.

use serde::{Deserialize, Serialize};

use crate::tissue::Compartment;

/// Loading of one compartment at a point in the dive
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CompartmentSnapshot {
    /// Table index (0 = fastest)
    pub index: usize,
    /// Dissolved nitrogen (bar)
    pub nitrogen_bar: f64,
    /// Dissolved helium (bar)
    pub helium_bar: f64,
}

impl CompartmentSnapshot {
    /// Combined inert-gas pressure (bar)
    pub fn total_bar(&self) -> f64 {
        self.nitrogen_bar + self.helium_bar
    }
}

/// Loading of every compartment at a point in the dive
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TissueSnapshot {
    pub compartments: Vec<CompartmentSnapshot>,
}

impl TissueSnapshot {
    /// Capture the current pressures
    pub fn capture(compartments: &[Compartment]) -> Self {
        Self {
            compartments: compartments
                .iter()
                .enumerate()
                .map(|(index, c)| CompartmentSnapshot {
                    index,
                    nitrogen_bar: c.nitrogen_pressure,
                    helium_bar: c.helium_pressure,
                })
                .collect(),
        }
    }

    /// Highest combined pressure across compartments (bar)
    pub fn max_total_bar(&self) -> f64 {
        self.compartments
            .iter()
            .map(CompartmentSnapshot::total_bar)
            .fold(0.0, f64::max)
    }
}
