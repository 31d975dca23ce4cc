//! Model parameter structures.
//!
//! Gradient factors and surface pressure are dive-plan choices; the tissue
//! constants themselves are fixed and live in `tissue::constants`.

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Default file name inside a parameter directory
pub const PARAMETERS_FILE_NAME: &str = "dive_model.json";

/// Standard sea-level atmosphere (bar)
pub const SEA_LEVEL_PRESSURE_BAR: f64 = 1.01325;

/// Supplies the ambient pressure at the dive site surface
///
/// Altitude-to-pressure conversion is done by the implementor; the model
/// only consumes the resulting pressure.
pub trait SurfacePressureSource {
    /// Surface pressure in bar
    fn surface_pressure_bar(&self) -> f64;
}

impl SurfacePressureSource for f64 {
    fn surface_pressure_bar(&self) -> f64 {
        *self
    }
}

/// Optional input checks beyond the mandatory ones
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidationPolicy {
    /// Reject legs whose nitrogen + helium fraction exceeds 1
    ///
    /// Off by default: oxygen is the implied remainder and is not checked.
    pub enforce_fraction_sum: bool,
}

/// Dive model configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelParameters {
    /// Gradient factor applied at the deepest ceiling (0-1)
    /// Reference: 0.3 is a common technical-diving choice
    /// Source: Baker, Clearing up the confusion about "deep stops", 1998
    pub gf_low: f64,

    /// Gradient factor applied at the surface (0-1)
    pub gf_high: f64,

    /// Ambient pressure at the dive site surface (bar)
    pub surface_pressure_bar: f64,

    /// Optional validation toggles
    pub validation: ValidationPolicy,
}

impl Default for ModelParameters {
    fn default() -> Self {
        Self {
            gf_low: 0.3,
            gf_high: 0.85,
            surface_pressure_bar: SEA_LEVEL_PRESSURE_BAR,
            validation: ValidationPolicy::default(),
        }
    }
}

impl SurfacePressureSource for ModelParameters {
    fn surface_pressure_bar(&self) -> f64 {
        self.surface_pressure_bar
    }
}

impl ModelParameters {
    /// Load from a JSON file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("reading model parameters from {}", path.display()))?;
        let params = serde_json::from_str(&contents)
            .with_context(|| format!("parsing model parameters in {}", path.display()))?;
        log::info!("Loaded model parameters from {:?}", path);
        Ok(params)
    }

    /// Load from JSON file or return defaults
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref();
        if !path.exists() {
            log::info!("Model parameters file not found, using defaults");
            return Self::default();
        }
        match Self::load(path) {
            Ok(params) => params,
            Err(e) => {
                log::warn!("Failed to load model parameters: {:#}, using defaults", e);
                Self::default()
            }
        }
    }

    /// Load `dive_model.json` from a directory, or defaults
    pub fn load_from_dir<P: AsRef<Path>>(dir: P) -> Self {
        Self::load_or_default(dir.as_ref().join(PARAMETERS_FILE_NAME))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_parameters() {
        let params = ModelParameters::default();
        assert!((params.gf_low - 0.3).abs() < 1e-12);
        assert!((params.gf_high - 0.85).abs() < 1e-12);
        assert!(!params.validation.enforce_fraction_sum);
    }

    #[test]
    fn test_serialization() {
        let params = ModelParameters {
            gf_low: 0.4,
            validation: ValidationPolicy {
                enforce_fraction_sum: true,
            },
            ..Default::default()
        };
        let json = serde_json::to_string_pretty(&params).unwrap();
        let parsed: ModelParameters = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, params);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let parsed: ModelParameters = serde_json::from_str(r#"{ "gf_high": 0.7 }"#).unwrap();
        assert!((parsed.gf_high - 0.7).abs() < 1e-12);
        assert!((parsed.surface_pressure_bar - SEA_LEVEL_PRESSURE_BAR).abs() < 1e-12);
    }

    #[test]
    fn test_load_or_default_missing_file() {
        let params = ModelParameters::load_or_default("does/not/exist.json");
        assert_eq!(params, ModelParameters::default());
    }

    #[test]
    fn test_load_from_file() {
        let dir = std::env::temp_dir().join(format!("dive_tissue_sim_params_{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(
            dir.join(PARAMETERS_FILE_NAME),
            r#"{ "gf_low": 0.5, "gf_high": 0.8, "surface_pressure_bar": 0.9 }"#,
        )
        .unwrap();

        let params = ModelParameters::load_from_dir(&dir);
        assert!((params.gf_low - 0.5).abs() < 1e-12);
        assert!((params.surface_pressure_bar() - 0.9).abs() < 1e-12);

        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_load_reports_parse_error() {
        let path = std::env::temp_dir().join(format!("dive_tissue_sim_bad_{}.json", std::process::id()));
        std::fs::write(&path, "not json").unwrap();
        assert!(ModelParameters::load(&path).is_err());
        assert_eq!(ModelParameters::load_or_default(&path), ModelParameters::default());
        std::fs::remove_file(&path).unwrap();
    }
}
