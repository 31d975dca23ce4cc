//! Validation tests for the compartment equations
//!
//! Checks the Schreiner loading equation and the Bühlmann ceiling against
//! reference values and their analytical properties:
//! - Constant-depth legs reduce to a pure exponential approach
//! - Ceilings never deepen as the gradient factor rises
//! - Splitting a leg is exact only when the ascent/descent rate is unchanged

use dive_tissue_sim::tissue::surface_nitrogen_pressure;
use dive_tissue_sim::{
    schreiner_equation, Compartment, GasExposure, ModelError, WATER_VAPOUR_PRESSURE_BAR,
    ZHL16_TABLE,
};

const TOLERANCE: f64 = 1e-12;

fn compartment(index: usize) -> Compartment {
    Compartment::at_surface(index, &ZHL16_TABLE[index], 1.0)
}

fn exposure(
    nitrogen_fraction: f64,
    helium_fraction: f64,
    start_depth_m: f64,
    end_depth_m: f64,
    duration_min: f64,
) -> GasExposure {
    GasExposure {
        nitrogen_fraction,
        helium_fraction,
        start_depth_m,
        end_depth_m,
        duration_min,
    }
}

// ============================================================================
// Reference vectors
// ============================================================================

#[test]
fn test_two_leg_descent_reference_pressures() {
    let mut c = compartment(0);
    c.update(&exposure(0.5, 0.5, 0.0, 10.0, 5.0)).unwrap();
    c.update(&exposure(0.5, 0.5, 10.0, 20.0, 5.0)).unwrap();

    assert!(
        (c.nitrogen_pressure - 1.0416699778488399).abs() < TOLERANCE,
        "N2 pressure: {}",
        c.nitrogen_pressure
    );
    assert!(
        (c.helium_pressure - 1.2482576450654272).abs() < TOLERANCE,
        "He pressure: {}",
        c.helium_pressure
    );
}

#[test]
fn test_schreiner_descent_reference_value() {
    let prior = 0.7902 * (1.0 - 0.0627);
    let p = schreiner_equation(0.68, 0.0, 30.0, 1.5, 4.0, prior, WATER_VAPOUR_PRESSURE_BAR);
    assert!((p - 0.960587365064689).abs() < TOLERANCE, "got {}", p);
}

// ============================================================================
// Schreiner properties
// ============================================================================

#[test]
fn test_constant_depth_matches_haldane() {
    for (i, row) in ZHL16_TABLE.iter().enumerate() {
        let c = compartment(i);
        let depth = 18.0;
        let duration = 12.5;
        let alveolar = 0.79 * ((depth + 10.0) / 10.0 - WATER_VAPOUR_PRESSURE_BAR);
        let k = std::f64::consts::LN_2 / row.nitrogen_half_life;
        let expected = alveolar + (c.nitrogen_pressure - alveolar) * (-k * duration).exp();

        let p = c.schreiner_equation(0.79, depth, depth, duration, row.nitrogen_half_life, c.nitrogen_pressure);
        assert!(
            (p - expected).abs() < TOLERANCE,
            "compartment {}: {} vs {}",
            i,
            p,
            expected
        );
    }
}

#[test]
fn test_constant_depth_split_is_exact() {
    let c = compartment(3);
    let hl = c.nitrogen_half_life;
    let whole = c.schreiner_equation(0.79, 25.0, 25.0, 10.0, hl, c.nitrogen_pressure);
    let first = c.schreiner_equation(0.79, 25.0, 25.0, 6.0, hl, c.nitrogen_pressure);
    let split = c.schreiner_equation(0.79, 25.0, 25.0, 4.0, hl, first);
    assert!((whole - split).abs() < TOLERANCE);
}

#[test]
fn test_split_with_changed_rate_differs() {
    let c = compartment(0);
    let hl = c.nitrogen_half_life;
    let whole = c.schreiner_equation(0.79, 0.0, 20.0, 10.0, hl, c.nitrogen_pressure);

    // Same end points, but the first 10 m take 2 min and the next 10 m take 8
    let first = c.schreiner_equation(0.79, 0.0, 10.0, 2.0, hl, c.nitrogen_pressure);
    let split = c.schreiner_equation(0.79, 10.0, 20.0, 8.0, hl, first);

    assert!(
        (whole - split).abs() > 1e-3,
        "different depth/time paths should load differently: {} vs {}",
        whole,
        split
    );
}

#[test]
fn test_ascent_offgasses() {
    let mut c = compartment(0);
    c.update(&exposure(0.79, 0.0, 0.0, 30.0, 2.0)).unwrap();
    c.update(&exposure(0.79, 0.0, 30.0, 30.0, 20.0)).unwrap();
    let loaded = c.nitrogen_pressure;
    c.update(&exposure(0.79, 0.0, 30.0, 0.0, 3.0)).unwrap();
    c.update(&exposure(0.79, 0.0, 0.0, 0.0, 30.0)).unwrap();

    assert!(c.nitrogen_pressure < loaded);
    // Fast compartment is back near surface saturation after 30 min
    let surface = surface_nitrogen_pressure(1.0);
    assert!((c.nitrogen_pressure - surface).abs() < 0.02);
}

#[test]
fn test_gases_update_independently() {
    let mut nitrogen_only = compartment(5);
    let mut mixed = compartment(5);
    nitrogen_only
        .update(&exposure(0.5, 0.0, 0.0, 40.0, 3.0))
        .unwrap();
    mixed.update(&exposure(0.5, 0.3, 0.0, 40.0, 3.0)).unwrap();

    assert!((nitrogen_only.nitrogen_pressure - mixed.nitrogen_pressure).abs() < TOLERANCE);
    assert_eq!(nitrogen_only.helium_pressure, 0.0);
    assert!(mixed.helium_pressure > 0.0);
}

#[test]
fn test_negative_duration_rejected() {
    let mut c = compartment(0);
    assert!(matches!(
        c.update(&exposure(0.79, 0.0, 0.0, 10.0, -1.0)),
        Err(ModelError::NonPositive {
            field: "duration_min",
            ..
        })
    ));
}

// ============================================================================
// Bühlmann ceiling properties
// ============================================================================

#[test]
fn test_ceiling_non_increasing_in_gradient_factor() {
    let mut c = compartment(2);
    c.update(&exposure(0.4, 0.4, 0.0, 60.0, 3.0)).unwrap();
    c.update(&exposure(0.4, 0.4, 60.0, 60.0, 25.0)).unwrap();

    let mut previous = f64::INFINITY;
    for step in 0..=20 {
        let gf = step as f64 / 20.0;
        let ceiling = c.ceiling(gf).unwrap();
        assert!(
            ceiling <= previous + TOLERANCE,
            "ceiling rose from {} to {} at GF {}",
            previous,
            ceiling,
            gf
        );
        previous = ceiling;
    }
}

#[test]
fn test_ceiling_at_zero_gf_is_tissue_pressure() {
    let mut c = compartment(7);
    c.update(&exposure(0.35, 0.5, 0.0, 70.0, 4.0)).unwrap();
    let total = c.nitrogen_pressure + c.helium_pressure;
    assert!((c.ceiling(0.0).unwrap() - total).abs() < TOLERANCE);
}

#[test]
fn test_empty_compartment_error_names_its_index() {
    let mut c = compartment(7);
    c.nitrogen_pressure = 0.0;
    assert_eq!(
        c.ceiling(0.5),
        Err(ModelError::NoInertGasLoaded { compartment: 7 })
    );
    assert_eq!(
        c.ceiling_depth_m(0.5),
        Err(ModelError::NoInertGasLoaded { compartment: 7 })
    );
}

#[test]
fn test_ceiling_depth_reported_below_surface() {
    let mut c = compartment(0);
    c.update(&exposure(0.79, 0.0, 0.0, 45.0, 3.0)).unwrap();
    c.update(&exposure(0.79, 0.0, 45.0, 45.0, 15.0)).unwrap();

    let depth = c.ceiling_depth_m(0.3).unwrap();
    let pressure = c.ceiling(0.3).unwrap();
    assert!(depth > 0.0);
    assert!((depth - (pressure - 1.0) * 10.0).abs() < 1e-9);

    // Unloaded tissue at surface has no ceiling
    assert_eq!(compartment(0).ceiling_depth_m(1.0).unwrap(), 0.0);
}
