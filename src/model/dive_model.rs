//! Dive model: sixteen compartments driven leg by leg.
//!
//! The model owns its compartments and the ordered leg list. Legs are
//! recorded by `add_leg` and applied by `compute`, strictly in insertion
//! order, each one starting where the previous one ended.

use crate::config::{ModelParameters, SurfacePressureSource, ValidationPolicy};
use crate::error::{require_finite, require_positive, require_range, ModelError, ModelResult};
use crate::state::TissueSnapshot;
use crate::tissue::{
    Compartment, GasExposure, COMPARTMENT_COUNT, WATER_VAPOUR_PRESSURE_BAR, ZHL16_TABLE,
};

use super::leg::{DiveLeg, GasMix};
use super::schedule::{controlling_ceiling, solve_ceiling, DiveSchedule, LegOutcome};

/// Sum of inert fractions allowed when the sum check is enabled
const MAX_INERT_FRACTION: f64 = 1.0;

/// Bühlmann tissue model for one dive
#[derive(Debug, Clone)]
pub struct DiveModel {
    gf_low: f64,
    gf_high: f64,
    surface_pressure: f64,
    validation: ValidationPolicy,
    gases: Vec<GasMix>,
    legs: Vec<DiveLeg>,
    compartments: Option<[Compartment; COMPARTMENT_COUNT]>,
    /// Number of legs already applied to the compartments
    applied_legs: usize,
    /// Depth at the end of the last applied leg (m)
    current_depth_m: f64,
    schedule: DiveSchedule,
}

impl DiveModel {
    /// Validate the configuration and populate the compartments
    ///
    /// # Arguments
    /// * `gf_low` - Gradient factor at the deepest ceiling (0-1)
    /// * `gf_high` - Gradient factor at the surface (0-1)
    /// * `surface_pressure` - Dive site surface pressure (bar), above water vapour pressure
    pub fn configure(gf_low: f64, gf_high: f64, surface_pressure: f64) -> ModelResult<Self> {
        require_finite("gf_low", gf_low)?;
        require_finite("gf_high", gf_high)?;
        require_finite("surface_pressure", surface_pressure)?;
        require_range("gf_low", gf_low, 0.0, 1.0)?;
        require_range("gf_high", gf_high, 0.0, 1.0)?;
        require_positive("surface_pressure", surface_pressure)?;
        // Surface saturation is `0.7902 * (surface - water vapour)`
        if surface_pressure <= WATER_VAPOUR_PRESSURE_BAR {
            return Err(ModelError::OutOfRange {
                field: "surface_pressure",
                value: surface_pressure,
                min: WATER_VAPOUR_PRESSURE_BAR,
                max: f64::INFINITY,
            });
        }

        if gf_low > gf_high {
            log::warn!(
                "GF low {:.2} is above GF high {:.2}; ceilings will relax with depth",
                gf_low,
                gf_high
            );
        }

        let mut model = Self {
            gf_low,
            gf_high,
            surface_pressure,
            validation: ValidationPolicy::default(),
            gases: Vec::new(),
            legs: Vec::new(),
            compartments: None,
            applied_legs: 0,
            current_depth_m: 0.0,
            schedule: DiveSchedule::new(gf_low, gf_high),
        };
        model.populate_compartments()?;
        Ok(model)
    }

    /// Configure with surface pressure from an external source
    pub fn configure_with_source<S: SurfacePressureSource + ?Sized>(
        gf_low: f64,
        gf_high: f64,
        source: &S,
    ) -> ModelResult<Self> {
        Self::configure(gf_low, gf_high, source.surface_pressure_bar())
    }

    /// Configure from a parameter set, including its validation policy
    pub fn from_parameters(params: &ModelParameters) -> ModelResult<Self> {
        Ok(Self::configure_with_source(params.gf_low, params.gf_high, params)?
            .with_validation(params.validation))
    }

    /// Replace the optional validation checks
    pub fn with_validation(mut self, validation: ValidationPolicy) -> Self {
        self.validation = validation;
        self
    }

    /// Record a breathing gas
    ///
    /// Percentages are checked for being numbers only.
    pub fn add_gas(&mut self, oxygen_percent: f64, helium_percent: f64) -> ModelResult<&mut Self> {
        require_finite("oxygen_percent", oxygen_percent)?;
        require_finite("helium_percent", helium_percent)?;

        self.gases.push(GasMix::new(oxygen_percent, helium_percent));
        Ok(self)
    }

    /// Append a leg to the profile
    ///
    /// The compartments are not touched until `compute`.
    pub fn add_leg(
        &mut self,
        end_depth_m: f64,
        time_period_min: f64,
        nitrogen_fraction: f64,
        helium_fraction: f64,
    ) -> ModelResult<&mut Self> {
        require_finite("end_depth", end_depth_m)?;
        require_finite("time_period", time_period_min)?;
        require_finite("nitrogen_fraction", nitrogen_fraction)?;
        require_finite("helium_fraction", helium_fraction)?;
        require_range("nitrogen_fraction", nitrogen_fraction, 0.0, 1.0)?;
        require_range("helium_fraction", helium_fraction, 0.0, 1.0)?;
        require_range("end_depth", end_depth_m, 0.0, f64::INFINITY)?;
        require_positive("time_period", time_period_min)?;

        let inert = nitrogen_fraction + helium_fraction;
        if inert > MAX_INERT_FRACTION {
            if self.validation.enforce_fraction_sum {
                return Err(ModelError::OutOfRange {
                    field: "nitrogen_fraction + helium_fraction",
                    value: inert,
                    min: 0.0,
                    max: MAX_INERT_FRACTION,
                });
            }
            log::warn!(
                "Leg {} inert fraction {:.3} exceeds 1; accepted unchecked",
                self.legs.len(),
                inert
            );
        }

        self.legs.push(DiveLeg {
            end_depth_m,
            time_period_min,
            nitrogen_fraction,
            helium_fraction,
            user_input: true,
        });
        Ok(self)
    }

    /// Append a leg breathing a gas registered with `add_gas`
    pub fn add_leg_with_gas(
        &mut self,
        end_depth_m: f64,
        time_period_min: f64,
        gas_index: usize,
    ) -> ModelResult<&mut Self> {
        let gas = *self.gases.get(gas_index).ok_or(ModelError::UnknownGas {
            index: gas_index,
            available: self.gases.len(),
        })?;
        self.add_leg(
            end_depth_m,
            time_period_min,
            gas.nitrogen_fraction(),
            gas.helium_fraction(),
        )
    }

    /// Build the sixteen compartments at surface saturation
    ///
    /// Runs once per model; a second call is an error so loaded tissue
    /// state is never silently replaced.
    pub fn populate_compartments(&mut self) -> ModelResult<&mut Self> {
        if self.compartments.is_some() {
            return Err(ModelError::AlreadyPopulated);
        }

        let surface_pressure = self.surface_pressure;
        self.compartments = Some(std::array::from_fn(|i| {
            Compartment::at_surface(i, &ZHL16_TABLE[i], surface_pressure)
        }));
        log::info!(
            "Populated {} compartments at surface pressure {:.4} bar",
            COMPARTMENT_COUNT,
            surface_pressure
        );
        Ok(self)
    }

    /// Apply every pending leg in order and derive its ceiling
    ///
    /// Each leg updates both gases in all compartments before its ceiling
    /// is taken. Legs applied by an earlier call are not applied again.
    /// On error the model is left as it was before the call.
    pub fn compute(&mut self) -> ModelResult<&mut Self> {
        let mut compartments = self.compartments.clone().ok_or(ModelError::NotPopulated)?;
        let mut schedule = self.schedule.clone();
        let mut depth = self.current_depth_m;

        for (leg_index, leg) in self.legs.iter().enumerate().skip(self.applied_legs) {
            let exposure = GasExposure {
                nitrogen_fraction: leg.nitrogen_fraction,
                helium_fraction: leg.helium_fraction,
                start_depth_m: depth,
                end_depth_m: leg.end_depth_m,
                duration_min: leg.time_period_min,
            };
            for compartment in compartments.iter_mut() {
                compartment.update(&exposure)?;
            }

            let raw = controlling_ceiling(&compartments, schedule.gf_low)?;
            if raw.depth_m > schedule.first_stop_depth_m {
                schedule.first_stop_depth_m = raw.depth_m;
            }
            let (ceiling, gradient_factor) = solve_ceiling(&compartments, &schedule.slope())?;

            log::debug!(
                "Leg {}: {:.1} m -> {:.1} m over {:.2} min, ceiling {:.2} m (GF {:.2}, compartment {})",
                leg_index,
                depth,
                leg.end_depth_m,
                leg.time_period_min,
                ceiling.depth_m,
                gradient_factor,
                ceiling.compartment
            );

            schedule.legs.push(LegOutcome {
                leg_index,
                start_depth_m: depth,
                end_depth_m: leg.end_depth_m,
                gradient_factor,
                ceiling_m: ceiling.depth_m,
                tolerated_pressure_bar: ceiling.pressure_bar,
                leading_compartment: ceiling.compartment,
                tissues: TissueSnapshot::capture(&compartments),
            });
            depth = leg.end_depth_m;
        }

        self.compartments = Some(compartments);
        self.schedule = schedule;
        self.current_depth_m = depth;
        self.applied_legs = self.legs.len();
        Ok(self)
    }

    /// Tolerated ambient pressure per compartment at a fixed gradient factor (bar)
    pub fn ceilings(&self, gradient_factor: f64) -> ModelResult<[f64; COMPARTMENT_COUNT]> {
        require_range("gradient_factor", gradient_factor, 0.0, 1.0)?;
        let compartments = self.compartments.as_ref().ok_or(ModelError::NotPopulated)?;

        let mut out = [0.0; COMPARTMENT_COUNT];
        for (slot, c) in out.iter_mut().zip(compartments.iter()) {
            *slot = c.ceiling(gradient_factor)?;
        }
        Ok(out)
    }

    /// Current compartment pressures
    pub fn snapshot(&self) -> ModelResult<TissueSnapshot> {
        self.compartments
            .as_ref()
            .map(|c| TissueSnapshot::capture(c))
            .ok_or(ModelError::NotPopulated)
    }

    pub fn gf_low(&self) -> f64 {
        self.gf_low
    }

    pub fn gf_high(&self) -> f64 {
        self.gf_high
    }

    /// Surface pressure (bar)
    pub fn surface_pressure(&self) -> f64 {
        self.surface_pressure
    }

    pub fn validation(&self) -> ValidationPolicy {
        self.validation
    }

    pub fn gases(&self) -> &[GasMix] {
        &self.gases
    }

    /// Recorded legs in dive order
    pub fn legs(&self) -> &[DiveLeg] {
        &self.legs
    }

    /// Compartments, empty before population
    pub fn compartments(&self) -> &[Compartment] {
        match &self.compartments {
            Some(compartments) => compartments,
            None => &[],
        }
    }

    pub fn is_populated(&self) -> bool {
        self.compartments.is_some()
    }

    /// Legs recorded but not yet applied
    pub fn pending_legs(&self) -> usize {
        self.legs.len() - self.applied_legs
    }

    /// Depth at the end of the last applied leg (m)
    pub fn current_depth_m(&self) -> f64 {
        self.current_depth_m
    }

    /// Ceiling history produced by `compute`
    pub fn schedule(&self) -> &DiveSchedule {
        &self.schedule
    }
}
