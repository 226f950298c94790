//! # Electrical Calculation Engine
//!
//! The orchestrator: runs current → cable sizing → breaker selection in
//! that fixed order against one [`Load`], writing results onto the
//! entity's computed fields. Any stage failure aborts the whole call and
//! is reported wrapped with the entity's identity; there are no silent
//! defaults for a failed step.
//!
//! ## Example
//!
//! ```rust
//! use volt_core::calculations::engine::ElectricalCalculationEngine;
//! use volt_core::factors::{LoadType, Phases};
//! use volt_core::model::Load;
//!
//! let engine = ElectricalCalculationEngine::new("IEC").unwrap();
//! let mut load = Load::new("Compressor M-301", 75.0, 415.0, Phases::Three)
//!     .with_power_factor(0.85)
//!     .with_efficiency(0.92)
//!     .with_load_type(LoadType::Motor);
//!
//! engine.calculate_load(&mut load).unwrap();
//! assert!(load.current_a.unwrap() > 0.0);
//! assert!(load.breaker_rating_a.unwrap() >= load.design_current_a.unwrap());
//! ```

use serde::{Deserialize, Serialize};
use tracing::debug;
use uuid::Uuid;

use crate::errors::{CalcError, CalcResult};
use crate::model::{Cable, Load};
use crate::project::{GlobalSettings, Project};
use crate::standards::{StandardKind, WiringStandard};
use crate::units::{Kilowatts, OhmsPerKm, Watts};

use super::breaker_selection::{select_breaker, BreakerSelectionInput};
use super::cable_sizing::{select_cable, CableSizingInput};
use super::current::load_current;
use super::voltage_drop::{check_voltage_drop_limit, voltage_drop, VoltageDropInput};

/// Orchestrates the calculators against one entity at a time.
///
/// Holds the wiring standard and the site ambient temperature; otherwise
/// stateless, so one engine can serve any number of sequential or
/// per-thread calculations.
pub struct ElectricalCalculationEngine {
    standard: Box<dyn WiringStandard>,
    ambient_temp_c: f64,
    max_vdrop_percent: f64,
}

impl ElectricalCalculationEngine {
    /// Engine for a named standard (case-insensitive), 40 °C ambient.
    ///
    /// # Errors
    ///
    /// `UnknownStandard` for names other than IEC, IS, NEC.
    pub fn new(standard_name: &str) -> CalcResult<Self> {
        Ok(Self::with_kind(StandardKind::from_name(standard_name)?))
    }

    /// Engine for a known standard kind.
    pub fn with_kind(kind: StandardKind) -> Self {
        ElectricalCalculationEngine {
            standard: kind.instantiate(),
            ambient_temp_c: 40.0,
            max_vdrop_percent: 5.0,
        }
    }

    /// Engine configured from a project's settings.
    pub fn from_settings(settings: &GlobalSettings) -> Self {
        let mut engine = Self::with_kind(settings.standard);
        engine.ambient_temp_c = settings.ambient_temp_c;
        engine.max_vdrop_percent = settings.max_voltage_drop_percent;
        engine
    }

    pub fn with_ambient_temp(mut self, ambient_temp_c: f64) -> Self {
        self.ambient_temp_c = ambient_temp_c;
        self
    }

    /// The wiring standard this engine calculates under
    pub fn standard(&self) -> &dyn WiringStandard {
        self.standard.as_ref()
    }

    /// Run the full calculation chain for one load, writing the computed
    /// fields in place.
    ///
    /// Stages, in fixed order:
    /// 1. current, design current, apparent power
    /// 2. cable selection and voltage drop (skipped when the load has no
    ///    cable run)
    /// 3. breaker selection
    ///
    /// The call is idempotent: recalculating an already-calculated load
    /// yields identical results.
    ///
    /// # Errors
    ///
    /// Any stage failure, wrapped as `CalculationFailed` with the load's
    /// identity. The entity keeps whatever fields were written before the
    /// failing stage.
    pub fn calculate_load(&self, load: &mut Load) -> CalcResult<()> {
        self.calculate_load_inner(load)
            .map_err(|e| CalcError::calculation_failed(load.ident(), e))
    }

    fn calculate_load_inner(&self, load: &mut Load) -> CalcResult<()> {
        // stage 1: currents
        let currents = load_current(load)?;
        load.current_a = Some(currents.current_a);
        load.design_current_a = Some(currents.design_current_a);
        load.apparent_power_kva = Some(currents.apparent_power_kva);

        // stage 2: cable, when there is a run to size
        if load.cable_length_m > 0.0 {
            let sizing = CableSizingInput::new(
                currents.current_a,
                load.voltage,
                load.cable_length_m,
                load.phases,
                load.installation_method,
            )
            .with_ambient_temp(self.ambient_temp_c)
            .with_grouping_factor(load.grouping_factor)
            .with_max_vdrop_percent(self.max_vdrop_percent)
            .with_power_factor(load.power_factor);
            let selection = select_cable(self.standard.as_ref(), &sizing)?;

            load.cable_size_sqmm = Some(selection.size_sqmm);
            load.cable_cores = Some(selection.cores);
            load.cable_type = Some(selection.cable_type.clone());
            load.voltage_drop_v = Some(selection.voltage_drop_v);
            load.voltage_drop_percent = Some(selection.voltage_drop_percent);

            debug!(
                "{}: {} mm² {} ({} limited)",
                load.name, selection.size_sqmm, selection.cable_type, selection.limiting_factor
            );
        }

        // stage 3: breaker
        let breaker_input = BreakerSelectionInput::new(
            currents.current_a,
            currents.design_current_a,
            load.load_type,
            load.voltage,
            load.phases,
        );
        let selection = select_breaker(&breaker_input)?;
        load.breaker_rating_a = Some(selection.breaker.rating_a);
        load.breaker_type = Some(selection.breaker.breaker_type);
        load.breaker_curve = Some(selection.breaker.curve);

        Ok(())
    }

    /// Fill a cable's computed fields for an externally supplied current.
    ///
    /// The percent figure follows the fixed 400 V reference convention of
    /// [`voltage_drop`]; power loss is the resistive I²R loss over the run.
    pub fn calculate_cable_voltage_drop(&self, cable: &mut Cable, current_a: f64) -> CalcResult<()> {
        let input = VoltageDropInput {
            current_a,
            size_sqmm: cable.size_sqmm,
            length_m: cable.length_m,
            phases: cable.phases(),
            power_factor: 0.85,
            material: cable.material,
        };
        let drop = voltage_drop(self.standard.as_ref(), &input)?;

        let resistance = self
            .standard
            .cable_resistance(cable.size_sqmm, cable.material)?;
        let run_resistance = OhmsPerKm(resistance).over_length_m(cable.length_m);
        let conductors = match cable.phases() {
            crate::factors::Phases::Three => 3.0,
            crate::factors::Phases::Single => 2.0,
        };
        let loss = Watts(conductors * current_a * current_a * run_resistance);

        cable.voltage_drop_v = Some(drop.voltage_drop_v);
        cable.voltage_drop_percent = Some(drop.voltage_drop_percent);
        cable.power_loss_kw = Some(Kilowatts::from(loss).0);
        Ok(())
    }

    /// Advisory re-check of a calculated load: voltage drop against the
    /// circuit-category limit and breaker rating against design current.
    ///
    /// Never fails; a computed-but-non-compliant design is a valid,
    /// flagged output.
    pub fn validate_calculations(&self, load: &Load) -> ValidationReport {
        let mut issues = Vec::new();

        if !load.is_calculated() {
            issues.push(format!("Load '{}' has not been calculated", load.name));
            return ValidationReport {
                valid: false,
                issues,
            };
        }

        if let Some(percent) = load.voltage_drop_percent {
            let compliance = check_voltage_drop_limit(
                self.standard.as_ref(),
                percent,
                load.load_type.circuit_type(),
            );
            if !compliance.compliant {
                issues.push(format!(
                    "Voltage drop {:.2}% exceeds the {} {} limit of {:.1}% by {:.2}%",
                    percent,
                    self.standard.name(),
                    load.load_type.circuit_type(),
                    compliance.max_allowed_percent,
                    compliance.exceeded_by_percent
                ));
            }
        }

        if let (Some(rating), Some(design)) = (load.breaker_rating_a, load.design_current_a) {
            if rating < design {
                issues.push(format!(
                    "Breaker rating {:.0} A is below the design current {:.2} A",
                    rating, design
                ));
            }
        }

        ValidationReport {
            valid: issues.is_empty(),
            issues,
        }
    }

    /// Calculate every load in a project, continuing past failures.
    ///
    /// Each failing load keeps its error; independent records are
    /// unaffected.
    pub fn calculate_project(&self, project: &mut Project) -> BatchOutcome {
        let mut outcome = BatchOutcome::default();
        for load in project.loads.values_mut() {
            match self.calculate_load(load) {
                Ok(()) => outcome.calculated += 1,
                Err(error) => outcome.failures.push(BatchFailure {
                    load_id: load.id,
                    error,
                }),
            }
        }
        project.touch();
        outcome
    }
}

/// Result of [`ElectricalCalculationEngine::validate_calculations`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValidationReport {
    /// No issues found
    pub valid: bool,
    /// Human-readable findings
    pub issues: Vec<String>,
}

/// One failed record in a batch run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchFailure {
    pub load_id: Uuid,
    pub error: CalcError,
}

/// Result of a batch calculation over a project.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BatchOutcome {
    /// Loads calculated successfully
    pub calculated: usize,
    /// Loads that failed, with their errors
    pub failures: Vec<BatchFailure>,
}

impl BatchOutcome {
    pub fn all_ok(&self) -> bool {
        self.failures.is_empty()
    }
}
