//! # Voltage Drop Calculation
//!
//! Voltage drop over a cable run from its impedance at a given current,
//! and the compliance check against a standard's limit.
//!
//! ## Formulas
//!
//! ```text
//! Z_eff = R·cosφ + X·sinφ                    (Ω/km)
//! V_3φ  = √3 · I · L · Z_eff / 1000
//! V_1φ  = 2 · I · L · Z_eff / 1000
//! ```
//!
//! The percent returned by [`voltage_drop`] is computed against the fixed
//! [`REFERENCE_VOLTAGE_V`] regardless of the actual system voltage; the
//! orchestrator derives the system-voltage percent itself before running
//! the compliance check. Both figures are pinned by tests.

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::errors::{CalcError, CalcResult};
use crate::factors::{CableMaterial, CircuitType, Phases};
use crate::standards::WiringStandard;
use crate::units::OhmsPerKm;

/// Fixed reference for the percent figure reported by [`voltage_drop`]
pub const REFERENCE_VOLTAGE_V: f64 = 400.0;

/// Inputs for a voltage-drop calculation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VoltageDropInput {
    /// Conductor current, A
    pub current_a: f64,
    /// Conductor cross-section, mm²
    pub size_sqmm: f64,
    /// Run length, metres
    pub length_m: f64,
    /// Supply phases
    pub phases: Phases,
    /// Power factor cos(φ)
    pub power_factor: f64,
    /// Conductor material
    pub material: CableMaterial,
}

impl VoltageDropInput {
    /// Copper run at power factor 0.85
    pub fn new(current_a: f64, size_sqmm: f64, length_m: f64, phases: Phases) -> Self {
        VoltageDropInput {
            current_a,
            size_sqmm,
            length_m,
            phases,
            power_factor: 0.85,
            material: CableMaterial::Copper,
        }
    }

    pub fn with_power_factor(mut self, power_factor: f64) -> Self {
        self.power_factor = power_factor;
        self
    }

    fn validate(&self) -> CalcResult<()> {
        if self.current_a < 0.0 {
            return Err(CalcError::invalid_input(
                "current_a",
                self.current_a.to_string(),
                "Current cannot be negative",
            ));
        }
        if self.length_m <= 0.0 {
            return Err(CalcError::invalid_input(
                "length_m",
                self.length_m.to_string(),
                "Length must be positive",
            ));
        }
        if self.power_factor <= 0.0 || self.power_factor > 1.0 {
            return Err(CalcError::PowerFactorOutOfRange {
                value: self.power_factor,
            });
        }
        Ok(())
    }
}

/// Voltage drop over a run.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VoltageDropResult {
    /// Drop, volts
    pub voltage_drop_v: f64,
    /// Drop as percent of the fixed 400 V reference
    pub voltage_drop_percent: f64,
}

/// Compute the voltage drop for a run.
///
/// # Errors
///
/// `InvalidInput` for negative current or non-positive length,
/// `PowerFactorOutOfRange` for cosφ outside (0, 1], and whatever the
/// standard's resistance lookup raises for unsupported materials.
pub fn voltage_drop(
    standard: &dyn WiringStandard,
    input: &VoltageDropInput,
) -> CalcResult<VoltageDropResult> {
    input.validate()?;

    let resistance = standard.cable_resistance(input.size_sqmm, input.material)?;
    let reactance = standard.cable_reactance(input.size_sqmm);

    let cos_phi = input.power_factor;
    let sin_phi = (1.0 - cos_phi * cos_phi).sqrt();
    let z_eff = OhmsPerKm(resistance * cos_phi + reactance * sin_phi);

    let phase_factor = match input.phases {
        Phases::Three => 3.0_f64.sqrt(),
        Phases::Single => 2.0,
    };
    let volts = phase_factor * input.current_a * z_eff.over_length_m(input.length_m);

    Ok(VoltageDropResult {
        voltage_drop_v: volts,
        voltage_drop_percent: volts / REFERENCE_VOLTAGE_V * 100.0,
    })
}

/// Outcome of a voltage-drop compliance check.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VoltageDropCompliance {
    /// Within the standard's limit
    pub compliant: bool,
    /// The checked percent
    pub actual_percent: f64,
    /// The standard's limit for this circuit category, percent
    pub max_allowed_percent: f64,
    /// How far over the limit (0 when compliant)
    pub exceeded_by_percent: f64,
}

/// Check a (system-voltage-scaled) drop percent against the standard's
/// limit for a circuit category.
///
/// Non-compliance is advisory data, not an error.
pub fn check_voltage_drop_limit(
    standard: &dyn WiringStandard,
    percent: f64,
    circuit: CircuitType,
) -> VoltageDropCompliance {
    let max_allowed = standard.voltage_drop_limit(circuit);
    let compliant = percent <= max_allowed;
    if !compliant {
        warn!(
            "Voltage drop {:.2}% exceeds {} {} limit {:.1}%",
            percent,
            standard.name(),
            circuit,
            max_allowed
        );
    }
    VoltageDropCompliance {
        compliant,
        actual_percent: percent,
        max_allowed_percent: max_allowed,
        exceeded_by_percent: (percent - max_allowed).max(0.0),
    }
}
