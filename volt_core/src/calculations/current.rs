//! # Current Calculation
//!
//! Load current from rated power, design current from the sizing margins.
//!
//! ## Formulas
//!
//! ```text
//! I_3φ = P·1000 / (√3 · V · cosφ · η)
//! I_1φ = P·1000 / (V · cosφ · η)
//! S    = P / η                          (apparent power, kVA)
//! I_design = I · max(margin(load_type), margin(duty_cycle))
//! ```
//!
//! All results are rounded to 2 decimals.
//!
//! ## Example
//!
//! ```rust
//! use volt_core::calculations::current::three_phase_current;
//!
//! let i = three_phase_current(75.0, 415.0, 0.85, 0.92).unwrap();
//! assert!(i > 0.0);
//! ```

use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};
use crate::factors::{DutyCycle, LoadType, Phases};
use crate::model::Load;

use super::round2;

/// Three-phase load current, amperes.
///
/// # Errors
///
/// `InvalidInput` when voltage, power factor or efficiency is non-positive,
/// or power is negative.
pub fn three_phase_current(
    power_kw: f64,
    voltage: f64,
    power_factor: f64,
    efficiency: f64,
) -> CalcResult<f64> {
    validate_current_inputs(power_kw, voltage, power_factor, efficiency)?;
    let current = power_kw * 1000.0 / (3.0_f64.sqrt() * voltage * power_factor * efficiency);
    Ok(round2(current))
}

/// Single-phase load current, amperes.
///
/// Same formula as [`three_phase_current`] without the √3 factor.
pub fn single_phase_current(
    power_kw: f64,
    voltage: f64,
    power_factor: f64,
    efficiency: f64,
) -> CalcResult<f64> {
    validate_current_inputs(power_kw, voltage, power_factor, efficiency)?;
    let current = power_kw * 1000.0 / (voltage * power_factor * efficiency);
    Ok(round2(current))
}

fn validate_current_inputs(
    power_kw: f64,
    voltage: f64,
    power_factor: f64,
    efficiency: f64,
) -> CalcResult<()> {
    if voltage <= 0.0 {
        return Err(CalcError::invalid_input(
            "voltage",
            voltage.to_string(),
            "Voltage must be positive",
        ));
    }
    if power_kw < 0.0 {
        return Err(CalcError::invalid_input(
            "power_kw",
            power_kw.to_string(),
            "Power cannot be negative",
        ));
    }
    if power_factor <= 0.0 {
        return Err(CalcError::invalid_input(
            "power_factor",
            power_factor.to_string(),
            "Power factor must be positive",
        ));
    }
    if efficiency <= 0.0 {
        return Err(CalcError::invalid_input(
            "efficiency",
            efficiency.to_string(),
            "Efficiency must be positive",
        ));
    }
    Ok(())
}

/// Design current: the load current inflated by the larger of the
/// load-type and duty-cycle margins (a continuous motor gets 1.25 once,
/// not 1.25²).
///
/// # Errors
///
/// `InvalidInput` when the load current is non-positive.
pub fn design_current(
    load_current: f64,
    load_type: LoadType,
    duty_cycle: DutyCycle,
) -> CalcResult<f64> {
    if load_current <= 0.0 {
        return Err(CalcError::invalid_input(
            "load_current",
            load_current.to_string(),
            "Load current must be positive",
        ));
    }
    let margin = load_type.design_margin().max(duty_cycle.design_margin());
    Ok(round2(load_current * margin))
}

/// Results of the current calculation for one load.
///
/// ## JSON Example
///
/// ```json
/// {
///   "current_a": 133.43,
///   "design_current_a": 166.79,
///   "apparent_power_kva": 81.52
/// }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LoadCurrentResult {
    /// Full-load current, A
    pub current_a: f64,
    /// Margin-inflated design current, A
    pub design_current_a: f64,
    /// Apparent power, kVA
    pub apparent_power_kva: f64,
}

/// Compute current, design current and apparent power for a load.
///
/// Dispatches on the load's phase configuration; does not mutate the
/// entity (the orchestrator writes results back).
pub fn load_current(load: &Load) -> CalcResult<LoadCurrentResult> {
    let current_a = match load.phases {
        Phases::Three => {
            three_phase_current(load.power_kw, load.voltage, load.power_factor, load.efficiency)?
        }
        Phases::Single => {
            single_phase_current(load.power_kw, load.voltage, load.power_factor, load.efficiency)?
        }
    };
    let design_current_a = design_current(current_a, load.load_type, load.duty_cycle)?;
    let apparent_power_kva = round2(load.power_kw / load.efficiency);

    Ok(LoadCurrentResult {
        current_a,
        design_current_a,
        apparent_power_kva,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_three_phase_current_formula() {
        // 75 kW, 415 V, pf 0.85, η 0.92
        let i = three_phase_current(75.0, 415.0, 0.85, 0.92).unwrap();
        let expected = 75.0 * 1000.0 / (3.0_f64.sqrt() * 415.0 * 0.85 * 0.92);
        assert_eq!(i, round2(expected));
        assert_eq!(i, 133.43);
    }

    #[test]
    fn test_single_phase_current_formula() {
        // 2.3 kW, 230 V, pf 1.0, η 1.0 → exactly 10 A
        let i = single_phase_current(2.3, 230.0, 1.0, 1.0).unwrap();
        assert_eq!(i, 10.0);

        // √3 relation between the two formulas
        let three = three_phase_current(10.0, 400.0, 0.9, 0.95).unwrap();
        let single = single_phase_current(10.0, 400.0, 0.9, 0.95).unwrap();
        assert!((single / three - 3.0_f64.sqrt()).abs() < 0.01);
    }

    #[test]
    fn test_current_input_validation() {
        assert!(three_phase_current(10.0, 0.0, 0.9, 0.9).is_err());
        assert!(three_phase_current(-1.0, 400.0, 0.9, 0.9).is_err());
        assert!(three_phase_current(10.0, 400.0, 0.0, 0.9).is_err());
        assert!(single_phase_current(10.0, 230.0, 0.9, 0.0).is_err());
        // zero power is a valid (idle) load
        assert_eq!(three_phase_current(0.0, 400.0, 0.9, 0.9).unwrap(), 0.0);
    }

    #[test]
    fn test_design_current_margins() {
        // motor: 1.25 regardless of duty
        assert_eq!(
            design_current(15.0, LoadType::Motor, DutyCycle::Continuous).unwrap(),
            18.75
        );
        assert_eq!(
            design_current(15.0, LoadType::Motor, DutyCycle::ShortTime).unwrap(),
            18.75
        );
        // continuous duty: 1.25 for any load type
        assert_eq!(
            design_current(100.0, LoadType::Heater, DutyCycle::Continuous).unwrap(),
            125.0
        );
        // neither motor nor continuous: no margin
        assert_eq!(
            design_current(15.0, LoadType::General, DutyCycle::Intermittent).unwrap(),
            15.0
        );
    }

    #[test]
    fn test_design_current_rejects_non_positive() {
        assert!(design_current(0.0, LoadType::Motor, DutyCycle::Continuous).is_err());
        assert!(design_current(-5.0, LoadType::General, DutyCycle::Intermittent).is_err());
    }

    #[test]
    fn test_load_current_dispatch() {
        use crate::factors::Phases;

        let load = Load::new("Compressor", 75.0, 415.0, Phases::Three)
            .with_power_factor(0.85)
            .with_efficiency(0.92)
            .with_load_type(LoadType::Motor);
        let result = load_current(&load).unwrap();

        assert_eq!(result.current_a, 133.43);
        assert_eq!(result.design_current_a, round2(133.43 * 1.25));
        // S = P/η = 75/0.92
        assert_eq!(result.apparent_power_kva, 81.52);

        let heater = Load::new("Trace heating", 3.0, 230.0, Phases::Single)
            .with_power_factor(1.0)
            .with_efficiency(1.0)
            .with_load_type(LoadType::Heater)
            .with_duty_cycle(DutyCycle::Intermittent);
        let result = load_current(&heater).unwrap();
        assert_eq!(result.current_a, 13.04);
        assert_eq!(result.design_current_a, 13.04);
    }
}
