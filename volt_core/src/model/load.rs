//! # Load Entity
//!
//! A single electrical consumer: base parameters supplied at construction,
//! computed fields written in place by the calculation engine.
//!
//! ## JSON Example
//!
//! ```json
//! {
//!   "id": "6f3a2e9c-0000-0000-0000-000000000000",
//!   "name": "Compressor M-301",
//!   "power_kw": 75.0,
//!   "voltage": 415.0,
//!   "phases": "Three",
//!   "power_factor": 0.85,
//!   "efficiency": 0.92,
//!   "load_type": "Motor",
//!   "duty_cycle": "Continuous",
//!   "cable_length_m": 120.0,
//!   "installation_method": "Tray",
//!   "grouping_factor": 1.0
//! }
//! ```

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::{CalcError, CalcResult};
use crate::factors::{DutyCycle, InstallationMethod, LoadType, Phases};
use crate::model::breaker::{BreakerCurve, BreakerType};

/// A single electrical load.
///
/// Base parameters are validated once at construction and never relaxed;
/// the `Option` fields are computed results, unset until the engine writes
/// them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Load {
    /// Stable identity
    pub id: Uuid,

    /// User label (e.g. "Compressor M-301")
    pub name: String,

    /// Rated shaft/output power in kW
    pub power_kw: f64,

    /// Nominal system voltage in volts
    pub voltage: f64,

    /// Supply phases
    pub phases: Phases,

    /// Power factor cos(φ), 0.1 to 1.0
    pub power_factor: f64,

    /// Efficiency, 0.1 to 1.0
    pub efficiency: f64,

    /// Load category
    pub load_type: LoadType,

    /// Duty cycle
    pub duty_cycle: DutyCycle,

    /// Cable run length in metres; 0 means no cable run to size
    pub cable_length_m: f64,

    /// How the cable is installed
    pub installation_method: InstallationMethod,

    /// Grouping derating factor, 0.3 to 1.0
    pub grouping_factor: f64,

    // ------------------------------------------------------------------
    // Computed fields - written exclusively by the calculation engine
    // ------------------------------------------------------------------
    /// Full-load current, A
    #[serde(default)]
    pub current_a: Option<f64>,

    /// Design current (margin-inflated), A
    #[serde(default)]
    pub design_current_a: Option<f64>,

    /// Apparent power, kVA
    #[serde(default)]
    pub apparent_power_kva: Option<f64>,

    /// Selected cable cross-section, mm²
    #[serde(default)]
    pub cable_size_sqmm: Option<f64>,

    /// Selected cable core count
    #[serde(default)]
    pub cable_cores: Option<u8>,

    /// Selected cable construction (e.g. "XLPE/SWA/PVC")
    #[serde(default)]
    pub cable_type: Option<String>,

    /// Voltage drop over the run, V
    #[serde(default)]
    pub voltage_drop_v: Option<f64>,

    /// Voltage drop as percent of nominal system voltage
    #[serde(default)]
    pub voltage_drop_percent: Option<f64>,

    /// Selected breaker rating, A
    #[serde(default)]
    pub breaker_rating_a: Option<f64>,

    /// Selected breaker family
    #[serde(default)]
    pub breaker_type: Option<BreakerType>,

    /// Selected tripping curve
    #[serde(default)]
    pub breaker_curve: Option<BreakerCurve>,
}

impl Load {
    /// Create a load with sensible defaults for the secondary parameters
    /// (power factor 0.85, efficiency 0.9, general/continuous, 10 m run in
    /// conduit, no grouping).
    pub fn new(name: impl Into<String>, power_kw: f64, voltage: f64, phases: Phases) -> Self {
        Load {
            id: Uuid::new_v4(),
            name: name.into(),
            power_kw,
            voltage,
            phases,
            power_factor: 0.85,
            efficiency: 0.9,
            load_type: LoadType::General,
            duty_cycle: DutyCycle::Continuous,
            cable_length_m: 10.0,
            installation_method: InstallationMethod::Conduit,
            grouping_factor: 1.0,
            current_a: None,
            design_current_a: None,
            apparent_power_kva: None,
            cable_size_sqmm: None,
            cable_cores: None,
            cable_type: None,
            voltage_drop_v: None,
            voltage_drop_percent: None,
            breaker_rating_a: None,
            breaker_type: None,
            breaker_curve: None,
        }
    }

    pub fn with_power_factor(mut self, power_factor: f64) -> Self {
        self.power_factor = power_factor;
        self
    }

    pub fn with_efficiency(mut self, efficiency: f64) -> Self {
        self.efficiency = efficiency;
        self
    }

    pub fn with_load_type(mut self, load_type: LoadType) -> Self {
        self.load_type = load_type;
        self
    }

    pub fn with_duty_cycle(mut self, duty_cycle: DutyCycle) -> Self {
        self.duty_cycle = duty_cycle;
        self
    }

    pub fn with_cable_run(mut self, length_m: f64, method: InstallationMethod) -> Self {
        self.cable_length_m = length_m;
        self.installation_method = method;
        self
    }

    pub fn with_grouping_factor(mut self, grouping_factor: f64) -> Self {
        self.grouping_factor = grouping_factor;
        self
    }

    /// Validate base parameters against their documented ranges.
    pub fn validate(&self) -> CalcResult<()> {
        if self.power_kw <= 0.0 {
            return Err(CalcError::invalid_input(
                "power_kw",
                self.power_kw.to_string(),
                "Power must be positive",
            ));
        }
        if self.voltage <= 0.0 {
            return Err(CalcError::invalid_input(
                "voltage",
                self.voltage.to_string(),
                "Voltage must be positive",
            ));
        }
        if !(0.1..=1.0).contains(&self.power_factor) {
            return Err(CalcError::invalid_input(
                "power_factor",
                self.power_factor.to_string(),
                "Power factor must be between 0.1 and 1.0",
            ));
        }
        if !(0.1..=1.0).contains(&self.efficiency) {
            return Err(CalcError::invalid_input(
                "efficiency",
                self.efficiency.to_string(),
                "Efficiency must be between 0.1 and 1.0",
            ));
        }
        // 0 means "no cable run"; an actual run is 0.1 m to 1 km
        if self.cable_length_m != 0.0 && !(0.1..=1000.0).contains(&self.cable_length_m) {
            return Err(CalcError::invalid_input(
                "cable_length_m",
                self.cable_length_m.to_string(),
                "Cable length must be between 0.1 and 1000 m (or 0 for none)",
            ));
        }
        if !(0.3..=1.0).contains(&self.grouping_factor) {
            return Err(CalcError::invalid_input(
                "grouping_factor",
                self.grouping_factor.to_string(),
                "Grouping factor must be between 0.3 and 1.0",
            ));
        }
        Ok(())
    }

    /// "name (id)" for error context
    pub fn ident(&self) -> String {
        format!("{} ({})", self.name, self.id)
    }

    /// Whether the engine has filled the computed fields
    pub fn is_calculated(&self) -> bool {
        self.current_a.is_some() && self.design_current_a.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn motor() -> Load {
        Load::new("Compressor M-301", 75.0, 415.0, Phases::Three)
            .with_power_factor(0.85)
            .with_efficiency(0.92)
            .with_load_type(LoadType::Motor)
    }

    #[test]
    fn test_new_load_has_no_computed_fields() {
        let load = motor();
        assert!(!load.is_calculated());
        assert_eq!(load.current_a, None);
        assert_eq!(load.breaker_type, None);
    }

    #[test]
    fn test_validate_accepts_good_load() {
        assert!(motor().validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_out_of_range() {
        let bad = motor().with_power_factor(0.05);
        assert!(matches!(
            bad.validate().unwrap_err(),
            CalcError::InvalidInput { field, .. } if field == "power_factor"
        ));

        let bad = motor().with_efficiency(1.3);
        assert!(bad.validate().is_err());

        let mut bad = motor();
        bad.cable_length_m = 1500.0;
        assert!(bad.validate().is_err());

        let bad = motor().with_grouping_factor(0.1);
        assert!(bad.validate().is_err());
    }

    #[test]
    fn test_zero_cable_length_means_no_run() {
        let mut load = motor();
        load.cable_length_m = 0.0;
        assert!(load.validate().is_ok());
    }

    #[test]
    fn test_serialization_round_trip() {
        let load = motor();
        let json = serde_json::to_string(&load).unwrap();
        let parsed: Load = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.name, load.name);
        assert_eq!(parsed.power_kw, load.power_kw);
        assert_eq!(parsed.current_a, None);
    }

    #[test]
    fn test_computed_fields_optional_in_json() {
        // upstream layers may omit computed fields entirely
        let json = r#"{
            "id": "6f3a2e9c-1111-2222-3333-444455556666",
            "name": "AHU-2",
            "power_kw": 11.0,
            "voltage": 400.0,
            "phases": "Three",
            "power_factor": 0.8,
            "efficiency": 0.9,
            "load_type": "Hvac",
            "duty_cycle": "Intermittent",
            "cable_length_m": 35.0,
            "installation_method": "Conduit",
            "grouping_factor": 0.8
        }"#;
        let load: Load = serde_json::from_str(json).unwrap();
        assert_eq!(load.current_a, None);
        assert!(load.validate().is_ok());
    }
}
