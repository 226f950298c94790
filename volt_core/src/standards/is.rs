//! # Indian Standard (IS 732 / IS 3961)
//!
//! The Indian wiring code adopts the IEC 60364 cable data nearly wholesale;
//! [`IsStandard`] therefore holds an [`IecStandard`] and delegates ampacity,
//! grouping, installation and impedance lookups to it. What it owns:
//!
//! - its voltage drop limits,
//! - a temperature correction table referenced to the 40 °C design ambient
//!   of IS 3961 (IEC tables reference 30 °C).

use crate::errors::CalcResult;
use crate::factors::{CableMaterial, CircuitType, InstallationMethod};

use super::{interpolate, IecStandard, WiringStandard};

/// Ambient temperature correction factors, 40 °C reference (IS 3961)
const TEMPERATURE_FACTORS: [(f64, f64); 7] = [
    (30.0, 1.09),
    (35.0, 1.04),
    (40.0, 1.00),
    (45.0, 0.95),
    (50.0, 0.90),
    (55.0, 0.85),
    (60.0, 0.79),
];

/// Indian Standard tables, composing the IEC base data.
#[derive(Debug, Clone, Copy, Default)]
pub struct IsStandard {
    iec: IecStandard,
}

impl IsStandard {
    pub fn new() -> Self {
        IsStandard {
            iec: IecStandard::new(),
        }
    }
}

impl WiringStandard for IsStandard {
    fn name(&self) -> &'static str {
        "IS"
    }

    fn voltage_drop_limit(&self, circuit: CircuitType) -> f64 {
        match circuit {
            CircuitType::Lighting => 3.0,
            CircuitType::Power | CircuitType::Motor => 5.0,
            // categories IS does not name take the power limit
            CircuitType::Branch | CircuitType::Feeder | CircuitType::Combined => 5.0,
        }
    }

    fn temperature_factor(&self, ambient_c: f64) -> f64 {
        interpolate(&TEMPERATURE_FACTORS, ambient_c)
    }

    fn grouping_factor(&self, cable_count: u32) -> f64 {
        self.iec.grouping_factor(cable_count)
    }

    fn installation_factor(&self, method: InstallationMethod) -> f64 {
        self.iec.installation_factor(method)
    }

    fn cable_current_capacity(
        &self,
        size_sqmm: f64,
        method: InstallationMethod,
        ambient_c: f64,
    ) -> f64 {
        // IEC base table, but corrected with the IS temperature factors
        let iec_base = self.iec.cable_current_capacity(size_sqmm, method, 30.0);
        iec_base * self.temperature_factor(ambient_c)
    }

    fn cable_resistance(&self, size_sqmm: f64, material: CableMaterial) -> CalcResult<f64> {
        self.iec.cable_resistance(size_sqmm, material)
    }

    fn cable_reactance(&self, size_sqmm: f64) -> f64 {
        self.iec.cable_reactance(size_sqmm)
    }
}
