//! # NEC (NFPA 70) Standard
//!
//! NEC conductor data is tabulated by AWG/kcmil size, not metric
//! cross-section, so [`NecStandard`] buckets a metric query to the next
//! larger tabulated conductor before looking up ampacity. Queries beyond the
//! largest tabulated conductor fall back to a linear approximation of the
//! table's own trend (see [`LINEAR_AMPACITY_PER_SQMM`]).
//!
//! ## Tables
//!
//! - Ampacity, raceway: Table 310.16, 90 °C column
//! - Ampacity, free air: Table 310.17, 90 °C column
//! - Temperature correction (30 °C reference): 310.15(B)(1)
//! - Bundling adjustment: 310.15(C)(1)
//! - Voltage drop: the 3% branch / 5% combined informational note to
//!   210.19(A)
//!
//! Conductor resistance and reactance are analytic/metric and shared with
//! the IEC implementation via a held instance.

use once_cell::sync::Lazy;

use crate::errors::CalcResult;
use crate::factors::{CableMaterial, CircuitType, InstallationMethod};

use super::{floor_factor, interpolate, IecStandard, WiringStandard};

/// Linear ampacity approximation beyond the largest tabulated conductor,
/// amperes per mm² (raceway column trend at 750 kcmil)
pub const LINEAR_AMPACITY_PER_SQMM: f64 = 1.3;

/// Free-air ampacities run roughly 20% above the raceway column
const FREE_AIR_SCALE: f64 = 1.2;

/// A tabulated conductor: AWG/kcmil designation, metric equivalent and the
/// 90 °C ampacity columns.
#[derive(Debug, Clone)]
struct Conductor {
    designation: &'static str,
    size_sqmm: f64,
    /// Table 310.16 (raceway/cable/earth)
    raceway_a: f64,
    /// Table 310.17 (free air)
    free_air_a: f64,
}

/// AWG/kcmil conductor table, copper, 90 °C insulation, ascending by size.
static CONDUCTORS: Lazy<Vec<Conductor>> = Lazy::new(|| {
    let c = |designation, size_sqmm, raceway_a, free_air_a| Conductor {
        designation,
        size_sqmm,
        raceway_a,
        free_air_a,
    };
    vec![
        c("14 AWG", 2.08, 25.0, 35.0),
        c("12 AWG", 3.31, 30.0, 40.0),
        c("10 AWG", 5.26, 40.0, 55.0),
        c("8 AWG", 8.37, 55.0, 80.0),
        c("6 AWG", 13.3, 75.0, 105.0),
        c("4 AWG", 21.2, 95.0, 140.0),
        c("3 AWG", 26.7, 115.0, 165.0),
        c("2 AWG", 33.6, 130.0, 190.0),
        c("1 AWG", 42.4, 145.0, 220.0),
        c("1/0 AWG", 53.5, 170.0, 260.0),
        c("2/0 AWG", 67.4, 195.0, 300.0),
        c("3/0 AWG", 85.0, 225.0, 350.0),
        c("4/0 AWG", 107.2, 260.0, 405.0),
        c("250 kcmil", 127.0, 290.0, 455.0),
        c("300 kcmil", 152.0, 320.0, 505.0),
        c("350 kcmil", 177.0, 350.0, 570.0),
        c("400 kcmil", 203.0, 380.0, 615.0),
        c("500 kcmil", 253.0, 430.0, 700.0),
        c("600 kcmil", 304.0, 475.0, 780.0),
        c("750 kcmil", 380.0, 535.0, 885.0),
    ]
});

/// Ambient temperature correction, 30 °C reference, 90 °C column
/// (310.15(B)(1))
const TEMPERATURE_FACTORS: [(f64, f64); 10] = [
    (25.0, 1.04),
    (30.0, 1.00),
    (35.0, 0.96),
    (40.0, 0.91),
    (45.0, 0.87),
    (50.0, 0.82),
    (55.0, 0.76),
    (60.0, 0.71),
    (70.0, 0.58),
    (80.0, 0.41),
];

/// Bundling adjustment for more than three current-carrying conductors
/// (310.15(C)(1))
const BUNDLING_FACTORS: [(u32, f64); 7] = [
    (1, 1.00),
    (4, 0.80),
    (7, 0.70),
    (10, 0.50),
    (21, 0.45),
    (31, 0.40),
    (41, 0.35),
];

/// NEC conductor tables; metric impedance data delegated to a held IEC
/// instance.
#[derive(Debug, Clone, Copy, Default)]
pub struct NecStandard {
    iec: IecStandard,
}

impl NecStandard {
    pub fn new() -> Self {
        NecStandard {
            iec: IecStandard::new(),
        }
    }

    /// Bucket a metric cross-section to the next larger tabulated conductor.
    ///
    /// Returns `None` beyond the largest entry; callers fall back to the
    /// linear approximation.
    fn bucket(size_sqmm: f64) -> Option<&'static Conductor> {
        CONDUCTORS.iter().find(|c| c.size_sqmm >= size_sqmm)
    }

    /// The tabulated AWG/kcmil designation a metric size buckets to, for
    /// reporting
    pub fn awg_designation(size_sqmm: f64) -> Option<&'static str> {
        Self::bucket(size_sqmm).map(|c| c.designation)
    }
}

impl WiringStandard for NecStandard {
    fn name(&self) -> &'static str {
        "NEC"
    }

    fn voltage_drop_limit(&self, circuit: CircuitType) -> f64 {
        match circuit {
            CircuitType::Branch | CircuitType::Feeder => 3.0,
            CircuitType::Combined => 5.0,
            CircuitType::Lighting => 3.0,
            // categories NEC does not name take the branch limit
            CircuitType::Power | CircuitType::Motor => 3.0,
        }
    }

    fn temperature_factor(&self, ambient_c: f64) -> f64 {
        interpolate(&TEMPERATURE_FACTORS, ambient_c)
    }

    fn grouping_factor(&self, cable_count: u32) -> f64 {
        floor_factor(&BUNDLING_FACTORS, cable_count)
    }

    fn installation_factor(&self, method: InstallationMethod) -> f64 {
        match method {
            InstallationMethod::Conduit
            | InstallationMethod::Tray
            | InstallationMethod::Air
            | InstallationMethod::FreeAir => 1.0,
            InstallationMethod::Duct => 0.95,
            InstallationMethod::Buried => 0.90,
        }
    }

    fn cable_current_capacity(
        &self,
        size_sqmm: f64,
        method: InstallationMethod,
        ambient_c: f64,
    ) -> f64 {
        let free_air = matches!(
            method,
            InstallationMethod::Tray | InstallationMethod::Air | InstallationMethod::FreeAir
        );
        let base = match Self::bucket(size_sqmm) {
            Some(conductor) => {
                if free_air {
                    conductor.free_air_a
                } else {
                    conductor.raceway_a
                }
            }
            // beyond 750 kcmil: linear approximation of the table trend
            None => {
                let approx = size_sqmm * LINEAR_AMPACITY_PER_SQMM;
                if free_air {
                    approx * FREE_AIR_SCALE
                } else {
                    approx
                }
            }
        };
        base * self.temperature_factor(ambient_c)
    }

    fn cable_resistance(&self, size_sqmm: f64, material: CableMaterial) -> CalcResult<f64> {
        self.iec.cable_resistance(size_sqmm, material)
    }

    fn cable_reactance(&self, size_sqmm: f64) -> f64 {
        self.iec.cable_reactance(size_sqmm)
    }
}
