//! # IEC 60364 Standard
//!
//! Lookup tables per IEC 60364-5-52 for copper/XLPE (90 °C) cables. This is
//! the base implementation: the IS and NEC variants compose an
//! [`IecStandard`] and delegate the figures they share.
//!
//! ## Tables
//!
//! - Voltage drop limits: IEC 60364-5-52 Annex G
//! - Temperature correction (30 °C reference ambient): Table B.52.14
//! - Grouping reduction: Table B.52.17
//! - Ampacity by installation method: Tables B.52.4/B.52.5 (methods B1, E, D)
//!
//! Resistance is derived analytically from copper resistivity corrected to
//! the 90 °C conductor temperature; reactance comes from a fixed per-size
//! table with a flat fallback.

use crate::errors::{CalcError, CalcResult};
use crate::factors::{CableMaterial, CircuitType, InstallationMethod};

use super::{
    copper_resistance_ohm_per_km, floor_factor, interpolate, WiringStandard, DEFAULT_REACTANCE,
};

/// Ampacity row: size (mm²) and base current for the three method columns.
struct AmpacityRow {
    size_sqmm: f64,
    /// Enclosed in conduit or duct (method B1)
    conduit_a: f64,
    /// On tray / clipped in air / free air (method E)
    tray_a: f64,
    /// Direct buried (method D)
    buried_a: f64,
}

const fn row(size_sqmm: f64, conduit_a: f64, tray_a: f64, buried_a: f64) -> AmpacityRow {
    AmpacityRow {
        size_sqmm,
        conduit_a,
        tray_a,
        buried_a,
    }
}

/// Copper/XLPE ampacities per installation method, amperes at 30 °C ambient.
const AMPACITY: [AmpacityRow; 17] = [
    row(1.5, 17.5, 22.0, 22.0),
    row(2.5, 24.0, 30.0, 29.0),
    row(4.0, 32.0, 40.0, 37.0),
    row(6.0, 41.0, 51.0, 46.0),
    row(10.0, 57.0, 70.0, 61.0),
    row(16.0, 76.0, 94.0, 79.0),
    row(25.0, 101.0, 119.0, 101.0),
    row(35.0, 125.0, 148.0, 122.0),
    row(50.0, 151.0, 180.0, 144.0),
    row(70.0, 192.0, 232.0, 178.0),
    row(95.0, 232.0, 282.0, 211.0),
    row(120.0, 269.0, 328.0, 240.0),
    row(150.0, 309.0, 379.0, 271.0),
    row(185.0, 353.0, 434.0, 304.0),
    row(240.0, 415.0, 514.0, 351.0),
    row(300.0, 477.0, 593.0, 396.0),
    row(400.0, 545.0, 679.0, 464.0),
];

/// Ambient temperature correction factors, 30 °C reference (Table B.52.14)
const TEMPERATURE_FACTORS: [(f64, f64); 11] = [
    (10.0, 1.15),
    (15.0, 1.12),
    (20.0, 1.08),
    (25.0, 1.04),
    (30.0, 1.00),
    (35.0, 0.96),
    (40.0, 0.91),
    (45.0, 0.87),
    (50.0, 0.82),
    (55.0, 0.76),
    (60.0, 0.71),
];

/// Grouping reduction factors (Table B.52.17); beyond 20 cables the last
/// value holds
const GROUPING_FACTORS: [(u32, f64); 12] = [
    (1, 1.00),
    (2, 0.80),
    (3, 0.70),
    (4, 0.65),
    (5, 0.60),
    (6, 0.57),
    (7, 0.54),
    (8, 0.52),
    (9, 0.50),
    (12, 0.45),
    (16, 0.41),
    (20, 0.38),
];

/// Reactance by size, Ω/km (single-core in trefoil, typical XLPE figures)
const REACTANCE: [(f64, f64); 17] = [
    (1.5, 0.118),
    (2.5, 0.109),
    (4.0, 0.101),
    (6.0, 0.0955),
    (10.0, 0.0861),
    (16.0, 0.0817),
    (25.0, 0.0813),
    (35.0, 0.0783),
    (50.0, 0.0779),
    (70.0, 0.0751),
    (95.0, 0.0762),
    (120.0, 0.0740),
    (150.0, 0.0745),
    (185.0, 0.0742),
    (240.0, 0.0752),
    (300.0, 0.0750),
    (400.0, 0.0742),
];

/// IEC 60364 lookup tables.
#[derive(Debug, Clone, Copy, Default)]
pub struct IecStandard;

impl IecStandard {
    pub fn new() -> Self {
        IecStandard
    }

    /// Ampacity table row for a size: exact match, otherwise the next
    /// smaller conductor (conservative), flooring at the smallest entry.
    fn ampacity_row(size_sqmm: f64) -> &'static AmpacityRow {
        let mut selected = &AMPACITY[0];
        for row in &AMPACITY {
            if row.size_sqmm <= size_sqmm {
                selected = row;
            } else {
                break;
            }
        }
        selected
    }
}

impl WiringStandard for IecStandard {
    fn name(&self) -> &'static str {
        "IEC"
    }

    fn voltage_drop_limit(&self, circuit: CircuitType) -> f64 {
        match circuit {
            CircuitType::Lighting => 3.0,
            CircuitType::Power | CircuitType::Motor => 5.0,
            // circuit categories IEC does not name take the power limit
            CircuitType::Branch | CircuitType::Feeder | CircuitType::Combined => 5.0,
        }
    }

    fn temperature_factor(&self, ambient_c: f64) -> f64 {
        interpolate(&TEMPERATURE_FACTORS, ambient_c)
    }

    fn grouping_factor(&self, cable_count: u32) -> f64 {
        floor_factor(&GROUPING_FACTORS, cable_count)
    }

    fn installation_factor(&self, method: InstallationMethod) -> f64 {
        match method {
            InstallationMethod::Air | InstallationMethod::FreeAir => 1.0,
            InstallationMethod::Tray => 0.95,
            InstallationMethod::Conduit => 0.90,
            InstallationMethod::Buried => 0.85,
            InstallationMethod::Duct => 0.80,
        }
    }

    fn cable_current_capacity(
        &self,
        size_sqmm: f64,
        method: InstallationMethod,
        ambient_c: f64,
    ) -> f64 {
        let row = Self::ampacity_row(size_sqmm);
        let base = match method {
            InstallationMethod::Conduit | InstallationMethod::Duct => row.conduit_a,
            InstallationMethod::Tray | InstallationMethod::Air | InstallationMethod::FreeAir => {
                row.tray_a
            }
            InstallationMethod::Buried => row.buried_a,
        };
        base * self.temperature_factor(ambient_c)
    }

    fn cable_resistance(&self, size_sqmm: f64, material: CableMaterial) -> CalcResult<f64> {
        if size_sqmm <= 0.0 {
            return Err(CalcError::invalid_input(
                "size_sqmm",
                size_sqmm.to_string(),
                "Cable size must be positive",
            ));
        }
        match material {
            CableMaterial::Copper => Ok(copper_resistance_ohm_per_km(size_sqmm)),
            CableMaterial::Aluminium => {
                Err(CalcError::unsupported_material(material.display_name()))
            }
        }
    }

    fn cable_reactance(&self, size_sqmm: f64) -> f64 {
        REACTANCE
            .iter()
            .find(|(size, _)| (size - size_sqmm).abs() < 1e-6)
            .map(|&(_, x)| x)
            .unwrap_or(DEFAULT_REACTANCE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_voltage_drop_limits() {
        let std = IecStandard::new();
        assert_eq!(std.voltage_drop_limit(CircuitType::Lighting), 3.0);
        assert_eq!(std.voltage_drop_limit(CircuitType::Power), 5.0);
        assert_eq!(std.voltage_drop_limit(CircuitType::Motor), 5.0);
        // unnamed categories default to the power limit
        assert_eq!(std.voltage_drop_limit(CircuitType::Feeder), 5.0);
    }

    #[test]
    fn test_temperature_factor_exact_and_interpolated() {
        let std = IecStandard::new();
        assert_eq!(std.temperature_factor(30.0), 1.00);
        assert_eq!(std.temperature_factor(40.0), 0.91);
        // midway between 40 and 45
        assert!((std.temperature_factor(42.5) - 0.89).abs() < 1e-9);
    }

    #[test]
    fn test_temperature_factor_saturates() {
        let std = IecStandard::new();
        assert_eq!(std.temperature_factor(-10.0), 1.15);
        assert_eq!(std.temperature_factor(85.0), 0.71);
    }

    #[test]
    fn test_grouping_factor_floors() {
        let std = IecStandard::new();
        assert_eq!(std.grouping_factor(1), 1.00);
        assert_eq!(std.grouping_factor(4), 0.65);
        // 10 cables: between the 9 and 12 entries, takes the 9-cable value
        assert_eq!(std.grouping_factor(10), 0.50);
        // far beyond the table: smallest tabulated value
        assert_eq!(std.grouping_factor(50), 0.38);
    }

    #[test]
    fn test_ampacity_by_method() {
        let std = IecStandard::new();
        // 30 °C: no temperature correction
        assert_eq!(
            std.cable_current_capacity(25.0, InstallationMethod::Conduit, 30.0),
            101.0
        );
        assert_eq!(
            std.cable_current_capacity(25.0, InstallationMethod::Tray, 30.0),
            119.0
        );
        assert_eq!(
            std.cable_current_capacity(25.0, InstallationMethod::Buried, 30.0),
            101.0
        );
    }

    #[test]
    fn test_ampacity_temperature_corrected() {
        let std = IecStandard::new();
        let base = std.cable_current_capacity(95.0, InstallationMethod::Tray, 30.0);
        let hot = std.cable_current_capacity(95.0, InstallationMethod::Tray, 45.0);
        assert!((hot - base * 0.87).abs() < 1e-9);
    }

    #[test]
    fn test_ampacity_off_table_sizes() {
        let std = IecStandard::new();
        // below the smallest size: floors at the 1.5 mm² row
        assert_eq!(
            std.cable_current_capacity(1.0, InstallationMethod::Conduit, 30.0),
            17.5
        );
        // between rows: takes the next smaller conductor
        assert_eq!(
            std.cable_current_capacity(30.0, InstallationMethod::Conduit, 30.0),
            101.0
        );
        // beyond the largest: holds the 400 mm² rating
        assert_eq!(
            std.cable_current_capacity(630.0, InstallationMethod::Conduit, 30.0),
            545.0
        );
    }

    #[test]
    fn test_cable_resistance_copper_only() {
        let std = IecStandard::new();
        let r = std.cable_resistance(1.5, CableMaterial::Copper).unwrap();
        assert!((r - 14.66).abs() < 0.01);

        let err = std
            .cable_resistance(1.5, CableMaterial::Aluminium)
            .unwrap_err();
        assert!(matches!(err, CalcError::UnsupportedMaterial { .. }));

        let err = std.cable_resistance(0.0, CableMaterial::Copper).unwrap_err();
        assert!(matches!(err, CalcError::InvalidInput { .. }));
    }

    #[test]
    fn test_cable_reactance_with_fallback() {
        let std = IecStandard::new();
        assert_eq!(std.cable_reactance(25.0), 0.0813);
        // size not in the table falls back to the flat default
        assert_eq!(std.cable_reactance(33.0), DEFAULT_REACTANCE);
    }
}
