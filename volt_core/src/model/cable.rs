//! # Cable Entity
//!
//! A cable run: construction (cores, insulation, armoring) chosen by
//! voltage band, plus the computed voltage-drop/power-loss fields filled in
//! for an externally supplied current.
//!
//! ## Construction rules
//!
//! | System voltage  | Cores        | Construction                        |
//! |-----------------|--------------|-------------------------------------|
//! | ≤ 1 kV          | 4 (3φ) / 2   | XLPE/PVC, unarmored (SWA if buried) |
//! | 1 kV - 36 kV    | 3            | XLPE/SWA/PVC, armored               |
//! | > 36 kV         | 3            | XLPE/CTS/PVC, copper-tape screened  |

use serde::{Deserialize, Serialize};

use crate::factors::{CableMaterial, InstallationMethod, Phases};
use crate::units::{Kilovolts, Volts};

/// A cable run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Cable {
    /// Number of cores
    pub cores: u8,

    /// Conductor cross-section, mm²
    pub size_sqmm: f64,

    /// Construction designation (e.g. "XLPE/SWA/PVC")
    pub cable_type: String,

    /// Insulation system
    pub insulation: String,

    /// Run length, metres
    pub length_m: f64,

    /// How the cable is installed
    pub installation_method: InstallationMethod,

    /// Steel-wire armored
    pub armored: bool,

    /// Grouping derating factor applied to this run
    pub grouping_factor: f64,

    /// Conductor material
    pub material: CableMaterial,

    // ------------------------------------------------------------------
    // Computed fields - written by the calculation engine
    // ------------------------------------------------------------------
    /// Voltage drop at the supplied current, V
    #[serde(default)]
    pub voltage_drop_v: Option<f64>,

    /// Voltage drop as percent of the 400 V reference
    #[serde(default)]
    pub voltage_drop_percent: Option<f64>,

    /// Resistive power loss at the supplied current, kW
    #[serde(default)]
    pub power_loss_kw: Option<f64>,
}

impl Cable {
    /// Build a cable with construction chosen by voltage band.
    ///
    /// Low voltage gets phases+1 cores for three-phase (neutral/ground) or
    /// two cores single-phase; everything above 1 kV is a 3-core cable.
    /// Buried low-voltage runs force steel-wire armor.
    pub fn for_voltage(
        size_sqmm: f64,
        phases: Phases,
        voltage: f64,
        length_m: f64,
        method: InstallationMethod,
    ) -> Self {
        let lv_limit: Volts = Kilovolts(1.0).into();
        let mv_limit: Volts = Kilovolts(36.0).into();
        let (cores, cable_type, armored) = if voltage <= lv_limit.0 {
            let cores = match phases {
                Phases::Three => 4,
                Phases::Single => 2,
            };
            if method == InstallationMethod::Buried {
                (cores, "XLPE/SWA/PVC", true)
            } else {
                (cores, "XLPE/PVC", false)
            }
        } else if voltage <= mv_limit.0 {
            (3, "XLPE/SWA/PVC", true)
        } else {
            // copper-tape screened for HV
            (3, "XLPE/CTS/PVC", false)
        };

        Cable {
            cores,
            size_sqmm,
            cable_type: cable_type.to_string(),
            insulation: "XLPE".to_string(),
            length_m,
            installation_method: method,
            armored,
            grouping_factor: 1.0,
            material: CableMaterial::Copper,
            voltage_drop_v: None,
            voltage_drop_percent: None,
            power_loss_kw: None,
        }
    }

    /// Phases inferred from the core count (3-core and 4-core runs carry
    /// three-phase circuits)
    pub fn phases(&self) -> Phases {
        if self.cores >= 3 {
            Phases::Three
        } else {
            Phases::Single
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lv_three_phase_is_four_core_unarmored() {
        let cable =
            Cable::for_voltage(35.0, Phases::Three, 415.0, 80.0, InstallationMethod::Tray);
        assert_eq!(cable.cores, 4);
        assert_eq!(cable.cable_type, "XLPE/PVC");
        assert!(!cable.armored);
        assert_eq!(cable.phases(), Phases::Three);
    }

    #[test]
    fn test_lv_single_phase_is_two_core() {
        let cable =
            Cable::for_voltage(2.5, Phases::Single, 230.0, 25.0, InstallationMethod::Conduit);
        assert_eq!(cable.cores, 2);
        assert_eq!(cable.phases(), Phases::Single);
    }

    #[test]
    fn test_buried_lv_forces_armor() {
        let cable =
            Cable::for_voltage(50.0, Phases::Three, 415.0, 150.0, InstallationMethod::Buried);
        assert_eq!(cable.cable_type, "XLPE/SWA/PVC");
        assert!(cable.armored);
    }

    #[test]
    fn test_mv_is_armored_three_core() {
        let cable =
            Cable::for_voltage(95.0, Phases::Three, 11_000.0, 300.0, InstallationMethod::Tray);
        assert_eq!(cable.cores, 3);
        assert_eq!(cable.cable_type, "XLPE/SWA/PVC");
        assert!(cable.armored);
    }

    #[test]
    fn test_hv_is_screened_three_core() {
        let cable =
            Cable::for_voltage(240.0, Phases::Three, 66_000.0, 500.0, InstallationMethod::Buried);
        assert_eq!(cable.cores, 3);
        assert_eq!(cable.cable_type, "XLPE/CTS/PVC");
    }

    #[test]
    fn test_serialization_round_trip() {
        let cable =
            Cable::for_voltage(16.0, Phases::Three, 400.0, 40.0, InstallationMethod::Conduit);
        let json = serde_json::to_string(&cable).unwrap();
        let parsed: Cable = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.cores, cable.cores);
        assert_eq!(parsed.cable_type, cable.cable_type);
        assert_eq!(parsed.power_loss_kw, None);
    }
}
