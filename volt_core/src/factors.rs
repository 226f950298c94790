//! # Load Classification & Derating Factors
//!
//! Classification enums for loads, duty cycles, installation conditions and
//! circuit categories, with the sizing margins attached to them.
//!
//! ## Overview
//!
//! The design current used to size cables and protective devices is the load
//! current inflated by the applicable margins:
//!
//! ```text
//! I_design = I_load × max(margin(load_type), margin(duty_cycle))
//! ```
//!
//! Base cable ampacity is reduced by the installation conditions:
//!
//! ```text
//! I_permitted = I_table × C_temp × C_install × C_group
//! ```
//!
//! ## Factor Summary
//!
//! | Factor    | Description            | Typical Values |
//! |-----------|------------------------|----------------|
//! | margin    | Design current margin  | 1.0 or 1.25    |
//! | C_temp    | Ambient temperature    | 0.41 - 1.15    |
//! | C_install | Installation method    | 0.8 - 1.0      |
//! | C_group   | Cable grouping         | 0.35 - 1.0     |
//!
//! The factor tables themselves live with the wiring standards (see the
//! `standards` module); this module owns the classification vocabulary.

use serde::{Deserialize, Serialize};

// ============================================================================
// Code Section References
// ============================================================================

/// Code section references for sizing rules and derating factors.
///
/// These constants provide traceable references to the wiring codes the
/// engine draws its tables from.
pub mod code_ref {
    /// Continuous/motor load design margin
    pub const DESIGN_MARGIN: &str = "IEC 60204-1 / NEC 430.22";
    /// Voltage drop recommendations
    pub const VOLTAGE_DROP: &str = "IEC 60364-5-52 Annex G / NEC 210.19(A) IN 3";
    /// Ambient temperature correction
    pub const TEMPERATURE: &str = "IEC 60364-5-52 Table B.52.14 / NEC 310.15(B)(1)";
    /// Grouping/bundling reduction
    pub const GROUPING: &str = "IEC 60364-5-52 Table B.52.17 / NEC 310.15(C)(1)";
    /// Current-carrying capacity tables
    pub const AMPACITY: &str = "IEC 60364-5-52 Table B.52.4 / NEC Table 310.16";
}

// ============================================================================
// Load Classification
// ============================================================================

/// Load category, driving the design-current margin and the breaker
/// tripping curve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum LoadType {
    /// Motors: inrush-heavy, sized with a 25% margin
    Motor,
    /// Resistive heating
    Heater,
    /// Lighting circuits
    Lighting,
    /// Heating, ventilation, air conditioning
    Hvac,
    /// Uninterruptible power supplies
    Ups,
    /// Transformer feeders: inrush-heavy
    Transformer,
    /// Power factor correction capacitor banks
    Capacitor,
    /// Generator connections
    Generator,
    /// Anything else
    #[default]
    General,
}

impl LoadType {
    /// All load types for UI selection
    pub const ALL: [LoadType; 9] = [
        LoadType::Motor,
        LoadType::Heater,
        LoadType::Lighting,
        LoadType::Hvac,
        LoadType::Ups,
        LoadType::Transformer,
        LoadType::Capacitor,
        LoadType::Generator,
        LoadType::General,
    ];

    /// Design-current margin for this load category.
    ///
    /// Motors carry a 1.25 margin; every other category relies on the
    /// duty-cycle margin alone.
    pub fn design_margin(&self) -> f64 {
        match self {
            LoadType::Motor => 1.25,
            _ => 1.0,
        }
    }

    /// Circuit category used for voltage-drop compliance checks
    pub fn circuit_type(&self) -> CircuitType {
        match self {
            LoadType::Lighting => CircuitType::Lighting,
            LoadType::Motor => CircuitType::Motor,
            _ => CircuitType::Power,
        }
    }

    /// Display name for UI
    pub fn display_name(&self) -> &'static str {
        match self {
            LoadType::Motor => "Motor",
            LoadType::Heater => "Heater",
            LoadType::Lighting => "Lighting",
            LoadType::Hvac => "HVAC",
            LoadType::Ups => "UPS",
            LoadType::Transformer => "Transformer",
            LoadType::Capacitor => "Capacitor",
            LoadType::Generator => "Generator",
            LoadType::General => "General",
        }
    }

    /// Parse from a case-insensitive name (e.g. spreadsheet imports)
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_lowercase().as_str() {
            "motor" => Some(LoadType::Motor),
            "heater" => Some(LoadType::Heater),
            "lighting" => Some(LoadType::Lighting),
            "hvac" => Some(LoadType::Hvac),
            "ups" => Some(LoadType::Ups),
            "transformer" => Some(LoadType::Transformer),
            "capacitor" => Some(LoadType::Capacitor),
            "generator" => Some(LoadType::Generator),
            "general" => Some(LoadType::General),
            _ => None,
        }
    }
}

impl std::fmt::Display for LoadType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Duty cycle per the load schedule.
///
/// Continuous loads (3 hours or more at full current) are sized with the
/// same 1.25 margin motors get.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum DutyCycle {
    /// Runs at full load for 3h+ at a stretch: 1.25 margin
    #[default]
    Continuous,
    /// Regular on/off cycling: no extra margin
    Intermittent,
    /// Brief duty (cranes, actuators): no extra margin
    ShortTime,
}

impl DutyCycle {
    /// All duty cycles for UI selection
    pub const ALL: [DutyCycle; 3] = [
        DutyCycle::Continuous,
        DutyCycle::Intermittent,
        DutyCycle::ShortTime,
    ];

    /// Design-current margin for this duty cycle
    pub fn design_margin(&self) -> f64 {
        match self {
            DutyCycle::Continuous => 1.25,
            DutyCycle::Intermittent | DutyCycle::ShortTime => 1.0,
        }
    }

    /// Display name for UI
    pub fn display_name(&self) -> &'static str {
        match self {
            DutyCycle::Continuous => "Continuous",
            DutyCycle::Intermittent => "Intermittent",
            DutyCycle::ShortTime => "Short-time",
        }
    }

    /// Parse from a case-insensitive name
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_lowercase().as_str() {
            "continuous" => Some(DutyCycle::Continuous),
            "intermittent" => Some(DutyCycle::Intermittent),
            "short_time" | "short-time" | "shorttime" => Some(DutyCycle::ShortTime),
            _ => None,
        }
    }
}

impl std::fmt::Display for DutyCycle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

// ============================================================================
// Installation Conditions
// ============================================================================

/// How the cable run is installed.
///
/// Selects the ampacity column and the installation derating factor. The
/// standards map every variant, so an unnamed method can only appear at the
/// string boundary (`from_name` returns `None` there).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum InstallationMethod {
    /// In conduit on a wall or in a void
    #[default]
    Conduit,
    /// On perforated cable tray
    Tray,
    /// Direct buried in ground
    Buried,
    /// Clipped direct in air
    Air,
    /// In underground duct
    Duct,
    /// Spaced in free air
    FreeAir,
}

impl InstallationMethod {
    /// All installation methods for UI selection
    pub const ALL: [InstallationMethod; 6] = [
        InstallationMethod::Conduit,
        InstallationMethod::Tray,
        InstallationMethod::Buried,
        InstallationMethod::Air,
        InstallationMethod::Duct,
        InstallationMethod::FreeAir,
    ];

    /// Display name for UI
    pub fn display_name(&self) -> &'static str {
        match self {
            InstallationMethod::Conduit => "Conduit",
            InstallationMethod::Tray => "Cable tray",
            InstallationMethod::Buried => "Direct buried",
            InstallationMethod::Air => "Clipped in air",
            InstallationMethod::Duct => "Underground duct",
            InstallationMethod::FreeAir => "Free air",
        }
    }

    /// Parse from a case-insensitive name
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_lowercase().as_str() {
            "conduit" => Some(InstallationMethod::Conduit),
            "tray" => Some(InstallationMethod::Tray),
            "buried" => Some(InstallationMethod::Buried),
            "air" => Some(InstallationMethod::Air),
            "duct" => Some(InstallationMethod::Duct),
            "free_air" | "free-air" | "freeair" => Some(InstallationMethod::FreeAir),
            _ => None,
        }
    }
}

impl std::fmt::Display for InstallationMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

// ============================================================================
// Circuit Category
// ============================================================================

/// Circuit category for voltage-drop limits.
///
/// IEC/IS speak of lighting/power/motor circuits; NEC of branch/feeder and
/// their combination. Each standard maps the variants outside its native
/// vocabulary to its power-equivalent limit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum CircuitType {
    /// Lighting circuit
    Lighting,
    /// General power circuit
    #[default]
    Power,
    /// Motor circuit
    Motor,
    /// NEC branch circuit
    Branch,
    /// NEC feeder
    Feeder,
    /// NEC feeder + branch combined
    Combined,
}

impl CircuitType {
    /// All circuit types
    pub const ALL: [CircuitType; 6] = [
        CircuitType::Lighting,
        CircuitType::Power,
        CircuitType::Motor,
        CircuitType::Branch,
        CircuitType::Feeder,
        CircuitType::Combined,
    ];

    /// Display name for UI
    pub fn display_name(&self) -> &'static str {
        match self {
            CircuitType::Lighting => "Lighting",
            CircuitType::Power => "Power",
            CircuitType::Motor => "Motor",
            CircuitType::Branch => "Branch",
            CircuitType::Feeder => "Feeder",
            CircuitType::Combined => "Combined",
        }
    }

    /// Parse from a case-insensitive name
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_lowercase().as_str() {
            "lighting" => Some(CircuitType::Lighting),
            "power" => Some(CircuitType::Power),
            "motor" => Some(CircuitType::Motor),
            "branch" => Some(CircuitType::Branch),
            "feeder" => Some(CircuitType::Feeder),
            "combined" => Some(CircuitType::Combined),
            _ => None,
        }
    }
}

impl std::fmt::Display for CircuitType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

// ============================================================================
// Conductor Material & Phases
// ============================================================================

/// Conductor material.
///
/// Resistance data exists for copper only; aluminium lookups fail with
/// `UnsupportedMaterial` rather than silently substituting copper values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum CableMaterial {
    #[default]
    Copper,
    Aluminium,
}

impl CableMaterial {
    /// Display name for UI
    pub fn display_name(&self) -> &'static str {
        match self {
            CableMaterial::Copper => "Copper",
            CableMaterial::Aluminium => "Aluminium",
        }
    }
}

impl std::fmt::Display for CableMaterial {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Supply phases.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Phases {
    /// Single-phase (phase + neutral)
    Single,
    /// Three-phase
    #[default]
    Three,
}

impl Phases {
    /// Number of phases: 1 or 3
    pub fn count(&self) -> u8 {
        match self {
            Phases::Single => 1,
            Phases::Three => 3,
        }
    }

    /// Parse from a phase count
    pub fn from_count(count: u8) -> Option<Self> {
        match count {
            1 => Some(Phases::Single),
            3 => Some(Phases::Three),
            _ => None,
        }
    }
}

impl std::fmt::Display for Phases {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}-phase", self.count())
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_type_margins() {
        assert_eq!(LoadType::Motor.design_margin(), 1.25);
        assert_eq!(LoadType::Lighting.design_margin(), 1.0);
        assert_eq!(LoadType::General.design_margin(), 1.0);
    }

    #[test]
    fn test_duty_cycle_margins() {
        assert_eq!(DutyCycle::Continuous.design_margin(), 1.25);
        assert_eq!(DutyCycle::Intermittent.design_margin(), 1.0);
        assert_eq!(DutyCycle::ShortTime.design_margin(), 1.0);
    }

    #[test]
    fn test_circuit_type_for_load() {
        assert_eq!(LoadType::Lighting.circuit_type(), CircuitType::Lighting);
        assert_eq!(LoadType::Motor.circuit_type(), CircuitType::Motor);
        assert_eq!(LoadType::Hvac.circuit_type(), CircuitType::Power);
        assert_eq!(LoadType::Heater.circuit_type(), CircuitType::Power);
    }

    #[test]
    fn test_from_name_case_insensitive() {
        assert_eq!(LoadType::from_name("MOTOR"), Some(LoadType::Motor));
        assert_eq!(LoadType::from_name(" hvac "), Some(LoadType::Hvac));
        assert_eq!(LoadType::from_name("welding"), None);

        assert_eq!(DutyCycle::from_name("short_time"), Some(DutyCycle::ShortTime));
        assert_eq!(
            InstallationMethod::from_name("Free_Air"),
            Some(InstallationMethod::FreeAir)
        );
        assert_eq!(InstallationMethod::from_name("catenary"), None);
        assert_eq!(CircuitType::from_name("feeder"), Some(CircuitType::Feeder));
    }

    #[test]
    fn test_phases() {
        assert_eq!(Phases::Single.count(), 1);
        assert_eq!(Phases::Three.count(), 3);
        assert_eq!(Phases::from_count(3), Some(Phases::Three));
        assert_eq!(Phases::from_count(2), None);
        assert_eq!(Phases::Three.to_string(), "3-phase");
    }

    #[test]
    fn test_serialization_round_trip() {
        let lt = LoadType::Transformer;
        let json = serde_json::to_string(&lt).unwrap();
        let parsed: LoadType = serde_json::from_str(&json).unwrap();
        assert_eq!(lt, parsed);

        let im = InstallationMethod::FreeAir;
        let json = serde_json::to_string(&im).unwrap();
        let parsed: InstallationMethod = serde_json::from_str(&json).unwrap();
        assert_eq!(im, parsed);
    }
}
