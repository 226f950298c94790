//! # Wiring Standards
//!
//! Standards abstraction layer: every lookup the calculators need (voltage
//! drop limits, derating factors, ampacity, cable impedance) goes through the
//! [`WiringStandard`] trait, with one concrete implementation per supported
//! code:
//!
//! - [`IecStandard`] - IEC 60364 (owns the base tables)
//! - [`IsStandard`] - Indian Standards, composing a held IEC instance
//! - [`NecStandard`] - NEC, with its own AWG/kcmil conductor tables
//!
//! Standards are stateless value objects: construct once, share freely across
//! threads. Where IS/NEC reuse IEC figures they hold an `IecStandard` and
//! delegate, so every table has exactly one owner.
//!
//! ## Interpolation & saturation policy
//!
//! Piecewise tables interpolate linearly between breakpoints; queries outside
//! a table's range saturate to the nearest edge value rather than failing.
//! Count-keyed tables (grouping) floor to the entry at or below the query and
//! hold the last value beyond the table end. These are documented policies,
//! not error paths.
//!
//! ## Example
//!
//! ```rust
//! use volt_core::standards::get_standard;
//! use volt_core::factors::CircuitType;
//!
//! let standard = get_standard("iec").unwrap();
//! assert_eq!(standard.voltage_drop_limit(CircuitType::Lighting), 3.0);
//! assert_eq!(standard.temperature_factor(40.0), 0.91);
//! ```

pub mod iec;
pub mod is;
pub mod nec;

pub use iec::IecStandard;
pub use is::IsStandard;
pub use nec::NecStandard;

use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};
use crate::factors::{CableMaterial, CircuitType, InstallationMethod};

/// Copper resistivity at 20 °C, Ω·mm²/m
pub const RHO_COPPER_20C: f64 = 0.017241;

/// Copper temperature coefficient of resistance, per °C
pub const ALPHA_COPPER: f64 = 0.00393;

/// Conductor operating temperature for XLPE insulation, °C
pub const CONDUCTOR_TEMP_C: f64 = 90.0;

/// Reactance fallback for sizes absent from the reactance table, Ω/km
pub const DEFAULT_REACTANCE: f64 = 0.08;

/// Capability interface over a wiring standard's lookup tables.
///
/// All methods are pure queries over immutable constant data.
pub trait WiringStandard: Send + Sync + std::fmt::Debug {
    /// Short code name: "IEC", "IS" or "NEC"
    fn name(&self) -> &'static str;

    /// Recommended maximum voltage drop for a circuit category, percent
    fn voltage_drop_limit(&self, circuit: CircuitType) -> f64;

    /// Ampacity correction for ambient temperature, interpolated and
    /// clamped to the table edges
    fn temperature_factor(&self, ambient_c: f64) -> f64;

    /// Ampacity reduction for grouped cables; counts beyond the table
    /// floor at the smallest tabulated value
    fn grouping_factor(&self, cable_count: u32) -> f64;

    /// Ampacity correction for the installation method
    fn installation_factor(&self, method: InstallationMethod) -> f64;

    /// Current-carrying capacity of a copper conductor: method-specific
    /// base table entry times the temperature factor, amperes
    fn cable_current_capacity(
        &self,
        size_sqmm: f64,
        method: InstallationMethod,
        ambient_c: f64,
    ) -> f64;

    /// AC resistance at conductor operating temperature, Ω/km
    fn cable_resistance(&self, size_sqmm: f64, material: CableMaterial) -> CalcResult<f64>;

    /// Reactance, Ω/km; sizes absent from the table get
    /// [`DEFAULT_REACTANCE`]
    fn cable_reactance(&self, size_sqmm: f64) -> f64;
}

/// The supported wiring standards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum StandardKind {
    /// IEC 60364
    #[default]
    Iec,
    /// Indian Standards (IS 732 / IS 3961)
    Is,
    /// NEC (NFPA 70)
    Nec,
}

impl StandardKind {
    /// All supported standards
    pub const ALL: [StandardKind; 3] = [StandardKind::Iec, StandardKind::Is, StandardKind::Nec];

    /// Code name
    pub fn name(&self) -> &'static str {
        match self {
            StandardKind::Iec => "IEC",
            StandardKind::Is => "IS",
            StandardKind::Nec => "NEC",
        }
    }

    /// Parse a case-insensitive standard name
    pub fn from_name(name: &str) -> CalcResult<Self> {
        match name.trim().to_lowercase().as_str() {
            "iec" => Ok(StandardKind::Iec),
            "is" => Ok(StandardKind::Is),
            "nec" => Ok(StandardKind::Nec),
            _ => Err(CalcError::unknown_standard(name)),
        }
    }

    /// Instantiate the standard behind the trait
    pub fn instantiate(&self) -> Box<dyn WiringStandard> {
        match self {
            StandardKind::Iec => Box::new(IecStandard::new()),
            StandardKind::Is => Box::new(IsStandard::new()),
            StandardKind::Nec => Box::new(NecStandard::new()),
        }
    }
}

impl std::fmt::Display for StandardKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Look up a wiring standard by name (case-insensitive).
///
/// # Errors
///
/// `UnknownStandard` for anything other than IEC, IS, NEC.
pub fn get_standard(name: &str) -> CalcResult<Box<dyn WiringStandard>> {
    Ok(StandardKind::from_name(name)?.instantiate())
}

/// Copper AC resistance at conductor operating temperature, Ω/km.
///
/// ρ90 = ρ20 · (1 + α·(90−20)), R = ρ90 / A × 1000.
pub(crate) fn copper_resistance_ohm_per_km(size_sqmm: f64) -> f64 {
    let rho_90 = RHO_COPPER_20C * (1.0 + ALPHA_COPPER * (CONDUCTOR_TEMP_C - 20.0));
    rho_90 / size_sqmm * 1000.0
}

/// Piecewise-linear interpolation over an ascending breakpoint table.
///
/// Exact key hits return the tabulated value; interior queries interpolate
/// between the bracketing breakpoints; queries outside the range saturate to
/// the nearest edge value.
pub(crate) fn interpolate(table: &[(f64, f64)], x: f64) -> f64 {
    debug_assert!(!table.is_empty());

    let (first_key, first_val) = table[0];
    if x <= first_key {
        return first_val;
    }
    let (last_key, last_val) = table[table.len() - 1];
    if x >= last_key {
        return last_val;
    }

    for window in table.windows(2) {
        let (t1, f1) = window[0];
        let (t2, f2) = window[1];
        if x == t1 {
            return f1;
        }
        if x > t1 && x < t2 {
            return f1 + (f2 - f1) * (x - t1) / (t2 - t1);
        }
    }
    last_val
}

/// Count-keyed factor lookup: the entry at or below `count`, flooring at the
/// first entry and holding the last value beyond the table end.
pub(crate) fn floor_factor(table: &[(u32, f64)], count: u32) -> f64 {
    debug_assert!(!table.is_empty());

    let mut value = table[0].1;
    for &(key, factor) in table {
        if count >= key {
            value = factor;
        } else {
            break;
        }
    }
    value
}
