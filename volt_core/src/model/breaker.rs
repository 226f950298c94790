//! # Breaker Entity
//!
//! A selected protective device: rating, family, tripping curve and
//! breaking capacity. The selection algorithm lives in
//! `calculations::breaker_selection`; this module owns the vocabulary.

use serde::{Deserialize, Serialize};

use crate::factors::LoadType;

/// Circuit breaker family, by current rating and voltage class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BreakerType {
    /// Miniature circuit breaker, LV up to 100 A
    Mcb,
    /// Molded case circuit breaker, LV up to 1600 A
    Mccb,
    /// Air circuit breaker, LV above 1600 A
    Acb,
    /// Vacuum circuit breaker, MV (1 kV - 36 kV)
    Vcb,
    /// SF6 circuit breaker, HV (above 36 kV)
    Sf6,
}

impl BreakerType {
    /// All breaker families
    pub const ALL: [BreakerType; 5] = [
        BreakerType::Mcb,
        BreakerType::Mccb,
        BreakerType::Acb,
        BreakerType::Vcb,
        BreakerType::Sf6,
    ];

    /// Display name for UI and reports
    pub fn display_name(&self) -> &'static str {
        match self {
            BreakerType::Mcb => "MCB",
            BreakerType::Mccb => "MCCB",
            BreakerType::Acb => "ACB",
            BreakerType::Vcb => "VCB",
            BreakerType::Sf6 => "SF6",
        }
    }
}

impl std::fmt::Display for BreakerType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// MCB tripping curve.
///
/// B trips at 3-5× rated current, C at 5-10×, D at 10-20×. K and Z exist
/// in the vocabulary for imported equipment lists; selection only produces
/// B, C and D.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BreakerCurve {
    B,
    C,
    D,
    K,
    Z,
}

impl BreakerCurve {
    /// All curves
    pub const ALL: [BreakerCurve; 5] = [
        BreakerCurve::B,
        BreakerCurve::C,
        BreakerCurve::D,
        BreakerCurve::K,
        BreakerCurve::Z,
    ];

    /// Curve for a load category: resistive loads trip early (B),
    /// inrush-heavy loads late (D), everything else C.
    pub fn for_load(load_type: LoadType) -> Self {
        match load_type {
            LoadType::Lighting | LoadType::Heater => BreakerCurve::B,
            LoadType::Motor | LoadType::Transformer => BreakerCurve::D,
            LoadType::General | LoadType::Ups | LoadType::Hvac => BreakerCurve::C,
            _ => BreakerCurve::C,
        }
    }

    /// Display name
    pub fn display_name(&self) -> &'static str {
        match self {
            BreakerCurve::B => "B",
            BreakerCurve::C => "C",
            BreakerCurve::D => "D",
            BreakerCurve::K => "K",
            BreakerCurve::Z => "Z",
        }
    }
}

impl std::fmt::Display for BreakerCurve {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// A selected protective device.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Breaker {
    /// Rated current, A
    pub rating_a: f64,

    /// System voltage, V
    pub voltage: f64,

    /// Pole count: 3 for three-phase, 1 for single-phase
    pub poles: u8,

    /// Rated breaking capacity, kA
    pub breaking_capacity_ka: f64,

    /// Device family
    pub breaker_type: BreakerType,

    /// Tripping curve
    pub curve: BreakerCurve,
}
