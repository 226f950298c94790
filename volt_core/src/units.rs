//! # Unit Types
//!
//! Type-safe wrappers for electrical units. These provide compile-time
//! safety against unit confusion while remaining lightweight (just f64
//! wrappers that serialize as plain numbers).
//!
//! The engine works in SI-derived practical units throughout:
//! - Voltage: volts (V), kilovolts (kV)
//! - Power: watts (W), kilowatts (kW)
//! - Current: amperes (A)
//! - Cable impedance: ohms per kilometre (Ω/km)
//!
//! ## Example
//!
//! ```rust
//! use volt_core::units::{Kilovolts, Volts};
//!
//! let hv = Kilovolts(11.0);
//! let v: Volts = hv.into();
//! assert_eq!(v.0, 11_000.0);
//! ```

use serde::{Deserialize, Serialize};

/// Voltage in volts
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Volts(pub f64);

/// Voltage in kilovolts
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Kilovolts(pub f64);

impl From<Kilovolts> for Volts {
    fn from(kv: Kilovolts) -> Self {
        Volts(kv.0 * 1000.0)
    }
}

impl From<Volts> for Kilovolts {
    fn from(v: Volts) -> Self {
        Kilovolts(v.0 / 1000.0)
    }
}

/// Power in watts
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Watts(pub f64);

/// Power in kilowatts
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Kilowatts(pub f64);

impl From<Kilowatts> for Watts {
    fn from(kw: Kilowatts) -> Self {
        Watts(kw.0 * 1000.0)
    }
}

impl From<Watts> for Kilowatts {
    fn from(w: Watts) -> Self {
        Kilowatts(w.0 / 1000.0)
    }
}

/// Current in amperes
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Amperes(pub f64);

/// Cable impedance component in ohms per kilometre
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OhmsPerKm(pub f64);

impl OhmsPerKm {
    /// Total ohms over a run of the given length in metres
    pub fn over_length_m(&self, length_m: f64) -> f64 {
        self.0 * length_m / 1000.0
    }
}
