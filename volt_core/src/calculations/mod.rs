//! # Calculation Modules
//!
//! The engineering mathematics, one module per concern:
//!
//! - [`current`] - load current, design current, apparent power
//! - [`voltage_drop`] - cable voltage drop and compliance checks
//! - [`cable_sizing`] - two-criteria cable selection
//! - [`breaker_selection`] - protective device selection
//! - [`engine`] - the orchestrator tying them together per load
//!
//! Calculators are free functions over input structs; none of them mutate
//! the entities (the orchestrator writes results back). Every calculator
//! validates its own inputs eagerly and fails fast with a specific error.

pub mod breaker_selection;
pub mod cable_sizing;
pub mod current;
pub mod engine;
pub mod voltage_drop;

pub use breaker_selection::{select_breaker, BreakerSelection, BreakerSelectionInput};
pub use cable_sizing::{select_cable, CableSelection, CableSizingInput, LimitingFactor};
pub use current::{design_current, load_current, single_phase_current, three_phase_current};
pub use engine::{BatchOutcome, ElectricalCalculationEngine, ValidationReport};
pub use voltage_drop::{check_voltage_drop_limit, voltage_drop, VoltageDropInput};

/// Round to 2 decimal places, the reporting precision for currents and
/// powers throughout the engine
pub(crate) fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
