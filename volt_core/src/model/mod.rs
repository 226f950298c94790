//! # Entity Model
//!
//! The three entities the engine computes against:
//!
//! - [`Load`] - a consumer with electrical and installation parameters,
//!   plus the computed fields the engine fills in
//! - [`Cable`] - a cable run with geometry and construction
//! - [`Breaker`] - a selected protective device
//!
//! Entities are created by upstream layers (spreadsheet ingestion, UI) with
//! base parameters already range-validated; computed fields start unset and
//! are written exclusively by the calculation engine.

pub mod breaker;
pub mod cable;
pub mod load;

pub use breaker::{Breaker, BreakerCurve, BreakerType};
pub use cable::Cable;
pub use load::Load;
