//! # volt_core - Electrical Calculation Engine
//!
//! `volt_core` computes electrical currents, cable sizes, voltage drops and
//! protective-device ratings for industrial/commercial loads under multiple
//! wiring standards (IEC, IS, NEC). All inputs and outputs are
//! JSON-serializable, making the crate straightforward to drive from UIs,
//! importers and AI assistants alike.
//!
//! ## Design Philosophy
//!
//! - **Stateless**: calculators are pure functions; the engine's only side
//!   effect is writing computed fields onto the entity passed in
//! - **JSON-First**: all types implement Serialize/Deserialize
//! - **Rich Errors**: structured error types, not just strings
//! - **Explicit policies**: table saturation, interpolation clamping and
//!   capacity escalation are flagged in results, never hidden in defaults
//!
//! ## Quick Start
//!
//! ```rust
//! use volt_core::calculations::ElectricalCalculationEngine;
//! use volt_core::factors::{LoadType, Phases};
//! use volt_core::model::Load;
//!
//! let engine = ElectricalCalculationEngine::new("IEC").unwrap();
//! let mut load = Load::new("Compressor M-301", 75.0, 415.0, Phases::Three)
//!     .with_power_factor(0.85)
//!     .with_efficiency(0.92)
//!     .with_load_type(LoadType::Motor);
//!
//! engine.calculate_load(&mut load).unwrap();
//! println!("{}: {:.2} A, {} mm² cable, {} A breaker",
//!     load.name,
//!     load.current_a.unwrap(),
//!     load.cable_size_sqmm.unwrap(),
//!     load.breaker_rating_a.unwrap());
//! ```
//!
//! ## Modules
//!
//! - [`standards`] - the IEC/IS/NEC lookup tables behind one trait
//! - [`calculations`] - current, voltage drop, cable sizing, breaker
//!   selection and the orchestrating engine
//! - [`model`] - the Load/Cable/Breaker entities
//! - [`factors`] - classification enums and sizing margins
//! - [`project`] - project container, metadata and settings
//! - [`units`] - type-safe unit wrappers
//! - [`errors`] - structured error types
//! - [`file_io`] - atomic saves and file locking

pub mod calculations;
pub mod errors;
pub mod factors;
pub mod file_io;
pub mod model;
pub mod project;
pub mod standards;
pub mod units;

// Re-export commonly used types at crate root for convenience
pub use calculations::{ElectricalCalculationEngine, ValidationReport};
pub use errors::{CalcError, CalcResult};
pub use file_io::{load_project, save_project, FileLock};
pub use model::{Breaker, BreakerCurve, BreakerType, Cable, Load};
pub use project::{GlobalSettings, Project, ProjectMetadata};
pub use standards::{get_standard, StandardKind, WiringStandard};
