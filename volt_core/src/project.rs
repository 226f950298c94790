//! # Project Data Structures
//!
//! The `Project` struct is the root container for a design: metadata,
//! engine settings and the load schedule. Projects serialize to `.vfy`
//! files as human-readable JSON.
//!
//! ## Structure
//!
//! ```text
//! Project
//! ├── meta: ProjectMetadata (version, engineer, job info, timestamps)
//! ├── settings: GlobalSettings (wiring standard, site ambient, drop limit)
//! └── loads: HashMap<Uuid, Load> (the load schedule)
//! ```
//!
//! ## Example
//!
//! ```rust
//! use volt_core::project::Project;
//!
//! let project = Project::new("Jane Engineer", "26-042", "ACME Process");
//! let json = serde_json::to_string_pretty(&project).unwrap();
//! assert!(json.contains("26-042"));
//! ```

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::model::Load;
use crate::standards::StandardKind;

/// Current schema version for .vfy files
pub const SCHEMA_VERSION: &str = "0.1.0";

/// Root project container.
///
/// Loads are stored in a flat UUID-keyed map for O(1) lookup and stable
/// references when the schedule is reordered upstream.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Project {
    /// Project metadata (version, engineer, job info)
    pub meta: ProjectMetadata,

    /// Engine settings for this project
    pub settings: GlobalSettings,

    /// The load schedule, keyed by load id
    pub loads: HashMap<Uuid, Load>,
}

impl Project {
    /// Create a new empty project.
    pub fn new(
        engineer: impl Into<String>,
        job_id: impl Into<String>,
        client: impl Into<String>,
    ) -> Self {
        let now = Utc::now();
        Project {
            meta: ProjectMetadata {
                version: SCHEMA_VERSION.to_string(),
                engineer: engineer.into(),
                job_id: job_id.into(),
                client: client.into(),
                created: now,
                modified: now,
            },
            settings: GlobalSettings::default(),
            loads: HashMap::new(),
        }
    }

    /// Add a load to the schedule, keyed by its own id.
    pub fn add_load(&mut self, load: Load) -> Uuid {
        let id = load.id;
        self.loads.insert(id, load);
        self.touch();
        id
    }

    /// Remove a load from the schedule.
    pub fn remove_load(&mut self, id: &Uuid) -> Option<Load> {
        let removed = self.loads.remove(id);
        if removed.is_some() {
            self.touch();
        }
        removed
    }

    /// Update the modified timestamp.
    pub fn touch(&mut self) {
        self.meta.modified = Utc::now();
    }

    /// Total connected power of the schedule, kW
    pub fn total_power_kw(&self) -> f64 {
        self.loads.values().map(|l| l.power_kw).sum()
    }
}

/// Project metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectMetadata {
    /// Schema version of the file format
    pub version: String,
    /// Responsible engineer
    pub engineer: String,
    /// Job/project number (e.g. "26-001")
    pub job_id: String,
    /// Client name
    pub client: String,
    /// Creation timestamp
    pub created: DateTime<Utc>,
    /// Last-modified timestamp
    pub modified: DateTime<Utc>,
}

/// Engine settings shared by all calculations in a project.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GlobalSettings {
    /// Wiring standard the project is designed under
    pub standard: StandardKind,
    /// Site ambient temperature, °C
    pub ambient_temp_c: f64,
    /// Default voltage drop limit for cable sizing, percent
    pub max_voltage_drop_percent: f64,
}

impl Default for GlobalSettings {
    fn default() -> Self {
        GlobalSettings {
            standard: StandardKind::Iec,
            ambient_temp_c: 40.0,
            max_voltage_drop_percent: 5.0,
        }
    }
}
