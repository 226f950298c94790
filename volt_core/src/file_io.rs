//! # File I/O
//!
//! Project file operations with the safety features shared drives need:
//!
//! - **Atomic saves**: write to a `.tmp` sibling, verify it parses, then
//!   rename over the target, so a crash mid-save never corrupts the file
//! - **File locking**: an OS-level exclusive lock plus a JSON sidecar with
//!   holder metadata, so two engineers don't silently overwrite each other
//! - **Version validation**: schema version checked on load
//!
//! Projects are saved as `.vfy` files containing JSON; lock sidecars use
//! the `.vfy.lock` extension.
//!
//! ## Example
//!
//! ```rust,no_run
//! use volt_core::file_io::{load_project, save_project, FileLock};
//! use volt_core::project::Project;
//! use std::path::Path;
//!
//! let project = Project::new("Engineer", "26-001", "Client");
//! let path = Path::new("myproject.vfy");
//!
//! let lock = FileLock::acquire(path, "engineer@company.com").unwrap();
//! save_project(&project, path).unwrap();
//! drop(lock); // released
//! ```

use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use fs2::FileExt;
use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};
use crate::project::{Project, SCHEMA_VERSION};

/// Holder metadata stored in `.vfy.lock` sidecars.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LockInfo {
    /// User identifier (email or username)
    pub user_id: String,
    /// Process id holding the lock
    pub pid: u32,
    /// When the lock was acquired
    pub locked_at: DateTime<Utc>,
}

/// Exclusive lock on a project file, released on drop.
///
/// The sidecar file carries the OS lock (via fs2) and the holder metadata
/// for other users to see.
#[derive(Debug)]
pub struct FileLock {
    lock_path: PathBuf,
    lock_file: File,
    /// Who holds the lock
    pub info: LockInfo,
}

impl FileLock {
    /// Acquire an exclusive lock on a project file.
    ///
    /// # Errors
    ///
    /// `FileLocked` with the holder's metadata when another process holds
    /// the lock; `FileError` for I/O failures.
    pub fn acquire(project_path: &Path, user_id: impl Into<String>) -> CalcResult<Self> {
        let lock_path = lock_path_for(project_path);
        let lock_file = OpenOptions::new()
            .create(true)
            .read(true)
            .write(true)
            .truncate(false)
            .open(&lock_path)
            .map_err(|e| CalcError::file_error("open lock", lock_path.display().to_string(), e.to_string()))?;

        if lock_file.try_lock_exclusive().is_err() {
            // somebody else holds it; report who, if the sidecar is readable
            let holder = fs::read_to_string(&lock_path)
                .ok()
                .and_then(|s| serde_json::from_str::<LockInfo>(&s).ok());
            let (locked_by, locked_at) = match holder {
                Some(info) => (info.user_id, info.locked_at.to_rfc3339()),
                None => ("unknown".to_string(), "unknown".to_string()),
            };
            return Err(CalcError::FileLocked {
                path: project_path.display().to_string(),
                locked_by,
                locked_at,
            });
        }

        let info = LockInfo {
            user_id: user_id.into(),
            pid: std::process::id(),
            locked_at: Utc::now(),
        };
        let json = serde_json::to_string_pretty(&info)
            .map_err(|e| CalcError::serialization(e.to_string()))?;
        (&lock_file)
            .set_len(0)
            .and_then(|_| (&lock_file).write_all(json.as_bytes()))
            .map_err(|e| {
                CalcError::file_error("write lock", lock_path.display().to_string(), e.to_string())
            })?;

        Ok(FileLock {
            lock_path,
            lock_file,
            info,
        })
    }
}

impl Drop for FileLock {
    fn drop(&mut self) {
        let _ = fs2::FileExt::unlock(&self.lock_file);
        let _ = fs::remove_file(&self.lock_path);
    }
}

fn lock_path_for(project_path: &Path) -> PathBuf {
    let mut name = project_path
        .file_name()
        .map(|n| n.to_os_string())
        .unwrap_or_default();
    name.push(".lock");
    project_path.with_file_name(name)
}

/// Save a project atomically.
///
/// Writes to a `.tmp` sibling, re-parses it to verify the write, then
/// renames over the target.
pub fn save_project(project: &Project, path: &Path) -> CalcResult<()> {
    let json = serde_json::to_string_pretty(project)
        .map_err(|e| CalcError::serialization(e.to_string()))?;

    let tmp_path = path.with_extension("vfy.tmp");
    fs::write(&tmp_path, &json)
        .map_err(|e| CalcError::file_error("write", tmp_path.display().to_string(), e.to_string()))?;

    // verify the bytes on disk parse back before replacing the target
    let written = fs::read_to_string(&tmp_path)
        .map_err(|e| CalcError::file_error("verify", tmp_path.display().to_string(), e.to_string()))?;
    serde_json::from_str::<Project>(&written)
        .map_err(|e| CalcError::serialization(format!("verification failed: {e}")))?;

    fs::rename(&tmp_path, path)
        .map_err(|e| CalcError::file_error("rename", path.display().to_string(), e.to_string()))?;
    Ok(())
}

/// Load a project, validating the schema version.
///
/// # Errors
///
/// `VersionMismatch` when the file's major.minor version differs from
/// [`SCHEMA_VERSION`]; `FileError`/`SerializationError` otherwise.
pub fn load_project(path: &Path) -> CalcResult<Project> {
    let json = fs::read_to_string(path)
        .map_err(|e| CalcError::file_error("read", path.display().to_string(), e.to_string()))?;
    let project: Project =
        serde_json::from_str(&json).map_err(|e| CalcError::serialization(e.to_string()))?;

    if !versions_compatible(&project.meta.version, SCHEMA_VERSION) {
        return Err(CalcError::VersionMismatch {
            file_version: project.meta.version.clone(),
            expected_version: SCHEMA_VERSION.to_string(),
        });
    }
    Ok(project)
}

/// Same major.minor means compatible; the patch component may differ.
fn versions_compatible(file: &str, expected: &str) -> bool {
    let prefix = |v: &str| {
        let mut parts = v.split('.');
        (
            parts.next().unwrap_or("").to_string(),
            parts.next().unwrap_or("").to_string(),
        )
    };
    prefix(file) == prefix(expected)
}
