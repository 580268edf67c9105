//! # File I/O Module
//!
//! Project file operations:
//! - **Atomic saves**: write to a `.tmp` sibling, fsync, then rename over the target
//! - **File locking**: advisory OS lock plus a `.lock` sidecar naming the holder
//! - **Version validation**: refuse files written by an incompatible schema
//!
//! ## File Format
//!
//! Projects are saved as `.psc` files containing pretty-printed JSON. The lock
//! sidecar for `girder.psc` is `girder.psc.lock`.
//!
//! ## Example
//!
//! ```rust,no_run
//! use prestress_core::file_io::{save_project, load_project, FileLock};
//! use prestress_core::project::Project;
//! use std::path::Path;
//!
//! let project = Project::new("Engineer", "25-001", "Viaduct");
//! let path = Path::new("viaduct.psc");
//!
//! let lock = FileLock::acquire(path, "engineer@company.com").unwrap();
//! save_project(&project, path).unwrap();
//! drop(lock);
//!
//! let reloaded = load_project(path).unwrap();
//! assert_eq!(reloaded.meta.job_id, "25-001");
//! ```

use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use fs2::FileExt;
use serde::{Deserialize, Serialize};

use crate::errors::{CalcError, CalcResult};
use crate::project::{Project, SCHEMA_VERSION};

/// Project file extension
pub const PROJECT_EXTENSION: &str = "psc";

/// Locks older than this are treated as abandoned
const STALE_LOCK_HOURS: i64 = 24;

/// Map an I/O error to a FileError for `path`
fn io_err<'a>(operation: &'static str, path: &'a Path) -> impl FnOnce(std::io::Error) -> CalcError + 'a {
    move |e| CalcError::file_error(operation, path.display().to_string(), e.to_string())
}

/// Append `suffix` to the full file name (`a.psc` -> `a.psc.lock`)
fn sibling_path(path: &Path, suffix: &str) -> PathBuf {
    let mut name = path.file_name().map(|n| n.to_os_string()).unwrap_or_default();
    name.push(suffix);
    path.with_file_name(name)
}

/// Contents of a `.lock` sidecar
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LockInfo {
    /// User identifier (email or username)
    pub user_id: String,
    /// Machine where the lock was taken
    pub machine: String,
    /// Process holding the lock
    pub pid: u32,
    /// When the lock was acquired
    pub locked_at: DateTime<Utc>,
}

impl LockInfo {
    /// Lock info for the current process
    pub fn new(user_id: impl Into<String>) -> Self {
        LockInfo {
            user_id: user_id.into(),
            machine: hostname().unwrap_or_else(|| "unknown".to_string()),
            pid: std::process::id(),
            locked_at: Utc::now(),
        }
    }

    /// True when the holder is gone or the lock is too old to trust
    pub fn is_stale(&self) -> bool {
        if Utc::now() - self.locked_at > chrono::Duration::hours(STALE_LOCK_HOURS) {
            return true;
        }
        match hostname() {
            Some(machine) if machine == self.machine => !process_alive(self.pid),
            _ => false,
        }
    }
}

fn hostname() -> Option<String> {
    #[cfg(windows)]
    {
        std::env::var("COMPUTERNAME").ok()
    }
    #[cfg(not(windows))]
    {
        std::env::var("HOSTNAME").ok().or_else(|| std::env::var("HOST").ok())
    }
}

/// Whether a process on this machine is still running
fn process_alive(pid: u32) -> bool {
    #[cfg(target_os = "linux")]
    {
        Path::new(&format!("/proc/{}", pid)).exists()
    }
    #[cfg(not(target_os = "linux"))]
    {
        // No cheap portable check; rely on the age limit
        let _ = pid;
        true
    }
}

/// Exclusive lock on a project file, released on drop.
///
/// Combines an OS-level advisory lock (fs2) on the sidecar with the
/// [`LockInfo`] written inside it, so other users can see who holds it.
#[derive(Debug)]
pub struct FileLock {
    project_path: PathBuf,
    lock_path: PathBuf,
    /// Keeps the OS lock alive
    _lock_file: File,
    pub info: LockInfo,
}

impl FileLock {
    /// Acquire an exclusive lock on a project file.
    ///
    /// # Errors
    ///
    /// * `CalcError::FileLocked` - a live holder already has the lock
    /// * `CalcError::FileError` - the sidecar could not be written
    pub fn acquire(path: &Path, user_id: impl Into<String>) -> CalcResult<Self> {
        if let Some(existing) = FileLock::check(path) {
            return Err(CalcError::file_locked(
                path.display().to_string(),
                format!("{} ({})", existing.user_id, existing.machine),
                existing.locked_at.to_rfc3339(),
            ));
        }

        let lock_path = sibling_path(path, ".lock");
        let info = LockInfo::new(user_id);

        let mut lock_file = OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(true)
            .open(&lock_path)
            .map_err(io_err("create lock", &lock_path))?;

        lock_file
            .try_lock_exclusive()
            .map_err(|_| CalcError::file_locked(path.display().to_string(), "another process", "unknown"))?;

        lock_file
            .write_all(serde_json::to_string_pretty(&info)?.as_bytes())
            .map_err(io_err("write lock", &lock_path))?;
        lock_file.sync_all().map_err(io_err("sync lock", &lock_path))?;

        tracing::info!(path = %path.display(), user = %info.user_id, "Acquired project lock");

        Ok(FileLock {
            project_path: path.to_path_buf(),
            lock_path,
            _lock_file: lock_file,
            info,
        })
    }

    /// Current live lock holder, if any, without acquiring.
    pub fn check(path: &Path) -> Option<LockInfo> {
        let contents = fs::read_to_string(sibling_path(path, ".lock")).ok()?;
        let info: LockInfo = serde_json::from_str(&contents).ok()?;
        (!info.is_stale()).then_some(info)
    }

    /// Path to the locked project file
    pub fn project_path(&self) -> &Path {
        &self.project_path
    }
}

impl Drop for FileLock {
    fn drop(&mut self) {
        let _ = fs::remove_file(&self.lock_path);
        tracing::debug!(path = %self.project_path.display(), "Released project lock");
    }
}

/// Save a project atomically.
///
/// Serializes to JSON, writes `<path>.tmp`, syncs it to disk, and renames it
/// over `path`. An interrupted save leaves the previous file intact.
pub fn save_project(project: &Project, path: &Path) -> CalcResult<()> {
    let json = serde_json::to_string_pretty(project)?;
    let tmp_path = sibling_path(path, ".tmp");

    let write_tmp = || -> CalcResult<()> {
        let mut tmp_file = File::create(&tmp_path).map_err(io_err("create temp file", &tmp_path))?;
        tmp_file
            .write_all(json.as_bytes())
            .map_err(io_err("write temp file", &tmp_path))?;
        tmp_file.sync_all().map_err(io_err("sync temp file", &tmp_path))?;
        fs::rename(&tmp_path, path).map_err(io_err("rename to final", path))
    };

    write_tmp().inspect_err(|_| {
        let _ = fs::remove_file(&tmp_path);
    })?;

    tracing::info!(path = %path.display(), items = project.item_count(), "Saved project");
    Ok(())
}

/// Load a project and check its schema version.
///
/// # Errors
///
/// * `CalcError::FileError` - the file could not be read
/// * `CalcError::SerializationError` - the file is not a valid project
/// * `CalcError::VersionMismatch` - written by an incompatible schema
pub fn load_project(path: &Path) -> CalcResult<Project> {
    let contents = fs::read_to_string(path).map_err(io_err("read", path))?;

    let project: Project = serde_json::from_str(&contents).map_err(|e| CalcError::SerializationError {
        reason: format!("Invalid project file {}: {}", path.display(), e),
    })?;
    validate_version(&project.meta.version)?;

    tracing::info!(path = %path.display(), items = project.item_count(), "Loaded project");
    Ok(project)
}

/// Load a project along with the current lock holder, if any.
pub fn load_project_with_lock_check(path: &Path) -> CalcResult<(Project, Option<LockInfo>)> {
    let project = load_project(path)?;
    Ok((project, FileLock::check(path)))
}

/// Accept files with the same major version; within 0.x the file's minor
/// version must not be newer than ours.
fn validate_version(file_version: &str) -> CalcResult<()> {
    let parse = |v: &str| -> Option<(u32, u32)> {
        let mut parts = v.split('.').map(|p| p.parse::<u32>().ok());
        Some((parts.next()??, parts.next().flatten().unwrap_or(0)))
    };
    let mismatch = || CalcError::VersionMismatch {
        file_version: file_version.to_string(),
        expected_version: SCHEMA_VERSION.to_string(),
    };

    let (file_major, file_minor) = parse(file_version).ok_or_else(mismatch)?;
    let (our_major, our_minor) = parse(SCHEMA_VERSION).ok_or_else(mismatch)?;

    if file_major != our_major || (our_major == 0 && file_minor > our_minor) {
        return Err(mismatch());
    }
    Ok(())
}
