//! # Schedule Files
//!
//! Saves and loads [`TestSchedule`]s as `.ems` JSON files:
//! - **Atomic saves**: write to `.ems.tmp`, fsync, rename over the target
//! - **File locking**: `.ems.lock` sidecar plus an OS lock, so two people on a
//!   shared drive cannot edit the same schedule at once
//! - **Version validation**: refuse files written by a newer schema
//!
//! ## Example
//!
//! ```rust,no_run
//! use calc_core::file_io::{save_schedule, load_schedule, FileLock};
//! use calc_core::schedule::TestSchedule;
//! use std::path::Path;
//!
//! let schedule = TestSchedule::new("Sam Spark", "J-1042", "Unit 4 Workshop");
//! let path = Path::new("unit4.ems");
//!
//! let lock = FileLock::acquire(path, "sam@sparks.co.uk")?;
//! save_schedule(&schedule, path)?;
//! drop(lock);
//!
//! let loaded = load_schedule(path)?;
//! assert_eq!(loaded.meta.job_ref, "J-1042");
//! # Ok::<(), calc_core::errors::CalcError>(())
//! ```

use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use fs2::FileExt;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::errors::{CalcError, CalcResult};
use crate::schedule::{TestSchedule, SCHEMA_VERSION};

/// Contents of a `.ems.lock` sidecar
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LockInfo {
    /// Who holds the lock (email or username)
    pub user_id: String,
    pub machine: String,
    pub pid: u32,
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

    /// A lock is stale when its process is gone (same machine only) or it is
    /// older than a working day.
    fn is_stale(&self) -> bool {
        if hostname().as_deref() == Some(self.machine.as_str()) && !process_alive(self.pid) {
            return true;
        }
        (Utc::now() - self.locked_at).num_hours() > 24
    }
}

fn hostname() -> Option<String> {
    #[cfg(windows)]
    {
        std::env::var("COMPUTERNAME").ok()
    }
    #[cfg(not(windows))]
    {
        std::env::var("HOSTNAME")
            .ok()
            .or_else(|| std::env::var("HOST").ok())
    }
}

#[cfg(unix)]
fn process_alive(pid: u32) -> bool {
    Path::new(&format!("/proc/{}", pid)).exists()
}

#[cfg(not(unix))]
fn process_alive(_pid: u32) -> bool {
    // Without a cheap liveness probe, fall back to the age check
    true
}

/// Exclusive edit lock on a schedule file, released on drop.
pub struct FileLock {
    schedule_path: PathBuf,
    lock_path: PathBuf,
    /// Keeps the OS-level lock alive
    _handle: File,
    pub info: LockInfo,
}

impl FileLock {
    /// Acquire the edit lock for `path`.
    ///
    /// Fails with [`CalcError::FileLocked`] if someone else holds a live lock.
    pub fn acquire(path: &Path, user_id: impl Into<String>) -> CalcResult<Self> {
        let lock_path = lock_path_for(path);
        let path_str = path.display().to_string();

        if let Some(existing) = FileLock::check(path) {
            return Err(CalcError::file_locked(
                path_str,
                format!("{} ({})", existing.user_id, existing.machine),
                existing.locked_at.to_rfc3339(),
            ));
        }

        let lock_err = |op: &str, e: std::io::Error| {
            CalcError::file_error(op, lock_path.display().to_string(), e.to_string())
        };

        let mut handle = OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(true)
            .open(&lock_path)
            .map_err(|e| lock_err("create lock", e))?;

        handle
            .try_lock_exclusive()
            .map_err(|_| CalcError::file_locked(path_str.clone(), "another process", "unknown"))?;

        let info = LockInfo::new(user_id);
        let json = serde_json::to_string_pretty(&info).map_err(|e| CalcError::serialization(e.to_string()))?;
        handle
            .write_all(json.as_bytes())
            .map_err(|e| lock_err("write lock", e))?;
        handle.sync_all().map_err(|e| lock_err("sync lock", e))?;

        info!(path = %path_str, user = %info.user_id, "schedule lock acquired");

        Ok(FileLock {
            schedule_path: path.to_path_buf(),
            lock_path,
            _handle: handle,
            info,
        })
    }

    /// Who holds a live lock on `path`, if anyone.
    pub fn check(path: &Path) -> Option<LockInfo> {
        read_lock_info(&lock_path_for(path))
            .ok()
            .filter(|info| !info.is_stale())
    }

    pub fn schedule_path(&self) -> &Path {
        &self.schedule_path
    }
}

impl Drop for FileLock {
    fn drop(&mut self) {
        if let Err(e) = fs::remove_file(&self.lock_path) {
            warn!(path = %self.lock_path.display(), error = %e, "failed to remove lock file");
        }
    }
}

/// `job.ems` -> `job.ems.lock`
fn lock_path_for(schedule_path: &Path) -> PathBuf {
    let extension = schedule_path
        .extension()
        .map(|e| format!("{}.lock", e.to_string_lossy()))
        .unwrap_or_else(|| "lock".to_string());
    schedule_path.with_extension(extension)
}

fn read_text(path: &Path, operation: &str) -> CalcResult<String> {
    fs::read_to_string(path)
        .map_err(|e| CalcError::file_error(operation, path.display().to_string(), e.to_string()))
}

fn read_lock_info(lock_path: &Path) -> CalcResult<LockInfo> {
    let contents = read_text(lock_path, "read lock")?;
    serde_json::from_str(&contents).map_err(|e| CalcError::serialization(e.to_string()))
}

/// Save a schedule with atomic write semantics.
///
/// The JSON is written to `<path>.tmp`, synced, then renamed over `path`,
/// so an interrupted save never leaves a half-written schedule behind.
pub fn save_schedule(schedule: &TestSchedule, path: &Path) -> CalcResult<()> {
    let json = serde_json::to_string_pretty(schedule).map_err(|e| CalcError::serialization(e.to_string()))?;
    let tmp_path = path.with_extension("ems.tmp");
    let tmp_err = |op: &str, e: std::io::Error| {
        CalcError::file_error(op, tmp_path.display().to_string(), e.to_string())
    };

    let mut tmp_file = File::create(&tmp_path).map_err(|e| tmp_err("create temp file", e))?;
    tmp_file
        .write_all(json.as_bytes())
        .map_err(|e| tmp_err("write temp file", e))?;
    tmp_file.sync_all().map_err(|e| tmp_err("sync temp file", e))?;

    if let Err(e) = fs::rename(&tmp_path, path) {
        let _ = fs::remove_file(&tmp_path);
        return Err(CalcError::file_error("rename to final", path.display().to_string(), e.to_string()));
    }

    info!(
        path = %path.display(),
        entries = schedule.entry_count(),
        "schedule saved"
    );
    Ok(())
}

/// Load a schedule, rejecting incompatible schema versions.
pub fn load_schedule(path: &Path) -> CalcResult<TestSchedule> {
    let contents = read_text(path, "open")?;
    let schedule: TestSchedule = serde_json::from_str(&contents)
        .map_err(|e| CalcError::serialization(format!("Invalid JSON in {}: {}", path.display(), e)))?;

    validate_version(&schedule.meta.version)?;

    info!(
        path = %path.display(),
        entries = schedule.entry_count(),
        "schedule loaded"
    );
    Ok(schedule)
}

/// Load a schedule along with the current lock holder, if any.
///
/// A locked schedule can still be opened read-only.
pub fn load_schedule_with_lock_check(path: &Path) -> CalcResult<(TestSchedule, Option<LockInfo>)> {
    let schedule = load_schedule(path)?;
    Ok((schedule, FileLock::check(path)))
}

/// Major versions must match; while on 0.x a newer minor is also rejected.
fn validate_version(file_version: &str) -> CalcResult<()> {
    let parse = |v: &str| -> Vec<u32> { v.split('.').filter_map(|p| p.parse().ok()).collect() };
    let file = parse(file_version);
    let current = parse(SCHEMA_VERSION);

    let mismatch = || CalcError::VersionMismatch {
        file_version: file_version.to_string(),
        expected_version: SCHEMA_VERSION.to_string(),
    };

    match (file.as_slice(), current.as_slice()) {
        ([], _) | (_, []) => Err(mismatch()),
        ([f_major, ..], [c_major, ..]) if f_major != c_major => Err(mismatch()),
        ([0, f_minor, ..], [0, c_minor, ..]) if f_minor > c_minor => Err(mismatch()),
        _ => Ok(()),
    }
}
