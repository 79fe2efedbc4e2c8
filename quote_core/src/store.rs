//! # JSON Store
//!
//! Flat-file persistence for the three documents the application owns:
//! the business profile, the job store and the usage log. Each is a
//! single JSON file read fully into memory and rewritten fully on
//! every change.
//!
//! Writes are atomic (write to .tmp, fsync, rename) so an interrupted
//! save never corrupts an existing file. There is no locking: the
//! system runs one operator per deployment.
//!
//! ## Files
//!
//! - `business_profile.json` — one `BusinessProfile` object; absence
//!   means setup has not run, deletion is logout.
//! - `jobs.json` — map of job id (timestamp string) to `Job`.
//! - `data_log.json` — append-only array of `UsageLogEntry`.

use std::collections::BTreeMap;
use std::fs::{self, File};
use std::io::{Read, Write};
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::errors::{QuoteError, QuoteResult};
use crate::log::UsageLogEntry;
use crate::profile::BusinessProfile;
use crate::quote::{Job, SCHEMA_VERSION};

const PROFILE_FILE: &str = "business_profile.json";
const JOBS_FILE: &str = "jobs.json";
const LOG_FILE: &str = "data_log.json";

/// Root directory holding the three JSON documents.
#[derive(Debug, Clone)]
pub struct DataDir {
    root: PathBuf,
}

impl DataDir {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        DataDir { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn profile_path(&self) -> PathBuf {
        self.root.join(PROFILE_FILE)
    }

    pub fn jobs_path(&self) -> PathBuf {
        self.root.join(JOBS_FILE)
    }

    pub fn log_path(&self) -> PathBuf {
        self.root.join(LOG_FILE)
    }

    // ------------------------------------------------------------------
    // Profile
    // ------------------------------------------------------------------

    /// Load the business profile, or `None` if setup has not run.
    pub fn load_profile(&self) -> QuoteResult<Option<BusinessProfile>> {
        let path = self.profile_path();
        if !path.exists() {
            return Ok(None);
        }
        let contents = read_file(&path)?;
        let profile: BusinessProfile =
            serde_json::from_str(&contents).map_err(|e| QuoteError::SerializationError {
                reason: format!("Invalid JSON in {}: {}", path.display(), e),
            })?;
        Ok(Some(profile))
    }

    /// Persist the business profile (full replacement).
    ///
    /// Validates required fields before touching disk.
    pub fn save_profile(&self, profile: &BusinessProfile) -> QuoteResult<()> {
        profile.validate()?;
        write_json_atomic(&self.profile_path(), profile)
    }

    /// Delete the profile file. This is the logout mechanism.
    pub fn delete_profile(&self) -> QuoteResult<()> {
        let path = self.profile_path();
        if path.exists() {
            fs::remove_file(&path).map_err(|e| {
                QuoteError::file_error("remove", path.display().to_string(), e.to_string())
            })?;
        }
        Ok(())
    }

    // ------------------------------------------------------------------
    // Jobs
    // ------------------------------------------------------------------

    /// Load every saved job, keyed by id. Missing file means no jobs.
    ///
    /// A job written by a newer schema is rejected with
    /// `VersionMismatch` rather than silently misread.
    pub fn load_jobs(&self) -> QuoteResult<BTreeMap<String, Job>> {
        let path = self.jobs_path();
        if !path.exists() {
            return Ok(BTreeMap::new());
        }
        let contents = read_file(&path)?;
        let jobs: BTreeMap<String, Job> =
            serde_json::from_str(&contents).map_err(|e| QuoteError::SerializationError {
                reason: format!("Invalid JSON in {}: {}", path.display(), e),
            })?;
        for job in jobs.values() {
            validate_version(&job.version)?;
        }
        Ok(jobs)
    }

    /// Load a single job by id.
    pub fn load_job(&self, id: &str) -> QuoteResult<Job> {
        self.load_jobs()?
            .remove(id)
            .ok_or_else(|| QuoteError::job_not_found(id))
    }

    /// Insert a job under its id and rewrite the store.
    ///
    /// An existing job under the same id (two quotes in the same
    /// second) is overwritten.
    pub fn save_job(&self, job: &Job) -> QuoteResult<String> {
        let id = job.job_id();
        let mut jobs = self.load_jobs()?;
        jobs.insert(id.clone(), job.clone());
        write_json_atomic(&self.jobs_path(), &jobs)?;
        debug!(job_id = %id, "saved job");
        Ok(id)
    }

    // ------------------------------------------------------------------
    // Usage log
    // ------------------------------------------------------------------

    /// Load the usage log. Missing file means an empty log.
    pub fn load_log(&self) -> QuoteResult<Vec<UsageLogEntry>> {
        let path = self.log_path();
        if !path.exists() {
            return Ok(Vec::new());
        }
        let contents = read_file(&path)?;
        serde_json::from_str(&contents).map_err(|e| QuoteError::SerializationError {
            reason: format!("Invalid JSON in {}: {}", path.display(), e),
        })
    }

    /// Append one entry to the usage log.
    ///
    /// Entries are only ever appended, never updated or deleted.
    pub fn append_log(&self, entry: &UsageLogEntry) -> QuoteResult<()> {
        let mut log = self.load_log()?;
        log.push(entry.clone());
        write_json_atomic(&self.log_path(), &log)
    }
}

/// Read a file to a string with a structured error.
fn read_file(path: &Path) -> QuoteResult<String> {
    let mut file = File::open(path)
        .map_err(|e| QuoteError::file_error("open", path.display().to_string(), e.to_string()))?;
    let mut contents = String::new();
    file.read_to_string(&mut contents)
        .map_err(|e| QuoteError::file_error("read", path.display().to_string(), e.to_string()))?;
    Ok(contents)
}

/// Serialize a value and write it with atomic semantics.
///
/// The write goes to `<path>.tmp`, is fsynced, then renamed over the
/// final path so an interrupted save leaves the previous file intact.
fn write_json_atomic<T: serde::Serialize>(path: &Path, value: &T) -> QuoteResult<()> {
    let json = serde_json::to_string_pretty(value).map_err(|e| QuoteError::SerializationError {
        reason: e.to_string(),
    })?;

    let tmp_path = tmp_path_for(path);

    let mut tmp_file = File::create(&tmp_path).map_err(|e| {
        QuoteError::file_error("create temp file", tmp_path.display().to_string(), e.to_string())
    })?;

    tmp_file.write_all(json.as_bytes()).map_err(|e| {
        QuoteError::file_error("write temp file", tmp_path.display().to_string(), e.to_string())
    })?;

    tmp_file.sync_all().map_err(|e| {
        QuoteError::file_error("sync temp file", tmp_path.display().to_string(), e.to_string())
    })?;

    fs::rename(&tmp_path, path).map_err(|e| {
        let _ = fs::remove_file(&tmp_path);
        QuoteError::file_error("rename to final", path.display().to_string(), e.to_string())
    })?;

    Ok(())
}

fn tmp_path_for(path: &Path) -> PathBuf {
    let mut tmp = path.as_os_str().to_owned();
    tmp.push(".tmp");
    PathBuf::from(tmp)
}

/// Validate that a persisted job version is compatible with this build.
///
/// Major version must match; for 0.x a newer minor version is rejected
/// as well (breaking changes allowed before 1.0).
fn validate_version(file_version: &str) -> QuoteResult<()> {
    let file_parts: Vec<u32> = file_version
        .split('.')
        .filter_map(|p| p.parse().ok())
        .collect();
    let current_parts: Vec<u32> = SCHEMA_VERSION
        .split('.')
        .filter_map(|p| p.parse().ok())
        .collect();

    if file_parts.is_empty() || current_parts.is_empty() {
        return Err(QuoteError::VersionMismatch {
            file_version: file_version.to_string(),
            expected_version: SCHEMA_VERSION.to_string(),
        });
    }

    if file_parts[0] != current_parts[0] {
        return Err(QuoteError::VersionMismatch {
            file_version: file_version.to_string(),
            expected_version: SCHEMA_VERSION.to_string(),
        });
    }

    if current_parts[0] == 0
        && file_parts.len() > 1
        && current_parts.len() > 1
        && file_parts[1] > current_parts[1]
    {
        return Err(QuoteError::VersionMismatch {
            file_version: file_version.to_string(),
            expected_version: SCHEMA_VERSION.to_string(),
        });
    }

    Ok(())
}
