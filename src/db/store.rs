// SPDX-License-Identifier: MIT
// Copyright 2026 Macrolog Developers

//! Local store with typed operations.
//!
//! Two named records as human-inspectable JSON documents under the data
//! directory:
//! - Profile (single user profile, absent until onboarding completes)
//! - Food log (ordered list of food entries)
//!
//! The in-memory copy is authoritative between writes; every mutation is
//! persisted immediately. Reads and writes are synchronous std::fs calls:
//! there is exactly one writer (the request path) and the records stay
//! small.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard, PoisonError};

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::db::records;
use crate::error::AppError;
use crate::models::{food, FoodItem, UserProfile};

/// Local database handle.
pub struct LocalStore {
    dir: PathBuf,
    profile: Mutex<Option<UserProfile>>,
    log: Mutex<Vec<FoodItem>>,
}

impl LocalStore {
    /// Open the store rooted at `dir`, creating the directory and loading
    /// both records. A missing record is an empty state, not an error.
    pub fn open(dir: impl AsRef<Path>) -> Result<Self, AppError> {
        let dir = dir.as_ref().to_path_buf();
        fs::create_dir_all(&dir)
            .map_err(|e| AppError::Storage(format!("Failed to create data directory: {}", e)))?;

        let profile: Option<UserProfile> = read_record(&dir.join(records::PROFILE))?;
        let log: Vec<FoodItem> = read_record(&dir.join(records::FOOD_LOG))?.unwrap_or_default();

        // Never reissue an id already present in the persisted log.
        if let Some(max_id) = log.iter().map(|e| e.id).max() {
            food::reserve_entry_ids_through(max_id);
        }

        tracing::info!(
            dir = %dir.display(),
            entries = log.len(),
            has_profile = profile.is_some(),
            "Opened local store"
        );

        Ok(Self {
            dir,
            profile: Mutex::new(profile),
            log: Mutex::new(log),
        })
    }

    // ─── Profile Record ──────────────────────────────────────────

    /// Current profile, if onboarding has completed.
    pub fn profile(&self) -> Option<UserProfile> {
        lock(&self.profile).clone()
    }

    /// Replace the profile wholesale.
    pub fn set_profile(&self, profile: UserProfile) -> Result<(), AppError> {
        self.write_record(records::PROFILE, &profile)?;
        *lock(&self.profile) = Some(profile);
        Ok(())
    }

    /// Clear the profile, sending the app back to onboarding. The food log
    /// is untouched.
    pub fn clear_profile(&self) -> Result<(), AppError> {
        let path = self.dir.join(records::PROFILE);
        match fs::remove_file(&path) {
            Ok(()) => {}
            Err(e) if e.kind() == io::ErrorKind::NotFound => {}
            Err(e) => {
                return Err(AppError::Storage(format!(
                    "Failed to remove profile record: {}",
                    e
                )))
            }
        }
        *lock(&self.profile) = None;
        Ok(())
    }

    // ─── Food Log Record ─────────────────────────────────────────

    /// The full food log in insertion order.
    pub fn entries(&self) -> Vec<FoodItem> {
        lock(&self.log).clone()
    }

    /// Append entries and persist. The write happens before the in-memory
    /// commit, so a failed write leaves the log unchanged.
    pub fn append_entries(&self, items: &[FoodItem]) -> Result<(), AppError> {
        let mut log = lock(&self.log);
        let mut next = log.clone();
        next.extend_from_slice(items);
        self.write_record(records::FOOD_LOG, &next)?;
        *log = next;
        Ok(())
    }

    /// Remove the entry with the given id. Returns `false` when no such
    /// entry exists; deleting twice is a no-op, not an error.
    pub fn remove_entry(&self, id: i64) -> Result<bool, AppError> {
        let mut log = lock(&self.log);
        let Some(pos) = log.iter().position(|e| e.id == id) else {
            return Ok(false);
        };
        let mut next = log.clone();
        next.remove(pos);
        self.write_record(records::FOOD_LOG, &next)?;
        *log = next;
        Ok(true)
    }

    fn write_record<T: Serialize>(&self, name: &str, value: &T) -> Result<(), AppError> {
        let json = serde_json::to_string_pretty(value)
            .map_err(|e| AppError::Storage(format!("Failed to serialize {}: {}", name, e)))?;
        fs::write(self.dir.join(name), json)
            .map_err(|e| AppError::Storage(format!("Failed to write {}: {}", name, e)))
    }
}

/// Lock a record mutex, recovering the data from a poisoned lock rather
/// than propagating the panic.
fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

fn read_record<T: DeserializeOwned>(path: &Path) -> Result<Option<T>, AppError> {
    let text = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
        Err(e) => {
            return Err(AppError::Storage(format!(
                "Failed to read {}: {}",
                path.display(),
                e
            )))
        }
    };

    serde_json::from_str(&text).map(Some).map_err(|e| {
        AppError::Storage(format!("Malformed record {}: {}", path.display(), e))
    })
}
