//! Durable signal storage.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::warn;

use iv_core::{SignalAttrs, SignalProfile};

use crate::key::{StorageKey, RECORD_EXT};
use crate::pattern::SearchPattern;
use crate::{StoreError, StoreResult};

/// Filesystem-backed store: one JSON record per leaf file, directories
/// encoding power, mode, temperature, and fan speed in that order.
#[derive(Clone)]
pub struct SignalStore {
    root_dir: PathBuf,
}

impl SignalStore {
    pub fn new(root_dir: PathBuf) -> StoreResult<Self> {
        if !root_dir.exists() {
            fs::create_dir_all(&root_dir)?;
        }
        Ok(Self { root_dir })
    }

    pub fn root_dir(&self) -> &Path {
        &self.root_dir
    }

    /// On-disk location of a tuple's record, whether or not one exists.
    pub fn path_for(&self, attrs: &SignalAttrs) -> PathBuf {
        self.root_dir
            .join(StorageKey::for_attrs(attrs).relative_path())
    }

    /// Persist a profile at its attribute-derived key, replacing any
    /// prior record for the same tuple.
    ///
    /// The record is written to a sibling temp file and renamed into
    /// place, so an interrupted write never leaves a torn record at the
    /// final path.
    pub fn put(&self, profile: &SignalProfile) -> StoreResult<PathBuf> {
        if profile.pulses.is_empty() {
            return Err(StoreError::EmptyPulses);
        }

        let path = self.path_for(&profile.attrs);
        let dir = path.parent().ok_or_else(|| StoreError::InvalidKey {
            key: StorageKey::for_attrs(&profile.attrs).to_string(),
        })?;
        fs::create_dir_all(dir)?;

        let record = serde_json::to_string_pretty(profile)?;
        let tmp_path = path.with_extension(format!("{}.tmp", RECORD_EXT));
        fs::write(&tmp_path, record)?;
        fs::rename(&tmp_path, &path)?;

        Ok(path)
    }

    /// Direct lookup by computed key; no scanning.
    pub fn get_exact(&self, attrs: &SignalAttrs) -> StoreResult<SignalProfile> {
        let path = self.path_for(attrs);
        if !path.exists() {
            return Err(StoreError::NotFound {
                key: StorageKey::for_attrs(attrs).to_string(),
            });
        }
        let content = fs::read_to_string(path)?;
        let profile = serde_json::from_str(&content)?;
        Ok(profile)
    }

    /// Remove the record at the tuple's key.
    pub fn delete(&self, attrs: &SignalAttrs) -> StoreResult<()> {
        let path = self.path_for(attrs);
        if !path.exists() {
            return Err(StoreError::NotFound {
                key: StorageKey::for_attrs(attrs).to_string(),
            });
        }
        fs::remove_file(path)?;
        Ok(())
    }

    /// Walk the storage hierarchy depth-first and yield every record
    /// whose key satisfies `pattern`.
    ///
    /// Single-pass: each call re-walks from the root. Enumeration order
    /// is filesystem order and not stable across platforms; callers may
    /// rely on set membership only. Unreadable directories and
    /// malformed records are skipped with a warning.
    pub fn list_matching(&self, pattern: &SearchPattern) -> MatchingProfiles {
        MatchingProfiles {
            root_dir: self.root_dir.clone(),
            pattern: pattern.clone(),
            stack: vec![self.root_dir.clone()],
        }
    }

    /// Every stored profile; feeds the in-memory index.
    pub fn list_all(&self) -> MatchingProfiles {
        self.list_matching(&SearchPattern::match_all())
    }
}

/// Lazy depth-first walk over matching records.
pub struct MatchingProfiles {
    root_dir: PathBuf,
    pattern: SearchPattern,
    stack: Vec<PathBuf>,
}

impl MatchingProfiles {
    fn record_at(&self, path: &Path) -> Option<SignalProfile> {
        if path.extension().and_then(|e| e.to_str()) != Some(RECORD_EXT) {
            return None;
        }
        let relative = path.strip_prefix(&self.root_dir).ok()?;
        let key = StorageKey::from_relative_path(relative)?;
        if !self.pattern.matches(&key) {
            return None;
        }
        match fs::read_to_string(path).map_err(StoreError::from).and_then(
            |content| Ok(serde_json::from_str::<SignalProfile>(&content)?),
        ) {
            Ok(profile) => Some(profile),
            Err(err) => {
                warn!(path = %path.display(), error = %err, "skipping unreadable record");
                None
            }
        }
    }
}

impl Iterator for MatchingProfiles {
    type Item = SignalProfile;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(path) = self.stack.pop() {
            if path.is_dir() {
                match fs::read_dir(&path) {
                    Ok(entries) => {
                        for entry in entries.flatten() {
                            self.stack.push(entry.path());
                        }
                    }
                    Err(err) => {
                        warn!(path = %path.display(), error = %err, "skipping unreadable directory");
                    }
                }
                continue;
            }
            if let Some(profile) = self.record_at(&path) {
                return Some(profile);
            }
        }
        None
    }
}
