use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::time::Duration;

use chrono::{DateTime, Utc};
use log::{debug, warn};
use uuid::Uuid;

use super::{CacheEntry, CacheError, CacheKey};

/// Filesystem-backed response cache for one namespace.
///
/// Each entry lives in `<dir>/<key>.json`. Writes go to a uniquely named
/// temporary file that is then renamed over the target, so readers (including
/// other processes sharing the directory) never see a partial entry and the
/// last writer wins.
#[derive(Debug)]
pub struct FileCache {
    dir: PathBuf,
    default_ttl: Duration,
}

impl FileCache {
    /// Open (creating if needed) the cache directory.
    pub fn open(dir: impl Into<PathBuf>, default_ttl: Duration) -> Result<Self, CacheError> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;
        debug!("Opened response cache at {}", dir.display());
        Ok(Self { dir, default_ttl })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn default_ttl(&self) -> Duration {
        self.default_ttl
    }

    /// Fresh payload for `key`, or `None` when absent or expired.
    pub fn get(&self, key: &CacheKey) -> Option<Vec<u8>> {
        self.get_at(key, Utc::now())
    }

    /// Same as [`get`](Self::get) with an explicit notion of "now".
    ///
    /// Unreadable or corrupt entries are reported and treated as misses.
    pub fn get_at(&self, key: &CacheKey, now: DateTime<Utc>) -> Option<Vec<u8>> {
        let entry = match self.read_entry(key) {
            Ok(Some(entry)) => entry,
            Ok(None) => return None,
            Err(e) => {
                warn!("Ignoring unreadable cache entry {}: {}", key, e);
                return None;
            }
        };

        if entry.is_fresh_at(now) {
            Some(entry.payload)
        } else {
            debug!(
                "Cache entry {} expired at {}",
                key,
                entry.expires_at().to_rfc3339()
            );
            None
        }
    }

    /// Store or overwrite the entry for `key`, stamped with the current time.
    pub fn put(&self, key: &CacheKey, payload: &[u8], ttl: Duration) -> Result<(), CacheError> {
        self.put_at(key, payload, ttl, Utc::now())
    }

    pub fn put_at(
        &self,
        key: &CacheKey,
        payload: &[u8],
        ttl: Duration,
        stored_at: DateTime<Utc>,
    ) -> Result<(), CacheError> {
        let entry = CacheEntry {
            key: key.to_string(),
            payload: payload.to_vec(),
            stored_at,
            ttl,
        };
        let bytes = entry.to_json()?;

        // Parent may have been removed since open (e.g. temp dir cleanup).
        fs::create_dir_all(&self.dir)?;

        let target = self.entry_path(key);
        let tmp = self
            .dir
            .join(format!(".{}.{}.tmp", key, Uuid::new_v4().simple()));
        fs::write(&tmp, bytes)?;
        if let Err(e) = fs::rename(&tmp, &target) {
            let _ = fs::remove_file(&tmp);
            return Err(e.into());
        }
        Ok(())
    }

    /// Drop the entry for `key`, if any.
    pub fn remove(&self, key: &CacheKey) -> Result<(), CacheError> {
        match fs::remove_file(self.entry_path(key)) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }

    fn read_entry(&self, key: &CacheKey) -> Result<Option<CacheEntry>, CacheError> {
        let raw = match fs::read(self.entry_path(key)) {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        let entry = CacheEntry::from_json(&raw)?;
        if entry.key != key.as_str() {
            return Err(CacheError::Corrupt(format!(
                "entry file holds key {}",
                entry.key
            )));
        }
        Ok(Some(entry))
    }

    fn entry_path(&self, key: &CacheKey) -> PathBuf {
        self.dir.join(format!("{}.json", key))
    }
}
