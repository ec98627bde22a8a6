//! Cache backend that keeps one file per request identity.
//!
//! The file content is the raw response body and the file's modification time is the moment the
//! entry was stored.

use crate::{CacheEntry, CacheError, CacheKey, ResponseCache};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::fs::{self, File};
use std::io::{ErrorKind, Read, Write};
use std::path::{Path, PathBuf};
use std::time::SystemTime;
use tempfile::NamedTempFile;
use tokio::task::spawn_blocking;
use tracing::{debug, info};

#[derive(Debug, Clone)]
pub struct FileCache {
    dir: PathBuf,
}

impl FileCache {
    /// Open the cache rooted at `dir`, creating the directory if needed.
    pub fn new(dir: impl Into<PathBuf>) -> Result<Self, CacheError> {
        let dir = dir.into();
        let metadata = match fs::metadata(&dir) {
            Ok(m) => m,
            Err(_) => {
                info!(cache.dir = %dir.display(), "Creating the cache directory.");
                fs::create_dir_all(&dir)?;
                fs::metadata(&dir)?
            }
        };
        if metadata.is_file() {
            return Err(CacheError::Directory(format!(
                "Cache directory path is a file: {}",
                dir.display()
            )));
        }
        if metadata.permissions().readonly() {
            return Err(CacheError::Directory(format!(
                "Cache directory path is readonly: {}",
                dir.display()
            )));
        }

        Ok(FileCache { dir })
    }

    fn path_for(&self, key: &CacheKey) -> PathBuf {
        self.dir.join(key.as_str())
    }
}

fn read_entry(path: &Path, key: CacheKey) -> Result<Option<CacheEntry>, CacheError> {
    let mut file = match File::open(path) {
        Ok(f) => f,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(e.into()),
    };
    let modified = file.metadata()?.modified()?;
    let mut payload = Vec::new();
    file.read_to_end(&mut payload)?;

    Ok(Some(CacheEntry {
        key,
        payload,
        stored_at: DateTime::<Utc>::from(modified),
    }))
}

fn write_entry(
    dir: &Path,
    path: &Path,
    payload: &[u8],
    stored_at: SystemTime,
) -> Result<(), CacheError> {
    // Write beside the target and rename into place so readers never see a partial file.
    let mut tmp = NamedTempFile::new_in(dir)?;
    tmp.write_all(payload)?;
    tmp.as_file().sync_all()?;
    tmp.as_file().set_modified(stored_at)?;
    tmp.persist(path).map_err(|e| e.error)?;

    Ok(())
}

#[async_trait]
impl ResponseCache for FileCache {
    async fn load(&self, key: &CacheKey) -> Result<Option<CacheEntry>, CacheError> {
        let path = self.path_for(key);
        let key = key.clone();
        spawn_blocking(move || read_entry(&path, key)).await?
    }

    async fn store(&self, entry: &CacheEntry) -> Result<(), CacheError> {
        let dir = self.dir.clone();
        let path = self.path_for(&entry.key);
        let payload = entry.payload.clone();
        let stored_at = SystemTime::from(entry.stored_at);
        debug!(cache.file = %path.display(), "Writing cache entry.");
        spawn_blocking(move || write_entry(&dir, &path, &payload, stored_at)).await?
    }
}
