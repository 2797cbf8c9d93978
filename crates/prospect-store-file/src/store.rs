//! [`FileStore`] and [`MemoryStore`] — the snapshot store backends.

use std::{
  collections::HashMap,
  fs, io,
  path::{Path, PathBuf},
};

use tracing::debug;

use prospect_core::store::SnapshotStore;

use crate::{Error, Result};

// ─── FileStore ───────────────────────────────────────────────────────────────

/// A snapshot store keeping one `<key>.json` file per key under a directory.
///
/// Writes go through a temporary file followed by a rename, so an interrupted
/// write never leaves a torn snapshot behind — the previous one stays intact.
#[derive(Debug, Clone)]
pub struct FileStore {
  dir: PathBuf,
}

impl FileStore {
  /// Open (or create) a store rooted at `dir`.
  pub fn open(dir: impl AsRef<Path>) -> Result<Self> {
    let dir = dir.as_ref().to_path_buf();
    fs::create_dir_all(&dir).map_err(|e| Error::io(&dir, e))?;
    Ok(Self { dir })
  }

  /// The directory this store writes into.
  pub fn dir(&self) -> &Path { &self.dir }

  fn path_for(&self, key: &str) -> Result<PathBuf> {
    // Keys become file names; refuse anything that could escape the dir.
    if key.is_empty()
      || !key
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
    {
      return Err(Error::InvalidKey(key.to_owned()));
    }
    Ok(self.dir.join(format!("{key}.json")))
  }
}

impl SnapshotStore for FileStore {
  type Error = Error;

  fn get(&self, key: &str) -> Result<Option<String>> {
    let path = self.path_for(key)?;
    match fs::read_to_string(&path) {
      Ok(value) => Ok(Some(value)),
      Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
      Err(e) => Err(Error::io(path, e)),
    }
  }

  fn set(&mut self, key: &str, value: &str) -> Result<()> {
    let path = self.path_for(key)?;
    let tmp = self.dir.join(format!(".{key}.json.tmp"));

    fs::write(&tmp, value).map_err(|e| Error::io(&tmp, e))?;
    fs::rename(&tmp, &path).map_err(|e| Error::io(&path, e))?;

    debug!(key, bytes = value.len(), "snapshot written");
    Ok(())
  }
}

// ─── MemoryStore ─────────────────────────────────────────────────────────────

/// An in-memory snapshot store — useful for tests and ephemeral runs.
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
  entries: HashMap<String, String>,
}

impl MemoryStore {
  pub fn new() -> Self { Self::default() }
}

impl SnapshotStore for MemoryStore {
  type Error = std::convert::Infallible;

  fn get(&self, key: &str) -> Result<Option<String>, Self::Error> {
    Ok(self.entries.get(key).cloned())
  }

  fn set(&mut self, key: &str, value: &str) -> Result<(), Self::Error> {
    self.entries.insert(key.to_owned(), value.to_owned());
    Ok(())
  }
}
