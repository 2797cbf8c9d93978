//! [`ImageStore`] — the image collaborator.
//!
//! Accepts raw image bytes, content-addresses them by SHA-256, and returns an
//! opaque [`ImageRef`] for the record to carry. No binary data ever lives
//! inside a snapshot; records hold only the reference.

use std::{
  fs,
  path::{Path, PathBuf},
};

use sha2::{Digest, Sha256};
use tracing::debug;

use prospect_core::record::ImageRef;

use crate::{Error, Result};

/// Content-addressed image storage under a directory.
#[derive(Debug, Clone)]
pub struct ImageStore {
  dir: PathBuf,
}

impl ImageStore {
  /// Open (or create) an image store rooted at `dir`.
  pub fn open(dir: impl AsRef<Path>) -> Result<Self> {
    let dir = dir.as_ref().to_path_buf();
    fs::create_dir_all(&dir).map_err(|e| Error::io(&dir, e))?;
    Ok(Self { dir })
  }

  /// Store `bytes` and return a reference to them.
  ///
  /// The file name is the SHA-256 hex digest of the content plus `ext`, so
  /// ingesting the same bytes twice is idempotent and never duplicates data.
  pub fn ingest(&self, bytes: &[u8], ext: &str) -> Result<ImageRef> {
    let digest = hex::encode(Sha256::digest(bytes));
    let ext = normalize_ext(ext);
    let name = format!("{digest}.{ext}");
    let path = self.dir.join(&name);

    if !path.exists() {
      fs::write(&path, bytes).map_err(|e| Error::io(&path, e))?;
      debug!(image = %name, bytes = bytes.len(), "image stored");
    }

    Ok(ImageRef(name))
  }

  /// Read an image file and [`ingest`](Self::ingest) it, taking the
  /// extension from the file name.
  pub fn ingest_file(&self, path: impl AsRef<Path>) -> Result<ImageRef> {
    let path = path.as_ref();
    let bytes = fs::read(path).map_err(|e| Error::io(path, e))?;
    let ext = path
      .extension()
      .and_then(|e| e.to_str())
      .unwrap_or("img");
    self.ingest(&bytes, ext)
  }

  /// Resolve a reference to the path it points at.
  pub fn path_of(&self, image: &ImageRef) -> PathBuf {
    self.dir.join(&image.0)
  }
}

fn normalize_ext(ext: &str) -> String {
  let trimmed = ext.trim_start_matches('.').to_ascii_lowercase();
  if trimmed.is_empty() || !trimmed.chars().all(|c| c.is_ascii_alphanumeric()) {
    "img".to_owned()
  } else {
    trimmed
  }
}
