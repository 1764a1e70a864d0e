//! Cache entry persistence.

use std::fs::{DirBuilder, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::hash::fingerprint;
use crate::Error;

/// Permissions for a newly created cache directory.
const DIR_MODE: u32 = 0o755;

/// Permissions for a newly created cache file.
const FILE_MODE: u32 = 0o644;

/// A persisted question and its fully formatted answer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheEntry {
    pub question: String,
    pub answer: String,
}

/// Writes cache entries into a single directory.
#[derive(Debug, Clone)]
pub struct CacheWriter {
    dir: PathBuf,
}

impl CacheWriter {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Path the entry for `question` is written to.
    pub fn entry_path(&self, question: &str) -> PathBuf {
        self.dir.join(format!("{}.json", fingerprint(question)))
    }

    /// Persist `answer` for `question`, replacing any previous entry.
    ///
    /// Creates the directory (and missing parents) first if needed.
    ///
    /// # Errors
    ///
    /// Returns `Error::CacheWrite` if the directory cannot be created, the entry
    /// cannot be serialized, or the file cannot be written.
    pub fn write(&self, question: &str, answer: &str) -> Result<PathBuf, Error> {
        self.ensure_dir()?;

        let path = self.entry_path(question);
        let entry = CacheEntry { question: question.to_string(), answer: answer.to_string() };
        let json = serde_json::to_vec(&entry).map_err(|e| cache_error(&path, "failed to serialize cache entry", e))?;

        let mut file =
            open_options().open(&path).map_err(|e| cache_error(&path, "failed to open cache file", e))?;
        file.write_all(&json)
            .map_err(|e| cache_error(&path, "failed to write cache file", e))?;

        tracing::debug!(path = %path.display(), bytes = json.len(), "wrote cache entry");

        Ok(path)
    }

    fn ensure_dir(&self) -> Result<(), Error> {
        if self.dir.is_dir() {
            return Ok(());
        }

        let mut builder = DirBuilder::new();
        builder.recursive(true);
        #[cfg(unix)]
        {
            use std::os::unix::fs::DirBuilderExt;
            builder.mode(DIR_MODE);
        }

        builder
            .create(&self.dir)
            .map_err(|e| cache_error(&self.dir, "failed to create cache directory", e))
    }
}

fn open_options() -> OpenOptions {
    let mut options = OpenOptions::new();
    options.write(true).create(true).truncate(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(FILE_MODE);
    }
    options
}

fn cache_error(path: &Path, context: &str, err: impl std::fmt::Display) -> Error {
    Error::CacheWrite { path: path.to_path_buf(), reason: format!("{context}: {err}") }
}
