//! JSON-file storage implementation for tasklet.

use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use tasklet_core::{StoreError, Task};
use tempfile::NamedTempFile;
use tracing::{debug, info};

/// Task collection persisted as a single pretty-printed JSON array.
///
/// Every [`save`](Self::save) rewrites the whole file; nothing is cached between calls.
#[derive(Debug, Clone)]
pub struct JsonStore {
    path: PathBuf,
}

impl JsonStore {
    /// Create a store for `path`. The file does not need to exist yet.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Location of the backing file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read every task in file order. A missing file is an empty collection.
    ///
    /// # Errors
    /// Returns [`StoreError::Malformed`] for undecodable content and
    /// [`StoreError::Io`] when the file exists but cannot be read.
    pub fn load(&self) -> Result<Vec<Task>, StoreError> {
        // Raw bytes so invalid UTF-8 surfaces as a decode failure, not an I/O one.
        let contents = match fs::read(&self.path) {
            Ok(contents) => contents,
            Err(err) if err.kind() == ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "task file absent; starting empty");
                return Ok(Vec::new());
            }
            Err(err) => return Err(StoreError::io(&self.path, err)),
        };

        let tasks: Vec<Task> =
            serde_json::from_slice(&contents).map_err(|source| StoreError::Malformed {
                path: self.path.clone(),
                source,
            })?;
        debug!(path = %self.path.display(), count = tasks.len(), "loaded tasks");
        Ok(tasks)
    }

    /// Replace the file with `tasks`, in the given order.
    ///
    /// The document is written to a temporary sibling and renamed over the
    /// target, so readers never observe a partially written file. Missing
    /// parent directories are created.
    ///
    /// # Errors
    /// Returns [`StoreError::Encode`] if serialization fails and
    /// [`StoreError::Io`] for directory creation, write or rename failures.
    pub fn save(&self, tasks: &[Task]) -> Result<(), StoreError> {
        let dir = self.parent_dir();
        fs::create_dir_all(dir).map_err(|err| StoreError::io(dir, err))?;

        let mut body = serde_json::to_string_pretty(tasks).map_err(StoreError::Encode)?;
        body.push('\n');

        let mut staged = NamedTempFile::new_in(dir).map_err(|err| StoreError::io(dir, err))?;
        staged
            .write_all(body.as_bytes())
            .and_then(|()| staged.as_file().sync_all())
            .map_err(|err| StoreError::io(staged.path(), err))?;
        staged
            .persist(&self.path)
            .map_err(|err| StoreError::io(&self.path, err.error))?;

        info!(path = %self.path.display(), count = tasks.len(), "saved tasks");
        Ok(())
    }

    fn parent_dir(&self) -> &Path {
        match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        }
    }
}
