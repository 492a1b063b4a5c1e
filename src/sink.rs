//! Document persistence behind a narrow sink interface.

use std::path::{Path, PathBuf};

use crate::error::Error;

/// Persists one rendered document per storage key. The driver calls `put`
/// once per summarized entity and never inspects what happens after.
pub trait DocumentSink {
    /// Persist `content` under `key`, a relative slug-derived path.
    ///
    /// # Errors
    ///
    /// Returns `Error::SinkWrite` when persistence fails. Callers treat the
    /// failure as local to this document, never as a batch abort.
    fn put(&mut self, key: &str, content: &str) -> Result<(), Error>;
}

/// Filesystem sink rooted at the output directory. Creates intermediate
/// directories as keys require them.
pub struct FsSink {
    root: PathBuf,
}

impl FsSink {
    /// A sink writing under `root`.
    pub fn new(root: &Path) -> Self {
        return Self {
            root: root.to_path_buf(),
        };
    }
}

impl DocumentSink for FsSink {
    fn put(&mut self, key: &str, content: &str) -> Result<(), Error> {
        let path = self.root.join(key);

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| Error::SinkWrite {
                path: path.clone(),
                reason: e.to_string(),
            })?;
        }

        std::fs::write(&path, content).map_err(|e| Error::SinkWrite {
            path: path.clone(),
            reason: e.to_string(),
        })?;
        return Ok(());
    }
}
