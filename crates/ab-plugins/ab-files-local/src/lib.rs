//! # ab-files-local
//!
//! Local filesystem implementation of `StringStore`: snapshot documents as
//! plain text files under one data directory. Reading a file that does not
//! exist yet yields an empty string, so a first start sees empty
//! repositories instead of an error.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use ab_core::error::Result;
use ab_core::traits::StringStore;
use tracing::debug;

pub struct LocalTextStore {
    /// Root directory for all snapshot documents (e.g. "./data").
    root_path: PathBuf,
}

impl LocalTextStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root_path: root.into() }
    }

    fn resolve(&self, path: &str) -> PathBuf {
        self.root_path.join(path)
    }

    fn ensure_parent(target: &Path) -> Result<()> {
        if let Some(parent) = target.parent() {
            fs::create_dir_all(parent)?;
        }
        Ok(())
    }
}

impl StringStore for LocalTextStore {
    fn read_string(&self, path: &str) -> Result<String> {
        match fs::read_to_string(self.resolve(path)) {
            Ok(content) => Ok(content),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(String::new()),
            Err(err) => Err(err.into()),
        }
    }

    fn write_string(&self, path: &str, content: &str) -> Result<()> {
        let target = self.resolve(path);
        Self::ensure_parent(&target)?;
        fs::write(&target, content)?;
        debug!(path = %target.display(), bytes = content.len(), "snapshot written");
        Ok(())
    }
}
