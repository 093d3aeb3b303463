use crate::adapter::Adapter;
use chimera_base::logging::warn;
use std::fmt::{Debug, Formatter};
use std::path::{Path, PathBuf};

/// Deletes the file at `path` when dropped, if it exists.
pub struct TempFileGuard<'a> {
    adapter: &'a dyn Adapter,
    path: PathBuf,
}

impl Debug for TempFileGuard<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TempFileGuard")
            .field("path", &self.path)
            .finish()
    }
}

impl<'a> TempFileGuard<'a> {
    pub fn new(adapter: &'a dyn Adapter, path: PathBuf) -> Self {
        Self { adapter, path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for TempFileGuard<'_> {
    fn drop(&mut self) {
        match self.adapter.file_exists(&self.path) {
            Ok(true) => {
                if let Err(err) = self.adapter.delete_file(&self.path) {
                    warn!(
                        "Failed to delete temporary file '{}': {err:#}",
                        self.path.display()
                    );
                }
            }
            Ok(false) => {}
            Err(err) => {
                warn!(
                    "Failed to check temporary file '{}': {err:#}",
                    self.path.display()
                );
            }
        }
    }
}
