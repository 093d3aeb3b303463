use chimera_base::result::{ChimeraResult, Context, bail};
use chimera_logic::adapter::{Adapter, WriteSeek};
use std::env;
use std::fmt::Debug;
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

pub struct RealAdapter {
    base_path: PathBuf,
}

impl RealAdapter {
    pub fn new(base_path: PathBuf) -> Self {
        Self { base_path }
    }

    fn resolve_path(&self, path: &Path) -> PathBuf {
        self.base_path.join(path)
    }
}

impl Adapter for RealAdapter {
    fn args(&self) -> Vec<String> {
        env::args().collect()
    }

    fn env(&self) -> Vec<(String, String)> {
        env::vars().collect()
    }

    fn print(&self, message: &str) {
        eprintln!("{message}");
    }

    fn exit(&self, exit_code: i32) {
        std::process::exit(exit_code);
    }

    fn file_exists(&self, path: &Path) -> ChimeraResult<bool> {
        Ok(self.resolve_path(path).exists())
    }

    fn is_directory(&self, path: &Path) -> ChimeraResult<bool> {
        Ok(self.resolve_path(path).is_dir())
    }

    fn file_size(&self, path: &Path) -> ChimeraResult<u64> {
        let physical_path = self.resolve_path(path);
        let metadata = std::fs::metadata(&physical_path)
            .with_context(|| format!("Failed to read metadata of {physical_path:?}"))?;
        Ok(metadata.len())
    }

    fn canonicalize(&self, path: &Path) -> ChimeraResult<PathBuf> {
        let physical_path = self.resolve_path(path);
        std::fs::canonicalize(&physical_path)
            .with_context(|| format!("Failed to resolve path {physical_path:?}"))
    }

    fn read_file(&self, path: &Path) -> ChimeraResult<Box<dyn Read>> {
        let physical_path = self.resolve_path(path);
        Ok(Box::new(File::open(&physical_path).with_context(|| {
            format!("Failed to read file {physical_path:?}")
        })?))
    }

    fn create_file(&self, path: &Path) -> ChimeraResult<Box<dyn WriteSeek>> {
        let physical_path = self.resolve_path(path);
        Ok(Box::new(File::create(&physical_path).with_context(
            || format!("Failed to create file {physical_path:?}"),
        )?))
    }

    fn delete_file(&self, path: &Path) -> ChimeraResult<()> {
        let physical_path = self.resolve_path(path);
        std::fs::remove_file(&physical_path)
            .with_context(|| format!("Failed to delete file {physical_path:?}"))?;
        Ok(())
    }

    fn list_files_recursively(&self, path: &Path) -> ChimeraResult<Vec<PathBuf>> {
        let physical_path = self.resolve_path(path);
        if !physical_path.is_dir() {
            bail!("{physical_path:?} is not a directory");
        }
        let mut files = Vec::new();
        // Directory symlinks are not followed, file symlinks are archived with their target's content.
        for entry in WalkDir::new(&physical_path).sort_by_file_name() {
            let entry =
                entry.with_context(|| format!("Failed to walk directory {physical_path:?}"))?;
            let is_file = entry.file_type().is_file()
                || (entry.path_is_symlink() && entry.path().is_file());
            if !is_file {
                continue;
            }
            let relative_path = entry.path().strip_prefix(&physical_path)?;
            files.push(path.join(relative_path));
        }
        Ok(files)
    }
}

impl Debug for RealAdapter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "RealAdapter")
    }
}
