use chimera_base::result::ChimeraResult;
use std::fmt::Debug;
use std::io::{Read, Seek, Write};
use std::path::{Path, PathBuf};
use std::rc::Rc;

pub trait WriteSeek: Write + Seek {}

impl<T: Write + Seek> WriteSeek for T {}

/// Host effects used by the chimera logic.
///
/// Relative paths are resolved against the adapter's base path.
pub trait Adapter: Debug + 'static {
    fn args(&self) -> Vec<String>;
    fn env(&self) -> Vec<(String, String)>;
    fn print(&self, message: &str);
    fn exit(&self, exit_code: i32);

    fn file_exists(&self, path: &Path) -> ChimeraResult<bool>;
    fn is_directory(&self, path: &Path) -> ChimeraResult<bool>;
    fn file_size(&self, path: &Path) -> ChimeraResult<u64>;
    /// Resolves `path` to an absolute path without `.` or `..` components.
    fn canonicalize(&self, path: &Path) -> ChimeraResult<PathBuf>;
    fn read_file(&self, path: &Path) -> ChimeraResult<Box<dyn Read>>;
    /// Creates the file, truncating it if it already exists.
    fn create_file(&self, path: &Path) -> ChimeraResult<Box<dyn WriteSeek>>;
    fn delete_file(&self, path: &Path) -> ChimeraResult<()>;
    /// Lists all files below `path` in traversal order.
    ///
    /// Returned paths start with `path`. Directories themselves are not listed.
    fn list_files_recursively(&self, path: &Path) -> ChimeraResult<Vec<PathBuf>>;
}

pub type AdapterBox = Rc<dyn Adapter>;
