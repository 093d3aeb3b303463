use crate::adapter::{Adapter, WriteSeek};
use chimera_base::result::{ChimeraResult, Context, bail, err};
use expect_test::Expect;
use std::collections::{BTreeMap, BTreeSet};
use std::io::{Cursor, Read, Seek, SeekFrom, Write};
use std::path::{Component, Path, PathBuf};

const MOCK_BASE_PATH: &str = "/mock/workspace";
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

/// In-memory adapter that records every effect for snapshot comparison.
#[derive(Clone)]
pub struct MockAdapter {
    inner: Arc<RwLock<MockAdapterInner>>,
}

struct MockAdapterInner {
    args: Vec<String>,
    env: Vec<(String, String)>,
    files: BTreeMap<PathBuf, Vec<u8>>,
    directories: BTreeSet<PathBuf>,
    failing_paths: BTreeSet<PathBuf>,
    effects_string: String,
}

impl MockAdapter {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(RwLock::new(MockAdapterInner {
                env: vec![("NO_COLOR".to_string(), "1".to_string())],
                args: Vec::new(),
                files: BTreeMap::new(),
                directories: BTreeSet::new(),
                failing_paths: BTreeSet::new(),
                effects_string: String::new(),
            })),
        }
    }

    fn read(&self) -> RwLockReadGuard<'_, MockAdapterInner> {
        self.inner
            .read()
            .expect("Unable to acquire read lock for mock adapter")
    }

    fn write(&self) -> RwLockWriteGuard<'_, MockAdapterInner> {
        self.inner
            .write()
            .expect("Unable to acquire write lock for mock adapter")
    }

    fn log_effect(&self, effect: impl AsRef<str>) {
        let mut inner = self.write();
        inner.effects_string.push_str(effect.as_ref());
        inner.effects_string.push('\n');
    }

    fn check_failure(&self, path: &Path) -> ChimeraResult<()> {
        if self.read().failing_paths.contains(path) {
            bail!("Simulated I/O failure for '{}'", path.display());
        }
        Ok(())
    }

    pub fn set_args(&self, args: &[&str]) {
        let mut all_args = vec!["./chimera".to_string()];
        all_args.extend(args.iter().map(|s| s.to_string()));
        self.write().args = all_args;
    }

    /// Adds a file and all of its parent directories.
    pub fn add_file(&self, path: impl AsRef<Path>, content: impl AsRef<[u8]>) {
        let path = path.as_ref();
        let mut inner = self.write();
        for ancestor in path.ancestors().skip(1) {
            if !ancestor.as_os_str().is_empty() {
                inner.directories.insert(ancestor.to_path_buf());
            }
        }
        inner
            .files
            .insert(path.to_path_buf(), content.as_ref().to_vec());
    }

    pub fn add_directory(&self, path: impl AsRef<Path>) {
        let mut inner = self.write();
        for ancestor in path.as_ref().ancestors() {
            if !ancestor.as_os_str().is_empty() {
                inner.directories.insert(ancestor.to_path_buf());
            }
        }
    }

    /// Makes every subsequent read or create of `path` fail.
    pub fn fail_on(&self, path: impl AsRef<Path>) {
        self.write()
            .failing_paths
            .insert(path.as_ref().to_path_buf());
    }

    pub fn file_content(&self, path: impl AsRef<Path>) -> Option<Vec<u8>> {
        self.read().files.get(path.as_ref()).cloned()
    }

    pub fn has_file(&self, path: impl AsRef<Path>) -> bool {
        self.read().files.contains_key(path.as_ref())
    }

    pub fn verify_effects(&self, expected: Expect) {
        expected.assert_eq(&self.read().effects_string);
    }

    pub fn get_effects(&self) -> String {
        self.read().effects_string.clone()
    }
}

impl Adapter for MockAdapter {
    fn args(&self) -> Vec<String> {
        self.read().args.clone()
    }

    fn env(&self) -> Vec<(String, String)> {
        self.read().env.clone()
    }

    fn print(&self, message: &str) {
        let mut effect = String::from("PRINT:");
        for line in message.lines() {
            effect.push('\n');
            if !line.is_empty() {
                effect.push_str("    ");
                effect.push_str(line);
            }
        }
        self.log_effect(effect);
    }

    fn exit(&self, exit_code: i32) {
        self.log_effect(format!("EXIT: {exit_code}"));
    }

    fn file_exists(&self, path: &Path) -> ChimeraResult<bool> {
        let inner = self.read();
        Ok(inner.files.contains_key(path) || inner.directories.contains(path))
    }

    fn is_directory(&self, path: &Path) -> ChimeraResult<bool> {
        Ok(self.read().directories.contains(path))
    }

    fn file_size(&self, path: &Path) -> ChimeraResult<u64> {
        let inner = self.read();
        let content = inner
            .files
            .get(path)
            .ok_or_else(|| err!("No such file: '{}'", path.display()))?;
        Ok(content.len() as u64)
    }

    fn canonicalize(&self, path: &Path) -> ChimeraResult<PathBuf> {
        let mut resolved = PathBuf::from(MOCK_BASE_PATH);
        for component in path.components() {
            match component {
                Component::CurDir => {}
                Component::ParentDir => {
                    resolved.pop();
                }
                other => resolved.push(other),
            }
        }
        Ok(resolved)
    }

    fn read_file(&self, path: &Path) -> ChimeraResult<Box<dyn Read>> {
        self.log_effect(format!("READ FILE: {}", path.display()));
        self.check_failure(path)?;
        let content = self
            .file_content(path)
            .ok_or_else(|| err!("No such file: '{}'", path.display()))?;
        Ok(Box::new(Cursor::new(content)))
    }

    fn create_file(&self, path: &Path) -> ChimeraResult<Box<dyn WriteSeek>> {
        self.log_effect(format!("CREATE FILE: {}", path.display()));
        self.check_failure(path)?;
        self.write().files.insert(path.to_path_buf(), Vec::new());
        Ok(Box::new(MockFileWriter {
            inner: self.inner.clone(),
            path: path.to_path_buf(),
            cursor: Cursor::new(Vec::new()),
        }))
    }

    fn delete_file(&self, path: &Path) -> ChimeraResult<()> {
        self.log_effect(format!("DELETE FILE: {}", path.display()));
        self.write()
            .files
            .remove(path)
            .with_context(|| format!("Failed to delete file '{}'", path.display()))?;
        Ok(())
    }

    fn list_files_recursively(&self, path: &Path) -> ChimeraResult<Vec<PathBuf>> {
        let inner = self.read();
        if !inner.directories.contains(path) {
            bail!("No such directory: '{}'", path.display());
        }
        Ok(inner
            .files
            .keys()
            .filter(|file| file.starts_with(path) && file.as_path() != path)
            .cloned()
            .collect())
    }
}

impl std::fmt::Debug for MockAdapter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "MockAdapter")
    }
}

/// Buffers writes and publishes the content to the mock filesystem on flush and drop.
struct MockFileWriter {
    inner: Arc<RwLock<MockAdapterInner>>,
    path: PathBuf,
    cursor: Cursor<Vec<u8>>,
}

impl MockFileWriter {
    fn publish(&self) {
        if let Ok(mut inner) = self.inner.write() {
            inner
                .files
                .insert(self.path.clone(), self.cursor.get_ref().clone());
        }
    }
}

impl Write for MockFileWriter {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.cursor.write(buf)
    }

    fn flush(&mut self) -> std::io::Result<()> {
        self.publish();
        Ok(())
    }
}

impl Seek for MockFileWriter {
    fn seek(&mut self, pos: SeekFrom) -> std::io::Result<u64> {
        self.cursor.seek(pos)
    }
}

impl Drop for MockFileWriter {
    fn drop(&mut self) {
        self.publish();
    }
}
