use crate::adapter::Adapter;
use crate::types::{ArchiveEntry, ArchiveName};
use chimera_base::logging::debug;
use chimera_base::result::{ChimeraResult, Context, err};
use std::io::Write;
use std::path::{Path, PathBuf};
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, DateTime, ZipWriter};

/// Entries at or above this size need 64-bit size fields.
const ZIP64_THRESHOLD: u64 = u32::MAX as u64;

/// Plans the archive entries for the given files and folders.
///
/// Files are named by their base name. Folder contents keep their structure
/// below the folder's own name, e.g. `docs/sub/b.txt`.
pub fn collect_archive_entries(
    adapter: &dyn Adapter,
    files: &[PathBuf],
    folders: &[PathBuf],
) -> ChimeraResult<Vec<ArchiveEntry>> {
    let mut entries = Vec::new();
    for file in files {
        entries.push(ArchiveEntry {
            source_path: file.clone(),
            archive_name: ArchiveName::from(base_name(file)?),
        });
    }
    for folder in folders {
        let folder_name = ArchiveName::from(folder_name(adapter, folder)?);
        let contained_files = adapter
            .list_files_recursively(folder)
            .with_context(|| format!("Failed to list files in folder '{}'", folder.display()))?;
        for contained_file in contained_files {
            let relative_path = contained_file.strip_prefix(folder).with_context(|| {
                format!(
                    "File '{}' is not inside folder '{}'",
                    contained_file.display(),
                    folder.display()
                )
            })?;
            let archive_name = folder_name.join(ArchiveName::from_path(relative_path)?);
            entries.push(ArchiveEntry {
                source_path: contained_file,
                archive_name,
            });
        }
    }
    Ok(entries)
}

/// Writes a store-only ZIP archive of `files` and `folders` to `archive_path`.
///
/// Returns the number of entries written.
pub fn build_archive(
    adapter: &dyn Adapter,
    files: &[PathBuf],
    folders: &[PathBuf],
    archive_path: &Path,
) -> ChimeraResult<usize> {
    let entries = collect_archive_entries(adapter, files, folders)?;
    let archive_file = adapter
        .create_file(archive_path)
        .with_context(|| format!("Failed to create archive '{}'", archive_path.display()))?;
    let mut zip_writer = ZipWriter::new(archive_file);
    for entry in &entries {
        add_entry(adapter, &mut zip_writer, entry)
            .with_context(|| format!("Failed to add '{}' to archive", entry.source_path.display()))?;
    }
    let mut archive_file = zip_writer
        .finish()
        .with_context(|| format!("Failed to finish archive '{}'", archive_path.display()))?;
    archive_file.flush()?;
    Ok(entries.len())
}

fn add_entry<W: Write + std::io::Seek>(
    adapter: &dyn Adapter,
    zip_writer: &mut ZipWriter<W>,
    entry: &ArchiveEntry,
) -> ChimeraResult<()> {
    let size = adapter.file_size(&entry.source_path)?;
    debug!("Adding '{}' ({size} bytes)", entry.archive_name);
    zip_writer.start_file(entry.archive_name.as_str(), create_file_options(size))?;
    let mut source = adapter.read_file(&entry.source_path)?;
    std::io::copy(&mut source, zip_writer)?;
    Ok(())
}

// Fixed timestamps keep repeated builds byte-identical.
fn create_file_options(size: u64) -> SimpleFileOptions {
    SimpleFileOptions::default()
        .compression_method(CompressionMethod::Stored)
        .last_modified_time(DateTime::default())
        .large_file(needs_zip64(size))
}

fn needs_zip64(size: u64) -> bool {
    size >= ZIP64_THRESHOLD
}

/// Name of the folder itself, resolving paths such as `.` or `..` that have none.
fn folder_name(adapter: &dyn Adapter, folder: &Path) -> ChimeraResult<String> {
    if folder.file_name().is_some() {
        return base_name(folder);
    }
    let resolved = adapter
        .canonicalize(folder)
        .with_context(|| format!("Failed to resolve folder '{}'", folder.display()))?;
    base_name(&resolved)
        .with_context(|| format!("Cannot determine the name of folder '{}'", folder.display()))
}

fn base_name(path: &Path) -> ChimeraResult<String> {
    let name = path
        .file_name()
        .ok_or_else(|| err!("Cannot determine the name of '{}'", path.display()))?;
    Ok(name.to_string_lossy().into_owned())
}
