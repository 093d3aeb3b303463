use crate::adapter::Adapter;
use crate::configuration::ChimeraConfiguration;
use crate::types::{Attachment, SourcePaths, ValidatedSources};
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};

/// Rejected input, reported to the caller before any file is written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    OriginalMissing,
    UnsupportedExtension { allowed: Vec<String> },
    OriginalIsDirectory,
    AttachmentCount,
    AttachedFileMissing,
    AttachedFileIsDirectory,
    AttachedFolderMissing,
    AttachedFolderNotADirectory,
}

impl Display for ValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            ValidationError::OriginalMissing => f.write_str("Original file does not exist."),
            ValidationError::UnsupportedExtension { allowed } => {
                write!(f, "Original file must be a {}.", join_alternatives(allowed))
            }
            ValidationError::OriginalIsDirectory => {
                f.write_str("Original file must be a file, not a directory.")
            }
            ValidationError::AttachmentCount => {
                f.write_str("Attach exactly one: a single file OR a single folder.")
            }
            ValidationError::AttachedFileMissing => {
                f.write_str("The file to attach does not exist.")
            }
            ValidationError::AttachedFileIsDirectory => {
                f.write_str("The file to attach is a directory, attach it as a folder instead.")
            }
            ValidationError::AttachedFolderMissing => {
                f.write_str("The folder to attach does not exist.")
            }
            ValidationError::AttachedFolderNotADirectory => {
                f.write_str("The folder to attach is not a directory, attach it as a file instead.")
            }
        }
    }
}

impl std::error::Error for ValidationError {}

/// Checks the caller supplied paths and narrows them to exactly one attachment.
pub fn validate_sources(
    adapter: &dyn Adapter,
    configuration: &ChimeraConfiguration,
    sources: &SourcePaths,
) -> Result<ValidatedSources, ValidationError> {
    let original = trimmed(&sources.original);
    if is_blank(&original) || !exists(adapter, &original) {
        return Err(ValidationError::OriginalMissing);
    }
    let extension = original
        .extension()
        .map(|extension| format!(".{}", extension.to_string_lossy()))
        .unwrap_or_default();
    if !configuration.is_allowed_extension(&extension) {
        return Err(ValidationError::UnsupportedExtension {
            allowed: configuration.extensions.clone(),
        });
    }
    if is_directory(adapter, &original) {
        return Err(ValidationError::OriginalIsDirectory);
    }

    let attachment = non_blank(&sources.attachment);
    let attachment_folder = non_blank(&sources.attachment_folder);
    let attachment = match (attachment.as_ref(), attachment_folder.as_ref()) {
        (Some(file), None) => {
            if !exists(adapter, file) {
                return Err(ValidationError::AttachedFileMissing);
            }
            if is_directory(adapter, file) {
                return Err(ValidationError::AttachedFileIsDirectory);
            }
            Attachment::File(file.clone())
        }
        (None, Some(folder)) => {
            if !exists(adapter, folder) {
                return Err(ValidationError::AttachedFolderMissing);
            }
            if !is_directory(adapter, folder) {
                return Err(ValidationError::AttachedFolderNotADirectory);
            }
            Attachment::Folder(folder.clone())
        }
        _ => return Err(ValidationError::AttachmentCount),
    };
    Ok(ValidatedSources {
        original,
        attachment,
    })
}

// Lookup failures count as "does not exist".
fn exists(adapter: &dyn Adapter, path: &Path) -> bool {
    adapter.file_exists(path).unwrap_or(false)
}

fn is_directory(adapter: &dyn Adapter, path: &Path) -> bool {
    adapter.is_directory(path).unwrap_or(false)
}

/// Strips surrounding whitespace from paths given as text.
fn trimmed(path: &Path) -> PathBuf {
    match path.to_str() {
        Some(text) => PathBuf::from(text.trim()),
        None => path.to_path_buf(),
    }
}

fn is_blank(path: &Path) -> bool {
    path.to_string_lossy().trim().is_empty()
}

fn non_blank(path: &Option<PathBuf>) -> Option<PathBuf> {
    path.as_deref()
        .map(trimmed)
        .filter(|path| !is_blank(path))
}

/// Formats `[a, b, c]` as "a, b, or c".
fn join_alternatives(items: &[String]) -> String {
    match items {
        [] => String::new(),
        [single] => single.clone(),
        [first, second] => format!("{first} or {second}"),
        [init @ .., last] => format!("{}, or {last}", init.join(", ")),
    }
}
