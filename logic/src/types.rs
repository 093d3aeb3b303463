use std::path::PathBuf;

/// Name of an entry inside the archive, always `/`-separated.
pub type ArchiveName = relative_path::RelativePathBuf;

/// Paths as supplied by the caller, before validation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SourcePaths {
    pub original: PathBuf,
    pub attachment: Option<PathBuf>,
    pub attachment_folder: Option<PathBuf>,
}

impl SourcePaths {
    pub fn new(original: impl Into<PathBuf>) -> Self {
        Self {
            original: original.into(),
            attachment: None,
            attachment_folder: None,
        }
    }

    pub fn with_attachment(mut self, attachment: impl Into<PathBuf>) -> Self {
        self.attachment = Some(attachment.into());
        self
    }

    pub fn with_attachment_folder(mut self, attachment_folder: impl Into<PathBuf>) -> Self {
        self.attachment_folder = Some(attachment_folder.into());
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Attachment {
    File(PathBuf),
    Folder(PathBuf),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedSources {
    pub original: PathBuf,
    pub attachment: Attachment,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchiveEntry {
    pub source_path: PathBuf,
    pub archive_name: ArchiveName,
}
