use crate::adapter::Adapter;
use crate::archive_builder::build_archive;
use crate::assembler::assemble;
use crate::configuration::ChimeraConfiguration;
use crate::temp_file_guard::TempFileGuard;
use crate::types::{Attachment, SourcePaths, ValidatedSources};
use crate::validation::{ValidationError, validate_sources};
use chimera_base::logging::{info, info_span};
use chimera_base::result::{ChimeraError, ChimeraResult, bail, err};
use std::ffi::OsString;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};

#[derive(Debug)]
pub enum ChimeraFailure {
    ValidationFailed(ValidationError),
    IoFailure(ChimeraError),
}

impl Display for ChimeraFailure {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            ChimeraFailure::ValidationFailed(error) => Display::fmt(error, f),
            ChimeraFailure::IoFailure(error) => write!(f, "Error: {error:#}"),
        }
    }
}

impl std::error::Error for ChimeraFailure {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ChimeraFailure::ValidationFailed(error) => Some(error),
            ChimeraFailure::IoFailure(error) => Some(error.as_ref()),
        }
    }
}

/// Validates `sources` and writes the chimera file.
///
/// The output goes to `output` if given, otherwise next to the original as
/// `<prefix><name><ext>`. Returns the path of the written file.
pub fn create_chimera(
    adapter: &dyn Adapter,
    configuration: &ChimeraConfiguration,
    sources: &SourcePaths,
    output: Option<&Path>,
) -> Result<PathBuf, ChimeraFailure> {
    let validated = {
        let _span = info_span!("validate").entered();
        validate_sources(adapter, configuration, sources).map_err(ChimeraFailure::ValidationFailed)?
    };
    build_chimera(adapter, configuration, &validated, output).map_err(ChimeraFailure::IoFailure)
}

fn build_chimera(
    adapter: &dyn Adapter,
    configuration: &ChimeraConfiguration,
    validated: &ValidatedSources,
    output: Option<&Path>,
) -> ChimeraResult<PathBuf> {
    let original = &validated.original;
    let directory = original.parent().unwrap_or(Path::new(""));
    let output_path = match output {
        Some(output) => output.to_path_buf(),
        None => default_output_path(configuration, original)?,
    };
    if output_path == *original {
        bail!(
            "Output path '{}' must differ from the original file",
            output_path.display()
        );
    }
    let temp_archive_path = directory.join(&configuration.temp_archive_name);
    if temp_archive_path == output_path {
        bail!(
            "Output path '{}' must differ from the temporary archive",
            output_path.display()
        );
    }
    if temp_archive_path == *original {
        bail!(
            "Temporary archive '{}' must differ from the original file",
            temp_archive_path.display()
        );
    }
    let temp_archive = TempFileGuard::new(adapter, temp_archive_path);
    let (files, folders) = match &validated.attachment {
        Attachment::File(file) => (vec![file.clone()], vec![]),
        Attachment::Folder(folder) => (vec![], vec![folder.clone()]),
    };
    {
        let _span = info_span!("build_archive").entered();
        let entry_count = build_archive(adapter, &files, &folders, temp_archive.path())?;
        info!(
            "Archived {entry_count} file(s) into '{}'",
            temp_archive.path().display()
        );
    }
    {
        let _span = info_span!("assemble").entered();
        assemble(adapter, original, temp_archive.path(), &output_path)?;
    }
    let _span = info_span!("cleanup").entered();
    drop(temp_archive);
    Ok(output_path)
}

/// `<original dir>/<prefix><original stem><original extension>`
pub fn default_output_path(
    configuration: &ChimeraConfiguration,
    original: &Path,
) -> ChimeraResult<PathBuf> {
    let stem = original
        .file_stem()
        .ok_or_else(|| err!("Cannot determine the name of '{}'", original.display()))?;
    let mut file_name = OsString::from(&configuration.output_prefix);
    file_name.push(stem);
    if let Some(extension) = original.extension() {
        file_name.push(".");
        file_name.push(extension);
    }
    Ok(original
        .parent()
        .unwrap_or(Path::new(""))
        .join(file_name))
}

pub fn success_message(output_path: &Path) -> String {
    format!(
        "Chimera created:\n{}\n\nTo see hidden contents:\n1. Rename the file to .zip\n2. Open with 7-Zip, WinRAR, etc.\n",
        output_path.display()
    )
}
