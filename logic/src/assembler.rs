use crate::adapter::Adapter;
use chimera_base::logging::info;
use chimera_base::result::{ChimeraResult, Context};
use std::io::{ErrorKind, Read, Write};
use std::path::Path;

pub const CHUNK_SIZE: usize = 64 * 1024;

/// Writes `original` followed directly by `archive` into `output`.
///
/// The output starts with the exact bytes of the original, so it still opens
/// as media, while ZIP readers locate the appended archive from the end.
/// Returns the number of bytes written.
pub fn assemble(
    adapter: &dyn Adapter,
    original_path: &Path,
    archive_path: &Path,
    output_path: &Path,
) -> ChimeraResult<u64> {
    let mut original = adapter
        .read_file(original_path)
        .with_context(|| format!("Failed to open original '{}'", original_path.display()))?;
    let mut archive = adapter
        .read_file(archive_path)
        .with_context(|| format!("Failed to open archive '{}'", archive_path.display()))?;
    let mut output = adapter
        .create_file(output_path)
        .with_context(|| format!("Failed to create output '{}'", output_path.display()))?;

    let original_bytes = copy_in_chunks(&mut original, &mut output)
        .with_context(|| format!("Failed to copy original '{}'", original_path.display()))?;
    let archive_bytes = copy_in_chunks(&mut archive, &mut output)
        .with_context(|| format!("Failed to append archive '{}'", archive_path.display()))?;
    output
        .flush()
        .with_context(|| format!("Failed to write output '{}'", output_path.display()))?;
    info!(
        "Wrote {} bytes to '{}' ({original_bytes} original + {archive_bytes} archive)",
        original_bytes + archive_bytes,
        output_path.display()
    );
    Ok(original_bytes + archive_bytes)
}

/// Copies `reader` into `writer` using reads of at most [`CHUNK_SIZE`] bytes.
pub fn copy_in_chunks<R: Read + ?Sized, W: Write + ?Sized>(
    reader: &mut R,
    writer: &mut W,
) -> ChimeraResult<u64> {
    let mut buffer = vec![0u8; CHUNK_SIZE];
    let mut total = 0u64;
    loop {
        let n = match reader.read(&mut buffer) {
            Ok(0) => break,
            Ok(n) => n,
            Err(err) if err.kind() == ErrorKind::Interrupted => continue,
            Err(err) => return Err(err.into()),
        };
        writer.write_all(&buffer[..n])?;
        total += n as u64;
    }
    Ok(total)
}
