//! Document I/O for hosts that work with files

use super::source::SourceDocument;
use crate::types::*;
use std::path::Path;

/// Read a file into a named [`SourceFile`], using the file name as its name
pub async fn read_source_file(path: impl AsRef<Path>) -> Result<SourceFile> {
    let path = path.as_ref();
    let bytes = tokio::fs::read(path).await?;
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());
    Ok(SourceFile::new(name, bytes))
}

/// Load a single PDF document
pub async fn load_pdf(path: impl AsRef<Path>) -> Result<SourceDocument> {
    let bytes = tokio::fs::read(path.as_ref()).await?;
    tokio::task::spawn_blocking(move || SourceDocument::load(&bytes)).await?
}

/// Write produced bytes to disk
pub async fn save_bytes(path: impl AsRef<Path>, bytes: &[u8]) -> Result<()> {
    tokio::fs::write(path, bytes).await?;
    Ok(())
}
