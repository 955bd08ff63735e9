//! Packaging batch results for delivery
//!
//! One successful output is delivered as-is; several are bundled into an
//! archive. Output names are derived from the source name and margin size.

use crate::types::*;
use std::collections::HashSet;
use std::io::{Cursor, Write};

/// Final artifact handed back to the host
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Deliverable {
    /// A single margin-applied PDF
    Single { file_name: String, bytes: Vec<u8> },
    /// Several PDFs bundled together
    Archive(Archive),
}

impl Deliverable {
    /// File name the host should offer for download
    pub fn file_name(&self) -> &str {
        match self {
            Deliverable::Single { file_name, .. } => file_name,
            Deliverable::Archive(archive) => &archive.name,
        }
    }
}

/// Named collection of output files
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Archive {
    pub name: String,
    pub entries: Vec<ArchiveEntry>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchiveEntry {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

impl Archive {
    pub fn entry(&self, file_name: &str) -> Option<&ArchiveEntry> {
        self.entries.iter().find(|e| e.file_name == file_name)
    }

    /// Encode the archive as a ZIP file.
    ///
    /// Entries carry a fixed timestamp, so the same entries always encode to
    /// the same bytes.
    pub fn to_zip(&self) -> Result<Vec<u8>> {
        let mut buffer = Vec::new();
        {
            let mut zip = zip::ZipWriter::new(Cursor::new(&mut buffer));
            let options = zip::write::SimpleFileOptions::default()
                .compression_method(zip::CompressionMethod::Deflated)
                .last_modified_time(zip::DateTime::default());

            for entry in &self.entries {
                zip.start_file(entry.file_name.as_str(), options)?;
                zip.write_all(&entry.bytes)?;
            }
            zip.finish()?;
        }
        Ok(buffer)
    }
}

/// Package the successful outputs of a batch.
///
/// Failed inputs are left out entirely. Fails with
/// [`MarginError::NoOutputs`] when nothing succeeded.
pub fn package(result: BatchResult, margin: &MarginConfig) -> Result<Deliverable> {
    let mut outputs = result.outputs;

    match outputs.len() {
        0 => Err(MarginError::NoOutputs),
        1 => {
            let output = outputs.remove(0);
            Ok(Deliverable::Single {
                file_name: output_file_name(&output.source_name, margin.size),
                bytes: output.bytes,
            })
        }
        _ => {
            let name = archive_name(&outputs[0].source_name, margin.size);
            let mut used = HashSet::new();
            let entries = outputs
                .into_iter()
                .map(|output| {
                    let file_name =
                        unique_name(output_file_name(&output.source_name, margin.size), &mut used);
                    ArchiveEntry {
                        file_name,
                        bytes: output.bytes,
                    }
                })
                .collect();

            Ok(Deliverable::Archive(Archive { name, entries }))
        }
    }
}

/// `{base}-margin-{size}px.pdf`
pub fn output_file_name(source_name: &str, margin_size: u32) -> String {
    format!("{}-margin-{}px.pdf", base_name(source_name), margin_size)
}

/// `{first_base}_and_more_pdfs_with_{size}px_margin.zip`
pub fn archive_name(first_source_name: &str, margin_size: u32) -> String {
    format!(
        "{}_and_more_pdfs_with_{}px_margin.zip",
        base_name(first_source_name),
        margin_size
    )
}

/// Source name without directories and without its last extension
pub fn base_name(source_name: &str) -> &str {
    let file_name = source_name
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or(source_name);

    match file_name.rsplit_once('.') {
        Some((stem, _)) if !stem.is_empty() => stem,
        _ => file_name,
    }
}

/// Suffix `-2`, `-3`, ... before the extension until the name is unused
fn unique_name(file_name: String, used: &mut HashSet<String>) -> String {
    if used.insert(file_name.clone()) {
        return file_name;
    }

    let (stem, extension) = match file_name.rsplit_once('.') {
        Some((stem, ext)) => (stem.to_string(), format!(".{}", ext)),
        None => (file_name.clone(), String::new()),
    };

    let mut counter = 2;
    loop {
        let candidate = format!("{}-{}{}", stem, counter, extension);
        if used.insert(candidate.clone()) {
            return candidate;
        }
        counter += 1;
    }
}
