pub mod batch;
pub mod constants;
pub mod geometry;
mod options;
pub mod package;
pub mod process;
pub mod range;
pub mod render;
mod stats;
mod types;

pub use batch::{Batch, run_batch};
pub use geometry::PageGeometry;
pub use options::*;
pub use package::{Archive, ArchiveEntry, Deliverable, package};
pub use process::{
    SourceDocument, load_pdf, process_bytes, process_document, process_pdf_bytes,
    read_source_file, save_bytes,
};
pub use range::PageSelection;
pub use stats::calculate_statistics;
pub use types::*;
