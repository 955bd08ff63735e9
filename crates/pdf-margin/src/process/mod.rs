//! Margin insertion for a single document
//!
//! Every source page becomes exactly one output page, in the same order.
//! Selected pages are widened and their content shifted; the rest are
//! passed through at their original size.

mod io;
mod source;

pub use io::{load_pdf, read_source_file, save_bytes};
pub use source::SourceDocument;

use crate::constants::OUTPUT_PDF_VERSION;
use crate::geometry::PageGeometry;
use crate::options::MarginOptions;
use crate::range::PageSelection;
use crate::render::{get_page_box, render_margin_page};
use crate::types::*;
use lopdf::{Dictionary, Document, Object, ObjectId};
use std::collections::HashMap;

/// Add margins to the selected pages of a loaded document and serialize the
/// result.
///
/// The output is written without object streams or added compression, so
/// identical input and configuration always produce identical bytes.
pub fn process_document(
    source: &SourceDocument,
    selection: &PageSelection,
    margin: &MarginConfig,
) -> Result<Vec<u8>> {
    let mut output = build_output_document(source, selection, margin)?;

    let mut buffer = Vec::new();
    output
        .save_to(&mut buffer)
        .map_err(|e| MarginError::Serialize(e.to_string()))?;

    Ok(buffer)
}

/// Parse PDF bytes, resolve the page selection for this document and add
/// margins.
pub fn process_pdf_bytes(bytes: &[u8], options: &MarginOptions) -> Result<Vec<u8>> {
    let source = SourceDocument::load(bytes)?;
    let selection = PageSelection::resolve(&options.pages, source.page_count());
    log::debug!(
        "Adding {}pt {} margin to {} of {} pages",
        options.margin.size,
        options.margin.side,
        selection.len(),
        source.page_count()
    );
    process_document(&source, &selection, &options.margin)
}

/// Async variant of [`process_pdf_bytes`] that runs on the blocking pool
pub async fn process_bytes(bytes: Vec<u8>, options: &MarginOptions) -> Result<Vec<u8>> {
    options.validate()?;
    let options = options.clone();

    tokio::task::spawn_blocking(move || process_pdf_bytes(&bytes, &options)).await?
}

fn build_output_document(
    source: &SourceDocument,
    selection: &PageSelection,
    margin: &MarginConfig,
) -> Result<Document> {
    let mut output = Document::with_version(OUTPUT_PDF_VERSION);
    let pages_tree_id = output.new_object_id();
    let mut page_refs = Vec::with_capacity(source.page_count());
    let mut xobject_cache: HashMap<ObjectId, ObjectId> = HashMap::new();

    for (index, &page_id) in source.page_ids().iter().enumerate() {
        let page_id = transform_page(
            &mut output,
            source.document(),
            page_id,
            selection.contains(index),
            margin,
            pages_tree_id,
            &mut xobject_cache,
        )
        .map_err(|e| MarginError::Transform {
            page: index + 1,
            reason: e.to_string(),
        })?;
        page_refs.push(Object::Reference(page_id));
    }

    // Create pages tree
    let count = page_refs.len() as i64;
    let pages_dict = Dictionary::from_iter(vec![
        ("Type", Object::Name(b"Pages".to_vec())),
        ("Kids", Object::Array(page_refs)),
        ("Count", Object::Integer(count)),
    ]);
    output
        .objects
        .insert(pages_tree_id, Object::Dictionary(pages_dict));

    // Create catalog
    let catalog_id = output.add_object(Dictionary::from_iter(vec![
        ("Type", Object::Name(b"Catalog".to_vec())),
        ("Pages", Object::Reference(pages_tree_id)),
    ]));

    output.trailer.set("Root", catalog_id);

    Ok(output)
}

/// Produce the output page for one source page
fn transform_page(
    output: &mut Document,
    source: &Document,
    page_id: ObjectId,
    apply_margin: bool,
    margin: &MarginConfig,
    parent_pages_id: ObjectId,
    xobject_cache: &mut HashMap<ObjectId, ObjectId>,
) -> Result<ObjectId> {
    let page_box = get_page_box(source, page_id)?;
    let geometry =
        PageGeometry::for_margin(page_box.width(), page_box.height(), margin, apply_margin);

    render_margin_page(
        output,
        source,
        page_id,
        &page_box,
        &geometry,
        parent_pages_id,
        xobject_cache,
    )
}
