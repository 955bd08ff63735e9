//! Loaded source documents

use crate::render::get_page_dimensions;
use crate::types::*;
use lopdf::{Dictionary, Document, Object, ObjectId};

/// A parsed source PDF with its pages in document order
#[derive(Debug, Clone)]
pub struct SourceDocument {
    document: Document,
    page_ids: Vec<ObjectId>,
}

impl SourceDocument {
    /// Parse PDF bytes. Fails with [`MarginError::Load`] if the bytes are
    /// not a PDF lopdf can read, or if the catalog has no page tree.
    pub fn load(bytes: &[u8]) -> Result<Self> {
        let document = Document::load_mem(bytes).map_err(MarginError::Load)?;
        Self::from_document(document)
    }

    /// Wrap an already parsed document. A page tree with no kids is a valid
    /// zero-page document; a missing page tree is a [`MarginError::Load`].
    pub fn from_document(document: Document) -> Result<Self> {
        page_tree_root(&document).map_err(MarginError::Load)?;

        // get_pages is keyed by 1-based page number, so values are in page order
        let page_ids = document.get_pages().values().copied().collect();
        Ok(Self { document, page_ids })
    }

    pub fn page_count(&self) -> usize {
        self.page_ids.len()
    }

    /// Width and height of a page in points, or `None` past the last page
    pub fn page_size(&self, index: usize) -> Option<(f32, f32)> {
        let page_id = *self.page_ids.get(index)?;
        get_page_dimensions(&self.document, page_id).ok()
    }

    pub fn page_id(&self, index: usize) -> Option<ObjectId> {
        self.page_ids.get(index).copied()
    }

    pub fn page_ids(&self) -> &[ObjectId] {
        &self.page_ids
    }

    pub fn document(&self) -> &Document {
        &self.document
    }
}

/// The catalog's `/Pages` dictionary
fn page_tree_root(document: &Document) -> lopdf::Result<&Dictionary> {
    match document.catalog()?.get(b"Pages")? {
        Object::Reference(id) => document.get_dictionary(*id),
        other => other.as_dict(),
    }
}
