//! Output page rendering for margin insertion

use crate::constants::EMBEDDED_PAGE_NAME;
use crate::geometry::PageGeometry;
use crate::types::Result;
use lopdf::{Dictionary, Document, Object, ObjectId, Stream};
use std::collections::HashMap;

use super::xobject::{PageBox, create_page_xobject};

/// Render one output page: a blank canvas sized by `geometry` with the
/// source page drawn unscaled at `(geometry.offset_x, 0)`.
///
/// The source document is only read; the new page, its content stream and
/// the embedded XObject are all owned by `output`.
///
/// # Arguments
/// * `output` - The output document
/// * `source` - The source document containing the page
/// * `source_page_id` - Object ID of the source page
/// * `page_box` - The source page's resolved MediaBox
/// * `geometry` - Output page size and content offset
/// * `parent_pages_id` - The parent Pages object ID
/// * `xobject_cache` - Object copy cache shared across the document
pub fn render_margin_page(
    output: &mut Document,
    source: &Document,
    source_page_id: ObjectId,
    page_box: &PageBox,
    geometry: &PageGeometry,
    parent_pages_id: ObjectId,
    xobject_cache: &mut HashMap<ObjectId, ObjectId>,
) -> Result<ObjectId> {
    // Create page dictionary
    let mut page_dict = Dictionary::new();
    page_dict.set("Type", Object::Name(b"Page".to_vec()));
    page_dict.set("Parent", Object::Reference(parent_pages_id));
    page_dict.set(
        "MediaBox",
        Object::Array(vec![
            Object::Integer(0),
            Object::Integer(0),
            Object::Real(geometry.width),
            Object::Real(geometry.height),
        ]),
    );

    let xobject_id =
        create_page_xobject(output, source, source_page_id, page_box, xobject_cache)?;
    let (origin_x, origin_y) = page_box.origin();

    let mut xobjects = Dictionary::new();
    xobjects.set(EMBEDDED_PAGE_NAME, Object::Reference(xobject_id));

    let mut resources = Dictionary::new();
    resources.set("XObject", Object::Dictionary(xobjects));

    // Move the source box's lower-left corner onto (offset_x, 0)
    let content = generate_placement_command(
        EMBEDDED_PAGE_NAME,
        geometry.offset_x - origin_x,
        -origin_y,
    );
    let content_id = output.add_object(Stream::new(Dictionary::new(), content.into_bytes()));

    page_dict.set("Contents", Object::Reference(content_id));
    page_dict.set("Resources", Object::Dictionary(resources));

    Ok(output.add_object(page_dict))
}

/// Generate the PDF content stream command to draw a page unscaled.
fn generate_placement_command(xobject_name: &str, x: f32, y: f32) -> String {
    format!(
        "q 1 0 0 1 {} {} cm /{} Do Q\n",
        format_number(x),
        format_number(y),
        xobject_name
    )
}

/// Format a coordinate for a content stream, never emitting `-0`
fn format_number(value: f32) -> String {
    if value == 0.0 {
        "0".to_string()
    } else {
        value.to_string()
    }
}
