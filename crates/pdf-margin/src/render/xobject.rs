//! XObject creation for margin insertion
//!
//! This module turns a source page into a Form XObject so the output page
//! can draw it unscaled at an offset, without touching the source content.

use crate::constants::{DEFAULT_PAGE_DIMENSIONS, MAX_INHERITANCE_DEPTH};
use crate::types::{MarginError, Result};
use lopdf::{Dictionary, Document, Object, ObjectId, Stream};
use std::collections::HashMap;

// =============================================================================
// Page Box
// =============================================================================

/// A page's MediaBox in source user space
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageBox {
    pub x0: f32,
    pub y0: f32,
    pub x1: f32,
    pub y1: f32,
}

impl PageBox {
    pub fn from_dimensions(width: f32, height: f32) -> Self {
        Self {
            x0: 0.0,
            y0: 0.0,
            x1: width,
            y1: height,
        }
    }

    pub fn width(&self) -> f32 {
        (self.x1 - self.x0).abs()
    }

    pub fn height(&self) -> f32 {
        (self.y1 - self.y0).abs()
    }

    /// Lower-left corner, whatever order the box was written in
    pub fn origin(&self) -> (f32, f32) {
        (self.x0.min(self.x1), self.y0.min(self.y1))
    }

    fn to_object(self) -> Object {
        Object::Array(vec![
            Object::Real(self.x0),
            Object::Real(self.y0),
            Object::Real(self.x1),
            Object::Real(self.y1),
        ])
    }
}

/// Get the page's MediaBox, following page tree inheritance.
///
/// Pages without a usable MediaBox fall back to US Letter.
pub fn get_page_box(doc: &Document, page_id: ObjectId) -> Result<PageBox> {
    let media_box = inherited_attribute(doc, page_id, b"MediaBox")?
        .map(|obj| resolve(doc, obj))
        .transpose()?
        .and_then(|obj| obj.as_array().ok())
        .and_then(|arr| {
            let values: Vec<f32> = arr
                .iter()
                .filter_map(|item| resolve(doc, item).ok().and_then(extract_number))
                .collect();
            (values.len() == 4).then(|| PageBox {
                x0: values[0],
                y0: values[1],
                x1: values[2],
                y1: values[3],
            })
        });

    Ok(media_box.unwrap_or_else(|| {
        log::warn!(
            "Page {:?} has no usable MediaBox, assuming {}x{}",
            page_id,
            DEFAULT_PAGE_DIMENSIONS.0,
            DEFAULT_PAGE_DIMENSIONS.1
        );
        PageBox::from_dimensions(DEFAULT_PAGE_DIMENSIONS.0, DEFAULT_PAGE_DIMENSIONS.1)
    }))
}

/// Get source page dimensions (width, height) in points
pub fn get_page_dimensions(doc: &Document, page_id: ObjectId) -> Result<(f32, f32)> {
    let page_box = get_page_box(doc, page_id)?;
    Ok((page_box.width(), page_box.height()))
}

/// Look up a page attribute, walking up `/Parent` links when the page
/// itself does not define it.
pub(crate) fn inherited_attribute<'a>(
    doc: &'a Document,
    page_id: ObjectId,
    key: &[u8],
) -> Result<Option<&'a Object>> {
    let mut dict = doc.get_dictionary(page_id)?;

    for _ in 0..MAX_INHERITANCE_DEPTH {
        if let Ok(value) = dict.get(key) {
            return Ok(Some(value));
        }
        match dict.get(b"Parent").and_then(Object::as_reference) {
            Ok(parent_id) => dict = doc.get_dictionary(parent_id)?,
            Err(_) => return Ok(None),
        }
    }

    Ok(None)
}

fn resolve<'a>(doc: &'a Document, obj: &'a Object) -> Result<&'a Object> {
    match obj {
        Object::Reference(id) => Ok(doc.get_object(*id)?),
        _ => Ok(obj),
    }
}

/// Extract numeric value from a PDF object
fn extract_number(obj: &Object) -> Option<f32> {
    match obj {
        Object::Integer(i) => Some(*i as f32),
        Object::Real(r) => Some(*r),
        _ => None,
    }
}

// =============================================================================
// XObject Creation
// =============================================================================

/// Create a Form XObject from a source page.
///
/// The XObject's BBox is the page's MediaBox, so drawing it with an
/// identity scale reproduces the page at its native size.
///
/// # Arguments
/// * `output` - The output document to add the XObject to
/// * `source` - The source document containing the page
/// * `page_id` - The object ID of the source page
/// * `page_box` - The page's MediaBox, as resolved by [`get_page_box`]
/// * `cache` - Source-to-output object mapping, so shared resources are copied once
pub fn create_page_xobject(
    output: &mut Document,
    source: &Document,
    page_id: ObjectId,
    page_box: &PageBox,
    cache: &mut HashMap<ObjectId, ObjectId>,
) -> Result<ObjectId> {
    let content = get_page_content(source, page_id)?;

    let mut xobject_dict = Dictionary::new();
    xobject_dict.set("Type", Object::Name(b"XObject".to_vec()));
    xobject_dict.set("Subtype", Object::Name(b"Form".to_vec()));
    xobject_dict.set("BBox", page_box.to_object());
    xobject_dict.set("FormType", Object::Integer(1));

    if let Some(resources) = inherited_attribute(source, page_id, b"Resources")? {
        xobject_dict.set(
            "Resources",
            copy_object_deep(output, source, resources, cache)?,
        );
    }

    // Encoded content keeps its filter chain
    for key in [b"Filter".as_slice(), b"DecodeParms".as_slice()] {
        if let Ok(value) = content.filter_entries.get(key) {
            xobject_dict.set(key, copy_object_deep(output, source, value, cache)?);
        }
    }

    Ok(output.add_object(Stream::new(xobject_dict, content.data)))
}

// =============================================================================
// Page Content Extraction
// =============================================================================

/// Content stream bytes plus the filter entries still needed to decode them
struct PageContent {
    data: Vec<u8>,
    filter_entries: Dictionary,
}

impl PageContent {
    fn decoded(data: Vec<u8>) -> Self {
        Self {
            data,
            filter_entries: Dictionary::new(),
        }
    }
}

/// Get the content stream data from a page.
fn get_page_content(doc: &Document, page_id: ObjectId) -> Result<PageContent> {
    let page_dict = doc.get_dictionary(page_id)?;
    let contents = match page_dict.get(b"Contents") {
        Ok(c) => resolve(doc, c)?,
        Err(_) => return Ok(PageContent::decoded(Vec::new())), // No content = blank page
    };

    match contents {
        Object::Stream(stream) => Ok(single_content_stream(stream)),
        Object::Array(arr) => Ok(PageContent::decoded(concatenated_content_streams(doc, arr)?)),
        _ => Ok(PageContent::decoded(Vec::new())),
    }
}

/// Decode a single content stream, or keep it encoded if its filter is unsupported
fn single_content_stream(stream: &Stream) -> PageContent {
    if !stream.dict.has(b"Filter") {
        return PageContent::decoded(stream.content.clone());
    }

    match stream.decompressed_content() {
        Ok(data) => PageContent::decoded(data),
        Err(e) => {
            log::warn!("Keeping content stream encoded, could not decode it: {}", e);
            let mut filter_entries = Dictionary::new();
            for key in [b"Filter".as_slice(), b"DecodeParms".as_slice()] {
                if let Ok(value) = stream.dict.get(key) {
                    filter_entries.set(key, value.clone());
                }
            }
            PageContent {
                data: stream.content.clone(),
                filter_entries,
            }
        }
    }
}

/// Concatenate multiple content streams into one decoded buffer
fn concatenated_content_streams(doc: &Document, refs: &[Object]) -> Result<Vec<u8>> {
    let mut result = Vec::new();

    for obj in refs {
        let Ok(stream) = resolve(doc, obj)?.as_stream() else {
            continue;
        };
        if stream.dict.has(b"Filter") {
            let content = stream.decompressed_content().map_err(|e| {
                MarginError::UnsupportedContent(format!(
                    "cannot decode one of {} content streams: {}",
                    refs.len(),
                    e
                ))
            })?;
            result.extend_from_slice(&content);
        } else {
            result.extend_from_slice(&stream.content);
        }
        result.push(b'\n');
    }

    Ok(result)
}

// =============================================================================
// Deep Copy
// =============================================================================

/// Deep copy an object from source to output document, following references.
///
/// Each referenced source object is copied at most once; its output ID is
/// reserved before recursing so reference cycles terminate.
pub fn copy_object_deep(
    output: &mut Document,
    source: &Document,
    obj: &Object,
    cache: &mut HashMap<ObjectId, ObjectId>,
) -> Result<Object> {
    match obj {
        Object::Reference(id) => {
            if let Some(&new_id) = cache.get(id) {
                return Ok(Object::Reference(new_id));
            }

            let new_id = output.new_object_id();
            cache.insert(*id, new_id);

            let referenced = source.get_object(*id)?;
            let copied = copy_object_deep(output, source, referenced, cache)?;
            output.objects.insert(new_id, copied);

            Ok(Object::Reference(new_id))
        }
        Object::Dictionary(dict) => Ok(Object::Dictionary(copy_dictionary(
            output, source, dict, cache,
        )?)),
        Object::Array(arr) => {
            let new_arr: Result<Vec<_>> = arr
                .iter()
                .map(|item| copy_object_deep(output, source, item, cache))
                .collect();
            Ok(Object::Array(new_arr?))
        }
        Object::Stream(stream) => Ok(Object::Stream(Stream {
            dict: copy_dictionary(output, source, &stream.dict, cache)?,
            content: stream.content.clone(),
            allows_compression: stream.allows_compression,
            start_position: None,
        })),
        // Primitive types: just clone
        _ => Ok(obj.clone()),
    }
}

fn copy_dictionary(
    output: &mut Document,
    source: &Document,
    dict: &Dictionary,
    cache: &mut HashMap<ObjectId, ObjectId>,
) -> Result<Dictionary> {
    let mut new_dict = Dictionary::new();
    for (key, value) in dict.iter() {
        new_dict.set(key.clone(), copy_object_deep(output, source, value, cache)?);
    }
    Ok(new_dict)
}
