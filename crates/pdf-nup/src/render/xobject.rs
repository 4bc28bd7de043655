//! XObject creation for imposition
//!
//! Source pages are wrapped as Form XObjects, which are then drawn onto
//! output sheets with a translation. Each source page becomes one XObject
//! per output document however many times it is placed.

use crate::types::*;
use lopdf::{Dictionary, Document, Object, ObjectId, Stream};
use std::collections::HashMap;

/// Guard against cyclic page trees when walking `/Parent` links
const MAX_INHERITANCE_DEPTH: usize = 32;

// =============================================================================
// XObject Creation
// =============================================================================

/// A source page already copied into the output document
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageXObject {
    pub id: ObjectId,
    /// Lower-left corner of the source MediaBox
    pub origin: (f32, f32),
}

/// Copies made into one output document, keyed by source object id
#[derive(Debug, Default)]
pub struct RenderCache {
    pages: HashMap<ObjectId, PageXObject>,
    objects: HashMap<ObjectId, ObjectId>,
}

impl RenderCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get or create the XObject for a source page.
    pub fn page_xobject(
        &mut self,
        output: &mut Document,
        source: &Document,
        page_id: ObjectId,
    ) -> Result<PageXObject> {
        if let Some(&existing) = self.pages.get(&page_id) {
            return Ok(existing);
        }
        let created = create_page_xobject(output, source, page_id, &mut self.objects)?;
        self.pages.insert(page_id, created);
        Ok(created)
    }
}

/// Create an XObject from a source page.
///
/// # Arguments
/// * `output` - The output document to add the XObject to
/// * `source` - The source document containing the page
/// * `page_id` - The object ID of the source page
/// * `cache` - Objects already deep-copied into `output`
pub fn create_page_xobject(
    output: &mut Document,
    source: &Document,
    page_id: ObjectId,
    cache: &mut HashMap<ObjectId, ObjectId>,
) -> Result<PageXObject> {
    let page_dict = source.get_dictionary(page_id)?;

    let [x0, y0, x1, y1] = media_box(source, page_id).ok_or(NupError::MissingMediaBox {
        page: page_number(source, page_id),
    })?;

    let content_data = get_page_content(source, page_dict)?;

    let mut xobject_dict = Dictionary::new();
    xobject_dict.set("Type", Object::Name(b"XObject".to_vec()));
    xobject_dict.set("Subtype", Object::Name(b"Form".to_vec()));
    xobject_dict.set(
        "BBox",
        Object::Array(vec![
            Object::Real(x0),
            Object::Real(y0),
            Object::Real(x1),
            Object::Real(y1),
        ]),
    );
    xobject_dict.set("FormType", Object::Integer(1));

    // Resources may live on an ancestor Pages node
    if let Some(resources) = inherited_attribute(source, page_id, b"Resources") {
        xobject_dict.set(
            "Resources",
            copy_object_deep(output, source, resources, cache)?,
        );
    }

    let id = output.add_object(Stream::new(xobject_dict, content_data));
    Ok(PageXObject {
        id,
        origin: (x0, y0),
    })
}

// =============================================================================
// Page Content Extraction
// =============================================================================

/// Get the content stream data from a page.
fn get_page_content(doc: &Document, page_dict: &Dictionary) -> Result<Vec<u8>> {
    let contents = match page_dict.get(b"Contents") {
        Ok(c) => c,
        Err(_) => return Ok(Vec::new()), // No content = blank page
    };

    match contents {
        Object::Reference(id) => get_single_content_stream(doc, *id),
        Object::Array(arr) => get_concatenated_content_streams(doc, arr),
        _ => Ok(Vec::new()),
    }
}

fn get_single_content_stream(doc: &Document, id: ObjectId) -> Result<Vec<u8>> {
    match doc.get_object(id)?.as_stream() {
        Ok(stream) => decoded_content(stream),
        Err(_) => Ok(Vec::new()),
    }
}

fn get_concatenated_content_streams(doc: &Document, refs: &[Object]) -> Result<Vec<u8>> {
    let mut result = Vec::new();

    for id in refs.iter().filter_map(|obj| obj.as_reference().ok()) {
        if let Ok(stream) = doc.get_object(id)?.as_stream() {
            result.extend_from_slice(&decoded_content(stream)?);
            result.push(b'\n');
        }
    }

    Ok(result)
}

/// Content bytes with any filters undone.
///
/// The XObject is written without a `/Filter`, so encoded bytes must never
/// reach it.
fn decoded_content(stream: &Stream) -> Result<Vec<u8>> {
    if stream.dict.has(b"Filter") {
        Ok(stream.decompressed_content()?)
    } else {
        Ok(stream.content.clone())
    }
}

// =============================================================================
// Deep Copy
// =============================================================================

/// Deep copy an object from source to output document, following references.
///
/// The target id is reserved before recursing, so reference cycles resolve
/// to the copy in progress.
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

// =============================================================================
// Page Dimensions
// =============================================================================

/// Read every page of `doc` in order with its dimensions, rounded to whole
/// points.
pub fn read_page_sizes(doc: &Document) -> Result<Vec<(ObjectId, PageSize)>> {
    doc.get_pages()
        .into_iter()
        .map(|(number, page_id)| {
            let [x0, y0, x1, y1] = media_box(doc, page_id).ok_or(NupError::MissingMediaBox {
                page: number as usize,
            })?;
            Ok((page_id, PageSize::rounded((x1 - x0).abs(), (y1 - y0).abs())))
        })
        .collect()
}

/// The page's MediaBox as `[x0, y0, x1, y1]`, inherited if necessary.
pub fn media_box(doc: &Document, page_id: ObjectId) -> Option<[f32; 4]> {
    let values = inherited_attribute(doc, page_id, b"MediaBox")
        .map(|obj| resolve(doc, obj))?
        .as_array()
        .ok()?;

    if values.len() != 4 {
        return None;
    }

    let mut rect = [0.0; 4];
    for (slot, value) in rect.iter_mut().zip(values) {
        *slot = extract_number(resolve(doc, value))?;
    }
    Some(rect)
}

/// Look up an inheritable page attribute, walking up the page tree.
fn inherited_attribute<'a>(doc: &'a Document, page_id: ObjectId, key: &[u8]) -> Option<&'a Object> {
    let mut node = doc.get_dictionary(page_id).ok()?;

    for _ in 0..MAX_INHERITANCE_DEPTH {
        if let Ok(value) = node.get(key) {
            return Some(value);
        }
        let parent = node.get(b"Parent").and_then(Object::as_reference).ok()?;
        node = doc.get_dictionary(parent).ok()?;
    }

    None
}

fn resolve<'a>(doc: &'a Document, obj: &'a Object) -> &'a Object {
    match obj {
        Object::Reference(id) => doc.get_object(*id).unwrap_or(obj),
        _ => obj,
    }
}

/// 1-based page number of `page_id`, or 0 when it is not in the page tree
fn page_number(doc: &Document, page_id: ObjectId) -> usize {
    doc.get_pages()
        .into_iter()
        .find(|(_, id)| *id == page_id)
        .map(|(number, _)| number as usize)
        .unwrap_or(0)
}

/// Extract numeric value from a PDF object
fn extract_number(obj: &Object) -> Option<f32> {
    match obj {
        Object::Integer(i) => Some(*i as f32),
        Object::Real(r) => Some(*r),
        _ => None,
    }
}
