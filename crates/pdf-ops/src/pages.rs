//! Page tree helpers shared by the operations

use crate::types::*;
use lopdf::{Document, Object, ObjectId};

/// Attributes a page may inherit from its ancestors
pub(crate) const INHERITABLE_ATTRIBUTES: [&[u8]; 4] = [b"Resources", b"MediaBox", b"CropBox", b"Rotate"];

const MAX_INHERITANCE_DEPTH: usize = 32;

/// Object id of the root Pages node
pub(crate) fn pages_root(doc: &Document) -> Result<ObjectId> {
    let root = doc.trailer.get(b"Root")?.as_reference()?;
    Ok(doc.get_dictionary(root)?.get(b"Pages")?.as_reference()?)
}

/// Page ids in reading order; an empty document is an error
pub(crate) fn page_ids(doc: &Document) -> Result<Vec<ObjectId>> {
    let ids: Vec<ObjectId> = doc.get_pages().into_values().collect();
    if ids.is_empty() {
        return Err(OpsError::EmptyDocument);
    }
    Ok(ids)
}

/// Look up a page attribute on the page or its nearest ancestor
pub(crate) fn inherited_attribute(doc: &Document, page_id: ObjectId, key: &[u8]) -> Option<Object> {
    let mut node = doc.get_dictionary(page_id).ok()?;

    for _ in 0..MAX_INHERITANCE_DEPTH {
        if let Ok(value) = node.get(key) {
            return Some(value.clone());
        }
        let parent = node.get(b"Parent").and_then(Object::as_reference).ok()?;
        node = doc.get_dictionary(parent).ok()?;
    }

    None
}

/// Copy inherited attributes onto the page itself so it can be moved to a
/// different parent.
pub(crate) fn flatten_inherited(doc: &mut Document, page_id: ObjectId) -> Result<()> {
    let inherited: Vec<(&[u8], Object)> = INHERITABLE_ATTRIBUTES
        .iter()
        .filter_map(|&key| inherited_attribute(doc, page_id, key).map(|value| (key, value)))
        .collect();

    let page = doc.get_dictionary_mut(page_id)?;
    for (key, value) in inherited {
        if !page.has(key) {
            page.set(key, value);
        }
    }
    Ok(())
}
