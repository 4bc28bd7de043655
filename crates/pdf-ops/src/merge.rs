//! Appending documents one after another

use crate::pages::{flatten_inherited, pages_root};
use crate::types::*;
use lopdf::{Document, Object, ObjectId};
use log::{debug, info};

/// Append the pages of every document, in order, into the first one.
pub fn merge_documents(documents: Vec<Document>) -> Result<Document> {
    let total = documents.len();
    let mut documents = documents.into_iter();
    let mut merged = documents.next().ok_or(OpsError::NoInputs)?;
    info!("  [1/{}] {} pages", total, merged.get_pages().len());

    let pages_id = pages_root(&merged)?;
    let mut max_id = merged.max_id;

    for (index, mut doc) in documents.enumerate() {
        // Adjust object IDs to avoid conflicts
        doc.renumber_objects_with(max_id + 1);
        max_id = doc.max_id;

        let page_ids: Vec<ObjectId> = doc.get_pages().into_values().collect();
        info!("  [{}/{}] {} pages", index + 2, total, page_ids.len());

        for &page_id in &page_ids {
            flatten_inherited(&mut doc, page_id)?;
            doc.get_dictionary_mut(page_id)?
                .set("Parent", Object::Reference(pages_id));
        }

        merged.objects.extend(doc.objects);
        append_kids(&mut merged, pages_id, &page_ids)?;
    }

    merged.max_id = max_id;
    // Catalogs and page trees of the appended documents are now orphans
    merged.prune_objects();
    merged.renumber_objects();
    debug!("Merged document has {} objects", merged.objects.len());

    Ok(merged)
}

fn append_kids(doc: &mut Document, pages_id: ObjectId, page_ids: &[ObjectId]) -> Result<()> {
    let pages = doc.get_dictionary_mut(pages_id)?;
    let count = pages.get(b"Count").and_then(Object::as_i64).unwrap_or(0);

    pages
        .get_mut(b"Kids")?
        .as_array_mut()?
        .extend(page_ids.iter().map(|&id| Object::Reference(id)));
    pages.set("Count", Object::Integer(count + page_ids.len() as i64));
    Ok(())
}
