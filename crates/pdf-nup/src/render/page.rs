//! Output page rendering for imposition

use crate::impose::Sheet;
use crate::types::Result;
use lopdf::{Dictionary, Document, Object, ObjectId, Stream};

use super::xobject::RenderCache;

/// Build a new document with one page per composed sheet.
pub fn render_document(source: &Document, sheets: &[Sheet<ObjectId>]) -> Result<Document> {
    let mut output = Document::with_version("1.7");
    let pages_tree_id = output.new_object_id();
    let mut cache = RenderCache::new();

    let page_refs = sheets
        .iter()
        .map(|sheet| {
            render_sheet(&mut output, source, sheet, pages_tree_id, &mut cache)
                .map(Object::Reference)
        })
        .collect::<Result<Vec<_>>>()?;

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

/// Render one composed sheet as a page of `output`.
pub fn render_sheet(
    output: &mut Document,
    source: &Document,
    sheet: &Sheet<ObjectId>,
    parent_pages_id: ObjectId,
    cache: &mut RenderCache,
) -> Result<ObjectId> {
    let mut page_dict = Dictionary::new();
    page_dict.set("Type", Object::Name(b"Page".to_vec()));
    page_dict.set("Parent", Object::Reference(parent_pages_id));
    page_dict.set(
        "MediaBox",
        Object::Array(vec![
            Object::Integer(0),
            Object::Integer(0),
            Object::Real(sheet.size.width),
            Object::Real(sheet.size.height),
        ]),
    );

    let mut content_ops = Vec::with_capacity(sheet.len());
    let mut xobjects = Dictionary::new();

    for placement in &sheet.placements {
        let xobject = cache.page_xobject(output, source, placement.content)?;
        let xobject_name = format!("P{}", xobject.id.0);
        xobjects.set(xobject_name.as_bytes(), Object::Reference(xobject.id));

        // Translate only; shift by the MediaBox origin so its corner lands on the cell
        let (origin_x, origin_y) = xobject.origin;
        content_ops.push(format!(
            "q 1 0 0 1 {} {} cm /{} Do Q\n",
            placement.x - origin_x,
            placement.y - origin_y,
            xobject_name
        ));
    }

    let mut resources = Dictionary::new();
    resources.set("XObject", Object::Dictionary(xobjects));

    let content = content_ops.join("");
    let content_id = output.add_object(Stream::new(Dictionary::new(), content.into_bytes()));

    page_dict.set("Contents", Object::Reference(content_id));
    page_dict.set("Resources", Object::Dictionary(resources));

    Ok(output.add_object(page_dict))
}
