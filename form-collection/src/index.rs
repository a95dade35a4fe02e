//! Index bookkeeping for items.

use formdom::Document;

/// Stamp `attr` on each item with its position in `items`, starting at 0.
pub fn assign_indices(doc: &mut Document, items: &[String], attr: &str) {
    for (index, id) in items.iter().enumerate() {
        stamp_index(doc, id, attr, index);
    }
}

/// Stamp a single item. Returns false if the item is not in the document.
pub fn stamp_index(doc: &mut Document, id: &str, attr: &str, index: usize) -> bool {
    match doc.get_mut(id) {
        Some(item) => {
            item.set_attr(attr, index.to_string());
            true
        }
        None => false,
    }
}

/// Read back the index stamped on an item.
pub fn read_index(doc: &Document, id: &str, attr: &str) -> Option<usize> {
    doc.get(id)?.get_attr(attr)?.parse().ok()
}
