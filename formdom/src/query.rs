use crate::element::{Content, Element};

/// Path from `root` down to the element with the given id, both ends
/// included. Returns None if the id is not in the tree.
pub fn path_to<'a>(root: &'a Element, id: &str) -> Option<Vec<&'a Element>> {
    let mut path = Vec::new();
    if path_to_element(root, id, &mut path) {
        Some(path)
    } else {
        None
    }
}

fn path_to_element<'a>(element: &'a Element, id: &str, path: &mut Vec<&'a Element>) -> bool {
    path.push(element);

    if element.id == id {
        return true;
    }

    if let Content::Children(children) = &element.content {
        for child in children {
            if path_to_element(child, id, path) {
                return true;
            }
        }
    }

    path.pop();
    false
}

/// All descendants of `root` carrying `class`, in document order.
/// `root` itself is never included.
pub fn query_class<'a>(root: &'a Element, class: &str) -> Vec<&'a Element> {
    let mut found = Vec::new();
    for child in root.child_elements() {
        query_class_element(child, class, &mut found);
    }
    found
}

fn query_class_element<'a>(element: &'a Element, class: &str, found: &mut Vec<&'a Element>) {
    if element.has_class(class) {
        found.push(element);
    }

    for child in element.child_elements() {
        query_class_element(child, class, found);
    }
}

/// Ids of `root` and every element below it.
pub fn subtree_ids(root: &Element) -> Vec<String> {
    let mut ids = vec![root.id.clone()];
    for child in root.child_elements() {
        ids.extend(subtree_ids(child));
    }
    ids
}

/// Detach the element with the given id from below `root`.
/// The root itself cannot be detached this way.
pub fn detach(root: &mut Element, id: &str) -> Option<Element> {
    let children = root.child_elements_mut()?;

    if let Some(pos) = children.iter().position(|child| child.id == id) {
        return Some(children.remove(pos));
    }

    children.iter_mut().find_map(|child| detach(child, id))
}
