use formdom::{to_markup, Document, Element, Filter, HandlerId, DOCUMENT_ROOT};

fn sample() -> Document {
    Document::parse(
        r##"
        <form id="form">
            <div id="list" class="items">
                <div id="a" class="item"><span id="a-label">A</span></div>
                <div id="b" class="item"><span id="b-label">B</span></div>
            </div>
            <a id="add" class="add" href="#">Add</a>
        </form>
        "##,
    )
    .unwrap()
}

// ============================================================================
// Lookup
// ============================================================================

#[test]
fn test_parse_wraps_fragment_in_root() {
    let doc = sample();
    assert_eq!(doc.root().id, DOCUMENT_ROOT);
    assert_eq!(doc.root().child_elements().len(), 1);
    assert!(doc.contains("form"));
    assert!(!doc.contains("missing"));
}

#[test]
fn test_query_class_in_document_order() {
    let doc = sample();
    let ids: Vec<_> = doc
        .query_class("form", "item")
        .iter()
        .map(|el| el.id.as_str())
        .collect();
    assert_eq!(ids, vec!["a", "b"]);
}

#[test]
fn test_query_class_excludes_scope() {
    let doc = sample();
    assert!(doc.query_class("a", "item").is_empty());
    assert!(doc.query_class("missing", "item").is_empty());
}

#[test]
fn test_closest_walks_up_from_self() {
    let doc = sample();
    assert_eq!(doc.closest("a-label", "item").map(|el| el.id.as_str()), Some("a"));
    assert_eq!(doc.closest("b", "item").map(|el| el.id.as_str()), Some("b"));
    assert!(doc.closest("add", "item").is_none());
}

#[test]
fn test_path_to() {
    let doc = sample();
    let path: Vec<_> = doc
        .path_to("b-label")
        .unwrap()
        .iter()
        .map(|el| el.id.as_str())
        .collect();
    assert_eq!(path, vec![DOCUMENT_ROOT, "form", "list", "b", "b-label"]);
}

// ============================================================================
// Mutation
// ============================================================================

#[test]
fn test_append_child() {
    let mut doc = sample();
    let id = doc
        .append_child("list", Element::div().id("c").class("item"))
        .unwrap();
    assert_eq!(id, "c");
    assert_eq!(doc.query_class("list", "item").len(), 3);

    assert!(doc.append_child("missing", Element::div()).is_none());
}

#[test]
fn test_remove_subtree() {
    let mut doc = sample();
    let removed = doc.remove("a").unwrap();
    assert_eq!(removed.text_content(), "A");
    assert!(!doc.contains("a"));
    assert!(!doc.contains("a-label"));
    assert!(doc.remove("a").is_none());
}

#[test]
fn test_remove_drops_listeners_in_subtree() {
    let mut doc = sample();
    assert!(doc.on("a-label", Filter::Itself, HandlerId::new("label")));
    assert!(doc.on("form", Filter::Itself, HandlerId::new("form")));

    doc.remove("a");

    assert_eq!(doc.listeners().len(), 1);
    assert_eq!(doc.listeners()[0].element, "form");
}

#[test]
fn test_set_attribute_through_get_mut() {
    let mut doc = sample();
    doc.get_mut("a").unwrap().set_attr("index", "0");
    assert_eq!(doc.get("a").unwrap().get_attr("index"), Some("0"));
}

// ============================================================================
// Cloning
// ============================================================================

#[test]
fn test_deep_clone_gets_fresh_ids() {
    let doc = sample();
    let original = doc.get("a").unwrap();
    let copy = original.deep_clone();

    assert_ne!(copy.id, original.id);
    assert_ne!(copy.child_elements()[0].id, "a-label");
    assert!(copy.anonymous);
    assert!(copy.has_class("item"));
    assert_eq!(
        to_markup(&copy),
        r#"<div class="item"><span>A</span></div>"#
    );
}

#[test]
fn test_attribute_names_ignore_case() {
    let doc = Document::parse(r#"<div id="host" templateName="media"></div>"#).unwrap();
    let host = doc.get("host").unwrap();
    assert_eq!(host.get_attr("templateName"), Some("media"));
    assert_eq!(host.get_attr("templatename"), Some("media"));
}

#[test]
fn test_renew_id_keeps_authored_id_as_attribute() {
    let mut el = Element::div().id("row").class("item");
    el.renew_id();

    assert_ne!(el.id, "row");
    assert!(el.anonymous);
    assert_eq!(el.get_attr("id"), Some("row"));
    assert_eq!(to_markup(&el), r#"<div class="item" id="row"></div>"#);
}

#[test]
fn test_adopt_renews_only_taken_ids() {
    let doc = sample();
    let mut incoming = Element::div()
        .id("a")
        .child(Element::new("span").id("a-label"))
        .child(Element::new("span").id("c-label"))
        .child(Element::new("span").id("c-label"));

    assert_eq!(doc.adopt(&mut incoming), 3);

    assert_ne!(incoming.id, "a");
    let children: Vec<_> = incoming.child_elements().iter().map(|el| el.id.as_str()).collect();
    assert_ne!(children[0], "a-label");
    assert_eq!(children[1], "c-label");
    assert_ne!(children[2], "c-label");

    let mut fresh = Element::div().id("d");
    assert_eq!(doc.adopt(&mut fresh), 0);
    assert_eq!(fresh.id, "d");
}
