//! End-to-end walk through a bounded media collection driven by clicks.

use form_collection::{CollectionOptions, CollectionWidget, EventResult};
use formdom::{Document, Event};

const MARKUP: &str = r##"
<form id="product">
    <div id="media" class="media-collection">
        <div id="media-items" class="collection-items"
             template="&lt;div&gt;__media_prototype__&lt;/div&gt;"
             templateName="media_prototype"></div>
        <a id="media-add" class="collection-add" href="#">Add media</a>
        <a class="collection-remove" href="#" style="display: none">Remove</a>
    </div>
</form>
"##;

fn remove_trigger_of(doc: &Document, item: &str) -> String {
    doc.query_class(item, "collection-remove")[0].id.clone()
}

#[test]
fn test_bounded_collection_walkthrough() {
    let mut doc = Document::parse(MARKUP).unwrap();
    let options = CollectionOptions::new()
        .minimum_elements(1)
        .maximum_elements(3);
    let mut widget = CollectionWidget::attach(&mut doc, "media", options).unwrap();
    assert_eq!(widget.count(), 0);

    let mut counts = Vec::new();
    for _ in 0..3 {
        widget.add_one(&mut doc).unwrap();
        counts.push(widget.count());
    }
    assert_eq!(counts, vec![1, 2, 3]);

    // Fourth add is refused at the maximum.
    assert_eq!(widget.add_one(&mut doc).unwrap(), None);
    assert_eq!(widget.count(), 3);

    let texts: Vec<String> = widget
        .items()
        .iter()
        .map(|id| doc.get(id).unwrap().child_elements()[0].text_content())
        .collect();
    assert_eq!(texts, vec!["1", "2", "3"]);

    let last = widget.items()[2].clone();
    let trigger = remove_trigger_of(&doc, &last);
    widget.remove_one(&mut doc, &trigger);
    assert_eq!(widget.count(), 2);

    // Removal stops at the minimum.
    for _ in 0..3 {
        let item = widget.items()[0].clone();
        let trigger = remove_trigger_of(&doc, &item);
        widget.remove_one(&mut doc, &trigger);
    }
    assert_eq!(widget.count(), 1);
    assert_eq!(doc.query_class("media-items", "collection-item").len(), 1);
}

#[test]
fn test_walkthrough_by_clicks() {
    let mut doc = Document::parse(MARKUP).unwrap();
    let options = CollectionOptions::new()
        .minimum_elements(1)
        .maximum_elements(3);
    let mut widget = CollectionWidget::attach(&mut doc, "media", options).unwrap();

    for _ in 0..4 {
        let result = widget
            .handle_event(&mut doc, &Event::click("media-add"))
            .unwrap();
        assert_eq!(result, EventResult::Consumed);
    }
    assert_eq!(widget.count(), 3);

    while let Some(item) = widget.items().first().cloned() {
        let trigger = remove_trigger_of(&doc, &item);
        widget
            .handle_event(&mut doc, &Event::click(trigger))
            .unwrap();
        if widget.count() == 1 {
            break;
        }
    }
    assert_eq!(widget.count(), 1);

    // At the minimum a click on the last remove trigger changes nothing.
    let item = widget.items()[0].clone();
    let trigger = remove_trigger_of(&doc, &item);
    widget
        .handle_event(&mut doc, &Event::click(trigger.as_str()))
        .unwrap();
    assert_eq!(widget.count(), 1);
    assert!(doc.contains(&item));
}
