//! Drives a collection with simulated clicks and prints the markup after
//! each step. Logs go to `form-collection-demo.log`.

use std::fs::File;

use form_collection::{CollectionOptions, CollectionWidget};
use formdom::{to_markup, Document, Event};
use simplelog::{Config, LevelFilter, WriteLogger};

const PAGE: &str = r#"
<form id="order">
    <div id="lines">
        <ul class="collection-items"
            template="&lt;li&gt;&lt;input name=&quot;order[lines][__name__][sku]&quot;&gt;&lt;/li&gt;">
            <li class="collection-item"><input name="order[lines][0][sku]" value="A-1"><a class="collection-remove">x</a></li>
        </ul>
        <button id="add-line" class="collection-add">Add line</button>
        <a class="collection-remove" hidden>x</a>
    </div>
</form>
"#;

fn main() {
    let log_file = File::create("form-collection-demo.log").expect("Failed to create log file");
    WriteLogger::init(LevelFilter::Trace, Config::default(), log_file)
        .expect("Failed to initialize logger");

    let mut doc = Document::parse(PAGE).expect("Failed to parse page");
    let options = CollectionOptions::new()
        .minimum_elements(1)
        .maximum_elements(3)
        .on_loaded(|_, event| println!("loaded with {} line(s)", event.count))
        .on_added(|_, event| println!("added {}", event.item))
        .on_removed(|_, event| println!("removing {}", event.item));

    let mut widget =
        CollectionWidget::attach(&mut doc, "lines", options).expect("Failed to attach collection");

    for _ in 0..3 {
        widget
            .handle_event(&mut doc, &Event::click("add-line"))
            .expect("Failed to add line");
    }
    println!("{} line(s)", widget.count());

    let first = widget.items()[0].clone();
    let trigger = doc.query_class(&first, "collection-remove")[0].id.clone();
    widget
        .handle_event(&mut doc, &Event::click(trigger))
        .expect("Failed to remove line");
    println!("{} line(s)", widget.count());

    if let Some(form) = doc.get("order") {
        println!("{}", to_markup(form));
    }
}
