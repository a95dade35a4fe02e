//! Structural conventions the widget discovers elements by.

/// Class and attribute names of the collection markup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Conventions {
    /// Class of the single element holding all items.
    pub items_class: String,
    /// Class of each item wrapper.
    pub item_class: String,
    /// Class of the add trigger(s).
    pub add_class: String,
    /// Class of the remove triggers, including the hidden clone source.
    pub remove_class: String,
    /// Attribute on the items host holding the item template markup.
    pub template_attr: String,
    /// Attribute on the items host naming the placeholder token.
    pub template_name_attr: String,
    /// Attribute stamped on each item with its index.
    pub index_attr: String,
}

impl Default for Conventions {
    fn default() -> Self {
        Self {
            items_class: "collection-items".to_string(),
            item_class: "collection-item".to_string(),
            add_class: "collection-add".to_string(),
            remove_class: "collection-remove".to_string(),
            template_attr: "template".to_string(),
            template_name_attr: "templateName".to_string(),
            index_attr: "index".to_string(),
        }
    }
}
