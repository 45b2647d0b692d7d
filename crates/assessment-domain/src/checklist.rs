//! Sections and items of the checklist.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::instance::Instance;

/// One checklist question. Items come from the static template and are never
/// created or removed at runtime; only their instance list changes.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Item {
    pub id: String,
    pub text: String,
    #[serde(default)]
    pub is_repeatable: bool,
    pub instances: Vec<Arc<Instance>>,
}

impl Item {
    /// Creates an item holding exactly one fresh instance.
    pub fn new(id: impl Into<String>, text: impl Into<String>, is_repeatable: bool) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
            is_repeatable,
            instances: vec![Arc::new(Instance::new())],
        }
    }

    pub fn instance(&self, index: usize) -> Option<&Instance> {
        self.instances.get(index).map(Arc::as_ref)
    }

    pub fn instance_count(&self) -> usize {
        self.instances.len()
    }

    pub fn is_multi_instance(&self) -> bool {
        self.instances.len() > 1
    }

    /// Positional label (`{item id}-{index}`); display only, shifts on removal.
    pub fn positional_label(&self, index: usize) -> String {
        format!("{}-{}", self.id, index)
    }

    /// Item text suffixed with the 1-based ordinal when the item has several instances.
    pub fn instance_title(&self, index: usize) -> String {
        if self.is_multi_instance() {
            format!("{} #{}", self.text, index + 1)
        } else {
            self.text.clone()
        }
    }
}

/// Top-level grouping of checklist items. The title is unique within a form.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Section {
    pub title: String,
    pub items: Vec<Arc<Item>>,
}

impl Section {
    pub fn new(title: impl Into<String>, items: Vec<Item>) -> Self {
        Self {
            title: title.into(),
            items: items.into_iter().map(Arc::new).collect(),
        }
    }

    pub fn item(&self, index: usize) -> Option<&Item> {
        self.items.get(index).map(Arc::as_ref)
    }

    pub fn instances(&self) -> impl Iterator<Item = &Instance> {
        self.items
            .iter()
            .flat_map(|item| item.instances.iter().map(Arc::as_ref))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_item_starts_with_single_unanswered_instance() {
        let item = Item::new("3.3", "Proses RDF", true);
        assert_eq!(item.instance_count(), 1);
        assert_eq!(item.instance(0).unwrap().status, None);
        assert_eq!(item.positional_label(0), "3.3-0");
    }

    #[test]
    fn instance_title_adds_ordinal_only_for_multiple_instances() {
        let mut item = Item::new("1.1", "Dinding & Ventilasi", true);
        assert_eq!(item.instance_title(0), "Dinding & Ventilasi");
        item.instances.push(Arc::new(Instance::new()));
        assert_eq!(item.instance_title(1), "Dinding & Ventilasi #2");
    }
}
