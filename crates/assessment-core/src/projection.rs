//! Read-only filtered views over the canonical tree.
//!
//! Projected nodes borrow from the form and carry their canonical
//! coordinates, so edits issued from a filtered view go to the right place.

use assessment_domain::{FormData, Instance, Item, Section, Status};

use crate::coordinate::{InstanceCoord, ItemCoord};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum ViewFilter {
    #[default]
    All,
    NotOkOnly,
}

impl ViewFilter {
    pub fn accepts(self, instance: &Instance) -> bool {
        match self {
            ViewFilter::All => true,
            ViewFilter::NotOkOnly => instance.status == Some(Status::NotOk),
        }
    }

    pub fn is_filtering(self) -> bool {
        self != ViewFilter::All
    }
}

#[derive(Debug, Clone, Copy)]
pub struct ProjectedInstance<'a> {
    pub coord: InstanceCoord,
    pub instance: &'a Instance,
}

#[derive(Debug, Clone)]
pub struct ProjectedItem<'a> {
    pub coord: ItemCoord,
    pub item: &'a Item,
    pub instances: Vec<ProjectedInstance<'a>>,
}

#[derive(Debug, Clone)]
pub struct ProjectedSection<'a> {
    pub index: usize,
    pub section: &'a Section,
    pub items: Vec<ProjectedItem<'a>>,
}

impl ProjectedSection<'_> {
    pub fn instance_count(&self) -> usize {
        self.items.iter().map(|item| item.instances.len()).sum()
    }
}

/// Projects `form` through `filter`. With [`ViewFilter::All`] the result is
/// the full tree.
pub fn project(form: &FormData, filter: ViewFilter) -> Vec<ProjectedSection<'_>> {
    match filter {
        ViewFilter::All => identity(form),
        ViewFilter::NotOkOnly => project_with(form, |instance| filter.accepts(instance)),
    }
}

/// Keeps instances matching `predicate`, items with at least one surviving
/// instance and sections with at least one surviving item.
pub fn project_with<'a>(
    form: &'a FormData,
    predicate: impl Fn(&Instance) -> bool,
) -> Vec<ProjectedSection<'a>> {
    form.sections
        .iter()
        .enumerate()
        .filter_map(|(section_idx, section)| {
            let items: Vec<_> = section
                .items
                .iter()
                .enumerate()
                .filter_map(|(item_idx, item)| {
                    let coord = ItemCoord::new(section_idx, item_idx);
                    let instances: Vec<_> = item
                        .instances
                        .iter()
                        .enumerate()
                        .filter(|(_, instance)| predicate(instance))
                        .map(|(pos, instance)| ProjectedInstance {
                            coord: coord.instance(pos),
                            instance,
                        })
                        .collect();
                    (!instances.is_empty()).then(|| ProjectedItem {
                        coord,
                        item,
                        instances,
                    })
                })
                .collect();
            (!items.is_empty()).then(|| ProjectedSection {
                index: section_idx,
                section,
                items,
            })
        })
        .collect()
}

fn identity(form: &FormData) -> Vec<ProjectedSection<'_>> {
    form.sections
        .iter()
        .enumerate()
        .map(|(section_idx, section)| ProjectedSection {
            index: section_idx,
            section,
            items: section
                .items
                .iter()
                .enumerate()
                .map(|(item_idx, item)| {
                    let coord = ItemCoord::new(section_idx, item_idx);
                    ProjectedItem {
                        coord,
                        item,
                        instances: item
                            .instances
                            .iter()
                            .enumerate()
                            .map(|(pos, instance)| ProjectedInstance {
                                coord: coord.instance(pos),
                                instance,
                            })
                            .collect(),
                    }
                })
                .collect(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::FormStore;

    #[test]
    fn unfiltered_projection_mirrors_form() {
        let store = FormStore::default();
        let view = project(store.form(), ViewFilter::All);
        assert_eq!(view.len(), store.form().sections.len());
        let total: usize = view.iter().map(ProjectedSection::instance_count).sum();
        assert_eq!(total, store.form().instance_count());
    }

    #[test]
    fn not_ok_projection_keeps_canonical_coordinates() {
        let mut store = FormStore::default();
        let item = store.resolve_item("4.2").unwrap();
        store.add_instance(item).unwrap();
        store.set_instance_status(item.instance(1), Status::NotOk).unwrap();
        store.set_instance_status(item.instance(0), Status::Ok).unwrap();

        let view = project(store.form(), ViewFilter::NotOkOnly);
        assert_eq!(view.len(), 1);
        assert_eq!(view[0].index, item.section);
        assert_eq!(view[0].items.len(), 1);
        let projected = &view[0].items[0];
        assert_eq!(projected.coord, item);
        assert_eq!(projected.instances.len(), 1);
        assert_eq!(projected.instances[0].coord, item.instance(1));
    }

    #[test]
    fn not_ok_projection_of_blank_form_is_empty() {
        let store = FormStore::default();
        assert!(project(store.form(), ViewFilter::NotOkOnly).is_empty());
    }
}
