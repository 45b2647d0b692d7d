//! Canonical owner of the form snapshot and the validation-error set.

use std::collections::BTreeSet;
use std::sync::Arc;

use assessment_domain::{
    FollowUpField, FormData, HeaderField, Instance, Photo, SectionTemplate, Status, CHECKLIST,
};
use tracing::{debug, info};
use uuid::Uuid;

use crate::coordinate::{InstanceCoord, ItemCoord};
use crate::mutations;
use crate::validation_service::{ValidationReport, ValidationService};
use crate::CoreError;

/// Holds the current snapshot plus the ids of instances known to be invalid.
///
/// Every operation computes the next snapshot and the next error set before
/// committing either, so readers never observe a half-applied edit. Error
/// entries are keyed by durable instance id and survive position shifts.
#[derive(Debug, Clone)]
pub struct FormStore {
    template: &'static [SectionTemplate],
    form: Arc<FormData>,
    errors: BTreeSet<Uuid>,
}

impl Default for FormStore {
    fn default() -> Self {
        Self::new(CHECKLIST)
    }
}

impl FormStore {
    pub fn new(template: &'static [SectionTemplate]) -> Self {
        Self {
            template,
            form: Arc::new(FormData::from_template(template)),
            errors: BTreeSet::new(),
        }
    }

    pub fn form(&self) -> &FormData {
        &self.form
    }

    /// Cheap handle to the current snapshot; later edits do not affect it.
    pub fn snapshot(&self) -> Arc<FormData> {
        Arc::clone(&self.form)
    }

    pub fn errors(&self) -> &BTreeSet<Uuid> {
        &self.errors
    }

    pub fn is_flagged(&self, instance_id: Uuid) -> bool {
        self.errors.contains(&instance_id)
    }

    pub fn instance(&self, coord: InstanceCoord) -> Result<&Instance, CoreError> {
        self.form
            .instance(coord.section, coord.item, coord.instance)
            .ok_or(CoreError::InstanceOutOfRange(coord))
    }

    /// Maps an item id such as `"3.3"` to its canonical coordinate.
    pub fn resolve_item(&self, item_id: &str) -> Result<ItemCoord, CoreError> {
        self.form
            .find_item(item_id)
            .map(|(section, item)| ItemCoord::new(section, item))
            .ok_or_else(|| CoreError::UnknownItem(item_id.trim().to_string()))
    }

    /// Finds the current position of an instance by its durable id.
    pub fn locate(&self, instance_id: Uuid) -> Option<InstanceCoord> {
        self.form
            .sections
            .iter()
            .enumerate()
            .find_map(|(section_idx, section)| {
                section
                    .items
                    .iter()
                    .enumerate()
                    .find_map(|(item_idx, item)| {
                        item.instances
                            .iter()
                            .position(|instance| instance.id == instance_id)
                            .map(|pos| InstanceCoord::new(section_idx, item_idx, pos))
                    })
            })
    }

    pub fn set_header_field(&mut self, field: HeaderField, value: &str) {
        let next = mutations::set_header_field(&self.form, field, value);
        debug!(field = field.key(), "header field updated");
        self.form = Arc::new(next);
    }

    pub fn set_follow_up_field(&mut self, field: FollowUpField, value: &str) {
        let next = mutations::set_follow_up_field(&self.form, field, value);
        debug!(field = field.key(), "follow-up field updated");
        self.form = Arc::new(next);
    }

    /// Toggles the status and returns the resulting value.
    pub fn set_instance_status(
        &mut self,
        coord: InstanceCoord,
        status: Status,
    ) -> Result<Option<Status>, CoreError> {
        let next = mutations::set_instance_status(&self.form, coord, status)?;
        let result = self.commit_instance_edit(next, coord)?;
        debug!(%coord, status = ?result, "instance status toggled");
        Ok(result)
    }

    pub fn set_instance_description(
        &mut self,
        coord: InstanceCoord,
        text: &str,
    ) -> Result<(), CoreError> {
        let next = mutations::set_instance_description(&self.form, coord, text)?;
        self.commit_instance_edit(next, coord)?;
        debug!(%coord, "instance description updated");
        Ok(())
    }

    /// Replaces the photo; validation membership is unaffected.
    pub fn set_instance_photo(
        &mut self,
        coord: InstanceCoord,
        photo: Option<Photo>,
    ) -> Result<(), CoreError> {
        let attached = photo.is_some();
        let next = mutations::set_instance_photo(&self.form, coord, photo)?;
        self.form = Arc::new(next);
        debug!(%coord, attached, "instance photo replaced");
        Ok(())
    }

    pub fn add_instance(&mut self, coord: ItemCoord) -> Result<Uuid, CoreError> {
        let (next, id) = mutations::add_instance(&self.form, coord)?;
        self.form = Arc::new(next);
        debug!(%coord, instance = %id, "instance added");
        Ok(id)
    }

    /// Returns `false` when the call was a no-op (last remaining instance).
    pub fn remove_instance(&mut self, coord: InstanceCoord) -> Result<bool, CoreError> {
        let (next, removed) = mutations::remove_instance(&self.form, coord)?;
        let Some(removed) = removed else {
            debug!(%coord, "refusing to remove the only instance");
            return Ok(false);
        };
        let mut errors = self.errors.clone();
        errors.remove(&removed.id);
        self.form = Arc::new(next);
        self.errors = errors;
        debug!(%coord, instance = %removed.id, "instance removed");
        Ok(true)
    }

    /// Discards all answers and errors and starts from a fresh template form.
    pub fn reset_all(&mut self) {
        self.form = Arc::new(FormData::from_template(self.template));
        self.errors = BTreeSet::new();
        info!("form reset");
    }

    /// Full validation; replaces the error set with the authoritative result.
    pub fn validate_all(&mut self) -> ValidationReport {
        let report = ValidationService::validate(&self.form);
        self.errors = report.invalid_ids.clone();
        debug!(invalid = report.invalid_count(), "full validation complete");
        report
    }

    fn commit_instance_edit(
        &mut self,
        next: FormData,
        coord: InstanceCoord,
    ) -> Result<Option<Status>, CoreError> {
        let instance = next
            .instance(coord.section, coord.item, coord.instance)
            .ok_or(CoreError::InstanceOutOfRange(coord))?;
        let status = instance.status;
        let mut errors = self.errors.clone();
        ValidationService::patch(&mut errors, instance);
        self.form = Arc::new(next);
        self.errors = errors;
        Ok(status)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn snapshot_is_unaffected_by_later_edits() {
        let mut store = FormStore::default();
        let before = store.snapshot();
        store
            .set_instance_status(InstanceCoord::new(0, 0, 0), Status::Ok)
            .unwrap();
        assert_eq!(before.instance(0, 0, 0).unwrap().status, None);
        assert_eq!(store.form().instance(0, 0, 0).unwrap().status, Some(Status::Ok));
    }

    #[test]
    fn status_edit_patches_error_set() {
        let mut store = FormStore::default();
        let coord = InstanceCoord::new(0, 1, 0);
        let id = store.instance(coord).unwrap().id;

        store.set_instance_status(coord, Status::NotOk).unwrap();
        assert!(store.is_flagged(id));

        store.set_instance_status(coord, Status::Ok).unwrap();
        assert!(!store.is_flagged(id));

        // Pressing OK again clears the status, which is invalid again.
        assert_eq!(store.set_instance_status(coord, Status::Ok).unwrap(), None);
        assert!(store.is_flagged(id));
    }

    #[test]
    fn photo_edit_leaves_error_set_alone() {
        let mut store = FormStore::default();
        let coord = InstanceCoord::new(0, 0, 0);
        store.validate_all();
        let before = store.errors().clone();
        let photo = Photo::new("wall.jpg", "image/jpeg", vec![1u8, 2, 3]);
        store.set_instance_photo(coord, Some(photo)).unwrap();
        assert_eq!(store.errors(), &before);
        assert!(store.instance(coord).unwrap().photo.is_some());
    }

    #[test]
    fn failed_edit_leaves_state_unchanged() {
        let mut store = FormStore::default();
        let before = store.snapshot();
        assert!(store
            .set_instance_description(InstanceCoord::new(0, 0, 7), "x")
            .is_err());
        assert!(Arc::ptr_eq(&before, &store.snapshot()));
    }

    #[test]
    fn locate_follows_instances_after_removal() {
        let mut store = FormStore::default();
        let item = store.resolve_item("2.3").unwrap();
        store.add_instance(item).unwrap();
        let third = store.add_instance(item).unwrap();
        assert_eq!(store.locate(third), Some(item.instance(2)));

        assert!(store.remove_instance(item.instance(1)).unwrap());
        assert_eq!(store.locate(third), Some(item.instance(1)));
    }

    #[test]
    fn resolve_item_rejects_unknown_ids() {
        let store = FormStore::default();
        let err = store.resolve_item("7.1").expect_err("unknown item");
        assert!(matches!(err, CoreError::UnknownItem(id) if id == "7.1"));
    }
}
