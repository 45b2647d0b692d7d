//! Pure structural edits. Each function takes the current snapshot and
//! returns a new one; the input is never modified. Only the edited path is
//! copied (`Arc::make_mut`), untouched sections and items stay shared.

use std::sync::Arc;

use assessment_domain::{
    FollowUpField, FormData, HeaderField, Instance, Item, Photo, Status,
};
use uuid::Uuid;

use crate::coordinate::{InstanceCoord, ItemCoord};
use crate::CoreError;

pub fn set_header_field(form: &FormData, field: HeaderField, value: &str) -> FormData {
    let mut next = form.clone();
    next.header.set(field, value);
    next
}

pub fn set_follow_up_field(form: &FormData, field: FollowUpField, value: &str) -> FormData {
    let mut next = form.clone();
    next.follow_up.set(field, value);
    next
}

/// Applies the toggle rule: selecting the active status clears it.
pub fn set_instance_status(
    form: &FormData,
    coord: InstanceCoord,
    requested: Status,
) -> Result<FormData, CoreError> {
    edit_instance(form, coord, |instance| {
        instance.status = Status::toggle(instance.status, requested);
    })
}

pub fn set_instance_description(
    form: &FormData,
    coord: InstanceCoord,
    text: &str,
) -> Result<FormData, CoreError> {
    edit_instance(form, coord, |instance| {
        instance.description = text.to_string();
    })
}

pub fn set_instance_photo(
    form: &FormData,
    coord: InstanceCoord,
    photo: Option<Photo>,
) -> Result<FormData, CoreError> {
    edit_instance(form, coord, |instance| {
        instance.photo = photo;
    })
}

/// Appends a blank instance and returns its id. Not gated on `is_repeatable`;
/// callers decide whether to offer the action.
pub fn add_instance(form: &FormData, coord: ItemCoord) -> Result<(FormData, Uuid), CoreError> {
    edit_item(form, coord, |item| {
        let instance = Instance::new();
        let id = instance.id;
        item.instances.push(Arc::new(instance));
        Ok(id)
    })
}

/// Removes the instance at `coord` and returns it. Removing the sole
/// remaining instance is a no-op that returns the input unchanged and `None`.
pub fn remove_instance(
    form: &FormData,
    coord: InstanceCoord,
) -> Result<(FormData, Option<Arc<Instance>>), CoreError> {
    let item = form
        .item(coord.section, coord.item)
        .ok_or_else(|| out_of_item(form, coord.item_coord()))?;
    if coord.instance >= item.instances.len() {
        return Err(CoreError::InstanceOutOfRange(coord));
    }
    if item.instances.len() <= 1 {
        return Ok((form.clone(), None));
    }
    edit_item(form, coord.item_coord(), |item| {
        Ok(Some(item.instances.remove(coord.instance)))
    })
}

fn edit_item<R>(
    form: &FormData,
    coord: ItemCoord,
    edit: impl FnOnce(&mut Item) -> Result<R, CoreError>,
) -> Result<(FormData, R), CoreError> {
    let mut next = form.clone();
    let section = next
        .sections
        .get_mut(coord.section)
        .ok_or(CoreError::SectionNotFound(coord.section))?;
    let item = Arc::make_mut(section)
        .items
        .get_mut(coord.item)
        .ok_or(CoreError::ItemOutOfRange(coord))?;
    let result = edit(Arc::make_mut(item))?;
    Ok((next, result))
}

fn edit_instance(
    form: &FormData,
    coord: InstanceCoord,
    edit: impl FnOnce(&mut Instance),
) -> Result<FormData, CoreError> {
    let (next, ()) = edit_item(form, coord.item_coord(), |item| {
        let instance = item
            .instances
            .get_mut(coord.instance)
            .ok_or(CoreError::InstanceOutOfRange(coord))?;
        edit(Arc::make_mut(instance));
        Ok(())
    })?;
    Ok(next)
}

fn out_of_item(form: &FormData, coord: ItemCoord) -> CoreError {
    if form.section(coord.section).is_none() {
        CoreError::SectionNotFound(coord.section)
    } else {
        CoreError::ItemOutOfRange(coord)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assessment_domain::CHECKLIST;

    fn form() -> FormData {
        FormData::from_template(CHECKLIST)
    }

    #[test]
    fn edits_leave_input_snapshot_untouched() {
        let before = form();
        let coord = InstanceCoord::new(0, 0, 0);
        let after = set_instance_status(&before, coord, Status::Ok).unwrap();
        assert_eq!(before.instance(0, 0, 0).unwrap().status, None);
        assert_eq!(after.instance(0, 0, 0).unwrap().status, Some(Status::Ok));
    }

    #[test]
    fn untouched_sections_are_shared() {
        let before = form();
        let after = set_instance_description(&before, InstanceCoord::new(2, 0, 0), "dust").unwrap();
        assert!(Arc::ptr_eq(&before.sections[0], &after.sections[0]));
        assert!(!Arc::ptr_eq(&before.sections[2], &after.sections[2]));
        assert!(Arc::ptr_eq(&before.sections[2].items[1], &after.sections[2].items[1]));
    }

    #[test]
    fn out_of_range_coordinates_are_rejected() {
        let before = form();
        let err = set_instance_status(&before, InstanceCoord::new(42, 0, 0), Status::Ok)
            .expect_err("section should not exist");
        assert!(matches!(err, CoreError::SectionNotFound(42)));
        let err = set_instance_status(&before, InstanceCoord::new(0, 0, 3), Status::Ok)
            .expect_err("instance should not exist");
        assert!(matches!(err, CoreError::InstanceOutOfRange(_)));
        let err = remove_instance(&before, InstanceCoord::new(0, 99, 0))
            .expect_err("item should not exist");
        assert!(matches!(err, CoreError::ItemOutOfRange(_)));
    }

    #[test]
    fn removing_sole_instance_is_noop() {
        let before = form();
        let (after, removed) = remove_instance(&before, InstanceCoord::new(1, 2, 0)).unwrap();
        assert!(removed.is_none());
        assert_eq!(after, before);
    }

    #[test]
    fn header_and_follow_up_edits_replace_single_field() {
        let before = form();
        let after = set_header_field(&before, HeaderField::AreaLocation, "Shredder Hall");
        let after = set_follow_up_field(&after, FollowUpField::PersonInCharge, "Budi");
        assert_eq!(after.header.area_location, "Shredder Hall");
        assert_eq!(after.header.assessment_date, before.header.assessment_date);
        assert_eq!(after.follow_up.person_in_charge, "Budi");
        assert!(after.follow_up.summary.is_empty());
    }
}
