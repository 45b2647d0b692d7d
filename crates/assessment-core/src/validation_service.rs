//! Required-field checks over the form tree.
//!
//! Full validation rebuilds the invalid set from scratch; incremental
//! validation re-checks one instance and patches an existing set. Both use
//! [`ValidationService::check_instance`], so they always agree per instance.

use std::collections::BTreeSet;
use std::fmt;

use assessment_domain::{FormData, Instance, Status};
use uuid::Uuid;

pub const UNSET_STATUS_MESSAGE: &str =
    "Please complete all assessment statuses (OK/Not OK/N/A).";
pub const MISSING_DESCRIPTION_MESSAGE: &str =
    "Please fill in the description for all items with \"Not OK\" status.";

/// Why a single instance is invalid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Violation {
    UnsetStatus,
    MissingDescription,
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Violation::UnsetStatus => f.write_str("status not set"),
            Violation::MissingDescription => f.write_str("description required for Not OK"),
        }
    }
}

/// Result of a full validation pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationReport {
    pub invalid_ids: BTreeSet<Uuid>,
    pub has_unset_status: bool,
    pub has_missing_description: bool,
    /// Section the caller should bring into view.
    pub first_invalid_section: Option<usize>,
}

impl ValidationReport {
    pub fn is_valid(&self) -> bool {
        self.invalid_ids.is_empty()
    }

    pub fn invalid_count(&self) -> usize {
        self.invalid_ids.len()
    }

    pub fn messages(&self) -> Vec<&'static str> {
        let mut messages = Vec::new();
        if self.has_unset_status {
            messages.push(UNSET_STATUS_MESSAGE);
        }
        if self.has_missing_description {
            messages.push(MISSING_DESCRIPTION_MESSAGE);
        }
        messages
    }
}

pub struct ValidationService;

impl ValidationService {
    pub fn check_instance(instance: &Instance) -> Option<Violation> {
        match instance.status {
            None => Some(Violation::UnsetStatus),
            Some(Status::NotOk) if !instance.has_description() => {
                Some(Violation::MissingDescription)
            }
            Some(_) => None,
        }
    }

    pub fn validate(form: &FormData) -> ValidationReport {
        let mut report = ValidationReport::default();
        for (section_idx, section) in form.sections.iter().enumerate() {
            for instance in section.instances() {
                let Some(violation) = Self::check_instance(instance) else {
                    continue;
                };
                match violation {
                    Violation::UnsetStatus => report.has_unset_status = true,
                    Violation::MissingDescription => report.has_missing_description = true,
                }
                report.invalid_ids.insert(instance.id);
                report.first_invalid_section.get_or_insert(section_idx);
            }
        }
        report
    }

    /// Re-checks one instance and updates its membership in `errors`.
    /// Returns whether the instance is now flagged.
    pub fn patch(errors: &mut BTreeSet<Uuid>, instance: &Instance) -> bool {
        if Self::check_instance(instance).is_some() {
            errors.insert(instance.id);
            true
        } else {
            errors.remove(&instance.id);
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unset_status_is_invalid() {
        let instance = Instance::new();
        assert_eq!(
            ValidationService::check_instance(&instance),
            Some(Violation::UnsetStatus)
        );
    }

    #[test]
    fn not_ok_requires_non_blank_description() {
        let instance = Instance::new().with_status(Status::NotOk);
        assert_eq!(
            ValidationService::check_instance(&instance),
            Some(Violation::MissingDescription)
        );
        let instance = instance.with_description("   \t ");
        assert_eq!(
            ValidationService::check_instance(&instance),
            Some(Violation::MissingDescription)
        );
        let instance = instance.with_description("leak observed");
        assert_eq!(ValidationService::check_instance(&instance), None);
    }

    #[test]
    fn ok_and_na_need_no_description() {
        for status in [Status::Ok, Status::NotApplicable] {
            let instance = Instance::new().with_status(status);
            assert_eq!(ValidationService::check_instance(&instance), None);
        }
    }

    #[test]
    fn patch_inserts_and_removes() {
        let mut errors = BTreeSet::new();
        let instance = Instance::new().with_status(Status::NotOk);
        assert!(ValidationService::patch(&mut errors, &instance));
        assert!(errors.contains(&instance.id));
        let fixed = instance.clone().with_description("cracked guard");
        assert!(!ValidationService::patch(&mut errors, &fixed));
        assert!(errors.is_empty());
    }

    #[test]
    fn report_messages_follow_flags() {
        let report = ValidationReport {
            has_unset_status: true,
            has_missing_description: true,
            ..ValidationReport::default()
        };
        assert_eq!(
            report.messages(),
            vec![UNSET_STATUS_MESSAGE, MISSING_DESCRIPTION_MESSAGE]
        );
        assert!(ValidationReport::default().messages().is_empty());
    }
}
