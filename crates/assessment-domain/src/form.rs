//! Root aggregate for one assessment session.

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::checklist::{Item, Section};
use crate::instance::Instance;
use crate::template::SectionTemplate;

/// General information captured at the top of the form.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct HeaderData {
    pub assessment_date: String,
    pub area_location: String,
    pub assessor_name: String,
}

impl HeaderData {
    /// Header dated `date`, all other fields blank.
    pub fn dated(date: NaiveDate) -> Self {
        Self {
            assessment_date: date.format("%Y-%m-%d").to_string(),
            ..Self::default()
        }
    }

    pub fn get(&self, field: HeaderField) -> &str {
        match field {
            HeaderField::AssessmentDate => &self.assessment_date,
            HeaderField::AreaLocation => &self.area_location,
            HeaderField::AssessorName => &self.assessor_name,
        }
    }

    pub fn set(&mut self, field: HeaderField, value: impl Into<String>) {
        let slot = match field {
            HeaderField::AssessmentDate => &mut self.assessment_date,
            HeaderField::AreaLocation => &mut self.area_location,
            HeaderField::AssessorName => &mut self.assessor_name,
        };
        *slot = value.into();
    }
}

/// Remediation notes attached to the whole form.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct FollowUpData {
    pub summary: String,
    pub recommendations: String,
    pub person_in_charge: String,
    pub target_date: String,
}

impl FollowUpData {
    pub fn get(&self, field: FollowUpField) -> &str {
        match field {
            FollowUpField::Summary => &self.summary,
            FollowUpField::Recommendations => &self.recommendations,
            FollowUpField::PersonInCharge => &self.person_in_charge,
            FollowUpField::TargetDate => &self.target_date,
        }
    }

    pub fn set(&mut self, field: FollowUpField, value: impl Into<String>) {
        let slot = match field {
            FollowUpField::Summary => &mut self.summary,
            FollowUpField::Recommendations => &mut self.recommendations,
            FollowUpField::PersonInCharge => &mut self.person_in_charge,
            FollowUpField::TargetDate => &mut self.target_date,
        };
        *slot = value.into();
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum HeaderField {
    AssessmentDate,
    AreaLocation,
    AssessorName,
}

impl HeaderField {
    pub const ALL: [HeaderField; 3] = [
        HeaderField::AssessmentDate,
        HeaderField::AreaLocation,
        HeaderField::AssessorName,
    ];

    pub fn key(self) -> &'static str {
        match self {
            HeaderField::AssessmentDate => "date",
            HeaderField::AreaLocation => "area",
            HeaderField::AssessorName => "assessor",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            HeaderField::AssessmentDate => "Date",
            HeaderField::AreaLocation => "Area/Location",
            HeaderField::AssessorName => "Assessor",
        }
    }
}

impl fmt::Display for HeaderField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for HeaderField {
    type Err = FieldParseError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match normalize_key(value).as_str() {
            "date" | "assessmentdate" => Ok(HeaderField::AssessmentDate),
            "area" | "location" | "arealocation" => Ok(HeaderField::AreaLocation),
            "assessor" | "assessorname" | "name" => Ok(HeaderField::AssessorName),
            _ => Err(FieldParseError::new("header", value)),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum FollowUpField {
    Summary,
    Recommendations,
    PersonInCharge,
    TargetDate,
}

impl FollowUpField {
    pub const ALL: [FollowUpField; 4] = [
        FollowUpField::Summary,
        FollowUpField::Recommendations,
        FollowUpField::PersonInCharge,
        FollowUpField::TargetDate,
    ];

    pub fn key(self) -> &'static str {
        match self {
            FollowUpField::Summary => "summary",
            FollowUpField::Recommendations => "recommendations",
            FollowUpField::PersonInCharge => "pic",
            FollowUpField::TargetDate => "target",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            FollowUpField::Summary => "Summary",
            FollowUpField::Recommendations => "Recommendations",
            FollowUpField::PersonInCharge => "Person In Charge",
            FollowUpField::TargetDate => "Target Completion Date",
        }
    }
}

impl fmt::Display for FollowUpField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for FollowUpField {
    type Err = FieldParseError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match normalize_key(value).as_str() {
            "summary" => Ok(FollowUpField::Summary),
            "recommendations" | "recommendation" => Ok(FollowUpField::Recommendations),
            "pic" | "personincharge" | "owner" => Ok(FollowUpField::PersonInCharge),
            "target" | "targetdate" | "due" => Ok(FollowUpField::TargetDate),
            _ => Err(FieldParseError::new("follow-up", value)),
        }
    }
}

fn normalize_key(value: &str) -> String {
    value
        .trim()
        .chars()
        .filter(|ch| ch.is_ascii_alphanumeric())
        .collect::<String>()
        .to_ascii_lowercase()
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldParseError {
    pub group: &'static str,
    pub value: String,
}

impl FieldParseError {
    fn new(group: &'static str, value: &str) -> Self {
        Self {
            group,
            value: value.trim().to_string(),
        }
    }
}

impl fmt::Display for FieldParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown {} field `{}`", self.group, self.value)
    }
}

impl std::error::Error for FieldParseError {}

/// Whole-form snapshot. Subtrees are shared through `Arc`, so cloning a form
/// is cheap and edits only copy the path they touch.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FormData {
    pub header: HeaderData,
    pub sections: Vec<Arc<Section>>,
    pub follow_up: FollowUpData,
}

impl FormData {
    /// Builds a blank form from `template`, dated today.
    pub fn from_template(template: &[SectionTemplate]) -> Self {
        Self::from_template_dated(template, Local::now().date_naive())
    }

    pub fn from_template_dated(template: &[SectionTemplate], date: NaiveDate) -> Self {
        let sections = template
            .iter()
            .map(|section| {
                let items = section
                    .items
                    .iter()
                    .map(|item| Item::new(item.id, item.text, item.is_repeatable))
                    .collect();
                Arc::new(Section::new(section.title, items))
            })
            .collect();
        Self {
            header: HeaderData::dated(date),
            sections,
            follow_up: FollowUpData::default(),
        }
    }

    pub fn section(&self, index: usize) -> Option<&Section> {
        self.sections.get(index).map(Arc::as_ref)
    }

    pub fn item(&self, section_idx: usize, item_idx: usize) -> Option<&Item> {
        self.section(section_idx)?.item(item_idx)
    }

    pub fn instance(
        &self,
        section_idx: usize,
        item_idx: usize,
        instance_idx: usize,
    ) -> Option<&Instance> {
        self.item(section_idx, item_idx)?.instance(instance_idx)
    }

    /// Finds an item by its template id (e.g. `"3.3"`).
    pub fn find_item(&self, item_id: &str) -> Option<(usize, usize)> {
        let wanted = item_id.trim();
        self.sections
            .iter()
            .enumerate()
            .find_map(|(section_idx, section)| {
                section
                    .items
                    .iter()
                    .position(|item| item.id == wanted)
                    .map(|item_idx| (section_idx, item_idx))
            })
    }

    pub fn instances(&self) -> impl Iterator<Item = &Instance> {
        self.sections.iter().flat_map(|section| section.instances())
    }

    pub fn instance_count(&self) -> usize {
        self.instances().count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::template::CHECKLIST;

    #[test]
    fn template_form_is_blank() {
        let date = NaiveDate::from_ymd_opt(2025, 3, 14).unwrap();
        let form = FormData::from_template_dated(CHECKLIST, date);
        assert_eq!(form.header.assessment_date, "2025-03-14");
        assert!(form.header.area_location.is_empty());
        assert_eq!(form.sections.len(), CHECKLIST.len());
        assert!(form.instances().all(|inst| inst.status.is_none()));
        assert_eq!(form.follow_up, FollowUpData::default());
    }

    #[test]
    fn find_item_returns_coordinates() {
        let form = FormData::from_template(CHECKLIST);
        assert_eq!(form.find_item("3.3"), Some((2, 2)));
        assert_eq!(form.find_item("9.9"), None);
    }

    #[test]
    fn instance_ids_are_unique_across_form() {
        let form = FormData::from_template(CHECKLIST);
        let mut ids: Vec<_> = form.instances().map(|inst| inst.id).collect();
        let total = ids.len();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), total);
    }

    #[test]
    fn field_keys_parse_back() {
        for field in HeaderField::ALL {
            assert_eq!(field.key().parse::<HeaderField>(), Ok(field));
        }
        for field in FollowUpField::ALL {
            assert_eq!(field.key().parse::<FollowUpField>(), Ok(field));
        }
        assert!("colour".parse::<HeaderField>().is_err());
    }
}
