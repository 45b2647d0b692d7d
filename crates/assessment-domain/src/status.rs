//! Assessment status values and their user-facing labels.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Outcome recorded for one instance of a checklist item.
///
/// The "not yet assessed" state is represented as `None` wherever an
/// `Option<Status>` is stored.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Status {
    #[serde(rename = "OK")]
    Ok,
    #[serde(rename = "Not OK")]
    NotOk,
    #[serde(rename = "N/A")]
    NotApplicable,
}

impl Status {
    pub const ALL: [Status; 3] = [Status::Ok, Status::NotOk, Status::NotApplicable];

    pub fn label(self) -> &'static str {
        match self {
            Status::Ok => "OK",
            Status::NotOk => "Not OK",
            Status::NotApplicable => "N/A",
        }
    }

    /// Returns the status that results from pressing `requested` while
    /// `current` is selected: pressing the active status clears it.
    pub fn toggle(current: Option<Status>, requested: Status) -> Option<Status> {
        if current == Some(requested) {
            None
        } else {
            Some(requested)
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Status {
    type Err = StatusParseError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let normalized: String = value
            .trim()
            .chars()
            .filter(|ch| !matches!(ch, ' ' | '-' | '_' | '/'))
            .collect::<String>()
            .to_ascii_lowercase();
        match normalized.as_str() {
            "ok" => Ok(Status::Ok),
            "notok" | "nok" => Ok(Status::NotOk),
            "na" | "notapplicable" => Ok(Status::NotApplicable),
            _ => Err(StatusParseError(value.trim().to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusParseError(pub String);

impl fmt::Display for StatusParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown status `{}` (expected ok, not-ok or na)", self.0)
    }
}

impl std::error::Error for StatusParseError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toggle_clears_matching_status() {
        assert_eq!(Status::toggle(Some(Status::Ok), Status::Ok), None);
        assert_eq!(
            Status::toggle(Some(Status::Ok), Status::NotOk),
            Some(Status::NotOk)
        );
        assert_eq!(Status::toggle(None, Status::NotApplicable), Some(Status::NotApplicable));
    }

    #[test]
    fn parses_common_spellings() {
        assert_eq!("OK".parse::<Status>(), Ok(Status::Ok));
        assert_eq!("not-ok".parse::<Status>(), Ok(Status::NotOk));
        assert_eq!("Not OK".parse::<Status>(), Ok(Status::NotOk));
        assert_eq!("n/a".parse::<Status>(), Ok(Status::NotApplicable));
        assert!("maybe".parse::<Status>().is_err());
    }

    #[test]
    fn serializes_with_form_labels() {
        let json = serde_json::to_string(&Status::NotOk).unwrap();
        assert_eq!(json, "\"Not OK\"");
    }
}
