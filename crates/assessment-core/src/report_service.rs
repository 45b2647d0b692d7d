//! Plain-text report composition and the mail draft handed to the OS.

use std::fmt::Write as _;

use assessment_domain::{FormData, HeaderData};

use crate::CoreError;

const RULE: &str = "--------------------------------------";
pub const NO_NOT_OK_LINE: &str = "No items with \"Not OK\" status.";

/// Subject and body of the assessment report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report {
    pub subject: String,
    pub body: String,
}

/// Mail-composition request for the local mail client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MailDraft {
    pub recipient: String,
    pub subject: String,
    pub body: String,
}

impl MailDraft {
    pub fn new(recipient: impl Into<String>, report: Report) -> Self {
        Self {
            recipient: recipient.into(),
            subject: report.subject,
            body: report.body,
        }
    }

    /// `mailto:` URI with subject and body component-encoded.
    pub fn mailto_uri(&self) -> String {
        format!(
            "mailto:{}?subject={}&body={}",
            self.recipient.trim(),
            encode_component(&self.subject),
            encode_component(&self.body)
        )
    }
}

/// Local capability that opens a mail client with a prepared draft.
pub trait MailHandoff {
    fn open(&mut self, draft: &MailDraft) -> Result<(), CoreError>;
}

pub struct ReportService;

impl ReportService {
    pub fn subject(header: &HeaderData) -> String {
        format!(
            "Area Assessment Report - {} - {}",
            header.area_location, header.assessment_date
        )
    }

    /// File name used for the document export.
    pub fn document_file_name(header: &HeaderData) -> String {
        let area: String = header
            .area_location
            .chars()
            .map(|ch| if ch.is_whitespace() { '_' } else { ch })
            .collect();
        format!("Assessment_Report_{}_{}.pdf", area, header.assessment_date)
    }

    pub fn compose(form: &FormData) -> Report {
        let header = &form.header;
        let follow_up = &form.follow_up;
        let mut body = String::new();

        // Writing to a String cannot fail.
        let _ = write!(body, "Area Assessment Report\n\n");
        let _ = writeln!(body, "Date: {}", header.assessment_date);
        let _ = writeln!(body, "Area/Location: {}", header.area_location);
        let _ = write!(body, "Assessor: {}\n\n", header.assessor_name);
        let _ = write!(body, "{RULE}\n\n");
        body.push_str("SUMMARY OF \"NOT OK\" ITEMS\n\n");

        let mut has_not_ok = false;
        for section in &form.sections {
            let mut entries = section.items.iter().flat_map(|item| {
                item.instances
                    .iter()
                    .enumerate()
                    .filter(|(_, instance)| instance.is_not_ok())
                    .map(move |(pos, instance)| (item.instance_title(pos), &instance.description))
            });
            let Some(first) = entries.next() else {
                continue;
            };
            has_not_ok = true;
            let _ = writeln!(body, "SECTION: {}", section.title);
            for (title, description) in std::iter::once(first).chain(entries) {
                let _ = writeln!(body, "- Item: {title}");
                let _ = write!(body, "  Description: {description}\n\n");
            }
        }
        if !has_not_ok {
            let _ = write!(body, "{NO_NOT_OK_LINE}\n\n");
        }

        let _ = write!(body, "{RULE}\n\n");
        body.push_str("NOTES & FOLLOW-UP\n\n");
        let _ = writeln!(body, "Summary: {}", follow_up.summary);
        let _ = writeln!(body, "Recommendations: {}", follow_up.recommendations);
        let _ = writeln!(body, "Person In Charge: {}", follow_up.person_in_charge);
        let _ = writeln!(body, "Target Completion Date: {}", follow_up.target_date);

        Report {
            subject: Self::subject(header),
            body,
        }
    }
}

/// Percent-encodes everything except `A-Z a-z 0-9 - _ . ! ~ * ' ( )`.
fn encode_component(value: &str) -> String {
    let mut encoded = String::with_capacity(value.len());
    for byte in value.bytes() {
        match byte {
            b'A'..=b'Z'
            | b'a'..=b'z'
            | b'0'..=b'9'
            | b'-'
            | b'_'
            | b'.'
            | b'!'
            | b'~'
            | b'*'
            | b'\''
            | b'('
            | b')' => encoded.push(byte as char),
            _ => {
                let _ = write!(encoded, "%{byte:02X}");
            }
        }
    }
    encoded
}
