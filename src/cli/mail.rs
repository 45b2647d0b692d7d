use std::io::{self, Write};

use assessment_core::{CoreError, MailDraft, MailHandoff};
use tracing::debug;

/// Hands the draft to the user as a `mailto:` link, since a terminal has
/// no mail client of its own to open.
pub struct ConsoleMailHandoff<W: Write> {
    out: W,
}

impl ConsoleMailHandoff<io::Stdout> {
    pub fn stdout() -> Self {
        Self { out: io::stdout() }
    }
}

impl<W: Write> ConsoleMailHandoff<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> MailHandoff for ConsoleMailHandoff<W> {
    fn open(&mut self, draft: &MailDraft) -> Result<(), CoreError> {
        let uri = draft.mailto_uri();
        debug!(recipient = %draft.recipient, uri_len = uri.len(), "writing mail draft");
        writeln!(self.out, "To: {}", draft.recipient)
            .and_then(|_| writeln!(self.out, "Subject: {}", draft.subject))
            .and_then(|_| writeln!(self.out))
            .and_then(|_| writeln!(self.out, "{}", draft.body))
            .and_then(|_| writeln!(self.out, "Open in your mail client:"))
            .and_then(|_| writeln!(self.out, "{uri}"))
            .and_then(|_| self.out.flush())
            .map_err(|err| CoreError::Mail(err.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn writes_headers_body_and_link() {
        let draft = MailDraft {
            recipient: "hse@example.com".into(),
            subject: "Area Assessment Report - Gate 2 - 2025-01-05".into(),
            body: "line one\nline two".into(),
        };
        let mut handoff = ConsoleMailHandoff::new(Vec::new());
        handoff.open(&draft).unwrap();
        let text = String::from_utf8(handoff.into_inner()).unwrap();

        assert!(text.starts_with("To: hse@example.com\nSubject: Area Assessment Report"));
        assert!(text.contains("line one\nline two\n"));
        assert!(text.trim_end().ends_with(&draft.mailto_uri()));
    }
}
