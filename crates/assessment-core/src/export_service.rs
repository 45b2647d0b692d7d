//! Export coordination: validation gate, single-flight guard, and scoped
//! display-state override around the document capture.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use assessment_domain::FormData;
use tracing::{info, warn};

use crate::form_store::FormStore;
use crate::projection::{project, ProjectedSection, ViewFilter};
use crate::report_service::{MailDraft, MailHandoff, ReportService};
use crate::validation_service::ValidationReport;
use crate::CoreError;

pub const DEFAULT_CAPTURE_SCALE: f32 = 2.0;

/// Which sections are expanded in the presentation layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Expansion {
    Collapsed,
    Single(usize),
    All,
}

/// Transient presentation state owned by the UI, not by the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DisplayState {
    pub expansion: Expansion,
    pub filter: ViewFilter,
}

impl Default for DisplayState {
    fn default() -> Self {
        Self {
            expansion: Expansion::Single(0),
            filter: ViewFilter::All,
        }
    }
}

impl DisplayState {
    /// State used while capturing a document: everything expanded, unfiltered.
    pub const CAPTURE: DisplayState = DisplayState {
        expansion: Expansion::All,
        filter: ViewFilter::All,
    };

    pub fn is_open(&self, section: usize) -> bool {
        match self.expansion {
            Expansion::Collapsed => false,
            Expansion::Single(open) => open == section,
            Expansion::All => true,
        }
    }

    /// Opens `section`, or collapses it when it is the one already open.
    pub fn toggle_section(&mut self, section: usize) {
        self.expansion = match self.expansion {
            Expansion::Single(open) if open == section => Expansion::Collapsed,
            _ => Expansion::Single(section),
        };
    }

    pub fn focus(&mut self, section: usize) {
        self.expansion = Expansion::Single(section);
    }
}

/// Scoped override of the display state. The previous state is restored
/// when the guard drops, whether the capture succeeded, failed or panicked.
pub struct DisplayOverride<'a> {
    state: &'a mut DisplayState,
    saved: DisplayState,
}

impl<'a> DisplayOverride<'a> {
    pub fn new(state: &'a mut DisplayState, replacement: DisplayState) -> Self {
        let saved = *state;
        *state = replacement;
        Self { state, saved }
    }

    pub fn state(&self) -> &DisplayState {
        self.state
    }

    pub fn saved(&self) -> &DisplayState {
        &self.saved
    }
}

impl Drop for DisplayOverride<'_> {
    fn drop(&mut self) {
        *self.state = self.saved;
    }
}

/// Rejects overlapping document exports. Clones share the same flag.
#[derive(Debug, Clone, Default)]
pub struct ExportGate {
    in_flight: Arc<AtomicBool>,
}

impl ExportGate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn begin(&self) -> Result<ExportTicket, CoreError> {
        self.in_flight
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .map_err(|_| CoreError::ExportInProgress)?;
        Ok(ExportTicket {
            in_flight: Arc::clone(&self.in_flight),
        })
    }

    pub fn is_busy(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }
}

/// Held for the duration of one export; releases the gate on drop.
#[derive(Debug)]
pub struct ExportTicket {
    in_flight: Arc<AtomicBool>,
}

impl Drop for ExportTicket {
    fn drop(&mut self) {
        self.in_flight.store(false, Ordering::Release);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    Portrait,
    Landscape,
}

/// Page geometry in PostScript points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageFormat {
    pub width_pt: f32,
    pub height_pt: f32,
    pub orientation: Orientation,
}

impl PageFormat {
    pub const A4_PORTRAIT: PageFormat = PageFormat {
        width_pt: 595.28,
        height_pt: 841.89,
        orientation: Orientation::Portrait,
    };

    /// Pages needed to lay out content of `content_height` (same unit as
    /// `page_height`) by slicing it into consecutive page-sized strips.
    pub fn pages_for(content_height: f32, page_height: f32) -> usize {
        if page_height <= 0.0 || content_height <= page_height {
            return 1;
        }
        (content_height / page_height).ceil() as usize
    }
}

/// Parameters handed to the document capability.
#[derive(Debug, Clone, PartialEq)]
pub struct SnapshotRequest {
    pub file_name: String,
    pub page: PageFormat,
    pub scale: f32,
}

/// What the capture sees: the form under the capture display state.
#[derive(Debug, Clone)]
pub struct CaptureSurface<'a> {
    pub form: &'a FormData,
    pub display: DisplayState,
    pub sections: Vec<ProjectedSection<'a>>,
}

/// Result reported by a document renderer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportArtifact {
    pub location: String,
    pub pages: usize,
}

/// Capability that turns a captured surface into a paginated document.
pub trait SnapshotRenderer {
    fn render(
        &mut self,
        request: &SnapshotRequest,
        surface: &CaptureSurface<'_>,
    ) -> Result<ExportArtifact, CoreError>;
}

/// Outcome of an export attempt that did not fail outright.
#[derive(Debug, Clone, PartialEq)]
pub enum ExportOutcome<T> {
    Completed(T),
    /// Full validation found problems; nothing was exported.
    Blocked(ValidationReport),
}

#[derive(Debug, Clone)]
pub struct ExportService {
    gate: ExportGate,
    scale: f32,
    page: PageFormat,
}

impl Default for ExportService {
    fn default() -> Self {
        Self::new(DEFAULT_CAPTURE_SCALE)
    }
}

impl ExportService {
    pub fn new(scale: f32) -> Self {
        Self {
            gate: ExportGate::new(),
            scale,
            page: PageFormat::A4_PORTRAIT,
        }
    }

    pub fn gate(&self) -> &ExportGate {
        &self.gate
    }

    pub fn snapshot_request(&self, form: &FormData) -> SnapshotRequest {
        SnapshotRequest {
            file_name: ReportService::document_file_name(&form.header),
            page: self.page,
            scale: self.scale,
        }
    }

    /// Validates, then captures the fully expanded, unfiltered form. The
    /// caller's display state is restored on every exit path.
    pub fn export_document<R: SnapshotRenderer + ?Sized>(
        &self,
        store: &mut FormStore,
        display: &mut DisplayState,
        renderer: &mut R,
    ) -> Result<ExportOutcome<ExportArtifact>, CoreError> {
        let report = store.validate_all();
        if !report.is_valid() {
            info!(invalid = report.invalid_count(), "document export blocked by validation");
            return Ok(ExportOutcome::Blocked(report));
        }

        let _ticket = self.gate.begin().inspect_err(|_| {
            warn!("document export rejected: another export is in flight");
        })?;
        let overlay = DisplayOverride::new(display, DisplayState::CAPTURE);

        let form = store.snapshot();
        let request = self.snapshot_request(&form);
        let surface = CaptureSurface {
            form: &form,
            display: *overlay.state(),
            sections: project(&form, overlay.state().filter),
        };
        match renderer.render(&request, &surface) {
            Ok(artifact) => {
                info!(file = %request.file_name, pages = artifact.pages, "document exported");
                Ok(ExportOutcome::Completed(artifact))
            }
            Err(err) => {
                warn!(error = %err, "document export failed");
                Err(err)
            }
        }
    }

    /// Validates, composes the report and hands the draft to the mail client.
    pub fn send_email<M: MailHandoff + ?Sized>(
        &self,
        store: &mut FormStore,
        recipient: &str,
        mail: &mut M,
    ) -> Result<ExportOutcome<MailDraft>, CoreError> {
        let report = store.validate_all();
        if !report.is_valid() {
            info!(invalid = report.invalid_count(), "email export blocked by validation");
            return Ok(ExportOutcome::Blocked(report));
        }
        let draft = MailDraft::new(recipient, ReportService::compose(store.form()));
        mail.open(&draft).inspect_err(|err| {
            warn!(error = %err, "mail handoff failed");
        })?;
        info!(recipient = %draft.recipient, "email draft handed off");
        Ok(ExportOutcome::Completed(draft))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toggle_section_opens_and_collapses() {
        let mut display = DisplayState::default();
        assert!(display.is_open(0));
        display.toggle_section(0);
        assert_eq!(display.expansion, Expansion::Collapsed);
        display.toggle_section(3);
        assert!(display.is_open(3));
        assert!(!display.is_open(0));
    }

    #[test]
    fn override_restores_previous_state_on_drop() {
        let mut display = DisplayState {
            expansion: Expansion::Single(2),
            filter: ViewFilter::NotOkOnly,
        };
        {
            let guard = DisplayOverride::new(&mut display, DisplayState::CAPTURE);
            assert_eq!(*guard.state(), DisplayState::CAPTURE);
            assert_eq!(guard.saved().filter, ViewFilter::NotOkOnly);
        }
        assert_eq!(display.expansion, Expansion::Single(2));
        assert_eq!(display.filter, ViewFilter::NotOkOnly);
    }

    #[test]
    fn gate_allows_one_ticket_at_a_time() {
        let gate = ExportGate::new();
        let ticket = gate.begin().expect("first export starts");
        assert!(gate.is_busy());
        assert!(matches!(gate.begin(), Err(CoreError::ExportInProgress)));
        drop(ticket);
        assert!(!gate.is_busy());
        assert!(gate.begin().is_ok());
    }

    #[test]
    fn pages_for_slices_content() {
        assert_eq!(PageFormat::pages_for(10.0, 100.0), 1);
        assert_eq!(PageFormat::pages_for(100.0, 100.0), 1);
        assert_eq!(PageFormat::pages_for(100.5, 100.0), 2);
        assert_eq!(PageFormat::pages_for(350.0, 100.0), 4);
    }
}
