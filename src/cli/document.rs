//! Paginated plain-text stand-in for the PDF snapshot.

use std::{
    fs,
    path::{Path, PathBuf},
};

use assessment_core::{
    CaptureSurface, CoreError, ExportArtifact, PageFormat, SnapshotRenderer, SnapshotRequest,
};
use tracing::debug;

use super::render::document_lines;

const PAGE_BREAK: &str = "\u{c}";

/// Writes the capture as text pages of `lines_per_page` lines separated by
/// form feeds, into `out_dir`.
pub struct TextDocumentRenderer {
    out_dir: PathBuf,
    lines_per_page: usize,
}

impl TextDocumentRenderer {
    pub fn new(out_dir: impl Into<PathBuf>, lines_per_page: usize) -> Self {
        Self {
            out_dir: out_dir.into(),
            lines_per_page: lines_per_page.max(1),
        }
    }

    /// Target path: the requested name made safe for a single path
    /// component, with a `.txt` extension.
    pub fn target_path(&self, request: &SnapshotRequest) -> PathBuf {
        let name = safe_file_name(&request.file_name);
        self.out_dir.join(Path::new(&name).with_extension("txt"))
    }

    fn paginate(&self, lines: &[String]) -> Vec<String> {
        let pages = PageFormat::pages_for(lines.len() as f32, self.lines_per_page as f32);
        lines
            .chunks(self.lines_per_page)
            .enumerate()
            .map(|(index, chunk)| {
                let mut page = chunk.join("\n");
                page.push_str(&format!("\n\nPage {} of {pages}\n", index + 1));
                page
            })
            .collect()
    }
}

/// Replaces separators and characters rejected by common file systems so the
/// name never escapes `out_dir`.
fn safe_file_name(name: &str) -> String {
    let cleaned: String = name
        .chars()
        .map(|ch| match ch {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
            ch if ch.is_control() => '_',
            ch => ch,
        })
        .collect();
    match cleaned.trim_start_matches('.') {
        "" => "Assessment_Report".to_string(),
        rest => rest.to_string(),
    }
}

impl SnapshotRenderer for TextDocumentRenderer {
    fn render(
        &mut self,
        request: &SnapshotRequest,
        surface: &CaptureSurface<'_>,
    ) -> Result<ExportArtifact, CoreError> {
        let lines = document_lines(surface, request.scale);
        let pages = self.paginate(&lines);
        let path = self.target_path(request);
        debug!(path = %path.display(), pages = pages.len(), "writing text document");

        fs::create_dir_all(&self.out_dir)
            .and_then(|_| fs::write(&path, pages.join(PAGE_BREAK)))
            .map_err(|err| CoreError::Export(format!("{}: {err}", path.display())))?;

        Ok(ExportArtifact {
            location: path.display().to_string(),
            pages: pages.len(),
        })
    }
}
