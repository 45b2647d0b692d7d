//! Shared runtime state for CLI interactions and command execution.

use assessment_config::{Config, ConfigManager};
use assessment_core::{DisplayState, ExportService, FormStore, PreviewRegistry};
use dialoguer::theme::ColorfulTheme;

use super::preview::LabelPreviewBackend;
use super::registry::CommandRegistry;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CliMode {
    Interactive,
    Script,
}

pub struct ShellContext {
    pub mode: CliMode,
    pub registry: CommandRegistry,
    pub store: FormStore,
    /// Presentation state: which section is expanded and the active filter.
    pub display: DisplayState,
    pub exporter: ExportService,
    pub previews: PreviewRegistry<LabelPreviewBackend>,
    pub theme: ColorfulTheme,
    pub config_manager: ConfigManager,
    pub config: Config,
    pub last_command: Option<String>,
    pub running: bool,
}

impl ShellContext {
    pub fn status(&self) -> String {
        format!(
            "ShellContext {{ running: {}, last_command: {:?}, flagged: {}, previews: {} }}",
            self.running,
            self.last_command,
            self.store.errors().len(),
            self.previews.live_count()
        )
    }
}
