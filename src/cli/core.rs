//! Core CLI dispatch and shell context helpers.

use std::io;

use assessment_config::{ConfigError, ConfigManager};
use assessment_core::{
    CoreError, DisplayState, ExportService, FormStore, InstanceCoord, ItemCoord, PreviewRegistry,
};
use chrono::NaiveDate;
use dialoguer::theme::ColorfulTheme;
use tracing::debug;

use crate::errors::{AppError, CliError};

use super::commands;
use super::io as cli_io;
use super::output;
use super::preview::LabelPreviewBackend;
use super::registry::CommandRegistry;
pub use super::shell_context::{CliMode, ShellContext};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum LoopControl {
    Continue,
    Exit,
}

pub type CommandResult = Result<(), CommandError>;

impl ShellContext {
    /// Context backed by the configuration under `$ASSESSMENT_HOME`.
    pub fn new(mode: CliMode) -> Result<Self, CliError> {
        let config_manager = ConfigManager::from_env()?;
        Self::with_config_manager(mode, config_manager)
    }

    pub fn with_config_manager(
        mode: CliMode,
        config_manager: ConfigManager,
    ) -> Result<Self, CliError> {
        let mut registry = CommandRegistry::new();
        commands::register_all(&mut registry);

        let config = config_manager.load()?;
        output::apply_config(&config);
        debug!(path = %config_manager.config_path().display(), "configuration loaded");

        Ok(ShellContext {
            mode,
            registry,
            store: FormStore::default(),
            display: DisplayState::default(),
            exporter: ExportService::new(config.pdf_scale),
            previews: PreviewRegistry::new(LabelPreviewBackend::default()),
            theme: ColorfulTheme::default(),
            config_manager,
            config,
            last_command: None,
            running: true,
        })
    }

    pub(crate) fn command_names(&self) -> Vec<&'static str> {
        self.registry.names().collect()
    }

    pub(crate) fn prompt(&self) -> String {
        let area = self.store.form().header.area_location.trim();
        let filter = if self.display.filter.is_filtering() {
            " [not-ok]"
        } else {
            ""
        };
        if area.is_empty() {
            format!("assessment{filter} > ")
        } else {
            format!("assessment ({area}){filter} > ")
        }
    }

    pub(crate) fn dispatch(
        &mut self,
        command: &str,
        raw: &str,
        args: &[&str],
    ) -> Result<LoopControl, CommandError> {
        let Some(handler) = self.registry.handler(command) else {
            self.suggest_command(raw);
            return Ok(LoopControl::Continue);
        };
        let result = handler(self, args);
        self.previews.sync(self.store.form());
        match result {
            Ok(()) => Ok(LoopControl::Continue),
            Err(CommandError::ExitRequested) => Ok(LoopControl::Exit),
            Err(err) => Err(err),
        }
    }

    pub(crate) fn process_line(&mut self, line: &str) -> Result<LoopControl, CommandError> {
        let tokens = match super::shell::parse_command_line(line) {
            Ok(tokens) => tokens,
            Err(err) => {
                cli_io::print_warning(err.to_string());
                return Ok(LoopControl::Continue);
            }
        };

        let Some(raw) = tokens.first() else {
            return Ok(LoopControl::Continue);
        };
        let command = raw.to_lowercase();
        let args: Vec<&str> = tokens.iter().skip(1).map(String::as_str).collect();

        self.last_command = Some(line.trim().to_string());

        match self.dispatch(&command, raw, &args) {
            Ok(LoopControl::Exit) => {
                self.running = false;
                Ok(LoopControl::Exit)
            }
            other => other,
        }
    }

    pub(crate) fn suggest_command(&self, input: &str) {
        cli_io::print_warning(format!(
            "Unknown command `{input}`. Type `help` to see available commands."
        ));
        if let Some(best) = self.registry.closest(input) {
            cli_io::print_info(format!("Suggestion: `{best}`?"));
        }
    }

    pub(crate) fn confirm_exit(&self) -> Result<bool, CliError> {
        if self.mode == CliMode::Script {
            return Ok(true);
        }
        cli_io::confirm_action(&self.theme, "Exit and discard this assessment?", false)
            .map_err(CliError::from)
    }

    /// Asks before a destructive action; script mode always proceeds.
    pub(crate) fn confirm(&self, prompt: &str) -> Result<bool, CommandError> {
        match self.mode {
            CliMode::Script => Ok(true),
            CliMode::Interactive => cli_io::confirm_action(&self.theme, prompt, false),
        }
    }

    pub(crate) fn report_error(&self, err: CommandError) -> Result<(), CliError> {
        match err {
            CommandError::ExitRequested => Ok(()),
            CommandError::InvalidArguments(message) => {
                cli_io::print_error(message);
                cli_io::print_hint("Use `help <command>` for usage details.");
                Ok(())
            }
            CommandError::Io(err) if self.mode == CliMode::Interactive => Err(err.into()),
            other => {
                cli_io::print_error(other);
                Ok(())
            }
        }
    }

    pub(crate) fn persist_config(&self) -> CommandResult {
        self.config_manager
            .save(&self.config)
            .map_err(CommandError::from)
    }

    pub(crate) fn resolve_item(&self, item_id: &str) -> Result<ItemCoord, CommandError> {
        self.store.resolve_item(item_id.trim()).map_err(|_| {
            CommandError::InvalidArguments(format!(
                "unknown item `{item_id}` (items are numbered like `3.3`)"
            ))
        })
    }

    /// Resolves an item id and a 1-based instance number.
    pub(crate) fn resolve_instance(
        &self,
        item_id: &str,
        number: &str,
    ) -> Result<InstanceCoord, CommandError> {
        let item = self.resolve_item(item_id)?;
        let count = self
            .store
            .form()
            .item(item.section, item.item)
            .map_or(0, |item| item.instance_count());
        let position = parse_position(number, count, "instance")?;
        Ok(item.instance(position))
    }

    /// Resolves a 1-based section number.
    pub(crate) fn resolve_section(&self, number: &str) -> Result<usize, CommandError> {
        parse_position(number, self.store.form().sections.len(), "section")
    }
}

/// Parses a 1-based position in `1..=count` into a 0-based index.
pub(crate) fn parse_position(raw: &str, count: usize, what: &str) -> Result<usize, CommandError> {
    match raw.trim().parse::<usize>() {
        Ok(n) if (1..=count).contains(&n) => Ok(n - 1),
        _ => Err(CommandError::InvalidArguments(format!(
            "invalid {what} `{raw}` (expected 1-{count})"
        ))),
    }
}

pub(crate) fn parse_date(input: &str) -> Result<NaiveDate, CommandError> {
    NaiveDate::parse_from_str(input.trim(), "%Y-%m-%d").map_err(|_| {
        CommandError::InvalidArguments(format!("invalid date `{input}` (use YYYY-MM-DD)"))
    })
}

#[derive(Debug, thiserror::Error)]
pub enum CommandError {
    #[error("{0}")]
    InvalidArguments(String),
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Serde(#[from] serde_json::Error),
    #[error(transparent)]
    App(#[from] AppError),
    #[error(transparent)]
    Dialoguer(#[from] dialoguer::Error),
    #[error("exit requested")]
    ExitRequested,
}

impl From<CoreError> for CommandError {
    fn from(err: CoreError) -> Self {
        CommandError::App(AppError::from(err))
    }
}

impl From<ConfigError> for CommandError {
    fn from(err: ConfigError) -> Self {
        CommandError::App(AppError::from(err))
    }
}

impl From<CliError> for CommandError {
    fn from(err: CliError) -> Self {
        match err {
            CliError::App(inner) => CommandError::App(inner),
            CliError::Command(message) => CommandError::InvalidArguments(message),
        }
    }
}

impl From<CommandError> for CliError {
    fn from(err: CommandError) -> Self {
        CliError::Command(err.to_string())
    }
}

/// Runs `lines` through a script-mode shell whose configuration lives in `home`.
#[cfg(test)]
pub(crate) fn process_script(
    home: &std::path::Path,
    lines: &[&str],
) -> Result<ShellContext, CliError> {
    let manager = ConfigManager::with_base_dir(home.to_path_buf())?;
    let mut context = ShellContext::with_config_manager(CliMode::Script, manager)?;
    for line in lines {
        match context.process_line(line) {
            Ok(LoopControl::Continue) => {}
            Ok(LoopControl::Exit) => break,
            Err(err) => context.report_error(err)?,
        }
    }
    Ok(context)
}
