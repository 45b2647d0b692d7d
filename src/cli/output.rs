use std::fmt;

use assessment_config::Config;
use assessment_domain::Status;
use colored::{ColoredString, Colorize};

/// Message categories used by the CLI output helpers.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MessageKind {
    Info,
    Success,
    Warning,
    Error,
    Hint,
    Section,
    Separator,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct OutputPreferences {
    pub color_enabled: bool,
}

impl OutputPreferences {
    pub fn from_config(config: &Config) -> Self {
        Self {
            color_enabled: config.ui_color_enabled,
        }
    }
}

/// Colour stays automatic (terminal and `NO_COLOR` aware) unless disabled.
pub fn set_preferences(prefs: OutputPreferences) {
    if prefs.color_enabled {
        colored::control::unset_override();
    } else {
        colored::control::set_override(false);
    }
}

pub fn apply_config(config: &Config) {
    set_preferences(OutputPreferences::from_config(config));
}

fn label(kind: MessageKind) -> &'static str {
    match kind {
        MessageKind::Info => "[i]",
        MessageKind::Success => "[ok]",
        MessageKind::Warning => "[!]",
        MessageKind::Error => "[x]",
        MessageKind::Hint => "  ->",
        MessageKind::Section | MessageKind::Separator => "",
    }
}

fn apply_style(kind: MessageKind, message: impl fmt::Display) -> String {
    let text = message.to_string();
    let formatted = match kind {
        MessageKind::Section => format!("=== {} ===", text.trim()),
        MessageKind::Separator => "-".repeat(40),
        _ => format!("{} {text}", label(kind)),
    };

    match kind {
        MessageKind::Success => formatted.bright_green().to_string(),
        MessageKind::Warning => formatted.bright_yellow().to_string(),
        MessageKind::Error => formatted.bright_red().to_string(),
        MessageKind::Hint => formatted.dimmed().to_string(),
        MessageKind::Section => formatted.bold().to_string(),
        MessageKind::Info | MessageKind::Separator => formatted,
    }
}

pub fn print(kind: MessageKind, message: impl fmt::Display) {
    let formatted = apply_style(kind, message);
    match kind {
        MessageKind::Section => println!("\n{formatted}"),
        _ => println!("{formatted}"),
    }
}

pub fn info(message: impl fmt::Display) {
    print(MessageKind::Info, message);
}

pub fn success(message: impl fmt::Display) {
    print(MessageKind::Success, message);
}

pub fn warning(message: impl fmt::Display) {
    print(MessageKind::Warning, message);
}

pub fn error(message: impl fmt::Display) {
    print(MessageKind::Error, message);
}

pub fn hint(message: impl fmt::Display) {
    print(MessageKind::Hint, message);
}

pub fn section(title: impl fmt::Display) {
    print(MessageKind::Section, title);
}

pub fn separator() {
    print(MessageKind::Separator, "");
}

/// Status badge; unset renders as `--`.
pub fn status_badge(status: Option<Status>) -> ColoredString {
    match status {
        Some(Status::Ok) => Status::Ok.label().green(),
        Some(Status::NotOk) => Status::NotOk.label().red().bold(),
        Some(Status::NotApplicable) => Status::NotApplicable.label().yellow(),
        None => "--".dimmed(),
    }
}

/// Prints label/value rows with the labels padded to a common width.
pub fn two_column<L: AsRef<str>, V: fmt::Display>(rows: &[(L, V)]) {
    let width = rows
        .iter()
        .map(|(label, _)| label.as_ref().chars().count())
        .max()
        .unwrap_or(0);
    for (label, value) in rows {
        let padded = format!("{:<width$}", label.as_ref());
        println!("  {}  {value}", padded.bold());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn styles_carry_prefixes() {
        assert!(apply_style(MessageKind::Warning, "careful").contains("[!] careful"));
        assert!(apply_style(MessageKind::Section, " Summary ").contains("=== Summary ==="));
        assert_eq!(&*status_badge(None), "--");
        assert_eq!(&*status_badge(Some(Status::NotOk)), "Not OK");
    }

    #[test]
    fn preferences_follow_config() {
        let config = Config {
            ui_color_enabled: false,
            ..Config::default()
        };
        assert!(!OutputPreferences::from_config(&config).color_enabled);
        assert!(OutputPreferences::from_config(&Config::default()).color_enabled);
    }
}
